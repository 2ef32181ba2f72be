//! Errors raised at the declaration boundary.
//!
//! Nothing past normalization can fail: inert buttons, empty menus and
//! repeated open/close calls are all silent no-ops. Errors only exist where
//! callers hand us strings or JSON to parse.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown visibility policy: {value:?} (expected \"always\" or \"never\")")]
    UnknownVisibility { value: String },

    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
