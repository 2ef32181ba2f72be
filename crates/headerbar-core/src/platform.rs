#![forbid(unsafe_code)]

//! Target platform families.
//!
//! Only the overflow surface differs between families: iOS uses a bottom
//! action sheet with an explicit cancel row, everything else uses a popup
//! list anchored to the overflow trigger.

use std::fmt;
use std::str::FromStr;

/// Platform family that decides which overflow surface is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Platform {
    /// Apple mobile family: action sheet.
    Ios,
    /// Android and every other target: anchored popup menu.
    Android,
}

impl Platform {
    /// Platform of the current compilation target.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(target_os = "ios") {
            Self::Ios
        } else {
            Self::Android
        }
    }

    /// Lowercase name, as used in declarative configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Android => "android",
        }
    }

}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a platform name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown platform: {0:?} (expected \"ios\" or \"android\")")]
pub struct UnknownPlatform(pub String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ios" => Ok(Self::Ios),
            "android" => Ok(Self::Android),
            _ => Err(UnknownPlatform(s.to_owned())),
        }
    }
}
