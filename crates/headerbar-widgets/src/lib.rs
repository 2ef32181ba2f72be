#![forbid(unsafe_code)]

//! Header action buttons with a platform overflow menu.
//!
//! Buttons are declared as [`Item`]s with a visibility policy. `always`
//! buttons render inline; `never` buttons are collected behind a single
//! overflow trigger. Pressing the trigger opens an action sheet (iOS) or a
//! popup menu (everywhere else), and a selection calls the chosen button's
//! handler exactly once.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use headerbar_core::geometry::Rect;
//! use headerbar_core::platform::Platform;
//! use headerbar_widgets::{HeaderButtons, HeaderButtonsConfig, Item, TriggerOutcome, Visibility};
//!
//! let reported = Rc::new(Cell::new(false));
//! let flag = Rc::clone(&reported);
//! let mut header = HeaderButtons::new(HeaderButtonsConfig::default().platform(Platform::Ios))
//!     .with_items([
//!         Item::new("Search").icon("search"),
//!         Item::new("Report").show(Visibility::Never).on_press(move || flag.set(true)),
//!     ]);
//! header.set_viewport(Rect::new(0, 0, 40, 20));
//! header.render(Rect::new(0, 0, 40, 1));
//!
//! assert_eq!(header.press_overflow_trigger(), TriggerOutcome::Opened);
//! header.select_overflow_row(0);
//! assert!(reported.get());
//! ```

pub mod allocator;
pub mod config;
pub mod container;
pub mod descriptor;
pub mod dispatch;
pub mod error;
pub mod menu;

pub use allocator::{Allocation, allocate};
pub use config::{
    HeaderButtonsConfig, OverflowMenuPressHandler, OverflowMenuPressParams, TriggerRef,
};
pub use container::{
    HeaderAction, HeaderButtons, HeaderRow, OverflowStrategy, RenderedButton, RenderedTrigger,
    TriggerOutcome,
};
pub use descriptor::{
    ButtonContent, ButtonDescriptor, ButtonId, CustomElement, Item, PressHandler, PropValue,
    Props, Visibility, normalize,
};
pub use dispatch::{DispatchOutcome, DispatchRouter, DispatchSource, DispatchStats};
pub use error::{Error, Result};
pub use menu::{
    MenuState, MenuStats, MenuView, OverflowMenuController, OverflowSurface, Resolution,
    SurfaceKind, SurfaceOutcome,
};

/// Test identifier of the overflow trigger, independent of caller input.
pub const OVERFLOW_BUTTON_TEST_ID: &str = "headerOverflowButton";

/// Label of the action sheet's cancel row unless overridden.
pub const DEFAULT_CANCEL_TITLE: &str = "cancel";
