#![forbid(unsafe_code)]

//! headerbar public facade crate.
//!
//! Re-exports the declaration, container, and menu types from the internal
//! crates and offers a prelude for day-to-day usage.

// --- Core re-exports -------------------------------------------------------

pub use headerbar_core::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent,
};
pub use headerbar_core::geometry::{Rect, Sides};
pub use headerbar_core::platform::{Platform, UnknownPlatform};

// --- Widget re-exports -----------------------------------------------------

pub use headerbar_widgets::menu::{
    ActionSheet, MenuRow, Placement, PopupConfig, PopupMenu, SheetConfig, build_surface,
};
pub use headerbar_widgets::{
    Allocation, ButtonContent, ButtonDescriptor, ButtonId, DEFAULT_CANCEL_TITLE, DispatchOutcome,
    DispatchRouter, DispatchSource, DispatchStats, HeaderAction, HeaderButtons,
    HeaderButtonsConfig, HeaderRow, Item, MenuState, MenuStats, MenuView,
    OVERFLOW_BUTTON_TEST_ID, OverflowMenuController, OverflowMenuPressHandler,
    OverflowMenuPressParams, OverflowStrategy, OverflowSurface, PropValue, Props, RenderedButton,
    RenderedTrigger, Resolution, SurfaceKind, SurfaceOutcome, TriggerOutcome, TriggerRef,
    Visibility, allocate, normalize,
};

// --- Errors ---------------------------------------------------------------

pub use headerbar_widgets::{Error, Result};

pub mod prelude {
    pub use crate::{
        Event, HeaderAction, HeaderButtons, HeaderButtonsConfig, Item, KeyCode, Platform, Rect,
        Result, TriggerOutcome, Visibility,
    };

    pub use crate::{core, widgets};
}

pub use headerbar_core as core;
pub use headerbar_widgets as widgets;
