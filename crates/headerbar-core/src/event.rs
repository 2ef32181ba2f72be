#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! Hosts translate whatever their windowing or touch layer produces into these
//! types once; overflow surfaces and the header container only ever see
//! [`Event`].
//!
//! # Design Notes
//!
//! - Pointer coordinates are 0-indexed cells. Only presses are delivered; a
//!   touch tap is a [`MouseButton::Left`] press.
//! - Shift+Tab may arrive as [`KeyCode::BackTab`] or as `Tab` with
//!   [`Modifiers::SHIFT`]; menus treat both the same.
//! - `KeyEventKind` defaults to `Press` when the host cannot tell.
//! - [`Event::Back`] covers the hardware back button and system dismiss
//!   gestures such as swiping a sheet down.

use bitflags::bitflags;

/// Canonical input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A pointer event (mouse click or touch).
    Mouse(MouseEvent),

    /// Hardware back button or a system dismiss gesture.
    Back,

    /// Focus gained or lost.
    ///
    /// `true` = focus gained, `false` = focus lost.
    Focus(bool),
}

impl Event {
    /// Left-button press (or tap) at the given cell.
    #[must_use]
    pub const fn tap(x: u16, y: u16) -> Self {
        Self::Mouse(MouseEvent::new(MouseButton::Left, x, y))
    }

    /// Key press with no modifiers.
    #[must_use]
    pub const fn key(code: KeyCode) -> Self {
        Self::Key(KeyEvent::new(code))
    }

    /// Returns the position if this is a left-button press.
    #[must_use]
    pub const fn left_press_position(&self) -> Option<(u16, u16)> {
        match self {
            Self::Mouse(MouseEvent {
                button: MouseButton::Left,
                x,
                y,
            }) => Some((*x, *y)),
            _ => None,
        }
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Press or auto-repeat; releases are ignored by menus.
    #[must_use]
    pub const fn is_press(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press | KeyEventKind::Repeat)
    }

    /// Shift+Tab, whether reported as `BackTab` or as `Tab` with Shift held.
    #[must_use]
    pub const fn is_back_tab(&self) -> bool {
        match self.code {
            KeyCode::BackTab => true,
            KeyCode::Tab => self.modifiers.contains(Modifiers::SHIFT),
            _ => false,
        }
    }
}

/// Key codes relevant to menu navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character key.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Escape key.
    Escape,
    /// Tab key.
    Tab,
    /// Shift+Tab.
    BackTab,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,
    /// Key is being held (auto-repeat).
    Repeat,
    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A pointer press (mouse click or touch down).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// Which button went down.
    pub button: MouseButton,

    /// X coordinate (0-indexed, leftmost column is 0).
    pub x: u16,

    /// Y coordinate (0-indexed, topmost row is 0).
    pub y: u16,
}

impl MouseEvent {
    /// Create a new pointer press.
    #[must_use]
    pub const fn new(button: MouseButton, x: u16, y: u16) -> Self {
        Self { button, x, y }
    }
}

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left button, or a touch.
    Left,
    /// Right button.
    Right,
}
