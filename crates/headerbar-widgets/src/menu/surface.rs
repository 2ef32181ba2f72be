#![forbid(unsafe_code)]

//! The overflow surface capability.
//!
//! A surface is the platform's selection UI: it lays out rows when presented,
//! exposes a [`MenuView`] for the host renderer, and turns input into a
//! [`SurfaceOutcome`]. Surfaces know nothing about buttons or handlers; they
//! only see row labels and report row indices.
//!
//! An empty viewport means the host draws a native widget itself. Surfaces
//! still present in that case, with empty row areas, and resolve through
//! keyboard input or the controller's `select`/`dismiss` calls.

use std::fmt;

use headerbar_core::event::{Event, KeyCode, KeyEvent};
use headerbar_core::geometry::Rect;

/// Which surface implementation is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// Bottom sheet with a separate cancel row.
    ActionSheet,
    /// List anchored to the overflow trigger.
    PopupMenu,
}

/// Terminal result reported by a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceOutcome {
    /// Row `index` (into the presented rows) was activated.
    Selected(usize),
    /// Closed without a selection.
    Dismissed,
}

/// Arguments to [`OverflowSurface::present`].
#[derive(Debug, Clone, Copy)]
pub struct PresentRequest<'a> {
    /// Row labels, in hidden-set order. Never empty.
    pub rows: &'a [&'a str],
    /// Rendered position of the overflow trigger, if known.
    pub anchor: Option<Rect>,
    /// Screen area the surface may occupy.
    pub viewport: Rect,
}

/// A laid-out menu row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRow {
    pub label: String,
    /// Empty when the row does not fit or the host draws natively.
    pub area: Rect,
}

impl MenuRow {
    pub(crate) fn new(label: impl Into<String>, area: Rect) -> Self {
        Self {
            label: label.into(),
            area,
        }
    }
}

/// What the host should draw while a menu is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuView<'a> {
    pub kind: SurfaceKind,
    /// Dimmed area behind a modal surface.
    pub backdrop: Option<Rect>,
    /// Bounds of the menu itself.
    pub area: Rect,
    pub rows: &'a [MenuRow],
    /// Explicit cancel row, on surfaces that have one.
    pub cancel: Option<&'a MenuRow>,
    /// Keyboard highlight; the cancel row is index `rows.len()`.
    pub highlighted: Option<usize>,
}

/// Platform overflow surface.
pub trait OverflowSurface: fmt::Debug {
    /// Which implementation this is.
    fn kind(&self) -> SurfaceKind;

    /// Lay out and show the rows. Rows that do not fit get an empty area but
    /// stay selectable. Returns `false` only if the surface has nothing to
    /// show or nothing to attach to, in which case it must hold no state.
    fn present(&mut self, request: PresentRequest<'_>) -> bool;

    /// Current view, `None` when not presented.
    fn view(&self) -> Option<MenuView<'_>>;

    /// Interpret one input event. `None` means the menu stays open.
    fn handle_event(&mut self, event: &Event) -> Option<SurfaceOutcome>;

    /// Map a row activated by a native host to an outcome.
    fn row_outcome(&self, row: usize) -> SurfaceOutcome;

    /// Drop presented state after resolution.
    fn teardown(&mut self);
}

/// Keyboard highlight over `len` activatable rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Highlight {
    index: Option<usize>,
    len: usize,
}

impl Highlight {
    pub(crate) fn reset(&mut self, len: usize) {
        self.index = None;
        self.len = len;
    }

    pub(crate) fn current(&self) -> Option<usize> {
        self.index
    }

    fn next(&mut self) {
        if self.len == 0 {
            return;
        }
        self.index = Some(match self.index {
            Some(i) if i + 1 < self.len => i + 1,
            _ => 0,
        });
    }

    fn prev(&mut self) {
        if self.len == 0 {
            return;
        }
        self.index = Some(match self.index {
            Some(0) | None => self.len - 1,
            Some(i) => i - 1,
        });
    }

    fn first(&mut self) {
        if self.len > 0 {
            self.index = Some(0);
        }
    }

    fn last(&mut self) {
        if self.len > 0 {
            self.index = Some(self.len - 1);
        }
    }
}

/// What a key press means for a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyIntent {
    Moved,
    Activate(usize),
    Dismiss,
    Ignored,
}

/// Shared keyboard handling. `rows` are the selectable labels used for
/// first-letter jumps; the highlight may extend past them (cancel row).
pub(crate) fn navigate(highlight: &mut Highlight, rows: &[MenuRow], key: &KeyEvent) -> KeyIntent {
    if !key.is_press() {
        return KeyIntent::Ignored;
    }
    if key.is_back_tab() {
        highlight.prev();
        return KeyIntent::Moved;
    }
    match key.code {
        KeyCode::Escape => KeyIntent::Dismiss,
        KeyCode::Down | KeyCode::Tab => {
            highlight.next();
            KeyIntent::Moved
        }
        KeyCode::Up | KeyCode::BackTab => {
            highlight.prev();
            KeyIntent::Moved
        }
        KeyCode::Home => {
            highlight.first();
            KeyIntent::Moved
        }
        KeyCode::End => {
            highlight.last();
            KeyIntent::Moved
        }
        KeyCode::Enter => highlight
            .current()
            .map_or(KeyIntent::Ignored, KeyIntent::Activate),
        KeyCode::Char(c) => {
            let wanted = c.to_lowercase().next();
            let found = rows.iter().position(|row| {
                row.label.chars().next().and_then(|f| f.to_lowercase().next()) == wanted
            });
            match found {
                Some(i) => {
                    highlight.index = Some(i);
                    KeyIntent::Moved
                }
                None => KeyIntent::Ignored,
            }
        }
    }
}

/// Events that dismiss any surface regardless of position.
pub(crate) fn is_dismiss_event(event: &Event) -> bool {
    matches!(event, Event::Back | Event::Focus(false))
}
