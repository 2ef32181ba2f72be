#![forbid(unsafe_code)]

//! Overflow menu controller.
//!
//! The controller owns the open/closed state machine and a snapshot of the
//! hidden buttons taken when the menu opens. Which surface it drives is
//! decided once, at construction; nothing in here checks the platform.
//!
//! # State machine
//!
//! ```text
//! Closed --open(non-empty)--> Opening --present ok--> Open
//!                                     \--refused---> Closed
//! Open --row activated--> Selected(descriptor) --> Closed
//! Open --dismissed------> Cancelled             --> Closed
//! ```
//!
//! Opening with an empty hidden set, opening while not `Closed`, and
//! resolving while not `Open` are silent no-ops.
//!
//! # Invariants
//!
//! 1. One open produces at most one [`Resolution`].
//! 2. A `Selected` resolution carries a descriptor from the snapshot taken at
//!    open time, never one from a later configuration.
//! 3. After any resolution the state is `Closed` and the surface holds no
//!    presented state.

mod action_sheet;
mod popup;
mod surface;

pub use action_sheet::{ActionSheet, SheetConfig};
pub use popup::{Placement, PopupConfig, PopupMenu};
pub use surface::{
    MenuRow, MenuView, OverflowSurface, PresentRequest, SurfaceKind, SurfaceOutcome,
};

use headerbar_core::event::Event;
use headerbar_core::geometry::Rect;
use headerbar_core::platform::Platform;
use web_time::{Duration, Instant};

use crate::descriptor::ButtonDescriptor;

/// Controller lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MenuState {
    #[default]
    Closed,
    /// Between accepting an open request and the surface presenting.
    Opening,
    Open,
}

impl MenuState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Opening => "opening",
            Self::Open => "open",
        }
    }
}

/// How an open menu ended.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// A row was activated; the descriptor it stood for.
    Selected(ButtonDescriptor),
    /// Closed without a selection. Nothing is dispatched.
    Cancelled,
}

impl Resolution {
    #[must_use]
    pub fn selected(&self) -> Option<&ButtonDescriptor> {
        match self {
            Self::Selected(d) => Some(d),
            Self::Cancelled => None,
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Open/resolve counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuStats {
    pub opened: u64,
    /// Open requests the surface refused to present (a popup with no anchor).
    pub refused: u64,
    pub selected: u64,
    pub cancelled: u64,
    /// How long the most recently resolved menu stayed open.
    pub last_open_duration: Option<Duration>,
}

/// Build the surface for `platform`.
#[must_use]
pub fn build_surface(
    platform: Platform,
    sheet: &SheetConfig,
    popup: &PopupConfig,
    cancel_title: &str,
) -> Box<dyn OverflowSurface> {
    match platform {
        Platform::Ios => Box::new(ActionSheet::new(sheet.clone(), cancel_title)),
        Platform::Android => Box::new(PopupMenu::new(popup.clone())),
    }
}

/// Drives one overflow surface through the menu state machine.
#[derive(Debug)]
pub struct OverflowMenuController {
    surface: Box<dyn OverflowSurface>,
    state: MenuState,
    hidden: Vec<ButtonDescriptor>,
    viewport: Rect,
    opened_at: Option<Instant>,
    stats: MenuStats,
}

impl OverflowMenuController {
    #[must_use]
    pub fn new(surface: Box<dyn OverflowSurface>) -> Self {
        Self {
            surface,
            state: MenuState::Closed,
            hidden: Vec::new(),
            viewport: Rect::default(),
            opened_at: None,
            stats: MenuStats::default(),
        }
    }

    /// Screen area available to the surface. Empty means a native host
    /// draws the menu and resolves it through [`select`](Self::select) and
    /// [`dismiss`](Self::dismiss).
    #[must_use]
    pub fn with_viewport(mut self, viewport: Rect) -> Self {
        self.viewport = viewport;
        self
    }

    /// Takes effect on the next open.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    /// Present `hidden` as menu rows.
    ///
    /// Returns `true` if the menu is now open. Returns `false`, leaving the
    /// state untouched, if `hidden` is empty or the menu is not `Closed`.
    /// Returns `false` and stays `Closed` if the surface refuses to present.
    pub fn open<'a, I>(&mut self, hidden: I, anchor: Option<Rect>) -> bool
    where
        I: IntoIterator<Item = &'a ButtonDescriptor>,
    {
        if self.state != MenuState::Closed {
            return false;
        }
        let snapshot: Vec<ButtonDescriptor> = hidden.into_iter().cloned().collect();
        if snapshot.is_empty() {
            return false;
        }

        self.transition(MenuState::Opening);
        let presented = {
            let labels: Vec<&str> = snapshot.iter().map(ButtonDescriptor::title).collect();
            self.surface.present(PresentRequest {
                rows: &labels,
                anchor,
                viewport: self.viewport,
            })
        };

        if !presented {
            self.surface.teardown();
            self.stats.refused = self.stats.refused.saturating_add(1);
            self.transition(MenuState::Closed);
            return false;
        }

        self.hidden = snapshot;
        self.opened_at = Some(Instant::now());
        self.stats.opened = self.stats.opened.saturating_add(1);
        self.transition(MenuState::Open);
        true
    }

    /// Feed one input event to the open surface.
    pub fn handle_event(&mut self, event: &Event) -> Option<Resolution> {
        if self.state != MenuState::Open {
            return None;
        }
        let outcome = self.surface.handle_event(event)?;
        Some(self.resolve(outcome))
    }

    /// Native host callback: row `row` was chosen. Rows past the hidden set
    /// (including an action sheet's cancel index) cancel.
    pub fn select(&mut self, row: usize) -> Option<Resolution> {
        if self.state != MenuState::Open {
            return None;
        }
        let outcome = self.surface.row_outcome(row);
        Some(self.resolve(outcome))
    }

    /// Native host callback: the menu was dismissed.
    pub fn dismiss(&mut self) -> Option<Resolution> {
        if self.state != MenuState::Open {
            return None;
        }
        Some(self.resolve(SurfaceOutcome::Dismissed))
    }

    fn resolve(&mut self, outcome: SurfaceOutcome) -> Resolution {
        let hidden = std::mem::take(&mut self.hidden);
        let resolution = match outcome {
            SurfaceOutcome::Selected(row) => hidden
                .into_iter()
                .nth(row)
                .map_or(Resolution::Cancelled, Resolution::Selected),
            SurfaceOutcome::Dismissed => Resolution::Cancelled,
        };

        let open_for = self.opened_at.take().map(|at| at.elapsed());
        self.stats.last_open_duration = open_for;
        match &resolution {
            Resolution::Selected(_) => self.stats.selected = self.stats.selected.saturating_add(1),
            Resolution::Cancelled => self.stats.cancelled = self.stats.cancelled.saturating_add(1),
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: headerbar_core::logging::TARGET,
            surface = ?self.surface.kind(),
            selected = resolution.selected().map(|d| d.id().index()),
            open_us = open_for.map(|d| u64::try_from(d.as_micros()).unwrap_or(u64::MAX)),
            "headerbar.menu.resolve"
        );

        self.surface.teardown();
        self.transition(MenuState::Closed);
        resolution
    }

    fn transition(&mut self, to: MenuState) {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: headerbar_core::logging::TARGET,
            from = self.state.as_str(),
            to = to.as_str(),
            "headerbar.menu.transition"
        );
        self.state = to;
    }

    /// What the host should draw, `None` unless open.
    #[must_use]
    pub fn view(&self) -> Option<MenuView<'_>> {
        if self.state == MenuState::Open {
            self.surface.view()
        } else {
            None
        }
    }

    #[must_use]
    pub fn state(&self) -> MenuState {
        self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == MenuState::Open
    }

    #[must_use]
    pub fn kind(&self) -> SurfaceKind {
        self.surface.kind()
    }

    /// Buttons listed in the open menu; empty when closed.
    #[must_use]
    pub fn hidden(&self) -> &[ButtonDescriptor] {
        &self.hidden
    }

    #[must_use]
    pub fn stats(&self) -> MenuStats {
        self.stats
    }
}
