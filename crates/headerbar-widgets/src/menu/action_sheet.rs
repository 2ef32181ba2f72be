#![forbid(unsafe_code)]

//! Bottom action sheet with a separate cancel row.
//!
//! Layout, bottom-up inside the viewport minus `margin`:
//! 1) the cancel row,
//! 2) `gap` empty rows,
//! 3) the option rows, last row nearest the cancel row.
//!
//! The whole viewport acts as a backdrop. Option rows that do not fit get an
//! empty area and stay reachable by keyboard or native row index.
//!
//! # Outcomes
//! - Option row → `Selected(row)`.
//! - Cancel row (index `rows.len()`), backdrop tap, Escape, Back, focus
//!   loss → `Dismissed`.

use headerbar_core::event::Event;
use headerbar_core::geometry::{Rect, Sides};

use super::surface::{
    Highlight, KeyIntent, MenuRow, MenuView, OverflowSurface, PresentRequest, SurfaceKind,
    SurfaceOutcome, is_dismiss_event, navigate,
};

/// Action sheet layout and close behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct SheetConfig {
    /// Cells kept free around the sheet.
    pub margin: u16,
    /// Empty rows between the options and the cancel row.
    pub gap: u16,
    /// Whether tapping outside the sheet cancels.
    pub close_on_backdrop: bool,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            margin: 1,
            gap: 1,
            close_on_backdrop: true,
        }
    }
}

impl SheetConfig {
    #[must_use]
    pub fn margin(mut self, margin: u16) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    #[must_use]
    pub fn close_on_backdrop(mut self, close: bool) -> Self {
        self.close_on_backdrop = close;
        self
    }
}

/// Action sheet surface.
#[derive(Debug, Clone)]
pub struct ActionSheet {
    config: SheetConfig,
    cancel_title: String,
    viewport: Rect,
    area: Rect,
    rows: Vec<MenuRow>,
    cancel: Option<MenuRow>,
    highlight: Highlight,
}

impl ActionSheet {
    /// Create a sheet whose cancel row reads `cancel_title`.
    #[must_use]
    pub fn new(config: SheetConfig, cancel_title: impl Into<String>) -> Self {
        Self {
            config,
            cancel_title: cancel_title.into(),
            viewport: Rect::default(),
            area: Rect::default(),
            rows: Vec::new(),
            cancel: None,
            highlight: Highlight::default(),
        }
    }

    #[must_use]
    pub fn cancel_title(&self) -> &str {
        &self.cancel_title
    }

    /// Index reported for the cancel row.
    #[must_use]
    pub fn cancel_index(&self) -> usize {
        self.rows.len()
    }

    fn layout(&mut self, labels: &[&str], viewport: Rect) {
        let inner = viewport.inner(Sides::all(self.config.margin));
        if inner.is_empty() {
            self.area = Rect::default();
            self.rows = labels
                .iter()
                .map(|l| MenuRow::new(*l, Rect::default()))
                .collect();
            self.cancel = Some(MenuRow::new(self.cancel_title.as_str(), Rect::default()));
            return;
        }

        let cancel_y = inner.bottom() - 1;
        let cancel_area = Rect::new(inner.x, cancel_y, inner.width, 1);
        let rows_bottom = cancel_y.saturating_sub(self.config.gap).max(inner.y);
        let capacity = usize::from(rows_bottom - inner.y);
        let visible = labels.len().min(capacity);
        // visible <= capacity, which came from a u16.
        let rows_top = rows_bottom - visible as u16;

        self.rows = labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let area = if i < visible {
                    Rect::new(inner.x, rows_top + i as u16, inner.width, 1)
                } else {
                    Rect::default()
                };
                MenuRow::new(*label, area)
            })
            .collect();
        self.cancel = Some(MenuRow::new(self.cancel_title.as_str(), cancel_area));
        self.area = Rect::new(inner.x, rows_top, inner.width, inner.bottom() - rows_top);
    }

    fn hit(&self, x: u16, y: u16) -> Option<SurfaceOutcome> {
        if let Some(row) = self.rows.iter().position(|r| r.area.contains(x, y)) {
            return Some(SurfaceOutcome::Selected(row));
        }
        if self.cancel.as_ref().is_some_and(|c| c.area.contains(x, y)) {
            return Some(SurfaceOutcome::Dismissed);
        }
        if self.area.contains(x, y) {
            return None;
        }
        self.config
            .close_on_backdrop
            .then_some(SurfaceOutcome::Dismissed)
    }
}

impl OverflowSurface for ActionSheet {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::ActionSheet
    }

    fn present(&mut self, request: PresentRequest<'_>) -> bool {
        if request.rows.is_empty() {
            return false;
        }
        self.viewport = request.viewport;
        self.layout(request.rows, request.viewport);
        self.highlight.reset(request.rows.len() + 1);
        true
    }

    fn view(&self) -> Option<MenuView<'_>> {
        let cancel = self.cancel.as_ref()?;
        Some(MenuView {
            kind: SurfaceKind::ActionSheet,
            backdrop: (!self.viewport.is_empty()).then_some(self.viewport),
            area: self.area,
            rows: &self.rows,
            cancel: Some(cancel),
            highlighted: self.highlight.current(),
        })
    }

    fn handle_event(&mut self, event: &Event) -> Option<SurfaceOutcome> {
        self.cancel.as_ref()?;
        if is_dismiss_event(event) {
            return Some(SurfaceOutcome::Dismissed);
        }
        match event {
            Event::Key(key) => match navigate(&mut self.highlight, &self.rows, key) {
                KeyIntent::Activate(row) => Some(self.row_outcome(row)),
                KeyIntent::Dismiss => Some(SurfaceOutcome::Dismissed),
                KeyIntent::Moved | KeyIntent::Ignored => None,
            },
            _ => {
                let (x, y) = event.left_press_position()?;
                self.hit(x, y)
            }
        }
    }

    fn row_outcome(&self, row: usize) -> SurfaceOutcome {
        if row < self.rows.len() {
            SurfaceOutcome::Selected(row)
        } else {
            SurfaceOutcome::Dismissed
        }
    }

    fn teardown(&mut self) {
        self.viewport = Rect::default();
        self.area = Rect::default();
        self.rows.clear();
        self.cancel = None;
        self.highlight.reset(0);
    }
}
