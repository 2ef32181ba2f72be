#![forbid(unsafe_code)]

//! Popup menu anchored to the overflow trigger.
//!
//! The popup opens below the trigger with its right edge aligned to the
//! trigger's right edge, flips above when there is not enough room below,
//! and is clamped horizontally to the viewport. There is no cancel row:
//! tapping outside, Escape, Back, or focus loss dismiss it.
//!
//! Presenting without an anchor is refused; the popup has nothing to attach
//! to. A popup that does not fit is still opened with its height clamped to
//! the room available; rows that fall outside get an empty area and stay
//! reachable through `row_outcome` and the keyboard.

use headerbar_core::event::Event;
use headerbar_core::geometry::{Rect, Sides};
use unicode_width::UnicodeWidthStr;

use super::surface::{
    Highlight, KeyIntent, MenuRow, MenuView, OverflowSurface, PresentRequest, SurfaceKind,
    SurfaceOutcome, is_dismiss_event, navigate,
};

/// Where the popup ended up relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Below,
    Above,
}

impl Placement {
    fn flip(self) -> Self {
        match self {
            Self::Below => Self::Above,
            Self::Above => Self::Below,
        }
    }
}

/// Popup sizing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct PopupConfig {
    /// Minimum content width in cells.
    pub min_width: u16,
    /// Maximum content width in cells.
    pub max_width: u16,
    /// Horizontal padding on each side of a label.
    pub padding: u16,
    /// Rows between the anchor and the popup.
    pub gap: u16,
    /// Whether a one-cell border surrounds the rows.
    pub bordered: bool,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            min_width: 8,
            max_width: 40,
            padding: 1,
            gap: 0,
            bordered: true,
        }
    }
}

impl PopupConfig {
    #[must_use]
    pub fn min_width(mut self, w: u16) -> Self {
        self.min_width = w;
        self
    }

    #[must_use]
    pub fn max_width(mut self, w: u16) -> Self {
        self.max_width = w;
        self
    }

    #[must_use]
    pub fn padding(mut self, padding: u16) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    #[must_use]
    pub fn with_border(mut self, bordered: bool) -> Self {
        self.bordered = bordered;
        self
    }

    fn border_overhead(&self) -> u16 {
        if self.bordered { 2 } else { 0 }
    }
}

/// Popup menu surface.
#[derive(Debug, Clone, Default)]
pub struct PopupMenu {
    config: PopupConfig,
    presented: bool,
    placement: Option<Placement>,
    area: Rect,
    rows: Vec<MenuRow>,
    highlight: Highlight,
}

impl PopupMenu {
    #[must_use]
    pub fn new(config: PopupConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Placement chosen at the last `present`, if presented.
    #[must_use]
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    fn content_width(&self, labels: &[&str]) -> u16 {
        let widest = labels.iter().map(|l| l.width()).max().unwrap_or(0);
        let widest = u16::try_from(widest).unwrap_or(u16::MAX);
        let padded = widest.saturating_add(self.config.padding.saturating_mul(2));
        padded
            .max(self.config.min_width)
            .min(self.config.max_width.max(self.config.min_width))
    }

    fn available(&self, placement: Placement, anchor: Rect, viewport: Rect) -> u16 {
        let space = match placement {
            Placement::Below => viewport.bottom().saturating_sub(anchor.bottom()),
            Placement::Above => anchor.y.saturating_sub(viewport.y),
        };
        space.saturating_sub(self.config.gap)
    }

    fn resolve_placement(&self, anchor: Rect, viewport: Rect, needed: u16) -> Placement {
        let primary = Placement::Below;
        let available = self.available(primary, anchor, viewport);
        if available >= needed {
            return primary;
        }
        let flipped = primary.flip();
        let flipped_available = self.available(flipped, anchor, viewport);
        if flipped_available >= needed || flipped_available > available {
            flipped
        } else {
            primary
        }
    }

    /// Compute the popup bounds, clamped to the room on the chosen side.
    fn compute_area(&self, labels: &[&str], anchor: Rect, viewport: Rect) -> (Placement, Rect) {
        let border = self.config.border_overhead();
        let row_count = u16::try_from(labels.len()).unwrap_or(u16::MAX);
        let needed = row_count.saturating_add(border);
        let total_width = self
            .content_width(labels)
            .saturating_add(border)
            .min(viewport.width);

        let placement = self.resolve_placement(anchor, viewport, needed);
        let height = needed.min(self.available(placement, anchor, viewport));

        let y = match placement {
            Placement::Below => anchor.bottom().saturating_add(self.config.gap),
            Placement::Above => anchor
                .y
                .saturating_sub(self.config.gap)
                .saturating_sub(height),
        };
        let x = clamp_x(
            anchor.right().saturating_sub(total_width),
            total_width,
            viewport,
        );
        (placement, Rect::new(x, y, total_width, height))
    }
}

/// Clamp x position so the popup doesn't overflow the viewport.
fn clamp_x(x: u16, width: u16, viewport: Rect) -> u16 {
    let vp_right = viewport.right();
    if x.saturating_add(width) > vp_right {
        vp_right.saturating_sub(width)
    } else {
        x.max(viewport.x)
    }
}

impl OverflowSurface for PopupMenu {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::PopupMenu
    }

    fn present(&mut self, request: PresentRequest<'_>) -> bool {
        let Some(anchor) = request.anchor else {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                target: headerbar_core::logging::TARGET,
                rows = request.rows.len(),
                "popup menu needs the overflow trigger position; not opening"
            );
            return false;
        };
        if request.rows.is_empty() {
            return false;
        }

        let unplaced = |labels: &[&str]| -> Vec<MenuRow> {
            labels
                .iter()
                .map(|l| MenuRow::new(*l, Rect::default()))
                .collect()
        };

        if request.viewport.is_empty() {
            self.placement = Some(Placement::Below);
            self.area = Rect::default();
            self.rows = unplaced(request.rows);
        } else {
            let (placement, area) = self.compute_area(request.rows, anchor, request.viewport);
            let inner = if self.config.bordered {
                area.inner(Sides::all(1))
            } else {
                area
            };
            self.placement = Some(placement);
            self.area = area;
            self.rows = request
                .rows
                .iter()
                .enumerate()
                .map(|(i, label)| {
                    let rect = match u16::try_from(i) {
                        Ok(i) if i < inner.height => Rect::new(inner.x, inner.y + i, inner.width, 1),
                        _ => Rect::default(),
                    };
                    MenuRow::new(*label, rect)
                })
                .collect();
        }

        self.highlight.reset(self.rows.len());
        self.presented = true;
        true
    }

    fn view(&self) -> Option<MenuView<'_>> {
        self.presented.then(|| MenuView {
            kind: SurfaceKind::PopupMenu,
            backdrop: None,
            area: self.area,
            rows: &self.rows,
            cancel: None,
            highlighted: self.highlight.current(),
        })
    }

    fn handle_event(&mut self, event: &Event) -> Option<SurfaceOutcome> {
        if !self.presented {
            return None;
        }
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
                if let Some(row) = self.rows.iter().position(|r| r.area.contains(x, y)) {
                    Some(SurfaceOutcome::Selected(row))
                } else if self.area.contains(x, y) {
                    None
                } else {
                    Some(SurfaceOutcome::Dismissed)
                }
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
        self.presented = false;
        self.placement = None;
        self.area = Rect::default();
        self.rows.clear();
        self.highlight.reset(0);
    }
}
