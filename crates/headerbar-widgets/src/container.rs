#![forbid(unsafe_code)]

//! Header button container.
//!
//! [`HeaderButtons`] composes the pieces: declarations are normalized once
//! per [`set_items`](HeaderButtons::set_items), split by the allocator on
//! every render, laid out into fixed-width slots, and input is routed to
//! either direct dispatch or the overflow strategy.
//!
//! # Routing
//!
//! While the default menu is open every event goes to it, and inline
//! presses are ignored. Otherwise a left press is hit-tested against the
//! last rendered [`HeaderRow`]:
//! - inline slot → dispatch that button's handler,
//! - trigger slot → open the menu, or call the override.
//!
//! A menu selection dispatches the selected descriptor; a cancellation
//! dispatches nothing.

use std::fmt;
use std::rc::Rc;

use headerbar_core::event::Event;
use headerbar_core::geometry::Rect;

use crate::allocator::{Allocation, allocate};
use crate::OVERFLOW_BUTTON_TEST_ID;
use crate::config::{
    HeaderButtonsConfig, OverflowMenuPressHandler, OverflowMenuPressParams, TriggerRef,
};
use crate::descriptor::{ButtonDescriptor, ButtonId, CustomElement, Item, Props, normalize};
use crate::dispatch::{DispatchOutcome, DispatchRouter, DispatchSource, DispatchStats};
use crate::menu::{
    MenuState, MenuStats, MenuView, OverflowMenuController, Resolution, SurfaceKind,
    build_surface,
};

/// How the trigger is handled, fixed at construction.
pub enum OverflowStrategy {
    DefaultMenu(OverflowMenuController),
    CustomOverride(OverflowMenuPressHandler),
}

impl OverflowStrategy {
    fn from_config(config: &HeaderButtonsConfig) -> Self {
        match &config.on_overflow_menu_press {
            Some(handler) => Self::CustomOverride(Rc::clone(handler)),
            None => Self::DefaultMenu(OverflowMenuController::new(build_surface(
                config.platform,
                &config.sheet,
                &config.popup,
                &config.overflow_cancel_button_title,
            ))),
        }
    }

    fn controller(&self) -> Option<&OverflowMenuController> {
        match self {
            Self::DefaultMenu(menu) => Some(menu),
            Self::CustomOverride(_) => None,
        }
    }

    fn controller_mut(&mut self) -> Option<&mut OverflowMenuController> {
        match self {
            Self::DefaultMenu(menu) => Some(menu),
            Self::CustomOverride(_) => None,
        }
    }
}

impl fmt::Debug for OverflowStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DefaultMenu(menu) => f.debug_tuple("DefaultMenu").field(menu).finish(),
            Self::CustomOverride(_) => f.write_str("CustomOverride(..)"),
        }
    }
}

/// An inline button placed in a slot.
#[derive(Debug, Clone)]
pub struct RenderedButton {
    /// Empty when the slot fell outside the header area.
    pub area: Rect,
    pub descriptor: ButtonDescriptor,
}

/// The overflow trigger placed in a slot.
#[derive(Debug, Clone)]
pub struct RenderedTrigger {
    pub area: Rect,
    /// Always [`OVERFLOW_BUTTON_TEST_ID`].
    pub test_id: &'static str,
    pub icon: Option<CustomElement>,
    pub wrapper_style: Props,
}

/// What the host should draw for the header.
#[derive(Debug, Clone, Default)]
pub struct HeaderRow {
    pub area: Rect,
    pub buttons: Vec<RenderedButton>,
    /// Present only when some button is hidden.
    pub trigger: Option<RenderedTrigger>,
    /// Host component each inline button is rendered through.
    pub component: Option<CustomElement>,
    pub left: bool,
}

impl HeaderRow {
    /// Slot under `(x, y)`, if any.
    fn hit(&self, x: u16, y: u16) -> Option<Hit> {
        if let Some(button) = self.buttons.iter().find(|b| b.area.contains(x, y)) {
            return Some(Hit::Button(button.descriptor.id()));
        }
        self.trigger
            .as_ref()
            .filter(|t| t.area.contains(x, y))
            .map(|_| Hit::Trigger)
    }
}

#[derive(Debug, Clone, Copy)]
enum Hit {
    Button(ButtonId),
    Trigger,
}

/// Result of pressing the overflow trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// The default menu is now open.
    Opened,
    /// The override was called.
    Overridden,
    /// Nothing happened: no hidden buttons, menu already open, or a popup
    /// with no rendered trigger to anchor to.
    Ignored,
}

/// What [`HeaderButtons::handle_event`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    Dispatched {
        id: ButtonId,
        source: DispatchSource,
        outcome: DispatchOutcome,
    },
    MenuOpened,
    MenuCancelled,
    OverrideInvoked,
}

/// A row of header buttons with an overflow menu.
#[derive(Debug)]
pub struct HeaderButtons {
    config: HeaderButtonsConfig,
    buttons: Vec<ButtonDescriptor>,
    strategy: OverflowStrategy,
    router: DispatchRouter,
    row: HeaderRow,
}

impl HeaderButtons {
    /// Build a container. The overflow strategy is chosen here and does not
    /// change afterwards.
    #[must_use]
    pub fn new(config: HeaderButtonsConfig) -> Self {
        let strategy = OverflowStrategy::from_config(&config);
        let row = HeaderRow {
            left: config.left,
            component: config.header_button_component.clone(),
            ..HeaderRow::default()
        };
        Self {
            config,
            buttons: Vec::new(),
            strategy,
            router: DispatchRouter::new(),
            row,
        }
    }

    #[must_use]
    pub fn with_items<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Option<Item>>,
    {
        self.set_items(items);
        self
    }

    /// Replace the declared buttons and re-lay the last rendered area.
    ///
    /// An open menu stays open over the buttons it was opened with.
    pub fn set_items<I, T>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<Option<Item>>,
    {
        self.buttons = normalize(items);
        self.layout(self.row.area);
    }

    /// Screen area available to the overflow menu.
    pub fn set_viewport(&mut self, viewport: Rect) {
        if let Some(menu) = self.strategy.controller_mut() {
            menu.set_viewport(viewport);
        }
    }

    /// Lay the header out in `area`.
    pub fn render(&mut self, area: Rect) -> &HeaderRow {
        self.layout(area);
        &self.row
    }

    fn layout(&mut self, area: Rect) {
        let allocation = allocate(&self.buttons);
        let slot = self.config.slot_width;
        let trigger_slot = self.config.trigger_width;

        let mut widths: Vec<u16> = vec![slot; allocation.inline().len()];
        if allocation.needs_overflow() {
            widths.push(trigger_slot);
        }
        let total = widths.iter().fold(0u16, |acc, w| acc.saturating_add(*w));
        let start = if self.config.left {
            area.x
        } else {
            area.right().saturating_sub(total).max(area.x)
        };

        let mut x = start;
        let mut slots = widths.into_iter().map(|w| {
            let rect = Rect::new(x, area.y, w, area.height);
            x = x.saturating_add(w);
            rect.intersection_opt(&area).unwrap_or_default()
        });

        let buttons = allocation
            .inline()
            .iter()
            .map(|d| RenderedButton {
                area: slots.next().unwrap_or_default(),
                descriptor: (*d).clone(),
            })
            .collect();
        let trigger = allocation.needs_overflow().then(|| RenderedTrigger {
            area: slots.next().unwrap_or_default(),
            test_id: OVERFLOW_BUTTON_TEST_ID,
            icon: self.config.overflow_icon.clone(),
            wrapper_style: self.config.overflow_button_wrapper_style.clone(),
        });

        self.row.area = area;
        self.row.buttons = buttons;
        self.row.trigger = trigger;
    }

    /// Press inline button `id`.
    ///
    /// Returns `None` if `id` is not inline or the menu is open.
    pub fn press(&mut self, id: ButtonId) -> Option<DispatchOutcome> {
        if self.menu_state() != MenuState::Closed {
            return None;
        }
        let descriptor = allocate(&self.buttons)
            .inline()
            .iter()
            .find(|d| d.id() == id)
            .copied()?;
        Some(self.router.dispatch(descriptor, DispatchSource::Inline))
    }

    /// Press the overflow trigger.
    pub fn press_overflow_trigger(&mut self) -> TriggerOutcome {
        let allocation = allocate(&self.buttons);
        if !allocation.needs_overflow() {
            return TriggerOutcome::Ignored;
        }
        let anchor = self
            .row
            .trigger
            .as_ref()
            .map(|t| t.area)
            .filter(|area| !area.is_empty());

        match &mut self.strategy {
            OverflowStrategy::CustomOverride(handler) => {
                let handler = Rc::clone(handler);
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    target: headerbar_core::logging::TARGET,
                    hidden = allocation.hidden().len(),
                    "headerbar.overflow.override"
                );
                handler(OverflowMenuPressParams {
                    hidden_buttons: allocation.hidden(),
                    overflow_button_ref: TriggerRef::new(anchor),
                });
                TriggerOutcome::Overridden
            }
            OverflowStrategy::DefaultMenu(menu) => {
                if menu.open(allocation.hidden().iter().copied(), anchor) {
                    TriggerOutcome::Opened
                } else {
                    TriggerOutcome::Ignored
                }
            }
        }
    }

    /// Route one input event.
    pub fn handle_event(&mut self, event: &Event) -> Option<HeaderAction> {
        if let Some(menu) = self.strategy.controller_mut() {
            if menu.is_open() {
                let resolution = menu.handle_event(event)?;
                return Some(self.apply(resolution));
            }
        }

        let (x, y) = event.left_press_position()?;
        match self.row.hit(x, y)? {
            Hit::Button(id) => {
                let outcome = self.press(id)?;
                Some(HeaderAction::Dispatched {
                    id,
                    source: DispatchSource::Inline,
                    outcome,
                })
            }
            Hit::Trigger => match self.press_overflow_trigger() {
                TriggerOutcome::Opened => Some(HeaderAction::MenuOpened),
                TriggerOutcome::Overridden => Some(HeaderAction::OverrideInvoked),
                TriggerOutcome::Ignored => None,
            },
        }
    }

    /// Native host callback: menu row `row` was chosen.
    pub fn select_overflow_row(&mut self, row: usize) -> Option<HeaderAction> {
        let resolution = self.strategy.controller_mut()?.select(row)?;
        Some(self.apply(resolution))
    }

    /// Native host callback: the menu was dismissed.
    pub fn dismiss_overflow(&mut self) -> Option<HeaderAction> {
        let resolution = self.strategy.controller_mut()?.dismiss()?;
        Some(self.apply(resolution))
    }

    fn apply(&mut self, resolution: Resolution) -> HeaderAction {
        match resolution {
            Resolution::Selected(descriptor) => {
                let outcome = self.router.dispatch(&descriptor, DispatchSource::Overflow);
                HeaderAction::Dispatched {
                    id: descriptor.id(),
                    source: DispatchSource::Overflow,
                    outcome,
                }
            }
            Resolution::Cancelled => HeaderAction::MenuCancelled,
        }
    }

    #[must_use]
    pub fn buttons(&self) -> &[ButtonDescriptor] {
        &self.buttons
    }

    #[must_use]
    pub fn allocation(&self) -> Allocation<'_> {
        allocate(&self.buttons)
    }

    /// Last rendered row.
    #[must_use]
    pub fn row(&self) -> &HeaderRow {
        &self.row
    }

    #[must_use]
    pub fn menu_view(&self) -> Option<MenuView<'_>> {
        self.strategy.controller()?.view()
    }

    /// Always `Closed` when an override is installed.
    #[must_use]
    pub fn menu_state(&self) -> MenuState {
        self.strategy
            .controller()
            .map_or(MenuState::Closed, OverflowMenuController::state)
    }

    /// `None` when an override is installed.
    #[must_use]
    pub fn menu_kind(&self) -> Option<SurfaceKind> {
        self.strategy.controller().map(OverflowMenuController::kind)
    }

    #[must_use]
    pub fn menu_stats(&self) -> Option<MenuStats> {
        self.strategy.controller().map(OverflowMenuController::stats)
    }

    #[must_use]
    pub fn is_overridden(&self) -> bool {
        matches!(self.strategy, OverflowStrategy::CustomOverride(_))
    }

    #[must_use]
    pub fn dispatch_stats(&self) -> DispatchStats {
        self.router.stats()
    }

    #[must_use]
    pub fn config(&self) -> &HeaderButtonsConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Visibility;
    use headerbar_core::platform::Platform;
    use std::cell::RefCell;

    type Log = Rc<RefCell<Vec<String>>>;

    fn logged(title: &str, log: &Log, show: Visibility) -> Item {
        let log = Rc::clone(log);
        let name = title.to_owned();
        Item::new(title)
            .show(show)
            .on_press(move || log.borrow_mut().push(name.clone()))
    }

    fn abcd(log: &Log) -> Vec<Item> {
        vec![
            logged("A", log, Visibility::Always),
            logged("B", log, Visibility::Never),
            logged("C", log, Visibility::Always),
            logged("D", log, Visibility::Never),
        ]
    }

    fn container(platform: Platform, log: &Log) -> HeaderButtons {
        let mut header = HeaderButtons::new(HeaderButtonsConfig::default().platform(platform))
            .with_items(abcd(log));
        header.set_viewport(Rect::new(0, 0, 40, 20));
        header.render(Rect::new(0, 0, 40, 1));
        header
    }

    #[test]
    fn mixed_split_renders_trigger() {
        let log = Log::default();
        let header = container(Platform::Ios, &log);
        let row = header.row();
        let titles: Vec<&str> = row.buttons.iter().map(|b| b.descriptor.title()).collect();
        assert_eq!(titles, ["A", "C"]);
        let trigger = row.trigger.as_ref().unwrap();
        assert_eq!(trigger.test_id, "headerOverflowButton");
    }

    #[test]
    fn right_packed_layout() {
        let log = Log::default();
        let header = container(Platform::Ios, &log);
        let row = header.row();
        // 2 slots of 4 + trigger of 3 = 11, packed against x = 40.
        assert_eq!(row.buttons[0].area, Rect::new(29, 0, 4, 1));
        assert_eq!(row.buttons[1].area, Rect::new(33, 0, 4, 1));
        assert_eq!(row.trigger.as_ref().unwrap().area, Rect::new(37, 0, 3, 1));
    }

    #[test]
    fn left_packed_layout() {
        let log = Log::default();
        let mut header = HeaderButtons::new(HeaderButtonsConfig::default().left(true))
            .with_items(abcd(&log));
        let row = header.render(Rect::new(0, 0, 40, 1));
        assert!(row.left);
        assert_eq!(row.buttons[0].area, Rect::new(0, 0, 4, 1));
        assert_eq!(row.trigger.as_ref().unwrap().area, Rect::new(8, 0, 3, 1));
    }

    #[test]
    fn all_always_has_no_trigger() {
        let log = Log::default();
        let mut header = HeaderButtons::new(HeaderButtonsConfig::default()).with_items([
            logged("A", &log, Visibility::Always),
            logged("B", &log, Visibility::Always),
        ]);
        let row = header.render(Rect::new(0, 0, 40, 1));
        assert_eq!(row.buttons.len(), 2);
        assert!(row.trigger.is_none());
        assert_eq!(header.press_overflow_trigger(), TriggerOutcome::Ignored);
    }

    #[test]
    fn inline_tap_dispatches_once() {
        let log = Log::default();
        let mut header = container(Platform::Ios, &log);
        let action = header.handle_event(&Event::tap(30, 0));
        assert_eq!(
            action,
            Some(HeaderAction::Dispatched {
                id: ButtonId::new(0),
                source: DispatchSource::Inline,
                outcome: DispatchOutcome::Invoked,
            })
        );
        assert_eq!(*log.borrow(), ["A"]);
    }

    #[test]
    fn hidden_button_cannot_be_pressed_inline() {
        let log = Log::default();
        let mut header = container(Platform::Ios, &log);
        assert_eq!(header.press(ButtonId::new(1)), None);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn selecting_d_dispatches_only_d() {
        let log = Log::default();
        let mut header = container(Platform::Ios, &log);
        assert_eq!(
            header.handle_event(&Event::tap(38, 0)),
            Some(HeaderAction::MenuOpened)
        );
        assert_eq!(header.menu_state(), MenuState::Open);
        let view = header.menu_view().unwrap();
        let labels: Vec<&str> = view.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["B", "D"]);

        let action = header.select_overflow_row(1);
        assert_eq!(
            action,
            Some(HeaderAction::Dispatched {
                id: ButtonId::new(3),
                source: DispatchSource::Overflow,
                outcome: DispatchOutcome::Invoked,
            })
        );
        assert_eq!(*log.borrow(), ["D"]);
        assert_eq!(header.menu_state(), MenuState::Closed);
    }

    #[test]
    fn dismissing_dispatches_nothing() {
        let log = Log::default();
        let mut header = container(Platform::Android, &log);
        assert_eq!(header.press_overflow_trigger(), TriggerOutcome::Opened);
        assert_eq!(
            header.handle_event(&Event::Back),
            Some(HeaderAction::MenuCancelled)
        );
        assert!(log.borrow().is_empty());
        assert_eq!(header.dispatch_stats().total(), 0);
    }

    #[test]
    fn inline_presses_ignored_while_menu_open() {
        let log = Log::default();
        let mut header = container(Platform::Ios, &log);
        header.press_overflow_trigger();
        assert_eq!(header.press(ButtonId::new(0)), None);
        assert_eq!(header.press_overflow_trigger(), TriggerOutcome::Ignored);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn popup_anchors_to_trigger_slot() {
        let log = Log::default();
        let mut header = container(Platform::Android, &log);
        header.press_overflow_trigger();
        let view = header.menu_view().unwrap();
        assert_eq!(view.kind, SurfaceKind::PopupMenu);
        assert_eq!(view.area.right(), 40);
        assert_eq!(view.area.y, 1);
    }

    #[test]
    fn popup_before_first_render_is_refused() {
        let log = Log::default();
        let mut header = HeaderButtons::new(
            HeaderButtonsConfig::default().platform(Platform::Android),
        )
        .with_items(abcd(&log));
        assert_eq!(header.press_overflow_trigger(), TriggerOutcome::Ignored);
        assert_eq!(header.menu_state(), MenuState::Closed);
    }

    #[test]
    fn cramped_viewport_keeps_hidden_buttons_reachable() {
        for platform in [Platform::Ios, Platform::Android] {
            let log = Log::default();
            let mut header =
                HeaderButtons::new(HeaderButtonsConfig::default().platform(platform))
                    .with_items([logged("Report", &log, Visibility::Never)]);
            header.set_viewport(Rect::new(0, 0, 40, 3));
            header.render(Rect::new(0, 0, 40, 1));

            assert_eq!(header.press_overflow_trigger(), TriggerOutcome::Opened, "{platform}");
            assert!(matches!(
                header.select_overflow_row(0),
                Some(HeaderAction::Dispatched { source: DispatchSource::Overflow, .. })
            ));
            assert_eq!(*log.borrow(), ["Report"], "{platform}");
            assert_eq!(header.menu_state(), MenuState::Closed);
        }
    }

    #[test]
    fn override_receives_hidden_and_trigger_ref() {
        let log = Log::default();
        let seen: Rc<RefCell<Vec<(Vec<String>, TriggerRef)>>> = Rc::default();
        let sink = Rc::clone(&seen);
        let config = HeaderButtonsConfig::default().on_overflow_menu_press(move |params| {
            let titles = params
                .hidden_buttons
                .iter()
                .map(|d| d.title().to_owned())
                .collect();
            sink.borrow_mut().push((titles, params.overflow_button_ref));
        });
        let mut header = HeaderButtons::new(config).with_items(abcd(&log));
        header.render(Rect::new(0, 0, 40, 1));

        assert!(header.is_overridden());
        assert_eq!(header.menu_kind(), None);
        assert_eq!(
            header.handle_event(&Event::tap(38, 0)),
            Some(HeaderAction::OverrideInvoked)
        );
        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, ["B", "D"]);
        assert_eq!(seen[0].1.test_id, OVERFLOW_BUTTON_TEST_ID);
        assert_eq!(seen[0].1.area, Some(Rect::new(37, 0, 3, 1)));
        assert!(log.borrow().is_empty());
        assert!(header.menu_view().is_none());
    }

    #[test]
    fn set_items_keeps_open_menu_snapshot() {
        let log = Log::default();
        let mut header = container(Platform::Ios, &log);
        header.press_overflow_trigger();
        header.set_items([logged("Z", &log, Visibility::Always)]);
        assert!(header.row().trigger.is_none());
        header.select_overflow_row(0);
        assert_eq!(*log.borrow(), ["B"]);
    }

    #[test]
    fn conditional_declarations_are_skipped() {
        let log = Log::default();
        let show_b = false;
        let header = HeaderButtons::new(HeaderButtonsConfig::default()).with_items([
            Some(logged("A", &log, Visibility::Always)),
            show_b.then(|| logged("B", &log, Visibility::Always)),
            Some(logged("C", &log, Visibility::Never)),
        ]);
        let ids: Vec<usize> = header.buttons().iter().map(|b| b.id().index()).collect();
        assert_eq!(ids, [0, 1]);
        assert_eq!(header.buttons()[1].title(), "C");
    }

    #[test]
    fn narrow_area_clips_slots() {
        let log = Log::default();
        let mut header = HeaderButtons::new(HeaderButtonsConfig::default().left(true))
            .with_items(abcd(&log));
        let row = header.render(Rect::new(0, 0, 6, 1));
        assert_eq!(row.buttons[0].area, Rect::new(0, 0, 4, 1));
        assert_eq!(row.buttons[1].area, Rect::new(4, 0, 2, 1));
        assert!(row.trigger.as_ref().unwrap().area.is_empty());
    }
}
