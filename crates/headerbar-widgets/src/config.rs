#![forbid(unsafe_code)]

//! Container configuration.

use std::fmt;
use std::rc::Rc;

use headerbar_core::geometry::Rect;
use headerbar_core::platform::Platform;

use crate::descriptor::{ButtonDescriptor, CustomElement, PropValue, Props};
use crate::menu::{PopupConfig, SheetConfig};
use crate::{DEFAULT_CANCEL_TITLE, OVERFLOW_BUTTON_TEST_ID};

/// Reference to the rendered overflow trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerRef {
    /// Always [`OVERFLOW_BUTTON_TEST_ID`].
    pub test_id: &'static str,
    /// Slot the trigger occupied at the last render, if rendered.
    pub area: Option<Rect>,
}

impl TriggerRef {
    pub(crate) const fn new(area: Option<Rect>) -> Self {
        Self {
            test_id: OVERFLOW_BUTTON_TEST_ID,
            area,
        }
    }
}

/// Arguments passed to an overflow override.
#[derive(Debug, Clone, Copy)]
pub struct OverflowMenuPressParams<'a> {
    /// Current hidden buttons, in declaration order.
    pub hidden_buttons: &'a [&'a ButtonDescriptor],
    pub overflow_button_ref: TriggerRef,
}

/// Replaces the default overflow menu. The override owns any dispatch.
pub type OverflowMenuPressHandler = Rc<dyn for<'a> Fn(OverflowMenuPressParams<'a>)>;

/// Configuration for [`HeaderButtons`](crate::HeaderButtons).
///
/// # Example
///
/// ```
/// use headerbar_core::platform::Platform;
/// use headerbar_widgets::HeaderButtonsConfig;
///
/// let config = HeaderButtonsConfig::default()
///     .platform(Platform::Ios)
///     .cancel_title("Close")
///     .left(true);
/// assert_eq!(config.overflow_cancel_button_title, "Close");
/// ```
#[derive(Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct HeaderButtonsConfig {
    /// Pack slots from the left edge instead of the right.
    pub left: bool,
    /// Selects the overflow surface.
    pub platform: Platform,
    /// Label of the action sheet's cancel row.
    pub overflow_cancel_button_title: String,
    /// Passed through to the trigger's wrapper.
    pub overflow_button_wrapper_style: Props,
    /// Cells per inline button slot.
    pub slot_width: u16,
    /// Cells for the overflow trigger slot.
    pub trigger_width: u16,
    pub sheet: SheetConfig,
    pub popup: PopupConfig,
    /// Host component used to render each inline button.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub header_button_component: Option<CustomElement>,
    /// Icon element for the trigger.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub overflow_icon: Option<CustomElement>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub on_overflow_menu_press: Option<OverflowMenuPressHandler>,
}

impl Default for HeaderButtonsConfig {
    fn default() -> Self {
        Self {
            left: false,
            platform: Platform::current(),
            overflow_cancel_button_title: DEFAULT_CANCEL_TITLE.to_owned(),
            overflow_button_wrapper_style: Props::new(),
            slot_width: 4,
            trigger_width: 3,
            sheet: SheetConfig::default(),
            popup: PopupConfig::default(),
            header_button_component: None,
            overflow_icon: None,
            on_overflow_menu_press: None,
        }
    }
}

impl HeaderButtonsConfig {
    #[must_use]
    pub fn left(mut self, left: bool) -> Self {
        self.left = left;
        self
    }

    #[must_use]
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    #[must_use]
    pub fn cancel_title(mut self, title: impl Into<String>) -> Self {
        self.overflow_cancel_button_title = title.into();
        self
    }

    #[must_use]
    pub fn trigger_wrapper_style(
        mut self,
        key: impl Into<String>,
        value: impl Into<PropValue>,
    ) -> Self {
        self.overflow_button_wrapper_style
            .insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn slot_width(mut self, width: u16) -> Self {
        self.slot_width = width;
        self
    }

    #[must_use]
    pub fn trigger_width(mut self, width: u16) -> Self {
        self.trigger_width = width;
        self
    }

    #[must_use]
    pub fn sheet(mut self, sheet: SheetConfig) -> Self {
        self.sheet = sheet;
        self
    }

    #[must_use]
    pub fn popup(mut self, popup: PopupConfig) -> Self {
        self.popup = popup;
        self
    }

    #[must_use]
    pub fn button_component<C: std::any::Any>(mut self, component: C) -> Self {
        self.header_button_component = Some(Rc::new(component));
        self
    }

    #[must_use]
    pub fn overflow_icon<I: std::any::Any>(mut self, icon: I) -> Self {
        self.overflow_icon = Some(Rc::new(icon));
        self
    }

    /// Replace the default overflow menu with `handler`.
    ///
    /// Whatever the handler returns is discarded.
    #[must_use]
    pub fn on_overflow_menu_press<F, R>(mut self, handler: F) -> Self
    where
        F: for<'a> Fn(OverflowMenuPressParams<'a>) -> R + 'static,
    {
        self.on_overflow_menu_press = Some(Rc::new(move |params: OverflowMenuPressParams<'_>| {
            let _ = handler(params);
        }));
        self
    }

    /// Parse the declarative form, e.g.
    /// `{"left": true, "platform": "ios", "overflowCancelButtonTitle": "Close"}`.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl fmt::Debug for HeaderButtonsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderButtonsConfig")
            .field("left", &self.left)
            .field("platform", &self.platform)
            .field(
                "overflow_cancel_button_title",
                &self.overflow_cancel_button_title,
            )
            .field("slot_width", &self.slot_width)
            .field("trigger_width", &self.trigger_width)
            .field("sheet", &self.sheet)
            .field("popup", &self.popup)
            .field("overridden", &self.on_overflow_menu_press.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn defaults() {
        let config = HeaderButtonsConfig::default();
        assert!(!config.left);
        assert_eq!(config.platform, Platform::current());
        assert_eq!(config.overflow_cancel_button_title, "cancel");
        assert!(config.on_overflow_menu_press.is_none());
    }

    #[test]
    fn override_return_value_is_discarded() {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let config = HeaderButtonsConfig::default().on_overflow_menu_press(move |params| {
            seen.set(seen.get() + params.hidden_buttons.len() + 1);
            "ignored"
        });
        let handler = config.on_overflow_menu_press.unwrap();
        handler(OverflowMenuPressParams {
            hidden_buttons: &[],
            overflow_button_ref: TriggerRef::new(None),
        });
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn trigger_ref_uses_fixed_test_id() {
        let r = TriggerRef::new(Some(Rect::new(1, 2, 3, 1)));
        assert_eq!(r.test_id, "headerOverflowButton");
    }

    #[test]
    fn debug_hides_callbacks() {
        let config = HeaderButtonsConfig::default().on_overflow_menu_press(|_| ());
        let text = format!("{config:?}");
        assert!(text.contains("overridden: true"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn from_json_reads_declarative_props() {
        let config = HeaderButtonsConfig::from_json(
            r#"{
                "left": true,
                "platform": "ios",
                "overflowCancelButtonTitle": "Close",
                "overflowButtonWrapperStyle": {"marginRight": 8},
                "slotWidth": 6
            }"#,
        )
        .unwrap();
        assert!(config.left);
        assert_eq!(config.platform, Platform::Ios);
        assert_eq!(config.overflow_cancel_button_title, "Close");
        assert_eq!(config.slot_width, 6);
        assert_eq!(config.trigger_width, 3);
        assert_eq!(
            config.overflow_button_wrapper_style.get("marginRight"),
            Some(&PropValue::Int(8))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn from_json_rejects_malformed_input() {
        assert!(matches!(
            HeaderButtonsConfig::from_json("{\"left\": 3}"),
            Err(crate::Error::Json(_))
        ));
    }
}
