#![forbid(unsafe_code)]

//! Button declarations and their normalized descriptors.
//!
//! Callers declare buttons as [`Item`]s (the builder/declaration form, also
//! deserializable from JSON with the `serde` feature). A container normalizes
//! the declared sequence once per configuration change into
//! [`ButtonDescriptor`]s, which carry a positional [`ButtonId`] and the
//! resolved [`ButtonContent`].
//!
//! # Invariants
//!
//! - `ButtonId`s are dense positions `0..n` over the *present* declarations;
//!   `None` declarations (conditional buttons) are skipped and consume no id.
//! - Normalization never reorders and never drops a present declaration.
//!
//! # Example
//!
//! ```
//! use headerbar_widgets::descriptor::{Item, Visibility, normalize};
//!
//! let show_search = false;
//! let buttons = normalize([
//!     Some(Item::new("Edit").on_press(|| {})),
//!     show_search.then(|| Item::new("Search")),
//!     Some(Item::new("Share").show(Visibility::Never)),
//! ]);
//! assert_eq!(buttons.len(), 2);
//! assert_eq!(buttons[1].title(), "Share");
//! assert_eq!(buttons[1].id().index(), 1);
//! ```

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::error::Error;

/// Press callback. Handlers run on the UI thread and are never `Send`.
pub type PressHandler = Rc<dyn Fn()>;

/// Opaque host element (custom button, overflow icon, render component).
///
/// The core never inspects it; hosts downcast it back to their own type.
pub type CustomElement = Rc<dyn Any>;

/// Untyped property bag used for style passthrough and unknown props.
pub type Props = BTreeMap<String, PropValue>;

/// Whether a button is rendered inline or only in the overflow menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Visibility {
    /// Always inline, never in the overflow menu.
    #[default]
    Always,
    /// Never inline, only in the overflow menu.
    Never,
}

impl Visibility {
    /// Declarative name (`"always"` / `"never"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            other => Err(Error::UnknownVisibility {
                value: other.to_owned(),
            }),
        }
    }
}

/// Positional identity of a button within its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ButtonId(usize);

impl ButtonId {
    /// Identity for the button declared at `index`.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position in the declared sequence.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A single untyped property value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum PropValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<PropValue>),
    Map(Props),
}

impl From<bool> for PropValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for PropValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for PropValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for PropValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for PropValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<String> for PropValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

/// Declaration of one header button.
///
/// Field names follow the declarative prop names; with the `serde` feature an
/// item deserializes from `{"title": ..., "show": "never", "iconName": ...,
/// "testID": ...}` and any unrecognized key lands in [`Item::extra`].
/// Handlers and custom elements cannot come from JSON and are attached with
/// the builder methods afterwards.
#[derive(Clone, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Item {
    /// Inline label fallback and overflow row label.
    pub title: String,
    /// Press callback; `None` renders an inert button.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub on_press: Option<PressHandler>,
    /// Visibility policy, `always` by default.
    #[cfg_attr(feature = "serde", serde(default))]
    pub show: Visibility,
    /// Icon name for the host's icon component.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub icon_name: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub icon_size: Option<u16>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub color: Option<String>,
    /// Style applied to the button content.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "BTreeMap::is_empty")
    )]
    pub button_style: Props,
    /// Style applied to the touchable wrapping the button.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "BTreeMap::is_empty")
    )]
    pub button_wrapper_style: Props,
    /// Fully custom button element; takes priority over icon and title.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub element: Option<CustomElement>,
    /// Identifier for UI automation.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "testID", default, skip_serializing_if = "Option::is_none")
    )]
    pub test_id: Option<String>,
    /// Unrecognized props, passed through untouched.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub extra: Props,
}

impl Item {
    /// Declare a button with the given title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the press handler.
    #[must_use]
    pub fn on_press<F>(mut self, handler: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.on_press = Some(Rc::new(handler));
        self
    }

    /// Set a shared press handler.
    #[must_use]
    pub fn on_press_shared(mut self, handler: PressHandler) -> Self {
        self.on_press = Some(handler);
        self
    }

    /// Set the visibility policy.
    #[must_use]
    pub fn show(mut self, show: Visibility) -> Self {
        self.show = show;
        self
    }

    /// Set the icon name.
    #[must_use]
    pub fn icon(mut self, name: impl Into<String>) -> Self {
        self.icon_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn icon_size(mut self, size: u16) -> Self {
        self.icon_size = Some(size);
        self
    }

    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Add one entry to the button style.
    #[must_use]
    pub fn button_style(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.button_style.insert(key.into(), value.into());
        self
    }

    /// Add one entry to the wrapper style.
    #[must_use]
    pub fn wrapper_style(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.button_wrapper_style.insert(key.into(), value.into());
        self
    }

    /// Render this host element instead of an icon or title.
    #[must_use]
    pub fn element<E: Any>(mut self, element: E) -> Self {
        self.element = Some(Rc::new(element));
        self
    }

    /// Set the automation identifier.
    #[must_use]
    pub fn test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id = Some(id.into());
        self
    }

    /// Attach an arbitrary extra prop.
    #[must_use]
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Parse a JSON array of item declarations.
    #[cfg(feature = "serde")]
    pub fn list_from_json(json: &str) -> crate::Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("title", &self.title)
            .field("on_press", &self.on_press.is_some())
            .field("show", &self.show)
            .field("icon_name", &self.icon_name)
            .field("test_id", &self.test_id)
            .field("element", &self.element.is_some())
            .finish_non_exhaustive()
    }
}

/// What an inline button displays.
#[derive(Clone)]
pub enum ButtonContent {
    /// Caller-supplied element.
    Element(CustomElement),
    /// Named icon, drawn by the host's icon component.
    Icon {
        name: String,
        size: Option<u16>,
        color: Option<String>,
    },
    /// Plain text label.
    Text(String),
}

impl fmt::Debug for ButtonContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(_) => f.write_str("Element(..)"),
            Self::Icon { name, size, color } => f
                .debug_struct("Icon")
                .field("name", name)
                .field("size", size)
                .field("color", color)
                .finish(),
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
        }
    }
}

/// Normalized, immutable view of one declared button.
#[derive(Clone)]
pub struct ButtonDescriptor {
    id: ButtonId,
    title: String,
    on_press: Option<PressHandler>,
    visibility: Visibility,
    content: ButtonContent,
    test_id: Option<String>,
    button_style: Props,
    button_wrapper_style: Props,
    extra: Props,
}

impl ButtonDescriptor {
    /// Normalize a declaration placed at `id`.
    #[must_use]
    pub fn from_item(id: ButtonId, item: Item) -> Self {
        let content = match (item.element, item.icon_name) {
            (Some(element), _) => ButtonContent::Element(element),
            (None, Some(name)) => ButtonContent::Icon {
                name,
                size: item.icon_size,
                color: item.color,
            },
            (None, None) => ButtonContent::Text(item.title.clone()),
        };
        Self {
            id,
            title: item.title,
            on_press: item.on_press,
            visibility: item.show,
            content,
            test_id: item.test_id,
            button_style: item.button_style,
            button_wrapper_style: item.button_wrapper_style,
            extra: item.extra,
        }
    }

    #[must_use]
    pub const fn id(&self) -> ButtonId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[must_use]
    pub fn content(&self) -> &ButtonContent {
        &self.content
    }

    #[must_use]
    pub fn test_id(&self) -> Option<&str> {
        self.test_id.as_deref()
    }

    #[must_use]
    pub fn on_press(&self) -> Option<&PressHandler> {
        self.on_press.as_ref()
    }

    /// A button without a handler renders but ignores presses.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.on_press.is_none()
    }

    #[must_use]
    pub fn button_style(&self) -> &Props {
        &self.button_style
    }

    #[must_use]
    pub fn button_wrapper_style(&self) -> &Props {
        &self.button_wrapper_style
    }

    /// Unrecognized props carried from the declaration.
    #[must_use]
    pub fn extra(&self) -> &Props {
        &self.extra
    }
}

impl fmt::Debug for ButtonDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonDescriptor")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("visibility", &self.visibility)
            .field("inert", &self.is_inert())
            .field("content", &self.content)
            .field("test_id", &self.test_id)
            .finish_non_exhaustive()
    }
}

/// Normalize declarations into descriptors, skipping absent ones.
///
/// Accepts plain [`Item`]s or `Option<Item>`s so conditional declarations can
/// be written inline.
pub fn normalize<I, T>(items: I) -> Vec<ButtonDescriptor>
where
    I: IntoIterator<Item = T>,
    T: Into<Option<Item>>,
{
    items
        .into_iter()
        .filter_map(Into::into)
        .enumerate()
        .map(|(index, item)| ButtonDescriptor::from_item(ButtonId::new(index), item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn visibility_defaults_to_always() {
        assert_eq!(Visibility::default(), Visibility::Always);
        assert_eq!(Item::new("A").show, Visibility::Always);
    }

    #[test]
    fn visibility_parses_declared_names_only() {
        assert_eq!("always".parse::<Visibility>().unwrap(), Visibility::Always);
        assert_eq!("never".parse::<Visibility>().unwrap(), Visibility::Never);
        let err = "ifRoom".parse::<Visibility>().unwrap_err();
        assert!(matches!(err, Error::UnknownVisibility { ref value } if value == "ifRoom"));
    }

    #[test]
    fn normalize_skips_absent_declarations() {
        let buttons = normalize([None, Some(Item::new("A")), None, Some(Item::new("B"))]);
        let titles: Vec<_> = buttons.iter().map(ButtonDescriptor::title).collect();
        assert_eq!(titles, ["A", "B"]);
        assert_eq!(buttons[0].id(), ButtonId::new(0));
        assert_eq!(buttons[1].id(), ButtonId::new(1));
    }

    #[test]
    fn normalize_accepts_plain_items() {
        let buttons = normalize(vec![Item::new("A"), Item::new("B").show(Visibility::Never)]);
        assert_eq!(buttons[1].visibility(), Visibility::Never);
    }

    #[test]
    fn content_prefers_element_then_icon_then_title() {
        let el = ButtonDescriptor::from_item(
            ButtonId::new(0),
            Item::new("A").icon("search").element(42_u32),
        );
        match el.content() {
            ButtonContent::Element(e) => assert_eq!(e.downcast_ref::<u32>(), Some(&42)),
            other => panic!("expected element, got {other:?}"),
        }

        let icon = ButtonDescriptor::from_item(
            ButtonId::new(1),
            Item::new("B").icon("search").icon_size(23).color("blue"),
        );
        assert!(matches!(
            icon.content(),
            ButtonContent::Icon { name, size: Some(23), color: Some(c) } if name == "search" && c == "blue"
        ));

        let text = ButtonDescriptor::from_item(ButtonId::new(2), Item::new("C"));
        assert!(matches!(text.content(), ButtonContent::Text(t) if t == "C"));
    }

    #[test]
    fn missing_handler_is_inert() {
        let inert = ButtonDescriptor::from_item(ButtonId::new(0), Item::new("A"));
        assert!(inert.is_inert());
        assert!(inert.on_press().is_none());

        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let live = ButtonDescriptor::from_item(
            ButtonId::new(1),
            Item::new("B").on_press(move || counter.set(counter.get() + 1)),
        );
        assert!(!live.is_inert());
        (live.on_press().unwrap())();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn extra_props_and_styles_pass_through() {
        let d = ButtonDescriptor::from_item(
            ButtonId::new(0),
            Item::new("A")
                .prop("accessibilityLabel", "Add item")
                .prop("hitSlop", 8)
                .button_style("fontWeight", "bold")
                .wrapper_style("marginLeft", 4.5)
                .test_id("add"),
        );
        assert_eq!(
            d.extra().get("accessibilityLabel"),
            Some(&PropValue::Str("Add item".into()))
        );
        assert_eq!(d.extra().get("hitSlop"), Some(&PropValue::Int(8)));
        assert_eq!(
            d.button_style().get("fontWeight"),
            Some(&PropValue::from("bold"))
        );
        assert_eq!(
            d.button_wrapper_style().get("marginLeft"),
            Some(&PropValue::Float(4.5))
        );
        assert_eq!(d.test_id(), Some("add"));
    }

    #[test]
    fn debug_does_not_require_handler_debug() {
        let item = Item::new("A").on_press(|| {});
        let text = format!("{item:?}");
        assert!(text.contains("on_press: true"));
        let d = ButtonDescriptor::from_item(ButtonId::new(0), item);
        assert!(format!("{d:?}").contains("inert: false"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn items_deserialize_with_declarative_names() {
        let items = Item::list_from_json(
            r#"[
                {"title": "Edit", "iconName": "edit", "testID": "edit-btn"},
                {"title": "Report", "show": "never", "destructive": true, "buttonStyle": {"color": "red"}}
            ]"#,
        )
        .unwrap();
        assert_eq!(items[0].icon_name.as_deref(), Some("edit"));
        assert_eq!(items[0].test_id.as_deref(), Some("edit-btn"));
        assert_eq!(items[0].show, Visibility::Always);
        assert_eq!(items[1].show, Visibility::Never);
        assert_eq!(items[1].extra.get("destructive"), Some(&PropValue::Bool(true)));
        assert_eq!(
            items[1].button_style.get("color"),
            Some(&PropValue::from("red"))
        );
        assert!(items[1].on_press.is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn unknown_show_value_is_rejected() {
        let err = Item::list_from_json(r#"[{"title": "A", "show": "ifRoom"}]"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
