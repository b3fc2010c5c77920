//! Props - Ordered attribute/style/event mapping for one VNode.
//!
//! Props are an insertion-ordered map from name to [`PropValue`]. Three names
//! get special treatment when patched onto a host node:
//! - `style` - a [`Style`] map, merged property by property
//! - `class` - set wholesale
//! - `@event` - event bindings (sigil configurable in [`RenderConfig`](crate::RenderConfig))
//!
//! The `key` prop doubles as sibling identity for keyed reconciliation.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::types::{Key, NodeId};

// =============================================================================
// Events
// =============================================================================

/// Event delivered to a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Event type without the sigil (`click`, `input`, ...).
    pub event_type: String,
    /// Host node the event was dispatched on.
    pub target: NodeId,
}

/// Event handler callback.
///
/// Rc so the same handler can live in the VNode tree and in the host's
/// listener table. Handlers are compared by identity (`Rc::ptr_eq`).
pub type EventHandler = Rc<dyn Fn(&Event)>;

/// Inline style declarations, property name -> value, in declaration order.
///
/// Equality ignores order.
pub type Style = IndexMap<String, String>;

// =============================================================================
// PropValue
// =============================================================================

/// Value of a single prop.
#[derive(Clone)]
pub enum PropValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Style(Style),
    Handler(EventHandler),
}

impl PropValue {
    /// Wrap a closure as an event handler value.
    pub fn handler(f: impl Fn(&Event) + 'static) -> Self {
        PropValue::Handler(Rc::new(f))
    }

    /// Build a style value from name/value pairs.
    pub fn style<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        PropValue::Style(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn as_handler(&self) -> Option<&EventHandler> {
        match self {
            PropValue::Handler(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_style(&self) -> Option<&Style> {
        match self {
            PropValue::Style(s) => Some(s),
            _ => None,
        }
    }

    /// String form written to a host attribute. `None` for handlers.
    pub fn to_attribute_value(&self) -> Option<String> {
        match self {
            PropValue::Str(s) => Some(s.clone()),
            PropValue::Int(i) => Some(i.to_string()),
            PropValue::Float(f) => Some(f.to_string()),
            PropValue::Bool(b) => Some(b.to_string()),
            PropValue::Style(style) => Some(
                style
                    .iter()
                    .map(|(k, v)| format!("{k}: {v};"))
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            PropValue::Handler(_) => None,
        }
    }

    /// Sibling key carried by this value, if it can be one.
    pub fn as_key(&self) -> Option<Key> {
        match self {
            PropValue::Str(s) => Some(Key::Str(s.clone())),
            PropValue::Int(i) => Some(Key::Int(*i)),
            PropValue::Bool(_) | PropValue::Float(_) => self.to_attribute_value().map(Key::Str),
            PropValue::Style(_) | PropValue::Handler(_) => None,
        }
    }
}

impl PartialEq for PropValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropValue::Str(a), PropValue::Str(b)) => a == b,
            (PropValue::Int(a), PropValue::Int(b)) => a == b,
            // Bitwise: NaN equals itself.
            (PropValue::Float(a), PropValue::Float(b)) => a.to_bits() == b.to_bits(),
            (PropValue::Bool(a), PropValue::Bool(b)) => a == b,
            (PropValue::Style(a), PropValue::Style(b)) => a == b,
            (PropValue::Handler(a), PropValue::Handler(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Str(s) => write!(f, "{s:?}"),
            PropValue::Int(i) => write!(f, "{i}"),
            PropValue::Float(x) => write!(f, "{x}"),
            PropValue::Bool(b) => write!(f, "{b}"),
            PropValue::Style(s) => f.debug_map().entries(s.iter()).finish(),
            PropValue::Handler(h) => write!(f, "<handler {:p}>", Rc::as_ptr(h)),
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Str(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Str(value)
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        PropValue::Int(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        PropValue::Int(i64::from(value))
    }
}

/// Values above `i64::MAX` keep their exact decimal form as a string.
impl From<usize> for PropValue {
    fn from(value: usize) -> Self {
        i64::try_from(value).map_or_else(|_| PropValue::Str(value.to_string()), PropValue::Int)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Float(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<Style> for PropValue {
    fn from(value: Style) -> Self {
        PropValue::Style(value)
    }
}

impl From<EventHandler> for PropValue {
    fn from(value: EventHandler) -> Self {
        PropValue::Handler(value)
    }
}

// =============================================================================
// Props
// =============================================================================

/// Insertion-ordered prop mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props(IndexMap<String, PropValue>);

impl Props {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or overwrite; an overwritten key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Option<PropValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<PropValue> {
        self.0.shift_remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for Props {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Build [`Props`] inline.
///
/// ```
/// use spark_vdom::props;
///
/// let props = props! { "id" => "box", "key" => 1 };
/// assert_eq!(props.len(), 2);
/// ```
#[macro_export]
macro_rules! props {
    () => {
        $crate::Props::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut props = $crate::Props::new();
        $(props.insert($key, $value);)+
        props
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_props_keep_insertion_order() {
        let props = Props::new()
            .with("id", "box")
            .with("class", "item")
            .with("key", 3);

        let keys: Vec<&str> = props.keys().collect();
        assert_eq!(keys, vec!["id", "class", "key"]);
    }

    #[test]
    fn test_props_macro() {
        let props = crate::props! { "id" => "box", "tabindex" => 2, "hidden" => false };
        assert_eq!(props.get("id"), Some(&PropValue::Str("box".into())));
        assert_eq!(props.get("tabindex"), Some(&PropValue::Int(2)));
        assert_eq!(props.get("hidden"), Some(&PropValue::Bool(false)));
        assert!(crate::props! {}.is_empty());
    }

    #[test]
    fn test_handler_equality_is_identity() {
        let a = PropValue::handler(|_| {});
        let b = PropValue::handler(|_| {});
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_attribute_values() {
        assert_eq!(PropValue::from("x").to_attribute_value().as_deref(), Some("x"));
        assert_eq!(PropValue::from(12).to_attribute_value().as_deref(), Some("12"));
        assert_eq!(PropValue::from(1.5).to_attribute_value().as_deref(), Some("1.5"));
        assert_eq!(PropValue::from(true).to_attribute_value().as_deref(), Some("true"));
        assert_eq!(
            PropValue::style([("color", "red"), ("margin", "0")])
                .to_attribute_value()
                .as_deref(),
            Some("color: red; margin: 0;")
        );
        assert_eq!(PropValue::handler(|_| {}).to_attribute_value(), None);
    }

    #[test]
    fn test_float_equality_is_bitwise() {
        assert_eq!(PropValue::from(f64::NAN), PropValue::from(f64::NAN));
        assert_eq!(PropValue::from(1.5), PropValue::from(1.5));
        assert_ne!(PropValue::from(0.0), PropValue::from(-0.0));
    }

    #[test]
    fn test_usize_conversion_is_lossless() {
        assert_eq!(PropValue::from(7usize), PropValue::Int(7));
        if let Ok(big) = usize::try_from(1u64 << 63) {
            assert_eq!(PropValue::from(big), PropValue::Str("9223372036854775808".into()));
        }
    }

    #[test]
    fn test_style_keeps_declaration_order() {
        let style = PropValue::style([("width", "1px"), ("color", "red")]);
        let names: Vec<&str> = style.as_style().unwrap().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["width", "color"]);
        assert_eq!(style, PropValue::style([("color", "red"), ("width", "1px")]));
    }

    #[test]
    fn test_key_conversion() {
        assert_eq!(PropValue::from(1).as_key(), Some(Key::Int(1)));
        assert_eq!(PropValue::from("a").as_key(), Some(Key::Str("a".into())));
        assert_eq!(PropValue::from(true).as_key(), Some(Key::Str("true".into())));
        assert_eq!(PropValue::style([("a", "b")]).as_key(), None);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut props = crate::props! { "a" => 1, "b" => 2, "c" => 3 };
        props.remove("b");
        let keys: Vec<&str> = props.keys().collect();
        assert_eq!(keys, vec!["a", "c"]);
    }
}
