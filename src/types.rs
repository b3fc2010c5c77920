//! Core types for spark-vdom.
//!
//! These types define the foundation that everything builds on.
//! They flow from the VNode model through mount and patch down to the host.

use std::fmt;

// =============================================================================
// NodeId - Host handle
// =============================================================================

/// Opaque handle to a materialized host node.
///
/// Hosts hand these out from `create_element` / `create_text_node` and the
/// engine stores them on `VNode::el`. Two handles are the same host node
/// exactly when they compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Raw arena index of this handle.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// NodeType
// =============================================================================

/// What kind of host node a VNode describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    /// Host element with a tag name.
    Html,
    /// Host text node.
    Text,
    /// Function component. Tagged only; never materialized.
    Component,
}

impl NodeType {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Html => "html",
            NodeType::Text => "text",
            NodeType::Component => "component",
        }
    }
}

// =============================================================================
// ChildType
// =============================================================================

/// Arity of a VNode's children, fixed at construction.
///
/// Selects which cell of the children reconciliation matrix applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChildType {
    /// No children (also every Text node).
    #[default]
    Empty,
    /// Exactly one child node.
    Single,
    /// Two or more child nodes.
    Multi,
}

// =============================================================================
// Key - Sibling identity
// =============================================================================

/// Identity of a child within its sibling list.
///
/// Explicit keys come from the `key` prop. Children without one are
/// identified by their position, so unkeyed lists reconcile slot-by-slot.
/// An explicit key never equals a positional one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Str(String),
    Int(i64),
    Position(usize),
}

impl Key {
    /// True for keys that came from a `key` prop.
    pub fn is_explicit(&self) -> bool {
        !matches!(self, Key::Position(_))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Str(s) => write!(f, "{s:?}"),
            Key::Int(i) => write!(f, "{i}"),
            Key::Position(p) => write!(f, "@{p}"),
        }
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Str(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Str(value)
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Int(i64::from(value))
    }
}
