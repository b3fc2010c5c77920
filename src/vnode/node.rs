//! VNode - Immutable description of one desired host node.
//!
//! A VNode is built once by [`create_element`] / [`create_text_vnode`] and
//! never changes shape afterwards. The only mutable part is `el`, the handle
//! of the host node it was materialized into, written by mount and carried
//! forward by patch.
//!
//! # Classification
//!
//! ```text
//! tag                      -> node_type
//! "div"                    -> Html
//! Tag::Component(..)       -> Component
//! Tag::None                -> Text
//!
//! children                 -> child_type
//! None / "" / vec![]       -> Empty
//! "text" / 42              -> Single (wrapped in a Text VNode)
//! node / vec![node]        -> Single
//! vec![a, b, ..]           -> Multi
//! ```

use std::fmt;
use std::rc::Rc;

use crate::error::{Result, VdomError};
use crate::types::{ChildType, Key, NodeId, NodeType};
use super::props::Props;

// =============================================================================
// Tag
// =============================================================================

/// Component constructor. Recorded on Component VNodes, never invoked.
#[derive(Clone)]
pub struct ComponentRef(Rc<dyn Fn(&Props) -> VNode>);

impl ComponentRef {
    pub fn new(f: impl Fn(&Props) -> VNode + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentRef({:p})", Rc::as_ptr(&self.0))
    }
}

/// What `create_element` was asked to build.
#[derive(Debug, Clone)]
pub enum Tag {
    /// Host element tag name.
    Element(String),
    /// Function component.
    Component(ComponentRef),
    /// No tag: the node is text.
    None,
}

impl Tag {
    pub fn node_type(&self) -> NodeType {
        match self {
            Tag::Element(_) => NodeType::Html,
            Tag::Component(_) => NodeType::Component,
            Tag::None => NodeType::Text,
        }
    }
}

impl From<&str> for Tag {
    fn from(value: &str) -> Self {
        Tag::Element(value.to_string())
    }
}

impl From<String> for Tag {
    fn from(value: String) -> Self {
        Tag::Element(value)
    }
}

impl From<ComponentRef> for Tag {
    fn from(value: ComponentRef) -> Self {
        Tag::Component(value)
    }
}

impl<T: Into<Tag>> From<Option<T>> for Tag {
    fn from(value: Option<T>) -> Self {
        value.map_or(Tag::None, Into::into)
    }
}

// =============================================================================
// Children
// =============================================================================

/// Children as handed to [`create_element`].
#[derive(Debug, Clone, Default)]
pub enum Children {
    #[default]
    None,
    /// Scalar content; wrapped in a Text VNode.
    Text(String),
    Node(Box<VNode>),
    List(Vec<VNode>),
}

impl From<()> for Children {
    fn from(_: ()) -> Self {
        Children::None
    }
}

impl From<&str> for Children {
    fn from(value: &str) -> Self {
        Children::Text(value.to_string())
    }
}

impl From<String> for Children {
    fn from(value: String) -> Self {
        Children::Text(value)
    }
}

impl From<i64> for Children {
    fn from(value: i64) -> Self {
        Children::Text(value.to_string())
    }
}

impl From<i32> for Children {
    fn from(value: i32) -> Self {
        Children::Text(value.to_string())
    }
}

impl From<f64> for Children {
    fn from(value: f64) -> Self {
        Children::Text(value.to_string())
    }
}

impl From<VNode> for Children {
    fn from(value: VNode) -> Self {
        Children::Node(Box::new(value))
    }
}

impl From<Vec<VNode>> for Children {
    fn from(value: Vec<VNode>) -> Self {
        Children::List(value)
    }
}

impl<T: Into<Children>> From<Option<T>> for Children {
    fn from(value: Option<T>) -> Self {
        value.map_or(Children::None, Into::into)
    }
}

/// Children as stored on a VNode, already classified.
#[derive(Debug, Clone, Default)]
pub enum VChildren {
    #[default]
    None,
    /// Raw content of a Text VNode.
    Text(String),
    Single(Box<VNode>),
    Multi(Vec<VNode>),
}

impl VChildren {
    /// Arity class. Text content counts as Empty: text nodes have no child nodes.
    pub fn child_type(&self) -> ChildType {
        match self {
            VChildren::None | VChildren::Text(_) => ChildType::Empty,
            VChildren::Single(_) => ChildType::Single,
            VChildren::Multi(_) => ChildType::Multi,
        }
    }

    /// Child nodes as a slice (empty for None/Text).
    pub fn nodes(&self) -> &[VNode] {
        match self {
            VChildren::None | VChildren::Text(_) => &[],
            VChildren::Single(node) => std::slice::from_ref(node.as_ref()),
            VChildren::Multi(nodes) => nodes,
        }
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [VNode] {
        match self {
            VChildren::None | VChildren::Text(_) => &mut [],
            VChildren::Single(node) => std::slice::from_mut(node.as_mut()),
            VChildren::Multi(nodes) => nodes,
        }
    }
}

// =============================================================================
// VNode
// =============================================================================

/// One node of a desired tree shape.
#[derive(Debug, Clone)]
pub struct VNode {
    tag: Tag,
    node_type: NodeType,
    props: Option<Props>,
    pub(crate) children: VChildren,
    child_type: ChildType,
    pub(crate) el: Option<NodeId>,
}

impl VNode {
    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// Tag name for Html nodes.
    pub fn tag_name(&self) -> Option<&str> {
        match &self.tag {
            Tag::Element(name) => Some(name),
            _ => None,
        }
    }

    pub fn props(&self) -> Option<&Props> {
        self.props.as_ref()
    }

    pub fn children(&self) -> &VChildren {
        &self.children
    }

    pub fn child_type(&self) -> ChildType {
        self.child_type
    }

    /// Content of a Text node.
    pub fn text(&self) -> Option<&str> {
        match &self.children {
            VChildren::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Host handle, once mounted.
    pub fn el(&self) -> Option<NodeId> {
        self.el
    }

    /// Explicit key from the `key_prop` prop, if any.
    pub fn key(&self, key_prop: &str) -> Option<Key> {
        self.props.as_ref()?.get(key_prop)?.as_key()
    }

    /// Label used in logs and errors: the tag name, `#text` or `#component`.
    pub fn label(&self) -> &str {
        match &self.tag {
            Tag::Element(name) => name,
            Tag::Component(_) => "#component",
            Tag::None => "#text",
        }
    }

    /// Handle of a mounted Html/Text node, or `MissingHostHandle`.
    pub(crate) fn require_el(&self) -> Result<NodeId> {
        self.el.ok_or_else(|| VdomError::MissingHostHandle {
            tag: self.label().to_string(),
        })
    }
}

// =============================================================================
// Constructors
// =============================================================================

/// Create a Text VNode.
pub fn create_text_vnode(text: impl Into<String>) -> VNode {
    VNode {
        tag: Tag::None,
        node_type: NodeType::Text,
        props: None,
        children: VChildren::Text(text.into()),
        child_type: ChildType::Empty,
        el: None,
    }
}

/// Create a VNode.
///
/// `node_type` follows the kind of `tag`, `child_type` the shape of
/// `children`; both are fixed here for the lifetime of the node.
///
/// # Errors
///
/// `InvalidTagKind` when an element tag is not a usable tag name, or when a
/// tagless (text) node is given child nodes.
pub fn create_element(
    tag: impl Into<Tag>,
    props: Option<Props>,
    children: impl Into<Children>,
) -> Result<VNode> {
    let tag = tag.into();
    let children = children.into();

    match &tag {
        Tag::Element(name) => validate_tag_name(name)?,
        Tag::None => {
            return match children {
                Children::None => Ok(create_text_vnode("")),
                Children::Text(text) => Ok(create_text_vnode(text)),
                Children::Node(_) | Children::List(_) => Err(VdomError::InvalidTagKind {
                    tag: String::new(),
                    reason: "text nodes cannot own child nodes",
                }),
            };
        }
        Tag::Component(_) => {}
    }

    let children = classify_children(children);

    Ok(VNode {
        node_type: tag.node_type(),
        tag,
        props,
        child_type: children.child_type(),
        children,
        el: None,
    })
}

fn classify_children(children: Children) -> VChildren {
    match children {
        Children::None => VChildren::None,
        Children::Text(text) if text.is_empty() => VChildren::None,
        Children::Text(text) => VChildren::Single(Box::new(create_text_vnode(text))),
        Children::Node(node) => VChildren::Single(node),
        Children::List(mut nodes) => match nodes.len() {
            0 => VChildren::None,
            1 => match nodes.pop() {
                Some(node) => VChildren::Single(Box::new(node)),
                None => VChildren::None,
            },
            _ => VChildren::Multi(nodes),
        },
    }
}

fn validate_tag_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "tag names cannot be empty"
    } else if name.chars().any(char::is_whitespace) {
        "tag names cannot contain whitespace"
    } else if name
        .chars()
        .any(|c| matches!(c, '<' | '>' | '/' | '"' | '\'' | '=' | '\0'))
    {
        "tag names cannot contain markup characters"
    } else {
        return Ok(());
    };

    Err(VdomError::InvalidTagKind {
        tag: name.to_string(),
        reason,
    })
}
