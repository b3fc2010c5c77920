//! MemoryHost - In-memory document arena.
//!
//! Host nodes are indices into a single arena (`NodeId(index)`), allocated
//! in creation order and never reused, so a handle keeps naming the same
//! node for the life of the host. Each node tracks its parent index and an
//! ordered child list.
//!
//! Every call made through the [`Host`] trait is appended to an operation
//! log. Tests read the log to assert exactly which mutations a render made:
//!
//! ```ignore
//! host.clear_ops();
//! renderer.render(next, root)?;
//! assert_eq!(renderer.host().count_ops(OpKind::STRUCTURE), 0);
//! ```
//!
//! Requests that a browser DOM would reject (unknown handles, removing a
//! node from the wrong parent, inserting a node into its own subtree) never
//! panic. They are logged with `tracing::error!` and leave the tree as it was.

use std::rc::Rc;

use indexmap::IndexMap;
use tracing::error;

use crate::types::NodeId;
use crate::vnode::{Event, EventHandler};
use super::Host;

// =============================================================================
// Operation Log
// =============================================================================

bitflags::bitflags! {
    /// Kinds of host operations, combinable for filtering the op log.
    ///
    /// `OpKind::INSERT | OpKind::REMOVE` selects every move and detach.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct OpKind: u16 {
        const CREATE = 1 << 0;
        const INSERT = 1 << 1;
        const REMOVE = 1 << 2;
        const TEXT = 1 << 3;
        const ATTRIBUTE = 1 << 4;
        const STYLE = 1 << 5;
        const CLASS = 1 << 6;
        const LISTENER = 1 << 7;

        const STRUCTURE = Self::CREATE.bits() | Self::INSERT.bits() | Self::REMOVE.bits();
        const PROPS = Self::ATTRIBUTE.bits() | Self::STYLE.bits() | Self::CLASS.bits() | Self::LISTENER.bits();
    }
}

/// One recorded host mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostOp {
    CreateElement { node: NodeId, tag: String },
    CreateText { node: NodeId, text: String },
    Append { parent: NodeId, child: NodeId },
    InsertBefore { parent: NodeId, child: NodeId, reference: Option<NodeId> },
    Remove { parent: NodeId, child: NodeId },
    SetText { node: NodeId, text: String },
    SetAttribute { node: NodeId, key: String, value: String },
    RemoveAttribute { node: NodeId, key: String },
    SetStyle { node: NodeId, key: String, value: String },
    ClearStyle { node: NodeId, key: String },
    SetClass { node: NodeId, value: String },
    AddListener { node: NodeId, event_type: String },
    RemoveListener { node: NodeId, event_type: String },
}

impl HostOp {
    pub fn kind(&self) -> OpKind {
        match self {
            HostOp::CreateElement { .. } | HostOp::CreateText { .. } => OpKind::CREATE,
            HostOp::Append { .. } | HostOp::InsertBefore { .. } => OpKind::INSERT,
            HostOp::Remove { .. } => OpKind::REMOVE,
            HostOp::SetText { .. } => OpKind::TEXT,
            HostOp::SetAttribute { .. } | HostOp::RemoveAttribute { .. } => OpKind::ATTRIBUTE,
            HostOp::SetStyle { .. } | HostOp::ClearStyle { .. } => OpKind::STYLE,
            HostOp::SetClass { .. } => OpKind::CLASS,
            HostOp::AddListener { .. } | HostOp::RemoveListener { .. } => OpKind::LISTENER,
        }
    }

    /// The node this operation is about (the child for structural ops).
    pub fn subject(&self) -> NodeId {
        match self {
            HostOp::Append { child, .. }
            | HostOp::InsertBefore { child, .. }
            | HostOp::Remove { child, .. } => *child,
            HostOp::CreateElement { node, .. }
            | HostOp::CreateText { node, .. }
            | HostOp::SetText { node, .. }
            | HostOp::SetAttribute { node, .. }
            | HostOp::RemoveAttribute { node, .. }
            | HostOp::SetStyle { node, .. }
            | HostOp::ClearStyle { node, .. }
            | HostOp::SetClass { node, .. }
            | HostOp::AddListener { node, .. }
            | HostOp::RemoveListener { node, .. } => *node,
        }
    }
}

// =============================================================================
// Arena Nodes
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeKind {
    Element(String),
    Text(String),
}

struct HostNode {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: IndexMap<String, String>,
    style: IndexMap<String, String>,
    class: String,
    listeners: Vec<(String, EventHandler)>,
}

impl HostNode {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            attributes: IndexMap::new(),
            style: IndexMap::new(),
            class: String::new(),
            listeners: Vec::new(),
        }
    }
}

// =============================================================================
// MemoryHost
// =============================================================================

/// In-memory host tree.
#[derive(Default)]
pub struct MemoryHost {
    nodes: Vec<HostNode>,
    ops: Vec<HostOp>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a detached `#root` element to render into. Not logged.
    pub fn create_container(&mut self) -> NodeId {
        self.allocate(NodeKind::Element("#root".to_string()))
    }

    fn allocate(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(HostNode::new(kind));
        id
    }

    fn node(&self, id: NodeId) -> Option<&HostNode> {
        self.nodes.get(id.index())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut HostNode> {
        self.nodes.get_mut(id.index())
    }

    fn exists(&self, id: NodeId, op: &str) -> bool {
        if id.index() < self.nodes.len() {
            true
        } else {
            error!(node = %id, op, "unknown host node");
            false
        }
    }

    fn element_mut(&mut self, id: NodeId, op: &str) -> Option<&mut HostNode> {
        match self.nodes.get_mut(id.index()) {
            Some(node) if matches!(node.kind, NodeKind::Element(_)) => Some(node),
            Some(_) => {
                error!(node = %id, op, "operation requires an element, found a text node");
                None
            }
            None => {
                error!(node = %id, op, "unknown host node");
                None
            }
        }
    }

    /// True when `ancestor` is `node` or one of its ancestors.
    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.node(id).and_then(|n| n.parent);
        }
        false
    }

    fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.node(child).and_then(|n| n.parent) else {
            return;
        };
        if let Some(parent_node) = self.node_mut(parent) {
            parent_node.children.retain(|&c| c != child);
        }
        if let Some(child_node) = self.node_mut(child) {
            child_node.parent = None;
        }
    }

    /// Shared insertion path for append and insert_before.
    fn attach(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>, op: &str) -> bool {
        if !self.exists(parent, op) || !self.exists(child, op) {
            return false;
        }
        if self.element_mut(parent, op).is_none() {
            return false;
        }
        if self.is_inclusive_ancestor(child, parent) {
            error!(parent = %parent, child = %child, op, "cannot insert a node into its own subtree");
            return false;
        }

        // Inserting a node before itself keeps it where it is.
        let reference = match reference {
            Some(r) if r == child => self.next_sibling(child),
            other => other,
        };

        if let Some(r) = reference {
            if self.node(r).and_then(|n| n.parent) != Some(parent) {
                error!(parent = %parent, reference = %r, op, "reference node is not a child of parent");
                return false;
            }
        }

        self.detach(child);

        let Some(parent_node) = self.node_mut(parent) else {
            return false;
        };
        let position = reference
            .and_then(|r| parent_node.children.iter().position(|&c| c == r))
            .unwrap_or(parent_node.children.len());
        parent_node.children.insert(position, child);

        if let Some(child_node) = self.node_mut(child) {
            child_node.parent = Some(parent);
        }
        true
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Number of nodes ever created (containers included).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.node(node)?.kind {
            NodeKind::Element(tag) => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    /// Content of a text node.
    pub fn text(&self, node: NodeId) -> Option<&str> {
        match &self.node(node)?.kind {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element(_) => None,
        }
    }

    pub fn is_text(&self, node: NodeId) -> bool {
        self.text(node).is_some()
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node).map_or(&[], |n| n.children.as_slice())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.parent
    }

    pub fn attribute(&self, node: NodeId, key: &str) -> Option<&str> {
        self.node(node)?.attributes.get(key).map(String::as_str)
    }

    pub fn attributes(&self, node: NodeId) -> Vec<(&str, &str)> {
        self.node(node).map_or_else(Vec::new, |n| {
            n.attributes
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect()
        })
    }

    pub fn style(&self, node: NodeId, key: &str) -> Option<&str> {
        self.node(node)?.style.get(key).map(String::as_str)
    }

    /// Class list, `None` when empty.
    pub fn class(&self, node: NodeId) -> Option<&str> {
        self.node(node)
            .map(|n| n.class.as_str())
            .filter(|c| !c.is_empty())
    }

    pub fn listener_count(&self, node: NodeId, event_type: &str) -> usize {
        self.node(node).map_or(0, |n| {
            n.listeners.iter().filter(|(t, _)| t == event_type).count()
        })
    }

    /// Concatenated text of the subtree.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        let Some(n) = self.node(node) else { return };
        match &n.kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element(_) => {
                for &child in &n.children {
                    self.collect_text(child, out);
                }
            }
        }
    }

    /// Serialize `node` and its subtree as HTML-like markup.
    pub fn to_markup(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_markup(node, &mut out);
        out
    }

    /// Serialize only the children of `node`.
    pub fn inner_markup(&self, node: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(node) {
            self.write_markup(child, &mut out);
        }
        out
    }

    fn write_markup(&self, node: NodeId, out: &mut String) {
        let Some(n) = self.node(node) else { return };
        match &n.kind {
            NodeKind::Text(text) => out.push_str(&escape(text)),
            NodeKind::Element(tag) => {
                out.push('<');
                out.push_str(tag);
                for (key, value) in &n.attributes {
                    out.push_str(&format!(" {key}=\"{}\"", escape(value)));
                }
                if !n.class.is_empty() {
                    out.push_str(&format!(" class=\"{}\"", escape(&n.class)));
                }
                if !n.style.is_empty() {
                    let style = n
                        .style
                        .iter()
                        .map(|(k, v)| format!("{k}: {v};"))
                        .collect::<Vec<_>>()
                        .join(" ");
                    out.push_str(&format!(" style=\"{}\"", escape(&style)));
                }
                out.push('>');
                for &child in &n.children {
                    self.write_markup(child, out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }

    /// Invoke every listener for `event_type` on `node`. Returns how many ran.
    pub fn dispatch(&self, node: NodeId, event_type: &str) -> usize {
        let handlers: Vec<EventHandler> = self.node(node).map_or_else(Vec::new, |n| {
            n.listeners
                .iter()
                .filter(|(t, _)| t == event_type)
                .map(|(_, h)| h.clone())
                .collect()
        });

        let event = Event {
            event_type: event_type.to_string(),
            target: node,
        };
        for handler in &handlers {
            handler(&event);
        }
        handlers.len()
    }

    // =========================================================================
    // Operation Log
    // =========================================================================

    pub fn ops(&self) -> &[HostOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<HostOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Count logged operations whose kind intersects `kinds`.
    pub fn count_ops(&self, kinds: OpKind) -> usize {
        self.ops.iter().filter(|op| op.kind().intersects(kinds)).count()
    }

    /// Logged operations whose kind intersects `kinds`.
    pub fn ops_matching(&self, kinds: OpKind) -> Vec<&HostOp> {
        self.ops.iter().filter(|op| op.kind().intersects(kinds)).collect()
    }

    fn record(&mut self, op: HostOp) {
        self.ops.push(op);
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

// =============================================================================
// Host impl
// =============================================================================

impl Host for MemoryHost {
    fn create_element(&mut self, tag: &str) -> NodeId {
        let node = self.allocate(NodeKind::Element(tag.to_string()));
        self.record(HostOp::CreateElement {
            node,
            tag: tag.to_string(),
        });
        node
    }

    fn create_text_node(&mut self, text: &str) -> NodeId {
        let node = self.allocate(NodeKind::Text(text.to_string()));
        self.record(HostOp::CreateText {
            node,
            text: text.to_string(),
        });
        node
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.record(HostOp::Append { parent, child });
        self.attach(parent, child, None, "append_child");
    }

    fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        self.record(HostOp::InsertBefore {
            parent,
            child,
            reference,
        });
        self.attach(parent, child, reference, "insert_before");
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        self.record(HostOp::Remove { parent, child });
        if !self.exists(parent, "remove_child") || !self.exists(child, "remove_child") {
            return;
        }
        if self.parent(child) != Some(parent) {
            error!(parent = %parent, child = %child, "remove_child: node is not a child of parent");
            return;
        }
        self.detach(child);
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let siblings = self.children(parent);
        let position = siblings.iter().position(|&c| c == node)?;
        siblings.get(position + 1).copied()
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        self.record(HostOp::SetText {
            node,
            text: text.to_string(),
        });
        match self.node_mut(node) {
            Some(HostNode {
                kind: NodeKind::Text(content),
                ..
            }) => *content = text.to_string(),
            Some(_) => error!(node = %node, "set_text: not a text node"),
            None => error!(node = %node, "set_text: unknown host node"),
        }
    }

    fn set_attribute(&mut self, node: NodeId, key: &str, value: &str) {
        self.record(HostOp::SetAttribute {
            node,
            key: key.to_string(),
            value: value.to_string(),
        });
        if let Some(n) = self.element_mut(node, "set_attribute") {
            n.attributes.insert(key.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&mut self, node: NodeId, key: &str) {
        self.record(HostOp::RemoveAttribute {
            node,
            key: key.to_string(),
        });
        if let Some(n) = self.element_mut(node, "remove_attribute") {
            n.attributes.shift_remove(key);
        }
    }

    fn set_style_property(&mut self, node: NodeId, key: &str, value: &str) {
        self.record(HostOp::SetStyle {
            node,
            key: key.to_string(),
            value: value.to_string(),
        });
        if let Some(n) = self.element_mut(node, "set_style_property") {
            if value.is_empty() {
                n.style.shift_remove(key);
            } else {
                n.style.insert(key.to_string(), value.to_string());
            }
        }
    }

    fn clear_style_property(&mut self, node: NodeId, key: &str) {
        self.record(HostOp::ClearStyle {
            node,
            key: key.to_string(),
        });
        if let Some(n) = self.element_mut(node, "clear_style_property") {
            n.style.shift_remove(key);
        }
    }

    fn set_class(&mut self, node: NodeId, value: &str) {
        self.record(HostOp::SetClass {
            node,
            value: value.to_string(),
        });
        if let Some(n) = self.element_mut(node, "set_class") {
            n.class = value.to_string();
        }
    }

    fn add_event_listener(&mut self, node: NodeId, event_type: &str, handler: &EventHandler) {
        self.record(HostOp::AddListener {
            node,
            event_type: event_type.to_string(),
        });
        if let Some(n) = self.element_mut(node, "add_event_listener") {
            // Same (type, handler) pair registers once, like the DOM.
            let exists = n
                .listeners
                .iter()
                .any(|(t, h)| t == event_type && Rc::ptr_eq(h, handler));
            if !exists {
                n.listeners.push((event_type.to_string(), handler.clone()));
            }
        }
    }

    fn remove_event_listener(&mut self, node: NodeId, event_type: &str, handler: &EventHandler) {
        self.record(HostOp::RemoveListener {
            node,
            event_type: event_type.to_string(),
        });
        if let Some(n) = self.element_mut(node, "remove_event_listener") {
            n.listeners
                .retain(|(t, h)| !(t == event_type && Rc::ptr_eq(h, handler)));
        }
    }
}
