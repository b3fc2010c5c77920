//! Host Adapter - The live tree the engine mutates.
//!
//! The engine never owns host nodes. It drives a [`Host`] through a small
//! set of document-style primitives and keeps only [`NodeId`] handles.
//!
//! - [`Host`] - the adapter contract
//! - [`MemoryHost`] - in-memory arena implementation with an operation log

mod memory;

pub use memory::*;

use crate::types::NodeId;
use crate::vnode::EventHandler;

/// Primitive mutations a host tree must support.
///
/// Adapters define their own failure behavior. The engine assumes every call
/// succeeds and never inspects the host between calls except through
/// [`next_sibling`](Host::next_sibling).
pub trait Host {
    /// Create a detached element.
    fn create_element(&mut self, tag: &str) -> NodeId;

    /// Create a detached text node.
    fn create_text_node(&mut self, text: &str) -> NodeId;

    /// Append `child` as the last child of `parent`, detaching it first if attached.
    fn append_child(&mut self, parent: NodeId, child: NodeId);

    /// Insert `child` before `reference` under `parent`; append when `reference` is `None`.
    /// An already attached `child` is moved.
    fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>);

    fn remove_child(&mut self, parent: NodeId, child: NodeId);

    /// Following sibling of `node`, if any.
    fn next_sibling(&self, node: NodeId) -> Option<NodeId>;

    fn set_text(&mut self, node: NodeId, text: &str);

    fn set_attribute(&mut self, node: NodeId, key: &str, value: &str);

    fn remove_attribute(&mut self, node: NodeId, key: &str);

    fn set_style_property(&mut self, node: NodeId, key: &str, value: &str);

    /// Reset one style property to empty.
    fn clear_style_property(&mut self, node: NodeId, key: &str);

    /// Replace the node's class list. An empty string clears it.
    fn set_class(&mut self, node: NodeId, value: &str);

    fn add_event_listener(&mut self, node: NodeId, event_type: &str, handler: &EventHandler);

    /// Detach a listener previously added with the same handler (by identity).
    fn remove_event_listener(&mut self, node: NodeId, event_type: &str, handler: &EventHandler);
}
