//! Mount - Materialize a VNode subtree into fresh host nodes.
//!
//! The subtree is built bottom-up while detached (element created, props
//! applied, children mounted into it) and attached to `container` last, so
//! a mounted subtree appears in the host in a single insertion.

use tracing::{trace, warn};

use crate::config::RenderConfig;
use crate::host::Host;
use crate::types::{NodeId, NodeType};
use crate::vnode::{Tag, VChildren, VNode};
use super::props::mount_props;

/// Mount `vnode` into `container`, before `before` when given, else appended.
///
/// Stores the new host handle on `vnode.el`. Component nodes are skipped.
pub fn mount<H: Host + ?Sized>(
    host: &mut H,
    config: &RenderConfig,
    vnode: &mut VNode,
    container: NodeId,
    before: Option<NodeId>,
) {
    match vnode.node_type() {
        NodeType::Html => mount_element(host, config, vnode, container, before),
        NodeType::Text => mount_text(host, vnode, container, before),
        NodeType::Component => {
            warn!(container = %container, "component vnodes are not rendered; skipping");
        }
    }
}

fn mount_element<H: Host + ?Sized>(
    host: &mut H,
    config: &RenderConfig,
    vnode: &mut VNode,
    container: NodeId,
    before: Option<NodeId>,
) {
    let Tag::Element(tag) = vnode.tag() else {
        return;
    };
    let el = host.create_element(tag);
    trace!(tag = %tag, node = %el, "mount element");

    mount_props(host, config, el, vnode.props());

    match &mut vnode.children {
        VChildren::None | VChildren::Text(_) => {}
        VChildren::Single(child) => mount(host, config, child, el, None),
        VChildren::Multi(children) => {
            for child in children.iter_mut() {
                mount(host, config, child, el, None);
            }
        }
    }

    insert(host, container, el, before);
    vnode.el = Some(el);
}

fn mount_text<H: Host + ?Sized>(host: &mut H, vnode: &mut VNode, container: NodeId, before: Option<NodeId>) {
    let el = host.create_text_node(vnode.text().unwrap_or_default());
    insert(host, container, el, before);
    vnode.el = Some(el);
}

/// Insert `node` before `before`, or append when there is no reference.
pub(crate) fn insert<H: Host + ?Sized>(host: &mut H, container: NodeId, node: NodeId, before: Option<NodeId>) {
    match before {
        Some(reference) => host.insert_before(container, node, Some(reference)),
        None => host.append_child(container, node),
    }
}
