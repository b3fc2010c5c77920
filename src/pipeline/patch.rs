//! Patch - Node-level reconciliation.
//!
//! `patch(prev, next)` brings the host node materialized for `prev` in line
//! with `next` and hands the handle over to `next`:
//!
//! ```text
//! node types differ        -> replace (remove prev, mount next in its slot)
//! Html, tags differ        -> replace
//! Html, same tag           -> diff props, reconcile children, reuse el
//! Text                     -> set content if changed, reuse el
//! Component                -> nothing to do
//! ```

use tracing::debug;

use crate::config::RenderConfig;
use crate::error::Result;
use crate::host::Host;
use crate::types::{NodeId, NodeType};
use crate::vnode::VNode;
use super::children::patch_children;
use super::mount::mount;
use super::props::patch_props;

/// Reconcile `prev` (mounted under `container`) into `next`.
///
/// # Errors
///
/// `MissingHostHandle` when `prev` is an Html/Text node that was never mounted.
pub fn patch<H: Host + ?Sized>(
    host: &mut H,
    config: &RenderConfig,
    prev: &VNode,
    next: &mut VNode,
    container: NodeId,
) -> Result<()> {
    if prev.node_type() != next.node_type() {
        return replace(host, config, prev, next, container);
    }

    match next.node_type() {
        NodeType::Html => patch_element(host, config, prev, next, container),
        NodeType::Text => patch_text(host, prev, next),
        NodeType::Component => Ok(()),
    }
}

fn patch_element<H: Host + ?Sized>(
    host: &mut H,
    config: &RenderConfig,
    prev: &VNode,
    next: &mut VNode,
    container: NodeId,
) -> Result<()> {
    if prev.tag_name() != next.tag_name() {
        return replace(host, config, prev, next, container);
    }

    let el = prev.require_el()?;
    patch_props(host, config, el, prev.props(), next.props());

    let (prev_type, next_type) = (prev.child_type(), next.child_type());
    patch_children(
        host,
        config,
        prev_type,
        next_type,
        prev.children().nodes(),
        next.children.nodes_mut(),
        el,
    )?;

    next.el = Some(el);
    Ok(())
}

fn patch_text<H: Host + ?Sized>(host: &mut H, prev: &VNode, next: &mut VNode) -> Result<()> {
    let el = prev.require_el()?;
    if let Some(text) = next.text() {
        if prev.text() != Some(text) {
            host.set_text(el, text);
        }
    }
    next.el = Some(el);
    Ok(())
}

/// Swap `prev` for a fresh mount of `next` in the same slot.
///
/// The old host node is detached before the new one is attached.
pub fn replace<H: Host + ?Sized>(
    host: &mut H,
    config: &RenderConfig,
    prev: &VNode,
    next: &mut VNode,
    container: NodeId,
) -> Result<()> {
    debug!(
        from = prev.label(),
        to = next.label(),
        container = %container,
        "replace node"
    );

    let anchor = if prev.node_type() == NodeType::Component {
        None
    } else {
        let el = prev.require_el()?;
        let anchor = host.next_sibling(el);
        host.remove_child(container, el);
        anchor
    };

    mount(host, config, next, container, anchor);
    Ok(())
}

/// Detach the host node of `vnode` from `container`.
pub fn remove<H: Host + ?Sized>(host: &mut H, container: NodeId, vnode: &VNode) -> Result<()> {
    if vnode.node_type() == NodeType::Component {
        return Ok(());
    }
    let el = vnode.require_el()?;
    host.remove_child(container, el);
    Ok(())
}
