//! Children Reconciler - The 3x3 arity matrix and the keyed list diff.
//!
//! ```text
//! prev \ next | Empty        | Single                 | Multi
//! ------------+--------------+------------------------+--------------------------
//! Empty       | -            | mount                  | mount each
//! Single      | remove       | patch                  | remove, mount each
//! Multi       | remove each  | remove each, mount     | keyed diff
//! ```
//!
//! # Keyed diff
//!
//! Walk the next list in order, keeping `last_index`, the highest previous
//! index reached so far by a node that stayed put. For each next node:
//!
//! 1. Linear-scan the previous list for the same key (first match wins).
//! 2. Found at `j`: patch the pair. `j < last_index` means the node now sits
//!    before something it used to follow, so its host node moves to just
//!    after the host node of the previous next-list entry. Otherwise it stays
//!    and `last_index = j`.
//! 3. Not found: mount a new node at that same position.
//!
//! Finally remove every previous node whose key is gone.
//!
//! Entries already processed always occupy their final relative order, so
//! "just after the previous entry" is the right slot for cyclic reorderings
//! too, not only adjacent swaps:
//!
//! ```text
//! prev [A B C]  next [C A B]
//! C  j=2  stays         last_index=2     A B C
//! A  j=0  < 2, after C                   B C A
//! B  j=1  < 2, after A                   C A B
//! ```
//!
//! Cost is O(n*m) with no auxiliary index; sibling lists are short.

use std::collections::HashSet;

use tracing::{trace, warn};

use crate::config::RenderConfig;
use crate::error::Result;
use crate::host::Host;
use crate::types::{ChildType, Key, NodeId};
use crate::vnode::VNode;
use super::mount::mount;
use super::patch::{patch, remove};

/// Reconcile the children of one element.
///
/// `prev` and `next` hold the child nodes (one for Single, none for Empty);
/// `container` is the element's host node.
pub fn patch_children<H: Host + ?Sized>(
    host: &mut H,
    config: &RenderConfig,
    prev_type: ChildType,
    next_type: ChildType,
    prev: &[VNode],
    next: &mut [VNode],
    container: NodeId,
) -> Result<()> {
    match (prev_type, next_type) {
        (ChildType::Empty, ChildType::Empty) => {}

        (ChildType::Empty, ChildType::Single | ChildType::Multi) => {
            mount_all(host, config, next, container);
        }

        (ChildType::Single | ChildType::Multi, ChildType::Empty) => {
            remove_all(host, prev, container)?;
        }

        (ChildType::Single, ChildType::Single) => {
            if let (Some(prev), Some(next)) = (prev.first(), next.first_mut()) {
                patch(host, config, prev, next, container)?;
            }
        }

        (ChildType::Single, ChildType::Multi) | (ChildType::Multi, ChildType::Single) => {
            remove_all(host, prev, container)?;
            mount_all(host, config, next, container);
        }

        (ChildType::Multi, ChildType::Multi) => {
            patch_keyed(host, config, prev, next, container)?;
        }
    }

    Ok(())
}

fn mount_all<H: Host + ?Sized>(host: &mut H, config: &RenderConfig, next: &mut [VNode], container: NodeId) {
    for child in next.iter_mut() {
        mount(host, config, child, container, None);
    }
}

fn remove_all<H: Host + ?Sized>(host: &mut H, prev: &[VNode], container: NodeId) -> Result<()> {
    for child in prev {
        remove(host, container, child)?;
    }
    Ok(())
}

/// Identity of the child at `position`: its key prop, else its position.
pub fn sibling_key(node: &VNode, position: usize, key_prop: &str) -> Key {
    node.key(key_prop).unwrap_or(Key::Position(position))
}

fn sibling_keys(nodes: &[VNode], key_prop: &str) -> Vec<Key> {
    nodes
        .iter()
        .enumerate()
        .map(|(i, node)| sibling_key(node, i, key_prop))
        .collect()
}

fn warn_duplicate_keys(keys: &[Key], list: &'static str) {
    let mut seen = HashSet::with_capacity(keys.len());
    for key in keys {
        if !seen.insert(key) {
            warn!(
                key = %key,
                list,
                "duplicate sibling key; keys must be unique, first match wins"
            );
        }
    }
}

/// Where to put the entry that follows `processed`: right after the last
/// processed host node, or before the first previous host node when nothing
/// before it has been materialized.
fn anchor_after<H: Host + ?Sized>(host: &H, processed: &[VNode], prev: &[VNode]) -> Option<NodeId> {
    match processed.iter().rev().find_map(VNode::el) {
        Some(el) => host.next_sibling(el),
        None => prev.iter().find_map(VNode::el),
    }
}

fn patch_keyed<H: Host + ?Sized>(
    host: &mut H,
    config: &RenderConfig,
    prev: &[VNode],
    next: &mut [VNode],
    container: NodeId,
) -> Result<()> {
    let prev_keys = sibling_keys(prev, &config.key_prop);
    let next_keys = sibling_keys(next, &config.key_prop);

    if config.warn_duplicate_keys {
        warn_duplicate_keys(&prev_keys, "previous");
        warn_duplicate_keys(&next_keys, "next");
    }

    let mut last_index = 0;

    for (i, key) in next_keys.iter().enumerate() {
        match prev_keys.iter().position(|k| k == key) {
            Some(j) => {
                patch(host, config, &prev[j], &mut next[i], container)?;

                if j < last_index {
                    if let Some(el) = next[i].el {
                        let anchor = anchor_after(host, &next[..i], prev);
                        trace!(key = %key, from = j, to = i, node = %el, "move keyed child");
                        host.insert_before(container, el, anchor);
                    }
                } else {
                    last_index = j;
                }
            }
            None => {
                let anchor = anchor_after(host, &next[..i], prev);
                trace!(key = %key, at = i, "mount keyed child");
                mount(host, config, &mut next[i], container, anchor);
            }
        }
    }

    for (node, key) in prev.iter().zip(&prev_keys) {
        if !next_keys.contains(key) {
            trace!(key = %key, "remove keyed child");
            remove(host, container, node)?;
        }
    }

    Ok(())
}
