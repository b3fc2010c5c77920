//! Prop Patcher - Apply one node's prop diff to its host node.
//!
//! | key        | behavior                                                    |
//! |------------|-------------------------------------------------------------|
//! | `style`    | merge: set every new property, clear old ones now missing   |
//! | `class`    | set wholesale from the new value                            |
//! | `@type`    | detach old handler, attach new handler                      |
//! | other      | set attribute; absent new value removes it                  |

use tracing::warn;

use crate::config::RenderConfig;
use crate::host::Host;
use crate::types::NodeId;
use crate::vnode::{PropValue, Props};

/// Patch a single prop from `old` to `new` on `node`.
///
/// Runs unconditionally: equal values are still written. Callers that want
/// to skip unchanged props use [`patch_props`].
pub fn patch_prop<H: Host + ?Sized>(
    host: &mut H,
    config: &RenderConfig,
    node: NodeId,
    key: &str,
    old: Option<&PropValue>,
    new: Option<&PropValue>,
) {
    match key {
        "style" => patch_style(host, node, old, new),
        "class" => {
            let value = new.and_then(PropValue::to_attribute_value).unwrap_or_default();
            host.set_class(node, &value);
        }
        _ => match config.event_type(key) {
            Some(event_type) => patch_event(host, node, key, event_type, old, new),
            None => patch_attribute(host, node, key, new),
        },
    }
}

fn patch_style<H: Host + ?Sized>(
    host: &mut H,
    node: NodeId,
    old: Option<&PropValue>,
    new: Option<&PropValue>,
) {
    let new_style = new.and_then(PropValue::as_style);

    match old {
        Some(PropValue::Style(old_style)) => {
            for name in old_style.keys() {
                if !new_style.is_some_and(|s| s.contains_key(name)) {
                    host.clear_style_property(node, name);
                }
            }
        }
        // A string style went out as a plain attribute.
        Some(_) if new_style.is_some() || new.is_none() => host.remove_attribute(node, "style"),
        _ => {}
    }

    match new {
        Some(PropValue::Style(style)) => {
            for (name, value) in style {
                host.set_style_property(node, name, value);
            }
        }
        Some(value) => patch_attribute(host, node, "style", Some(value)),
        None => {}
    }
}

fn patch_event<H: Host + ?Sized>(
    host: &mut H,
    node: NodeId,
    key: &str,
    event_type: &str,
    old: Option<&PropValue>,
    new: Option<&PropValue>,
) {
    if event_type.is_empty() {
        warn!(node = %node, key, "event prop without an event type ignored");
        return;
    }

    if let Some(old) = old {
        match old.as_handler() {
            Some(handler) => host.remove_event_listener(node, event_type, handler),
            None => warn!(node = %node, key, "non-handler value under event prop ignored"),
        }
    }

    if let Some(new) = new {
        match new.as_handler() {
            Some(handler) => host.add_event_listener(node, event_type, handler),
            None => warn!(node = %node, key, value = ?new, "non-handler value under event prop ignored"),
        }
    }
}

fn patch_attribute<H: Host + ?Sized>(host: &mut H, node: NodeId, key: &str, new: Option<&PropValue>) {
    match new {
        Some(value) => match value.to_attribute_value() {
            Some(text) => host.set_attribute(node, key, &text),
            None => warn!(node = %node, key, "handler under a non-event prop ignored"),
        },
        None => host.remove_attribute(node, key),
    }
}

/// Apply every prop of a freshly created node (old = absent).
pub fn mount_props<H: Host + ?Sized>(host: &mut H, config: &RenderConfig, node: NodeId, props: Option<&Props>) {
    let Some(props) = props else { return };
    for (key, value) in props.iter() {
        patch_prop(host, config, node, key, None, Some(value));
    }
}

/// Diff `prev` against `next` on an already mounted node.
///
/// Keys present in `next` are patched when their value changed; keys only
/// in `prev` are patched to absent. Unchanged values cause no host calls,
/// so re-rendering an identical tree is mutation-free.
pub fn patch_props<H: Host + ?Sized>(
    host: &mut H,
    config: &RenderConfig,
    node: NodeId,
    prev: Option<&Props>,
    next: Option<&Props>,
) {
    if let Some(next) = next {
        for (key, value) in next.iter() {
            let old = prev.and_then(|p| p.get(key));
            if old != Some(value) {
                patch_prop(host, config, node, key, old, Some(value));
            }
        }
    }

    if let Some(prev) = prev {
        for (key, value) in prev.iter() {
            if !next.is_some_and(|n| n.contains_key(key)) {
                patch_prop(host, config, node, key, Some(value), None);
            }
        }
    }
}
