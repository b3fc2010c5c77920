//! Error types for spark-vdom.

use thiserror::Error;

/// Errors raised while building or reconciling a VNode tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VdomError {
    /// Tag cannot name a host element, or does not fit the node kind.
    #[error("invalid tag {tag:?}: {reason}")]
    InvalidTagKind {
        /// The offending tag as given.
        tag: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Patch or removal reached a node that was never mounted.
    #[error("vnode <{tag}> has no host handle; it was never mounted")]
    MissingHostHandle {
        /// Tag of the node, or `#text` for text nodes.
        tag: String,
    },
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, VdomError>;
