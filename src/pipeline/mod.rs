//! Reconciliation Pipeline
//!
//! Turns VNode trees into host mutations. The pieces call down into each
//! other recursively:
//!
//! ```text
//! patch ──► props::patch_props
//!   │
//!   ├──► children::patch_children ──► patch / mount / remove (per child)
//!   │
//!   └──► replace ──► mount ──► props::mount_props
//! ```
//!
//! ## Key Design Principles
//!
//! - **Handles move forward**: after a successful patch `next.el` holds the
//!   host node previously owned by `prev`, so `next` becomes the new baseline
//! - **Detached builds**: a mounted subtree is attached to its container last
//! - **Minimal moves**: the keyed diff relocates only nodes that fell behind
//!   the furthest previous position already kept in place

pub mod children;
pub mod mount;
pub mod patch;
pub mod props;

// Re-exports
pub use children::{patch_children, sibling_key};
pub use mount::mount;
pub use patch::{patch, remove, replace};
pub use props::{mount_props, patch_prop, patch_props};
