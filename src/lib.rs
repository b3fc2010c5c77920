//! # spark-vdom
//!
//! Virtual DOM reconciler for Rust.
//!
//! Application code describes UI as a tree of [`VNode`]s. The [`Renderer`]
//! diffs each new tree against the one it rendered last into the same
//! container and applies the minimal set of mutations to a [`Host`].
//!
//! ## Architecture
//!
//! ```text
//! create_element ──► VNode tree ──► Renderer ──► mount | patch ──► Host
//!                                     │
//!                                     └── baseline per container
//! ```
//!
//! Host nodes are addressed by [`NodeId`] handles. [`MemoryHost`] is an
//! in-memory host with an operation log, used by the tests and the demo.
//!
//! ## Example
//!
//! ```
//! use spark_vdom::{create_element, props, MemoryHost, Renderer};
//!
//! let mut renderer = Renderer::new(MemoryHost::new());
//! let root = renderer.host_mut().create_container();
//!
//! let tree = create_element("p", Some(props! { "class" => "greeting" }), "hello")?;
//! renderer.render(tree, root)?;
//! assert_eq!(renderer.host().inner_markup(root), "<p class=\"greeting\">hello</p>");
//! # Ok::<(), spark_vdom::VdomError>(())
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Core types (NodeId, NodeType, ChildType, Key)
//! - [`vnode`] - VNode model, props and constructors
//! - [`host`] - Host trait and the in-memory host
//! - [`pipeline`] - Mount, patch, prop patcher and children reconciler
//! - [`renderer`] - Per-container baselines and the render entry point

pub mod config;
pub mod error;
pub mod host;
pub mod pipeline;
pub mod renderer;
pub mod types;
pub mod vnode;

// Re-export commonly used items
pub use types::*;

pub use config::RenderConfig;
pub use error::{Result, VdomError};

pub use vnode::{
    create_element, create_text_vnode, Children, ComponentRef, Event, EventHandler, PropValue,
    Props, Style, Tag, VChildren, VNode,
};

pub use host::{Host, HostOp, MemoryHost, OpKind};

pub use pipeline::{mount, patch};

pub use renderer::Renderer;
