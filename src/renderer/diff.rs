//! Differential renderer.
//!
//! The Renderer keeps, per host container, the VNode tree it rendered last.
//! Rendering a new tree into a container diffs it against that baseline and
//! sends only the resulting mutations to the host.
//!
//! # Algorithm
//!
//! 1. Take the container's baseline out of the map
//! 2. No baseline: mount the new tree into the container
//! 3. Baseline present: patch baseline -> new tree (handles move forward)
//! 4. Store the new tree as the baseline for the next comparison

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::config::RenderConfig;
use crate::error::Result;
use crate::host::Host;
use crate::pipeline::{mount, patch, remove};
use crate::types::NodeId;
use crate::vnode::VNode;

/// Renders VNode trees into containers of a host, diffing against the
/// previous render of each container.
pub struct Renderer<H: Host> {
    host: H,
    config: RenderConfig,
    baselines: IndexMap<NodeId, VNode>,
}

impl<H: Host> Renderer<H> {
    /// Create a renderer with the default configuration.
    pub fn new(host: H) -> Self {
        Self::with_config(host, RenderConfig::default())
    }

    pub fn with_config(host: H, config: RenderConfig) -> Self {
        Self {
            host,
            config,
            baselines: IndexMap::new(),
        }
    }

    /// Render `vnode` into `container`.
    ///
    /// The first render of a container mounts; later renders patch against
    /// the stored tree. On error the container's baseline is dropped: the
    /// host may hold a partially patched tree that no longer matches it.
    pub fn render(&mut self, mut vnode: VNode, container: NodeId) -> Result<()> {
        match self.baselines.shift_remove(&container) {
            None => {
                debug!(container = %container, root = vnode.label(), "mount");
                mount(&mut self.host, &self.config, &mut vnode, container, None);
            }
            Some(prev) => {
                debug!(container = %container, root = vnode.label(), "patch");
                if let Err(err) = patch(&mut self.host, &self.config, &prev, &mut vnode, container) {
                    warn!(container = %container, error = %err, "render failed; baseline dropped");
                    return Err(err);
                }
            }
        }

        self.baselines.insert(container, vnode);
        Ok(())
    }

    /// The tree last rendered into `container`.
    pub fn baseline(&self, container: NodeId) -> Option<&VNode> {
        self.baselines.get(&container)
    }

    pub fn has_baseline(&self, container: NodeId) -> bool {
        self.baselines.contains_key(&container)
    }

    /// Containers holding a baseline, in first-render order.
    pub fn containers(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.baselines.keys().copied()
    }

    /// Drop the baseline of `container` without touching the host.
    ///
    /// The next render into `container` mounts from scratch.
    pub fn forget(&mut self, container: NodeId) -> Option<VNode> {
        self.baselines.shift_remove(&container)
    }

    /// Detach the rendered root from `container` and drop its baseline.
    ///
    /// No-op for a container that was never rendered into.
    pub fn unmount(&mut self, container: NodeId) -> Result<()> {
        let Some(prev) = self.baselines.shift_remove(&container) else {
            return Ok(());
        };
        debug!(container = %container, root = prev.label(), "unmount");
        remove(&mut self.host, container, &prev)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host, e.g. to create containers.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }
}
