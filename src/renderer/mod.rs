//! Renderer - The entry point that owns the host and per-container baselines.

mod diff;

pub use diff::Renderer;
