//! Render configuration.
//!
//! A `RenderConfig` is handed to the [`Renderer`](crate::Renderer) once and
//! threaded by reference through mount and patch.

/// Knobs that shape how props and keys are interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Sigil marking a prop as an event binding (`@click` -> `click`).
    pub event_prefix: char,
    /// Prop name that carries sibling identity.
    pub key_prop: String,
    /// Log a warning when one sibling list repeats a key.
    pub warn_duplicate_keys: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            event_prefix: '@',
            key_prop: "key".to_string(),
            warn_duplicate_keys: true,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_event_prefix(mut self, prefix: char) -> Self {
        self.event_prefix = prefix;
        self
    }

    pub fn with_key_prop(mut self, key_prop: impl Into<String>) -> Self {
        self.key_prop = key_prop.into();
        self
    }

    pub fn with_duplicate_key_warnings(mut self, enabled: bool) -> Self {
        self.warn_duplicate_keys = enabled;
        self
    }

    /// Event type named by `key`, if `key` is an event binding.
    ///
    /// Returns `Some("")` for a bare sigil; callers decide what to do with it.
    pub fn event_type<'a>(&self, key: &'a str) -> Option<&'a str> {
        key.strip_prefix(self.event_prefix)
    }
}
