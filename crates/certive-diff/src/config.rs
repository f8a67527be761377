//! Engine configuration
//!
//! The comparison bounds are an explicit configuration value handed to the
//! engine at construction. Deployments that want different bounds build a
//! `DiffConfig` once at startup; nothing here is process-global or mutable
//! after that.

use serde::{Deserialize, Serialize};

/// Default bound on the rendered length of value summaries.
pub const DEFAULT_MAX_STRING_LEN: usize = 40;

/// Default bound on the number of retained added/removed element summaries.
pub const DEFAULT_MAX_VALUE_COUNT: usize = 100;

/// Bounds applied when rendering comparison results.
///
/// A bound of `0` disables the corresponding limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffConfig {
    /// Maximum characters in a rendered value summary before truncation.
    #[serde(default = "default_max_string_len")]
    pub max_string_len: usize,
    /// Maximum number of element summaries kept per added/removed list.
    #[serde(default = "default_max_value_count")]
    pub max_value_count: usize,
}

fn default_max_string_len() -> usize {
    DEFAULT_MAX_STRING_LEN
}

fn default_max_value_count() -> usize {
    DEFAULT_MAX_VALUE_COUNT
}

impl DiffConfig {
    /// Create a configuration with the default bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the summary length bound (`0` disables truncation).
    pub fn with_max_string_len(mut self, max_string_len: usize) -> Self {
        self.max_string_len = max_string_len;
        self
    }

    /// Set the element summary count bound (`0` disables the cap).
    pub fn with_max_value_count(mut self, max_value_count: usize) -> Self {
        self.max_value_count = max_value_count;
        self
    }
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            max_string_len: DEFAULT_MAX_STRING_LEN,
            max_value_count: DEFAULT_MAX_VALUE_COUNT,
        }
    }
}
