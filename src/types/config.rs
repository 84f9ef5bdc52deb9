//! Configuration types for classification.

use serde::{Deserialize, Serialize};

use crate::{
    DEFAULT_LARGE_BLOB_SIZE, DEFAULT_MAX_INDEXABLE_SIZE, DEFAULT_MINIFIED_LINE_LENGTH,
    DEFAULT_SNIFF_LEN,
};

/// Tunable thresholds used by the classifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Number of leading bytes inspected for NUL / control characters
    pub sniff_len: usize,

    /// Line length above which a `.js` file is considered minified
    pub minified_line_length: usize,

    /// Blobs above this size are not viewable inline
    pub large_blob_size: usize,

    /// Blobs above this size are never indexed
    pub max_indexable_size: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            sniff_len: DEFAULT_SNIFF_LEN,
            minified_line_length: DEFAULT_MINIFIED_LINE_LENGTH,
            large_blob_size: DEFAULT_LARGE_BLOB_SIZE,
            max_indexable_size: DEFAULT_MAX_INDEXABLE_SIZE,
        }
    }
}

impl ClassifierConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            sniff_len: env_or("BLOBSNIFF_SNIFF_LEN", DEFAULT_SNIFF_LEN),
            minified_line_length: env_or(
                "BLOBSNIFF_MINIFIED_LINE_LENGTH",
                DEFAULT_MINIFIED_LINE_LENGTH,
            ),
            large_blob_size: env_or("BLOBSNIFF_LARGE_BLOB_SIZE", DEFAULT_LARGE_BLOB_SIZE),
            max_indexable_size: env_or(
                "BLOBSNIFF_MAX_INDEXABLE_SIZE",
                DEFAULT_MAX_INDEXABLE_SIZE,
            ),
        }
    }

    /// Set the sniff length.
    pub fn with_sniff_len(mut self, len: usize) -> Self {
        self.sniff_len = len;
        self
    }

    /// Set the minified line length threshold.
    pub fn with_minified_line_length(mut self, len: usize) -> Self {
        self.minified_line_length = len;
        self
    }
}

fn env_or(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
