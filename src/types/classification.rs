//! Serializable snapshot of a blob's derived attributes.

use serde::{Deserialize, Serialize};

use crate::processing::sniffer::{Encoding, ImageFormat};

/// Every derived fact about one blob, flattened for output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Repository-relative path
    pub path: String,

    /// Basename
    pub name: String,

    /// Size in bytes
    pub size: usize,

    pub mime_type: String,
    pub content_type: String,
    pub disposition: String,

    /// Detected text encoding, `None` for binary blobs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<Encoding>,

    pub binary: bool,
    pub text: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageFormat>,

    pub viewable: bool,
    pub generated: bool,
    pub vendored: bool,
    pub indexable: bool,

    /// Resolved language name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Highlighter lexer name ("Text only" when no language)
    pub lexer: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shebang_script: Option<String>,

    /// Total lines
    pub loc: usize,

    /// Non-blank lines
    pub sloc: usize,
}

impl Classification {
    /// Language name, or "unknown".
    pub fn language_or_unknown(&self) -> &str {
        self.language.as_deref().unwrap_or("unknown")
    }
}
