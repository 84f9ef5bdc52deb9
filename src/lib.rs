//! Blobsniff Library
//!
//! Classifies repository files ("blobs") from their path and bytes: binary or
//! text, language, generated or vendored, and how to serve them over HTTP.
//!
//! ```no_run
//! use blobsniff::Blob;
//!
//! let blob = Blob::new("lib/foo.rb", b"module Foo\nend\n".to_vec());
//! assert_eq!(blob.language().map(|l| l.name), Some("Ruby"));
//! assert!(blob.is_indexable());
//! ```

pub mod error;
pub mod highlight;
pub mod processing;
pub mod types;

pub use error::{Error, Result};
pub use highlight::{Highlighter, PlainHighlighter};
pub use processing::{Blob, Encoding, ImageFormat, Language, LanguageKind};
pub use types::{Classification, ClassifierConfig};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::highlight::*;
    pub use crate::processing::*;
    pub use crate::types::*;
    pub use crate::{Error, Result};
}

/// Bytes inspected for binary markers
pub const DEFAULT_SNIFF_LEN: usize = 8192;

/// Line length above which JavaScript counts as minified
pub const DEFAULT_MINIFIED_LINE_LENGTH: usize = 110;

/// Blobs above this size are not rendered inline (1MB)
pub const DEFAULT_LARGE_BLOB_SIZE: usize = 1024 * 1024;

/// Blobs above this size are never indexed (100KB)
pub const DEFAULT_MAX_INDEXABLE_SIZE: usize = 100 * 1024;
