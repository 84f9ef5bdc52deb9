//! Error types.
//!
//! Classification itself is total and never fails. Errors only come from
//! collaborators: reading a blob from disk, or the highlighter.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by blob IO and collaborator calls.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading a blob's bytes from disk failed.
    #[error("failed to read blob {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The path given to `Blob::from_file` is not under the root.
    #[error("path {path} is not inside root {root}")]
    OutsideRoot { path: PathBuf, root: PathBuf },

    /// The highlighter collaborator rejected the content or lexer.
    #[error("highlighter failed for lexer '{lexer}': {message}")]
    Highlight { lexer: String, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
