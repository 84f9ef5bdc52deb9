//! MIME type lookup and `Content-Disposition` helpers.

use std::collections::HashMap;

/// Default for text blobs without a table entry.
pub const TEXT_PLAIN: &str = "text/plain";

/// Default for binary blobs without a table entry.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Extension to MIME type lookup.
///
/// Hosts with their own MIME database implement this and hand it to
/// `Blob::with_mime_table`.
pub trait MimeTable: Send + Sync {
    /// MIME type for an extension (no leading dot, any case).
    fn lookup(&self, extension: &str) -> Option<&str>;
}

lazy_static::lazy_static! {
    static ref DEFAULT_TABLE: HashMap<&'static str, &'static str> = [
        // Source
        ("rb", "application/x-ruby"),
        ("py", "text/x-python"),
        ("pl", "application/x-perl"),
        ("pm", "application/x-perl"),
        ("sh", "application/x-sh"),
        ("js", "application/javascript"),
        ("ts", "application/typescript"),
        ("c", "text/x-c"),
        ("h", "text/x-c"),
        ("cpp", "text/x-c++src"),
        ("hpp", "text/x-c++hdr"),
        ("m", "text/x-objcsrc"),
        ("java", "text/x-java"),
        ("go", "text/x-go"),
        ("rs", "text/x-rust"),
        ("php", "application/x-httpd-php"),
        ("tcl", "application/x-tcl"),
        ("sql", "application/sql"),
        // Markup and data
        ("html", "text/html"),
        ("htm", "text/html"),
        ("css", "text/css"),
        ("xml", "application/xml"),
        ("json", "application/json"),
        ("yml", "text/yaml"),
        ("yaml", "text/yaml"),
        ("csv", "text/csv"),
        ("md", "text/markdown"),
        ("txt", "text/plain"),
        ("diff", "text/x-diff"),
        ("patch", "text/x-diff"),
        ("svg", "image/svg+xml"),
        // Images
        ("png", "image/png"),
        ("jpg", "image/jpeg"),
        ("jpeg", "image/jpeg"),
        ("gif", "image/gif"),
        ("bmp", "image/bmp"),
        ("webp", "image/webp"),
        ("psd", "image/vnd.adobe.photoshop"),
        // Archives and documents
        ("pdf", "application/pdf"),
        ("zip", "application/zip"),
        ("gz", "application/gzip"),
        ("tar", "application/x-tar"),
        ("jar", "application/java-archive"),
        ("deb", "application/vnd.debian.binary-package"),
        ("exe", "application/x-msdownload"),
    ]
    .into_iter()
    .collect();
}

/// Built-in MIME table.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticMimeTable;

impl MimeTable for StaticMimeTable {
    fn lookup(&self, extension: &str) -> Option<&str> {
        DEFAULT_TABLE
            .get(extension.to_lowercase().as_str())
            .copied()
    }
}

/// MIME type for a blob, falling back to `text/plain` or
/// `application/octet-stream` when the table has no entry.
pub fn mime_type_for(table: &dyn MimeTable, extension: Option<&str>, binary: bool) -> String {
    match extension.and_then(|ext| table.lookup(ext)) {
        Some(mime) => mime.to_string(),
        None if binary => OCTET_STREAM.to_string(),
        None => TEXT_PLAIN.to_string(),
    }
}

/// `attachment; filename=...` with the name form-escaped.
pub fn attachment_disposition(name: &str) -> String {
    format!("attachment; filename={}", escape_filename(name))
}

/// Form-style URL escaping: spaces become `+`.
pub fn escape_filename(name: &str) -> String {
    urlencoding::encode(name).replace("%20", "+")
}
