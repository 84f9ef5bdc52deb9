//! Binary, text, encoding and image detection over raw bytes.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::processing::extension::extension_of;
use crate::DEFAULT_SNIFF_LEN;

lazy_static::lazy_static! {
    /// Extensions that are always binary, whatever the bytes say.
    static ref BINARY_EXTENSIONS: HashSet<&'static str> = [
        // Compiled
        "o", "obj", "a", "lib", "so", "dll", "dylib", "exe", "bin", "class",
        "pyc", "pyo", "pyd", "elc", "beam", "wasm",
        // Archives and packages
        "zip", "tar", "gz", "tgz", "bz2", "xz", "rar", "7z", "jar", "war", "ear",
        "gem", "deb", "rpm", "dmg", "iso", "apk", "msi", "egg", "whl", "nupkg",
        // Documents
        "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "odt", "psd", "ai",
        // Media
        "mp3", "mp4", "avi", "mov", "wav", "flac", "mkv", "wmv", "ogg", "webm",
        // Data
        "db", "sqlite", "sqlite3", "mdb",
        // Fonts
        "woff", "woff2", "ttf", "eot", "otf",
    ]
    .into_iter()
    .collect();
}

/// Detected text encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Encoding {
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "utf-16le")]
    Utf16Le,
    #[serde(rename = "utf-16be")]
    Utf16Be,
    #[serde(rename = "iso-8859-1")]
    Latin1,
}

impl Encoding {
    /// Charset label for `Content-Type`.
    pub fn charset(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Utf16Le => "utf-16le",
            Encoding::Utf16Be => "utf-16be",
            Encoding::Latin1 => "iso-8859-1",
        }
    }

    /// Decode bytes known to be in this encoding.
    pub fn decode(&self, data: &[u8]) -> String {
        match self {
            Encoding::Utf8 => {
                let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
                String::from_utf8_lossy(data).into_owned()
            }
            Encoding::Utf16Le => decode_utf16(&data[2.min(data.len())..], u16::from_le_bytes),
            Encoding::Utf16Be => decode_utf16(&data[2.min(data.len())..], u16::from_be_bytes),
            Encoding::Latin1 => data.iter().map(|&b| b as char).collect(),
        }
    }
}

fn decode_utf16(data: &[u8], from_bytes: fn([u8; 2]) -> u16) -> String {
    let units: Vec<u16> = data
        .chunks_exact(2)
        .map(|c| from_bytes([c[0], c[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}

/// Image formats recognised for inline display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Webp,
}

impl ImageFormat {
    /// Image format implied by an extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "gif" => Some(ImageFormat::Gif),
            _ => None,
        }
    }

    /// Image format from a magic-byte signature.
    pub fn from_signature(data: &[u8]) -> Option<Self> {
        if data.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(ImageFormat::Png)
        } else if data.starts_with(b"\xFF\xD8\xFF") {
            Some(ImageFormat::Jpeg)
        } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            Some(ImageFormat::Gif)
        } else if data.starts_with(b"BM") && data.len() >= 14 {
            Some(ImageFormat::Bmp)
        } else if data.len() >= 12 && &data[..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            Some(ImageFormat::Webp)
        } else {
            None
        }
    }
}

/// Result of sniffing one blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sniff {
    /// Text encoding, `None` when binary.
    pub encoding: Option<Encoding>,
    pub binary: bool,
    pub image: Option<ImageFormat>,
}

impl Sniff {
    pub fn is_text(&self) -> bool {
        !self.binary
    }
}

/// Byte-level content inspector.
#[derive(Debug, Clone)]
pub struct ContentSniffer {
    sniff_len: usize,
}

impl Default for ContentSniffer {
    fn default() -> Self {
        Self::new(DEFAULT_SNIFF_LEN)
    }
}

impl ContentSniffer {
    /// Create a sniffer that inspects the first `sniff_len` bytes for
    /// binary markers.
    pub fn new(sniff_len: usize) -> Self {
        Self { sniff_len }
    }

    /// Classify a blob from its basename and bytes.
    pub fn sniff(&self, name: &str, data: &[u8]) -> Sniff {
        let ext = extension_of(name);

        let encoding = if ext.is_some_and(is_binary_extension) {
            trace!(filename = name, "binary by extension");
            None
        } else {
            self.detect_encoding(data)
        };
        let binary = encoding.is_none();

        // Magic bytes are only trusted on content that is already binary.
        let image = ext.and_then(ImageFormat::from_extension).or_else(|| {
            if binary {
                ImageFormat::from_signature(data)
            } else {
                None
            }
        });

        Sniff {
            encoding,
            binary,
            image,
        }
    }

    /// Detect the text encoding, or `None` if the content looks binary.
    pub fn detect_encoding(&self, data: &[u8]) -> Option<Encoding> {
        if data.is_empty() {
            return Some(Encoding::Utf8);
        }

        if data.starts_with(b"\xFF\xFE") && data.len() % 2 == 0 {
            return Some(Encoding::Utf16Le);
        }
        if data.starts_with(b"\xFE\xFF") && data.len() % 2 == 0 {
            return Some(Encoding::Utf16Be);
        }

        let sample = &data[..data.len().min(self.sniff_len)];

        // Check for null bytes (strong indicator of binary)
        if sample.contains(&0) {
            return None;
        }

        if std::str::from_utf8(data).is_ok() {
            return Some(Encoding::Utf8);
        }

        if self.is_binary_content(sample) {
            return None;
        }

        trace!("not utf-8, falling back to latin-1");
        Some(Encoding::Latin1)
    }

    /// Ratio test over control characters.
    pub fn is_binary_content(&self, sample: &[u8]) -> bool {
        if sample.is_empty() {
            return false;
        }

        // Tab, LF, FF, CR and ESC show up in real text files.
        let non_printable = sample
            .iter()
            .filter(|&&b| b < 32 && !matches!(b, 9 | 10 | 12 | 13 | 27))
            .count();

        // More than 10% non-printable suggests binary
        non_printable as f64 / sample.len() as f64 > 0.1
    }
}

/// Whether an extension (without dot) is a known binary-file extension.
pub fn is_binary_extension(ext: &str) -> bool {
    BINARY_EXTENSIONS.contains(ext.to_lowercase().as_str())
}
