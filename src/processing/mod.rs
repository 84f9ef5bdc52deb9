//! Processing module for blob classification.
//!
//! This module provides:
//! - Content sniffing (binary vs text, encoding, image formats)
//! - Language detection from filenames, extensions, shebangs and heuristics
//! - Generated and vendored file detection
//! - The [`Blob`] facade tying them together

pub mod blob;
pub mod extension;
pub mod generated;
pub mod heuristics;
pub mod language;
pub mod mime;
pub mod shebang;
pub mod sniffer;
pub mod vendored;

pub use blob::Blob;
pub use extension::ExtensionIndex;
pub use generated::GeneratedDetector;
pub use heuristics::HeuristicDisambiguator;
pub use language::{Language, LanguageKind};
pub use mime::{MimeTable, StaticMimeTable};
pub use shebang::{Shebang, ShebangParser};
pub use sniffer::{ContentSniffer, Encoding, ImageFormat, Sniff};
pub use vendored::VendoredDetector;
