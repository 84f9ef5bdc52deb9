//! Filename and extension to candidate-language lookup.

use std::collections::HashMap;

use tracing::trace;

use crate::processing::language::{Language, LANGUAGES};

lazy_static::lazy_static! {
    static ref BY_FILENAME: HashMap<&'static str, Vec<&'static Language>> = {
        let mut map: HashMap<&'static str, Vec<&'static Language>> = HashMap::new();
        for lang in LANGUAGES {
            for filename in lang.filenames {
                map.entry(*filename).or_default().push(lang);
            }
        }
        map
    };

    static ref BY_EXTENSION: HashMap<&'static str, Vec<&'static Language>> = {
        let mut map: HashMap<&'static str, Vec<&'static Language>> = HashMap::new();
        for lang in LANGUAGES {
            for ext in lang.extensions {
                map.entry(*ext).or_default().push(lang);
            }
        }
        map
    };

    /// Extensions of `ignore_case` languages, keyed lowercase.
    static ref BY_FOLDED_EXTENSION: HashMap<String, Vec<&'static Language>> = {
        let mut map: HashMap<String, Vec<&'static Language>> = HashMap::new();
        for lang in LANGUAGES.iter().filter(|lang| lang.ignore_case) {
            for ext in lang.extensions {
                map.entry(ext.to_lowercase()).or_default().push(lang);
            }
        }
        map
    };
}

/// Extract the extension of a basename, without the dot.
///
/// Returns `None` for names without a dot and for dotfiles like `.bashrc`
/// that have no second dot.
pub fn extension_of(name: &str) -> Option<&str> {
    let dot = name.rfind('.')?;
    if dot == 0 || dot + 1 == name.len() {
        return None;
    }
    Some(&name[dot + 1..])
}

/// Static index from basenames and extensions to candidate languages.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExtensionIndex;

impl ExtensionIndex {
    pub fn new() -> Self {
        Self
    }

    /// Candidate languages for a basename, in declaration order.
    ///
    /// An exact filename hit (`Rakefile`, `.vimrc`) takes precedence over the
    /// extension.
    pub fn candidates(&self, name: &str) -> Vec<&'static Language> {
        if let Some(langs) = BY_FILENAME.get(name) {
            trace!(filename = name, "filename match");
            return langs.clone();
        }

        match extension_of(name) {
            Some(ext) => self.candidates_for_extension(ext),
            None => Vec::new(),
        }
    }

    /// Candidate languages for a bare extension (no leading dot).
    pub fn candidates_for_extension(&self, ext: &str) -> Vec<&'static Language> {
        let mut langs: Vec<&'static Language> =
            BY_EXTENSION.get(ext).cloned().unwrap_or_default();

        if let Some(folded) = BY_FOLDED_EXTENSION.get(&ext.to_lowercase()) {
            for &lang in folded {
                if !langs.contains(&lang) {
                    langs.push(lang);
                }
            }
        }

        langs.sort_by_key(|lang| lang.index());
        langs
    }

    /// Whether more than one language claims this basename.
    pub fn is_ambiguous(&self, name: &str) -> bool {
        self.candidates(name).len() > 1
    }
}
