//! Syntax highlighting seam.
//!
//! The classifier only picks a lexer name; rendering markup is delegated to
//! a [`Highlighter`]. [`PlainHighlighter`] is a pass-through that escapes
//! HTML without colouring anything.

use crate::error::Result;
use crate::processing::language::Language;

/// Lexer name used when no language is known.
pub const TEXT_ONLY: &str = "Text only";

/// Lexer name for a resolved language, or "Text only".
pub fn lexer_name_for(language: Option<&Language>) -> &'static str {
    language.map(|lang| lang.lexer).unwrap_or(TEXT_ONLY)
}

/// Renders highlighted markup for content under a named lexer.
pub trait Highlighter: Send + Sync {
    /// Highlighted markup without a container element.
    fn highlight(&self, content: &str, lexer: &str) -> Result<String>;

    /// Highlighted markup wrapped in the highlighter's container element.
    fn highlight_wrapped(&self, content: &str, lexer: &str) -> Result<String> {
        let inner = self.highlight(content, lexer)?;
        Ok(format!("<div class=\"highlight\"><pre>{inner}</pre>\n</div>\n"))
    }
}

/// Highlighter that only escapes HTML.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, content: &str, _lexer: &str) -> Result<String> {
        Ok(escape_html(content))
    }
}

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
