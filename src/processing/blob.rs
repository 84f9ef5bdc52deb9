//! Per-file classification entry point.
//!
//! A [`Blob`] pairs a repository-relative path with the file's bytes and
//! exposes every derived attribute. Each attribute is computed on first use
//! and memoized; content is decoded at most once.

use std::fmt;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::error::{Error, Result};
use crate::highlight::{lexer_name_for, Highlighter};
use crate::processing::extension::{extension_of, ExtensionIndex};
use crate::processing::generated::GeneratedDetector;
use crate::processing::heuristics::HeuristicDisambiguator;
use crate::processing::language::Language;
use crate::processing::mime::{self, MimeTable, StaticMimeTable};
use crate::processing::shebang::{Shebang, ShebangParser};
use crate::processing::sniffer::{ContentSniffer, Encoding, ImageFormat, Sniff};
use crate::processing::vendored::VendoredDetector;
use crate::types::{Classification, ClassifierConfig};

/// Write-once attribute cells.
#[derive(Default)]
struct Memo {
    sniff: OnceCell<Sniff>,
    text: OnceCell<Option<String>>,
    line_spans: OnceCell<Vec<Range<usize>>>,
    sloc: OnceCell<usize>,
    shebang: OnceCell<Option<Shebang>>,
    language: OnceCell<Option<&'static Language>>,
    generated: OnceCell<bool>,
    vendored: OnceCell<bool>,
    mime_type: OnceCell<String>,
}

/// A file's path and content, plus everything derived from them.
pub struct Blob {
    path: String,
    data: Vec<u8>,
    config: ClassifierConfig,
    mime_table: Arc<dyn MimeTable>,
    vendored_detector: VendoredDetector,
    memo: Memo,
}

impl fmt::Debug for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blob")
            .field("path", &self.path)
            .field("size", &self.data.len())
            .finish()
    }
}

impl Blob {
    /// Create a blob from a repository-relative path and its bytes.
    pub fn new(path: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            data: data.into(),
            config: ClassifierConfig::default(),
            mime_table: Arc::new(StaticMimeTable),
            vendored_detector: VendoredDetector::new(),
            memo: Memo::default(),
        }
    }

    /// Read a blob from disk. The stored path is `path` relative to `root`.
    ///
    /// When `path` does not lexically start with `root` (say `root` is `.`
    /// and `path` is absolute) both are canonicalized before comparing.
    pub fn from_file(root: &Path, path: &Path) -> Result<Self> {
        let relative = match path.strip_prefix(root) {
            Ok(relative) => relative.to_path_buf(),
            Err(_) => canonical_relative(root, path)?,
        };

        let data = std::fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let relative = relative.to_string_lossy().replace('\\', "/");
        debug!(path = %relative, size = data.len(), "read blob");
        Ok(Self::new(relative, data))
    }

    /// Use a custom configuration. Clears any memoized attributes.
    pub fn with_config(mut self, config: ClassifierConfig) -> Self {
        self.config = config;
        self.memo = Memo::default();
        self
    }

    /// Use a custom MIME table. Clears any memoized attributes.
    pub fn with_mime_table(mut self, table: Arc<dyn MimeTable>) -> Self {
        self.mime_table = table;
        self.memo = Memo::default();
        self
    }

    /// Use a custom vendored detector. Clears any memoized attributes.
    pub fn with_vendored_detector(mut self, detector: VendoredDetector) -> Self {
        self.vendored_detector = detector;
        self.memo = Memo::default();
        self
    }

    // -- Identity --------------------------------------------------------

    /// Repository-relative path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Basename.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Extension without the dot.
    pub fn extension(&self) -> Option<&str> {
        extension_of(self.name())
    }

    /// Raw bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    // -- Content sniffing ------------------------------------------------

    fn sniff(&self) -> &Sniff {
        self.memo.sniff.get_or_init(|| {
            ContentSniffer::new(self.config.sniff_len).sniff(self.name(), &self.data)
        })
    }

    /// Detected encoding, `None` for binary blobs.
    pub fn encoding(&self) -> Option<Encoding> {
        self.sniff().encoding
    }

    pub fn is_binary(&self) -> bool {
        self.sniff().binary
    }

    pub fn is_text(&self) -> bool {
        !self.is_binary()
    }

    /// Image format, if this blob is an image.
    pub fn image_format(&self) -> Option<ImageFormat> {
        self.sniff().image
    }

    pub fn is_image(&self) -> bool {
        self.image_format().is_some()
    }

    /// Too big to render inline.
    pub fn is_large(&self) -> bool {
        self.size() > self.config.large_blob_size
    }

    /// Renderable as text in a browser.
    pub fn is_viewable(&self) -> bool {
        self.is_text() && !self.is_image() && !self.is_large()
    }

    /// Decoded content, `None` for binary blobs.
    pub fn text(&self) -> Option<&str> {
        self.memo
            .text
            .get_or_init(|| self.encoding().map(|enc| enc.decode(&self.data)))
            .as_deref()
    }

    /// Byte ranges of each line in the decoded text, `\r\n` endings
    /// excluded. Split once and reused.
    fn line_spans(&self) -> &[Range<usize>] {
        self.memo.line_spans.get_or_init(|| {
            let Some(text) = self.text().filter(|text| !text.is_empty()) else {
                return Vec::new();
            };
            let mut start = 0;
            text.split('\n')
                .map(|line| {
                    let end = start + line.strip_suffix('\r').unwrap_or(line).len();
                    let span = start..end;
                    start += line.len() + 1;
                    span
                })
                .collect()
        })
    }

    /// Content split on newlines.
    ///
    /// A trailing newline leaves a final empty element; empty or binary
    /// content has no lines.
    pub fn lines(&self) -> Vec<&str> {
        let Some(text) = self.text() else {
            return Vec::new();
        };
        self.line_spans()
            .iter()
            .map(|span| &text[span.clone()])
            .collect()
    }

    /// Line count.
    pub fn loc(&self) -> usize {
        self.line_spans().len()
    }

    /// Non-blank line count.
    pub fn sloc(&self) -> usize {
        *self.memo.sloc.get_or_init(|| {
            self.lines()
                .iter()
                .filter(|line| !line.trim().is_empty())
                .count()
        })
    }

    // -- Language --------------------------------------------------------

    /// Parsed shebang line.
    pub fn shebang(&self) -> Option<&Shebang> {
        self.memo
            .shebang
            .get_or_init(|| self.text().and_then(|text| ShebangParser::new().parse(text)))
            .as_ref()
    }

    /// Version-stripped interpreter name from the shebang.
    pub fn shebang_script(&self) -> Option<&str> {
        self.shebang().map(|s| s.script.as_str())
    }

    /// Language implied by the shebang alone.
    pub fn shebang_language(&self) -> Option<&'static Language> {
        self.shebang().and_then(|s| s.language)
    }

    /// Resolved language, `None` when unknown or binary.
    pub fn language(&self) -> Option<&'static Language> {
        *self.memo.language.get_or_init(|| {
            let text = self.text()?;
            let candidates = ExtensionIndex::new().candidates(self.name());
            let language = HeuristicDisambiguator::new().resolve(
                &candidates,
                self.shebang_language(),
                text,
            );
            debug!(
                path = %self.path,
                candidates = candidates.len(),
                language = language.map(|l| l.name).unwrap_or("unknown"),
                "resolved language"
            );
            language
        })
    }

    /// Lexer name for the highlighter.
    pub fn lexer(&self) -> &'static str {
        lexer_name_for(self.language())
    }

    // -- Ownership -------------------------------------------------------

    /// Machine-generated content.
    pub fn is_generated(&self) -> bool {
        *self.memo.generated.get_or_init(|| {
            GeneratedDetector::new(self.config.minified_line_length)
                .is_generated(self.name(), &self.lines())
        })
    }

    /// Third-party code.
    pub fn is_vendored(&self) -> bool {
        *self
            .memo
            .vendored
            .get_or_init(|| self.vendored_detector.is_vendored(&self.path))
    }

    /// Eligible for search indexing and language statistics.
    pub fn is_indexable(&self) -> bool {
        self.is_text()
            && self.size() <= self.config.max_indexable_size
            && !self.is_generated()
            && !self.is_vendored()
            && self.language().is_some_and(|lang| lang.searchable)
    }

    // -- HTTP presentation -----------------------------------------------

    /// MIME type by extension.
    pub fn mime_type(&self) -> &str {
        self.memo.mime_type.get_or_init(|| {
            mime::mime_type_for(self.mime_table.as_ref(), self.extension(), self.is_binary())
        })
    }

    /// `Content-Type` header value.
    ///
    /// Text is always served as `text/plain` so browsers render it instead
    /// of downloading it; the extension's type stays on [`Blob::mime_type`].
    pub fn content_type(&self) -> String {
        match self.encoding() {
            Some(encoding) if self.is_text() => {
                format!("{}; charset={}", mime::TEXT_PLAIN, encoding.charset())
            }
            _ => mime::OCTET_STREAM.to_string(),
        }
    }

    /// `Content-Disposition` header value.
    pub fn disposition(&self) -> String {
        if self.is_binary() || !self.is_viewable() {
            mime::attachment_disposition(self.name())
        } else {
            "inline".to_string()
        }
    }

    // -- Highlighting ----------------------------------------------------

    /// Highlighted markup wrapped in a container, `None` if not viewable.
    pub fn colorize(&self, highlighter: &dyn Highlighter) -> Result<Option<String>> {
        match self.viewable_text() {
            Some(text) => highlighter.highlight_wrapped(text, self.lexer()).map(Some),
            None => Ok(None),
        }
    }

    /// Highlighted markup without the container, `None` if not viewable.
    pub fn colorize_without_wrapper(&self, highlighter: &dyn Highlighter) -> Result<Option<String>> {
        match self.viewable_text() {
            Some(text) => highlighter.highlight(text, self.lexer()).map(Some),
            None => Ok(None),
        }
    }

    fn viewable_text(&self) -> Option<&str> {
        if self.is_viewable() {
            self.text()
        } else {
            None
        }
    }

    // -- Summary ---------------------------------------------------------

    /// Snapshot of every attribute.
    pub fn classify(&self) -> Classification {
        Classification {
            path: self.path.clone(),
            name: self.name().to_string(),
            size: self.size(),
            mime_type: self.mime_type().to_string(),
            content_type: self.content_type(),
            disposition: self.disposition(),
            encoding: self.encoding(),
            binary: self.is_binary(),
            text: self.is_text(),
            image: self.image_format(),
            viewable: self.is_viewable(),
            generated: self.is_generated(),
            vendored: self.is_vendored(),
            indexable: self.is_indexable(),
            language: self.language().map(|lang| lang.name.to_string()),
            lexer: self.lexer().to_string(),
            shebang_script: self.shebang_script().map(str::to_string),
            loc: self.loc(),
            sloc: self.sloc(),
        }
    }
}

fn canonical_relative(root: &Path, path: &Path) -> Result<PathBuf> {
    let canonical = |p: &Path| {
        p.canonicalize().map_err(|source| Error::Io {
            path: p.to_path_buf(),
            source,
        })
    };
    let root = canonical(root)?;
    let full = canonical(path)?;

    full.strip_prefix(&root)
        .map(Path::to_path_buf)
        .map_err(|_| Error::OutsideRoot {
            path: path.to_path_buf(),
            root: root.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::PlainHighlighter;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR\x00\x00\x00\x10\x00\x00\x00\x10";

    fn blob(path: &str, data: &str) -> Blob {
        Blob::new(path, data.as_bytes().to_vec())
    }

    fn language(path: &str, data: &str) -> Option<&'static str> {
        blob(path, data).language().map(|lang| lang.name)
    }

    #[test]
    fn test_name_and_extension() {
        let b = blob("lib/linguist/foo.rb", "");
        assert_eq!(b.name(), "foo.rb");
        assert_eq!(b.extension(), Some("rb"));
        assert_eq!(blob("README", "").extension(), None);
        assert_eq!(blob(".bashrc", "").extension(), None);
    }

    #[test]
    fn test_ruby_module_end_to_end() {
        let b = blob("foo.rb", "module Foo\nend\n");
        assert_eq!(b.data(), b"module Foo\nend\n");
        assert_eq!(b.size(), 15);
        assert_eq!(b.lines(), vec!["module Foo", "end", ""]);
        assert_eq!(b.loc(), 3);
        assert_eq!(b.sloc(), 2);
        assert!(!b.is_binary());
        assert_eq!(b.language().map(|l| l.name), Some("Ruby"));
        assert!(b.shebang_script().is_none());
        assert!(b.shebang_language().is_none());
    }

    #[test]
    fn test_crlf_lines() {
        let b = blob("win.txt", "one\r\ntwo\r\n");
        assert_eq!(b.lines(), vec!["one", "two", ""]);
    }

    #[test]
    fn test_empty_blob() {
        let b = blob("empty.txt", "");
        assert!(b.is_text());
        assert_eq!(b.loc(), 0);
        assert_eq!(b.sloc(), 0);
    }

    #[test]
    fn test_mime_type() {
        assert_eq!(blob("grit.rb", "").mime_type(), "application/x-ruby");
        assert_eq!(blob("bar.xml", "<bar/>").mime_type(), "application/xml");
        assert_eq!(blob("script.sh", "#!/bin/sh\n").mime_type(), "application/x-sh");
        assert_eq!(blob("dog.o", "").mime_type(), "application/octet-stream");
        assert_eq!(blob("notes.frob", "hi").mime_type(), "text/plain");
    }

    #[test]
    fn test_custom_mime_table() {
        struct Table;
        impl MimeTable for Table {
            fn lookup(&self, extension: &str) -> Option<&str> {
                (extension == "rb").then_some("application/ruby")
            }
        }
        let b = blob("grit.rb", "module Grit\nend\n").with_mime_table(Arc::new(Table));
        assert_eq!(b.mime_type(), "application/ruby");
    }

    #[test]
    fn test_content_type() {
        assert_eq!(
            blob("grit.rb", "module Grit\nend\n").content_type(),
            "text/plain; charset=utf-8"
        );
        assert_eq!(blob("foo.pl", "print 1;\n").content_type(), "text/plain; charset=utf-8");
        assert_eq!(blob("bar.xml", "<bar/>\n").content_type(), "text/plain; charset=utf-8");
        assert_eq!(blob("script.sh", "#!/bin/sh\n").content_type(), "text/plain; charset=utf-8");
        assert_eq!(blob("file.txt", "hello\n").content_type(), "text/plain; charset=utf-8");
        // The extension's type is still reported separately.
        assert_eq!(blob("grit.rb", "module Grit\nend\n").mime_type(), "application/x-ruby");
        assert_eq!(blob("dog.o", "").content_type(), "application/octet-stream");
        let latin = Blob::new("latin.txt", b"caf\xe9\n".to_vec());
        assert_eq!(latin.content_type(), "text/plain; charset=iso-8859-1");
    }

    #[test]
    fn test_disposition() {
        assert_eq!(blob("foo.bin", "").disposition(), "attachment; filename=foo.bin");
        assert_eq!(
            blob("pkg/linguist.gem", "").disposition(),
            "attachment; filename=linguist.gem"
        );
        assert_eq!(blob("foo bar.jar", "").disposition(), "attachment; filename=foo+bar.jar");
        assert_eq!(blob("foo.txt", "hello").disposition(), "inline");
        assert_eq!(blob("grit.rb", "module Grit\nend\n").disposition(), "inline");
    }

    #[test]
    fn test_large_blob_is_attachment() {
        let config = ClassifierConfig {
            large_blob_size: 8,
            ..ClassifierConfig::default()
        };
        let b = blob("big.txt", "0123456789\n").with_config(config);
        assert!(b.is_text());
        assert!(b.is_large());
        assert!(!b.is_viewable());
        assert_eq!(b.disposition(), "attachment; filename=big.txt");
    }

    #[test]
    fn test_binary_and_text() {
        assert!(blob("linguist.gem", "").is_binary());
        assert!(blob("git.deb", "").is_binary());
        assert!(blob("git.exe", "MZ").is_binary());
        assert!(Blob::new("blob.dat", b"\x00\x01\x02".to_vec()).is_binary());
        assert!(!blob("file.txt", "Hello\n").is_binary());
        assert!(!blob("script.pl", "#!/usr/bin/env perl\n").is_binary());
        assert!(blob("file.json", "{\"a\": 1}\n").is_text());
        assert!(blob("script.sh", "#!/bin/sh\n").is_text());
    }

    #[test]
    fn test_image() {
        assert!(Blob::new("octocat.png", PNG_HEADER.to_vec()).is_image());
        assert!(blob("octocat.jpg", "").is_image());
        assert!(blob("octocat.jpeg", "").is_image());
        assert!(blob("octocat.gif", "").is_image());
        assert!(!blob("octocat.psd", "").is_image());
    }

    #[test]
    fn test_viewable() {
        assert!(blob("foo.rb", "module Foo\nend\n").is_viewable());
        assert!(blob("script.pl", "#!/usr/bin/perl\n").is_viewable());
        assert!(!Blob::new("octocat.png", PNG_HEADER.to_vec()).is_viewable());
        assert!(!blob("linguist.gem", "").is_viewable());
    }

    #[test]
    fn test_generated() {
        assert!(!blob("README", "Read me\n").is_generated());
        assert!(blob("MainMenu.xib", "<?xml version=\"1.0\"?>\n").is_generated());
        assert!(blob("project.pbxproj", "// !$*UTF8*$!\n").is_generated());

        let minified = format!("(function(a){{{}}})(window);\n", "var b=a.c?a.d:a.e;".repeat(20));
        assert!(blob("jquery-1.6.1.min.js", &minified).is_generated());
        assert!(!blob("jquery-1.6.1.js", "(function(window) {\n  var jQuery;\n})(window);\n").is_generated());
        assert!(!blob("empty.min.js", "").is_generated());
    }

    #[test]
    fn test_vendored() {
        assert!(!blob("README", "").is_vendored());
        assert!(blob("node_modules/coffee-script/lib/coffee-script.js", "").is_vendored());
        assert!(blob("public/javascripts/jquery-1.6.1.min.js", "").is_vendored());
        assert!(!blob("public/javascripts/jquery.github.menu.js", "").is_vendored());
    }

    #[test]
    fn test_indexable() {
        assert!(blob("file.txt", "Hello\n").is_indexable());
        assert!(blob("foo.rb", "module Foo\nend\n").is_indexable());
        assert!(!blob("defun.kt", "fun main() {}\n").is_indexable());
        assert!(!blob("github.po", "msgid \"\"\nmsgstr \"\"\n").is_indexable());
        assert!(!blob("dump.sql", "INSERT INTO t VALUES (1);\n").is_indexable());
        assert!(!blob("linguist.gem", "").is_indexable());
        assert!(!blob("vendor/foo.rb", "module Foo\nend\n").is_indexable());
        assert!(!blob("MainMenu.xib", "<xml/>\n").is_indexable());
    }

    #[test]
    fn test_indexable_size_limit() {
        let config = ClassifierConfig {
            max_indexable_size: 4,
            ..ClassifierConfig::default()
        };
        assert!(!blob("foo.rb", "module Foo\nend\n").with_config(config).is_indexable());
    }

    #[test]
    fn test_language() {
        assert_eq!(language("foo.rb", "module Foo\nend\n"), Some("Ruby"));
        assert_eq!(language("script.rb", "#!/usr/bin/env ruby\nputs 1\n"), Some("Ruby"));
        assert_eq!(language("wrong_shebang.rb", "#!/usr/bin/env python\nputs 1\n"), Some("Ruby"));
        assert_eq!(language("hello.c", "int main() { return 0; }\n"), Some("C"));
        assert_eq!(language("hello.h", "void hello(void);\n"), Some("C"));
        assert_eq!(language("hello.cpp", "int main() {}\n"), Some("C++"));
        assert_eq!(language("bar.h", "class Bar {\n  protected:\n    int x;\n};\n"), Some("C++"));
        assert_eq!(language("bar.hpp", "class Bar {};\n"), Some("C++"));
        assert_eq!(language("hello.m", "#import <stdio.h>\nint main() {}\n"), Some("Objective-C"));
        assert_eq!(language("Foo.m", "#import \"Foo.h\"\n@implementation Foo\n@end\n"), Some("Objective-C"));
        assert_eq!(language("Foo.h", "#import <Foundation/Foundation.h>\n@interface Foo : NSObject\n@end\n"), Some("Objective-C"));
        assert_eq!(language("hello.s", ".globl _main\n_main:\n  ret\n"), Some("GAS"));
        assert_eq!(Blob::new("octocat.png", PNG_HEADER.to_vec()).language(), None);
        assert_eq!(language("README", "Read me\n"), None);
    }

    #[test]
    fn test_dotfile_languages() {
        assert_eq!(language(".profile", "export PATH\n"), Some("Shell"));
        assert_eq!(language(".bashrc", "alias ll='ls -l'\n"), Some("Shell"));
        assert_eq!(language(".bash_profile", ""), Some("Shell"));
        assert_eq!(language(".zshrc", ""), Some("Shell"));
        assert_eq!(language(".zlogin", ""), Some("Shell"));
        assert_eq!(language(".vimrc", "set nocompatible\n"), Some("VimL"));
        assert_eq!(language(".gvimrc", ""), Some("VimL"));
        assert_eq!(language(".gitconfig", "[user]\n"), Some("INI"));
        assert_eq!(language(".gemrc", "gem: --no-ri\n"), Some("YAML"));
    }

    #[test]
    fn test_extensionless_script_uses_shebang() {
        assert_eq!(language("bin/deploy", "#!/usr/bin/env python2.7\nimport os\n"), Some("Python"));
        assert_eq!(language("bin/foo", "#!/usr/local/bin/foo\n"), None);
    }

    #[test]
    fn test_shebang_does_not_override_foreign_extension() {
        let b = blob("script.rb", "#!/usr/bin/env perl\nprint 1;\n");
        assert_eq!(b.shebang_language().map(|l| l.name), Some("Perl"));
        assert_eq!(b.language().map(|l| l.name), Some("Ruby"));
    }

    #[test]
    fn test_lexer() {
        assert_eq!(blob("grit.rb", "module Grit\nend\n").lexer(), "Ruby");
        assert_eq!(blob("README", "Read me\n").lexer(), "Text only");
        assert_eq!(blob("dude-thing-okay--001.patch", "--- a\n+++ b\n").lexer(), "Diff");
        assert_eq!(blob("dude.el", "(defun dude ())\n").lexer(), "Scheme");
        assert_eq!(blob("dude.js", "alert(1);\n").lexer(), "JavaScript");
        assert_eq!(blob("Capfile", "load 'deploy'\n").lexer(), "Ruby");
    }

    #[test]
    fn test_shebang_script() {
        let cases = [
            ("script.sh", "#!/bin/sh\n", Some("sh")),
            ("script.bash", "#!/bin/bash\n", Some("bash")),
            ("script.zsh", "#!/bin/zsh\n", Some("zsh")),
            ("script.pl", "#!/usr/bin/perl\n", Some("perl")),
            ("script.rb", "#!/usr/bin/ruby\n", Some("ruby")),
            ("script2.rb", "#!/usr/bin/ruby1.9\n", Some("ruby")),
            ("script.py", "#!/usr/bin/env python\n", Some("python")),
            ("script.js", "#!/usr/bin/env node\n", Some("node")),
            ("script.groovy", "#!/usr/bin/env groovy\n", Some("groovy")),
            ("script.mrb", "#!/usr/bin/env macruby\n", Some("macruby")),
            ("script.rake", "#!/usr/bin/env rake\n", Some("rake")),
            ("script.foo", "#!/usr/bin/env foo\n", Some("foo")),
            ("script.nu", "#!/usr/bin/env nush\n", Some("nush")),
            ("foo.rb", "module Foo\nend\n", None),
        ];
        for (path, data, expected) in cases {
            assert_eq!(blob(path, data).shebang_script(), expected, "{path}");
        }
    }

    #[test]
    fn test_shebang_language() {
        let cases = [
            ("script.sh", "#!/bin/sh\n", Some("Shell")),
            ("script.bash", "#!/bin/bash\n", Some("Shell")),
            ("script.zsh", "#!/bin/zsh\n", Some("Shell")),
            ("script.pl", "#!/usr/bin/perl\n", Some("Perl")),
            ("script.rb", "#!/usr/bin/ruby\n", Some("Ruby")),
            ("script.py", "#!/usr/bin/env python\n", Some("Python")),
            ("script.js", "#!/usr/bin/env node\n", Some("JavaScript")),
            ("script.groovy", "#!/usr/bin/env groovy\n", Some("Groovy")),
            ("script.mrb", "#!/usr/bin/env macruby\n", Some("Ruby")),
            ("script.rake", "#!/usr/bin/env rake\n", Some("Ruby")),
            ("script.nu", "#!/usr/bin/env nush\n", Some("Nu")),
            ("script.foo", "#!/usr/bin/env foo\n", None),
            ("foo.rb", "module Foo\nend\n", None),
        ];
        for (path, data, expected) in cases {
            let actual = blob(path, data).shebang_language().map(|l| l.name);
            assert_eq!(actual, expected, "{path}");
        }
    }

    #[test]
    fn test_colorize() {
        let b = blob("foo.rb", "module Foo\nend\n");
        assert_eq!(
            b.colorize(&PlainHighlighter).unwrap().as_deref(),
            Some("<div class=\"highlight\"><pre>module Foo\nend\n</pre>\n</div>\n")
        );
        assert_eq!(
            b.colorize_without_wrapper(&PlainHighlighter).unwrap().as_deref(),
            Some("module Foo\nend\n")
        );
        assert_eq!(blob("linguist.gem", "").colorize(&PlainHighlighter).unwrap(), None);
    }

    #[test]
    fn test_colorize_propagates_highlighter_errors() {
        struct Broken;
        impl Highlighter for Broken {
            fn highlight(&self, _content: &str, lexer: &str) -> Result<String> {
                Err(Error::Highlight {
                    lexer: lexer.to_string(),
                    message: "boom".to_string(),
                })
            }
        }
        let err = blob("foo.rb", "module Foo\nend\n").colorize(&Broken).unwrap_err();
        assert!(matches!(err, Error::Highlight { ref lexer, .. } if lexer == "Ruby"));
    }

    #[test]
    fn test_attributes_are_memoized() {
        let b = blob("grit.rb", "module Grit\nend\n");
        let first = b.mime_type() as *const str;
        let second = b.mime_type() as *const str;
        assert_eq!(first, second);

        let text_a = b.text().unwrap() as *const str;
        let text_b = b.text().unwrap() as *const str;
        assert_eq!(text_a, text_b);
    }

    #[test]
    fn test_lines_are_split_once() {
        let b = blob("grit.rb", "module Grit\r\n  VERSION = 1\r\nend\n");
        let spans_a = b.line_spans().as_ptr();
        assert_eq!(b.loc(), 4);
        assert_eq!(b.sloc(), 3);
        let _ = b.is_generated();
        let _ = b.classify();
        assert_eq!(spans_a, b.line_spans().as_ptr());

        // Lines borrow the decoded text rather than copies of it.
        let text = b.text().unwrap();
        assert_eq!(b.lines()[0].as_ptr(), text.as_ptr());
        assert_eq!(b.lines(), vec!["module Grit", "  VERSION = 1", "end", ""]);
    }

    #[test]
    fn test_shared_across_threads() {
        let b = blob("bar.h", "class Bar {};\n");
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| b.language().map(|l| l.name)))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), Some("C++"));
            }
        });
    }

    #[test]
    fn test_loc_never_below_sloc() {
        let samples = [
            "",
            "\n",
            "a",
            "a\n\n\nb",
            "  \n\t\n",
            "module Foo\nend\n",
            "x\r\ny\r\n\r\n",
        ];
        for sample in samples {
            let b = blob("sample.txt", sample);
            assert!(b.loc() >= b.sloc(), "{sample:?}");
        }
    }

    #[test]
    fn test_never_indexable_when_excluded() {
        let blobs = [
            blob("vendor/rails/foo.rb", "module Foo\nend\n"),
            blob("jquery.js", "var a = 1;\n"),
            blob("MainMenu.xib", "<xml/>\n"),
            blob("git.exe", "MZ"),
            Blob::new("data.bin", b"\x00\x01".to_vec()),
            Blob::new("octocat.png", PNG_HEADER.to_vec()),
        ];
        for b in &blobs {
            if b.is_generated() || b.is_vendored() || b.is_binary() {
                assert!(!b.is_indexable(), "{}", b.path());
            }
        }
    }

    #[test]
    fn test_classify() {
        let summary = blob("foo.rb", "module Foo\nend\n").classify();
        assert_eq!(
            summary,
            Classification {
                path: "foo.rb".to_string(),
                name: "foo.rb".to_string(),
                size: 15,
                mime_type: "application/x-ruby".to_string(),
                content_type: "text/plain; charset=utf-8".to_string(),
                disposition: "inline".to_string(),
                encoding: Some(Encoding::Utf8),
                binary: false,
                text: true,
                image: None,
                viewable: true,
                generated: false,
                vendored: false,
                indexable: true,
                language: Some("Ruby".to_string()),
                lexer: "Ruby".to_string(),
                shebang_script: None,
                loc: 3,
                sloc: 2,
            }
        );
        assert_eq!(summary.language_or_unknown(), "Ruby");

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["encoding"], "utf-8");
        assert!(json.get("image").is_none());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("lib");
        std::fs::create_dir(&nested).unwrap();
        let file_path = nested.join("foo.rb");
        let mut file = std::fs::File::create(&file_path).unwrap();
        file.write_all(b"module Foo\nend\n").unwrap();

        let b = Blob::from_file(dir.path(), &file_path).unwrap();
        assert_eq!(b.path(), "lib/foo.rb");
        assert_eq!(b.name(), "foo.rb");
        assert_eq!(b.language().map(|l| l.name), Some("Ruby"));
    }

    #[test]
    fn test_from_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.rb");
        assert!(matches!(
            Blob::from_file(dir.path(), &missing),
            Err(Error::Io { .. })
        ));

        let existing = dir.path().join("foo.rb");
        std::fs::write(&existing, "module Foo\nend\n").unwrap();
        let other = tempfile::tempdir().unwrap();
        assert!(matches!(
            Blob::from_file(other.path(), &existing),
            Err(Error::OutsideRoot { .. })
        ));
    }

    #[test]
    fn test_from_file_with_non_lexical_root() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("lib");
        std::fs::create_dir(&nested).unwrap();
        let file_path = nested.join("foo.rb");
        std::fs::write(&file_path, "module Foo\nend\n").unwrap();

        // `lib/..` names the same directory but is not a lexical prefix.
        let root = nested.join("..");
        let b = Blob::from_file(&root, &file_path).unwrap();
        assert_eq!(b.path(), "lib/foo.rb");
        assert_eq!(b.language().map(|l| l.name), Some("Ruby"));
    }
}
