//! Detection of vendored (third-party) files by path.
//!
//! Rules are regexes over the repository-relative path, checked in order.
//! Any match marks the file vendored.

use regex::Regex;
use tracing::{trace, warn};

/// Path rules for third-party code.
pub const VENDOR_PATTERNS: &[&str] = &[
    // Dependency manager directories
    r"(^|/)vendor/",
    r"(^|/)node_modules/",
    // Native dependency trees
    r"^deps/",
    r"^tools/",
    // Prototype and script.aculo.us
    r"(^|/)prototype(.*)\.js$",
    r"(^|/)effects\.js$",
    r"(^|/)controls\.js$",
    r"(^|/)dragdrop\.js$",
    // jQuery
    r"(^|/)jquery([^.]*)(\.min)?\.js$",
    r"(^|/)jquery-\d\.\d+(\.\d+)?(\.min)?\.js$",
    // jQuery UI
    r"(^|/)jquery-ui(-\d\.\d+(\.\d+)?)?(\.\w+)?(\.min)?\.(js|css)$",
    r"(^|/)jquery\.(ui|effects)\.([^.]*)(\.min)?\.(js|css)$",
    // MooTools
    r"(^|/)mootools([^.]*)\d+\.\d+\.\d+([^.]*)\.js$",
    // Dojo
    r"(^|/)dojo\.js$",
    // MochiKit
    r"(^|/)MochiKit\.js$",
    // YUI
    r"(^|/)yahoo-([^.]*)\.js$",
    r"(^|/)yui([^.]*)\.js$",
    // LESS
    r"(^|/)less([^.]*)(\.min)?\.js$",
    r"(^|/)less-\d+\.\d+\.\d+(\.min)?\.js$",
    // WYSIWYG editors
    r"(^|/)ckeditor\.js$",
    r"(^|/)tiny_mce([^.]*)\.js$",
    r"(^|/)tiny_mce/(langs|plugins|themes|utils)",
    // MathJax
    r"(^|/)MathJax/",
    // SyntaxHighlighter
    r"(^|/)shBrush([^.]*)\.js$",
    r"(^|/)shCore\.js$",
    r"(^|/)shLegacy\.js$",
    // Fabric
    r"(^|/)fabfile\.py$",
    // WAF
    r"(^|/)waf$",
    // Visual Studio IntelliSense
    r"\.intellisense\.js$",
    r"(^|/)jquery([^.]*)\.validate(\.unobtrusive)?(\.min)?\.js$",
    // Sublime Text project files
    r"\.sublime-project$",
    r"\.sublime-workspace$",
];

lazy_static::lazy_static! {
    static ref DEFAULT_RULES: Vec<Regex> = compile(VENDOR_PATTERNS);
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|p| match Regex::new(p) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!(pattern = *p, error = %e, "invalid vendor pattern");
                None
            }
        })
        .collect()
}

/// Path-based vendored-code detector.
#[derive(Debug, Clone)]
pub struct VendoredDetector {
    extra_rules: Vec<Regex>,
}

impl Default for VendoredDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl VendoredDetector {
    /// Detector with the built-in rules.
    pub fn new() -> Self {
        Self {
            extra_rules: Vec::new(),
        }
    }

    /// Detector with additional rules checked after the built-in ones.
    pub fn with_patterns(patterns: &[&str]) -> Self {
        Self {
            extra_rules: compile(patterns),
        }
    }

    /// Whether a repository-relative path is vendored.
    pub fn is_vendored(&self, path: &str) -> bool {
        let path = path.trim_start_matches("./");
        let hit = DEFAULT_RULES
            .iter()
            .chain(self.extra_rules.iter())
            .find(|re| re.is_match(path));

        match hit {
            Some(re) => {
                trace!(path = path, rule = re.as_str(), "vendored");
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vendored(path: &str) -> bool {
        VendoredDetector::new().is_vendored(path)
    }

    #[test]
    fn test_every_pattern_compiles() {
        assert_eq!(DEFAULT_RULES.len(), VENDOR_PATTERNS.len());
    }

    #[test]
    fn test_dependency_directories() {
        assert!(!vendored("README"));
        assert!(vendored("node_modules/coffee-script/lib/coffee-script.js"));
        assert!(vendored("vendor/plugins/will_paginate/lib/will_paginate.rb"));
        assert!(vendored("deps/http_parser/http_parser.c"));
        assert!(vendored("deps/v8/src/v8.h"));
        assert!(!vendored("src/deps/graph.c"));
        assert!(!vendored("lib/vendors.rb"));
    }

    #[test]
    fn test_prototype() {
        assert!(!vendored("public/javascripts/application.js"));
        assert!(vendored("public/javascripts/prototype.js"));
        assert!(vendored("public/javascripts/effects.js"));
        assert!(vendored("public/javascripts/controls.js"));
        assert!(vendored("public/javascripts/dragdrop.js"));
    }

    #[test]
    fn test_jquery() {
        assert!(vendored("jquery.js"));
        assert!(vendored("public/javascripts/jquery.js"));
        assert!(vendored("public/javascripts/jquery.min.js"));
        assert!(vendored("public/javascripts/jquery-1.5.2.js"));
        assert!(vendored("public/javascripts/jquery-1.6.1.js"));
        assert!(vendored("public/javascripts/jquery-1.6.1.min.js"));
        assert!(vendored("public/javascripts/jquery-ui-1.8.13.custom.min.js"));
        assert!(!vendored("public/javascripts/jquery.github.menu.js"));
    }

    #[test]
    fn test_other_libraries() {
        assert!(vendored("public/javascripts/mootools-core-1.3.2-full-compat.js"));
        assert!(vendored("public/javascripts/mootools-core-1.3.2-full-compat-yc.js"));
        assert!(vendored("public/javascripts/dojo.js"));
        assert!(vendored("public/javascripts/MochiKit.js"));
        assert!(vendored("public/javascripts/yahoo-dom-event.js"));
        assert!(vendored("public/javascripts/yahoo-min.js"));
        assert!(vendored("public/javascripts/yuiloader-dom-event.js"));
        assert!(vendored("public/javascripts/less-1.1.0.js"));
        assert!(vendored("public/javascripts/less-1.1.0.min.js"));
        assert!(vendored("public/javascripts/ckeditor.js"));
        assert!(vendored("public/javascripts/tiny_mce.js"));
        assert!(vendored("public/javascripts/tiny_mce_popup.js"));
        assert!(vendored("public/javascripts/tiny_mce_src.js"));
        assert!(vendored("fabfile.py"));
        assert!(vendored("./fabfile.py"));
    }

    #[test]
    fn test_extra_patterns() {
        let detector = VendoredDetector::with_patterns(&[r"(^|/)third_party/"]);
        assert!(detector.is_vendored("src/third_party/zlib/inflate.c"));
        assert!(detector.is_vendored("node_modules/a/index.js"));
        assert!(!detector.is_vendored("src/zlib.c"));
    }

    #[test]
    fn test_idempotent() {
        let detector = VendoredDetector::new();
        for path in ["jquery.js", "app/models/user.rb", "vendor/x.c"] {
            assert_eq!(detector.is_vendored(path), detector.is_vendored(path));
        }
    }
}
