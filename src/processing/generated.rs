//! Detection of machine-generated files.
//!
//! Generated files are still classified for display but never indexed.

use regex::Regex;
use tracing::debug;

use crate::processing::extension::extension_of;
use crate::DEFAULT_MINIFIED_LINE_LENGTH;

/// IDE / project files that are always generated.
const GENERATED_EXTENSIONS: &[&str] = &["xib", "nib", "pbxproj"];

/// Content smaller than this (ignoring whitespace) is too small to judge.
const MIN_JUDGEABLE_BYTES: usize = 16;

/// Whitespace ratio below which a long line looks minified.
const MINIFIED_WHITESPACE_RATIO: f64 = 0.1;

/// First-line banner written by the CoffeeScript compiler.
const COFFEE_BANNER: &str = "// Generated by CoffeeScript";

/// Score a CoffeeScript closure needs before it counts as compiler output.
const COFFEE_SCORE_THRESHOLD: usize = 3;

lazy_static::lazy_static! {
    static ref COFFEE_TEMP_VARS: Regex = Regex::new(r"_fn|_i|_len|_ref|_results").unwrap();
    static ref COFFEE_HELPERS: Regex =
        Regex::new(r"__bind|__extends|__hasProp|__indexOf|__slice").unwrap();
}

/// Path and content rules for generated files.
#[derive(Debug, Clone)]
pub struct GeneratedDetector {
    minified_line_length: usize,
}

impl Default for GeneratedDetector {
    fn default() -> Self {
        Self::new(DEFAULT_MINIFIED_LINE_LENGTH)
    }
}

impl GeneratedDetector {
    pub fn new(minified_line_length: usize) -> Self {
        Self {
            minified_line_length,
        }
    }

    /// Whether the blob at `name` with `lines` is generated.
    ///
    /// `lines` is empty for binary blobs; only the path rules apply then.
    pub fn is_generated(&self, name: &str, lines: &[&str]) -> bool {
        let ext = extension_of(name);

        if ext.is_some_and(|ext| GENERATED_EXTENSIONS.contains(&ext)) {
            debug!(file = name, "generated: project file");
            return true;
        }

        if ext != Some("js") || !is_judgeable(lines) {
            return false;
        }

        if self.is_minified(name, lines) {
            debug!(file = name, "generated: minified javascript");
            return true;
        }

        if is_generated_coffeescript(lines) {
            debug!(file = name, "generated: coffeescript output");
            return true;
        }

        false
    }

    /// Minified JavaScript: long lines with little whitespace.
    pub fn is_minified(&self, name: &str, lines: &[&str]) -> bool {
        let threshold = self.minified_line_length;

        if average_line_length(lines) > threshold {
            return true;
        }

        let Some(first) = lines.iter().find(|line| !line.trim().is_empty()) else {
            return false;
        };
        if first.len() <= threshold {
            return false;
        }

        name.ends_with(".min.js") || whitespace_ratio(first) < MINIFIED_WHITESPACE_RATIO
    }
}

fn is_judgeable(lines: &[&str]) -> bool {
    let significant: usize = lines
        .iter()
        .map(|line| line.chars().filter(|c| !c.is_whitespace()).count())
        .sum();
    significant >= MIN_JUDGEABLE_BYTES
}

fn average_line_length(lines: &[&str]) -> usize {
    if lines.is_empty() {
        return 0;
    }
    lines.iter().map(|line| line.len()).sum::<usize>() / lines.len()
}

fn whitespace_ratio(line: &str) -> f64 {
    if line.is_empty() {
        return 1.0;
    }
    let ws = line.chars().filter(|c| c.is_whitespace()).count();
    ws as f64 / line.chars().count() as f64
}

/// CoffeeScript compiler output.
///
/// Newer compilers emit a `// Generated by CoffeeScript` banner. Older ones
/// wrap everything in `(function() { ... }).call(this);` and leave
/// characteristic temporaries and helper functions behind. An empty closure
/// is never flagged, banner or not.
fn is_generated_coffeescript(lines: &[&str]) -> bool {
    let Some(first) = lines.first() else {
        return false;
    };

    if first.starts_with(COFFEE_BANNER) {
        let rest = &lines[1..];
        let body = closure_body(rest).unwrap_or(rest);
        return body.iter().any(|line| !line.trim().is_empty());
    }

    let Some(body) = closure_body(lines) else {
        return false;
    };

    let score: usize = body
        .iter()
        .filter(|line| line.contains("var "))
        .map(|line| {
            COFFEE_TEMP_VARS.find_iter(line).count() + 3 * COFFEE_HELPERS.find_iter(line).count()
        })
        .sum();

    score >= COFFEE_SCORE_THRESHOLD
}

/// Lines inside a module closure that opens on the first line and closes on
/// the second to last, leaving a trailing blank line.
fn closure_body<'a, 'b>(lines: &'a [&'b str]) -> Option<&'a [&'b str]> {
    let n = lines.len();
    let wrapped = n >= 3
        && lines[0] == "(function() {"
        && lines[n - 2] == "}).call(this);"
        && lines[n - 1].is_empty();
    wrapped.then(|| &lines[1..n - 2])
}
