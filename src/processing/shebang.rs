//! Shebang interpreter detection.
//!
//! Handles `#!/usr/bin/ruby`, `#! /bin/sh`, `#!/usr/bin/env python2.7 -u`
//! and the `#!/bin/sh` + `exec tclsh "$0" "$@"` relaunch idiom.

use regex::Regex;
use tracing::trace;

use crate::processing::language::Language;

/// Lines scanned for the `exec` relaunch idiom.
const EXEC_SCAN_LINES: usize = 5;

lazy_static::lazy_static! {
    static ref EXEC_RELAUNCH: Regex = Regex::new(r"exec (\w+).+\$0.+\$@").unwrap();
}

/// Result of parsing a shebang line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shebang {
    /// Interpreter name with any version suffix removed, e.g. "ruby".
    pub script: String,
    /// Interpreter token as written, e.g. "ruby1.9".
    pub raw: String,
    /// Stripped version suffix, e.g. "1.9".
    pub version: Option<String>,
    /// Language the interpreter maps to.
    pub language: Option<&'static Language>,
}

/// Parser for `#!` lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShebangParser;

impl ShebangParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse the shebang at the top of `text`, if any.
    pub fn parse(&self, text: &str) -> Option<Shebang> {
        let first_line = text.lines().next()?;
        let raw = interpreter_token(first_line)?;
        let (stripped, version) = strip_version(raw);

        let mut script = stripped.to_string();
        if script == "sh" {
            if let Some(relaunched) = exec_relaunch(text) {
                trace!(interpreter = relaunched, "sh relaunches via exec");
                script = relaunched.to_string();
            }
        }

        let language = Language::find_by_interpreter(&script);
        Some(Shebang {
            script,
            raw: raw.to_string(),
            version: version.map(str::to_string),
            language,
        })
    }
}

/// Extract the interpreter token from a `#!` line.
fn interpreter_token(line: &str) -> Option<&str> {
    let rest = line.trim_end_matches('\r').strip_prefix("#!")?;
    let mut tokens = rest.split_whitespace();
    let program = tokens.next()?;
    let basename = program.rsplit('/').next().unwrap_or(program);

    if basename == "env" {
        // Skip env's own flags and VAR=value assignments.
        return tokens.find(|token| !token.starts_with('-') && !token.contains('='));
    }

    if basename.is_empty() {
        None
    } else {
        Some(basename)
    }
}

/// Split `python2.7` into `("python", Some("2.7"))`.
fn strip_version(token: &str) -> (&str, Option<&str>) {
    let stripped = token.trim_end_matches(|c: char| c.is_ascii_digit() || c == '.');
    if stripped.is_empty() || stripped.len() == token.len() {
        (token, None)
    } else {
        (stripped, Some(&token[stripped.len()..]))
    }
}

fn exec_relaunch(text: &str) -> Option<&str> {
    text.lines()
        .take(EXEC_SCAN_LINES)
        .find_map(|line| EXEC_RELAUNCH.captures(line))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(text: &str) -> Option<String> {
        ShebangParser::new().parse(text).map(|s| s.script)
    }

    fn language(text: &str) -> Option<&'static str> {
        ShebangParser::new()
            .parse(text)
            .and_then(|s| s.language)
            .map(|lang| lang.name)
    }

    #[test]
    fn test_plain_interpreters() {
        assert_eq!(script("#!/bin/sh\necho hi\n").as_deref(), Some("sh"));
        assert_eq!(script("#!/bin/bash\n").as_deref(), Some("bash"));
        assert_eq!(script("#!/usr/bin/zsh\n").as_deref(), Some("zsh"));
        assert_eq!(script("#!/usr/bin/perl -w\n").as_deref(), Some("perl"));
        assert_eq!(script("#! /usr/bin/ruby\n").as_deref(), Some("ruby"));
    }

    #[test]
    fn test_env_indirection() {
        assert_eq!(script("#!/usr/bin/env python\n").as_deref(), Some("python"));
        assert_eq!(script("#!/usr/bin/env node\n").as_deref(), Some("node"));
        assert_eq!(
            script("#!/usr/bin/env -S LANG=C groovy\n").as_deref(),
            Some("groovy")
        );
        assert_eq!(script("#!/usr/bin/env\n"), None);
    }

    #[test]
    fn test_version_is_stripped_but_preserved() {
        let shebang = ShebangParser::new().parse("#!/usr/bin/ruby1.9\n").unwrap();
        assert_eq!(shebang.script, "ruby");
        assert_eq!(shebang.raw, "ruby1.9");
        assert_eq!(shebang.version.as_deref(), Some("1.9"));
        assert_eq!(shebang.language.map(|l| l.name), Some("Ruby"));

        assert_eq!(script("#!/usr/bin/env python2.7\n").as_deref(), Some("python"));
        assert_eq!(script("#!/usr/bin/python3\n").as_deref(), Some("python"));
    }

    #[test]
    fn test_exec_relaunch() {
        let text = "#!/bin/sh\n# comment \\\nexec tclsh \"$0\" \"$@\"\nputs hi\n";
        assert_eq!(script(text).as_deref(), Some("tclsh"));
        assert_eq!(language(text), Some("Tcl"));
    }

    #[test]
    fn test_languages() {
        assert_eq!(language("#!/bin/sh\n"), Some("Shell"));
        assert_eq!(language("#!/usr/bin/env perl\n"), Some("Perl"));
        assert_eq!(language("#!/usr/bin/macruby\n"), Some("Ruby"));
        assert_eq!(language("#!/usr/bin/env rake\n"), Some("Ruby"));
        assert_eq!(language("#!/usr/bin/env nush\n"), Some("Nu"));
        assert_eq!(language("#!/usr/bin/env groovy\n"), Some("Groovy"));
    }

    #[test]
    fn test_unknown_interpreter_is_verbatim() {
        let shebang = ShebangParser::new().parse("#!/usr/local/bin/foo\n").unwrap();
        assert_eq!(shebang.script, "foo");
        assert!(shebang.language.is_none());
    }

    #[test]
    fn test_no_shebang() {
        assert!(ShebangParser::new().parse("module Foo\nend\n").is_none());
        assert!(ShebangParser::new().parse("").is_none());
        assert!(ShebangParser::new().parse("#!\n").is_none());
        assert!(ShebangParser::new().parse("# !/bin/sh\n").is_none());
    }
}
