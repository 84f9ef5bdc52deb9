//! Content heuristics for picking one language out of several candidates.
//!
//! [`HEURISTICS`] is walked top to bottom. A rule only applies when its
//! language is among the candidates, so the same registry serves `.h`, `.m`,
//! `.pl` and the rest without per-extension dispatch.

use regex::Regex;
use tracing::{debug, trace, warn};

use crate::processing::language::Language;

/// How a rule's patterns combine.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Any pattern matching selects the language.
    Any(&'static [&'static str]),
    /// Every pattern must match.
    All(&'static [&'static str]),
}

/// A language plus the content rule that selects it.
#[derive(Debug, Clone, Copy)]
pub struct Heuristic {
    pub language: &'static str,
    pub rule: Rule,
}

/// Heuristics in precedence order.
pub static HEURISTICS: &[Heuristic] = &[
    Heuristic {
        language: "Objective-C",
        rule: Rule::Any(&[
            r"(?m)^\s*@(interface|implementation|protocol|property|synthesize|end|class)\b",
        ]),
    },
    Heuristic {
        language: "Objective-C",
        rule: Rule::All(&[r"(?m)^\s*#import\s", r"\b(NS|UI|CF|CG)[A-Z]\w+"]),
    },
    Heuristic {
        language: "C++",
        rule: Rule::Any(&[
            r"(?m)^\s*(template\s*<|namespace\b|class\s+\w+)",
            r"(?m)^\s*(public|protected|private)\s*:",
            r"\w::\w",
            r"(?m)^\s*#include\s*<(iostream|string|vector|map|memory|algorithm|cstdio|cstdlib)>",
        ]),
    },
    Heuristic {
        language: "Objective-C",
        rule: Rule::Any(&[r"(?m)^\s*#import\b"]),
    },
    Heuristic {
        language: "Matlab",
        rule: Rule::Any(&[
            r"(?m)^\s*function\s+(\[[^\]]*\]|\w+)\s*=",
            r"(?m)^\s*%[^{]",
            r"(?m)^\s*end\s*$",
        ]),
    },
    Heuristic {
        language: "Prolog",
        rule: Rule::Any(&[r"(?m)^\s*:-", r"\)\s*:-"]),
    },
    Heuristic {
        language: "Rebol",
        rule: Rule::Any(&[
            r"(?i)\brebol\s*\[",
            r"(?im)(:\s+func|make\s+object!|^\s*context)\s*\[",
        ]),
    },
    Heuristic {
        language: "Coq",
        rule: Rule::Any(&[
            r"(?m)^\s*(Theorem|Lemma|Proof|Qed|Require\s+Import|Inductive|Fixpoint)\b",
        ]),
    },
    Heuristic {
        language: "XML",
        rule: Rule::Any(&[r"^\s*<\?xml", r"(?m)^\s*<TS\s+version="]),
    },
];

enum CompiledRule {
    Any(Vec<Regex>),
    All(Vec<Regex>),
}

impl CompiledRule {
    fn compile(rule: Rule) -> Self {
        let compile_all = |patterns: &[&str]| -> Vec<Regex> {
            patterns
                .iter()
                .filter_map(|p| match Regex::new(p) {
                    Ok(re) => Some(re),
                    Err(e) => {
                        warn!(pattern = *p, error = %e, "invalid heuristic pattern");
                        None
                    }
                })
                .collect()
        };
        match rule {
            Rule::Any(patterns) => CompiledRule::Any(compile_all(patterns)),
            Rule::All(patterns) => CompiledRule::All(compile_all(patterns)),
        }
    }

    fn matches(&self, text: &str) -> bool {
        match self {
            CompiledRule::Any(regexes) => regexes.iter().any(|re| re.is_match(text)),
            CompiledRule::All(regexes) => {
                !regexes.is_empty() && regexes.iter().all(|re| re.is_match(text))
            }
        }
    }
}

lazy_static::lazy_static! {
    static ref COMPILED: Vec<(&'static Language, CompiledRule)> = HEURISTICS
        .iter()
        .filter_map(|h| match Language::find_by_name(h.language) {
            Some(lang) => Some((lang, CompiledRule::compile(h.rule))),
            None => {
                warn!(language = h.language, "heuristic for unknown language");
                None
            }
        })
        .collect();
}

/// Resolves a candidate set to at most one language.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicDisambiguator;

impl HeuristicDisambiguator {
    pub fn new() -> Self {
        Self
    }

    /// Pick a language from extension candidates, the shebang language and
    /// the file text.
    ///
    /// 1. With no extension candidates the shebang language (if any) is used.
    /// 2. A shebang language that is itself a candidate wins outright.
    /// 3. Otherwise the first heuristic matching a candidate wins.
    /// 4. Otherwise the first candidate in declaration order.
    pub fn resolve(
        &self,
        candidates: &[&'static Language],
        shebang: Option<&'static Language>,
        text: &str,
    ) -> Option<&'static Language> {
        let Some(first) = candidates.first().copied() else {
            trace!(shebang = ?shebang.map(|l| l.name), "no extension candidates");
            return shebang;
        };

        if let Some(lang) = shebang {
            if candidates.contains(&lang) {
                trace!(language = lang.name, "shebang agrees with extension");
                return Some(lang);
            }
        }

        if candidates.len() == 1 {
            return Some(first);
        }

        if let Some(lang) = self.apply_heuristics(candidates, text) {
            return Some(lang);
        }

        debug!(language = first.name, "no heuristic matched, using first candidate");
        Some(first)
    }

    /// Walk the heuristic registry, returning the first candidate whose
    /// rule matches.
    pub fn apply_heuristics(
        &self,
        candidates: &[&'static Language],
        text: &str,
    ) -> Option<&'static Language> {
        COMPILED
            .iter()
            .filter(|(lang, _)| candidates.contains(lang))
            .find(|(_, rule)| rule.matches(text))
            .map(|(lang, _)| {
                debug!(language = lang.name, "heuristic matched");
                *lang
            })
    }
}
