//! Language registry.
//!
//! Every known language is a plain data record in [`LANGUAGES`]. Declaration
//! order is significant: when several languages share an extension and no
//! heuristic decides between them, the one declared first wins.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Broad category of a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageKind {
    Programming,
    Markup,
    Data,
    Prose,
}

/// A language record.
#[derive(Debug)]
pub struct Language {
    /// Canonical display name, e.g. "C++".
    pub name: &'static str,
    pub kind: LanguageKind,
    /// Lexer name handed to the highlighter.
    pub lexer: &'static str,
    /// Extensions without the leading dot.
    pub extensions: &'static [&'static str],
    /// Exact basenames, e.g. `Rakefile` or `.bashrc`.
    pub filenames: &'static [&'static str],
    /// Shebang interpreter names, version-stripped.
    pub interpreters: &'static [&'static str],
    /// Whether files in this language belong in the search index.
    pub searchable: bool,
    /// Match `extensions` regardless of case.
    pub ignore_case: bool,
}

impl PartialEq for Language {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Language {}

impl Hash for Language {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

const BASE: Language = Language {
    name: "",
    kind: LanguageKind::Programming,
    lexer: "Text only",
    extensions: &[],
    filenames: &[],
    interpreters: &[],
    searchable: true,
    ignore_case: false,
};

/// All known languages, in declaration order.
pub static LANGUAGES: &[Language] = &[
    Language {
        name: "Text",
        kind: LanguageKind::Prose,
        lexer: "Text only",
        extensions: &["txt"],
        ignore_case: true,
        ..BASE
    },
    Language {
        name: "C",
        lexer: "C",
        extensions: &["c", "h", "w"],
        ..BASE
    },
    Language {
        name: "C++",
        lexer: "C++",
        extensions: &["cpp", "cc", "cxx", "c++", "hpp", "hh", "hxx", "h++", "h", "tcc", "inl"],
        ..BASE
    },
    Language {
        name: "Objective-C",
        lexer: "Objective-C",
        extensions: &["m", "h"],
        ..BASE
    },
    Language {
        name: "Matlab",
        lexer: "Matlab",
        extensions: &["m"],
        ..BASE
    },
    Language {
        name: "C#",
        lexer: "C#",
        extensions: &["cs", "csx"],
        ..BASE
    },
    Language {
        name: "Ruby",
        lexer: "Ruby",
        extensions: &[
            "rb", "rake", "gemspec", "rbx", "ru", "builder", "podspec", "thor", "rabl", "jbuilder",
        ],
        filenames: &[
            "Capfile",
            "Rakefile",
            "Gemfile",
            "Guardfile",
            "Podfile",
            "Vagrantfile",
            "Thorfile",
            "Berksfile",
            ".irbrc",
            ".pryrc",
        ],
        interpreters: &["ruby", "macruby", "rake", "jruby", "rbx"],
        ..BASE
    },
    Language {
        name: "Perl",
        lexer: "Perl",
        extensions: &["pl", "pm", "t", "pod", "perl", "psgi"],
        interpreters: &["perl"],
        ..BASE
    },
    Language {
        name: "Prolog",
        lexer: "Prolog",
        extensions: &["pl", "pro", "prolog"],
        interpreters: &["swipl"],
        ..BASE
    },
    Language {
        name: "Python",
        lexer: "Python",
        extensions: &["py", "pyw", "pyi", "wsgi", "gyp"],
        filenames: &["SConstruct", "SConscript", "wscript"],
        interpreters: &["python"],
        ..BASE
    },
    Language {
        name: "JavaScript",
        lexer: "JavaScript",
        extensions: &["js", "mjs", "cjs", "jake", "jsm"],
        filenames: &["Jakefile"],
        interpreters: &["node", "nodejs"],
        ..BASE
    },
    Language {
        name: "TypeScript",
        lexer: "TypeScript",
        extensions: &["ts", "mts", "cts"],
        ..BASE
    },
    Language {
        name: "CoffeeScript",
        lexer: "CoffeeScript",
        extensions: &["coffee", "cake"],
        filenames: &["Cakefile"],
        interpreters: &["coffee"],
        ..BASE
    },
    Language {
        name: "Shell",
        lexer: "Bash",
        extensions: &["sh", "bash", "zsh", "ksh", "csh", "tcsh", "command", "bats"],
        filenames: &[
            ".bashrc",
            ".bash_profile",
            ".bash_logout",
            ".profile",
            ".zshrc",
            ".zshenv",
            ".zlogin",
            ".zlogout",
            ".zprofile",
            ".cshrc",
            ".login",
            ".kshrc",
        ],
        interpreters: &["sh", "bash", "zsh", "ksh", "csh", "tcsh", "dash", "ash"],
        ..BASE
    },
    Language {
        name: "VimL",
        lexer: "VimL",
        extensions: &["vim"],
        filenames: &[".vimrc", ".gvimrc", "vimrc", "gvimrc", "_vimrc", "_gvimrc"],
        ..BASE
    },
    Language {
        name: "INI",
        kind: LanguageKind::Data,
        lexer: "INI",
        extensions: &["ini", "cfg", "prefs", "properties"],
        filenames: &[".gitconfig", ".editorconfig", ".npmrc"],
        ..BASE
    },
    Language {
        name: "YAML",
        kind: LanguageKind::Data,
        lexer: "YAML",
        extensions: &["yml", "yaml"],
        filenames: &[".gemrc"],
        ..BASE
    },
    Language {
        name: "JSON",
        kind: LanguageKind::Data,
        lexer: "JSON",
        extensions: &["json", "geojson"],
        filenames: &[".jshintrc", ".babelrc"],
        ..BASE
    },
    Language {
        name: "XML",
        kind: LanguageKind::Markup,
        lexer: "XML",
        extensions: &[
            "xml", "xsd", "xsl", "xslt", "rss", "atom", "plist", "xib", "ts", "kml", "wsdl",
        ],
        ..BASE
    },
    Language {
        name: "HTML",
        kind: LanguageKind::Markup,
        lexer: "HTML",
        extensions: &["html", "htm", "xhtml"],
        ignore_case: true,
        ..BASE
    },
    Language {
        name: "CSS",
        kind: LanguageKind::Markup,
        lexer: "CSS",
        extensions: &["css"],
        ..BASE
    },
    Language {
        name: "Markdown",
        kind: LanguageKind::Prose,
        lexer: "Markdown",
        extensions: &["md", "markdown", "mkd", "mkdn", "mdown"],
        ..BASE
    },
    Language {
        name: "Diff",
        kind: LanguageKind::Data,
        lexer: "Diff",
        extensions: &["diff", "patch"],
        ..BASE
    },
    Language {
        name: "Emacs Lisp",
        lexer: "Scheme",
        extensions: &["el", "emacs"],
        filenames: &[".emacs"],
        ..BASE
    },
    Language {
        name: "Common Lisp",
        lexer: "Common Lisp",
        extensions: &["lisp", "lsp", "cl", "asd"],
        interpreters: &["sbcl", "clisp"],
        ..BASE
    },
    Language {
        name: "Scheme",
        lexer: "Scheme",
        extensions: &["scm", "ss", "sls", "sps"],
        interpreters: &["guile", "racket"],
        ..BASE
    },
    Language {
        name: "Nu",
        lexer: "Scheme",
        extensions: &["nu"],
        filenames: &["Nukefile"],
        interpreters: &["nush"],
        ..BASE
    },
    Language {
        name: "Groovy",
        lexer: "Groovy",
        extensions: &["groovy", "gradle", "gvy", "grt"],
        interpreters: &["groovy"],
        ..BASE
    },
    Language {
        name: "Java",
        lexer: "Java",
        extensions: &["java"],
        ..BASE
    },
    Language {
        name: "Scala",
        lexer: "Scala",
        extensions: &["scala", "sbt"],
        interpreters: &["scala"],
        ..BASE
    },
    Language {
        name: "Go",
        lexer: "Go",
        extensions: &["go"],
        ..BASE
    },
    Language {
        name: "Rust",
        lexer: "Rust",
        extensions: &["rs"],
        ..BASE
    },
    Language {
        name: "Haskell",
        lexer: "Haskell",
        extensions: &["hs", "lhs", "hsc"],
        interpreters: &["runhaskell", "runghc"],
        ..BASE
    },
    Language {
        name: "Erlang",
        lexer: "Erlang",
        extensions: &["erl", "hrl", "escript"],
        interpreters: &["escript"],
        ..BASE
    },
    Language {
        name: "OCaml",
        lexer: "OCaml",
        extensions: &["ml", "mli", "mll", "mly"],
        interpreters: &["ocaml", "ocamlrun"],
        ..BASE
    },
    Language {
        name: "Lua",
        lexer: "Lua",
        extensions: &["lua"],
        interpreters: &["lua"],
        ..BASE
    },
    Language {
        name: "PHP",
        lexer: "PHP",
        extensions: &["php", "phtml", "php3", "php4", "php5", "phpt"],
        interpreters: &["php"],
        ..BASE
    },
    Language {
        name: "Tcl",
        lexer: "Tcl",
        extensions: &["tcl", "tm"],
        interpreters: &["tclsh", "wish"],
        ..BASE
    },
    Language {
        name: "Awk",
        lexer: "Awk",
        extensions: &["awk"],
        interpreters: &["awk", "gawk", "mawk", "nawk"],
        ..BASE
    },
    Language {
        name: "R",
        lexer: "S",
        extensions: &["r"],
        filenames: &[".Rprofile"],
        interpreters: &["Rscript"],
        ignore_case: true,
        ..BASE
    },
    Language {
        name: "Rebol",
        lexer: "REBOL",
        extensions: &["r", "reb", "rebol"],
        interpreters: &["rebol"],
        ignore_case: true,
        ..BASE
    },
    Language {
        name: "Verilog",
        lexer: "verilog",
        extensions: &["v"],
        ..BASE
    },
    Language {
        name: "Coq",
        lexer: "Coq",
        extensions: &["v"],
        ..BASE
    },
    Language {
        name: "GAS",
        lexer: "GAS",
        extensions: &["s"],
        ignore_case: true,
        ..BASE
    },
    Language {
        name: "Makefile",
        lexer: "Makefile",
        extensions: &["mak", "mk"],
        filenames: &["Makefile", "GNUmakefile", "makefile"],
        interpreters: &["make"],
        ..BASE
    },
    Language {
        name: "CMake",
        lexer: "CMake",
        extensions: &["cmake"],
        filenames: &["CMakeLists.txt"],
        ..BASE
    },
    Language {
        name: "Dockerfile",
        lexer: "Docker",
        extensions: &["dockerfile"],
        filenames: &["Dockerfile"],
        ..BASE
    },
    Language {
        name: "SQL",
        kind: LanguageKind::Data,
        lexer: "SQL",
        extensions: &["sql"],
        searchable: false,
        ..BASE
    },
    Language {
        name: "Gettext Catalog",
        kind: LanguageKind::Prose,
        lexer: "Text only",
        extensions: &["po", "pot"],
        searchable: false,
        ..BASE
    },
];

lazy_static::lazy_static! {
    static ref BY_NAME: HashMap<String, &'static Language> = LANGUAGES
        .iter()
        .map(|lang| (lang.name.to_lowercase(), lang))
        .collect();

    static ref BY_INTERPRETER: HashMap<&'static str, &'static Language> = {
        let mut map = HashMap::new();
        for lang in LANGUAGES {
            for interpreter in lang.interpreters {
                // First declaration wins.
                map.entry(*interpreter).or_insert(lang);
            }
        }
        map
    };
}

impl Language {
    /// Look up a language by name, case-insensitively.
    pub fn find_by_name(name: &str) -> Option<&'static Language> {
        BY_NAME.get(&name.to_lowercase()).copied()
    }

    /// Look up a language by a version-stripped interpreter name.
    pub fn find_by_interpreter(interpreter: &str) -> Option<&'static Language> {
        BY_INTERPRETER.get(interpreter).copied()
    }

    /// All languages in declaration order.
    pub fn all() -> &'static [Language] {
        LANGUAGES
    }

    /// Position in declaration order.
    pub fn index(&self) -> usize {
        LANGUAGES
            .iter()
            .position(|lang| lang.name == self.name)
            .unwrap_or(usize::MAX)
    }

    /// Whether this is a programming language (as opposed to markup, data or prose).
    pub fn is_programming(&self) -> bool {
        self.kind == LanguageKind::Programming
    }
}
