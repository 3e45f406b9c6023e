//! Weighted regular-expression language rules
//!
//! Each language owns a list of `(pattern, weight)` rules. A language's score
//! is the sum of the weights of its rules that match the content; only
//! languages with at least one matching positive rule are candidates. The
//! caller's bias is added on top and the highest positive score wins.

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{LangDetectError, Result};

struct RuleSpec {
    language: &'static str,
    rules: &'static [(&'static str, f64)],
}

/// Built-in rule table; declaration order breaks score ties
const RULE_TABLE: &[RuleSpec] = &[
    RuleSpec {
        language: "typescript",
        rules: &[
            (r":\s*(string|number|boolean|any|void|unknown)\b", 4.0),
            (r"\binterface\s+\w+\s*(<[^>]*>)?\s*\{", 3.0),
            (r"\btype\s+\w+\s*=", 3.0),
            (r"\b(let|const)\s+\w+\s*:\s*\w+", 3.0),
            (r"\bexport\s+(default\s+)?(class|function|const|interface)\b", 1.0),
            (r#"\bimport\s+.*\bfrom\s+['"]"#, 1.0),
        ],
    },
    RuleSpec {
        language: "javascript",
        rules: &[
            (r"\b(const|let|var)\s+\w+\s*=", 2.0),
            (r"\bfunction\s*\w*\s*\(", 2.0),
            (r"=>", 1.0),
            (r"console\.(log|error|warn)\(", 3.0),
            (r#"\brequire\(['"]"#, 3.0),
            (r"module\.exports", 3.0),
            (r"\bdocument\.\w+", 2.0),
        ],
    },
    RuleSpec {
        language: "python",
        rules: &[
            (r"(?m)^\s*def\s+\w+\s*\(.*\)\s*(->\s*[\w\[\], .]+)?\s*:", 5.0),
            (r"(?m)^\s*(if|elif|while|for|with|try|else)\b.*:\s*$", 3.0),
            (r"(?m)^\s*(from\s+[\w.]+\s+)?import\s+[\w.]+", 1.0),
            (r"\bprint\(", 2.0),
            (r"\bself\.", 2.0),
            (r"\bNone\b", 2.0),
            (r"__\w+__", 2.0),
            (r"(?m);\s*$", -2.0),
            (r"(?m)\{\s*$", -2.0),
        ],
    },
    RuleSpec {
        language: "rust",
        rules: &[
            (r"\bfn\s+\w+\s*(<[^>]*>)?\s*\(", 4.0),
            (r"\blet\s+mut\b", 4.0),
            (r"\bimpl\b", 3.0),
            (r"&(mut\s+)?self\b", 3.0),
            (r"\buse\s+\w+::", 3.0),
            (r"#\[\w+", 3.0),
            (r"\b(pub\s+)?(struct|enum|trait)\s+\w+", 2.0),
            (r"\w+!\(", 2.0),
        ],
    },
    RuleSpec {
        language: "go",
        rules: &[
            (r"(?m)^\s*package\s+\w+\s*$", 4.0),
            (r"\bfunc\s+(\(\w+\s+\*?\w+\)\s*)?\w+\s*\(", 5.0),
            (r"\bfmt\.\w+", 4.0),
            (r":=", 2.0),
            (r"\bchan\b", 2.0),
            (r"\bdefer\b", 2.0),
        ],
    },
    RuleSpec {
        language: "java",
        rules: &[
            (r"\bSystem\.out\.print", 5.0),
            (r"public\s+static\s+void\s+main", 5.0),
            (r"\bimport\s+java\.", 5.0),
            (r"\bpublic\s+(static\s+)?(final\s+)?class\s+\w+", 4.0),
            (r"@Override", 3.0),
            (r"\b(private|protected|public)\s+\w+(<[^>]*>)?\s+\w+\s*[;=(]", 2.0),
        ],
    },
    RuleSpec {
        language: "c",
        rules: &[
            (r"#include\s*<\w+\.h>", 4.0),
            (r"\bprintf\s*\(", 3.0),
            (r"\b(malloc|calloc|free)\s*\(", 3.0),
            (r"\bint\s+main\s*\(", 2.0),
            (r"\btypedef\b", 2.0),
            (r"\bstruct\s+\w+\s*\{", 1.0),
            (r"std::", -4.0),
            (r"\bclass\b", -2.0),
        ],
    },
    RuleSpec {
        language: "cpp",
        rules: &[
            (r"#include\s*<\w+>", 4.0),
            (r"std::\w+", 4.0),
            (r"\btemplate\s*<", 4.0),
            (r"\bnamespace\s+\w+", 3.0),
            (r"\b(public|private|protected):", 3.0),
            (r"\bnullptr\b", 3.0),
        ],
    },
    RuleSpec {
        language: "csharp",
        rules: &[
            (r"\busing\s+System(\.\w+)*;", 5.0),
            (r"Console\.Write(Line)?\(", 5.0),
            (r"\{\s*get;\s*(set;)?\s*\}", 4.0),
            (r"\bnamespace\s+[\w.]+", 2.0),
            (
                r"\b(public|private|internal)\s+(static\s+)?(async\s+)?(void|Task|string|int)\s+\w+\s*\(",
                2.0,
            ),
            (r"\bvar\s+\w+\s*=\s*new\b", 2.0),
        ],
    },
    RuleSpec {
        language: "php",
        rules: &[
            (r"<\?php", 10.0),
            (r"\bfunction\s+\w+\s*\(\s*\$", 3.0),
            (r"\$\w+\s*=", 2.0),
            (r"->\w+\(", 1.0),
            (r"\becho\b", 1.0),
        ],
    },
    RuleSpec {
        language: "ruby",
        rules: &[
            (r"\battr_(accessor|reader|writer)\b", 4.0),
            (r"(?m)^\s*def\s+\w+[?!]?\s*(\(.*\))?\s*$", 3.0),
            (r"(?m)^\s*end\s*$", 3.0),
            (r"\bputs\b", 3.0),
            (r"\bdo\s*\|\w+", 3.0),
            (r#"\brequire\s+['"]"#, 2.0),
        ],
    },
    RuleSpec {
        language: "shellscript",
        rules: &[
            (r"(?m)^#!\s*/(usr/)?bin/(env\s+)?(ba|z)?sh\b", 10.0),
            (r"\besac\b", 3.0),
            (r"\bfi\b", 2.0),
            (r"(?m)^\s*echo\s", 2.0),
            (r"\bthen\b", 1.0),
            (r"\bdone\b", 1.0),
            (r"\$\{?\w+\}?", 1.0),
        ],
    },
    RuleSpec {
        language: "powershell",
        rules: &[
            (r"\b(Get|Set|New|Remove|Write)-[A-Z]\w+", 5.0),
            (r"\bparam\s*\(", 3.0),
            (r"-(eq|ne|lt|gt|like)\b", 3.0),
            (r"\$_\b", 2.0),
        ],
    },
    RuleSpec {
        language: "sql",
        rules: &[
            (r"(?i)\binsert\s+into\b", 5.0),
            (r"(?i)\bcreate\s+table\b", 5.0),
            (r"(?i)\bselect\b[\s\S]+\bfrom\b", 4.0),
            (r"(?i)\bupdate\s+\w+\s+set\b", 4.0),
            (r"(?i)\bwhere\b", 1.0),
        ],
    },
    RuleSpec {
        language: "html",
        rules: &[
            (r"(?i)<!DOCTYPE\s+html", 10.0),
            (r"(?i)<(html|head|body|div|span|p|a|ul|li)\b[^>]*>", 3.0),
            (r"(?i)</(html|head|body|div|span|p|a|ul|li)>", 3.0),
        ],
    },
    RuleSpec {
        language: "css",
        rules: &[
            (r"@media\b", 3.0),
            (r"(?m)^\s*[.#]?[\w-]+(\s*[,>+~]\s*[.#]?[\w-]+)*\s*\{", 2.0),
            (r"(?m)^\s*[\w-]+\s*:\s*[^;{]+;\s*$", 2.0),
            (r"\b\d+(px|em|rem|vh|vw)\b", 2.0),
            (r"#[0-9a-fA-F]{3,6}\b", 1.0),
        ],
    },
    RuleSpec {
        language: "json",
        rules: &[
            (r#"^\s*\{\s*"[^"]+"\s*:"#, 5.0),
            (r#""[^"]+"\s*:\s*("|\d|true|false|null|\{|\[)"#, 2.0),
            (r"^\s*[\{\[]", 1.0),
            (r"(?m)^\s*(//|#)", -3.0),
        ],
    },
    RuleSpec {
        language: "yaml",
        rules: &[
            (r"(?m)^---\s*$", 3.0),
            (r"(?m)^[\w-]+:\s*\S*$", 2.0),
            (r"(?m)^\s*-\s+\w+", 2.0),
            (r"(?m)[;{}]\s*$", -2.0),
        ],
    },
    RuleSpec {
        language: "markdown",
        rules: &[
            (r"(?m)^#{1,6}\s+\S", 3.0),
            (r"\[[^\]]+\]\([^)]+\)", 3.0),
            (r"(?m)^```", 3.0),
            (r"\*\*[^*]+\*\*", 2.0),
            (r"(?m)^\s*[-*]\s+\S", 1.0),
        ],
    },
    RuleSpec {
        language: "lua",
        rules: &[
            (r"\blocal\s+\w+\s*=", 3.0),
            (r"~=", 3.0),
            (r"--\[\[", 3.0),
            (r#"\.\.\s*['"]"#, 2.0),
            (r"\bfunction\s+\w+(\.\w+)*\s*\(", 1.0),
            (r"\bthen\b", 1.0),
            (r"\bnil\b", 1.0),
        ],
    },
];

struct LanguageRules {
    language_id: &'static str,
    rules: Vec<(Regex, f64)>,
}

/// Compiled rule set; built once per process
pub struct RegexpRules {
    languages: Vec<LanguageRules>,
}

impl RegexpRules {
    /// Compile the built-in rule table
    pub fn new() -> Result<Self> {
        let languages = RULE_TABLE
            .iter()
            .map(|spec| -> Result<LanguageRules> {
                let rules = spec
                    .rules
                    .iter()
                    .map(|(pattern, weight)| {
                        Regex::new(pattern)
                            .map(|re| (re, *weight))
                            .map_err(|source| LangDetectError::InvalidRule {
                                language: spec.language.to_string(),
                                source,
                            })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(LanguageRules {
                    language_id: spec.language,
                    rules,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { languages })
    }

    /// Best guess for `content`, or `None` when no language matched
    ///
    /// `bias` entries keyed by a known language id with a numeric value are
    /// added to that language's score. Other entries are ignored, and a bias
    /// never makes a language a candidate on its own.
    pub fn detect(&self, content: &str, bias: &Map<String, Value>) -> Option<&'static str> {
        let mut best: Option<(&'static str, f64)> = None;

        for language in &self.languages {
            let Some(score) = language.score(content) else {
                continue;
            };
            let score = score + bias_for(bias, language.language_id);
            tracing::trace!("rule score {} = {}", language.language_id, score);

            if score <= 0.0 {
                continue;
            }
            // Strict comparison keeps the earlier language on ties
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((language.language_id, score));
            }
        }

        best.map(|(id, _)| id)
    }
}

impl LanguageRules {
    /// Summed weight of matching rules, `None` unless a positive rule matched
    fn score(&self, content: &str) -> Option<f64> {
        let mut total = 0.0;
        let mut candidate = false;
        for (regex, weight) in &self.rules {
            if regex.is_match(content) {
                total += weight;
                candidate |= *weight > 0.0;
            }
        }
        candidate.then_some(total)
    }
}

fn bias_for(bias: &Map<String, Value>, language_id: &str) -> f64 {
    bias.get(language_id)
        .and_then(Value::as_f64)
        .filter(|b| b.is_finite())
        .unwrap_or(0.0)
}
