//! Grammar-fit language model
//!
//! Scores each candidate language by how cleanly the content parses with
//! that language's tree-sitter grammar and how many characteristic tokens
//! of the language appear in it. Scores are turned into confidences with a
//! softmax, so the returned confidences sum to 1.0 before truncation.
//!
//! # Scoring
//!
//! ```text
//! syntax  = 1 - (bytes under ERROR/MISSING nodes / content bytes)
//! lexical = min(hint hits, HINT_SATURATION) / HINT_SATURATION
//! score   = SYNTAX_WEIGHT * syntax + LEXICAL_WEIGHT * lexical
//! ```

use tree_sitter::{Language, Parser, Tree};

use crate::error::{LangDetectError, Result};
use crate::lang::Lang;
use crate::prediction::Prediction;

const SYNTAX_WEIGHT: f64 = 0.55;
const LEXICAL_WEIGHT: f64 = 0.45;
const HINT_SATURATION: usize = 3;
/// Lower values sharpen the distribution toward the best candidate
const TEMPERATURE: f64 = 0.12;

/// Tuning for the grammar model
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Maximum number of ranked predictions returned
    pub max_predictions: usize,
    /// Content beyond this many bytes is ignored
    pub max_content_bytes: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            max_predictions: 10,
            max_content_bytes: 100_000,
        }
    }
}

struct Candidate {
    lang: Lang,
    grammar: Language,
}

/// Loaded grammars plus configuration; built once per process
pub struct GrammarModel {
    config: ModelConfig,
    candidates: Vec<Candidate>,
}

impl GrammarModel {
    /// Load every candidate grammar
    ///
    /// Fails if a linked grammar was built against an incompatible
    /// tree-sitter ABI.
    pub fn new(config: ModelConfig) -> Result<Self> {
        let mut probe = Parser::new();
        let mut candidates = Vec::with_capacity(Lang::ALL.len());

        for lang in Lang::ALL {
            let grammar = lang.tree_sitter_language();
            probe
                .set_language(&grammar)
                .map_err(|e| LangDetectError::ModelFailure {
                    message: format!("cannot load {} grammar: {}", lang.name(), e),
                })?;
            candidates.push(Candidate { lang, grammar });
        }

        tracing::debug!("Grammar model loaded {} languages", candidates.len());
        Ok(Self { config, candidates })
    }

    /// Rank candidate languages for `content`, most likely first
    pub fn run_model(&self, content: &str) -> Result<Vec<Prediction>> {
        let sample = truncate_to_char_boundary(content, self.config.max_content_bytes);
        if sample.trim().is_empty() || self.config.max_predictions == 0 {
            return Ok(Vec::new());
        }

        let mut parser = Parser::new();
        let mut scored: Vec<(Lang, f64)> = Vec::with_capacity(self.candidates.len());

        for candidate in &self.candidates {
            parser
                .set_language(&candidate.grammar)
                .map_err(|e| LangDetectError::ModelFailure {
                    message: format!("cannot load {} grammar: {}", candidate.lang.name(), e),
                })?;
            let tree = parser
                .parse(sample, None)
                .ok_or_else(|| LangDetectError::ModelFailure {
                    message: format!("{} parser returned no tree", candidate.lang.name()),
                })?;

            let syntax = syntax_fit(&tree, sample.len());
            let lexical = lexical_fit(candidate.lang, sample);
            scored.push((candidate.lang, SYNTAX_WEIGHT * syntax + LEXICAL_WEIGHT * lexical));
        }

        let mut predictions = softmax(&scored);
        // Stable sort keeps table order among equal confidences
        predictions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        predictions.truncate(self.config.max_predictions);
        Ok(predictions)
    }
}

fn truncate_to_char_boundary(content: &str, max_bytes: usize) -> &str {
    if content.len() <= max_bytes {
        return content;
    }
    let mut end = max_bytes;
    while !content.is_char_boundary(end) {
        end -= 1;
    }
    &content[..end]
}

/// Share of the content the grammar accepted without recovery
fn syntax_fit(tree: &Tree, content_len: usize) -> f64 {
    if content_len == 0 {
        return 0.0;
    }
    let rejected = error_bytes(tree).min(content_len);
    1.0 - rejected as f64 / content_len as f64
}

/// Bytes covered by ERROR nodes, plus one per MISSING node
fn error_bytes(tree: &Tree) -> usize {
    let mut cursor = tree.walk();
    let mut total = 0;

    loop {
        let node = cursor.node();
        let descend = if node.is_error() {
            total += node.byte_range().len();
            false
        } else if node.is_missing() {
            total += 1;
            false
        } else {
            node.has_error()
        };

        if descend && cursor.goto_first_child() {
            continue;
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return total;
            }
        }
    }
}

fn lexical_fit(lang: Lang, content: &str) -> f64 {
    let hits = lang
        .hints()
        .iter()
        .filter(|hint| content.contains(**hint))
        .count();
    hits.min(HINT_SATURATION) as f64 / HINT_SATURATION as f64
}

fn softmax(scored: &[(Lang, f64)]) -> Vec<Prediction> {
    let max = scored
        .iter()
        .map(|(_, score)| *score)
        .fold(f64::NEG_INFINITY, f64::max);
    let weights: Vec<f64> = scored
        .iter()
        .map(|(_, score)| ((score - max) / TEMPERATURE).exp())
        .collect();
    let total: f64 = weights.iter().sum();

    scored
        .iter()
        .zip(weights)
        .map(|((lang, _), weight)| Prediction::new(lang.model_id(), weight / total))
        .collect()
}
