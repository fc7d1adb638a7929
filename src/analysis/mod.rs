//! Single-pass analysis of a parsed TypeScript tree.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ source text │────▶│ parser       │────▶│ ParsedSource │
//! └─────────────┘     └──────────────┘     └──────────────┘
//!                                                  │
//!                                                  ▼
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Finding[]   │◀────│ normalize    │◀────│ walk + rules │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! The walk visits every node once in pre-order. `classify` decides what a
//! node is, each rule in the `RuleSet` decides whether it is a problem, and
//! `normalize` turns the raw detection into a `Finding`. Nothing is shared
//! between two analyses.

mod classify;
mod context;
mod walker;

use serde::Serialize;
use thiserror::Error;

use crate::detect::{Finding, RuleId, RuleSet};
use crate::parser::{self, ParseError, ParserError, SyntaxVariant};

pub use classify::{
    classify, is_class_like, is_declaration_context, is_function_like, FunctionForm, NodeClass,
};
pub use context::WalkContext;
pub use walker::walk;

/// Why an analysis produced no findings at all.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The grammar could not be loaded into the parser.
    #[error("failed to load {0} grammar")]
    Language(SyntaxVariant, #[source] tree_sitter::LanguageError),
    /// The input is not valid source for the selected variant.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl From<ParserError> for AnalyzeError {
    fn from(err: ParserError) -> Self {
        match err {
            ParserError::Language(variant, source) => AnalyzeError::Language(variant, source),
            ParserError::Syntax(parse) => AnalyzeError::Parse(parse),
        }
    }
}

/// A rule that failed on one node. The rest of the analysis still ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleDiagnostic {
    pub rule: RuleId,
    /// 1-indexed line of the node the rule failed on.
    pub line: usize,
    pub node_kind: String,
    pub error: String,
}

/// Result of one analysis: findings in walk order plus any contained
/// rule failures.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    pub findings: Vec<Finding>,
    pub diagnostics: Vec<RuleDiagnostic>,
}

/// Parses a source unit and runs a rule set over it.
///
/// An `Analyzer` holds no per-analysis state, so one instance can be
/// shared across threads.
pub struct Analyzer {
    rules: RuleSet,
}

impl Analyzer {
    /// An analyzer with the standard rule set.
    pub fn new() -> Self {
        Self {
            rules: RuleSet::standard(),
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Analyze one source unit with the given grammar.
    pub fn analyze(&self, source: &str, variant: SyntaxVariant) -> Result<Analysis, AnalyzeError> {
        let span = tracing::debug_span!("analyze", %variant, bytes = source.len());
        let _guard = span.enter();

        let parsed = parser::parse(source, variant).map_err(|err| {
            tracing::debug!(error = %err, "source rejected by parser");
            AnalyzeError::from(err)
        })?;

        let analysis = walk(&parsed, &self.rules);
        tracing::debug!(
            findings = analysis.findings.len(),
            diagnostics = analysis.diagnostics.len(),
            "analysis complete"
        );
        Ok(analysis)
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}
