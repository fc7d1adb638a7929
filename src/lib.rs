//! Smellcheck - TypeScript anti-pattern analyzer.
//!
//! Smellcheck parses one TypeScript (or TSX) source unit, walks its syntax
//! tree once, and reports code smells as an ordered list of findings:
//! `any` types, long parameter lists, magic numbers, god classes, callback
//! hell and non-null assertions.
//!
//! # Architecture
//!
//! - `parser`: tree-sitter front end, variant selection and parse errors
//! - `analysis`: node classification, the single pre-order walk, `Analyzer`
//! - `detect`: the rules, their fixed metadata and finding normalization
//! - `report`: caller-facing report shape and output formatting (text, JSON)
//! - `cli`: file acquisition and command-line handling
//!
//! # Example
//!
//! ```
//! let findings = smellcheck::analyze("let x: any = 1;", None).unwrap();
//! assert_eq!(findings.len(), 1);
//! assert_eq!(findings[0].line, 1);
//! ```

pub mod analysis;
pub mod cli;
pub mod detect;
pub mod parser;
pub mod report;

pub use analysis::{Analysis, AnalyzeError, Analyzer, RuleDiagnostic};
pub use detect::{Finding, Rule, RuleId, RuleSet, Severity};
pub use parser::{ParseError, SyntaxVariant};
pub use report::Report;

/// Analyze one source unit with the standard rules.
///
/// `filename_hint` only selects the grammar: a name ending in `.tsx`
/// parses with markup support, anything else as plain TypeScript.
/// Returns the findings in walk order; an empty list means the source is
/// clean, never that it could not be read.
pub fn analyze(source: &str, filename_hint: Option<&str>) -> Result<Vec<Finding>, AnalyzeError> {
    let variant = SyntaxVariant::from_filename(filename_hint);
    Analyzer::new()
        .analyze(source, variant)
        .map(|analysis| analysis.findings)
}
