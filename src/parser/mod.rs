//! Tree-sitter front end for TypeScript sources.
//!
//! This module provides:
//! - `SyntaxVariant`: plain TypeScript vs. markup-embedded TSX
//! - `ParsedSource`: the immutable tree plus the text it was built from
//! - `parse`: source text to `ParsedSource`, or a located `ParseError`

use std::fmt;

use thiserror::Error;
use tree_sitter::{Language, Node, Parser as TsParser, Tree};

/// Longest excerpt of offending text quoted in a parse error.
const SNIPPET_LIMIT: usize = 24;

/// Which TypeScript grammar to parse with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyntaxVariant {
    /// Plain `.ts` syntax.
    #[default]
    TypeScript,
    /// TypeScript with embedded JSX markup (`.tsx`).
    Tsx,
}

impl SyntaxVariant {
    /// Pick the variant from an optional filename hint.
    ///
    /// Only a `.tsx` suffix selects the markup grammar; anything else,
    /// including no hint at all, parses as plain TypeScript.
    pub fn from_filename(hint: Option<&str>) -> Self {
        match hint {
            Some(name) if name.ends_with(".tsx") => SyntaxVariant::Tsx,
            _ => SyntaxVariant::TypeScript,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SyntaxVariant::TypeScript => "typescript",
            SyntaxVariant::Tsx => "tsx",
        }
    }

    fn language(&self) -> Language {
        match self {
            SyntaxVariant::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            SyntaxVariant::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

impl fmt::Display for SyntaxVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Input that could not be parsed as the requested variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{variant} parse error at {line}:{column}: {reason}")]
pub struct ParseError {
    pub variant: SyntaxVariant,
    /// 1-indexed line of the first syntax error.
    pub line: usize,
    /// 1-indexed column of the first syntax error.
    pub column: usize,
    pub reason: String,
}

/// Failures of the parsing stage.
#[derive(Debug, Error)]
pub enum ParserError {
    #[error("failed to load {0} grammar: {1}")]
    Language(SyntaxVariant, #[source] tree_sitter::LanguageError),
    #[error(transparent)]
    Syntax(#[from] ParseError),
}

/// A parsed source unit.
///
/// Owned by exactly one analysis call and dropped once its findings
/// have been produced.
pub struct ParsedSource {
    /// The tree-sitter parse tree.
    pub tree: Tree,
    /// The original source text (kept for node text extraction).
    pub source: String,
    pub variant: SyntaxVariant,
}

impl ParsedSource {
    /// Get text for a tree-sitter node.
    pub fn node_text(&self, node: Node) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    /// Number of lines in the source, counting a trailing partial line.
    pub fn line_count(&self) -> usize {
        self.source.lines().count().max(1)
    }
}

/// Parse `source` with the grammar for `variant`.
///
/// Tree-sitter recovers from every error, so a tree that contains any
/// `ERROR` or `MISSING` node is rejected here instead of being analyzed.
pub fn parse(source: &str, variant: SyntaxVariant) -> Result<ParsedSource, ParserError> {
    let mut parser = TsParser::new();
    parser
        .set_language(&variant.language())
        .map_err(|e| ParserError::Language(variant, e))?;

    let tree = parser.parse(source, None).ok_or(ParseError {
        variant,
        line: 1,
        column: 1,
        reason: "parser produced no tree".to_string(),
    })?;

    let parsed = ParsedSource {
        tree,
        source: source.to_string(),
        variant,
    };

    if let Some(err) = first_syntax_error(&parsed) {
        return Err(err.into());
    }

    Ok(parsed)
}

/// Locate the first error node in pre-order, descending only into
/// subtrees that contain one.
fn first_syntax_error(parsed: &ParsedSource) -> Option<ParseError> {
    let mut node = parsed.tree.root_node();
    if !node.has_error() {
        return None;
    }

    'descend: loop {
        if node.is_error() || node.is_missing() {
            let start = node.start_position();
            return Some(ParseError {
                variant: parsed.variant,
                line: start.row + 1,
                column: start.column + 1,
                reason: describe(parsed, node),
            });
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.has_error() {
                node = child;
                continue 'descend;
            }
        }

        // has_error() was set but no child carries it
        let start = node.start_position();
        return Some(ParseError {
            variant: parsed.variant,
            line: start.row + 1,
            column: start.column + 1,
            reason: format!("malformed {}", node.kind()),
        });
    }
}

fn describe(parsed: &ParsedSource, node: Node) -> String {
    if node.is_missing() {
        return format!("missing {:?}", node.kind());
    }

    let text = parsed.node_text(node);
    let first_line = text.lines().next().unwrap_or("").trim();
    if first_line.is_empty() {
        return "unexpected input".to_string();
    }

    let snippet: String = first_line.chars().take(SNIPPET_LIMIT).collect();
    if snippet.len() < first_line.len() {
        format!("unexpected {:?}...", snippet)
    } else {
        format!("unexpected {:?}", snippet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_from_filename() {
        assert_eq!(SyntaxVariant::from_filename(None), SyntaxVariant::TypeScript);
        assert_eq!(
            SyntaxVariant::from_filename(Some("component.tsx")),
            SyntaxVariant::Tsx
        );
        assert_eq!(
            SyntaxVariant::from_filename(Some("service.ts")),
            SyntaxVariant::TypeScript
        );
        assert_eq!(
            SyntaxVariant::from_filename(Some("notes.txt")),
            SyntaxVariant::TypeScript
        );
    }

    #[test]
    fn test_parse_valid_source() {
        let parsed = parse("const answer: number = 42;\n", SyntaxVariant::TypeScript).unwrap();
        assert_eq!(parsed.tree.root_node().kind(), "program");
        assert_eq!(parsed.line_count(), 1);
    }

    #[test]
    fn test_parse_empty_source() {
        let parsed = parse("", SyntaxVariant::TypeScript).unwrap();
        assert_eq!(parsed.tree.root_node().named_child_count(), 0);
    }

    #[test]
    fn test_parse_error_is_located() {
        let source = "const ok = 1;\nfunction (( {\n";
        let err = match parse(source, SyntaxVariant::TypeScript) {
            Err(ParserError::Syntax(e)) => e,
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("malformed source should not parse"),
        };
        assert_eq!(err.variant, SyntaxVariant::TypeScript);
        assert!(err.line >= 1 && err.line <= 2, "line was {}", err.line);
        assert!(!err.reason.is_empty());
    }

    #[test]
    fn test_tsx_markup_needs_tsx_variant() {
        let source = "const el = <div className=\"box\">hi</div>;\n";
        assert!(parse(source, SyntaxVariant::Tsx).is_ok());
        assert!(parse(source, SyntaxVariant::TypeScript).is_err());
    }
}
