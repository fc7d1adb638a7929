//! The single pre-order walk.

use tree_sitter::Node;

use crate::detect::{normalize, RuleSet};
use crate::parser::ParsedSource;

use super::{Analysis, RuleDiagnostic, WalkContext};

/// Visit every node once, parent before children and children left to
/// right, asking each rule in set order. Findings are appended in the order
/// they are produced and never reordered or merged afterwards.
///
/// A rule that fails on a node is recorded as a diagnostic and the walk
/// moves on.
pub fn walk(parsed: &ParsedSource, rules: &RuleSet) -> Analysis {
    let mut analysis = Analysis::default();
    let mut ancestors: Vec<Node> = Vec::new();
    let mut cursor = parsed.tree.walk();

    loop {
        let node = cursor.node();
        if node.is_named() {
            visit(node, &ancestors, parsed, rules, &mut analysis);
        }

        if cursor.goto_first_child() {
            ancestors.push(node);
            continue;
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return analysis;
            }
            ancestors.pop();
        }
    }
}

fn visit<'tree>(
    node: Node<'tree>,
    ancestors: &[Node<'tree>],
    parsed: &ParsedSource,
    rules: &RuleSet,
    analysis: &mut Analysis,
) {
    let ctx = WalkContext::new(parsed, ancestors);

    for rule in rules.rules() {
        match rule.check(node, &ctx) {
            Ok(Some(detection)) => {
                debug_assert_eq!(detection.rule(), rule.id());
                analysis.findings.push(normalize(&detection));
            }
            Ok(None) => {}
            Err(error) => {
                let line = node.start_position().row + 1;
                tracing::warn!(
                    rule = %rule.id(),
                    line,
                    node_kind = node.kind(),
                    %error,
                    "rule failed on node, skipping"
                );
                analysis.diagnostics.push(RuleDiagnostic {
                    rule: rule.id(),
                    line,
                    node_kind: node.kind().to_string(),
                    error: error.to_string(),
                });
            }
        }
    }
}
