//! Per-node context handed to rules during the walk.

use tree_sitter::Node;

use crate::parser::ParsedSource;

/// What a rule may see besides the node itself: the parsed source (for
/// text and positions) and the chain of ancestors, outermost first.
///
/// The ancestor slice belongs to the walker and is only valid for the
/// duration of one rule invocation.
pub struct WalkContext<'a, 'tree> {
    parsed: &'a ParsedSource,
    ancestors: &'a [Node<'tree>],
}

impl<'a, 'tree> WalkContext<'a, 'tree> {
    pub fn new(parsed: &'a ParsedSource, ancestors: &'a [Node<'tree>]) -> Self {
        Self { parsed, ancestors }
    }

    pub fn parsed(&self) -> &'a ParsedSource {
        self.parsed
    }

    /// Source text of a node.
    pub fn text(&self, node: Node) -> &'a str {
        self.parsed.node_text(node)
    }

    /// The immediate parent of the current node, if any.
    pub fn parent(&self) -> Option<Node<'tree>> {
        self.ancestors.last().copied()
    }

    /// Ancestors from the immediate parent up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = Node<'tree>> + 'a {
        self.ancestors.iter().rev().copied()
    }

    /// Number of ancestors, i.e. the depth of the current node.
    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, SyntaxVariant};

    #[test]
    fn test_parent_and_ancestor_order() {
        let parsed = parse("let x = 2;\n", SyntaxVariant::TypeScript).unwrap();
        let root = parsed.tree.root_node();
        let decl = root.named_child(0).unwrap();
        let declarator = decl.named_child(0).unwrap();
        let chain = [root, decl, declarator];

        let ctx = WalkContext::new(&parsed, &chain);
        assert_eq!(ctx.parent().map(|n| n.kind()), Some("variable_declarator"));
        assert_eq!(ctx.depth(), 3);

        let kinds: Vec<_> = ctx.ancestors().map(|n| n.kind()).collect();
        assert_eq!(kinds, vec!["variable_declarator", "lexical_declaration", "program"]);
        assert_eq!(ctx.text(declarator), "x = 2");
    }

    #[test]
    fn test_root_has_no_parent() {
        let parsed = parse("", SyntaxVariant::TypeScript).unwrap();
        let ctx = WalkContext::new(&parsed, &[]);
        assert!(ctx.parent().is_none());
        assert_eq!(ctx.ancestors().count(), 0);
    }
}
