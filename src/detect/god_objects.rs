//! Detection of god classes.
//!
//! A class is a god class when it declares too many methods or spans too
//! many lines. Both measures come from the class node itself: methods are
//! its direct members, and the span is the distance between the lines of
//! its first and last token.

use tree_sitter::Node;

use crate::analysis::{is_class_like, WalkContext};

use super::{Detection, Observation, Rule, RuleError, RuleId};

/// More methods than this makes a god class.
pub const MAX_CLASS_METHODS: usize = 20;

/// A class whose end line is more than this many lines after its start
/// line is a god class.
pub const MAX_CLASS_LINES: usize = 300;

pub struct GodClassRule;

impl Rule for GodClassRule {
    fn id(&self) -> RuleId {
        RuleId::GodClass
    }

    fn check<'tree>(
        &self,
        node: Node<'tree>,
        ctx: &WalkContext<'_, 'tree>,
    ) -> Result<Option<Detection>, RuleError> {
        if !is_class_like(node) {
            return Ok(None);
        }

        let body = node
            .child_by_field_name("body")
            .ok_or_else(|| RuleError::shape(node, "class without body"))?;

        let methods = count_methods(body, ctx);
        let lines = node.end_position().row - node.start_position().row;

        if methods <= MAX_CLASS_METHODS && lines <= MAX_CLASS_LINES {
            return Ok(None);
        }
        Ok(Some(Detection::at(
            node,
            Observation::GodClass { methods, lines },
        )))
    }
}

/// Count method members: definitions, overload signatures and abstract
/// methods. Constructors and `get`/`set` accessors are not methods.
fn count_methods(body: Node, ctx: &WalkContext) -> usize {
    let mut cursor = body.walk();
    let count = body
        .named_children(&mut cursor)
        .filter(|member| match member.kind() {
            "method_definition" => !is_constructor(*member, ctx) && !is_accessor(*member),
            "method_signature" | "abstract_method_signature" => true,
            _ => false,
        })
        .count();
    count
}

fn is_constructor(method: Node, ctx: &WalkContext) -> bool {
    method
        .child_by_field_name("name")
        .is_some_and(|name| ctx.text(name) == "constructor")
}

fn is_accessor(method: Node) -> bool {
    let mut cursor = method.walk();
    let found = method
        .children(&mut cursor)
        .any(|child| !child.is_named() && matches!(child.kind(), "get" | "set"));
    found
}
