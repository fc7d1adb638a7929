//! Explicit `any` annotations.

use tree_sitter::Node;

use crate::analysis::{classify, NodeClass, WalkContext};

use super::{Detection, Observation, Rule, RuleError, RuleId};

/// Flags every `any` keyword in a type position, one finding per token.
pub struct AnyTypeRule;

impl Rule for AnyTypeRule {
    fn id(&self) -> RuleId {
        RuleId::AnyType
    }

    fn check<'tree>(
        &self,
        node: Node<'tree>,
        _ctx: &WalkContext<'_, 'tree>,
    ) -> Result<Option<Detection>, RuleError> {
        if classify(node) != NodeClass::AnyType {
            return Ok(None);
        }
        Ok(Some(Detection::at(node, Observation::AnyType)))
    }
}
