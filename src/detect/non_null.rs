//! Non-null assertion operator (`value!`).

use tree_sitter::Node;

use crate::analysis::{classify, NodeClass, WalkContext};

use super::{Detection, Observation, Rule, RuleError, RuleId};

/// One finding per `!` assertion; chained assertions each count.
pub struct NonNullAssertionRule;

impl Rule for NonNullAssertionRule {
    fn id(&self) -> RuleId {
        RuleId::NonNullAssertion
    }

    fn check<'tree>(
        &self,
        node: Node<'tree>,
        _ctx: &WalkContext<'_, 'tree>,
    ) -> Result<Option<Detection>, RuleError> {
        if classify(node) != NodeClass::NonNullAssertion {
            return Ok(None);
        }
        Ok(Some(Detection::at(node, Observation::NonNullAssertion)))
    }
}
