//! Deeply nested callbacks.

use tree_sitter::Node;

use crate::analysis::{is_function_like, WalkContext};

use super::{Detection, Observation, Rule, RuleError, RuleId};

/// A function enclosed by more function-like ancestors than this is
/// callback hell.
pub const MAX_CALLBACK_DEPTH: usize = 4;

/// Reports every function-like node whose enclosing function count
/// exceeds `MAX_CALLBACK_DEPTH`. The node itself is not counted.
pub struct CallbackHellRule;

impl Rule for CallbackHellRule {
    fn id(&self) -> RuleId {
        RuleId::CallbackHell
    }

    fn check<'tree>(
        &self,
        node: Node<'tree>,
        ctx: &WalkContext<'_, 'tree>,
    ) -> Result<Option<Detection>, RuleError> {
        if !is_function_like(node) {
            return Ok(None);
        }

        let depth = ctx.ancestors().filter(|a| is_function_like(*a)).count();
        if depth <= MAX_CALLBACK_DEPTH {
            return Ok(None);
        }
        Ok(Some(Detection::at(node, Observation::CallbackHell { depth })))
    }
}
