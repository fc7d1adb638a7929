//! Functions that take too many parameters.

use tree_sitter::Node;

use crate::analysis::{is_function_like, WalkContext};

use super::{Detection, Observation, Rule, RuleError, RuleId};

/// More parameters than this is a long parameter list.
pub const MAX_PARAMS: usize = 3;

pub struct LongParamListRule;

impl Rule for LongParamListRule {
    fn id(&self) -> RuleId {
        RuleId::LongParamList
    }

    fn check<'tree>(
        &self,
        node: Node<'tree>,
        _ctx: &WalkContext<'_, 'tree>,
    ) -> Result<Option<Detection>, RuleError> {
        if !is_function_like(node) {
            return Ok(None);
        }

        let params = parameter_count(node)?;
        if params <= MAX_PARAMS {
            return Ok(None);
        }
        Ok(Some(Detection::at(
            node,
            Observation::LongParamList { params },
        )))
    }
}

/// Count declared parameters, including rest and `this` parameters.
fn parameter_count(func: Node) -> Result<usize, RuleError> {
    if let Some(params) = func.child_by_field_name("parameters") {
        let mut cursor = params.walk();
        let count = params
            .named_children(&mut cursor)
            .filter(|p| matches!(p.kind(), "required_parameter" | "optional_parameter"))
            .count();
        return Ok(count);
    }

    // `x => ...` carries its single parameter in its own field
    if func.child_by_field_name("parameter").is_some() {
        return Ok(1);
    }

    Err(RuleError::shape(func, "no parameter list"))
}
