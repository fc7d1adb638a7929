//! Detection rules for TypeScript anti-patterns.
//!
//! Each rule looks at one node (plus its ancestors) and reports at most
//! one `Detection`. Rules never descend into children; the walker visits
//! every node exactly once and asks each rule in `RuleSet` order.

mod any_type;
mod callback_hell;
mod god_objects;
mod long_params;
mod magic_numbers;
mod non_null;
mod normalize;
mod types;

use tree_sitter::Node;

use crate::analysis::WalkContext;

pub use any_type::AnyTypeRule;
pub use callback_hell::{CallbackHellRule, MAX_CALLBACK_DEPTH};
pub use god_objects::{GodClassRule, MAX_CLASS_LINES, MAX_CLASS_METHODS};
pub use long_params::{LongParamListRule, MAX_PARAMS};
pub use magic_numbers::{MagicNumberRule, EXEMPT_VALUES};
pub use non_null::NonNullAssertionRule;
pub use normalize::normalize;
pub use types::{Detection, Finding, Observation, RuleError, RuleId, Severity};

/// A single anti-pattern detector.
pub trait Rule: Send + Sync {
    /// The rule identifier; every detection this rule returns carries it.
    fn id(&self) -> RuleId;

    /// Inspect `node`. Returns `Ok(None)` when the rule does not apply.
    fn check<'tree>(
        &self,
        node: Node<'tree>,
        ctx: &WalkContext<'_, 'tree>,
    ) -> Result<Option<Detection>, RuleError>;
}

/// An ordered, fixed collection of rules.
pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleSet {
    /// The six compiled-in rules, in evaluation order.
    pub fn standard() -> Self {
        Self {
            rules: vec![
                Box::new(AnyTypeRule),
                Box::new(LongParamListRule),
                Box::new(MagicNumberRule),
                Box::new(GodClassRule),
                Box::new(CallbackHellRule),
                Box::new(NonNullAssertionRule),
            ],
        }
    }

    /// A rule set with a caller-chosen order, for isolating rules in tests.
    #[cfg(test)]
    pub(crate) fn from_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    pub fn ids(&self) -> Vec<RuleId> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}
