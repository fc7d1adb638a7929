//! Unnamed numeric literals in expressions.

use tree_sitter::Node;

use crate::analysis::{classify, is_declaration_context, NodeClass, WalkContext};

use super::{Detection, Observation, Rule, RuleError, RuleId};

/// Values that are never magic, wherever they appear.
pub const EXEMPT_VALUES: [f64; 3] = [0.0, 1.0, -1.0];

/// Flags numeric literals outside of a naming declaration.
///
/// The grammar has no negative literals: in `-40` the literal is `40`, and
/// its parent is the minus expression. Value and context both come from
/// the literal itself, so `-1` is exempt (its literal is `1`) while
/// `const FLOOR = -40` reports `40`.
pub struct MagicNumberRule;

impl Rule for MagicNumberRule {
    fn id(&self) -> RuleId {
        RuleId::MagicNumber
    }

    fn check<'tree>(
        &self,
        node: Node<'tree>,
        ctx: &WalkContext<'_, 'tree>,
    ) -> Result<Option<Detection>, RuleError> {
        if classify(node) != NodeClass::NumericLiteral {
            return Ok(None);
        }

        let Some(value) = literal_value(ctx.text(node))? else {
            return Ok(None);
        };

        if EXEMPT_VALUES.contains(&value) || is_declaration_context(ctx.parent()) {
            return Ok(None);
        }
        Ok(Some(Detection::at(node, Observation::MagicNumber { value })))
    }
}

/// Evaluate a numeric literal's text. BigInt literals (`10n`) are not
/// numbers and yield `None`. Literals beyond the range of `f64` evaluate to
/// infinity.
fn literal_value(text: &str) -> Result<Option<f64>, RuleError> {
    let invalid = || RuleError::InvalidLiteral {
        text: text.to_string(),
    };

    if text.ends_with('n') {
        return Ok(None);
    }

    let digits: String = text.chars().filter(|c| *c != '_').collect();
    let lower = digits.to_ascii_lowercase();

    let radix = if lower.starts_with("0x") {
        Some((16, &digits[2..]))
    } else if lower.starts_with("0o") {
        Some((8, &digits[2..]))
    } else if lower.starts_with("0b") {
        Some((2, &digits[2..]))
    } else if is_legacy_octal(&digits) {
        Some((8, &digits[1..]))
    } else {
        None
    };

    let value = match radix {
        Some((radix, body)) => radix_value(body, radix).ok_or_else(invalid)?,
        None => digits.parse::<f64>().map_err(|_| invalid())?,
    };
    Ok(Some(value))
}

/// Integer digits in `radix`, accumulated in `f64` so that arbitrarily
/// wide literals still evaluate.
fn radix_value(body: &str, radix: u32) -> Option<f64> {
    if body.is_empty() {
        return None;
    }
    body.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

/// `017` is octal in sloppy-mode JavaScript; `019` is decimal.
fn is_legacy_octal(digits: &str) -> bool {
    digits.len() > 1
        && digits.starts_with('0')
        && digits.bytes().all(|b| (b'0'..=b'7').contains(&b))
}
