//! Projection of raw detections into the public `Finding` shape.

use super::{Detection, Finding, Observation};

/// Convert a detection into a finding.
///
/// The rule decides id, name, message and severity; only the description
/// and the line come from the detection itself.
pub fn normalize(detection: &Detection) -> Finding {
    let rule = detection.rule();
    Finding {
        id: rule,
        name: rule.name().to_string(),
        description: describe(&detection.observation),
        line: detection.row + 1,
        message: rule.message().to_string(),
        severity: rule.severity(),
    }
}

fn describe(observation: &Observation) -> String {
    match observation {
        Observation::AnyType => "Usage of \"any\" disables type checking.".to_string(),
        Observation::LongParamList { params } => format!("Function has {} parameters.", params),
        Observation::MagicNumber { value } => {
            format!("Unnamed numeric literal \"{}\" found.", number_text(*value))
        }
        Observation::GodClass { methods, lines } => {
            format!("Class has {} methods and {} lines.", methods, lines)
        }
        Observation::CallbackHell { depth } => format!("Function nesting depth is {}.", depth),
        Observation::NonNullAssertion => "Usage of \"!\" operator.".to_string(),
    }
}

/// Render a literal value; overflowed literals read as `Infinity`.
fn number_text(value: f64) -> String {
    if value.is_infinite() {
        let sign = if value < 0.0 { "-" } else { "" };
        format!("{}Infinity", sign)
    } else {
        value.to_string()
    }
}
