//! Core types for detection results.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Severity levels for findings.
///
/// Severity is a fixed attribute of a rule, never of a single finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::High, Severity::Medium, Severity::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            _ => Err(format!("unknown severity: {}", s)),
        }
    }
}

/// Identifiers of the compiled-in rules, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RuleId {
    #[serde(rename = "any-type")]
    AnyType,
    #[serde(rename = "long-param-list")]
    LongParamList,
    #[serde(rename = "magic-number")]
    MagicNumber,
    #[serde(rename = "god-class")]
    GodClass,
    #[serde(rename = "callback-hell")]
    CallbackHell,
    #[serde(rename = "non-null-assertion")]
    NonNullAssertion,
}

impl RuleId {
    pub const ALL: [RuleId; 6] = [
        RuleId::AnyType,
        RuleId::LongParamList,
        RuleId::MagicNumber,
        RuleId::GodClass,
        RuleId::CallbackHell,
        RuleId::NonNullAssertion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::AnyType => "any-type",
            RuleId::LongParamList => "long-param-list",
            RuleId::MagicNumber => "magic-number",
            RuleId::GodClass => "god-class",
            RuleId::CallbackHell => "callback-hell",
            RuleId::NonNullAssertion => "non-null-assertion",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "any-type" => Some(RuleId::AnyType),
            "long-param-list" => Some(RuleId::LongParamList),
            "magic-number" => Some(RuleId::MagicNumber),
            "god-class" => Some(RuleId::GodClass),
            "callback-hell" => Some(RuleId::CallbackHell),
            "non-null-assertion" => Some(RuleId::NonNullAssertion),
            _ => None,
        }
    }

    /// Human-readable category name.
    pub fn name(&self) -> &'static str {
        match self {
            RuleId::AnyType => "Any Type Abuse",
            RuleId::LongParamList => "Long Parameter List",
            RuleId::MagicNumber => "Magic Number",
            RuleId::GodClass => "God Class",
            RuleId::CallbackHell => "Callback Hell",
            RuleId::NonNullAssertion => "Non-Null Assertion",
        }
    }

    /// Remediation guidance attached to every finding of this rule.
    pub fn message(&self) -> &'static str {
        match self {
            RuleId::AnyType => "Avoid using \"any\". It bypasses the type system.",
            RuleId::LongParamList => "Consider refactoring to use a parameter object.",
            RuleId::MagicNumber => "Extract this number into a named constant.",
            RuleId::GodClass => {
                "This class does too much. Verify Single Responsibility Principle."
            }
            RuleId::CallbackHell => "Refactor using Promises or Async/Await to flatten the code.",
            RuleId::NonNullAssertion => {
                "Avoid non-null assertions. Use optional chaining or guard clauses."
            }
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            RuleId::AnyType | RuleId::GodClass | RuleId::CallbackHell => Severity::High,
            RuleId::LongParamList | RuleId::NonNullAssertion => Severity::Medium,
            RuleId::MagicNumber => Severity::Low,
        }
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One reported anti-pattern occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub id: RuleId,
    pub name: String,
    pub description: String,
    /// 1-indexed line of the offending node's start.
    pub line: usize,
    pub message: String,
    pub severity: Severity,
}

/// The measured values behind a detection, one variant per rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Observation {
    AnyType,
    LongParamList { params: usize },
    MagicNumber { value: f64 },
    GodClass { methods: usize, lines: usize },
    CallbackHell { depth: usize },
    NonNullAssertion,
}

impl Observation {
    /// The rule an observation belongs to.
    pub fn rule(&self) -> RuleId {
        match self {
            Observation::AnyType => RuleId::AnyType,
            Observation::LongParamList { .. } => RuleId::LongParamList,
            Observation::MagicNumber { .. } => RuleId::MagicNumber,
            Observation::GodClass { .. } => RuleId::GodClass,
            Observation::CallbackHell { .. } => RuleId::CallbackHell,
            Observation::NonNullAssertion => RuleId::NonNullAssertion,
        }
    }
}

/// A raw detection as produced by a rule, before normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    /// 0-indexed row of the node start, as reported by tree-sitter.
    pub row: usize,
    pub observation: Observation,
}

impl Detection {
    pub fn at(node: tree_sitter::Node, observation: Observation) -> Self {
        Self {
            row: node.start_position().row,
            observation,
        }
    }

    pub fn rule(&self) -> RuleId {
        self.observation.rule()
    }
}

/// A rule failed on one node; contained by the walker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("unexpected {kind} shape: {detail}")]
    UnexpectedShape { kind: String, detail: String },
    #[error("cannot evaluate numeric literal {text:?}")]
    InvalidLiteral { text: String },
}

impl RuleError {
    pub fn shape(node: tree_sitter::Node, detail: impl Into<String>) -> Self {
        RuleError::UnexpectedShape {
            kind: node.kind().to_string(),
            detail: detail.into(),
        }
    }
}
