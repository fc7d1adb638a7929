//! Output formatting for smellcheck results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};

use crate::analysis::Analysis;
use crate::detect::{Finding, RuleSet, Severity};

/// The caller-facing result of one analysis: the findings in walk order
/// and how many there are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub findings: Vec<Finding>,
    pub count: usize,
}

impl Report {
    pub fn new(findings: Vec<Finding>) -> Self {
        let count = findings.len();
        Self { findings, count }
    }

    /// Findings per severity, in `Severity::ALL` order.
    pub fn severity_counts(&self) -> [(Severity, usize); 3] {
        Severity::ALL.map(|severity| {
            let n = self
                .findings
                .iter()
                .filter(|f| f.severity == severity)
                .count();
            (severity, n)
        })
    }
}

impl From<Analysis> for Report {
    fn from(analysis: Analysis) -> Self {
        Report::new(analysis.findings)
    }
}

/// What happened to one input.
#[derive(Debug, Clone)]
pub enum FileOutcome {
    Analyzed(Report),
    /// The input could not be read or parsed. Never shown as clean.
    Failed(String),
}

/// One input and its outcome.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: String,
    pub outcome: FileOutcome,
}

impl FileReport {
    pub fn analyzed(path: impl Into<String>, report: Report) -> Self {
        Self {
            path: path.into(),
            outcome: FileOutcome::Analyzed(report),
        }
    }

    pub fn failed(path: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            outcome: FileOutcome::Failed(error.into()),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, FileOutcome::Failed(_))
    }

    pub fn findings(&self) -> &[Finding] {
        match &self.outcome {
            FileOutcome::Analyzed(report) => &report.findings,
            FileOutcome::Failed(_) => &[],
        }
    }
}

// =============================================================================
// JSON Format
// =============================================================================

/// Top-level JSON document.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub files: Vec<JsonFile>,
}

/// Per-input entry of the JSON document.
#[derive(Serialize, Deserialize)]
pub struct JsonFile {
    pub path: String,
    /// `analyzed` or `failed`.
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub count: usize,
    pub findings: Vec<Finding>,
}

pub fn build_json(files: &[FileReport]) -> JsonReport {
    let files = files
        .iter()
        .map(|file| match &file.outcome {
            FileOutcome::Analyzed(report) => JsonFile {
                path: file.path.clone(),
                status: "analyzed".to_string(),
                error: None,
                count: report.count,
                findings: report.findings.clone(),
            },
            FileOutcome::Failed(error) => JsonFile {
                path: file.path.clone(),
                status: "failed".to_string(),
                error: Some(error.clone()),
                count: 0,
                findings: Vec::new(),
            },
        })
        .collect();

    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        files,
    }
}

pub fn render_json(files: &[FileReport]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&build_json(files))?)
}

/// Write results in JSON format.
pub fn write_json(files: &[FileReport]) -> anyhow::Result<()> {
    let json = render_json(files)?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in pretty (human-readable) format.
pub fn write_pretty(files: &[FileReport]) {
    // Header
    println!();
    print!("  ");
    print!("{}", "smellcheck".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    for file in files {
        print!("  {}", "File: ".dimmed());
        println!("{}", file.path.blue());
        println!();

        match &file.outcome {
            FileOutcome::Analyzed(report) => {
                if !report.findings.is_empty() {
                    write_findings(&report.findings);
                }
                write_file_summary(report);
            }
            FileOutcome::Failed(error) => {
                println!("  {}  {}", "✗ ANALYSIS FAILED".red().bold(), error);
            }
        }
        println!();
    }

    write_final_status(files);
    println!();
}

fn write_findings(findings: &[Finding]) {
    for f in findings {
        write_severity_tag(&f.severity);
        print!("   ");
        print!("{:<20}", f.id.as_str().dimmed());
        print!("{}", format!("line {}", f.line).dimmed());
        println!("  {}", f.name.bold());

        println!("            {}", f.description);
        println!("            {}", f.message.italic());
        println!();
    }
}

fn write_severity_tag(severity: &Severity) {
    match severity {
        Severity::High => print!("    {} ", "HIGH".red()),
        Severity::Medium => print!("    {} ", "MED ".yellow()),
        Severity::Low => print!("    {} ", "LOW ".blue()),
    }
}

fn write_file_summary(report: &Report) {
    if report.count == 0 {
        println!("  {}", "✓ No issues found".green());
        return;
    }

    let parts: Vec<String> = report
        .severity_counts()
        .iter()
        .map(|(severity, n)| format!("{} {}", n, severity))
        .collect();
    let plural = if report.count != 1 { "s" } else { "" };
    println!(
        "  {} finding{}  {}",
        report.count.to_string().bold(),
        plural,
        format!("({})", parts.join(", ")).dimmed()
    );
}

fn write_final_status(files: &[FileReport]) {
    let failed = files.iter().filter(|f| f.is_failed()).count();
    let total: usize = files.iter().map(|f| f.findings().len()).sum();

    print!(
        "  {}",
        format!("Files: {}  Findings: {}", files.len(), total).dimmed()
    );
    print!("  ");
    if failed > 0 {
        print!("{}", format!("FAILED ({} not analyzed)", failed).red());
    } else if total > 0 {
        print!("{}", "ISSUES FOUND".yellow());
    } else {
        print!("{}", "CLEAN".green());
    }
    println!();
}

/// Write the compiled-in rule table.
pub fn write_rules(rules: &RuleSet) {
    println!("  {} ({}):", "Rules".bold(), rules.len());
    println!();
    for rule in rules.rules() {
        let id = rule.id();
        write_severity_tag(&id.severity());
        print!("   ");
        print!("{:<20}", id.as_str());
        println!("{}", id.name().bold());
        println!("            {}", id.message().dimmed());
    }
}
