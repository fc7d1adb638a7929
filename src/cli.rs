//! Command-line interface for smellcheck.
//!
//! The CLI owns file acquisition: it decides which inputs are accepted,
//! enforces the size ceiling, and turns every unreadable or unparseable
//! input into a failed file entry instead of an empty one.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use std::io::Read;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::analysis::Analyzer;
use crate::parser::SyntaxVariant;
use crate::report::{self, FileReport, Report};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FINDINGS: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Default input size ceiling in bytes (1 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 1_048_576;

const SUPPORTED_EXTENSIONS: &[&str] = &["ts", "tsx"];

/// Path argument that reads source from stdin.
const STDIN_PATH: &str = "-";

/// TypeScript anti-pattern analyzer.
///
/// Smellcheck reports `any` types, long parameter lists, magic numbers,
/// god classes, callback hell and non-null assertions in TypeScript and
/// TSX sources.
#[derive(Parser)]
#[command(name = "smellcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze TypeScript files or directories
    #[command(visible_alias = "check")]
    Scan(ScanArgs),
    /// List the compiled-in rules
    Rules,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
}

/// Arguments for the scan command.
#[derive(Parser)]
pub struct ScanArgs {
    /// Files or directories to analyze (`-` reads stdin)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,

    /// File name used to pick the grammar for stdin input (e.g. `app.tsx`)
    #[arg(long)]
    pub filename: Option<String>,

    /// Reject inputs larger than this many bytes
    #[arg(long, default_value_t = DEFAULT_MAX_BYTES)]
    pub max_bytes: u64,
}

/// One input to analyze.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Target {
    Stdin,
    File(PathBuf),
}

impl Target {
    pub fn display_path(&self) -> String {
        match self {
            Target::Stdin => STDIN_PATH.to_string(),
            Target::File(path) => path.to_string_lossy().to_string(),
        }
    }
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}

/// Expand the command-line paths into targets, sorted and deduplicated.
///
/// Directories contribute their `.ts`/`.tsx` files, skipping hidden
/// directories and `node_modules`. Explicit files are kept as given so that
/// an unsupported one is reported instead of silently dropped.
pub fn collect_targets(paths: &[PathBuf]) -> anyhow::Result<Vec<Target>> {
    let mut targets = Vec::new();

    for path in paths {
        if path.as_os_str() == STDIN_PATH {
            targets.push(Target::Stdin);
        } else if path.is_dir() {
            collect_dir(path, &mut targets)?;
        } else {
            targets.push(Target::File(path.clone()));
        }
    }

    targets.sort();
    targets.dedup();
    Ok(targets)
}

fn collect_dir(root: &Path, targets: &mut Vec<Target>) -> anyhow::Result<()> {
    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            !name.starts_with('.') && name != "node_modules"
        })
    {
        let entry = entry?;
        if entry.file_type().is_file() && is_supported(entry.path()) {
            targets.push(Target::File(entry.path().to_path_buf()));
        }
    }
    Ok(())
}

/// Read a file, enforcing the extension and size limits.
pub fn read_source(path: &Path, max_bytes: u64) -> anyhow::Result<String> {
    if !is_supported(path) {
        anyhow::bail!(
            "unsupported file type {} (expected .ts or .tsx)",
            path.display()
        );
    }

    let metadata = std::fs::metadata(path)
        .with_context(|| format!("cannot access {}", path.display()))?;
    if metadata.len() > max_bytes {
        anyhow::bail!(
            "{} is {} bytes, larger than the {} byte limit",
            path.display(),
            metadata.len(),
            max_bytes
        );
    }

    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn read_stdin(max_bytes: u64) -> anyhow::Result<String> {
    let mut source = String::new();
    std::io::stdin()
        .take(max_bytes.saturating_add(1))
        .read_to_string(&mut source)
        .context("failed to read stdin")?;
    if source.len() as u64 > max_bytes {
        anyhow::bail!("stdin is larger than the {} byte limit", max_bytes);
    }
    Ok(source)
}

/// Acquire and analyze one target.
fn analyze_target(
    analyzer: &Analyzer,
    target: &Target,
    stdin: Option<&Result<String, String>>,
    args: &ScanArgs,
) -> FileReport {
    let path = target.display_path();

    let (source, hint) = match target {
        Target::Stdin => match stdin {
            Some(Ok(text)) => (text.clone(), args.filename.clone()),
            Some(Err(e)) => return FileReport::failed(path, e.clone()),
            None => return FileReport::failed(path, "stdin was not read"),
        },
        Target::File(file) => match read_source(file, args.max_bytes) {
            Ok(text) => (text, Some(path.clone())),
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "skipping input");
                return FileReport::failed(path, format!("{:#}", e));
            }
        },
    };

    let variant = SyntaxVariant::from_filename(hint.as_deref());
    match analyzer.analyze(&source, variant) {
        Ok(analysis) => FileReport::analyzed(path, Report::from(analysis)),
        Err(e) => FileReport::failed(path, e.to_string()),
    }
}

/// Analyze all targets in parallel, keeping target order.
pub fn scan(targets: &[Target], args: &ScanArgs) -> anyhow::Result<Vec<FileReport>> {
    let stdin = if targets.contains(&Target::Stdin) {
        Some(read_stdin(args.max_bytes).map_err(|e| {
            tracing::warn!(error = %e, "skipping stdin");
            format!("{:#}", e)
        }))
    } else {
        None
    };

    let analyzer = Analyzer::new();
    let reports: Vec<FileReport> = targets
        .par_iter()
        .map(|target| analyze_target(&analyzer, target, stdin.as_ref(), args))
        .collect();
    Ok(reports)
}

/// Exit code for a finished scan: failures outrank findings.
pub fn exit_code(files: &[FileReport]) -> i32 {
    if files.iter().any(|f| f.is_failed()) {
        EXIT_ERROR
    } else if files.iter().any(|f| !f.findings().is_empty()) {
        EXIT_FINDINGS
    } else {
        EXIT_SUCCESS
    }
}

/// Run the scan command.
pub fn run_scan(args: &ScanArgs) -> anyhow::Result<i32> {
    let targets = collect_targets(&args.paths)?;

    if targets.is_empty() {
        eprintln!("Warning: no TypeScript files to scan");
        return Ok(EXIT_SUCCESS);
    }
    tracing::debug!(count = targets.len(), "collected inputs");

    let files = scan(&targets, args)?;

    match args.format {
        OutputFormat::Json => report::write_json(&files)?,
        OutputFormat::Pretty => report::write_pretty(&files),
    }

    Ok(exit_code(&files))
}

/// Run the rules command.
pub fn run_rules() -> anyhow::Result<i32> {
    report::write_rules(Analyzer::new().rules());
    Ok(EXIT_SUCCESS)
}
