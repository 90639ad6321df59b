//! Command-line interface module for dirsort.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing and target path normalization
//! - The preview, confirm, then organize flow
//! - Rendering plans and summaries as text or JSON
//! - Mapping the outcome of a run to a process exit code
//!
//! Decisions are made by the engine ([`FileOrganizer`] and [`report`]); this
//! module only talks to the terminal.

use crate::file_category::CategoryTable;
use crate::file_organizer::{FileOrganizer, MoveEvent, OrganizeResult, Plan, RunSummary};
use crate::output::OutputFormatter;
use crate::report::{PreviewReport, report};
use clap::Parser;
use serde_json::{Value, json};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

/// Sort the files of a directory into category subdirectories.
#[derive(Debug, Parser)]
#[command(name = "dirsort", version, about)]
pub struct Args {
    /// Directory to organize (surrounding quotes are ignored)
    #[arg(required_unless_present = "list_categories")]
    pub path: Option<String>,

    /// Show where files would go and ask before moving anything
    #[arg(short, long, conflicts_with = "dry_run")]
    pub preview: bool,

    /// Show where files would go without moving anything
    #[arg(long)]
    pub dry_run: bool,

    /// Answer yes to the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the category table and exit
    #[arg(long)]
    pub list_categories: bool,
}

impl Args {
    /// The organize command selected by the flags.
    pub fn organize_command(&self) -> OrganizeCommand {
        if self.dry_run {
            OrganizeCommand::DryRun
        } else {
            OrganizeCommand::Organize {
                preview_first: self.preview,
            }
        }
    }

    /// The output mode selected by `--json`.
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        }
    }
}

/// Represents a CLI command to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrganizeCommand {
    /// Organize files in a directory.
    Organize {
        /// If true, show the preview and ask for confirmation first.
        preview_first: bool,
    },
    /// Only show the preview.
    DryRun,
}

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Text,
    Json,
}

/// Asks the user a yes/no question.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Reads the answer from standard input.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        eprint!("{}", prompt);
        let _ = io::stderr().flush();

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_affirmative(&answer),
            Err(_) => false,
        }
    }
}

/// Answers every question with yes.
pub struct AutoConfirm;

impl Confirm for AutoConfirm {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

/// What a CLI run ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliOutcome {
    /// Files were organized.
    Organized(RunSummary),
    /// Only a preview was shown.
    Previewed(PreviewReport),
    /// The preview was shown and the user declined to continue.
    Cancelled(PreviewReport),
}

impl CliOutcome {
    /// The process exit status for this outcome: 2 if any file failed to move.
    pub fn exit_status(&self) -> u8 {
        match self {
            CliOutcome::Organized(summary) if !summary.is_complete_success() => 2,
            _ => 0,
        }
    }
}

/// Returns true for `y` or `yes` in any case, ignoring surrounding whitespace.
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    answer == "y" || answer == "yes"
}

/// Turns a typed or pasted path into a [`PathBuf`].
///
/// Surrounding whitespace is trimmed, then surrounding double quotes, then
/// surrounding single quotes.
///
/// # Examples
///
/// ```
/// use dirsort::cli::normalize_target_path;
/// use std::path::Path;
///
/// assert_eq!(normalize_target_path("  \"/tmp/My Files\" "), Path::new("/tmp/My Files"));
/// ```
pub fn normalize_target_path(raw: &str) -> PathBuf {
    PathBuf::from(raw.trim().trim_matches('"').trim_matches('\''))
}

/// Runs a command with the standard table, text output and a stdin prompt.
///
/// # Examples
///
/// ```no_run
/// use dirsort::cli::{run_cli, OrganizeCommand};
/// use std::path::Path;
///
/// let result = run_cli(OrganizeCommand::DryRun, Path::new("/path/to/directory"));
/// match result {
///     Ok(outcome) => println!("{:?}", outcome),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(command: OrganizeCommand, dir_path: &Path) -> OrganizeResult<CliOutcome> {
    run_cli_with(
        command,
        dir_path,
        &FileOrganizer::default(),
        OutputMode::Text,
        &mut StdinConfirm,
    )
}

/// Runs a command with an explicit organizer, output mode and confirmation source.
///
/// The directory is planned once. In preview-first mode the grouped preview is
/// printed and `confirm` decides whether that same plan is executed.
///
/// In JSON mode exactly one document is written to stdout when the run ends,
/// see [`outcome_json`].
pub fn run_cli_with(
    command: OrganizeCommand,
    dir_path: &Path,
    organizer: &FileOrganizer,
    output: OutputMode,
    confirm: &mut dyn Confirm,
) -> OrganizeResult<CliOutcome> {
    let plan = organizer.plan(dir_path)?;

    let (outcome, preview_shown) = match command {
        OrganizeCommand::DryRun => {
            let preview = show_preview(dir_path, &plan, output);
            if output == OutputMode::Text {
                OutputFormatter::dry_run_notice("No files were modified.");
            }
            (CliOutcome::Previewed(preview), true)
        }
        OrganizeCommand::Organize {
            preview_first: false,
        } => {
            let summary = organize(dir_path, &plan, organizer, output)?;
            (CliOutcome::Organized(summary), false)
        }
        OrganizeCommand::Organize {
            preview_first: true,
        } => {
            let preview = show_preview(dir_path, &plan, output);
            if confirm.confirm("\nProceed with organization? (y/n): ") {
                let summary = organize(dir_path, &plan, organizer, output)?;
                (CliOutcome::Organized(summary), true)
            } else {
                if output == OutputMode::Text {
                    OutputFormatter::warning("Organization cancelled.");
                }
                (CliOutcome::Cancelled(preview), true)
            }
        }
    };

    if output == OutputMode::Json {
        print_json(&outcome_json(dir_path, &plan, &outcome, preview_shown));
    }
    Ok(outcome)
}

fn show_preview(dir_path: &Path, plan: &Plan, output: OutputMode) -> PreviewReport {
    let preview = report(plan);
    match output {
        OutputMode::Text => {
            OutputFormatter::info(&format!(
                "🔍 Preview organization for: {}",
                dir_path.display()
            ));
            OutputFormatter::plain(&"-".repeat(50));
            OutputFormatter::preview(&preview, plan.skipped.len());
        }
        OutputMode::Json => {}
    }
    preview
}

fn organize(
    dir_path: &Path,
    plan: &Plan,
    organizer: &FileOrganizer,
    output: OutputMode,
) -> OrganizeResult<RunSummary> {
    match output {
        OutputMode::Text => {
            OutputFormatter::info(&format!("📁 Organizing files in: {}", dir_path.display()));

            let pb = OutputFormatter::create_progress_bar(plan.files.len() as u64);
            let result = organizer.execute_with_progress(dir_path, plan, |event| {
                match event {
                    MoveEvent::Moved(moved) => pb.set_message(format!("→ {}/", moved.category)),
                    MoveEvent::Failed(failed) => pb.println(format!("✗ {}", failed.error)),
                }
                pb.inc(1);
            });
            pb.finish_and_clear();

            let summary = result?;
            OutputFormatter::success("Organization complete!");
            OutputFormatter::summary_table(&summary);
            if !summary.is_complete_success() {
                OutputFormatter::warning(
                    "Some files could not be organized. Please review errors above.",
                );
            }
            Ok(summary)
        }
        OutputMode::Json => organizer.execute(dir_path, plan),
    }
}

/// JSON document describing a preview.
pub fn preview_json(dir_path: &Path, plan: &Plan, preview: &PreviewReport) -> Value {
    json!({
        "directory": dir_path.to_string_lossy(),
        "total_files": preview.total_files(),
        "preview": preview,
        "skipped": plan.skipped,
    })
}

/// JSON document describing a finished run.
pub fn summary_json(dir_path: &Path, summary: &RunSummary) -> Value {
    json!({
        "directory": dir_path.to_string_lossy(),
        "moved_files": summary.moved_files(),
        "skipped_files": summary.skipped_files(),
        "failed_files": summary.failed_files(),
        "moves": summary.moved,
        "skipped": summary.skipped,
        "failed": summary.failed,
    })
}

/// The single JSON document printed for a run.
///
/// A dry run yields the preview document and a plain run the summary
/// document. When a preview was shown before organizing, both are nested as
/// `preview` and `summary`; a declined preview yields `preview` with
/// `cancelled: true`.
pub fn outcome_json(
    dir_path: &Path,
    plan: &Plan,
    outcome: &CliOutcome,
    preview_shown: bool,
) -> Value {
    match outcome {
        CliOutcome::Previewed(preview) => preview_json(dir_path, plan, preview),
        CliOutcome::Cancelled(preview) => json!({
            "preview": preview_json(dir_path, plan, preview),
            "cancelled": true,
        }),
        CliOutcome::Organized(summary) if preview_shown => json!({
            "preview": preview_json(dir_path, plan, &report(plan)),
            "summary": summary_json(dir_path, summary),
        }),
        CliOutcome::Organized(summary) => summary_json(dir_path, summary),
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(_) => println!("{}", value),
    }
}

fn print_categories(table: &CategoryTable, output: OutputMode) {
    match output {
        OutputMode::Text => {
            OutputFormatter::header("Categories (first match wins)");
            for category in table.categories() {
                OutputFormatter::plain(&format!(
                    "  {:<14} {}",
                    category.name(),
                    category.extensions().join(" ")
                ));
            }
            OutputFormatter::plain(&format!(
                "  {:<14} anything else",
                crate::file_category::OTHERS
            ));
        }
        OutputMode::Json => print_json(&json!(table)),
    }
}

/// Runs the application for parsed arguments and returns the exit code.
///
/// Exit codes: 0 on success, 1 on a fatal error, 2 when some files failed to
/// move.
pub fn run_from_args(args: &Args) -> ExitCode {
    let table = Arc::new(CategoryTable::standard());
    let output = args.output_mode();

    if args.list_categories {
        print_categories(&table, output);
        return ExitCode::SUCCESS;
    }

    let Some(raw_path) = args.path.as_deref() else {
        OutputFormatter::error("No directory given.");
        return ExitCode::FAILURE;
    };
    let dir_path = normalize_target_path(raw_path);
    let organizer = FileOrganizer::new(table);

    let result = if args.yes {
        run_cli_with(args.organize_command(), &dir_path, &organizer, output, &mut AutoConfirm)
    } else {
        run_cli_with(args.organize_command(), &dir_path, &organizer, output, &mut StdinConfirm)
    };

    match result {
        Ok(outcome) => ExitCode::from(outcome.exit_status()),
        Err(e) => {
            tracing::error!(error = %e, "Run aborted");
            OutputFormatter::error(&format!("Error: {}", e));
            ExitCode::FAILURE
        }
    }
}
