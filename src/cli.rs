//! Command-line interface module for prefixtidy.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing
//! - Merging arguments with the configuration file
//! - Prompting for a source directory and for confirmation after a dry run
//! - Printing progress and the final summary

use crate::config::{CompiledFilters, Config, OrganizeDefaults};
use crate::logger::FileLogger;
use crate::organize::{OrganizeOptions, OrganizeReport, organize};
use crate::output::OutputFormatter;
use clap::Parser;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Parser, Debug, Clone, Default)]
#[command(
    author,
    version,
    name = "prefixtidy",
    about = "Group files sharing a name prefix into sub-folders"
)]
pub struct CliArgs {
    /// Source directory. Prompted for when omitted
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub path: Option<PathBuf>,

    /// Create group folders here instead of in the source directory
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub destination: Option<PathBuf>,

    /// Only organize files with this extension
    #[arg(short, long)]
    pub extension: Option<String>,

    /// Delete each original after it was copied
    #[arg(short = 'x', long)]
    pub delete: bool,

    /// Normalize folder names (lowercase, dashes, no special characters)
    #[arg(short, long)]
    pub normalize: bool,

    /// Only print what would be done
    #[arg(short = 'p', long)]
    pub dry_run: bool,

    /// Use this configuration file
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Append the run log to this file
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Do not ask for confirmation after a dry run
    #[arg(short, long)]
    pub yes: bool,

    /// Print verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Args for organizing `path` with everything else left at defaults.
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Default::default()
        }
    }
}

/// Runs the CLI application with the given arguments.
///
/// Loads configuration, resolves the source directory, organizes it, and
/// prints a summary. After a dry run on an interactive terminal the user is
/// asked whether to apply the changes, unless `--yes` was given.
///
/// Returns the report of the last run performed.
///
/// # Examples
///
/// ```no_run
/// use prefixtidy::cli::{CliArgs, run_cli};
///
/// let mut args = CliArgs::for_path("/path/to/directory");
/// args.dry_run = true;
/// match run_cli(args) {
///     Ok(report) => println!("{} files", report.files_processed),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(args: CliArgs) -> Result<OrganizeReport, String> {
    let config = Config::load(args.config.as_deref())
        .map_err(|e| format!("Error loading configuration: {}", e))?;
    let filters = config
        .filters
        .compile()
        .map_err(|e| format!("Error compiling filters: {}", e))?;

    let source = match &args.path {
        Some(path) if path.is_dir() => path.clone(),
        Some(path) => {
            return Err(format!(
                "Source directory does not exist: {}",
                path.display()
            ));
        }
        None => prompt_for_directory(&mut io::stdin().lock())?,
    };

    let mut options = build_options(&args, &config.organize, source);
    let log_path = args.log_file.clone().or(config.organize.log_file.clone());
    let mut logger = FileLogger::open_or_default(log_path.as_deref());

    if args.verbose {
        print_options(&options, &logger);
    }

    let mut report = run_once(&options, &filters, &mut logger)?;

    if report.dry_run
        && report.files_processed > 0
        && !args.yes
        && io::stdin().is_terminal()
        && confirm(&mut io::stdin().lock(), "Apply these changes?")
    {
        options.dry_run = false;
        report = run_once(&options, &filters, &mut logger)?;
    }

    Ok(report)
}

/// Combines command-line arguments with configuration defaults.
///
/// Options given on the command line replace configured ones; flags are
/// enabled if either source enables them.
pub fn build_options(
    args: &CliArgs,
    defaults: &OrganizeDefaults,
    source: PathBuf,
) -> OrganizeOptions {
    OrganizeOptions {
        source,
        destination: args.destination.clone().or(defaults.destination.clone()),
        extension: args
            .extension
            .clone()
            .or(defaults.extension.clone())
            .filter(|ext| !ext.trim().is_empty()),
        delete_originals: args.delete || defaults.delete_originals,
        normalize_names: args.normalize || defaults.normalize_names,
        dry_run: args.dry_run || defaults.dry_run,
    }
}

fn run_once(
    options: &OrganizeOptions,
    filters: &CompiledFilters,
    logger: &mut FileLogger,
) -> Result<OrganizeReport, String> {
    if options.dry_run {
        OutputFormatter::info(&format!(
            "DRY RUN: Analyzing contents of: {}",
            options.source.display()
        ));
    } else {
        OutputFormatter::info(&format!("Organizing contents of: {}", options.source.display()));
    }

    let report = organize(options, filters, logger).map_err(|e| e.to_string())?;
    print_report(&report, options);
    Ok(report)
}

fn print_options(options: &OrganizeOptions, logger: &FileLogger) {
    OutputFormatter::plain(&format!("  source:      {}", options.source.display()));
    OutputFormatter::plain(&format!(
        "  destination: {}",
        options.target_root().display()
    ));
    OutputFormatter::plain(&format!(
        "  extension:   {}",
        options.extension_filter().unwrap_or("(all)")
    ));
    OutputFormatter::plain(&format!("  delete:      {}", options.delete_originals));
    OutputFormatter::plain(&format!("  normalize:   {}", options.normalize_names));
    OutputFormatter::plain(&format!("  dry run:     {}", options.dry_run));
    if let Some(path) = logger.path() {
        OutputFormatter::plain(&format!("  log file:    {}", path.display()));
    }
}

fn print_report(report: &OrganizeReport, options: &OrganizeOptions) {
    if report.groups.is_empty() {
        OutputFormatter::plain("No files found to organize.");
        return;
    }

    OutputFormatter::summary_table(report);

    if !report.failures.is_empty() {
        OutputFormatter::header("FAILURES");
        for failure in &report.failures {
            OutputFormatter::error(&format!(
                "{} ({}): {}",
                failure.path.display(),
                failure.action,
                failure.reason
            ));
        }
    }

    let summary = format!(
        "{} file(s) in {} group(s)",
        report.files_processed,
        report.group_count()
    );
    if report.dry_run {
        OutputFormatter::dry_run_notice(&format!(
            "{} would be organized. No files were modified.",
            summary
        ));
        if !options.delete_originals && report.files_processed > 0 {
            OutputFormatter::plain("Run again without --dry-run to copy the files.");
        }
    } else if report.is_complete_success() {
        OutputFormatter::success(&format!("Organization complete: {}", summary));
    } else {
        OutputFormatter::warning(&format!(
            "Organization finished with {} failure(s): {}",
            report.failures.len(),
            summary
        ));
    }
}

/// Reads a source directory from `input`, asking again until an existing
/// directory is entered.
///
/// An empty line or end of input aborts.
pub fn prompt_for_directory<R: BufRead>(input: &mut R) -> Result<PathBuf, String> {
    loop {
        print!("Source directory: ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .map_err(|e| format!("Failed to read input: {}", e))?;
        let entered = line.trim().trim_matches('"');
        if read == 0 || entered.is_empty() {
            return Err("No source directory given".to_string());
        }

        let path = PathBuf::from(entered);
        if path.is_dir() {
            return Ok(path);
        }
        OutputFormatter::error(&format!("Directory does not exist: {}", path.display()));
    }
}

/// Asks a yes/no question on `input`. Anything but `y` or `yes` means no.
pub fn confirm<R: BufRead>(input: &mut R, question: &str) -> bool {
    print!("{} [y/N] ", question);
    let _ = io::stdout().flush();

    let mut line = String::new();
    if input.read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
}
