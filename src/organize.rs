//! Organization runs: scan, filter, group, then copy (or simulate copying)
//! every group into its own folder.
//!
//! A run is a single forward pass. The only fatal error is an unreadable
//! source directory, detected before anything is touched. Every later failure
//! is tied to one file, recorded in the [`OrganizeReport`], logged, and the
//! run moves on to the next file.

use crate::config::CompiledFilters;
use crate::file_organizer::{ActionKind, FileAction, FileOrganizer, OrganizeError, OrganizeResult};
use crate::grouping::{FileGroup, group_files_by_prefix};
use crate::logger::FileLogger;
use crate::normalize::normalize_group_name;
use crate::output::OutputFormatter;
use indicatif::ProgressBar;
use std::path::{Component, Path, PathBuf};

/// Options for a single organization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizeOptions {
    /// Directory whose files are organized.
    pub source: PathBuf,
    /// Where group folders are created. Defaults to `source`.
    pub destination: Option<PathBuf>,
    /// Only files with this extension take part.
    pub extension: Option<String>,
    /// Remove each original after it was copied successfully.
    pub delete_originals: bool,
    /// Normalize group keys before using them as folder names.
    pub normalize_names: bool,
    /// Report actions without touching the filesystem.
    pub dry_run: bool,
}

impl OrganizeOptions {
    /// Options that copy every file of `source` into folders inside `source`.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: None,
            extension: None,
            delete_originals: false,
            normalize_names: false,
            dry_run: false,
        }
    }

    /// The directory group folders are created in.
    pub fn target_root(&self) -> &Path {
        self.destination.as_deref().unwrap_or(&self.source)
    }

    /// The extension filter without a leading dot, or `None` when blank.
    pub fn extension_filter(&self) -> Option<&str> {
        self.extension
            .as_deref()
            .map(|ext| ext.trim().trim_start_matches('.'))
            .filter(|ext| !ext.is_empty())
    }

    /// Returns true if `path` passes the extension filter.
    pub fn matches_extension(&self, path: &Path) -> bool {
        match self.extension_filter() {
            None => true,
            Some(wanted) => path
                .extension()
                .is_some_and(|ext| ext.to_string_lossy().to_lowercase() == wanted.to_lowercase()),
        }
    }
}

/// A file that could not be copied or deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    /// The original file.
    pub path: PathBuf,
    /// The action that failed.
    pub action: ActionKind,
    /// Underlying error text.
    pub reason: String,
}

/// Outcome of one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummary {
    /// The discovered common prefix.
    pub key: String,
    /// The folder name actually used, normalized if requested.
    pub folder_name: String,
    /// Full path of the group folder.
    pub target_dir: PathBuf,
    /// Number of files in the group.
    pub members: usize,
    /// Number of files copied (or that would be copied).
    pub processed: usize,
}

/// Everything a caller needs to report on a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizeReport {
    /// True when nothing was actually changed.
    pub dry_run: bool,
    /// Files copied successfully (or that would be copied in a dry run).
    pub files_processed: usize,
    /// Per-group outcomes in discovery order.
    pub groups: Vec<GroupSummary>,
    /// Every copy and delete, performed or simulated, in execution order.
    pub actions: Vec<FileAction>,
    /// Per-file failures.
    pub failures: Vec<FileFailure>,
}

impl OrganizeReport {
    /// Number of groups discovered.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of originals deleted (or that would be deleted).
    pub fn files_deleted(&self) -> usize {
        self.actions
            .iter()
            .filter(|action| action.kind == ActionKind::Delete)
            .count()
    }

    /// Returns true if no file failed.
    pub fn is_complete_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Lists the source directory and keeps the files passing both the configured
/// filter rules and the extension filter.
///
/// # Errors
///
/// Returns `OrganizeError::InvalidBasePath` if the source directory cannot be read.
pub fn collect_files(
    options: &OrganizeOptions,
    filters: &CompiledFilters,
) -> OrganizeResult<Vec<PathBuf>> {
    let files = FileOrganizer::list_files(&options.source)?;
    Ok(files
        .into_iter()
        .filter(|path| filters.should_include(path) && options.matches_extension(path))
        .collect())
}

/// Organizes the files of `options.source` into prefix groups.
///
/// Group folders are created under the destination (or the source when no
/// destination is set). Files are copied, never moved; with
/// `delete_originals` each original is removed right after its own copy
/// succeeded. In dry-run mode nothing is created, copied or deleted, but every
/// intended action is still reported.
///
/// # Errors
///
/// Returns `OrganizeError::InvalidBasePath` if the source directory does not
/// exist or cannot be listed. Per-file failures are not errors; they are
/// collected in [`OrganizeReport::failures`].
///
/// # Examples
///
/// ```no_run
/// use prefixtidy::config::CompiledFilters;
/// use prefixtidy::logger::FileLogger;
/// use prefixtidy::organize::{OrganizeOptions, organize};
///
/// let mut options = OrganizeOptions::new("/path/to/downloads");
/// options.dry_run = true;
///
/// let report = organize(&options, &CompiledFilters::default(), &mut FileLogger::disabled())
///     .expect("source directory should exist");
/// println!("{} files in {} groups", report.files_processed, report.group_count());
/// ```
pub fn organize(
    options: &OrganizeOptions,
    filters: &CompiledFilters,
    logger: &mut FileLogger,
) -> OrganizeResult<OrganizeReport> {
    logger.log(
        &format!(
            "START source=\"{}\" destination={:?} extension={:?} delete={} normalize={} dry_run={}",
            options.source.display(),
            options.destination,
            options.extension_filter(),
            options.delete_originals,
            options.normalize_names,
            options.dry_run
        ),
        false,
    );

    let files =
        collect_files(options, filters).inspect_err(|e| logger.log(&e.to_string(), false))?;
    let groups = group_files_by_prefix(&files);

    let mut report = OrganizeReport {
        dry_run: options.dry_run,
        ..Default::default()
    };

    let progress = OutputFormatter::create_progress_bar(files.len() as u64);
    for group in &groups {
        let summary = process_group(group, options, logger, &progress, &mut report);
        report.groups.push(summary);
    }
    progress.finish_and_clear();

    logger.log(
        &format!(
            "DONE {} file(s) processed in {} group(s), {} failure(s){}",
            report.files_processed,
            report.group_count(),
            report.failures.len(),
            if options.dry_run { " [dry run]" } else { "" }
        ),
        false,
    );

    Ok(report)
}

/// Picks the folder name for a group key.
///
/// Falls back to the raw key when normalization leaves nothing usable.
fn folder_name_for(
    key: &str,
    options: &OrganizeOptions,
    logger: &mut FileLogger,
    progress: &ProgressBar,
) -> String {
    if !options.normalize_names {
        return key.to_string();
    }

    let normalized = normalize_group_name(key);
    if normalized.is_empty() {
        progress.suspend(|| {
            logger.log(
                &format!("Group name \"{}\" normalizes to nothing, keeping it as is", key),
                true,
            )
        });
        key.to_string()
    } else {
        normalized
    }
}

/// Returns true if `name` is exactly one ordinary path component, so joining it
/// stays inside the target directory. Rules out `.`, `..` and empty names.
fn is_usable_folder_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

fn record_failure(
    report: &mut OrganizeReport,
    logger: &mut FileLogger,
    progress: &ProgressBar,
    path: &Path,
    action: ActionKind,
    error: &OrganizeError,
) {
    let reason = error.to_string();
    progress.suspend(|| OutputFormatter::error(&format!("  {}", reason)));
    logger.log(&format!("FAILED {} \"{}\": {}", action, path.display(), reason), false);
    report.failures.push(FileFailure {
        path: path.to_path_buf(),
        action,
        reason,
    });
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn process_group(
    group: &FileGroup,
    options: &OrganizeOptions,
    logger: &mut FileLogger,
    progress: &ProgressBar,
    report: &mut OrganizeReport,
) -> GroupSummary {
    let folder_name = folder_name_for(&group.key, options, logger, progress);
    let target_dir = options.target_root().join(&folder_name);
    let mut summary = GroupSummary {
        key: group.key.clone(),
        folder_name,
        target_dir,
        members: group.len(),
        processed: 0,
    };

    progress.suspend(|| {
        OutputFormatter::header(&format!(
            "{}/ ({} {})",
            summary.folder_name,
            group.len(),
            if group.len() == 1 { "file" } else { "files" }
        ))
    });

    if !is_usable_folder_name(&summary.folder_name) {
        let error = OrganizeError::UnusableGroupName {
            name: summary.folder_name.clone(),
        };
        for file in &group.members {
            record_failure(report, logger, progress, file, ActionKind::Copy, &error);
            progress.inc(1);
        }
        return summary;
    }

    if options.dry_run {
        for file in &group.members {
            simulate_file(file, &summary.target_dir, options, progress, report);
            summary.processed += 1;
            progress.inc(1);
        }
        return summary;
    }

    if let Err(e) = FileOrganizer::ensure_group_dir(&summary.target_dir) {
        for file in &group.members {
            record_failure(report, logger, progress, file, ActionKind::Copy, &e);
            progress.inc(1);
        }
        return summary;
    }

    for file in &group.members {
        if process_file(file, &summary.target_dir, options, logger, progress, report) {
            summary.processed += 1;
        }
        progress.inc(1);
    }

    summary
}

fn simulate_file(
    file: &Path,
    target_dir: &Path,
    options: &OrganizeOptions,
    progress: &ProgressBar,
    report: &mut OrganizeReport,
) {
    let name = display_name(file);
    let destination = target_dir.join(&name);

    progress.suspend(|| {
        OutputFormatter::dry_run_notice(&format!(
            "  → Would copy {} to {}",
            name,
            target_dir.display()
        ))
    });
    report.actions.push(FileAction {
        kind: ActionKind::Copy,
        source: file.to_path_buf(),
        destination: destination.clone(),
        performed: false,
    });
    report.files_processed += 1;

    if options.delete_originals {
        progress.suspend(|| OutputFormatter::dry_run_notice(&format!("  → Would delete {}", name)));
        report.actions.push(FileAction {
            kind: ActionKind::Delete,
            source: file.to_path_buf(),
            destination,
            performed: false,
        });
    }
}

/// Copies one file and, if requested, deletes its original.
///
/// Returns true if the copy succeeded.
fn process_file(
    file: &Path,
    target_dir: &Path,
    options: &OrganizeOptions,
    logger: &mut FileLogger,
    progress: &ProgressBar,
    report: &mut OrganizeReport,
) -> bool {
    let name = display_name(file);

    let copied = match FileOrganizer::copy_to_group(file, target_dir) {
        Ok(action) => action,
        Err(e) => {
            record_failure(report, logger, progress, file, ActionKind::Copy, &e);
            return false;
        }
    };
    progress.suspend(|| {
        OutputFormatter::success(&format!("  Copied {} to {}", name, target_dir.display()))
    });
    let copied_to = copied.destination.clone();
    report.actions.push(copied);
    report.files_processed += 1;

    if options.delete_originals {
        match FileOrganizer::remove_original(file, &copied_to) {
            Ok(action) => {
                progress.suspend(|| OutputFormatter::success(&format!("  Deleted original {}", name)));
                report.actions.push(action);
            }
            Err(e) => record_failure(report, logger, progress, file, ActionKind::Delete, &e),
        }
    }

    true
}
