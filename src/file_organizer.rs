/// Filesystem primitives for copying files into group folders.
///
/// This module wraps directory creation, file copying and file removal so
/// that every failure carries the paths involved. The orchestrator in
/// [`crate::organize`] decides which of these to call and isolates their
/// failures per file.
use std::fs;
use std::path::{Path, PathBuf};

/// The kind of filesystem action taken (or simulated) for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// The file is copied into its group folder.
    Copy,
    /// The original file is removed after a successful copy.
    Delete,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionKind::Copy => write!(f, "copy"),
            ActionKind::Delete => write!(f, "delete"),
        }
    }
}

/// Represents a single file action during an organization run.
///
/// In dry-run mode `performed` is false and the action only describes what
/// would have happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAction {
    /// What was done to the file.
    pub kind: ActionKind,
    /// The original path of the file.
    pub source: PathBuf,
    /// The copy destination. For deletions this is the copy that replaced the original.
    pub destination: PathBuf,
    /// False when the action was only simulated.
    pub performed: bool,
}

/// Errors that can occur during file organization operations.
#[derive(Debug)]
pub enum OrganizeError {
    /// Failed to create a group directory.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to copy a file into its group directory.
    FileCopyFailed {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
    /// The group key does not name a folder inside the target directory.
    UnusableGroupName { name: String },
    /// Failed to remove an original file after copying it.
    FileDeleteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The source directory path is invalid, missing or unreadable.
    InvalidBasePath {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::FileCopyFailed {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to copy {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
            Self::UnusableGroupName { name } => {
                write!(f, "Group name \"{}\" cannot be used as a folder name", name)
            }
            Self::FileDeleteFailed { path, source } => {
                write!(f, "Failed to delete {}: {}", path.display(), source)
            }
            Self::InvalidBasePath { path, source } => {
                write!(f, "Invalid base path {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for OrganizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DirectoryCreationFailed { source, .. }
            | Self::FileDeleteFailed { source, .. }
            | Self::InvalidBasePath { source, .. } => Some(source),
            Self::FileCopyFailed { source_error, .. } => Some(source_error),
            Self::UnusableGroupName { .. } => None,
        }
    }
}

/// Result type for file organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Performs the filesystem side of organizing a group.
pub struct FileOrganizer;

impl FileOrganizer {
    /// Lists the regular files directly inside `base_path`, sorted by name.
    ///
    /// Subdirectories and their contents are ignored.
    ///
    /// # Errors
    ///
    /// Returns `OrganizeError::InvalidBasePath` if the directory does not exist
    /// or cannot be read.
    pub fn list_files(base_path: &Path) -> OrganizeResult<Vec<PathBuf>> {
        let entries = fs::read_dir(base_path).map_err(|e| OrganizeError::InvalidBasePath {
            path: base_path.to_path_buf(),
            source: e,
        })?;

        let mut files: Vec<PathBuf> = entries
            .flatten()
            .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
            .map(|entry| entry.path())
            .collect();
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        Ok(files)
    }

    /// Creates the group directory if it does not exist yet.
    ///
    /// Missing parent directories (such as a new destination root) are created too.
    pub fn ensure_group_dir(group_dir: &Path) -> OrganizeResult<()> {
        fs::create_dir_all(group_dir).map_err(|e| OrganizeError::DirectoryCreationFailed {
            path: group_dir.to_path_buf(),
            source: e,
        })
    }

    /// Returns the path a file will have once copied into `group_dir`.
    pub fn destination_for(group_dir: &Path, file_path: &Path) -> OrganizeResult<PathBuf> {
        let file_name = file_path
            .file_name()
            .ok_or_else(|| OrganizeError::FileCopyFailed {
                source: file_path.to_path_buf(),
                destination: group_dir.to_path_buf(),
                source_error: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "file has no name component",
                ),
            })?;
        Ok(group_dir.join(file_name))
    }

    /// Copies a file into the group directory, overwriting any file with the same name.
    ///
    /// The group directory must already exist. Copying a file onto itself is
    /// refused, since it would truncate the file.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use prefixtidy::file_organizer::FileOrganizer;
    /// use std::path::Path;
    ///
    /// let result = FileOrganizer::copy_to_group(
    ///     Path::new("/path/to/base/data1.csv"),
    ///     Path::new("/path/to/base/data"),
    /// );
    ///
    /// match result {
    ///     Ok(action) => println!("Copied to {}", action.destination.display()),
    ///     Err(e) => eprintln!("Copy failed: {}", e),
    /// }
    /// ```
    pub fn copy_to_group(file_path: &Path, group_dir: &Path) -> OrganizeResult<FileAction> {
        let destination = Self::destination_for(group_dir, file_path)?;

        if Self::is_same_file(file_path, &destination) {
            return Err(OrganizeError::FileCopyFailed {
                source: file_path.to_path_buf(),
                destination,
                source_error: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "source and destination are the same file",
                ),
            });
        }

        fs::copy(file_path, &destination).map_err(|e| OrganizeError::FileCopyFailed {
            source: file_path.to_path_buf(),
            destination: destination.clone(),
            source_error: e,
        })?;

        Ok(FileAction {
            kind: ActionKind::Copy,
            source: file_path.to_path_buf(),
            destination,
            performed: true,
        })
    }

    /// Returns true if both paths exist and resolve to the same location.
    fn is_same_file(a: &Path, b: &Path) -> bool {
        match (fs::canonicalize(a), fs::canonicalize(b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    /// Removes an original file that has already been copied to `copied_to`.
    pub fn remove_original(file_path: &Path, copied_to: &Path) -> OrganizeResult<FileAction> {
        fs::remove_file(file_path).map_err(|e| OrganizeError::FileDeleteFailed {
            path: file_path.to_path_buf(),
            source: e,
        })?;

        Ok(FileAction {
            kind: ActionKind::Delete,
            source: file_path.to_path_buf(),
            destination: copied_to.to_path_buf(),
            performed: true,
        })
    }
}
