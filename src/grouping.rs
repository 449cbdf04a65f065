//! Incremental prefix clustering of file names.
//!
//! Files are assigned to groups in the order they are seen. A file joins the
//! first existing group whose key shares at least [`MIN_PREFIX_LEN`]
//! characters with the file's base name, and the group's key shrinks to that
//! shared prefix when needed. Files that match nothing start a new group keyed
//! by their full base name.

use crate::prefix::common_prefix;
use std::path::{Path, PathBuf};

/// Minimum number of shared characters for two names to be grouped.
pub const MIN_PREFIX_LEN: usize = 3;

/// A cluster of files sharing a common name prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup {
    /// The prefix shared by every member (or the base name of a singleton).
    pub key: String,
    /// Member paths in discovery order.
    pub members: Vec<PathBuf>,
}

impl FileGroup {
    fn new(key: String, first: PathBuf) -> Self {
        Self {
            key,
            members: vec![first],
        }
    }

    /// Returns the number of files in this group.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the group has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Returns the file name of `path` without its extension.
///
/// # Examples
///
/// ```
/// use prefixtidy::grouping::base_name;
/// use std::path::Path;
///
/// assert_eq!(base_name(Path::new("/tmp/data1.csv")), "data1");
/// assert_eq!(base_name(Path::new("archive.tar.gz")), "archive.tar");
/// assert_eq!(base_name(Path::new("README")), "README");
/// ```
pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Groups file paths by shared base-name prefix.
///
/// The returned groups are ordered by when each group was first created, and
/// members within a group keep their input order. Every input path appears in
/// exactly one group.
///
/// Groups are tracked by position rather than by key, so a group can be
/// re-keyed in place when a later file shortens the shared prefix.
///
/// # Examples
///
/// ```
/// use prefixtidy::grouping::group_files_by_prefix;
/// use std::path::PathBuf;
///
/// let files: Vec<PathBuf> = ["data1.csv", "data2.pdf", "notes.txt"]
///     .iter()
///     .map(PathBuf::from)
///     .collect();
///
/// let groups = group_files_by_prefix(&files);
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].key, "data");
/// assert_eq!(groups[1].key, "notes");
/// ```
pub fn group_files_by_prefix<P: AsRef<Path>>(paths: &[P]) -> Vec<FileGroup> {
    let mut groups: Vec<FileGroup> = Vec::new();

    for path in paths {
        let path = path.as_ref();
        let name = base_name(path);

        let matched = groups.iter().enumerate().find_map(|(index, group)| {
            let prefix = common_prefix(&group.key, &name);
            (prefix.chars().count() >= MIN_PREFIX_LEN).then_some((index, prefix))
        });

        match matched {
            Some((index, prefix)) => {
                let group = &mut groups[index];
                // The shared prefix can only shrink the key, never extend it.
                if prefix.len() < group.key.len() {
                    group.key = prefix;
                }
                group.members.push(path.to_path_buf());
            }
            None => groups.push(FileGroup::new(name, path.to_path_buf())),
        }
    }

    groups
}
