//! prefixtidy - group files sharing a name prefix into sub-folders
//!
//! This library discovers groups of files whose names start the same way,
//! normalizes group names into folder-friendly form, and copies (optionally
//! moving) each group into its own folder, with dry-run support and a
//! best-effort run log.

pub mod cli;
pub mod config;
pub mod file_organizer;
pub mod grouping;
pub mod logger;
pub mod normalize;
pub mod organize;
pub mod output;
pub mod prefix;

pub use config::{CompiledFilters, Config, ConfigError, FilterRules};
pub use file_organizer::{ActionKind, FileAction, FileOrganizer, OrganizeError, OrganizeResult};
pub use grouping::{FileGroup, group_files_by_prefix};
pub use logger::FileLogger;
pub use normalize::normalize_group_name;
pub use organize::{OrganizeOptions, OrganizeReport, organize};
pub use prefix::common_prefix;

pub use cli::{CliArgs, run_cli};
