use prefixtidy::cli::{CliArgs, run_cli};
use prefixtidy::{
    ActionKind, CompiledFilters, FileLogger, OrganizeOptions, group_files_by_prefix,
    normalize_group_name, organize,
};
/// Integration tests for prefixtidy
///
/// These tests run complete organization passes against temporary
/// directories.
///
/// Test categories:
/// 1. Grouping and copying
/// 2. Dry-run mode verification
/// 3. Options: destination, extension filter, deletion, normalization
/// 4. Configuration files
/// 5. Failure isolation and error scenarios
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

/// A temporary workspace holding a source directory plus room for a
/// destination, a config file and a log file outside of it.
struct TestFixture {
    temp_dir: TempDir,
}

impl TestFixture {
    /// Create a new fixture with an empty source directory.
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir(temp_dir.path().join("source")).expect("Failed to create source dir");
        TestFixture { temp_dir }
    }

    /// Path of the source directory.
    fn path(&self) -> PathBuf {
        self.temp_dir.path().join("source")
    }

    /// Path outside the source directory.
    fn outside(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Create a file with content in the source directory.
    fn create_file(&self, name: &str, content: &[u8]) {
        let mut file = File::create(self.path().join(name)).expect("Failed to create file");
        file.write_all(content)
            .expect("Failed to write file content");
    }

    /// Create several files whose content is their own name.
    fn create_files(&self, names: &[&str]) {
        for name in names {
            self.create_file(name, name.as_bytes());
        }
    }

    /// Write an empty config file outside the source and return args using it,
    /// so no user configuration leaks into the test.
    fn args(&self) -> CliArgs {
        let config_path = self.outside("config.toml");
        if !config_path.exists() {
            fs::write(&config_path, "").expect("Failed to write config");
        }
        CliArgs {
            path: Some(self.path()),
            config: Some(config_path),
            log_file: Some(self.outside("prefixtidy.log")),
            yes: true,
            ..Default::default()
        }
    }

    fn write_config(&self, content: &str) {
        fs::write(self.outside("config.toml"), content).expect("Failed to write config");
    }

    fn assert_dir_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(path.is_dir(), "Directory should exist: {}", path.display());
    }

    fn assert_file_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(path.is_file(), "File should exist: {}", path.display());
    }

    fn assert_file_not_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(!path.exists(), "File should not exist: {}", path.display());
    }

    fn read(&self, rel_path: &str) -> Vec<u8> {
        fs::read(self.path().join(rel_path)).expect("Failed to read file")
    }

    /// Count directories in the source directory (non-recursive).
    fn count_dirs(&self) -> usize {
        fs::read_dir(self.path())
            .expect("Failed to read directory")
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .count()
    }

    /// List all files below the source directory recursively.
    fn list_files_recursive(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        Self::walk_dir(&self.path(), &mut files);
        files.sort();
        files
    }

    fn walk_dir(dir: &Path, files: &mut Vec<PathBuf>) {
        if let Ok(entries) = fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_file() {
                    files.push(path);
                } else if path.is_dir() {
                    Self::walk_dir(&path, files);
                }
            }
        }
    }
}

// ============================================================================
// Test Suite 1: Grouping and copying
// ============================================================================

#[test]
fn test_organize_empty_directory() {
    let fixture = TestFixture::new();

    let report = run_cli(fixture.args()).expect("Should succeed on empty directory");

    assert_eq!(report.files_processed, 0);
    assert_eq!(report.group_count(), 0);
    assert_eq!(fixture.count_dirs(), 0);
}

#[test]
fn test_mixed_prefixes_end_to_end() {
    let fixture = TestFixture::new();
    fixture.create_file("data1.csv", b"a,b\n1,2\n");
    fixture.create_file("data2.pdf", b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
    fixture.create_file("report_final_2024 (Q1).docx", b"first quarter");
    fixture.create_file("report_final_2024 (Q2).docx", b"second quarter");

    let report = run_cli(fixture.args()).expect("Organize failed");

    assert_eq!(report.files_processed, 4);
    assert_eq!(report.group_count(), 2);
    assert_eq!(fixture.count_dirs(), 2);

    fixture.assert_dir_exists("data");
    fixture.assert_dir_exists("report_final_2024 (Q");
    for (folder, name) in [
        ("data", "data1.csv"),
        ("data", "data2.pdf"),
        ("report_final_2024 (Q", "report_final_2024 (Q1).docx"),
        ("report_final_2024 (Q", "report_final_2024 (Q2).docx"),
    ] {
        let copy = format!("{}/{}", folder, name);
        fixture.assert_file_exists(&copy);
        fixture.assert_file_exists(name);
        assert_eq!(fixture.read(&copy), fixture.read(name), "copy differs: {}", copy);
    }
}

#[test]
fn test_singletons_get_their_own_folder() {
    let fixture = TestFixture::new();
    fixture.create_files(&["intro.mp4", "trailer.mp4", "ending.mp4"]);

    let report = run_cli(fixture.args()).expect("Organize failed");

    assert_eq!(report.group_count(), 3);
    fixture.assert_file_exists("intro/intro.mp4");
    fixture.assert_file_exists("trailer/trailer.mp4");
    fixture.assert_file_exists("ending/ending.mp4");
}

#[test]
fn test_episode_series() {
    let fixture = TestFixture::new();
    fixture.create_files(&["video-ep01.mp4", "video-ep02.mp4", "video-ep03.mp4"]);

    let report = run_cli(fixture.args()).expect("Organize failed");

    assert_eq!(report.group_count(), 1);
    assert_eq!(report.groups[0].key, "video-ep0");
    assert_eq!(report.groups[0].processed, 3);
    fixture.assert_file_exists("video-ep0/video-ep03.mp4");
}

#[test]
fn test_subdirectories_are_not_traversed() {
    let fixture = TestFixture::new();
    fixture.create_files(&["notes-a.txt", "notes-b.txt"]);
    fs::create_dir(fixture.path().join("nested")).expect("Failed to create subdir");
    fs::write(fixture.path().join("nested").join("notes-c.txt"), "c").expect("write failed");

    let report = run_cli(fixture.args()).expect("Organize failed");

    assert_eq!(report.files_processed, 2);
    fixture.assert_file_not_exists("notes/notes-c.txt");
    fixture.assert_file_exists("nested/notes-c.txt");
}

#[test]
fn test_second_run_overwrites_copies() {
    let fixture = TestFixture::new();
    fixture.create_files(&["log-1.txt", "log-2.txt"]);

    run_cli(fixture.args()).expect("First run failed");
    fixture.create_file("log-1.txt", b"updated");
    let report = run_cli(fixture.args()).expect("Second run failed");

    assert!(report.is_complete_success());
    assert_eq!(fixture.read("log/log-1.txt"), b"updated");
}

// ============================================================================
// Test Suite 2: Dry-run mode
// ============================================================================

#[test]
fn test_dry_run_makes_no_changes() {
    let fixture = TestFixture::new();
    fixture.create_files(&["data1.csv", "data2.pdf", "summary.txt"]);
    let before = fixture.list_files_recursive();

    let mut args = fixture.args();
    args.dry_run = true;
    args.delete = true;
    args.destination = Some(fixture.outside("dest"));
    let report = run_cli(args).expect("Dry run failed");

    assert!(report.dry_run);
    assert_eq!(report.files_processed, 3);
    assert_eq!(fixture.list_files_recursive(), before);
    assert_eq!(fixture.count_dirs(), 0);
    assert!(!fixture.outside("dest").exists());

    let copies = report
        .actions
        .iter()
        .filter(|a| a.kind == ActionKind::Copy)
        .count();
    assert_eq!(copies, 3);
    assert_eq!(report.files_deleted(), 3);
    assert!(report.actions.iter().all(|a| !a.performed));
}

#[test]
fn test_dry_run_reports_target_paths() {
    let fixture = TestFixture::new();
    fixture.create_files(&["Photo Trip 1.jpg", "Photo Trip 2.jpg"]);

    let mut args = fixture.args();
    args.dry_run = true;
    args.normalize = true;
    let report = run_cli(args).expect("Dry run failed");

    let expected = fixture.path().join("photo-trip").join("Photo Trip 1.jpg");
    assert_eq!(report.actions[0].destination, expected);
    assert!(!expected.exists());
}

// ============================================================================
// Test Suite 3: Options
// ============================================================================

#[test]
fn test_delete_originals() {
    let fixture = TestFixture::new();
    fixture.create_files(&["scan_001.png", "scan_002.png"]);

    let mut args = fixture.args();
    args.delete = true;
    let report = run_cli(args).expect("Organize failed");

    assert_eq!(report.files_deleted(), 2);
    fixture.assert_file_not_exists("scan_001.png");
    fixture.assert_file_not_exists("scan_002.png");
    fixture.assert_file_exists("scan_00/scan_001.png");
    fixture.assert_file_exists("scan_00/scan_002.png");
}

#[test]
fn test_destination_directory() {
    let fixture = TestFixture::new();
    fixture.create_files(&["track-01.mp3", "track-02.mp3"]);
    let destination = fixture.outside("music");

    let mut args = fixture.args();
    args.destination = Some(destination.clone());
    let report = run_cli(args).expect("Organize failed");

    assert_eq!(report.files_processed, 2);
    assert!(destination.join("track-0").join("track-01.mp3").is_file());
    assert_eq!(fixture.count_dirs(), 0);
    fixture.assert_file_exists("track-01.mp3");
}

#[test]
fn test_extension_filter() {
    let fixture = TestFixture::new();
    fixture.create_files(&["invoice-jan.PDF", "invoice-feb.pdf", "invoice-mar.txt"]);

    let mut args = fixture.args();
    args.extension = Some(".pdf".to_string());
    let report = run_cli(args).expect("Organize failed");

    assert_eq!(report.files_processed, 2);
    fixture.assert_file_exists("invoice/invoice-jan.PDF");
    fixture.assert_file_exists("invoice/invoice-feb.pdf");
    fixture.assert_file_not_exists("invoice/invoice-mar.txt");
}

#[test]
fn test_normalized_folder_names() {
    let fixture = TestFixture::new();
    fixture.create_files(&["Wait For It??? part1.txt", "Wait For It??? part2.txt"]);

    let mut args = fixture.args();
    args.normalize = true;
    let report = run_cli(args).expect("Organize failed");

    assert_eq!(report.groups[0].key, "Wait For It??? part");
    assert_eq!(report.groups[0].folder_name, "wait-for-it-part");
    fixture.assert_file_exists("wait-for-it-part/Wait For It??? part1.txt");
}

// ============================================================================
// Test Suite 4: Configuration
// ============================================================================

#[test]
fn test_config_file_defaults() {
    let fixture = TestFixture::new();
    fixture.create_files(&["Big Project A.txt", "Big Project B.txt", "big.log"]);
    fixture.write_config(
        r#"
        [organize]
        normalize_names = true
        extension = "txt"
        "#,
    );

    let report = run_cli(fixture.args()).expect("Organize failed");

    assert_eq!(report.files_processed, 2);
    fixture.assert_file_exists("big-project/Big Project A.txt");
    fixture.assert_file_not_exists("big/big.log");
}

#[test]
fn test_config_exclude_rules() {
    let fixture = TestFixture::new();
    fixture.create_files(&["keep-1.txt", "keep-2.txt", ".DS_Store", "temp.tmp"]);
    fixture.write_config(
        r#"
        [filters]
        enable_hidden_files = false

        [filters.exclude]
        extensions = ["tmp"]
        "#,
    );

    let report = run_cli(fixture.args()).expect("Organize failed");

    assert_eq!(report.files_processed, 2);
    assert_eq!(report.group_count(), 1);
    fixture.assert_file_exists("keep/keep-1.txt");
}

#[test]
fn test_invalid_config_is_an_error() {
    let fixture = TestFixture::new();
    fixture.create_files(&["a.txt"]);
    fixture.write_config("[filters.exclude]\nregex = [\"[unclosed(\"]\n");

    let result = run_cli(fixture.args());

    assert!(result.is_err());
    assert_eq!(fixture.count_dirs(), 0);
}

// ============================================================================
// Test Suite 5: Failures and errors
// ============================================================================

#[test]
fn test_missing_source_directory() {
    let fixture = TestFixture::new();
    let mut args = fixture.args();
    args.path = Some(fixture.outside("does-not-exist"));

    assert!(run_cli(args).is_err());
}

#[test]
fn test_copy_failure_does_not_stop_other_files() {
    let fixture = TestFixture::new();
    fixture.create_files(&["chapter-1.md", "chapter-2.md", "chapter-3.md", "index.md"]);
    // Blocks exactly one copy: a directory already sits at its destination
    fs::create_dir_all(fixture.path().join("chapter").join("chapter-2.md"))
        .expect("Failed to create blocker");

    let mut args = fixture.args();
    args.delete = true;
    let report = run_cli(args).expect("Organize should not abort");

    assert_eq!(report.files_processed, 3);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].action, ActionKind::Copy);
    fixture.assert_file_exists("chapter-2.md");
    fixture.assert_file_not_exists("chapter-1.md");
    fixture.assert_file_exists("chapter/chapter-1.md");
    fixture.assert_file_exists("chapter/chapter-3.md");
    fixture.assert_file_exists("index/index.md");
}

#[test]
fn test_dot_named_files_stay_in_place() {
    let fixture = TestFixture::new();
    fixture.create_file("..txt", b"precious data");
    fixture.create_file("...", b"more data");
    fixture.create_files(&["song-a.mp3", "song-b.mp3"]);

    let mut args = fixture.args();
    args.delete = true;
    let report = run_cli(args).expect("Organize should not abort");

    assert_eq!(report.files_processed, 2);
    assert_eq!(report.failures.len(), 2);
    assert_eq!(fixture.read("..txt"), b"precious data");
    assert_eq!(fixture.read("..."), b"more data");
    assert!(!fixture.outside("...").exists());
    fixture.assert_file_exists("song/song-a.mp3");
    fixture.assert_file_not_exists("song-a.mp3");
}

#[test]
fn test_run_is_appended_to_log() {
    let fixture = TestFixture::new();
    fixture.create_files(&["a-one.txt"]);

    run_cli(fixture.args()).expect("First run failed");
    run_cli(fixture.args()).expect("Second run failed");

    let log = fs::read_to_string(fixture.outside("prefixtidy.log")).expect("Log missing");
    assert_eq!(log.matches("START").count(), 2);
    assert_eq!(log.matches("DONE").count(), 2);
}

#[test]
fn test_library_api_matches_cli() {
    let fixture = TestFixture::new();
    fixture.create_files(&["Final Version! a.txt", "Final Version! b.txt"]);

    let mut files: Vec<PathBuf> = fs::read_dir(fixture.path())
        .expect("Failed to read dir")
        .map(|e| e.expect("bad entry").path())
        .collect();
    files.sort();
    let groups = group_files_by_prefix(&files);
    assert_eq!(groups.len(), 1);
    assert_eq!(normalize_group_name(&groups[0].key), "final-version!");

    let mut options = OrganizeOptions::new(fixture.path());
    options.normalize_names = true;
    let report = organize(&options, &CompiledFilters::default(), &mut FileLogger::disabled())
        .expect("Organize failed");
    assert_eq!(report.groups[0].folder_name, "final-version!");
    fixture.assert_file_exists("final-version!/Final Version! a.txt");
}
