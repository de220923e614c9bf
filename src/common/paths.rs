//! Configuration paths and test file discovery

use std::io;
use std::path::{Path, PathBuf};

/// Application name used for platform directories
const APP_NAME: &str = "test-it";

/// File extensions recognised as scenario files
const TEST_FILE_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// Get the configuration directory path
///
/// Uses the directories crate for platform-appropriate locations:
/// - Linux: `~/.config/test-it/`
/// - macOS: `~/Library/Application Support/test-it/`
/// - Windows: `%APPDATA%\test-it\`
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the configuration file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Whether a path looks like a scenario file
pub fn is_test_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            TEST_FILE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Whether a file name should be parsed as YAML rather than JSON
pub fn is_yaml(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.ends_with(".yaml") || lower.ends_with(".yml")
}

/// List scenario files directly inside `dir`, sorted by name
///
/// Not recursive: sub-directories are skipped.
pub fn discover_test_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_test_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_is_valid() {
        let dir = config_dir();
        assert!(dir.is_some());
    }

    #[test]
    fn test_is_test_file() {
        assert!(is_test_file(Path::new("users.json")));
        assert!(is_test_file(Path::new("suite/orders.YML")));
        assert!(!is_test_file(Path::new("notes.txt")));
        assert!(!is_test_file(Path::new("Makefile")));
    }

    #[test]
    fn test_discover_skips_other_files_and_dirs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.json"), "{}").unwrap();
        std::fs::write(dir.path().join("a.yaml"), "tests: []").unwrap();
        std::fs::write(dir.path().join("readme.md"), "# hi").unwrap();
        std::fs::create_dir(dir.path().join("nested.json")).unwrap();

        let files = discover_test_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.yaml", "b.json"]);
    }
}
