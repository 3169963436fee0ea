//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - The pet core has no UI dependencies
//! - No sleep() calls in the core (time comes from the injected clock)
//! - Library code logs through `tracing`, never stdout
//! - The terminal surface talks to the core, not around it
//!
//! The helpers here walk the workspace sources; the checks live in `tests/`.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Workspace root (two levels above this package)
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

/// Every `.rs` file under `dir`, relative to the workspace root
pub fn rust_files(dir: &str) -> Vec<PathBuf> {
    WalkDir::new(workspace_root().join(dir))
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "rs"))
        .collect()
}

/// Source with any `#[cfg(test)]` module stripped
///
/// Test modules sit at the end of a file in this workspace, so everything
/// from the first `#[cfg(test)]` on is dropped.
pub fn production_source(path: &Path) -> String {
    let source = fs::read_to_string(path).unwrap_or_default();
    match source.find("#[cfg(test)]") {
        Some(idx) => source[..idx].to_string(),
        None => source,
    }
}

/// Lines of `source` that contain `needle`, skipping comments
pub fn offending_lines(source: &str, needle: &str) -> Vec<String> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with("//"))
        .filter(|line| line.contains(needle))
        .map(str::to_string)
        .collect()
}

/// Read a manifest relative to the workspace root
pub fn manifest(path: &str) -> String {
    fs::read_to_string(workspace_root().join(path)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offending_lines_skip_comments() {
        let source = "// thread::sleep is banned\nlet x = 1;\nstd::thread::sleep(d);";
        assert_eq!(
            offending_lines(source, "thread::sleep"),
            vec!["std::thread::sleep(d);"]
        );
    }

    #[test]
    fn test_workspace_root_has_manifest() {
        assert!(workspace_root().join("Cargo.toml").exists());
    }
}
