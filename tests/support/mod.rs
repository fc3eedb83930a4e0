use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a temporary tree from `(relative path, content)` pairs
#[allow(dead_code)]
pub fn create_tree(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for (rel, content) in files {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().expect("No parent")).expect("Failed to create dirs");
        fs::write(&path, content).unwrap_or_else(|_| panic!("Failed to write {}", rel));
    }
    dir
}

#[allow(dead_code)]
pub fn golden_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/golden")
        .join(name)
}

#[allow(dead_code)]
pub fn read_golden(name: &str) -> String {
    let path = golden_path(name);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read golden file {:?}", path))
}
