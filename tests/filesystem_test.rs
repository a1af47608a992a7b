//! Tests for the real FileSystem implementation

use std::fs;

use tempfile::TempDir;

use coursegen::infrastructure::traits::{FileSystem, RealFileSystem};

// ============================================================
// create_dir_all tests
// ============================================================

#[test]
fn given_existing_directory_when_create_dir_all_then_succeeds() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("phase/module");
    let fs = RealFileSystem;
    fs.create_dir_all(&dir).unwrap();

    // Act
    let result = fs.create_dir_all(&dir);

    // Assert
    assert!(result.is_ok());
    assert!(fs.is_dir(&dir));
}

#[test]
fn given_file_in_the_way_when_create_dir_all_then_returns_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("taken");
    fs::write(&path, "file").unwrap();

    let result = RealFileSystem.create_dir_all(&path);

    assert!(result.is_err());
}

// ============================================================
// write tests
// ============================================================

#[test]
fn given_longer_existing_file_when_write_then_truncates() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("lesson.md");
    fs::write(&path, "a much longer previous body").unwrap();

    RealFileSystem.write(&path, "short").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "short");
    assert_eq!(RealFileSystem.read(&path).unwrap(), b"short");
}

#[test]
fn given_missing_parent_when_write_then_returns_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("missing/lesson.md");

    assert!(RealFileSystem.write(&path, "x").is_err());
}

// ============================================================
// list_tree tests
// ============================================================

#[test]
fn given_nested_tree_when_list_tree_then_returns_sorted_entries_without_root() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("b/inner")).unwrap();
    fs::write(root.join("b/inner/z.md"), "z").unwrap();
    fs::write(root.join("a.md"), "a").unwrap();

    // Act
    let entries = RealFileSystem.list_tree(root).unwrap();

    // Assert
    assert_eq!(
        entries,
        vec![
            root.join("a.md"),
            root.join("b"),
            root.join("b/inner"),
            root.join("b/inner/z.md"),
        ]
    );
}

#[test]
fn given_missing_root_when_list_tree_then_returns_error() {
    let temp = TempDir::new().unwrap();
    assert!(RealFileSystem.list_tree(&temp.path().join("nope")).is_err());
}
