//! Integration tests for Settings config loading.
//!
//! Every test pins HOME and XDG_CONFIG_HOME to a temp directory, so the
//! global layer is the test's own and the developer's config never leaks in.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use coursegen::application::{ApplicationError, DEFAULT_COURSE_DIR};
use coursegen::config::{global_config_path, local_config_path, Settings};
use coursegen::util::testing::IsolatedEnv;

fn write_global_config(content: &str) -> PathBuf {
    let path = global_config_path().expect("global config path");
    fs::create_dir_all(path.parent().expect("config dir")).unwrap();
    fs::write(&path, content).unwrap();
    path
}

fn write_local_config(project: &Path, content: &str) {
    fs::write(local_config_path(project), content).unwrap();
}

// ============================================================
// Defaults and local layer
// ============================================================

#[test]
fn given_no_local_config_when_load_then_uses_defaults() {
    let home = TempDir::new().unwrap();
    let _env = IsolatedEnv::new(home.path());
    let project = TempDir::new().unwrap();

    let settings = Settings::load(Some(project.path())).expect("load settings");

    assert_eq!(settings.output_dir, PathBuf::from(DEFAULT_COURSE_DIR));
    assert!(settings.outline.is_none());
}

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    // Arrange
    let home = TempDir::new().unwrap();
    let _env = IsolatedEnv::new(home.path());
    let project = TempDir::new().unwrap();
    write_local_config(
        project.path(),
        r#"
output_dir = "site/course"
outline = "outline.toml"
"#,
    );

    // Act
    let settings = Settings::load(Some(project.path())).expect("load settings");

    // Assert
    assert_eq!(settings.output_dir, PathBuf::from("site/course"));
    assert_eq!(settings.outline, Some(PathBuf::from("outline.toml")));
}

#[test]
fn given_local_config_with_only_outline_when_load_then_keeps_default_output() {
    let home = TempDir::new().unwrap();
    let _env = IsolatedEnv::new(home.path());
    let project = TempDir::new().unwrap();
    write_local_config(project.path(), "outline = \"custom.toml\"\n");

    let settings = Settings::load(Some(project.path())).unwrap();

    assert_eq!(settings.output_dir, PathBuf::from(DEFAULT_COURSE_DIR));
    assert_eq!(settings.outline, Some(PathBuf::from("custom.toml")));
}

#[test]
fn given_invalid_local_config_when_load_then_config_error() {
    let home = TempDir::new().unwrap();
    let _env = IsolatedEnv::new(home.path());
    let project = TempDir::new().unwrap();
    write_local_config(project.path(), "output_dir = [1, 2");

    let err = Settings::load(Some(project.path())).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[test]
fn given_loaded_settings_when_resolved_then_paths_anchor_to_project() {
    let home = TempDir::new().unwrap();
    let _env = IsolatedEnv::new(home.path());
    let project = TempDir::new().unwrap();
    write_local_config(project.path(), "outline = \"o.toml\"\n");

    let settings = Settings::load(Some(project.path()))
        .unwrap()
        .resolved(project.path());

    assert_eq!(settings.output_dir, project.path().join(DEFAULT_COURSE_DIR));
    assert_eq!(settings.outline, Some(project.path().join("o.toml")));
}

// ============================================================
// Global layer
// ============================================================

#[test]
fn given_global_config_when_load_then_overrides_defaults() {
    // Arrange
    let home = TempDir::new().unwrap();
    let _env = IsolatedEnv::new(home.path());
    let path = write_global_config("output_dir = \"global_course\"\n");
    let project = TempDir::new().unwrap();

    // Act
    let settings = Settings::load(Some(project.path())).unwrap();

    // Assert
    assert!(path.starts_with(home.path()));
    assert_eq!(settings.output_dir, PathBuf::from("global_course"));
}

#[test]
fn given_global_and_local_config_when_load_then_local_wins_per_field() {
    let home = TempDir::new().unwrap();
    let _env = IsolatedEnv::new(home.path());
    write_global_config("output_dir = \"global_course\"\noutline = \"global.toml\"\n");
    let project = TempDir::new().unwrap();
    write_local_config(project.path(), "output_dir = \"local_course\"\n");

    let settings = Settings::load(Some(project.path())).unwrap();

    assert_eq!(settings.output_dir, PathBuf::from("local_course"));
    assert_eq!(settings.outline, Some(PathBuf::from("global.toml")));
}

// ============================================================
// Environment layer
// ============================================================

#[test]
fn given_env_vars_when_load_then_override_defaults() {
    // Arrange
    let home = TempDir::new().unwrap();
    let env = IsolatedEnv::new(home.path());
    env.set("COURSEGEN_OUTPUT_DIR", "from_env");
    env.set("COURSEGEN_OUTLINE", "env_outline.toml");

    // Act
    let settings = Settings::load(None).unwrap();

    // Assert
    assert_eq!(settings.output_dir, PathBuf::from("from_env"));
    assert_eq!(settings.outline, Some(PathBuf::from("env_outline.toml")));
}

#[test]
fn given_env_var_and_local_config_when_load_then_env_wins() {
    let home = TempDir::new().unwrap();
    let env = IsolatedEnv::new(home.path());
    let project = TempDir::new().unwrap();
    write_local_config(
        project.path(),
        "output_dir = \"local_course\"\noutline = \"local.toml\"\n",
    );
    env.set("COURSEGEN_OUTPUT_DIR", "from_env");

    let settings = Settings::load(Some(project.path())).unwrap();

    assert_eq!(settings.output_dir, PathBuf::from("from_env"));
    assert_eq!(settings.outline, Some(PathBuf::from("local.toml")));
}

#[test]
fn given_env_var_with_home_reference_when_load_then_expanded() {
    let home = TempDir::new().unwrap();
    let env = IsolatedEnv::new(home.path());
    env.set("COURSEGEN_OUTPUT_DIR", "~/course");

    let settings = Settings::load(None).unwrap();

    assert_eq!(settings.output_dir, home.path().join("course"));
}
