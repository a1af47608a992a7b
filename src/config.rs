//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/coursegen/coursegen.toml`
//! 3. Local config: `<project_dir>/.coursegen.toml`
//! 4. Environment variables: `COURSEGEN_*` prefix
//!
//! Command line flags override all of these and are applied by the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, DEFAULT_COURSE_DIR};

/// Raw settings for intermediate parsing (`None` means "not specified, inherit").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub output_dir: Option<PathBuf>,
    pub outline: Option<PathBuf>,
}

/// Unified configuration for coursegen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Root directory of the generated tree
    pub output_dir: PathBuf,
    /// Outline file; the built-in course when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_COURSE_DIR),
            outline: None,
        }
    }
}

/// Get the XDG config directory for coursegen.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "coursegen").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("coursegen.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".coursegen.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

impl Settings {
    /// Expand shell variables and tilde in path fields.
    fn expand_paths(&mut self) {
        self.output_dir = expand_path(&self.output_dir);
        self.outline = self.outline.as_deref().map(expand_path);
    }

    /// Overlay wins for every field it specifies.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            output_dir: overlay
                .output_dir
                .clone()
                .unwrap_or_else(|| self.output_dir.clone()),
            outline: overlay.outline.clone().or_else(|| self.outline.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional project directory for local config
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply COURSEGEN_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("COURSEGEN").prefix_separator("_"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("output_dir") {
            settings.output_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("outline") {
            settings.outline = Some(PathBuf::from(val));
        }

        Ok(settings)
    }

    /// Resolve relative paths against `project_dir`.
    pub fn resolved(&self, project_dir: &Path) -> Self {
        let resolve = |p: &Path| {
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                project_dir.join(p)
            }
        };
        Self {
            output_dir: resolve(self.output_dir.as_path()),
            outline: self.outline.as_deref().map(resolve),
        }
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        format!(
            r#"# coursegen configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/coursegen/coursegen.toml
#   Local:  <project_dir>/.coursegen.toml
#   Env:    COURSEGEN_OUTPUT_DIR, COURSEGEN_OUTLINE
#   Flags:  --output, --outline

# Root directory of the generated course (relative to the project directory)
# output_dir = "{DEFAULT_COURSE_DIR}"

# Outline file (TOML); the built-in course is used when unset
# outline = "outline.toml"
"#
        )
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_then_output_dir_is_course_dir() {
        let settings = Settings::default();
        assert_eq!(settings.output_dir, PathBuf::from(DEFAULT_COURSE_DIR));
        assert!(settings.outline.is_none());
    }

    #[test]
    fn given_tilde_in_paths_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            output_dir: PathBuf::from("~/course"),
            outline: Some(PathBuf::from("$HOME/outline.toml")),
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        assert!(settings.output_dir.to_string_lossy().starts_with(&home));
        assert!(!settings.output_dir.to_string_lossy().contains('~'));
        assert!(settings
            .outline
            .as_ref()
            .is_some_and(|p| p.to_string_lossy().starts_with(&home)));
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_fields() {
        let base = Settings {
            output_dir: PathBuf::from("base"),
            outline: Some(PathBuf::from("base.toml")),
        };
        let overlay = RawSettings {
            output_dir: Some(PathBuf::from("overlay")),
            outline: None,
        };

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.output_dir, PathBuf::from("overlay"));
        assert_eq!(merged.outline, Some(PathBuf::from("base.toml")));
    }

    #[test]
    fn given_relative_paths_when_resolved_then_joined_to_project_dir() {
        let settings = Settings {
            output_dir: PathBuf::from("course"),
            outline: Some(PathBuf::from("/abs/outline.toml")),
        };

        let resolved = settings.resolved(Path::new("/work"));

        assert_eq!(resolved.output_dir, PathBuf::from("/work/course"));
        assert_eq!(resolved.outline, Some(PathBuf::from("/abs/outline.toml")));
    }

    #[test]
    fn given_settings_when_to_toml_then_omits_unset_outline() {
        let toml = Settings::default().to_toml().unwrap();
        assert!(toml.contains("output_dir"));
        assert!(!toml.contains("outline ="));
    }

    #[test]
    fn given_template_when_parsed_then_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(raw.output_dir.is_none());
    }
}
