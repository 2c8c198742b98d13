//! # Configuration Management
//!
//! Optional user settings read from `bough.toml` in the platform config
//! directory. Every field is optional; command-line flags take precedence.

use std::env;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::consts::{CONFIG_FILE_NAME, ENV_GIT_PATH, GIT_EXECUTABLE};
use crate::runner::DateFormat;
use crate::sort::SortMode;

/// Represents the configuration directories for the bough application
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
}

impl ConfigDirs {
  /// Create a new ConfigDirs instance
  pub fn new() -> Result<Self> {
    let proj_dirs = ProjectDirs::from("", "", "bough").context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
    })
  }

  /// Get the path to the settings file
  pub fn settings_path(&self) -> PathBuf {
    self.config_dir.join(CONFIG_FILE_NAME)
  }
}

/// User settings for the query engine and the CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
  /// Git executable; defaults to `git` on `PATH`.
  pub git_path: Option<PathBuf>,
  /// Branch other branches are compared against; defaults to the current one.
  pub reference: Option<String>,
  pub sort: SortMode,
  pub date_format: DateFormat,
  /// Maximum branches a batched lookup works on at once.
  pub max_concurrency: Option<NonZeroUsize>,
}

impl Settings {
  /// Load settings from the default location, falling back to defaults when
  /// the file does not exist.
  pub fn load(config_dirs: &ConfigDirs) -> Result<Self> {
    Self::load_from(config_dirs.settings_path())
  }

  /// Load settings from a specific file, falling back to defaults when the
  /// file does not exist.
  pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();

    if !path.exists() {
      return Ok(Self::default());
    }

    let content =
      fs::read_to_string(path).with_context(|| format!("Failed to read settings from {}", path.display()))?;

    toml::from_str(&content).with_context(|| format!("Failed to parse settings from {}", path.display()))
  }

  /// Git executable to use: `BOUGH_GIT`, then the configured path, then the
  /// platform default.
  pub fn resolved_git_path(&self) -> PathBuf {
    env::var_os(ENV_GIT_PATH)
      .filter(|value| !value.is_empty())
      .map(PathBuf::from)
      .or_else(|| self.git_path.clone())
      .unwrap_or_else(|| PathBuf::from(GIT_EXECUTABLE))
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn settings_path_is_inside_config_dir() {
    let config_dirs = ConfigDirs::new().unwrap();
    let path = config_dirs.settings_path();

    assert!(path.ends_with("bough.toml"));
    assert!(path.starts_with(&config_dirs.config_dir));
  }

  #[test]
  fn missing_file_yields_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let settings = Settings::load_from(temp_dir.path().join("bough.toml")).unwrap();

    assert_eq!(settings, Settings::default());
    assert_eq!(settings.sort, SortMode::None);
    assert_eq!(settings.date_format, DateFormat::Default);
  }

  #[test]
  fn parses_all_fields() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bough.toml");
    fs::write(
      &path,
      r#"
git-path = "/usr/local/bin/git"
reference = "develop"
sort = "commit-date"
date-format = "relative"
max-concurrency = 8
"#,
    )
    .unwrap();

    let settings = Settings::load_from(&path).unwrap();

    assert_eq!(settings.git_path, Some(PathBuf::from("/usr/local/bin/git")));
    assert_eq!(settings.reference.as_deref(), Some("develop"));
    assert_eq!(settings.sort, SortMode::CommitDate);
    assert_eq!(settings.date_format, DateFormat::Relative);
    assert_eq!(settings.max_concurrency, NonZeroUsize::new(8));
  }

  #[test]
  fn partial_file_keeps_other_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bough.toml");
    fs::write(&path, "sort = \"alphabetic\"\n").unwrap();

    let settings = Settings::load_from(&path).unwrap();

    assert_eq!(settings.sort, SortMode::Alphabetic);
    assert!(settings.git_path.is_none());
    assert!(settings.max_concurrency.is_none());
  }

  #[test]
  fn invalid_values_are_reported() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bough.toml");
    fs::write(&path, "sort = \"sideways\"\n").unwrap();

    let err = Settings::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse settings"));
  }

  #[test]
  fn configured_git_path_is_used() {
    let settings = Settings {
      git_path: Some(PathBuf::from("/opt/git/bin/git")),
      ..Default::default()
    };

    if env::var_os(ENV_GIT_PATH).is_none() {
      assert_eq!(settings.resolved_git_path(), PathBuf::from("/opt/git/bin/git"));
      assert_eq!(Settings::default().resolved_git_path(), PathBuf::from(GIT_EXECUTABLE));
    }
  }
}
