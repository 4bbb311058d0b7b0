//! Configuration types for dialogbuilder.toml
//!
//! Every key is optional. Lookup order for [`Config::load`]: an explicit path,
//! `./dialogbuilder.toml`, `<config dir>/dialogbuilder/config.toml`, then the
//! built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::converter::{DEFAULT_CHARACTER_NAMES, ExportOptions, ExportVariant, GridParams, ImportOptions};
use crate::error::{Error, Result};
use crate::layout::{LayoutParams, LayoutPolicy, VerticalDirection};

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "dialogbuilder.toml";

fn default_character_names() -> Vec<String> {
    DEFAULT_CHARACTER_NAMES.iter().map(ToString::to_string).collect()
}

fn default_true() -> bool {
    true
}

fn default_policy() -> String {
    LayoutPolicy::default().to_string()
}

/// The full configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Speaker names used to classify imported notes
    #[serde(default = "default_character_names")]
    pub character_names: Vec<String>,
    #[serde(default)]
    pub layout: LayoutSettings,
    #[serde(default)]
    pub export: ExportSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            character_names: default_character_names(),
            layout: LayoutSettings::default(),
            export: ExportSettings::default(),
        }
    }
}

/// `[layout]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSettings {
    /// `level`, `subtree`, `simple` or `none`
    #[serde(default = "default_policy")]
    pub policy: String,
    #[serde(default)]
    pub level: LayoutOverrides,
    #[serde(default)]
    pub subtree: LayoutOverrides,
    #[serde(default)]
    pub simple: LayoutOverrides,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            policy: default_policy(),
            level: LayoutOverrides::default(),
            subtree: LayoutOverrides::default(),
            simple: LayoutOverrides::default(),
        }
    }
}

impl LayoutSettings {
    /// Configured policy; `None` keeps positions as imported
    ///
    /// # Errors
    /// Returns an error if the policy name is not recognised.
    pub fn policy(&self) -> Result<Option<LayoutPolicy>> {
        match self.policy.trim().to_lowercase().as_str() {
            "" | "none" | "off" => Ok(None),
            other => other.parse().map(Some),
        }
    }

    /// Parameters for a policy: its own defaults with the configured keys applied
    #[must_use]
    pub fn params(&self, policy: LayoutPolicy) -> LayoutParams {
        let overrides = match policy {
            LayoutPolicy::Level => &self.level,
            LayoutPolicy::Subtree => &self.subtree,
            LayoutPolicy::Simple => &self.simple,
        };
        overrides.apply(policy.default_params())
    }
}

/// Per-policy layout keys; unset keys keep the policy's defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal_gap: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_gap: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_gap: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<VerticalDirection>,
}

impl LayoutOverrides {
    #[must_use]
    pub fn apply(&self, base: LayoutParams) -> LayoutParams {
        LayoutParams {
            origin_x: self.origin_x.unwrap_or(base.origin_x),
            origin_y: self.origin_y.unwrap_or(base.origin_y),
            horizontal_gap: self.horizontal_gap.unwrap_or(base.horizontal_gap),
            vertical_gap: self.vertical_gap.unwrap_or(base.vertical_gap),
            root_gap: self.root_gap.unwrap_or(base.root_gap),
            direction: self.direction.unwrap_or(base.direction),
        }
    }
}

/// `[export]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Prefix exported notes with letter labels
    #[serde(default = "default_true")]
    pub label_notes: bool,
    /// Write `<stem>_original_positions.json` on import
    #[serde(default = "default_true")]
    pub write_sidecar: bool,
    #[serde(default)]
    pub grid: GridParams,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            label_notes: true,
            write_sidecar: true,
            grid: GridParams::default(),
        }
    }
}

impl Config {
    /// Parse a config from TOML text; `path` is only used in the error
    ///
    /// # Errors
    /// Returns an error if the TOML is invalid.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read a config file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is invalid.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content, path)
    }

    /// Load the first config found, or the defaults
    ///
    /// # Errors
    /// Returns an error if an explicit or discovered config cannot be read or is invalid.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::debug!("Loading config from {}", path.display());
            return Self::from_file(path);
        }
        for path in Self::search_paths() {
            if path.is_file() {
                tracing::debug!("Loading config from {}", path.display());
                return Self::from_file(path);
            }
        }
        Ok(Self::default())
    }

    /// Candidate locations, most specific first
    #[must_use]
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("dialogbuilder").join("config.toml"));
        }
        paths
    }

    /// Import options from this config
    ///
    /// # Errors
    /// Returns an error if the layout policy name is not recognised.
    pub fn import_options(&self) -> Result<ImportOptions> {
        let layout = self
            .layout
            .policy()?
            .map(|policy| (policy, self.layout.params(policy)));
        Ok(ImportOptions {
            character_names: self.character_names.clone(),
            character: None,
            layout,
            write_sidecar: self.export.write_sidecar,
        })
    }

    #[must_use]
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            variant: if self.export.label_notes {
                ExportVariant::Labeled
            } else {
                ExportVariant::Plain
            },
            grid: self.export.grid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.character_names, vec!["HILDE", "PAUL", "KIM", "GOTTLOB"]);
        assert_eq!(config.layout.policy().unwrap(), Some(LayoutPolicy::Subtree));
        assert!(config.export.label_notes);
        assert_eq!(config.export_options().variant, ExportVariant::Labeled);
    }

    #[test]
    fn test_partial_file() {
        let toml = r#"
            character_names = ["ADA"]

            [layout]
            policy = "level"

            [layout.level]
            vertical_gap = 80.0
            direction = "up"

            [export]
            label_notes = false
        "#;
        let config = Config::from_toml(toml, Path::new("dialogbuilder.toml")).unwrap();
        assert_eq!(config.character_names, vec!["ADA"]);
        assert!(config.export.write_sidecar);
        assert_eq!(config.export_options().variant, ExportVariant::Plain);

        let options = config.import_options().unwrap();
        let (policy, params) = options.layout.unwrap();
        assert_eq!(policy, LayoutPolicy::Level);
        assert_eq!(params.horizontal_gap, 500.0);
        assert_eq!(params.vertical_gap, 80.0);
        assert_eq!(params.direction, VerticalDirection::Up);
    }

    #[test]
    fn test_policy_none_and_invalid() {
        let mut settings = LayoutSettings::default();
        settings.policy = "none".to_string();
        assert_eq!(settings.policy().unwrap(), None);
        settings.policy = "spiral".to_string();
        assert!(settings.policy().is_err());
    }

    #[test]
    fn test_invalid_toml_names_file() {
        let err = Config::from_toml("character_names = 3", Path::new("bad.toml")).unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = Config::from_toml(&toml_str, Path::new("x.toml")).unwrap();
        assert_eq!(parsed, config);
    }
}
