//! Settings store
//!
//! One TOML file holding the `[helm]` section. Path priority:
//! `--config` > ASGARD_CONFIG > $VIRTUAL_ENV/asgard.toml > ~/.asgard.toml

use super::Result;
use crate::error::{ConfigError, StorageError};
use dirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "ASGARD_CONFIG";
pub const VIRTUAL_ENV: &str = "VIRTUAL_ENV";

const CONFIG_FILE_NAME: &str = "asgard.toml";
const HOME_CONFIG_FILE_NAME: &str = ".asgard.toml";

/// Application configuration
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub helm: HelmSettings,
}

/// Settings handed to every helm invocation
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct HelmSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kube_context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiller_host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_repo: Option<String>,
}

impl HelmSettings {
    /// Field names of the section, in prompt order
    pub const FIELDS: [&'static str; 5] =
        ["kube_context", "tiller_host", "namespace", "repo", "chart_repo"];

    fn slot(&mut self, field: &str) -> Option<&mut Option<String>> {
        match field {
            "kube_context" => Some(&mut self.kube_context),
            "tiller_host" => Some(&mut self.tiller_host),
            "namespace" => Some(&mut self.namespace),
            "repo" => Some(&mut self.repo),
            "chart_repo" => Some(&mut self.chart_repo),
            _ => None,
        }
    }

    pub fn field(&self, field: &str) -> Option<&str> {
        match field {
            "kube_context" => self.kube_context.as_deref(),
            "tiller_host" => self.tiller_host.as_deref(),
            "namespace" => self.namespace.as_deref(),
            "repo" => self.repo.as_deref(),
            "chart_repo" => self.chart_repo.as_deref(),
            _ => None,
        }
    }

    // Missing keys become empty arguments; helm reports its own usage error.
    pub fn kube_context(&self) -> &str {
        self.kube_context.as_deref().unwrap_or_default()
    }

    pub fn tiller_host(&self) -> &str {
        self.tiller_host.as_deref().unwrap_or_default()
    }

    pub fn namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or_default()
    }

    pub fn repo(&self) -> &str {
        self.repo.as_deref().unwrap_or_default()
    }

    pub fn chart_repo(&self) -> &str {
        self.chart_repo.as_deref().unwrap_or_default()
    }
}

impl Config {
    /// Load configuration from file. A missing file means `init` never ran.
    pub fn load(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotInitialized {
                path: path.to_string_lossy().to_string(),
            }
            .into());
        }

        Ok(Self::read(path)?)
    }

    /// Load configuration, falling back to an empty store when absent
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        Self::read(path)
    }

    fn read(path: &Path) -> Result<Self> {
        let content = Self::read_raw(path)?;
        toml::from_str(&content).map_err(|e| StorageError::ConfigParseError {
            message: format!("Failed to parse config file: {}", e),
        })
    }

    /// Raw file contents, for `info`
    pub fn read_raw(path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|source| StorageError::FileIo {
            path: path.to_string_lossy().to_string(),
            source,
        })
    }

    /// Save configuration to file
    ///
    /// Content is written to a sibling `.tmp` file and renamed over the
    /// target, so readers see either the old or the new file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StorageError::FileIo {
                path: parent.to_string_lossy().to_string(),
                source,
            })?;
        }

        let toml_content = toml::to_string(self).map_err(|e| StorageError::ConfigParseError {
            message: format!("Failed to serialize config: {}", e),
        })?;

        let mut tmp_name = path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        fs::write(&tmp_path, toml_content).map_err(|source| StorageError::FileIo {
            path: tmp_path.to_string_lossy().to_string(),
            source,
        })?;
        fs::rename(&tmp_path, path).map_err(|source| StorageError::FileIo {
            path: path.to_string_lossy().to_string(),
            source,
        })?;

        Ok(())
    }

    /// Look up a dotted key such as `helm.tiller_host`
    pub fn get(&self, key: &str) -> crate::Result<Option<&str>> {
        match key.split_once('.') {
            Some(("helm", field)) if HelmSettings::FIELDS.contains(&field) => {
                Ok(self.helm.field(field))
            }
            _ => Err(ConfigError::UnknownKey {
                key: key.to_string(),
            }
            .into()),
        }
    }

    /// Set a dotted key such as `helm.tiller_host`
    pub fn set(&mut self, key: &str, value: String) -> crate::Result<()> {
        let slot = match key.split_once('.') {
            Some(("helm", field)) => self.helm.slot(field),
            _ => None,
        };
        match slot {
            Some(slot) => {
                *slot = Some(value);
                Ok(())
            }
            None => Err(ConfigError::UnknownKey {
                key: key.to_string(),
            }
            .into()),
        }
    }

    /// Every dotted key the store knows about, in prompt order
    pub fn keys() -> impl Iterator<Item = String> {
        HelmSettings::FIELDS.iter().map(|f| format!("helm.{}", f))
    }

    /// Resolve the config file location from the process environment
    pub fn resolve_path(cli_override: Option<PathBuf>) -> Result<ConfigLocation> {
        resolve_path_from(
            cli_override,
            std::env::var(CONFIG_ENV).ok(),
            std::env::var(VIRTUAL_ENV).ok(),
            dirs::home_dir(),
        )
    }
}

/// Where the config file lives and whether an isolated environment was seen
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigLocation {
    pub path: PathBuf,
    pub isolated_env: bool,
}

pub fn resolve_path_from(
    cli_override: Option<PathBuf>,
    env_override: Option<String>,
    virtual_env: Option<String>,
    home: Option<PathBuf>,
) -> Result<ConfigLocation> {
    let virtual_env = virtual_env.filter(|s| !s.is_empty());
    let isolated_env = virtual_env.is_some();

    let path = if let Some(p) = cli_override {
        p
    } else if let Some(p) = env_override.filter(|s| !s.is_empty()) {
        PathBuf::from(p)
    } else if let Some(venv) = virtual_env {
        PathBuf::from(venv).join(CONFIG_FILE_NAME)
    } else {
        home.ok_or(StorageError::ConfigDirNotFound)?
            .join(HOME_CONFIG_FILE_NAME)
    };

    Ok(ConfigLocation { path, isolated_env })
}
