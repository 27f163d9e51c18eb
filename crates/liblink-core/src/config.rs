//! Persisted per-user defaults.
//!
//! A single JSON document at `~/.liblink/config.json` (or
//! `$LIBLINK_CONFIG_DIR/config.json` when the env var is set). The record is
//! loaded once per run and, when the save policy decides so, rewritten
//! wholesale with a fresh `Updated` timestamp — never partially mutated.

use crate::error::{LinkError, Result};
use crate::io::atomic_write;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_DIR_ENV: &str = "LIBLINK_CONFIG_DIR";
pub const CONFIG_DIR_NAME: &str = ".liblink";
pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PersistedConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infinity_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_spa_paths: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}

/// Result of a load: the record plus whether a config file was already
/// present, which the save policy needs.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub record: PersistedConfig,
    pub existed: bool,
}

#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    save_disabled: bool,
}

impl ConfigStore {
    /// Resolve the per-user config location. `LIBLINK_CONFIG_DIR` overrides
    /// the home-directory default.
    pub fn open(save_disabled: bool) -> Result<Self> {
        let dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(d) => PathBuf::from(d),
            None => home::home_dir()
                .ok_or(LinkError::HomeNotFound)?
                .join(CONFIG_DIR_NAME),
        };
        Ok(Self {
            path: dir.join(CONFIG_FILE),
            save_disabled,
        })
    }

    /// For tests: a store rooted at an explicit directory.
    pub fn at(dir: &Path, save_disabled: bool) -> Self {
        Self {
            path: dir.join(CONFIG_FILE),
            save_disabled,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted record. Never fails the process: an absent file is
    /// an empty record, and an unparsable file degrades to an empty record
    /// with a warning.
    pub fn load(&self) -> LoadedConfig {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(d) => d,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(
                        "config file {} is unreadable ({e}); starting from an empty config",
                        self.path.display()
                    );
                }
                return LoadedConfig {
                    record: PersistedConfig::default(),
                    existed: false,
                };
            }
        };
        match serde_json::from_str(&data) {
            Ok(record) => LoadedConfig {
                record,
                existed: true,
            },
            Err(e) => {
                tracing::warn!(
                    "config file {} is unreadable ({e}); starting from an empty config",
                    self.path.display()
                );
                LoadedConfig {
                    record: PersistedConfig::default(),
                    existed: true,
                }
            }
        }
    }

    /// Overwrite the config file with `record`, stamping `Updated`. A no-op
    /// when saving is disabled. Write failures are fatal.
    pub fn save(&self, mut record: PersistedConfig) -> Result<()> {
        if self.save_disabled {
            return Ok(());
        }
        record.updated = Some(Utc::now());
        let data = serde_json::to_string_pretty(&record)?;
        atomic_write(&self.path, data.as_bytes())
    }
}
