//! # Configuration
//!
//! Configuration is managed by [`confique`], which layers values from
//! environment variables, a TOML file and compiled defaults.
//!
//! ## Storage Hierarchy
//!
//! Resolved in priority order:
//! 1. **Command-line flags**: `--data-dir`, `--no-durable` (applied by the CLI).
//! 2. **Environment variables**: `DASHSTORE_DATA_DIR`, `DASHSTORE_DURABLE`, `DASHSTORE_PRETTY`.
//! 3. **Config file**: `dashstore.toml` in the OS config directory (via `directories`).
//! 4. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | OS data dir | Directory holding the `<key>.json` files |
//! | `durable` | `true` | Write through to the durable tier |
//! | `pretty` | `true` | Pretty-print documents on disk |

use crate::error::{Result, StoreError};
use confique::Config;
use directories::ProjectDirs;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "dashstore.toml";

/// Configuration for dashstore, stored in `dashstore.toml`.
#[derive(Config, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DashConfig {
    /// Directory for durable documents. Defaults to the OS data directory.
    #[config(env = "DASHSTORE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Keep a durable copy of every document on disk.
    #[config(env = "DASHSTORE_DURABLE", default = true)]
    pub durable: bool,

    /// Pretty-print durable documents.
    #[config(env = "DASHSTORE_PRETTY", default = true)]
    pub pretty: bool,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            durable: true,
            pretty: true,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "dashstore", "dashstore")
}

impl DashConfig {
    /// Load env + the platform config file + defaults.
    pub fn load() -> Result<Self> {
        match project_dirs() {
            Some(dirs) => Self::load_from(dirs.config_dir().join(CONFIG_FILENAME)),
            None => Self::builder()
                .env()
                .load()
                .map_err(|e| StoreError::Config(e.to_string())),
        }
    }

    /// Load env + an explicit config file + defaults. A missing file is fine.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder()
            .env()
            .file(path.as_ref())
            .load()
            .map_err(|e| StoreError::Config(e.to_string()))
    }

    /// Where the config file is looked up.
    pub fn config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
    }

    /// The effective durable directory.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| StoreError::Config("Could not determine data directory".to_string()))
    }

    /// A commented TOML file listing every setting with its default.
    pub fn template() -> String {
        confique::toml::template::<Self>(confique::toml::FormatOptions::default())
    }
}
