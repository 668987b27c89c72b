//! Storage utilities for Fences
//!
//! Handles the config directory, JSON load/save and the saved fence layout.

use crate::geometry::BoundingBox;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("File not found: {0}")]
    NotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, StorageError>;

pub const SETTINGS_FILE: &str = "settings.json";
pub const LAYOUT_FILE: &str = "layout.json";

/// Get the config directory for Fences
pub fn config_dir() -> PathBuf {
    directories::ProjectDirs::from("io", "fences", "fences")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(StorageError::NotFound(path.to_path_buf()));
    }
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let contents = serde_json::to_string_pretty(value)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    Ok(())
}

/// Fence positions and file order from a previous session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedLayout {
    pub fences: Vec<SavedFence>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedFence {
    pub id: String,
    pub name: String,
    pub position: BoundingBox,
    /// Paths of the fence's files, in display order
    pub files: Vec<PathBuf>,
}

impl SavedLayout {
    pub fn load(path: &Path) -> Result<Self> {
        load_json(path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        save_json(path, self)
    }

    pub fn default_path() -> PathBuf {
        config_dir().join(LAYOUT_FILE)
    }
}
