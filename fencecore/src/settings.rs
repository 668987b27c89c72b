//! User settings, stored as JSON next to the saved layout.

use crate::snap::SNAP_THRESHOLD;
use crate::storage::{self, config_dir, SETTINGS_FILE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Overrides the desktop directories with a single directory
pub const DESKTOP_DIR_ENV: &str = "FENCES_DESKTOP_DIR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FenceSettings {
    /// Directories whose entries fill the fences; empty means platform defaults
    pub desktop_dirs: Vec<PathBuf>,
    /// Lower-case extensions grouped into the programs fence
    pub program_extensions: Vec<String>,
    pub snap_threshold: f32,
    pub show_hidden: bool,
    pub view_mode: ViewMode,
    pub icons_visible: bool,
}

impl Default for FenceSettings {
    fn default() -> Self {
        Self {
            desktop_dirs: Vec::new(),
            program_extensions: vec!["exe".to_string(), "lnk".to_string()],
            snap_threshold: SNAP_THRESHOLD,
            show_hidden: false,
            view_mode: ViewMode::Grid,
            icons_visible: true,
        }
    }
}

impl FenceSettings {
    pub fn default_path() -> PathBuf {
        config_dir().join(SETTINGS_FILE)
    }

    /// Load settings, falling back to defaults when the file is missing or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        match storage::load_json(path) {
            Ok(settings) => settings,
            Err(storage::StorageError::NotFound(_)) => {
                debug!(path = %path.display(), "no settings file, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> storage::Result<()> {
        storage::save_json(path, self)
    }

    pub fn is_program(&self, ext: &str) -> bool {
        self.program_extensions.iter().any(|p| p.eq_ignore_ascii_case(ext))
    }

    /// Directories to read, honouring the environment override.
    pub fn resolved_desktop_dirs(&self) -> Vec<PathBuf> {
        Self::pick_desktop_dirs(std::env::var_os(DESKTOP_DIR_ENV).map(PathBuf::from), &self.desktop_dirs)
    }

    fn pick_desktop_dirs(env_dir: Option<PathBuf>, configured: &[PathBuf]) -> Vec<PathBuf> {
        if let Some(dir) = env_dir.filter(|d| !d.as_os_str().is_empty()) {
            return vec![dir];
        }
        if !configured.is_empty() {
            return configured.to_vec();
        }
        default_desktop_dirs()
    }
}

/// The user's desktop, plus the shared public desktop on Windows.
pub fn default_desktop_dirs() -> Vec<PathBuf> {
    let mut found = Vec::new();
    if let Some(desktop) = dirs::desktop_dir() {
        found.push(desktop);
    }
    #[cfg(windows)]
    {
        if let Some(public) = std::env::var_os("PUBLIC") {
            found.push(PathBuf::from(public).join("Desktop"));
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = FenceSettings::default();
        assert_eq!(s.snap_threshold, 4.0);
        assert!(s.is_program("EXE"));
        assert!(s.is_program("lnk"));
        assert!(!s.is_program("txt"));
        assert!(s.icons_visible);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r#"{ "snap_threshold": 8.0, "view_mode": "List" }"#).unwrap();

        let s = FenceSettings::load_or_default(&path);
        assert_eq!(s.snap_threshold, 8.0);
        assert_eq!(s.view_mode, ViewMode::List);
        assert_eq!(s.program_extensions, vec!["exe", "lnk"]);
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "][").unwrap();
        assert_eq!(FenceSettings::load_or_default(&path), FenceSettings::default());
        assert_eq!(
            FenceSettings::load_or_default(&dir.path().join("missing.json")),
            FenceSettings::default()
        );
    }

    #[test]
    fn test_env_dir_wins() {
        let configured = vec![PathBuf::from("/configured")];
        assert_eq!(
            FenceSettings::pick_desktop_dirs(Some(PathBuf::from("/env")), &configured),
            vec![PathBuf::from("/env")]
        );
        assert_eq!(FenceSettings::pick_desktop_dirs(None, &configured), configured);
        assert_eq!(
            FenceSettings::pick_desktop_dirs(Some(PathBuf::new()), &configured),
            configured
        );
    }
}
