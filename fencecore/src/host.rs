//! Capabilities the desktop data service needs from the host environment.
//!
//! Each trait is a plain request/response call. [`crate::native::NativeHost`]
//! talks to the real file system and platform tools; tests use in-memory
//! doubles.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported on this platform: {0}")]
    Unsupported(String),
    #[error("no icon for {0}")]
    NoIcon(PathBuf),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("command `{program}` failed: {reason}")]
    Command { program: String, reason: String },
}

pub type Result<T> = std::result::Result<T, HostError>;

/// One directory entry as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub name: String,
    pub path: PathBuf,
    pub is_directory: bool,
    pub is_file: bool,
    pub is_symlink: bool,
}

/// Location of a stored preference, e.g. a registry hive/key/value triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceKey {
    pub hive: String,
    pub key: String,
    pub name: String,
}

impl PreferenceKey {
    pub fn new(hive: impl Into<String>, key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            hive: hive.into(),
            key: key.into(),
            name: name.into(),
        }
    }
}

pub trait FileSystem {
    /// Entries of `dir`, in the order the host presents them.
    fn list_dir(&self, dir: &Path) -> Result<Vec<DirEntryInfo>>;

    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;
}

pub trait ShortcutResolver {
    /// Target of a shortcut or link.
    fn resolve(&self, shortcut: &Path) -> Result<PathBuf>;
}

pub trait IconProvider {
    /// Icon for `path` as a `data:` URI.
    fn icon_data_uri(&self, path: &Path) -> Result<String>;
}

pub trait PreferenceReader {
    /// `Ok(None)` when the preference does not exist.
    fn read(&self, key: &PreferenceKey) -> Result<Option<String>>;
}

/// Everything the desktop data service calls into.
pub trait Host: FileSystem + ShortcutResolver + IconProvider + PreferenceReader {}

impl<T> Host for T where T: FileSystem + ShortcutResolver + IconProvider + PreferenceReader {}
