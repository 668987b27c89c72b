//! Desktop files and wallpaper, as handed to the renderer.
//!
//! Every host failure stops here: an unreadable directory contributes no
//! entries, a missing icon becomes an empty string, an unresolved shortcut
//! keeps its own path and a missing wallpaper is `None`.

use crate::data_uri;
use crate::host::{DirEntryInfo, Host, PreferenceKey};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Shortcut extension whose target supplies the icon
pub const SHORTCUT_EXT: &str = "lnk";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopFile {
    pub name: String,
    pub path: PathBuf,
    pub is_directory: bool,
    pub is_file: bool,
    /// Lower-cased text after the last `.` of the name
    pub ext: String,
    /// `data:` URI, empty when the host had no icon
    pub icon: String,
}

impl DesktopFile {
    pub fn is_shortcut(&self) -> bool {
        self.ext == SHORTCUT_EXT
    }

    /// Glyph drawn when there is no icon image.
    pub fn fallback_glyph(&self) -> &'static str {
        if self.is_directory {
            "📁"
        } else if self.is_shortcut() {
            "🔗"
        } else {
            "📄"
        }
    }
}

/// Lower-cased extension the way the desktop groups files: the text after
/// the last dot, or the whole name when there is none.
pub fn extract_file_ext(name: &str) -> String {
    name.rsplit('.').next().unwrap_or_default().to_lowercase()
}

/// Where the wallpaper path is stored on this platform.
pub fn default_wallpaper_key() -> PreferenceKey {
    if cfg!(windows) {
        PreferenceKey::new("HKCU", "Control Panel\\Desktop", "WallPaper")
    } else {
        PreferenceKey::new("user", "org.gnome.desktop.background", "picture-uri")
    }
}

pub struct DesktopApi<H> {
    host: H,
    desktop_dirs: Vec<PathBuf>,
    wallpaper_key: PreferenceKey,
}

impl<H: Host> DesktopApi<H> {
    pub fn new(host: H, desktop_dirs: Vec<PathBuf>) -> Self {
        Self {
            host,
            desktop_dirs,
            wallpaper_key: default_wallpaper_key(),
        }
    }

    pub fn with_wallpaper_key(mut self, key: PreferenceKey) -> Self {
        self.wallpaper_key = key;
        self
    }

    /// Entries of every desktop directory, in directory order.
    pub fn get_desktop_files(&self) -> Vec<DesktopFile> {
        let mut files = Vec::new();
        for dir in &self.desktop_dirs {
            match self.host.list_dir(dir) {
                Ok(entries) => files.extend(entries.iter().map(|e| self.desktop_file(e))),
                Err(e) => debug!(dir = %dir.display(), error = %e, "cannot read desktop directory"),
            }
        }
        files
    }

    fn desktop_file(&self, entry: &DirEntryInfo) -> DesktopFile {
        let ext = extract_file_ext(&entry.name);
        let icon_target = if ext == SHORTCUT_EXT || entry.is_symlink {
            self.resolve_or_self(&entry.path)
        } else {
            entry.path.clone()
        };
        let icon = match self.host.icon_data_uri(&icon_target) {
            Ok(uri) => uri,
            Err(e) => {
                debug!(path = %icon_target.display(), error = %e, "no icon");
                String::new()
            }
        };
        DesktopFile {
            name: entry.name.clone(),
            path: entry.path.clone(),
            is_directory: entry.is_directory,
            is_file: entry.is_file,
            ext,
            icon,
        }
    }

    fn resolve_or_self(&self, shortcut: &Path) -> PathBuf {
        match self.host.resolve(shortcut) {
            Ok(target) if !target.as_os_str().is_empty() => target,
            Ok(_) => shortcut.to_path_buf(),
            Err(e) => {
                debug!(path = %shortcut.display(), error = %e, "shortcut not resolved");
                shortcut.to_path_buf()
            }
        }
    }

    /// Current wallpaper as a `data:` URI.
    pub fn get_desktop_background(&self) -> Option<String> {
        let value = match self.host.read(&self.wallpaper_key) {
            Ok(value) => value?,
            Err(e) => {
                debug!(key = %self.wallpaper_key.key, error = %e, "cannot read wallpaper setting");
                return None;
            }
        };
        let path = wallpaper_path(&value)?;
        let bytes = match self.host.read_file(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "cannot read wallpaper");
                return None;
            }
        };
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_default();
        let mime = data_uri::image_mime(&ext, &bytes)?;
        Some(data_uri::encode(mime, &bytes))
    }
}

/// File path from a wallpaper setting: quotes trimmed, `file://` removed and
/// `%XX` escapes decoded. Empty settings mean no wallpaper.
pub fn wallpaper_path(value: &str) -> Option<PathBuf> {
    let value = value.trim().trim_matches(|c: char| c == '\'' || c == '"');
    if value.is_empty() {
        return None;
    }
    match value.strip_prefix("file://") {
        Some(rest) => Some(PathBuf::from(percent_decode(rest))),
        None => Some(PathBuf::from(value)),
    }
}

fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let (hi, lo) = (bytes[i + 1], bytes[i + 2]);
            if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() {
                out.push((hex_value(hi) << 4) | hex_value(lo));
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).to_string()
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit.to_ascii_uppercase() - b'A' + 10,
    }
}
