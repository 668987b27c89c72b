//! Host implementation backed by the real file system and platform tools.

use crate::data_uri;
use crate::host::{
    DirEntryInfo, FileSystem, HostError, IconProvider, PreferenceKey, PreferenceReader, Result,
    ShortcutResolver,
};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Edge length of generated icon thumbnails
pub const ICON_PX: u32 = 48;

/// Extensions rendered as thumbnails of their own content
const IMAGE_EXTS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp"];

#[derive(Debug, Clone, Default)]
pub struct NativeHost {
    /// List dot-files as well
    pub show_hidden: bool,
}

impl NativeHost {
    pub fn new(show_hidden: bool) -> Self {
        Self { show_hidden }
    }
}

impl FileSystem for NativeHost {
    fn list_dir(&self, dir: &Path) -> Result<Vec<DirEntryInfo>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)?.flatten() {
            let name = entry.file_name().to_string_lossy().to_string();
            if !self.show_hidden && name.starts_with('.') {
                continue;
            }
            let path = entry.path();
            let is_symlink = entry.file_type().map(|t| t.is_symlink()).unwrap_or(false);
            // follow links so a link to a folder still reads as a folder
            let meta = fs::metadata(&path).ok();
            entries.push(DirEntryInfo {
                name,
                is_directory: meta.as_ref().map(|m| m.is_dir()).unwrap_or(false),
                is_file: meta.as_ref().map(|m| m.is_file()).unwrap_or(false),
                is_symlink,
                path,
            });
        }
        entries.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(entries)
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(fs::read(path)?)
    }
}

impl ShortcutResolver for NativeHost {
    fn resolve(&self, shortcut: &Path) -> Result<PathBuf> {
        let meta = fs::symlink_metadata(shortcut)?;
        if meta.file_type().is_symlink() {
            let target = fs::read_link(shortcut)?;
            if target.is_relative() {
                if let Some(parent) = shortcut.parent() {
                    return Ok(parent.join(target));
                }
            }
            return Ok(target);
        }
        Err(HostError::Unsupported(format!(
            "cannot read shortcut {}",
            shortcut.display()
        )))
    }
}

impl IconProvider for NativeHost {
    fn icon_data_uri(&self, path: &Path) -> Result<String> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if !IMAGE_EXTS.contains(&ext.as_str()) || !path.is_file() {
            return Err(HostError::NoIcon(path.to_path_buf()));
        }
        let bytes = fs::read(path)?;
        let thumb = image::load_from_memory(&bytes)?.thumbnail(ICON_PX, ICON_PX);
        let mut png = Cursor::new(Vec::new());
        thumb.write_to(&mut png, image::ImageFormat::Png)?;
        Ok(data_uri::encode("image/png", png.get_ref()))
    }
}

impl PreferenceReader for NativeHost {
    #[cfg(windows)]
    fn read(&self, key: &PreferenceKey) -> Result<Option<String>> {
        let full_key = format!("{}\\{}", key.hive, key.key.trim_start_matches('\\'));
        let output = run("reg", &["query", &full_key, "/v", &key.name])?;
        Ok(output.and_then(|out| parse_reg_query(&out, &key.name)))
    }

    #[cfg(not(windows))]
    fn read(&self, key: &PreferenceKey) -> Result<Option<String>> {
        // gsettings has no hive: the key is the schema, the name the setting
        let output = run("gsettings", &["get", &key.key, &key.name])?;
        Ok(output.and_then(|out| parse_gsettings(&out)))
    }
}

/// Run a lookup command. A non-zero exit means the value does not exist.
fn run(program: &str, args: &[&str]) -> Result<Option<String>> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| HostError::Command {
            program: program.to_string(),
            reason: e.to_string(),
        })?;
    if !output.status.success() {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&output.stdout).to_string()))
}

/// Value of `name` in `reg query` output, e.g.
/// `    WallPaper    REG_SZ    C:\Users\me\wall.jpg`.
pub fn parse_reg_query(output: &str, name: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let line = line.trim();
        let head = line.get(..name.len())?;
        if !head.eq_ignore_ascii_case(name) {
            return None;
        }
        let rest = line[name.len()..].trim_start();
        let (kind, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        if !kind.starts_with("REG_") {
            return None;
        }
        Some(value.trim().to_string())
    })
}

/// Unquote a gsettings string such as `'file:///home/me/wall.png'`.
pub fn parse_gsettings(output: &str) -> Option<String> {
    let value = output.trim();
    if value.is_empty() || value == "@as []" {
        return None;
    }
    let unquoted = value
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
        .unwrap_or(value);
    Some(unquoted.to_string())
}
