//! Textures decoded from the data URIs the desktop data service hands out.

use egui::{ColorImage, Context, Pos2, Rect, TextureHandle, TextureOptions, Vec2};
use fencecore::data_uri;
use fencecore::DesktopFile;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

/// Decode a `data:` image URI into pixels egui can upload.
pub fn decode_color_image(uri: &str) -> Option<ColorImage> {
    let (_, bytes) = data_uri::decode(uri)?;
    match image::load_from_memory(&bytes) {
        Ok(img) => {
            let rgba = img.to_rgba8();
            let (w, h) = rgba.dimensions();
            Some(ColorImage::from_rgba_unmultiplied([w as usize, h as usize], rgba.as_raw()))
        }
        Err(e) => {
            debug!(error = %e, "undecodable image data");
            None
        }
    }
}

/// Texture coordinates that scale an image to cover `target` without
/// distortion, cropping the overflow equally on both sides.
pub fn cover_uv(image: Vec2, target: Vec2) -> Rect {
    let full = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
    if image.x <= 0.0 || image.y <= 0.0 || target.x <= 0.0 || target.y <= 0.0 {
        return full;
    }
    let image_aspect = image.x / image.y;
    let target_aspect = target.x / target.y;
    if image_aspect > target_aspect {
        let visible = target_aspect / image_aspect;
        let margin = (1.0 - visible) / 2.0;
        Rect::from_min_max(Pos2::new(margin, 0.0), Pos2::new(1.0 - margin, 1.0))
    } else {
        let visible = image_aspect / target_aspect;
        let margin = (1.0 - visible) / 2.0;
        Rect::from_min_max(Pos2::new(0.0, margin), Pos2::new(1.0, 1.0 - margin))
    }
}

/// Icon textures cached by file path, plus the wallpaper.
#[derive(Default)]
pub struct TextureCache {
    /// `None` remembers that a file's icon could not be decoded
    icons: HashMap<PathBuf, Option<TextureHandle>>,
    wallpaper: Option<TextureHandle>,
}

impl TextureCache {
    pub fn icon(&mut self, ctx: &Context, file: &DesktopFile) -> Option<&TextureHandle> {
        if file.icon.is_empty() {
            return None;
        }
        self.icons
            .entry(file.path.clone())
            .or_insert_with(|| {
                decode_color_image(&file.icon).map(|img| {
                    ctx.load_texture(format!("icon_{}", file.path.display()), img, TextureOptions::NEAREST)
                })
            })
            .as_ref()
    }

    pub fn clear_icons(&mut self) {
        self.icons.clear();
    }

    pub fn set_wallpaper(&mut self, ctx: &Context, uri: Option<&str>) {
        self.wallpaper = uri
            .and_then(decode_color_image)
            .map(|img| ctx.load_texture("wallpaper", img, TextureOptions::LINEAR));
    }

    pub fn wallpaper(&self) -> Option<&TextureHandle> {
        self.wallpaper.as_ref()
    }
}
