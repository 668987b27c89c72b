//! `data:` URIs for icons and wallpapers handed to the renderer.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

pub fn encode(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Split a base64 `data:` URI into its MIME type and payload.
/// Returns `None` for anything else, including non-base64 data URIs.
pub fn decode(uri: &str) -> Option<(String, Vec<u8>)> {
    let rest = uri.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    let mime = meta.strip_suffix(";base64")?;
    let bytes = STANDARD.decode(payload.trim()).ok()?;
    Some((mime.to_string(), bytes))
}

/// MIME type for an image file extension, falling back to sniffing the bytes.
pub fn image_mime(ext: &str, bytes: &[u8]) -> Option<&'static str> {
    image::ImageFormat::from_extension(ext)
        .or_else(|| image::guess_format(bytes).ok())
        .map(|format| format.to_mime_type())
}
