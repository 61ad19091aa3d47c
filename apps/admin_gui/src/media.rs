//! Image handling for the challenge forms: a picked file becomes an
//! embeddable data URL, and data URLs decode back into a downscaled RGBA
//! preview for the UI texture.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::GenericImageView;

#[derive(Clone)]
pub struct PreviewImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            matches!(
                ext.to_ascii_lowercase().as_str(),
                "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp"
            )
        })
        .unwrap_or(false)
}

pub fn file_to_data_url(path: &Path) -> Result<String> {
    let mime = mime_guess::from_path(path)
        .first_raw()
        .ok_or_else(|| anyhow!("unrecognized image type: {}", path.display()))?;
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

/// Raw bytes of an embedded `data:` URL; `None` for remote URLs or a
/// malformed payload.
pub fn data_url_bytes(url: &str) -> Option<Vec<u8>> {
    let rest = url.strip_prefix("data:")?;
    let (_, payload) = rest.split_once(";base64,")?;
    STANDARD.decode(payload).ok()
}

pub fn decode_preview_image(bytes: &[u8]) -> Result<PreviewImage> {
    let decoded = image::load_from_memory(bytes).context("failed to decode image")?;
    let (orig_w, orig_h) = decoded.dimensions();
    let max_dimension = 360.0_f32;
    let scale = (max_dimension / (orig_w.max(orig_h) as f32)).min(1.0);
    let resized = if scale < 1.0 {
        decoded.resize(
            (orig_w as f32 * scale).max(1.0) as u32,
            (orig_h as f32 * scale).max(1.0) as u32,
            image::imageops::FilterType::Triangle,
        )
    } else {
        decoded
    };
    let rgba = resized.to_rgba8();
    let width = rgba.width() as usize;
    let height = rgba.height() as usize;
    Ok(PreviewImage {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}
