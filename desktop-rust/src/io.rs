use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::Path;

use product_matcher_common::ImageUpload;

pub fn load_upload(path: &Path) -> Result<ImageUpload> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("image");
    upload_from_bytes(name, bytes)
}

/// Rejects anything the image crate does not recognise as an image.
pub fn upload_from_bytes(name: &str, bytes: Vec<u8>) -> Result<ImageUpload> {
    let format = image::guess_format(&bytes).map_err(|_| anyhow!("{name} is not an image"))?;
    Ok(ImageUpload::new(name, bytes).with_mime(format.to_mime_type()))
}

pub fn decode_thumbnail(bytes: &[u8], max_width: u32, max_height: u32) -> Option<([usize; 2], Vec<u8>)> {
    let image = image::load_from_memory(bytes).ok()?;
    let thumb = image.thumbnail(max_width, max_height);
    let size = [thumb.width() as usize, thumb.height() as usize];
    Some((size, thumb.to_rgba8().into_raw()))
}
