use crate::error::{MatcherError, Result};
use product_matcher_common::{is_image_file_name, ImageUpload};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub file_name: String,
}

/// 画像ファイル1枚、またはフォルダ直下の画像を列挙する
pub fn scan_path(path: &Path) -> Result<Vec<ImageInfo>> {
    if path.is_file() {
        if !has_image_extension(path) {
            return Err(MatcherError::NotAnImage(path.display().to_string()));
        }
        return Ok(vec![image_info(path)]);
    }
    scan_folder(path)
}

pub fn scan_folder(folder: &Path) -> Result<Vec<ImageInfo>> {
    if !folder.exists() {
        return Err(MatcherError::FolderNotFound(folder.display().to_string()));
    }

    let mut images: Vec<ImageInfo> = WalkDir::new(folder)
        .max_depth(1) // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && has_image_extension(path))
        .map(|path| image_info(&path))
        .collect();

    // ファイル名でソート
    images.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(images)
}

/// ファイルを読み込み、中身から画像形式を判定して送信用データにする
pub fn load_upload(info: &ImageInfo) -> Result<ImageUpload> {
    if !info.path.exists() {
        return Err(MatcherError::FileNotFound(info.path.display().to_string()));
    }
    let bytes = std::fs::read(&info.path)?;
    let format = image::guess_format(&bytes)
        .map_err(|_| MatcherError::NotAnImage(info.path.display().to_string()))?;

    Ok(ImageUpload::new(info.file_name.clone(), bytes).with_mime(format.to_mime_type()))
}

fn image_info(path: &Path) -> ImageInfo {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    ImageInfo {
        path: path.to_path_buf(),
        file_name,
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.file_name()
        .map(|name| is_image_file_name(&name.to_string_lossy()))
        .unwrap_or(false)
}
