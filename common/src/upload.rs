//! アップロードパネルの表示モード

use crate::state::UiState;

/// ファイル選択ダイアログの accept 属性
pub const ACCEPT_IMAGES: &str = "image/*";

/// 受け付ける画像の拡張子（小文字）
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadPanelMode {
    Dropzone { dragging: bool },
    Preview { src: String },
}

impl UploadPanelMode {
    pub fn from_state(state: &UiState) -> Self {
        match &state.preview {
            Some(src) => UploadPanelMode::Preview { src: src.clone() },
            None => UploadPanelMode::Dropzone {
                dragging: state.is_dragging,
            },
        }
    }
}

/// ドロップゾーンの class 属性
pub fn dropzone_class(dragging: bool) -> &'static str {
    if dragging {
        "dropzone dragging"
    } else {
        "dropzone"
    }
}

pub fn is_image_file_name(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// 拡張子から MIME を推定（不明なら `application/octet-stream`）
pub fn mime_for_file_name(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}
