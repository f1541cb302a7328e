//! `/api/search` のリクエスト定数とレスポンス解析

use crate::error::SearchError;
use crate::types::Match;

/// multipart のフィールド名
pub const IMAGE_FIELD: &str = "image";

/// HTTPステータスを成否に変換する
pub fn check_status(status: u16) -> Result<(), SearchError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(SearchError::Status(status))
    }
}

/// レスポンス本文（JSON配列）を解析する
pub fn parse_search_response(body: &str) -> Result<Vec<Match>, SearchError> {
    serde_json::from_str(body).map_err(|e| SearchError::Decode(e.to_string()))
}
