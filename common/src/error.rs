//! エラー型定義

use thiserror::Error;

/// UIに表示する唯一のエラーメッセージ
pub const SEARCH_FAILED_MESSAGE: &str = "Failed to fetch results. Is the backend server running?";

/// 検索リクエストの失敗理由
///
/// 画面上はすべて [`SEARCH_FAILED_MESSAGE`] にまとめられる。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("HTTP error! Status: {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid search response: {0}")]
    Decode(String),
}

impl SearchError {
    pub fn user_message(&self) -> &'static str {
        SEARCH_FAILED_MESSAGE
    }
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Search error: {0}")]
    Search(#[from] SearchError),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_error_display_status() {
        let error = SearchError::Status(502);
        assert_eq!(format!("{}", error), "HTTP error! Status: 502");
    }

    #[test]
    fn test_search_error_user_message_is_uniform() {
        let errors = [
            SearchError::Status(500),
            SearchError::Transport("connection refused".to_string()),
            SearchError::Decode("expected array".to_string()),
        ];
        for err in errors {
            assert_eq!(err.user_message(), SEARCH_FAILED_MESSAGE);
        }
    }

    #[test]
    fn test_error_display_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        let display = format!("{}", error);
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_error_display_config() {
        let error = Error::Config("API URL is empty".to_string());
        assert_eq!(format!("{}", error), "Config error: API URL is empty");
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_error_from_search() {
        let error: Error = SearchError::Status(404).into();
        assert!(matches!(error, Error::Search(SearchError::Status(404))));
        assert!(format!("{}", error).contains("404"));
    }
}
