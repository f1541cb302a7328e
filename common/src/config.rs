//! バックエンドAPIのURL設定

use crate::error::{Error, Result};

/// API base URL を渡す環境変数
pub const API_URL_ENV: &str = "PRODUCT_MATCHER_API_URL";

/// 未設定時の API base URL
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

pub const SEARCH_PATH: &str = "/api/search";
pub const IMAGES_PATH: &str = "/images";

/// バックエンドの接続先
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl ApiConfig {
    /// 末尾の `/` を除いて保持する
    pub fn new(base_url: &str) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(Error::Config("API URL is empty".into()));
        }
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(Error::Config(format!(
                "API URL must start with http:// or https://: {trimmed}"
            )));
        }
        Ok(Self {
            base_url: trimmed.to_string(),
        })
    }

    /// 候補を優先順に試し、最初の空でない値を採用する。どれもなければデフォルト。
    pub fn resolve<'a, I>(candidates: I) -> Result<Self>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        candidates
            .into_iter()
            .flatten()
            .find(|v| !v.trim().is_empty())
            .map(Self::new)
            .unwrap_or_else(|| Ok(Self::default()))
    }

    /// 環境変数 [`API_URL_ENV`] から読む
    pub fn from_env() -> Result<Self> {
        let value = std::env::var(API_URL_ENV).ok();
        Self::resolve([value.as_deref()])
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn search_url(&self) -> String {
        format!("{}{}", self.base_url, SEARCH_PATH)
    }

    pub fn status_url(&self) -> String {
        format!("{}/", self.base_url)
    }

    pub fn image_url(&self, relative: &str) -> String {
        crate::format::join_image_url(&self.base_url, relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url(), "http://127.0.0.1:8000");
        assert_eq!(config.search_url(), "http://127.0.0.1:8000/api/search");
        assert_eq!(config.status_url(), "http://127.0.0.1:8000/");
    }

    #[test]
    fn test_new_strips_trailing_slash() {
        let config = ApiConfig::new("https://matcher.example.com/").unwrap();
        assert_eq!(config.base_url(), "https://matcher.example.com");
        assert_eq!(config.search_url(), "https://matcher.example.com/api/search");
    }

    #[test]
    fn test_new_rejects_empty_and_schemeless() {
        assert!(matches!(ApiConfig::new("  "), Err(Error::Config(_))));
        assert!(matches!(ApiConfig::new("localhost:8000"), Err(Error::Config(_))));
    }

    #[test]
    fn test_resolve_priority() {
        let config = ApiConfig::resolve([None, Some(""), Some("http://a:1"), Some("http://b:2")]).unwrap();
        assert_eq!(config.base_url(), "http://a:1");
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let config = ApiConfig::resolve([None, None]).unwrap();
        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    fn test_image_url() {
        let config = ApiConfig::new("http://127.0.0.1:8000").unwrap();
        assert_eq!(
            config.image_url("product_1.jpg"),
            "http://127.0.0.1:8000/images/product_1.jpg"
        );
    }
}
