//! ネイティブ用の検索クライアント（reqwest）
//!
//! CLIとデスクトップアプリから使う。WASM側は `fetch` を直接呼ぶ。

use std::time::Duration;

use reqwest::multipart::{Form, Part};

use crate::config::ApiConfig;
use crate::error::SearchError;
use crate::search::{check_status, parse_search_response, IMAGE_FIELD};
use crate::types::{BackendStatus, Match};
use crate::upload::mime_for_file_name;

/// 送信する画像
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// MIME はファイル名から推定する
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = mime_for_file_name(&file_name).to_string();
        Self {
            file_name,
            mime,
            bytes,
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = mime.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl SearchClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// タイムアウト未指定なら reqwest の既定動作に任せる
    pub fn with_timeout(config: ApiConfig, timeout: Option<Duration>) -> Result<Self, SearchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| SearchError::Transport(e.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// `POST /api/search`（multipart, field `image`）
    pub async fn search(&self, upload: ImageUpload) -> Result<Vec<Match>, SearchError> {
        let url = self.config.search_url();
        log::debug!(
            "POST {} ({}, {} bytes, {})",
            url,
            upload.file_name,
            upload.bytes.len(),
            upload.mime
        );

        let part = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.mime)
            .map_err(|e| SearchError::Transport(e.to_string()))?;
        let form = Form::new().part(IMAGE_FIELD, part);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        check_status(response.status().as_u16())?;

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;
        parse_search_response(&body)
    }

    /// `GET /` でバックエンドの稼働確認
    pub async fn status(&self) -> Result<BackendStatus, SearchError> {
        let response = self
            .http
            .get(self.config.status_url())
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        check_status(response.status().as_u16())?;

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| SearchError::Decode(e.to_string()))
    }

    /// 商品画像 `GET /images/{relative}` を取得
    pub async fn fetch_image(&self, relative: &str) -> Result<Vec<u8>, SearchError> {
        let response = self
            .http
            .get(self.config.image_url(relative))
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        check_status(response.status().as_u16())?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
