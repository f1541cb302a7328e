use crate::error::{MatcherError, Result};
use product_matcher_common::{ApiConfig, API_URL_ENV};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| MatcherError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("product-matcher").join("config.json"))
    }

    /// `--api-url` → 環境変数 → 設定ファイル → デフォルト の順
    pub fn api_config(&self, flag: Option<&str>) -> Result<ApiConfig> {
        let env = std::env::var(API_URL_ENV).ok();
        self.api_config_with_env(flag, env.as_deref())
    }

    pub fn api_config_with_env(&self, flag: Option<&str>, env: Option<&str>) -> Result<ApiConfig> {
        Ok(ApiConfig::resolve([flag, env, self.api_url.as_deref()])?)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// 検証してから保存する
    pub fn set_api_url(&mut self, url: &str) -> Result<()> {
        let validated = ApiConfig::new(url)?;
        self.api_url = Some(validated.base_url().to_string());
        self.save()
    }

    pub fn set_timeout(&mut self, secs: u64) -> Result<()> {
        self.timeout_seconds = if secs == 0 { None } else { Some(secs) };
        self.save()
    }
}
