//! 検索結果の型定義
//!
//! バックエンド `/api/search` のレスポンスと共有される型:
//! - Product: カタログ商品
//! - Match: 商品と類似度スコアの組

use std::fmt;

use serde::{Deserialize, Serialize};

/// 商品ID（バックエンドは整数を返すが文字列IDも受け付ける）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Int(i64),
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Int(id) => write!(f, "{id}"),
            ProductId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        ProductId::Int(id)
    }
}

/// カタログ商品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,

    #[serde(default)]
    pub price: Option<f64>,

    /// `/images/` からの相対パス
    pub image_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// 検索ヒット（スコアは 0.0〜1.0）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub product: Product,
    pub score: f64,
}

/// `GET /` の応答
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendStatus {
    pub status: String,
}
