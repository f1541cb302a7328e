//! 結果カードの表示モデル

use crate::config::ApiConfig;
use crate::format::{format_price, format_score};
use crate::types::{Match, ProductId};

/// 1件の検索ヒットを描画するための値
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub key: ProductId,
    pub title: String,
    pub price: String,
    pub score: String,
    pub image_src: String,
    pub category: Option<String>,
}

impl CardView {
    pub fn new(hit: &Match, config: &ApiConfig) -> Self {
        let product = &hit.product;
        Self {
            key: product.id.clone(),
            title: product.name.clone(),
            price: format_price(product.price),
            score: format_score(hit.score),
            image_src: config.image_url(&product.image_url),
            category: product.category.clone().filter(|c| !c.trim().is_empty()),
        }
    }

    /// 結果一覧をまとめて変換（順序はレスポンス順のまま）
    pub fn from_matches(matches: &[Match], config: &ApiConfig) -> Vec<Self> {
        matches.iter().map(|m| Self::new(m, config)).collect()
    }
}
