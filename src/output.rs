//! 検索結果の出力（テキストカード / JSON）

use product_matcher_common::{ApiConfig, CardView, Match};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// 1枚の問い合わせ画像に対する結果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchReport {
    pub query: String,
    pub matches: Vec<Match>,
}

/// 結果をカード形式のテキストにする（`limit` は表示件数のみ制限）
pub fn render_matches(matches: &[Match], config: &ApiConfig, limit: Option<usize>) -> String {
    if matches.is_empty() {
        return "  No matching products.\n".to_string();
    }

    let shown = limit.unwrap_or(matches.len()).min(matches.len());
    let mut out = String::new();
    for (rank, card) in CardView::from_matches(&matches[..shown], config)
        .iter()
        .enumerate()
    {
        let _ = write!(out, "  {:>2}. {}", rank + 1, card.title);
        if let Some(category) = &card.category {
            let _ = write!(out, "  [{}]", category);
        }
        out.push('\n');
        let _ = writeln!(out, "      Price: {:<10} Match: {}", card.price, card.score);
        let _ = writeln!(out, "      {}", card.image_src);
    }
    if shown < matches.len() {
        let _ = writeln!(out, "  ... {} more", matches.len() - shown);
    }
    out
}

pub fn reports_to_json(reports: &[SearchReport]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(reports)
}
