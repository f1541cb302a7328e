//! 価格・スコア・画像URLの表示整形

use crate::config::IMAGES_PATH;

/// 価格をドル表記（小数2桁）にする。未設定や0は `$0.00`。
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) if p != 0.0 && p.is_finite() => format!("${}", to_fixed_2(p)),
        _ => "$0.00".to_string(),
    }
}

/// 小数2桁。ちょうど半セントのときは絶対値が大きい側に丸める（`toFixed(2)` と同じ）
fn to_fixed_2(p: f64) -> String {
    // 2進で正確に半セントになるのは 1/8 の奇数倍だけ
    let eighths = p * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        let cents = (p * 100.0).round();
        return format!("{:.2}", cents / 100.0);
    }
    format!("{:.2}", p)
}

/// スコアを四捨五入した整数パーセントにする
pub fn format_score(score: f64) -> String {
    format!("{}%", score_percentage(score))
}

/// 0.5 は切り上げる（`Math.round` と同じ丸め）
fn score_percentage(score: f64) -> i64 {
    (score * 100.0 + 0.5).floor() as i64
}

/// `{base}/images/{relative}` を組み立てる
pub fn join_image_url(base: &str, relative: &str) -> String {
    format!(
        "{}{}/{}",
        base.trim_end_matches('/'),
        IMAGES_PATH,
        relative.trim_start_matches('/')
    )
}
