//! Visual Product Matcher CLI
//!
//! 画像をバックエンドの `/api/search` に送り、類似商品を表示する。

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod scanner;
pub mod search;
