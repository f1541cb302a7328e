//! バックエンドAPI呼び出し

pub mod search;

pub use search::search_image;
