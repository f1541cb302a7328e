//! UIコンポーネント

pub mod header;
pub mod upload_panel;
pub mod product_card;
pub mod results_panel;
