//! Visual Product Matcher Common Library
//!
//! Web(WASM)、デスクトップ、CLIで共有される型・状態遷移・表示ルール

pub mod types;
pub mod error;
pub mod config;
pub mod format;
pub mod card;
pub mod state;
pub mod upload;
pub mod search;
#[cfg(feature = "client")]
pub mod client;

pub use types::{Match, Product, ProductId, BackendStatus};
pub use error::{Error, Result, SearchError, SEARCH_FAILED_MESSAGE};
pub use config::{ApiConfig, API_URL_ENV, DEFAULT_API_URL};
pub use format::{format_price, format_score, join_image_url};
pub use card::CardView;
pub use state::{ResultsView, SearchTicket, UiState};
pub use upload::{is_image_file_name, UploadPanelMode, ACCEPT_IMAGES, IMAGE_EXTENSIONS};
pub use search::{parse_search_response, IMAGE_FIELD};
#[cfg(feature = "client")]
pub use client::{ImageUpload, SearchClient};
