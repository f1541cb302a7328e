use product_matcher_common::SearchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatcherError {
    #[error("config error: {0}")]
    Config(String),

    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("folder not found: {0}")]
    FolderNotFound(String),

    #[error("not an image file: {0}")]
    NotAnImage(String),

    #[error("no images found in {0}")]
    NoImagesFound(String),

    #[error("search failed: {0}")]
    Search(#[from] SearchError),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<product_matcher_common::Error> for MatcherError {
    fn from(err: product_matcher_common::Error) -> Self {
        match err {
            product_matcher_common::Error::Io(e) => MatcherError::Io(e),
            product_matcher_common::Error::Json(e) => MatcherError::JsonParse(e),
            product_matcher_common::Error::Config(msg) => MatcherError::Config(msg),
            product_matcher_common::Error::Search(e) => MatcherError::Search(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, MatcherError>;
