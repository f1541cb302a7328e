use product_matcher_common::{BackendStatus, Match, SearchError, SearchTicket};

/// ワーカースレッドからUIへの通知
pub enum UiMessage {
    SearchDone {
        ticket: SearchTicket,
        outcome: Result<Vec<Match>, SearchError>,
    },
    StatusDone(Result<BackendStatus, SearchError>),
}

/// サムネイルの取得元
pub enum ThumbSource {
    /// `/images/` からの相対パス
    Remote(String),
    /// 手元の画像（プレビュー）
    Local(std::sync::Arc<[u8]>),
}

pub struct ThumbData {
    pub key: String,
    pub size: [usize; 2],
    pub pixels: Vec<u8>,
}
