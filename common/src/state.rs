//! 画面状態と状態遷移
//!
//! Web・デスクトップの両方がこの状態機械を使う。
//! 検索ごとにチケットを発行し、最新チケットの応答だけを反映する。

use crate::error::SearchError;
use crate::types::Match;

/// 発行済み検索の識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

impl SearchTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// 結果エリアに表示するもの（常にどれか1つ）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsView {
    Loading,
    Error,
    Results,
    Empty,
}

impl ResultsView {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultsView::Loading => "loading",
            ResultsView::Error => "error",
            ResultsView::Results => "results",
            ResultsView::Empty => "empty",
        }
    }
}

/// ページの状態
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub results: Vec<Match>,
    pub is_loading: bool,
    /// 空文字はエラーなし
    pub error: String,
    pub preview: Option<String>,
    pub is_dragging: bool,
    latest_ticket: u64,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 画像選択直後の遷移。置き換えられたプレビューを返すので呼び出し側で解放する。
    pub fn begin_search(&mut self, preview: String) -> (SearchTicket, Option<String>) {
        self.results.clear();
        self.error.clear();
        self.is_loading = true;
        let released = self.preview.replace(preview);

        self.latest_ticket += 1;
        let ticket = SearchTicket(self.latest_ticket);
        log::debug!("search #{} started", ticket.0);
        (ticket, released)
    }

    /// 応答を反映する。古いチケットなら何もせず false。
    pub fn complete(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<Vec<Match>, SearchError>,
    ) -> bool {
        if !self.is_current(ticket) {
            log::debug!(
                "search #{} superseded by #{}, response dropped",
                ticket.0,
                self.latest_ticket
            );
            return false;
        }

        match outcome {
            Ok(matches) => {
                log::info!("search #{} returned {} matches", ticket.0, matches.len());
                self.results = matches;
                self.error.clear();
            }
            Err(err) => {
                log::warn!("search #{} failed: {}", ticket.0, err);
                self.results.clear();
                self.error = err.user_message().to_string();
            }
        }
        self.is_loading = false;
        true
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        ticket.0 == self.latest_ticket
    }

    /// 「別の画像をアップロード」。実行中の検索も無効にする。
    pub fn reset(&mut self) -> Option<String> {
        self.results.clear();
        self.error.clear();
        self.is_loading = false;
        self.latest_ticket += 1;
        self.preview.take()
    }

    pub fn drag_over(&mut self) {
        self.is_dragging = true;
    }

    pub fn drag_leave(&mut self) {
        self.is_dragging = false;
    }

    pub fn drop_received(&mut self) {
        self.is_dragging = false;
    }

    pub fn view(&self) -> ResultsView {
        if self.is_loading {
            ResultsView::Loading
        } else if !self.error.is_empty() {
            ResultsView::Error
        } else if !self.results.is_empty() {
            ResultsView::Results
        } else {
            ResultsView::Empty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SEARCH_FAILED_MESSAGE;
    use crate::types::Product;

    fn hit(id: i64, score: f64) -> Match {
        Match {
            product: Product {
                id: id.into(),
                name: format!("Item {id}"),
                price: Some(25.0 + id as f64),
                image_url: format!("product_{id}.jpg"),
                category: None,
                description: None,
            },
            score,
        }
    }

    #[test]
    fn test_initial_state_is_empty() {
        let state = UiState::new();
        assert!(state.results.is_empty());
        assert!(!state.is_loading);
        assert!(state.error.is_empty());
        assert!(state.preview.is_none());
        assert!(!state.is_dragging);
        assert_eq!(state.view(), ResultsView::Empty);
    }

    #[test]
    fn test_begin_search_sets_loading_before_completion() {
        let mut state = UiState::new();
        state.error = "old".to_string();
        state.results = vec![hit(1, 0.5)];

        let (_ticket, released) = state.begin_search("blob:one".to_string());

        assert!(state.is_loading);
        assert!(state.results.is_empty());
        assert!(state.error.is_empty());
        assert_eq!(state.preview.as_deref(), Some("blob:one"));
        assert_eq!(released, None);
        assert_eq!(state.view(), ResultsView::Loading);
    }

    #[test]
    fn test_success_replaces_results_in_order() {
        let mut state = UiState::new();
        let (ticket, _) = state.begin_search("blob:one".to_string());
        let response = vec![hit(3, 0.9), hit(1, 0.8), hit(2, 0.7)];

        assert!(state.complete(ticket, Ok(response.clone())));

        assert_eq!(state.results, response);
        assert!(!state.is_loading);
        assert!(state.error.is_empty());
        assert_eq!(state.view(), ResultsView::Results);
    }

    #[test]
    fn test_failure_sets_error_and_clears_loading() {
        for err in [
            SearchError::Status(500),
            SearchError::Transport("offline".to_string()),
        ] {
            let mut state = UiState::new();
            let (ticket, _) = state.begin_search("blob:one".to_string());
            assert!(state.complete(ticket, Err(err)));

            assert!(state.results.is_empty());
            assert_eq!(state.error, SEARCH_FAILED_MESSAGE);
            assert!(!state.is_loading);
            assert_eq!(state.view(), ResultsView::Error);
        }
    }

    #[test]
    fn test_empty_success_shows_placeholder() {
        let mut state = UiState::new();
        let (ticket, _) = state.begin_search("blob:one".to_string());
        state.complete(ticket, Ok(vec![]));
        assert_eq!(state.view(), ResultsView::Empty);
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut state = UiState::new();
        let (first, _) = state.begin_search("blob:one".to_string());
        let (second, released) = state.begin_search("blob:two".to_string());
        assert_eq!(released.as_deref(), Some("blob:one"));

        assert!(state.complete(second, Ok(vec![hit(2, 0.6)])));
        assert!(!state.complete(first, Err(SearchError::Status(500))));

        assert_eq!(state.results, vec![hit(2, 0.6)]);
        assert!(state.error.is_empty());
        assert_eq!(state.preview.as_deref(), Some("blob:two"));
    }

    #[test]
    fn test_stale_success_does_not_end_loading() {
        let mut state = UiState::new();
        let (first, _) = state.begin_search("blob:one".to_string());
        let (_second, _) = state.begin_search("blob:two".to_string());

        assert!(!state.complete(first, Ok(vec![hit(1, 0.9)])));
        assert!(state.is_loading);
        assert!(state.results.is_empty());
    }

    #[test]
    fn test_reset_from_any_state() {
        let mut loaded = UiState::new();
        let (t, _) = loaded.begin_search("blob:a".to_string());
        loaded.complete(t, Ok(vec![hit(1, 0.9)]));

        let mut failed = UiState::new();
        let (t, _) = failed.begin_search("blob:b".to_string());
        failed.complete(t, Err(SearchError::Status(503)));

        let mut in_flight = UiState::new();
        in_flight.begin_search("blob:c".to_string());

        for (mut state, expected_preview) in [
            (loaded, Some("blob:a")),
            (failed, Some("blob:b")),
            (in_flight, Some("blob:c")),
            (UiState::new(), None),
        ] {
            let released = state.reset();
            assert_eq!(released.as_deref(), expected_preview);
            assert!(state.preview.is_none());
            assert!(state.results.is_empty());
            assert!(state.error.is_empty());
            assert_eq!(state.view(), ResultsView::Empty);
        }
    }

    #[test]
    fn test_reset_invalidates_in_flight_search() {
        let mut state = UiState::new();
        let (ticket, _) = state.begin_search("blob:a".to_string());
        state.reset();

        assert!(!state.complete(ticket, Ok(vec![hit(1, 0.9)])));
        assert!(state.results.is_empty());
        assert!(state.preview.is_none());
    }

    #[test]
    fn test_drag_over_then_leave() {
        let mut state = UiState::new();
        let (t, _) = state.begin_search("blob:a".to_string());
        state.complete(t, Ok(vec![hit(1, 0.9)]));
        let before = state.clone();

        state.drag_over();
        assert!(state.is_dragging);
        state.drag_leave();

        assert!(!state.is_dragging);
        assert_eq!(state.results, before.results);
        assert_eq!(state.preview, before.preview);
    }

    #[test]
    fn test_drop_clears_dragging() {
        let mut state = UiState::new();
        state.drag_over();
        state.drop_received();
        assert!(!state.is_dragging);
    }

    #[test]
    fn test_exactly_one_view_for_every_combination() {
        let results_options = [vec![], vec![hit(1, 0.5)]];
        for is_loading in [false, true] {
            for error in ["", SEARCH_FAILED_MESSAGE] {
                for results in &results_options {
                    let state = UiState {
                        results: results.clone(),
                        is_loading,
                        error: error.to_string(),
                        ..UiState::default()
                    };
                    let shown = [
                        ResultsView::Loading,
                        ResultsView::Error,
                        ResultsView::Results,
                        ResultsView::Empty,
                    ]
                    .iter()
                    .filter(|v| **v == state.view())
                    .count();
                    assert_eq!(shown, 1);

                    let expected = if is_loading {
                        ResultsView::Loading
                    } else if !error.is_empty() {
                        ResultsView::Error
                    } else if !results.is_empty() {
                        ResultsView::Results
                    } else {
                        ResultsView::Empty
                    };
                    assert_eq!(state.view(), expected);
                }
            }
        }
    }
}
