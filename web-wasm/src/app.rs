//! メインアプリケーションコンポーネント（ページコントローラ）
//!
//! 画面状態は `UiState` ひとつにまとめ、検索はチケット付きで発行する。

use gloo::file::ObjectUrl;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::{DragEvent, File};
use product_matcher_common::{ApiConfig, CardView, UiState, UploadPanelMode, API_URL_ENV};
use crate::api::search_image;
use crate::components::{
    header::Header,
    upload_panel::UploadPanel,
    results_panel::ResultsPanel,
};

/// ビルド時の `PRODUCT_MATCHER_API_URL` から接続先を決める
pub fn api_config() -> ApiConfig {
    ApiConfig::resolve([option_env!("PRODUCT_MATCHER_API_URL")]).unwrap_or_else(|e| {
        log::warn!("{} is invalid ({}), using default", API_URL_ENV, e);
        ApiConfig::default()
    })
}

#[component]
pub fn App() -> impl IntoView {
    let config = StoredValue::new(api_config());
    let state = RwSignal::new(UiState::new());
    // 差し替え・リセット時に drop されて revoke される
    let preview_url = StoredValue::new_local(None::<ObjectUrl>);

    // 画像1枚を検索する
    let process_image = move |file: File| {
        let blob: web_sys::Blob = file.clone().into();
        let object_url = ObjectUrl::from(gloo::file::Blob::from(blob));
        let src = object_url.to_string();
        let Some((ticket, _released)) = state.try_update(|s| s.begin_search(src)) else {
            return;
        };
        preview_url.set_value(Some(object_url));

        let search_url = config.with_value(|c| c.search_url());
        log::info!("searching with {} ({} bytes)", file.name(), file.size());
        spawn_local(async move {
            let outcome = search_image(&search_url, &file).await;
            state.update(|s| {
                s.complete(ticket, outcome);
            });
        });
    };

    let on_file_selected = move |file: File| process_image(file);

    let on_drag_over = move |ev: DragEvent| {
        ev.prevent_default();
        state.update(|s| s.drag_over());
    };

    let on_drag_leave = move |ev: DragEvent| {
        ev.prevent_default();
        state.update(|s| s.drag_leave());
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        state.update(|s| s.drop_received());

        if let Some(dt) = ev.data_transfer() {
            if let Some(file) = dt.files().and_then(|files| files.get(0)) {
                process_image(file);
                let _ = dt.clear_data();
            }
        }
    };

    let on_reset = move |_: ()| {
        state.update(|s| {
            s.reset();
        });
        preview_url.set_value(None);
    };

    let mode = Memo::new(move |_| state.with(UploadPanelMode::from_state));
    let current = Memo::new(move |_| state.with(|s| s.view()));
    let error = Memo::new(move |_| state.with(|s| s.error.clone()));
    let cards = Memo::new(move |_| {
        state.with(|s| config.with_value(|c| CardView::from_matches(&s.results, c)))
    });

    view! {
        <main class="main">
            <div class="container">
                <Header />

                <UploadPanel
                    mode=mode
                    on_file_selected=on_file_selected
                    on_drag_over=on_drag_over
                    on_drag_leave=on_drag_leave
                    on_drop=on_drop
                    on_reset=on_reset
                />

                <ResultsPanel current=current error=error cards=cards />
            </div>
        </main>
    }
}
