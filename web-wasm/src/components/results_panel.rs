//! 結果エリア（読込中 → エラー → 結果一覧 → プレースホルダ の順に1つだけ表示）

use leptos::prelude::*;
use product_matcher_common::{CardView, ResultsView};
use crate::components::product_card::ProductCard;

#[component]
pub fn ResultsPanel(
    #[prop(into)] current: Signal<ResultsView>,
    #[prop(into)] error: Signal<String>,
    #[prop(into)] cards: Signal<Vec<CardView>>,
) -> impl IntoView {
    view! {
        <div class="results" data-view=move || current.get().as_str()>
            {move || match current.get() {
                ResultsView::Loading => view! {
                    <div class="placeholder">
                        <div class="spinner"></div>
                        <p>"Finding matches..."</p>
                    </div>
                }
                .into_any(),
                ResultsView::Error => view! {
                    <div class="placeholder error">{move || error.get()}</div>
                }
                .into_any(),
                ResultsView::Results => view! {
                    <div class="results-grid">
                        <For
                            each=move || cards.get()
                            key=|card| card.key.clone()
                            children=|card| view! { <ProductCard card=card /> }
                        />
                    </div>
                }
                .into_any(),
                ResultsView::Empty => view! {
                    <div class="placeholder">
                        <div class="placeholder-icon">"🖼"</div>
                        <p>"Matching products will appear here."</p>
                    </div>
                }
                .into_any(),
            }}
        </div>
    }
}
