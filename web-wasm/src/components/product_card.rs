//! 検索結果カードコンポーネント

use leptos::prelude::*;
use product_matcher_common::CardView;

#[component]
pub fn ProductCard(card: CardView) -> impl IntoView {
    let CardView {
        title,
        price,
        score,
        image_src,
        category,
        ..
    } = card;

    view! {
        <div class="card">
            <div class="image-container">
                <img src=image_src alt=title.clone() class="card-image" loading="lazy" />
            </div>
            {category.map(|c| view! { <span class="category">{c}</span> })}
            <h3 class="card-title">{title}</h3>
            <p class="price">{price}</p>
            <p class="score">"Match: " <span>{score}</span></p>
        </div>
    }
}
