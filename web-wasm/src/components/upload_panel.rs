//! アップロードパネルコンポーネント
//!
//! 状態を持たない。プレビューがなければドロップゾーン、あればプレビューとリセットボタン。

use leptos::prelude::*;
use web_sys::{DragEvent, File, HtmlInputElement};
use product_matcher_common::upload::dropzone_class;
use product_matcher_common::{UploadPanelMode, ACCEPT_IMAGES};

#[component]
pub fn UploadPanel<FS, FO, FL, FD, FR>(
    #[prop(into)] mode: Signal<UploadPanelMode>,
    on_file_selected: FS,
    on_drag_over: FO,
    on_drag_leave: FL,
    on_drop: FD,
    on_reset: FR,
) -> impl IntoView
where
    FS: Fn(File) + 'static + Clone + Send,
    FO: Fn(DragEvent) + 'static + Clone + Send,
    FL: Fn(DragEvent) + 'static + Clone + Send,
    FD: Fn(DragEvent) + 'static + Clone + Send,
    FR: Fn(()) + 'static + Clone + Send,
{
    view! {
        <div class="panel">
            {move || match mode.get() {
                UploadPanelMode::Dropzone { dragging } => {
                    let on_file_selected = on_file_selected.clone();
                    let on_drag_over = on_drag_over.clone();
                    let on_drag_leave = on_drag_leave.clone();
                    let on_drop = on_drop.clone();
                    view! {
                        <label
                            for="file-upload"
                            class=dropzone_class(dragging)
                            on:dragover=move |ev| on_drag_over(ev)
                            on:dragleave=move |ev| on_drag_leave(ev)
                            on:drop=move |ev| on_drop(ev)
                        >
                            <div class="upload-icon">"☁"</div>
                            <p class="dropzone-title">"Drop file here"</p>
                            <p class="dropzone-or">"OR"</p>
                            <div class="upload-button">"Upload File"</div>
                            <input
                                id="file-upload"
                                type="file"
                                class="hidden-input"
                                accept=ACCEPT_IMAGES
                                on:change=move |ev| {
                                    let input: HtmlInputElement = event_target(&ev);
                                    if let Some(file) = input.files().and_then(|files| files.get(0)) {
                                        on_file_selected(file);
                                    }
                                    // 同じファイルを続けて選んでも change が発火するように
                                    input.set_value("");
                                }
                            />
                        </label>
                    }
                    .into_any()
                }
                UploadPanelMode::Preview { src } => {
                    let on_reset = on_reset.clone();
                    view! {
                        <div class="preview-container">
                            <img src=src alt="Uploaded preview" class="preview-image" />
                        </div>
                        <button
                            class="upload-button reset-button"
                            on:click=move |_| on_reset(())
                        >
                            "Upload Another Image"
                        </button>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
