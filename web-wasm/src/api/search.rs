//! 画像検索 `POST /api/search`（fetch + FormData）

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, RequestMode, Response};
use product_matcher_common::search::check_status;
use product_matcher_common::{parse_search_response, Match, SearchError, IMAGE_FIELD};

/// 画像1枚を multipart で送信し、検索結果を返す
///
/// 非2xx・通信失敗・解析失敗はすべて `SearchError` になる
pub async fn search_image(search_url: &str, file: &File) -> Result<Vec<Match>, SearchError> {
    let form = FormData::new().map_err(transport)?;
    form.append_with_blob_and_filename(IMAGE_FIELD, file, &file.name())
        .map_err(transport)?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&form);

    let request = Request::new_with_str_and_init(search_url, &opts).map_err(transport)?;

    let window = web_sys::window()
        .ok_or_else(|| SearchError::Transport("window is not available".to_string()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport)?;
    let resp: Response = resp_value.dyn_into().map_err(transport)?;

    check_status(resp.status())?;

    let text = JsFuture::from(resp.text().map_err(transport)?)
        .await
        .map_err(transport)?;
    let body = text
        .as_string()
        .ok_or_else(|| SearchError::Decode("response body is not text".to_string()))?;

    parse_search_response(&body)
}

fn transport(err: JsValue) -> SearchError {
    SearchError::Transport(describe_js_error(&err))
}

/// JsValue のエラーを読める文字列にする
pub fn describe_js_error(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}
