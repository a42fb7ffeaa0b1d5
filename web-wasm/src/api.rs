//! 写真API呼び出し（fetch）

use photo_gallery_common::{parse_page_response, Error, PageRequest, PageResult, Result};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

const PHOTOS_API_PATH: &str = "/api/photos";

fn js_error(value: JsValue) -> Error {
    Error::Endpoint(
        value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}

/// GETして本文を文字列で返す
async fn get_text(url: &str) -> Result<String> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
    request
        .headers()
        .set("Accept", "application/json")
        .map_err(js_error)?;

    let window = web_sys::window().ok_or_else(|| Error::Endpoint("window がありません".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    let resp: Response = resp_value.dyn_into().map_err(js_error)?;

    if !resp.ok() {
        return Err(Error::Endpoint(format!("HTTP {}", resp.status())));
    }

    let text = JsFuture::from(resp.text().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    text.as_string()
        .ok_or_else(|| Error::MalformedResponse("本文が文字列ではありません".into()))
}

/// 1ページ分の写真を取得
pub async fn fetch_page(request: &PageRequest) -> Result<PageResult> {
    let url = format!("{}?{}", PHOTOS_API_PATH, request.query_string());
    let body = get_text(&url).await?;
    parse_page_response(&body, request)
}
