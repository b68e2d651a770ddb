use shared::protocol::{decode_words, WordsResponse, WORDS_PATH};
use shared::words::SupplierError;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

/// `GET /get-words` from the serving origin.
pub async fn fetch_words() -> Result<WordsResponse, SupplierError> {
    let window =
        web_sys::window().ok_or_else(|| SupplierError::Unavailable("no window".to_string()))?;

    let response = JsFuture::from(window.fetch_with_str(WORDS_PATH))
        .await
        .map_err(js_error)?;
    let response: Response = response.dyn_into().map_err(js_error)?;
    if !response.ok() {
        return Err(SupplierError::Unavailable(format!(
            "HTTP {} {}",
            response.status(),
            response.status_text()
        )));
    }

    let body = JsFuture::from(response.text().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    let body = body
        .as_string()
        .ok_or_else(|| SupplierError::Unavailable("response body is not text".to_string()))?;
    decode_words(&body)
}

fn js_error(value: JsValue) -> SupplierError {
    SupplierError::Unavailable(format!("{value:?}"))
}
