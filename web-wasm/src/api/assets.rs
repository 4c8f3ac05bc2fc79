//! アーセナル画像の取得

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;
use weapon_ai_common::ImagePayload;

/// 起動時に1回だけ呼ぶ
///
/// 失敗時はエラー詳細の文字列を返す（ログ用）。
pub async fn fetch_reference(url: &str) -> Result<ImagePayload, String> {
    let bytes = fetch_bytes(url)
        .await
        .map_err(|e| format!("{}: {:?}", url, e))?;
    ImagePayload::from_bytes(&bytes, None).map_err(|e| format!("{}: {}", url, e))
}

async fn fetch_bytes(url: &str) -> Result<Vec<u8>, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is not available"))?;
    let resp_value = JsFuture::from(window.fetch_with_str(url)).await?;
    let resp: Response = resp_value.dyn_into()?;

    if !resp.ok() {
        return Err(JsValue::from_str(&format!(
            "Network response was not ok: {}",
            resp.status()
        )));
    }

    let buffer = JsFuture::from(resp.array_buffer()?).await?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}
