//! クリップボード書き込み（navigator.clipboard.writeText）

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["navigator", "clipboard"], js_name = writeText, catch)]
    fn write_text_js(text: &str) -> Result<js_sys::Promise, JsValue>;
}

pub async fn write_text(text: &str) -> Result<(), JsValue> {
    let promise = write_text_js(text)?;
    JsFuture::from(promise).await?;
    Ok(())
}
