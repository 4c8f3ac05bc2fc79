//! Gemini API連携（fetch）
//!
//! リクエスト組み立てとレスポンス解析は共通ライブラリ側。
//! ここでは fetch による送受信だけを行う。

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};
use weapon_ai_common::{
    build_count_request, generate_content_url, parse_grid_count, Error, GeminiRequest,
    GeminiResponse, GridCount, InferenceClient, GEMINI_API_BASE,
};

/// ブラウザ用 Gemini クライアント
pub struct WasmGeminiClient {
    api_key: &'static str,
    model: &'static str,
}

impl WasmGeminiClient {
    pub fn new(api_key: &'static str, model: &'static str) -> Self {
        Self { api_key, model }
    }

    fn url(&self) -> String {
        generate_content_url(GEMINI_API_BASE, self.model, self.api_key)
    }
}

impl InferenceClient for WasmGeminiClient {
    async fn count_weapons(
        &self,
        reference_base64: &str,
        screenshot_base64: &str,
    ) -> weapon_ai_common::Result<GridCount> {
        let request = build_count_request(reference_base64, screenshot_base64);
        let response = call_gemini_api(&self.url(), &request)
            .await
            .map_err(|e| Error::Inference(js_error_detail(&e)))?;
        parse_grid_count(response.text()?)
    }
}

/// Gemini API呼び出し
async fn call_gemini_api(url: &str, request: &GeminiRequest) -> Result<GeminiResponse, JsValue> {
    let body = serde_json::to_string(request).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(url, &opts)?;
    request.headers().set("Content-Type", "application/json")?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is not available"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    if !resp.ok() {
        return Err(JsValue::from_str(&format!(
            "API error: {} {}",
            resp.status(),
            resp.status_text()
        )));
    }

    let json = JsFuture::from(resp.json()?).await?;
    Ok(serde_wasm_bindgen::from_value(json)?)
}

/// JsValue のエラーをログ用文字列に
///
/// URLにAPIキーが含まれるので、メッセージからは取り除く。
pub fn js_error_detail(error: &JsValue) -> String {
    error
        .as_string()
        .unwrap_or_else(|| format!("{:?}", error))
        .split("?key=")
        .next()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_contains_model_and_key() {
        let client = WasmGeminiClient::new("abc", "gemini-2.5-flash");
        assert_eq!(
            client.url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent?key=abc"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let request = build_count_request("UkVG", "U0hPVA==");
        let json = serde_json::to_string(&request).expect("シリアライズ失敗");
        assert!(json.contains("\"responseMimeType\":\"application/json\""));
        assert!(json.contains("\"propertyOrdering\""));
        assert!(json.contains("\"mime_type\":\"image/png\""));
        assert!(json.contains("\"mime_type\":\"image/jpeg\""));
    }
}
