//! Gemini API クライアント（reqwest）
//!
//! リクエスト/レスポンスの形は weapon_ai_common::gemini と共有。

use crate::config::Config;
use crate::error::Result;
use std::time::Duration;
use weapon_ai_common::{
    build_count_request, generate_content_url, parse_response_body, Error, GridCount,
    InferenceClient,
};

/// エラー詳細に含めるレスポンスボディの最大文字数
const ERROR_BODY_PREVIEW: usize = 300;

pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    /// 設定から生成（APIキー未設定はエラー）
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.get_api_key()?;
        Self::new(
            api_key,
            config.model.clone(),
            config.base_url.clone(),
            config.timeout_seconds.map(Duration::from_secs),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl InferenceClient for GeminiClient {
    async fn count_weapons(
        &self,
        reference_base64: &str,
        screenshot_base64: &str,
    ) -> weapon_ai_common::Result<GridCount> {
        let url = generate_content_url(&self.base_url, &self.model, &self.api_key);
        let request = build_count_request(reference_base64, screenshot_base64);

        // URLにAPIキーが含まれるため、エラー文言からURLを外す
        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Inference(format!("request failed: {}", e.without_url())))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Inference(format!("failed to read body: {}", e.without_url())))?;

        tracing::debug!(%status, body_len = body.len(), model = %self.model, "gemini response");

        if !status.is_success() {
            let preview: String = body.chars().take(ERROR_BODY_PREVIEW).collect();
            return Err(Error::Inference(format!("API error: {} {}", status, preview)));
        }

        parse_response_body(&body)
    }
}
