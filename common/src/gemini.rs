//! Gemini API リクエスト/レスポンス型
//!
//! 送信処理はCLI（reqwest）とWASM（fetch）で別実装。
//! ここではボディの組み立てとレスポンスからのテキスト取り出しのみ扱う。

use crate::error::{Error, Result};
use crate::prompts::{build_count_prompt, slot_description};
use crate::types::GridCoord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// アーセナル画像のMIMEタイプ
pub const REFERENCE_MIME_TYPE: &str = "image/png";
/// スクリーンショットとして送信するMIMEタイプ
pub const SCREENSHOT_MIME_TYPE: &str = "image/jpeg";

/// Gemini APIリクエスト
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
pub struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    pub response_mime_type: String,
    #[serde(rename = "responseSchema")]
    pub response_schema: ResponseSchema,
}

/// 構造化出力スキーマ（18個の整数プロパティを持つオブジェクト）
#[derive(Debug, Serialize)]
pub struct ResponseSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub properties: BTreeMap<String, PropertySchema>,
    pub required: Vec<String>,
    #[serde(rename = "propertyOrdering")]
    pub property_ordering: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub description: String,
}

impl ResponseSchema {
    /// 全座標を必須の INTEGER とするスキーマ
    pub fn grid_count() -> Self {
        let keys: Vec<String> = GridCoord::all().map(|c| c.key()).collect();
        let properties = GridCoord::all()
            .map(|c| {
                (
                    c.key(),
                    PropertySchema {
                        schema_type: "INTEGER".to_string(),
                        description: slot_description(c.row, c.col),
                    },
                )
            })
            .collect();

        Self {
            schema_type: "OBJECT".to_string(),
            properties,
            required: keys.clone(),
            property_ordering: keys,
        }
    }
}

/// Gemini APIレスポンス
#[derive(Debug, Default, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GeminiResponse {
    /// 先頭候補の先頭パートのテキスト
    pub fn text(&self) -> Result<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref())
            .ok_or_else(|| Error::Inference("Empty response".into()))
    }
}

/// generateContent のURL（APIキー付き）
pub fn generate_content_url(base_url: &str, model: &str, api_key: &str) -> String {
    format!(
        "{}/models/{}:generateContent?key={}",
        base_url.trim_end_matches('/'),
        model,
        api_key
    )
}

/// 武器カウント用リクエストを組み立て
///
/// # Arguments
/// * `reference_base64` - アーセナル画像（PNG）のBase64
/// * `screenshot_base64` - スクリーンショットのBase64
pub fn build_count_request(reference_base64: &str, screenshot_base64: &str) -> GeminiRequest {
    GeminiRequest {
        contents: vec![Content {
            parts: vec![
                Part::Text { text: build_count_prompt() },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: REFERENCE_MIME_TYPE.to_string(),
                        data: reference_base64.to_string(),
                    },
                },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: SCREENSHOT_MIME_TYPE.to_string(),
                        data: screenshot_base64.to_string(),
                    },
                },
            ],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: ResponseSchema::grid_count(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_content_url() {
        assert_eq!(
            generate_content_url(GEMINI_API_BASE, DEFAULT_MODEL, "KEY"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent?key=KEY"
        );
        assert_eq!(
            generate_content_url("http://127.0.0.1:8080/", "m", "k"),
            "http://127.0.0.1:8080/models/m:generateContent?key=k"
        );
    }

    #[test]
    fn test_count_request_parts() {
        let request = build_count_request("REF", "SHOT");
        let json = serde_json::to_value(&request).expect("シリアライズ失敗");
        let parts = json["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 3);
        assert!(parts[0]["text"].as_str().unwrap().contains("Arsenal Image"));
        assert_eq!(parts[1]["inline_data"]["mime_type"], "image/png");
        assert_eq!(parts[1]["inline_data"]["data"], "REF");
        assert_eq!(parts[2]["inline_data"]["mime_type"], "image/jpeg");
        assert_eq!(parts[2]["inline_data"]["data"], "SHOT");
    }

    #[test]
    fn test_count_request_schema() {
        let request = build_count_request("REF", "SHOT");
        let json = serde_json::to_value(&request).expect("シリアライズ失敗");
        let config = &json["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");

        let schema = &config["responseSchema"];
        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(schema["properties"].as_object().unwrap().len(), 18);
        assert_eq!(schema["properties"]["1,3"]["type"], "INTEGER");
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(required.len(), 18);
        assert_eq!(required.first(), Some(&"0,0"));
        assert_eq!(required.last(), Some(&"2,5"));
        assert_eq!(schema["propertyOrdering"], schema["required"]);
    }

    #[test]
    fn test_part_text_serialize() {
        let part = Part::Text { text: "Hello".to_string() };
        let json = serde_json::to_string(&part).expect("シリアライズ失敗");
        assert_eq!(json, r#"{"text":"Hello"}"#);
    }

    #[test]
    fn test_gemini_response_text() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{ "text": "{\"0,0\": 1}" }]
                }
            }]
        }"#;
        let response: GeminiResponse = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(response.text().unwrap(), "{\"0,0\": 1}");
    }

    #[test]
    fn test_gemini_response_without_candidates() {
        let json = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let response: GeminiResponse = serde_json::from_str(json).expect("デシリアライズ失敗");
        let err = response.text().unwrap_err();
        assert!(matches!(err, Error::Inference(_)));
    }

    #[test]
    fn test_gemini_response_candidate_without_content() {
        let json = r#"{"candidates": [{"finishReason": "SAFETY"}]}"#;
        let response: GeminiResponse = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert!(response.text().is_err());
    }
}
