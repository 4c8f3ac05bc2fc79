//! APIレスポンスパーサー
//!
//! モデルが返したテキストからJSONオブジェクトを取り出し、
//! 18座標すべてを含む GridCount に変換する。

use crate::error::{Error, Result};
use crate::gemini::GeminiResponse;
use crate::types::{GridCoord, GridCount};

/// テキストからJSONオブジェクト部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 最初の `{` から最後の `}` まで
///
/// # Examples
/// ```
/// use weapon_ai_common::extract_json_object;
///
/// let text = "result: {\"0,0\": 1}";
/// assert_eq!(extract_json_object(text).unwrap(), "{\"0,0\": 1}");
/// ```
pub fn extract_json_object(text: &str) -> Result<&str> {
    if let Some(start_marker) = text.find("```json") {
        let start = start_marker + 7;
        if let Some(end_offset) = text[start..].find("```") {
            return Ok(text[start..start + end_offset].trim());
        }
    }

    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if end > start {
            return Ok(&text[start..=end]);
        }
    }

    Err(Error::Inference("JSON object not found".into()))
}

/// モデル出力テキストを GridCount にパース
///
/// 座標の欠落、整数以外の値は失敗。スキーマ外のキーは無視する。
pub fn parse_grid_count(text: &str) -> Result<GridCount> {
    let json_str = extract_json_object(text.trim())?;
    let value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| Error::Inference(format!("JSON parse error: {}", e)))?;
    let map = value
        .as_object()
        .ok_or_else(|| Error::Inference("JSON object not found".into()))?;

    let mut grid = GridCount::new();
    for coord in GridCoord::all() {
        let key = coord.key();
        let value = map
            .get(&key)
            .ok_or_else(|| Error::Inference(format!("missing key {}", key)))?;
        let count = value
            .as_i64()
            .ok_or_else(|| Error::Inference(format!("non-integer value for {}: {}", key, value)))?;
        grid.insert(coord, count);
    }

    Ok(grid)
}

/// generateContent のレスポンスボディ全体をパース
pub fn parse_response_body(body: &str) -> Result<GridCount> {
    let response: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| Error::Inference(format!("response body parse error: {}", e)))?;
    parse_grid_count(response.text()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_object(overrides: &[(&str, &str)]) -> String {
        let entries: Vec<String> = GridCoord::all()
            .map(|c| {
                let key = c.key();
                let value = overrides
                    .iter()
                    .find(|(k, _)| *k == key)
                    .map(|(_, v)| v.to_string())
                    .unwrap_or_else(|| "0".to_string());
                format!("\"{}\": {}", key, value)
            })
            .collect();
        format!("{{{}}}", entries.join(", "))
    }

    #[test]
    fn test_extract_json_object_with_block() {
        let text = "Here you go:\n```json\n{\"0,0\": 1}\n```\nDone.";
        assert_eq!(extract_json_object(text).unwrap(), "{\"0,0\": 1}");
    }

    #[test]
    fn test_extract_json_object_raw() {
        let text = r#"{"0,0": 1, "0,1": 2}"#;
        assert_eq!(extract_json_object(text).unwrap(), text);
    }

    #[test]
    fn test_extract_json_object_error() {
        assert!(extract_json_object("no json here").is_err());
        assert!(extract_json_object("} {").is_err());
    }

    #[test]
    fn test_parse_grid_count_complete() {
        let text = full_object(&[("0,0", "2"), ("1,0", "3")]);
        let grid = parse_grid_count(&text).expect("パース失敗");
        assert_eq!(grid.len(), 18);
        assert!(grid.is_complete());
        assert_eq!(grid.get(GridCoord::new(0, 0)), Some(2));
        assert_eq!(grid.get(GridCoord::new(1, 0)), Some(3));
        assert_eq!(grid.get(GridCoord::new(2, 5)), Some(0));
    }

    #[test]
    fn test_parse_grid_count_with_whitespace() {
        let text = format!("\n  {}  \n", full_object(&[]));
        assert!(parse_grid_count(&text).is_ok());
    }

    #[test]
    fn test_parse_grid_count_ignores_extra_keys() {
        let text = full_object(&[]).replacen('{', "{\"9,9\": 4, ", 1);
        let grid = parse_grid_count(&text).expect("パース失敗");
        assert_eq!(grid.len(), 18);
    }

    #[test]
    fn test_parse_grid_count_missing_key() {
        let text = r#"{"0,0": 1}"#;
        let err = parse_grid_count(text).unwrap_err();
        assert!(matches!(err, Error::Inference(ref d) if d.contains("missing key 0,1")));
    }

    #[test]
    fn test_parse_grid_count_non_integer() {
        let text = full_object(&[("1,1", "\"three\"")]);
        let err = parse_grid_count(&text).unwrap_err();
        assert!(matches!(err, Error::Inference(ref d) if d.contains("1,1")));

        let text = full_object(&[("1,1", "2.5")]);
        assert!(parse_grid_count(&text).is_err());
    }

    #[test]
    fn test_parse_grid_count_malformed_json() {
        let err = parse_grid_count("{\"0,0\": 1,,}").unwrap_err();
        assert!(matches!(err, Error::Inference(_)));
    }

    #[test]
    fn test_parse_response_body() {
        let inner = full_object(&[("2,2", "4")]);
        let body = serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": inner }] } }]
        })
        .to_string();
        let grid = parse_response_body(&body).expect("パース失敗");
        assert_eq!(grid.get(GridCoord::new(2, 2)), Some(4));
    }

    #[test]
    fn test_parse_response_body_not_json() {
        let err = parse_response_body("<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, Error::Inference(_)));
    }
}
