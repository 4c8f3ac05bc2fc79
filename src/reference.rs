//! アーセナル画像の読み込み
//!
//! 起動時に1回だけ読み込み、以降の解析で使い回す。
//! ファイルパスまたは http(s) URL を受け付ける。

use weapon_ai_common::{Error, ImagePayload, Result};

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// アーセナル画像を読み込んでBase64化
///
/// 失敗はすべて AssetLoad。
pub async fn load_reference(source: &str) -> Result<ImagePayload> {
    let bytes = if is_url(source) {
        fetch_bytes(source).await?
    } else {
        tokio::fs::read(source)
            .await
            .map_err(|e| Error::AssetLoad(format!("{}: {}", source, e)))?
    };

    ImagePayload::from_bytes(&bytes, None).map_err(|e| Error::AssetLoad(format!("{}: {}", source, e)))
}

async fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| Error::AssetLoad(format!("{}: {}", url, e)))?;

    if !response.status().is_success() {
        return Err(Error::AssetLoad(format!(
            "{}: Network response was not ok: {}",
            url,
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| Error::AssetLoad(format!("{}: {}", url, e)))?;
    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com/weaponsss.png"));
        assert!(is_url("http://localhost:8080/weaponsss.png"));
        assert!(!is_url("weaponsss.png"));
        assert!(!is_url("./assets/http.png"));
    }
}
