//! 画像ペイロード
//!
//! アップロード画像（ファイル選択・ドラッグ&ドロップ・ペースト・CLI入力）を
//! Base64データとプレビュー用Data URLに変換する。

use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Base64化済みの画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    mime_type: String,
    base64: String,
}

impl ImagePayload {
    /// バイト列から生成
    ///
    /// `declared_mime` が空ならバイト列から形式を推定する。
    /// image/* 以外は InvalidImage。
    pub fn from_bytes(bytes: &[u8], declared_mime: Option<&str>) -> Result<Self> {
        if bytes.is_empty() {
            return Err(Error::InvalidImage("empty file".into()));
        }

        let mime_type = match declared_mime.map(str::trim).filter(|m| !m.is_empty()) {
            Some(mime) => mime.to_ascii_lowercase(),
            None => sniff_mime_type(bytes)
                .ok_or_else(|| Error::InvalidImage("unrecognized image format".into()))?
                .to_string(),
        };

        if !mime_type.starts_with("image/") {
            return Err(Error::InvalidImage(format!("not an image: {}", mime_type)));
        }

        Ok(Self {
            mime_type,
            base64: STANDARD.encode(bytes),
        })
    }

    /// "data:image/png;base64,..." 形式のData URLから生成
    pub fn from_data_url(data_url: &str) -> Result<Self> {
        let base64 = extract_base64_from_data_url(data_url)
            .filter(|b| !b.is_empty())
            .ok_or_else(|| Error::InvalidImage("invalid data URL".into()))?;
        let mime_type = extract_mime_type_from_data_url(data_url)
            .ok_or_else(|| Error::InvalidImage("invalid data URL".into()))?;

        if !mime_type.starts_with("image/") {
            return Err(Error::InvalidImage(format!("not an image: {}", mime_type)));
        }

        Ok(Self {
            mime_type: mime_type.to_string(),
            base64: base64.to_string(),
        })
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn base64(&self) -> &str {
        &self.base64
    }

    /// プレビュー表示用のData URL
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }
}

/// バイト列のマジックナンバーから画像のMIMEタイプを推定
pub fn sniff_mime_type(bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes).ok().map(|f| f.to_mime_type())
}

/// Data URLからBase64データ部分を抽出
pub fn extract_base64_from_data_url(data_url: &str) -> Option<&str> {
    let (header, data) = data_url.split_once(',')?;
    header.ends_with(";base64").then_some(data)
}

/// Data URLからMIMEタイプを抽出
pub fn extract_mime_type_from_data_url(data_url: &str) -> Option<&str> {
    data_url
        .strip_prefix("data:")?
        .split(|c: char| c == ';' || c == ',')
        .next()
        .filter(|m| !m.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    const JPEG_HEADER: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10, b'J', b'F', b'I', b'F'];

    #[test]
    fn test_from_bytes_declared_mime() {
        let payload = ImagePayload::from_bytes(b"abc", Some("image/webp")).unwrap();
        assert_eq!(payload.mime_type(), "image/webp");
        assert_eq!(payload.base64(), "YWJj");
        assert_eq!(payload.data_url(), "data:image/webp;base64,YWJj");
    }

    #[test]
    fn test_from_bytes_sniffs_png() {
        let payload = ImagePayload::from_bytes(PNG_HEADER, None).unwrap();
        assert_eq!(payload.mime_type(), "image/png");
    }

    #[test]
    fn test_from_bytes_sniffs_jpeg() {
        let payload = ImagePayload::from_bytes(JPEG_HEADER, Some("")).unwrap();
        assert_eq!(payload.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_from_bytes_rejects_non_image() {
        let err = ImagePayload::from_bytes(b"hello", Some("text/plain")).unwrap_err();
        assert!(matches!(err, Error::InvalidImage(_)));

        let err = ImagePayload::from_bytes(b"hello world", None).unwrap_err();
        assert!(matches!(err, Error::InvalidImage(_)));
    }

    #[test]
    fn test_from_bytes_rejects_empty() {
        assert!(ImagePayload::from_bytes(&[], Some("image/png")).is_err());
    }

    #[test]
    fn test_from_data_url() {
        let payload = ImagePayload::from_data_url("data:image/jpeg;base64,/9j/4AAQSkZJRg==").unwrap();
        assert_eq!(payload.mime_type(), "image/jpeg");
        assert_eq!(payload.base64(), "/9j/4AAQSkZJRg==");
    }

    #[test]
    fn test_from_data_url_invalid() {
        assert!(ImagePayload::from_data_url("not a data url").is_err());
        assert!(ImagePayload::from_data_url("data:text/plain;base64,aGk=").is_err());
        assert!(ImagePayload::from_data_url("data:image/png;base64,").is_err());
    }

    #[test]
    fn test_extract_base64_from_data_url() {
        assert_eq!(
            extract_base64_from_data_url("data:image/png;base64,iVBORw0KGgo="),
            Some("iVBORw0KGgo=")
        );
        assert_eq!(extract_base64_from_data_url(""), None);
        assert_eq!(extract_base64_from_data_url("data:image/png,raw"), None);
    }

    #[test]
    fn test_extract_mime_type_from_data_url() {
        assert_eq!(
            extract_mime_type_from_data_url("data:image/webp;base64,UklGR"),
            Some("image/webp")
        );
        assert_eq!(extract_mime_type_from_data_url("invalid"), None);
    }
}
