//! ビルド時設定
//!
//! APIキーはビルド環境から埋め込む（`GEMINI_API_KEY`、なければ `API_KEY`）。

use weapon_ai_common::DEFAULT_MODEL;

/// アーセナル画像の配信パス
pub const ARSENAL_IMAGE_URL: &str = "weaponsss.png";

/// 使用モデル
pub const MODEL: &str = DEFAULT_MODEL;

/// 埋め込まれたAPIキー
pub fn api_key() -> Option<&'static str> {
    resolve_api_key(option_env!("GEMINI_API_KEY"), option_env!("API_KEY"))
}

fn resolve_api_key(
    primary: Option<&'static str>,
    fallback: Option<&'static str>,
) -> Option<&'static str> {
    [primary, fallback]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|key| !key.is_empty())
}
