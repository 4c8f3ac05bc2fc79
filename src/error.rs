use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeaponAiError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。環境変数 GEMINI_API_KEY を設定するか `weapon-ai config --set-api-key YOUR_KEY` で設定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("HTTPクライアントエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] weapon_ai_common::Error),
}

impl WeaponAiError {
    /// ログ専用の詳細（推論失敗時のみ）
    pub fn detail(&self) -> Option<&str> {
        match self {
            WeaponAiError::Common(e) => e.detail(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, WeaponAiError>;
