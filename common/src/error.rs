//! エラー型定義

use thiserror::Error;

/// 解析失敗時にユーザーへ表示する汎用メッセージ
pub const INFERENCE_FAILURE_MESSAGE: &str =
    "An error occurred during analysis. The AI model might be unavailable. Please try again later.";

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 参照画像（アーセナルグリッド）が読み込めない
    #[error("Could not load the core weapon data: {0}")]
    AssetLoad(String),

    /// 画像が未アップロードのまま解析が要求された
    #[error("Please upload an image first.")]
    InputMissing,

    /// 既に解析が実行中
    #[error("An analysis is already in progress.")]
    Busy,

    /// 推論呼び出しまたはレスポンス解析の失敗
    ///
    /// 詳細はログ用。Display には出さない。
    #[error("{}", INFERENCE_FAILURE_MESSAGE)]
    Inference(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Invalid grid coordinate: {0}")]
    InvalidCoord(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// 推論失敗の内部詳細（ログ出力専用）
    pub fn detail(&self) -> Option<&str> {
        match self {
            Error::Inference(detail) => Some(detail),
            _ => None,
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
