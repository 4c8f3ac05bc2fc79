use crate::error::{WeaponAiError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use weapon_ai_common::{DEFAULT_MODEL, GEMINI_API_BASE};

/// APIキーを読む環境変数（先頭優先）
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// アーセナル画像の既定パス
pub const DEFAULT_ARSENAL_PATH: &str = "weaponsss.png";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub arsenal_path: String,
    /// 未設定ならHTTPクライアントの既定値
    pub timeout_seconds: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            base_url: GEMINI_API_BASE.into(),
            arsenal_path: DEFAULT_ARSENAL_PATH.into(),
            timeout_seconds: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| WeaponAiError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("weapon-ai").join("config.json"))
    }

    /// APIキーを取得（環境変数 → 設定ファイルの順）
    pub fn get_api_key(&self) -> Result<String> {
        let from_env = API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|key| !key.trim().is_empty());
        if let Some(key) = from_env {
            return Ok(key.trim().to_string());
        }

        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .ok_or(WeaponAiError::MissingApiKey)
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }

    pub fn set_model(&mut self, model: String) -> Result<()> {
        if model.trim().is_empty() {
            return Err(WeaponAiError::Config("モデル名が空です".into()));
        }
        self.model = model.trim().to_string();
        self.save()
    }
}
