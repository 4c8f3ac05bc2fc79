//! CLI入力の読み込み
//!
//! - スクリーンショット: パス指定、または "-" で標準入力（クリップボードからのパイプ用）
//! - 武器名テーブルJSON
//! - 保存済みのAI出力JSON

use crate::error::{WeaponAiError, Result};
use std::io::Read;
use std::path::Path;
use weapon_ai_common::{Error, GridCount, ImagePayload, WeaponNameTable};

/// 標準入力を表すパス
pub const STDIN_MARKER: &str = "-";

pub fn read_screenshot(path: &Path) -> Result<ImagePayload> {
    let bytes = if path.as_os_str() == STDIN_MARKER {
        let mut buffer = Vec::new();
        std::io::stdin().lock().read_to_end(&mut buffer)?;
        if buffer.is_empty() {
            return Err(Error::InputMissing.into());
        }
        buffer
    } else {
        if !path.is_file() {
            return Err(WeaponAiError::FileNotFound(path.display().to_string()));
        }
        std::fs::read(path)?
    };

    Ok(ImagePayload::from_bytes(&bytes, None)?)
}

/// 解析対象のスクリーンショットを読み込み
///
/// 未指定なら InputMissing。アーセナル画像の読み込みより先に呼ぶ。
pub fn require_screenshot(path: Option<&Path>) -> Result<ImagePayload> {
    let path = path.ok_or(Error::InputMissing)?;
    read_screenshot(path)
}

/// 武器名テーブルを読み込み（未指定なら組み込みテーブル）
pub fn load_weapon_table(path: Option<&Path>) -> Result<WeaponNameTable> {
    let Some(path) = path else {
        return Ok(WeaponNameTable::builtin());
    };
    if !path.is_file() {
        return Err(WeaponAiError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(WeaponNameTable::from_json(&content)?)
}

/// 保存済みのAI出力を読み込み
///
/// 再集計用なので座標の欠けは許容する。
pub fn load_raw_output(path: &Path) -> Result<GridCount> {
    if !path.is_file() {
        return Err(WeaponAiError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
