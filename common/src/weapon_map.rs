//! 座標 → 武器名の対応表
//!
//! 組み込みテーブルはアーセナル画像（weaponsss.png）の並びに対応する。
//! 武器のないスロットは None（テーブルファイル上は "undefined"）。

use crate::error::{Error, Result};
use crate::types::{GridCoord, GRID_SLOTS};
use std::collections::HashMap;

/// テーブルファイル上で「武器なし」を表す文字列
pub const UNMAPPED_LABEL: &str = "undefined";

/// 組み込みテーブル（行優先）
const BUILTIN_NAMES: [Option<&str>; GRID_SLOTS] = [
    // row 0
    Some("SG"),
    Some("RL"),
    None,
    Some("square"),
    Some("i2"),
    Some("dot"),
    // row 1
    Some("SG"),
    Some("ar"),
    Some("until"),
    Some("until"),
    Some("i31"),
    Some("square"),
    // row 2
    Some("sr"),
    Some("fire"),
    Some("laser"),
    Some("i3"),
    Some("i31"),
    Some("i3"),
];

/// 座標ごとの武器名テーブル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaponNameTable {
    names: [Option<String>; GRID_SLOTS],
}

impl Default for WeaponNameTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl WeaponNameTable {
    /// 組み込みテーブル
    pub fn builtin() -> Self {
        Self {
            names: BUILTIN_NAMES.map(|name| name.map(str::to_string)),
        }
    }

    /// JSONオブジェクト `{"row,col": "name" | null}` から構築
    ///
    /// 記載のない座標、null、"undefined"、空文字は武器なし扱い。
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, Option<String>> = serde_json::from_str(json)?;
        let mut names: [Option<String>; GRID_SLOTS] = Default::default();

        for (key, name) in raw {
            let coord: GridCoord = key.parse()?;
            names[coord.index()] = name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty() && n != UNMAPPED_LABEL);
        }

        if names.iter().all(Option::is_none) {
            return Err(Error::Config("武器名テーブルに有効な名前がありません".into()));
        }

        Ok(Self { names })
    }

    /// 座標の武器名（武器なしは None）
    pub fn name_at(&self, coord: GridCoord) -> Option<&str> {
        self.names.get(coord.index())?.as_deref()
    }

    /// 全座標を行優先で列挙
    pub fn slots(&self) -> impl Iterator<Item = (GridCoord, Option<&str>)> + '_ {
        GridCoord::all().map(move |coord| (coord, self.name_at(coord)))
    }

    /// 重複を除いた武器名（初出順）
    pub fn distinct_names(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for name in self.names.iter().flatten() {
            if !seen.contains(&name.as_str()) {
                seen.push(name);
            }
        }
        seen
    }
}
