//! 解析結果の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - GridCoord: アーセナルグリッド上の座標（"row,col"）
//! - GridCount: AIが返す座標ごとの出現数
//! - AggregatedCount: 武器名ごとに集計した出現数

use crate::error::{Error, Result};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// グリッド行数
pub const GRID_ROWS: u8 = 3;
/// グリッド列数
pub const GRID_COLS: u8 = 6;
/// スロット総数
pub const GRID_SLOTS: usize = (GRID_ROWS as usize) * (GRID_COLS as usize);

/// アーセナルグリッド上の座標
///
/// 順序は行優先（row, col の辞書順）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridCoord {
    pub row: u8,
    pub col: u8,
}

impl GridCoord {
    /// 範囲チェックなしで生成（定数テーブル用）
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub fn checked(row: u8, col: u8) -> Option<Self> {
        (row < GRID_ROWS && col < GRID_COLS).then_some(Self { row, col })
    }

    /// 全18座標を行優先で列挙
    pub fn all() -> impl Iterator<Item = GridCoord> {
        (0..GRID_ROWS).flat_map(|row| (0..GRID_COLS).map(move |col| GridCoord { row, col }))
    }

    /// "row,col" 形式のキー
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// 行優先のインデックス（0..18）
    pub fn index(&self) -> usize {
        self.row as usize * GRID_COLS as usize + self.col as usize
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl FromStr for GridCoord {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidCoord(s.to_string());
        let (row, col) = s.split_once(',').ok_or_else(invalid)?;
        let row: u8 = row.trim().parse().map_err(|_| invalid())?;
        let col: u8 = col.trim().parse().map_err(|_| invalid())?;
        GridCoord::checked(row, col).ok_or_else(invalid)
    }
}

impl Serialize for GridCoord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GridCoord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        key.parse().map_err(serde::de::Error::custom)
    }
}

/// 座標ごとの出現数（AIレスポンスそのもの）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GridCount(BTreeMap<GridCoord, i64>);

impl GridCount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, coord: GridCoord) -> Option<i64> {
        self.0.get(&coord).copied()
    }

    pub fn insert(&mut self, coord: GridCoord, count: i64) {
        self.0.insert(coord, count);
    }

    /// 行優先で列挙
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, i64)> + '_ {
        self.0.iter().map(|(coord, count)| (*coord, *count))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 欠けている座標
    pub fn missing(&self) -> Vec<GridCoord> {
        GridCoord::all().filter(|c| !self.0.contains_key(c)).collect()
    }

    /// 18座標すべてが揃っているか
    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }
}

impl FromIterator<(GridCoord, i64)> for GridCount {
    fn from_iter<I: IntoIterator<Item = (GridCoord, i64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// 武器名ごとの集計値
///
/// 初出順を保持する。JSONではその順のオブジェクトとして出力。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedCount(Vec<(String, i64)>);

impl AggregatedCount {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存の名前なら加算、新しい名前なら末尾に追加
    pub fn add(&mut self, name: &str, count: i64) {
        match self.0.iter_mut().find(|(n, _)| n == name) {
            Some((_, total)) => *total = total.saturating_add(count),
            None => self.0.push((name.to_string(), count)),
        }
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, c)| *c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> + '_ {
        self.0.iter().map(|(n, c)| (n.as_str(), *c))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 全武器の出現数合計（上限で飽和）
    pub fn total(&self) -> i64 {
        self.0.iter().fold(0i64, |acc, (_, c)| acc.saturating_add(*c))
    }
}

impl Serialize for AggregatedCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, count) in &self.0 {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_coord_all_row_major() {
        let coords: Vec<GridCoord> = GridCoord::all().collect();
        assert_eq!(coords.len(), GRID_SLOTS);
        assert_eq!(coords[0].key(), "0,0");
        assert_eq!(coords[5].key(), "0,5");
        assert_eq!(coords[6].key(), "1,0");
        assert_eq!(coords[17].key(), "2,5");
        for (i, coord) in coords.iter().enumerate() {
            assert_eq!(coord.index(), i);
        }
    }

    #[test]
    fn test_grid_coord_parse() {
        assert_eq!("1,4".parse::<GridCoord>().unwrap(), GridCoord::new(1, 4));
        assert_eq!(" 2 , 5 ".parse::<GridCoord>().unwrap(), GridCoord::new(2, 5));
    }

    #[test]
    fn test_grid_coord_parse_out_of_range() {
        assert!("3,0".parse::<GridCoord>().is_err());
        assert!("0,6".parse::<GridCoord>().is_err());
        assert!("-1,0".parse::<GridCoord>().is_err());
    }

    #[test]
    fn test_grid_coord_parse_malformed() {
        let err = "00".parse::<GridCoord>().unwrap_err();
        assert!(matches!(err, Error::InvalidCoord(ref s) if s == "00"));
        assert!("a,b".parse::<GridCoord>().is_err());
        assert!("".parse::<GridCoord>().is_err());
    }

    #[test]
    fn test_grid_count_deserialize() {
        let json = r#"{"0,0": 2, "1,0": 3, "2,5": 0}"#;
        let grid: GridCount = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(grid.len(), 3);
        assert_eq!(grid.get(GridCoord::new(0, 0)), Some(2));
        assert_eq!(grid.get(GridCoord::new(1, 0)), Some(3));
        assert_eq!(grid.get(GridCoord::new(0, 1)), None);
        assert!(!grid.is_complete());
        assert_eq!(grid.missing().len(), 15);
    }

    #[test]
    fn test_grid_count_rejects_bad_key() {
        let json = r#"{"9,9": 1}"#;
        assert!(serde_json::from_str::<GridCount>(json).is_err());
    }

    #[test]
    fn test_grid_count_rejects_float() {
        let json = r#"{"0,0": 1.5}"#;
        assert!(serde_json::from_str::<GridCount>(json).is_err());
    }

    #[test]
    fn test_grid_count_serialize_row_major() {
        let grid: GridCount = [
            (GridCoord::new(2, 0), 1),
            (GridCoord::new(0, 3), 4),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&grid).expect("シリアライズ失敗");
        assert_eq!(json, r#"{"0,3":4,"2,0":1}"#);
    }

    #[test]
    fn test_aggregated_count_keeps_first_occurrence_order() {
        let mut agg = AggregatedCount::new();
        agg.add("SG", 2);
        agg.add("RL", 1);
        agg.add("SG", 3);
        let names: Vec<&str> = agg.names().collect();
        assert_eq!(names, vec!["SG", "RL"]);
        assert_eq!(agg.get("SG"), Some(5));
        assert_eq!(agg.total(), 6);
    }

    #[test]
    fn test_aggregated_count_serialize_as_object() {
        let mut agg = AggregatedCount::new();
        agg.add("square", 1);
        agg.add("i3", 4);
        let json = serde_json::to_string(&agg).expect("シリアライズ失敗");
        assert_eq!(json, r#"{"square":1,"i3":4}"#);
    }

    #[test]
    fn test_aggregated_count_total_saturates() {
        let mut agg = AggregatedCount::new();
        agg.add("SG", i64::MAX);
        agg.add("RL", 10);
        agg.add("SG", 1);
        assert_eq!(agg.get("SG"), Some(i64::MAX));
        assert_eq!(agg.total(), i64::MAX);
    }
}
