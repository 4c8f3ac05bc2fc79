//! 解析レポート
//!
//! 生のGridCountと集計結果をまとめ、表示用の文言を組み立てる。

use crate::aggregate::aggregate;
use crate::types::{AggregatedCount, GridCount};
use crate::weapon_map::WeaponNameTable;
use serde::Serialize;

/// 結果なし時の表示
pub const NO_WEAPONS_MESSAGE: &str = "No matching weapons were identified in the screenshot.";

/// 解析前の表示
pub const IDLE_MESSAGE: &str = "Upload an image and click \"Analyze\" to see results here.";

/// 1回の解析結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    pub aggregated: AggregatedCount,
    pub raw: GridCount,
}

impl AnalysisReport {
    pub fn new(raw: GridCount, table: &WeaponNameTable) -> Self {
        let aggregated = aggregate(&raw, table);
        Self { aggregated, raw }
    }

    pub fn total(&self) -> i64 {
        self.aggregated.total()
    }

    pub fn unique_types(&self) -> usize {
        self.aggregated.len()
    }

    /// "Found a total of N weapon instances across M unique weapon types."
    ///
    /// 結果が空なら NO_WEAPONS_MESSAGE。
    pub fn summary_line(&self) -> String {
        if self.aggregated.is_empty() {
            return NO_WEAPONS_MESSAGE.to_string();
        }
        let total = self.total();
        let unique = self.unique_types();
        format!(
            "Found a total of {} weapon instance{} across {} unique weapon type{}.",
            total,
            plural(total != 1),
            unique,
            plural(unique != 1),
        )
    }

    /// 集計結果の整形済みJSON
    pub fn aggregated_json(&self) -> String {
        serde_json::to_string_pretty(&self.aggregated).unwrap_or_default()
    }

    /// 生レスポンスの整形済みJSON
    pub fn raw_json(&self) -> String {
        serde_json::to_string_pretty(&self.raw).unwrap_or_default()
    }
}

fn plural(many: bool) -> &'static str {
    if many { "s" } else { "" }
}
