//! 集計ロジック（CLI/WASM共通）
//!
//! GridCount を武器名テーブルで名前に変換し、同名の出現数を合算する。

use crate::types::{AggregatedCount, GridCount};
use crate::weapon_map::WeaponNameTable;

/// 座標ごとの出現数を武器名ごとに集計
///
/// - 武器なしスロットは除外
/// - 出現数が0以下、または欠けている座標は除外
/// - 同名の武器は合算（初出順を保持）
pub fn aggregate(grid: &GridCount, table: &WeaponNameTable) -> AggregatedCount {
    let mut aggregated = AggregatedCount::new();

    for (coord, name) in table.slots() {
        let Some(name) = name else { continue };
        match grid.get(coord) {
            Some(count) if count > 0 => aggregated.add(name, count),
            _ => {}
        }
    }

    aggregated
}
