//! プロンプト生成モジュール
//!
//! CLIとWeb(WASM)で共有される武器カウント用プロンプト

use crate::types::{GRID_COLS, GRID_ROWS, GRID_SLOTS};

/// 武器カウント用プロンプト
///
/// 1枚目にアーセナル画像、2枚目にユーザーのスクリーンショットを添付する前提。
pub fn build_count_prompt() -> String {
    let last_row = GRID_ROWS - 1;
    let last_col = GRID_COLS - 1;
    format!(
        r#"You are an expert weapon recognition and counting system.
Two images are attached, in this order:
1. 'Arsenal Image': a grid of unique weapons with {rows} rows (0-{last_row}) and {cols} columns (0-{last_col}).
2. 'User Screenshot': a game screenshot that may contain several instances of weapons from the arsenal.

Task:
1. Find every weapon in the 'User Screenshot' that matches a weapon in the 'Arsenal Image'.
2. For EACH slot of the arsenal grid, count how many times the weapon in that slot appears in the 'User Screenshot'.
3. Return one JSON object mapping each zero-indexed "row,col" arsenal coordinate to its count.
4. Keys are strings of the form "row,col" (for example "0,0" or "1,{last_col}").
5. Values are integers.
6. A weapon that does not appear in the screenshot has count 0.
7. All {slots} slots must be present, even when the count is 0."#,
        rows = GRID_ROWS,
        cols = GRID_COLS,
        last_row = last_row,
        last_col = last_col,
        slots = GRID_SLOTS,
    )
}

/// スキーマの各プロパティ説明
pub fn slot_description(row: u8, col: u8) -> String {
    format!(
        "The total count of the weapon at grid coordinate row {}, column {}.",
        row, col
    )
}
