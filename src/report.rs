//! 解析結果のテキスト/JSON出力

use weapon_ai_common::AnalysisReport;

/// 人が読む形式
///
/// サマリ行、武器ごとの行、`show_raw` なら生のAI出力。
pub fn render_text(report: &AnalysisReport, show_raw: bool) -> String {
    let width = report
        .aggregated
        .names()
        .map(|n| n.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = vec![report.summary_line()];
    lines.extend(
        report
            .aggregated
            .iter()
            .map(|(name, count)| format!("  {:<width$}  {} found", name, count, width = width)),
    );

    if show_raw {
        lines.push(String::new());
        lines.push("Raw AI Output:".to_string());
        lines.push(report.raw_json());
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// 機械向け形式 `{"aggregated": {...}, "raw": {...}}`
pub fn render_json(report: &AnalysisReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
