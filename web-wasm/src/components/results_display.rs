//! 解析結果表示
//!
//! サマリ行、武器ごとの件数、JSONコピー、生のAI出力の折りたたみ表示。
//! 該当武器なしでもコピーと生出力は表示する。

use gloo::console;
use gloo::timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use weapon_ai_common::{AnalysisReport, IDLE_MESSAGE, NO_WEAPONS_MESSAGE};

use crate::clipboard;

/// 「Copied!」表示の時間
const COPIED_FEEDBACK_MS: u32 = 2_000;

/// 結果パネルの表示内容
#[derive(Debug, Clone, PartialEq, Eq)]
enum ResultsView {
    /// 解析前
    Idle,
    /// 解析済み（`rows` が空なら該当なし）
    Report {
        summary: String,
        rows: Vec<(String, String)>,
        aggregated_json: String,
        raw_json: String,
    },
}

impl ResultsView {
    fn from_report(report: Option<&AnalysisReport>) -> Self {
        let Some(report) = report else {
            return Self::Idle;
        };
        Self::Report {
            summary: report.summary_line(),
            rows: report
                .aggregated
                .iter()
                .map(|(name, count)| (name.to_string(), format!("{} found", count)))
                .collect(),
            aggregated_json: report.aggregated_json(),
            raw_json: report.raw_json(),
        }
    }
}

#[component]
pub fn ResultsDisplay(results: ReadSignal<Option<AnalysisReport>>) -> impl IntoView {
    let (copied, set_copied) = signal(false);
    let (raw_visible, set_raw_visible) = signal(false);

    let toggle_raw = move || set_raw_visible.update(|visible| *visible = !*visible);

    move || match results.with(|r| ResultsView::from_report(r.as_ref())) {
        ResultsView::Idle => view! {
            <div class="placeholder">
                <p class="text-muted">{IDLE_MESSAGE}</p>
            </div>
        }
        .into_any(),
        ResultsView::Report { summary, rows, aggregated_json, raw_json } => {
            let on_copy = move |_: leptos::ev::MouseEvent| {
                let json = aggregated_json.clone();
                spawn_local(async move {
                    match clipboard::write_text(&json).await {
                        Ok(()) => {
                            set_copied.set(true);
                            Timeout::new(COPIED_FEEDBACK_MS, move || set_copied.set(false)).forget();
                        }
                        Err(e) => console::error!(format!("Failed to copy results: {:?}", e)),
                    }
                });
            };

            let listing = if rows.is_empty() {
                view! { <p class="text-muted">{NO_WEAPONS_MESSAGE}</p> }.into_any()
            } else {
                let items = rows
                    .into_iter()
                    .map(|(name, count)| {
                        view! {
                            <li class="result-row">
                                <span class="weapon-name">{name}</span>
                                <span class="weapon-count">{count}</span>
                            </li>
                        }
                    })
                    .collect_view();
                view! {
                    <p class="summary">{summary}</p>
                    <ul class="result-list">{items}</ul>
                }
                .into_any()
            };

            view! {
                <div class="results">
                    <div class="results-header">
                        <h3>"Processed Results"</h3>
                        <button class="btn btn-secondary" on:click=on_copy>
                            {move || if copied.get() { "Copied!" } else { "Copy JSON" }}
                        </button>
                    </div>

                    {listing}

                    <div class="raw-output">
                        <div
                            class="raw-toggle"
                            role="button"
                            tabindex="0"
                            aria-expanded=move || raw_visible.get().to_string()
                            aria-controls="raw-output-details"
                            on:click=move |_| toggle_raw()
                            on:keydown=move |ev: web_sys::KeyboardEvent| {
                                if ev.key() == "Enter" || ev.key() == " " {
                                    ev.prevent_default();
                                    toggle_raw();
                                }
                            }
                        >
                            {move || if raw_visible.get() { "▼ Raw AI Output" } else { "▶ Raw AI Output" }}
                        </div>
                        {move || {
                            let raw_json = raw_json.clone();
                            raw_visible.get().then(move || view! {
                                <pre id="raw-output-details" class="raw-json">
                                    <code>{raw_json}</code>
                                </pre>
                            })
                        }}
                    </div>
                </div>
            }
            .into_any()
        }
    }
}
