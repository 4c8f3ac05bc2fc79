//! メインアプリケーションコンポーネント

use gloo::console;
use leptos::prelude::*;
use leptos::task::spawn_local;
use weapon_ai_common::{AnalysisReport, AnalysisSession, Analyzer, ImagePayload};

use crate::api::{assets::fetch_reference, gemini::WasmGeminiClient};
use crate::components::{
    arsenal_grid::ArsenalGrid, header::Header, loader::Loader,
    results_display::ResultsDisplay, upload_area::UploadArea,
};
use crate::config::{self, ARSENAL_IMAGE_URL, MODEL};

/// アーセナル画像が読めなかったときの表示
const ASSET_LOAD_MESSAGE: &str =
    "Could not load the core weapon data. Please check if 'weaponsss.png' is accessible and refresh the page.";

const API_KEY_MISSING_MESSAGE: &str =
    "Gemini API key is not configured. Rebuild the app with GEMINI_API_KEY set.";

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    match config::api_key() {
        Some(api_key) => view! { <Workspace api_key=api_key /> }.into_any(),
        None => {
            console::error!(API_KEY_MISSING_MESSAGE);
            view! {
                <div class="container">
                    <Header />
                    <p class="error">{API_KEY_MISSING_MESSAGE}</p>
                </div>
            }
            .into_any()
        }
    }
}

#[component]
fn Workspace(api_key: &'static str) -> impl IntoView {
    let (arsenal, set_arsenal) = signal(None::<ImagePayload>);
    let (user_image, set_user_image) = signal(None::<ImagePayload>);
    let (results, set_results) = signal(None::<AnalysisReport>);
    let (is_processing, set_is_processing) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let session = AnalysisSession::new();

    // アーセナル画像は起動時に1回だけ読み込む
    spawn_local(async move {
        match fetch_reference(ARSENAL_IMAGE_URL).await {
            Ok(image) => set_arsenal.set(Some(image)),
            Err(e) => {
                console::error!(format!("Failed to load arsenal image: {}", e));
                set_error.set(Some(ASSET_LOAD_MESSAGE.to_string()));
            }
        }
    });

    let is_ready = Signal::derive(move || arsenal.with(Option::is_some));

    // 新しい画像で前回の結果をクリア（アーセナル読込エラーは残す）
    let on_image = move |image: Option<ImagePayload>| {
        set_user_image.set(image);
        set_results.set(None);
        if arsenal.with_untracked(Option::is_some) {
            set_error.set(None);
        }
    };

    let on_analyze = move |_: ()| {
        if session.is_busy() {
            return;
        }

        let mut analyzer =
            Analyzer::new(WasmGeminiClient::new(api_key, MODEL)).with_session(session.clone());
        if let Some(reference) = arsenal.get_untracked() {
            analyzer.set_reference(reference);
        }
        let screenshot = user_image.get_untracked();

        set_is_processing.set(true);
        set_error.set(None);
        set_results.set(None);

        spawn_local(async move {
            let result = analyzer.analyze(screenshot.as_ref()).await;
            match result {
                Ok(report) => set_results.set(Some(report)),
                Err(e) => {
                    console::error!(format!("Analysis failed: {:?}", e));
                    set_error.set(Some(e.to_string()));
                }
            }
            set_is_processing.set(false);
        });
    };

    view! {
        <div class="container">
            <Header />

            <main class="layout">
                <div class="column">
                    <ArsenalGrid arsenal=arsenal />
                    <UploadArea
                        user_image=user_image
                        is_processing=is_processing
                        is_ready=is_ready
                        on_image=on_image
                        on_analyze=on_analyze
                    />
                </div>

                <section class="panel results-panel">
                    <h2>"Analysis Results"</h2>
                    {move || {
                        if is_processing.get() {
                            view! { <Loader message="AI is analyzing your screenshot..." /> }
                                .into_any()
                        } else if let Some(message) = error.get() {
                            view! { <p class="error">{message}</p> }.into_any()
                        } else {
                            view! { <ResultsDisplay results=results /> }.into_any()
                        }
                    }}
                </section>
            </main>

            <footer class="footer text-muted">
                "Powered by Gemini AI. All images are for demonstration purposes only."
            </footer>
        </div>
    }
}
