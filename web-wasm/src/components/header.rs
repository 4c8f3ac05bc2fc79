//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Weapon AI"</h1>
            <p class="text-muted">
                "Upload a game screenshot to count weapons against the arsenal grid."
            </p>
        </header>
    }
}
