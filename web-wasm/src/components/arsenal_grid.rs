//! アーセナル（6x3グリッド）表示

use leptos::prelude::*;
use weapon_ai_common::{ImagePayload, GRID_COLS, GRID_ROWS};

#[component]
pub fn ArsenalGrid(arsenal: ReadSignal<Option<ImagePayload>>) -> impl IntoView {
    let title = format!("Weapon Arsenal ({}x{} Grid)", GRID_COLS, GRID_ROWS);

    view! {
        <section class="panel">
            <h2>{title}</h2>
            <div class="arsenal-frame">
                {move || match arsenal.with(|a| a.as_ref().map(ImagePayload::data_url)) {
                    Some(src) => view! {
                        <img src=src alt="Weapon Arsenal Grid" class="arsenal-image" />
                    }.into_any(),
                    None => view! {
                        <p class="text-muted">"Loading Arsenal Data..."</p>
                    }.into_any(),
                }}
            </div>
        </section>
    }
}
