//! アップロードエリアコンポーネント
//!
//! ファイル選択・ドラッグ&ドロップ・ペーストのいずれかで画像を受け取る。
//! 受け付けるのは1枚だけ（複数なら先頭）。

use gloo::console;
use gloo::events::EventListener;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{DataTransfer, DragEvent, Event, File, FileReader, HtmlInputElement};
use weapon_ai_common::ImagePayload;

#[component]
pub fn UploadArea<FI, FA>(
    user_image: ReadSignal<Option<ImagePayload>>,
    is_processing: ReadSignal<bool>,
    is_ready: Signal<bool>,
    on_image: FI,
    on_analyze: FA,
) -> impl IntoView
where
    FI: Fn(Option<ImagePayload>) + 'static + Clone,
    FA: Fn(()) + 'static + Clone,
{
    let (is_dragover, set_is_dragover) = signal(false);

    // ページ全体へのペースト（アンマウントで解除）
    let paste_listener = {
        let on_image = on_image.clone();
        listen_for_paste(move |file| read_file(file, on_image.clone()))
    };
    hold_until_cleanup(paste_listener);

    let on_change = {
        let on_image = on_image.clone();
        move |ev: Event| {
            let input: HtmlInputElement = event_target(&ev);
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                read_file(file, on_image.clone());
            }
        }
    };

    let on_drop = {
        let on_image = on_image.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            let file = ev
                .data_transfer()
                .and_then(|dt| dt.files())
                .and_then(|files| files.get(0));
            if let Some(file) = file {
                read_file(file, on_image.clone());
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let can_analyze =
        move || !is_processing.get() && is_ready.get() && user_image.with(Option::is_some);

    view! {
        <section class="panel">
            <h2>"Upload Your Screenshot"</h2>

            <label
                class=move || {
                    if is_dragover.get() { "upload-area dragover" } else { "upload-area" }
                }
                on:drop=on_drop
                on:dragover=on_dragover
                on:dragleave=on_dragleave
            >
                <input
                    type="file"
                    class="hidden"
                    accept="image/png, image/jpeg, image/webp"
                    on:change=on_change
                />
                <div class="upload-icon">"📷"</div>
                <p>"Click to upload, drag and drop, or paste an image"</p>
                <p class="text-muted">"PNG, JPG, or WEBP"</p>
            </label>

            {move || {
                user_image
                    .with(|image| image.as_ref().map(ImagePayload::data_url))
                    .map(|src| view! {
                        <div class="preview">
                            <h3>"Image Preview:"</h3>
                            <img src=src alt="User screenshot preview" class="preview-image" />
                        </div>
                    })
            }}

            <button
                class="btn btn-primary"
                disabled=move || !can_analyze()
                on:click=move |_| on_analyze(())
            >
                {move || if is_processing.get() { "Analyzing..." } else { "Analyze Image" }}
            </button>

            {move || {
                (!is_ready.get()).then(|| view! {
                    <p class="text-muted">"Waiting for Arsenal data to load..."</p>
                })
            }}
        </section>
    }
}

/// window の paste イベントで画像ファイルを受け取る
fn listen_for_paste<F>(mut on_file: F) -> EventListener
where
    F: FnMut(File) + 'static,
{
    EventListener::new(&gloo::utils::window(), "paste", move |event| {
        if let Some(file) = pasted_image(event) {
            on_file(file);
        }
    })
}

/// 現在のオーナーが破棄されるまでリスナーを保持する
fn hold_until_cleanup(listener: EventListener) {
    let listener = StoredValue::new_local(Some(listener));
    on_cleanup(move || listener.update_value(|l| drop(l.take())));
}

/// ペーストされた最初の画像ファイル
fn pasted_image(event: &Event) -> Option<File> {
    let data = js_sys::Reflect::get(event, &JsValue::from_str("clipboardData")).ok()?;
    let data: DataTransfer = data.dyn_into().ok()?;
    let items = data.items();

    (0..items.length())
        .filter_map(|i| items.get(i))
        .find(|item| item.kind() == "file" && item.type_().starts_with("image/"))
        .and_then(|item| item.get_as_file().ok().flatten())
}

/// ファイルを読み込んで `on_image` に渡す
///
/// 読めない・画像でない場合は `None`（前の画像をクリア）。
fn read_file<F>(file: File, on_image: F)
where
    F: Fn(Option<ImagePayload>) + 'static,
{
    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(e) => {
            console::error!(format!("FileReader is not available: {:?}", e));
            return;
        }
    };

    let reader_clone = reader.clone();
    let closure = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        let payload = reader_clone
            .result()
            .ok()
            .and_then(|result| result.as_string())
            .ok_or_else(|| "file could not be read".to_string())
            .and_then(|data_url| {
                ImagePayload::from_data_url(&data_url).map_err(|e| e.to_string())
            });

        match payload {
            Ok(image) => on_image(Some(image)),
            Err(e) => {
                console::error!(format!("Error processing file: {}", e));
                on_image(None);
            }
        }
    }) as Box<dyn FnMut(_)>);

    reader.set_onload(Some(closure.as_ref().unchecked_ref()));
    closure.forget();

    if let Err(e) = reader.read_as_data_url(&file) {
        console::error!(format!("Error reading file: {:?}", e));
    }
}
