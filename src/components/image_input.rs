//! Image Picker
//!
//! File input that reads the chosen image into memory for multipart upload.

use js_sys::Uint8Array;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlInputElement};

use crate::models::ImageUpload;

async fn read_file(file: File) -> Result<ImageUpload, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("{:?}", e))?;
    Ok(ImageUpload {
        file_name: file.name(),
        mime: file.type_(),
        bytes: Uint8Array::new(&buffer).to_vec(),
    })
}

#[component]
pub fn ImageInput(set_image: WriteSignal<Option<ImageUpload>>) -> impl IntoView {
    let (error, set_error) = signal(None::<String>);

    let on_change = move |ev: web_sys::Event| {
        let Some(input) = ev.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            set_image.set(None);
            return;
        };
        spawn_local(async move {
            match read_file(file).await {
                Ok(upload) => {
                    set_error.set(None);
                    set_image.set(Some(upload));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "could not read image");
                    set_error.set(Some("No se pudo leer la imagen".to_string()));
                }
            }
        });
    };

    view! {
        <label class="image-input">
            "Imagen"
            <input type="file" accept="image/*" on:change=on_change />
        </label>
        {move || error.get().map(|e| view! { <p class="field-error">{e}</p> })}
    }
}
