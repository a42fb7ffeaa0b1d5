//! Photo Gallery Web App (Leptos + WASM)

mod app;
mod components;
mod api;
mod history;

use wasm_bindgen::prelude::*;
use leptos::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let mode = app::mode_from_location();
    leptos::mount::mount_to_body(move || view! { <app::App mode=mode /> });
}
