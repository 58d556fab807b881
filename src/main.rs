//! Eventos Frontend Entry Point

mod api;
mod app;
mod card_state;
mod components;
mod config;
mod context;
mod dates;
mod error;
mod filters;
mod markdown;
mod models;
mod mutations;
mod queries;
mod store;
mod timers;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_logger::init_logger("EventosUI", config::log_level()) {
        web_sys::console::error_1(&e.into());
    }
    mount_to_body(App);
}
