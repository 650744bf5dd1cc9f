use gloo::events::EventListener;
use wasm_bindgen::prelude::*;

mod app;
mod boot;
mod host;
mod logging;

pub use crate::app::{App, AppProps, WheelHandle};

#[wasm_bindgen(start)]
pub fn run() {
    console_error_panic_hook::set_once();
    logging::init();

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| boot::mount_all()).forget();
    } else {
        boot::mount_all();
    }
}
