//! Browser entry point. Built with `wasm-pack build --target web` and served under `/pkg`.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::wasm_bindgen;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    tracing::info!("binding size chart");
    if let Err(e) = size_chart_app::dom::mount() {
        tracing::error!("size chart unavailable on this page {e}");
    }
}
