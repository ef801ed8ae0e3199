mod components;
mod error;
mod frame;
mod input;
mod media;
mod model;
mod render;
mod runtime;
mod state;
mod util;

use components::App;

#[cfg(all(test, target_arch = "wasm32"))]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if let Err(e) = console_log::init_with_level(level) {
        web_sys::console::warn_1(&format!("logger already initialised: {e}").into());
    }
    yew::Renderer::<App>::new().render();
}
