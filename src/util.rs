// Small browser helpers shared by the view, input and media code.
use glam::Vec2;
use wasm_bindgen::JsValue;
use web_sys::{HtmlCanvasElement, Window};

/// Best-effort text for a thrown JS value.
pub fn js_error(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(msg) = js_sys::Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
    {
        return msg;
    }
    format!("{value:?}")
}

/// Reads `?name=value` from the page URL.
pub fn query_param(window: &Window, name: &str) -> Option<String> {
    let search = window.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get(name).filter(|v| !v.is_empty())
}

/// Sizes the canvas backing store to the window at device-pixel resolution.
/// Returns the CSS-pixel size, which is what pointer coordinates use.
pub fn fit_canvas(window: &Window, canvas: &HtmlCanvasElement) -> Vec2 {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(800.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(600.0);
    let dpr = window.device_pixel_ratio().max(1.0);
    canvas.set_width((width * dpr).max(1.0) as u32);
    canvas.set_height((height * dpr).max(1.0) as u32);
    Vec2::new(width as f32, height as f32)
}

/// Position of a client-space point relative to the canvas' top-left corner.
pub fn canvas_point(canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        (client_x - rect.left()) as f32,
        (client_y - rect.top()) as f32,
    )
}
