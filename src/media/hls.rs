//! Bindings to the hls.js global loaded by the host page.

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::HtmlMediaElement;

use super::recovery::{StreamError, StreamErrorKind, StreamingClient};

pub const EVENT_MANIFEST_PARSED: &str = "hlsManifestParsed";
pub const EVENT_ERROR: &str = "hlsError";

#[wasm_bindgen]
extern "C" {
    #[derive(Debug, Clone)]
    pub type Hls;

    #[wasm_bindgen(constructor)]
    fn new_with_config(config: &JsValue) -> Hls;

    #[wasm_bindgen(static_method_of = Hls, js_name = isSupported)]
    fn is_supported() -> bool;

    #[wasm_bindgen(method, js_name = loadSource)]
    pub fn load_source(this: &Hls, url: &str);

    #[wasm_bindgen(method, js_name = attachMedia)]
    pub fn attach_media(this: &Hls, media: &HtmlMediaElement);

    #[wasm_bindgen(method)]
    pub fn on(this: &Hls, event: &str, listener: &Function);

    #[wasm_bindgen(method, js_name = startLoad)]
    fn js_start_load(this: &Hls);

    #[wasm_bindgen(method, js_name = recoverMediaError)]
    fn js_recover_media_error(this: &Hls);

    #[wasm_bindgen(method, js_name = destroy)]
    fn js_destroy(this: &Hls);
}

impl Hls {
    /// Whether the `Hls` global is present and MSE playback works here.
    /// Checks for the global first so a missing script never throws.
    pub fn available() -> bool {
        let present = Reflect::get(&js_sys::global(), &JsValue::from_str("Hls"))
            .map(|v| v.is_function())
            .unwrap_or(false);
        present && Self::is_supported()
    }

    pub fn create() -> Self {
        let config = Object::new();
        let _ = Reflect::set(&config, &"enableWorker".into(), &JsValue::TRUE);
        let _ = Reflect::set(&config, &"lowLatencyMode".into(), &JsValue::TRUE);
        Self::new_with_config(&config)
    }
}

impl StreamingClient for Hls {
    fn start_load(&self) {
        self.js_start_load();
    }

    fn recover_media_error(&self) {
        self.js_recover_media_error();
    }

    fn destroy(&self) {
        self.js_destroy();
    }
}

/// Reads the `data` argument of an `hlsError` event.
pub fn parse_error(data: &JsValue) -> StreamError {
    let field = |name: &str| Reflect::get(data, &JsValue::from_str(name)).ok();
    StreamError {
        kind: StreamErrorKind::from_hls_type(
            &field("type").and_then(|v| v.as_string()).unwrap_or_default(),
        ),
        fatal: field("fatal").and_then(|v| v.as_bool()).unwrap_or(false),
        details: field("details")
            .and_then(|v| v.as_string())
            .unwrap_or_else(|| "unknown".to_owned()),
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    fn event_data(json: &str) -> JsValue {
        js_sys::JSON::parse(json).expect("valid json")
    }

    #[wasm_bindgen_test]
    fn fatal_network_error_maps_to_network_kind() {
        let data =
            event_data(r#"{"type":"networkError","fatal":true,"details":"manifestLoadError"}"#);
        assert_eq!(
            parse_error(&data),
            StreamError {
                kind: StreamErrorKind::Network,
                fatal: true,
                details: "manifestLoadError".to_owned(),
            }
        );
    }

    #[wasm_bindgen_test]
    fn media_error_keeps_fatal_flag() {
        let data =
            event_data(r#"{"type":"mediaError","fatal":false,"details":"bufferStalledError"}"#);
        let err = parse_error(&data);
        assert_eq!(err.kind, StreamErrorKind::Media);
        assert!(!err.fatal);
    }

    #[wasm_bindgen_test]
    fn missing_fields_fall_back_to_non_fatal_other() {
        for data in [event_data("{}"), JsValue::UNDEFINED] {
            let err = parse_error(&data);
            assert_eq!(err.kind, StreamErrorKind::Other);
            assert!(!err.fatal);
            assert_eq!(err.details, "unknown");
        }
    }
}
