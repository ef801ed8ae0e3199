//! Crate-level error type.

use std::fmt;

use wasm_bindgen::JsValue;

use crate::util::js_error;

/// Errors raised while setting up the view. Runtime event paths log and
/// carry on instead of returning these.
#[derive(Debug)]
pub enum DiskError {
    /// A required DOM object (window, document, element) is missing.
    MissingDom(&'static str),
    /// The canvas could not provide a WebGL2 context.
    NoWebGl2,
    /// A GL object could not be allocated.
    GlAllocation(&'static str),
    /// Shader failed to compile; carries the driver's info log.
    ShaderCompile(String),
    /// Program failed to link; carries the driver's info log.
    ProgramLink(String),
    /// A browser API call threw.
    Js(String),
}

impl fmt::Display for DiskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDom(what) => write!(f, "missing DOM object: {what}"),
            Self::NoWebGl2 => write!(f, "WebGL2 is not available"),
            Self::GlAllocation(what) => write!(f, "failed to allocate GL {what}"),
            Self::ShaderCompile(log) => write!(f, "shader compile error: {log}"),
            Self::ProgramLink(log) => write!(f, "program link error: {log}"),
            Self::Js(msg) => write!(f, "browser error: {msg}"),
        }
    }
}

impl std::error::Error for DiskError {}

impl From<JsValue> for DiskError {
    fn from(value: JsValue) -> Self {
        Self::Js(js_error(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_detail() {
        let err = DiskError::ShaderCompile("0:3: syntax error".into());
        assert_eq!(err.to_string(), "shader compile error: 0:3: syntax error");
        assert_eq!(
            DiskError::MissingDom("canvas").to_string(),
            "missing DOM object: canvas"
        );
    }
}
