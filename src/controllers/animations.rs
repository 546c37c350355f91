use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::error::Result;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = AOS, js_name = init, catch)]
    fn aos_init(options: &JsValue) -> std::result::Result<JsValue, JsValue>;
}

/// Options understood by the animate-on-scroll library's `init`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AosOptions {
    pub duration: u32,
    pub once: bool,
    pub offset: u32,
    pub delay: u32,
    pub easing: String,
    pub mirror: bool,
    pub anchor_placement: String,
}

impl Default for AosOptions {
    fn default() -> Self {
        Self {
            duration: 800,
            once: true,
            offset: 100,
            delay: 0,
            easing: "ease-out-cubic".to_string(),
            mirror: false,
            anchor_placement: "top-bottom".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AosStatus<E> {
    Started,
    /// The library isn't loaded on this page.
    Missing,
    /// Loaded, but `init` threw.
    Failed(E),
}

impl<E> AosStatus<E> {
    pub fn is_started(&self) -> bool {
        matches!(self, AosStatus::Started)
    }
}

/// Runs `init` only when the library is present.
pub fn start_with<E>(present: bool, init: impl FnOnce() -> std::result::Result<(), E>) -> AosStatus<E> {
    if !present {
        return AosStatus::Missing;
    }
    match init() {
        Ok(()) => AosStatus::Started,
        Err(e) => AosStatus::Failed(e),
    }
}

/// Starts the library if the page loaded it.
pub fn init(options: &AosOptions) -> Result<AosStatus<JsValue>> {
    let present = js_sys::Reflect::has(&js_sys::global(), &JsValue::from_str("AOS")).unwrap_or(false);
    let options = serde_wasm_bindgen::to_value(options).map_err(JsValue::from)?;

    let status = start_with(present, || aos_init(&options).map(|_| ()));
    match &status {
        AosStatus::Started => info!("AOS initialized successfully"),
        AosStatus::Missing => warn!("AOS library not found"),
        AosStatus::Failed(e) => error!("AOS failed to initialize: {:?}", e),
    }
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_library_is_never_called() {
        let status = start_with(false, || -> std::result::Result<(), &'static str> { panic!("init called") });
        assert_eq!(status, AosStatus::Missing);
        assert!(!status.is_started());
    }

    #[test]
    fn loaded_library_that_throws_is_a_failure() {
        assert_eq!(start_with(true, || Err("bad easing")), AosStatus::Failed("bad easing"));
        assert_eq!(start_with(true, || Ok::<(), &str>(())), AosStatus::Started);
    }

    #[test]
    fn options_use_library_key_names() {
        let value = serde_json::to_value(AosOptions::default()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "duration": 800,
                "once": true,
                "offset": 100,
                "delay": 0,
                "easing": "ease-out-cubic",
                "mirror": false,
                "anchorPlacement": "top-bottom"
            })
        );
    }
}
