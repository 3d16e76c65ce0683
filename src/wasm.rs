//! WebAssembly bindings.
//!
//! The browser front end hands over source text, input text and an options
//! object as JSON, and displays the stringified result.

use wasm_bindgen::prelude::*;
use crate::{parse_source, stringify_result, Overrides, Runtime, Settings};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// WebAssembly-friendly runtime wrapper.
#[wasm_bindgen]
pub struct WasmRuntime {
    runtime: Runtime,
}

#[wasm_bindgen]
impl WasmRuntime {
    /// Bind a runtime to source, input and a JSON options object
    /// (`memoryCellCount`, `eofMode`, ...). Pass `""` for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(code: &str, input: &str, options_json: &str) -> Result<WasmRuntime, JsError> {
        let overrides = if options_json.trim().is_empty() {
            Overrides::none()
        } else {
            Overrides::from_json(options_json)
                .map_err(|e| JsError::new(&format!("{}", e)))?
        };

        Ok(Self {
            runtime: Runtime::new(code, input, &overrides),
        })
    }

    /// Run (once) and return `"<output>\nSUCCESS!"` or `"\nERROR: <message>"`.
    #[wasm_bindgen]
    pub fn run(&mut self) -> String {
        stringify_result(self.runtime.run())
    }

    /// Output of the last run, empty on failure or before running.
    #[wasm_bindgen]
    pub fn output(&self) -> String {
        self.runtime
            .result()
            .map(|r| r.output().to_string())
            .unwrap_or_default()
    }

    #[wasm_bindgen]
    pub fn has_ran(&self) -> bool {
        self.runtime.has_ran()
    }

    /// Effective settings as JSON.
    #[wasm_bindgen]
    pub fn settings_json(&self) -> Result<String, JsError> {
        serde_json::to_string(self.runtime.settings())
            .map_err(|e| JsError::new(&format!("{}", e)))
    }
}

/// Check bracket balance without running.
#[wasm_bindgen]
pub fn wasm_validate(code: &str) -> bool {
    parse_source(code, &Settings::default()).is_ok()
}

/// Run a program with default settings and return the stringified result.
#[wasm_bindgen]
pub fn wasm_run(code: &str, input: &str) -> String {
    let mut runtime = Runtime::new(code, input, &Overrides::none());
    stringify_result(runtime.run())
}
