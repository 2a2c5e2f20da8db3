//! WebAssembly bindings.
//!
//! Exposes the evaluation to JavaScript front ends. Inputs and outputs
//! cross the boundary as plain JS objects via `serde-wasm-bindgen`.

use crate::engine::{AhpEngine, EngineConfig};
use crate::input::{parse_alternatives, ComparisonSet};
use crate::priority::random_index;
use wasm_bindgen::prelude::*;

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Evaluates a `ComparisonSet` object with the default engine settings.
///
/// Returns an `EvaluationResult` object, or throws a string describing the
/// fatal error.
#[wasm_bindgen(js_name = evaluateAhp)]
pub fn evaluate_ahp(input: JsValue) -> Result<JsValue, JsValue> {
    let set: ComparisonSet = serde_wasm_bindgen::from_value(input).map_err(to_js_error)?;
    let result = set
        .evaluate(&AhpEngine::default())
        .map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(&result).map_err(to_js_error)
}

/// Evaluates a `ComparisonSet` with an explicit `EngineConfig` object.
#[wasm_bindgen(js_name = evaluateAhpWithConfig)]
pub fn evaluate_ahp_with_config(input: JsValue, config: JsValue) -> Result<JsValue, JsValue> {
    let set: ComparisonSet = serde_wasm_bindgen::from_value(input).map_err(to_js_error)?;
    let config: EngineConfig = serde_wasm_bindgen::from_value(config).map_err(to_js_error)?;
    let result = set
        .evaluate(&AhpEngine::new(config))
        .map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(&result).map_err(to_js_error)
}

/// Splits a comma-separated list of alternative names.
#[wasm_bindgen(js_name = parseAlternatives)]
pub fn parse_alternatives_js(raw: &str) -> Result<Vec<String>, JsValue> {
    parse_alternatives(raw, ',').map_err(to_js_error)
}

/// Tabulated random index for an `n × n` matrix.
#[wasm_bindgen(js_name = randomIndex)]
pub fn random_index_js(n: usize) -> Result<f64, JsValue> {
    random_index(n).map_err(to_js_error)
}
