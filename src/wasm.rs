//! WASM bindings for the tidy-core library.
//!
//! The document-free subset is exposed to JavaScript here: detection over a
//! rectangle list, and the pure arrangement + container-frame math. Payloads
//! are JSON strings both ways; malformed input comes back as an error payload
//! and is also reported to the host console.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::{Alignment, Configuration, Orientation};
use crate::container::{GroupFrame, group_frame};
use crate::detect::{classify, detect_spacing};
use crate::geometry::{Rect, bounding_box};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    pub fn console_log(s: &str);

    #[wasm_bindgen(js_namespace = console, js_name = error)]
    pub fn console_error(s: &str);
}

/// Detection results ready for a UI to prefill.
#[derive(Debug, Clone, Serialize)]
struct DetectOutput {
    spacing: Option<f64>,
    layout: Orientation,
    alignment: Alignment,
}

/// Detect spacing, orientation and alignment for a JSON array of
/// `{x, y, w, h}` rectangles.
#[wasm_bindgen]
pub fn detect_defaults(rects_json: &str) -> String {
    let rects: Vec<Rect> = match serde_json::from_str(rects_json) {
        Ok(rects) => rects,
        Err(e) => {
            console_error(&format!("Error parsing rectangles: {:?}", e));
            return "{\"error\": \"Malformed rectangles\"}".to_string();
        }
    };
    let detected = classify(&rects);
    let output = DetectOutput {
        spacing: detect_spacing(&rects),
        layout: detected.layout,
        alignment: detected.alignment,
    };
    serde_json::to_string(&output).unwrap()
}

/// Arrange rectangles with the given configuration and compute the wrapping
/// container frame. Input: a JSON rectangle array and a JSON `Configuration`;
/// output: `{container, relative}` with positions laid out from the current
/// bounding-box origin.
#[wasm_bindgen]
pub fn arrange_rects(rects_json: &str, config_json: &str) -> String {
    let mut rects: Vec<Rect> = match serde_json::from_str(rects_json) {
        Ok(rects) => rects,
        Err(e) => {
            console_error(&format!("Error parsing rectangles: {:?}", e));
            return "{\"error\": \"Malformed rectangles\"}".to_string();
        }
    };
    let config: Configuration = match serde_json::from_str(config_json) {
        Ok(config) => config,
        Err(e) => {
            console_error(&format!("Error parsing configuration: {:?}", e));
            return "{\"error\": \"Malformed configuration\"}".to_string();
        }
    };
    let Ok(origin) = bounding_box(&rects) else {
        return "{\"error\": \"No rectangles to arrange\"}".to_string();
    };

    crate::arrange::arrange(
        &mut rects,
        config.layout,
        config.alignment,
        config.spacing,
        origin.min_x,
        origin.min_y,
    );
    let frame: GroupFrame = match group_frame(&rects, &config.padding) {
        Ok(frame) => frame,
        Err(e) => {
            console_error(&format!("Error computing container frame: {:?}", e));
            return "{\"error\": \"Could not compute container frame\"}".to_string();
        }
    };
    serde_json::to_string(&frame).unwrap()
}
