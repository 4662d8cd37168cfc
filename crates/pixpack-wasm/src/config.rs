//! Declaration validation bindings.

use pixpack_core::{
    validate_cross_dependencies, DitherMode, ImageOptions, ImageSource, ImageType, TargetSize,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Resolved declaration as returned to JavaScript.
#[derive(Debug, Serialize)]
struct ResolvedImage {
    id: String,
    file: Option<String>,
    mdi: Option<String>,
    resize: Option<TargetSize>,
    #[serde(rename = "type")]
    image_type: ImageType,
    use_transparency: bool,
    dither: DitherMode,
}

fn resolve(options: &ImageOptions) -> pixpack_core::Result<ResolvedImage> {
    let decl = validate_cross_dependencies(options)?;
    let (file, mdi) = match decl.source {
        ImageSource::File(path) => (Some(path.display().to_string()), None),
        ImageSource::Icon(name) => (None, Some(name)),
    };
    Ok(ResolvedImage {
        id: decl.id,
        file,
        mdi,
        resize: decl.resize,
        image_type: decl.config.image_type,
        use_transparency: decl.config.use_transparency,
        dither: decl.config.dither,
    })
}

/// Validate an image declaration object and fill in its defaults.
///
/// Accepts the same fields as a manifest `[[image]]` entry and returns the
/// resolved `{ id, file, mdi, resize, type, use_transparency, dither }`.
#[wasm_bindgen]
pub fn resolve_config(options: JsValue) -> Result<JsValue, JsValue> {
    let options: ImageOptions = serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsValue::from_str(&format!("Invalid image options: {}", e)))?;
    let resolved = resolve(&options).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&resolved).map_err(|e| JsValue::from_str(&e.to_string()))
}
