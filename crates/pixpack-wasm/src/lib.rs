//! pixpack WASM - WebAssembly bindings for pixpack
//!
//! This crate exposes the pixpack-core encoder to JavaScript/TypeScript so a
//! browser tool can preview and export display images without the CLI.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrappers for bitmaps and encoded buffers
//! - `config` - Image declaration validation
//! - `decode` - Image decoding, thumbnailing and icon rasterization
//! - `encode` - Pixel format encoding and header generation
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, encode_image } from '@pixpack/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const buffer = encode_image(image, "GRAYSCALE", undefined, "NONE");
//! console.log(`Encoded ${buffer.byte_length} bytes`);
//! ```

use wasm_bindgen::prelude::*;

mod config;
mod decode;
mod encode;
mod types;

pub use config::resolve_config;
pub use decode::{decode_image, rasterize_icon, thumbnail};
pub use encode::{encode_image, generate_header};
pub use types::{JsBitmap, JsPixelBuffer};

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
