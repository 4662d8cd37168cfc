//! pixpack Core - Image encoding for embedded displays
//!
//! This crate turns image declarations into packed pixel buffers that a
//! display driver can read straight out of flash, including declaration
//! validation, image sourcing, pixel encoding and C++ code generation.

pub mod codegen;
pub mod config;
pub mod encode;
pub mod error;
pub mod luminance;
pub mod pipeline;
pub mod source;

pub use codegen::{generate_header, GeneratedImage};
pub use config::{
    validate_cross_dependencies, DitherMode, EncodingConfig, ImageDeclaration, ImageOptions,
    ImageSource, ImageType, TargetSize, UnsupportedFormat, ValidationError,
};
pub use encode::{encode, expected_length, EncodeError, PixelBuffer};
pub use error::{Error, Result};
pub use pipeline::{build_image, process_image, SourceContext};
pub use source::{Bitmap, SourceError};
