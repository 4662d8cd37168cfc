//! pixpack command line front end
//!
//! Reads an images.toml manifest, sources and encodes every declared image,
//! and writes a C++ header for the display firmware.

pub mod build;
pub mod fetch;
pub mod manifest;

pub use build::{build_all, check, encode_single};
pub use fetch::{HttpIconFetcher, OfflineFetcher};
pub use manifest::{load_manifest, parse_manifest, validate, Manifest, OutputConfig};
