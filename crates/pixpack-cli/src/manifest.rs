//! Manifest parsing and validation
//!
//! Parses images.toml: an `[output]` table and one `[[image]]` entry per
//! generated image.

use anyhow::{Context, Result};
use pixpack_core::codegen::validate_identifiers;
use pixpack_core::{validate_cross_dependencies, ImageDeclaration, ImageOptions};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root manifest structure
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default, rename = "image")]
    pub images: Vec<ImageOptions>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Generated header, relative to the manifest
    #[serde(default = "default_header")]
    pub header: PathBuf,
    /// Icon download cache, relative to the manifest
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            header: default_header(),
            cache_dir: default_cache_dir(),
        }
    }
}

fn default_header() -> PathBuf {
    PathBuf::from("images.h")
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(".pixpack/images")
}

/// Parse manifest text
pub fn parse_manifest(content: &str) -> Result<Manifest> {
    toml::from_str(content).context("Failed to parse manifest")
}

/// Load and parse a manifest file
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {:?}", path))?;
    parse_manifest(&content).with_context(|| format!("Invalid manifest: {:?}", path))
}

/// Resolve every image declaration, failing on the first invalid one
pub fn validate(manifest: &Manifest) -> Result<Vec<ImageDeclaration>> {
    validate_identifiers(manifest.images.iter().map(|image| image.id.as_str()))?;

    manifest
        .images
        .iter()
        .map(|image| {
            validate_cross_dependencies(image)
                .with_context(|| format!("Invalid image \"{}\"", image.id))
        })
        .collect()
}
