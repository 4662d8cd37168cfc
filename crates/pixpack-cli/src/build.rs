//! Manifest-driven header generation

use anyhow::{Context, Result};
use pixpack_core::codegen::validate_identifier;
use pixpack_core::source::{load_image, IconCache, IconFetcher};
use pixpack_core::{
    build_image, generate_header, process_image, validate_cross_dependencies, GeneratedImage,
    ImageDeclaration, ImageOptions, ImageSource, PixelBuffer, SourceContext,
};
use std::path::{Path, PathBuf};

use crate::manifest::{load_manifest, validate};

/// Directory that relative manifest paths are resolved against.
fn manifest_dir(manifest_path: &Path) -> &Path {
    manifest_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

/// Validate a manifest without touching any image source.
///
/// Returns the resolved declarations.
pub fn check(manifest_path: &Path) -> Result<Vec<ImageDeclaration>> {
    let manifest = load_manifest(manifest_path)?;
    validate(&manifest)
}

/// Build every image in a manifest and write the header.
///
/// `output_override` replaces `[output] header`. Returns the path written.
pub fn build_all(
    manifest_path: &Path,
    output_override: Option<&Path>,
    fetcher: &dyn IconFetcher,
) -> Result<PathBuf> {
    let manifest = load_manifest(manifest_path)?;
    let decls = validate(&manifest)?;

    let base_dir = manifest_dir(manifest_path);
    let icon_cache = IconCache::new(base_dir.join(&manifest.output.cache_dir));
    let ctx = SourceContext {
        base_dir,
        icon_cache: &icon_cache,
        fetcher,
    };

    let mut buffers = Vec::with_capacity(decls.len());
    for decl in &decls {
        tracing::info!("Building image: {}", decl.id);
        let buffer = build_image(decl, &ctx)
            .with_context(|| format!("Failed to build image \"{}\"", decl.id))?;
        buffers.push(buffer);
    }

    let images: Vec<GeneratedImage<'_>> = decls
        .iter()
        .zip(&buffers)
        .map(|(decl, buffer)| GeneratedImage {
            id: &decl.id,
            buffer,
        })
        .collect();
    let header = generate_header(&images);

    let output = match output_override {
        Some(path) => path.to_path_buf(),
        None => base_dir.join(&manifest.output.header),
    };
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {:?}", parent))?;
    }
    std::fs::write(&output, header)
        .with_context(|| format!("Failed to write header: {:?}", output))?;

    tracing::info!("Wrote {} image(s) to {}", images.len(), output.display());
    Ok(output)
}

/// Encode a single image file.
///
/// `options.file` is used as given; icons are not supported here.
pub fn encode_single(options: &ImageOptions) -> Result<PixelBuffer> {
    validate_identifier(&options.id)?;
    let decl = validate_cross_dependencies(options)
        .with_context(|| format!("Invalid image \"{}\"", options.id))?;

    let path = match &decl.source {
        ImageSource::File(path) => path,
        ImageSource::Icon(_) => anyhow::bail!("Single image encoding takes a file, not an icon"),
    };
    let bitmap = load_image(path)?;
    process_image(&decl, bitmap).with_context(|| format!("Failed to encode {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixpack_core::ImageType;

    #[test]
    fn test_encode_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.png");
        image::RgbaImage::from_pixel(1, 1, image::Rgba([0, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let buffer = encode_single(&ImageOptions {
            id: "dot".to_string(),
            file: Some(path),
            image_type: Some(ImageType::Rgb24),
            ..Default::default()
        })
        .unwrap();

        // Opaque output carries colors through untouched
        assert_eq!(buffer.data, vec![0, 0, 0]);
        assert!(!buffer.use_transparency);
    }

    #[test]
    fn test_encode_single_rejects_bad_id() {
        let result = encode_single(&ImageOptions {
            id: "my-image".to_string(),
            file: Some(PathBuf::from("whatever.png")),
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_manifest_dir_of_bare_file_name() {
        assert_eq!(manifest_dir(Path::new("images.toml")), Path::new("."));
        assert_eq!(
            manifest_dir(Path::new("assets/images.toml")),
            Path::new("assets")
        );
    }

    #[test]
    fn test_check_missing_manifest() {
        let err = check(Path::new("/nonexistent/images.toml")).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read manifest"));
    }
}
