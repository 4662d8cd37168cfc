//! Per-image processing: source, resize, encode.

use std::path::Path;

use crate::config::{ImageDeclaration, ImageSource};
use crate::encode::{encode, PixelBuffer};
use crate::error::Result;
use crate::source::{
    load_image, rasterize_svg, thumbnail, Bitmap, FilterType, IconCache, IconFetcher, SourceError,
};

/// Images larger than this on either side without `resize` get a warning.
pub const LARGE_IMAGE_THRESHOLD: u32 = 500;

/// Everything needed to load the pixels of a declaration.
pub struct SourceContext<'a> {
    /// Directory that relative `file` paths are resolved against.
    pub base_dir: &'a Path,
    pub icon_cache: &'a IconCache,
    pub fetcher: &'a dyn IconFetcher,
}

/// Load the bitmap a declaration points at.
///
/// Icons are rasterized at the requested size straight away; file images
/// are returned at their native size and shrunk by [`prepare_bitmap`].
pub fn load_source(
    decl: &ImageDeclaration,
    ctx: &SourceContext<'_>,
) -> std::result::Result<Bitmap, SourceError> {
    match &decl.source {
        ImageSource::File(path) => load_image(&ctx.base_dir.join(path)),
        ImageSource::Icon(id) => {
            let svg = ctx.icon_cache.load(id, ctx.fetcher)?;
            rasterize_svg(&svg, decl.resize)
        }
    }
}

/// Apply the declaration's resize to a loaded bitmap.
///
/// File images are shrunk to fit the requested box; icons were already
/// rendered at that size. Without `resize`, oversized images only log a
/// warning.
pub fn prepare_bitmap(
    decl: &ImageDeclaration,
    bitmap: Bitmap,
) -> std::result::Result<Bitmap, SourceError> {
    match decl.resize {
        Some(size) if !decl.source.is_icon() => {
            thumbnail(&bitmap, size.width, size.height, FilterType::default())
        }
        Some(_) => Ok(bitmap),
        None => {
            if bitmap.width > LARGE_IMAGE_THRESHOLD || bitmap.height > LARGE_IMAGE_THRESHOLD {
                tracing::warn!(
                    "The image \"{}\" you requested is very big ({}x{}). Please consider using the resize parameter.",
                    decl.id,
                    bitmap.width,
                    bitmap.height
                );
            }
            Ok(bitmap)
        }
    }
}

/// Resize and encode an already loaded bitmap.
///
/// Runs inside an `image` span carrying the declaration id, so encoder logs
/// name the image they belong to.
pub fn process_image(decl: &ImageDeclaration, bitmap: Bitmap) -> Result<PixelBuffer> {
    let _span = tracing::debug_span!("image", id = %decl.id).entered();
    let bitmap = prepare_bitmap(decl, bitmap)?;
    let buffer = encode(&bitmap, &decl.config)?;
    tracing::debug!(
        "Encoded {} as {} {}x{} ({} bytes)",
        decl.id,
        decl.config.image_type,
        buffer.width,
        buffer.height,
        buffer.len()
    );
    Ok(buffer)
}

/// Load, resize and encode one declaration.
pub fn build_image(decl: &ImageDeclaration, ctx: &SourceContext<'_>) -> Result<PixelBuffer> {
    let bitmap = load_source(decl, ctx)?;
    process_image(decl, bitmap)
}
