//! Image sourcing for pixpack.
//!
//! This module provides functionality for:
//! - Decoding raster image files into RGBA bitmaps
//! - Downloading and caching Material Design icons
//! - Rasterizing SVG icons at a requested size
//! - Resizing bitmaps before encoding
//!
//! Everything here runs before the encoder and reports failures as
//! [`SourceError`], so a broken source never reaches pixel encoding.

mod icon;
mod load;
mod resize;
mod types;

pub use icon::{
    icon_url, rasterize_svg, IconCache, IconFetcher, ICON_CACHE_LIFETIME, ICON_DOWNLOAD_TIMEOUT,
};
pub use load::{decode_image, load_image};
pub use resize::{resize, thumbnail};
pub use types::{Bitmap, FilterType, SourceError, RGBA_CHANNELS};
