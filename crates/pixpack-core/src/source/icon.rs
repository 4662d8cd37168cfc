//! Material Design icon sourcing: download cache and SVG rasterization.
//!
//! Downloading itself sits behind [`IconFetcher`], so the core stays free of
//! network code; the CLI provides the HTTP implementation.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg;

use super::{Bitmap, SourceError};
use crate::config::TargetSize;

/// Cached icons older than this are downloaded again.
pub const ICON_CACHE_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

/// Download timeout for a single icon.
pub const ICON_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(10);

const ICON_BASE_URL: &str = "https://raw.githubusercontent.com/Templarian/MaterialDesign/master/svg";

/// URL of the SVG document for an icon.
pub fn icon_url(id: &str) -> String {
    format!("{}/{}.svg", ICON_BASE_URL, id)
}

/// Fetches the SVG text of an icon.
pub trait IconFetcher {
    /// Download the SVG document at `url` for icon `id`.
    fn fetch(&self, id: &str, url: &str) -> Result<String, SourceError>;
}

/// On-disk cache of downloaded icon SVGs with time-based invalidation.
#[derive(Debug, Clone)]
pub struct IconCache {
    dir: PathBuf,
    lifetime: Duration,
}

impl IconCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_lifetime(dir, ICON_CACHE_LIFETIME)
    }

    pub fn with_lifetime(dir: impl Into<PathBuf>, lifetime: Duration) -> Self {
        Self {
            dir: dir.into(),
            lifetime,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the cached SVG for an icon.
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.svg", id))
    }

    fn is_fresh(&self, path: &Path) -> bool {
        let modified = match std::fs::metadata(path).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(_) => return false,
        };
        modified + self.lifetime >= SystemTime::now()
    }

    /// Return the SVG text of an icon, downloading it if missing or stale.
    ///
    /// # Errors
    ///
    /// Propagates fetcher errors and returns `SourceError::Io` if the cache
    /// cannot be read or written.
    pub fn load(&self, id: &str, fetcher: &dyn IconFetcher) -> Result<String, SourceError> {
        let path = self.path_for(id);

        if self.is_fresh(&path) {
            tracing::debug!("Using cached icon {} at {}", id, path.display());
            return std::fs::read_to_string(&path).map_err(|e| SourceError::io(&path, e));
        }

        let url = icon_url(id);
        tracing::info!("Downloading {} MDI image from {}", id, url);
        let svg = fetcher.fetch(id, &url)?;

        std::fs::create_dir_all(&self.dir).map_err(|e| SourceError::io(&self.dir, e))?;
        std::fs::write(&path, &svg).map_err(|e| SourceError::io(&path, e))?;

        Ok(svg)
    }
}

/// Render an SVG document into an RGBA bitmap.
///
/// With `size`, the drawing is scaled independently on each axis to exactly
/// that size; otherwise the document's own size is used.
///
/// # Errors
///
/// Returns `SourceError::Rasterize` if the document cannot be parsed or has
/// an empty size.
pub fn rasterize_svg(svg: &str, size: Option<TargetSize>) -> Result<Bitmap, SourceError> {
    let tree = usvg::Tree::from_str(svg, &usvg::Options::default())
        .map_err(|e| SourceError::Rasterize(e.to_string()))?;

    let doc_size = tree.size();
    let (width, height) = match size {
        Some(target) => (target.width, target.height),
        None => (
            doc_size.width().ceil() as u32,
            doc_size.height().ceil() as u32,
        ),
    };

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| SourceError::Rasterize(format!("invalid size {}x{}", width, height)))?;

    let transform = Transform::from_scale(
        width as f32 / doc_size.width(),
        height as f32 / doc_size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    // tiny-skia stores premultiplied alpha
    let pixels = pixmap
        .pixels()
        .iter()
        .flat_map(|px| {
            let c = px.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();

    Ok(Bitmap::new(width, height, pixels))
}
