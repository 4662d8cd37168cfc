//! Image declarations and cross-validation of their options.
//!
//! An image declaration arrives as a loose option set: the pixel format and
//! the transparency flag may both be omitted, and their defaults depend on
//! each other and on the kind of source. [`validate_cross_dependencies`]
//! resolves those defaults and rejects contradictory combinations before any
//! pixel is touched.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix accepted (and stripped) in front of icon identifiers.
pub const ICON_PREFIX: &str = "mdi:";

/// Errors raised while resolving an image declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Neither `file` nor `mdi` was given.
    #[error("Image must declare exactly one source: `file` or `mdi`")]
    MissingSource,

    /// Both `file` and `mdi` were given.
    #[error("Image sources `file` and `mdi` are mutually exclusive")]
    ConflictingSources,

    /// A transparent-capable format was forced opaque.
    #[error("Image type {0} must always be transparent")]
    MustBeTransparent(ImageType),

    /// Icons are monochrome source material.
    #[error("MDI images must be binary images, got {0}")]
    IconMustBeBinary(ImageType),

    /// An option value could not be parsed.
    #[error("Invalid value for `{field}`: {value}")]
    InvalidValue { field: &'static str, value: String },

    /// The image id cannot be used as a generated identifier.
    #[error("Invalid image id `{0}`: expected [A-Za-z_][A-Za-z0-9_]*")]
    InvalidId(String),

    /// Two images share one id.
    #[error("Duplicate image id `{0}`")]
    DuplicateId(String),
}

/// An image type tag outside the recognized set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported image type: {0}")]
pub struct UnsupportedFormat(pub String);

/// Target pixel format of the encoded buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImageType {
    /// 1 bit per pixel, opaque by default.
    Binary,
    /// 1 bit per pixel, always transparent.
    TransparentBinary,
    /// 8-bit luminance.
    Grayscale,
    /// 16-bit packed color, big-endian.
    #[serde(rename = "RGB565")]
    Rgb565,
    /// 24-bit color.
    #[serde(rename = "RGB24")]
    Rgb24,
    /// 32-bit color with alpha.
    #[serde(rename = "RGBA")]
    Rgba,
}

impl ImageType {
    pub const ALL: [ImageType; 6] = [
        ImageType::Binary,
        ImageType::TransparentBinary,
        ImageType::Grayscale,
        ImageType::Rgb565,
        ImageType::Rgb24,
        ImageType::Rgba,
    ];

    /// Canonical upper-case name, as written in manifests.
    pub fn as_str(self) -> &'static str {
        match self {
            ImageType::Binary => "BINARY",
            ImageType::TransparentBinary => "TRANSPARENT_BINARY",
            ImageType::Grayscale => "GRAYSCALE",
            ImageType::Rgb565 => "RGB565",
            ImageType::Rgb24 => "RGB24",
            ImageType::Rgba => "RGBA",
        }
    }

    /// Formats that can never be encoded opaque.
    #[inline]
    pub fn is_transparent_type(self) -> bool {
        matches!(self, ImageType::TransparentBinary | ImageType::Rgba)
    }

    /// Both 1-bit variants share one physical layout.
    #[inline]
    pub fn is_binary(self) -> bool {
        matches!(self, ImageType::Binary | ImageType::TransparentBinary)
    }

    /// The image type enum the display driver receives.
    pub fn device_type(self) -> DeviceImageType {
        match self {
            ImageType::Binary | ImageType::TransparentBinary => DeviceImageType::Binary,
            ImageType::Grayscale => DeviceImageType::Grayscale,
            ImageType::Rgb24 => DeviceImageType::Rgb24,
            ImageType::Rgb565 => DeviceImageType::Rgb565,
            ImageType::Rgba => DeviceImageType::Rgba,
        }
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageType {
    type Err = UnsupportedFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        ImageType::ALL
            .into_iter()
            .find(|t| t.as_str() == upper)
            .ok_or_else(|| UnsupportedFormat(s.to_string()))
    }
}

impl TryFrom<String> for ImageType {
    type Error = UnsupportedFormat;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Image type values as seen by the device driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum DeviceImageType {
    Binary = 0,
    Grayscale = 1,
    Rgb24 = 2,
    Rgb565 = 3,
    Rgba = 4,
}

impl DeviceImageType {
    /// Enumerator name used in generated source.
    pub fn symbol(self) -> &'static str {
        match self {
            DeviceImageType::Binary => "IMAGE_TYPE_BINARY",
            DeviceImageType::Grayscale => "IMAGE_TYPE_GRAYSCALE",
            DeviceImageType::Rgb24 => "IMAGE_TYPE_RGB24",
            DeviceImageType::Rgb565 => "IMAGE_TYPE_RGB565",
            DeviceImageType::Rgba => "IMAGE_TYPE_RGBA",
        }
    }
}

/// Dithering applied while reducing color depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum DitherMode {
    /// Plain thresholding / rounding.
    #[default]
    #[serde(rename = "NONE")]
    None,
    /// Floyd-Steinberg error diffusion.
    #[serde(rename = "FLOYDSTEINBERG")]
    FloydSteinberg,
}

impl FromStr for DitherMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NONE" => Ok(DitherMode::None),
            "FLOYDSTEINBERG" | "FLOYD_STEINBERG" => Ok(DitherMode::FloydSteinberg),
            _ => Err(ValidationError::InvalidValue {
                field: "dither",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for DitherMode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Requested output size, written as `"WxH"` or `[w, h]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTargetSize")]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    pub fn new(width: u32, height: u32) -> Result<Self, ValidationError> {
        if width == 0 || height == 0 {
            return Err(ValidationError::InvalidValue {
                field: "resize",
                value: format!("{}x{}", width, height),
            });
        }
        Ok(Self { width, height })
    }
}

impl FromStr for TargetSize {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidValue {
            field: "resize",
            value: s.to_string(),
        };
        let lower = s.trim().to_ascii_lowercase();
        let (w, h) = lower.split_once('x').ok_or_else(invalid)?;
        let width = w.trim().parse().map_err(|_| invalid())?;
        let height = h.trim().parse().map_err(|_| invalid())?;
        TargetSize::new(width, height)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTargetSize {
    Text(String),
    Pair([u32; 2]),
}

impl TryFrom<RawTargetSize> for TargetSize {
    type Error = ValidationError;

    fn try_from(raw: RawTargetSize) -> Result<Self, Self::Error> {
        match raw {
            RawTargetSize::Text(text) => text.parse(),
            RawTargetSize::Pair([width, height]) => TargetSize::new(width, height),
        }
    }
}

/// Declarative options of one image, as written in a manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageOptions {
    /// Identifier of the generated image.
    pub id: String,
    /// Local image file, relative to the manifest.
    pub file: Option<PathBuf>,
    /// Material Design icon name.
    pub mdi: Option<String>,
    /// Optional output size.
    pub resize: Option<TargetSize>,
    /// Target format; defaults from the source kind.
    #[serde(rename = "type")]
    pub image_type: Option<ImageType>,
    /// Color-key transparency; defaults from the format.
    pub use_transparency: Option<bool>,
    pub dither: DitherMode,
}

/// Where the pixels of an image come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    File(PathBuf),
    Icon(String),
}

impl ImageSource {
    #[inline]
    pub fn is_icon(&self) -> bool {
        matches!(self, ImageSource::Icon(_))
    }
}

/// Fully resolved encoding parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingConfig {
    pub image_type: ImageType,
    pub use_transparency: bool,
    pub dither: DitherMode,
}

impl EncodingConfig {
    /// Resolve defaults and check consistency.
    ///
    /// Defaults are filled in first; the checks then run against the
    /// resolved values rather than the raw input.
    pub fn resolve(
        icon_source: bool,
        image_type: Option<ImageType>,
        use_transparency: Option<bool>,
        dither: DitherMode,
    ) -> Result<Self, ValidationError> {
        let image_type = image_type.unwrap_or(if icon_source {
            ImageType::TransparentBinary
        } else {
            ImageType::Binary
        });

        let is_transparent_type = image_type.is_transparent_type();
        let use_transparency = use_transparency.unwrap_or(is_transparent_type);

        if is_transparent_type && !use_transparency {
            return Err(ValidationError::MustBeTransparent(image_type));
        }

        if icon_source && !image_type.is_binary() {
            return Err(ValidationError::IconMustBeBinary(image_type));
        }

        Ok(Self {
            image_type,
            use_transparency,
            dither,
        })
    }
}

/// A validated image declaration, ready to be sourced and encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDeclaration {
    pub id: String,
    pub source: ImageSource,
    pub resize: Option<TargetSize>,
    pub config: EncodingConfig,
}

/// MDI names are lowercase kebab case. They become a cache file name and a
/// URL path segment, so anything else (`/`, `.`, `%`) is rejected.
fn is_valid_icon_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Resolve an option set into a validated declaration.
///
/// # Errors
///
/// Returns a [`ValidationError`] when the sources are missing or conflict,
/// when a transparent-capable type is forced opaque, or when an icon is
/// paired with a non-binary type. Icon names must match `[a-z0-9-]+`.
pub fn validate_cross_dependencies(
    options: &ImageOptions,
) -> Result<ImageDeclaration, ValidationError> {
    let source = match (&options.file, &options.mdi) {
        (Some(_), Some(_)) => return Err(ValidationError::ConflictingSources),
        (None, None) => return Err(ValidationError::MissingSource),
        (Some(path), None) => ImageSource::File(path.clone()),
        (None, Some(icon)) => {
            let name = icon.strip_prefix(ICON_PREFIX).unwrap_or(icon);
            if !is_valid_icon_name(name) {
                return Err(ValidationError::InvalidValue {
                    field: "mdi",
                    value: icon.clone(),
                });
            }
            ImageSource::Icon(name.to_string())
        }
    };

    let config = EncodingConfig::resolve(
        source.is_icon(),
        options.image_type,
        options.use_transparency,
        options.dither,
    )?;

    Ok(ImageDeclaration {
        id: options.id.clone(),
        source,
        resize: options.resize,
        config,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_options() -> ImageOptions {
        ImageOptions {
            id: "logo".to_string(),
            file: Some(PathBuf::from("logo.png")),
            ..Default::default()
        }
    }

    fn icon_options(name: &str) -> ImageOptions {
        ImageOptions {
            id: "icon".to_string(),
            mdi: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_file_source_defaults_to_binary() {
        let decl = validate_cross_dependencies(&file_options()).unwrap();
        assert_eq!(decl.config.image_type, ImageType::Binary);
        assert!(!decl.config.use_transparency);
        assert_eq!(decl.config.dither, DitherMode::None);
    }

    #[test]
    fn test_icon_source_defaults_to_transparent_binary() {
        let decl = validate_cross_dependencies(&icon_options("home")).unwrap();
        assert_eq!(decl.config.image_type, ImageType::TransparentBinary);
        assert!(decl.config.use_transparency);
    }

    #[test]
    fn test_icon_prefix_is_stripped() {
        let decl = validate_cross_dependencies(&icon_options("mdi:weather-sunny")).unwrap();
        assert_eq!(decl.source, ImageSource::Icon("weather-sunny".to_string()));
    }

    #[test]
    fn test_empty_icon_name_rejected() {
        let result = validate_cross_dependencies(&icon_options("mdi:"));
        assert!(matches!(
            result,
            Err(ValidationError::InvalidValue { field: "mdi", .. })
        ));
    }

    #[test]
    fn test_icon_name_cannot_leave_cache_dir() {
        for name in ["../../x", "mdi:../secret", "a/b", "home.svg", "Home", "%2e%2e"] {
            assert!(
                matches!(
                    validate_cross_dependencies(&icon_options(name)),
                    Err(ValidationError::InvalidValue { field: "mdi", .. })
                ),
                "accepted {:?}",
                name
            );
        }
    }

    #[test]
    fn test_kebab_case_icon_names_accepted() {
        for name in ["home-outline", "mdi:numeric-9-plus", "wifi"] {
            assert!(validate_cross_dependencies(&icon_options(name)).is_ok(), "{}", name);
        }
    }

    #[test]
    fn test_rgba_defaults_to_transparent() {
        let mut opts = file_options();
        opts.image_type = Some(ImageType::Rgba);
        let decl = validate_cross_dependencies(&opts).unwrap();
        assert!(decl.config.use_transparency);
    }

    #[test]
    fn test_rgba_forced_opaque_fails() {
        let mut opts = file_options();
        opts.image_type = Some(ImageType::Rgba);
        opts.use_transparency = Some(false);
        assert_eq!(
            validate_cross_dependencies(&opts),
            Err(ValidationError::MustBeTransparent(ImageType::Rgba))
        );
    }

    #[test]
    fn test_transparent_binary_forced_opaque_fails() {
        let mut opts = file_options();
        opts.image_type = Some(ImageType::TransparentBinary);
        opts.use_transparency = Some(false);
        assert!(validate_cross_dependencies(&opts).is_err());
    }

    #[test]
    fn test_opaque_formats_accept_transparency() {
        for image_type in [
            ImageType::Binary,
            ImageType::Grayscale,
            ImageType::Rgb565,
            ImageType::Rgb24,
        ] {
            let mut opts = file_options();
            opts.image_type = Some(image_type);
            let decl = validate_cross_dependencies(&opts).unwrap();
            assert!(!decl.config.use_transparency, "{} defaults opaque", image_type);

            opts.use_transparency = Some(true);
            let decl = validate_cross_dependencies(&opts).unwrap();
            assert!(decl.config.use_transparency);
        }
    }

    #[test]
    fn test_icon_with_color_format_fails() {
        let mut opts = icon_options("home");
        opts.image_type = Some(ImageType::Rgb565);
        assert_eq!(
            validate_cross_dependencies(&opts),
            Err(ValidationError::IconMustBeBinary(ImageType::Rgb565))
        );
    }

    #[test]
    fn test_icon_with_opaque_binary_is_allowed() {
        let mut opts = icon_options("home");
        opts.image_type = Some(ImageType::Binary);
        let decl = validate_cross_dependencies(&opts).unwrap();
        assert_eq!(decl.config.image_type, ImageType::Binary);
        assert!(!decl.config.use_transparency);
    }

    #[test]
    fn test_icon_rgba_reports_transparency_first() {
        // Transparency is checked before the icon restriction.
        let mut opts = icon_options("home");
        opts.image_type = Some(ImageType::Rgba);
        opts.use_transparency = Some(false);
        assert_eq!(
            validate_cross_dependencies(&opts),
            Err(ValidationError::MustBeTransparent(ImageType::Rgba))
        );
    }

    #[test]
    fn test_source_selectors() {
        let mut opts = file_options();
        opts.mdi = Some("home".to_string());
        assert_eq!(
            validate_cross_dependencies(&opts),
            Err(ValidationError::ConflictingSources)
        );

        let opts = ImageOptions {
            id: "nothing".to_string(),
            ..Default::default()
        };
        assert_eq!(
            validate_cross_dependencies(&opts),
            Err(ValidationError::MissingSource)
        );
    }

    #[test]
    fn test_image_type_parsing() {
        assert_eq!("rgb565".parse::<ImageType>(), Ok(ImageType::Rgb565));
        assert_eq!(
            "Transparent_Binary".parse::<ImageType>(),
            Ok(ImageType::TransparentBinary)
        );
        assert_eq!(
            "RGB32".parse::<ImageType>(),
            Err(UnsupportedFormat("RGB32".to_string()))
        );
        for t in ImageType::ALL {
            assert_eq!(t.as_str().parse::<ImageType>(), Ok(t));
        }
    }

    #[test]
    fn test_device_type_mapping() {
        assert_eq!(ImageType::Binary.device_type(), DeviceImageType::Binary);
        assert_eq!(
            ImageType::TransparentBinary.device_type(),
            DeviceImageType::Binary
        );
        assert_eq!(ImageType::Grayscale.device_type() as u8, 1);
        assert_eq!(ImageType::Rgb24.device_type() as u8, 2);
        assert_eq!(ImageType::Rgb565.device_type() as u8, 3);
        assert_eq!(ImageType::Rgba.device_type() as u8, 4);
        assert_eq!(DeviceImageType::Rgb565.symbol(), "IMAGE_TYPE_RGB565");
    }

    #[test]
    fn test_dither_parsing() {
        assert_eq!("none".parse::<DitherMode>(), Ok(DitherMode::None));
        assert_eq!(
            "FloydSteinberg".parse::<DitherMode>(),
            Ok(DitherMode::FloydSteinberg)
        );
        assert_eq!(
            "FLOYD_STEINBERG".parse::<DitherMode>(),
            Ok(DitherMode::FloydSteinberg)
        );
        assert!("ordered".parse::<DitherMode>().is_err());
    }

    #[test]
    fn test_target_size_parsing() {
        assert_eq!("64x32".parse::<TargetSize>(), TargetSize::new(64, 32));
        assert_eq!(" 10 X 20 ".parse::<TargetSize>(), TargetSize::new(10, 20));
        assert!("64".parse::<TargetSize>().is_err());
        assert!("0x32".parse::<TargetSize>().is_err());
        assert!("axb".parse::<TargetSize>().is_err());
    }
}
