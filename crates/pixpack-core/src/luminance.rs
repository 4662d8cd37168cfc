//! Luminance calculation using the ITU-R 601-2 luma transform.
//!
//! Grayscale and monochrome encodings both derive their single channel from
//! this transform, so the integer and floating point variants must agree to
//! within rounding.

/// ITU-R 601-2 coefficient for red channel.
pub const LUMA_R: f32 = 0.299;

/// ITU-R 601-2 coefficient for green channel.
pub const LUMA_G: f32 = 0.587;

/// ITU-R 601-2 coefficient for blue channel.
pub const LUMA_B: f32 = 0.114;

// 16.16 fixed point versions of the coefficients above; they sum to 65536.
const LUMA_R_FIXED: u32 = 19595;
const LUMA_G_FIXED: u32 = 38470;
const LUMA_B_FIXED: u32 = 7471;

/// Calculate luma from u8 RGB values, rounded to the nearest integer.
///
/// # Arguments
/// * `r` - Red channel value (0-255)
/// * `g` - Green channel value (0-255)
/// * `b` - Blue channel value (0-255)
///
/// # Returns
/// Luma value (0-255)
#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    let sum = r as u32 * LUMA_R_FIXED + g as u32 * LUMA_G_FIXED + b as u32 * LUMA_B_FIXED;
    ((sum + 0x8000) >> 16) as u8
}

/// Light/dark decision for 1-bit output, on unrounded luma.
///
/// Compares `299r + 587g + 114b` against `128 * 1000` in integers, so a
/// luma in [127.5, 128) is dark even though [`luma_u8`] rounds it to 128.
#[inline]
pub fn luma_is_light(r: u8, g: u8, b: u8) -> bool {
    r as u32 * 299 + g as u32 * 587 + b as u32 * 114 >= 128_000
}

/// Calculate unrounded luma from u8 RGB values.
///
/// Used as the input of error diffusion, where the fractional part is the
/// quantization error being spread.
#[inline]
pub fn luma_f32(r: u8, g: u8, b: u8) -> f32 {
    LUMA_R * r as f32 + LUMA_G * g as f32 + LUMA_B * b as f32
}
