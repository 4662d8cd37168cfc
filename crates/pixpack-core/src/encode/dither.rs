//! Floyd-Steinberg error diffusion.

/// Diffuse quantization error over a single-channel image.
///
/// `values` holds one f32 per pixel in row-major order; `quantize` maps a
/// value (including accumulated error) to its output level. The difference
/// is spread to the unvisited neighbours with the classic 7/16, 3/16, 5/16,
/// 1/16 weights. Errors never wrap across row edges.
///
/// Returns one u8 per pixel, clamped to 0..=255.
pub fn floyd_steinberg<F>(values: &[f32], width: usize, height: usize, quantize: F) -> Vec<u8>
where
    F: Fn(f32) -> f32,
{
    debug_assert_eq!(values.len(), width * height);

    let mut buf = values.to_vec();
    let mut out = Vec::with_capacity(buf.len());

    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            let old = buf[i];
            let new = quantize(old).clamp(0.0, 255.0);
            out.push(new as u8);
            let err = old - new;

            if x + 1 < width {
                buf[i + 1] += err * (7.0 / 16.0);
            }
            if y + 1 < height {
                let below = i + width;
                if x > 0 {
                    buf[below - 1] += err * (3.0 / 16.0);
                }
                buf[below] += err * (5.0 / 16.0);
                if x + 1 < width {
                    buf[below + 1] += err * (1.0 / 16.0);
                }
            }
        }
    }

    out
}

/// Quantizer for 8-bit output: round to the nearest level.
#[inline]
pub fn nearest_level(v: f32) -> f32 {
    v.round()
}

/// Quantizer for 1-bit output: black below 128, white otherwise.
#[inline]
pub fn black_or_white(v: f32) -> f32 {
    if v >= 128.0 {
        255.0
    } else {
        0.0
    }
}
