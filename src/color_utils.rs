//! Color conversion utilities shared across the crate.
//!
//! All values here are normalized: channels, saturation and brightness are
//! in `0.0..=1.0`, and hue is a turn fraction where `1.0` equals 360 degrees.

/// Clamp a value into `0.0..=1.0`. NaN maps to `0.0`.
#[inline]
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Convert HSB to RGB using the six-sector algorithm.
///
/// # Arguments
/// * `h` - Hue as a fraction of a turn; wraps, so `1.0` is the same as `0.0`
/// * `s` - Saturation (0.0-1.0)
/// * `b` - Brightness (0.0-1.0)
///
/// # Returns
/// RGB tuple with values in range 0.0-1.0
pub fn hsb_to_rgb(h: f32, s: f32, b: f32) -> (f32, f32, f32) {
    let scaled = h.rem_euclid(1.0) * 6.0;
    let sector = scaled.floor();
    let f = scaled - sector;

    let p = b * (1.0 - s);
    let q = b * (1.0 - s * f);
    let t = b * (1.0 - s * (1.0 - f));

    // rem_euclid can round up to exactly 1.0 for tiny negative hues
    match (sector as u8).min(6) {
        0 | 6 => (b, t, p),
        1 => (q, b, p),
        2 => (p, b, t),
        3 => (p, q, b),
        4 => (t, p, b),
        _ => (b, p, q),
    }
}

/// Convert RGB to HSB.
///
/// Achromatic input (all channels equal) reports hue `0.0`; black reports
/// saturation `0.0`.
pub fn rgb_to_hsb(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let saturation = if max > 0.0 { delta / max } else { 0.0 };

    if delta <= f32::EPSILON {
        return (0.0, saturation, max);
    }

    let sector = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    (clamp_unit((sector / 6.0).rem_euclid(1.0)), saturation, max)
}
