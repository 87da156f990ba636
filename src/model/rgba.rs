//! Renderable RGBA color value.

use serde::{Deserialize, Serialize};

/// Straight-alpha RGBA color with components in `0.0..=1.0`.
///
/// This is what subscribers of the color stream receive and what the
/// gradient swatches are built from.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgba {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Opacity
    pub a: f32,
}

impl Rgba {
    /// Create a color from its four channels.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Channels as an array in `[r, g, b, a]` order.
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Quantize to 8 bits per channel, rounding to nearest.
    pub fn to_u8(self) -> [u8; 4] {
        self.to_array()
            .map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    /// Format as `#RRGGBBAA`.
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_u8();
        format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
    }

    /// Linear interpolation towards `other`, `t` in `0.0..=1.0`.
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let mix = |x: f32, y: f32| x + (y - x) * t;
        Rgba {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    /// Whether every channel is within `eps` of `other`.
    pub fn approx_eq(self, other: Rgba, eps: f32) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array())
            .all(|(x, y)| (x - y).abs() <= eps)
    }
}

impl std::fmt::Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "rgba({:.3}, {:.3}, {:.3}, {:.3})",
            self.r, self.g, self.b, self.a
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_formatting() {
        assert_eq!(Rgba::new(1.0, 0.0, 0.0, 1.0).to_hex(), "#FF0000FF");
        assert_eq!(Rgba::new(0.5, 0.5, 0.5, 0.0).to_hex(), "#80808000");
    }

    #[test]
    fn test_lerp_midpoint() {
        let black = Rgba::new(0.0, 0.0, 0.0, 1.0);
        let white = Rgba::new(1.0, 1.0, 1.0, 1.0);
        assert!(black.lerp(white, 0.5).approx_eq(Rgba::new(0.5, 0.5, 0.5, 1.0), 1e-6));
    }
}
