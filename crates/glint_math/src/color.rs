//! Radiometric color values.
//!
//! Channels are non-negative and unbounded above while shading; they are
//! clamped to displayable range only at the final image write.

use glam::DVec3;

/// An RGB color with non-negative, unbounded channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(DVec3);

impl Color {
    /// No light.
    pub const BLACK: Color = Color(DVec3::ZERO);

    /// Create a color from its channels.
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        debug_assert!(r >= 0.0 && g >= 0.0 && b >= 0.0);
        Color(DVec3::new(r, g, b))
    }

    #[inline]
    pub fn r(self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn g(self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn b(self) -> f64 {
        self.0.z
    }

    #[inline]
    pub fn as_dvec3(self) -> DVec3 {
        self.0
    }

    /// Scale every channel by a non-negative scalar.
    #[inline]
    pub fn scale(self, k: f64) -> Color {
        debug_assert!(k >= 0.0);
        Color(self.0 * k)
    }

    /// Scale per channel, e.g. by a material coefficient triple.
    #[inline]
    pub fn scale_rgb(self, k: DVec3) -> Color {
        Color(self.0 * k)
    }

    /// Divide by a sample count, for averaging accumulated samples.
    #[inline]
    pub fn reduce(self, samples: usize) -> Color {
        Color(self.0 / samples as f64)
    }

    /// Clamp to [0, 1] and quantize to 8-bit RGBA. Only the image write
    /// surface is clamped; shading keeps full range.
    pub fn to_rgba8(self) -> [u8; 4] {
        let c = self.0.clamp(DVec3::ZERO, DVec3::ONE) * 255.0;
        [c.x as u8, c.y as u8, c.z as u8, 255]
    }
}

impl std::ops::Add for Color {
    type Output = Color;

    #[inline]
    fn add(self, rhs: Color) -> Color {
        Color(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for Color {
    #[inline]
    fn add_assign(&mut self, rhs: Color) {
        self.0 += rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_scale() {
        let c = Color::new(0.5, 1.0, 2.0) + Color::new(0.5, 0.0, 1.0);
        assert_eq!(c, Color::new(1.0, 1.0, 3.0));
        assert_eq!(c.scale(0.5), Color::new(0.5, 0.5, 1.5));
    }

    #[test]
    fn test_scale_rgb() {
        let c = Color::new(1.0, 2.0, 4.0).scale_rgb(DVec3::new(0.5, 0.25, 0.0));
        assert_eq!(c, Color::new(0.5, 0.5, 0.0));
    }

    #[test]
    fn test_reduce() {
        let c = Color::new(2.0, 4.0, 6.0).reduce(4);
        assert_eq!(c, Color::new(0.5, 1.0, 1.5));
    }

    #[test]
    fn test_to_rgba8_clamps_only_at_write() {
        // Channels above 1.0 survive shading arithmetic untouched
        let hot = Color::new(3.0, 0.5, 0.0);
        assert_eq!(hot.r(), 3.0);
        assert_eq!(hot.to_rgba8(), [255, 127, 0, 255]);
    }
}
