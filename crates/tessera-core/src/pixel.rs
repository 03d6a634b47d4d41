//! 8-bit straight-alpha color values.
//!
//! [`Color`] is the storage form of every pixel. Arithmetic is never done
//! on the bytes directly: convert to ratios with [`Color::to_ratio`], do the
//! math in `f32`, and convert back with [`Color::from_ratio`], which rounds
//! and saturates.
//!
//! Alpha is straight (not premultiplied). A color with alpha 0 has no
//! meaningful RGB; operations that produce fully transparent results emit
//! [`Color::TRANSPARENT`].
//!
//! # Example
//!
//! ```rust
//! use tessera_core::Color;
//!
//! let c = Color::rgb(255, 128, 0);
//! let [r, g, b, a] = c.to_ratio();
//! assert_eq!(r, 1.0);
//! assert!((g - 0.502).abs() < 0.001);
//! assert_eq!(b, 0.0);
//! assert_eq!(a, 1.0);
//! assert_eq!(Color::from_ratio([r, g, b, a]), c);
//! ```

/// A straight-alpha RGBA color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel (255 = opaque)
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Creates a color from all four channels.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Returns the channels as ratios in `[0, 1]`, `[r, g, b, a]`.
    #[inline]
    pub fn to_ratio(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }

    /// Builds a color from ratios, rounding to the nearest 8-bit value.
    ///
    /// Values outside `[0, 1]` saturate and NaN becomes 0.
    #[inline]
    pub fn from_ratio(rgba: [f32; 4]) -> Self {
        Self::rgba(
            ratio_to_u8(rgba[0]),
            ratio_to_u8(rgba[1]),
            ratio_to_u8(rgba[2]),
            ratio_to_u8(rgba[3]),
        )
    }

    /// Returns the same color with a different alpha.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Returns the channels as an array, `[r, g, b, a]`.
    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Color {
    #[inline]
    fn from(v: [u8; 4]) -> Self {
        Self::rgba(v[0], v[1], v[2], v[3])
    }
}

impl From<Color> for [u8; 4] {
    #[inline]
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

/// Converts a ratio to an 8-bit channel, rounding and saturating.
#[inline]
pub fn ratio_to_u8(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
