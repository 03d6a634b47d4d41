//! Cylindrical color models: HSL, HSV and HSI.
//!
//! Hue is in degrees `[0, 360)`; saturation, lightness/value/intensity and
//! alpha are ratios in `[0, 1]`. These are views computed on demand from
//! [`Color`], never a storage format.
//!
//! # Guards
//!
//! When chroma (`max - min` of R, G, B) is zero the color is achromatic:
//! hue and saturation are both 0. Every saturation formula checks its
//! denominator, so black, white and greys never produce NaN.
//!
//! # Inverse conversions
//!
//! Hue is reduced mod 360 and split into six 60° sectors. HSL and HSV use
//! the usual chroma construction. HSI solves for chroma from the sector
//! position so that `Hsi::from(c).to_color()` reproduces `c` up to 8-bit
//! rounding, like the other two models.
//!
//! # Example
//!
//! ```rust
//! use tessera_color::{Hsv, Hsi};
//! use tessera_core::Color;
//!
//! let c = Color::rgb(30, 144, 255);
//! assert_eq!(Hsv::from(c).to_color(), c);
//! assert_eq!(Hsi::from(c).to_color(), c);
//! ```

use tessera_core::Color;

use crate::math::{clamp_unit, max_min};

const EPSILON: f32 = 1e-6;

/// HSL: hue, saturation, lightness, alpha.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsl {
    /// Hue in degrees
    pub h: f32,
    /// Saturation
    pub s: f32,
    /// Lightness
    pub l: f32,
    /// Alpha
    pub a: f32,
}

/// HSV: hue, saturation, value, alpha.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsv {
    /// Hue in degrees
    pub h: f32,
    /// Saturation
    pub s: f32,
    /// Value
    pub v: f32,
    /// Alpha
    pub a: f32,
}

/// HSI: hue, saturation, intensity, alpha.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsi {
    /// Hue in degrees
    pub h: f32,
    /// Saturation
    pub s: f32,
    /// Intensity
    pub i: f32,
    /// Alpha
    pub a: f32,
}

// ============================================================================
// Shared hue math
// ============================================================================

/// Hue in degrees for ratio RGB, 0 when achromatic.
#[inline]
fn hue(r: f32, g: f32, b: f32, max: f32, chroma: f32) -> f32 {
    if chroma <= EPSILON {
        return 0.0;
    }
    let h = if max == r {
        ((g - b) / chroma).rem_euclid(6.0)
    } else if max == g {
        (b - r) / chroma + 2.0
    } else {
        (r - g) / chroma + 4.0
    };
    let deg = h * 60.0;
    if deg >= 360.0 { deg - 360.0 } else { deg }
}

/// Splits a hue into its 60° sector and the position of the middle channel
/// within that sector, `0` at a primary/secondary and `1` half way.
#[inline]
fn sector(h: f32) -> (u8, f32) {
    let hp = h.rem_euclid(360.0) / 60.0;
    let index = (hp as u8).min(5);
    let frac = 1.0 - ((hp % 2.0) - 1.0).abs();
    (index, frac)
}

/// Places max/mid/min channel values according to the hue sector.
#[inline]
fn arrange(index: u8, max: f32, mid: f32, min: f32) -> [f32; 3] {
    match index {
        0 => [max, mid, min],
        1 => [mid, max, min],
        2 => [min, max, mid],
        3 => [min, mid, max],
        4 => [mid, min, max],
        _ => [max, min, mid],
    }
}

#[inline]
fn finish(rgb: [f32; 3], a: f32) -> [f32; 4] {
    [clamp_unit(rgb[0]), clamp_unit(rgb[1]), clamp_unit(rgb[2]), clamp_unit(a)]
}

// ============================================================================
// HSL
// ============================================================================

impl Hsl {
    /// Converts straight RGBA ratios.
    pub fn from_ratio([r, g, b, a]: [f32; 4]) -> Self {
        let (max, min) = max_min(r, g, b);
        let chroma = max - min;
        let l = (max + min) / 2.0;
        let denom = 1.0 - (2.0 * l - 1.0).abs();
        let s = if chroma <= EPSILON || denom <= EPSILON {
            0.0
        } else {
            (chroma / denom).min(1.0)
        };
        Self {
            h: hue(r, g, b, max, chroma),
            s,
            l,
            a,
        }
    }

    /// Converts back to straight RGBA ratios, clamped to `[0, 1]`.
    pub fn to_ratio(self) -> [f32; 4] {
        let l = clamp_unit(self.l);
        let c = (1.0 - (2.0 * l - 1.0).abs()) * clamp_unit(self.s);
        let (index, frac) = sector(self.h);
        let min = l - c / 2.0;
        finish(arrange(index, min + c, min + c * frac, min), self.a)
    }

    /// Converts back to an 8-bit color.
    pub fn to_color(self) -> Color {
        Color::from_ratio(self.to_ratio())
    }
}

impl From<Color> for Hsl {
    fn from(c: Color) -> Self {
        Self::from_ratio(c.to_ratio())
    }
}

// ============================================================================
// HSV
// ============================================================================

impl Hsv {
    /// Converts straight RGBA ratios.
    pub fn from_ratio([r, g, b, a]: [f32; 4]) -> Self {
        let (max, min) = max_min(r, g, b);
        let chroma = max - min;
        let s = if chroma <= EPSILON || max <= EPSILON {
            0.0
        } else {
            chroma / max
        };
        Self {
            h: hue(r, g, b, max, chroma),
            s,
            v: max,
            a,
        }
    }

    /// Converts back to straight RGBA ratios, clamped to `[0, 1]`.
    pub fn to_ratio(self) -> [f32; 4] {
        let v = clamp_unit(self.v);
        let c = v * clamp_unit(self.s);
        let (index, frac) = sector(self.h);
        let min = v - c;
        finish(arrange(index, v, min + c * frac, min), self.a)
    }

    /// Converts back to an 8-bit color.
    pub fn to_color(self) -> Color {
        Color::from_ratio(self.to_ratio())
    }
}

impl From<Color> for Hsv {
    fn from(c: Color) -> Self {
        Self::from_ratio(c.to_ratio())
    }
}

// ============================================================================
// HSI
// ============================================================================

impl Hsi {
    /// Converts straight RGBA ratios.
    pub fn from_ratio([r, g, b, a]: [f32; 4]) -> Self {
        let (max, min) = max_min(r, g, b);
        let chroma = max - min;
        let i = (r + g + b) / 3.0;
        let s = if chroma <= EPSILON || i <= EPSILON {
            0.0
        } else {
            1.0 - min / i
        };
        Self {
            h: hue(r, g, b, max, chroma),
            s,
            i,
            a,
        }
    }

    /// Converts back to straight RGBA ratios, clamped to `[0, 1]`.
    ///
    /// Out-of-gamut combinations (high intensity with high saturation)
    /// saturate per channel.
    pub fn to_ratio(self) -> [f32; 4] {
        let i = clamp_unit(self.i);
        let s = clamp_unit(self.s);
        let (index, frac) = sector(self.h);
        let min = i * (1.0 - s);
        let c = 3.0 * i * s / (1.0 + frac);
        finish(arrange(index, min + c, min + c * frac, min), self.a)
    }

    /// Converts back to an 8-bit color.
    pub fn to_color(self) -> Color {
        Color::from_ratio(self.to_ratio())
    }
}

impl From<Color> for Hsi {
    fn from(c: Color) -> Self {
        Self::from_ratio(c.to_ratio())
    }
}

// ============================================================================
// Model selection
// ============================================================================

/// One of the supported cylindrical models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorModel {
    /// Hue, saturation, lightness
    #[default]
    Hsl,
    /// Hue, saturation, value
    Hsv,
    /// Hue, saturation, intensity
    Hsi,
}

impl ColorModel {
    /// Passes `c` through this model and back, quantizing on the way out.
    #[inline]
    pub fn roundtrip(self, c: Color) -> Color {
        match self {
            Self::Hsl => Hsl::from(c).to_color(),
            Self::Hsv => Hsv::from(c).to_color(),
            Self::Hsi => Hsi::from(c).to_color(),
        }
    }

    /// Lower-case model name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Hsl => "hsl",
            Self::Hsv => "hsv",
            Self::Hsi => "hsi",
        }
    }
}

impl std::str::FromStr for ColorModel {
    type Err = tessera_core::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hsl" | "hsla" => Ok(Self::Hsl),
            "hsv" | "hsb" => Ok(Self::Hsv),
            "hsi" => Ok(Self::Hsi),
            _ => Err(tessera_core::Error::unknown_name("color model", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hsl_primaries() {
        let red = Hsl::from(Color::rgb(255, 0, 0));
        assert_eq!((red.h, red.s, red.l), (0.0, 1.0, 0.5));

        let green = Hsl::from(Color::rgb(0, 255, 0));
        assert_relative_eq!(green.h, 120.0);

        let blue = Hsl::from(Color::rgb(0, 0, 255));
        assert_relative_eq!(blue.h, 240.0);

        let magenta = Hsl::from(Color::rgb(255, 0, 255));
        assert_relative_eq!(magenta.h, 300.0);
    }

    #[test]
    fn test_hsl_white_black_grey() {
        let white = Hsl::from(Color::WHITE);
        assert_eq!((white.h, white.s, white.l), (0.0, 0.0, 1.0));

        let black = Hsl::from(Color::BLACK);
        assert_eq!((black.h, black.s, black.l), (0.0, 0.0, 0.0));

        let grey = Hsl::from(Color::rgb(77, 77, 77));
        assert_eq!((grey.h, grey.s), (0.0, 0.0));
        assert!(!grey.l.is_nan());
    }

    #[test]
    fn test_hsv_guards() {
        let black = Hsv::from(Color::BLACK);
        assert_eq!((black.h, black.s, black.v), (0.0, 0.0, 0.0));
        let c = Hsv::from(Color::rgb(128, 64, 0));
        assert_relative_eq!(c.h, 30.0);
        assert_relative_eq!(c.s, 1.0);
    }

    #[test]
    fn test_hsi_guards() {
        let black = Hsi::from(Color::BLACK);
        assert_eq!((black.h, black.s, black.i), (0.0, 0.0, 0.0));
        let grey = Hsi::from(Color::rgb(200, 200, 200));
        assert_eq!(grey.s, 0.0);
        let red = Hsi::from(Color::rgb(255, 0, 0));
        assert_relative_eq!(red.i, 1.0 / 3.0);
        assert_relative_eq!(red.s, 1.0);
    }

    #[test]
    fn test_hue_wraps() {
        let a = Hsl { h: 480.0, s: 1.0, l: 0.5, a: 1.0 }.to_color();
        let b = Hsl { h: 120.0, s: 1.0, l: 0.5, a: 1.0 }.to_color();
        let c = Hsl { h: -240.0, s: 1.0, l: 0.5, a: 1.0 }.to_color();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(b, Color::rgb(0, 255, 0));
    }

    #[test]
    fn test_red_hue_is_not_grey() {
        let red = Hsl { h: 0.0, s: 1.0, l: 0.5, a: 1.0 }.to_color();
        assert_eq!(red, Color::rgb(255, 0, 0));
    }

    #[test]
    fn test_roundtrip_sample() {
        for c in [
            Color::rgba(12, 200, 77, 255),
            Color::rgba(250, 3, 128, 90),
            Color::rgba(1, 2, 3, 0),
            Color::rgba(255, 255, 254, 255),
        ] {
            for model in [ColorModel::Hsl, ColorModel::Hsv, ColorModel::Hsi] {
                let out = model.roundtrip(c);
                for (x, y) in c.to_array().iter().zip(out.to_array()) {
                    assert!(x.abs_diff(y) <= 1, "{model:?}: {c:?} -> {out:?}");
                }
            }
        }
    }

    #[test]
    fn test_model_parse() {
        assert_eq!("HSV".parse::<ColorModel>().unwrap(), ColorModel::Hsv);
        assert_eq!(ColorModel::Hsi.name(), "hsi");
        assert!(matches!(
            "lab".parse::<ColorModel>(),
            Err(tessera_core::Error::UnknownName { kind: "color model", .. })
        ));
    }
}
