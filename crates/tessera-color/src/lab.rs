//! CIE L\*a\*b\* relative to the D65 white point.
//!
//! Colors are decoded with the sRGB transfer function, taken to XYZ with
//! the sRGB primaries, then to Lab. Components are kept at unit scale:
//! `l` runs over `[0, 1]` and `a`, `b` are roughly `[-1, 1]`, a hundredth
//! of the textbook values.
//!
//! # Example
//!
//! ```rust
//! use tessera_color::Lab;
//! use tessera_core::Color;
//!
//! let white = Lab::from(Color::WHITE);
//! assert!((white.l - 1.0).abs() < 1e-4);
//! assert!(white.a.abs() < 1e-4 && white.b.abs() < 1e-4);
//! assert_eq!(white.to_color(), Color::WHITE);
//! ```

use tessera_core::Color;

use crate::math::clamp_unit;

/// D65 reference white in XYZ.
const WHITE: [f32; 3] = [0.95047, 1.0, 1.08883];

const RGB_TO_XYZ: [[f32; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];

const XYZ_TO_RGB: [[f32; 3]; 3] = [
    [3.2404542, -1.5371385, -0.4985314],
    [-0.9692660, 1.8760108, 0.0415560],
    [0.0556434, -0.2040259, 1.0572252],
];

/// `6/29`, where the Lab companding switches to its linear segment.
const DELTA: f32 = 6.0 / 29.0;

/// Lab: lightness, green-red axis, blue-yellow axis, alpha.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lab {
    /// Lightness in `[0, 1]`
    pub l: f32,
    /// Green (negative) to red (positive)
    pub a: f32,
    /// Blue (negative) to yellow (positive)
    pub b: f32,
    /// Alpha in `[0, 1]`
    pub alpha: f32,
}

#[inline]
fn srgb_decode(v: f32) -> f32 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn srgb_encode(l: f32) -> f32 {
    if l <= 0.003_130_8 {
        l * 12.92
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    }
}

#[inline]
fn mul(m: &[[f32; 3]; 3], v: [f32; 3]) -> [f32; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

#[inline]
fn compand(t: f32) -> f32 {
    if t > DELTA * DELTA * DELTA {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

#[inline]
fn expand(t: f32) -> f32 {
    if t > DELTA {
        t * t * t
    } else {
        3.0 * DELTA * DELTA * (t - 4.0 / 29.0)
    }
}

impl Lab {
    /// Converts ratios `[r, g, b, a]`.
    pub fn from_ratio([r, g, b, alpha]: [f32; 4]) -> Self {
        let [x, y, z] = mul(&RGB_TO_XYZ, [srgb_decode(r), srgb_decode(g), srgb_decode(b)]);
        let fy = compand(y / WHITE[1]);
        Self {
            l: 1.16 * fy - 0.16,
            a: 5.0 * (compand(x / WHITE[0]) - fy),
            b: 2.0 * (fy - compand(z / WHITE[2])),
            alpha,
        }
    }

    /// Back to ratios. Colors outside the sRGB gamut are clamped per channel.
    pub fn to_ratio(self) -> [f32; 4] {
        let fy = (self.l + 0.16) / 1.16;
        let xyz = [
            WHITE[0] * expand(fy + self.a / 5.0),
            WHITE[1] * expand(fy),
            WHITE[2] * expand(fy - self.b / 2.0),
        ];
        let [r, g, b] = mul(&XYZ_TO_RGB, xyz);
        [
            clamp_unit(srgb_encode(clamp_unit(r))),
            clamp_unit(srgb_encode(clamp_unit(g))),
            clamp_unit(srgb_encode(clamp_unit(b))),
            clamp_unit(self.alpha),
        ]
    }

    /// Back to an 8-bit color.
    pub fn to_color(self) -> Color {
        Color::from_ratio(self.to_ratio())
    }

    /// Distance from the neutral axis, `√(a² + b²)`.
    #[inline]
    pub fn chroma(&self) -> f32 {
        self.a.hypot(self.b)
    }
}

impl From<Color> for Lab {
    fn from(c: Color) -> Self {
        Self::from_ratio(c.to_ratio())
    }
}
