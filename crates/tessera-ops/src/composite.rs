//! Layer blending and alpha compositing.
//!
//! Blending is a fixed two-stage pipeline per pixel:
//!
//! 1. The blend mode computes a result color `Cr` from the backdrop `Cb`
//!    (base pixel) and the source `Cs` (overlay pixel), as if both were
//!    opaque.
//! 2. The PDF compositing equation mixes backdrop, source and result by
//!    their alphas:
//!
//! ```text
//! αr = αb + αs − αb·αs
//! Cr' = ((1−αs)·αb·Cb + (1−αb)·αs·Cs + αb·αs·Cr) / αr
//! ```
//!
//! Output is straight alpha; a fully transparent result is
//! [`Color::TRANSPARENT`]. Opacity scales the source alpha before stage 2.
//!
//! Two inputs of different size are blended over their intersection.
//!
//! # Blend Modes
//!
//! - Separable: [`BlendMode::Multiply`], [`BlendMode::Screen`],
//!   [`BlendMode::Overlay`], the light, burn and dodge families,
//!   [`BlendMode::Difference`], [`BlendMode::Exclusion`], ...
//! - Whole-pixel: [`BlendMode::Darker`], [`BlendMode::Lighter`] pick one of
//!   the two pixels by their R+G+B sum
//! - HSL: [`BlendMode::Hue`], [`BlendMode::Saturation`],
//!   [`BlendMode::Color`], [`BlendMode::Luminosity`]
//! - [`BlendMode::Dissolve`] picks source or backdrop at random per pixel
//!
//! # Example
//!
//! ```rust
//! use tessera_core::{Color, Raster};
//! use tessera_ops::composite::{blend, composite_pixel};
//! use tessera_ops::BlendMode;
//!
//! // Half-transparent white over opaque black
//! let px = composite_pixel([0.0, 0.0, 0.0, 1.0], [1.0, 1.0, 1.0, 0.5], [1.0, 1.0, 1.0]);
//! assert_eq!(px, [0.5, 0.5, 0.5, 1.0]);
//!
//! let base = Raster::filled(2, 2, Color::rgb(255, 128, 0));
//! let over = Raster::filled(3, 1, Color::rgb(128, 128, 128));
//! let out = blend(&base, &over, BlendMode::Multiply, 1.0).unwrap();
//! assert_eq!(out.dimensions(), (2, 1));
//! assert_eq!(out.pixel(0, 0), Color::rgb(128, 64, 0));
//! ```

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tessera_color::Hsl;
use tessera_core::{traverse, Color, Raster};
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::error::check_unit;
use crate::{OpsError, OpsResult};

/// Blend mode formula applied before alpha compositing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// Source replaces backdrop.
    #[default]
    Normal,
    /// Random per-pixel choice weighted by source alpha.
    Dissolve,
    /// Per-channel minimum.
    Darken,
    /// `Cb·Cs`
    Multiply,
    /// Color burn, `1 − (1−Cb)/Cs`.
    Burn,
    /// `Cb + Cs − 1`
    LinearBurn,
    /// Whichever pixel has the lower R+G+B sum.
    Darker,
    /// Per-channel maximum.
    Lighten,
    /// `1 − (1−Cb)(1−Cs)`
    Screen,
    /// Color dodge, `Cb/(1−Cs)`.
    Dodge,
    /// `min(Cb + Cs, 1)`, also known as addition.
    LinearDodge,
    /// Whichever pixel has the higher R+G+B sum.
    Lighter,
    /// Multiply or screen depending on the backdrop.
    Overlay,
    /// Soft light.
    SoftLight,
    /// Overlay with source and backdrop swapped.
    HardLight,
    /// Burn or dodge depending on the source.
    VividLight,
    /// Linear burn or linear dodge depending on the source.
    LinearLight,
    /// Backdrop clamped into `[2Cs−1, 2Cs]`.
    PinLight,
    /// Posterizes to 0 or 1 per channel.
    HardMix,
    /// `|Cb − Cs|`
    Difference,
    /// `Cb + Cs − 2·Cb·Cs`
    Exclusion,
    /// `max(Cb − Cs, 0)`
    Subtraction,
    /// Hue of the source, saturation and lightness of the backdrop.
    Hue,
    /// Saturation of the source.
    Saturation,
    /// Hue and saturation of the source, lightness of the backdrop.
    Color,
    /// Lightness of the source.
    Luminosity,
}

impl BlendMode {
    /// Every mode, in declaration order.
    pub const ALL: [BlendMode; 26] = [
        Self::Normal,
        Self::Dissolve,
        Self::Darken,
        Self::Multiply,
        Self::Burn,
        Self::LinearBurn,
        Self::Darker,
        Self::Lighten,
        Self::Screen,
        Self::Dodge,
        Self::LinearDodge,
        Self::Lighter,
        Self::Overlay,
        Self::SoftLight,
        Self::HardLight,
        Self::VividLight,
        Self::LinearLight,
        Self::PinLight,
        Self::HardMix,
        Self::Difference,
        Self::Exclusion,
        Self::Subtraction,
        Self::Hue,
        Self::Saturation,
        Self::Color,
        Self::Luminosity,
    ];

    /// Alias for [`BlendMode::LinearDodge`].
    pub const ADDITION: BlendMode = BlendMode::LinearDodge;

    /// Kebab-case name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Dissolve => "dissolve",
            Self::Darken => "darken",
            Self::Multiply => "multiply",
            Self::Burn => "burn",
            Self::LinearBurn => "linear-burn",
            Self::Darker => "darker",
            Self::Lighten => "lighten",
            Self::Screen => "screen",
            Self::Dodge => "dodge",
            Self::LinearDodge => "linear-dodge",
            Self::Lighter => "lighter",
            Self::Overlay => "overlay",
            Self::SoftLight => "soft-light",
            Self::HardLight => "hard-light",
            Self::VividLight => "vivid-light",
            Self::LinearLight => "linear-light",
            Self::PinLight => "pin-light",
            Self::HardMix => "hard-mix",
            Self::Difference => "difference",
            Self::Exclusion => "exclusion",
            Self::Subtraction => "subtraction",
            Self::Hue => "hue",
            Self::Saturation => "saturation",
            Self::Color => "color",
            Self::Luminosity => "luminosity",
        }
    }

    /// Maps the mode to the function that computes its result color.
    fn formula(self) -> Formula {
        use Formula::{Pixel, Separable};
        match self {
            Self::Normal | Self::Dissolve => Separable(|_, s| s),
            Self::Darken => Separable(f32::min),
            Self::Multiply => Separable(|b, s| b * s),
            Self::Burn => Separable(burn),
            Self::LinearBurn => Separable(|b, s| b + s - 1.0),
            Self::Darker => Pixel(darker),
            Self::Lighten => Separable(f32::max),
            Self::Screen => Separable(screen),
            Self::Dodge => Separable(dodge),
            Self::LinearDodge => Separable(|b, s| (b + s).min(1.0)),
            Self::Lighter => Pixel(lighter),
            Self::Overlay => Separable(overlay),
            Self::SoftLight => Separable(soft_light),
            Self::HardLight => Separable(|b, s| overlay(s, b)),
            Self::VividLight => Separable(vivid_light),
            Self::LinearLight => Separable(linear_light),
            Self::PinLight => Separable(pin_light),
            Self::HardMix => Separable(|b, s| if s < 1.0 - b { 0.0 } else { 1.0 }),
            Self::Difference => Separable(|b, s| (b - s).abs()),
            Self::Exclusion => Separable(|b, s| b + s - 2.0 * b * s),
            Self::Subtraction => Separable(|b, s| (b - s).max(0.0)),
            Self::Hue => Pixel(hue),
            Self::Saturation => Pixel(saturation),
            Self::Color => Pixel(color),
            Self::Luminosity => Pixel(luminosity),
        }
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlendMode {
    type Err = OpsError;

    fn from_str(s: &str) -> OpsResult<Self> {
        let key = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match key.as_str() {
            "addition" | "add" => Ok(Self::ADDITION),
            "colour" => Ok(Self::Color),
            _ => Self::ALL
                .into_iter()
                .find(|m| m.name() == key)
                .ok_or_else(|| OpsError::InvalidParameter(format!("unknown blend mode: {s}"))),
        }
    }
}

/// Settings for [`blend_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendOptions {
    /// Blend mode formula.
    pub mode: BlendMode,
    /// Multiplier for the source alpha, in `[0, 1]`.
    pub opacity: f32,
    /// Seed for [`BlendMode::Dissolve`]; `None` draws from system entropy.
    pub seed: Option<u64>,
}

impl Default for BlendOptions {
    fn default() -> Self {
        Self {
            mode: BlendMode::Normal,
            opacity: 1.0,
            seed: None,
        }
    }
}

// ============================================================================
// Formulas
// ============================================================================

/// A result-color function, resolved once per blend call.
#[derive(Clone, Copy)]
enum Formula {
    Separable(fn(f32, f32) -> f32),
    Pixel(fn([f32; 4], [f32; 4]) -> [f32; 3]),
}

impl Formula {
    #[inline]
    fn apply(self, cb: [f32; 4], cs: [f32; 4]) -> [f32; 3] {
        match self {
            Self::Separable(f) => [f(cb[0], cs[0]), f(cb[1], cs[1]), f(cb[2], cs[2])]
                .map(|v| v.clamp(0.0, 1.0)),
            Self::Pixel(f) => f(cb, cs),
        }
    }
}

#[inline]
fn screen(b: f32, s: f32) -> f32 {
    1.0 - (1.0 - b) * (1.0 - s)
}

#[inline]
fn burn(b: f32, s: f32) -> f32 {
    if s <= 0.0 { 0.0 } else { 1.0 - (1.0 - b) / s }
}

#[inline]
fn dodge(b: f32, s: f32) -> f32 {
    if s >= 1.0 { 1.0 } else { b / (1.0 - s) }
}

#[inline]
fn overlay(b: f32, s: f32) -> f32 {
    if b < 0.5 {
        2.0 * b * s
    } else {
        1.0 - 2.0 * (1.0 - b) * (1.0 - s)
    }
}

#[inline]
fn soft_light(b: f32, s: f32) -> f32 {
    if s <= 0.5 {
        b * (s + 0.5)
    } else {
        1.0 - (1.0 - b) * (1.0 - (s - 0.5))
    }
}

#[inline]
fn vivid_light(b: f32, s: f32) -> f32 {
    if s > 0.5 {
        dodge(b, 2.0 * (s - 0.5))
    } else {
        burn(b, 2.0 * s)
    }
}

#[inline]
fn linear_light(b: f32, s: f32) -> f32 {
    if s > 0.5 {
        b + 2.0 * (s - 0.5)
    } else {
        b + 2.0 * s - 1.0
    }
}

#[inline]
fn pin_light(b: f32, s: f32) -> f32 {
    b.max(2.0 * s - 1.0).min(2.0 * s)
}

#[inline]
fn rgb(c: [f32; 4]) -> [f32; 3] {
    [c[0], c[1], c[2]]
}

#[inline]
fn rgb_sum(c: [f32; 4]) -> f32 {
    c[0] + c[1] + c[2]
}

fn darker(cb: [f32; 4], cs: [f32; 4]) -> [f32; 3] {
    if rgb_sum(cs) < rgb_sum(cb) { rgb(cs) } else { rgb(cb) }
}

fn lighter(cb: [f32; 4], cs: [f32; 4]) -> [f32; 3] {
    if rgb_sum(cs) > rgb_sum(cb) { rgb(cs) } else { rgb(cb) }
}

/// Replaces parts of the backdrop's HSL with the source's.
#[inline]
fn mix_hsl(cb: [f32; 4], cs: [f32; 4], f: impl Fn(&mut Hsl, &Hsl)) -> [f32; 3] {
    let mut b = Hsl::from_ratio(cb);
    let s = Hsl::from_ratio(cs);
    f(&mut b, &s);
    rgb(b.to_ratio())
}

fn hue(cb: [f32; 4], cs: [f32; 4]) -> [f32; 3] {
    mix_hsl(cb, cs, |b, s| b.h = s.h)
}

fn saturation(cb: [f32; 4], cs: [f32; 4]) -> [f32; 3] {
    mix_hsl(cb, cs, |b, s| b.s = s.s)
}

fn color(cb: [f32; 4], cs: [f32; 4]) -> [f32; 3] {
    mix_hsl(cb, cs, |b, s| {
        b.h = s.h;
        b.s = s.s;
    })
}

fn luminosity(cb: [f32; 4], cs: [f32; 4]) -> [f32; 3] {
    mix_hsl(cb, cs, |b, s| b.l = s.l)
}

/// Result color of `mode` for straight RGBA ratios, ignoring alpha.
///
/// [`BlendMode::Dissolve`] has no deterministic result color and returns
/// the source.
///
/// ```rust
/// use tessera_ops::composite::blend_rgb;
/// use tessera_ops::BlendMode;
///
/// let r = blend_rgb(BlendMode::Burn, [0.5, 0.5, 0.5, 1.0], [0.0, 1.0, 0.5, 1.0]);
/// assert_eq!(r, [0.0, 0.5, 0.0]);
/// ```
#[inline]
pub fn blend_rgb(mode: BlendMode, cb: [f32; 4], cs: [f32; 4]) -> [f32; 3] {
    mode.formula().apply(cb, cs)
}

/// The PDF compositing equation for straight RGBA ratios.
///
/// `cb` is the backdrop, `cs` the source (with opacity already applied to
/// its alpha) and `cr` the blend-mode result. Returns straight RGBA.
#[inline]
pub fn composite_pixel(cb: [f32; 4], cs: [f32; 4], cr: [f32; 3]) -> [f32; 4] {
    let ab = cb[3];
    let a_s = cs[3];
    let ar = ab + a_s - ab * a_s;
    if ar <= 0.0 {
        return [0.0; 4];
    }

    let wb = (1.0 - a_s) * ab;
    let ws = (1.0 - ab) * a_s;
    let wr = ab * a_s;
    let ch = |i: usize| (wb * cb[i] + ws * cs[i] + wr * cr[i]) / ar;
    [ch(0), ch(1), ch(2), ar]
}

/// Blends one pixel pair with a resolved formula.
#[inline]
fn blend_colors(b: Color, s: Color, formula: Formula, opacity: f32) -> Color {
    let cb = b.to_ratio();
    let mut cs = s.to_ratio();
    cs[3] *= opacity;
    if cs[3] <= 0.0 {
        return b;
    }
    let cr = formula.apply(cb, cs);
    let out = composite_pixel(cb, cs, cr);
    if out[3] <= 0.0 {
        return Color::TRANSPARENT;
    }
    Color::from_ratio(out)
}

/// Per-row generator for [`BlendMode::Dissolve`].
fn row_rng(seed: Option<u64>, y: u32) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s ^ (y as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)),
        None => StdRng::from_entropy(),
    }
}

// ============================================================================
// Raster operations
// ============================================================================

/// Blends `overlay` onto `base` with the given mode and opacity.
///
/// The output covers the intersection of the two rasters. `opacity` must be
/// in `[0, 1]`; at `0` the result is `base` unchanged for every mode.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if `opacity` is outside `[0, 1]` or NaN.
pub fn blend(base: &Raster, overlay: &Raster, mode: BlendMode, opacity: f32) -> OpsResult<Raster> {
    blend_with(
        base,
        overlay,
        &BlendOptions {
            mode,
            opacity,
            seed: None,
        },
    )
}

/// Blends with full [`BlendOptions`].
pub fn blend_with(base: &Raster, overlay: &Raster, options: &BlendOptions) -> OpsResult<Raster> {
    check_unit("opacity", options.opacity)?;
    let BlendOptions { mode, opacity, seed } = *options;
    trace!(
        width = base.width().min(overlay.width()),
        height = base.height().min(overlay.height()),
        %mode,
        opacity,
        "composite::blend"
    );

    if mode == BlendMode::Dissolve {
        return Ok(traverse::map_pixel_pairs_with(
            base,
            overlay,
            |y| row_rng(seed, y),
            |rng, b, s| {
                let chance = s.a as f32 / 255.0 * opacity;
                if rng.r#gen::<f32>() < chance {
                    s.with_alpha(255)
                } else {
                    b
                }
            },
        ));
    }

    let formula = mode.formula();
    Ok(traverse::map_pixel_pairs(base, overlay, |b, s| {
        blend_colors(b, s, formula, opacity)
    }))
}

/// Normal-blends a uniform `color` layer over the raster.
///
/// ```rust
/// use tessera_core::{Color, Raster};
/// use tessera_ops::composite::tint;
///
/// let src = Raster::filled(2, 2, Color::rgb(0, 0, 255));
/// let out = tint(&src, Color::rgba(255, 0, 0, 255));
/// assert_eq!(out.pixel(1, 1), Color::rgb(255, 0, 0));
/// ```
pub fn tint(src: &Raster, color: Color) -> Raster {
    trace!(width = src.width(), height = src.height(), ?color, "composite::tint");
    let formula = BlendMode::Normal.formula();
    traverse::map_pixels(src, |b| blend_colors(b, color, formula, 1.0))
}

/// Multiplies every alpha by `opacity`.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if `opacity` is outside `[0, 1]` or NaN.
pub fn fade(src: &Raster, opacity: f32) -> OpsResult<Raster> {
    check_unit("opacity", opacity)?;
    trace!(width = src.width(), height = src.height(), opacity, "composite::fade");
    Ok(traverse::map_pixels(src, |c| {
        let a = (c.a as f32 * opacity).round() as u8;
        if a == 0 { Color::TRANSPARENT } else { c.with_alpha(a) }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPAQUE: f32 = 1.0;

    fn px(r: f32, g: f32, b: f32) -> [f32; 4] {
        [r, g, b, OPAQUE]
    }

    #[test]
    fn test_burn_guard() {
        let r = blend_rgb(BlendMode::Burn, px(0.3, 1.0, 0.0), px(0.0, 0.0, 0.0));
        assert_eq!(r, [0.0, 0.0, 0.0]);
        assert!(r.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_dodge_guard() {
        let r = blend_rgb(BlendMode::Dodge, px(0.3, 0.0, 1.0), px(1.0, 1.0, 1.0));
        assert_eq!(r, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_vivid_light_guards() {
        let r = blend_rgb(BlendMode::VividLight, px(0.5, 0.5, 0.0), px(0.0, 1.0, 1.0));
        assert_eq!(r, [0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_separable_formulas() {
        let cb = px(0.25, 0.5, 0.75);
        let cs = px(0.5, 0.5, 0.5);
        let check = |mode, expected: [f32; 3]| {
            let r = blend_rgb(mode, cb, cs);
            for (a, e) in r.iter().zip(expected) {
                assert!((a - e).abs() < 1e-6, "{mode}: {r:?} != {expected:?}");
            }
        };
        check(BlendMode::Multiply, [0.125, 0.25, 0.375]);
        check(BlendMode::Screen, [0.625, 0.75, 0.875]);
        check(BlendMode::Darken, [0.25, 0.5, 0.5]);
        check(BlendMode::Lighten, [0.5, 0.5, 0.75]);
        check(BlendMode::LinearBurn, [0.0, 0.0, 0.25]);
        check(BlendMode::LinearDodge, [0.75, 1.0, 1.0]);
        check(BlendMode::Overlay, [0.25, 0.5, 0.75]);
        check(BlendMode::HardLight, [0.25, 0.5, 0.75]);
        check(BlendMode::SoftLight, [0.25, 0.5, 0.75]);
        check(BlendMode::LinearLight, [0.25, 0.5, 0.75]);
        check(BlendMode::PinLight, [0.25, 0.5, 0.75]);
        check(BlendMode::HardMix, [0.0, 1.0, 1.0]);
        check(BlendMode::Difference, [0.25, 0.0, 0.25]);
        check(BlendMode::Exclusion, [0.5, 0.5, 0.5]);
        check(BlendMode::Subtraction, [0.0, 0.0, 0.25]);
    }

    #[test]
    fn test_pin_light_clamps() {
        let r = blend_rgb(BlendMode::PinLight, px(0.9, 0.1, 0.5), px(0.2, 0.8, 0.5));
        assert!((r[0] - 0.4).abs() < 1e-6);
        assert!((r[1] - 0.6).abs() < 1e-6);
        assert!((r[2] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_darker_lighter_pick_pixels() {
        let cb = px(0.9, 0.0, 0.0);
        let cs = px(0.2, 0.2, 0.2);
        assert_eq!(blend_rgb(BlendMode::Darker, cb, cs), [0.2, 0.2, 0.2]);
        assert_eq!(blend_rgb(BlendMode::Lighter, cb, cs), [0.9, 0.0, 0.0]);
    }

    #[test]
    fn test_hsl_modes() {
        let red = px(1.0, 0.0, 0.0);
        let grey = px(0.5, 0.5, 0.5);
        let r = blend_rgb(BlendMode::Saturation, red, grey);
        assert!((r[0] - r[1]).abs() < 1e-6 && (r[1] - r[2]).abs() < 1e-6);

        let r = blend_rgb(BlendMode::Luminosity, red, px(1.0, 1.0, 1.0));
        assert_eq!(r, [1.0, 1.0, 1.0]);

        let blue = px(0.0, 0.0, 1.0);
        let r = blend_rgb(BlendMode::Hue, red, blue);
        assert!((r[2] - 1.0).abs() < 1e-6 && r[0].abs() < 1e-6);
        assert_eq!(blend_rgb(BlendMode::Color, red, blue), blend_rgb(BlendMode::Hue, red, blue));
    }

    #[test]
    fn test_composite_partial_alpha() {
        // Multiply of white over grey at half alpha
        let cb = [0.5, 0.5, 0.5, 1.0];
        let cs = [1.0, 1.0, 1.0, 0.5];
        let cr = blend_rgb(BlendMode::Multiply, cb, cs);
        let out = composite_pixel(cb, cs, cr);
        assert!((out[0] - 0.5).abs() < 1e-6);
        assert_eq!(out[3], 1.0);

        // Both half transparent
        let cb = [1.0, 0.0, 0.0, 0.5];
        let cs = [0.0, 0.0, 1.0, 0.5];
        let out = composite_pixel(cb, cs, blend_rgb(BlendMode::Normal, cb, cs));
        assert!((out[3] - 0.75).abs() < 1e-6);
        assert!((out[0] - 1.0 / 3.0).abs() < 1e-6);
        assert!((out[2] - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_composite_fully_transparent() {
        assert_eq!(composite_pixel([1.0, 1.0, 1.0, 0.0], [1.0, 0.0, 0.0, 0.0], [1.0; 3]), [0.0; 4]);
    }

    #[test]
    fn test_blend_rejects_bad_opacity() {
        let r = Raster::filled(1, 1, Color::WHITE);
        assert!(blend(&r, &r, BlendMode::Normal, 1.5).is_err());
        assert!(blend(&r, &r, BlendMode::Normal, -0.1).is_err());
        assert!(blend(&r, &r, BlendMode::Normal, f32::NAN).is_err());
    }

    #[test]
    fn test_dissolve_extremes() {
        let base = Raster::filled(8, 8, Color::rgb(0, 255, 0));
        let over = Raster::filled(8, 8, Color::rgb(255, 0, 0));
        let all = blend(&base, &over, BlendMode::Dissolve, 1.0).unwrap();
        assert!(all.pixels().iter().all(|&c| c == Color::rgb(255, 0, 0)));
        let none = blend(&base, &over, BlendMode::Dissolve, 0.0).unwrap();
        assert_eq!(none, base);
    }

    #[test]
    fn test_dissolve_seeded_is_reproducible() {
        let base = Raster::filled(16, 16, Color::BLACK);
        let over = Raster::filled(16, 16, Color::WHITE);
        let opts = BlendOptions {
            mode: BlendMode::Dissolve,
            opacity: 0.5,
            seed: Some(7),
        };
        let a = blend_with(&base, &over, &opts).unwrap();
        let b = blend_with(&base, &over, &opts).unwrap();
        assert_eq!(a, b);
        let whites = a.pixels().iter().filter(|&&c| c == Color::WHITE).count();
        assert!(whites > 64 && whites < 192, "{whites}");
    }

    #[test]
    fn test_fade_and_tint() {
        let src = Raster::filled(2, 1, Color::rgba(10, 20, 30, 200));
        let faded = fade(&src, 0.5).unwrap();
        assert_eq!(faded.pixel(0, 0), Color::rgba(10, 20, 30, 100));
        assert_eq!(fade(&src, 0.0).unwrap().pixel(1, 0), Color::TRANSPARENT);

        let tinted = tint(&src, Color::rgba(255, 255, 255, 0));
        assert_eq!(tinted, src);
    }

    #[test]
    fn test_parse_names() {
        for mode in BlendMode::ALL {
            assert_eq!(mode.name().parse::<BlendMode>().unwrap(), mode);
        }
        assert_eq!("Addition".parse::<BlendMode>().unwrap(), BlendMode::LinearDodge);
        assert_eq!("soft_light".parse::<BlendMode>().unwrap(), BlendMode::SoftLight);
        assert!("glow".parse::<BlendMode>().is_err());
    }
}
