//! Tone adjustments: brightness, contrast, gamma, greyscale and vibrance.
//!
//! Each operation comes in two forms: a raster function, and a `*_fn`
//! constructor returning the per-pixel [`PixelFn`] so several adjustments
//! can be [`compose`](tessera_core::compose)d into one traversal.
//!
//! All of them leave alpha untouched.
//!
//! # Example
//!
//! ```rust
//! use tessera_core::{compose, traverse, Color, Raster};
//! use tessera_ops::adjust::{self, GreyscaleMethod};
//! use tessera_ops::channel::multiplier;
//!
//! let src = Raster::filled(4, 4, Color::rgb(200, 100, 50));
//! let f = compose(vec![
//!     adjust::brightness_fn(multiplier(0.5)),
//!     adjust::greyscale_fn(GreyscaleMethod::Maximal),
//! ]);
//! let out = traverse::map_pixels(&src, f);
//! assert_eq!(out.pixel(0, 0), Color::rgb(100, 100, 100));
//! ```

use tessera_color::{clamp_unit, Channel, ChannelAccessor, Lab};
use tessera_core::{traverse, Color, PixelFn, Raster};
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::error::{check_positive, check_unit, OpsError, OpsResult};

/// Pixel function applying `f` to the red, green and blue ratios.
fn rgb_fn<F>(f: F) -> PixelFn
where
    F: Fn(f32) -> f32 + Send + Sync + 'static,
{
    Box::new(move |c: Color| {
        let [r, g, b, a] = c.to_ratio();
        Color::from_ratio([clamp_unit(f(r)), clamp_unit(f(g)), clamp_unit(f(b)), a])
    })
}

// ============================================================================
// Brightness and contrast
// ============================================================================

/// Pixel function applying `adjuster` to the red, green and blue ratios.
pub fn brightness_fn<A>(adjuster: A) -> PixelFn
where
    A: Fn(f32) -> f32 + Send + Sync + 'static,
{
    rgb_fn(adjuster)
}

/// Applies `adjuster` to the red, green and blue ratios of every pixel.
///
/// Use [`adder`](crate::channel::adder) for a flat shift or
/// [`multiplier`](crate::channel::multiplier) for a proportional one.
pub fn brightness<A>(src: &Raster, adjuster: A) -> Raster
where
    A: Fn(f32) -> f32 + Send + Sync + 'static,
{
    trace!(width = src.width(), height = src.height(), "adjust::brightness");
    traverse::map_pixels(src, brightness_fn(adjuster))
}

/// Pixel function scaling each channel's distance from mid-grey by `value`.
pub fn contrast_fn(value: f32) -> PixelFn {
    rgb_fn(move |v| (v - 0.5) * value + 0.5)
}

/// Linear contrast: `(v - 0.5)·value + 0.5` on red, green and blue.
///
/// A value of 1 leaves the raster unchanged; 0 flattens it to mid-grey.
pub fn contrast(src: &Raster, value: f32) -> Raster {
    trace!(width = src.width(), height = src.height(), value, "adjust::contrast");
    traverse::map_pixels(src, contrast_fn(value))
}

/// Pixel function for [`sigmoidal_contrast`].
pub fn sigmoidal_contrast_fn(factor: f32, midpoint: f32) -> OpsResult<PixelFn> {
    if !factor.is_finite() || factor < 0.0 {
        return Err(OpsError::InvalidParameter(format!(
            "contrast factor must be a non-negative number, got {factor}"
        )));
    }
    check_unit("midpoint", midpoint)?;

    let sigmoid = move |u: f32| 1.0 / (1.0 + (factor * (midpoint - u)).exp());
    let (low, high) = (sigmoid(0.0), sigmoid(1.0));
    let span = high - low;
    if factor == 0.0 || span <= 0.0 {
        return Ok(rgb_fn(|v| v));
    }
    Ok(rgb_fn(move |v| (sigmoid(v) - low) / span))
}

/// Non-linear contrast along a logistic curve.
///
/// `factor` sets how steep the curve is (0 leaves the raster unchanged) and
/// `midpoint` where the midtones land. Black and white stay fixed.
///
/// # Errors
///
/// Fails for a negative or non-finite `factor`, or a `midpoint` outside
/// `[0, 1]`.
pub fn sigmoidal_contrast(src: &Raster, factor: f32, midpoint: f32) -> OpsResult<Raster> {
    trace!(width = src.width(), height = src.height(), factor, midpoint, "adjust::sigmoidal_contrast");
    Ok(traverse::map_pixels(src, sigmoidal_contrast_fn(factor, midpoint)?))
}

/// Pixel function for [`gamma`].
pub fn gamma_fn(value: f32) -> OpsResult<PixelFn> {
    check_positive("gamma", value)?;
    let exponent = 1.0 / value;
    Ok(rgb_fn(move |v| v.powf(exponent)))
}

/// Gamma correction: `v^(1/value)` on red, green and blue.
///
/// # Errors
///
/// Fails unless `value` is finite and positive.
pub fn gamma(src: &Raster, value: f32) -> OpsResult<Raster> {
    trace!(width = src.width(), height = src.height(), value, "adjust::gamma");
    Ok(traverse::map_pixels(src, gamma_fn(value)?))
}

// ============================================================================
// Greyscale
// ============================================================================

/// How a color is reduced to a single grey level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GreyscaleMethod {
    /// Mean of red, green and blue.
    #[default]
    Average,
    /// Midpoint of the largest and smallest channel.
    Lightness,
    /// `0.21·r + 0.71·g + 0.07·b`
    Luminosity,
    /// Largest channel.
    Maximal,
    /// Smallest channel.
    Minimal,
    /// Red channel only.
    Red,
    /// Green channel only.
    Green,
    /// Blue channel only.
    Blue,
    /// `0.299·r + 0.587·g + 0.114·b`
    Photoshop,
}

impl GreyscaleMethod {
    /// All methods.
    pub const ALL: [GreyscaleMethod; 9] = [
        Self::Average,
        Self::Lightness,
        Self::Luminosity,
        Self::Maximal,
        Self::Minimal,
        Self::Red,
        Self::Green,
        Self::Blue,
        Self::Photoshop,
    ];

    /// Lower-case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Average => "average",
            Self::Lightness => "lightness",
            Self::Luminosity => "luminosity",
            Self::Maximal => "maximal",
            Self::Minimal => "minimal",
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Photoshop => "photoshop",
        }
    }

    /// Grey level of `c`.
    #[inline]
    pub fn grey(self, c: Color) -> u8 {
        let (r, g, b) = (c.r as f32, c.g as f32, c.b as f32);
        let weighted = |wr: f32, wg: f32, wb: f32| r * wr + g * wg + b * wb;
        let level = match self {
            Self::Average => (r + g + b) / 3.0,
            Self::Lightness => (r.max(g).max(b) + r.min(g).min(b)) / 2.0,
            Self::Luminosity => weighted(0.21, 0.71, 0.07),
            Self::Maximal => r.max(g).max(b),
            Self::Minimal => r.min(g).min(b),
            Self::Red => r,
            Self::Green => g,
            Self::Blue => b,
            Self::Photoshop => weighted(0.299, 0.587, 0.114),
        };
        level.round().clamp(0.0, 255.0) as u8
    }
}

impl std::str::FromStr for GreyscaleMethod {
    type Err = OpsError;

    fn from_str(s: &str) -> OpsResult<Self> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.name() == key)
            .ok_or_else(|| OpsError::InvalidParameter(format!("unknown greyscale method: {s}")))
    }
}

/// Pixel function for [`greyscale`].
pub fn greyscale_fn(method: GreyscaleMethod) -> PixelFn {
    Box::new(move |c: Color| {
        let v = method.grey(c);
        Color::rgba(v, v, v, c.a)
    })
}

/// Replaces every pixel with its grey level under `method`.
pub fn greyscale(src: &Raster, method: GreyscaleMethod) -> Raster {
    trace!(width = src.width(), height = src.height(), ?method, "adjust::greyscale");
    traverse::map_pixels(src, greyscale_fn(method))
}

// ============================================================================
// Vibrance
// ============================================================================

/// How [`vibrance`] measures and raises saturation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VibranceMethod {
    /// Works in Lab: chroma is scaled up and lightness down, both in
    /// proportion to how colorful the pixel already is.
    #[default]
    Lab,
    /// HSL saturation becomes `s^(1/amount)`.
    Exponent,
}

impl VibranceMethod {
    /// Lower-case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Lab => "lab",
            Self::Exponent => "exp",
        }
    }
}

impl std::str::FromStr for VibranceMethod {
    type Err = OpsError;

    fn from_str(s: &str) -> OpsResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lab" => Ok(Self::Lab),
            "exp" | "exponent" => Ok(Self::Exponent),
            _ => Err(OpsError::InvalidParameter(format!("unknown vibrance method: {s}"))),
        }
    }
}

/// Lab vibrance of one pixel.
fn lab_vibrance(c: Color, amount: f32) -> Color {
    let mut lab = Lab::from(c);
    let weight = lab.chroma() / 2.0;
    lab.l *= 1.0 - amount * weight * 0.25;
    lab.a *= 1.0 + amount * weight;
    lab.b *= 1.0 + amount * weight;
    lab.to_color().with_alpha(c.a)
}

/// Pixel function for [`vibrance`].
pub fn vibrance_fn(method: VibranceMethod, amount: f32) -> OpsResult<PixelFn> {
    match method {
        VibranceMethod::Lab => {
            if !amount.is_finite() {
                return Err(OpsError::InvalidParameter(format!("vibrance must be finite, got {amount}")));
            }
            Ok(Box::new(move |c: Color| lab_vibrance(c, amount)))
        }
        VibranceMethod::Exponent => {
            check_positive("vibrance", amount)?;
            let exponent = 1.0 / amount;
            let ch = Channel::Saturation;
            Ok(Box::new(move |c: Color| ch.set(c, ch.get(c).powf(exponent))))
        }
    }
}

/// Adjusts the saturation of the least saturated parts of the image.
///
/// With [`VibranceMethod::Lab`] a positive `amount` deepens color and
/// darkens it slightly, more so the more colorful the pixel; negative
/// amounts mute it. Neutral greys are unchanged. With
/// [`VibranceMethod::Exponent`] amounts above 1 raise HSL saturation and
/// amounts below 1 lower it; greys and fully saturated colors are
/// unaffected.
///
/// # Errors
///
/// Fails when `amount` is not finite, or for [`VibranceMethod::Exponent`]
/// not positive.
///
/// ```rust
/// use tessera_core::{Color, Raster};
/// use tessera_ops::adjust::{vibrance, VibranceMethod};
///
/// let grey = Raster::filled(2, 2, Color::rgb(120, 120, 120));
/// assert_eq!(vibrance(&grey, VibranceMethod::Lab, 0.5).unwrap(), grey);
/// ```
pub fn vibrance(src: &Raster, method: VibranceMethod, amount: f32) -> OpsResult<Raster> {
    trace!(width = src.width(), height = src.height(), ?method, amount, "adjust::vibrance");
    Ok(traverse::map_pixels(src, vibrance_fn(method, amount)?))
}
