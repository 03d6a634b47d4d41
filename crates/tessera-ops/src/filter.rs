//! Kernel convolution, blur and sharpening.
//!
//! Convolution runs on premultiplied `f32` values so that transparent
//! pixels do not bleed their (undefined) color into their neighbours; the
//! result is converted back to straight 8-bit at the end.
//!
//! # Kernels
//!
//! - [`Kernel::new`] - 2D kernel from an offset generator
//! - [`Kernel::horizontal`], [`Kernel::vertical`] - 1D kernels for separable passes
//! - [`Kernel::normalized`] - Scale weights to sum to 1
//!
//! # Edge Policies
//!
//! - [`EdgePolicy::Clamp`] - Out-of-bounds weight goes to the center pixel
//! - [`EdgePolicy::Ignore`] - Out-of-bounds samples are dropped
//! - [`EdgePolicy::Wrap`] - Toroidal addressing
//!
//! # Example
//!
//! ```rust
//! use tessera_core::{Color, Raster};
//! use tessera_ops::filter::{blur, BlurKind, EdgePolicy};
//!
//! let src = Raster::from_fn(16, 16, |x, _| if x < 8 { Color::BLACK } else { Color::WHITE });
//! let soft = blur(&src, BlurKind::Gaussian, 2, None, EdgePolicy::Clamp).unwrap();
//! assert_eq!(soft.pixel(0, 0), Color::BLACK);
//! assert!(soft.pixel(7, 0).r > 0 && soft.pixel(8, 0).r < 255);
//! ```

use std::f32::consts::PI;
use std::str::FromStr;

use tessera_core::{traverse, Color, Dimension, Raster};
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::error::check_positive;
use crate::{OpsError, OpsResult};

/// Convolution kernel for image filtering.
///
/// Width and height are always odd, so there is a unique center cell.
/// A kernel is never modified after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    data: Vec<f32>,
    width: usize,
    height: usize,
}

impl Kernel {
    /// Builds a `height x width` kernel by evaluating `f(dx, dy)` at each
    /// cell's offset from the center.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidKernel`] if either size is zero or even.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tessera_ops::filter::Kernel;
    ///
    /// let k = Kernel::new(3, 5, |dx, dy| (dx.abs() + dy.abs()) as f32).unwrap();
    /// assert_eq!(k.mid(), (2, 1));
    /// assert_eq!(k.get(0, 0), 3.0);
    /// assert!(Kernel::new(4, 3, |_, _| 1.0).is_err());
    /// ```
    pub fn new(height: usize, width: usize, f: impl Fn(i32, i32) -> f32) -> OpsResult<Self> {
        if width == 0 || height == 0 || width % 2 == 0 || height % 2 == 0 {
            return Err(OpsError::InvalidKernel(format!(
                "kernel dimensions must be odd and positive, got {height}x{width}"
            )));
        }
        let (mx, my) = (width as i32 / 2, height as i32 / 2);
        let data = (0..height as i32)
            .flat_map(|y| (0..width as i32).map(move |x| (x - mx, y - my)))
            .map(|(dx, dy)| f(dx, dy))
            .collect();
        Ok(Self { data, width, height })
    }

    /// Creates a kernel from row-major weights.
    pub fn from_data(data: Vec<f32>, width: usize, height: usize) -> OpsResult<Self> {
        let kernel = Self::new(height, width, |_, _| 0.0)?;
        if data.len() != kernel.data.len() {
            return Err(OpsError::InvalidKernel(format!(
                "kernel data size {} doesn't match {}x{}",
                data.len(),
                height,
                width
            )));
        }
        Ok(Self { data, ..kernel })
    }

    /// A single-row kernel, `f(dx)` at each horizontal offset.
    pub fn horizontal(width: usize, f: impl Fn(i32) -> f32) -> OpsResult<Self> {
        Self::new(1, width, |dx, _| f(dx))
    }

    /// A single-column kernel, `f(dy)` at each vertical offset.
    pub fn vertical(height: usize, f: impl Fn(i32) -> f32) -> OpsResult<Self> {
        Self::new(height, 1, |_, dy| f(dy))
    }

    /// Returns a copy whose weights sum to 1.
    ///
    /// A kernel whose weights sum to zero is returned unchanged.
    pub fn normalized(&self) -> Self {
        let sum = self.sum();
        if sum.abs() <= f32::EPSILON {
            return self.clone();
        }
        Self {
            data: self.data.iter().map(|w| w / sum).collect(),
            ..*self
        }
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    /// Weight at column `x`, row `y`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    /// Center cell, `(x, y)`.
    #[inline]
    pub fn mid(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }

    /// Kernel width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Kernel height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major weights.
    pub fn data(&self) -> &[f32] {
        &self.data
    }
}

/// How convolution samples pixels outside the raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EdgePolicy {
    /// Out-of-bounds weight is added to the center pixel's contribution.
    #[default]
    Clamp,
    /// Out-of-bounds samples are skipped; borders lose weight.
    Ignore,
    /// Coordinates wrap to the opposite edge.
    Wrap,
}

impl FromStr for EdgePolicy {
    type Err = OpsError;

    fn from_str(s: &str) -> OpsResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clamp" | "extend" => Ok(Self::Clamp),
            "ignore" => Ok(Self::Ignore),
            "wrap" => Ok(Self::Wrap),
            _ => Err(OpsError::InvalidParameter(format!("unknown edge policy: {s}"))),
        }
    }
}

/// Weight function for separable blurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlurKind {
    /// Equal weights.
    Box,
    /// `exp(−d²/2σ²)` weights.
    #[default]
    Gaussian,
}

// ============================================================================
// Premultiplied planes
// ============================================================================

/// A raster in premultiplied `f32` RGBA.
struct Plane {
    data: Vec<[f32; 4]>,
    width: usize,
    height: usize,
}

impl Plane {
    fn from_raster(src: &Raster) -> Self {
        let data = src
            .pixels()
            .iter()
            .map(|c| {
                let [r, g, b, a] = c.to_ratio();
                [r * a, g * a, b * a, a]
            })
            .collect();
        Self {
            data,
            width: src.width() as usize,
            height: src.height() as usize,
        }
    }

    fn into_raster(self) -> Raster {
        let (w, h) = (self.width as u32, self.height as u32);
        traverse::generate(w, h, |x, y| {
            let [r, g, b, a] = self.data[y as usize * self.width + x as usize];
            if a <= 0.0 {
                return Color::TRANSPARENT;
            }
            Color::from_ratio([r / a, g / a, b / a, a])
        })
    }

    #[inline]
    fn at(&self, x: usize, y: usize) -> [f32; 4] {
        self.data[y * self.width + x]
    }

    fn convolve(&self, kernel: &Kernel, edge: EdgePolicy) -> Plane {
        let (w, h) = (self.width as i64, self.height as i64);
        let (mx, my) = kernel.mid();
        let (mx, my) = (mx as i64, my as i64);
        let mut out = vec![[0.0f32; 4]; self.data.len()];

        traverse::fill_rows(&mut out, self.width, |y, row| {
            let y = y as i64;
            for (x, px) in row.iter_mut().enumerate() {
                let x = x as i64;
                let mut acc = [0.0f32; 4];
                let mut lost = 0.0f32;
                for ky in 0..kernel.height {
                    for kx in 0..kernel.width {
                        let weight = kernel.get(kx, ky);
                        let sx = x + kx as i64 - mx;
                        let sy = y + ky as i64 - my;
                        let inside = sx >= 0 && sx < w && sy >= 0 && sy < h;
                        let (sx, sy) = if inside {
                            (sx, sy)
                        } else {
                            match edge {
                                EdgePolicy::Clamp => {
                                    lost += weight;
                                    continue;
                                }
                                EdgePolicy::Ignore => continue,
                                EdgePolicy::Wrap => (sx.rem_euclid(w), sy.rem_euclid(h)),
                            }
                        };
                        let p = self.at(sx as usize, sy as usize);
                        for c in 0..4 {
                            acc[c] += weight * p[c];
                        }
                    }
                }
                if lost != 0.0 {
                    let p = self.at(x as usize, y as usize);
                    for c in 0..4 {
                        acc[c] += lost * p[c];
                    }
                }
                *px = acc;
            }
        });

        Plane {
            data: out,
            width: self.width,
            height: self.height,
        }
    }
}

// ============================================================================
// Convolution
// ============================================================================

/// Convolves the raster with a kernel.
///
/// # Example
///
/// ```rust
/// use tessera_core::{Color, Raster};
/// use tessera_ops::filter::{convolve, EdgePolicy, Kernel};
///
/// let src = Raster::filled(4, 4, Color::rgb(90, 90, 90));
/// let k = Kernel::new(3, 3, |_, _| 1.0).unwrap().normalized();
/// let out = convolve(&src, &k, EdgePolicy::Clamp);
/// assert_eq!(out, src);
/// ```
pub fn convolve(src: &Raster, kernel: &Kernel, edge: EdgePolicy) -> Raster {
    trace!(
        width = src.width(),
        height = src.height(),
        kw = kernel.width,
        kh = kernel.height,
        ?edge,
        "filter::convolve"
    );
    Plane::from_raster(src).convolve(kernel, edge).into_raster()
}

/// Convolves with `first`, then with `second`, without rounding in between.
pub fn convolve2(src: &Raster, first: &Kernel, second: &Kernel, edge: EdgePolicy) -> Raster {
    trace!(width = src.width(), height = src.height(), ?edge, "filter::convolve2");
    Plane::from_raster(src)
        .convolve(first, edge)
        .convolve(second, edge)
        .into_raster()
}

/// Default Gaussian sigma for a blur radius.
#[inline]
pub fn default_sigma(radius: u32) -> f32 {
    (radius as f32 / 2.0).max(0.5)
}

/// Side of the square window around a `radius`, `2·radius + 1`.
fn window(radius: u32) -> OpsResult<u32> {
    radius
        .checked_mul(2)
        .and_then(|d| d.checked_add(1))
        .ok_or_else(|| OpsError::InvalidParameter(format!("radius {radius} is too large")))
}

fn checked_size(size: Dimension) -> OpsResult<(usize, usize)> {
    let (h, w) = (size.height as usize, size.width as usize);
    if h % 2 == 0 || w % 2 == 0 {
        return Err(OpsError::InvalidKernel(format!(
            "blur size must be odd, got {size}"
        )));
    }
    Ok((h, w))
}

/// Box blur with an odd `height x width` window.
///
/// # Errors
///
/// [`OpsError::InvalidKernel`] if either size is even.
pub fn box_blur(src: &Raster, size: Dimension, edge: EdgePolicy) -> OpsResult<Raster> {
    let (h, w) = checked_size(size)?;
    let horizontal = Kernel::horizontal(w, |_| 1.0)?.normalized();
    let vertical = Kernel::vertical(h, |_| 1.0)?.normalized();
    debug!(%size, "filter::box_blur");
    Ok(convolve2(src, &horizontal, &vertical, edge))
}

/// Gaussian blur with an odd `height x width` window.
///
/// # Errors
///
/// [`OpsError::InvalidKernel`] if either size is even,
/// [`OpsError::InvalidParameter`] if `sigma` is not positive.
pub fn gaussian(src: &Raster, size: Dimension, sigma: f32, edge: EdgePolicy) -> OpsResult<Raster> {
    check_positive("sigma", sigma)?;
    let (h, w) = checked_size(size)?;
    let weight = |d: i32| (-((d * d) as f32) / (2.0 * sigma * sigma)).exp();
    let horizontal = Kernel::horizontal(w, weight)?.normalized();
    let vertical = Kernel::vertical(h, weight)?.normalized();
    debug!(%size, sigma, "filter::gaussian");
    Ok(convolve2(src, &horizontal, &vertical, edge))
}

/// Separable blur with a `(2·radius + 1)` square window.
///
/// `sigma` only applies to [`BlurKind::Gaussian`] and defaults to
/// [`default_sigma`].
pub fn blur(
    src: &Raster,
    kind: BlurKind,
    radius: u32,
    sigma: Option<f32>,
    edge: EdgePolicy,
) -> OpsResult<Raster> {
    trace!(width = src.width(), height = src.height(), ?kind, radius, ?sigma, "filter::blur");
    let size = Dimension::square(window(radius)?)?;
    match kind {
        BlurKind::Box => box_blur(src, size, edge),
        BlurKind::Gaussian => gaussian(src, size, sigma.unwrap_or_else(|| default_sigma(radius)), edge),
    }
}

/// Builds the sharpening kernel: a negated 2D Gaussian with twice its
/// magnitude added back at the center, normalized to sum to 1.
pub fn sharpen_kernel(radius: u32, sigma: f32) -> OpsResult<Kernel> {
    check_positive("sigma", sigma)?;
    let size = window(radius)? as usize;
    let s2 = 2.0 * sigma * sigma;
    let base = Kernel::new(size, size, |dx, dy| {
        -(-((dx * dx + dy * dy) as f32) / s2).exp() / (PI * s2)
    })?;

    let boost = -2.0 * base.sum();
    let (mx, my) = base.mid();
    let center = my * size + mx;
    let mut data = base.data;
    data[center] += boost;
    Ok(Kernel::from_data(data, size, size)?.normalized())
}

/// Sharpens with a non-separable Gaussian-based kernel, clamping at edges.
pub fn sharpen(src: &Raster, radius: u32, sigma: f32) -> OpsResult<Raster> {
    let kernel = sharpen_kernel(radius, sigma)?;
    trace!(width = src.width(), height = src.height(), radius, sigma, "filter::sharpen");
    Ok(convolve(src, &kernel, EdgePolicy::Clamp))
}

/// Unsharp mask.
///
/// Each color channel that differs from its Gaussian-blurred value by at
/// least `threshold` is pushed away from it by `amount` times the
/// difference. Alpha is unchanged. `threshold` is a ratio in `[0, 1]`.
pub fn unsharp_mask(
    src: &Raster,
    radius: u32,
    sigma: f32,
    amount: f32,
    threshold: f32,
) -> OpsResult<Raster> {
    if !amount.is_finite() || !threshold.is_finite() || threshold < 0.0 {
        return Err(OpsError::InvalidParameter(format!(
            "unsharp mask needs finite amount and non-negative threshold, got {amount}, {threshold}"
        )));
    }
    let blurred = blur(src, BlurKind::Gaussian, radius, Some(sigma), EdgePolicy::Clamp)?;
    trace!(radius, sigma, amount, threshold, "filter::unsharp_mask");

    Ok(traverse::map_pixel_pairs(src, &blurred, |orig, soft| {
        let o = orig.to_ratio();
        let b = soft.to_ratio();
        let push = |c: usize| {
            let diff = o[c] - b[c];
            if diff.abs() >= threshold { o[c] + amount * diff } else { o[c] }
        };
        Color::from_ratio([push(0), push(1), push(2), o[3]])
    }))
}
