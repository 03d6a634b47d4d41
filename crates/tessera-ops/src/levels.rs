//! Level and curve remapping.
//!
//! Every function here works on one channel through a [`ChannelAccessor`],
//! so the same remap stretches red, alpha or lightness.
//!
//! - [`set_black`] / [`set_white`] move one end of the range, keeping the
//!   other at 0 or 1
//! - [`auto`], [`auto_black`] and [`auto_white`] measure the channel's
//!   extremes over the raster first and stretch them to the full range
//! - [`set_curve`] maps values through a piecewise linear [`Curve`]
//!
//! # Example
//!
//! ```rust
//! use tessera_color::Channel;
//! use tessera_core::{Color, Raster};
//! use tessera_ops::levels::{self, Curve, Levels};
//!
//! let src = Raster::from_fn(4, 1, |x, _| Color::rgb(50 + x as u8 * 50, 0, 0));
//! let out = levels::set_levels(&src, Channel::Red, &Levels::Auto)?;
//! assert_eq!(out.pixel(0, 0).r, 0);
//! assert_eq!(out.pixel(3, 0).r, 255);
//!
//! let curve = Curve::parse("0,0 50,80 100,100")?;
//! assert!((curve.value(0.25) - 0.4).abs() < 1e-6);
//! # Ok::<(), tessera_ops::OpsError>(())
//! ```

use std::fmt;

use tessera_color::ChannelAccessor;
use tessera_core::{traverse, Color, PixelFn, Raster};
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::error::{check_unit, OpsError, OpsResult};

/// Maps `[low, high]` onto `[0, 1]`.
///
/// A degenerate range (`high == low`) leaves `value` unchanged.
#[inline]
pub fn linear_scale(value: f32, low: f32, high: f32) -> f32 {
    let span = high - low;
    if span == 0.0 {
        return value;
    }
    (value - low) / span
}

// ============================================================================
// Curve
// ============================================================================

/// A remapping curve through `(input%, output%)` control points.
///
/// Values between two points are interpolated linearly; values before the
/// first or after the last point take that point's output.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    points: Vec<(f32, f32)>,
}

impl Curve {
    /// Builds a curve from control points given in percent.
    ///
    /// Points are sorted by input. At least one point is required and every
    /// coordinate must be finite.
    pub fn new(mut points: Vec<(f32, f32)>) -> OpsResult<Self> {
        if points.is_empty() {
            return Err(OpsError::InvalidParameter("curve needs at least one point".into()));
        }
        if let Some(&(x, y)) = points.iter().find(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return Err(OpsError::InvalidParameter(format!("curve point {x},{y} is not finite")));
        }
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(Self { points })
    }

    /// The straight line from `0,0` to `100,100`.
    pub fn identity() -> Self {
        Self { points: vec![(0.0, 0.0), (100.0, 100.0)] }
    }

    /// Parses `"x,y"` pairs separated by whitespace or `:`.
    ///
    /// ```rust
    /// use tessera_ops::Curve;
    ///
    /// let a = Curve::parse("0,0:33,40:66,60:100,100").unwrap();
    /// let b = Curve::parse("0,0 33,40 66,60 100,100").unwrap();
    /// assert_eq!(a, b);
    /// assert!(Curve::parse("0,0 50").is_err());
    /// ```
    pub fn parse(s: &str) -> OpsResult<Self> {
        let bad = |pair: &str| OpsError::InvalidParameter(format!("malformed curve point: {pair:?}"));
        let points = s
            .split(|c: char| c == ':' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .map(|pair| {
                let (x, y) = pair.split_once(',').ok_or_else(|| bad(pair))?;
                let x = x.trim().parse::<f32>().map_err(|_| bad(pair))?;
                let y = y.trim().parse::<f32>().map_err(|_| bad(pair))?;
                Ok((x, y))
            })
            .collect::<OpsResult<Vec<_>>>()?;
        Self::new(points)
    }

    /// Control points in percent, sorted by input.
    pub fn points(&self) -> &[(f32, f32)] {
        &self.points
    }

    /// Output ratio for the input ratio `x`.
    ///
    /// NaN maps to the first point's output.
    pub fn value(&self, x: f32) -> f32 {
        let px = x * 100.0;
        let (first, last) = (self.points[0], self.points[self.points.len() - 1]);
        if px.is_nan() || px <= first.0 {
            return first.1 / 100.0;
        }
        if px >= last.0 {
            return last.1 / 100.0;
        }
        let i = self.points.partition_point(|p| p.0 <= px);
        let ((x0, y0), (x1, y1)) = (self.points[i - 1], self.points[i]);
        let t = linear_scale(px, x0, x1);
        (y0 + t * (y1 - y0)) / 100.0
    }
}

impl Default for Curve {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (x, y)) in self.points.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{x},{y}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Curve {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ============================================================================
// Pixel functions
// ============================================================================

/// Pixel function remapping `[black, 1]` onto `[0, 1]`.
pub fn set_black_fn<C>(channel: C, black: f32) -> OpsResult<PixelFn>
where
    C: ChannelAccessor + 'static,
{
    check_unit("black point", black)?;
    Ok(remap_fn(channel, move |v| linear_scale(v, black, 1.0)))
}

/// Pixel function remapping `[0, white]` onto `[0, 1]`.
pub fn set_white_fn<C>(channel: C, white: f32) -> OpsResult<PixelFn>
where
    C: ChannelAccessor + 'static,
{
    check_unit("white point", white)?;
    Ok(remap_fn(channel, move |v| linear_scale(v, 0.0, white)))
}

/// Pixel function remapping `[black, white]` onto `[0, 1]`.
pub fn set_range_fn<C>(channel: C, black: f32, white: f32) -> OpsResult<PixelFn>
where
    C: ChannelAccessor + 'static,
{
    check_unit("black point", black)?;
    check_unit("white point", white)?;
    if black > white {
        return Err(OpsError::InvalidParameter(format!(
            "black point {black} is above white point {white}"
        )));
    }
    Ok(remap_fn(channel, move |v| linear_scale(v, black, white)))
}

/// Pixel function mapping the channel through `curve`.
pub fn set_curve_fn<C>(channel: C, curve: Curve) -> PixelFn
where
    C: ChannelAccessor + 'static,
{
    remap_fn(channel, move |v| curve.value(v))
}

fn remap_fn<C, F>(channel: C, f: F) -> PixelFn
where
    C: ChannelAccessor + 'static,
    F: Fn(f32) -> f32 + Send + Sync + 'static,
{
    Box::new(move |c: Color| channel.set(c, f(channel.get(c))))
}

// ============================================================================
// Raster operations
// ============================================================================

/// Remaps the channel so `black` becomes 0.
pub fn set_black<C>(src: &Raster, channel: C, black: f32) -> OpsResult<Raster>
where
    C: ChannelAccessor + 'static,
{
    trace!(width = src.width(), height = src.height(), black, "levels::set_black");
    Ok(traverse::map_pixels(src, set_black_fn(channel, black)?))
}

/// Remaps the channel so `white` becomes 1.
pub fn set_white<C>(src: &Raster, channel: C, white: f32) -> OpsResult<Raster>
where
    C: ChannelAccessor + 'static,
{
    trace!(width = src.width(), height = src.height(), white, "levels::set_white");
    Ok(traverse::map_pixels(src, set_white_fn(channel, white)?))
}

/// Maps the channel through `curve`.
pub fn set_curve<C>(src: &Raster, channel: C, curve: &Curve) -> Raster
where
    C: ChannelAccessor + 'static,
{
    trace!(width = src.width(), height = src.height(), %curve, "levels::set_curve");
    traverse::map_pixels(src, set_curve_fn(channel, curve.clone()))
}

/// Smallest and largest channel values over the raster.
///
/// Returns `None` for an empty raster.
pub fn channel_range<C: ChannelAccessor>(src: &Raster, channel: &C) -> Option<(f32, f32)> {
    if src.is_empty() {
        return None;
    }
    let range = traverse::fold_pixels(
        src,
        || (1.0f32, 0.0f32),
        |(lo, hi), c| {
            let v = channel.get(c);
            (lo.min(v), hi.max(v))
        },
        |(a_lo, a_hi), (b_lo, b_hi)| (a_lo.min(b_lo), a_hi.max(b_hi)),
    );
    Some(range)
}

/// Stretches the channel so its darkest value becomes 0 and its lightest 1.
pub fn auto<C>(src: &Raster, channel: C) -> Raster
where
    C: ChannelAccessor + 'static,
{
    trace!(width = src.width(), height = src.height(), "levels::auto");
    let Some((darkest, lightest)) = channel_range(src, &channel) else {
        return src.clone();
    };
    debug!(darkest, lightest, "levels::auto range");
    traverse::map_pixels(src, remap_fn(channel, move |v| linear_scale(v, darkest, lightest)))
}

/// Stretches the channel so its darkest value becomes 0.
pub fn auto_black<C>(src: &Raster, channel: C) -> Raster
where
    C: ChannelAccessor + 'static,
{
    trace!(width = src.width(), height = src.height(), "levels::auto_black");
    let Some((darkest, _)) = channel_range(src, &channel) else {
        return src.clone();
    };
    traverse::map_pixels(src, remap_fn(channel, move |v| linear_scale(v, darkest, 1.0)))
}

/// Stretches the channel so its lightest value becomes 1.
pub fn auto_white<C>(src: &Raster, channel: C) -> Raster
where
    C: ChannelAccessor + 'static,
{
    trace!(width = src.width(), height = src.height(), "levels::auto_white");
    let Some((_, lightest)) = channel_range(src, &channel) else {
        return src.clone();
    };
    traverse::map_pixels(src, remap_fn(channel, move |v| linear_scale(v, 0.0, lightest)))
}

/// A levels adjustment, as chosen on a command line.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Levels {
    /// Stretch both ends to the measured range.
    #[default]
    Auto,
    /// Stretch the measured darkest value to 0.
    AutoBlack,
    /// Stretch the measured lightest value to 1.
    AutoWhite,
    /// Fixed black point.
    Black(f32),
    /// Fixed white point.
    White(f32),
    /// Fixed black and white points.
    Range {
        /// Input mapped to 0.
        black: f32,
        /// Input mapped to 1.
        white: f32,
    },
    /// Curve remap.
    Curve(Curve),
}

/// Applies `levels` to one channel of `src`.
///
/// # Errors
///
/// Fails when a fixed point lies outside `[0, 1]` or a range is inverted.
pub fn set_levels<C>(src: &Raster, channel: C, levels: &Levels) -> OpsResult<Raster>
where
    C: ChannelAccessor + 'static,
{
    match levels {
        Levels::Auto => Ok(auto(src, channel)),
        Levels::AutoBlack => Ok(auto_black(src, channel)),
        Levels::AutoWhite => Ok(auto_white(src, channel)),
        Levels::Black(black) => set_black(src, channel, *black),
        Levels::White(white) => set_white(src, channel, *white),
        Levels::Range { black, white } => {
            trace!(width = src.width(), height = src.height(), black, white, "levels::set_range");
            Ok(traverse::map_pixels(src, set_range_fn(channel, *black, *white)?))
        }
        Levels::Curve(curve) => Ok(set_curve(src, channel, curve)),
    }
}
