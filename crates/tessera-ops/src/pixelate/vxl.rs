//! Isometric-cube pixelation.
//!
//! The raster is covered by pointy-top hexagons `h` tall and `⌊h·√3/2⌋`
//! wide, laid out in two interleaved lattices: base hexagons on rows `1.5h`
//! apart, and an offset lattice shifted by half a hexagon on both axes that
//! fills the gaps between them. Each hexagon is averaged once, then painted
//! as a cube: its three rhombic facets (top, right, left) take that average
//! with the HSL lightness scaled by a per-facet ratio.

use tessera_color::{Accumulator, Channel, ChannelAccessor};
use tessera_core::{traverse, Color, Dimension, Raster, TileStyle};
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::error::{OpsError, OpsResult};

/// Gradient of the facet edges, `tan 30°`.
const K: f32 = 0.577_350_26;

/// Parameters for [`vxl`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VxlOptions {
    /// Height of one cube in pixels. The width follows as `⌊height·√3/2⌋`.
    pub height: u32,
    /// Swaps the top facet to the bottom, inverting the apparent light.
    pub flip: bool,
    /// Lightness ratio of the top facet.
    pub top: f32,
    /// Lightness ratio of the left facet.
    pub left: f32,
    /// Lightness ratio of the right facet.
    pub right: f32,
    /// Whether partial cubes at the edges are kept.
    pub style: TileStyle,
}

impl Default for VxlOptions {
    fn default() -> Self {
        Self {
            height: 20,
            flip: false,
            top: 1.0,
            left: 0.5,
            right: 2.0,
            style: TileStyle::Cropped,
        }
    }
}

impl VxlOptions {
    /// Default options with cube `height`.
    pub fn with_height(height: u32) -> Self {
        Self { height, ..Self::default() }
    }

    fn validate(&self) -> OpsResult<()> {
        for (name, ratio) in [("top", self.top), ("left", self.left), ("right", self.right)] {
            if !ratio.is_finite() || ratio < 0.0 {
                return Err(OpsError::InvalidParameter(format!(
                    "{name} ratio must be a non-negative number, got {ratio}"
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Geometry
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Facet {
    Top = 0,
    Right = 1,
    Left = 2,
}

/// Facet containing `(u, v)`, measured y-up from a hexagon centre.
///
/// `reach` is half the hexagon height. Points outside the hexagon yield
/// `None`.
fn facet(u: f32, v: f32, reach: f32) -> Option<Facet> {
    if v <= -K * u + reach && v >= K * u && v >= -K * u && v <= K * u + reach {
        Some(Facet::Top)
    } else if u >= 0.0 && v <= K * u && v >= K * u - reach {
        Some(Facet::Right)
    } else if u <= 0.0 && v <= -K * u && v >= -K * u - reach {
        Some(Facet::Left)
    } else {
        None
    }
}

/// Per-hexagon colors of one lattice.
#[derive(Debug)]
struct HexLattice {
    /// Lattice origin offset `(x, y)`.
    shift: (i64, i64),
    cols: i64,
    rows: i64,
    cubes: Vec<Option<[Color; 3]>>,
}

/// Lowest lattice index kept; hexagons further out hold no samples.
const FIRST: i64 = -2;

#[derive(Debug, Clone, Copy)]
struct Layout {
    width: i64,
    height: i64,
    pitch: i64,
}

impl Layout {
    /// Top-left corner of hexagon `(c, r)` in a lattice shifted by `shift`.
    #[inline]
    fn origin(&self, shift: (i64, i64), c: i64, r: i64) -> (i64, i64) {
        (c * self.width + shift.0, r * self.pitch + shift.1)
    }

    #[inline]
    fn centre(&self, shift: (i64, i64), c: i64, r: i64) -> (f32, f32) {
        let (ox, oy) = self.origin(shift, c, r);
        (ox as f32 + self.width as f32 / 2.0, oy as f32 + self.height as f32 / 2.0)
    }
}

impl HexLattice {
    fn measure(src: &Raster, layout: Layout, opts: &VxlOptions, shift: (i64, i64), cols: i64, rows: i64) -> Self {
        let mut cubes = vec![None; (cols * rows) as usize];
        let reach = layout.height as f32 / 2.0;

        traverse::fill_rows(&mut cubes, cols as usize, |row, slots| {
            let r = row as i64 + FIRST;
            for (i, slot) in slots.iter_mut().enumerate() {
                let c = i as i64 + FIRST;
                let (ox, oy) = layout.origin(shift, c, r);
                let (cx, cy) = layout.centre(shift, c, r);
                let x0 = ox.max(0);
                let x1 = (ox + layout.width).min(src.width() as i64);
                let y0 = oy.max(0);
                let y1 = (oy + layout.height).min(src.height() as i64);

                let (mut inside, mut bbox) = (Accumulator::new(), Accumulator::new());
                for y in y0..y1 {
                    let v = cy - (y as f32 + 0.5);
                    for x in x0..x1 {
                        let color = src.pixel(x as u32, y as u32);
                        bbox.add(color);
                        if facet(x as f32 + 0.5 - cx, v, reach).is_some() {
                            inside.add(color);
                        }
                    }
                }
                // Rasters smaller than a cube can miss every facet.
                *slot = inside.mean().or_else(|| bbox.mean()).map(|avg| {
                    [shade(avg, opts.top), shade(avg, opts.right), shade(avg, opts.left)]
                });
            }
        });

        Self { shift, cols, rows, cubes }
    }

    #[inline]
    fn get(&self, c: i64, r: i64) -> Option<&[Color; 3]> {
        let (i, j) = (c - FIRST, r - FIRST);
        if i < 0 || j < 0 || i >= self.cols || j >= self.rows {
            return None;
        }
        self.cubes[(j * self.cols + i) as usize].as_ref()
    }
}

/// Scales the HSL lightness of `c` by `ratio`.
#[inline]
fn shade(c: Color, ratio: f32) -> Color {
    if ratio == 1.0 {
        return c;
    }
    let l = Channel::Lightness.get(c);
    Channel::Lightness.set(c, l * ratio)
}

// ============================================================================
// Public API
// ============================================================================

/// Pixelates `src` into shaded isometric cubes.
///
/// Every output pixel belongs to the hexagon with the nearest centre (among
/// hexagons that contain at least one in-bounds pixel) and takes the color
/// of the facet it falls in. Samples outside the raster are skipped; the
/// lattice never wraps. A hexagon whose facets hold no in-bounds pixel
/// takes the average of the in-bounds part of its bounding box.
///
/// # Errors
///
/// Fails when `opts.height` is too small for a cube at least one pixel
/// wide, or a ratio is negative or not finite.
///
/// # Example
///
/// ```rust
/// use tessera_core::{Color, Raster};
/// use tessera_ops::pixelate::{vxl, VxlOptions};
///
/// let grey = Color::rgb(128, 128, 128);
/// let src = Raster::filled(30, 30, grey);
/// let opts = VxlOptions { top: 1.0, left: 1.0, right: 1.0, ..VxlOptions::with_height(10) };
/// let out = vxl(&src, &opts).unwrap();
/// assert_eq!(out.dimensions(), (24, 30));
/// assert!(out.pixels().iter().all(|&c| c == grey));
/// ```
pub fn vxl(src: &Raster, opts: &VxlOptions) -> OpsResult<Raster> {
    trace!(width = src.width(), height = src.height(), ?opts, "pixelate::vxl");
    opts.validate()?;
    let width = (opts.height as f32 * 3f32.sqrt() / 2.0).floor() as u32;
    let tile = Dimension::new(opts.height, width)?;
    let (out_w, out_h) = opts.style.output_size(src.width(), src.height(), tile);

    let layout = Layout {
        width: width as i64,
        height: opts.height as i64,
        pitch: opts.height as i64 + opts.height as i64 / 2,
    };
    let cols = out_w.div_ceil(width) as i64 + 4;
    let rows = (out_h as i64 + layout.pitch - 1) / layout.pitch + 4;
    let lattices = [
        HexLattice::measure(src, layout, opts, (0, 0), cols, rows),
        HexLattice::measure(src, layout, opts, (layout.width / 2, layout.pitch / 2), cols, rows),
    ];
    debug!(cube_width = width, cols, rows, "pixelate::vxl measured");

    let reach = opts.height as f32 / 2.0;
    let flip = if opts.flip { -1.0 } else { 1.0 };

    Ok(traverse::generate(out_w, out_h, |x, y| {
        let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);

        let mut best: Option<(f32, f32, f32, &[Color; 3])> = None;
        for lattice in &lattices {
            let c0 = (x as i64 - lattice.shift.0).div_euclid(layout.width);
            let r0 = (y as i64 - lattice.shift.1).div_euclid(layout.pitch);
            for r in r0 - 1..=r0 + 1 {
                for c in c0 - 1..=c0 + 1 {
                    let Some(cube) = lattice.get(c, r) else { continue };
                    let (cx, cy) = layout.centre(lattice.shift, c, r);
                    let (u, v) = (px - cx, cy - py);
                    let d = u * u + v * v;
                    if best.is_none_or(|(bd, ..)| d < bd) {
                        best = Some((d, u, v, cube));
                    }
                }
            }
        }

        let Some((_, u, v, cube)) = best else {
            return Color::BLACK;
        };
        let v = v * flip;
        let f = facet(u, v, reach).unwrap_or(if v >= 0.0 {
            Facet::Top
        } else if u >= 0.0 {
            Facet::Right
        } else {
            Facet::Left
        });
        cube[f as usize]
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facets() {
        let reach = 5.0;
        assert_eq!(facet(0.0, 3.0, reach), Some(Facet::Top));
        assert_eq!(facet(2.0, -2.0, reach), Some(Facet::Right));
        assert_eq!(facet(-2.0, -2.0, reach), Some(Facet::Left));
        assert_eq!(facet(0.0, -6.0, reach), None);
    }

    #[test]
    fn test_default_options() {
        let opts = VxlOptions::default();
        assert_eq!((opts.top, opts.left, opts.right), (1.0, 0.5, 2.0));
        assert!(!opts.flip);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let src = Raster::filled(10, 10, Color::WHITE);
        assert!(vxl(&src, &VxlOptions::with_height(1)).is_err());
        assert!(vxl(&src, &VxlOptions::with_height(0)).is_err());
        let opts = VxlOptions { left: f32::NAN, ..VxlOptions::with_height(6) };
        assert!(vxl(&src, &opts).is_err());
    }

    #[test]
    fn test_uniform_with_unit_ratios() {
        let c = Color::rgba(30, 160, 90, 200);
        let src = Raster::filled(31, 27, c);
        let opts = VxlOptions {
            top: 1.0,
            left: 1.0,
            right: 1.0,
            style: TileStyle::Fitted,
            ..VxlOptions::with_height(8)
        };
        let out = vxl(&src, &opts).unwrap();
        assert_eq!(out.dimensions(), (31, 27));
        assert!(out.pixels().iter().all(|&p| p == c));
    }

    #[test]
    fn test_tiny_rasters_keep_their_color() {
        let c = Color::rgba(10, 200, 90, 255);
        for height in 2..=24 {
            for (w, h) in [(1, 1), (2, 1), (1, 2), (3, 2)] {
                for style in [TileStyle::Fitted, TileStyle::Cropped] {
                    let src = Raster::filled(w, h, c);
                    let opts = VxlOptions { top: 1.0, left: 1.0, right: 1.0, style, ..VxlOptions::with_height(height) };
                    let out = vxl(&src, &opts).unwrap();
                    assert!(out.pixels().iter().all(|&p| p == c), "h={height} {w}x{h} {style:?}");
                }
            }
        }
    }

    #[test]
    fn test_facets_are_shaded() {
        let grey = Color::rgb(100, 100, 100);
        let src = Raster::filled(40, 40, grey);
        let out = vxl(&src, &VxlOptions::with_height(20)).unwrap();
        // Hexagon (0, 0) of the base lattice is centred at (8.5, 10).
        let top = out.pixel(8, 4);
        let right = out.pixel(12, 13);
        let left = out.pixel(4, 13);
        assert_eq!(top, grey);
        assert!(right.r > grey.r);
        assert!(left.r < grey.r);
        assert_eq!(right.a, 255);
    }

    #[test]
    fn test_flip_swaps_light() {
        let grey = Color::rgb(100, 100, 100);
        let src = Raster::filled(40, 40, grey);
        let opts = VxlOptions { flip: true, ..VxlOptions::with_height(20) };
        let out = vxl(&src, &opts).unwrap();
        // Below the centre is now the top facet; above it, the sides.
        assert_eq!(out.pixel(8, 16), grey);
        assert_ne!(out.pixel(12, 7), grey);
    }
}
