//! Right-triangle pixelation.
//!
//! Each tile is cut by both of its diagonals into four quadrants (top,
//! right, bottom, left), every quadrant is averaged, and the tile is then
//! repainted as two right triangles along one diagonal. The diagonal is the
//! one that keeps the more similar pair of quadrants together, which tends
//! to follow real edges in the source.
//!
//! Tiles are addressed in a centred, y-up coordinate system `(u, v)` with
//! `r = h / w`, so the diagonals are `v = r·u` and `v = -r·u`.

use tessera_color::{closeness, Accumulator};
use tessera_core::{traverse, Color, Dimension, Raster, Rect, TileStyle};
#[allow(unused_imports)]
use tracing::{debug, trace};

use super::grid::TileGrid;
use crate::error::{OpsError, OpsResult};

/// Which diagonal a [`pxl`] tile may be split along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriangleMode {
    /// Pick per tile by comparing quadrant colors.
    #[default]
    Both,
    /// Always top-left / bottom-right halves.
    Left,
    /// Always top-right / bottom-left halves.
    Right,
}

impl std::str::FromStr for TriangleMode {
    type Err = OpsError;

    fn from_str(s: &str) -> OpsResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "both" => Ok(Self::Both),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(OpsError::InvalidParameter(format!("unknown triangle mode: {s}"))),
        }
    }
}

// ============================================================================
// Tile geometry
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum Quadrant {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

/// Centred y-up frame of a single tile.
#[derive(Debug, Clone, Copy)]
struct Frame {
    half_w: f32,
    half_h: f32,
    slope: f32,
}

impl Frame {
    fn new(cell: Rect) -> Self {
        Self {
            half_w: cell.width as f32 / 2.0,
            half_h: cell.height as f32 / 2.0,
            slope: cell.height as f32 / cell.width as f32,
        }
    }

    /// Converts a tile-local position to `(u, v)`.
    #[inline]
    fn centred(&self, px: f32, py: f32) -> (f32, f32) {
        (px - self.half_w, self.half_h - py)
    }

    /// Quadrant of `(u, v)`; `None` on a diagonal.
    fn quadrant(&self, u: f32, v: f32) -> Option<Quadrant> {
        let reach = self.slope * u.abs();
        if v > reach {
            Some(Quadrant::Top)
        } else if v < -reach {
            Some(Quadrant::Bottom)
        } else if v.abs() < reach {
            Some(if u > 0.0 { Quadrant::Right } else { Quadrant::Left })
        } else {
            None
        }
    }
}

/// A tile repainted as two triangles.
///
/// `upper` covers `v >= sign·r·u`: top and right when `sign` is -1, top and
/// left when it is +1.
#[derive(Debug, Clone, Copy, Default)]
struct Split {
    upper: Color,
    lower: Color,
    sign: f32,
}

impl Split {
    fn measure(src: &Raster, cell: Rect, mode: TriangleMode) -> Self {
        let frame = Frame::new(cell);
        let mut quads = [Accumulator::new(); 4];
        let mut whole = Accumulator::new();

        for (x, y) in cell.iter_coords() {
            let c = src.pixel(x, y);
            whole.add(c);
            let (u, v) = frame.centred((x - cell.x) as f32 + 0.5, (y - cell.y) as f32 + 0.5);
            if let Some(q) = frame.quadrant(u, v) {
                quads[q as usize].add(c);
            }
        }

        let fallback = whole.average();
        let avg = |q: Quadrant| quads[q as usize].mean().unwrap_or(fallback);
        let (top, right, bottom, left) = (
            avg(Quadrant::Top),
            avg(Quadrant::Right),
            avg(Quadrant::Bottom),
            avg(Quadrant::Left),
        );

        let top_right = match mode {
            TriangleMode::Right => true,
            TriangleMode::Left => false,
            TriangleMode::Both => closeness(top, right) < closeness(top, left),
        };
        let pair = |a: Color, b: Color| [a, b].into_iter().collect::<Accumulator>().average();
        if top_right {
            Self { upper: pair(top, right), lower: pair(bottom, left), sign: -1.0 }
        } else {
            Self { upper: pair(top, left), lower: pair(bottom, right), sign: 1.0 }
        }
    }

    #[inline]
    fn is_upper(&self, frame: &Frame, px: f32, py: f32) -> bool {
        let (u, v) = frame.centred(px, py);
        v >= self.sign * frame.slope * u
    }
}

const SUBSAMPLES: [(f32, f32); 4] = [(0.25, 0.25), (0.75, 0.25), (0.25, 0.75), (0.75, 0.75)];

// ============================================================================
// Public API
// ============================================================================

/// Pixelates `src` into right triangles.
///
/// Each `tile` is split along one diagonal into two triangles, each painted
/// with the average of the two quadrants it covers. With
/// [`TriangleMode::Both`] the diagonal that pairs the top quadrant with its
/// more similar neighbour (by [`closeness`]) is used.
///
/// Pixels crossed by the diagonal are antialiased with 2x2 supersampling
/// unless `aliased` is set, in which case each pixel takes the color at its
/// centre.
///
/// An empty quadrant (tiles narrower than two pixels) falls back to the
/// average of the whole tile.
pub fn pxl(src: &Raster, tile: Dimension, mode: TriangleMode, style: TileStyle, aliased: bool) -> Raster {
    trace!(width = src.width(), height = src.height(), %tile, ?mode, aliased, "pixelate::pxl");
    let grid = TileGrid::new(src, tile, style);
    let splits: Vec<Split> = grid.map_cells(|cell| Split::measure(src, cell, mode));

    traverse::generate(grid.width, grid.height, |x, y| {
        let cell = grid.cell(x / tile.width, y / tile.height);
        let split = &splits[grid.index_of(x, y)];
        let frame = Frame::new(cell);
        let (lx, ly) = ((x - cell.x) as f32, (y - cell.y) as f32);

        let upper = if aliased {
            if split.is_upper(&frame, lx + 0.5, ly + 0.5) { 4 } else { 0 }
        } else {
            SUBSAMPLES
                .iter()
                .filter(|&&(dx, dy)| split.is_upper(&frame, lx + dx, ly + dy))
                .count()
        };
        match upper {
            0 => split.lower,
            4 => split.upper,
            n => {
                let mut acc = Accumulator::new();
                acc.extend(std::iter::repeat_n(split.upper, n));
                acc.extend(std::iter::repeat_n(split.lower, 4 - n));
                acc.average()
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    fn square(size: u32) -> Dimension {
        Dimension::square(size).unwrap()
    }

    #[test]
    fn test_uniform_is_unchanged() {
        let c = Color::rgba(12, 140, 200, 180);
        let src = Raster::filled(12, 12, c);
        for mode in [TriangleMode::Both, TriangleMode::Left, TriangleMode::Right] {
            for aliased in [false, true] {
                let out = pxl(&src, square(4), mode, TileStyle::Cropped, aliased);
                assert!(out.pixels().iter().all(|&p| p == c));
            }
        }
    }

    #[test]
    fn test_follows_anti_diagonal_edge() {
        // Red above the line from top-left to bottom-right, blue below.
        let src = Raster::from_fn(8, 8, |x, y| if x > y { RED } else { BLUE });
        let out = pxl(&src, square(8), TriangleMode::Both, TileStyle::Cropped, true);
        assert_eq!(out.pixel(6, 1), RED);
        assert_eq!(out.pixel(1, 6), BLUE);
    }

    #[test]
    fn test_forced_mode_pairs_quadrants() {
        // Top half red, bottom half blue.
        let src = Raster::from_fn(8, 8, |_, y| if y < 4 { RED } else { BLUE });
        let right = pxl(&src, square(8), TriangleMode::Right, TileStyle::Cropped, true);
        let left = pxl(&src, square(8), TriangleMode::Left, TileStyle::Cropped, true);
        // Left and right quadrants are both half red, so the upper triangles
        // match; the left edge just below the corner flips sides.
        assert_eq!(left.pixel(0, 1), right.pixel(7, 1));
        assert_ne!(left.pixel(0, 1), right.pixel(0, 1));
    }

    #[test]
    fn test_antialiased_diagonal_is_blended() {
        let src = Raster::from_fn(8, 8, |x, y| if x + y < 8 { RED } else { BLUE });
        let sharp = pxl(&src, square(8), TriangleMode::Left, TileStyle::Cropped, true);
        let smooth = pxl(&src, square(8), TriangleMode::Left, TileStyle::Cropped, false);
        // Pixels on the diagonal mix both triangle colors.
        let d = smooth.pixel(3, 4);
        assert!(d.r > 0 && d.b > 0, "{d:?}");
        assert_eq!(smooth.pixel(0, 0), sharp.pixel(0, 0));
        assert_eq!(smooth.pixel(7, 7), sharp.pixel(7, 7));
    }

    #[test]
    fn test_thin_tiles_fall_back_to_tile_average() {
        let src = Raster::from_fn(4, 4, |x, _| if x % 2 == 0 { RED } else { BLUE });
        let out = pxl(&src, Dimension::new(4, 1).unwrap(), TriangleMode::Both, TileStyle::Cropped, true);
        assert_eq!(out.pixel(0, 0), RED);
        assert_eq!(out.pixel(1, 3), BLUE);
    }

    #[test]
    fn test_fitted_size() {
        let src = Raster::filled(10, 7, RED);
        let out = pxl(&src, square(4), TriangleMode::Both, TileStyle::Fitted, false);
        assert_eq!(out.dimensions(), (10, 7));
        assert!(out.pixels().iter().all(|&p| p == RED));
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("Left".parse::<TriangleMode>().unwrap(), TriangleMode::Left);
        assert!(matches!("diagonal".parse::<TriangleMode>(), Err(OpsError::InvalidParameter(_))));
    }
}
