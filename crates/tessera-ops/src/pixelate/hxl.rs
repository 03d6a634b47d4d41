//! Interlocking-triangle pixelation.
//!
//! The image is laid out on a grid of tiles `w` wide and `2w` tall. Inside
//! a tile the two diagonals through its centre bound a north and a south
//! triangle; a second grid, offset by half a tile on both axes, contributes
//! the triangles that fill the east and west gaps. Together the two grids
//! tile the plane with triangles whose sides run at 60° once the image is
//! viewed at its true aspect.
//!
//! The geometry is evaluated in a horizontally doubled space where every
//! tile is a `2w x 2w` square and the diagonals are exactly `v = ±u`. Each
//! output pixel is the mean of the two doubled-space samples it covers.

use tessera_color::Accumulator;
use tessera_core::{traverse, Color, Dimension, Raster, TileStyle};
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::error::{OpsError, OpsResult};

/// Resolved colors of one tile.
#[derive(Debug, Clone, Copy, Default)]
struct Tile {
    north: Option<Color>,
    south: Option<Color>,
    whole: Color,
}

/// One of the two triangle grids.
#[derive(Debug)]
struct Lattice {
    /// Tile side in doubled space.
    side: i64,
    /// Offset of the grid origin on both axes.
    shift: i64,
    /// Index of the first column and row.
    first: i64,
    cols: i64,
    tiles: Vec<Tile>,
}

impl Lattice {
    /// Measures every tile of a grid covering `cols x rows` base tiles.
    fn measure(src: &Raster, width: u32, shift: i64, cols: i64, rows: i64) -> Self {
        let side = 2 * width as i64;
        let first = if shift == 0 { 0 } else { -1 };
        let (ncols, nrows) = (cols - first, rows - first);
        let mut lattice = Self {
            side,
            shift,
            first,
            cols: ncols,
            tiles: vec![Tile::default(); (ncols * nrows) as usize],
        };

        let mut tiles = std::mem::take(&mut lattice.tiles);
        traverse::fill_rows(&mut tiles, ncols as usize, |row, slots| {
            for (col, slot) in slots.iter_mut().enumerate() {
                *slot = lattice.measure_tile(src, col as i64 + first, row as i64 + first);
            }
        });
        lattice.tiles = tiles;
        lattice
    }

    /// Doubled-space centre of tile `(c, r)`.
    #[inline]
    fn centre(&self, c: i64, r: i64) -> (f32, f32) {
        let half = self.side / 2;
        (
            (c * self.side + self.shift + half) as f32,
            (r * self.side + self.shift + half) as f32,
        )
    }

    fn measure_tile(&self, src: &Raster, c: i64, r: i64) -> Tile {
        let (w, h) = (src.width() as i64, src.height() as i64);
        let left = c * self.side + self.shift;
        let top = r * self.side + self.shift;
        // Source columns whose doubled centre 2x+1 falls in [left, left+side).
        let x0 = left.div_euclid(2).max(0);
        let x1 = (left + self.side).div_euclid(2).min(w);
        let y0 = top.max(0);
        let y1 = (top + self.side).min(h);

        let (cx, cy) = self.centre(c, r);
        let (mut north, mut south, mut whole) =
            (Accumulator::new(), Accumulator::new(), Accumulator::new());
        for y in y0..y1 {
            let v = cy - (y as f32 + 0.5);
            for x in x0..x1 {
                let u = (2 * x + 1) as f32 - cx;
                let color = src.pixel(x as u32, y as u32);
                whole.add(color);
                if v >= u.abs() {
                    north.add(color);
                } else if v <= -u.abs() {
                    south.add(color);
                }
            }
        }
        Tile { north: north.mean(), south: south.mean(), whole: whole.average() }
    }

    /// Tile containing the doubled-space pixel `(x, y)` and its index.
    #[inline]
    fn locate(&self, x: i64, y: i64) -> (i64, i64, Option<&Tile>) {
        let c = (x - self.shift).div_euclid(self.side);
        let r = (y - self.shift).div_euclid(self.side);
        let (i, j) = (c - self.first, r - self.first);
        let tile = if i < 0 || j < 0 || i >= self.cols {
            None
        } else {
            self.tiles.get((j * self.cols + i) as usize)
        };
        (c, r, tile)
    }

    /// Color of the triangle containing `(x, y)`, if that triangle has samples.
    fn triangle(&self, x: i64, y: i64) -> Option<Color> {
        let (c, r, tile) = self.locate(x, y);
        let tile = tile?;
        let (cx, cy) = self.centre(c, r);
        let u = x as f32 + 0.5 - cx;
        let v = cy - (y as f32 + 0.5);
        if v >= u.abs() {
            tile.north
        } else if v <= -u.abs() {
            tile.south
        } else {
            None
        }
    }
}

/// Pixelates `src` into interlocking triangles `width` pixels wide and
/// `2·width` tall.
///
/// With [`TileStyle::Cropped`] the output is trimmed to whole tiles; with
/// [`TileStyle::Fitted`] it keeps the input size. Triangles cut by the
/// raster edge are averaged over their in-bounds pixels only, and a pixel
/// whose triangle has no samples takes the average of its whole tile.
///
/// # Errors
///
/// Fails when `width` is zero or the tile height overflows.
///
/// # Example
///
/// ```rust
/// use tessera_core::{Color, Raster, TileStyle};
/// use tessera_ops::pixelate::hxl;
///
/// let src = Raster::filled(13, 11, Color::rgb(40, 90, 200));
/// let out = hxl(&src, 3, TileStyle::Fitted).unwrap();
/// assert_eq!(out, src);
/// ```
pub fn hxl(src: &Raster, width: u32, style: TileStyle) -> OpsResult<Raster> {
    trace!(width = src.width(), height = src.height(), tile_width = width, ?style, "pixelate::hxl");
    let tile_height = width
        .checked_mul(2)
        .ok_or_else(|| OpsError::InvalidParameter(format!("triangle width {width} is too large")))?;
    let tile = Dimension::new(tile_height, width)?;
    let (out_w, out_h) = style.output_size(src.width(), src.height(), tile);

    let cols = out_w.div_ceil(width) as i64;
    let rows = out_h.div_ceil(tile_height) as i64;
    let base = Lattice::measure(src, width, 0, cols, rows);
    let offset = Lattice::measure(src, width, width as i64, cols, rows);
    debug!(cols, rows, "pixelate::hxl measured");

    let sample = |x: i64, y: i64| -> Color {
        offset
            .triangle(x, y)
            .or_else(|| base.triangle(x, y))
            .or_else(|| base.locate(x, y).2.map(|t| t.whole))
            .unwrap_or(Color::BLACK)
    };

    Ok(traverse::generate(out_w, out_h, |x, y| {
        let (dx, y) = (2 * x as i64, y as i64);
        [sample(dx, y), sample(dx + 1, y)]
            .into_iter()
            .collect::<Accumulator>()
            .average()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    #[test]
    fn test_uniform_is_unchanged() {
        let c = Color::rgba(200, 10, 60, 90);
        for (w, h, tw) in [(16, 16, 4), (13, 11, 3), (5, 30, 7), (9, 9, 1)] {
            let src = Raster::filled(w, h, c);
            let out = hxl(&src, tw, TileStyle::Fitted).unwrap();
            assert_eq!(out.dimensions(), (w, h));
            assert!(out.pixels().iter().all(|&p| p == c), "{w}x{h} / {tw}");
        }
    }

    #[test]
    fn test_cropped_size() {
        let src = Raster::filled(40, 40, RED);
        let out = hxl(&src, 8, TileStyle::Cropped).unwrap();
        assert_eq!(out.dimensions(), (40, 32));
    }

    #[test]
    fn test_zero_width_rejected() {
        let src = Raster::filled(4, 4, RED);
        assert!(hxl(&src, 0, TileStyle::Cropped).is_err());
    }

    #[test]
    fn test_horizontal_edge_on_tile_boundary() {
        // The edge at y = 8 is a tile boundary of the base grid and the
        // diagonal apex row of the offset grid, so no triangle crosses it.
        let src = Raster::from_fn(16, 16, |_, y| if y < 8 { RED } else { BLUE });
        let out = hxl(&src, 4, TileStyle::Cropped).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn test_triangles_mix_across_vertical_edge() {
        // A vertical edge through the middle of a tile is smeared by the
        // north and south triangles that straddle it.
        let src = Raster::from_fn(8, 8, |x, _| if x < 2 { RED } else { BLUE });
        let out = hxl(&src, 4, TileStyle::Cropped).unwrap();
        let mixed = out.pixels().iter().filter(|p| p.r > 0 && p.b > 0).count();
        assert!(mixed > 0);
        assert_eq!(out.pixel(7, 4), BLUE);
    }
}
