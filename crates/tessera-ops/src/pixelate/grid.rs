//! Tile grid shared by the tessellations.

use tessera_core::{traverse, Dimension, Raster, Rect, TileStyle};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// A grid of `tile`-sized cells over an output of `width x height`.
///
/// Trailing cells are smaller than `tile` when the output is fitted.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TileGrid {
    pub tile: Dimension,
    pub width: u32,
    pub height: u32,
    pub cols: u32,
    pub rows: u32,
}

impl TileGrid {
    pub fn new(src: &Raster, tile: Dimension, style: TileStyle) -> Self {
        let (width, height) = style.output_size(src.width(), src.height(), tile);
        let grid = Self {
            tile,
            width,
            height,
            cols: width.div_ceil(tile.width),
            rows: height.div_ceil(tile.height),
        };
        debug!(%tile, ?style, cols = grid.cols, rows = grid.rows, "pixelate::grid");
        grid
    }

    /// Bounds of cell `(col, row)`, clipped to the output.
    #[inline]
    pub fn cell(&self, col: u32, row: u32) -> Rect {
        let x = col * self.tile.width;
        let y = row * self.tile.height;
        Rect::new(
            x,
            y,
            self.tile.width.min(self.width - x),
            self.tile.height.min(self.height - y),
        )
    }

    /// Index into a row-major per-cell table for the pixel `(x, y)`.
    #[inline]
    pub fn index_of(&self, x: u32, y: u32) -> usize {
        (y / self.tile.height) as usize * self.cols as usize + (x / self.tile.width) as usize
    }

    /// Evaluates `f` for every cell, in parallel, into a row-major table.
    pub fn map_cells<T, F>(&self, f: F) -> Vec<T>
    where
        T: Clone + Default + Send,
        F: Fn(Rect) -> T + Sync + Send,
    {
        let mut cells = vec![T::default(); self.cols as usize * self.rows as usize];
        traverse::fill_rows(&mut cells, self.cols as usize, |row, slots| {
            for (col, slot) in slots.iter_mut().enumerate() {
                *slot = f(self.cell(col as u32, row));
            }
        });
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::Color;

    #[test]
    fn test_cropped_grid() {
        let src = Raster::new(10, 7);
        let g = TileGrid::new(&src, Dimension::new(3, 4).unwrap(), TileStyle::Cropped);
        assert_eq!((g.width, g.height, g.cols, g.rows), (8, 6, 2, 2));
        assert_eq!(g.cell(1, 1), Rect::new(4, 3, 4, 3));
    }

    #[test]
    fn test_fitted_grid_has_partial_cells() {
        let src = Raster::new(10, 7);
        let g = TileGrid::new(&src, Dimension::new(3, 4).unwrap(), TileStyle::Fitted);
        assert_eq!((g.cols, g.rows), (3, 3));
        assert_eq!(g.cell(2, 2), Rect::new(8, 6, 2, 1));
        assert_eq!(g.index_of(9, 6), 8);
    }

    #[test]
    fn test_map_cells_order() {
        let src = Raster::filled(6, 4, Color::WHITE);
        let g = TileGrid::new(&src, Dimension::square(2).unwrap(), TileStyle::Cropped);
        let cells = g.map_cells(|r| (r.x, r.y));
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[4], (2, 2));
    }
}
