//! Rectangular pixelation.

use tessera_color::Accumulator;
use tessera_core::{traverse, Color, Dimension, Raster, TileStyle};
#[allow(unused_imports)]
use tracing::{debug, trace};

use super::grid::TileGrid;

/// Replaces every `tile`-sized block with its average color.
///
/// With [`TileStyle::Cropped`] the output is `⌊W/w⌋·w x ⌊H/h⌋·h`; with
/// [`TileStyle::Fitted`] it keeps the input size and the trailing blocks
/// are averaged over their smaller area.
///
/// # Example
///
/// ```rust
/// use tessera_core::{Color, Dimension, Raster, TileStyle};
/// use tessera_ops::pixelate::pixelate;
///
/// let src = Raster::from_fn(4, 2, |x, _| if x % 2 == 0 { Color::BLACK } else { Color::WHITE });
/// let out = pixelate(&src, Dimension::new(2, 2).unwrap(), TileStyle::Cropped);
/// assert!(out.pixels().iter().all(|&c| c == Color::rgb(128, 128, 128)));
/// ```
pub fn pixelate(src: &Raster, tile: Dimension, style: TileStyle) -> Raster {
    trace!(width = src.width(), height = src.height(), %tile, ?style, "pixelate::pixelate");
    let grid = TileGrid::new(src, tile, style);
    let averages: Vec<Color> = grid.map_cells(|cell| {
        cell.iter_coords()
            .map(|(x, y)| src.pixel(x, y))
            .collect::<Accumulator>()
            .average()
    });
    traverse::generate(grid.width, grid.height, |x, y| averages[grid.index_of(x, y)])
}
