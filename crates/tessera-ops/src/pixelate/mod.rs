//! Mosaic effects: rectangular, triangular, hexagonal and isometric tiles.
//!
//! Every tessellation works in two phases:
//!
//! 1. Each tile's regions are classified and averaged. Tiles are
//!    independent, so this runs in parallel over the tile grid.
//! 2. The output is gathered pixel by pixel: each pixel works out which
//!    tile and region it falls in and takes that region's color.
//!
//! No worker writes outside its own strip, so the output never depends on
//! the number of workers.
//!
//! # Tessellations
//!
//! - [`pixelate`] - Uniform rectangles
//! - [`pxl`] - Rectangles split along one diagonal into two triangles
//! - [`hxl`] - Interlocking equilateral-looking triangles
//! - [`vxl`] - Isometric cubes: hexagons shaded on three facets
//!
//! # Example
//!
//! ```rust
//! use tessera_core::{Color, Dimension, Raster, TileStyle};
//! use tessera_ops::pixelate::{hxl, pxl, TriangleMode};
//!
//! let src = Raster::from_fn(40, 40, |x, y| Color::rgb(x as u8 * 6, y as u8 * 6, 128));
//! let tri = pxl(&src, Dimension::square(10).unwrap(), TriangleMode::Both, TileStyle::Cropped, false);
//! assert_eq!(tri.dimensions(), (40, 40));
//!
//! let hex = hxl(&src, 8, TileStyle::Cropped).unwrap();
//! assert_eq!(hex.dimensions(), (40, 32));
//! ```

mod grid;
mod hxl;
mod pxl;
mod rect;
mod vxl;

pub use hxl::hxl;
pub use pxl::{pxl, TriangleMode};
pub use rect::pixelate;
pub use vxl::{vxl, VxlOptions};
