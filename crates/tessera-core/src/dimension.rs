//! Tile sizes for pixelation and tessellation.
//!
//! A [`Dimension`] is a `(height, width)` pair. It can be written literally
//! as `"HxW"` or derived from a row/column count and the size of the raster
//! it will be applied to. Integer division means the last row or column of
//! tiles may not fit exactly; [`TileStyle`] decides what happens to it.
//!
//! # Example
//!
//! ```rust
//! use tessera_core::{Dimension, TileStyle};
//!
//! let d: Dimension = "20x10".parse().unwrap();
//! assert_eq!((d.height, d.width), (20, 10));
//!
//! // 100 px wide raster split into 8 columns of square tiles
//! let d = Dimension::for_cols(100, 8).unwrap();
//! assert_eq!((d.height, d.width), (12, 12));
//! assert_eq!(TileStyle::default(), TileStyle::Cropped);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A tile size: `height` rows by `width` columns, both positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimension {
    /// Tile height in pixels
    pub height: u32,
    /// Tile width in pixels
    pub width: u32,
}

impl Dimension {
    /// Creates a dimension, rejecting zero sizes.
    pub fn new(height: u32, width: u32) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(Error::InvalidTileSize { height, width });
        }
        Ok(Self { height, width })
    }

    /// Creates a square dimension.
    pub fn square(size: u32) -> Result<Self> {
        Self::new(size, size)
    }

    /// Square tiles such that `rows` of them span `raster_height`.
    pub fn for_rows(raster_height: u32, rows: u32) -> Result<Self> {
        let side = checked_div(raster_height, rows)?;
        Self::new(side, side)
    }

    /// Square tiles such that `cols` of them span `raster_width`.
    pub fn for_cols(raster_width: u32, cols: u32) -> Result<Self> {
        let side = checked_div(raster_width, cols)?;
        Self::new(side, side)
    }

    /// Rectangular tiles giving `rows` by `cols` tiles over the raster.
    pub fn for_rows_and_cols(raster_width: u32, raster_height: u32, rows: u32, cols: u32) -> Result<Self> {
        Self::new(checked_div(raster_height, rows)?, checked_div(raster_width, cols)?)
    }
}

fn checked_div(extent: u32, count: u32) -> Result<u32> {
    extent
        .checked_div(count)
        .ok_or(Error::InvalidTileSize { height: 0, width: 0 })
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}

impl FromStr for Dimension {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (h, w) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| Error::parse_dimension(s, "expected HxW"))?;
        let height = h
            .trim()
            .parse::<u32>()
            .map_err(|e| Error::parse_dimension(s, format!("height: {e}")))?;
        let width = w
            .trim()
            .parse::<u32>()
            .map_err(|e| Error::parse_dimension(s, format!("width: {e}")))?;
        Self::new(height, width)
    }
}

/// What to do with tiles that do not fit the raster exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileStyle {
    /// Drop the partial trailing row and column; every tile is full size.
    #[default]
    Cropped,
    /// Keep partial tiles at their natural, smaller size.
    Fitted,
}

impl TileStyle {
    /// Size of the output raster for a `width x height` input.
    ///
    /// ```rust
    /// use tessera_core::{Dimension, TileStyle};
    ///
    /// let d = Dimension::new(3, 4).unwrap();
    /// assert_eq!(TileStyle::Cropped.output_size(10, 10, d), (8, 9));
    /// assert_eq!(TileStyle::Fitted.output_size(10, 10, d), (10, 10));
    /// ```
    pub fn output_size(self, width: u32, height: u32, tile: Dimension) -> (u32, u32) {
        match self {
            Self::Cropped => (
                width / tile.width * tile.width,
                height / tile.height * tile.height,
            ),
            Self::Fitted => (width, height),
        }
    }
}
