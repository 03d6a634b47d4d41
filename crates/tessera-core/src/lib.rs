//! # tessera-core
//!
//! Core types for the tessera image-processing primitives.
//!
//! This crate provides the foundational types every other tessera crate
//! builds on:
//!
//! - [`Color`] - 8-bit straight-alpha RGBA value
//! - [`Raster`] - Immutable, row-major grid of colors
//! - [`Rect`] - Integer rectangle used for tiles and intersections
//! - [`Dimension`], [`TileStyle`] - Tile sizes for pixelation
//! - [`traverse`] - Strip-parallel pixel traversal
//! - [`compose`] - Chaining of per-pixel transforms
//!
//! ## Crate Structure
//!
//! ```text
//! tessera-core (this crate)
//!    ^
//!    |
//!    +-- tessera-color (color models, channel accessors)
//!    +-- tessera-ops (compositing, convolution, tessellation, levels)
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` - Partition traversals across the rayon pool (enabled by default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod compose;
pub mod dimension;
pub mod error;
pub mod pixel;
pub mod raster;
pub mod rect;
pub mod traverse;

pub use compose::{compose, PixelFn};
pub use dimension::{Dimension, TileStyle};
pub use error::{Error, Result};
pub use pixel::Color;
pub use raster::Raster;
pub use rect::Rect;
pub use traverse::Workers;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use tessera_core::prelude::*;
///
/// let raster = Raster::filled(4, 4, Color::WHITE);
/// assert_eq!(raster.pixel(0, 0), Color::WHITE);
/// ```
pub mod prelude {
    pub use crate::compose::{compose, PixelFn};
    pub use crate::dimension::{Dimension, TileStyle};
    pub use crate::error::{Error, Result};
    pub use crate::pixel::Color;
    pub use crate::raster::Raster;
    pub use crate::rect::Rect;
    pub use crate::traverse::Workers;
}
