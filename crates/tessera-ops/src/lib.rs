//! # tessera-ops
//!
//! Image operations on tessera rasters. Every operation is a pure function:
//! it reads one or two input [`Raster`]s and returns a newly allocated one.
//!
//! # Modules
//!
//! - [`composite`] - Blend modes and PDF-style alpha compositing
//! - [`filter`] - Kernel convolution, blur and sharpening
//! - [`pixelate`] - Rectangular, triangular, hexagonal and isometric mosaics
//! - [`levels`] - Linear, automatic and curve-based level remapping
//! - [`channel`] - Per-channel adjusters
//! - [`adjust`] - Brightness, contrast, gamma, greyscale and vibrance
//! - [`convert`] - Quantizing through a color model
//!
//! # Example
//!
//! ```rust
//! use tessera_core::{Color, Dimension, Raster, TileStyle};
//! use tessera_ops::{composite, pixelate, BlendMode};
//!
//! let base = Raster::filled(8, 8, Color::rgb(200, 100, 50));
//! let layer = Raster::filled(8, 8, Color::rgba(0, 0, 255, 128));
//!
//! let blended = composite::blend(&base, &layer, BlendMode::Screen, 1.0)?;
//! let mosaic = pixelate::pixelate(&blended, Dimension::square(4)?, TileStyle::Cropped);
//! assert_eq!(mosaic.dimensions(), (8, 8));
//! # Ok::<(), tessera_ops::OpsError>(())
//! ```
//!
//! # Parallelism
//!
//! Operations split their output into horizontal strips across the rayon
//! pool they are called from. Run them inside
//! [`Workers::install`](tessera_core::Workers::install) to choose the
//! worker count; results do not depend on it, except for
//! [`BlendMode::Dissolve`] without a seed.
//!
//! [`Raster`]: tessera_core::Raster

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod adjust;
pub mod channel;
pub mod composite;
pub mod convert;
pub mod filter;
pub mod levels;
pub mod pixelate;

pub use adjust::{GreyscaleMethod, VibranceMethod};
pub use error::{OpsError, OpsResult};
pub use composite::{BlendMode, BlendOptions};
pub use filter::{BlurKind, EdgePolicy, Kernel};
pub use levels::{Curve, Levels};
pub use pixelate::{TriangleMode, VxlOptions};
