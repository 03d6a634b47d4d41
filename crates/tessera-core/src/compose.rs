//! Chaining per-pixel transforms into a single pass.
//!
//! Adjustments such as brightness, contrast or a levels curve are all plain
//! `Color -> Color` functions. Rather than running one traversal per
//! adjustment, collect them in order and [`compose`] them; the resulting
//! function is applied once per pixel.
//!
//! # Example
//!
//! ```rust
//! use tessera_core::{compose, traverse, Color, PixelFn, Raster};
//!
//! let steps: Vec<PixelFn> = vec![
//!     Box::new(|c: Color| Color::rgba(c.r / 2, c.g, c.b, c.a)),
//!     Box::new(|c: Color| Color::rgba(c.r, 0, c.b, c.a)),
//! ];
//! let f = compose(steps);
//!
//! let src = Raster::filled(2, 2, Color::rgb(200, 100, 50));
//! let out = traverse::map_pixels(&src, f);
//! assert_eq!(out.pixel(0, 0), Color::rgb(100, 0, 50));
//! ```

use crate::pixel::Color;

/// A boxed per-pixel transform that can be shared across workers.
pub type PixelFn = Box<dyn Fn(Color) -> Color + Send + Sync>;

/// Combines `fns` into one function that applies them in order.
///
/// An empty list yields the identity.
pub fn compose(fns: Vec<PixelFn>) -> impl Fn(Color) -> Color + Send + Sync {
    move |c| fns.iter().fold(c, |acc, f| f(acc))
}
