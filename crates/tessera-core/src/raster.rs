//! Immutable color rasters.
//!
//! A [`Raster`] is a row-major grid of [`Color`] values with its origin at
//! (0, 0). Operations never mutate their inputs: every transform allocates
//! and returns a new raster, so a raster can be shared freely between
//! threads while it is being read.
//!
//! # Memory Layout
//!
//! ```text
//! pixels: [p(0,0), p(1,0), ... p(w-1,0), p(0,1), ... p(w-1,h-1)]
//! index(x, y) = y * width + x
//! ```
//!
//! # Example
//!
//! ```rust
//! use tessera_core::{Color, Raster};
//!
//! let checker = Raster::from_fn(4, 4, |x, y| {
//!     if (x + y) % 2 == 0 { Color::WHITE } else { Color::BLACK }
//! });
//! assert_eq!(checker.pixel(1, 0), Color::BLACK);
//! assert_eq!(checker.to_rgba8().len(), 4 * 4 * 4);
//! ```

use crate::error::{Error, Result};
use crate::pixel::Color;
use crate::rect::Rect;

/// A rectangular grid of straight-alpha colors.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Raster {
    /// Creates a fully transparent raster.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Color::TRANSPARENT)
    }

    /// Creates a raster where every pixel is `color`.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Creates a raster by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, f: F) -> Self
    where
        F: Fn(u32, u32) -> Color,
    {
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Wraps an existing row-major pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the buffer length is not
    /// `width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| Error::invalid_dimensions(width, height, "pixel count overflows"))?;
        if pixels.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} pixels, got {}", expected, pixels.len()),
            ));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Builds a raster from packed straight RGBA bytes, as produced by a
    /// decoder.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `bytes.len()` is not
    /// `width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| Error::invalid_dimensions(width, height, "byte count overflows"))?;
        if bytes.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} bytes, got {}", expected, bytes.len()),
            ));
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|c| Color::rgba(c[0], c[1], c[2], c[3]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Returns packed straight RGBA bytes, ready for an encoder.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_array()).collect()
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Bounds of the raster, always anchored at the origin.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Returns `true` if the raster has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Returns the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        assert!(self.bounds().contains(x, y), "pixel ({x}, {y}) out of bounds");
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the raster.
    ///
    /// Takes signed coordinates so neighbourhood lookups can probe past
    /// the edges.
    #[inline]
    pub fn get_pixel(&self, x: i64, y: i64) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Returns one row of pixels.
    #[inline]
    pub fn row(&self, y: u32) -> &[Color] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.pixels[start..start + w]
    }

    /// All pixels in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Consumes the raster, returning its pixel buffer.
    pub fn into_pixels(self) -> Vec<Color> {
        self.pixels
    }

    /// Builds a raster from a buffer already known to be `width * height`.
    pub(crate) fn from_parts(width: u32, height: u32, pixels: Vec<Color>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fn_layout() {
        let r = Raster::from_fn(3, 2, |x, y| Color::rgb(x as u8, y as u8, 0));
        assert_eq!(r.dimensions(), (3, 2));
        assert_eq!(r.pixel(2, 1), Color::rgb(2, 1, 0));
        assert_eq!(r.row(1)[0], Color::rgb(0, 1, 0));
        assert_eq!(r.pixels().len(), 6);
    }

    #[test]
    fn test_from_pixels_checks_length() {
        assert!(Raster::from_pixels(2, 2, vec![Color::BLACK; 4]).is_ok());
        let err = Raster::from_pixels(2, 2, vec![Color::BLACK; 3]).unwrap_err();
        assert!(err.is_dimension_error());
    }

    #[test]
    fn test_rgba8_roundtrip() {
        let bytes: Vec<u8> = (0..24).collect();
        let r = Raster::from_rgba8(3, 2, bytes.clone()).unwrap();
        assert_eq!(r.pixel(1, 0), Color::rgba(4, 5, 6, 7));
        assert_eq!(r.to_rgba8(), bytes);
        assert!(Raster::from_rgba8(3, 2, vec![0; 23]).is_err());
    }

    #[test]
    fn test_get_pixel_bounds() {
        let r = Raster::filled(2, 2, Color::WHITE);
        assert_eq!(r.get_pixel(1, 1), Some(Color::WHITE));
        assert_eq!(r.get_pixel(-1, 0), None);
        assert_eq!(r.get_pixel(0, 2), None);
    }

    #[test]
    fn test_empty_raster() {
        let r = Raster::new(0, 5);
        assert!(r.is_empty());
        assert!(r.bounds().is_empty());
        assert_eq!(r.to_rgba8(), Vec::<u8>::new());
    }

    #[test]
    #[should_panic]
    fn test_pixel_out_of_bounds_panics() {
        Raster::new(2, 2).pixel(2, 0);
    }
}
