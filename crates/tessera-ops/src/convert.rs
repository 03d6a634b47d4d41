//! Passing a raster through a cylindrical color model.
//!
//! Conversion to HSL, HSV or HSI and back is lossy only through 8-bit
//! rounding, so [`convert`] is close to the identity. It exists to quantize
//! an image the way a round trip through a file stored in that model would.

use tessera_color::ColorModel;
use tessera_core::{traverse, Color, PixelFn, Raster};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Pixel function for [`convert`].
pub fn convert_fn(model: ColorModel) -> PixelFn {
    Box::new(move |c: Color| model.roundtrip(c))
}

/// Converts every pixel to `model` and back to RGB.
///
/// Dimensions and alpha are preserved.
///
/// ```rust
/// use tessera_color::ColorModel;
/// use tessera_core::{Color, Raster};
/// use tessera_ops::convert::convert;
///
/// let src = Raster::filled(3, 2, Color::rgba(255, 0, 0, 77));
/// assert_eq!(convert(&src, ColorModel::Hsv), src);
/// ```
pub fn convert(src: &Raster, model: ColorModel) -> Raster {
    trace!(width = src.width(), height = src.height(), model = model.name(), "convert::convert");
    traverse::map_pixels(src, convert_fn(model))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_within_rounding() {
        let src = Raster::from_fn(32, 32, |x, y| Color::rgba((x * 8) as u8, (y * 8) as u8, ((x + y) * 4) as u8, 200));
        for model in [ColorModel::Hsl, ColorModel::Hsv, ColorModel::Hsi] {
            let out = convert(&src, model);
            assert_eq!(out.dimensions(), src.dimensions());
            for (a, b) in src.pixels().iter().zip(out.pixels()) {
                assert!(a.r.abs_diff(b.r) <= 1 && a.g.abs_diff(b.g) <= 1 && a.b.abs_diff(b.b) <= 1);
                assert_eq!(a.a, b.a);
            }
        }
    }
}
