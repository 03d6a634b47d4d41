//! End-to-end behavior of the public operations.

use tessera_core::{Color, Dimension, Raster, TileStyle};
use tessera_color::Hsl;
use tessera_ops::filter::{blur, box_blur, convolve, Kernel};
use tessera_ops::pixelate::{hxl, pixelate, pxl, vxl};
use tessera_ops::{BlurKind, EdgePolicy, OpsError, TriangleMode, VxlOptions};

#[test]
fn test_pixelate_single_tile() {
    let src = Raster::filled(2, 2, Color::WHITE);
    let out = pixelate(&src, Dimension::square(2).unwrap(), TileStyle::Cropped);
    assert_eq!(out.dimensions(), (2, 2));
    assert!(out.pixels().iter().all(|&c| c == Color::WHITE));
}

#[test]
fn test_hsl_reference_values() {
    let red = Hsl::from(Color::rgb(255, 0, 0));
    assert_eq!((red.h, red.s, red.l), (0.0, 1.0, 0.5));
}

#[test]
fn test_hxl_uniform_any_size() {
    let c = Color::rgba(17, 99, 240, 255);
    for (w, h) in [(1, 1), (7, 3), (20, 20), (33, 64)] {
        for width in [1, 2, 5, 8] {
            for style in [TileStyle::Cropped, TileStyle::Fitted] {
                let out = hxl(&Raster::filled(w, h, c), width, style).unwrap();
                assert!(out.pixels().iter().all(|&p| p == c), "{w}x{h} width {width} {style:?}");
            }
        }
    }
}

#[test]
fn test_tiles_do_not_overlap_or_gap() {
    // Each tile of a striped source averages independently, so a tile's
    // output is exactly its own average.
    let src = Raster::from_fn(12, 12, |x, y| Color::rgb(((x / 4) * 80) as u8, ((y / 3) * 60) as u8, 0));
    let out = pixelate(&src, Dimension::new(3, 4).unwrap(), TileStyle::Cropped);
    assert_eq!(out, src);
}

#[test]
fn test_uniform_tessellations() {
    let c = Color::rgba(201, 13, 77, 140);
    let src = Raster::filled(45, 38, c);
    let tile = Dimension::new(7, 5).unwrap();
    for style in [TileStyle::Cropped, TileStyle::Fitted] {
        let out = pxl(&src, tile, TriangleMode::Both, style, false);
        assert!(out.pixels().iter().all(|&p| p == c));
        let opts = VxlOptions { top: 1.0, left: 1.0, right: 1.0, style, ..VxlOptions::with_height(9) };
        let out = vxl(&src, &opts).unwrap();
        assert!(out.pixels().iter().all(|&p| p == c));
    }
}

#[test]
fn test_kernel_sizes_must_be_odd() {
    assert!(matches!(Kernel::new(2, 3, |_, _| 1.0), Err(OpsError::InvalidKernel(_))));
    assert!(matches!(Kernel::new(3, 0, |_, _| 1.0), Err(OpsError::InvalidKernel(_))));
    let src = Raster::filled(4, 4, Color::WHITE);
    assert!(box_blur(&src, Dimension::new(3, 4).unwrap(), EdgePolicy::Clamp).is_err());
}

#[test]
fn test_blur_preserves_flat_field() {
    let c = Color::rgba(90, 180, 30, 255);
    let src = Raster::filled(9, 7, c);
    for kind in [BlurKind::Box, BlurKind::Gaussian] {
        for edge in [EdgePolicy::Clamp, EdgePolicy::Wrap] {
            let out = blur(&src, kind, 2, None, edge).unwrap();
            assert_eq!(out, src, "{kind:?} {edge:?}");
        }
    }
}

#[test]
fn test_identity_kernel() {
    let src = Raster::from_fn(5, 5, |x, y| Color::rgba((x * 50) as u8, (y * 50) as u8, 7, 255));
    let k = Kernel::new(3, 3, |dx, dy| if dx == 0 && dy == 0 { 1.0 } else { 0.0 }).unwrap();
    assert_eq!(convolve(&src, &k, EdgePolicy::Ignore), src);
}
