//! Strip-parallel raster traversal.
//!
//! Every per-pixel and per-tile operation in tessera is written against the
//! functions in this module rather than against rayon directly. The output
//! buffer is split into `N` contiguous horizontal strips, where `N` is the
//! number of threads in the pool the call runs on, and each strip is filled
//! by exactly one worker. Strips never overlap and inputs are only read, so
//! no locking is involved and the result is identical for any worker count.
//!
//! To control the worker count, build a [`Workers`] and run the operation
//! inside [`Workers::install`].
//!
//! # Example
//!
//! ```rust
//! use tessera_core::{traverse, Color, Raster, Workers};
//!
//! let src = Raster::filled(64, 64, Color::rgb(10, 20, 30));
//! let workers = Workers::fixed(2).unwrap();
//! let inverted = workers.install(|| {
//!     traverse::map_pixels(&src, |c| Color::rgba(255 - c.r, 255 - c.g, 255 - c.b, c.a))
//! });
//! assert_eq!(inverted.pixel(5, 5), Color::rgb(245, 235, 225));
//! ```

#[cfg(feature = "parallel")]
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::error::Result;
#[cfg(feature = "parallel")]
use crate::error::Error;
use crate::pixel::Color;
use crate::raster::Raster;

// ============================================================================
// Worker configuration
// ============================================================================

/// The worker pool an operation runs on.
///
/// The default uses the global rayon pool, sized to the number of cores.
#[derive(Debug, Clone, Default)]
pub struct Workers {
    #[cfg(feature = "parallel")]
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl Workers {
    /// Uses the global pool.
    pub fn global() -> Self {
        Self::default()
    }

    /// Builds a dedicated pool with `threads` workers.
    ///
    /// `0` means one worker per core.
    pub fn fixed(threads: usize) -> Result<Self> {
        #[cfg(feature = "parallel")]
        {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| Error::ThreadPool(e.to_string()))?;
            debug!(threads = pool.current_num_threads(), "traverse::Workers::fixed");
            Ok(Self {
                pool: Some(Arc::new(pool)),
            })
        }
        #[cfg(not(feature = "parallel"))]
        {
            let _ = threads;
            Ok(Self {})
        }
    }

    /// Number of strips an operation will be split into.
    pub fn count(&self) -> usize {
        #[cfg(feature = "parallel")]
        {
            match &self.pool {
                Some(pool) => pool.current_num_threads(),
                None => rayon::current_num_threads(),
            }
        }
        #[cfg(not(feature = "parallel"))]
        {
            1
        }
    }

    /// Runs `op` with this pool as the current one.
    pub fn install<R, F>(&self, op: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        #[cfg(feature = "parallel")]
        {
            match &self.pool {
                Some(pool) => pool.install(op),
                None => op(),
            }
        }
        #[cfg(not(feature = "parallel"))]
        {
            op()
        }
    }
}

/// Number of workers available to the current call.
#[inline]
pub fn current_workers() -> usize {
    #[cfg(feature = "parallel")]
    {
        rayon::current_num_threads()
    }
    #[cfg(not(feature = "parallel"))]
    {
        1
    }
}

/// Rows per strip for a raster of `height` rows.
#[inline]
pub fn rows_per_strip(height: u32) -> usize {
    let n = current_workers().max(1);
    (height as usize).div_ceil(n).max(1)
}

/// Calls `f(strip_index, strip)` for every strip of `len` elements.
fn for_each_strip<T, F>(out: &mut [T], len: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    #[cfg(feature = "parallel")]
    out.par_chunks_mut(len).enumerate().for_each(|(i, strip)| f(i, strip));
    #[cfg(not(feature = "parallel"))]
    out.chunks_mut(len).enumerate().for_each(|(i, strip)| f(i, strip));
}

/// Fills `out`, a row-major buffer `width` elements wide, row by row.
///
/// `f(y, row)` writes row `y`. This is the same strip partition the pixel
/// traversals use, for operations that keep intermediate values in their
/// own buffers (such as convolution in premultiplied `f32`).
pub fn fill_rows<T, F>(out: &mut [T], width: usize, f: F)
where
    T: Send,
    F: Fn(u32, &mut [T]) + Sync + Send,
{
    if width == 0 || out.is_empty() {
        return;
    }
    let height = out.len() / width;
    let strip_rows = rows_per_strip(height as u32);
    for_each_strip(out, strip_rows * width, |i, strip| {
        let y0 = i * strip_rows;
        for (dy, row) in strip.chunks_mut(width).enumerate() {
            f((y0 + dy) as u32, row);
        }
    });
}

// ============================================================================
// Generation
// ============================================================================

/// Builds a `width x height` raster by evaluating `f(x, y)` for each pixel.
///
/// This is the traversal behind every tessellation: the output is gathered
/// pixel by pixel from read-only precomputed state.
pub fn generate<F>(width: u32, height: u32, f: F) -> Raster
where
    F: Fn(u32, u32) -> Color + Sync + Send,
{
    generate_with(width, height, |_| (), |_, x, y| f(x, y))
}

/// Like [`generate`], with per-row state created by `init(y)`.
///
/// Row state is what lets randomized operations stay independent of the
/// strip layout: seed the generator from the row index.
pub fn generate_with<S, I, F>(width: u32, height: u32, init: I, f: F) -> Raster
where
    I: Fn(u32) -> S + Sync + Send,
    F: Fn(&mut S, u32, u32) -> Color + Sync + Send,
{
    let mut out = vec![Color::TRANSPARENT; width as usize * height as usize];
    trace!(width, height, strips = current_workers(), "traverse::generate");

    fill_rows(&mut out, width as usize, |y, row| {
        let mut state = init(y);
        for (x, px) in row.iter_mut().enumerate() {
            *px = f(&mut state, x as u32, y);
        }
    });

    Raster::from_parts(width, height, out)
}

// ============================================================================
// Mapping
// ============================================================================

/// Returns a raster of the same size where every pixel is `f(pixel)`.
pub fn map_pixels<F>(src: &Raster, f: F) -> Raster
where
    F: Fn(Color) -> Color + Sync + Send,
{
    let (width, height) = src.dimensions();
    let w = width as usize;
    let mut out = vec![Color::TRANSPARENT; src.pixels().len()];
    if out.is_empty() {
        return Raster::from_parts(width, height, out);
    }

    let len = rows_per_strip(height) * w;
    let input = src.pixels();
    for_each_strip(&mut out, len, |i, strip| {
        let start = i * len;
        let from = &input[start..start + strip.len()];
        for (o, &p) in strip.iter_mut().zip(from) {
            *o = f(p);
        }
    });

    Raster::from_parts(width, height, out)
}

/// Combines two rasters pixel by pixel.
///
/// The output covers the intersection of both bounds: its width is the
/// smaller of the two widths and its height the smaller of the two heights.
pub fn map_pixel_pairs<F>(a: &Raster, b: &Raster, f: F) -> Raster
where
    F: Fn(Color, Color) -> Color + Sync + Send,
{
    map_pixel_pairs_with(a, b, |_| (), |_, p, q| f(p, q))
}

/// Like [`map_pixel_pairs`], with per-row state created by `init(y)`.
pub fn map_pixel_pairs_with<S, I, F>(a: &Raster, b: &Raster, init: I, f: F) -> Raster
where
    I: Fn(u32) -> S + Sync + Send,
    F: Fn(&mut S, Color, Color) -> Color + Sync + Send,
{
    let shared = a.bounds().intersect(&b.bounds()).unwrap_or_default();
    let (width, height) = (shared.width, shared.height);
    let w = width as usize;

    let mut out = vec![Color::TRANSPARENT; w * height as usize];
    fill_rows(&mut out, w, |y, row| {
        let mut state = init(y);
        let ra = &a.row(y)[..w];
        let rb = &b.row(y)[..w];
        for ((o, &p), &q) in row.iter_mut().zip(ra).zip(rb) {
            *o = f(&mut state, p, q);
        }
    });

    Raster::from_parts(width, height, out)
}

// ============================================================================
// Reading
// ============================================================================

/// Calls `f` on every pixel. Strips may run concurrently.
pub fn for_each_pixel<F>(src: &Raster, f: F)
where
    F: Fn(Color) + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        let len = rows_per_strip(src.height()) * src.width() as usize;
        if len == 0 {
            return;
        }
        src.pixels()
            .par_chunks(len)
            .for_each(|strip| strip.iter().copied().for_each(&f));
    }
    #[cfg(not(feature = "parallel"))]
    src.pixels().iter().copied().for_each(f);
}

/// Folds every strip with `fold`, starting from `identity()`, and merges
/// the per-strip results with `reduce`.
///
/// `reduce` must be associative; strips are merged in row order.
///
/// ```rust
/// use tessera_core::{traverse, Color, Raster};
///
/// let r = Raster::from_fn(8, 8, |x, y| Color::rgb((x * y) as u8, 0, 0));
/// let max = traverse::fold_pixels(&r, || 0u8, |m, c| m.max(c.r), |a, b| a.max(b));
/// assert_eq!(max, 49);
/// ```
pub fn fold_pixels<T, I, F, R>(src: &Raster, identity: I, fold: F, reduce: R) -> T
where
    T: Send,
    I: Fn() -> T + Sync + Send,
    F: Fn(T, Color) -> T + Sync + Send,
    R: Fn(T, T) -> T + Sync + Send,
{
    let len = rows_per_strip(src.height()) * src.width() as usize;
    if len == 0 {
        return identity();
    }

    #[cfg(feature = "parallel")]
    {
        src.pixels()
            .par_chunks(len)
            .map(|strip| strip.iter().copied().fold(identity(), &fold))
            .reduce(&identity, &reduce)
    }
    #[cfg(not(feature = "parallel"))]
    {
        let _ = &reduce;
        src.pixels().iter().copied().fold(identity(), fold)
    }
}
