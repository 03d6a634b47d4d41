//! Clamping, averaging and comparison helpers.
//!
//! # Example
//!
//! ```rust
//! use tessera_color::{average, closeness};
//! use tessera_core::Color;
//!
//! let avg = average(&[Color::rgb(0, 0, 0), Color::rgb(255, 255, 255)]);
//! assert_eq!(avg, Color::rgb(128, 128, 128));
//!
//! assert_eq!(closeness(Color::rgb(10, 0, 0), Color::rgb(0, 0, 10)), 20);
//! ```

use tessera_core::Color;

/// Clamps an 8-bit scale value into `[0, 255]`. NaN becomes 0.
#[inline]
pub fn truncate(x: f32) -> f32 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 255.0) }
}

/// Clamps a ratio into `[0, 1]`. NaN becomes 0.
#[inline]
pub fn clamp_unit(x: f32) -> f32 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

/// Running per-channel sum for averaging colors without collecting them.
///
/// Used by the tessellators, which average thousands of pixels per region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Accumulator {
    sum: [u64; 4],
    count: u64,
}

impl Accumulator {
    /// Creates an empty accumulator.
    pub const fn new() -> Self {
        Self {
            sum: [0; 4],
            count: 0,
        }
    }

    /// Adds one color.
    #[inline]
    pub fn add(&mut self, c: Color) {
        self.sum[0] += c.r as u64;
        self.sum[1] += c.g as u64;
        self.sum[2] += c.b as u64;
        self.sum[3] += c.a as u64;
        self.count += 1;
    }

    /// Merges another accumulator into this one.
    #[inline]
    pub fn merge(&mut self, other: &Accumulator) {
        for (s, o) in self.sum.iter_mut().zip(other.sum) {
            *s += o;
        }
        self.count += other.count;
    }

    /// Number of colors added.
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns `true` if nothing was added.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Rounded per-channel mean, or `None` if empty.
    pub fn mean(&self) -> Option<Color> {
        if self.count == 0 {
            return None;
        }
        let n = self.count;
        let ch = |i: usize| ((self.sum[i] + n / 2) / n) as u8;
        Some(Color::rgba(ch(0), ch(1), ch(2), ch(3)))
    }

    /// Rounded per-channel mean; opaque black when empty.
    #[inline]
    pub fn average(&self) -> Color {
        self.mean().unwrap_or(Color::BLACK)
    }
}

impl Extend<Color> for Accumulator {
    fn extend<I: IntoIterator<Item = Color>>(&mut self, iter: I) {
        for c in iter {
            self.add(c);
        }
    }
}

impl FromIterator<Color> for Accumulator {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        let mut acc = Self::new();
        acc.extend(iter);
        acc
    }
}

/// Per-channel mean of straight (non-premultiplied) colors.
///
/// The mean of no colors is opaque black.
pub fn average(colors: &[Color]) -> Color {
    colors.iter().copied().collect::<Accumulator>().average()
}

/// Sum of absolute per-channel differences, alpha included.
///
/// This is a cheap similarity heuristic for picking between tile layouts,
/// not a perceptual color distance.
#[inline]
pub fn closeness(a: Color, b: Color) -> u32 {
    a.to_array()
        .iter()
        .zip(b.to_array())
        .map(|(&x, y)| x.abs_diff(y) as u32)
        .sum()
}

/// Largest and smallest of three ratios, `(max, min)`.
#[inline]
pub(crate) fn max_min(r: f32, g: f32, b: f32) -> (f32, f32) {
    (r.max(g).max(b), r.min(g).min(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate(-3.0), 0.0);
        assert_eq!(truncate(300.0), 255.0);
        assert_eq!(truncate(12.5), 12.5);
        assert_eq!(truncate(f32::NAN), 0.0);
    }

    #[test]
    fn test_clamp_unit() {
        assert_eq!(clamp_unit(1.5), 1.0);
        assert_eq!(clamp_unit(-0.1), 0.0);
        assert_eq!(clamp_unit(f32::NAN), 0.0);
    }

    #[test]
    fn test_average_empty_is_opaque_black() {
        assert_eq!(average(&[]), Color::BLACK);
        assert_eq!(Accumulator::new().mean(), None);
    }

    #[test]
    fn test_average_straight_channels() {
        let colors = [
            Color::rgba(255, 0, 0, 255),
            Color::rgba(0, 0, 255, 0),
            Color::rgba(0, 0, 0, 255),
        ];
        assert_eq!(average(&colors), Color::rgba(85, 0, 85, 170));
    }

    #[test]
    fn test_accumulator_merge() {
        let mut a: Accumulator = [Color::rgb(10, 20, 30)].into_iter().collect();
        let b: Accumulator = [Color::rgb(30, 40, 50)].into_iter().collect();
        a.merge(&b);
        assert_eq!(a.count(), 2);
        assert_eq!(a.average(), Color::rgb(20, 30, 40));
    }

    #[test]
    fn test_closeness() {
        let a = Color::rgba(10, 20, 30, 255);
        assert_eq!(closeness(a, a), 0);
        assert_eq!(closeness(a, Color::rgba(0, 40, 30, 250)), 35);
        assert_eq!(closeness(Color::BLACK, Color::WHITE), closeness(Color::WHITE, Color::BLACK));
    }
}
