//! Per-channel adjustments.
//!
//! An *adjuster* is any `Fn(f32) -> f32` over a channel ratio. It is applied
//! through a [`ChannelAccessor`], so the same adjuster brightens red, shifts
//! hue or fades alpha depending only on the channel it is given. Values the
//! adjuster pushes outside `[0, 1]` are clamped by the accessor (hue wraps).
//!
//! # Example
//!
//! ```rust
//! use tessera_color::Channel;
//! use tessera_core::{Color, Raster};
//! use tessera_ops::channel::{adder, adjust, multiplier};
//!
//! let src = Raster::filled(2, 2, Color::rgb(100, 200, 50));
//! let out = adjust(&src, multiplier(2.0), &[Channel::Red, Channel::Green]);
//! assert_eq!(out.pixel(0, 0), Color::rgb(200, 255, 50));
//!
//! let out = adjust(&src, adder(-1.0), &[Channel::Alpha]);
//! assert_eq!(out.pixel(1, 1).a, 0);
//! ```

use tessera_color::{Channel, ChannelAccessor};
use tessera_core::{traverse, Color, PixelFn, Raster};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Adjuster that adds `value` to the channel.
#[inline]
pub fn adder(value: f32) -> impl Fn(f32) -> f32 + Copy + Send + Sync {
    move |v| v + value
}

/// Adjuster that multiplies the channel by `value`.
#[inline]
pub fn multiplier(value: f32) -> impl Fn(f32) -> f32 + Copy + Send + Sync {
    move |v| v * value
}

/// Pixel function applying `adjuster` to each of `channels` in turn.
///
/// Channels are applied in order, each one reading the result of the
/// previous, so listing a channel twice applies the adjuster twice.
pub fn adjust_fn<A>(adjuster: A, channels: &[Channel]) -> PixelFn
where
    A: Fn(f32) -> f32 + Send + Sync + 'static,
{
    let channels = channels.to_vec();
    Box::new(move |c: Color| {
        channels
            .iter()
            .fold(c, |acc, ch| ch.set(acc, adjuster(ch.get(acc))))
    })
}

/// Applies `adjuster` to each of `channels` of every pixel.
pub fn adjust<A>(src: &Raster, adjuster: A, channels: &[Channel]) -> Raster
where
    A: Fn(f32) -> f32 + Send + Sync + 'static,
{
    trace!(width = src.width(), height = src.height(), ?channels, "channel::adjust");
    traverse::map_pixels(src, adjust_fn(adjuster, channels))
}

/// Applies `adjuster` to a single channel through any accessor.
pub fn adjust_channel<C, A>(src: &Raster, channel: C, adjuster: A) -> Raster
where
    C: ChannelAccessor,
    A: Fn(f32) -> f32 + Send + Sync,
{
    trace!(width = src.width(), height = src.height(), "channel::adjust_channel");
    traverse::map_pixels(src, |c| channel.set(c, adjuster(channel.get(c))))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Inverted;

    impl ChannelAccessor for Inverted {
        fn get(&self, c: Color) -> f32 {
            1.0 - Channel::Blue.get(c)
        }

        fn set(&self, c: Color, value: f32) -> Color {
            Channel::Blue.set(c, 1.0 - value)
        }
    }

    #[test]
    fn test_adjusters() {
        assert_eq!(adder(0.25)(0.5), 0.75);
        assert_eq!(multiplier(0.5)(0.5), 0.25);
    }

    #[test]
    fn test_untouched_channels() {
        let src = Raster::filled(3, 1, Color::rgba(10, 20, 30, 40));
        let out = adjust(&src, adder(1.0), &[Channel::Green]);
        assert_eq!(out.pixel(2, 0), Color::rgba(10, 255, 30, 40));
    }

    #[test]
    fn test_hue_wraps() {
        let src = Raster::filled(1, 1, Color::rgb(255, 0, 0));
        let out = adjust(&src, adder(1.0 + 1.0 / 3.0), &[Channel::Hue]);
        assert_eq!(out.pixel(0, 0), Color::rgb(0, 255, 0));
    }

    #[test]
    fn test_channels_apply_in_order() {
        let f = adjust_fn(adder(0.2), &[Channel::Red, Channel::Red]);
        assert_eq!(f(Color::rgb(0, 0, 0)).r, 102);
    }

    #[test]
    fn test_custom_accessor() {
        let src = Raster::filled(2, 2, Color::rgb(0, 0, 200));
        // Inverted blue of 200 is 55/255; doubling gives 110/255, so blue 145.
        let out = adjust_channel(&src, Inverted, multiplier(2.0));
        assert_eq!(out.pixel(1, 0), Color::rgb(0, 0, 145));
    }
}
