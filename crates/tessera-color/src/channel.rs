//! Access to a single scalar property of a color.
//!
//! Levels, curves and per-channel adjustments are written once against
//! [`ChannelAccessor`] and work unchanged on red, alpha, hue or lightness.
//! Every accessor reports values as ratios in `[0, 1]` and clamps what it
//! is given on `set`; hue is the exception and wraps instead.
//!
//! # Example
//!
//! ```rust
//! use tessera_color::{Channel, ChannelAccessor};
//! use tessera_core::Color;
//!
//! let c = Color::rgb(0, 255, 0);
//! assert_eq!(Channel::Green.get(c), 1.0);
//! assert!((Channel::Hue.get(c) - 1.0 / 3.0).abs() < 1e-6);
//!
//! // half a turn of hue from green lands on magenta
//! let shifted = Channel::Hue.set(c, Channel::Hue.get(c) + 0.5);
//! assert_eq!(shifted, Color::rgb(255, 0, 255));
//! ```

use tessera_core::Color;

use crate::math::clamp_unit;
use crate::model::{Hsi, Hsl};

/// Get/set access to one logical property of a color.
pub trait ChannelAccessor: Send + Sync {
    /// Reads the property as a ratio.
    fn get(&self, c: Color) -> f32;

    /// Returns `c` with the property replaced by `value`.
    fn set(&self, c: Color, value: f32) -> Color;
}

/// The built-in accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Red
    Red,
    /// Green
    Green,
    /// Blue
    Blue,
    /// Alpha
    Alpha,
    /// HSL hue, scaled from degrees to `[0, 1)`
    Hue,
    /// HSL saturation
    Saturation,
    /// HSL lightness
    Lightness,
    /// HSI intensity
    Intensity,
}

impl Channel {
    /// Brightness is measured as HSI intensity.
    pub const BRIGHTNESS: Channel = Channel::Intensity;

    /// The three color channels, in order.
    pub const RGB: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Lower-case channel name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Alpha => "alpha",
            Self::Hue => "hue",
            Self::Saturation => "saturation",
            Self::Lightness => "lightness",
            Self::Intensity => "intensity",
        }
    }
}

impl ChannelAccessor for Channel {
    fn get(&self, c: Color) -> f32 {
        let [r, g, b, a] = c.to_ratio();
        match self {
            Self::Red => r,
            Self::Green => g,
            Self::Blue => b,
            Self::Alpha => a,
            Self::Hue => Hsl::from(c).h / 360.0,
            Self::Saturation => Hsl::from(c).s,
            Self::Lightness => Hsl::from(c).l,
            Self::Intensity => Hsi::from(c).i,
        }
    }

    fn set(&self, c: Color, value: f32) -> Color {
        let mut rgba = c.to_ratio();
        let v = clamp_unit(value);
        match self {
            Self::Red => rgba[0] = v,
            Self::Green => rgba[1] = v,
            Self::Blue => rgba[2] = v,
            Self::Alpha => rgba[3] = v,
            Self::Hue => {
                let turns = if value.is_finite() { value.rem_euclid(1.0) } else { 0.0 };
                let mut hsl = Hsl::from_ratio(rgba);
                hsl.h = turns * 360.0;
                return Color::from_ratio(hsl.to_ratio());
            }
            Self::Saturation => {
                let mut hsl = Hsl::from_ratio(rgba);
                hsl.s = v;
                return Color::from_ratio(hsl.to_ratio());
            }
            Self::Lightness => {
                let mut hsl = Hsl::from_ratio(rgba);
                hsl.l = v;
                return Color::from_ratio(hsl.to_ratio());
            }
            Self::Intensity => {
                let mut hsi = Hsi::from_ratio(rgba);
                hsi.i = v;
                return Color::from_ratio(hsi.to_ratio());
            }
        }
        Color::from_ratio(rgba)
    }
}

impl std::str::FromStr for Channel {
    type Err = tessera_core::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "r" | "red" => Ok(Self::Red),
            "g" | "green" => Ok(Self::Green),
            "b" | "blue" => Ok(Self::Blue),
            "a" | "alpha" => Ok(Self::Alpha),
            "h" | "hue" => Ok(Self::Hue),
            "s" | "saturation" => Ok(Self::Saturation),
            "l" | "lightness" => Ok(Self::Lightness),
            "i" | "intensity" | "brightness" => Ok(Self::Intensity),
            _ => Err(tessera_core::Error::unknown_name("channel", s)),
        }
    }
}
