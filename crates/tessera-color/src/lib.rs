//! # tessera-color
//!
//! Scalar color math used by every tessera operation.
//!
//! - [`math`] - Clamping, averaging and the closeness heuristic
//! - [`model`] - HSL, HSV and HSI models with guarded conversions
//! - [`lab`] - CIE Lab for perceptual adjustments
//! - [`channel`] - Get/set access to a single color property
//!
//! All functions here are total: achromatic colors, zero lightness and
//! empty inputs have defined results and never produce NaN.
//!
//! # Example
//!
//! ```rust
//! use tessera_color::{Hsl, Channel, ChannelAccessor};
//! use tessera_core::Color;
//!
//! let hsl = Hsl::from(Color::rgb(255, 0, 0));
//! assert_eq!((hsl.h, hsl.s, hsl.l), (0.0, 1.0, 0.5));
//!
//! let lighter = Channel::Lightness.set(Color::rgb(255, 0, 0), 0.75);
//! assert_eq!(lighter, Color::rgb(255, 128, 128));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod channel;
pub mod lab;
pub mod math;
pub mod model;

pub use channel::{Channel, ChannelAccessor};
pub use lab::Lab;
pub use math::{average, clamp_unit, closeness, truncate, Accumulator};
pub use model::{ColorModel, Hsi, Hsl, Hsv};
