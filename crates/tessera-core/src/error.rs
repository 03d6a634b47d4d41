//! Error types for tessera-core.
//!
//! The [`Error`] enum covers configuration problems detected before any
//! pixel is processed: malformed buffers, unparsable tile sizes and worker
//! pools that cannot be built. Numeric edge cases (division by zero in a
//! color formula, averaging an empty set) are never errors; they have
//! defined fallback values in the functions that hit them.
//!
//! # Usage
//!
//! ```rust
//! use tessera_core::{Error, Raster, Result};
//!
//! fn checked(width: u32, height: u32, bytes: Vec<u8>) -> Result<Raster> {
//!     Raster::from_rgba8(width, height, bytes)
//! }
//!
//! assert!(checked(2, 2, vec![0; 16]).is_ok());
//! assert!(matches!(checked(2, 2, vec![0; 15]), Err(Error::InvalidDimensions { .. })));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by core data model operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Raster dimensions are invalid or do not match the pixel buffer.
    #[error("invalid dimensions {width}x{height}: {reason}")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// What is wrong with them
        reason: String,
    },

    /// A dimension string could not be parsed.
    ///
    /// Dimensions are written `HxW`, e.g. `"20x10"` is 20 rows tall and
    /// 10 columns wide.
    #[error("cannot parse dimension {input:?}: {reason}")]
    ParseDimension {
        /// Text that failed to parse
        input: String,
        /// Why it failed
        reason: String,
    },

    /// A tile must be at least one pixel in each direction.
    #[error("tile size must be positive, got {height}x{width}")]
    InvalidTileSize {
        /// Tile height
        height: u32,
        /// Tile width
        width: u32,
    },

    /// A named option (channel, color model, ...) was not recognized.
    #[error("unknown {kind}: {input:?}")]
    UnknownName {
        /// What was being named
        kind: &'static str,
        /// Text that failed to match
        input: String,
    },

    /// The worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`].
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::ParseDimension`].
    pub fn parse_dimension(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ParseDimension {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::UnknownName`].
    pub fn unknown_name(kind: &'static str, input: impl Into<String>) -> Self {
        Self::UnknownName {
            kind,
            input: input.into(),
        }
    }

    /// Returns `true` for dimension or tile size problems.
    pub fn is_dimension_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDimensions { .. } | Self::ParseDimension { .. } | Self::InvalidTileSize { .. }
        )
    }

    /// Returns `true` if the worker pool failed to build.
    pub fn is_pool_error(&self) -> bool {
        matches!(self, Self::ThreadPool(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_dimensions(0, 10, "zero width");
        assert_eq!(err.to_string(), "invalid dimensions 0x10: zero width");

        let err = Error::parse_dimension("3y4", "missing 'x'");
        assert!(err.to_string().contains("3y4"));

        let err = Error::InvalidTileSize { height: 0, width: 4 };
        assert!(err.to_string().contains("0x4"));

        let err = Error::unknown_name("channel", "cyan");
        assert_eq!(err.to_string(), "unknown channel: \"cyan\"");
        assert!(!err.is_dimension_error());
    }

    #[test]
    fn test_error_predicates() {
        assert!(Error::InvalidTileSize { height: 0, width: 0 }.is_dimension_error());
        assert!(Error::parse_dimension("", "empty").is_dimension_error());
        assert!(!Error::ThreadPool("x".into()).is_dimension_error());
        assert!(Error::ThreadPool("x".into()).is_pool_error());
    }
}
