//! Error handling.
//!
//! Building a document is a deterministic, in-memory process, so the only things
//! that can go wrong are invalid inputs handed to one of the public entry points.
//! All of them are rejected before any object is created. Fonts that cannot be
//! mapped are not an error: they silently fall back to a default base font.

use thiserror::Error;

/// A wrapper type for quire errors.
pub type QuireResult<T> = Result<T, QuireError>;

/// An error in quire.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuireError {
    /// The bounds of a page were not finite or not strictly positive.
    #[error("invalid page bounds ({width} x {height})")]
    InvalidBounds {
        /// The requested width.
        width: f32,
        /// The requested height.
        height: f32,
    },
    /// A gradient could not be turned into a shading pattern.
    #[error("malformed gradient: {0}")]
    MalformedGradient(#[from] GradientError),
    /// The raster data of an image didn't match its declared dimensions.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// The reason a gradient was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GradientError {
    /// Fewer than two stops were provided.
    #[error("a gradient needs at least two stops, got {0}")]
    TooFewStops(usize),
    /// A stop offset was not finite or outside of `[0, 1]`.
    #[error("stop offset {0} is outside of [0, 1]")]
    OffsetOutOfRange(f32),
    /// Stop offsets were not strictly increasing.
    #[error("stop offsets must be strictly increasing")]
    NonIncreasingOffsets,
    /// One of the coordinates of the gradient was not finite.
    #[error("gradient geometry must be finite")]
    NonFiniteGeometry,
    /// A radial gradient had a negative radius.
    #[error("radius {0} must not be negative")]
    NegativeRadius(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_error_converts() {
        let err: QuireError = GradientError::TooFewStops(1).into();
        assert_eq!(err, QuireError::MalformedGradient(GradientError::TooFewStops(1)));
        assert_eq!(
            err.to_string(),
            "malformed gradient: a gradient needs at least two stops, got 1"
        );
    }
}
