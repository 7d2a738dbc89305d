//! Error types for the editor core.

use thiserror::Error;

/// Errors rejected at the core's call boundary.
///
/// These indicate caller bugs, never ordinary interaction outcomes: a
/// missed hit test or a rejected self-loop click is an `Option`/no-op,
/// not an error.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoreError {
    /// Zoom factors must be positive and finite; they are rejected, not
    /// clamped, since a non-positive factor indicates a caller bug.
    #[error("zoom factor must be positive and finite, got {0}")]
    InvalidZoomFactor(f64),
    /// Screen/world coordinates fed into viewport operations must be finite.
    #[error("point coordinates must be finite, got ({x}, {y})")]
    NonFinitePoint { x: f64, y: f64 },
}
