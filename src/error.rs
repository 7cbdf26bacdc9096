//! Error types for corner-pin distortion

use serde::Serialize;
use thiserror::Error;

/// Why a corner configuration cannot produce a trustworthy matrix.
///
/// A classification never aborts computation: the solver still runs (or is
/// skipped) and [`Distortion::recompute`](crate::Distortion::recompute)
/// substitutes the identity matrix whenever one of these is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeometryError {
    /// Two corners are within one unit of each other, measured over the four
    /// edges and both diagonals.
    #[error("two corners are within one unit of each other")]
    DegenerateEdge,
    /// The corner quadrilateral is concave, self-intersecting, or wound
    /// backwards.
    #[error("corner quadrilateral is concave or self-intersecting")]
    ConcavePolygon,
}

/// Hard failures that must stop the caller instead of degrading silently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistortError {
    /// A perspective direction outside top/left/bottom/right.
    #[error("invalid perspective direction: {0:?}")]
    InvalidDirection(String),
    /// A transform-origin component that is neither empty, a pixel length,
    /// nor a percentage.
    #[error("invalid transform origin: {0:?}")]
    InvalidOffset(String),
}
