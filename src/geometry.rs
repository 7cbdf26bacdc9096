//! Planar geometry predicates that gate the solver
//!
//! The solver always produces a candidate matrix, even for corner layouts
//! where the projective mapping is meaningless. These checks decide whether
//! that candidate can be trusted: collapsed edges make the linear system
//! numerically unstable, and concave or self-intersecting quadrilaterals
//! have no visually sensible mapping at all.

use crate::error::GeometryError;
use serde::{Deserialize, Serialize};

/// A 2-D point in the plane of the undistorted rectangle, origin at its
/// top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Separation at or below which two corners count as collapsed. Absolute,
/// not relative to the rectangle size.
const MIN_SEPARATION: f64 = 1.0;

/// Signed area term of the ordered triple (shoelace formula). Positive when
/// the triple winds counter-clockwise in a y-up frame.
pub fn signed_area(p0: Point, p1: Point, p2: Point) -> f64 {
    p0.x * p1.y + p1.x * p2.y + p2.x * p0.y - p0.y * p1.x - p1.y * p2.x - p2.y * p0.x
}

/// True if any of the four edges or either diagonal between the corners is
/// `MIN_SEPARATION` or shorter.
pub fn has_degenerate_edge(
    top_left: Point,
    top_right: Point,
    bottom_left: Point,
    bottom_right: Point,
) -> bool {
    top_left.distance(top_right) <= MIN_SEPARATION
        || bottom_left.distance(bottom_right) <= MIN_SEPARATION
        || top_left.distance(bottom_left) <= MIN_SEPARATION
        || top_right.distance(bottom_right) <= MIN_SEPARATION
        || top_left.distance(bottom_right) <= MIN_SEPARATION
        || top_right.distance(bottom_left) <= MIN_SEPARATION
}

/// True if the corner quadrilateral is concave, self-intersecting, or wound
/// backwards.
///
/// Splits the quadrilateral into triangles along both diagonals; every one
/// of the four signed areas must stay strictly positive for the layout to
/// keep the winding of the home rectangle.
pub fn has_concave_polygon(
    top_left: Point,
    top_right: Point,
    bottom_left: Point,
    bottom_right: Point,
) -> bool {
    signed_area(top_left, top_right, bottom_right) <= 0.0
        || signed_area(bottom_right, bottom_left, top_left) <= 0.0
        || signed_area(top_right, bottom_right, bottom_left) <= 0.0
        || signed_area(bottom_left, top_left, top_right) <= 0.0
}

/// Classify the corner configuration.
///
/// The distance check runs first and wins when both conditions hold; at most
/// one error kind is ever reported.
pub fn classify(
    top_left: Point,
    top_right: Point,
    bottom_left: Point,
    bottom_right: Point,
) -> Option<GeometryError> {
    if has_degenerate_edge(top_left, top_right, bottom_left, bottom_right) {
        Some(GeometryError::DegenerateEdge)
    } else if has_concave_polygon(top_left, top_right, bottom_left, bottom_right) {
        Some(GeometryError::ConcavePolygon)
    } else {
        None
    }
}
