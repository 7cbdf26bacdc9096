//! Corner-pin distortion state and orchestration
//!
//! A [`Distortion`] owns the rectangle dimensions, the resolved transform
//! origin, and the four target corner points. Every recompute runs the
//! geometry checks first and only surfaces the solved matrix when they pass;
//! otherwise the identity matrix takes its place. Convenience mutators
//! rewrite the corner points and recompute immediately, so the cached matrix
//! and classification always describe the current corners. Corners may also
//! be edited directly, followed by an explicit [`Distortion::recompute`].

use crate::error::{DistortError, GeometryError};
use crate::geometry::{self, Point};
use crate::matrix::Matrix3d;
use crate::offset::{Offset, OriginSpec};
use crate::solver;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Which edge a perspective skew pulls apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Left,
    Bottom,
    Right,
}

impl FromStr for Edge {
    type Err = DistortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Edge::Top),
            "left" => Ok(Edge::Left),
            "bottom" => Ok(Edge::Bottom),
            "right" => Ok(Edge::Right),
            other => Err(DistortError::InvalidDirection(other.to_string())),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Edge::Top => "top",
            Edge::Left => "left",
            Edge::Bottom => "bottom",
            Edge::Right => "right",
        };
        f.write_str(name)
    }
}

/// Outcome of a recompute: the matrix that will be rendered, whether the
/// solver output was trusted, and the classification when it was not.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Solved {
    pub matrix: Matrix3d,
    pub valid: bool,
    pub error: Option<GeometryError>,
}

/// A corner-pin distortion of a `width x height` rectangle.
#[derive(Debug, Clone)]
pub struct Distortion {
    width: f64,
    height: f64,
    offset: Offset,
    /// Target position of the corner whose home is `(0, 0)`.
    pub top_left: Point,
    /// Target position of the corner whose home is `(width, 0)`.
    pub top_right: Point,
    /// Target position of the corner whose home is `(0, height)`.
    pub bottom_left: Point,
    /// Target position of the corner whose home is `(width, height)`.
    pub bottom_right: Point,
    /// Append the device-pixel-ratio compensation to the style string.
    pub dpr_fix: bool,
    /// Device pixel ratio used by the compensation suffix.
    pub dpr: f64,
    matrix: Matrix3d,
    valid: bool,
    error: Option<GeometryError>,
}

impl Distortion {
    /// Create an undistorted configuration with the transform origin at the
    /// rectangle center. The corners start at their home positions and the
    /// matrix is solved immediately.
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_origin(width, height, OriginSpec::default())
    }

    /// Create an undistorted configuration with an explicit transform
    /// origin.
    pub fn with_origin(width: f64, height: f64, origin: OriginSpec) -> Self {
        let mut distortion = Self {
            width,
            height,
            offset: origin.resolve(width, height),
            top_left: Point::new(0.0, 0.0),
            top_right: Point::new(width, 0.0),
            bottom_left: Point::new(0.0, height),
            bottom_right: Point::new(width, height),
            dpr_fix: false,
            dpr: 1.0,
            matrix: Matrix3d::IDENTITY,
            valid: false,
            error: None,
        };
        distortion.recompute();
        distortion
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// The resolved transform origin.
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// The matrix from the last recompute: the solved transform when the
    /// corners were valid, the identity otherwise.
    pub fn matrix(&self) -> &Matrix3d {
        &self.matrix
    }

    /// Whether the last recompute trusted the solver output.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The classification from the last recompute, if any check fired.
    pub fn error(&self) -> Option<GeometryError> {
        self.error
    }

    /// Re-resolve the transform origin against the rectangle extent.
    pub fn set_origin(&mut self, origin: OriginSpec) -> &mut Self {
        self.offset = origin.resolve(self.width, self.height);
        self.recompute();
        self
    }

    /// Re-run the geometry checks and the solver for the current corners.
    ///
    /// The solver itself never fails; its output is only surfaced when the
    /// corner quadrilateral passes both checks.
    pub fn recompute(&mut self) -> Solved {
        self.error = geometry::classify(
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        );
        match self.error {
            None => {
                self.matrix = solver::solve(
                    self.width,
                    self.height,
                    self.offset,
                    self.top_left,
                    self.top_right,
                    self.bottom_left,
                    self.bottom_right,
                );
                self.valid = true;
                debug!(width = self.width, height = self.height, "solved corner-pin matrix");
            }
            Some(kind) => {
                self.matrix = Matrix3d::IDENTITY;
                self.valid = false;
                warn!("corner configuration rejected ({kind}); substituting identity");
            }
        }
        Solved {
            matrix: self.matrix,
            valid: self.valid,
            error: self.error,
        }
    }

    /// Shift all four corners by `(x, y)`.
    pub fn translate(&mut self, x: f64, y: f64) -> &mut Self {
        for corner in self.corners_mut() {
            corner.x += x;
            corner.y += y;
        }
        self.recompute();
        self
    }

    /// Shift all four corners along the x axis.
    pub fn translate_x(&mut self, x: f64) -> &mut Self {
        self.translate(x, 0.0)
    }

    /// Shift all four corners along the y axis.
    pub fn translate_y(&mut self, y: f64) -> &mut Self {
        self.translate(0.0, y)
    }

    /// Scale all four corners about their centroid, so a translated
    /// distortion scales in place.
    pub fn scale(&mut self, factor: f64) -> &mut Self {
        let cx = (self.top_left.x + self.top_right.x + self.bottom_left.x + self.bottom_right.x)
            / 4.0;
        let cy = (self.top_left.y + self.top_right.y + self.bottom_left.y + self.bottom_right.y)
            / 4.0;
        for corner in self.corners_mut() {
            corner.x = cx + (corner.x - cx) * factor;
            corner.y = cy + (corner.y - cy) * factor;
        }
        self.recompute();
        self
    }

    /// Skew a single edge outward by `amount`, faking a perspective tilt
    /// away from that edge.
    pub fn force_perspective(&mut self, edge: Edge, amount: f64) -> &mut Self {
        match edge {
            Edge::Top => {
                self.top_left.x -= amount;
                self.top_right.x += amount;
            }
            Edge::Left => {
                self.top_left.y -= amount;
                self.bottom_left.y += amount;
            }
            Edge::Bottom => {
                self.bottom_left.x -= amount;
                self.bottom_right.x += amount;
            }
            Edge::Right => {
                self.top_right.y -= amount;
                self.bottom_right.y += amount;
            }
        }
        self.recompute();
        self
    }

    /// Render the CSS transform for the current matrix, including the
    /// device-pixel-ratio compensation when enabled.
    ///
    /// The compensation scales by the ratio and pushes the plane back along
    /// z at an implicit 1000px perspective depth, cancelling the scale for
    /// displays that composite at device resolution. It only applies to a
    /// trusted matrix; the identity fallback renders bare.
    pub fn style(&self) -> String {
        let mut style = self.matrix.to_css();
        if self.dpr_fix && self.valid {
            let z = (1.0 - self.dpr) * 1000.0;
            style.push_str(&format!(
                " scale({dpr}, {dpr}) perspective(1000px) translateZ({z}px)",
                dpr = self.dpr
            ));
        }
        style
    }

    fn corners_mut(&mut self) -> [&mut Point; 4] {
        [
            &mut self.top_left,
            &mut self.top_right,
            &mut self.bottom_left,
            &mut self.bottom_right,
        ]
    }
}

impl fmt::Display for Distortion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.style())
    }
}

/// Two distortions are equal when they render the same transform string,
/// matching the comparison the CSS surface sees.
impl PartialEq for Distortion {
    fn eq(&self, other: &Self) -> bool {
        self.style() == other.style()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESET: &str = "matrix3d(1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1)";

    fn assert_corners(
        d: &Distortion,
        tl: (f64, f64),
        tr: (f64, f64),
        bl: (f64, f64),
        br: (f64, f64),
    ) {
        let close = |p: Point, (x, y): (f64, f64)| {
            assert!(
                (p.x - x).abs() < 1e-9 && (p.y - y).abs() < 1e-9,
                "corner {:?} != ({x}, {y})",
                p
            );
        };
        close(d.top_left, tl);
        close(d.top_right, tr);
        close(d.bottom_left, bl);
        close(d.bottom_right, br);
    }

    #[test]
    fn test_fresh_distortion_is_identity() {
        let d = Distortion::new(100.0, 100.0);
        assert!(d.is_valid());
        assert_eq!(d.error(), None);
        assert_eq!(*d.matrix(), Matrix3d::IDENTITY);
        assert_eq!(d.style(), RESET);
        assert_eq!(d.offset(), crate::offset::Offset { x: -50.0, y: -50.0 });
    }

    #[test]
    fn test_direct_corner_edit_with_explicit_recompute() {
        let mut d = Distortion::new(100.0, 100.0);
        d.top_left.x -= 10.0;
        d.top_left.y += 10.0;
        d.recompute();
        assert!(d.is_valid());
        assert_eq!(
            d.style(),
            "matrix3d(1.05, -0.05, 0, -0.001, 0.05, 0.95, 0, 0.001, 0, 0, 1, 0, -5, 5, 0, 1)"
        );
    }

    #[test]
    fn test_collapsed_edge_invalidates() {
        let mut d = Distortion::new(100.0, 100.0);
        d.top_left = Point::new(0.0, 0.0);
        d.top_right = Point::new(0.0, 0.0);
        let solved = d.recompute();
        assert!(!solved.valid);
        assert_eq!(solved.error, Some(GeometryError::DegenerateEdge));
        assert_eq!(*d.matrix(), Matrix3d::IDENTITY);
        assert_eq!(d.style(), RESET);
    }

    #[test]
    fn test_concave_quad_falls_back_to_identity() {
        let mut d = Distortion::new(100.0, 100.0);
        d.bottom_right = Point::new(-100.0, -100.0);
        d.recompute();
        assert!(!d.is_valid());
        assert_eq!(d.error(), Some(GeometryError::ConcavePolygon));
        assert_eq!(*d.matrix(), Matrix3d::IDENTITY);
    }

    #[test]
    fn test_translate_moves_all_corners() {
        let mut d = Distortion::new(100.0, 100.0);
        d.translate(10.0, 10.0);
        assert_corners(&d, (10.0, 10.0), (110.0, 10.0), (10.0, 110.0), (110.0, 110.0));
        assert!(d.is_valid());
    }

    #[test]
    fn test_translate_x_moves_one_axis() {
        let mut d = Distortion::new(100.0, 100.0);
        d.translate_x(10.0);
        assert_corners(&d, (10.0, 0.0), (110.0, 0.0), (10.0, 100.0), (110.0, 100.0));
    }

    #[test]
    fn test_translate_y_moves_one_axis() {
        let mut d = Distortion::new(100.0, 100.0);
        d.translate_y(10.0);
        assert_corners(&d, (0.0, 10.0), (100.0, 10.0), (0.0, 110.0), (100.0, 110.0));
    }

    #[test]
    fn test_translate_composes_from_axis_translations() {
        let mut combined = Distortion::new(100.0, 100.0);
        combined.translate(7.0, -3.0);

        let mut split = Distortion::new(100.0, 100.0);
        split.translate_x(7.0).translate_y(-3.0);

        assert_eq!(combined, split);
    }

    #[test]
    fn test_scale_about_centroid() {
        let mut d = Distortion::new(100.0, 100.0);
        d.scale(1.2);
        assert_corners(&d, (-10.0, -10.0), (110.0, -10.0), (-10.0, 110.0), (110.0, 110.0));
    }

    #[test]
    fn test_scale_is_translation_invariant() {
        let mut d = Distortion::new(100.0, 100.0);
        d.translate(40.0, -25.0).scale(1.2);

        let mut reference = Distortion::new(100.0, 100.0);
        reference.scale(1.2).translate(40.0, -25.0);

        assert_eq!(d, reference);
    }

    #[test]
    fn test_force_perspective_top() {
        let mut d = Distortion::new(100.0, 100.0);
        d.force_perspective(Edge::Top, 10.0);
        assert_corners(&d, (-10.0, 0.0), (110.0, 0.0), (0.0, 100.0), (100.0, 100.0));
    }

    #[test]
    fn test_force_perspective_left() {
        let mut d = Distortion::new(100.0, 100.0);
        d.force_perspective(Edge::Left, 10.0);
        assert_corners(&d, (0.0, -10.0), (100.0, 0.0), (0.0, 110.0), (100.0, 100.0));
    }

    #[test]
    fn test_force_perspective_bottom() {
        let mut d = Distortion::new(100.0, 100.0);
        d.force_perspective(Edge::Bottom, 10.0);
        assert_corners(&d, (0.0, 0.0), (100.0, 0.0), (-10.0, 100.0), (110.0, 100.0));
    }

    #[test]
    fn test_force_perspective_right() {
        let mut d = Distortion::new(100.0, 100.0);
        d.force_perspective(Edge::Right, 10.0);
        assert_corners(&d, (0.0, 0.0), (100.0, -10.0), (0.0, 100.0), (100.0, 110.0));
    }

    #[test]
    fn test_invalid_direction_fails_without_mutation() {
        let mut d = Distortion::new(100.0, 100.0);
        let before = d.clone();
        let err = "bad".parse::<Edge>().unwrap_err();
        assert!(matches!(err, DistortError::InvalidDirection(_)));
        // The parse failure happens before any mutator can run.
        d.recompute();
        assert_eq!(d, before);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = Distortion::new(100.0, 100.0);
        original.top_left.x = 10.0;
        original.recompute();

        let mut cloned = original.clone();
        assert_eq!(cloned, original);

        cloned.top_left.x = 100.0;
        cloned.recompute();
        assert_ne!(cloned, original);
        assert_eq!(original.top_left.x, 10.0);
        assert_eq!(cloned.width(), original.width());
        assert_eq!(cloned.offset(), original.offset());
    }

    #[test]
    fn test_equality_tracks_rendered_style() {
        let mut a = Distortion::new(100.0, 100.0);
        let mut b = Distortion::new(100.0, 100.0);
        assert_eq!(a, b);

        b.bottom_right.x += 10.0;
        b.recompute();
        assert_ne!(a, b);

        a.bottom_right.x += 10.0;
        a.recompute();
        assert_eq!(a, b);
    }

    #[test]
    fn test_dpr_fix_appends_compensation_suffix() {
        let mut d = Distortion::new(100.0, 100.0);
        d.dpr_fix = true;
        d.dpr = 3.0;
        assert_eq!(
            d.style(),
            "matrix3d(1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1) \
             scale(3, 3) perspective(1000px) translateZ(-2000px)"
        );
    }

    #[test]
    fn test_dpr_fix_skipped_for_invalid_configuration() {
        let mut d = Distortion::new(100.0, 100.0);
        d.dpr_fix = true;
        d.dpr = 3.0;
        d.top_right = d.top_left;
        d.recompute();
        assert_eq!(d.style(), RESET);
    }

    #[test]
    fn test_set_origin_recomputes() {
        let mut d = Distortion::new(100.0, 100.0);
        d.set_origin(OriginSpec {
            x: "0px".parse().unwrap(),
            y: "0px".parse().unwrap(),
        });
        assert_eq!(d.offset(), crate::offset::Offset { x: 0.0, y: 0.0 });
        // Identity corners still solve to the identity from any origin.
        assert_eq!(*d.matrix(), Matrix3d::IDENTITY);
    }

    #[test]
    fn test_mutators_chain() {
        let mut d = Distortion::new(100.0, 100.0);
        d.translate(5.0, 5.0)
            .scale(2.0)
            .force_perspective(Edge::Top, 10.0);
        assert!(d.is_valid());
    }

    #[test]
    fn test_display_matches_style() {
        let d = Distortion::new(100.0, 100.0);
        assert_eq!(d.to_string(), d.style());
    }
}
