//! Column-major 4x4 homogeneous matrix in the CSS `matrix3d` convention

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 4x4 homogeneous transform stored column-major, in the order consumed by
/// CSS `matrix3d(...)` and other 3-D transform APIs.
///
/// Only eight entries ever vary: the solver writes m0, m1, m3, m4, m5, m7,
/// m12 and m13. The z row and column keep their identity values, so this is
/// a planar projective transform embedded in 3-D rather than a general
/// spatial transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix3d(pub [f64; 16]);

impl Matrix3d {
    /// The identity transform.
    pub const IDENTITY: Self = Matrix3d([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);

    /// The 16 entries in column-major order.
    pub fn as_array(&self) -> &[f64; 16] {
        &self.0
    }

    /// Render as a CSS `matrix3d(...)` transform function.
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl Default for Matrix3d {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Matrix3d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "matrix3d(")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, ")")
    }
}
