//! Corner-pin distortion solver for CSS `matrix3d` transforms.
//!
//! Maps an originally rectangular region onto four displaced corner points
//! by solving the planar projective transform they induce, validates that
//! the target quadrilateral is usable (no collapsed edges, no concavity),
//! and renders the result in the column-major 16-value layout consumed by
//! CSS and other 3-D transform APIs.
//!
//! ```
//! use cornerpin::Distortion;
//!
//! let mut distortion = Distortion::new(100.0, 100.0);
//! distortion.top_left.x -= 10.0;
//! distortion.top_left.y += 10.0;
//! distortion.recompute();
//!
//! assert!(distortion.is_valid());
//! assert_eq!(
//!     distortion.style(),
//!     "matrix3d(1.05, -0.05, 0, -0.001, 0.05, 0.95, 0, 0.001, 0, 0, 1, 0, -5, 5, 0, 1)"
//! );
//! ```

pub mod config;
pub mod distortion;
pub mod error;
pub mod geometry;
pub mod matrix;
pub mod offset;
pub mod solver;

pub use config::Config;
pub use distortion::{Distortion, Edge, Solved};
pub use error::{DistortError, GeometryError};
pub use geometry::Point;
pub use matrix::Matrix3d;
pub use offset::{Offset, OffsetSpec, OriginSpec};
