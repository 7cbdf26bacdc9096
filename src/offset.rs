//! Transform-origin specification and resolution
//!
//! The transform origin accepts the same forms as the CSS-facing surface it
//! feeds: an absolute length (`"10px"`), a percentage of the rectangle
//! extent (`"75%"`), or nothing, which falls back to the rectangle center.
//! Resolution turns a spec into a signed number in the same linear unit as
//! width and height.

use crate::error::DistortError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One axis of a transform-origin specification, before resolution.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OffsetSpec {
    /// Center of the rectangle along this axis.
    #[default]
    Center,
    /// Absolute length in the rectangle's linear unit.
    Pixels(f64),
    /// Percentage of the rectangle extent along this axis.
    Percent(f64),
}

impl OffsetSpec {
    /// Resolve against the rectangle extent (width for x, height for y).
    ///
    /// The solver anchors its perspective cross terms on the negated origin,
    /// so the resolved value carries the sign flip.
    pub fn resolve(&self, extent: f64) -> f64 {
        match self {
            OffsetSpec::Center => extent * -0.5,
            OffsetSpec::Pixels(v) => -v,
            OffsetSpec::Percent(v) => -v * extent / 100.0,
        }
    }
}

impl FromStr for OffsetSpec {
    type Err = DistortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(OffsetSpec::Center);
        }
        if let Some(num) = trimmed.strip_suffix('%') {
            return num
                .trim()
                .parse()
                .map(OffsetSpec::Percent)
                .map_err(|_| DistortError::InvalidOffset(s.to_string()));
        }
        if let Some(num) = trimmed.strip_suffix("px") {
            return num
                .trim()
                .parse()
                .map(OffsetSpec::Pixels)
                .map_err(|_| DistortError::InvalidOffset(s.to_string()));
        }
        Err(DistortError::InvalidOffset(s.to_string()))
    }
}

impl fmt::Display for OffsetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OffsetSpec::Center => Ok(()),
            OffsetSpec::Pixels(v) => write!(f, "{v}px"),
            OffsetSpec::Percent(v) => write!(f, "{v}%"),
        }
    }
}

impl TryFrom<String> for OffsetSpec {
    type Error = DistortError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<OffsetSpec> for String {
    fn from(spec: OffsetSpec) -> Self {
        spec.to_string()
    }
}

/// Two-axis transform-origin specification.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OriginSpec {
    #[serde(default)]
    pub x: OffsetSpec,
    #[serde(default)]
    pub y: OffsetSpec,
}

impl OriginSpec {
    /// Resolve both axes into a concrete offset.
    pub fn resolve(&self, width: f64, height: f64) -> Offset {
        Offset {
            x: self.x.resolve(width),
            y: self.y.resolve(height),
        }
    }
}

/// A resolved transform origin, relative to the rectangle's top-left corner
/// and in the same unit as width/height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}
