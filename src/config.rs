//! Configuration management for the cornerpin CLI

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::distortion::Distortion;
use crate::geometry::Point;
use crate::offset::OriginSpec;

/// Rectangle dimensions and transform origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RectConfig {
    pub width: f64,
    pub height: f64,
    /// Transform origin, e.g. `x = "10px"` or `y = "75%"`. Empty strings
    /// fall back to the rectangle center.
    #[serde(default)]
    pub origin: OriginSpec,
}

impl Default for RectConfig {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
            origin: OriginSpec::default(),
        }
    }
}

/// Optional corner overrides; unset corners stay at their home positions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CornersConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_left: Option<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_right: Option<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_left: Option<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_right: Option<Point>,
}

/// Display-density compensation settings.
///
/// The original surface read the ratio from the host display; here it is
/// plain configuration input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DprConfig {
    /// Append the scale/perspective/translateZ suffix to the style string.
    pub fix: bool,
    /// Device pixel ratio to compensate for.
    pub ratio: f64,
}

impl Default for DprConfig {
    fn default() -> Self {
        Self {
            fix: false,
            ratio: 1.0,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub rect: RectConfig,

    #[serde(default)]
    pub corners: CornersConfig,

    #[serde(default)]
    pub dpr: DprConfig,
}

impl Config {
    /// Load configuration from a file, or create default if it doesn't exist
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {:?}", path))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config from {:?}", path))?;
            tracing::info!("Loaded configuration from {:?}", path);
            Ok(config)
        } else {
            let config = Config::default();
            config.save(path)?;
            tracing::info!("Created default configuration at {:?}", path);
            Ok(config)
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        tracing::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Build a distortion from this configuration.
    pub fn to_distortion(&self) -> Distortion {
        let mut distortion =
            Distortion::with_origin(self.rect.width, self.rect.height, self.rect.origin);
        distortion.dpr_fix = self.dpr.fix;
        distortion.dpr = self.dpr.ratio;

        if let Some(p) = self.corners.top_left {
            distortion.top_left = p;
        }
        if let Some(p) = self.corners.top_right {
            distortion.top_right = p;
        }
        if let Some(p) = self.corners.bottom_left {
            distortion.bottom_left = p;
        }
        if let Some(p) = self.corners.bottom_right {
            distortion.bottom_right = p;
        }
        distortion.recompute();
        distortion
    }
}
