//! Viewer configuration, loaded from JSON. Missing fields take their defaults.

use std::fs;
use std::path::Path;

use prim_core::traits::Validate;
use prim_core::{PrimError, Result};
use prim_geometry::GeometryParams;
use prim_mesh::LineStyle;
use serde::{Deserialize, Serialize};

/// Scene set up at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Tutorial {
    /// Parametric model with surface and line overlay
    #[default]
    Geometry,
    /// Box placed with position, rotation and scale
    Transform,
    /// Sphere drawn as point sprites
    Material,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub width: u32,
    pub height: u32,
    pub tutorial: Tutorial,
    /// Initial parameters of the geometry tutorial; angles in degrees.
    pub geometry: GeometryParams,
    pub line_style: LineStyle,
    /// Frames rendered before exit.
    pub frames: u32,
    /// Sprite size of the material tutorial, in pixels.
    pub point_size: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            tutorial: Tutorial::default(),
            geometry: GeometryParams::default(),
            line_style: LineStyle::default(),
            frames: 1,
            point_size: 5.0,
        }
    }
}

impl ViewerConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

impl Validate for ViewerConfig {
    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PrimError::Config(format!(
                "viewport must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.point_size.is_finite() && self.point_size > 0.0) {
            return Err(PrimError::Config(format!("invalid point size {}", self.point_size)));
        }
        if let Some((spec, value)) = self.geometry.out_of_range() {
            return Err(PrimError::Config(format!(
                "{} `{}` = {value} is outside {:?}",
                self.geometry.kind(),
                spec.name,
                spec.range
            )));
        }
        Ok(())
    }
}
