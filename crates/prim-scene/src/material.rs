use std::path::PathBuf;

use prim_math::Color;
use serde::{Deserialize, Serialize};

/// Which triangle faces are rasterised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    Front,
    Back,
    Double,
}

/// Lit surface material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshStandardMaterial {
    pub color: Color,
    pub flat_shading: bool,
    pub side: Side,
    pub transparent: bool,
    pub opacity: f32,
}

impl Default for MeshStandardMaterial {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            flat_shading: false,
            side: Side::Front,
            transparent: false,
            opacity: 1.0,
        }
    }
}

impl MeshStandardMaterial {
    /// Translucent flat-shaded blue used under a line overlay.
    pub fn model_surface() -> Self {
        Self {
            color: Color::from_hex(0x156289),
            flat_shading: true,
            side: Side::Double,
            transparent: true,
            opacity: 0.75,
        }
    }
}

/// Unlit line material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineBasicMaterial {
    pub color: Color,
    /// Use per-vertex colours when the geometry carries them.
    pub vertex_colors: bool,
    pub transparent: bool,
    pub opacity: f32,
}

impl Default for LineBasicMaterial {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            vertex_colors: false,
            transparent: false,
            opacity: 1.0,
        }
    }
}

impl LineBasicMaterial {
    pub fn model_overlay() -> Self {
        Self {
            color: Color::WHITE,
            vertex_colors: false,
            transparent: true,
            opacity: 0.8,
        }
    }

    pub fn vertex_colored() -> Self {
        Self {
            vertex_colors: true,
            ..Self::default()
        }
    }
}

/// Screen-space point sprites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsMaterial {
    pub color: Color,
    /// Sprite size, in pixels unless `size_attenuation` is set.
    pub size: f64,
    pub size_attenuation: bool,
    /// Sprite texture.
    pub map: Option<PathBuf>,
    /// Texels with alpha at or below this are discarded.
    pub alpha_test: f32,
}

impl Default for PointsMaterial {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            size: 1.0,
            size_attenuation: true,
            map: None,
            alpha_test: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Material {
    Standard(MeshStandardMaterial),
    LineBasic(LineBasicMaterial),
    Points(PointsMaterial),
}

impl Material {
    pub fn opacity(&self) -> f32 {
        match self {
            Material::Standard(m) => m.opacity,
            Material::LineBasic(m) => m.opacity,
            Material::Points(_) => 1.0,
        }
    }

    pub fn as_points_mut(&mut self) -> Option<&mut PointsMaterial> {
        match self {
            Material::Points(m) => Some(m),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_materials() {
        let surface = MeshStandardMaterial::model_surface();
        assert_eq!(surface.color.to_hex(), 0x156289);
        assert_eq!(surface.side, Side::Double);
        assert!(surface.transparent);
        assert_eq!(Material::LineBasic(LineBasicMaterial::model_overlay()).opacity(), 0.8);
    }

    #[test]
    fn test_points_access() {
        let mut m = Material::Points(PointsMaterial::default());
        m.as_points_mut().unwrap().size = 5.0;
        assert!(Material::Standard(MeshStandardMaterial::default()).as_points_mut().is_none());
        assert_eq!(m, Material::Points(PointsMaterial { size: 5.0, ..PointsMaterial::default() }));
    }
}
