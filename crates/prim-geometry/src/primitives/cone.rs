//! Cone along the Y axis: a frustum whose top radius is zero.

use prim_core::Result;
use prim_math::deg_to_rad;
use prim_mesh::TriangleMesh;
use serde::{Deserialize, Serialize};

use super::cylinder::Frustum;
use crate::params::{ParamSpec, ParamValue};
use crate::primitive::{unknown, Primitive};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConeParams {
    pub radius: f64,
    pub height: f64,
    pub radial_segments: u32,
    pub height_segments: u32,
    pub open_ended: bool,
    /// Degrees.
    pub theta_start: f64,
    /// Degrees.
    pub theta_length: f64,
}

impl Default for ConeParams {
    fn default() -> Self {
        Self {
            radius: 0.5,
            height: 1.0,
            radial_segments: 8,
            height_segments: 1,
            open_ended: false,
            theta_start: 0.0,
            theta_length: 360.0,
        }
    }
}

const SCHEMA: &[ParamSpec] = &[
    ParamSpec::length("radius", 0.0, 10.0, Some(0.01)),
    ParamSpec::length("height", 0.0, 10.0, Some(0.01)),
    ParamSpec::count("radialSegments", 1, 100, 1),
    ParamSpec::count("heightSegments", 1, 100, 1),
    ParamSpec::toggle("openEnded"),
    ParamSpec::degrees("thetaStart", 0.0, 360.0, Some(1.0)),
    ParamSpec::degrees("thetaLength", 0.0, 360.0, Some(1.0)),
];

impl Primitive for ConeParams {
    const NAME: &'static str = "cone";

    fn schema() -> &'static [ParamSpec] {
        SCHEMA
    }

    fn get(&self, name: &str) -> Option<ParamValue> {
        Some(match name {
            "radius" => ParamValue::Float(self.radius),
            "height" => ParamValue::Float(self.height),
            "radialSegments" => ParamValue::Int(self.radial_segments),
            "heightSegments" => ParamValue::Int(self.height_segments),
            "openEnded" => ParamValue::Bool(self.open_ended),
            "thetaStart" => ParamValue::Float(self.theta_start),
            "thetaLength" => ParamValue::Float(self.theta_length),
            _ => return None,
        })
    }

    fn set(&mut self, name: &str, value: ParamValue) -> Result<()> {
        match name {
            "radius" => self.radius = value.as_f64(name)?,
            "height" => self.height = value.as_f64(name)?,
            "radialSegments" => self.radial_segments = value.as_u32(name)?,
            "heightSegments" => self.height_segments = value.as_u32(name)?,
            "openEnded" => self.open_ended = value.as_bool(name)?,
            "thetaStart" => self.theta_start = value.as_f64(name)?,
            "thetaLength" => self.theta_length = value.as_f64(name)?,
            _ => return Err(unknown(Self::NAME, name)),
        }
        Ok(())
    }

    fn build(&self) -> TriangleMesh {
        Frustum {
            radius_top: 0.0,
            radius_bottom: self.radius,
            height: self.height,
            radial_segments: self.radial_segments,
            height_segments: self.height_segments,
            open_ended: self.open_ended,
            theta_start: deg_to_rad(self.theta_start),
            theta_length: deg_to_rad(self.theta_length),
        }
        .build()
    }
}
