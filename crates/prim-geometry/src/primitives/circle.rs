//! Flat disc (or sector) in the XY plane: one centre vertex and a rim.

use prim_core::Result;
use prim_math::{deg_to_rad, Point2, Point3, Vector3};
use prim_mesh::TriangleMesh;
use serde::{Deserialize, Serialize};

use crate::params::{ParamSpec, ParamValue};
use crate::primitive::{segments, unknown, Primitive};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CircleParams {
    pub radius: f64,
    pub segments: u32,
    /// Start angle of the first rim vertex, in degrees.
    pub theta_start: f64,
    /// Central angle of the sector, in degrees.
    pub theta_length: f64,
}

impl Default for CircleParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            segments: 32,
            theta_start: 0.0,
            theta_length: 360.0,
        }
    }
}

const SCHEMA: &[ParamSpec] = &[
    ParamSpec::length("radius", 0.0, 10.0, Some(0.01)),
    ParamSpec::count("segments", 1, 100, 1),
    ParamSpec::degrees("thetaStart", 0.0, 360.0, Some(1.0)),
    ParamSpec::degrees("thetaLength", 0.0, 360.0, Some(1.0)),
];

impl Primitive for CircleParams {
    const NAME: &'static str = "circle";

    fn schema() -> &'static [ParamSpec] {
        SCHEMA
    }

    fn get(&self, name: &str) -> Option<ParamValue> {
        Some(match name {
            "radius" => ParamValue::Float(self.radius),
            "segments" => ParamValue::Int(self.segments),
            "thetaStart" => ParamValue::Float(self.theta_start),
            "thetaLength" => ParamValue::Float(self.theta_length),
            _ => return None,
        })
    }

    fn set(&mut self, name: &str, value: ParamValue) -> Result<()> {
        match name {
            "radius" => self.radius = value.as_f64(name)?,
            "segments" => self.segments = value.as_u32(name)?,
            "thetaStart" => self.theta_start = value.as_f64(name)?,
            "thetaLength" => self.theta_length = value.as_f64(name)?,
            _ => return Err(unknown(Self::NAME, name)),
        }
        Ok(())
    }

    fn build(&self) -> TriangleMesh {
        let segments = segments(self.segments, 3);
        let theta_start = deg_to_rad(self.theta_start);
        let theta_length = deg_to_rad(self.theta_length);
        let radius = self.radius;

        let mut mesh = TriangleMesh::with_capacity(segments as usize + 2, segments as usize * 3);
        mesh.push_vertex(Point3::ZERO, Vector3::Z, Point2::new(0.5, 0.5));

        for s in 0..=segments {
            let angle = theta_start + s as f64 / segments as f64 * theta_length;
            let position = Point3::new(radius * angle.cos(), radius * angle.sin(), 0.0);
            mesh.push_vertex(position, Vector3::Z, disc_uv(position, radius));
        }

        for i in 1..=segments {
            mesh.push_triangle(i, i + 1, 0);
        }

        mesh
    }
}

/// Map a point inside a disc of `radius` onto the unit texture square.
pub(crate) fn disc_uv(position: Point3, radius: f64) -> Point2 {
    if radius > 0.0 {
        Point2::new((position.x / radius + 1.0) / 2.0, (position.y / radius + 1.0) / 2.0)
    } else {
        Point2::new(0.5, 0.5)
    }
}
