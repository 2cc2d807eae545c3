//! Flat annulus in the XY plane between an inner and an outer radius.

use prim_core::Result;
use prim_math::{deg_to_rad, Point3, Vector3};
use prim_mesh::TriangleMesh;
use serde::{Deserialize, Serialize};

use super::circle::disc_uv;
use crate::params::{ParamSpec, ParamValue};
use crate::primitive::{grid_capacity, segments, unknown, Primitive};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RingParams {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub theta_segments: u32,
    pub phi_segments: u32,
    /// Degrees.
    pub theta_start: f64,
    /// Degrees.
    pub theta_length: f64,
}

impl Default for RingParams {
    fn default() -> Self {
        Self {
            inner_radius: 0.5,
            outer_radius: 1.0,
            theta_segments: 8,
            phi_segments: 8,
            theta_start: 0.0,
            theta_length: 360.0,
        }
    }
}

const SCHEMA: &[ParamSpec] = &[
    ParamSpec::length("innerRadius", 0.1, 2.0, None),
    ParamSpec::length("outerRadius", 0.1, 2.0, None),
    ParamSpec::count("thetaSegments", 1, 32, 1),
    ParamSpec::count("phiSegments", 1, 30, 2),
    ParamSpec::degrees("thetaStart", 0.0, 360.0, None),
    ParamSpec::degrees("thetaLength", 0.0, 360.0, None),
];

impl Primitive for RingParams {
    const NAME: &'static str = "ring";

    fn schema() -> &'static [ParamSpec] {
        SCHEMA
    }

    fn get(&self, name: &str) -> Option<ParamValue> {
        Some(match name {
            "innerRadius" => ParamValue::Float(self.inner_radius),
            "outerRadius" => ParamValue::Float(self.outer_radius),
            "thetaSegments" => ParamValue::Int(self.theta_segments),
            "phiSegments" => ParamValue::Int(self.phi_segments),
            "thetaStart" => ParamValue::Float(self.theta_start),
            "thetaLength" => ParamValue::Float(self.theta_length),
            _ => return None,
        })
    }

    fn set(&mut self, name: &str, value: ParamValue) -> Result<()> {
        match name {
            "innerRadius" => self.inner_radius = value.as_f64(name)?,
            "outerRadius" => self.outer_radius = value.as_f64(name)?,
            "thetaSegments" => self.theta_segments = value.as_u32(name)?,
            "phiSegments" => self.phi_segments = value.as_u32(name)?,
            "thetaStart" => self.theta_start = value.as_f64(name)?,
            "thetaLength" => self.theta_length = value.as_f64(name)?,
            _ => return Err(unknown(Self::NAME, name)),
        }
        Ok(())
    }

    /// An inner radius larger than the outer one is not rejected; the rings
    /// simply run inward and the surface folds over itself.
    fn build(&self) -> TriangleMesh {
        let theta_segments = segments(self.theta_segments, 3);
        let phi_segments = segments(self.phi_segments, 1);
        let theta_start = deg_to_rad(self.theta_start);
        let theta_length = deg_to_rad(self.theta_length);
        let radius_step = (self.outer_radius - self.inner_radius) / phi_segments as f64;

        let (vertices, indices) = grid_capacity(theta_segments, phi_segments);
        let mut mesh = TriangleMesh::with_capacity(vertices, indices);

        for j in 0..=phi_segments {
            let radius = self.inner_radius + j as f64 * radius_step;
            for i in 0..=theta_segments {
                let angle = theta_start + i as f64 / theta_segments as f64 * theta_length;
                let position = Point3::new(radius * angle.cos(), radius * angle.sin(), 0.0);
                mesh.push_vertex(position, Vector3::Z, disc_uv(position, self.outer_radius));
            }
        }

        for j in 0..phi_segments {
            let level = j * (theta_segments + 1);
            for i in 0..theta_segments {
                let segment = level + i;
                let a = segment;
                let b = segment + theta_segments + 1;
                let c = segment + theta_segments + 2;
                let d = segment + 1;
                mesh.push_triangle(a, b, d);
                mesh.push_triangle(b, c, d);
            }
        }

        mesh
    }
}
