//! UV sphere (or a patch of one) centred on the origin.
//!
//! `phi` sweeps around the Y axis, `theta` runs from the north pole down.
//! Each ring repeats its first vertex at the seam so texture coordinates
//! can wrap.

use std::f64::consts::PI;

use prim_core::Result;
use prim_math::{deg_to_rad, Point2, Point3};
use prim_mesh::TriangleMesh;
use serde::{Deserialize, Serialize};

use crate::params::{ParamSpec, ParamValue};
use crate::primitive::{grid_capacity, segments, unknown, Primitive};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SphereParams {
    pub radius: f64,
    pub width_segments: u32,
    pub height_segments: u32,
    /// Degrees.
    pub phi_start: f64,
    /// Degrees.
    pub phi_length: f64,
    /// Degrees.
    pub theta_start: f64,
    /// Degrees.
    pub theta_length: f64,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            width_segments: 32,
            height_segments: 16,
            phi_start: 0.0,
            phi_length: 360.0,
            theta_start: 0.0,
            theta_length: 180.0,
        }
    }
}

const SCHEMA: &[ParamSpec] = &[
    ParamSpec::length("radius", 0.5, 2.0, Some(0.01)),
    ParamSpec::count("widthSegments", 3, 64, 1),
    ParamSpec::count("heightSegments", 2, 32, 1),
    ParamSpec::degrees("phiStart", 0.0, 360.0, None),
    ParamSpec::degrees("phiLength", 0.0, 360.0, None),
    ParamSpec::degrees("thetaStart", 0.0, 180.0, None),
    ParamSpec::degrees("thetaLength", 0.0, 180.0, None),
];

impl Primitive for SphereParams {
    const NAME: &'static str = "sphere";

    fn schema() -> &'static [ParamSpec] {
        SCHEMA
    }

    fn get(&self, name: &str) -> Option<ParamValue> {
        Some(match name {
            "radius" => ParamValue::Float(self.radius),
            "widthSegments" => ParamValue::Int(self.width_segments),
            "heightSegments" => ParamValue::Int(self.height_segments),
            "phiStart" => ParamValue::Float(self.phi_start),
            "phiLength" => ParamValue::Float(self.phi_length),
            "thetaStart" => ParamValue::Float(self.theta_start),
            "thetaLength" => ParamValue::Float(self.theta_length),
            _ => return None,
        })
    }

    fn set(&mut self, name: &str, value: ParamValue) -> Result<()> {
        match name {
            "radius" => self.radius = value.as_f64(name)?,
            "widthSegments" => self.width_segments = value.as_u32(name)?,
            "heightSegments" => self.height_segments = value.as_u32(name)?,
            "phiStart" => self.phi_start = value.as_f64(name)?,
            "phiLength" => self.phi_length = value.as_f64(name)?,
            "thetaStart" => self.theta_start = value.as_f64(name)?,
            "thetaLength" => self.theta_length = value.as_f64(name)?,
            _ => return Err(unknown(Self::NAME, name)),
        }
        Ok(())
    }

    fn build(&self) -> TriangleMesh {
        let width_segments = segments(self.width_segments, 3);
        let height_segments = segments(self.height_segments, 2);
        let phi_start = deg_to_rad(self.phi_start);
        let phi_length = deg_to_rad(self.phi_length);
        let theta_start = deg_to_rad(self.theta_start);
        let theta_length = deg_to_rad(self.theta_length);
        let theta_end = (theta_start + theta_length).min(PI);
        let radius = self.radius;

        let row = width_segments + 1;
        let (vertices, indices) = grid_capacity(width_segments, height_segments);
        let mut mesh = TriangleMesh::with_capacity(vertices, indices);

        for iy in 0..=height_segments {
            let v = iy as f64 / height_segments as f64;

            // Pole vertices sit between their neighbours in texture space.
            let u_offset = if iy == 0 && theta_start == 0.0 {
                0.5 / width_segments as f64
            } else if iy == height_segments && theta_end == PI {
                -0.5 / width_segments as f64
            } else {
                0.0
            };

            let theta = theta_start + v * theta_length;
            for ix in 0..=width_segments {
                let u = ix as f64 / width_segments as f64;
                let phi = phi_start + u * phi_length;
                let position = Point3::new(
                    -radius * phi.cos() * theta.sin(),
                    radius * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                );
                mesh.push_vertex(
                    position,
                    position.normalize_or_zero(),
                    Point2::new(u + u_offset, 1.0 - v),
                );
            }
        }

        for iy in 0..height_segments {
            for ix in 0..width_segments {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;
                // Skip the zero-area half of each quad that touches a pole.
                if iy != 0 || theta_start > 0.0 {
                    mesh.push_triangle(a, b, d);
                }
                if iy != height_segments - 1 || theta_end < PI {
                    mesh.push_triangle(b, c, d);
                }
            }
        }

        mesh
    }
}
