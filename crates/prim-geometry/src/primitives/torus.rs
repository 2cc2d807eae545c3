//! Torus in the XY plane around the Z axis.

use std::f64::consts::TAU;

use prim_core::Result;
use prim_math::{deg_to_rad, Point2, Point3};
use prim_mesh::TriangleMesh;
use serde::{Deserialize, Serialize};

use crate::params::{ParamSpec, ParamValue};
use crate::primitive::{grid_capacity, segments, unknown, Primitive};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TorusParams {
    /// Distance from the centre to the middle of the tube.
    pub radius: f64,
    /// Radius of the tube.
    pub tube: f64,
    pub radial_segments: u32,
    pub tubular_segments: u32,
    /// Sweep around the Z axis, in degrees.
    pub arc: f64,
}

impl Default for TorusParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            tube: 0.3,
            radial_segments: 16,
            tubular_segments: 100,
            arc: 360.0,
        }
    }
}

const SCHEMA: &[ParamSpec] = &[
    ParamSpec::length("radius", 0.0, 2.0, Some(0.01)),
    ParamSpec::length("tube", 0.0, 2.0, Some(0.01)),
    ParamSpec::count("radialSegments", 2, 30, 1),
    ParamSpec::count("tubularSegments", 3, 200, 1),
    ParamSpec::degrees("arc", 0.0, 360.0, None),
];

impl Primitive for TorusParams {
    const NAME: &'static str = "torus";

    fn schema() -> &'static [ParamSpec] {
        SCHEMA
    }

    fn get(&self, name: &str) -> Option<ParamValue> {
        Some(match name {
            "radius" => ParamValue::Float(self.radius),
            "tube" => ParamValue::Float(self.tube),
            "radialSegments" => ParamValue::Int(self.radial_segments),
            "tubularSegments" => ParamValue::Int(self.tubular_segments),
            "arc" => ParamValue::Float(self.arc),
            _ => return None,
        })
    }

    fn set(&mut self, name: &str, value: ParamValue) -> Result<()> {
        match name {
            "radius" => self.radius = value.as_f64(name)?,
            "tube" => self.tube = value.as_f64(name)?,
            "radialSegments" => self.radial_segments = value.as_u32(name)?,
            "tubularSegments" => self.tubular_segments = value.as_u32(name)?,
            "arc" => self.arc = value.as_f64(name)?,
            _ => return Err(unknown(Self::NAME, name)),
        }
        Ok(())
    }

    fn build(&self) -> TriangleMesh {
        let radial = segments(self.radial_segments, 1);
        let tubular = segments(self.tubular_segments, 1);
        let arc = deg_to_rad(self.arc);
        let row = tubular + 1;

        let (vertices, indices) = grid_capacity(tubular, radial);
        let mut mesh = TriangleMesh::with_capacity(vertices, indices);

        for j in 0..=radial {
            let v = j as f64 / radial as f64 * TAU;
            for i in 0..=tubular {
                let u = i as f64 / tubular as f64 * arc;
                let ring = self.radius + self.tube * v.cos();
                let position = Point3::new(ring * u.cos(), ring * u.sin(), self.tube * v.sin());
                let center = Point3::new(self.radius * u.cos(), self.radius * u.sin(), 0.0);
                mesh.push_vertex(
                    position,
                    (position - center).normalize_or_zero(),
                    Point2::new(i as f64 / tubular as f64, j as f64 / radial as f64),
                );
            }
        }

        for j in 1..=radial {
            for i in 1..=tubular {
                let a = row * j + i - 1;
                let b = row * (j - 1) + i - 1;
                let c = row * (j - 1) + i;
                let d = row * j + i;
                mesh.push_triangle(a, b, d);
                mesh.push_triangle(b, c, d);
            }
        }

        mesh
    }
}
