//! Truncated cone along the Y axis with optional end caps. The cone kind is
//! the same surface with a zero top radius.

use prim_core::Result;
use prim_math::{deg_to_rad, Point2, Point3, Vector3};
use prim_mesh::TriangleMesh;
use serde::{Deserialize, Serialize};

use crate::params::{ParamSpec, ParamValue};
use crate::primitive::{segments, unknown, Primitive};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CylinderParams {
    pub radius_top: f64,
    pub radius_bottom: f64,
    pub height: f64,
    pub radial_segments: u32,
    pub height_segments: u32,
    pub open_ended: bool,
    /// Degrees.
    pub theta_start: f64,
    /// Degrees.
    pub theta_length: f64,
}

impl Default for CylinderParams {
    fn default() -> Self {
        Self {
            radius_top: 0.5,
            radius_bottom: 0.5,
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
    ParamSpec::length("radiusTop", 0.0, 10.0, Some(0.01)),
    ParamSpec::length("radiusBottom", 0.0, 10.0, Some(0.01)),
    ParamSpec::length("height", 0.0, 10.0, Some(0.01)),
    ParamSpec::count("radialSegments", 1, 100, 1),
    ParamSpec::count("heightSegments", 1, 100, 1),
    ParamSpec::toggle("openEnded"),
    ParamSpec::degrees("thetaStart", 0.0, 360.0, Some(1.0)),
    ParamSpec::degrees("thetaLength", 0.0, 360.0, Some(1.0)),
];

impl Primitive for CylinderParams {
    const NAME: &'static str = "cylinder";

    fn schema() -> &'static [ParamSpec] {
        SCHEMA
    }

    fn get(&self, name: &str) -> Option<ParamValue> {
        Some(match name {
            "radiusTop" => ParamValue::Float(self.radius_top),
            "radiusBottom" => ParamValue::Float(self.radius_bottom),
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
            "radiusTop" => self.radius_top = value.as_f64(name)?,
            "radiusBottom" => self.radius_bottom = value.as_f64(name)?,
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
            radius_top: self.radius_top,
            radius_bottom: self.radius_bottom,
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

/// Resolved frustum inputs, angles in radians.
pub(crate) struct Frustum {
    pub radius_top: f64,
    pub radius_bottom: f64,
    pub height: f64,
    pub radial_segments: u32,
    pub height_segments: u32,
    pub open_ended: bool,
    pub theta_start: f64,
    pub theta_length: f64,
}

impl Frustum {
    pub fn build(&self) -> TriangleMesh {
        let radial = segments(self.radial_segments, 1);
        let rows = segments(self.height_segments, 1);
        let mut mesh = TriangleMesh::default();

        self.torso(&mut mesh, radial, rows);
        if !self.open_ended {
            if self.radius_top > 0.0 {
                self.cap(&mut mesh, radial, true);
            }
            if self.radius_bottom > 0.0 {
                self.cap(&mut mesh, radial, false);
            }
        }
        mesh
    }

    fn angle(&self, x: u32, radial: u32) -> f64 {
        x as f64 / radial as f64 * self.theta_length + self.theta_start
    }

    fn torso(&self, mesh: &mut TriangleMesh, radial: u32, rows: u32) {
        let half_height = self.height / 2.0;
        let slope = (self.radius_bottom - self.radius_top) / self.height;
        let row_len = radial + 1;
        let offset = mesh.vertex_count() as u32;

        for y in 0..=rows {
            let v = y as f64 / rows as f64;
            let radius = v * (self.radius_bottom - self.radius_top) + self.radius_top;
            for x in 0..=radial {
                let u = x as f64 / radial as f64;
                let (sin, cos) = self.angle(x, radial).sin_cos();
                mesh.push_vertex(
                    Point3::new(radius * sin, -v * self.height + half_height, radius * cos),
                    Vector3::new(sin, slope, cos).normalize_or_zero(),
                    Point2::new(u, 1.0 - v),
                );
            }
        }

        for x in 0..radial {
            for y in 0..rows {
                let a = offset + y * row_len + x;
                let b = offset + (y + 1) * row_len + x;
                let c = offset + (y + 1) * row_len + x + 1;
                let d = offset + y * row_len + x + 1;
                // A zero radius collapses the row into a point; skip the sliver.
                if self.radius_top > 0.0 || y != 0 {
                    mesh.push_triangle(a, b, d);
                }
                if self.radius_bottom > 0.0 || y != rows - 1 {
                    mesh.push_triangle(b, c, d);
                }
            }
        }
    }

    fn cap(&self, mesh: &mut TriangleMesh, radial: u32, top: bool) {
        let radius = if top { self.radius_top } else { self.radius_bottom };
        let sign = if top { 1.0 } else { -1.0 };
        let y = self.height / 2.0 * sign;
        let normal = Vector3::new(0.0, sign, 0.0);

        // One centre vertex per segment so each wedge gets its own uv.
        let center_start = mesh.vertex_count() as u32;
        for _ in 0..radial {
            mesh.push_vertex(Point3::new(0.0, y, 0.0), normal, Point2::new(0.5, 0.5));
        }

        let rim_start = mesh.vertex_count() as u32;
        for x in 0..=radial {
            let (sin, cos) = self.angle(x, radial).sin_cos();
            mesh.push_vertex(
                Point3::new(radius * sin, y, radius * cos),
                normal,
                Point2::new(cos * 0.5 + 0.5, sin * 0.5 * sign + 0.5),
            );
        }

        for x in 0..radial {
            let c = center_start + x;
            let i = rim_start + x;
            if top {
                mesh.push_triangle(i, i + 1, c);
            } else {
                mesh.push_triangle(i + 1, i, c);
            }
        }
    }
}
