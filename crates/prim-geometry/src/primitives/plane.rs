//! Flat rectangle in the XY plane facing +Z.

use prim_core::Result;
use prim_math::{Point2, Point3, Vector3};
use prim_mesh::TriangleMesh;
use serde::{Deserialize, Serialize};

use crate::params::{ParamSpec, ParamValue};
use crate::primitive::{grid_capacity, segments, unknown, Primitive};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaneParams {
    pub width: f64,
    pub height: f64,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for PlaneParams {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            width_segments: 1,
            height_segments: 1,
        }
    }
}

const SCHEMA: &[ParamSpec] = &[
    ParamSpec::length("width", 1.0, 30.0, None),
    ParamSpec::length("height", 1.0, 30.0, None),
    ParamSpec::count("widthSegments", 1, 30, 1),
    ParamSpec::count("heightSegments", 1, 30, 1),
];

impl Primitive for PlaneParams {
    const NAME: &'static str = "plane";

    fn schema() -> &'static [ParamSpec] {
        SCHEMA
    }

    fn get(&self, name: &str) -> Option<ParamValue> {
        Some(match name {
            "width" => ParamValue::Float(self.width),
            "height" => ParamValue::Float(self.height),
            "widthSegments" => ParamValue::Int(self.width_segments),
            "heightSegments" => ParamValue::Int(self.height_segments),
            _ => return None,
        })
    }

    fn set(&mut self, name: &str, value: ParamValue) -> Result<()> {
        match name {
            "width" => self.width = value.as_f64(name)?,
            "height" => self.height = value.as_f64(name)?,
            "widthSegments" => self.width_segments = value.as_u32(name)?,
            "heightSegments" => self.height_segments = value.as_u32(name)?,
            _ => return Err(unknown(Self::NAME, name)),
        }
        Ok(())
    }

    fn build(&self) -> TriangleMesh {
        build_plane(self.width, self.height, self.width_segments, self.height_segments)
    }
}

fn build_plane(width: f64, height: f64, width_segments: u32, height_segments: u32) -> TriangleMesh {
    let grid_x = segments(width_segments, 1);
    let grid_y = segments(height_segments, 1);
    let grid_x1 = grid_x + 1;
    let grid_y1 = grid_y + 1;

    let segment_width = width / grid_x as f64;
    let segment_height = height / grid_y as f64;
    let width_half = width / 2.0;
    let height_half = height / 2.0;

    let (vertices, indices) = grid_capacity(grid_x, grid_y);
    let mut mesh = TriangleMesh::with_capacity(vertices, indices);

    for iy in 0..grid_y1 {
        let y = iy as f64 * segment_height - height_half;
        for ix in 0..grid_x1 {
            let x = ix as f64 * segment_width - width_half;
            mesh.push_vertex(
                Point3::new(x, -y, 0.0),
                Vector3::Z,
                Point2::new(ix as f64 / grid_x as f64, 1.0 - iy as f64 / grid_y as f64),
            );
        }
    }

    for iy in 0..grid_y {
        for ix in 0..grid_x {
            let a = ix + grid_x1 * iy;
            let b = ix + grid_x1 * (iy + 1);
            let c = ix + 1 + grid_x1 * (iy + 1);
            let d = ix + 1 + grid_x1 * iy;
            mesh.push_triangle(a, b, d);
            mesh.push_triangle(b, c, d);
        }
    }

    mesh
}
