//! Axis-aligned box centred on the origin. Each side is its own grid, so
//! vertices along the box edges are duplicated with per-side normals.

use prim_core::Result;
use prim_math::{Point2, Point3, Vector3};
use prim_mesh::TriangleMesh;
use serde::{Deserialize, Serialize};

use crate::params::{ParamSpec, ParamValue};
use crate::primitive::{segments, unknown, Primitive};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoxParams {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub width_segments: u32,
    pub height_segments: u32,
    pub depth_segments: u32,
}

impl Default for BoxParams {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
            width_segments: 1,
            height_segments: 1,
            depth_segments: 1,
        }
    }
}

const SCHEMA: &[ParamSpec] = &[
    ParamSpec::length("width", 0.0, 10.0, Some(0.01)),
    ParamSpec::length("height", 0.0, 10.0, Some(0.01)),
    ParamSpec::length("depth", 0.0, 10.0, Some(0.01)),
    ParamSpec::count("widthSegments", 1, 10, 1),
    ParamSpec::count("heightSegments", 1, 10, 1),
    ParamSpec::count("depthSegments", 1, 10, 1),
];

impl Primitive for BoxParams {
    const NAME: &'static str = "box";

    fn schema() -> &'static [ParamSpec] {
        SCHEMA
    }

    fn get(&self, name: &str) -> Option<ParamValue> {
        Some(match name {
            "width" => ParamValue::Float(self.width),
            "height" => ParamValue::Float(self.height),
            "depth" => ParamValue::Float(self.depth),
            "widthSegments" => ParamValue::Int(self.width_segments),
            "heightSegments" => ParamValue::Int(self.height_segments),
            "depthSegments" => ParamValue::Int(self.depth_segments),
            _ => return None,
        })
    }

    fn set(&mut self, name: &str, value: ParamValue) -> Result<()> {
        match name {
            "width" => self.width = value.as_f64(name)?,
            "height" => self.height = value.as_f64(name)?,
            "depth" => self.depth = value.as_f64(name)?,
            "widthSegments" => self.width_segments = value.as_u32(name)?,
            "heightSegments" => self.height_segments = value.as_u32(name)?,
            "depthSegments" => self.depth_segments = value.as_u32(name)?,
            _ => return Err(unknown(Self::NAME, name)),
        }
        Ok(())
    }

    fn build(&self) -> TriangleMesh {
        let ws = segments(self.width_segments, 1);
        let hs = segments(self.height_segments, 1);
        let ds = segments(self.depth_segments, 1);
        let (w, h, d) = (self.width, self.height, self.depth);

        let mut mesh = TriangleMesh::default();
        // (u, v, w) name which component of the position each grid axis drives.
        build_side(&mut mesh, [2, 1, 0], -1.0, -1.0, d, h, w, ds, hs); // +x
        build_side(&mut mesh, [2, 1, 0], 1.0, -1.0, d, h, -w, ds, hs); // -x
        build_side(&mut mesh, [0, 2, 1], 1.0, 1.0, w, d, h, ws, ds); // +y
        build_side(&mut mesh, [0, 2, 1], 1.0, -1.0, w, d, -h, ws, ds); // -y
        build_side(&mut mesh, [0, 1, 2], 1.0, -1.0, w, h, d, ws, hs); // +z
        build_side(&mut mesh, [0, 1, 2], -1.0, -1.0, w, h, -d, ws, hs); // -z
        mesh
    }
}

#[allow(clippy::too_many_arguments)]
fn build_side(
    mesh: &mut TriangleMesh,
    axes: [usize; 3],
    u_dir: f64,
    v_dir: f64,
    width: f64,
    height: f64,
    depth: f64,
    grid_x: u32,
    grid_y: u32,
) {
    let [u, v, w] = axes;
    let segment_width = width / grid_x as f64;
    let segment_height = height / grid_y as f64;
    let width_half = width / 2.0;
    let height_half = height / 2.0;
    let depth_half = depth / 2.0;
    let grid_x1 = grid_x + 1;
    let grid_y1 = grid_y + 1;

    let offset = mesh.vertex_count() as u32;

    let mut normal = Vector3::ZERO;
    normal[w] = if depth > 0.0 { 1.0 } else { -1.0 };

    for iy in 0..grid_y1 {
        let y = iy as f64 * segment_height - height_half;
        for ix in 0..grid_x1 {
            let x = ix as f64 * segment_width - width_half;
            let mut position = Point3::ZERO;
            position[u] = x * u_dir;
            position[v] = y * v_dir;
            position[w] = depth_half;
            mesh.push_vertex(
                position,
                normal,
                Point2::new(ix as f64 / grid_x as f64, 1.0 - iy as f64 / grid_y as f64),
            );
        }
    }

    for iy in 0..grid_y {
        for ix in 0..grid_x {
            let a = offset + ix + grid_x1 * iy;
            let b = offset + ix + grid_x1 * (iy + 1);
            let c = offset + ix + 1 + grid_x1 * (iy + 1);
            let d = offset + ix + 1 + grid_x1 * iy;
            mesh.push_triangle(a, b, d);
            mesh.push_triangle(b, c, d);
        }
    }
}
