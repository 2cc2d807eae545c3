//! CPU-side packing of mesh data into GPU vertex/index layouts.

use bytemuck::{Pod, Zeroable};
use prim_math::{Color, DMat4, Point2, Vector3};
use prim_mesh::{LineSegments, TriangleMesh};

/// Primitive assembly mode of an uploaded geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    Triangles,
    Lines,
    Points,
}

/// Surface vertex with f32 data packed for GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Line vertex: position plus colour.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Byte buffers ready for upload.
#[derive(Debug, Clone)]
pub struct PreparedGeometry {
    pub topology: Topology,
    pub vertex_bytes: Vec<u8>,
    pub index_bytes: Vec<u8>,
    pub vertex_count: u32,
    /// Number of indices, or vertices for non-indexed topologies.
    pub element_count: u32,
}

impl PreparedGeometry {
    pub fn byte_len(&self) -> usize {
        self.vertex_bytes.len() + self.index_bytes.len()
    }
}

fn vec3_f32(v: Vector3) -> [f32; 3] {
    v.as_vec3().to_array()
}

/// Pack a triangle mesh. Missing normals default to +Y and missing uvs to zero.
pub fn prepare_mesh(mesh: &TriangleMesh) -> PreparedGeometry {
    let vertices: Vec<GpuVertex> = mesh
        .positions
        .iter()
        .enumerate()
        .map(|(i, &p)| GpuVertex {
            position: vec3_f32(p),
            normal: vec3_f32(mesh.normals.get(i).copied().unwrap_or(Vector3::Y)),
            uv: mesh.uvs.get(i).copied().unwrap_or(Point2::ZERO).as_vec2().to_array(),
        })
        .collect();

    PreparedGeometry {
        topology: Topology::Triangles,
        vertex_bytes: bytemuck::cast_slice(&vertices).to_vec(),
        index_bytes: bytemuck::cast_slice(&mesh.indices).to_vec(),
        vertex_count: vertices.len() as u32,
        element_count: mesh.indices.len() as u32,
    }
}

/// Pack line segments, falling back to `color` where no per-vertex colour exists.
pub fn prepare_lines(lines: &LineSegments, color: Color) -> PreparedGeometry {
    let vertices: Vec<LineVertex> = lines
        .positions
        .iter()
        .enumerate()
        .map(|(i, &p)| LineVertex {
            position: vec3_f32(p),
            color: lines.colors.get(i).copied().unwrap_or(color).to_array(),
        })
        .collect();

    PreparedGeometry {
        topology: Topology::Lines,
        vertex_bytes: bytemuck::cast_slice(&vertices).to_vec(),
        index_bytes: Vec::new(),
        vertex_count: vertices.len() as u32,
        element_count: vertices.len() as u32,
    }
}

/// Pack the vertices of a mesh as a point cloud; triangle indices are ignored.
pub fn prepare_points(mesh: &TriangleMesh) -> PreparedGeometry {
    let positions: Vec<[f32; 3]> = mesh.positions.iter().map(|&p| vec3_f32(p)).collect();
    PreparedGeometry {
        topology: Topology::Points,
        vertex_bytes: bytemuck::cast_slice(&positions).to_vec(),
        index_bytes: Vec::new(),
        vertex_count: positions.len() as u32,
        element_count: positions.len() as u32,
    }
}

/// Uniform buffer for camera matrices.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniforms {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub view_projection: [[f32; 4]; 4],
    pub eye_position: [f32; 4],
}

impl CameraUniforms {
    pub fn from_camera(camera: &crate::camera::Camera) -> Self {
        let to_cols = |m: DMat4| m.as_mat4().to_cols_array_2d();
        Self {
            view: to_cols(camera.view_matrix()),
            projection: to_cols(camera.projection_matrix()),
            view_projection: to_cols(camera.view_projection()),
            eye_position: camera.eye.as_vec3().extend(1.0).to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prim_math::Point3;

    fn create_test_mesh() -> TriangleMesh {
        let mut mesh = TriangleMesh::default();
        mesh.push_vertex(Point3::new(0.0, 0.0, 0.0), Vector3::Z, Point2::new(0.0, 0.0));
        mesh.push_vertex(Point3::new(1.0, 0.0, 0.0), Vector3::Z, Point2::new(1.0, 0.0));
        mesh.push_vertex(Point3::new(0.0, 1.0, 0.0), Vector3::Z, Point2::new(0.0, 1.0));
        mesh.push_triangle(0, 1, 2);
        mesh
    }

    #[test]
    fn test_gpu_vertex_size() {
        // 3 floats (position) + 3 floats (normal) + 2 floats (uv) = 32 bytes
        assert_eq!(std::mem::size_of::<GpuVertex>(), 32);
        assert_eq!(std::mem::size_of::<LineVertex>(), 24);
    }

    #[test]
    fn test_buffer_byte_sizes() {
        let prepared = prepare_mesh(&create_test_mesh());
        assert_eq!(prepared.vertex_bytes.len(), 3 * 32);
        assert_eq!(prepared.index_bytes.len(), 3 * 4);
        assert_eq!(prepared.element_count, 3);
        assert_eq!(prepared.topology, Topology::Triangles);
    }

    #[test]
    fn test_vertex_contents() {
        let prepared = prepare_mesh(&create_test_mesh());
        let vertices: &[GpuVertex] = bytemuck::cast_slice(&prepared.vertex_bytes);
        assert_eq!(vertices[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(vertices[1].normal, [0.0, 0.0, 1.0]);
        assert_eq!(vertices[2].uv, [0.0, 1.0]);
    }

    #[test]
    fn test_mesh_with_missing_data() {
        let mut mesh = create_test_mesh();
        mesh.normals.clear();
        mesh.clear_uvs();
        let prepared = prepare_mesh(&mesh);
        let vertices: &[GpuVertex] = bytemuck::cast_slice(&prepared.vertex_bytes);
        assert_eq!(vertices[0].normal, [0.0, 1.0, 0.0]);
        assert_eq!(vertices[0].uv, [0.0, 0.0]);
    }

    #[test]
    fn test_line_colours() {
        let mut lines = LineSegments::default();
        lines.push(Point3::ZERO, Point3::X);
        let prepared = prepare_lines(&lines, Color::RED);
        let vertices: &[LineVertex] = bytemuck::cast_slice(&prepared.vertex_bytes);
        assert_eq!(vertices.len(), 2);
        assert_eq!(vertices[1].color, [1.0, 0.0, 0.0]);
        assert!(prepared.index_bytes.is_empty());
    }

    #[test]
    fn test_points_ignore_indices() {
        let prepared = prepare_points(&create_test_mesh());
        assert_eq!(prepared.topology, Topology::Points);
        assert_eq!(prepared.element_count, 3);
        assert_eq!(prepared.vertex_bytes.len(), 3 * 12);
    }
}
