//! Crease and boundary edge extraction.
//!
//! An edge is kept when the two triangles sharing it meet at more than the
//! threshold angle, or when only one triangle uses it. Vertices are matched by
//! quantised position, so primitives that duplicate vertices per face (box
//! sides, seams) still share their edges.

use std::collections::HashMap;

use prim_math::{deg_to_rad, Point3, Vector3};

use crate::{position_key, LineSegments, PositionKey, TriangleMesh};

/// Faces meeting at more than this many degrees get a line between them.
pub const DEFAULT_THRESHOLD_DEGREES: f64 = 1.0;

struct HalfEdge {
    start: Point3,
    end: Point3,
    normal: Vector3,
    /// Cleared once the opposite half has been seen.
    open: bool,
}

/// Project a mesh onto its boundary and crease edges.
pub fn edges(mesh: &TriangleMesh, threshold_degrees: f64) -> LineSegments {
    let threshold_dot = deg_to_rad(threshold_degrees).cos();
    let mut lines = LineSegments::default();

    // Insertion order is kept so the output is deterministic.
    let mut order: Vec<HalfEdge> = Vec::new();
    let mut lookup: HashMap<(PositionKey, PositionKey), usize> = HashMap::new();

    for tri in mesh.triangles() {
        let verts = tri.map(|i| mesh.positions[i as usize]);
        let keys = verts.map(position_key);
        if keys[0] == keys[1] || keys[1] == keys[2] || keys[2] == keys[0] {
            continue;
        }

        let normal = face_normal(verts[0], verts[1], verts[2]);

        for j in 0..3 {
            let next = (j + 1) % 3;
            let forward = (keys[j], keys[next]);
            let reverse = (keys[next], keys[j]);

            match lookup.get(&reverse).copied() {
                Some(slot) if order[slot].open => {
                    if normal.dot(order[slot].normal) <= threshold_dot {
                        lines.push(verts[j], verts[next]);
                    }
                    order[slot].open = false;
                }
                _ => {
                    if !lookup.contains_key(&forward) {
                        lookup.insert(forward, order.len());
                        order.push(HalfEdge {
                            start: verts[j],
                            end: verts[next],
                            normal,
                            open: true,
                        });
                    }
                }
            }
        }
    }

    for edge in order.iter().filter(|e| e.open) {
        lines.push(edge.start, edge.end);
    }

    lines
}

fn face_normal(a: Point3, b: Point3, c: Point3) -> Vector3 {
    (c - b).cross(a - b).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use prim_math::{Point2, DVec3};

    fn quad(z_corner: f64) -> TriangleMesh {
        // Two triangles sharing the diagonal 1-2; lifting corner 3 folds them.
        let mut mesh = TriangleMesh::default();
        for p in [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(1.0, 1.0, z_corner),
        ] {
            mesh.push_vertex(p, Vector3::Z, Point2::ZERO);
        }
        mesh.push_triangle(0, 1, 2);
        mesh.push_triangle(2, 1, 3);
        mesh
    }

    #[test]
    fn test_flat_quad_has_no_diagonal() {
        let lines = edges(&quad(0.0), DEFAULT_THRESHOLD_DEGREES);
        assert_eq!(lines.segment_count(), 4);
    }

    #[test]
    fn test_folded_quad_keeps_diagonal() {
        let lines = edges(&quad(1.0), DEFAULT_THRESHOLD_DEGREES);
        assert_eq!(lines.segment_count(), 5);
    }

    #[test]
    fn test_wide_threshold_hides_fold() {
        let lines = edges(&quad(0.01), 30.0);
        assert_eq!(lines.segment_count(), 4);
    }

    #[test]
    fn test_degenerate_triangle_skipped() {
        let mut mesh = TriangleMesh::default();
        for _ in 0..3 {
            mesh.push_vertex(DVec3::ONE, Vector3::Z, Point2::ZERO);
        }
        mesh.push_triangle(0, 1, 2);
        assert_eq!(edges(&mesh, DEFAULT_THRESHOLD_DEGREES).segment_count(), 0);
    }

    #[test]
    fn test_empty_mesh() {
        let lines = edges(&TriangleMesh::default(), DEFAULT_THRESHOLD_DEGREES);
        assert_eq!(lines.segment_count(), 0);
    }
}
