use std::collections::HashSet;

use crate::{position_key, LineSegments, TriangleMesh};

/// Project a mesh onto every distinct triangle edge. An edge and its reverse
/// count once; coincident vertices are matched by position.
pub fn wireframe(mesh: &TriangleMesh) -> LineSegments {
    let mut seen = HashSet::new();
    let mut lines = LineSegments::with_capacity(mesh.indices.len());

    for tri in mesh.triangles() {
        for j in 0..3 {
            let start = mesh.positions[tri[j] as usize];
            let end = mesh.positions[tri[(j + 1) % 3] as usize];
            let (ks, ke) = (position_key(start), position_key(end));
            if seen.contains(&(ke, ks)) || !seen.insert((ks, ke)) {
                continue;
            }
            lines.push(start, end);
        }
    }

    lines
}
