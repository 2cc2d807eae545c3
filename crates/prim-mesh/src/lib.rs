//! PrimLab mesh data: the derived vertex/index buffers of a primitive and the
//! line projections drawn on top of it.

pub mod edges;
pub mod helpers;
pub mod lines;
pub mod triangle_mesh;
pub mod wireframe;

pub use edges::{edges, DEFAULT_THRESHOLD_DEGREES};
pub use helpers::{axes_helper, grid_helper};
pub use lines::LineSegments;
pub use triangle_mesh::TriangleMesh;
pub use wireframe::wireframe;

use serde::{Deserialize, Serialize};

/// Which projection of a surface becomes its line overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    /// Boundary and crease edges only; flat faces show no diagonals.
    #[default]
    Edges,
    /// Every triangle edge.
    Wireframe,
}

impl LineStyle {
    pub fn project(self, mesh: &TriangleMesh) -> LineSegments {
        match self {
            LineStyle::Edges => edges(mesh, DEFAULT_THRESHOLD_DEGREES),
            LineStyle::Wireframe => wireframe(mesh),
        }
    }
}

/// Position key used to match coincident vertices that were emitted separately.
pub(crate) type PositionKey = (i64, i64, i64);

pub(crate) fn position_key(p: prim_math::Point3) -> PositionKey {
    use prim_core::Tolerance;
    (
        Tolerance::quantize(p.x),
        Tolerance::quantize(p.y),
        Tolerance::quantize(p.z),
    )
}
