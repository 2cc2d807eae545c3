use prim_core::{PrimError, Result};
use prim_mesh::TriangleMesh;

use crate::params::{ParamSpec, ParamValue};

/// One primitive kind: its parameter record, declared schema and surface
/// formula. Angular fields are held in degrees and converted inside `build`.
pub trait Primitive: Default + Clone {
    /// Lower-case kind name used in logs and configuration.
    const NAME: &'static str;

    /// Declared fields, in panel order.
    fn schema() -> &'static [ParamSpec];

    /// Current value of a field, `None` for an unknown name.
    fn get(&self, name: &str) -> Option<ParamValue>;

    /// Store a value without range checks.
    fn set(&mut self, name: &str, value: ParamValue) -> Result<()>;

    /// Derive the surface from the current values.
    fn build(&self) -> TriangleMesh;

    fn spec(name: &str) -> Option<&'static ParamSpec> {
        Self::schema().iter().find(|s| s.name == name)
    }
}

pub(crate) fn unknown(kind: &'static str, name: &str) -> PrimError {
    PrimError::UnknownParameter {
        kind,
        name: name.to_string(),
    }
}

/// Largest segment count any formula tessellates with. Keeps vertex indices
/// well inside `u32` for every kind.
pub const MAX_SEGMENTS: u32 = 4096;

/// Clamp a segment count to `min..=MAX_SEGMENTS`.
pub(crate) fn segments(value: u32, min: u32) -> u32 {
    value.clamp(min, MAX_SEGMENTS)
}

/// Vertex and index capacity of a `cols` by `rows` quad grid.
pub(crate) fn grid_capacity(cols: u32, rows: u32) -> (usize, usize) {
    let (cols, rows) = (cols as usize, rows as usize);
    ((cols + 1) * (rows + 1), cols * rows * 6)
}
