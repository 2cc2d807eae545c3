/// Grid used to decide when two generated vertices occupy the same position.
///
/// Primitives emit duplicate vertices along seams and between flat faces;
/// snapping coordinates to `1 / precision` lets those copies be matched
/// without comparing floats for exact equality.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Grid steps per model unit.
    pub precision: f64,
}

impl Tolerance {
    /// Four decimal places, enough to merge seam vertices of every primitive.
    pub const POSITION_PRECISION: f64 = 1e4;

    pub fn new(precision: f64) -> Self {
        Self { precision }
    }

    /// Snap a coordinate onto the grid.
    pub fn key(self, v: f64) -> i64 {
        (v * self.precision).round() as i64
    }

    /// Snap a coordinate onto the default grid.
    pub fn quantize(v: f64) -> i64 {
        Self::default().key(v)
    }

    /// Two coordinates land on the same grid cell.
    pub fn coincident(self, a: f64, b: f64) -> bool {
        self.key(a) == self.key(b)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::new(Self::POSITION_PRECISION)
    }
}
