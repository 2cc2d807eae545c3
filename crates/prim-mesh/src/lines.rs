use prim_core::traits::Validate;
use prim_core::{PrimError, Result};
use prim_math::{Aabb3, Color, Point3};
use serde::{Deserialize, Serialize};

/// Unconnected line segments stored as consecutive position pairs, with
/// optional per-vertex colours.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineSegments {
    pub positions: Vec<Point3>,
    pub colors: Vec<Color>,
}

impl LineSegments {
    pub fn with_capacity(segments: usize) -> Self {
        Self {
            positions: Vec::with_capacity(segments * 2),
            colors: Vec::new(),
        }
    }

    pub fn segment_count(&self) -> usize {
        self.positions.len() / 2
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn push(&mut self, a: Point3, b: Point3) {
        self.positions.push(a);
        self.positions.push(b);
    }

    pub fn push_colored(&mut self, a: Point3, b: Point3, color: Color) {
        self.push(a, b);
        self.colors.push(color);
        self.colors.push(color);
    }

    pub fn segments(&self) -> impl Iterator<Item = (Point3, Point3)> + '_ {
        self.positions.chunks_exact(2).map(|s| (s[0], s[1]))
    }

    pub fn aabb(&self) -> Aabb3 {
        Aabb3::from_points(self.positions.iter().copied())
            .unwrap_or(Aabb3::new(Point3::ZERO, Point3::ZERO))
    }
}

impl Validate for LineSegments {
    fn validate(&self) -> Result<()> {
        if self.positions.len() % 2 != 0 {
            return Err(PrimError::Geometry(format!(
                "{} line vertices do not form whole segments",
                self.positions.len()
            )));
        }
        if !self.colors.is_empty() && self.colors.len() != self.positions.len() {
            return Err(PrimError::Geometry(format!(
                "{} colours for {} line vertices",
                self.colors.len(),
                self.positions.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prim_math::DVec3;

    #[test]
    fn test_push_and_iterate() {
        let mut lines = LineSegments::default();
        lines.push(DVec3::ZERO, DVec3::X);
        lines.push(DVec3::ZERO, DVec3::Y);
        assert_eq!(lines.segment_count(), 2);
        let segs: Vec<_> = lines.segments().collect();
        assert_eq!(segs[1], (DVec3::ZERO, DVec3::Y));
        lines.validate().unwrap();
    }

    #[test]
    fn test_mixed_colours_are_invalid() {
        let mut lines = LineSegments::default();
        lines.push_colored(DVec3::ZERO, DVec3::X, Color::RED);
        lines.push(DVec3::ZERO, DVec3::Y);
        assert!(lines.validate().is_err());
    }
}
