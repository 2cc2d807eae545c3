//! Reference geometry drawn alongside a model: world axes and a floor grid.

use prim_math::{Color, Point3};

use crate::LineSegments;

/// Three segments from the origin along +X (red), +Y (green) and +Z (blue).
pub fn axes_helper(size: f64) -> LineSegments {
    let mut lines = LineSegments::with_capacity(3);
    lines.push_colored(Point3::ZERO, Point3::new(size, 0.0, 0.0), Color::RED);
    lines.push_colored(Point3::ZERO, Point3::new(0.0, size, 0.0), Color::GREEN);
    lines.push_colored(Point3::ZERO, Point3::new(0.0, 0.0, size), Color::BLUE);
    lines
}

/// Square grid on the XZ plane, `size` wide with `divisions` cells per side.
/// The two centre lines use `center_color`, the rest `grid_color`.
pub fn grid_helper(
    size: f64,
    divisions: u32,
    center_color: Color,
    grid_color: Color,
) -> LineSegments {
    let divisions = divisions.max(1);
    let center = divisions / 2;
    let step = size / divisions as f64;
    let half = size / 2.0;

    let mut lines = LineSegments::with_capacity(2 * (divisions as usize + 1));
    for i in 0..=divisions {
        let k = -half + i as f64 * step;
        let color = if i == center { center_color } else { grid_color };
        lines.push_colored(Point3::new(-half, 0.0, k), Point3::new(half, 0.0, k), color);
        lines.push_colored(Point3::new(k, 0.0, -half), Point3::new(k, 0.0, half), color);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use prim_core::traits::Validate;

    #[test]
    fn test_axes() {
        let axes = axes_helper(10.0);
        assert_eq!(axes.segment_count(), 3);
        assert_eq!(axes.colors[0], Color::RED);
        assert_eq!(axes.positions[5], Point3::new(0.0, 0.0, 10.0));
        axes.validate().unwrap();
    }

    #[test]
    fn test_grid() {
        let grid = grid_helper(5.0, 20, Color::WHITE, Color::from_hex(0x444444));
        assert_eq!(grid.segment_count(), 42);
        let aabb = grid.aabb();
        assert_eq!(aabb.min, Point3::new(-2.5, 0.0, -2.5));
        assert_eq!(aabb.max, Point3::new(2.5, 0.0, 2.5));
        let centre_lines = grid.colors.iter().filter(|&&c| c == Color::WHITE).count();
        assert_eq!(centre_lines, 4);
        grid.validate().unwrap();
    }
}
