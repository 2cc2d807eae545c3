use prim_math::{deg_to_rad, Aabb3, DMat4, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D perspective camera with look-at controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub eye: Point3,    // camera position
    pub target: Point3, // look-at target
    pub up: Vector3,    // up vector
    pub fov_y: f64,     // vertical FOV in radians
    pub aspect: f64,    // width/height
    pub near: f64,      // near clip plane
    pub far: f64,       // far clip plane
}

impl Default for Camera {
    /// Eye at (0, 0, 5), looking at origin, 45° FOV, 16:9 aspect.
    fn default() -> Self {
        Self::perspective(45.0, 16.0 / 9.0, 0.1, 100.0).with_eye(Point3::new(0.0, 0.0, 5.0))
    }
}

impl Camera {
    /// Perspective camera at the origin looking down -Z; `fov_degrees` is vertical.
    pub fn perspective(fov_degrees: f64, aspect: f64, near: f64, far: f64) -> Self {
        Self {
            eye: Point3::ZERO,
            target: Point3::NEG_Z,
            up: Vector3::Y,
            fov_y: deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
        }
    }

    /// Move the eye, keeping the viewing direction.
    pub fn with_eye(mut self, eye: Point3) -> Self {
        let direction = self.target - self.eye;
        self.eye = eye;
        self.target = eye + direction;
        self
    }

    pub fn look_at(mut self, target: Point3) -> Self {
        self.target = target;
        self
    }

    /// Update the aspect ratio after a viewport resize. Degenerate sizes are ignored.
    pub fn set_aspect(&mut self, aspect: f64) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// World to camera space; the camera looks down -Z.
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// OpenGL-style NDC (-1 to 1 for Z).
    pub fn projection_matrix(&self) -> DMat4 {
        DMat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> DMat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Fit the camera to view an AABB, keeping the current view direction.
    pub fn fit_to_aabb(&mut self, aabb: &Aabb3) {
        let center = aabb.center();
        let radius = aabb.radius().max(f64::EPSILON);
        let distance = radius / (self.fov_y / 2.0).sin();

        let direction = (self.eye - self.target).try_normalize().unwrap_or(Vector3::Z);
        self.target = center;
        self.eye = center + direction * distance;
        self.near = (distance - radius).max(distance * 0.001);
        self.far = distance + radius * 2.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use prim_math::DVec4;

    #[test]
    fn test_default_camera() {
        let cam = Camera::default();
        assert_eq!(cam.eye, Point3::new(0.0, 0.0, 5.0));
        assert_eq!(cam.target, Point3::new(0.0, 0.0, 4.0));
        assert_abs_diff_eq!(cam.fov_y, std::f64::consts::FRAC_PI_4, epsilon = 1e-12);
    }

    #[test]
    fn test_view_matrix_maps_eye_to_origin() {
        let cam = Camera::perspective(75.0, 1.0, 0.1, 100.0).with_eye(Point3::new(0.0, 0.0, 2.0));
        let p = cam.view_matrix().transform_point3(cam.eye);
        assert_abs_diff_eq!(p, Point3::ZERO, epsilon = 1e-12);
        // origin lies in front of the camera, on -Z
        let o = cam.view_matrix().transform_point3(Point3::ZERO);
        assert_abs_diff_eq!(o, Point3::new(0.0, 0.0, -2.0), epsilon = 1e-12);
    }

    #[test]
    fn test_projection_near_far_planes() {
        let cam = Camera::perspective(60.0, 1.5, 1.0, 10.0);
        let proj = cam.projection_matrix();
        let near = proj * DVec4::new(0.0, 0.0, -1.0, 1.0);
        let far = proj * DVec4::new(0.0, 0.0, -10.0, 1.0);
        assert_abs_diff_eq!(near.z / near.w, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(far.z / far.w, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_set_aspect_ignores_degenerate() {
        let mut cam = Camera::default();
        cam.set_aspect(2.0);
        assert_eq!(cam.aspect, 2.0);
        cam.set_aspect(f64::NAN);
        cam.set_aspect(0.0);
        cam.set_aspect(f64::INFINITY);
        assert_eq!(cam.aspect, 2.0);
    }

    #[test]
    fn test_fit_to_aabb() {
        let mut cam = Camera::default();
        let aabb = Aabb3::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        cam.fit_to_aabb(&aabb);
        assert_abs_diff_eq!(cam.target, Point3::ZERO, epsilon = 1e-12);
        let distance = (cam.eye - cam.target).length();
        assert!(distance > aabb.radius());
        assert!(cam.near > 0.0 && cam.near < cam.far);
    }
}
