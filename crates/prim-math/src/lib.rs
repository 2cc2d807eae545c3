pub mod aabb;
pub mod angle;
pub mod color;
pub mod transform;

pub use glam::{DVec2, DVec3, DVec4, DMat3, DMat4, DQuat, EulerRot};
pub use aabb::Aabb3;
pub use angle::{deg_to_rad, rad_to_deg};
pub use color::Color;
pub use transform::Transform;

pub type Point2 = DVec2;
pub type Point3 = DVec3;
pub type Vector2 = DVec2;
pub type Vector3 = DVec3;
