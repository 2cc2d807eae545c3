//! Surface formulas, one module per primitive kind.

mod circle;
mod cone;
mod cuboid;
mod cylinder;
mod plane;
mod ring;
mod sphere;
mod torus;

pub use circle::CircleParams;
pub use cone::ConeParams;
pub use cuboid::BoxParams;
pub use cylinder::CylinderParams;
pub use plane::PlaneParams;
pub use ring::RingParams;
pub use sphere::SphereParams;
pub use torus::TorusParams;
