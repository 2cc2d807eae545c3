//! PrimLab geometry: parameter schemas and the surface formula of each
//! primitive kind.

pub mod kind;
pub mod params;
pub mod primitive;
pub mod primitives;

pub use kind::{GeometryKind, GeometryParams};
pub use params::{ParamRange, ParamSpec, ParamUnit, ParamValue};
pub use primitive::{Primitive, MAX_SEGMENTS};
pub use primitives::{
    BoxParams, CircleParams, ConeParams, CylinderParams, PlaneParams, RingParams, SphereParams,
    TorusParams,
};
