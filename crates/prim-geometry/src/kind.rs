//! The closed set of primitive kinds and the tagged parameter record that
//! selects one of them.

use std::fmt;
use std::str::FromStr;

use prim_core::{PrimError, Result};
use prim_mesh::TriangleMesh;
use serde::{Deserialize, Serialize};

use crate::params::{ParamSpec, ParamValue};
use crate::primitive::Primitive;
use crate::primitives::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryKind {
    Plane,
    Box,
    Circle,
    Ring,
    Sphere,
    Cylinder,
    Cone,
    Torus,
}

impl GeometryKind {
    pub const ALL: [GeometryKind; 8] = [
        GeometryKind::Plane,
        GeometryKind::Box,
        GeometryKind::Circle,
        GeometryKind::Ring,
        GeometryKind::Sphere,
        GeometryKind::Cylinder,
        GeometryKind::Cone,
        GeometryKind::Torus,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GeometryKind::Plane => PlaneParams::NAME,
            GeometryKind::Box => BoxParams::NAME,
            GeometryKind::Circle => CircleParams::NAME,
            GeometryKind::Ring => RingParams::NAME,
            GeometryKind::Sphere => SphereParams::NAME,
            GeometryKind::Cylinder => CylinderParams::NAME,
            GeometryKind::Cone => ConeParams::NAME,
            GeometryKind::Torus => TorusParams::NAME,
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeometryKind {
    type Err = PrimError;

    fn from_str(s: &str) -> Result<Self> {
        GeometryKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PrimError::NotFound(format!("geometry kind `{s}`")))
    }
}

/// Parameter record of the active primitive. Serialized with a `kind` tag and
/// angles in degrees, e.g. `{"kind":"sphere","radius":1.0,"thetaLength":180.0}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeometryParams {
    Plane(PlaneParams),
    Box(BoxParams),
    Circle(CircleParams),
    Ring(RingParams),
    Sphere(SphereParams),
    Cylinder(CylinderParams),
    Cone(ConeParams),
    Torus(TorusParams),
}

/// Dispatch one expression over every variant with the record bound to `$p`.
macro_rules! each_kind {
    ($self:expr, $p:ident => $body:expr) => {
        match $self {
            GeometryParams::Plane($p) => $body,
            GeometryParams::Box($p) => $body,
            GeometryParams::Circle($p) => $body,
            GeometryParams::Ring($p) => $body,
            GeometryParams::Sphere($p) => $body,
            GeometryParams::Cylinder($p) => $body,
            GeometryParams::Cone($p) => $body,
            GeometryParams::Torus($p) => $body,
        }
    };
}

fn schema_of<P: Primitive>(_: &P) -> &'static [ParamSpec] {
    P::schema()
}

impl GeometryParams {
    /// Default record for a kind.
    pub fn defaults(kind: GeometryKind) -> Self {
        match kind {
            GeometryKind::Plane => GeometryParams::Plane(PlaneParams::default()),
            GeometryKind::Box => GeometryParams::Box(BoxParams::default()),
            GeometryKind::Circle => GeometryParams::Circle(CircleParams::default()),
            GeometryKind::Ring => GeometryParams::Ring(RingParams::default()),
            GeometryKind::Sphere => GeometryParams::Sphere(SphereParams::default()),
            GeometryKind::Cylinder => GeometryParams::Cylinder(CylinderParams::default()),
            GeometryKind::Cone => GeometryParams::Cone(ConeParams::default()),
            GeometryKind::Torus => GeometryParams::Torus(TorusParams::default()),
        }
    }

    pub fn kind(&self) -> GeometryKind {
        match self {
            GeometryParams::Plane(_) => GeometryKind::Plane,
            GeometryParams::Box(_) => GeometryKind::Box,
            GeometryParams::Circle(_) => GeometryKind::Circle,
            GeometryParams::Ring(_) => GeometryKind::Ring,
            GeometryParams::Sphere(_) => GeometryKind::Sphere,
            GeometryParams::Cylinder(_) => GeometryKind::Cylinder,
            GeometryParams::Cone(_) => GeometryKind::Cone,
            GeometryParams::Torus(_) => GeometryKind::Torus,
        }
    }

    /// Derive the surface for the current values.
    pub fn derive_geometry(&self) -> TriangleMesh {
        each_kind!(self, p => p.build())
    }

    /// Declared fields of the active kind, in panel order.
    pub fn describe_parameters(&self) -> &'static [ParamSpec] {
        each_kind!(self, p => schema_of(p))
    }

    pub fn spec(&self, name: &str) -> Option<&'static ParamSpec> {
        self.describe_parameters().iter().find(|s| s.name == name)
    }

    pub fn get(&self, name: &str) -> Option<ParamValue> {
        each_kind!(self, p => p.get(name))
    }

    /// Store a value as given. Range enforcement belongs to the caller.
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<()> {
        each_kind!(self, p => p.set(name, value))
    }

    /// Every field with its current value.
    pub fn values(&self) -> Vec<(&'static str, ParamValue)> {
        self.describe_parameters()
            .iter()
            .filter_map(|spec| self.get(spec.name).map(|v| (spec.name, v)))
            .collect()
    }

    /// First field whose value lies outside its declared range.
    pub fn out_of_range(&self) -> Option<(&'static ParamSpec, ParamValue)> {
        self.describe_parameters()
            .iter()
            .filter_map(|spec| self.get(spec.name).map(|v| (spec, v)))
            .find(|(spec, v)| !spec.contains(*v))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

impl Default for GeometryParams {
    fn default() -> Self {
        GeometryParams::defaults(GeometryKind::Plane)
    }
}
