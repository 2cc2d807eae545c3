//! PrimLab scene layer: scene graph, materials, GPU buffer registry, camera,
//! headless renderer, and the parametric model controller with its panel.

pub mod camera;
pub mod controller;
pub mod gpu;
pub mod material;
pub mod panel;
pub mod pipeline;
pub mod renderer;
pub mod scene;

// Re-export main types
pub use camera::Camera;
pub use controller::{
    ModelMaterials, ParametricModelController, DEFAULT_SLOT, LINE_NODE, SURFACE_NODE,
};
pub use gpu::{GeometryHandle, GpuResources, GpuStats};
pub use material::{LineBasicMaterial, Material, MeshStandardMaterial, PointsMaterial, Side};
pub use panel::{Control, ModelBinding, PanelBinding, ParameterPanel, PointsSizeBinding, POINT_SIZE};
pub use pipeline::{
    prepare_lines, prepare_mesh, prepare_points, CameraUniforms, GpuVertex, LineVertex,
    PreparedGeometry, Topology,
};
pub use renderer::{DrawCall, Frame, FrameRecorder, Renderer};
pub use scene::{DirectionalLight, Drawable, Fog, MaterialId, Node, NodeId, NodeKind, Scene};
