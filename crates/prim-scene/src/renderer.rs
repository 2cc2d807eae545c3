//! Rendering seam. A real backend implements [`Renderer`]; [`FrameRecorder`]
//! is the headless one used by the viewer and the tests.

use prim_core::{PrimError, Result};
use prim_math::DMat4;
use tracing::trace;

use crate::camera::Camera;
use crate::gpu::GpuResources;
use crate::pipeline::{CameraUniforms, Topology};
use crate::scene::{MaterialId, NodeId, NodeKind, Scene};

pub trait Renderer {
    /// Resize the drawing surface, in physical pixels.
    fn set_size(&mut self, width: u32, height: u32);

    fn render(&mut self, scene: &Scene, gpu: &GpuResources, camera: &Camera) -> Result<()>;
}

/// One draw submitted for a visible drawable node.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub node: NodeId,
    pub name: String,
    pub topology: Topology,
    pub element_count: u32,
    pub material: MaterialId,
    pub world: DMat4,
}

#[derive(Debug, Clone)]
pub struct Frame {
    pub camera: CameraUniforms,
    pub draws: Vec<DrawCall>,
    pub lights: usize,
}

impl Frame {
    pub fn draws_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a DrawCall> + 'a {
        self.draws.iter().filter(move |d| d.name == name)
    }
}

/// Records each rendered frame instead of rasterising it.
#[derive(Debug, Default)]
pub struct FrameRecorder {
    pub width: u32,
    pub height: u32,
    frames: usize,
    last: Option<Frame>,
}

impl FrameRecorder {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, ..Self::default() }
    }

    pub fn frames_rendered(&self) -> usize {
        self.frames
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.last.as_ref()
    }
}

impl Renderer for FrameRecorder {
    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn render(&mut self, scene: &Scene, gpu: &GpuResources, camera: &Camera) -> Result<()> {
        let mut draws = Vec::new();
        let mut lights = 0;
        let mut missing = None;

        scene.traverse_visible(|id, node, world| {
            if let NodeKind::Light(_) = node.kind {
                lights += 1;
            }
            let Some(drawable) = node.kind.drawable() else { return };
            match (gpu.topology(drawable.geometry), gpu.element_count(drawable.geometry)) {
                (Some(topology), Some(element_count)) => draws.push(DrawCall {
                    node: id,
                    name: node.name.clone(),
                    topology,
                    element_count,
                    material: drawable.material,
                    world,
                }),
                _ => missing = Some(node.name.clone()),
            }
        });

        if let Some(name) = missing {
            return Err(PrimError::Resource(format!("node '{name}' references disposed geometry")));
        }

        trace!(draws = draws.len(), lights, "frame recorded");
        self.frames += 1;
        self.last = Some(Frame { camera: CameraUniforms::from_camera(camera), draws, lights });
        Ok(())
    }
}
