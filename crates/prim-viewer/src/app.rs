use prim_core::{PrimError, Result};
use prim_geometry::ParamValue;
use prim_scene::{
    Camera, FrameRecorder, GpuResources, GpuStats, MaterialId, ModelBinding, ParameterPanel,
    ParametricModelController, PointsSizeBinding, Renderer, Scene,
};
use tracing::{debug, info};

use crate::config::{Tutorial, ViewerConfig};
use crate::tutorials;

/// One running tutorial: scene, GPU registry, camera and the headless renderer.
#[derive(Debug)]
pub struct App {
    pub scene: Scene,
    pub gpu: GpuResources,
    pub camera: Camera,
    pub renderer: FrameRecorder,
    tutorial: Tutorial,
    controller: Option<ParametricModelController>,
    panel: Option<ParameterPanel>,
    points_material: Option<MaterialId>,
    elapsed: f64,
}

impl App {
    pub fn new(config: &ViewerConfig) -> Result<Self> {
        prim_core::traits::Validate::validate(config)?;

        let mut scene = Scene::new();
        let mut gpu = GpuResources::new();
        let setup = tutorials::build(config.tutorial, &mut scene, &mut gpu, config)?;

        let mut app = Self {
            scene,
            gpu,
            camera: setup.camera,
            renderer: FrameRecorder::default(),
            tutorial: config.tutorial,
            controller: setup.controller,
            panel: setup.panel,
            points_material: setup.points_material,
            elapsed: 0.0,
        };
        app.resize(config.width, config.height);
        info!(
            tutorial = ?app.tutorial,
            width = config.width,
            height = config.height,
            "viewer started"
        );
        Ok(app)
    }

    pub fn tutorial(&self) -> Tutorial {
        self.tutorial
    }

    pub fn controller(&self) -> Option<&ParametricModelController> {
        self.controller.as_ref()
    }

    pub fn panel(&self) -> Option<&ParameterPanel> {
        self.panel.as_ref()
    }

    pub fn points_material(&self) -> Option<MaterialId> {
        self.points_material
    }

    /// Seconds since start, as of the last frame.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Viewport changed: keep the projection undistorted and the output sized to match.
    pub fn resize(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.camera.set_aspect(width as f64 / height as f64);
        }
        self.renderer.set_size(width, height);
    }

    /// Animation-loop callback; `time_ms` is the loop timestamp in milliseconds.
    pub fn frame(&mut self, time_ms: f64) -> Result<()> {
        self.update(time_ms * 0.001);
        self.renderer.render(&self.scene, &self.gpu, &self.camera)
    }

    fn update(&mut self, seconds: f64) {
        self.elapsed = seconds;
    }

    /// Apply a panel edit. Geometry edits rebuild the model once; point-size
    /// edits only touch the material.
    pub fn edit(&mut self, name: &str, value: ParamValue) -> Result<ParamValue> {
        let panel = self
            .panel
            .as_mut()
            .ok_or_else(|| {
                PrimError::InvalidOperation(format!("{:?} tutorial has no panel", self.tutorial))
            })?;

        let applied = match (self.controller.as_mut(), self.points_material) {
            (Some(controller), _) => {
                let mut binding = ModelBinding::new(controller, &mut self.scene, &mut self.gpu);
                panel.edit(&mut binding, name, value)?
            }
            (None, Some(material)) => {
                let mut binding = PointsSizeBinding { scene: &mut self.scene, material };
                panel.edit(&mut binding, name, value)?
            }
            (None, None) => return Err(PrimError::InvalidOperation("panel has no binding".into())),
        };
        debug!(name, value = %applied, "edit applied");
        Ok(applied)
    }

    /// Release the model and report final GPU counters.
    pub fn shutdown(mut self) -> Result<GpuStats> {
        if let Some(controller) = self.controller.as_mut() {
            controller.dispose(&mut self.scene, &mut self.gpu)?;
        }
        let stats = self.gpu.stats();
        info!(
            uploads = stats.uploads,
            disposals = stats.disposals,
            live = stats.live,
            "viewer stopped"
        );
        Ok(stats)
    }
}
