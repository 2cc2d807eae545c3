//! Parameter-driven model regeneration.
//!
//! The controller owns one [`GeometryParams`] and keeps exactly one derived
//! model (a group holding a surface and a line element) in a named slot under
//! its parent node. Every call to [`ParametricModelController::regenerate`]
//! releases the previous model's GPU geometry before uploading the new one.

use prim_core::{ModelId, PrimError, Result};
use prim_geometry::GeometryParams;
use prim_math::Color;
use prim_mesh::LineStyle;
use tracing::{debug, debug_span};

use crate::gpu::{GeometryHandle, GpuResources};
use crate::material::{LineBasicMaterial, Material, MeshStandardMaterial};
use crate::scene::{Drawable, MaterialId, Node, NodeId, NodeKind, Scene};

/// Reserved name of the model group under the parent node.
pub const DEFAULT_SLOT: &str = "myModel";

pub const SURFACE_NODE: &str = "surface";
pub const LINE_NODE: &str = "line";

/// Materials shared by every generation of the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelMaterials {
    pub surface: MaterialId,
    pub line: MaterialId,
}

impl ModelMaterials {
    /// Register the translucent surface and overlay line materials in `scene`.
    pub fn install(scene: &mut Scene) -> Self {
        Self {
            surface: scene.add_material(Material::Standard(MeshStandardMaterial::model_surface())),
            line: scene.add_material(Material::LineBasic(LineBasicMaterial::model_overlay())),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct LiveModel {
    id: ModelId,
    node: NodeId,
}

#[derive(Debug)]
pub struct ParametricModelController {
    params: GeometryParams,
    parent: NodeId,
    slot: String,
    materials: ModelMaterials,
    line_style: LineStyle,
    current: Option<LiveModel>,
    generations: usize,
    releases: usize,
}

impl ParametricModelController {
    /// Bind `params` to the node `parent`. Nothing is built until the first
    /// [`regenerate`](Self::regenerate).
    pub fn new(params: GeometryParams, parent: NodeId, materials: ModelMaterials) -> Self {
        Self {
            params,
            parent,
            slot: DEFAULT_SLOT.to_string(),
            materials,
            line_style: LineStyle::default(),
            current: None,
            generations: 0,
            releases: 0,
        }
    }

    pub fn with_slot(mut self, slot: impl Into<String>) -> Self {
        self.slot = slot.into();
        self
    }

    pub fn with_line_style(mut self, line_style: LineStyle) -> Self {
        self.line_style = line_style;
        self
    }

    pub fn params(&self) -> &GeometryParams {
        &self.params
    }

    /// Mutable access for edits; call [`regenerate`](Self::regenerate) afterwards.
    pub fn params_mut(&mut self) -> &mut GeometryParams {
        &mut self.params
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn parent(&self) -> NodeId {
        self.parent
    }

    pub fn line_style(&self) -> LineStyle {
        self.line_style
    }

    /// Identity of the model currently in the slot.
    pub fn current_model(&self) -> Option<ModelId> {
        self.current.map(|m| m.id)
    }

    /// Group node of the model currently in the slot.
    pub fn model_node(&self) -> Option<NodeId> {
        self.current.map(|m| m.node)
    }

    /// Number of models built so far.
    pub fn generations(&self) -> usize {
        self.generations
    }

    /// Number of models released so far.
    pub fn releases(&self) -> usize {
        self.releases
    }

    /// Surface and line geometry of the current model.
    pub fn model_geometry(&self, scene: &Scene) -> Option<(GeometryHandle, GeometryHandle)> {
        let group = self.current?.node;
        let geometry = |name| {
            let id = scene.find_child_by_name(group, name)?;
            scene.node(id)?.kind.drawable().map(|d| d.geometry)
        };
        Some((geometry(SURFACE_NODE)?, geometry(LINE_NODE)?))
    }

    /// Rebuild the model from the current parameters and swap it into the slot.
    ///
    /// On error the slot and the live GPU geometry are left as they were.
    pub fn regenerate(&mut self, scene: &mut Scene, gpu: &mut GpuResources) -> Result<()> {
        let kind = self.params.kind();
        let _span = debug_span!("regenerate", %kind, slot = %self.slot).entered();

        if !scene.contains(self.parent) {
            return Err(PrimError::NotFound(format!(
                "parent {:?} of slot '{}'",
                self.parent, self.slot
            )));
        }

        let mesh = self.params.derive_geometry();
        let lines = self.line_style.project(&mesh);

        self.release(scene, gpu)?;

        let line_color = match scene.material(self.materials.line) {
            Some(Material::LineBasic(m)) => m.color,
            _ => Color::WHITE,
        };
        let surface = gpu.upload_mesh(&mesh);
        let line = gpu.upload_lines(&lines, line_color);

        let group = match self.insert(scene, surface, line) {
            Ok(group) => group,
            Err(err) => {
                gpu.dispose(surface)?;
                gpu.dispose(line)?;
                return Err(err);
            }
        };

        let id = ModelId::new();
        self.current = Some(LiveModel { id, node: group });
        self.generations += 1;
        debug!(
            model = %id,
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            segments = lines.segment_count(),
            "model regenerated"
        );
        Ok(())
    }

    /// Release the model in the slot, if any, leaving the slot empty.
    pub fn dispose(&mut self, scene: &mut Scene, gpu: &mut GpuResources) -> Result<()> {
        self.release(scene, gpu)
    }

    /// Attach a new slot group with its two drawables. A partly built group
    /// is removed again.
    fn insert(
        &self,
        scene: &mut Scene,
        surface: GeometryHandle,
        line: GeometryHandle,
    ) -> Result<NodeId> {
        let group = scene.add(self.parent, Node::group(self.slot.as_str()))?;
        let children = [
            Node::new(
                SURFACE_NODE,
                NodeKind::Mesh(Drawable {
                    geometry: surface,
                    material: self.materials.surface,
                }),
            ),
            Node::new(
                LINE_NODE,
                NodeKind::Lines(Drawable {
                    geometry: line,
                    material: self.materials.line,
                }),
            ),
        ];
        for child in children {
            if let Err(err) = scene.add(group, child) {
                scene.remove(group)?;
                return Err(err);
            }
        }
        Ok(group)
    }

    /// Checks the whole slot before touching anything, so a failed release
    /// disposes nothing.
    fn release(&mut self, scene: &mut Scene, gpu: &mut GpuResources) -> Result<()> {
        let Some(group) = scene.find_child_by_name(self.parent, &self.slot) else {
            self.current = None;
            return Ok(());
        };

        let handles: Vec<GeometryHandle> = scene
            .children(group)
            .iter()
            .filter_map(|&c| scene.node(c)?.kind.drawable())
            .map(|d| d.geometry)
            .collect();
        if handles.len() != 2 {
            return Err(PrimError::Scene(format!(
                "slot '{}' holds {} drawables, expected surface and line",
                self.slot,
                handles.len()
            )));
        }
        if let Some(stale) = handles.iter().find(|&&h| !gpu.is_live(h)) {
            return Err(PrimError::Resource(format!(
                "geometry {stale:?} in slot '{}' is not live",
                self.slot
            )));
        }
        for handle in handles {
            gpu.dispose(handle)?;
        }
        scene.remove(group)?;

        self.releases += 1;
        if let Some(previous) = self.current.take() {
            debug!(model = %previous.id, "model released");
        }
        Ok(())
    }
}
