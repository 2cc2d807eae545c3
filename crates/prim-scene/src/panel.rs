//! Live parameter panel: one control per declared field, each edit clamped to
//! its range, written through a [`PanelBinding`] and announced exactly once.

use prim_core::{PrimError, Result};
use prim_geometry::{ParamSpec, ParamValue};
use tracing::debug;

use crate::controller::ParametricModelController;
use crate::gpu::GpuResources;
use crate::material::Material;
use crate::scene::{MaterialId, Scene};

/// Size control of a points material, in pixels.
pub const POINT_SIZE: ParamSpec = ParamSpec::pixels("size", 0.1, 10.0, Some(0.01));

/// Where panel edits land.
pub trait PanelBinding {
    fn read(&self, name: &str) -> Option<ParamValue>;

    fn write(&mut self, name: &str, value: ParamValue) -> Result<()>;

    /// Called once after every settled edit.
    fn changed(&mut self) -> Result<()>;
}

/// A labelled control and the value it currently shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Control {
    pub spec: ParamSpec,
    pub value: ParamValue,
}

#[derive(Debug, Clone)]
pub struct ParameterPanel {
    title: String,
    controls: Vec<Control>,
    edits: usize,
}

impl ParameterPanel {
    /// One control per field of `schema`, initialised from `binding`.
    pub fn new(
        title: impl Into<String>,
        schema: &[ParamSpec],
        binding: &impl PanelBinding,
    ) -> Result<Self> {
        let controls = schema
            .iter()
            .map(|&spec| {
                let value = binding
                    .read(spec.name)
                    .ok_or_else(|| PrimError::NotFound(format!("bound field '{}'", spec.name)))?;
                Ok(Control { spec, value })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { title: title.into(), controls, edits: 0 })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn control(&self, name: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.spec.name == name)
    }

    /// Number of settled edits.
    pub fn edits(&self) -> usize {
        self.edits
    }

    /// Apply an edit: clamp to the control's range, write it, then fire the
    /// change callback once. Returns the value actually stored.
    pub fn edit(
        &mut self,
        binding: &mut impl PanelBinding,
        name: &str,
        value: ParamValue,
    ) -> Result<ParamValue> {
        let control = self
            .controls
            .iter_mut()
            .find(|c| c.spec.name == name)
            .ok_or_else(|| PrimError::NotFound(format!("panel control '{name}'")))?;
        let clamped = control.spec.clamp(value)?;
        binding.write(name, clamped)?;
        control.value = clamped;
        self.edits += 1;
        debug!(panel = %self.title, control = name, value = %clamped, "panel edit");
        binding.changed()?;
        Ok(clamped)
    }

    /// Parse `text` and apply it as an edit.
    pub fn edit_str(
        &mut self,
        binding: &mut impl PanelBinding,
        name: &str,
        text: &str,
    ) -> Result<ParamValue> {
        let value = ParamValue::parse(text).ok_or_else(|| PrimError::ParameterType {
            name: name.to_string(),
            expected: "a number or boolean",
        })?;
        self.edit(binding, name, value)
    }
}

/// Binds a panel to a controller's parameters; every change regenerates the model.
pub struct ModelBinding<'a> {
    pub controller: &'a mut ParametricModelController,
    pub scene: &'a mut Scene,
    pub gpu: &'a mut GpuResources,
}

impl<'a> ModelBinding<'a> {
    pub fn new(
        controller: &'a mut ParametricModelController,
        scene: &'a mut Scene,
        gpu: &'a mut GpuResources,
    ) -> Self {
        Self { controller, scene, gpu }
    }
}

impl PanelBinding for ModelBinding<'_> {
    fn read(&self, name: &str) -> Option<ParamValue> {
        self.controller.params().get(name)
    }

    fn write(&mut self, name: &str, value: ParamValue) -> Result<()> {
        self.controller.params_mut().set(name, value)
    }

    fn changed(&mut self) -> Result<()> {
        self.controller.regenerate(self.scene, self.gpu)
    }
}

/// Binds the `size` control to a points material. Material edits apply on the
/// next frame, so there is nothing to rebuild.
pub struct PointsSizeBinding<'a> {
    pub scene: &'a mut Scene,
    pub material: MaterialId,
}

impl PanelBinding for PointsSizeBinding<'_> {
    fn read(&self, name: &str) -> Option<ParamValue> {
        match (name, self.scene.material(self.material)?) {
            ("size", Material::Points(m)) => Some(ParamValue::Float(m.size)),
            _ => None,
        }
    }

    fn write(&mut self, name: &str, value: ParamValue) -> Result<()> {
        if name != POINT_SIZE.name {
            return Err(PrimError::UnknownParameter { kind: "points", name: name.to_string() });
        }
        let material = self
            .scene
            .material_mut(self.material)
            .and_then(|m| m.as_points_mut())
            .ok_or_else(|| PrimError::NotFound("points material".into()))?;
        material.size = value.as_f64(name)?;
        Ok(())
    }

    fn changed(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::PointsMaterial;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Recorder {
        values: HashMap<String, ParamValue>,
        changes: usize,
    }

    impl PanelBinding for Recorder {
        fn read(&self, name: &str) -> Option<ParamValue> {
            self.values.get(name).copied()
        }

        fn write(&mut self, name: &str, value: ParamValue) -> Result<()> {
            self.values.insert(name.to_string(), value);
            Ok(())
        }

        fn changed(&mut self) -> Result<()> {
            self.changes += 1;
            Ok(())
        }
    }

    const SCHEMA: [ParamSpec; 2] = [
        ParamSpec::length("radius", 0.5, 2.0, Some(0.01)),
        ParamSpec::toggle("openEnded"),
    ];

    fn recorder() -> Recorder {
        let mut r = Recorder::default();
        r.values.insert("radius".into(), ParamValue::Float(1.0));
        r.values.insert("openEnded".into(), ParamValue::Bool(false));
        r
    }

    #[test]
    fn test_edit_clamps_and_notifies_once() {
        let mut binding = recorder();
        let mut panel = ParameterPanel::new("test", &SCHEMA, &binding).unwrap();
        let stored = panel.edit(&mut binding, "radius", ParamValue::Float(9.0)).unwrap();
        assert_eq!(stored, ParamValue::Float(2.0));
        assert_eq!(binding.values["radius"], ParamValue::Float(2.0));
        assert_eq!(panel.control("radius").unwrap().value, ParamValue::Float(2.0));
        assert_eq!(binding.changes, 1);
        assert_eq!(panel.edits(), 1);
    }

    #[test]
    fn test_toggle_and_text_edits() {
        let mut binding = recorder();
        let mut panel = ParameterPanel::new("test", &SCHEMA, &binding).unwrap();
        panel.edit_str(&mut binding, "openEnded", "true").unwrap();
        assert_eq!(binding.values["openEnded"], ParamValue::Bool(true));
        assert!(panel.edit_str(&mut binding, "radius", "abc").is_err());
        assert_eq!(binding.changes, 1);
    }

    #[test]
    fn test_rejected_edit_does_not_notify() {
        let mut binding = recorder();
        let mut panel = ParameterPanel::new("test", &SCHEMA, &binding).unwrap();
        assert!(panel.edit(&mut binding, "missing", ParamValue::Int(1)).is_err());
        assert!(panel.edit(&mut binding, "openEnded", ParamValue::Float(1.0)).is_err());
        assert_eq!(binding.changes, 0);
        assert_eq!(panel.edits(), 0);
    }

    #[test]
    fn test_unbound_field_fails_construction() {
        let binding = Recorder::default();
        assert!(ParameterPanel::new("test", &SCHEMA, &binding).is_err());
    }

    #[test]
    fn test_points_size_binding() {
        let mut scene = Scene::new();
        let material = scene.add_material(Material::Points(PointsMaterial {
            size: 5.0,
            ..Default::default()
        }));
        let mut binding = PointsSizeBinding { scene: &mut scene, material };
        let mut panel = ParameterPanel::new("points", &[POINT_SIZE], &binding).unwrap();
        assert_eq!(panel.control("size").unwrap().value, ParamValue::Float(5.0));

        panel.edit(&mut binding, "size", ParamValue::Float(20.0)).unwrap();
        match scene.material(material) {
            Some(Material::Points(m)) => assert_eq!(m.size, 10.0),
            other => panic!("unexpected material {other:?}"),
        }
    }
}
