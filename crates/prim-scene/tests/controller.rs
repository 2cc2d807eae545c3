use prim_core::PrimError;
use prim_geometry::{GeometryKind, GeometryParams, ParamRange, ParamValue};
use prim_scene::{
    Camera, Drawable, FrameRecorder, GpuResources, ModelBinding, ModelMaterials, Node, NodeKind,
    ParameterPanel, ParametricModelController, Renderer, Scene, Topology, DEFAULT_SLOT, LINE_NODE,
    SURFACE_NODE,
};

struct Fixture {
    scene: Scene,
    gpu: GpuResources,
    controller: ParametricModelController,
}

fn fixture(kind: GeometryKind) -> Fixture {
    let mut scene = Scene::new();
    let materials = ModelMaterials::install(&mut scene);
    let controller =
        ParametricModelController::new(GeometryParams::defaults(kind), scene.root(), materials);
    Fixture { scene, gpu: GpuResources::new(), controller }
}

impl Fixture {
    fn regenerate(&mut self) {
        self.controller.regenerate(&mut self.scene, &mut self.gpu).unwrap();
    }
}

#[test]
fn every_kind_fills_the_slot_with_surface_and_line() {
    for kind in GeometryKind::ALL {
        let mut f = fixture(kind);
        f.regenerate();

        assert_eq!(f.scene.count_named(DEFAULT_SLOT), 1, "{kind}");
        let group = f.scene.find_child_by_name(f.scene.root(), DEFAULT_SLOT).unwrap();
        let children = f.scene.children(group);
        assert_eq!(children.len(), 2, "{kind}");

        let surface = f.scene.find_child_by_name(group, SURFACE_NODE).unwrap();
        let line = f.scene.find_child_by_name(group, LINE_NODE).unwrap();
        assert!(matches!(f.scene.node(surface).unwrap().kind, NodeKind::Mesh(_)), "{kind}");
        assert!(matches!(f.scene.node(line).unwrap().kind, NodeKind::Lines(_)), "{kind}");
        assert_eq!(f.gpu.live(), 2, "{kind}");
    }
}

#[test]
fn edit_releases_previous_geometry_exactly_once() {
    let mut f = fixture(GeometryKind::Sphere);
    f.regenerate();
    let (old_surface, old_line) = f.controller.model_geometry(&f.scene).unwrap();

    f.controller.params_mut().set("radius", ParamValue::Float(2.0)).unwrap();
    f.regenerate();

    assert!(!f.gpu.is_live(old_surface));
    assert!(!f.gpu.is_live(old_line));
    assert_eq!(f.gpu.stats().disposals, 2);
    assert_eq!(f.controller.releases(), 1);
    assert_eq!(f.scene.count_named(DEFAULT_SLOT), 1);
    assert_eq!(f.gpu.live(), 2);
}

#[test]
fn unchanged_parameters_give_new_model_with_identical_geometry() {
    let mut f = fixture(GeometryKind::Torus);
    f.regenerate();
    let first_id = f.controller.current_model().unwrap();
    let (surface, line) = f.controller.model_geometry(&f.scene).unwrap();
    let first_surface = f.gpu.get(surface).unwrap().vertex_bytes.clone();
    let first_line = f.gpu.get(line).unwrap().vertex_bytes.clone();

    f.regenerate();
    let second_id = f.controller.current_model().unwrap();
    let (surface, line) = f.controller.model_geometry(&f.scene).unwrap();

    assert_ne!(first_id, second_id);
    assert_eq!(f.gpu.get(surface).unwrap().vertex_bytes, first_surface);
    assert_eq!(f.gpu.get(line).unwrap().vertex_bytes, first_line);
}

#[test]
fn rapid_replacements_keep_one_model_alive() {
    let mut f = fixture(GeometryKind::Cylinder);
    for i in 0..5 {
        f.controller
            .params_mut()
            .set("radialSegments", ParamValue::Int(8 + i))
            .unwrap();
        f.regenerate();
    }

    let stats = f.gpu.stats();
    assert_eq!(f.controller.generations(), 5);
    assert_eq!(f.controller.releases(), 4);
    assert_eq!(stats.uploads, 10);
    assert_eq!(stats.disposals, 8);
    assert_eq!(stats.live, 2);
    assert_eq!(stats.peak_live, 2);
    assert_eq!(f.scene.count_named(DEFAULT_SLOT), 1);
}

#[test]
fn panel_edit_triggers_one_regeneration() {
    let mut f = fixture(GeometryKind::Cone);
    f.regenerate();
    let schema = f.controller.params().describe_parameters();

    let mut binding = ModelBinding::new(&mut f.controller, &mut f.scene, &mut f.gpu);
    let mut panel = ParameterPanel::new("cone", schema, &binding).unwrap();
    assert_eq!(panel.controls().len(), schema.len());

    let stored = panel.edit(&mut binding, "radialSegments", ParamValue::Float(500.0)).unwrap();
    assert_eq!(stored, ParamValue::Int(100));
    panel.edit(&mut binding, "openEnded", ParamValue::Bool(true)).unwrap();

    assert_eq!(f.controller.generations(), 3);
    assert_eq!(f.controller.releases(), 2);
    assert_eq!(f.controller.params().get("openEnded"), Some(ParamValue::Bool(true)));
    assert_eq!(f.scene.count_named(DEFAULT_SLOT), 1);
}

#[test]
fn recorder_draws_surface_and_line() {
    let mut f = fixture(GeometryKind::Plane);
    f.regenerate();

    let mut recorder = FrameRecorder::new(640, 480);
    recorder.render(&f.scene, &f.gpu, &Camera::default()).unwrap();
    let frame = recorder.last_frame().unwrap();

    let topologies: Vec<_> = frame.draws.iter().map(|d| d.topology).collect();
    assert_eq!(topologies, [Topology::Triangles, Topology::Lines]);
    // plane: two triangles, four outline edges
    assert_eq!(frame.draws[0].element_count, 6);
    assert_eq!(frame.draws[1].element_count, 8);
}

#[test]
fn every_kind_regenerates_at_its_panel_maxima() {
    for kind in GeometryKind::ALL {
        let mut f = fixture(kind);
        f.regenerate();
        let schema = f.controller.params().describe_parameters();

        let mut binding = ModelBinding::new(&mut f.controller, &mut f.scene, &mut f.gpu);
        let mut panel = ParameterPanel::new(kind.to_string(), schema, &binding).unwrap();
        for spec in schema {
            let (request, max) = match spec.range {
                ParamRange::Float { max, .. } => (ParamValue::Float(1e9), ParamValue::Float(max)),
                ParamRange::Int { max, .. } => (ParamValue::Float(1e9), ParamValue::Int(max)),
                ParamRange::Toggle => (ParamValue::Bool(true), ParamValue::Bool(true)),
            };
            let stored = panel.edit(&mut binding, spec.name, request).unwrap();
            assert_eq!(stored, max, "{kind}: {}", spec.name);
        }

        assert_eq!(f.controller.generations(), 1 + schema.len(), "{kind}");
        assert!(f.controller.params().out_of_range().is_none(), "{kind}");
        assert_eq!(f.scene.count_named(DEFAULT_SLOT), 1, "{kind}");
        assert_eq!(f.gpu.live(), 2, "{kind}");
    }
}

#[test]
fn missing_parent_is_reported_before_any_upload() {
    let mut scene = Scene::new();
    let root = scene.root();
    let holder = scene.add(root, Node::group("holder")).unwrap();
    let materials = ModelMaterials::install(&mut scene);
    let mut f = Fixture {
        controller: ParametricModelController::new(
            GeometryParams::defaults(GeometryKind::Ring),
            holder,
            materials,
        ),
        scene,
        gpu: GpuResources::new(),
    };
    f.regenerate();
    f.scene.remove(holder).unwrap();

    let err = f.controller.regenerate(&mut f.scene, &mut f.gpu).unwrap_err();
    assert!(matches!(err, PrimError::NotFound(_)));
    let stats = f.gpu.stats();
    assert_eq!(stats.uploads, 2);
    assert_eq!(stats.live, 2);
    assert_eq!(f.controller.generations(), 1);
}

#[test]
fn slot_with_extra_drawable_is_rejected_untouched() {
    let mut f = fixture(GeometryKind::Circle);
    f.regenerate();
    let group = f.controller.model_node().unwrap();
    let mesh = f.controller.params().derive_geometry();
    let extra = Drawable {
        geometry: f.gpu.upload_points(&mesh),
        material: ModelMaterials::install(&mut f.scene).surface,
    };
    f.scene.add(group, Node::new("extra", NodeKind::Points(extra))).unwrap();

    let err = f.controller.regenerate(&mut f.scene, &mut f.gpu).unwrap_err();
    assert!(matches!(err, PrimError::Scene(_)));
    assert_eq!(f.gpu.live(), 3);
    assert_eq!(f.gpu.stats().disposals, 0);
    assert_eq!(f.scene.children(group).len(), 3);
    assert_eq!(f.controller.generations(), 1);
}

#[test]
fn failed_release_keeps_slot_and_remaining_geometry() {
    let mut f = fixture(GeometryKind::Torus);
    f.regenerate();
    let model = f.controller.current_model();
    let (surface, line) = f.controller.model_geometry(&f.scene).unwrap();
    f.gpu.dispose(surface).unwrap();

    let err = f.controller.regenerate(&mut f.scene, &mut f.gpu).unwrap_err();
    assert!(matches!(err, PrimError::Resource(_)));
    assert!(f.gpu.is_live(line));
    assert_eq!(f.gpu.stats().uploads, 2);
    assert_eq!(f.scene.count_named(DEFAULT_SLOT), 1);
    assert_eq!(f.controller.current_model(), model);
    assert_eq!(f.controller.releases(), 0);
}
