//! Startup scenes. Each builder populates an empty [`Scene`] and returns the
//! camera plus whatever the panel edits.

use prim_core::Result;
use prim_geometry::{GeometryKind, GeometryParams};
use prim_math::{Color, Point3, Transform, Vector3};
use prim_mesh::{axes_helper, grid_helper, LineSegments};
use prim_scene::{
    Camera, DirectionalLight, Drawable, Fog, GpuResources, LineBasicMaterial, Material, MaterialId,
    MeshStandardMaterial, ModelBinding, ModelMaterials, Node, NodeId, NodeKind, ParameterPanel,
    ParametricModelController, PointsMaterial, PointsSizeBinding, Scene, POINT_SIZE,
};
use tracing::info;

use crate::config::{Tutorial, ViewerConfig};

/// What a tutorial leaves behind for the app to drive.
#[derive(Debug)]
pub struct Setup {
    pub camera: Camera,
    pub controller: Option<ParametricModelController>,
    pub panel: Option<ParameterPanel>,
    pub points_material: Option<MaterialId>,
}

pub fn build(
    tutorial: Tutorial,
    scene: &mut Scene,
    gpu: &mut GpuResources,
    config: &ViewerConfig,
) -> Result<Setup> {
    let setup = match tutorial {
        Tutorial::Geometry => geometry(scene, gpu, config)?,
        Tutorial::Transform => transform(scene, gpu, config)?,
        Tutorial::Material => material(scene, gpu, config)?,
    };
    info!(?tutorial, nodes = scene.nodes.len(), geometries = gpu.live(), "scene ready");
    Ok(setup)
}

fn camera(config: &ViewerConfig, z: f64) -> Camera {
    Camera::perspective(75.0, config.aspect(), 0.1, 100.0).with_eye(Point3::new(0.0, 0.0, z))
}

fn add_helper(
    scene: &mut Scene,
    gpu: &mut GpuResources,
    name: &str,
    lines: &LineSegments,
    material: MaterialId,
) -> Result<NodeId> {
    let geometry = gpu.upload_lines(lines, Color::WHITE);
    let root = scene.root();
    scene.add(root, Node::new(name, NodeKind::Lines(Drawable { geometry, material })))
}

fn add_light(scene: &mut Scene, intensity: f32, position: Vector3) -> Result<NodeId> {
    let root = scene.root();
    let light = DirectionalLight { color: Color::WHITE, intensity };
    scene.add(root, Node::light("light", light, position))
}

/// Parametric model under three lights, with axes, grid and fog.
pub fn geometry(scene: &mut Scene, gpu: &mut GpuResources, config: &ViewerConfig) -> Result<Setup> {
    scene.fog = Some(Fog { color: Color::BLACK, near: 1.0, far: 3.5 });

    for position in [
        Vector3::new(0.0, 200.0, 0.0),
        Vector3::new(100.0, 200.0, 100.0),
        Vector3::new(-100.0, -200.0, -100.0),
    ] {
        add_light(scene, 3.0, position)?;
    }

    let helper_material =
        scene.add_material(Material::LineBasic(LineBasicMaterial::vertex_colored()));
    add_helper(scene, gpu, "axes", &axes_helper(10.0), helper_material)?;
    let grid = grid_helper(5.0, 20, Color::WHITE, Color::from_hex(0x444444));
    add_helper(scene, gpu, "grid", &grid, helper_material)?;

    let materials = ModelMaterials::install(scene);
    let mut controller =
        ParametricModelController::new(config.geometry.clone(), scene.root(), materials)
            .with_line_style(config.line_style);
    controller.regenerate(scene, gpu)?;

    let schema = controller.params().describe_parameters();
    let title = controller.params().kind().to_string();
    let panel =
        ParameterPanel::new(title, schema, &ModelBinding::new(&mut controller, scene, gpu))?;

    Ok(Setup {
        camera: camera(config, 2.0),
        controller: Some(controller),
        panel: Some(panel),
        points_material: None,
    })
}

/// Unit box moved to (0, 2, 0), tilted 45° about X and halved.
pub fn transform(
    scene: &mut Scene,
    gpu: &mut GpuResources,
    config: &ViewerConfig,
) -> Result<Setup> {
    add_light(scene, 1.0, Vector3::new(-1.0, 2.0, 4.0))?;

    let mesh = GeometryParams::defaults(GeometryKind::Box).derive_geometry();
    let geometry = gpu.upload_mesh(&mesh);
    let material = scene.add_material(Material::Standard(MeshStandardMaterial::default()));
    let placement = Transform::IDENTITY
        .with_position(Vector3::new(0.0, 2.0, 0.0))
        .with_rotation_degrees(45.0, 0.0, 0.0)
        .with_scale(Vector3::splat(0.5));
    let root = scene.root();
    scene.add(
        root,
        Node::new("box", NodeKind::Mesh(Drawable { geometry, material })).with_transform(placement),
    )?;

    let helper_material =
        scene.add_material(Material::LineBasic(LineBasicMaterial::vertex_colored()));
    add_helper(scene, gpu, "axes", &axes_helper(5.0), helper_material)?;

    Ok(Setup {
        camera: camera(config, 20.0),
        controller: None,
        panel: None,
        points_material: None,
    })
}

/// Default sphere drawn as textured point sprites; the panel edits sprite size.
pub fn material(scene: &mut Scene, gpu: &mut GpuResources, config: &ViewerConfig) -> Result<Setup> {
    add_light(scene, 1.0, Vector3::new(-1.0, 2.0, 4.0))?;

    let mut mesh = GeometryParams::defaults(GeometryKind::Sphere).derive_geometry();
    // sprites take their texture coordinates from gl_PointCoord
    mesh.clear_uvs();
    let geometry = gpu.upload_points(&mesh);
    let material = scene.add_material(Material::Points(PointsMaterial {
        color: Color::from_hex(0x0ff000),
        size: config.point_size,
        size_attenuation: false,
        map: Some("circle.png".into()),
        alpha_test: 0.5,
    }));
    let root = scene.root();
    scene.add(root, Node::new("points", NodeKind::Points(Drawable { geometry, material })))?;

    let panel =
        ParameterPanel::new("points", &[POINT_SIZE], &PointsSizeBinding { scene, material })?;

    Ok(Setup {
        camera: camera(config, 2.0),
        controller: None,
        panel: Some(panel),
        points_material: Some(material),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use prim_math::{DMat4, DQuat};
    use prim_scene::DEFAULT_SLOT;

    #[test]
    fn test_geometry_tutorial() {
        let mut scene = Scene::new();
        let mut gpu = GpuResources::new();
        let setup = geometry(&mut scene, &mut gpu, &ViewerConfig::default()).unwrap();

        assert_eq!(scene.count_named("light"), 3);
        assert_eq!(scene.count_named(DEFAULT_SLOT), 1);
        assert!(scene.fog.is_some());
        // axes + grid + surface + line
        assert_eq!(gpu.live(), 4);
        let panel = setup.panel.unwrap();
        assert_eq!(panel.title(), "plane");
        assert_eq!(panel.controls().len(), 4);
        assert_eq!(setup.camera.eye, Point3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_transform_matches_manual_matrices() {
        let mut scene = Scene::new();
        let mut gpu = GpuResources::new();
        transform(&mut scene, &mut gpu, &ViewerConfig::default()).unwrap();

        let id = scene.find_by_name("box").unwrap();
        let world = scene.world_matrix(id).unwrap();
        // scale, then rotate, then translate
        let s = DMat4::from_scale(Vector3::splat(0.5));
        let r = DMat4::from_quat(DQuat::from_rotation_x(45f64.to_radians()));
        let t = DMat4::from_translation(Vector3::new(0.0, 2.0, 0.0));
        assert_abs_diff_eq!(world, t * r * s, epsilon = 1e-12);
    }

    #[test]
    fn test_material_tutorial() {
        let mut scene = Scene::new();
        let mut gpu = GpuResources::new();
        let setup = material(&mut scene, &mut gpu, &ViewerConfig::default()).unwrap();

        let id = setup.points_material.unwrap();
        match scene.material(id) {
            Some(Material::Points(m)) => {
                assert_eq!(m.size, 5.0);
                assert!(!m.size_attenuation);
                assert_eq!(m.alpha_test, 0.5);
            }
            other => panic!("unexpected material {other:?}"),
        }
        let node = scene.find_by_name("points").unwrap();
        let handle = scene.node(node).unwrap().kind.drawable().unwrap().geometry;
        // default sphere: 33 x 17 vertices
        assert_eq!(gpu.element_count(handle), Some(33 * 17));
    }
}
