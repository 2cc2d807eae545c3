use prim_core::error::{PrimError, Result};
use prim_math::{Color, DMat4, Transform, Vector3};
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

use crate::gpu::GeometryHandle;
use crate::material::Material;

// --- SlotMap key types ---

new_key_type! {
    pub struct NodeId;
    pub struct MaterialId;
}

// --- Node payloads ---

/// GPU geometry paired with the material it is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drawable {
    pub geometry: GeometryHandle,
    pub material: MaterialId,
}

/// Light shining along `-position` (towards the origin), like a sun.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self { color: Color::WHITE, intensity: 1.0 }
    }
}

/// Linear distance fog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fog {
    pub color: Color,
    pub near: f64,
    pub far: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    Group,
    Mesh(Drawable),
    Lines(Drawable),
    Points(Drawable),
    Light(DirectionalLight),
}

impl NodeKind {
    pub fn drawable(&self) -> Option<Drawable> {
        match self {
            NodeKind::Mesh(d) | NodeKind::Lines(d) | NodeKind::Points(d) => Some(*d),
            NodeKind::Group | NodeKind::Light(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub transform: Transform,
    pub visible: bool,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl Node {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            transform: Transform::IDENTITY,
            visible: true,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Group)
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Place a directional light; only the position matters for its direction.
    pub fn light(name: impl Into<String>, light: DirectionalLight, position: Vector3) -> Self {
        Self::new(name, NodeKind::Light(light))
            .with_transform(Transform::from_translation(position))
    }
}

/// Scene graph rooted at a single group node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub nodes: SlotMap<NodeId, Node>,
    pub materials: SlotMap<MaterialId, Material>,
    pub background: Color,
    pub fog: Option<Fog>,
    root: NodeId,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::group("scene"));
        Self {
            nodes,
            materials: SlotMap::with_key(),
            background: Color::BLACK,
            fog: None,
            root,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Attach `node` as the last child of `parent`.
    pub fn add(&mut self, parent: NodeId, mut node: Node) -> Result<NodeId> {
        if !self.nodes.contains_key(parent) {
            return Err(PrimError::NotFound(format!("parent node {parent:?}")));
        }
        node.parent = Some(parent);
        node.children.clear();
        let id = self.nodes.insert(node);
        self.nodes[parent].children.push(id);
        Ok(id)
    }

    /// Detach `id` and drop its whole subtree, returning the removed nodes
    /// (pre-order) so the caller can release what they reference.
    pub fn remove(&mut self, id: NodeId) -> Result<Vec<Node>> {
        if id == self.root {
            return Err(PrimError::InvalidOperation("cannot remove the scene root".into()));
        }
        let parent = self
            .nodes
            .get(id)
            .ok_or_else(|| PrimError::NotFound(format!("node {id:?}")))?
            .parent;
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|&c| c != id);
        }

        let mut removed = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(next) {
                stack.extend(node.children.iter().rev().copied());
                removed.push(node);
            }
        }
        Ok(removed)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// First direct child of `parent` called `name`.
    pub fn find_child_by_name(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&c| self.nodes.get(c).is_some_and(|n| n.name == name))
    }

    /// First node called `name` in pre-order from the root.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = self.nodes.get(id)?;
            if node.name == name {
                return Some(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    pub fn count_named(&self, name: &str) -> usize {
        self.nodes.values().filter(|n| n.name == name).count()
    }

    /// Local transform composed with every ancestor's.
    pub fn world_matrix(&self, id: NodeId) -> Option<DMat4> {
        let mut node = self.nodes.get(id)?;
        let mut matrix = node.transform.to_mat4();
        while let Some(parent) = node.parent.and_then(|p| self.nodes.get(p)) {
            matrix = parent.transform.to_mat4() * matrix;
            node = parent;
        }
        Some(matrix)
    }

    /// Visit visible nodes in pre-order with their world matrices.
    /// Hidden nodes hide their whole subtree.
    pub fn traverse_visible(&self, mut visit: impl FnMut(NodeId, &Node, DMat4)) {
        let mut stack = vec![(self.root, DMat4::IDENTITY)];
        while let Some((id, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get(id) else { continue };
            if !node.visible {
                continue;
            }
            let world = parent_world * node.transform.to_mat4();
            visit(id, node, world);
            stack.extend(node.children.iter().rev().map(|&c| (c, world)));
        }
    }

    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.insert(material)
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id)
    }

    pub fn material_mut(&mut self, id: MaterialId) -> Option<&mut Material> {
        self.materials.get_mut(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use prim_math::Point3;

    #[test]
    fn test_add_and_find() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = scene.add(root, Node::group("a")).unwrap();
        let b = scene.add(a, Node::group("b")).unwrap();

        assert_eq!(scene.children(root), &[a]);
        assert_eq!(scene.node(b).unwrap().parent, Some(a));
        assert_eq!(scene.find_by_name("b"), Some(b));
        assert_eq!(scene.find_child_by_name(root, "b"), None);
        assert_eq!(scene.find_child_by_name(a, "b"), Some(b));
    }

    #[test]
    fn test_remove_subtree() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = scene.add(root, Node::group("a")).unwrap();
        let b = scene.add(a, Node::group("b")).unwrap();
        let c = scene.add(b, Node::group("c")).unwrap();

        let removed = scene.remove(a).unwrap();
        let names: Vec<_> = removed.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert!(!scene.contains(c));
        assert!(scene.children(root).is_empty());
        assert_eq!(scene.nodes.len(), 1);
    }

    #[test]
    fn test_remove_root_and_missing() {
        let mut scene = Scene::new();
        let root = scene.root();
        assert!(matches!(scene.remove(root), Err(PrimError::InvalidOperation(_))));

        let a = scene.add(root, Node::group("a")).unwrap();
        scene.remove(a).unwrap();
        assert!(matches!(scene.remove(a), Err(PrimError::NotFound(_))));
        assert!(matches!(scene.add(a, Node::group("x")), Err(PrimError::NotFound(_))));
    }

    #[test]
    fn test_world_matrix_composes_parents() {
        let mut scene = Scene::new();
        let root = scene.root();
        let parent = Node::group("p")
            .with_transform(Transform::from_translation(Vector3::new(0.0, 2.0, 0.0)));
        let p = scene.add(root, parent).unwrap();
        let child = Node::group("c")
            .with_transform(Transform::IDENTITY.with_scale(Vector3::splat(0.5)));
        let c = scene.add(p, child).unwrap();

        let world = scene.world_matrix(c).unwrap();
        let q = world.transform_point3(Point3::new(1.0, 0.0, 0.0));
        assert_abs_diff_eq!(q, Point3::new(0.5, 2.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_traverse_skips_hidden_subtrees() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = scene.add(root, Node::group("a")).unwrap();
        scene.add(a, Node::group("a1")).unwrap();
        let b = scene.add(root, Node::group("b")).unwrap();
        scene.add(b, Node::group("b1")).unwrap();
        scene.node_mut(b).unwrap().visible = false;

        let mut seen = Vec::new();
        scene.traverse_visible(|_, node, _| seen.push(node.name.clone()));
        assert_eq!(seen, ["scene", "a", "a1"]);
    }

    #[test]
    fn test_count_named() {
        let mut scene = Scene::new();
        let root = scene.root();
        scene.add(root, Node::group("x")).unwrap();
        scene.add(root, Node::group("x")).unwrap();
        assert_eq!(scene.count_named("x"), 2);
        assert_eq!(scene.count_named("y"), 0);
    }
}
