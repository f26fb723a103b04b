pub mod index;
pub mod setup;

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Dense arena handle for a scene node. Assigned at construction and never
/// reused; distinct from the display name, which is the content-lookup key
/// and is not guaranteed unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Position / rotation (XYZ Euler, radians) / scale triples, matching what
/// the transform controls edit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

/// Renderable surface properties. The emissive channel doubles as the
/// highlight indicator: the picker saves and overwrites it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub diffuse: Vec3,
    pub emissive: Vec3,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse: Vec3::splat(0.8),
            emissive: Vec3::ZERO,
        }
    }
}

/// Local-space bounding sphere used for ray hit-testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: Vec3,
    pub intensity: f32,
    pub direction: Vec3,
}

/// A node in the scene graph. Lights and grouping nodes carry no material
/// and no bounds, which keeps them out of hit-testing automatically.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub transform: Transform,
    pub material: Option<Material>,
    pub bounds: Option<BoundingSphere>,
    pub light: Option<DirectionalLight>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl SceneNode {
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            material: None,
            bounds: None,
            light: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn mesh(name: impl Into<String>, material: Material, bounds: BoundingSphere) -> Self {
        Self {
            material: Some(material),
            bounds: Some(bounds),
            ..Self::group(name)
        }
    }

    pub fn light(name: impl Into<String>, light: DirectionalLight) -> Self {
        Self {
            light: Some(light),
            ..Self::group(name)
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena-owned scene graph. Nodes are appended during initial setup and
/// never removed for the rest of the session.
#[derive(Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    roots: Vec<NodeId>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_root(&mut self, node: SceneNode) -> NodeId {
        let id = self.push(node);
        self.roots.push(id);
        id
    }

    pub fn add_child(&mut self, parent: NodeId, mut node: SceneNode) -> NodeId {
        node.parent = Some(parent);
        let id = self.push(node);
        self.nodes[parent.index()].children.push(id);
        id
    }

    fn push(&mut self, node: SceneNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn node(&self, id: NodeId) -> &SceneNode {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut SceneNode {
        &mut self.nodes[id.index()]
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth-first over every node reachable from the roots.
    pub fn traverse(&self, mut visit: impl FnMut(NodeId, &SceneNode)) {
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            visit(id, node);
            for &child in node.children.iter().rev() {
                stack.push(child);
            }
        }
    }

    /// Model-to-world matrix accumulated up the parent chain.
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let node = self.node(id);
        let local = node.transform.matrix();
        match node.parent {
            Some(parent) => self.world_matrix(parent) * local,
            None => local,
        }
    }

    /// World-space bounding sphere, or None for nodes without bounds.
    /// The radius scales by the largest axis of the accumulated transform,
    /// which is exact for the uniform scales this scene uses.
    pub fn world_bounds(&self, id: NodeId) -> Option<BoundingSphere> {
        let local = self.node(id).bounds?;
        let world = self.world_matrix(id);
        let center = world.transform_point3(local.center);
        let scale = world
            .x_axis
            .truncate()
            .length()
            .max(world.y_axis.truncate().length())
            .max(world.z_axis.truncate().length());
        Some(BoundingSphere {
            center,
            radius: local.radius * scale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traversal_visits_every_node_once() {
        let mut graph = SceneGraph::new();
        let root = graph.add_root(SceneNode::group("root"));
        let a = graph.add_child(root, SceneNode::group("a"));
        graph.add_child(a, SceneNode::group("leaf"));
        graph.add_child(root, SceneNode::group("b"));

        let mut seen = Vec::new();
        graph.traverse(|_, node| seen.push(node.name.clone()));
        assert_eq!(seen, ["root", "a", "leaf", "b"]);
    }

    #[test]
    fn world_bounds_follow_parent_transform() {
        let mut graph = SceneGraph::new();
        let mut root = SceneNode::group("root");
        root.transform.position = Vec3::new(10.0, 0.0, 0.0);
        root.transform.scale = Vec3::splat(0.5);
        let root = graph.add_root(root);
        let child = graph.add_child(
            root,
            SceneNode::mesh(
                "child",
                Material::default(),
                BoundingSphere {
                    center: Vec3::new(2.0, 0.0, 0.0),
                    radius: 4.0,
                },
            ),
        );

        let bounds = graph.world_bounds(child).unwrap();
        assert!((bounds.center - Vec3::new(11.0, 0.0, 0.0)).length() < 1e-5);
        assert!((bounds.radius - 2.0).abs() < 1e-5);
    }

    #[test]
    fn lights_have_no_bounds() {
        let mut graph = SceneGraph::new();
        let light = graph.add_root(SceneNode::light(
            "Light1",
            DirectionalLight {
                color: Vec3::ONE,
                intensity: 1.0,
                direction: Vec3::new(0.0, -1.0, 0.0),
            },
        ));
        assert!(graph.world_bounds(light).is_none());
    }
}
