//! Scene graph and hierarchical scene organization.
//!
//! Nodes own their children exclusively (`Box<dyn SceneNode>`); a node is
//! never shared between two parents. Code that needs to reach a node deep
//! inside a tree after handing the tree over (for instance to animate it)
//! keeps a [`NodePath`] instead of a second owning reference.

use std::{fmt, rc::Rc};

use cgmath::{Matrix4, SquareMatrix};

use crate::{
    data_structures::{
        geometry::Geometry,
        instance::{Instance, InstanceRaw},
        material::Material,
    },
    render::{Instanced, Render},
};

pub trait SceneNode {
    fn name(&self) -> &str;

    fn get_local_transform(&self) -> &Instance;

    fn get_local_transform_mut(&mut self) -> &mut Instance;

    /// World transform as of the last [`SceneNode::update_world_transforms`] pass.
    fn get_world_transform(&self) -> Matrix4<f32>;

    /// Recomputes this node's world transform from `parents_world_transform`
    /// and propagates the result to all children.
    fn update_world_transforms(&mut self, parents_world_transform: &Matrix4<f32>);

    fn update_world_transform_all(&mut self) {
        self.update_world_transforms(&Matrix4::identity());
    }

    fn get_children(&self) -> &Vec<Box<dyn SceneNode>>;

    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn SceneNode>>;

    /// Appends `child` and returns its index among this node's children.
    fn add_child(&mut self, child: Box<dyn SceneNode>) -> usize {
        let children = self.get_children_mut();
        children.push(child);
        children.len() - 1
    }

    /// Collects everything below (and including) this node that has to be drawn.
    fn get_render(&self) -> Render<'_>;
}

impl fmt::Debug for dyn SceneNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneNode")
            .field("name", &self.name())
            .field("children", self.get_children())
            .finish()
    }
}

/// Total number of nodes in the subtree rooted at `node`.
pub fn count_nodes(node: &dyn SceneNode) -> usize {
    1 + node
        .get_children()
        .iter()
        .map(|child| count_nodes(child.as_ref()))
        .sum::<usize>()
}

/// A transform-only node grouping its children.
pub struct ContainerNode {
    name: String,
    children: Vec<Box<dyn SceneNode>>,
    local: Instance,
    world: Matrix4<f32>,
}

impl ContainerNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            local: Instance::default(),
            world: Matrix4::identity(),
        }
    }

    pub fn with_transform(mut self, local: Instance) -> Self {
        self.local = local;
        self
    }
}

impl SceneNode for ContainerNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_local_transform(&self) -> &Instance {
        &self.local
    }

    fn get_local_transform_mut(&mut self) -> &mut Instance {
        &mut self.local
    }

    fn get_world_transform(&self) -> Matrix4<f32> {
        self.world
    }

    fn update_world_transforms(&mut self, parents_world_transform: &Matrix4<f32>) {
        self.world = parents_world_transform * self.local.to_matrix();
        let world = self.world;
        for child in self.children.iter_mut() {
            child.update_world_transforms(&world);
        }
    }

    fn get_children(&self) -> &Vec<Box<dyn SceneNode>> {
        &self.children
    }

    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn SceneNode>> {
        &mut self.children
    }

    fn get_render(&self) -> Render<'_> {
        Render::Composed(self.children.iter().map(|child| child.get_render()).collect())
    }
}

/// A drawable node: one geometry with a (possibly shared) material.
pub struct MeshNode {
    name: String,
    children: Vec<Box<dyn SceneNode>>,
    local: Instance,
    world: Matrix4<f32>,
    geometry: Geometry,
    material: Rc<Material>,
}

impl MeshNode {
    pub fn new(name: impl Into<String>, geometry: Geometry, material: Rc<Material>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            local: Instance::default(),
            world: Matrix4::identity(),
            geometry,
            material,
        }
    }

    pub fn with_transform(mut self, local: Instance) -> Self {
        self.local = local;
        self
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn material(&self) -> &Rc<Material> {
        &self.material
    }
}

impl SceneNode for MeshNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_local_transform(&self) -> &Instance {
        &self.local
    }

    fn get_local_transform_mut(&mut self) -> &mut Instance {
        &mut self.local
    }

    fn get_world_transform(&self) -> Matrix4<f32> {
        self.world
    }

    fn update_world_transforms(&mut self, parents_world_transform: &Matrix4<f32>) {
        self.world = parents_world_transform * self.local.to_matrix();
        let world = self.world;
        for child in self.children.iter_mut() {
            child.update_world_transforms(&world);
        }
    }

    fn get_children(&self) -> &Vec<Box<dyn SceneNode>> {
        &self.children
    }

    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn SceneNode>> {
        &mut self.children
    }

    fn get_render(&self) -> Render<'_> {
        let instanced = Instanced {
            name: &self.name,
            geometry: &self.geometry,
            material: &self.material,
            instance: InstanceRaw::from_world(&self.world),
        };
        let own = if self.material.transparent {
            Render::Transparent(instanced)
        } else {
            Render::Default(instanced)
        };
        if self.children.is_empty() {
            return own;
        }
        Render::Composed(
            self.children
                .iter()
                .map(|child| child.get_render())
                .chain([own])
                .collect(),
        )
    }
}

/// Child-index path from some root node down to one of its descendants.
///
/// The empty path denotes the root itself. A path does not keep its target
/// alive; resolving it against a tree whose shape changed yields `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn resolve<'a>(&self, root: &'a dyn SceneNode) -> Option<&'a dyn SceneNode> {
        let mut node = root;
        for &index in &self.0 {
            node = node.get_children().get(index)?.as_ref();
        }
        Some(node)
    }

    pub fn resolve_mut<'a>(
        &self,
        root: &'a mut Box<dyn SceneNode>,
    ) -> Option<&'a mut Box<dyn SceneNode>> {
        let mut node = root;
        for &index in &self.0 {
            node = node.get_children_mut().get_mut(index)?;
        }
        Some(node)
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}
