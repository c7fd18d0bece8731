//! Minimal scene description consumed by a [`crate::Renderer`].
//!
//! Nodes are appended and never removed during a viewer's lifetime, so a
//! [`NodeId`] stays valid for as long as the scene it came from.

use crate::camera::euler_quat;
use crate::color::Color;
use crate::model::ModelData;
use glam::{Mat4, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Clone, Debug, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

/// Light arriving from `position` towards the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
}

impl DirectionalLight {
    /// Unit vector pointing from the scene towards the light.
    pub fn direction_to_light(&self) -> Vec3 {
        self.position.normalize_or_zero()
    }
}

#[derive(Clone, Debug)]
pub struct ModelNode {
    pub data: ModelData,
    pub position: Vec3,
    pub rotation: Vec3,
}

impl ModelNode {
    pub fn new(data: ModelData) -> Self {
        Self {
            data,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
        }
    }

    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(euler_quat(self.rotation), self.position)
    }
}

#[derive(Clone, Debug)]
pub enum Node {
    Ambient(AmbientLight),
    Directional(DirectionalLight),
    Model(ModelNode),
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
    nodes: Vec<Node>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn model(&self, id: NodeId) -> Option<&ModelNode> {
        match self.nodes.get(id.0) {
            Some(Node::Model(m)) => Some(m),
            _ => None,
        }
    }

    pub fn model_mut(&mut self, id: NodeId) -> Option<&mut ModelNode> {
        match self.nodes.get_mut(id.0) {
            Some(Node::Model(m)) => Some(m),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn models(&self) -> impl Iterator<Item = (NodeId, &ModelNode)> {
        self.nodes().filter_map(|(id, n)| match n {
            Node::Model(m) => Some((id, m)),
            _ => None,
        })
    }

    pub fn ambient_lights(&self) -> impl Iterator<Item = &AmbientLight> {
        self.nodes.iter().filter_map(|n| match n {
            Node::Ambient(l) => Some(l),
            _ => None,
        })
    }

    pub fn directional_lights(&self) -> impl Iterator<Item = &DirectionalLight> {
        self.nodes.iter().filter_map(|n| match n {
            Node::Directional(l) => Some(l),
            _ => None,
        })
    }

    pub fn light_count(&self) -> usize {
        self.ambient_lights().count() + self.directional_lights().count()
    }
}
