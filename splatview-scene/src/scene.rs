//! Scene graph: lights and meshes the viewer draws.
//!
//! These are CPU-side representations. GPU vertex layouts derived from them
//! live in splatview-gpu.

use glam::Vec3;

/// Shape of a mesh, centered on the mesh position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// Axis-aligned box with the given edge lengths.
    Cuboid { size: Vec3 },
}

impl Geometry {
    /// Corner positions relative to the mesh origin.
    fn corners(&self) -> [Vec3; 8] {
        match self {
            Geometry::Cuboid { size } => {
                let h = *size * 0.5;
                [
                    Vec3::new(-h.x, -h.y, -h.z),
                    Vec3::new(h.x, -h.y, -h.z),
                    Vec3::new(h.x, h.y, -h.z),
                    Vec3::new(-h.x, h.y, -h.z),
                    Vec3::new(-h.x, -h.y, h.z),
                    Vec3::new(h.x, -h.y, h.z),
                    Vec3::new(h.x, h.y, h.z),
                    Vec3::new(-h.x, h.y, h.z),
                ]
            }
        }
    }

    fn edges(&self) -> &'static [(usize, usize)] {
        match self {
            Geometry::Cuboid { .. } => &[
                (0, 1),
                (1, 2),
                (2, 3),
                (3, 0),
                (4, 5),
                (5, 6),
                (6, 7),
                (7, 4),
                (0, 4),
                (1, 5),
                (2, 6),
                (3, 7),
            ],
        }
    }
}

/// Unlit surface description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// RGB color (linear, 0-1 range).
    pub color: Vec3,
    /// Draw edges only.
    pub wireframe: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Vec3::splat(0.8),
            wireframe: false,
        }
    }
}

/// A positioned piece of geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mesh {
    pub geometry: Geometry,
    pub material: Material,
    /// World-space position of the geometry center.
    pub position: Vec3,
}

impl Mesh {
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self {
            geometry,
            material,
            position: Vec3::ZERO,
        }
    }

    /// Unit cube drawn as green wireframe, used as a stand-in asset.
    pub fn placeholder_cube() -> Self {
        Self::new(
            Geometry::Cuboid { size: Vec3::ONE },
            Material {
                color: Vec3::new(0.0, 1.0, 0.0),
                wireframe: true,
            },
        )
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// World-space line segments for every edge of the geometry.
    pub fn wireframe_segments(&self) -> Vec<[Vec3; 2]> {
        let corners = self.geometry.corners();
        self.geometry
            .edges()
            .iter()
            .map(|&(a, b)| [corners[a] + self.position, corners[b] + self.position])
            .collect()
    }
}

/// A renderable node in the scene graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneNode {
    AmbientLight {
        color: Vec3,
        intensity: f32,
    },
    DirectionalLight {
        color: Vec3,
        intensity: f32,
        /// Direction the light travels, normalized.
        direction: Vec3,
    },
    Mesh(Mesh),
}

impl SceneNode {
    pub fn as_mesh(&self) -> Option<&Mesh> {
        match self {
            SceneNode::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }
}

/// Index of a node inside its [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Ordered collection of scene nodes.
///
/// The revision increases on every insertion so renderers can tell when their
/// uploaded geometry is stale.
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    revision: u64,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ambient fill plus a single white key light.
    pub fn with_default_lighting() -> Self {
        let mut scene = Self::new();
        scene.add(SceneNode::AmbientLight {
            color: Vec3::ONE,
            intensity: 0.5,
        });
        scene.add(SceneNode::DirectionalLight {
            color: Vec3::ONE,
            intensity: 1.0,
            direction: Vec3::new(-1.0, -1.0, -1.0).normalize(),
        });
        scene
    }

    pub fn add(&mut self, node: SceneNode) -> NodeId {
        self.nodes.push(node);
        self.revision += 1;
        NodeId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn meshes(&self) -> impl Iterator<Item = &Mesh> {
        self.nodes.iter().filter_map(SceneNode::as_mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_has_twelve_edges() {
        let segments = Mesh::placeholder_cube().wireframe_segments();
        assert_eq!(segments.len(), 12);
        for [a, b] in segments {
            assert!(((a - b).length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_segments_follow_position() {
        let mesh = Mesh::placeholder_cube().with_position(Vec3::new(2.0, 0.0, 0.0));
        for [a, b] in mesh.wireframe_segments() {
            assert!(a.x >= 1.5 && a.x <= 2.5);
            assert!(b.x >= 1.5 && b.x <= 2.5);
        }
    }

    #[test]
    fn test_add_bumps_revision_and_keeps_order() {
        let mut scene = SceneGraph::with_default_lighting();
        let before = scene.revision();
        let id = scene.add(SceneNode::Mesh(Mesh::placeholder_cube()));
        assert_eq!(scene.revision(), before + 1);
        assert_eq!(id.index(), 2);
        assert!(matches!(scene.get(id), Some(SceneNode::Mesh(_))));
        assert_eq!(scene.meshes().count(), 1);
    }

    #[test]
    fn test_default_lighting_has_no_meshes() {
        let scene = SceneGraph::with_default_lighting();
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.meshes().count(), 0);
    }
}
