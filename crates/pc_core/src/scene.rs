//! Resolved scene handed to a host.
//!
//! A [`ResolvedScene`] is a one-level hierarchy: a synthetic root named
//! after the source file, with every node marker and every geometry
//! instance parented directly under it. World matrices already include the
//! axis conversion, so a host only needs to set them.

use std::sync::Arc;

use pc_math::{Aabb, Mat4, Mat4Ext, Vec3};

use crate::material::Material;
use crate::mesh::Geometry;

/// The synthetic root transform of one imported file.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneRoot {
    /// Display name, usually the source file stem
    pub name: String,

    /// Root transform (identity)
    pub matrix: Mat4,
}

/// A transform-only marker for one source node.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedNode {
    /// Slot in the source `nodes` array
    pub index: usize,

    /// Node name
    pub name: String,

    /// Converted world matrix
    pub world_matrix: Mat4,

    /// Display size for the marker
    pub marker_size: f32,
}

/// One mesh placed at one node, with an optional material.
#[derive(Clone, Debug)]
pub struct GeometryInstance<M> {
    /// Source node the geometry is placed at, if it resolved
    pub node_index: Option<usize>,

    /// Source mesh the geometry was built from
    pub mesh_index: usize,

    /// Shared geometry; instances of the same mesh share one build
    pub geometry: Arc<Geometry>,

    /// Converted world matrix
    pub world_matrix: Mat4,

    /// Bound material handle
    pub material: Option<M>,
}

impl<M> GeometryInstance<M> {
    /// Display name (the mesh name).
    pub fn name(&self) -> &str {
        &self.geometry.name
    }

    /// Vertex positions in world space.
    pub fn world_vertices(&self) -> Vec<Vec3> {
        self.geometry
            .vertices
            .iter()
            .map(|&p| self.world_matrix.transform_point3(p))
            .collect()
    }

    /// Vertex normals in world space, if the geometry has normals.
    pub fn world_normals(&self) -> Option<Vec<Vec3>> {
        let normals = self.geometry.normals.as_ref()?;
        Some(
            normals
                .iter()
                .map(|&n| self.world_matrix.transform_normal3(n))
                .collect(),
        )
    }

    /// World-space bounding box.
    pub fn world_bounds(&self) -> Aabb {
        self.world_matrix.transform_aabb(&self.geometry.bounds)
    }
}

/// A fully assembled import of one source file.
#[derive(Clone, Debug)]
pub struct ResolvedScene<M = Arc<Material>> {
    /// Synthetic root everything is parented to
    pub root: SceneRoot,

    /// Node markers, in source order
    pub nodes: Vec<PlacedNode>,

    /// Geometry instances, in source mesh-instance order
    pub geometry: Vec<GeometryInstance<M>>,

    /// Realized materials, in source order
    pub materials: Vec<M>,
}

impl<M> ResolvedScene<M> {
    /// Create an empty scene with an identity root.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            root: SceneRoot {
                name: name.into(),
                matrix: Mat4::IDENTITY,
            },
            nodes: Vec::new(),
            geometry: Vec::new(),
            materials: Vec::new(),
        }
    }

    /// Scene name (the root's name).
    pub fn name(&self) -> &str {
        &self.root.name
    }

    /// Placed node count; the root is not counted.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of geometry instances.
    pub fn geometry_count(&self) -> usize {
        self.geometry.len()
    }

    /// Get material count.
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Get total triangle count across all instances.
    pub fn total_triangle_count(&self) -> usize {
        self.geometry
            .iter()
            .map(|g| g.geometry.triangle_count())
            .sum()
    }

    /// Find a placed node by name.
    pub fn find_node(&self, name: &str) -> Option<&PlacedNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Compute the world-space bounding box of all geometry instances.
    pub fn world_bounds(&self) -> Aabb {
        self.geometry
            .iter()
            .map(GeometryInstance::world_bounds)
            .filter(|b| !b.is_empty())
            .fold(Aabb::empty(), |acc, b| Aabb::surrounding(&acc, &b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Arc<Geometry> {
        let mut geometry = Geometry::new("tri", vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![[0, 1, 2]]);
        geometry.compute_normals();
        Arc::new(geometry)
    }

    #[test]
    fn test_scene_counts() {
        let mut scene: ResolvedScene = ResolvedScene::new("test");
        let geometry = triangle();

        for x in [0.0, 1.0] {
            scene.geometry.push(GeometryInstance {
                node_index: None,
                mesh_index: 0,
                geometry: geometry.clone(),
                world_matrix: Mat4::from_translation(Vec3::new(x, 0.0, 0.0)),
                material: None,
            });
        }

        assert_eq!(scene.name(), "test");
        assert_eq!(scene.node_count(), 0);
        assert_eq!(scene.geometry_count(), 2);
        assert_eq!(scene.total_triangle_count(), 2);
        assert_eq!(scene.root.matrix, Mat4::IDENTITY);
    }

    #[test]
    fn test_world_space_queries() {
        let instance: GeometryInstance<()> = GeometryInstance {
            node_index: Some(0),
            mesh_index: 0,
            geometry: triangle(),
            world_matrix: Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_2),
            material: None,
        };

        // +Y maps to -Z... and the +Z face normal maps to +Y
        let vertices = instance.world_vertices();
        assert!((vertices[2] - Vec3::new(0.0, 0.0, -1.0)).length() < 0.001);

        let normals = instance.world_normals().unwrap();
        assert!((normals[0] - Vec3::Y).length() < 0.001);

        assert_eq!(instance.name(), "tri");
    }

    #[test]
    fn test_world_bounds_empty_scene() {
        let scene: ResolvedScene = ResolvedScene::new("empty");
        assert!(scene.world_bounds().is_empty());
    }
}
