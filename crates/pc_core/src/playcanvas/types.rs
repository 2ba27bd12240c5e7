//! Intermediate representation of a PlayCanvas model document.
//!
//! These types hold what the parser could recover from the JSON before any
//! transform resolution or mesh building happens. Everything here is plain
//! data; indices are kept exactly as the document states them so later
//! stages can decide what is in range.

use pc_math::{trs_matrix, Mat4, Vec3};

/// A parsed PlayCanvas model: flat arrays cross-referenced by index.
#[derive(Clone, Debug, Default)]
pub struct ParsedModel {
    /// Scene-graph nodes, in document order
    pub nodes: Vec<Node>,

    /// Vertex buffers referenced by meshes
    pub vertex_buffers: Vec<VertexBuffer>,

    /// Mesh definitions
    pub meshes: Vec<MeshDef>,

    /// Mesh-to-node bindings
    pub instances: Vec<MeshInstance>,

    /// Material definitions
    pub materials: Vec<MaterialDef>,
}

impl ParsedModel {
    /// Vertex buffer a mesh points at, if the reference was valid.
    pub fn vertex_buffer_for(&self, mesh: &MeshDef) -> Option<&VertexBuffer> {
        mesh.vertex_buffer.and_then(|i| self.vertex_buffers.get(i))
    }

    /// Look up a mesh by a possibly-missing index.
    pub fn mesh(&self, index: Option<usize>) -> Option<&MeshDef> {
        index.and_then(|i| self.meshes.get(i))
    }

    /// True when the mesh has at least one position value to build from.
    pub fn has_positions(&self, mesh: &MeshDef) -> bool {
        self.vertex_buffer_for(mesh)
            .and_then(|vb| vb.positions.as_ref())
            .is_some_and(|p| !p.is_empty())
    }
}

/// A named transform in the source scene graph.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// Slot in the `nodes` array
    pub index: usize,

    /// Node name (`Node_<index>` when absent)
    pub name: String,

    /// Local translation
    pub position: Option<Vec3>,

    /// Local Euler rotation in degrees (intrinsic XYZ)
    pub rotation_deg: Option<Vec3>,

    /// Local scale
    pub scale: Option<Vec3>,

    /// Parent slot, `-1` for a root node
    pub parent: i64,
}

impl Node {
    /// Create a root node with identity local transform.
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            position: None,
            rotation_deg: None,
            scale: None,
            parent: -1,
        }
    }

    /// Set the parent slot.
    pub fn with_parent(mut self, parent: i64) -> Self {
        self.parent = parent;
        self
    }

    /// Set the local translation.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = Some(position);
        self
    }

    /// Set the local rotation in degrees.
    pub fn with_rotation(mut self, degrees: Vec3) -> Self {
        self.rotation_deg = Some(degrees);
        self
    }

    /// Set the local scale.
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Local transform: `Translation * Rotation * Scale`.
    pub fn local_matrix(&self) -> Mat4 {
        trs_matrix(self.position, self.rotation_deg, self.scale)
    }

    /// Parent slot as an index, or `None` for root nodes.
    pub fn parent_index(&self) -> Option<usize> {
        usize::try_from(self.parent).ok()
    }
}

/// Flat per-attribute arrays. Entry `i` of each channel belongs to vertex `i`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VertexBuffer {
    /// `[x, y, z, x, y, z, ...]`
    pub positions: Option<Vec<f32>>,

    /// `[nx, ny, nz, ...]`
    pub normals: Option<Vec<f32>>,

    /// `[u, v, ...]` for the first UV channel
    pub uv0: Option<Vec<f32>>,

    /// `[u, v, ...]` for the second UV channel
    pub uv1: Option<Vec<f32>>,
}

impl VertexBuffer {
    /// Number of whole vertices described by the position channel.
    pub fn vertex_count(&self) -> usize {
        self.positions.as_ref().map_or(0, |p| p.len() / 3)
    }
}

/// A mesh definition referencing a vertex buffer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshDef {
    /// Mesh name (`Mesh_<index>` when absent)
    pub name: String,

    /// Index into `ParsedModel::vertex_buffers`; `None` if absent or out of range
    pub vertex_buffer: Option<usize>,

    /// Raw triangle indices, unvalidated
    pub indices: Option<Vec<i64>>,
}

/// Binds one mesh to one node's placement and optionally one material.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeshInstance {
    pub node: Option<usize>,
    pub mesh: Option<usize>,
    pub material: Option<usize>,
}

/// A material definition. The diffuse map wins over the flat color.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaterialDef {
    /// Slot in the `materials` array
    pub index: usize,

    /// Material name (`Material_<index>` when absent)
    pub name: String,

    /// Diffuse texture path as written in the document
    pub diffuse_map: Option<String>,

    /// Flat diffuse color, 0..255 per channel. Only read when there is no map.
    pub diffuse_color: Option<[u8; 3]>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_parent_index() {
        assert_eq!(Node::new(0, "root").parent_index(), None);
        assert_eq!(Node::new(1, "child").with_parent(0).parent_index(), Some(0));
        assert_eq!(Node::new(2, "odd").with_parent(-7).parent_index(), None);
    }

    #[test]
    fn test_node_local_matrix_identity_by_default() {
        let node = Node::new(0, "n");
        assert!(node.local_matrix().abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn test_vertex_count_ignores_partial_vertex() {
        let vb = VertexBuffer {
            positions: Some(vec![0.0, 0.0, 0.0, 1.0, 0.0]),
            ..Default::default()
        };
        assert_eq!(vb.vertex_count(), 1);
    }

    #[test]
    fn test_has_positions_requires_valid_buffer() {
        let model = ParsedModel {
            vertex_buffers: vec![VertexBuffer {
                positions: Some(vec![0.0; 9]),
                ..Default::default()
            }],
            meshes: vec![
                MeshDef {
                    name: "ok".into(),
                    vertex_buffer: Some(0),
                    indices: None,
                },
                MeshDef {
                    name: "none".into(),
                    vertex_buffer: None,
                    indices: None,
                },
            ],
            ..Default::default()
        };

        assert!(model.has_positions(&model.meshes[0]));
        assert!(!model.has_positions(&model.meshes[1]));
        assert!(model.mesh(Some(5)).is_none());
        assert!(model.mesh(None).is_none());
    }
}
