//! Triangle geometry produced by the importer.
//!
//! A `Geometry` is a plain indexed triangle mesh with optional per-vertex
//! normals and up to two UV channels. It carries no GPU or host types; a
//! host can borrow the flat buffers directly via [`Geometry::flat_vertices`]
//! and [`Geometry::flat_indices`].

use pc_math::{Aabb, Vec2, Vec3};

/// An indexed triangle mesh.
#[derive(Clone, Debug)]
pub struct Geometry {
    /// Mesh name from the source document
    pub name: String,

    /// Vertex positions (one Vec3 per vertex)
    pub vertices: Vec<Vec3>,

    /// Triangles as vertex index triples, counter-clockwise front faces
    pub faces: Vec<[u32; 3]>,

    /// Per-vertex normals
    pub normals: Option<Vec<Vec3>>,

    /// First UV channel (one per vertex)
    pub uv0: Option<Vec<Vec2>>,

    /// Second UV channel, independent of the first
    pub uv1: Option<Vec<Vec2>>,

    /// Axis-aligned bounding box of the vertices
    pub bounds: Aabb,
}

impl Geometry {
    /// Host-facing name of the first UV channel.
    pub const UV0_NAME: &'static str = "UVMap";

    /// Host-facing name of the second UV channel.
    pub const UV1_NAME: &'static str = "UV2";

    /// Create geometry from positions and faces. Normals and UVs start empty.
    pub fn new(name: impl Into<String>, vertices: Vec<Vec3>, faces: Vec<[u32; 3]>) -> Self {
        let bounds = Self::compute_bounds(&vertices);
        Self {
            name: name.into(),
            vertices,
            faces,
            normals: None,
            uv0: None,
            uv1: None,
            bounds,
        }
    }

    /// Attach both UV channels.
    pub fn with_uvs(mut self, uv0: Option<Vec<Vec2>>, uv1: Option<Vec<Vec2>>) -> Self {
        self.uv0 = uv0;
        self.uv1 = uv1;
        self
    }

    /// Attach explicit per-vertex normals.
    pub fn with_normals(mut self, normals: Vec<Vec3>) -> Self {
        self.normals = Some(normals);
        self
    }

    fn compute_bounds(vertices: &[Vec3]) -> Aabb {
        vertices
            .iter()
            .fold(Aabb::empty(), |acc, &p| acc.include_point(p))
    }

    /// Compute smooth vertex normals by averaging face normals.
    ///
    /// Face normals are area-weighted (unnormalized cross products) and use
    /// counter-clockwise winding. Vertices not used by any face, or whose
    /// faces cancel out, get +Y.
    pub fn compute_normals(&mut self) {
        let vertex_count = self.vertices.len();
        let mut normals = vec![Vec3::ZERO; vertex_count];

        for face in &self.faces {
            let [i0, i1, i2] = face.map(|i| i as usize);
            if i0 >= vertex_count || i1 >= vertex_count || i2 >= vertex_count {
                continue;
            }

            let p0 = self.vertices[i0];
            let edge1 = self.vertices[i1] - p0;
            let edge2 = self.vertices[i2] - p0;
            let face_normal = edge1.cross(edge2);

            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        }

        for normal in &mut normals {
            let len = normal.length();
            if len > 0.0 {
                *normal /= len;
            } else {
                *normal = Vec3::Y;
            }
        }

        self.normals = Some(normals);
    }

    pub fn has_normals(&self) -> bool {
        self.normals.is_some()
    }

    pub fn has_uv0(&self) -> bool {
        self.uv0.is_some()
    }

    pub fn has_uv1(&self) -> bool {
        self.uv1.is_some()
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Positions as `[x, y, z, x, y, z, ...]` without copying.
    pub fn flat_vertices(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Faces as a flat index list without copying.
    pub fn flat_indices(&self) -> &[u32] {
        bytemuck::cast_slice(&self.faces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Geometry {
        Geometry::new(
            "tri",
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        )
    }

    #[test]
    fn test_geometry_creation() {
        let geometry = triangle();

        assert_eq!(geometry.vertex_count(), 3);
        assert_eq!(geometry.triangle_count(), 1);
        assert!(!geometry.has_normals());
        assert!(!geometry.has_uv0());
        assert!(!geometry.has_uv1());
    }

    #[test]
    fn test_compute_normals_ccw() {
        let mut geometry = triangle();
        geometry.compute_normals();

        // CCW triangle in the XY plane viewed from +Z faces +Z
        for normal in geometry.normals.as_ref().unwrap() {
            assert!((normal.z - 1.0).abs() < 0.001);
        }
    }

    #[test]
    fn test_unused_vertex_gets_up_normal() {
        let mut geometry = triangle();
        geometry.vertices.push(Vec3::new(5.0, 5.0, 5.0));
        geometry.compute_normals();

        let normals = geometry.normals.as_ref().unwrap();
        assert_eq!(normals[3], Vec3::Y);
    }

    #[test]
    fn test_bounds_computation() {
        let geometry = Geometry::new(
            "b",
            vec![
                Vec3::new(-1.0, -2.0, -3.0),
                Vec3::new(4.0, 5.0, 6.0),
                Vec3::new(0.0, 0.0, 0.0),
            ],
            vec![[0, 1, 2]],
        );

        assert_eq!(geometry.bounds.min(), Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(geometry.bounds.max(), Vec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_flat_buffers() {
        let geometry = triangle();

        assert_eq!(
            geometry.flat_vertices(),
            &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
        );
        assert_eq!(geometry.flat_indices(), &[0, 1, 2]);
    }
}

