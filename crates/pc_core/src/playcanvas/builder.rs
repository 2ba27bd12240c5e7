//! Mesh reconstruction from flat vertex-buffer arrays.
//!
//! Faces come from the index list when it holds at least one triple, and
//! from consecutive vertex triples otherwise. Each candidate triangle passes
//! through [`valid_triangle`] before it becomes a face. Channels whose
//! length does not match the vertex count are dropped rather than trusted.

use std::collections::HashSet;

use pc_math::{Vec2, Vec3};

use crate::mesh::Geometry;
use crate::options::UvFlip;

use super::types::{MeshDef, VertexBuffer};

/// Builds [`Geometry`] from a mesh definition and its vertex buffer.
#[derive(Clone, Copy, Debug, Default)]
pub struct MeshBuilder {
    uv_flip: UvFlip,
}

impl MeshBuilder {
    pub fn new(uv_flip: UvFlip) -> Self {
        Self { uv_flip }
    }

    /// Build geometry. Never fails; bad faces and channels are skipped.
    pub fn build(&self, mesh: &MeshDef, buffer: &VertexBuffer) -> Geometry {
        let vertices = buffer
            .positions
            .as_deref()
            .map(|p| to_vec3s(p, &mesh.name))
            .unwrap_or_default();
        let vertex_count = vertices.len();

        let faces = triangulate(mesh.indices.as_deref(), vertex_count);
        if let Some(indices) = &mesh.indices {
            let offered = indices.len() / 3;
            if indices.len() >= 3 && faces.len() < offered {
                log::debug!(
                    "Mesh '{}': skipped {} of {} triangles",
                    mesh.name,
                    offered - faces.len(),
                    offered
                );
            }
        }

        let uv0 = uv_channel(buffer.uv0.as_deref(), vertex_count, self.uv_flip);
        let uv1 = uv_channel(buffer.uv1.as_deref(), vertex_count, self.uv_flip);
        if buffer.uv0.is_some() && uv0.is_none() {
            log::debug!("Mesh '{}': dropping {} (length mismatch)", mesh.name, Geometry::UV0_NAME);
        }
        if buffer.uv1.is_some() && uv1.is_none() {
            log::debug!("Mesh '{}': dropping {} (length mismatch)", mesh.name, Geometry::UV1_NAME);
        }

        let mut geometry = Geometry::new(mesh.name.clone(), vertices, faces).with_uvs(uv0, uv1);

        match buffer.normals.as_deref() {
            Some(normals) if normals.len() == 3 * vertex_count => {
                geometry = geometry.with_normals(to_vec3s(normals, &mesh.name));
            }
            other => {
                if other.is_some() {
                    log::debug!(
                        "Mesh '{}': normal count doesn't match {} vertices, computing smooth normals",
                        mesh.name,
                        vertex_count
                    );
                }
                geometry.compute_normals();
            }
        }

        geometry
    }
}

fn to_vec3s(flat: &[f32], mesh_name: &str) -> Vec<Vec3> {
    if flat.len() % 3 != 0 {
        log::debug!(
            "Mesh '{}': ignoring {} trailing values",
            mesh_name,
            flat.len() % 3
        );
    }
    flat.chunks_exact(3)
        .map(|c| Vec3::new(c[0], c[1], c[2]))
        .collect()
}

/// Produce faces from an index list, or sequentially when it is too short.
pub fn triangulate(indices: Option<&[i64]>, vertex_count: usize) -> Vec<[u32; 3]> {
    let mut seen = HashSet::new();
    let mut accept = |tri: [i64; 3]| {
        let face = valid_triangle(tri, vertex_count)?;
        let mut key = face;
        key.sort_unstable();
        seen.insert(key).then_some(face)
    };

    match indices {
        Some(indices) if indices.len() >= 3 => indices
            .chunks_exact(3)
            .filter_map(|c| accept([c[0], c[1], c[2]]))
            .collect(),
        _ => (0..vertex_count / 3)
            .filter_map(|k| {
                let base = 3 * k as i64;
                accept([base, base + 1, base + 2])
            })
            .collect(),
    }
}

/// A triangle is valid when every index is in range and all three differ.
pub fn valid_triangle(tri: [i64; 3], vertex_count: usize) -> Option<[u32; 3]> {
    let [a, b, c] = tri;
    if a == b || b == c || a == c {
        return None;
    }
    let in_range = |i: i64| {
        usize::try_from(i)
            .ok()
            .filter(|&i| i < vertex_count)
            .and_then(|i| u32::try_from(i).ok())
    };
    Some([in_range(a)?, in_range(b)?, in_range(c)?])
}

/// Accept a UV channel only when it has exactly one (u, v) per vertex.
pub fn uv_channel(data: Option<&[f32]>, vertex_count: usize, flip: UvFlip) -> Option<Vec<Vec2>> {
    let data = data?;
    if vertex_count == 0 || data.len() != 2 * vertex_count {
        return None;
    }
    Some(
        data.chunks_exact(2)
            .map(|uv| Vec2::new(uv[0], flip.apply(uv[1])))
            .collect(),
    )
}
