use cgmath::{Vector2, Vector3};
use thiserror::Error;

use super::VertexPositionTextureNormal;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error("attribute lengths differ: {positions} positions, {normals} normals, {uvs} uvs")]
    LengthMismatch {
        positions: usize,
        normals: usize,
        uvs: usize,
    },

    #[error("index {index} at slot {slot} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        slot: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("index buffer length {0} is not a multiple of 3")]
    IncompleteTriangle(usize),
}

/// Triangle mesh with parallel per-vertex attribute buffers.
///
/// Builders always regenerate a mesh completely before handing it to a
/// [`RenderSurface`](super::RenderSurface); nothing patches one in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceMesh {
    pub positions: Vec<Vector3<f32>>,
    pub normals: Vec<Vector3<f32>>,
    pub uvs: Vec<Vector2<f32>>,
    pub indices: Vec<u32>,
}

impl SurfaceMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        SurfaceMesh {
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            uvs: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(triangles * 3),
        }
    }

    /// Drop all geometry but keep the allocations for the next build.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.normals.clear();
        self.uvs.clear();
        self.indices.clear();
    }

    pub fn reserve(&mut self, vertices: usize, triangles: usize) {
        self.positions.reserve(vertices);
        self.normals.reserve(vertices);
        self.uvs.reserve(vertices);
        self.indices.reserve(triangles * 3);
    }

    /// Append a vertex and return its index.
    pub fn push_vertex(
        &mut self,
        position: Vector3<f32>,
        normal: Vector3<f32>,
        uv: Vector2<f32>,
    ) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.normals.push(normal);
        self.uvs.push(uv);
        index
    }

    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Append `other`, rebasing its indices past the current vertices.
    pub fn append(&mut self, other: &SurfaceMesh) {
        let offset = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        self.indices
            .extend(other.indices.iter().map(|index| index + offset));
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }

    pub fn validate(&self) -> Result<(), MeshError> {
        let positions = self.positions.len();
        if self.normals.len() != positions || self.uvs.len() != positions {
            return Err(MeshError::LengthMismatch {
                positions,
                normals: self.normals.len(),
                uvs: self.uvs.len(),
            });
        }

        if self.indices.len() % 3 != 0 {
            return Err(MeshError::IncompleteTriangle(self.indices.len()));
        }

        if let Some((slot, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|(_, index)| **index as usize >= positions)
        {
            return Err(MeshError::IndexOutOfRange {
                slot,
                index,
                vertex_count: positions,
            });
        }

        Ok(())
    }

    /// Axis-aligned bounds, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vector3<f32>, Vector3<f32>)> {
        let first = *self.positions.first()?;
        let bounds = self
            .positions
            .iter()
            .skip(1)
            .fold((first, first), |(min, max), p| {
                (
                    Vector3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z)),
                    Vector3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z)),
                )
            });
        Some(bounds)
    }

    pub fn to_vertices(&self) -> Vec<VertexPositionTextureNormal> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .map(|((&position, &normal), &uv)| VertexPositionTextureNormal {
                position,
                uv,
                normal,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{vec2, vec3};

    fn unit_triangle() -> SurfaceMesh {
        let mut mesh = SurfaceMesh::new();
        let normal = vec3(0.0, 0.0, 1.0);
        let a = mesh.push_vertex(vec3(0.0, 0.0, 0.0), normal, vec2(0.0, 0.0));
        let b = mesh.push_vertex(vec3(1.0, 0.0, 0.0), normal, vec2(1.0, 0.0));
        let c = mesh.push_vertex(vec3(0.0, 1.0, 0.0), normal, vec2(0.0, 1.0));
        mesh.push_triangle(a, b, c);
        mesh
    }

    #[test]
    fn test_push_and_count() {
        let mesh = unit_triangle();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.triangles().collect::<Vec<_>>(), vec![[0, 1, 2]]);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_append_offsets_indices() {
        let mut mesh = unit_triangle();
        mesh.append(&unit_triangle());

        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_index() {
        let mut mesh = unit_triangle();
        mesh.push_triangle(0, 1, 9);
        assert_eq!(
            mesh.validate(),
            Err(MeshError::IndexOutOfRange {
                slot: 5,
                index: 9,
                vertex_count: 3,
            })
        );
    }

    #[test]
    fn test_validate_rejects_length_mismatch() {
        let mut mesh = unit_triangle();
        mesh.uvs.pop();
        assert!(matches!(
            mesh.validate(),
            Err(MeshError::LengthMismatch { uvs: 2, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_partial_triangle() {
        let mut mesh = unit_triangle();
        mesh.indices.push(0);
        assert_eq!(mesh.validate(), Err(MeshError::IncompleteTriangle(4)));
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut mesh = unit_triangle();
        let capacity = mesh.positions.capacity();
        mesh.clear();
        assert!(mesh.is_empty());
        assert_eq!(mesh.positions.capacity(), capacity);
    }

    #[test]
    fn test_bounds() {
        let mesh = unit_triangle();
        let (min, max) = mesh.bounds().unwrap();
        assert_eq!(min, vec3(0.0, 0.0, 0.0));
        assert_eq!(max, vec3(1.0, 1.0, 0.0));
        assert!(SurfaceMesh::new().bounds().is_none());
    }

    #[test]
    fn test_to_vertices_interleaves() {
        let vertices = unit_triangle().to_vertices();
        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices[1].position, vec3(1.0, 0.0, 0.0));
        assert_eq!(vertices[1].uv, vec2(1.0, 0.0));
        assert_eq!(vertices[1].normal, vec3(0.0, 0.0, 1.0));
    }
}
