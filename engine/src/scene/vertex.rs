use cgmath::{Vector2, Vector3};

/// Interleaved layout consumed by textured, lit materials.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct VertexPositionTextureNormal {
    pub position: Vector3<f32>,
    pub uv: Vector2<f32>,
    pub normal: Vector3<f32>,
}
