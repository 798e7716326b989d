//! Interleaved vertex buffer published to renderers.
//!
//! The simulation owns vertex state; this buffer is a copy written once per
//! frame by [`VertexBuffer::publish`] and only read afterwards.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::cloth::Vertex;

/// Float offset of the position within a packed vertex.
pub const POSITION_OFFSET: usize = 0;
/// Float offset of the normal within a packed vertex.
pub const NORMAL_OFFSET: usize = 3;
/// Float offset of the color within a packed vertex.
pub const COLOR_OFFSET: usize = 6;
/// Number of floats per packed vertex.
pub const FLOATS_PER_VERTEX: usize = 9;

/// One interleaved vertex: position, normal, color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PackedVertex {
    /// Cloth-local position.
    pub position: [f32; 3],
    /// Unit shading normal.
    pub normal: [f32; 3],
    /// RGB color.
    pub color: [f32; 3],
}

impl PackedVertex {
    /// Creates a packed vertex.
    pub fn new(position: Vec3, normal: Vec3, color: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            color: color.to_array(),
        }
    }
}

/// Renderer-facing vertex data with a fixed layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexBuffer {
    vertices: Vec<PackedVertex>,
}

impl VertexBuffer {
    /// Creates a buffer from packed vertices.
    pub fn new(vertices: Vec<PackedVertex>) -> Self {
        Self { vertices }
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if the buffer holds no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Copies position and normal from simulation state. Colors are kept.
    ///
    /// Only the first `min(self.len(), vertices.len())` entries are written;
    /// callers validate sizes beforehand.
    pub fn publish(&mut self, vertices: &[Vertex]) {
        for (packed, vertex) in self.vertices.iter_mut().zip(vertices) {
            packed.position = vertex.position.to_array();
            packed.normal = vertex.normal.to_array();
        }
    }

    /// Packed vertices.
    pub fn as_slice(&self) -> &[PackedVertex] {
        &self.vertices
    }

    /// Raw interleaved floats, `FLOATS_PER_VERTEX` per vertex.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw bytes, ready for upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Stride of one vertex in bytes.
    pub const fn stride() -> usize {
        std::mem::size_of::<PackedVertex>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        assert_eq!(VertexBuffer::stride(), FLOATS_PER_VERTEX * 4);

        let buffer = VertexBuffer::new(vec![PackedVertex::new(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::Y,
            Vec3::new(0.5, 0.6, 0.7),
        )]);
        let floats = buffer.as_floats();

        assert_eq!(floats.len(), FLOATS_PER_VERTEX);
        assert_eq!(&floats[POSITION_OFFSET..POSITION_OFFSET + 3], &[1.0, 2.0, 3.0]);
        assert_eq!(&floats[NORMAL_OFFSET..NORMAL_OFFSET + 3], &[0.0, 1.0, 0.0]);
        assert_eq!(&floats[COLOR_OFFSET..COLOR_OFFSET + 3], &[0.5, 0.6, 0.7]);
        assert_eq!(buffer.as_bytes().len(), VertexBuffer::stride());
    }

    #[test]
    fn test_publish_keeps_color() {
        let color = Vec3::new(0.2, 0.4, 0.8);
        let mut buffer = VertexBuffer::new(vec![PackedVertex::new(Vec3::ZERO, Vec3::Y, color); 2]);

        let mut vertices = vec![Vertex::new(Vec3::ZERO); 2];
        vertices[1].position = Vec3::new(1.0, -1.0, 0.5);
        vertices[1].normal = Vec3::X;

        buffer.publish(&vertices);

        let packed = buffer.as_slice()[1];
        assert_eq!(packed.position, [1.0, -1.0, 0.5]);
        assert_eq!(packed.normal, [1.0, 0.0, 0.0]);
        assert_eq!(packed.color, color.to_array());
    }
}
