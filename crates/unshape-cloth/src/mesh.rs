//! Grid mesh generation for cloth sheets.

use glam::{UVec2, Vec3};

/// Positions and triangle indices for a cloth sheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClothMesh {
    /// Vertex positions in cloth-local space, row-major.
    pub positions: Vec<Vec3>,
    /// Triangle indices (every 3 indices form a triangle).
    pub indices: Vec<u32>,
}

impl ClothMesh {
    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Generates a flat sheet in the local XZ plane, centered at the origin.
///
/// Columns run along +X, rows along +Z. Each cell is split into two
/// triangles wound so that face normals point along +Y.
///
/// Division counts below 1 are raised to 1, so the result always has at least
/// one cell. [`Cloth::new`](crate::Cloth::new) rejects zero divisions instead.
pub fn generate_grid(width: f32, length: f32, divisions: UVec2) -> ClothMesh {
    let divisions = divisions.max(UVec2::ONE);
    let cols = divisions.x + 1;
    let rows = divisions.y + 1;

    let half_width = width / 2.0;
    let half_length = length / 2.0;

    let mut positions = Vec::with_capacity((cols * rows) as usize);
    for row in 0..rows {
        let v = row as f32 / divisions.y as f32;
        let z = -half_length + length * v;

        for col in 0..cols {
            let u = col as f32 / divisions.x as f32;
            let x = -half_width + width * u;
            positions.push(Vec3::new(x, 0.0, z));
        }
    }

    let mut indices = Vec::with_capacity((divisions.x * divisions.y * 6) as usize);
    for row in 0..divisions.y {
        for col in 0..divisions.x {
            let i0 = row * cols + col;
            let i1 = i0 + 1;
            let i2 = i0 + cols;
            let i3 = i2 + 1;

            indices.extend_from_slice(&[i0, i2, i1]);
            indices.extend_from_slice(&[i1, i2, i3]);
        }
    }

    tracing::debug!(
        vertices = positions.len(),
        indices = indices.len(),
        "generated cloth grid"
    );

    ClothMesh { positions, indices }
}
