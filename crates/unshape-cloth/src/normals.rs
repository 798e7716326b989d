//! Per-vertex shading normals.

use glam::Vec3;

use crate::cloth::Vertex;

/// Recomputes vertex normals from the triangle list.
///
/// Each face contributes its cross product `(p1 - p0) x (p2 - p0)`,
/// unnormalized, to its three vertices; the sums are normalized at the end.
/// Vertices referenced by no triangle, or whose faces cancel out, get a zero
/// normal.
pub fn recompute_normals(vertices: &mut [Vertex], indices: &[u32]) {
    for vertex in vertices.iter_mut() {
        vertex.normal = Vec3::ZERO;
    }

    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let p0 = vertices[i0].position;
        let p1 = vertices[i1].position;
        let p2 = vertices[i2].position;

        let normal = (p1 - p0).cross(p2 - p0);

        vertices[i0].normal += normal;
        vertices[i1].normal += normal;
        vertices[i2].normal += normal;
    }

    for vertex in vertices.iter_mut() {
        vertex.normal = vertex.normal.normalize_or_zero();
    }
}
