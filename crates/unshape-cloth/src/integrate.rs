//! Verlet position integration.

use glam::Vec3;

use crate::cloth::Vertex;

/// Advances every vertex by one substep under constant acceleration.
///
/// `x_new = 2x - x_prev + a*dt^2`. No damping is applied here.
pub fn integrate(vertices: &mut [Vertex], acceleration: Vec3, dt: f32) {
    let step = acceleration * dt * dt;

    for vertex in vertices {
        let current = vertex.position;
        vertex.position = 2.0 * current - vertex.previous + step;
        vertex.previous = current;
    }
}
