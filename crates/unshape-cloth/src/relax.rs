//! Distance constraint relaxation over the grid topology.
//!
//! One Gauss-Seidel pass per substep: vertices are visited in ascending index
//! order and each correction is visible to every later link in the same pass.
//! Reordering the traversal changes the numerical result.

use crate::cloth::{RestLengths, Vertex};
use crate::topology::{EdgeClass, Neighbors};

/// Fraction of the length error corrected per pass for structural links.
pub const STRUCTURAL_FACTOR: f32 = 0.2;
/// Fraction of the length error corrected per pass for bend links.
pub const BEND_FACTOR: f32 = 0.2;
/// Fraction of the length error corrected per pass for shear links.
pub const SHEAR_FACTOR: f32 = 0.1;

/// Links shorter than this are skipped instead of divided by.
pub const MIN_CONSTRAINT_LENGTH: f32 = 1e-6;

/// Relaxation factor for a constraint class.
#[inline]
pub fn relaxation_factor(class: EdgeClass) -> f32 {
    match class {
        EdgeClass::Structural => STRUCTURAL_FACTOR,
        EdgeClass::Bend => BEND_FACTOR,
        EdgeClass::Shear => SHEAR_FACTOR,
    }
}

/// Runs a single relaxation pass.
///
/// `neighbors` must have one entry per vertex.
pub fn relax(vertices: &mut [Vertex], neighbors: &[Neighbors], rest: &RestLengths) {
    for (i, links) in neighbors.iter().enumerate() {
        for link in links.iter() {
            let j = link.index;
            let delta = vertices[j].position - vertices[i].position;
            let length = delta.length();

            // Coincident vertices have no direction to correct along.
            if length < MIN_CONSTRAINT_LENGTH {
                continue;
            }

            let rest_length = rest.for_link(link);
            let correction =
                delta * ((length - rest_length) / length) * relaxation_factor(link.class);

            vertices[i].position += correction;
            vertices[j].position -= correction;
        }
    }
}
