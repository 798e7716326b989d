//! Collision response against a sphere and a bounded ground plane.
//!
//! Checks are brute force, one vertex at a time, in world space (vertex
//! position plus the cloth's translation). Corrections are written back in
//! cloth-local space, which differs from world space only by that translation.
//!
//! - Sphere contact is soft: only a small fraction of the penetration is
//!   removed per substep, and half of that is also applied to the previous
//!   position so part of the push becomes outward velocity.
//! - Ground contact is hard: the vertex is projected onto the skin height and
//!   its implied velocity is reflected with restitution and friction.

use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cloth::Vertex;
use crate::config::StepConfig;
use crate::error::{ClothError, Result};

/// A static sphere collider.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sphere {
    /// World-space center.
    pub center: Vec3,
    /// Radius.
    pub radius: f32,
}

impl Sphere {
    /// Creates a sphere collider. The radius must be positive and finite.
    pub fn new(center: Vec3, radius: f32) -> Result<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ClothError::InvalidSphere(radius));
        }
        Ok(Self { center, radius })
    }
}

/// A horizontal rectangle the cloth can land on.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ground {
    /// Center of the rectangle; `center.y` is the ground height.
    pub center: Vec3,
    /// Extent along X.
    pub width: f32,
    /// Extent along Z.
    pub length: f32,
}

impl Ground {
    /// Creates a ground rectangle. Both extents must be positive and finite.
    pub fn new(center: Vec3, width: f32, length: f32) -> Result<Self> {
        if !(width.is_finite() && length.is_finite() && width > 0.0 && length > 0.0) {
            return Err(ClothError::InvalidGround { width, length });
        }
        Ok(Self {
            center,
            width,
            length,
        })
    }

    /// Ground height.
    pub fn height(&self) -> f32 {
        self.center.y
    }

    /// Returns true if `(x, z)` lies within the rectangle, edges included.
    pub fn contains(&self, x: f32, z: f32) -> bool {
        (x - self.center.x).abs() <= self.width / 2.0
            && (z - self.center.z).abs() <= self.length / 2.0
    }
}

/// Contacts found during a collision pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionStats {
    /// Vertices within the sphere's skin.
    pub sphere_contacts: usize,
    /// Vertices within the ground's skin and bounds.
    pub ground_contacts: usize,
}

impl std::ops::AddAssign for CollisionStats {
    fn add_assign(&mut self, other: Self) {
        self.sphere_contacts += other.sphere_contacts;
        self.ground_contacts += other.ground_contacts;
    }
}

/// Pushes a vertex out of the sphere. Returns whether it was in contact.
pub fn resolve_sphere(
    vertex: &mut Vertex,
    offset: Vec3,
    sphere: &Sphere,
    skin: f32,
    stiffness: f32,
) -> bool {
    let delta = vertex.position + offset - sphere.center;
    let distance = delta.length();

    if distance - sphere.radius > skin {
        return false;
    }

    let direction = if distance > f32::EPSILON {
        delta / distance
    } else {
        Vec3::Y
    };
    let penetration = sphere.radius + skin - distance;
    let correction = direction * penetration * stiffness;

    vertex.position += correction;
    vertex.previous += correction * 0.5;
    true
}

/// Projects a vertex onto the ground skin and reflects its velocity.
/// Returns whether it was in contact.
pub fn resolve_ground(
    vertex: &mut Vertex,
    offset: Vec3,
    ground: &Ground,
    skin: f32,
    friction: f32,
    restitution: f32,
) -> bool {
    let world = vertex.position + offset;
    let height = world.y - ground.height();

    if height > skin || !ground.contains(world.x, world.z) {
        return false;
    }

    vertex.position.y += skin - height;

    let mut velocity = vertex.velocity();
    velocity.x *= 1.0 - friction;
    velocity.z *= 1.0 - friction;
    velocity.y *= -restitution;
    vertex.previous = vertex.position - velocity;
    true
}

/// Resolves sphere then ground contact for every vertex.
pub fn resolve_collisions(
    vertices: &mut [Vertex],
    offset: Vec3,
    sphere: &Sphere,
    ground: &Ground,
    config: &StepConfig,
) -> CollisionStats {
    let mut stats = CollisionStats::default();

    for vertex in vertices {
        if resolve_sphere(
            vertex,
            offset,
            sphere,
            config.sphere_skin,
            config.sphere_stiffness,
        ) {
            stats.sphere_contacts += 1;
        }
        if resolve_ground(
            vertex,
            offset,
            ground,
            config.ground_skin,
            config.ground_friction,
            config.ground_restitution,
        ) {
            stats.ground_contacts += 1;
        }
    }

    stats
}
