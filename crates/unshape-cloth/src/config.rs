//! Simulation parameters for the cloth step.

use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for one cloth step.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StepConfig {
    /// Constant acceleration applied to every vertex, in scene units per
    /// second squared.
    pub gravity: Vec3,
    /// Distance from the sphere surface at which contact starts.
    pub sphere_skin: f32,
    /// Fraction of sphere penetration corrected per substep.
    pub sphere_stiffness: f32,
    /// Height above the ground at which contact starts.
    pub ground_skin: f32,
    /// Fraction of horizontal velocity removed on ground contact (0-1).
    pub ground_friction: f32,
    /// Fraction of vertical velocity kept, reversed, on ground contact (0-1).
    pub ground_restitution: f32,
    /// Number of substeps per frame.
    pub iterations: u32,
    /// Upper bound on the frame delta. `None` leaves it unclamped.
    pub max_dt: Option<f32>,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self::cloth()
    }
}

impl StepConfig {
    /// Parameters tuned for a cloth sheet draping onto colliders.
    ///
    /// Gravity is Earth gravity at one scene unit per ten meters. The sphere
    /// push only corrects a small fraction of penetration per substep, so at
    /// full 9.81 a sheet falls through the sphere before the push catches up.
    pub fn cloth() -> Self {
        Self {
            gravity: Vec3::new(0.0, -0.981, 0.0),
            sphere_skin: 0.1,
            sphere_stiffness: 0.004,
            ground_skin: 0.1,
            ground_friction: 0.01,
            ground_restitution: 0.2,
            iterations: 10,
            max_dt: None,
        }
    }

    /// Parameters for a free-falling, bouncing point mass.
    ///
    /// Much higher friction and restitution than [`StepConfig::cloth`].
    pub fn point_mass() -> Self {
        Self {
            ground_friction: 0.98,
            ground_restitution: 0.8,
            ..Self::cloth()
        }
    }

    /// Sets the gravity vector.
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    /// Sets the substep count.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Clamps frame deltas to at most `max_dt` seconds.
    pub fn with_max_dt(mut self, max_dt: f32) -> Self {
        self.max_dt = Some(max_dt);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_cloth() {
        let config = StepConfig::default();
        assert_eq!(config, StepConfig::cloth());
        assert_eq!(config.iterations, 10);
        assert_eq!(config.ground_friction, 0.01);
        assert_eq!(config.ground_restitution, 0.2);
        assert!(config.max_dt.is_none());
    }

    #[test]
    fn test_point_mass_preset() {
        let config = StepConfig::point_mass();
        assert_eq!(config.ground_friction, 0.98);
        assert_eq!(config.ground_restitution, 0.8);
        assert_eq!(config.gravity, StepConfig::cloth().gravity);
    }

    #[test]
    fn test_cloth_gravity_scale() {
        let config = StepConfig::cloth();
        assert_eq!(config.gravity.x, 0.0);
        assert_eq!(config.gravity.z, 0.0);
        assert!((config.gravity.y + 0.981).abs() < 1e-6);
    }

    #[test]
    fn test_builders() {
        let config = StepConfig::cloth()
            .with_gravity(Vec3::ZERO)
            .with_iterations(4)
            .with_max_dt(0.05);

        assert_eq!(config.gravity, Vec3::ZERO);
        assert_eq!(config.iterations, 4);
        assert_eq!(config.max_dt, Some(0.05));
    }
}
