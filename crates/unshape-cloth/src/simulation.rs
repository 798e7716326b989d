//! Per-frame step driver.
//!
//! Splits the frame delta into a fixed number of substeps. Each substep runs
//! integration, one relaxation pass, and collision response, in that order.
//! Normals are recomputed once after the last substep and the result is
//! published to the cloth's vertex buffer.

use tracing::{debug, debug_span, trace, warn};

use crate::cloth::Cloth;
use crate::collision::{CollisionStats, Ground, Sphere, resolve_collisions};
use crate::config::StepConfig;
use crate::error::{ClothError, Result};
use crate::integrate::integrate;
use crate::normals::recompute_normals;
use crate::relax::relax;

/// Summary of one frame step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepStats {
    /// Substeps run. Zero for a zero-length frame.
    pub substeps: u32,
    /// Duration of each substep in seconds.
    pub sub_dt: f32,
    /// Sphere contacts summed over all substeps.
    pub sphere_contacts: usize,
    /// Ground contacts summed over all substeps.
    pub ground_contacts: usize,
}

/// Drives cloth steps with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Simulation {
    /// Step parameters.
    pub config: StepConfig,
}

impl Simulation {
    /// Creates a driver with the given configuration.
    pub fn new(config: StepConfig) -> Self {
        Self { config }
    }

    /// Advances the cloth by `dt` seconds.
    ///
    /// Fails without touching the cloth if it has no mesh data, if `dt` is
    /// negative or not finite, or if the configured substep count is zero.
    /// A `dt` of zero leaves every vertex in place and only recomputes normals.
    pub fn step(
        &self,
        dt: f32,
        cloth: &mut Cloth,
        sphere: &Sphere,
        ground: &Ground,
    ) -> Result<StepStats> {
        let config = &self.config;

        if !(dt.is_finite() && dt >= 0.0) {
            warn!(dt, "rejecting cloth step");
            return Err(ClothError::InvalidTimeStep(dt));
        }
        if config.iterations == 0 {
            warn!("rejecting cloth step with zero substeps");
            return Err(ClothError::InvalidIterations);
        }
        if let Err(err) = cloth.validate() {
            warn!(%err, "cloth is not ready to step");
            return Err(err);
        }

        let dt = match config.max_dt {
            Some(max_dt) if dt > max_dt => {
                debug!(dt, max_dt, "clamping frame delta");
                max_dt
            }
            _ => dt,
        };

        let _span = debug_span!("cloth_step", dt, vertices = cloth.vertex_count()).entered();

        // A zero delta only refreshes normals; Verlet would otherwise keep
        // carrying the implied velocity.
        let substeps = if dt > 0.0 { config.iterations } else { 0 };
        let sub_dt = dt / config.iterations as f32;
        let offset = cloth.position;
        let mut contacts = CollisionStats::default();

        {
            let (vertices, neighbors, rest) = cloth.parts_mut();
            for substep in 0..substeps {
                integrate(vertices, config.gravity, sub_dt);
                relax(vertices, neighbors, rest);
                let stats = resolve_collisions(vertices, offset, sphere, ground, config);
                trace!(
                    substep,
                    sphere = stats.sphere_contacts,
                    ground = stats.ground_contacts,
                    "substep"
                );
                contacts += stats;
            }
        }

        let (vertices, indices) = cloth.vertices_and_indices_mut();
        recompute_normals(vertices, indices);
        cloth.publish();

        let stats = StepStats {
            substeps,
            sub_dt,
            sphere_contacts: contacts.sphere_contacts,
            ground_contacts: contacts.ground_contacts,
        };
        debug!(
            sphere_contacts = stats.sphere_contacts,
            ground_contacts = stats.ground_contacts,
            "cloth step complete"
        );

        Ok(stats)
    }
}

/// Advances the cloth by `dt` seconds with [`StepConfig::default`].
pub fn step(dt: f32, cloth: &mut Cloth, sphere: &Sphere, ground: &Ground) -> Result<StepStats> {
    Simulation::default().step(dt, cloth, sphere, ground)
}
