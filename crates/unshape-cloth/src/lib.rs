//! Grid cloth simulation for resin.
//!
//! Simulates a rectangular sheet of Verlet vertices falling under gravity onto
//! a sphere and a bounded ground rectangle:
//! - `Cloth` - vertex state, grid topology, and the renderer-facing buffer
//! - `Sphere` / `Ground` - static colliders
//! - `Simulation` - per-frame step driver with a `StepConfig`
//!
//! Each frame is split into substeps of Verlet integration, one Gauss-Seidel
//! distance-constraint pass, and collision response. Shading normals are
//! recomputed once per frame and copied into an interleaved vertex buffer.
//!
//! ```
//! use glam::Vec3;
//! use unshape_cloth::{Cloth, Ground, Simulation, Sphere, StepConfig};
//!
//! let mut cloth = Cloth::new(3.0, 3.0, 16, 16)?.with_position(Vec3::new(0.0, 2.0, 0.0));
//! cloth.generate_mesh();
//!
//! let sphere = Sphere::new(Vec3::new(0.0, 1.0, 0.0), 0.5)?;
//! let ground = Ground::new(Vec3::ZERO, 10.0, 10.0)?;
//! let sim = Simulation::new(StepConfig::cloth());
//!
//! for _ in 0..120 {
//!     sim.step(1.0 / 60.0, &mut cloth, &sphere, &ground)?;
//! }
//!
//! // The middle of the sheet rests on the sphere, the edges hang below it
//! let center = cloth.world_position(cloth.topology().index(8, 8)).unwrap();
//! let corner = cloth.world_position(0).unwrap();
//! assert!(center.y > 1.4 && center.y < 1.7);
//! assert!(corner.y < center.y);
//!
//! let floats: &[f32] = cloth.buffer().as_floats();
//! assert_eq!(floats.len(), cloth.vertex_count() * unshape_cloth::FLOATS_PER_VERTEX);
//! # Ok::<(), unshape_cloth::ClothError>(())
//! ```

pub mod buffer;
pub mod cloth;
pub mod collision;
pub mod config;
pub mod error;
pub mod integrate;
pub mod mesh;
pub mod normals;
pub mod relax;
pub mod simulation;
pub mod topology;

pub use buffer::{
    COLOR_OFFSET, FLOATS_PER_VERTEX, NORMAL_OFFSET, POSITION_OFFSET, PackedVertex, VertexBuffer,
};
pub use cloth::{Cloth, RestLengths, Vertex};
pub use collision::{
    CollisionStats, Ground, Sphere, resolve_collisions, resolve_ground, resolve_sphere,
};
pub use config::StepConfig;
pub use error::{ClothError, Result};
pub use integrate::integrate;
pub use mesh::{ClothMesh, generate_grid};
pub use normals::recompute_normals;
pub use relax::{MIN_CONSTRAINT_LENGTH, relax, relaxation_factor};
pub use simulation::{Simulation, StepStats, step};
pub use topology::{EdgeAxis, EdgeClass, GridTopology, Link, MAX_LINKS, Neighbors};


/// Invariant tests for cloth simulation.
///
/// Run with: cargo test -p unshape-cloth --features invariant-tests
#[cfg(all(test, feature = "invariant-tests"))]
mod invariant_tests {
    use super::*;
    use glam::Vec3;
    use std::collections::HashSet;

    fn far_sphere() -> Sphere {
        Sphere::new(Vec3::new(0.0, -100.0, 0.0), 1.0).unwrap()
    }

    fn far_ground() -> Ground {
        Ground::new(Vec3::new(0.0, -100.0, 0.0), 1.0, 1.0).unwrap()
    }

    fn sphere_penetration(cloth: &Cloth, sphere: &Sphere, skin: f32) -> Vec<f32> {
        (0..cloth.vertex_count())
            .map(|i| {
                let p = cloth.world_position(i).unwrap();
                sphere.radius + skin - (p - sphere.center).length()
            })
            .collect()
    }

    // ========================================================================
    // Topology
    // ========================================================================

    #[test]
    fn invariant_index_mapping_is_bijective() {
        for (dx, dy) in [(1, 1), (2, 7), (16, 3), (31, 31)] {
            let grid = GridTopology::from_divisions(dx, dy);
            let coords: HashSet<(usize, usize)> =
                (0..grid.vertex_count()).map(|i| grid.coords(i)).collect();

            assert_eq!(coords.len(), grid.vertex_count());
            for (row, col) in coords {
                let i = grid.index(row, col);
                assert!(i < grid.vertex_count());
                assert_eq!(grid.coords(i), (row, col));
            }
        }
    }

    #[test]
    fn invariant_links_stay_in_bounds() {
        let grid = GridTopology::from_divisions(7, 4);
        for neighbors in grid.neighbor_table() {
            assert!(neighbors.len() <= MAX_LINKS);
            for link in neighbors.iter() {
                assert!(link.index < grid.vertex_count());
            }
        }
    }

    // ========================================================================
    // Integration
    // ========================================================================

    #[test]
    fn invariant_equilibrium_without_gravity() {
        let mut cloth = Cloth::new(3.0, 2.0, 12, 8).unwrap();
        cloth.generate_mesh();
        let before: Vec<Vec3> = cloth.vertices().iter().map(|v| v.position).collect();
        let sim = Simulation::new(StepConfig::cloth().with_gravity(Vec3::ZERO));

        for _ in 0..300 {
            sim.step(1.0 / 60.0, &mut cloth, &far_sphere(), &far_ground())
                .unwrap();
        }

        for (vertex, p) in cloth.vertices().iter().zip(&before) {
            assert!(
                (vertex.position - *p).length() < 1e-4,
                "drifted from {p} to {}",
                vertex.position
            );
        }
    }

    #[test]
    fn invariant_free_fall_every_vertex_descends() {
        let mut cloth = Cloth::new(2.0, 2.0, 8, 8).unwrap();
        cloth.generate_mesh();

        for frame in 0..30 {
            let before: Vec<f32> = cloth.vertices().iter().map(|v| v.position.y).collect();
            step(1.0 / 60.0, &mut cloth, &far_sphere(), &far_ground()).unwrap();

            for (vertex, y) in cloth.vertices().iter().zip(&before) {
                assert!(vertex.position.y < *y, "frame {frame}: vertex rose");
            }
        }

        // Total fall over half a second, within the Verlet start-up error
        let dropped = -cloth.vertices()[0].position.y;
        let analytic = -0.5 * StepConfig::default().gravity.y * 0.5 * 0.5;
        assert!((dropped - analytic).abs() < analytic * 0.05);
    }

    // ========================================================================
    // Collision
    // ========================================================================

    #[test]
    fn invariant_ground_penetration_resolved_in_one_step() {
        let ground = Ground::new(Vec3::ZERO, 4.0, 4.0).unwrap();
        let mut cloth = Cloth::new(1.0, 1.0, 3, 3)
            .unwrap()
            .with_position(Vec3::new(0.0, -0.05, 0.0));
        cloth.generate_mesh();

        step(1.0 / 60.0, &mut cloth, &far_sphere(), &ground).unwrap();

        for i in 0..cloth.vertex_count() {
            assert!(cloth.world_position(i).unwrap().y >= 0.0);
        }
    }

    #[test]
    fn invariant_ground_bounce_reflects_velocity() {
        let ground = Ground::new(Vec3::ZERO, 4.0, 4.0).unwrap();
        let config = StepConfig::cloth()
            .with_gravity(Vec3::ZERO)
            .with_iterations(1);
        let sim = Simulation::new(config.clone());

        let mut cloth = Cloth::new(1.0, 1.0, 1, 1).unwrap();
        cloth.generate_mesh();
        for vertex in cloth.vertices_mut() {
            vertex.position.y = 0.13;
            vertex.previous.y = 0.15;
        }

        // First step: still above the skin, moving down
        sim.step(0.01, &mut cloth, &far_sphere(), &ground).unwrap();
        for vertex in cloth.vertices() {
            assert!((vertex.position.y - 0.11).abs() < 1e-5);
            assert!(vertex.velocity().y < 0.0);
        }

        // Second step: contact, vertical velocity reverses and shrinks
        let approach: Vec<f32> = cloth
            .vertices()
            .iter()
            .map(|v| config.ground_skin - v.position.y)
            .collect();
        sim.step(0.01, &mut cloth, &far_sphere(), &ground).unwrap();

        for (vertex, incoming) in cloth.vertices().iter().zip(&approach) {
            let outgoing = vertex.velocity().y;
            assert!(outgoing > 0.0);
            assert!((outgoing + config.ground_restitution * incoming).abs() < 1e-5);
        }
    }

    #[test]
    fn invariant_sphere_correction_is_partial() {
        let config = StepConfig::cloth().with_gravity(Vec3::ZERO);
        let sim = Simulation::new(config.clone());
        let sphere = Sphere::new(Vec3::ZERO, 1.0).unwrap();

        let mut cloth = Cloth::new(0.1, 0.1, 1, 1)
            .unwrap()
            .with_position(Vec3::new(0.0, 0.95, 0.0));
        cloth.generate_mesh();

        let before = sphere_penetration(&cloth, &sphere, config.sphere_skin);
        sim.step(1.0 / 60.0, &mut cloth, &sphere, &far_ground())
            .unwrap();
        let after = sphere_penetration(&cloth, &sphere, config.sphere_skin);

        for (pre, post) in before.iter().zip(&after) {
            assert!(*pre > 0.0);
            assert!(post < pre, "penetration grew: {pre} -> {post}");
            assert!(*post > 0.0, "sphere correction must not fully project");
        }
    }

    // ========================================================================
    // Normals and buffer
    // ========================================================================

    #[test]
    fn invariant_flat_cloth_normals_point_up() {
        let mut cloth = Cloth::new(2.0, 2.0, 6, 6).unwrap();
        cloth.generate_mesh();

        // Uniform free fall keeps the sheet flat
        for _ in 0..10 {
            step(1.0 / 60.0, &mut cloth, &far_sphere(), &far_ground()).unwrap();
        }

        for packed in cloth.buffer().as_slice() {
            let normal = Vec3::from_array(packed.normal);
            assert!((normal - Vec3::Y).length() < 1e-4, "normal = {normal}");
        }
    }

    #[test]
    fn invariant_long_drape_stays_finite() {
        let sphere = Sphere::new(Vec3::new(0.0, 1.0, 0.0), 0.6).unwrap();
        let ground = Ground::new(Vec3::ZERO, 8.0, 8.0).unwrap();
        let mut cloth = Cloth::new(3.0, 3.0, 24, 24)
            .unwrap()
            .with_position(Vec3::new(0.2, 2.5, -0.1));
        cloth.generate_mesh();

        for _ in 0..600 {
            step(1.0 / 60.0, &mut cloth, &sphere, &ground).unwrap();
        }

        for value in cloth.buffer().as_floats() {
            assert!(value.is_finite());
        }
        for i in 0..cloth.vertex_count() {
            let p = cloth.world_position(i).unwrap();
            if ground.contains(p.x, p.z) {
                assert!(p.y >= 0.0);
            }
        }
    }
}
