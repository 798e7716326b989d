//! Drops a cloth sheet onto a sphere and reports how it settles.
//!
//! Run with: RUST_LOG=unshape_cloth=debug cargo run -p unshape-cloth --example drape

use glam::Vec3;
use tracing_subscriber::EnvFilter;
use unshape_cloth::{Cloth, ClothError, Ground, Simulation, Sphere, StepConfig};

fn main() -> Result<(), ClothError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut cloth = Cloth::new(3.0, 3.0, 32, 32)?
        .with_position(Vec3::new(0.0, 2.5, 0.0))
        .with_color(Vec3::new(0.8, 0.2, 0.3));
    cloth.generate_mesh();

    let sphere = Sphere::new(Vec3::new(0.0, 1.0, 0.0), 0.6)?;
    let ground = Ground::new(Vec3::ZERO, 8.0, 8.0)?;
    let sim = Simulation::new(StepConfig::cloth().with_max_dt(1.0 / 20.0));

    let center = cloth.topology().index(16, 16);
    for frame in 0..240 {
        let stats = sim.step(1.0 / 60.0, &mut cloth, &sphere, &ground)?;

        if frame % 30 == 0 {
            let lowest = (0..cloth.vertex_count())
                .filter_map(|i| cloth.world_position(i))
                .map(|p| p.y)
                .fold(f32::INFINITY, f32::min);
            println!(
                "frame {frame:3}: center y = {:.3}, lowest y = {lowest:.3}, sphere contacts = {}, ground contacts = {}",
                cloth.world_position(center).map_or(f32::NAN, |p| p.y),
                stats.sphere_contacts,
                stats.ground_contacts,
            );
        }
    }

    println!(
        "buffer: {} vertices, {} bytes, {} indices",
        cloth.buffer().len(),
        cloth.buffer().as_bytes().len(),
        cloth.index_count()
    );
    Ok(())
}
