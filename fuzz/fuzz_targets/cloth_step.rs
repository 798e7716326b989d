#![no_main]

use glam::Vec3;
use libfuzzer_sys::fuzz_target;
use unshape_cloth::{Cloth, Ground, Sphere, step};

fuzz_target!(|data: &[u8]| {
    let mut floats = data
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]));
    let mut next = || floats.next().unwrap_or(0.0);

    let Ok(mut cloth) = Cloth::new(1.0, 1.0, 3, 3) else {
        return;
    };
    cloth.generate_mesh();
    cloth.position = Vec3::new(next(), next(), next());

    // Arbitrary vertex displacements, including non-finite ones
    for vertex in cloth.vertices_mut() {
        vertex.position += Vec3::new(next(), next(), next());
    }

    let Ok(sphere) = Sphere::new(Vec3::new(next(), next(), next()), next()) else {
        return;
    };
    let Ok(ground) = Ground::new(Vec3::new(next(), next(), next()), next(), next()) else {
        return;
    };

    // step should never panic on any input
    let _ = step(next(), &mut cloth, &sphere, &ground);
});
