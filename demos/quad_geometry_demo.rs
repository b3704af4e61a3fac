//! Demonstration of dual-quad render geometry

use sphere_quad_mesh::*;

fn main() -> Result<()> {
    println!("Generating sphere...");

    let config = SphereConfigBuilder::new()
        .seed(42)
        .resolution(10_000)?
        .build()?;

    let sphere = generate_sphere_default(&config)?;
    let mut world = WorldData::new(sphere);
    println!("Generated {} regions", world.mesh.num_regions());

    // Stand-in terrain: a band of ocean around the equator, wetter towards the poles
    for r in 0..world.mesh.num_regions() {
        let position = world.region_positions[r];
        world.region_elevation[r] = position.z.abs() - 0.3;
        world.region_moisture[r] = position.z.abs();
    }
    world.assign_triangle_values();

    let mut geometry = QuadGeometry::for_mesh(&world.mesh);
    let counts = geometry.build(&world.mesh, &world.quad_fields())?;

    println!("\nGeometry statistics:");
    println!("  Vertices: {}", geometry.vertex_count());
    println!("  Triangles: {}", geometry.triangle_count());
    println!("  Ridge sides: {}", counts.ridge);
    println!("  Valley sides: {}", counts.valley);

    let mem_indices = geometry.indices.len() * 4;
    let mem_positions = geometry.positions.len() * 4;
    let mem_attributes = geometry.attributes.len() * 4;
    let total = mem_indices + mem_positions + mem_attributes;
    println!("\nMemory usage:");
    println!("  Indices: {} bytes", mem_indices);
    println!("  Positions: {} bytes", mem_positions);
    println!("  Attributes: {} bytes", mem_attributes);
    println!("  Total: {} bytes ({:.2} MB)", total, total as f32 / 1024.0 / 1024.0);

    // Rebuild in place after the fields change
    for flow in world.side_flow.iter_mut().step_by(11) {
        *flow = 1.0;
    }
    let counts = geometry.build(&world.mesh, &world.quad_fields())?;
    println!("\nWith rivers: ridge={}, valley={}", counts.ridge, counts.valley);

    Ok(())
}
