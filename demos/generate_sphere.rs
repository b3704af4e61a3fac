//! Example: Generate a closed sphere mesh
//!
//! Demonstrates the basic usage of the generation pipeline.

use sphere_quad_mesh::*;

fn main() -> Result<()> {
    println!("Sphere Mesh Generation Example");
    println!("==============================\n");

    let config = SphereConfigBuilder::new()
        .seed(42)
        .resolution(5_000)?
        .jitter(0.75)?
        .build()?;

    println!("Configuration:");
    println!("  Seed: {}", config.seed);
    println!("  Resolution: {}", config.resolution);
    println!("  Jitter: {}", config.jitter);
    println!();

    println!("Generating sphere...");
    let sphere = generate_sphere_default(&config)?;
    let mesh = &sphere.mesh;

    println!("Mesh statistics:");
    println!("  Regions: {} (including the pole)", mesh.num_regions());
    println!("  Triangles: {}", mesh.num_triangles());
    println!("  Sides: {}", mesh.num_sides());
    println!();

    println!("First coordinates:");
    for (i, coordinate) in sphere.coordinates.iter().take(5).enumerate() {
        println!(
            "  Point {}: lat={:.4}, lon={:.4}",
            i, coordinate.latitude, coordinate.longitude
        );
    }

    println!("\nGeneration complete!");
    Ok(())
}
