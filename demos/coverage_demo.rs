//! Generate serving and interfering cells around a transmitter and write
//! them out as GeoJSON

use rust_hex_coverage::*;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== rust_hex_coverage Demo ===\n");

    // Step 1: Configure
    let tower = Point::new(-0.0728, 51.4243);
    let radius = 750.0;
    let config = PipelineConfigBuilder::new()
        .target_crs("LOCAL:crystal_palace")
        .output_dir(std::env::temp_dir().join("hex_coverage_demo"))
        .build()?;

    println!("Step 1: Transmitter ({}, {}) with {} m cells", tower.x, tower.y, radius);

    // Step 2: Run the pipeline
    let pipeline = Pipeline::new(config.clone(), LocalTangentPlane::new(tower));
    let output = pipeline.run(tower, radius)?;

    println!(
        "\nStep 2: Serving site at ({:.1}, {:.1})",
        output.serving_site.location.x, output.serving_site.location.y
    );
    for site in &output.interfering_sites {
        println!(
            "  Interferer {} at ({:>8.1}, {:>8.1})",
            site.site_id, site.location.x, site.location.y
        );
    }

    // Step 3: Persist
    pipeline.write_geojson(&output)?;
    println!("\nStep 3: Wrote 4 layers to {}", config.output_dir.display());

    println!("\n=== Demo Complete ===");
    Ok(())
}
