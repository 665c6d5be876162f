use anyhow::Result;
use sjoin::{AssignmentEngine, EngineConfig, LatLon};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Earthquakes as (latitude, longitude)
    let quakes = [
        LatLon::new(-12.0464, -77.0428), // Lima
        LatLon::new(-16.4090, -71.5375), // Arequipa
        LatLon::new(4.7110, -74.0721),   // Bogotá
    ];

    // Simplified square departments, written as (longitude latitude)
    let names = ["Lima", "Arequipa"];
    let boundaries = [
        "POLYGON((-77.5 -11.5, -76.5 -11.5, -76.5 -12.5, -77.5 -12.5, -77.5 -11.5))",
        "POLYGON((-72.0 -16.0, -71.0 -16.0, -71.0 -17.0, -72.0 -17.0, -72.0 -16.0))",
    ];

    let engine = AssignmentEngine::from_wkt(&names, &boundaries, EngineConfig::default())?;
    println!(
        "Assigning {} earthquakes with {} workers...",
        quakes.len(),
        engine.workers()
    );

    let assignment = engine.run(&quakes);
    for (i, (quake, region)) in quakes.iter().zip(assignment.labels()).enumerate() {
        println!(
            "  - Earthquake {} (lat: {}, lon: {}) -> {}",
            i + 1,
            quake.lat,
            quake.lon,
            region
        );
    }
    for (region, count) in assignment.region_counts() {
        println!("{region}: {count}");
    }
    println!("outside: {}", assignment.outside_count());

    Ok(())
}
