use super::{CandidateSite, Device, FacilityType, Resources, Scenario};
use crate::error::EpResult;
use tracing::info;

pub const DEFAULT_INSTANCE_SEED: u64 = 42;

// Capacity (cpu, memory, storage), coverage radius, base cost.
const TYPE_CATALOG: [(f64, f64, f64, f64, f64); 3] = [
    (4.0, 8.0, 100.0, 150.0, 1000.0),
    (8.0, 16.0, 200.0, 200.0, 1800.0),
    (16.0, 32.0, 500.0, 300.0, 3200.0),
];

/// Generate a random instance on a 1000x1000 field. Deterministic for a
/// given seed; `type_count` selects a prefix of the fixed catalog.
pub fn random_scenario(
    device_count: usize,
    site_count: usize,
    type_count: usize,
    seed: u64,
) -> EpResult<Scenario> {
    let mut rng = fastrand::Rng::with_seed(seed);

    let devices: Vec<Device> = (0..device_count)
        .map(|i| Device {
            id: i as u32,
            x: uniform(&mut rng, 0.0, 1000.0),
            y: uniform(&mut rng, 0.0, 1000.0),
            demand: Resources::new(
                uniform(&mut rng, 0.1, 2.0),
                uniform(&mut rng, 0.5, 4.0),
                uniform(&mut rng, 1.0, 10.0),
            ),
        })
        .collect();

    let sites: Vec<CandidateSite> = (0..site_count)
        .map(|i| CandidateSite {
            id: i as u32,
            x: uniform(&mut rng, 0.0, 1000.0),
            y: uniform(&mut rng, 0.0, 1000.0),
            cost_factor: uniform(&mut rng, 0.8, 1.2),
        })
        .collect();

    let facility_types: Vec<FacilityType> = TYPE_CATALOG
        .iter()
        .take(type_count.clamp(1, TYPE_CATALOG.len()))
        .enumerate()
        .map(|(i, &(cpu, memory, storage, radius, cost))| FacilityType {
            id: i as u32,
            capacity: Resources::new(cpu, memory, storage),
            coverage_radius: radius,
            base_cost: cost,
        })
        .collect();

    info!(
        "Generated instance: {} devices, {} sites, {} facility types (seed {})",
        device_count,
        site_count,
        facility_types.len(),
        seed
    );

    Scenario::build(devices, sites, facility_types)
}

fn uniform(rng: &mut fastrand::Rng, lo: f64, hi: f64) -> f64 {
    lo + (hi - lo) * rng.f64()
}
