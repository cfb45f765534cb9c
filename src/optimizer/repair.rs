use crate::solution::PlacementSolution;
use std::sync::Arc;

/// Try to connect every unassigned device. First choice is the nearest
/// occupied site with both coverage and headroom; failing that, the first
/// empty site paired with the first type that covers the device is opened
/// and the device force-assigned there, capacity unchecked. Best effort
/// only; evaluation stays the feasibility authority.
pub fn repair(solution: &mut PlacementSolution, alpha: f64) {
    let scenario = Arc::clone(&solution.scenario);
    let mut usage = solution.site_usage();

    for device_idx in 0..scenario.devices.len() {
        if solution.assignment[device_idx].is_some() {
            continue;
        }
        let demand = scenario.devices[device_idx].demand;

        // Nearest occupied site that covers the device and still fits it.
        let mut best_site = None;
        let mut best_dist = f64::INFINITY;
        for (site_idx, type_idx) in solution.occupied_sites() {
            let ftype = &scenario.facility_types[type_idx];
            let dist = scenario.distance_at(device_idx, site_idx);
            if dist > ftype.coverage_radius || dist >= best_dist {
                continue;
            }
            let mut projected = usage[site_idx];
            projected.add(&demand);
            if projected.fits_within(&ftype.capacity) {
                best_dist = dist;
                best_site = Some(site_idx);
            }
        }
        if let Some(site_idx) = best_site {
            usage[site_idx].add(&demand);
            solution.assign_at(device_idx, site_idx);
            continue;
        }

        // Force open the first workable site/type pair.
        let mut opened = None;
        for site_idx in 0..scenario.sites.len() {
            if solution.placement[site_idx].is_some() {
                continue;
            }
            let dist = scenario.distance_at(device_idx, site_idx);
            let covering = scenario
                .facility_types
                .iter()
                .position(|t| dist <= t.coverage_radius);
            if let Some(type_idx) = covering {
                opened = Some((site_idx, type_idx));
                break;
            }
        }
        if let Some((site_idx, type_idx)) = opened {
            solution.place_at(site_idx, type_idx);
            solution.assign_at(device_idx, site_idx);
            usage[site_idx].add(&demand);
        }
    }

    solution.evaluate(alpha);
}
