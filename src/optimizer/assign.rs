use crate::scenario::Resources;
use crate::solution::PlacementSolution;
use std::sync::Arc;

/// Rebuild every device assignment from the current placement. Devices are
/// walked in scenario order; each connects to the nearest occupied site
/// that covers it and still has room for its demand, or stays unassigned.
/// Order-sensitive and greedy, not optimal.
pub fn greedy_reassign(solution: &mut PlacementSolution) {
    let scenario = Arc::clone(&solution.scenario);
    let occupied: Vec<(usize, usize)> = solution.occupied_sites().collect();

    solution.clear_assignments();
    let mut usage = vec![Resources::ZERO; scenario.sites.len()];

    for device_idx in 0..scenario.devices.len() {
        let demand = scenario.devices[device_idx].demand;

        let mut best_site = None;
        let mut best_dist = f64::INFINITY;
        for &(site_idx, type_idx) in &occupied {
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
        }
    }
}
