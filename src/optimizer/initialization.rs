use super::repair;
use crate::scenario::Scenario;
use crate::solution::PlacementSolution;
use std::sync::Arc;

/// Build one random starting individual: occupy between 1 and twice the
/// type count of the sites (bounded by site count), each with a random
/// type, then connect every device to its nearest covering facility in a
/// shuffled order. Capacity is deliberately ignored; seeds that score
/// infeasible go straight through repair before joining the pool.
pub fn random_solution(
    scenario: &Arc<Scenario>,
    alpha: f64,
    rng: &mut fastrand::Rng,
) -> PlacementSolution {
    let mut solution = PlacementSolution::new(Arc::clone(scenario));
    let site_count = scenario.sites.len();
    let type_count = scenario.facility_types.len();

    let max_open = (2 * type_count).min(site_count).max(1);
    let open_count = rng.usize(1..=max_open);
    for site_idx in rng.choose_multiple(0..site_count, open_count) {
        solution.place_at(site_idx, rng.usize(0..type_count));
    }

    let occupied: Vec<(usize, usize)> = solution.occupied_sites().collect();
    let mut order: Vec<usize> = (0..scenario.devices.len()).collect();
    rng.shuffle(&mut order);

    for device_idx in order {
        let mut best_site = None;
        let mut best_dist = f64::INFINITY;
        for &(site_idx, type_idx) in &occupied {
            let dist = scenario.distance_at(device_idx, site_idx);
            if dist <= scenario.facility_types[type_idx].coverage_radius && dist < best_dist {
                best_dist = dist;
                best_site = Some(site_idx);
            }
        }
        if let Some(site_idx) = best_site {
            solution.assign_at(device_idx, site_idx);
        }
    }

    solution.evaluate(alpha);
    if !solution.feasible {
        repair::repair(&mut solution, alpha);
    }
    solution
}
