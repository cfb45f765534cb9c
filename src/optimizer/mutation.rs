// ===== edgeplace/src/optimizer/mutation.rs =====
use super::assign::greedy_reassign;
use crate::solution::PlacementSolution;
use std::sync::Arc;

/// Apply at most one structural edit to the placement, chosen uniformly
/// from add / remove / retype / swap, then rebuild the assignment and
/// re-score. Edits with no applicable site fall through as no-ops, but
/// the reassignment still runs once the rate check has passed.
pub fn mutate(solution: &mut PlacementSolution, rate: f64, alpha: f64, rng: &mut fastrand::Rng) {
    if rng.f64() >= rate {
        return;
    }

    let scenario = Arc::clone(&solution.scenario);
    let type_count = scenario.facility_types.len();
    let occupied: Vec<usize> = solution
        .occupied_sites()
        .map(|(site_idx, _)| site_idx)
        .collect();
    let empty: Vec<usize> = (0..scenario.sites.len())
        .filter(|site_idx| solution.placement[*site_idx].is_none())
        .collect();

    match rng.usize(0..4) {
        // Open a facility at a random empty site
        0 => {
            if let Some(&site_idx) = rng.choice(&empty) {
                solution.place_at(site_idx, rng.usize(0..type_count));
            }
        }
        // Tear one down, dropping its devices
        1 => {
            if let Some(&site_idx) = rng.choice(&occupied) {
                solution.remove_at(site_idx);
            }
        }
        // Retype a facility to a different type
        2 => {
            if type_count > 1 {
                if let Some(&site_idx) = rng.choice(&occupied) {
                    if let Some(current) = solution.placement[site_idx] {
                        let mut next = rng.usize(0..type_count - 1);
                        if next >= current {
                            next += 1;
                        }
                        solution.place_at(site_idx, next);
                    }
                }
            }
        }
        // Swap the types of two facilities
        _ => {
            if occupied.len() >= 2 {
                let picked = rng.choose_multiple(occupied.iter().copied(), 2);
                solution.placement.swap(picked[0], picked[1]);
            }
        }
    }

    greedy_reassign(solution);
    solution.evaluate(alpha);
}
