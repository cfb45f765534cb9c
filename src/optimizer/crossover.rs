use super::assign::greedy_reassign;
use crate::solution::PlacementSolution;

/// Two-point crossover on the placement gene only. Two distinct cut
/// points are drawn over the site sequence and the closed segment between
/// them is exchanged, then each child's assignment is rebuilt from scratch
/// (the assignment gene is never recombined directly).
pub fn two_point_crossover(
    parent_a: &PlacementSolution,
    parent_b: &PlacementSolution,
    rate: f64,
    alpha: f64,
    rng: &mut fastrand::Rng,
) -> (PlacementSolution, PlacementSolution) {
    let mut child_a = parent_a.clone();
    let mut child_b = parent_b.clone();

    if rng.f64() < rate {
        let len = child_a.placement.len();
        if len >= 2 {
            let cut_a = rng.usize(0..len - 1);
            let cut_b = rng.usize(cut_a + 1..len);
            child_a.placement[cut_a..=cut_b]
                .swap_with_slice(&mut child_b.placement[cut_a..=cut_b]);

            greedy_reassign(&mut child_a);
            greedy_reassign(&mut child_b);
            child_a.evaluate(alpha);
            child_b.evaluate(alpha);
        }
    }

    (child_a, child_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{CandidateSite, Device, FacilityType, Resources, Scenario};
    use crate::solution::PlacementSolution;
    use proptest::prelude::*;
    use std::sync::Arc;

    fn grid_scenario(site_count: usize) -> Arc<Scenario> {
        let devices = (0..4)
            .map(|i| Device {
                id: i,
                x: i as f64 * 10.0,
                y: 0.0,
                demand: Resources::new(1.0, 1.0, 1.0),
            })
            .collect();
        let sites = (0..site_count)
            .map(|i| CandidateSite {
                id: i as u32,
                x: i as f64 * 10.0,
                y: 0.0,
                cost_factor: 1.0,
            })
            .collect();
        let types = vec![FacilityType {
            id: 0,
            capacity: Resources::new(100.0, 100.0, 100.0),
            coverage_radius: 1000.0,
            base_cost: 500.0,
        }];
        Arc::new(Scenario::build(devices, sites, types).unwrap())
    }

    fn sorted_types(a: &PlacementSolution, b: &PlacementSolution) -> Vec<Option<usize>> {
        let mut genes: Vec<Option<usize>> = a.placement.iter().chain(b.placement.iter()).copied().collect();
        genes.sort();
        genes
    }

    #[test]
    fn test_zero_rate_children_equal_parents() {
        let scenario = grid_scenario(6);
        let mut rng = fastrand::Rng::with_seed(7);

        let mut p1 = PlacementSolution::new(Arc::clone(&scenario));
        p1.place_at(0, 0);
        greedy_reassign(&mut p1);
        p1.evaluate(0.5);

        let mut p2 = PlacementSolution::new(Arc::clone(&scenario));
        p2.place_at(5, 0);
        greedy_reassign(&mut p2);
        p2.evaluate(0.5);

        let (c1, c2) = two_point_crossover(&p1, &p2, 0.0, 0.5, &mut rng);
        assert_eq!(c1.placement, p1.placement);
        assert_eq!(c1.assignment, p1.assignment);
        assert_eq!(c1.fitness, p1.fitness);
        assert_eq!(c2.placement, p2.placement);
        assert_eq!(c2.assignment, p2.assignment);
        assert_eq!(c2.fitness, p2.fitness);
    }

    proptest! {
        #[test]
        fn prop_placement_mass_conserved(seed in any::<u64>()) {
            let scenario = grid_scenario(8);
            let mut rng = fastrand::Rng::with_seed(seed);

            let mut p1 = PlacementSolution::new(Arc::clone(&scenario));
            let mut p2 = PlacementSolution::new(Arc::clone(&scenario));
            for s in 0..8 {
                if rng.bool() {
                    p1.place_at(s, 0);
                }
                if rng.bool() {
                    p2.place_at(s, 0);
                }
            }
            p1.evaluate(0.5);
            p2.evaluate(0.5);
            let before = sorted_types(&p1, &p2);

            let (c1, c2) = two_point_crossover(&p1, &p2, 1.0, 0.5, &mut rng);

            prop_assert_eq!(sorted_types(&c1, &c2), before, "Combined genes changed");
        }
    }
}
