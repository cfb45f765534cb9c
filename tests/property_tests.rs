use edgeplace::optimizer::{assign, mutation, repair};
use edgeplace::scenario::generator;
use edgeplace::solution::PlacementSolution;
use proptest::prelude::*;
use std::sync::Arc;

// Random genes over a generated instance. The rng drives both which sites
// open and where devices point, valid indices only.
fn scramble_genes(solution: &mut PlacementSolution, rng: &mut fastrand::Rng) {
    let type_count = solution.scenario.facility_types.len();
    let site_count = solution.scenario.sites.len();
    for site_idx in 0..site_count {
        if rng.bool() {
            solution.place_at(site_idx, rng.usize(0..type_count));
        }
    }
    for device_idx in 0..solution.scenario.devices.len() {
        if rng.bool() {
            solution.assign_at(device_idx, rng.usize(0..site_count));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_evaluate_is_deterministic(seed in any::<u64>(), alpha in 0.0..=1.0f64) {
        let scenario = Arc::new(generator::random_scenario(12, 5, 2, seed).unwrap());
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut solution = PlacementSolution::new(Arc::clone(&scenario));
        scramble_genes(&mut solution, &mut rng);

        let first = solution.evaluate(alpha);
        let second = solution.evaluate(alpha);

        prop_assert_eq!(first, second);
        prop_assert_eq!(solution.feasible, first.is_finite());
        if first.is_finite() {
            prop_assert!(first >= 0.0);
        }
    }

    #[test]
    fn prop_cost_ignores_assignment(seed in any::<u64>()) {
        let scenario = Arc::new(generator::random_scenario(10, 4, 2, seed).unwrap());
        let mut rng = fastrand::Rng::with_seed(seed ^ 0x5EED);
        let mut solution = PlacementSolution::new(Arc::clone(&scenario));
        scramble_genes(&mut solution, &mut rng);

        solution.evaluate(0.5);
        let cost_before = solution.total_cost;

        solution.clear_assignments();
        solution.evaluate(0.5);

        prop_assert_eq!(solution.total_cost, cost_before);
    }

    #[test]
    fn prop_reassign_respects_radius_and_capacity(seed in any::<u64>()) {
        let scenario = Arc::new(generator::random_scenario(15, 6, 3, seed).unwrap());
        let mut rng = fastrand::Rng::with_seed(seed ^ 0xABCD);
        let mut solution = PlacementSolution::new(Arc::clone(&scenario));
        scramble_genes(&mut solution, &mut rng);

        assign::greedy_reassign(&mut solution);

        for (device_idx, slot) in solution.assignment.iter().enumerate() {
            if let Some(site_idx) = slot {
                let type_idx = solution.placement[*site_idx];
                prop_assert!(type_idx.is_some(), "Assigned to an empty site");
                let ftype = &scenario.facility_types[type_idx.unwrap()];
                prop_assert!(
                    scenario.distance_at(device_idx, *site_idx) <= ftype.coverage_radius,
                    "Device {} is out of range of site {}",
                    device_idx,
                    site_idx
                );
            }
        }

        let usage = solution.site_usage();
        for (site_idx, type_idx) in solution.occupied_sites() {
            prop_assert!(
                usage[site_idx].fits_within(&scenario.facility_types[type_idx].capacity),
                "Site {} is over capacity",
                site_idx
            );
        }
    }

    #[test]
    fn prop_zero_rate_mutation_is_identity(seed in any::<u64>()) {
        let scenario = Arc::new(generator::random_scenario(10, 4, 2, seed).unwrap());
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut solution = PlacementSolution::new(Arc::clone(&scenario));
        scramble_genes(&mut solution, &mut rng);
        solution.evaluate(0.5);

        let placement_before = solution.placement.clone();
        let assignment_before = solution.assignment.clone();
        let fitness_before = solution.fitness;

        mutation::mutate(&mut solution, 0.0, 0.5, &mut rng);

        prop_assert_eq!(&solution.placement, &placement_before);
        prop_assert_eq!(&solution.assignment, &assignment_before);
        prop_assert_eq!(solution.fitness, fitness_before);
    }

    #[test]
    fn prop_repair_assignments_stay_covered(seed in any::<u64>()) {
        let scenario = Arc::new(generator::random_scenario(10, 5, 2, seed).unwrap());
        let mut solution = PlacementSolution::new(Arc::clone(&scenario));

        repair::repair(&mut solution, 0.5);

        for (device_idx, slot) in solution.assignment.iter().enumerate() {
            if let Some(site_idx) = slot {
                let type_idx = solution.placement[*site_idx];
                prop_assert!(type_idx.is_some(), "Assigned to an empty site");
                let ftype = &scenario.facility_types[type_idx.unwrap()];
                prop_assert!(
                    scenario.distance_at(device_idx, *site_idx) <= ftype.coverage_radius,
                    "Repair put device {} out of range",
                    device_idx
                );
            }
        }

        let usage = solution.site_usage();
        for (site_idx, type_idx) in solution.occupied_sites() {
            prop_assert!(
                usage[site_idx].fits_within(&scenario.facility_types[type_idx].capacity),
                "Repair overloaded site {}",
                site_idx
            );
        }
    }
}
