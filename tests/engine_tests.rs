use edgeplace::optimizer::{Engine, GenerationRecord, NoProgress, ProgressCallback, SolveOptions};
use edgeplace::scenario::{CandidateSite, Device, FacilityType, Resources, Scenario};
use std::sync::Arc;

// --- FIXTURE: EIGHT DEVICES, TWO GENEROUS SITES ---
// Every device can reach either site and capacity never binds, so any
// run should land on a feasible deployment quickly.
fn easy_scenario() -> Arc<Scenario> {
    let devices = (0..8)
        .map(|i| Device {
            id: i,
            x: (i as f64) * 12.0,
            y: 5.0,
            demand: Resources::new(0.5, 0.5, 1.0),
        })
        .collect();
    let sites = vec![
        CandidateSite {
            id: 0,
            x: 0.0,
            y: 0.0,
            cost_factor: 1.0,
        },
        CandidateSite {
            id: 1,
            x: 100.0,
            y: 0.0,
            cost_factor: 1.1,
        },
    ];
    let types = vec![
        FacilityType {
            id: 0,
            capacity: Resources::new(100.0, 100.0, 100.0),
            coverage_radius: 500.0,
            base_cost: 100.0,
        },
        FacilityType {
            id: 1,
            capacity: Resources::new(200.0, 200.0, 200.0),
            coverage_radius: 500.0,
            base_cost: 180.0,
        },
    ];
    Arc::new(Scenario::build(devices, sites, types).unwrap())
}

fn short_options() -> SolveOptions {
    SolveOptions {
        population_size: 12,
        generations: 8,
        ..Default::default()
    }
}

#[test]
fn test_same_seed_same_outcome() {
    let scenario = easy_scenario();
    let engine = Engine::new(Arc::clone(&scenario), short_options()).unwrap();

    let a = engine.run(Some(77), NoProgress);
    let b = engine.run(Some(77), NoProgress);

    assert_eq!(a.fitness_history, b.fitness_history);
    let best_a = a.best.expect("Run A found no solution");
    let best_b = b.best.expect("Run B found no solution");
    assert_eq!(best_a.fitness, best_b.fitness);
    assert_eq!(best_a.placement, best_b.placement);
    assert_eq!(best_a.assignment, best_b.assignment);
}

#[test]
fn test_history_spans_every_generation() {
    let scenario = easy_scenario();
    let engine = Engine::new(Arc::clone(&scenario), short_options()).unwrap();

    let outcome = engine.run(Some(3), NoProgress);

    assert_eq!(outcome.fitness_history.len(), 8);
    assert_eq!(outcome.cost_history.len(), 8);
    assert_eq!(outcome.latency_history.len(), 8);
}

#[test]
fn test_best_matches_history_minimum() {
    let scenario = easy_scenario();
    let engine = Engine::new(Arc::clone(&scenario), short_options()).unwrap();

    let outcome = engine.run(Some(11), NoProgress);

    let best = outcome.best.expect("Expected a feasible solution");
    let history_min = outcome
        .fitness_history
        .iter()
        .fold(f64::INFINITY, |lo, &v| lo.min(v));
    assert_eq!(best.fitness, history_min);
}

#[test]
fn test_finds_feasible_on_easy_instance() {
    let scenario = easy_scenario();
    let engine = Engine::new(Arc::clone(&scenario), short_options()).unwrap();

    let outcome = engine.run(Some(5), NoProgress);

    let best = outcome.best.expect("Expected a feasible solution");
    assert!(best.feasible);
    assert!(best.fitness.is_finite());
    assert!(best.assignment.iter().all(|slot| slot.is_some()));
}

#[test]
fn test_impossible_instance_yields_none() {
    // The lone device sits 5000 away from the only site; no radius in the
    // catalog comes close.
    let devices = vec![Device {
        id: 0,
        x: 5000.0,
        y: 5000.0,
        demand: Resources::new(1.0, 1.0, 1.0),
    }];
    let sites = vec![CandidateSite {
        id: 0,
        x: 0.0,
        y: 0.0,
        cost_factor: 1.0,
    }];
    let types = vec![FacilityType {
        id: 0,
        capacity: Resources::new(10.0, 10.0, 10.0),
        coverage_radius: 100.0,
        base_cost: 100.0,
    }];
    let scenario = Arc::new(Scenario::build(devices, sites, types).unwrap());
    let engine = Engine::new(Arc::clone(&scenario), short_options()).unwrap();

    let outcome = engine.run(Some(1), NoProgress);

    assert!(outcome.best.is_none());
    assert!(outcome.fitness_history.iter().all(|f| f.is_infinite()));
}

#[test]
fn test_disabled_annealing_still_solves() {
    let scenario = easy_scenario();
    let options = SolveOptions {
        use_annealing: false,
        ..short_options()
    };
    let engine = Engine::new(Arc::clone(&scenario), options).unwrap();

    let outcome = engine.run(Some(21), NoProgress);
    assert!(outcome.best.is_some());
}

struct StopAfter(usize);

impl ProgressCallback for StopAfter {
    fn on_generation(&self, record: &GenerationRecord) -> bool {
        record.generation < self.0
    }
}

#[test]
fn test_callback_can_abort_the_run() {
    let scenario = easy_scenario();
    let engine = Engine::new(Arc::clone(&scenario), short_options()).unwrap();

    let outcome = engine.run(Some(77), StopAfter(3));

    assert_eq!(outcome.fitness_history.len(), 3);
}

// --- OPTION VALIDATION ---

#[test]
fn test_rejects_bad_options() {
    let scenario = easy_scenario();

    let zero_pop = SolveOptions {
        population_size: 0,
        ..Default::default()
    };
    assert!(Engine::new(Arc::clone(&scenario), zero_pop).is_err());

    let zero_gen = SolveOptions {
        generations: 0,
        ..Default::default()
    };
    assert!(Engine::new(Arc::clone(&scenario), zero_gen).is_err());

    let wild_alpha = SolveOptions {
        alpha: 1.5,
        ..Default::default()
    };
    assert!(Engine::new(Arc::clone(&scenario), wild_alpha).is_err());

    let oversized_tournament = SolveOptions {
        population_size: 4,
        tournament_size: 9,
        ..Default::default()
    };
    assert!(Engine::new(Arc::clone(&scenario), oversized_tournament).is_err());
}
