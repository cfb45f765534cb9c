use crate::config::SearchParams;
use crate::error::{EdgePlaceError, EpResult};
use crate::optimizer::{anneal, crossover, initialization, mutation, repair};
use crate::scenario::Scenario;
use crate::solution::PlacementSolution;
use rayon::prelude::*;
use std::sync::Arc;

pub struct SolveOptions {
    pub population_size: usize,
    pub generations: usize,
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    pub alpha: f64,
    pub use_annealing: bool,
    pub tournament_size: usize,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 200,
            crossover_rate: 0.8,
            mutation_rate: 0.2,
            alpha: 0.5,
            use_annealing: true,
            tournament_size: 3,
        }
    }
}

impl From<&SearchParams> for SolveOptions {
    fn from(params: &SearchParams) -> Self {
        Self {
            population_size: params.population_size,
            generations: params.generations,
            crossover_rate: params.crossover_rate,
            mutation_rate: params.mutation_rate,
            alpha: 0.5, // Callers sweep this per run
            use_annealing: !params.disable_sa,
            tournament_size: params.tournament_size,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerationRecord {
    pub generation: usize,
    pub best_fitness: f64,
    pub best_cost: f64,
    pub best_latency: f64,
    pub feasible_count: usize,
}

/// A trait for receiving per-generation updates during a run.
/// Boolean return value indicates if the search should continue (true) or abort (false).
pub trait ProgressCallback: Send + Sync {
    fn on_generation(&self, record: &GenerationRecord) -> bool;
}

/// Callback that ignores every record and never aborts.
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_generation(&self, _record: &GenerationRecord) -> bool {
        true
    }
}

pub struct SolveOutcome {
    /// Best feasible solution ever seen, `None` when no generation
    /// produced one.
    pub best: Option<PlacementSolution>,
    pub fitness_history: Vec<f64>,
    pub cost_history: Vec<f64>,
    pub latency_history: Vec<f64>,
}

pub struct Engine {
    scenario: Arc<Scenario>,
    options: SolveOptions,
}

impl Engine {
    pub fn new(scenario: Arc<Scenario>, options: SolveOptions) -> EpResult<Self> {
        if options.population_size == 0 {
            return Err(EdgePlaceError::Config("population_size must be positive".to_string()));
        }
        if options.generations == 0 {
            return Err(EdgePlaceError::Config("generations must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&options.crossover_rate) {
            return Err(EdgePlaceError::Config(
                "crossover_rate must be within [0, 1]".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&options.mutation_rate) {
            return Err(EdgePlaceError::Config(
                "mutation_rate must be within [0, 1]".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&options.alpha) {
            return Err(EdgePlaceError::Config("alpha must be within [0, 1]".to_string()));
        }
        if options.tournament_size == 0 || options.tournament_size > options.population_size {
            return Err(EdgePlaceError::Config(
                "tournament_size must be between 1 and the population size".to_string(),
            ));
        }
        Ok(Self { scenario, options })
    }

    pub fn run<CB: ProgressCallback>(&self, seed: Option<u64>, callback: CB) -> SolveOutcome {
        let opts = &self.options;
        let alpha = opts.alpha;

        // 1. Initial Population (parallel; each slot owns a derived rng)
        let mut population: Vec<PlacementSolution> = (0..opts.population_size)
            .into_par_iter()
            .map(|i| {
                let mut rng = match seed {
                    Some(s) => fastrand::Rng::with_seed(s + i as u64),
                    None => fastrand::Rng::new(),
                };
                initialization::random_solution(&self.scenario, alpha, &mut rng)
            })
            .collect();

        // 2. Global State
        let mut incumbent: Option<PlacementSolution> = None;
        let mut fitness_history = Vec::with_capacity(opts.generations);
        let mut cost_history = Vec::with_capacity(opts.generations);
        let mut latency_history = Vec::with_capacity(opts.generations);
        let mut rng = match seed {
            Some(s) => fastrand::Rng::with_seed(s + 9999),
            None => fastrand::Rng::new(),
        };

        // 3. Main Loop
        for generation in 0..opts.generations {
            let temperature = 1.0 - generation as f64 / opts.generations as f64;

            // A. Rank Current Population
            population.sort_by(|a, b| a.fitness.total_cmp(&b.fitness));

            // B. Elites Carry Over Untouched
            let elite_quota = (opts.population_size / 10).max(2);
            let mut next: Vec<PlacementSolution> = population
                .iter()
                .filter(|s| s.feasible)
                .take(elite_quota)
                .cloned()
                .collect();

            // C. Breed the Remainder
            while next.len() < opts.population_size {
                let parent_a = tournament(&population, opts.tournament_size, &mut rng);
                let parent_b = tournament(&population, opts.tournament_size, &mut rng);
                let children = crossover::two_point_crossover(
                    parent_a,
                    parent_b,
                    opts.crossover_rate,
                    alpha,
                    &mut rng,
                );

                for mut child in [children.0, children.1] {
                    if next.len() >= opts.population_size {
                        break;
                    }
                    mutation::mutate(&mut child, opts.mutation_rate, alpha, &mut rng);
                    if opts.use_annealing {
                        child = anneal::polish(child, temperature, alpha, &mut rng);
                    }
                    if !child.feasible {
                        repair::repair(&mut child, alpha);
                    }
                    next.push(child);
                }
            }

            // D. Track Incumbent + Record History
            let mut best_idx: Option<usize> = None;
            let mut feasible_count = 0;
            for (i, candidate) in next.iter().enumerate() {
                if !candidate.feasible {
                    continue;
                }
                feasible_count += 1;
                match best_idx {
                    Some(j) if next[j].fitness <= candidate.fitness => {}
                    _ => best_idx = Some(i),
                }
            }

            let (gen_fitness, gen_cost, gen_latency) = match best_idx {
                Some(i) => (next[i].fitness, next[i].total_cost, next[i].total_latency),
                None => (f64::INFINITY, f64::INFINITY, f64::INFINITY),
            };
            fitness_history.push(gen_fitness);
            cost_history.push(gen_cost);
            latency_history.push(gen_latency);

            if let Some(i) = best_idx {
                let improves = incumbent
                    .as_ref()
                    .map_or(true, |inc| next[i].fitness < inc.fitness);
                if improves {
                    incumbent = Some(next[i].clone());
                }
            }

            population = next;

            // E. Report Progress (1-based generation for display)
            let record = GenerationRecord {
                generation: generation + 1,
                best_fitness: gen_fitness,
                best_cost: gen_cost,
                best_latency: gen_latency,
                feasible_count,
            };
            if !callback.on_generation(&record) {
                break;
            }
        }

        SolveOutcome {
            best: incumbent,
            fitness_history,
            cost_history,
            latency_history,
        }
    }
}

/// Sample a subset of the population and keep its fittest member. The
/// +infinity sentinel on infeasible fitness makes feasibility dominate.
fn tournament<'a>(
    population: &'a [PlacementSolution],
    size: usize,
    rng: &mut fastrand::Rng,
) -> &'a PlacementSolution {
    rng.choose_multiple(0..population.len(), size.min(population.len()))
        .into_iter()
        .map(|i| &population[i])
        .min_by(|a, b| a.fitness.total_cmp(&b.fitness))
        .unwrap_or(&population[0])
}
