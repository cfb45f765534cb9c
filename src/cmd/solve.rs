// ===== edgeplace/src/cmd/solve.rs =====
use crate::reports;
use clap::Args;
use edgeplace::config::{InstanceParams, SearchParams};
use edgeplace::error::EpResult;
use edgeplace::optimizer::{Engine, GenerationRecord, ProgressCallback, SolveOptions, SolveOutcome};
use edgeplace::scenario::generator;
use edgeplace::scenario::loader;
use std::sync::Arc;
use std::time::Instant;

#[derive(Args, Debug, Clone)]
pub struct SolveArgs {
    #[command(flatten)]
    pub search: SearchParams,

    #[command(flatten)]
    pub instance: InstanceParams,

    /// Load a scenario JSON file instead of generating an instance
    #[arg(long)]
    pub scenario: Option<String>,

    /// Engine seed for reproducible runs
    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Tiny instance and short run, handy for a first look
    #[arg(long, default_value_t = false)]
    pub demo: bool,

    /// Write the best solution of the last alpha as JSON
    #[arg(short = 'o', long)]
    pub output: Option<String>,
}

struct PrintProgress;

impl ProgressCallback for PrintProgress {
    fn on_generation(&self, record: &GenerationRecord) -> bool {
        if record.generation % 10 == 0 || record.generation == 1 {
            if record.best_fitness.is_finite() {
                println!(
                    "  Gen {:4} | Fitness: {:.4} | Cost: {:.0} | Latency: {:.0} | Feasible: {}",
                    record.generation,
                    record.best_fitness,
                    record.best_cost,
                    record.best_latency,
                    record.feasible_count
                );
            } else {
                println!(
                    "  Gen {:4} | No feasible individual yet | Feasible: {}",
                    record.generation, record.feasible_count
                );
            }
        }
        true
    }
}

pub fn run(args: SolveArgs) -> EpResult<()> {
    let mut search = args.search.clone();
    let mut instance = args.instance.clone();

    if args.demo {
        println!("🎮 Demo mode: small instance, short run.");
        instance.devices = 20;
        instance.sites = 5;
        instance.facility_types = 2;
        search.population_size = 20;
        search.generations = 30;
        search.alphas = "0.5".to_string();
    }

    search.validate()?;
    instance.validate()?;
    let alphas = search.parse_alphas()?;

    // 1. Scenario: load from disk or generate a seeded instance.
    let scenario = match &args.scenario {
        Some(path) => loader::load_scenario(path)?,
        None => generator::random_scenario(
            instance.devices,
            instance.sites,
            instance.facility_types,
            instance.instance_seed,
        )?,
    };
    let scenario = Arc::new(scenario);

    println!(
        "🚀 Placing facilities for {} devices over {} candidate sites ({} facility types)",
        scenario.devices.len(),
        scenario.sites.len(),
        scenario.facility_types.len()
    );

    // 2. One full search per alpha weight.
    let mut results: Vec<(f64, SolveOutcome)> = Vec::new();
    for &alpha in &alphas {
        println!("\n⚖️  Alpha = {:.2} (cost weight)", alpha);

        let mut options = SolveOptions::from(&search);
        options.alpha = alpha;
        let engine = Engine::new(Arc::clone(&scenario), options)?;

        let start = Instant::now();
        let outcome = engine.run(args.seed, PrintProgress);
        let elapsed = start.elapsed();

        match &outcome.best {
            Some(best) => {
                println!("\n=== 🏆 RESULT (alpha {:.2}) ===", alpha);
                println!("Best fitness: {:.6}", best.fitness);
                println!(
                    "Cost: {:.2} | Latency: {:.2} | Time: {:.2?}",
                    best.total_cost, best.total_latency, elapsed
                );
                if let Some(first) = outcome.fitness_history.iter().find(|f| f.is_finite()) {
                    println!(
                        "Convergence: {:.4} -> {:.4} over {} generations",
                        first,
                        best.fitness,
                        outcome.fitness_history.len()
                    );
                }
                reports::print_solution_report(best);
            }
            None => {
                println!("\n❌ No feasible solution found for alpha {:.2}.", alpha);
            }
        }

        results.push((alpha, outcome));
    }

    // 3. Cross-alpha summary once the sweep is done.
    if results.len() > 1 {
        reports::print_alpha_comparison(&results);
    }

    // 4. Optional JSON export of the final best.
    if let Some(path) = &args.output {
        match results.last() {
            Some((alpha, outcome)) => match &outcome.best {
                Some(best) => {
                    reports::write_solution_json(path, *alpha, best)?;
                    println!("\n💾 Solution written to {}", path);
                }
                None => println!("\n⚠️  Skipping export, no feasible solution to write."),
            },
            None => {}
        }
    }

    Ok(())
}
