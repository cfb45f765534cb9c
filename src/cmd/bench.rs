use crate::reports::{self, BenchRow};
use clap::Args;
use edgeplace::error::{EdgePlaceError, EpResult};
use edgeplace::optimizer::{Engine, NoProgress, SolveOptions};
use edgeplace::presets::ScenarioPreset;
use edgeplace::scenario::generator::{self, DEFAULT_INSTANCE_SEED};
use std::sync::Arc;
use std::time::Instant;
use strum::IntoEnumIterator;

const BENCH_POPULATION: usize = 30;
const BENCH_GENERATIONS: usize = 50;
const BENCH_ALPHA: f64 = 0.5;

#[derive(Args, Debug, Clone)]
pub struct BenchArgs {
    /// Run a single preset (small, medium, large) instead of the whole ladder
    #[arg(long)]
    pub preset: Option<String>,

    /// Engine seed for the benchmark runs
    #[arg(short = 'S', long, default_value_t = 7)]
    pub seed: u64,
}

pub fn run(args: BenchArgs) -> EpResult<()> {
    let presets: Vec<ScenarioPreset> = match &args.preset {
        Some(raw) => vec![raw
            .parse()
            .map_err(|_| EdgePlaceError::Config(format!("Unknown preset: '{}'", raw)))?],
        None => ScenarioPreset::iter().collect(),
    };

    println!(
        "🏁 Benchmarking {} preset(s): pop {}, {} generations, alpha {:.1}",
        presets.len(),
        BENCH_POPULATION,
        BENCH_GENERATIONS,
        BENCH_ALPHA
    );

    let mut rows = Vec::new();
    for (i, preset) in presets.iter().enumerate() {
        let (devices, sites, types) = preset.dimensions();
        let scenario = Arc::new(generator::random_scenario(
            devices,
            sites,
            types,
            DEFAULT_INSTANCE_SEED,
        )?);

        let options = SolveOptions {
            population_size: BENCH_POPULATION,
            generations: BENCH_GENERATIONS,
            alpha: BENCH_ALPHA,
            ..Default::default()
        };
        let engine = Engine::new(Arc::clone(&scenario), options)?;

        let start = Instant::now();
        let outcome = engine.run(Some(args.seed + i as u64), NoProgress);
        let elapsed = start.elapsed();

        let row = match &outcome.best {
            Some(best) => BenchRow {
                preset: preset.to_string(),
                devices,
                sites,
                types,
                feasible: true,
                best_fitness: best.fitness,
                best_cost: best.total_cost,
                best_latency: best.total_latency,
                elapsed,
            },
            None => BenchRow {
                preset: preset.to_string(),
                devices,
                sites,
                types,
                feasible: false,
                best_fitness: f64::INFINITY,
                best_cost: f64::INFINITY,
                best_latency: f64::INFINITY,
                elapsed,
            },
        };
        println!("  {} done in {:.2?}", preset, elapsed);
        rows.push(row);
    }

    reports::print_bench_table(&rows);
    Ok(())
}
