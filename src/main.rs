// ===== edgeplace/src/main.rs =====
use clap::{Parser, Subcommand};
use std::process;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(name = "edgeplace")]
#[command(about = "Cloudlet placement: hybrid genetic search with annealing polish")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve one placement instance, running one search per alpha weight
    Solve(cmd::solve::SolveArgs),
    /// Time the solver across the built-in instance presets
    Bench(cmd::bench::BenchArgs),
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Solve(args) => cmd::solve::run(args),
        Commands::Bench(args) => cmd::bench::run(args),
    };

    if let Err(e) = result {
        eprintln!("\n❌ {}", e);
        process::exit(1);
    }
}
