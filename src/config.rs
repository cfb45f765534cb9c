use crate::error::{EdgePlaceError, EpResult};
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct SearchParams {
    /// Individuals per generation
    #[arg(long = "pop", default_value_t = 50)]
    pub population_size: usize,

    /// Generations to evolve
    #[arg(long = "gen", default_value_t = 100)]
    pub generations: usize,

    #[arg(long, default_value_t = 0.8)]
    pub crossover_rate: f64,

    #[arg(long, default_value_t = 0.2)]
    pub mutation_rate: f64,

    /// Tournament size for parent selection
    #[arg(long = "tournament", default_value_t = 3)]
    pub tournament_size: usize,

    /// Skip the simulated annealing polish step
    #[arg(long, default_value_t = false)]
    pub disable_sa: bool,

    /// Cost/latency trade-off weights, comma separated; one run per value
    #[arg(long, default_value = "0.3,0.5,0.7")]
    pub alphas: String,
}

#[derive(Args, Debug, Clone)]
pub struct InstanceParams {
    /// Client devices to generate
    #[arg(long, default_value_t = 100)]
    pub devices: usize,

    /// Candidate sites to generate
    #[arg(long, default_value_t = 20)]
    pub sites: usize,

    /// Entries of the facility catalog to use (1-3)
    #[arg(long, default_value_t = 3)]
    pub facility_types: usize,

    /// Seed for instance generation
    #[arg(long, default_value_t = 42)]
    pub instance_seed: u64,
}

impl SearchParams {
    pub fn validate(&self) -> EpResult<()> {
        if self.population_size == 0 {
            return Err(EdgePlaceError::Config("--pop must be positive".to_string()));
        }
        if self.generations == 0 {
            return Err(EdgePlaceError::Config("--gen must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(EdgePlaceError::Config(
                "--crossover-rate must be within [0, 1]".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(EdgePlaceError::Config(
                "--mutation-rate must be within [0, 1]".to_string(),
            ));
        }
        if self.tournament_size == 0 || self.tournament_size > self.population_size {
            return Err(EdgePlaceError::Config(
                "--tournament must be between 1 and --pop".to_string(),
            ));
        }
        self.parse_alphas().map(|_| ())
    }

    pub fn parse_alphas(&self) -> EpResult<Vec<f64>> {
        parse_f64_list(&self.alphas, "alphas").and_then(|values| {
            if values.is_empty() {
                return Err(EdgePlaceError::Config("--alphas requires at least one value".to_string()));
            }
            for v in &values {
                if !(0.0..=1.0).contains(v) {
                    return Err(EdgePlaceError::Config(format!(
                        "--alphas value {} outside [0, 1]",
                        v
                    )));
                }
            }
            Ok(values)
        })
    }
}

impl InstanceParams {
    pub fn validate(&self) -> EpResult<()> {
        if self.devices == 0 {
            return Err(EdgePlaceError::Config("--devices must be positive".to_string()));
        }
        if self.sites == 0 {
            return Err(EdgePlaceError::Config("--sites must be positive".to_string()));
        }
        if !(1..=3).contains(&self.facility_types) {
            return Err(EdgePlaceError::Config(
                "--facility-types must be between 1 and 3".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_f64_list(raw: &str, name: &str) -> EpResult<Vec<f64>> {
    raw.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| EdgePlaceError::Config(format!("Invalid number in --{}: '{}'", name, part)))
        })
        .collect()
}
