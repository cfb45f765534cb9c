// ===== edgeplace/src/optimizer/mod.rs =====
pub mod anneal;
pub mod assign;
pub mod crossover;
pub mod initialization;
pub mod mutation;
pub mod repair;
pub mod runner;

pub use runner::{
    Engine, GenerationRecord, NoProgress, ProgressCallback, SolveOptions, SolveOutcome,
};
