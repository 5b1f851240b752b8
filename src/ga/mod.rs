//! Genetic Algorithm framework.
//!
//! A generic, domain-agnostic evolution engine. A problem plugs in by
//! implementing [`GeneticOperators`]; the engine only moves genomes between
//! caller-owned buffers and never inspects them.
//!
//! # Core Traits
//!
//! - [`GeneticOperators`]: generate, evaluate, select, crossover, mutate
//! - [`Fitness`]: totally ordered score, greater is better
//!
//! # Key Types
//!
//! - [`EvolutionEngine`]: the pipeline stages and the sequential loop
//! - [`EvolutionConfig`] / [`EvolutionRunner`]: seeded single-population runs
//! - [`Selection`]: roulette, tournament and rank parent selection
//!
//! # Submodules
//!
//! - [`operators`]: rank-swap crossover, reflect and shift mutation for
//!   permutation genomes
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod engine;
pub mod operators;
mod runner;
mod selection;
mod types;

pub(crate) use config::{check_population_size, check_probability};
pub use config::EvolutionConfig;
pub use engine::EvolutionEngine;
pub use runner::{EvolutionResult, EvolutionRunner};
pub use selection::Selection;
pub use types::{best_index, Fitness, GeneticOperators};
