//! Island-model genetic algorithm engine.
//!
//! Evolves a population of candidate solutions through a pluggable
//! generate → evaluate → select → crossover → mutate pipeline, either on a
//! single worker or across cooperating workers that periodically merge
//! their populations.
//!
//! - **Reorder kernel** ([`reorder`]): argsort, rank, scatter/gather by
//!   permutation and the joint rank swap used for permutation-preserving
//!   crossover.
//! - **Evolution engine** ([`ga`]): the [`GeneticOperators`](ga::GeneticOperators)
//!   contract and the [`EvolutionEngine`](ga::EvolutionEngine) that drives it.
//! - **Distributed coordinator** ([`island`]): block-wise island evolution
//!   with collective merges over a [`Communicator`](comm::Communicator).
//! - **Tour problem** ([`tour`]): a permutation-encoded reference problem.
//!
//! Fitness is **maximized**: a greater value is a better genome.

pub mod comm;
pub mod error;
pub mod ga;
pub mod island;
pub mod random;
pub mod reorder;
pub mod tour;

pub use error::{ConfigError, EvolutionError};
