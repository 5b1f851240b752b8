//! Island-model evolution.
//!
//! Each worker evolves its own population for a block of generations,
//! then the workers merge a share of their populations through a
//! [`Communicator`](crate::comm::Communicator). The merged pool seeds the
//! next block on every worker; after the last block only the coordinator
//! ([`ROOT`](crate::comm::ROOT)) holds the merged final population.
//!
//! # Key Types
//!
//! - [`IslandCoordinator`]: the block loop and the end-of-block merge
//! - [`IslandConfig`] / [`IslandRunner`]: seeded per-worker runs
//! - [`MigrationOrder`]: which end of the sorted population migrates
//! - [`Progress`]: per-block report sink on the coordinator
//!
//! # References
//!
//! - Whitley, Rana & Heckendorn (1999), "The Island Model Genetic Algorithm"
//! - Cantú-Paz (2000), *Efficient and Accurate Parallel Genetic Algorithms*

mod config;
mod coordinator;
mod progress;
mod runner;

pub use config::{IslandConfig, MigrationOrder};
pub use coordinator::IslandCoordinator;
pub use progress::{BestHistory, LogProgress, NoProgress, Progress};
pub use runner::{IslandResult, IslandRunner};
