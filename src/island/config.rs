//! Island-model configuration.

use crate::error::ConfigError;
use crate::ga::{check_population_size, check_probability};

/// Which end of its sorted population a worker contributes at a merge.
///
/// At the end of every block each worker sorts its population by fitness
/// in this direction and contributes the first `population_size / workers`
/// genomes.
///
/// **Needs confirmation.** [`Ascending`](Self::Ascending) is the default
/// and contributes the *least* fit genomes, which sends weaker performers
/// to the other islands. Whether that is intended is an open question;
/// [`Descending`](Self::Descending) contributes the fittest instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MigrationOrder {
    /// Sort worst first; the least fit genomes migrate.
    #[default]
    Ascending,
    /// Sort best first; the fittest genomes migrate.
    Descending,
}

/// Configuration for an island-model run.
///
/// Every worker evolves a full population of `population_size` genomes.
/// After each block of `iterations_per_block` generations the workers
/// merge a `population_size / workers` share each into the parent pool of
/// the next block.
///
/// # Defaults
///
/// ```
/// use u_island::island::{IslandConfig, MigrationOrder};
///
/// let config = IslandConfig::default();
/// assert_eq!(config.population_size, 1000);
/// assert_eq!(config.iterations_per_block, 6000);
/// assert_eq!(config.n_blocks, 20);
/// assert_eq!(config.migration, MigrationOrder::Ascending);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IslandConfig {
    /// Genomes per worker. Must be a multiple of the number of workers.
    pub population_size: usize,

    /// Local generations between two merges. At least 1 when `n_blocks > 0`.
    pub iterations_per_block: usize,

    /// Number of blocks, and therefore of merges.
    ///
    /// 0 returns the generated population unchanged.
    pub n_blocks: usize,

    /// Per-genome probability of applying mutation (0.0–1.0).
    pub mutation_probability: f64,

    /// Which genomes a worker contributes at a merge.
    pub migration: MigrationOrder,

    /// Random seed. Each worker derives its own stream from it.
    ///
    /// `None` seeds every worker randomly.
    pub seed: Option<u64>,
}

impl Default for IslandConfig {
    fn default() -> Self {
        Self {
            population_size: 1000,
            iterations_per_block: 6000,
            n_blocks: 20,
            mutation_probability: 0.05,
            migration: MigrationOrder::default(),
            seed: None,
        }
    }
}

impl IslandConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations per block.
    pub fn with_iterations_per_block(mut self, n: usize) -> Self {
        self.iterations_per_block = n;
        self
    }

    /// Sets the number of blocks.
    pub fn with_n_blocks(mut self, n: usize) -> Self {
        self.n_blocks = n;
        self
    }

    /// Sets the mutation probability, clamped to `[0, 1]`.
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the migration direction.
    pub fn with_migration(mut self, order: MigrationOrder) -> Self {
        self.migration = order;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration for a group of `workers`.
    ///
    /// A block needs at least one generation; `iterations_per_block` is
    /// only ignored when `n_blocks` is 0.
    pub fn validate(&self, workers: usize) -> Result<(), ConfigError> {
        check_population_size(self.population_size)?;
        check_probability(self.mutation_probability)?;
        if self.n_blocks > 0 && self.iterations_per_block == 0 {
            return Err(ConfigError::ZeroCount("iterations_per_block"));
        }
        check_divisible(self.population_size, workers)
    }
}

/// Fails unless the population splits evenly across `workers`.
pub(crate) fn check_divisible(population_size: usize, workers: usize) -> Result<(), ConfigError> {
    if workers == 0 || population_size % workers != 0 {
        return Err(ConfigError::IndivisiblePopulation {
            population_size,
            workers,
        });
    }
    Ok(())
}
