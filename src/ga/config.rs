//! Sequential evolution configuration.
//!
//! [`EvolutionConfig`] holds the parameters of a single-population run
//! driven by [`EvolutionRunner`](super::EvolutionRunner).

use crate::error::ConfigError;

/// Configuration for a sequential evolution run.
///
/// # Defaults
///
/// ```
/// use u_island::ga::EvolutionConfig;
///
/// let config = EvolutionConfig::default();
/// assert_eq!(config.population_size, 1000);
/// assert_eq!(config.generations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_island::ga::EvolutionConfig;
///
/// let config = EvolutionConfig::default()
///     .with_population_size(200)
///     .with_generations(500)
///     .with_mutation_probability(0.1)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolutionConfig {
    /// Number of genomes in the population.
    pub population_size: usize,

    /// Number of select → crossover → mutate → evaluate iterations.
    ///
    /// 0 returns the generated population unchanged.
    pub generations: usize,

    /// Per-genome probability of applying mutation (0.0–1.0).
    pub mutation_probability: f64,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Whether to evaluate genomes in parallel using rayon.
    ///
    /// Only has an effect with the `parallel` feature enabled.
    pub parallel: bool,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 1000,
            generations: 100,
            mutation_probability: 0.05,
            seed: None,
            parallel: false,
        }
    }
}

impl EvolutionConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the mutation probability, clamped to `[0, 1]`.
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_population_size(self.population_size)?;
        check_probability(self.mutation_probability)
    }
}

pub(crate) fn check_population_size(n: usize) -> Result<(), ConfigError> {
    if n < 2 {
        return Err(ConfigError::PopulationTooSmall(n));
    }
    Ok(())
}

pub(crate) fn check_probability(p: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&p) {
        // NaN lands here too
        return Err(ConfigError::InvalidMutationProbability(p));
    }
    Ok(())
}
