//! Error taxonomy.

use thiserror::Error;

/// Invalid run or problem configuration.
///
/// Always raised before any generation runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("population_size must be at least 2, got {0}")]
    PopulationTooSmall(usize),
    #[error("mutation_probability must be in [0, 1], got {0}")]
    InvalidMutationProbability(f64),
    #[error("{0} must be at least 1")]
    ZeroCount(&'static str),
    #[error(
        "population size should be a multiple of the number of workers \
         (population_size: {population_size}, workers: {workers})"
    )]
    IndivisiblePopulation { population_size: usize, workers: usize },
    #[error("a tour needs at least 2 cities, got {0}")]
    TooFewCities(usize),
    #[error("at most {max} cities are supported, got {actual}")]
    TooManyCities { max: usize, actual: usize },
    #[error("all {0} cities are at the same point")]
    CoincidentCities(usize),
}

/// Failure of a collective operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectiveError {
    #[error("receive buffer holds {actual} elements, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
    #[error("root {root} is outside the group of {size} workers")]
    RootOutOfRange { root: usize, size: usize },
    #[error("worker {0} contributed an element type that does not match")]
    TypeMismatch(usize),
    #[error("worker {0} contributed no data")]
    MissingContribution(usize),
    #[error("shared exchange state was poisoned by a panicking worker")]
    Poisoned,
}

/// Error returned by the evolution engine and its drivers.
#[derive(Debug, Error)]
pub enum EvolutionError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A collective call failed; the runtime's error is kept as the source.
    #[error("collective operation failed")]
    Collective(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A buffer or operator result had the wrong number of elements.
    #[error("{what}: expected {expected} elements, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl EvolutionError {
    pub(crate) fn collective<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Collective(Box::new(err))
    }

    pub(crate) fn check_len(
        what: &'static str,
        expected: usize,
        actual: usize,
    ) -> Result<(), Self> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::LengthMismatch {
                what,
                expected,
                actual,
            })
        }
    }
}
