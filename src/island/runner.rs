//! Seeded island-model driver.

use super::config::IslandConfig;
use super::coordinator::IslandCoordinator;
use super::progress::Progress;
use crate::comm::Communicator;
use crate::error::EvolutionError;
use crate::ga::{EvolutionEngine, Fitness, GeneticOperators};
use crate::random::worker_rng;

/// Result of one worker's island-model run.
///
/// Only the root worker's result is the merged, global outcome; every
/// other worker returns its own last local population.
#[derive(Debug, Clone)]
pub struct IslandResult<G, F> {
    /// Fittest genome this worker evaluated during the run. On the root
    /// this covers the merged final population too, and its fitness is at
    /// least every value reported to the progress sink.
    pub best: G,

    /// Fitness of [`best`](Self::best).
    pub best_fitness: F,

    /// Final population of this worker.
    pub population: Vec<G>,

    /// Evaluations aligned with `population`.
    pub evaluations: Vec<F>,

    /// Rank of the worker that produced this result.
    pub rank: usize,

    /// Number of blocks executed.
    pub blocks: usize,
}

impl<G, F> IslandResult<G, F> {
    /// Whether this is the coordinator's merged result.
    pub fn is_root(&self) -> bool {
        self.rank == crate::comm::ROOT
    }
}

/// Executes an island-model run on the calling worker.
///
/// Every worker of the group calls [`run`](Self::run) with the same config.
///
/// # Usage
///
/// ```
/// use u_island::comm::SingleProcess;
/// use u_island::island::{IslandConfig, IslandRunner, LogProgress};
/// use u_island::tour::{circle_points, TourProblem};
///
/// let problem = TourProblem::new(circle_points(10.0, 8))?;
/// let config = IslandConfig::default()
///     .with_population_size(20)
///     .with_iterations_per_block(5)
///     .with_n_blocks(2)
///     .with_seed(42);
///
/// let result = IslandRunner::run(problem, &SingleProcess, &config, LogProgress)?;
/// assert!(result.is_root());
/// assert_eq!(result.population.len(), 20);
/// # Ok::<(), u_island::EvolutionError>(())
/// ```
pub struct IslandRunner;

impl IslandRunner {
    /// Runs the island model described by `config` on this worker.
    ///
    /// The worker's RNG is derived from `config.seed` and its rank, so a
    /// seeded run is reproducible for a fixed group size.
    ///
    /// # Errors
    /// [`EvolutionError::Config`] for an invalid config (including a
    /// population that does not divide across the group), and the errors
    /// of [`IslandCoordinator::distributed_run`].
    pub fn run<O, C, P>(
        operators: O,
        comm: &C,
        config: &IslandConfig,
        progress: P,
    ) -> Result<IslandResult<O::Genome, O::Fitness>, EvolutionError>
    where
        O: GeneticOperators,
        O::Genome: Send + 'static,
        C: Communicator,
        P: Progress<O::Fitness>,
    {
        config.validate(comm.size())?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = worker_rng(seed, comm.rank());
        let engine = EvolutionEngine::new(operators);
        let coordinator =
            IslandCoordinator::new(&engine, comm).with_migration(config.migration);

        if comm.is_root() {
            log::info!(
                "island run started: {} workers, population {}, {} blocks x {} generations, migration {:?}",
                comm.size(),
                config.population_size,
                config.n_blocks,
                config.iterations_per_block,
                config.migration
            );
        }

        let mut population = Vec::with_capacity(config.population_size);
        let mut evaluations = Vec::with_capacity(config.population_size);
        let (best, best_fitness) = coordinator.distributed_run(
            &mut population,
            config.population_size,
            &mut evaluations,
            config.iterations_per_block,
            config.n_blocks,
            config.mutation_probability,
            &mut rng,
            progress,
        )?;

        log::debug!(
            "worker {}: finished with best fitness {:.6}",
            comm.rank(),
            best_fitness.to_f64()
        );

        Ok(IslandResult {
            best,
            best_fitness,
            population,
            evaluations,
            rank: comm.rank(),
            blocks: config.n_blocks,
        })
    }
}
