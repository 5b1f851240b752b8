//! Block-wise island evolution over a [`Communicator`].
//!
//! ```text
//! generate → evaluate → select
//! for each block:
//!     evolve iterations_per_block generations locally
//!     sort population + evaluations by fitness (MigrationOrder)
//!     all-gather (gather on the last block) the first N/W genomes
//!     shuffle the merged pool unless this was the last block
//! root: population ← merged pool, re-evaluate
//! ```
//!
//! Each worker keeps the fittest genome it has evaluated so far; the root
//! reports it after every block.
//!
//! Workers share nothing between merges. The merged pool is the parent
//! pool of the next block's first generation.

use super::config::{check_divisible, MigrationOrder};
use super::progress::Progress;
use crate::comm::{Communicator, ROOT};
use crate::error::EvolutionError;
use crate::ga::{
    best_index, check_population_size, EvolutionEngine, Fitness, GeneticOperators,
};
use crate::reorder::{order_by, rank_by};
use rand::seq::SliceRandom;
use rand::Rng;

/// Runs one worker's share of an island-model evolution.
///
/// Every worker of the group builds its own coordinator around its own
/// engine and communicator handle and calls
/// [`distributed_run`](Self::distributed_run) with identical sizes.
#[derive(Debug)]
pub struct IslandCoordinator<'a, O, C> {
    engine: &'a EvolutionEngine<O>,
    comm: &'a C,
    migration: MigrationOrder,
}

impl<'a, O, C> IslandCoordinator<'a, O, C>
where
    O: GeneticOperators,
    O::Genome: Send + 'static,
    C: Communicator,
{
    pub fn new(engine: &'a EvolutionEngine<O>, comm: &'a C) -> Self {
        Self {
            engine,
            comm,
            migration: MigrationOrder::default(),
        }
    }

    /// Sets which end of the sorted population migrates.
    pub fn with_migration(mut self, migration: MigrationOrder) -> Self {
        self.migration = migration;
        self
    }

    /// Runs `n_blocks` blocks of `iterations_per_block` generations with a
    /// merge after each block, and returns the fittest genome this worker
    /// evaluated along the way together with its fitness.
    ///
    /// On return the root worker holds the merged final population in
    /// `population`, re-evaluated into `evaluations`. Every other worker
    /// keeps its own last local state, sorted by the migration order.
    ///
    /// The best-so-far is checked on the initial population, at the end of
    /// every block and, on the root, on the final merged population. The
    /// root reports it to `progress` once per block, so the reported values
    /// never decrease and never exceed the returned fitness.
    ///
    /// With `n_blocks == 0` the generated, evaluated population is
    /// returned and no collective is called.
    ///
    /// A worker whose local stage fails still enters that block's merge,
    /// with an empty share, before returning its error. The other workers
    /// then fail the merge instead of waiting for it.
    ///
    /// # Errors
    /// - [`ConfigError::PopulationTooSmall`](crate::ConfigError::PopulationTooSmall)
    ///   or [`ConfigError::IndivisiblePopulation`](crate::ConfigError::IndivisiblePopulation)
    ///   before anything is generated
    /// - [`EvolutionError::Collective`] if the runtime fails a merge,
    ///   including a merge abandoned by another worker
    /// - [`EvolutionError::LengthMismatch`] if the operators break the
    ///   population-size contract
    #[allow(clippy::too_many_arguments)]
    pub fn distributed_run<R, P>(
        &self,
        population: &mut Vec<O::Genome>,
        n: usize,
        evaluations: &mut Vec<O::Fitness>,
        iterations_per_block: usize,
        n_blocks: usize,
        mutation_probability: f64,
        rng: &mut R,
        mut progress: P,
    ) -> Result<(O::Genome, O::Fitness), EvolutionError>
    where
        R: Rng,
        P: Progress<O::Fitness>,
    {
        // same inputs on every worker, so the whole group stops here
        check_population_size(n)?;
        check_divisible(n, self.comm.size())?;

        let mut merged = Vec::with_capacity(n);
        let started = self.engine.generate(population, n, rng).and_then(|()| {
            self.engine.evaluate(population, evaluations);
            if n_blocks == 0 {
                return Ok(());
            }
            self.engine
                .select_parents(population, &mut merged, evaluations, rng)
        });
        if let Err(err) = started {
            if n_blocks > 0 {
                self.abandon_merge(n_blocks == 1);
            }
            return Err(err);
        }
        let mut best = BestSoFar::new(population, evaluations);

        for block in 0..n_blocks {
            let final_block = block + 1 == n_blocks;

            let evolved = self.engine.evolve_from_parents(
                population,
                &mut merged,
                evaluations,
                iterations_per_block,
                mutation_probability,
                rng,
            );
            if let Err(err) = evolved {
                self.abandon_merge(final_block);
                return Err(err);
            }
            best.update(population, evaluations);

            self.migrate(population, evaluations, &mut merged, final_block)?;
            if !final_block {
                merged.shuffle(rng);
            }

            log::debug!(
                "worker {}: block {}/{n_blocks} merged",
                self.comm.rank(),
                block + 1
            );

            if self.comm.is_root() {
                progress.block_done(block + 1, n_blocks, best.fitness);
            }
        }

        if n_blocks > 0 && self.comm.is_root() {
            population.clone_from_slice(&merged);
            self.engine.evaluate(population, evaluations);
            best.update(population, evaluations);
            log::info!(
                "island run finished: {n_blocks} blocks, best fitness {:.6}",
                best.fitness.to_f64()
            );
        }
        Ok((best.genome, best.fitness))
    }

    /// End-of-block merge.
    ///
    /// Sorts `population` and `evaluations` together by fitness in the
    /// migration order, then concatenates the first
    /// `population.len() / size` genomes of every worker into `merged`:
    /// on all workers, or on the root only when `final_block` is set.
    ///
    /// Misaligned buffers are reported after taking part in the collective
    /// with an empty share.
    pub fn migrate(
        &self,
        population: &mut [O::Genome],
        evaluations: &mut [O::Fitness],
        merged: &mut [O::Genome],
        final_block: bool,
    ) -> Result<(), EvolutionError> {
        let n = population.len();
        let checked = EvolutionError::check_len("evaluations", n, evaluations.len())
            .and_then(|()| EvolutionError::check_len("merge buffer", n, merged.len()))
            .and_then(|()| check_divisible(n, self.comm.size()).map_err(EvolutionError::from));
        if let Err(err) = checked {
            self.abandon_merge(final_block);
            return Err(err);
        }

        let ranks = match self.migration {
            MigrationOrder::Ascending => rank_by(evaluations, |a, b| a.fitness_cmp(b)),
            MigrationOrder::Descending => rank_by(evaluations, |a, b| b.fitness_cmp(a)),
        };
        order_by(population, &ranks);
        order_by(evaluations, &ranks);

        let share = &population[..n / self.comm.size()];
        let exchanged = if final_block {
            self.comm.gather(share, merged, ROOT)
        } else {
            self.comm.all_gather(share, merged)
        };
        exchanged.map_err(EvolutionError::collective)
    }

    /// Enters a merge with an empty share, so that the other workers get a
    /// failed collective instead of blocking on this one.
    fn abandon_merge(&self, final_block: bool) {
        let empty: &[O::Genome] = &[];
        let outcome = if final_block {
            self.comm.gather(empty, &mut [], ROOT)
        } else {
            self.comm.all_gather(empty, &mut [])
        };
        if let Err(err) = outcome {
            log::debug!("worker {}: abandoned merge: {err}", self.comm.rank());
        }
    }
}

/// Fittest genome a worker has evaluated so far.
struct BestSoFar<G, F> {
    genome: G,
    fitness: F,
}

impl<G: Clone, F: Fitness> BestSoFar<G, F> {
    fn new(population: &[G], evaluations: &[F]) -> Self {
        // population_size >= 2 has been checked and generate() verified it
        let i = best_index(evaluations).unwrap_or(0);
        Self {
            genome: population[i].clone(),
            fitness: evaluations[i],
        }
    }

    fn update(&mut self, population: &[G], evaluations: &[F]) {
        let Some(i) = best_index(evaluations) else {
            return;
        };
        if evaluations[i].fitness_cmp(&self.fitness).is_gt() {
            self.genome.clone_from(&population[i]);
            self.fitness = evaluations[i];
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
