//! The evolution engine.
//!
//! [`EvolutionEngine`] runs the pipeline stages over caller-provided
//! buffers: generate → evaluate, then repeatedly
//! select → crossover → mutate → evaluate.
//!
//! Buffers are allocated once by the caller and reused across the whole run.
//! Output `Vec`s are cleared and refilled so they always hold exactly the
//! population size; in-place stages take slices.

use super::types::GeneticOperators;
use crate::error::EvolutionError;
use rand::seq::SliceRandom;
use rand::Rng;

/// Drives one [`GeneticOperators`] implementation through the GA pipeline.
///
/// The engine exclusively owns its operators and keeps no other state, so
/// every stage is safe to call in any order.
///
/// # Usage
///
/// ```
/// # use rand::Rng;
/// # use u_island::ga::GeneticOperators;
/// use u_island::ga::EvolutionEngine;
/// use u_island::random::create_rng;
/// # struct Counter;
/// # impl GeneticOperators for Counter {
/// #     type Genome = u32;
/// #     type Fitness = u32;
/// #     fn generate<R: Rng>(&self, count: usize, rng: &mut R) -> Vec<u32> {
/// #         (0..count).map(|_| rng.random_range(1..100)).collect()
/// #     }
/// #     fn evaluate(&self, genome: &u32) -> u32 { *genome }
/// # }
///
/// let engine = EvolutionEngine::new(Counter);
/// let mut rng = create_rng(42);
/// let mut population = Vec::new();
/// let mut evaluations = Vec::new();
/// engine.run(&mut population, 10, &mut evaluations, 5, 0.05, &mut rng)?;
/// assert_eq!(population.len(), 10);
/// assert_eq!(evaluations.len(), 10);
/// # Ok::<(), u_island::EvolutionError>(())
/// ```
#[derive(Debug, Clone)]
pub struct EvolutionEngine<O> {
    operators: O,
}

impl<O: GeneticOperators> EvolutionEngine<O> {
    /// Takes ownership of the operators.
    pub fn new(operators: O) -> Self {
        Self { operators }
    }

    /// The owned operators.
    pub fn operators(&self) -> &O {
        &self.operators
    }

    /// Releases the operators.
    pub fn into_operators(self) -> O {
        self.operators
    }

    /// Replaces `population` with `n` freshly generated genomes.
    ///
    /// # Errors
    /// [`EvolutionError::LengthMismatch`] if the operators return a
    /// population of any other size.
    pub fn generate<R: Rng>(
        &self,
        population: &mut Vec<O::Genome>,
        n: usize,
        rng: &mut R,
    ) -> Result<(), EvolutionError> {
        let generated = self.operators.generate(n, rng);
        EvolutionError::check_len("generated population", n, generated.len())?;
        *population = generated;
        Ok(())
    }

    /// Fills `evaluations` so that `evaluations[i]` is the fitness of
    /// `population[i]`.
    pub fn evaluate(&self, population: &[O::Genome], evaluations: &mut Vec<O::Fitness>) {
        evaluations.clear();
        evaluations.extend(population.iter().map(|g| self.operators.evaluate(g)));
    }

    /// [`evaluate`](Self::evaluate) with genomes scored in parallel on the
    /// rayon pool.
    #[cfg(feature = "parallel")]
    pub fn evaluate_par(&self, population: &[O::Genome], evaluations: &mut Vec<O::Fitness>)
    where
        O: Sync,
        O::Genome: Sync,
    {
        use rayon::prelude::*;

        evaluations.clear();
        population
            .par_iter()
            .map(|g| self.operators.evaluate(g))
            .collect_into_vec(evaluations);
    }

    /// Replaces `parents` with a parent pool drawn from `population`, then
    /// shuffles it.
    ///
    /// Crossover pairs neighbours, and the shuffle keeps the pairing
    /// independent of the order the operators produced the pool in.
    ///
    /// # Errors
    /// [`EvolutionError::LengthMismatch`] if `evaluations` is not aligned
    /// with `population` or the operators return a pool of another size.
    pub fn select_parents<R: Rng>(
        &self,
        population: &[O::Genome],
        parents: &mut Vec<O::Genome>,
        evaluations: &[O::Fitness],
        rng: &mut R,
    ) -> Result<(), EvolutionError> {
        let n = population.len();
        EvolutionError::check_len("evaluations", n, evaluations.len())?;
        let mut pool = self.operators.select_parents(population, evaluations, rng);
        EvolutionError::check_len("parent pool", n, pool.len())?;
        pool.shuffle(rng);
        *parents = pool;
        Ok(())
    }

    /// Writes the children of neighbouring parent pairs `(i, i + 1)` into
    /// `children[i]` and `children[i + 1]`.
    ///
    /// With an odd number of parents the last one has no partner and is
    /// copied into the last child slot unchanged.
    ///
    /// # Errors
    /// [`EvolutionError::LengthMismatch`] if the buffers differ in length.
    pub fn crossover<R: Rng>(
        &self,
        parents: &[O::Genome],
        children: &mut [O::Genome],
        rng: &mut R,
    ) -> Result<(), EvolutionError> {
        EvolutionError::check_len("children buffer", parents.len(), children.len())?;

        let mut pairs = parents.chunks_exact(2);
        for (pair, slots) in pairs.by_ref().zip(children.chunks_exact_mut(2)) {
            let (eldest, youngest) = self.operators.crossover(&pair[0], &pair[1], rng);
            slots[0] = eldest;
            slots[1] = youngest;
        }
        if let ([unpaired], Some(slot)) = (pairs.remainder(), children.last_mut()) {
            log::debug!("odd population: carrying the last parent through crossover");
            slot.clone_from(unpaired);
        }
        Ok(())
    }

    /// Mutates each genome independently with probability
    /// `mutation_probability`.
    pub fn mutate<R: Rng>(
        &self,
        population: &mut [O::Genome],
        mutation_probability: f64,
        rng: &mut R,
    ) {
        for genome in population.iter_mut() {
            if rng.random::<f64>() < mutation_probability {
                self.operators.mutate(genome, rng);
            }
        }
    }

    /// Runs a complete sequential evolution of `n_iterations` generations.
    ///
    /// `population` and `evaluations` are (re)filled with exactly `n`
    /// entries. With `n_iterations == 0` they hold the generated, evaluated
    /// population and nothing else happens.
    pub fn run<R: Rng>(
        &self,
        population: &mut Vec<O::Genome>,
        n: usize,
        evaluations: &mut Vec<O::Fitness>,
        n_iterations: usize,
        mutation_probability: f64,
        rng: &mut R,
    ) -> Result<(), EvolutionError> {
        self.generate(population, n, rng)?;
        self.evaluate(population, evaluations);

        if n_iterations == 0 {
            return Ok(());
        }

        let mut parents = Vec::with_capacity(n);
        self.select_parents(population, &mut parents, evaluations, rng)?;
        self.evolve_from_parents(
            population,
            &mut parents,
            evaluations,
            n_iterations,
            mutation_probability,
            rng,
        )
    }

    /// Runs `n_iterations` generations starting from an already selected
    /// parent pool.
    ///
    /// The first generation breeds directly from `parents`; every later one
    /// selects a fresh pool from `population` first.
    pub(crate) fn evolve_from_parents<R: Rng>(
        &self,
        population: &mut [O::Genome],
        parents: &mut Vec<O::Genome>,
        evaluations: &mut Vec<O::Fitness>,
        n_iterations: usize,
        mutation_probability: f64,
        rng: &mut R,
    ) -> Result<(), EvolutionError> {
        if n_iterations == 0 {
            return Ok(());
        }
        self.breed(population, parents, evaluations, mutation_probability, rng)?;

        for generation in 1..n_iterations {
            self.select_parents(population, parents, evaluations, rng)?;
            self.breed(population, parents, evaluations, mutation_probability, rng)?;
            log::trace!("generation {generation} done");
        }
        Ok(())
    }

    /// Crossover → mutate → evaluate.
    fn breed<R: Rng>(
        &self,
        population: &mut [O::Genome],
        parents: &[O::Genome],
        evaluations: &mut Vec<O::Fitness>,
        mutation_probability: f64,
        rng: &mut R,
    ) -> Result<(), EvolutionError> {
        self.crossover(parents, population, rng)?;
        self.mutate(population, mutation_probability, rng);
        self.evaluate(population, evaluations);
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
