//! Core trait definitions for the GA framework.
//!
//! [`GeneticOperators`] is the contract between the generic
//! [`EvolutionEngine`](super::EvolutionEngine) and a concrete problem.
//! The engine never inspects genomes; it only moves them between buffers
//! and hands them back to the operators.

use super::selection::Selection;
use rand::Rng;
use std::cmp::Ordering;

/// Totally ordered fitness value.
///
/// **Greater fitness is better** (maximization). Comparisons go through
/// [`fitness_cmp`](Fitness::fitness_cmp), so floating-point fitness is
/// ordered by IEEE 754 `totalOrder` rather than `PartialOrd`.
///
/// Built-in implementations exist for `f64`, `f32` and the primitive
/// integers.
pub trait Fitness: PartialOrd + Copy + Send + Sync + std::fmt::Debug + 'static {
    /// Total order used for ranking and selection.
    fn fitness_cmp(&self, other: &Self) -> Ordering;

    /// Converts the fitness to `f64` for logging and weighted sampling.
    fn to_f64(self) -> f64;
}

impl Fitness for f64 {
    fn fitness_cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }

    fn to_f64(self) -> f64 {
        self
    }
}

impl Fitness for f32 {
    fn fitness_cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

macro_rules! integer_fitness {
    ($($t:ty),*) => {
        $(
            impl Fitness for $t {
                fn fitness_cmp(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }

                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

integer_fitness!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

/// Problem-specific capability set consumed by the evolution engine.
///
/// An implementation may cache auxiliary state (distance tables,
/// precomputed distributions); the engine owns the operators for its whole
/// lifetime and never looks inside.
///
/// # Implementing
///
/// ```
/// use rand::Rng;
/// use u_island::ga::GeneticOperators;
///
/// struct OneMax { bits: usize }
///
/// impl GeneticOperators for OneMax {
///     type Genome = Vec<bool>;
///     type Fitness = u32;
///
///     fn generate<R: Rng>(&self, count: usize, rng: &mut R) -> Vec<Vec<bool>> {
///         (0..count)
///             .map(|_| (0..self.bits).map(|_| rng.random_bool(0.5)).collect())
///             .collect()
///     }
///
///     fn evaluate(&self, genome: &Vec<bool>) -> u32 {
///         genome.iter().filter(|&&b| b).count() as u32
///     }
/// }
/// ```
pub trait GeneticOperators {
    /// Candidate solution. Fixed logical size within a run.
    type Genome: Clone;

    /// Score of one genome. Greater is better.
    type Fitness: Fitness;

    /// Creates `count` random genomes.
    fn generate<R: Rng>(&self, count: usize, rng: &mut R) -> Vec<Self::Genome>;

    /// Scores one genome.
    fn evaluate(&self, genome: &Self::Genome) -> Self::Fitness;

    /// Draws a parent pool the same size as `population`, with replacement.
    ///
    /// `evaluations[i]` is the fitness of `population[i]`. The default is
    /// fitness-proportional [`Selection::Roulette`].
    fn select_parents<R: Rng>(
        &self,
        population: &[Self::Genome],
        evaluations: &[Self::Fitness],
        rng: &mut R,
    ) -> Vec<Self::Genome> {
        Selection::Roulette.select_parents(population, evaluations, rng)
    }

    /// Produces two children from two parents.
    ///
    /// The default clones the parents (no recombination).
    fn crossover<R: Rng>(
        &self,
        first: &Self::Genome,
        second: &Self::Genome,
        _rng: &mut R,
    ) -> (Self::Genome, Self::Genome) {
        (first.clone(), second.clone())
    }

    /// Mutates a genome in place.
    ///
    /// The default is a no-op.
    fn mutate<R: Rng>(&self, _genome: &mut Self::Genome, _rng: &mut R) {}
}

/// Index of the fittest entry, or `None` for an empty slice.
///
/// Ties resolve to the last maximal entry.
pub fn best_index<F: Fitness>(evaluations: &[F]) -> Option<usize> {
    evaluations
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.fitness_cmp(b.1))
        .map(|(i, _)| i)
}
