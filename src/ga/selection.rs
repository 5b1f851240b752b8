//! Parent selection strategies.
//!
//! Building blocks for [`GeneticOperators::select_parents`](super::GeneticOperators::select_parents).
//! Every strategy samples **with replacement** and assumes **greater
//! fitness is better**.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"

use super::types::Fitness;
use crate::reorder::rank_by;
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;

/// Selection strategy for drawing a parent pool.
///
/// # Examples
///
/// ```
/// use u_island::ga::Selection;
/// use u_island::random::create_rng;
///
/// let population = vec!["a", "b", "c"];
/// let evaluations = vec![1.0, 0.0, 3.0];
/// let mut rng = create_rng(42);
///
/// let parents = Selection::Roulette.select_parents(&population, &evaluations, &mut rng);
/// assert_eq!(parents.len(), 3);
/// assert!(!parents.contains(&"b"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// Probability of drawing genome `i` is `f_i / Σ f`. Fitness must be
    /// finite, non-negative, and not all zero.
    ///
    /// # Complexity
    /// O(n) setup, O(log n) per draw
    #[default]
    Roulette,

    /// Tournament selection: draw `k` genomes at random, keep the fittest.
    ///
    /// # Complexity
    /// O(k) per draw
    Tournament(usize),

    /// Linear rank selection: the genome ranked `r` (0 = least fit) is
    /// drawn with weight `r + 1`. Insensitive to fitness scale.
    ///
    /// # Complexity
    /// O(n log n) setup, O(log n) per draw
    Rank,
}

impl Selection {
    /// Draws `evaluations.len()` indices into the population.
    ///
    /// # Panics
    /// Panics if `evaluations` is empty, or for [`Selection::Roulette`] if
    /// any fitness is negative or non-finite or all are zero.
    pub fn sample_indices<F: Fitness, R: Rng>(&self, evaluations: &[F], rng: &mut R) -> Vec<usize> {
        let n = evaluations.len();
        assert!(n > 0, "cannot select from empty population");

        match *self {
            Selection::Roulette => {
                let weights = evaluations.iter().map(|f| f.to_f64());
                let dist = match WeightedIndex::new(weights) {
                    Ok(dist) => dist,
                    Err(err) => {
                        panic!("roulette selection needs finite, non-negative fitness: {err}")
                    }
                };
                (0..n).map(|_| dist.sample(rng)).collect()
            }
            Selection::Tournament(k) => (0..n).map(|_| tournament(evaluations, k, rng)).collect(),
            Selection::Rank => {
                let ranks = rank_by(evaluations, F::fitness_cmp);
                let dist = WeightedIndex::new(ranks.iter().map(|&r| r + 1))
                    .unwrap_or_else(|err| unreachable!("rank weights are positive: {err}"));
                (0..n).map(|_| dist.sample(rng)).collect()
            }
        }
    }

    /// Draws a parent pool the same size as `population`.
    ///
    /// # Panics
    /// Panics if the slices differ in length, and in the cases listed on
    /// [`sample_indices`](Self::sample_indices).
    pub fn select_parents<G: Clone, F: Fitness, R: Rng>(
        &self,
        population: &[G],
        evaluations: &[F],
        rng: &mut R,
    ) -> Vec<G> {
        assert_eq!(
            population.len(),
            evaluations.len(),
            "population and evaluations must have equal length"
        );
        self.sample_indices(evaluations, rng)
            .into_iter()
            .map(|i| population[i].clone())
            .collect()
    }
}

/// Tournament draw: pick k random entries, return the fittest.
fn tournament<F: Fitness, R: Rng>(evaluations: &[F], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = evaluations.len();

    let mut best = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if evaluations[idx].fitness_cmp(&evaluations[best]).is_gt() {
            best = idx;
        }
    }
    best
}
