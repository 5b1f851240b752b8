//! Sequential evolution driver.
//!
//! [`EvolutionRunner`] wires an [`EvolutionConfig`] to an
//! [`EvolutionEngine`]: it validates the config, seeds the RNG, allocates
//! the buffers and runs the loop
//! generate → evaluate → (select → crossover → mutate → evaluate)*.

use super::config::EvolutionConfig;
use super::engine::EvolutionEngine;
use super::types::{best_index, Fitness, GeneticOperators};
use crate::error::EvolutionError;
use crate::random::create_rng;

/// Result of a sequential evolution run.
#[derive(Debug, Clone)]
pub struct EvolutionResult<G, F> {
    /// The fittest genome seen during the entire run.
    pub best: G,

    /// Fitness of [`best`](Self::best).
    pub best_fitness: F,

    /// Final population.
    pub population: Vec<G>,

    /// Final evaluations, aligned with `population`.
    pub evaluations: Vec<F>,

    /// Number of generations executed.
    pub generations: usize,

    /// Best fitness of the initial population and of the population after
    /// each generation, `generations + 1` entries.
    ///
    /// There is no elitism, so this is not monotone.
    pub fitness_history: Vec<f64>,
}

/// Executes a sequential evolution.
///
/// # Usage
///
/// ```ignore
/// let config = EvolutionConfig::default().with_seed(42);
/// let result = EvolutionRunner::run(MyOperators::new(), &config)?;
/// println!("Best fitness: {:?}", result.best_fitness);
/// ```
pub struct EvolutionRunner;

impl EvolutionRunner {
    /// Runs the evolution described by `config`.
    ///
    /// # Errors
    /// [`EvolutionError::Config`] for an invalid config, and
    /// [`EvolutionError::LengthMismatch`] if the operators break the
    /// population-size contract.
    pub fn run<O>(
        operators: O,
        config: &EvolutionConfig,
    ) -> Result<EvolutionResult<O::Genome, O::Fitness>, EvolutionError>
    where
        O: GeneticOperators + Sync,
        O::Genome: Send + Sync,
    {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = create_rng(seed);
        let engine = EvolutionEngine::new(operators);
        let n = config.population_size;

        log::info!(
            "evolution started: population {n}, {} generations, mutation probability {}, seed {seed}",
            config.generations,
            config.mutation_probability
        );

        let mut population = Vec::with_capacity(n);
        let mut parents = Vec::with_capacity(n);
        let mut evaluations = Vec::with_capacity(n);

        engine.generate(&mut population, n, &mut rng)?;
        evaluate(&engine, &population, &mut evaluations, config.parallel);

        let mut tracker = BestTracker::new(&population, &evaluations, config.generations);

        for generation in 0..config.generations {
            engine.select_parents(&population, &mut parents, &evaluations, &mut rng)?;
            engine.crossover(&parents, &mut population, &mut rng)?;
            engine.mutate(&mut population, config.mutation_probability, &mut rng);
            evaluate(&engine, &population, &mut evaluations, config.parallel);

            tracker.update(&population, &evaluations);
            log::trace!(
                "generation {}: best {:.6}",
                generation + 1,
                tracker.best_fitness.to_f64()
            );
        }

        log::info!(
            "evolution finished: best fitness {:.6}",
            tracker.best_fitness.to_f64()
        );

        Ok(EvolutionResult {
            best: tracker.best,
            best_fitness: tracker.best_fitness,
            population,
            evaluations,
            generations: config.generations,
            fitness_history: tracker.history,
        })
    }
}

/// Evaluates on the rayon pool when requested and compiled in.
fn evaluate<O>(
    engine: &EvolutionEngine<O>,
    population: &[O::Genome],
    evaluations: &mut Vec<O::Fitness>,
    parallel: bool,
) where
    O: GeneticOperators + Sync,
    O::Genome: Send + Sync,
{
    #[cfg(feature = "parallel")]
    {
        if parallel {
            engine.evaluate_par(population, evaluations);
            return;
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    engine.evaluate(population, evaluations);
}

/// Best-so-far genome plus per-generation history.
struct BestTracker<G, F> {
    best: G,
    best_fitness: F,
    history: Vec<f64>,
}

impl<G: Clone, F: Fitness> BestTracker<G, F> {
    fn new(population: &[G], evaluations: &[F], generations: usize) -> Self {
        // population_size >= 2 has been validated and generate() checked
        let i = best_index(evaluations).unwrap_or(0);
        let mut history = Vec::with_capacity(generations + 1);
        history.push(evaluations[i].to_f64());
        Self {
            best: population[i].clone(),
            best_fitness: evaluations[i],
            history,
        }
    }

    fn update(&mut self, population: &[G], evaluations: &[F]) {
        let Some(i) = best_index(evaluations) else {
            return;
        };
        self.history.push(evaluations[i].to_f64());
        if evaluations[i].fitness_cmp(&self.best_fitness).is_gt() {
            self.best.clone_from(&population[i]);
            self.best_fitness = evaluations[i];
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
