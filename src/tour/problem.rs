use crate::error::ConfigError;
use crate::ga::operators::{random_rank_swap_crossover, reflect_mutation, shift_mutation};
use crate::ga::{GeneticOperators, Selection};
use rand::seq::SliceRandom;
use rand::Rng;

/// Visiting order of cities `1..n`. City 0 is the implicit start.
pub type Tour = Vec<u16>;

/// Open tour over a fixed set of cities in the plane.
///
/// - **Genome**: a permutation of `1..n` ([`Tour`])
/// - **Fitness**: `1 / length` of the L1 path `0 → tour[0] → … → tour[n-2]`
/// - **Crossover**: rank-swap at a uniform cut
///   ([`random_rank_swap_crossover`])
/// - **Mutation**: reflect or shift with equal probability
///
/// ```
/// use u_island::ga::{EvolutionConfig, EvolutionRunner};
/// use u_island::tour::{circle_points, TourProblem};
///
/// let problem = TourProblem::new(circle_points(1.0, 10))?;
/// let config = EvolutionConfig::default()
///     .with_population_size(50)
///     .with_generations(20)
///     .with_seed(7);
/// let result = EvolutionRunner::run(problem, &config)?;
/// assert_eq!(result.best.len(), 9);
/// # Ok::<(), u_island::EvolutionError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TourProblem {
    cities: Vec<[f64; 2]>,
    selection: Selection,
}

impl TourProblem {
    /// Largest supported number of cities: indices `1..n` must fit a `u16`.
    pub const MAX_CITIES: usize = u16::MAX as usize + 1;

    /// Creates the problem over `cities`; city 0 is the start.
    ///
    /// # Errors
    /// [`ConfigError::TooFewCities`] below 2 cities,
    /// [`ConfigError::TooManyCities`] above [`MAX_CITIES`](Self::MAX_CITIES),
    /// [`ConfigError::CoincidentCities`] when every city is at one point,
    /// since every tour would then have zero length and infinite fitness.
    pub fn new(cities: Vec<[f64; 2]>) -> Result<Self, ConfigError> {
        if cities.len() < 2 {
            return Err(ConfigError::TooFewCities(cities.len()));
        }
        if cities.len() > Self::MAX_CITIES {
            return Err(ConfigError::TooManyCities {
                max: Self::MAX_CITIES,
                actual: cities.len(),
            });
        }
        if cities.iter().all(|city| *city == cities[0]) {
            return Err(ConfigError::CoincidentCities(cities.len()));
        }
        Ok(Self {
            cities,
            selection: Selection::Roulette,
        })
    }

    /// Sets the parent selection strategy (default: roulette).
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    pub fn cities(&self) -> &[[f64; 2]] {
        &self.cities
    }

    pub fn n_cities(&self) -> usize {
        self.cities.len()
    }

    /// L1 length of the open path starting at city 0.
    pub fn path_length(&self, tour: &[u16]) -> f64 {
        let mut previous = 0usize;
        let mut total = 0.0;
        for &city in tour {
            let city = city as usize;
            total += self.distance(previous, city);
            previous = city;
        }
        total
    }

    /// Whether `tour` visits each of the cities `1..n` exactly once.
    pub fn is_valid_tour(&self, tour: &[u16]) -> bool {
        let n = self.n_cities();
        if tour.len() != n - 1 {
            return false;
        }
        let mut seen = vec![false; n];
        tour.iter().all(|&city| {
            let city = city as usize;
            (1..n).contains(&city) && !std::mem::replace(&mut seen[city], true)
        })
    }

    fn distance(&self, a: usize, b: usize) -> f64 {
        let [ax, ay] = self.cities[a];
        let [bx, by] = self.cities[b];
        (ax - bx).abs() + (ay - by).abs()
    }
}

impl GeneticOperators for TourProblem {
    type Genome = Tour;
    type Fitness = f64;

    fn generate<R: Rng>(&self, count: usize, rng: &mut R) -> Vec<Tour> {
        // n <= MAX_CITIES, so every index fits
        let base: Tour = (1..self.n_cities()).map(|c| c as u16).collect();
        (0..count)
            .map(|_| {
                let mut tour = base.clone();
                tour.shuffle(rng);
                tour
            })
            .collect()
    }

    fn evaluate(&self, tour: &Tour) -> f64 {
        1.0 / self.path_length(tour)
    }

    fn select_parents<R: Rng>(
        &self,
        population: &[Tour],
        evaluations: &[f64],
        rng: &mut R,
    ) -> Vec<Tour> {
        self.selection.select_parents(population, evaluations, rng)
    }

    fn crossover<R: Rng>(&self, first: &Tour, second: &Tour, rng: &mut R) -> (Tour, Tour) {
        random_rank_swap_crossover(first, second, rng)
    }

    fn mutate<R: Rng>(&self, tour: &mut Tour, rng: &mut R) {
        if rng.random_bool(0.5) {
            reflect_mutation(tour, rng);
        } else {
            shift_mutation(tour, rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::{EvolutionConfig, EvolutionRunner};
    use crate::random::create_rng;
    use crate::tour::circle_points;
    use proptest::prelude::*;

    fn unit_square() -> TourProblem {
        TourProblem::new(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]).unwrap()
    }

    #[test]
    fn test_rejects_degenerate_city_sets() {
        assert_eq!(
            TourProblem::new(vec![[0.0, 0.0]]).unwrap_err(),
            ConfigError::TooFewCities(1)
        );
        let too_many = vec![[0.0, 0.0]; TourProblem::MAX_CITIES + 1];
        assert_eq!(
            TourProblem::new(too_many).unwrap_err(),
            ConfigError::TooManyCities {
                max: 65_536,
                actual: 65_537
            }
        );
        assert!(TourProblem::new(vec![[0.0, 0.0], [0.0, 1.0]]).is_ok());
    }

    #[test]
    fn test_rejects_coincident_cities() {
        assert_eq!(
            TourProblem::new(vec![[1.0, 1.0]; 3]).unwrap_err(),
            ConfigError::CoincidentCities(3)
        );
        // duplicates are fine as long as one city is elsewhere
        let problem = TourProblem::new(vec![[1.0, 1.0], [1.0, 1.0], [2.0, 1.0]]).unwrap();
        let config = EvolutionConfig::default()
            .with_population_size(4)
            .with_generations(1)
            .with_seed(3);
        let result = EvolutionRunner::run(problem, &config).unwrap();
        assert!(result.best_fitness.is_finite());
    }

    #[test]
    fn test_path_length_l1() {
        let problem = unit_square();
        assert_eq!(problem.path_length(&[1, 2, 3]), 3.0);
        // 0 → 2 is a diagonal: L1 length 2
        assert_eq!(problem.path_length(&[2, 1, 3]), 2.0 + 1.0 + 2.0);
        assert_eq!(problem.evaluate(&vec![1, 2, 3]), 1.0 / 3.0);
    }

    #[test]
    fn test_evaluate_prefers_shorter_tours() {
        let problem = unit_square();
        assert!(problem.evaluate(&vec![1, 2, 3]) > problem.evaluate(&vec![2, 1, 3]));
    }

    #[test]
    fn test_generate_permutations() {
        let problem = TourProblem::new(circle_points(1.0, 30)).unwrap();
        let mut rng = create_rng(42);
        let population = problem.generate(100, &mut rng);
        assert_eq!(population.len(), 100);
        assert!(population.iter().all(|t| problem.is_valid_tour(t)));
        assert!(population.iter().any(|t| t != &population[0]));
    }

    #[test]
    fn test_is_valid_tour() {
        let problem = unit_square();
        assert!(problem.is_valid_tour(&[3, 1, 2]));
        assert!(!problem.is_valid_tour(&[1, 1, 2]));
        assert!(!problem.is_valid_tour(&[0, 1, 2]));
        assert!(!problem.is_valid_tour(&[1, 2]));
        assert!(!problem.is_valid_tour(&[1, 2, 4]));
    }

    #[test]
    fn test_mutate_keeps_tours_valid() {
        let problem = TourProblem::new(circle_points(1.0, 20)).unwrap();
        let mut rng = create_rng(5);
        let mut tour = problem.generate(1, &mut rng).remove(0);
        for _ in 0..500 {
            problem.mutate(&mut tour, &mut rng);
            assert!(problem.is_valid_tour(&tour), "invalid tour {tour:?}");
        }
    }

    #[test]
    fn test_two_cities() {
        let problem = TourProblem::new(vec![[0.0, 0.0], [2.0, 3.0]]).unwrap();
        let mut rng = create_rng(1);
        let (a, b) = problem.crossover(&vec![1], &vec![1], &mut rng);
        assert_eq!((a, b), (vec![1], vec![1]));
        assert_eq!(problem.evaluate(&vec![1]), 0.2);
    }

    #[test]
    fn test_evolution_shortens_circle_tour() {
        let problem = TourProblem::new(circle_points(10.0, 12))
            .unwrap()
            .with_selection(Selection::Tournament(3));
        let config = EvolutionConfig::default()
            .with_population_size(100)
            .with_generations(150)
            .with_mutation_probability(0.2)
            .with_seed(42);

        let mut rng = create_rng(0);
        let random_best = problem
            .generate(100, &mut rng)
            .iter()
            .map(|t| problem.evaluate(t))
            .fold(f64::MIN, f64::max);

        let result = EvolutionRunner::run(problem.clone(), &config).unwrap();
        assert!(problem.is_valid_tour(&result.best));
        assert!(
            result.best_fitness > random_best,
            "evolved {} should beat random {}",
            result.best_fitness,
            random_best
        );
    }

    fn tour_pair(n: usize) -> impl Strategy<Value = (Tour, Tour)> {
        let base: Tour = (1..n as u16).collect();
        (Just(base.clone()).prop_shuffle(), Just(base).prop_shuffle())
    }

    proptest! {
        #[test]
        fn crossover_children_are_permutations(
            (n, (p1, p2)) in (2usize..60).prop_flat_map(|n| (Just(n), tour_pair(n))),
            seed in any::<u64>()
        ) {
            let problem = TourProblem::new(circle_points(1.0, n)).unwrap();
            let mut rng = create_rng(seed);
            for _ in 0..8 {
                let (c1, c2) = problem.crossover(&p1, &p2, &mut rng);
                prop_assert!(problem.is_valid_tour(&c1), "child {:?}", c1);
                prop_assert!(problem.is_valid_tour(&c2), "child {:?}", c2);
            }
        }

        #[test]
        fn mutation_keeps_permutations(
            (n, (tour, _)) in (2usize..60).prop_flat_map(|n| (Just(n), tour_pair(n))),
            seed in any::<u64>()
        ) {
            let problem = TourProblem::new(circle_points(1.0, n)).unwrap();
            let mut rng = create_rng(seed);
            let mut tour = tour;
            problem.mutate(&mut tour, &mut rng);
            prop_assert!(problem.is_valid_tour(&tour));
        }
    }
}
