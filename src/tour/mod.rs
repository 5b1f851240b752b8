//! Open-tour reference problem.
//!
//! A permutation-encoded problem: visit every city once, starting from the
//! fixed city 0, minimizing the L1 length of the open path. It exercises
//! the permutation-preserving crossover end to end.
//!
//! # Key Types
//!
//! - [`TourProblem`]: the [`GeneticOperators`](crate::ga::GeneticOperators)
//!   implementation
//! - [`circle_points`], [`square_points`]: city layouts

mod points;
mod problem;

pub use points::{circle_points, square_points};
pub use problem::{Tour, TourProblem};
