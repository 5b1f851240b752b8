//! Collective communication between cooperating workers.
//!
//! The island coordinator never talks to a transport directly. It only
//! needs a worker's position in the group and two blocking collectives,
//! described by [`Communicator`]:
//!
//! - [`all_gather`](Communicator::all_gather): every worker receives the
//!   concatenation of all contributions, ordered by rank
//! - [`gather`](Communicator::gather): only `root` receives it
//!
//! # Runtimes
//!
//! - [`SingleProcess`]: a group of one; collectives are local copies
//! - [`LocalGroup`]: workers on threads of one process, synchronised by a
//!   barrier
//!
//! A message-passing runtime plugs in by implementing the trait.

mod local;
mod single;

pub use local::LocalGroup;
pub use single::SingleProcess;

/// Rank of the coordinating worker.
pub const ROOT: usize = 0;

/// A worker's handle on a fixed-size process group.
///
/// Both collectives block until every worker of the group has made the
/// matching call. All workers must contribute slices of the same length
/// `n`; the receive buffer then holds `n * size()` elements, with the
/// contribution of rank `r` at `[r * n, (r + 1) * n)`.
pub trait Communicator {
    /// Failure reported by the runtime.
    type Error: std::error::Error + Send + Sync + 'static;

    /// This worker's rank in `0..size()`.
    fn rank(&self) -> usize;

    /// Number of workers in the group.
    fn size(&self) -> usize;

    /// Concatenates every worker's `local` slice into `out` on all workers.
    fn all_gather<T: Clone + Send + 'static>(
        &self,
        local: &[T],
        out: &mut [T],
    ) -> Result<(), Self::Error>;

    /// Concatenates every worker's `local` slice into `out` on `root`.
    ///
    /// `out` is left untouched on every other worker.
    fn gather<T: Clone + Send + 'static>(
        &self,
        local: &[T],
        out: &mut [T],
        root: usize,
    ) -> Result<(), Self::Error>;

    /// Whether this worker is the coordinator ([`ROOT`]).
    fn is_root(&self) -> bool {
        self.rank() == ROOT
    }
}
