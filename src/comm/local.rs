use super::Communicator;
use crate::error::CollectiveError;
use std::any::Any;
use std::sync::{Arc, Barrier, Mutex};

type Slot = Mutex<Option<Box<dyn Any + Send>>>;

/// State shared by all members of one [`LocalGroup`].
struct Shared {
    barrier: Barrier,
    slots: Vec<Slot>,
}

/// One worker of a group of threads inside the current process.
///
/// Each collective is two barrier phases: every worker deposits a copy of
/// its contribution in its own slot, then the receivers read all slots.
/// Every worker passes both barriers even when its own call fails, so an
/// error inside a collective never leaves the others blocked.
///
/// A worker that skips a collective, by returning early or by panicking,
/// leaves the rest of the group blocked at that collective's barrier.
/// [`IslandCoordinator`](crate::island::IslandCoordinator) enters a block's
/// merge with an empty share when its local stage fails, so its peers see
/// [`CollectiveError::BufferSize`] instead.
///
/// ```
/// use u_island::comm::{Communicator, LocalGroup};
///
/// let group = LocalGroup::new(3);
/// let merged: Vec<Vec<usize>> = std::thread::scope(|s| {
///     let handles: Vec<_> = group
///         .into_iter()
///         .map(|comm| {
///             s.spawn(move || {
///                 let mut out = vec![0; 3];
///                 comm.all_gather(&[comm.rank()], &mut out).map(|_| out)
///             })
///         })
///         .collect();
///     handles.into_iter().map(|h| h.join().unwrap().unwrap()).collect()
/// });
/// assert!(merged.iter().all(|out| out == &[0, 1, 2]));
/// ```
#[derive(Clone)]
pub struct LocalGroup {
    rank: usize,
    shared: Arc<Shared>,
}

impl std::fmt::Debug for LocalGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalGroup")
            .field("rank", &self.rank)
            .field("size", &self.shared.slots.len())
            .finish()
    }
}

impl LocalGroup {
    /// Creates the handles of a `size`-worker group, ordered by rank.
    ///
    /// Hand each handle to its own thread.
    pub fn new(size: usize) -> Vec<LocalGroup> {
        let shared = Arc::new(Shared {
            barrier: Barrier::new(size),
            slots: (0..size).map(|_| Mutex::new(None)).collect(),
        });
        (0..size)
            .map(|rank| LocalGroup {
                rank,
                shared: Arc::clone(&shared),
            })
            .collect()
    }

    /// Runs one collective. `receiver` is `None` for an all-gather.
    fn exchange<T: Clone + Send + 'static>(
        &self,
        local: &[T],
        out: &mut [T],
        receiver: Option<usize>,
    ) -> Result<(), CollectiveError> {
        let size = self.size();
        if let Some(root) = receiver {
            // every worker sees the same root, so all of them bail out here
            if root >= size {
                return Err(CollectiveError::RootOutOfRange { root, size });
            }
        }
        let receives = receiver.map_or(true, |root| root == self.rank);

        let mut result = if receives && out.len() != local.len() * size {
            Err(CollectiveError::BufferSize {
                expected: local.len() * size,
                actual: out.len(),
            })
        } else {
            Ok(())
        };

        match self.shared.slots[self.rank].lock() {
            Ok(mut slot) => *slot = Some(Box::new(local.to_vec())),
            Err(_) => result = result.and(Err(CollectiveError::Poisoned)),
        }

        self.shared.barrier.wait();
        if receives && result.is_ok() {
            result = self.collect(local.len(), out);
        }
        self.shared.barrier.wait();

        if let Ok(mut slot) = self.shared.slots[self.rank].lock() {
            *slot = None;
        }
        result
    }

    /// Copies every deposited contribution into its rank's range of `out`.
    fn collect<T: Clone + 'static>(&self, n: usize, out: &mut [T]) -> Result<(), CollectiveError> {
        for (source, slot) in self.shared.slots.iter().enumerate() {
            let slot = slot.lock().map_err(|_| CollectiveError::Poisoned)?;
            let data = slot
                .as_ref()
                .ok_or(CollectiveError::MissingContribution(source))?
                .downcast_ref::<Vec<T>>()
                .ok_or(CollectiveError::TypeMismatch(source))?;
            if data.len() != n {
                return Err(CollectiveError::BufferSize {
                    expected: n,
                    actual: data.len(),
                });
            }
            out[source * n..(source + 1) * n].clone_from_slice(data);
        }
        Ok(())
    }
}

impl Communicator for LocalGroup {
    type Error = CollectiveError;

    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.shared.slots.len()
    }

    fn all_gather<T: Clone + Send + 'static>(
        &self,
        local: &[T],
        out: &mut [T],
    ) -> Result<(), CollectiveError> {
        self.exchange(local, out, None)
    }

    fn gather<T: Clone + Send + 'static>(
        &self,
        local: &[T],
        out: &mut [T],
        root: usize,
    ) -> Result<(), CollectiveError> {
        self.exchange(local, out, Some(root))
    }
}
