use super::Communicator;
use crate::error::CollectiveError;

/// A group holding only the calling worker.
///
/// Gathers degenerate into copying `local` into `out`, which lets the
/// island coordinator run, and be tested, without any runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleProcess;

impl SingleProcess {
    fn copy<T: Clone>(local: &[T], out: &mut [T]) -> Result<(), CollectiveError> {
        if local.len() != out.len() {
            return Err(CollectiveError::BufferSize {
                expected: local.len(),
                actual: out.len(),
            });
        }
        out.clone_from_slice(local);
        Ok(())
    }
}

impl Communicator for SingleProcess {
    type Error = CollectiveError;

    fn rank(&self) -> usize {
        0
    }

    fn size(&self) -> usize {
        1
    }

    fn all_gather<T: Clone + Send + 'static>(
        &self,
        local: &[T],
        out: &mut [T],
    ) -> Result<(), CollectiveError> {
        Self::copy(local, out)
    }

    fn gather<T: Clone + Send + 'static>(
        &self,
        local: &[T],
        out: &mut [T],
        root: usize,
    ) -> Result<(), CollectiveError> {
        if root != 0 {
            return Err(CollectiveError::RootOutOfRange { root, size: 1 });
        }
        Self::copy(local, out)
    }
}
