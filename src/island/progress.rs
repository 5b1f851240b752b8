//! Per-block progress reporting.
//!
//! Only the coordinating worker reports, once per block, with the best
//! fitness of its local population at the end of that block.

use crate::ga::Fitness;

/// Receives one tick per finished block.
pub trait Progress<F> {
    /// Block `block` (1-based) of `n_blocks` has finished.
    fn block_done(&mut self, block: usize, n_blocks: usize, best: F);
}

/// Discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl<F> Progress<F> for NoProgress {
    fn block_done(&mut self, _block: usize, _n_blocks: usize, _best: F) {}
}

/// Reports through the `log` facade at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl<F: Fitness> Progress<F> for LogProgress {
    fn block_done(&mut self, block: usize, n_blocks: usize, best: F) {
        log::info!("block {block}/{n_blocks}: best fitness {:.6}", best.to_f64());
    }
}

/// Records the best fitness of every block.
#[derive(Debug, Clone, Default)]
pub struct BestHistory<F> {
    pub best: Vec<F>,
}

impl<F> BestHistory<F> {
    pub fn new() -> Self {
        Self { best: Vec::new() }
    }
}

impl<F> Progress<F> for BestHistory<F> {
    fn block_done(&mut self, _block: usize, _n_blocks: usize, best: F) {
        self.best.push(best);
    }
}

impl<F, P: Progress<F> + ?Sized> Progress<F> for &mut P {
    fn block_done(&mut self, block: usize, n_blocks: usize, best: F) {
        (**self).block_done(block, n_blocks, best);
    }
}
