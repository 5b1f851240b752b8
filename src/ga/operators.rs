//! Generic permutation-based genetic operators.
//!
//! Crossover and mutation for permutation-encoded genomes. They work on any
//! slice of ordered elements and never duplicate or drop an element, so a
//! valid permutation stays valid.
//!
//! # Crossover
//!
//! - [`rank_swap_crossover`]: keeps each parent's head, re-arranges each
//!   tail in the relative order of the other parent's tail
//!
//! # Mutation
//!
//! - [`reflect_mutation`]: reverse a random segment (2-opt move), O(n)
//! - [`shift_mutation`]: swap two equal-length, non-overlapping blocks, O(n)
//!
//! # References
//!
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use crate::reorder::swap_order_by_rank;
use rand::Rng;

// ============================================================================
// Crossover operators
// ============================================================================

/// Rank-swap crossover at a fixed cut point.
///
/// Both children start as copies of their parents. The tails
/// `child[cut..]` are then permuted by each other's rank order
/// (see [`swap_order_by_rank`]): child 1 keeps the *elements* of parent 1's
/// tail but takes on the *relative order* of parent 2's tail, and vice versa.
///
/// ```
/// use u_island::ga::operators::rank_swap_crossover;
///
/// let (c1, c2) = rank_swap_crossover(&[1, 2, 3, 4, 5], &[5, 3, 1, 4, 2], 2);
/// assert_eq!(c1, vec![1, 2, 3, 5, 4]);
/// assert_eq!(c2, vec![5, 3, 1, 2, 4]);
/// ```
///
/// # Complexity
/// O(n log n)
///
/// # Panics
/// Panics if the parents have different lengths or `cut > len`.
pub fn rank_swap_crossover<T: Ord + Clone>(
    parent1: &[T],
    parent2: &[T],
    cut: usize,
) -> (Vec<T>, Vec<T>) {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");
    assert!(cut <= parent1.len(), "cut point past the end of the genome");

    let mut child1 = parent1.to_vec();
    let mut child2 = parent2.to_vec();
    swap_order_by_rank(&mut child1[cut..], &mut child2[cut..]);
    (child1, child2)
}

/// [`rank_swap_crossover`] with a cut drawn uniformly from `0..len`.
///
/// Empty parents produce empty children.
pub fn random_rank_swap_crossover<T: Ord + Clone, R: Rng>(
    parent1: &[T],
    parent2: &[T],
    rng: &mut R,
) -> (Vec<T>, Vec<T>) {
    if parent1.is_empty() {
        return (parent1.to_vec(), parent2.to_vec());
    }
    let cut = rng.random_range(0..parent1.len());
    rank_swap_crossover(parent1, parent2, cut)
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Reflect mutation: reverse the elements in `[i, j)` for two random
/// positions `i <= j` drawn from `0..n`.
///
/// The segment may be empty, in which case the genome is unchanged.
pub fn reflect_mutation<T, R: Rng>(perm: &mut [T], rng: &mut R) {
    let n = perm.len();
    if n < 2 {
        return;
    }
    let (start, end) = random_segment(n, rng);
    perm[start..end].reverse();
}

/// Shift mutation: exchange two equal-length blocks.
///
/// Draws four positions from `0..n` and sorts them into `c0 <= c1 <= c2 <= c3`.
/// The block `[c0, c0 + len)` is swapped with `[c2, c2 + len)` where
/// `len = min(c1 - c0, c3 - c2)`. Since `c0 + len <= c1 <= c2` the blocks
/// never overlap.
pub fn shift_mutation<T, R: Rng>(perm: &mut [T], rng: &mut R) {
    let n = perm.len();
    if n < 2 {
        return;
    }
    let mut cuts = [0usize; 4];
    for c in cuts.iter_mut() {
        *c = rng.random_range(0..n);
    }
    cuts.sort_unstable();
    let len = (cuts[1] - cuts[0]).min(cuts[3] - cuts[2]);
    swap_blocks(perm, cuts[0], cuts[2], len);
}

/// Swap `perm[a..a + len]` with `perm[b..b + len]`, requiring `a + len <= b`.
fn swap_blocks<T>(perm: &mut [T], a: usize, b: usize, len: usize) {
    debug_assert!(a + len <= b);
    let (head, tail) = perm.split_at_mut(b);
    head[a..a + len].swap_with_slice(&mut tail[..len]);
}

// ============================================================================
// Helpers
// ============================================================================

/// Pick two positions in `0..n` and return them as `(start, end)`, `start <= end`.
fn random_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use std::collections::HashSet;

    /// Check that a slice is a valid permutation of 0..n.
    fn is_valid_permutation(perm: &[usize], n: usize) -> bool {
        if perm.len() != n {
            return false;
        }
        let set: HashSet<usize> = perm.iter().copied().collect();
        set.len() == n && perm.iter().all(|&v| v < n)
    }

    // ---- Rank-swap crossover ----

    #[test]
    fn test_rank_swap_produces_valid_permutations() {
        let mut rng = create_rng(42);
        let p1: Vec<usize> = (0..8).collect();
        let p2: Vec<usize> = vec![3, 7, 5, 1, 6, 0, 2, 4];

        for _ in 0..100 {
            let (c1, c2) = random_rank_swap_crossover(&p1, &p2, &mut rng);
            assert!(is_valid_permutation(&c1, 8), "child1 not valid: {c1:?}");
            assert!(is_valid_permutation(&c2, 8), "child2 not valid: {c2:?}");
        }
    }

    #[test]
    fn test_rank_swap_keeps_heads() {
        let p1 = vec![0, 1, 2, 3, 4, 5];
        let p2 = vec![5, 4, 3, 2, 1, 0];
        for cut in 0..=6 {
            let (c1, c2) = rank_swap_crossover(&p1, &p2, cut);
            assert_eq!(&c1[..cut], &p1[..cut]);
            assert_eq!(&c2[..cut], &p2[..cut]);
        }
    }

    #[test]
    fn test_rank_swap_exchanges_relative_order() {
        // p1 tail [2, 3, 4] ascending, p2 tail [2, 1, 0] descending
        let (c1, c2) = rank_swap_crossover(&[0, 1, 2, 3, 4], &[4, 3, 2, 1, 0], 2);
        assert_eq!(c1, vec![0, 1, 4, 3, 2]);
        assert_eq!(c2, vec![4, 3, 0, 1, 2]);
    }

    #[test]
    fn test_rank_swap_full_cut_is_identity() {
        let p1 = vec![2, 0, 1];
        let p2 = vec![1, 2, 0];
        assert_eq!(rank_swap_crossover(&p1, &p2, 3), (p1.clone(), p2.clone()));
    }

    #[test]
    fn test_rank_swap_identical_parents() {
        let mut rng = create_rng(42);
        let p = vec![3, 1, 4, 0, 2];
        let (c1, c2) = random_rank_swap_crossover(&p, &p, &mut rng);
        assert_eq!(c1, p);
        assert_eq!(c2, p);
    }

    #[test]
    fn test_rank_swap_empty() {
        let mut rng = create_rng(42);
        let (c1, c2) = random_rank_swap_crossover::<usize, _>(&[], &[], &mut rng);
        assert!(c1.is_empty() && c2.is_empty());
    }

    #[test]
    #[should_panic(expected = "parents must have equal length")]
    fn test_rank_swap_length_mismatch() {
        rank_swap_crossover(&[0, 1, 2], &[0, 1], 1);
    }

    // ---- Reflect mutation ----

    #[test]
    fn test_reflect_preserves_permutation() {
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let mut perm: Vec<usize> = (0..10).collect();
            reflect_mutation(&mut perm, &mut rng);
            assert!(is_valid_permutation(&perm, 10));
        }
    }

    #[test]
    fn test_reflect_eventually_changes() {
        let mut rng = create_rng(42);
        let original: Vec<usize> = (0..5).collect();
        let changed = (0..100).any(|_| {
            let mut perm = original.clone();
            reflect_mutation(&mut perm, &mut rng);
            perm != original
        });
        assert!(changed, "reflect should change the permutation eventually");
    }

    #[test]
    fn test_reflect_single_element() {
        let mut rng = create_rng(42);
        let mut perm = vec![0];
        reflect_mutation(&mut perm, &mut rng);
        assert_eq!(perm, vec![0]);
    }

    // ---- Shift mutation ----

    #[test]
    fn test_shift_preserves_permutation() {
        let mut rng = create_rng(7);
        for _ in 0..200 {
            let mut perm: Vec<usize> = (0..12).collect();
            shift_mutation(&mut perm, &mut rng);
            assert!(is_valid_permutation(&perm, 12));
        }
    }

    #[test]
    fn test_swap_blocks() {
        let mut v = vec![0, 1, 2, 3, 4, 5, 6];
        swap_blocks(&mut v, 1, 4, 2);
        assert_eq!(v, vec![0, 4, 5, 3, 1, 2, 6]);
        swap_blocks(&mut v, 0, 0, 0);
        assert_eq!(v, vec![0, 4, 5, 3, 1, 2, 6]);
    }

    // ---- Random segment helper ----

    #[test]
    fn test_random_segment_bounds() {
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            let (start, end) = random_segment(10, &mut rng);
            assert!(start <= end);
            assert!(end < 10);
        }
    }

    // ---- Integration: crossover + mutation pipeline ----

    #[test]
    fn test_full_pipeline_preserves_validity() {
        let mut rng = create_rng(42);
        let p1: Vec<usize> = (0..20).collect();
        let mut p2: Vec<usize> = (0..20).collect();
        p2.reverse();

        for _ in 0..50 {
            let (mut c1, mut c2) = random_rank_swap_crossover(&p1, &p2, &mut rng);
            reflect_mutation(&mut c1, &mut rng);
            shift_mutation(&mut c2, &mut rng);

            assert!(is_valid_permutation(&c1, 20), "pipeline c1 invalid: {c1:?}");
            assert!(is_valid_permutation(&c2, 20), "pipeline c2 invalid: {c2:?}");
        }
    }
}
