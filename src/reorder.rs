//! Sequence reordering primitives.
//!
//! Pure functions over slices: no I/O, no randomness.
//!
//! - [`argsort`] / [`argsort_by`]: indices that read a slice in ascending order
//! - [`rank`] / [`rank_by`]: destination index of each element under an
//!   ascending sort (the inverse of `argsort`)
//! - [`order_by`]: scatter, moves `seq[i]` to position `order[i]`
//! - [`order_to`]: gather, sets `seq[i]` to the element at `order[i]`
//! - [`swap_order_by_rank`] / [`swap_order_by_rank_by`]: permutes each of two
//!   slices by the *other* slice's rank order
//!
//! None of the sorts are stable. Ties may come out in any order.
//!
//! # Permutation-preserving recombination
//!
//! Copying a slice of one permutation into another produces duplicates.
//! Exchanging the *relative order* of two tails instead keeps both tails
//! drawn from their original element sets:
//!
//! ```
//! use u_island::reorder::swap_order_by_rank;
//!
//! let mut a = vec!['u', 'g', 'a', 'h', 'p', 'b'];
//! let mut b = vec![1, 6, 2, 7, 3, 8];
//! swap_order_by_rank(&mut a[2..], &mut b[2..]);
//! assert_eq!(a, vec!['u', 'g', 'a', 'h', 'b', 'p']);
//! assert_eq!(b, vec![1, 6, 2, 7, 8, 3]);
//! ```

use std::cmp::Ordering;

/// Returns the indices that read `seq` in ascending order under `compare`.
///
/// # Complexity
/// O(n log n)
pub fn argsort_by<T, F>(seq: &[T], mut compare: F) -> Vec<usize>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut indices: Vec<usize> = (0..seq.len()).collect();
    indices.sort_unstable_by(|&a, &b| compare(&seq[a], &seq[b]));
    indices
}

/// [`argsort_by`] under the natural order.
pub fn argsort<T: Ord>(seq: &[T]) -> Vec<usize> {
    argsort_by(seq, T::cmp)
}

/// Returns, for each position of `seq`, its index after an ascending sort.
///
/// The result is always a permutation of `0..seq.len()`.
pub fn rank_by<T, F>(seq: &[T], compare: F) -> Vec<usize>
where
    F: FnMut(&T, &T) -> Ordering,
{
    invert(&argsort_by(seq, compare))
}

/// [`rank_by`] under the natural order.
///
/// ```
/// use u_island::reorder::rank;
///
/// assert_eq!(rank(&['a', 'h', 'p', 'b']), vec![0, 2, 3, 1]);
/// ```
pub fn rank<T: Ord>(seq: &[T]) -> Vec<usize> {
    rank_by(seq, T::cmp)
}

/// Scatter: moves the element at position `i` to position `order[i]`.
///
/// When `order` comes from [`rank_by`], `seq` ends up sorted. Works in place
/// by following the permutation's cycles, so `T` need not be `Clone`.
///
/// # Panics
/// Panics if `order` is not a permutation of `0..seq.len()`.
pub fn order_by<T>(seq: &mut [T], order: &[usize]) {
    assert_permutation(order, seq.len());
    let mut pending = order.to_vec();
    for i in 0..seq.len() {
        while pending[i] != i {
            let j = pending[i];
            seq.swap(i, j);
            pending.swap(i, j);
        }
    }
}

/// Gather: sets position `i` to the element currently at `order[i]`.
///
/// # Panics
/// Panics if `order` is not a permutation of `0..seq.len()`.
pub fn order_to<T>(seq: &mut [T], order: &[usize]) {
    assert_permutation(order, seq.len());
    order_by(seq, &invert(order));
}

/// Sorts both slices, then permutes each by the other's rank order.
///
/// Both slices keep exactly their own elements; only their arrangement
/// changes. `compare_1` orders `seq_1` and `compare_2` orders `seq_2`.
///
/// # Panics
/// Panics if the slices have different lengths.
pub fn swap_order_by_rank_by<A, B, F1, F2>(
    seq_1: &mut [A],
    seq_2: &mut [B],
    compare_1: F1,
    compare_2: F2,
) where
    F1: FnMut(&A, &A) -> Ordering,
    F2: FnMut(&B, &B) -> Ordering,
{
    assert_eq!(
        seq_1.len(),
        seq_2.len(),
        "rank swap requires slices of equal length"
    );

    let rank_1 = rank_by(seq_1, compare_1);
    order_by(seq_1, &rank_1);
    let rank_2 = rank_by(seq_2, compare_2);
    order_by(seq_2, &rank_2);

    order_to(seq_1, &rank_2);
    order_to(seq_2, &rank_1);
}

/// [`swap_order_by_rank_by`] under the natural order of both slices.
pub fn swap_order_by_rank<A: Ord, B: Ord>(seq_1: &mut [A], seq_2: &mut [B]) {
    swap_order_by_rank_by(seq_1, seq_2, A::cmp, B::cmp);
}

/// Returns `true` if `order` is a permutation of `0..order.len()`.
pub fn is_permutation(order: &[usize]) -> bool {
    let mut seen = vec![false; order.len()];
    for &i in order {
        if i >= order.len() || seen[i] {
            return false;
        }
        seen[i] = true;
    }
    true
}

fn invert(order: &[usize]) -> Vec<usize> {
    let mut inverse = vec![0; order.len()];
    for (i, &o) in order.iter().enumerate() {
        inverse[o] = i;
    }
    inverse
}

fn assert_permutation(order: &[usize], n: usize) {
    assert_eq!(order.len(), n, "order must have one index per element");
    assert!(is_permutation(order), "order must be a permutation of 0..{n}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ---- argsort ----

    #[test]
    fn test_argsort_empty() {
        let v: Vec<i32> = vec![];
        assert!(argsort(&v).is_empty());
    }

    #[test]
    fn test_argsort_single() {
        assert_eq!(argsort(&[2]), vec![0]);
    }

    #[test]
    fn test_argsort_chars() {
        assert_eq!(argsort(&['a', 'h', 'p', 'b']), vec![0, 3, 1, 2]);
    }

    #[test]
    fn test_argsort_descending() {
        let v = ['a', 'h', 'p', 'b', 'e', 'c', 'i'];
        let idx = argsort_by(&v, |a, b| b.cmp(a));
        assert_eq!(idx, vec![2, 6, 1, 4, 5, 3, 0]);
    }

    #[test]
    fn test_argsort_negative_ints() {
        assert_eq!(argsort(&[1, 5, 4, 3, 2, -2]), vec![5, 0, 4, 3, 2, 1]);
    }

    #[test]
    fn test_argsort_floats_total_order() {
        let v = [0.5, -1.0, 3.25, 0.0];
        assert_eq!(argsort_by(&v, f64::total_cmp), vec![1, 3, 0, 2]);
    }

    // ---- rank ----

    #[test]
    fn test_rank_empty_and_single() {
        let v: Vec<u8> = vec![];
        assert!(rank(&v).is_empty());
        assert_eq!(rank(&[2]), vec![0]);
    }

    #[test]
    fn test_rank_chars() {
        assert_eq!(rank(&['a', 'h', 'p', 'b']), vec![0, 2, 3, 1]);
        assert_eq!(
            rank(&['a', 'h', 'p', 'b', 'e', 'c', 'i']),
            vec![0, 4, 6, 1, 3, 2, 5]
        );
    }

    #[test]
    fn test_rank_ints() {
        assert_eq!(rank(&[1, 2, 3, 4, 5, 6]), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(rank(&[1, 2, 4, 3, 5, 6]), vec![0, 1, 3, 2, 4, 5]);
    }

    // ---- order_by / order_to ----

    #[test]
    fn test_order_to_gathers() {
        let mut v = vec!['a', 'g', 'e', 'b'];
        order_to(&mut v, &[2, 1, 3, 0]);
        assert_eq!(v, vec!['e', 'g', 'b', 'a']);
    }

    #[test]
    fn test_order_by_scatters() {
        let mut v = vec!['a', 'g', 'e', 'b'];
        order_by(&mut v, &[2, 1, 3, 0]);
        assert_eq!(v, vec!['b', 'g', 'a', 'e']);
    }

    #[test]
    fn test_order_by_rank_sorts() {
        let mut v = vec!['a', 'h', 'p', 'b'];
        let r = rank(&v);
        order_by(&mut v, &r);
        assert_eq!(v, vec!['a', 'b', 'h', 'p']);
    }

    #[test]
    fn test_order_without_clone() {
        struct Opaque(u32);
        let mut v = vec![Opaque(10), Opaque(20), Opaque(30)];
        order_by(&mut v, &[2, 0, 1]);
        let got: Vec<u32> = v.iter().map(|o| o.0).collect();
        assert_eq!(got, vec![20, 30, 10]);
    }

    #[test]
    #[should_panic(expected = "must be a permutation")]
    fn test_order_by_rejects_duplicates() {
        let mut v = vec![1, 2];
        order_by(&mut v, &[1, 1]);
    }

    #[test]
    #[should_panic(expected = "one index per element")]
    fn test_order_to_rejects_short_order() {
        let mut v = vec![1, 2, 3];
        order_to(&mut v, &[0, 1]);
    }

    // ---- swap_order_by_rank ----

    #[test]
    fn test_swap_order_by_rank_four_elements() {
        let mut v1 = vec!['u', 'g', 'a', 'h', 'p', 'b'];
        let mut v2 = vec![1, 6, 2, 7, 3, 8];
        swap_order_by_rank(&mut v1[2..], &mut v2[2..]);
        assert_eq!(v1, vec!['u', 'g', 'a', 'h', 'b', 'p']);
        assert_eq!(v2, vec![1, 6, 2, 7, 8, 3]);
    }

    #[test]
    fn test_swap_order_by_rank_six_elements() {
        let mut v1 = vec!['z', 'u', 'g', 'a', 'h', 'p', 'b'];
        let mut v2 = vec![0, 1, 6, 2, 7, 3, 8];
        swap_order_by_rank(&mut v1[1..], &mut v2[1..]);
        assert_eq!(v1, vec!['z', 'a', 'h', 'b', 'p', 'g', 'u']);
        assert_eq!(v2, vec![0, 8, 3, 1, 6, 7, 2]);
    }

    #[test]
    fn test_swap_order_by_rank_with_comparators() {
        let mut v1 = vec![0.3, 0.1, 0.2];
        let mut v2 = vec![30_u8, 10, 20];
        swap_order_by_rank_by(&mut v1, &mut v2, f64::total_cmp, |a, b| b.cmp(a));
        // v2 ranks under descending order are [0, 2, 1]
        assert_eq!(v1, vec![0.1, 0.3, 0.2]);
        // v1 ranks are [2, 0, 1]; v2 sorted descending is [30, 20, 10]
        assert_eq!(v2, vec![10, 30, 20]);
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn test_swap_order_by_rank_length_mismatch() {
        let mut a = vec![1, 2, 3];
        let mut b = vec![1, 2];
        swap_order_by_rank(&mut a, &mut b);
    }

    fn sorted(mut v: Vec<u32>) -> Vec<u32> {
        v.sort_unstable();
        v
    }

    proptest! {
        #[test]
        fn prop_gather_by_argsort_is_sorted(v in proptest::collection::vec(any::<i32>(), 0..64)) {
            let mut w = v.clone();
            let idx = argsort(&v);
            order_to(&mut w, &idx);
            prop_assert!(w.windows(2).all(|p| p[0] <= p[1]));
        }

        #[test]
        fn prop_rank_is_permutation(v in proptest::collection::vec(any::<i16>(), 0..64)) {
            prop_assert!(is_permutation(&rank(&v)));
        }

        #[test]
        fn prop_rank_inverts_argsort(v in proptest::collection::vec(any::<u8>(), 0..64)) {
            let idx = argsort(&v);
            let r = invert(&idx);
            for (k, &i) in idx.iter().enumerate() {
                prop_assert_eq!(r[i], k);
            }
        }

        #[test]
        fn prop_scatter_undoes_gather(
            perm in Just((0..40usize).collect::<Vec<_>>()).prop_shuffle()
        ) {
            let original: Vec<usize> = (100..140).collect();
            let mut v = original.clone();
            order_to(&mut v, &perm);
            order_by(&mut v, &perm);
            prop_assert_eq!(v, original);
        }

        #[test]
        fn prop_swap_keeps_element_sets(
            a in Just((0..30u32).collect::<Vec<_>>()).prop_shuffle(),
            b in Just((0..30u32).collect::<Vec<_>>()).prop_shuffle(),
            cut in 0usize..30
        ) {
            let (mut x, mut y) = (a.clone(), b.clone());
            swap_order_by_rank(&mut x[cut..], &mut y[cut..]);
            prop_assert_eq!(&x[..cut], &a[..cut]);
            prop_assert_eq!(&y[..cut], &b[..cut]);
            prop_assert_eq!(sorted(x[cut..].to_vec()), sorted(a[cut..].to_vec()));
            prop_assert_eq!(sorted(y[cut..].to_vec()), sorted(b[cut..].to_vec()));
        }
    }
}
