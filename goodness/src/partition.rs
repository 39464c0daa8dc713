//! Lazy enumeration of all 2-way partitions of a sequence.

use serde::Serialize;
use std::convert::TryFrom;
use std::iter::FusedIterator;

/// Split of a sequence into two disjoint sub-sequences.
///
/// Every element of the original sequence is in exactly one of the two sides, and each side
/// preserves the original relative order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Partition<T> {
    /// Elements assigned to the sequential-scan path.
    pub sequential: Vec<T>,
    /// Elements assigned to the index-scan path.
    pub index: Vec<T>,
}

impl<T> Partition<T> {
    /// Returns the sizes of the sequential and index sides, in this order.
    #[must_use]
    pub fn sizes(&self) -> (usize, usize) {
        (self.sequential.len(), self.index.len())
    }

    /// Total number of elements in both sides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequential.len() + self.index.len()
    }

    /// Checks if both sides are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequential.is_empty() && self.index.is_empty()
    }
}

/// Combinations of `k` positions out of `0..n`, in lexicographic order.
#[derive(Debug, Clone)]
struct Positions {
    n: usize,
    chosen: Vec<usize>,
    started: bool,
    exhausted: bool,
}

impl Positions {
    fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            chosen: (0..k).collect(),
            started: false,
            exhausted: k > n,
        }
    }

    fn advance(&mut self) -> Option<&[usize]> {
        if self.exhausted {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(&self.chosen);
        }
        let k = self.chosen.len();
        let n = self.n;
        let chosen = &self.chosen;
        // Rightmost position that can still move right.
        match (0..k).rev().find(|&i| chosen[i] < n - k + i) {
            Some(pivot) => {
                self.chosen[pivot] += 1;
                for i in pivot + 1..k {
                    self.chosen[i] = self.chosen[i - 1] + 1;
                }
                Some(&self.chosen)
            }
            None => {
                self.exhausted = true;
                None
            }
        }
    }
}

/// Splits `items` so that exactly the elements at `chosen` positions end up on the sequential
/// side. `chosen` must be strictly increasing.
fn split<T: Clone>(items: &[T], chosen: &[usize]) -> Partition<T> {
    let mut sequential = Vec::with_capacity(chosen.len());
    let mut index = Vec::with_capacity(items.len() - chosen.len());
    let mut chosen = chosen.iter().copied().peekable();
    for (position, item) in items.iter().enumerate() {
        if chosen.peek() == Some(&position) {
            chosen.next();
            sequential.push(item.clone());
        } else {
            index.push(item.clone());
        }
    }
    Partition { sequential, index }
}

/// All partitions whose sequential side has a fixed size.
///
/// See [`partitions_of_size`](fn.partitions_of_size.html).
#[derive(Debug, Clone)]
pub struct SizedPartitions<'a, T> {
    items: &'a [T],
    positions: Positions,
}

impl<'a, T> SizedPartitions<'a, T> {
    /// Size of the sequential side of every produced partition.
    #[must_use]
    pub fn size(&self) -> usize {
        self.positions.chosen.len()
    }
}

impl<'a, T: Clone> Iterator for SizedPartitions<'a, T> {
    type Item = Partition<T>;
    fn next(&mut self) -> Option<Self::Item> {
        let items = self.items;
        self.positions
            .advance()
            .map(|chosen| split(items, chosen))
    }
}

impl<'a, T: Clone> FusedIterator for SizedPartitions<'a, T> {}

/// Returns all `C(n, size)` partitions of `items` with exactly `size` elements on the
/// sequential side, ordered lexicographically by the chosen positions.
///
/// If `size > items.len()`, the iterator is empty.
pub fn partitions_of_size<T: Clone>(items: &[T], size: usize) -> SizedPartitions<'_, T> {
    SizedPartitions {
        items,
        positions: Positions::new(items.len(), size),
    }
}

/// Lazy sequence of all 2-way partitions of a slice.
///
/// See [`two_subset_partitions`](fn.two_subset_partitions.html).
#[derive(Debug, Clone)]
pub struct TwoSubsetPartitions<'a, T> {
    items: &'a [T],
    current: SizedPartitions<'a, T>,
}

impl<'a, T: Clone> Iterator for TwoSubsetPartitions<'a, T> {
    type Item = Partition<T>;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(partition) = self.current.next() {
                return Some(partition);
            }
            let size = self.current.size();
            if size >= self.items.len() {
                return None;
            }
            self.current = partitions_of_size(self.items, size + 1);
        }
    }
}

impl<'a, T: Clone> FusedIterator for TwoSubsetPartitions<'a, T> {}

/// Lazily generates all `2^n` partitions of `items` into two sub-sequences.
///
/// The size of the sequential side goes from `0` to `n`, and for each size all position
/// combinations are produced in lexicographic order. Elements are selected by position, so
/// equal values occurring more than once yield distinct partitions.
///
/// Nothing beyond the current partition is materialized, so the sequence can be abandoned at any
/// point.
///
/// ```
/// # use goodness::{two_subset_partitions, Partition};
/// let partitions: Vec<_> = two_subset_partitions(&['a', 'b']).collect();
/// assert_eq!(partitions.len(), 4);
/// assert_eq!(partitions[1], Partition { sequential: vec!['a'], index: vec!['b'] });
/// ```
pub fn two_subset_partitions<T: Clone>(items: &[T]) -> TwoSubsetPartitions<'_, T> {
    TwoSubsetPartitions {
        items,
        current: partitions_of_size(items, 0),
    }
}

/// Number of 2-way partitions of a sequence of length `n`, or `None` if it does not fit in
/// `usize`.
#[must_use]
pub fn partition_count(n: usize) -> Option<usize> {
    let shift = u32::try_from(n).ok()?;
    1_usize.checked_shl(shift)
}
