// -*- mode: rust; -*-
//
// This file is part of bos-coster.
// See LICENSE for licensing information.

//! A fixed-capacity max-heap of weighted terms.
//!
//! Terms are `(scalar, point)` pairs and are ordered by the magnitude of
//! the scalar's canonical representative.  Storage is an inline array of
//! `MAX_N` slots, so a heap never allocates; slots past `len` hold
//! `(0, identity)` placeholders and are never read as live terms.
//!
//! Children of slot `i` live at `2i + 1` and `2i + 2`.

use core::cmp::Ordering;
use core::mem;

use crate::traits::{VartimePoint, VartimeScalar};

/// The largest number of terms a single reduction can hold.
pub const MAX_N: usize = 32;

/// A pending contribution `scalar * point` to the final sum.
#[derive(Clone, Debug)]
pub(crate) struct Term<S, P> {
    pub(crate) scalar: S,
    pub(crate) point: P,
}

impl<S: VartimeScalar, P: VartimePoint> Term<S, P> {
    pub(crate) fn new(scalar: S, point: P) -> Self {
        Term { scalar, point }
    }

    fn vacant() -> Self {
        Term {
            scalar: S::zero(),
            point: P::identity(),
        }
    }
}

pub(crate) struct TermHeap<S, P> {
    terms: [Term<S, P>; MAX_N],
    len: usize,
}

impl<S: VartimeScalar, P: VartimePoint> TermHeap<S, P> {
    pub(crate) fn new() -> Self {
        TermHeap {
            terms: core::array::from_fn(|_| Term::vacant()),
            len: 0,
        }
    }

    /// Load an unordered batch of terms and restore the heap property
    /// bottom-up, which is cheaper than pushing them one at a time.
    ///
    /// # Panics
    ///
    /// If the batch holds more than `MAX_N` terms.
    pub(crate) fn from_terms<I>(terms: I) -> Self
    where
        I: IntoIterator<Item = Term<S, P>>,
    {
        let mut heap = TermHeap::new();
        for term in terms {
            assert!(heap.len < MAX_N, "at most {} terms fit in a heap", MAX_N);
            heap.terms[heap.len] = term;
            heap.len += 1;
        }
        for i in (0..heap.len / 2).rev() {
            heap.sift_down(i);
        }
        heap
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn is_full(&self) -> bool {
        self.len == MAX_N
    }

    /// The live terms, in heap order rather than sorted order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Term<S, P>> {
        self.terms[..self.len].iter()
    }

    pub(crate) fn peek_max(&self) -> Option<&Term<S, P>> {
        self.terms[..self.len].first()
    }

    /// # Panics
    ///
    /// If the heap is full.
    pub(crate) fn push(&mut self, term: Term<S, P>) {
        assert!(!self.is_full(), "at most {} terms fit in a heap", MAX_N);
        self.terms[self.len] = term;
        self.len += 1;
        self.sift_up(self.len - 1);
    }

    /// Remove the term with the largest scalar.
    ///
    /// # Panics
    ///
    /// If the heap is empty.
    pub(crate) fn pop_max(&mut self) -> Term<S, P> {
        assert!(!self.is_empty(), "cannot pop from an empty heap");
        self.len -= 1;
        self.terms.swap(0, self.len);
        let max = mem::replace(&mut self.terms[self.len], Term::vacant());
        self.sift_down(0);
        max
    }

    fn less(&self, i: usize, j: usize) -> bool {
        self.terms[i].scalar.cmp_vartime(&self.terms[j].scalar) == Ordering::Less
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.less(parent, i) {
                break;
            }
            self.terms.swap(parent, i);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        loop {
            let left = 2 * i + 1;
            if left >= self.len {
                break;
            }
            let right = left + 1;

            let mut largest = i;
            if self.less(largest, left) {
                largest = left;
            }
            if right < self.len && self.less(largest, right) {
                largest = right;
            }
            if largest == i {
                break;
            }
            self.terms.swap(i, largest);
            i = largest;
        }
    }

    /// Check that no parent is smaller than either of its children.
    #[cfg(test)]
    pub(crate) fn is_heap(&self) -> bool {
        (1..self.len).all(|i| !self.less((i - 1) / 2, i))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mocks::{MockPoint, MockScalar};

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    type Heap = TermHeap<MockScalar, MockPoint>;

    fn term(scalar: u64, point: u64) -> Term<MockScalar, MockPoint> {
        Term::new(MockScalar::new(scalar), MockPoint::new(point))
    }

    #[test]
    fn pop_returns_terms_in_descending_order() {
        let mut heap = Heap::new();
        for (i, s) in [5u64, 1, 9, 3, 7, 2, 8].iter().enumerate() {
            heap.push(term(*s, i as u64));
            assert!(heap.is_heap());
        }
        assert_eq!(heap.len(), 7);
        assert_eq!(heap.peek_max().map(|t| t.scalar), Some(MockScalar::new(9)));

        let mut popped = [0u64; 7];
        for slot in popped.iter_mut() {
            *slot = heap.pop_max().scalar.0;
            assert!(heap.is_heap());
        }
        assert_eq!(popped, [9, 8, 7, 5, 3, 2, 1]);
        assert!(heap.is_empty());
        assert!(heap.peek_max().is_none());
    }

    #[test]
    fn terms_keep_their_points() {
        let mut heap = Heap::new();
        heap.push(term(10, 100));
        heap.push(term(30, 300));
        heap.push(term(20, 200));

        let top = heap.pop_max();
        assert_eq!((top.scalar.0, top.point.0), (30, 300));
        let next = heap.pop_max();
        assert_eq!((next.scalar.0, next.point.0), (20, 200));
        let last = heap.pop_max();
        assert_eq!((last.scalar.0, last.point.0), (10, 100));
    }

    #[test]
    fn from_terms_builds_a_heap() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for n in 0..=MAX_N {
            let heap = Heap::from_terms((0..n).map(|i| term(rng.gen_range(0..50), i as u64)));
            assert_eq!(heap.len(), n);
            assert!(heap.is_heap());
        }
    }

    #[test]
    fn random_push_pop_matches_a_sorted_model() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let mut heap = Heap::new();
            // Multiset of live scalars, kept sorted ascending.
            let mut model = [0u64; MAX_N];
            let mut model_len = 0;

            for _ in 0..100 {
                let push = model_len == 0 || (model_len < MAX_N && rng.gen_bool(0.6));
                if push {
                    let s = rng.gen_range(0..1000u64);
                    heap.push(term(s, s));
                    let at = model[..model_len].partition_point(|&m| m <= s);
                    model.copy_within(at..model_len, at + 1);
                    model[at] = s;
                    model_len += 1;
                } else {
                    let top = heap.pop_max();
                    model_len -= 1;
                    assert_eq!(top.scalar.0, model[model_len]);
                    assert_eq!(top.point.0, top.scalar.0);
                }
                assert!(heap.is_heap());
                assert_eq!(heap.len(), model_len);

                let mut live = [0u64; MAX_N];
                for (slot, t) in live.iter_mut().zip(heap.iter()) {
                    *slot = t.scalar.0;
                }
                live[..model_len].sort_unstable();
                assert_eq!(live[..model_len], model[..model_len]);
            }
        }
    }

    #[test]
    fn ties_are_all_returned() {
        let mut heap = Heap::new();
        for i in 0..6 {
            heap.push(term(4, i));
        }
        let mut seen = 0u64;
        while !heap.is_empty() {
            let t = heap.pop_max();
            assert_eq!(t.scalar.0, 4);
            seen |= 1 << t.point.0;
        }
        assert_eq!(seen, 0b11_1111);
    }

    #[test]
    fn full_heap_accepts_exactly_max_n() {
        let mut heap = Heap::new();
        for i in 0..MAX_N as u64 {
            heap.push(term(i, i));
        }
        assert!(heap.is_full());
        assert_eq!(heap.pop_max().scalar.0, MAX_N as u64 - 1);
    }

    #[test]
    #[should_panic]
    fn push_past_capacity_panics() {
        let mut heap = Heap::new();
        for i in 0..=MAX_N as u64 {
            heap.push(term(i, i));
        }
    }

    #[test]
    #[should_panic]
    fn from_terms_past_capacity_panics() {
        let _ = Heap::from_terms((0..=MAX_N as u64).map(|i| term(i, i)));
    }

    #[test]
    #[should_panic]
    fn pop_from_empty_panics() {
        let mut heap = Heap::new();
        heap.pop_max();
    }
}
