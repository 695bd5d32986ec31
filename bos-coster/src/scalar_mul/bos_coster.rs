// -*- mode: rust; -*-
//
// This file is part of bos-coster.
// See LICENSE for licensing information.

//! Implementation of the Bos–Coster multiscalar multiplication.
//!
//! # Warning
//!
//! Everything in this module runs in variable time.  The sequence of
//! heap operations, comparisons, and point additions depends on the
//! numeric values of the scalars, so none of it may be used with secret
//! scalars.

use core::borrow::Borrow;
use core::marker::PhantomData;

use log::{debug, trace};

use crate::errors::MultiscalarError;
use crate::heap::{Term, TermHeap, MAX_N};
use crate::traits::{VartimeMultiscalarMul, VartimePoint, VartimeScalar};

/// Compute \\( \sum\_i c\_i P\_i \\) for at most `MAX_N` terms using the
/// Bos–Coster reduction.
///
/// Variable time: never call this with secret scalars.
///
/// # Panics
///
/// If `scalars` and `points` have different lengths, or if there are more
/// than `MAX_N` of them.
pub fn multiscalar_mul<S, P>(scalars: &[S], points: &[P]) -> P
where
    S: VartimeScalar,
    P: VartimePoint,
{
    assert_eq!(
        scalars.len(),
        points.len(),
        "scalars and points must have the same length"
    );
    assert!(
        scalars.len() <= MAX_N,
        "at most {} terms are supported, got {}",
        MAX_N,
        scalars.len()
    );

    Reduction::from_pairs(scalars.iter().cloned().zip(points.iter().cloned())).finish()
}

/// Like [`multiscalar_mul`], but reports a bad input size as an error
/// instead of panicking.
pub fn try_multiscalar_mul<S, P>(scalars: &[S], points: &[P]) -> Result<P, MultiscalarError>
where
    S: VartimeScalar,
    P: VartimePoint,
{
    if scalars.len() != points.len() {
        return Err(MultiscalarError::LengthMismatch {
            scalars: scalars.len(),
            points: points.len(),
        });
    }
    if scalars.len() > MAX_N {
        return Err(MultiscalarError::TooManyTerms {
            count: scalars.len(),
            max: MAX_N,
        });
    }
    Ok(multiscalar_mul(scalars, points))
}

/// An in-progress Bos–Coster reduction over at most `MAX_N` terms.
///
/// The reduction holds a heap of terms \\( (c\_i, P\_i) \\) with non-zero
/// scalars.  Each [`step`](Reduction::step) pops the two terms with the
/// largest scalars, \\( (n, X) \\) and \\( (m, Y) \\) with \\( n \geq m \\),
/// and replaces them using
/// $$
/// nX + mY = (n - m)X + m(X + Y),
/// $$
/// dropping the first term when \\( n = m \\).  Since this is an identity,
/// \\( \sum\_i c\_i P\_i \\) over the held terms never changes.  Each step
/// either removes a term or replaces the largest scalar with a smaller
/// one, and for random scalars the largest scalar roughly halves each
/// time, so a handful of steps per term leaves a single term whose scalar
/// is almost always 1.
///
/// That bound only holds when the scalars are of similar size.  Folding a
/// large scalar \( n \) against a small one \( m \) subtracts \( m \)
/// per step, so the number of steps grows like \( n / m \): a random
/// 253-bit scalar next to `1` will never finish in practice.  Callers that
/// mix full-size scalars with small ones should use a different algorithm.
///
/// [`finish`](Reduction::finish) runs the remaining steps and multiplies
/// out the last term with a short double-and-add.
pub struct Reduction<S, P> {
    heap: TermHeap<S, P>,
    loaded: usize,
    steps: usize,
}

impl<S, P> Reduction<S, P>
where
    S: VartimeScalar,
    P: VartimePoint,
{
    /// Start an empty reduction.
    pub fn new() -> Self {
        Reduction {
            heap: TermHeap::new(),
            loaded: 0,
            steps: 0,
        }
    }

    /// Start a reduction over a batch of `(scalar, point)` pairs.
    ///
    /// Pairs with a zero scalar contribute nothing and are dropped.
    ///
    /// # Panics
    ///
    /// If there are more than `MAX_N` pairs, including the dropped ones.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, P)>,
    {
        let mut count = 0;
        let terms = pairs
            .into_iter()
            .inspect(|_| {
                count += 1;
                assert!(count <= MAX_N, "at most {} terms are supported", MAX_N);
            })
            .filter(|(scalar, _)| !scalar.is_zero())
            .map(|(scalar, point)| Term::new(scalar, point));
        let heap = TermHeap::from_terms(terms);

        Reduction {
            loaded: heap.len(),
            heap,
            steps: 0,
        }
    }

    /// Add the term `scalar * point`.  A zero scalar is ignored.
    ///
    /// # Panics
    ///
    /// If the reduction already holds `MAX_N` terms.
    pub fn push(&mut self, scalar: S, point: P) {
        if scalar.is_zero() {
            return;
        }
        self.heap.push(Term::new(scalar, point));
        self.loaded += 1;
    }

    /// The number of terms currently held.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Return true if no terms are held.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Return true if no more terms can be pushed.
    pub fn is_full(&self) -> bool {
        self.heap.is_full()
    }

    /// Return true once at most one term is left.
    pub fn is_reduced(&self) -> bool {
        self.heap.len() <= 1
    }

    /// The number of steps taken so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The largest scalar currently held.
    pub fn max_scalar(&self) -> Option<&S> {
        self.heap.peek_max().map(|term| &term.scalar)
    }

    /// The terms currently held, in no particular order.
    pub fn terms(&self) -> impl Iterator<Item = (&S, &P)> {
        self.heap.iter().map(|term| (&term.scalar, &term.point))
    }

    /// Combine the two largest terms.  Returns `false`, without doing
    /// anything, if fewer than two terms are held.
    pub fn step(&mut self) -> bool {
        if self.heap.len() < 2 {
            return false;
        }

        let x = self.heap.pop_max();
        let y = self.heap.pop_max();

        // Y -> X + Y
        let combined = x.point.add_vartime(&y.point);
        if x.scalar != y.scalar {
            // n -> n - m, which is non-zero and smaller than n.
            let difference = x.scalar + (-y.scalar.clone());
            self.heap.push(Term::new(difference, x.point));
        }
        self.heap.push(Term::new(y.scalar, combined));

        self.steps += 1;
        true
    }

    /// Run the reduction to completion and return the weighted sum of
    /// all terms pushed.
    pub fn finish(mut self) -> P {
        while self.step() {}

        trace!(
            "bos-coster: reduced {} terms in {} steps",
            self.loaded,
            self.steps
        );

        if self.heap.is_empty() {
            return P::identity();
        }
        let Term { scalar, point } = self.heap.pop_max();
        debug_assert!(!scalar.is_zero());

        double_and_add(scalar, point)
    }
}

impl<S, P> Default for Reduction<S, P>
where
    S: VartimeScalar,
    P: VartimePoint,
{
    fn default() -> Self {
        Reduction::new()
    }
}

/// Right-to-left binary scalar multiplication.
///
/// Only used on the residual term of a reduction, whose scalar is tiny,
/// so there is no point in windowing.
fn double_and_add<S, P>(mut scalar: S, mut point: P) -> P
where
    S: VartimeScalar,
    P: VartimePoint,
{
    let mut result = P::identity();
    if point.is_identity() {
        return result;
    }

    let mut bits = 0;
    while !scalar.is_zero() {
        let (rest, bit) = scalar.halve_vartime();
        if bit {
            result = result.add_vartime(&point);
        }
        scalar = rest;
        if !scalar.is_zero() {
            point = point.double_vartime();
        }
        bits += 1;
    }
    trace!("bos-coster: residual scalar had {} bits", bits);

    result
}

/// Bos–Coster multiscalar multiplication over scalars `S` and points `P`.
///
/// The iterator interface accepts any number of terms.  Terms are fed to
/// the reduction `MAX_N` non-zero terms at a time, and the partial sums of
/// the batches are added together.
pub struct BosCoster<S, P>(PhantomData<(S, P)>);

impl<S, P> VartimeMultiscalarMul for BosCoster<S, P>
where
    S: VartimeScalar,
    P: VartimePoint,
{
    type Scalar = S;
    type Point = P;

    fn optional_multiscalar_mul<I, J>(scalars: I, points: J) -> Option<P>
    where
        I: IntoIterator,
        I::Item: Borrow<S>,
        J: IntoIterator<Item = Option<P>>,
    {
        let mut scalars = scalars.into_iter();
        let mut points = points.into_iter();
        let mut next_pair = move || match (scalars.next(), points.next()) {
            (Some(scalar), Some(point)) => Some((scalar.borrow().clone(), point)),
            (None, None) => None,
            _ => panic!("scalars and points must have the same length"),
        };

        let mut result = P::identity();
        let mut batches = 0;
        let mut exhausted = false;
        while !exhausted {
            let mut reduction = Reduction::new();
            while !reduction.is_full() {
                match next_pair() {
                    Some((scalar, point)) => reduction.push(scalar, point?),
                    None => {
                        exhausted = true;
                        break;
                    }
                }
            }
            if !reduction.is_empty() {
                result = result.add_vartime(&reduction.finish());
                batches += 1;
            }
        }
        debug!("bos-coster: summed {} batch(es)", batches);

        Some(result)
    }
}
