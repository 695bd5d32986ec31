// -*- mode: rust; -*-
//
// This file is part of bos-coster.
// See LICENSE for licensing information.

//! Module for common traits.
//!
//! The reduction never touches field elements or curve coordinates
//! directly.  Everything it needs from the scalar field and from the
//! group is expressed by [`VartimeScalar`] and [`VartimePoint`], and
//! the iterator-based entry point is described by
//! [`VartimeMultiscalarMul`].

use core::borrow::Borrow;
use core::cmp::Ordering;
use core::ops::{Add, Neg};

pub use curve25519_dalek::traits::{Identity, IsIdentity};

// ------------------------------------------------------------------------
// Collaborator traits
// ------------------------------------------------------------------------

/// Scalar arithmetic needed by the Bos–Coster reduction.
///
/// None of these operations are required to be constant time, and the
/// reduction branches on their results.
pub trait VartimeScalar: Clone + Eq + Add<Output = Self> + Neg<Output = Self> {
    /// Returns the additive identity.
    fn zero() -> Self;

    /// Return true if this scalar is zero.
    fn is_zero(&self) -> bool;

    /// Compare the canonical representatives of two scalars as unsigned
    /// integers.  Variable time.
    fn cmp_vartime(&self, other: &Self) -> Ordering;

    /// Shift the canonical representative right by one bit, returning
    /// the quotient and the bit that was shifted out.
    fn halve_vartime(&self) -> (Self, bool);
}

/// Group arithmetic needed by the Bos–Coster reduction.
pub trait VartimePoint: Clone + Identity + IsIdentity {
    /// Compute `self + other`, possibly in variable time.
    fn add_vartime(&self, other: &Self) -> Self;

    /// Compute `2 * self`, possibly in variable time.
    ///
    /// On groups with small-order elements a doubling chain can reach the
    /// identity, so the identity is a valid input.
    fn double_vartime(&self) -> Self;
}

// ------------------------------------------------------------------------
// Multiscalar multiplication
// ------------------------------------------------------------------------

/// A trait for variable-time multiscalar multiplication without precomputation.
pub trait VartimeMultiscalarMul {
    /// The type of scalar being multiplied, e.g., `Scalar`.
    type Scalar;
    /// The type of point being multiplied, e.g., `RistrettoPoint`.
    type Point;

    /// Given an iterator of public scalars and an iterator of
    /// `Option`s of points, compute either `Some(Q)`, where
    /// $$
    /// Q = c\_1 P\_1 + \cdots + c\_n P\_n,
    /// $$
    /// if all points were `Some(P_i)`, or else return `None`.
    ///
    /// This function is particularly useful when verifying statements
    /// involving compressed points.  Accepting `Option<Point>` allows
    /// inlining point decompression into the multiscalar call,
    /// avoiding the need for temporary buffers.
    ///
    /// # Panics
    ///
    /// If the iterators have different lengths.
    fn optional_multiscalar_mul<I, J>(scalars: I, points: J) -> Option<Self::Point>
    where
        I: IntoIterator,
        I::Item: Borrow<Self::Scalar>,
        J: IntoIterator<Item = Option<Self::Point>>;

    /// Given an iterator of public scalars and an iterator of
    /// public points, compute
    /// $$
    /// Q = c\_1 P\_1 + \cdots + c\_n P\_n,
    /// $$
    /// using variable-time operations.
    ///
    /// It is an error to call this function with two iterators of
    /// different lengths.
    fn vartime_multiscalar_mul<I, J>(scalars: I, points: J) -> Self::Point
    where
        I: IntoIterator,
        I::Item: Borrow<Self::Scalar>,
        J: IntoIterator,
        J::Item: Borrow<Self::Point>,
        Self::Point: Clone,
    {
        Self::optional_multiscalar_mul(
            scalars,
            points.into_iter().map(|p| Some(p.borrow().clone())),
        )
        .expect("should return some point")
    }
}
