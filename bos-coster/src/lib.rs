// -*- mode: rust; -*-
//
// This file is part of bos-coster.
// See LICENSE for licensing information.

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

//! Variable-time multiscalar multiplication with the Bos–Coster
//! algorithm.
//!
//! Given pairs \\( (c\_i, P\_i) \\), this crate computes
//! $$
//! Q = c\_1 P\_1 + \cdots + c\_n P\_n
//! $$
//! by repeatedly folding the two terms with the largest scalars into
//! each other until a single term with a tiny scalar is left.  The terms
//! live in a fixed-capacity heap of [`MAX_N`] entries, so a reduction
//! never allocates.
//!
//! ```
//! use bos_coster::multiscalar_mul;
//! use curve25519_dalek::constants::RISTRETTO_BASEPOINT_POINT as B;
//! use curve25519_dalek::scalar::Scalar;
//!
//! let a = Scalar::from(3u64);
//! let b = Scalar::from(5u64);
//! let A = Scalar::from(11u64) * B;
//!
//! let Q = multiscalar_mul(&[a, b], &[A, B]);
//! assert_eq!(Q, Scalar::from(38u64) * B);
//! ```
//!
//! # Warning
//!
//! Everything here is **variable time**: running time and branching
//! depend on the values of the scalars.  Only use it with public scalars,
//! for instance in batch signature verification.
//!
//! The reduction is only fast when the scalars have similar sizes, such as
//! independent random scalars.  When one scalar is much larger than the
//! others it degrades into repeated subtraction and the number of steps
//! grows with the ratio between them: a full-size scalar alongside a scalar
//! of `1` effectively never finishes.  This is not a drop-in replacement
//! for a general multiscalar multiplication.
//!
//! # Groups
//!
//! The algorithm is generic over the [`VartimeScalar`] and
//! [`VartimePoint`] traits; implementations are provided for
//! `curve25519-dalek`'s `Scalar`, `EdwardsPoint` and `RistrettoPoint`.

//------------------------------------------------------------------------
// External dependencies:
//------------------------------------------------------------------------

#[cfg(feature = "std")]
extern crate std;

//------------------------------------------------------------------------
// bos-coster public modules
//------------------------------------------------------------------------

// Scalar and group operations the reduction relies on
pub mod traits;

// Errors for the checked entry point
pub mod errors;

// The reduction itself
pub mod scalar_mul;

// Implementations for the curve25519-dalek groups
pub mod curve25519;

//------------------------------------------------------------------------
// bos-coster internal modules
//------------------------------------------------------------------------

// Fixed-capacity max-heap of weighted terms
pub(crate) mod heap;

#[cfg(test)]
mod mocks;

//------------------------------------------------------------------------
// Re-exports
//------------------------------------------------------------------------

pub use crate::curve25519::{EdwardsBosCoster, RistrettoBosCoster};
pub use crate::errors::MultiscalarError;
pub use crate::heap::MAX_N;
pub use crate::scalar_mul::bos_coster::{
    multiscalar_mul, try_multiscalar_mul, BosCoster, Reduction,
};
pub use crate::traits::{VartimeMultiscalarMul, VartimePoint, VartimeScalar};
