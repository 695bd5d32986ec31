// -*- mode: rust; -*-
//
// This file is part of bos-coster.
// See LICENSE for licensing information.

//! Bos–Coster over the `curve25519-dalek` groups.
//!
//! `Scalar` values are kept reduced modulo \\( \ell \\) by
//! `curve25519-dalek`, so their little-endian byte encoding is the
//! canonical representative and can be compared and shifted directly.

use core::cmp::Ordering;

use curve25519_dalek::edwards::EdwardsPoint;
use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;

use crate::scalar_mul::bos_coster::BosCoster;
use crate::traits::{VartimePoint, VartimeScalar};

/// Bos–Coster multiscalar multiplication of `EdwardsPoint`s.
pub type EdwardsBosCoster = BosCoster<Scalar, EdwardsPoint>;

/// Bos–Coster multiscalar multiplication of `RistrettoPoint`s.
pub type RistrettoBosCoster = BosCoster<Scalar, RistrettoPoint>;

impl VartimeScalar for Scalar {
    fn zero() -> Self {
        Scalar::ZERO
    }

    fn is_zero(&self) -> bool {
        *self == Scalar::ZERO
    }

    fn cmp_vartime(&self, other: &Self) -> Ordering {
        // Most significant byte last.
        self.as_bytes()
            .iter()
            .rev()
            .cmp(other.as_bytes().iter().rev())
    }

    fn halve_vartime(&self) -> (Self, bool) {
        let mut bytes = self.to_bytes();
        let low_bit = bytes[0] & 1 == 1;

        let mut carry = 0u8;
        for byte in bytes.iter_mut().rev() {
            let next_carry = *byte & 1;
            *byte = (*byte >> 1) | (carry << 7);
            carry = next_carry;
        }

        // The quotient is below the input, hence already reduced.
        (Scalar::from_bytes_mod_order(bytes), low_bit)
    }
}

impl VartimePoint for EdwardsPoint {
    fn add_vartime(&self, other: &Self) -> Self {
        self + other
    }

    fn double_vartime(&self) -> Self {
        self + self
    }
}

impl VartimePoint for RistrettoPoint {
    fn add_vartime(&self, other: &Self) -> Self {
        self + other
    }

    fn double_vartime(&self) -> Self {
        self + self
    }
}
