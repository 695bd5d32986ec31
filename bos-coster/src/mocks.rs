//! A toy group for tests: the integers modulo a small prime `Q` under
//! addition, with scalars also taken modulo `Q`.
//!
//! Scalar multiplication in this group is ordinary modular
//! multiplication, so expected results can be computed directly and
//! the reduction can be checked on values small enough to reason about.

use core::cmp::Ordering;
use core::ops::{Add, Neg};

use subtle::{Choice, ConstantTimeEq};

use crate::traits::{Identity, VartimePoint, VartimeScalar};

/// The group order.
pub(crate) const Q: u64 = 1_000_003;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct MockScalar(pub(crate) u64);

impl MockScalar {
    pub(crate) fn new(value: u64) -> Self {
        MockScalar(value % Q)
    }
}

impl Add for MockScalar {
    type Output = MockScalar;

    fn add(self, other: MockScalar) -> MockScalar {
        MockScalar((self.0 + other.0) % Q)
    }
}

impl Neg for MockScalar {
    type Output = MockScalar;

    fn neg(self) -> MockScalar {
        MockScalar((Q - self.0) % Q)
    }
}

impl VartimeScalar for MockScalar {
    fn zero() -> Self {
        MockScalar(0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }

    fn cmp_vartime(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }

    fn halve_vartime(&self) -> (Self, bool) {
        (MockScalar(self.0 >> 1), self.0 & 1 == 1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct MockPoint(pub(crate) u64);

impl MockPoint {
    pub(crate) fn new(value: u64) -> Self {
        MockPoint(value % Q)
    }

    /// Reference scalar multiplication.
    pub(crate) fn mul(&self, scalar: &MockScalar) -> MockPoint {
        MockPoint(((self.0 as u128 * scalar.0 as u128) % Q as u128) as u64)
    }
}

impl Identity for MockPoint {
    fn identity() -> Self {
        MockPoint(0)
    }
}

impl ConstantTimeEq for MockPoint {
    fn ct_eq(&self, other: &MockPoint) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl VartimePoint for MockPoint {
    fn add_vartime(&self, other: &Self) -> Self {
        MockPoint((self.0 + other.0) % Q)
    }

    fn double_vartime(&self) -> Self {
        MockPoint((2 * self.0) % Q)
    }
}

/// Sum of `scalars[i] * points[i]` computed term by term.
pub(crate) fn naive_multiscalar_mul(scalars: &[MockScalar], points: &[MockPoint]) -> MockPoint {
    scalars
        .iter()
        .zip(points.iter())
        .fold(MockPoint(0), |acc, (s, p)| acc.add_vartime(&p.mul(s)))
}
