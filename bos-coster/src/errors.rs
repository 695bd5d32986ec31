// -*- mode: rust; -*-
//
// This file is part of bos-coster.
// See LICENSE for licensing information.

//! Errors reported by the checked multiscalar entry point.
//!
//! The unchecked entry points treat the same conditions as caller bugs
//! and panic instead.

use core::fmt;
use core::fmt::Display;

/// Errors which may occur when handing inputs to
/// [`try_multiscalar_mul`](crate::try_multiscalar_mul).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum MultiscalarError {
    /// More terms were supplied than a single reduction can hold.
    TooManyTerms {
        /// The number of terms supplied.
        count: usize,
        /// The largest number of terms accepted.
        max: usize,
    },
    /// The scalar and point slices have different lengths.
    LengthMismatch {
        /// The number of scalars supplied.
        scalars: usize,
        /// The number of points supplied.
        points: usize,
    },
}

impl Display for MultiscalarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            MultiscalarError::TooManyTerms { count, max } => {
                write!(f, "Got {} terms, at most {} are supported", count, max)
            }
            MultiscalarError::LengthMismatch { scalars, points } => {
                write!(f, "Got {} scalars but {} points", scalars, points)
            }
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl std::error::Error for MultiscalarError {}
