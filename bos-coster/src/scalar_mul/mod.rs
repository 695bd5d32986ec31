// -*- mode: rust; -*-
//
// This file is part of bos-coster.
// See LICENSE for licensing information.

//! Implementations of multiscalar multiplication algorithms.
//!
//! There is currently a single, variable-time algorithm.  A
//! constant-time counterpart for secret scalars is a different algorithm
//! and does not belong here.

pub mod bos_coster;
