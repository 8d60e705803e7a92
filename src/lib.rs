// -*- mode: rust; -*-
//
// This file is part of edwards25519.
// Copyright (c) 2016-2021 isis lovecruft
// Copyright (c) 2016-2020 Henry de Valence
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>
// - Henry de Valence <hdevalence@hdevalence.ca>

#![no_std]
#![warn(missing_docs)]
#![allow(clippy::needless_range_loop)]

//! # edwards25519
//!
//! **Low-level group operations on the twisted Edwards curve birationally
//! equivalent to Curve25519, together with arithmetic in the underlying prime
//! field \\(\mathbb Z / (2^{255} - 19)\\) and in the scalar field modulo the
//! group order \\( \ell = 2^{252} + 27742317777372353535851937790883648493 \\).**
//!
//! This crate provides the primitives needed to build higher-level protocols —
//! Ed25519 signatures, X25519-style key agreement, prime-order group
//! constructions, proofs, VRFs — but is not itself any of those protocols.
//! Most users should reach for a protocol crate instead; this one hands you
//! points, scalars, and field elements and expects you to know what to do
//! with them.
//!
//! # Organization
//!
//! * [`field`]: arithmetic modulo \\(p = 2^{255} - 19\\), in a redundant
//!   radix-\\(2^{51}\\) representation with five `u64` limbs.
//! * [`scalar`]: arithmetic modulo the group order \\(\ell\\), including the
//!   signed radix-16 and non-adjacent-form recodings used by the scalar
//!   multiplication loops.
//! * [`edwards`]: points on the curve \\(-x^2 + y^2 = 1 + dx^2y^2\\) in
//!   extended twisted Edwards coordinates, with constant-time and
//!   variable-time scalar multiplication.
//! * [`montgomery`]: the one-way conversion to the \\(u\\)-coordinate of the
//!   birationally equivalent Montgomery curve.
//! * [`constants`]: curve constants and the precomputed basepoint tables.
//!
//! # Constant time
//!
//! Every operation not living in a `vartime` module (and not documented
//! otherwise) executes with control flow and memory-access pattern
//! independent of secret inputs.  Conditional logic on secrets goes through
//! the [`subtle`] crate's masked selection primitives.

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "alloc")]
extern crate alloc;

#[macro_use]
mod macros;

pub mod errors;
pub mod field;
pub mod scalar;

pub(crate) mod curve_models;
pub(crate) mod window;

pub mod edwards;
pub mod montgomery;

pub mod constants;
pub mod traits;
