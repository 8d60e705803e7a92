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

//! Errors which may occur when decoding field elements, scalars, or curve
//! points from wire formats.

use core::fmt;
use core::fmt::Display;

/// Errors raised by the fallible byte and coordinate setters.
///
/// Every fallible constructor in this crate leaves nothing half-built when it
/// fails: on error the would-be receiver simply does not exist, and the error
/// describes which precondition the input violated.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// A field-element byte setter was handed a slice whose length is not 32.
    InvalidFieldElementLength,
    /// A scalar byte setter was handed a slice of the wrong length: the
    /// canonical and clamped setters expect 32 bytes, the uniform setter 64.
    InvalidScalarLength,
    /// `Scalar::from_canonical_bytes` was handed an encoding of a value
    /// greater than or equal to the group order \\( \ell \\).
    NonCanonicalScalar,
    /// A 32-byte string did not decode to a curve point (the implied
    /// \\(x^2\\) has no square root), or extended coordinates failed the
    /// on-curve check.
    InvalidPointEncoding,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::InvalidFieldElementLength => {
                write!(f, "field element byte representations must be 32 bytes in length")
            }
            Error::InvalidScalarLength => {
                write!(f, "scalar byte representations must be 32 (or, uniform, 64) bytes in length")
            }
            Error::NonCanonicalScalar => {
                write!(f, "scalar must be below the group order \u{2113}")
            }
            Error::InvalidPointEncoding => {
                write!(f, "byte string is not the encoding of a curve point")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
