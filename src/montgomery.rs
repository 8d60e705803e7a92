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

//! The \\(u\\)-coordinate encoding on the Montgomery form of Curve25519.
//!
//! The birational map between the Edwards curve and the Montgomery curve
//! \\( v^2 = u^3 + 486662 u^2 + u \\) sends \\( (x, y) \\) to
//! \\( u = (1+y)/(1-y) \\).  [`crate::edwards::EdwardsPoint::to_montgomery`]
//! computes that map; this module only holds the resulting canonical
//! 32-byte encoding per RFC 7748.
//!
//! There is intentionally no inverse conversion and no Montgomery-side
//! arithmetic here: \\(u\\) forgets the sign of \\(x\\) (so \\(P\\) and
//! \\(-P\\) encode identically), and an X25519-style decoder would have to
//! accept points on the quadratic twist, which do not correspond to any
//! Edwards point.

use core::fmt::Debug;

use subtle::Choice;
use subtle::ConstantTimeEq;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// The canonical little-endian encoding of a Montgomery \\(u\\)-coordinate.
///
/// The Edwards identity point encodes as 32 zero bytes, analogously to the
/// X25519 function.
#[derive(Copy, Clone, Default, Eq, Hash)]
pub struct MontgomeryPoint(pub [u8; 32]);

impl ConstantTimeEq for MontgomeryPoint {
    fn ct_eq(&self, other: &MontgomeryPoint) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for MontgomeryPoint {
    fn eq(&self, other: &MontgomeryPoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl Debug for MontgomeryPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "MontgomeryPoint: {:?}", &self.0)
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for MontgomeryPoint {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl MontgomeryPoint {
    /// View this `MontgomeryPoint` as an array of bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert this `MontgomeryPoint` to an array of bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants;

    /// The Montgomery encoding of the Ed25519 basepoint is the X25519
    /// basepoint, u = 9.
    #[test]
    fn basepoint_maps_to_nine() {
        let mut nine = [0u8; 32];
        nine[0] = 9;
        let u = constants::ED25519_BASEPOINT_POINT.to_montgomery();
        assert_eq!(u.to_bytes(), nine);
    }

    /// P and -P encode to the same u-coordinate.
    #[test]
    fn negation_is_forgotten() {
        let B = constants::ED25519_BASEPOINT_POINT;
        assert_eq!(B.to_montgomery(), (-&B).to_montgomery());
    }
}
