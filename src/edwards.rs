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

//! Group operations for the twisted Edwards form of Curve25519,
//!
//! $$
//! -x\^2 + y\^2 = 1 - \frac{121665}{121666} x\^2 y\^2,
//! $$
//!
//! in extended twisted Edwards coordinates.
//!
//! # Encodings
//!
//! Points are encoded as 32 bytes: the \\(y\\)-coordinate little-endian in
//! bits 0..255, and the low bit ("sign") of \\(x\\) in bit 255.  Decoding
//! accepts the non-canonical \\(y\\) values \\(p\\) through \\(2^{255}-1\\)
//! and normalizes them on re-encoding; this leniency is deliberate and
//! matches deployed Ed25519 verifiers.
//!
//! # Warning
//!
//! The group of points on the curve has order \\(8\ell\\), not \\(\ell\\):
//! decoded points may have a low-order component.  [`EdwardsPoint::mul_by_cofactor`],
//! [`EdwardsPoint::mul_by_order`], [`EdwardsPoint::is_small_order`] and
//! [`EdwardsPoint::is_torsion_free`] are the tools for dealing with this;
//! picking the right one is the caller's protocol-design problem.

#![allow(non_snake_case)]

use core::fmt::Debug;
use core::ops::{Add, AddAssign};
use core::ops::{Mul, MulAssign};
use core::ops::{Neg, Sub, SubAssign};

use subtle::Choice;
use subtle::ConditionallyNegatable;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

#[cfg(feature = "serde")]
use serde::de::Visitor;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants;
use crate::curve_models::{AffineNielsPoint, CompletedPoint, ProjectivePoint, ProjectiveNielsPoint};
use crate::errors::Error;
use crate::field::FieldElement;
use crate::montgomery::MontgomeryPoint;
use crate::scalar::Scalar;
use crate::traits::Identity;
use crate::traits::ValidityCheck;
use crate::window::{LookupTable, NafLookupTable5};

// ------------------------------------------------------------------------
// Compressed points
// ------------------------------------------------------------------------

/// In "Edwards y" / "Ed25519" format, the curve point \\((x,y)\\) is
/// determined by the \\(y\\)-coordinate and the sign of \\(x\\).
///
/// The first 255 bits of a `CompressedEdwardsY` represent the
/// \\(y\\)-coordinate.  The high bit of the 32nd byte is the sign bit of
/// \\(x\\) (the low bit of its canonical encoding).
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct CompressedEdwardsY(pub [u8; 32]);

impl ConstantTimeEq for CompressedEdwardsY {
    fn ct_eq(&self, other: &CompressedEdwardsY) -> Choice {
        self.as_bytes().ct_eq(other.as_bytes())
    }
}

impl Debug for CompressedEdwardsY {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "CompressedEdwardsY: {:?}", self.as_bytes())
    }
}

impl CompressedEdwardsY {
    /// View this `CompressedEdwardsY` as an array of bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Copy this `CompressedEdwardsY` to an array of bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Construct a `CompressedEdwardsY` from a slice of bytes.
    ///
    /// Returns [`Error::InvalidPointEncoding`] unless `bytes.len() == 32`.
    pub fn from_slice(bytes: &[u8]) -> Result<CompressedEdwardsY, Error> {
        if bytes.len() != 32 {
            return Err(Error::InvalidPointEncoding);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(bytes);
        Ok(CompressedEdwardsY(arr))
    }

    /// Attempt to decompress to an `EdwardsPoint`.
    ///
    /// The \\(x\\)-coordinate is recovered from the curve equation as
    /// \\( x^2 = (y^2 - 1) / (d y^2 + 1) \\); decoding fails with
    /// [`Error::InvalidPointEncoding`] iff that ratio is not a square.
    /// Non-canonical \\(y\\) values are accepted (see the module docs), and
    /// the resulting point re-encodes canonically.
    pub fn decompress(&self) -> Result<EdwardsPoint, Error> {
        let Y = FieldElement::from_bytes(self.as_bytes());
        let Z = FieldElement::ONE;
        let YY = Y.square();
        let u = &YY - &Z; //  u = y²-1
        let v = &(&YY * &constants::EDWARDS_D) + &Z; //  v = dy²+1
        let (mut X, is_valid_y_coord) = FieldElement::sqrt_ratio(&u, &v);

        if (!is_valid_y_coord).into() {
            return Err(Error::InvalidPointEncoding);
        }

        // sqrt_ratio always returns the nonnegative square root, so at this
        // point X has sign bit 0; flip it if the encoding asked for the
        // other preimage.  (If x = 0 the "negative" preimage is accepted
        // and yields x = -0 = 0, laxer than RFC 8032.)
        let compressed_sign_bit = Choice::from(self.as_bytes()[31] >> 7);
        X.conditional_negate(compressed_sign_bit);

        Ok(EdwardsPoint {
            T: &X * &Y,
            X,
            Y,
            Z,
        })
    }
}

impl Identity for CompressedEdwardsY {
    fn identity() -> CompressedEdwardsY {
        CompressedEdwardsY([
            1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0, 0,
        ])
    }
}

impl Default for CompressedEdwardsY {
    fn default() -> CompressedEdwardsY {
        CompressedEdwardsY::identity()
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for CompressedEdwardsY {
    /// Reset this `CompressedEdwardsY` to the compressed form of the
    /// identity element.
    fn zeroize(&mut self) {
        self.0.zeroize();
        self.0[0] = 1;
    }
}

// ------------------------------------------------------------------------
// Serde support
// ------------------------------------------------------------------------
// Serializes to and from `EdwardsPoint` directly, doing compression and
// decompression internally, so users can put `EdwardsPoint`s in structs and
// derive the serializers.

#[cfg(feature = "serde")]
impl Serialize for EdwardsPoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(self.compress().as_bytes())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for EdwardsPoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EdwardsPointVisitor;

        impl<'de> Visitor<'de> for EdwardsPointVisitor {
            type Value = EdwardsPoint;

            fn expecting(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                formatter.write_str("a valid point in Edwards y + sign format")
            }

            fn visit_bytes<E>(self, v: &[u8]) -> Result<EdwardsPoint, E>
            where
                E: serde::de::Error,
            {
                CompressedEdwardsY::from_slice(v)
                    .and_then(|compressed| compressed.decompress())
                    .map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_bytes(EdwardsPointVisitor)
    }
}

// ------------------------------------------------------------------------
// Internal point representation
// ------------------------------------------------------------------------

/// An `EdwardsPoint` represents a point on the Edwards form of Curve25519,
/// in extended twisted Edwards coordinates \\((X:Y:Z:T)\\) with
/// \\(x = X/Z\\), \\(y = Y/Z\\), \\(xy = T/Z\\).
#[derive(Copy, Clone)]
pub struct EdwardsPoint {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) Z: FieldElement,
    pub(crate) T: FieldElement,
}

// ------------------------------------------------------------------------
// Constructors
// ------------------------------------------------------------------------

impl Identity for EdwardsPoint {
    fn identity() -> EdwardsPoint {
        EdwardsPoint {
            X: FieldElement::ZERO,
            Y: FieldElement::ONE,
            Z: FieldElement::ONE,
            T: FieldElement::ZERO,
        }
    }
}

impl Default for EdwardsPoint {
    fn default() -> EdwardsPoint {
        EdwardsPoint::identity()
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for EdwardsPoint {
    /// Reset this `EdwardsPoint` to the identity element.
    fn zeroize(&mut self) {
        self.X.zeroize();
        self.Y = FieldElement::ONE;
        self.Z = FieldElement::ONE;
        self.T.zeroize();
    }
}

// ------------------------------------------------------------------------
// Validity checks (for debugging, not CT)
// ------------------------------------------------------------------------

impl ValidityCheck for EdwardsPoint {
    fn is_valid(&self) -> bool {
        // -X² + Y² = Z² + dT², the homogenized curve equation, plus the
        // extended-coordinate consistency condition XY = ZT.
        let XX = self.X.square();
        let YY = self.Y.square();
        let ZZ = self.Z.square();
        let TT = self.T.square();
        let lhs = &YY - &XX;
        let rhs = &ZZ + &(&constants::EDWARDS_D * &TT);
        if lhs != rhs {
            return false;
        }
        &self.X * &self.Y == &self.Z * &self.T
    }
}

// ------------------------------------------------------------------------
// Constant-time assignment and equality
// ------------------------------------------------------------------------

impl ConditionallySelectable for EdwardsPoint {
    fn conditional_select(a: &EdwardsPoint, b: &EdwardsPoint, choice: Choice) -> EdwardsPoint {
        EdwardsPoint {
            X: FieldElement::conditional_select(&a.X, &b.X, choice),
            Y: FieldElement::conditional_select(&a.Y, &b.Y, choice),
            Z: FieldElement::conditional_select(&a.Z, &b.Z, choice),
            T: FieldElement::conditional_select(&a.T, &b.T, choice),
        }
    }
}

impl ConstantTimeEq for EdwardsPoint {
    fn ct_eq(&self, other: &EdwardsPoint) -> Choice {
        // Equivalent points can have different representatives, so compare
        // by cross-multiplying away the projective factors:
        // x1/z1 == x2/z2  <==>  x1*z2 == x2*z1, and likewise for y.
        let t1 = &self.X * &other.Z;
        let t2 = &other.X * &self.Z;
        let t3 = &self.Y * &other.Z;
        let t4 = &other.Y * &self.Z;

        t1.ct_eq(&t2) & t3.ct_eq(&t4)
    }
}

impl PartialEq for EdwardsPoint {
    fn eq(&self, other: &EdwardsPoint) -> bool {
        self.ct_eq(other).into()
    }
}
impl Eq for EdwardsPoint {}

// ------------------------------------------------------------------------
// Point conversions
// ------------------------------------------------------------------------

impl EdwardsPoint {
    /// Convert to a ProjectiveNielsPoint.
    pub(crate) fn to_projective_niels(self) -> ProjectiveNielsPoint {
        ProjectiveNielsPoint {
            Y_plus_X: &self.Y + &self.X,
            Y_minus_X: &self.Y - &self.X,
            Z: self.Z,
            T2d: &self.T * &constants::EDWARDS_D2,
        }
    }

    /// Convert the representation of this point from extended to projective
    /// coordinates.  Free: drop \\(T\\).
    pub(crate) fn to_projective(self) -> ProjectivePoint {
        ProjectivePoint {
            X: self.X,
            Y: self.Y,
            Z: self.Z,
        }
    }

    /// Dehomogenize to an AffineNielsPoint.
    pub(crate) fn to_affine_niels(self) -> AffineNielsPoint {
        let recip = self.Z.invert();
        let x = &self.X * &recip;
        let y = &self.Y * &recip;
        let xy2d = &(&x * &y) * &constants::EDWARDS_D2;
        AffineNielsPoint {
            y_plus_x: &y + &x,
            y_minus_x: &y - &x,
            xy2d,
        }
    }

    /// Convert this `EdwardsPoint` on the Edwards model to the
    /// corresponding `MontgomeryPoint` on the Montgomery model.
    ///
    /// Per RFC 7748, the map is \\( u = (1+y)/(1-y) \\), or in projective
    /// terms \\( (U : W) = (Z+Y : Z-Y) \\).  The identity point (the only
    /// point with \\(y = 1\\)) maps to 32 zero bytes, analogously to the
    /// X25519 function.
    ///
    /// This is a one-way conversion: the Montgomery model does not retain
    /// sign information, and the deliberate absence of an inverse map is
    /// what keeps twist points out of this crate.
    pub fn to_montgomery(&self) -> MontgomeryPoint {
        let U = &self.Z + &self.Y;
        let W = &self.Z - &self.Y;
        // For the identity, W = 0 and invert(0) = 0 produces u = 0.
        let u = &U * &W.invert();
        MontgomeryPoint(u.to_bytes())
    }

    /// Compress this point to `CompressedEdwardsY` format.
    pub fn compress(&self) -> CompressedEdwardsY {
        let recip = self.Z.invert();
        let x = &self.X * &recip;
        let y = &self.Y * &recip;
        let mut s: [u8; 32] = y.to_bytes();
        s[31] ^= x.is_negative().unwrap_u8() << 7;
        CompressedEdwardsY(s)
    }

    /// Return this point's extended coordinates \\((X:Y:Z:T)\\), with
    /// \\(x = X/Z\\), \\(y = Y/Z\\), \\(xy = T/Z\\).
    pub fn to_extended_coordinates(
        &self,
    ) -> (FieldElement, FieldElement, FieldElement, FieldElement) {
        (self.X, self.Y, self.Z, self.T)
    }

    /// Construct a point from extended coordinates \\((X:Y:Z:T)\\).
    ///
    /// Returns [`Error::InvalidPointEncoding`] if the coordinates do not
    /// satisfy the curve equation \\(-X^2 + Y^2 = Z^2 + dT^2\\) or the
    /// consistency condition \\(XY = ZT\\).
    pub fn from_extended_coordinates(
        X: &FieldElement,
        Y: &FieldElement,
        Z: &FieldElement,
        T: &FieldElement,
    ) -> Result<EdwardsPoint, Error> {
        let P = EdwardsPoint {
            X: *X,
            Y: *Y,
            Z: *Z,
            T: *T,
        };
        if !P.is_valid() {
            return Err(Error::InvalidPointEncoding);
        }
        Ok(P)
    }
}

// ------------------------------------------------------------------------
// Doubling
// ------------------------------------------------------------------------

impl EdwardsPoint {
    /// Add this point to itself.
    pub fn double(&self) -> EdwardsPoint {
        self.to_projective().double().to_extended()
    }

    /// Compute \\([2^k] P \\) by successive doublings, staying in the
    /// cheap \\( \mathbb P\^2 \to \mathbb P\^1 \times \mathbb P\^1 \\)
    /// doubling cycle and only paying for the extended conversion once.
    ///
    /// Requires \\( k > 0 \\).
    pub(crate) fn mul_by_pow_2(&self, k: u32) -> EdwardsPoint {
        debug_assert!(k > 0);
        let mut r: CompletedPoint;
        let mut s = self.to_projective();
        for _ in 0..(k - 1) {
            r = s.double();
            s = r.to_projective();
        }
        // Unroll last iteration so we can go directly to_extended().
        s.double().to_extended()
    }
}

// ------------------------------------------------------------------------
// Addition and Subtraction
// ------------------------------------------------------------------------

impl<'a, 'b> Add<&'b EdwardsPoint> for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    fn add(self, other: &'b EdwardsPoint) -> EdwardsPoint {
        (self + &other.to_projective_niels()).to_extended()
    }
}

define_add_variants!(LHS = EdwardsPoint, RHS = EdwardsPoint, Output = EdwardsPoint);

impl<'b> AddAssign<&'b EdwardsPoint> for EdwardsPoint {
    fn add_assign(&mut self, rhs: &'b EdwardsPoint) {
        *self = (self as &EdwardsPoint) + rhs;
    }
}

define_add_assign_variants!(LHS = EdwardsPoint, RHS = EdwardsPoint);

impl<'a, 'b> Sub<&'b EdwardsPoint> for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    fn sub(self, other: &'b EdwardsPoint) -> EdwardsPoint {
        (self - &other.to_projective_niels()).to_extended()
    }
}

define_sub_variants!(LHS = EdwardsPoint, RHS = EdwardsPoint, Output = EdwardsPoint);

impl<'b> SubAssign<&'b EdwardsPoint> for EdwardsPoint {
    fn sub_assign(&mut self, rhs: &'b EdwardsPoint) {
        *self = (self as &EdwardsPoint) - rhs;
    }
}

define_sub_assign_variants!(LHS = EdwardsPoint, RHS = EdwardsPoint);

// ------------------------------------------------------------------------
// Negation
// ------------------------------------------------------------------------

impl<'a> Neg for &'a EdwardsPoint {
    type Output = EdwardsPoint;

    fn neg(self) -> EdwardsPoint {
        EdwardsPoint {
            X: -(&self.X),
            Y: self.Y,
            Z: self.Z,
            T: -(&self.T),
        }
    }
}

impl Neg for EdwardsPoint {
    type Output = EdwardsPoint;

    fn neg(self) -> EdwardsPoint {
        -&self
    }
}

// ------------------------------------------------------------------------
// Scalar multiplication
// ------------------------------------------------------------------------

impl<'b> MulAssign<&'b Scalar> for EdwardsPoint {
    fn mul_assign(&mut self, scalar: &'b Scalar) {
        let result = (self as &EdwardsPoint) * scalar;
        *self = result;
    }
}

define_mul_assign_variants!(LHS = EdwardsPoint, RHS = Scalar);

define_mul_variants!(LHS = EdwardsPoint, RHS = Scalar, Output = EdwardsPoint);
define_mul_variants!(LHS = Scalar, RHS = EdwardsPoint, Output = EdwardsPoint);

impl<'a, 'b> Mul<&'b Scalar> for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    /// Scalar multiplication: compute `scalar * self`, in constant time.
    ///
    /// For scalar multiplication of the basepoint, [`EdwardsPoint::mul_base`]
    /// (which uses the precomputed [`constants::ED25519_BASEPOINT_TABLE`])
    /// is about four times faster.
    fn mul(self, scalar: &'b Scalar) -> EdwardsPoint {
        // Construct a lookup table of [P, 2P, 3P, ..., 8P].
        let lookup_table = LookupTable::<ProjectiveNielsPoint>::from(self);
        // Setting s = scalar, compute its signed radix-16 digits
        //
        //    s = s_0 + s_1*16^1 + ... + s_63*16^63,
        //
        // with -8 <= s_i < 8 for 0 <= i < 63 and 0 <= s_63 <= 8.  Then
        //
        //    s*P = s_0*P + 16*(s_1*P + 16*(... + 16*s_63*P)...),
        //
        // evaluated inside out, multiplying by 16 via four doublings per
        // digit.  The first iteration is unrolled to avoid doubling the
        // identity.
        let scalar_digits = scalar.to_radix_16();

        let mut tmp2;
        let mut tmp3 = EdwardsPoint::identity();
        let mut tmp1 = &tmp3 + &lookup_table.select(scalar_digits[63]);
        // Now tmp1 = s_63*P in P1xP1 coords.
        for i in (0..63).rev() {
            tmp2 = tmp1.to_projective(); // tmp2 =    (prev) in P2 coords
            tmp1 = tmp2.double(); // tmp1 =  2*(prev) in P1xP1 coords
            tmp2 = tmp1.to_projective(); // tmp2 =  2*(prev) in P2 coords
            tmp1 = tmp2.double(); // tmp1 =  4*(prev) in P1xP1 coords
            tmp2 = tmp1.to_projective(); // tmp2 =  4*(prev) in P2 coords
            tmp1 = tmp2.double(); // tmp1 =  8*(prev) in P1xP1 coords
            tmp2 = tmp1.to_projective(); // tmp2 =  8*(prev) in P2 coords
            tmp1 = tmp2.double(); // tmp1 = 16*(prev) in P1xP1 coords
            tmp3 = tmp1.to_extended(); // tmp3 = 16*(prev) in P3 coords
            tmp1 = &tmp3 + &lookup_table.select(scalar_digits[i]);
            // Now tmp1 = s_i*P + 16*(prev) in P1xP1 coords
        }
        tmp1.to_extended()
    }
}

impl<'a, 'b> Mul<&'b EdwardsPoint> for &'a Scalar {
    type Output = EdwardsPoint;

    /// Scalar multiplication: compute `self * point`, in constant time.
    fn mul(self, point: &'b EdwardsPoint) -> EdwardsPoint {
        point * self
    }
}

impl EdwardsPoint {
    /// Fixed-base scalar multiplication by the Ed25519 basepoint.
    ///
    /// Equivalent to, and much faster than, `&B * scalar` for the basepoint
    /// `B`, thanks to the precomputed table of basepoint multiples.
    pub fn mul_base(scalar: &Scalar) -> EdwardsPoint {
        &constants::ED25519_BASEPOINT_TABLE * scalar
    }
}

/// Given a slice of (possibly secret) scalars and a slice of (possibly
/// secret) points, compute
/// $$
/// Q = c\_1 P\_1 + \cdots + c\_n P\_n
/// $$
/// in constant time (for fixed slice lengths).
///
/// The doublings are shared across the whole sum, so this is substantially
/// cheaper than `n` independent scalar multiplications.
///
/// # Panics
///
/// Panics if the two slices have different lengths; that is a programmer
/// error, not an input error.
#[cfg(feature = "alloc")]
pub fn multiscalar_mul(scalars: &[Scalar], points: &[EdwardsPoint]) -> EdwardsPoint {
    use alloc::vec::Vec;

    assert_eq!(
        scalars.len(),
        points.len(),
        "multiscalar_mul with mismatched slice lengths"
    );

    let lookup_tables: Vec<_> = points
        .iter()
        .map(LookupTable::<ProjectiveNielsPoint>::from)
        .collect();

    #[allow(unused_mut)]
    let mut scalar_digits: Vec<_> = scalars.iter().map(Scalar::to_radix_16).collect();

    // Compute the columns of the two-dimensional sum
    //
    //    s_1*P_1 =   P_1*s_{1,0} + 16*(P_1*s_{1,1} + 16*(... + 16*P_1*s_{1,63})...)
    //  + s_2*P_2 = + P_2*s_{2,0} + 16*(P_2*s_{2,1} + 16*(... + 16*P_2*s_{2,63})...)
    //      ...
    //  + s_n*P_n = + P_n*s_{n,0} + 16*(P_n*s_{n,1} + 16*(... + 16*P_n*s_{n,63})...)
    //
    // top-to-bottom, then right-to-left, multiplying by 16 once per column
    // instead of once per term.
    let mut Q = EdwardsPoint::identity();
    for j in (0..64).rev() {
        Q = Q.mul_by_pow_2(4);
        for (s_i, lookup_table_i) in scalar_digits.iter().zip(lookup_tables.iter()) {
            let R_i = lookup_table_i.select(s_i[j]);
            Q = (&Q + &R_i).to_extended();
        }
    }

    // The radix-16 digits of secret scalars are themselves secret.
    #[cfg(feature = "zeroize")]
    for digits in scalar_digits.iter_mut() {
        digits.zeroize();
    }

    Q
}

/// A precomputed table of multiples of a basepoint, for accelerating
/// fixed-base scalar multiplication.  One table, for the Ed25519 basepoint,
/// is provided in the [`constants`] module.
///
/// The basepoint tables are reasonably large (30KB), so they should
/// probably be boxed if constructed at runtime.
#[derive(Clone)]
pub struct EdwardsBasepointTable(pub(crate) [LookupTable<AffineNielsPoint>; 32]);

impl EdwardsBasepointTable {
    /// Compute \\( aB \\) for the basepoint \\( B \\) of this table.
    ///
    /// With the radix-16 digits \\(a\_i\\) of the scalar, grouping even and
    /// odd coefficients gives
    /// $$
    ///    a B = (a\_0 16\^0 B + a\_2 16\^2 B + \cdots + a\_{62} 16\^{62} B)
    ///        + 16(a\_1 16\^0 B + a\_3 16\^2 B + \cdots + a\_{63} 16\^{62} B),
    /// $$
    /// and table \\(i\\) holds exactly the multiples
    /// \\( [16^{2i}B, \ldots, 8 \cdot 16^{2i}B] \\) needed for the
    /// \\(2i\\)-th and (after the shared multiply-by-16) the
    /// \\(2i+1\\)-th digit.  Accumulating the odd digits first costs one
    /// multiply-by-16 in total and no doubling of the identity.
    fn basepoint_mul(&self, scalar: &Scalar) -> EdwardsPoint {
        let a = scalar.to_radix_16();

        let tables = &self.0;
        let mut P = EdwardsPoint::identity();

        for i in (0..64).filter(|x| x % 2 == 1) {
            P = (&P + &tables[i / 2].select(a[i])).to_extended();
        }

        P = P.mul_by_pow_2(4);

        for i in (0..64).filter(|x| x % 2 == 0) {
            P = (&P + &tables[i / 2].select(a[i])).to_extended();
        }

        P
    }

    /// Create a table of precomputed multiples of `basepoint`.
    pub fn create(basepoint: &EdwardsPoint) -> EdwardsBasepointTable {
        let mut table = EdwardsBasepointTable([LookupTable([AffineNielsPoint::identity(); 8]); 32]);
        let mut P = *basepoint;
        for i in 0..32 {
            // P = (16^2)^i * B
            table.0[i] = LookupTable::from(&P);
            P = P.mul_by_pow_2(8);
        }
        table
    }

    /// Get the basepoint of this table as an `EdwardsPoint`.
    pub fn basepoint(&self) -> EdwardsPoint {
        // self.0[0].select(1) is 1*(16^2)^0*B as an AffineNielsPoint;
        // add the identity to convert back to extended form.
        (&EdwardsPoint::identity() + &self.0[0].select(1)).to_extended()
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a EdwardsBasepointTable {
    type Output = EdwardsPoint;

    /// Construct an `EdwardsPoint` from a `Scalar` \\(a\\) by computing the
    /// multiple \\(aB\\) of this basepoint \\(B\\), in constant time.
    fn mul(self, scalar: &'b Scalar) -> EdwardsPoint {
        self.basepoint_mul(scalar)
    }
}

impl<'a, 'b> Mul<&'a EdwardsBasepointTable> for &'b Scalar {
    type Output = EdwardsPoint;

    /// Construct an `EdwardsPoint` from a `Scalar` \\(a\\) by computing the
    /// multiple \\(aB\\) of this basepoint \\(B\\), in constant time.
    fn mul(self, basepoint_table: &'a EdwardsBasepointTable) -> EdwardsPoint {
        basepoint_table * self
    }
}

impl Debug for EdwardsBasepointTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "EdwardsBasepointTable([")?;
        for i in 0..32 {
            writeln!(f, "\t{:?},", &self.0[i])?;
        }
        write!(f, "])")
    }
}

// ------------------------------------------------------------------------
// Cofactor and group-order multiplication
// ------------------------------------------------------------------------

impl EdwardsPoint {
    /// Multiply by the cofactor: return \\([8]P\\), as three doublings.
    pub fn mul_by_cofactor(&self) -> EdwardsPoint {
        self.mul_by_pow_2(3)
    }

    /// Multiply by the group order: return \\([\ell]P\\).
    ///
    /// The result is the identity if and only if \\(P\\) is the identity or
    /// lies in the prime-order subgroup, so this doubles as the "does this
    /// point have a low-order component" predicate (see
    /// [`EdwardsPoint::is_torsion_free`]).
    pub fn mul_by_order(&self) -> EdwardsPoint {
        // Fixed addition-subtraction-free chain for l, 34 additions and 248
        // doublings over 13 temporaries (addchain output for
        // 2^252 + 27742317777372353535851937790883648493).
        let p = *self;
        let tA = &p + &p; //              2
        let t4 = &p + &tA; //             3
        let t2 = &p + &t4; //             4
        let p = &tA + &t2; //             6
        let t1 = &tA + &p; //             8
        let t5 = &t4 + &t1; //           11 = _1011
        let t3 = &t1 + &t1; //           16
        let t0 = &t3 + &t3; //           32
        let t8 = &p + &t0; //            38 = _100110
        let t0 = &t0 + &t0; //           64 = _1000000
        let t7 = &t3 + &t0; //           80 = _1010000
        let tB = &t4 + &t7; //           83 = _1010011
        let t3 = &t3 + &tB; //           99 = _1100011
        let t9 = &t2 + &t3; //          103 = _1100111
        let t6 = &t2 + &t9; //          107 = _1101011
        let t4 = &t0 + &tB; //          147 = _10010011
        let t2 = &t2 + &t4; //          151 = _10010111
        let t8 = &t8 + &t2; //          189 = _10111101
        let t0 = &t0 + &t4; //          211 = _11010011
        let t7 = &t7 + &t2; //          231 = _11100111
        let p = &p + &t7; //            237 = _11101101
        let t1 = &t1 + &p; //           245 = _11110101
        let tC = &t5 + &t1; //          256

        let tC = tC.mul_by_pow_2(126);
        let tB = &tB + &tC;
        let tB = tB.mul_by_pow_2(9);
        let tA = &tA + &tB;
        let tA = &t1 + &tA;
        let tA = tA.mul_by_pow_2(7);
        let t9 = &t9 + &tA;
        let t9 = t9.mul_by_pow_2(9);
        let t9 = &t1 + &t9;
        let t9 = t9.mul_by_pow_2(11);
        let t8 = &t8 + &t9;
        let t8 = t8.mul_by_pow_2(8);
        let t7 = &t7 + &t8;
        let t7 = t7.mul_by_pow_2(9);
        let t6 = &t6 + &t7;
        let t6 = t6.mul_by_pow_2(6);
        let t5 = &t5 + &t6;
        let t5 = t5.mul_by_pow_2(14);
        let t4 = &t4 + &t5;
        let t4 = t4.mul_by_pow_2(10);
        let t3 = &t3 + &t4;
        let t3 = t3.mul_by_pow_2(9);
        let t2 = &t2 + &t3;
        let t2 = t2.mul_by_pow_2(10);
        let t1 = &t1 + &t2;
        let t1 = t1.mul_by_pow_2(8);
        let t0 = &t0 + &t1;
        let t0 = t0.mul_by_pow_2(8);

        &p + &t0
    }

    /// Determine if this point is of small order.
    ///
    /// The curve group has order \\(8\ell\\); this returns true exactly for
    /// the eight points of the torsion subgroup \\( \mathcal E[8] \\).
    pub fn is_small_order(&self) -> bool {
        self.mul_by_cofactor() == EdwardsPoint::identity()
    }

    /// Determine if this point lies in the prime-order subgroup (or is the
    /// identity), i.e. is free of any low-order component.
    pub fn is_torsion_free(&self) -> bool {
        self.mul_by_order() == EdwardsPoint::identity()
    }
}

// ------------------------------------------------------------------------
// Debug traits
// ------------------------------------------------------------------------

impl Debug for EdwardsPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "EdwardsPoint{{\n\tX: {:?},\n\tY: {:?},\n\tZ: {:?},\n\tT: {:?}\n}}",
            &self.X, &self.Y, &self.Z, &self.T
        )
    }
}

// ------------------------------------------------------------------------
// Variable-time functions
// ------------------------------------------------------------------------

pub mod vartime {
    //! Variable-time operations on curve points, useful for non-secret data.

    use super::*;

    /// Given a point \\(A\\) and scalars \\(a\\) and \\(b\\), compute the
    /// point \\(aA + bB\\), where \\(B\\) is the Ed25519 basepoint.
    ///
    /// Execution time depends on the scalars: the NAF recodings determine
    /// which additions are skipped.  Use only with public inputs.
    pub fn double_scalar_mul_basepoint(
        a: &Scalar,
        A: &EdwardsPoint,
        b: &Scalar,
    ) -> EdwardsPoint {
        // A width-5 NAF keeps the dynamic table at 8 entries; the static
        // basepoint table affords width 8.
        let a_naf = a.non_adjacent_form(5);
        let b_naf = b.non_adjacent_form(8);

        // Find the starting index: both NAFs are zero above it.
        let mut i: usize = 255;
        for j in (0..256).rev() {
            i = j;
            if a_naf[i] != 0 || b_naf[i] != 0 {
                break;
            }
        }

        let table_A = NafLookupTable5::<ProjectiveNielsPoint>::from(A);
        let table_B = &constants::AFFINE_ODD_MULTIPLES_OF_BASEPOINT;

        let mut r = ProjectivePoint::identity();
        loop {
            let mut t = r.double();

            if a_naf[i] > 0 {
                t = &t.to_extended() + &table_A.select(a_naf[i] as usize);
            } else if a_naf[i] < 0 {
                t = &t.to_extended() - &table_A.select(-a_naf[i] as usize);
            }

            if b_naf[i] > 0 {
                t = &t.to_extended() + &table_B.select(b_naf[i] as usize);
            } else if b_naf[i] < 0 {
                t = &t.to_extended() - &table_B.select(-b_naf[i] as usize);
            }

            r = t.to_projective();

            if i == 0 {
                break;
            }
            i -= 1;
        }

        r.to_extended()
    }

    /// Given a slice of public scalars and a slice of public points, compute
    /// $$
    /// Q = c\_1 P\_1 + \cdots + c\_n P\_n
    /// $$
    /// in variable time, using width-5 NAF tables of odd multiples per
    /// point.
    ///
    /// # Panics
    ///
    /// Panics if the two slices have different lengths.
    #[cfg(feature = "alloc")]
    pub fn multiscalar_mul(scalars: &[Scalar], points: &[EdwardsPoint]) -> EdwardsPoint {
        use alloc::vec::Vec;

        assert_eq!(
            scalars.len(),
            points.len(),
            "vartime::multiscalar_mul with mismatched slice lengths"
        );

        let nafs: Vec<_> = scalars.iter().map(|c| c.non_adjacent_form(5)).collect();
        let tables: Vec<_> = points
            .iter()
            .map(NafLookupTable5::<ProjectiveNielsPoint>::from)
            .collect();

        let mut r = ProjectivePoint::identity();

        // No effort to find the first nonzero coefficient here: scanning n
        // NAFs can cost more than the doublings it would save.
        for i in (0..256).rev() {
            let mut t = r.double();

            for (naf, table) in nafs.iter().zip(tables.iter()) {
                if naf[i] > 0 {
                    t = &t.to_extended() + &table.select(naf[i] as usize);
                } else if naf[i] < 0 {
                    t = &t.to_extended() - &table.select(-naf[i] as usize);
                }
            }

            r = t.to_projective();
        }

        r.to_extended()
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
