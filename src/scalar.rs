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

//! Arithmetic on scalars (integers mod the group order).
//!
//! The Ed25519 basepoint has prime order
//!
//! $$
//! \ell = 2^{252} + 27742317777372353535851937790883648493,
//! $$
//!
//! so a multiple \\(aP\\) of a prime-order point depends only on
//! \\(a \bmod \ell\\).  The [`Scalar`] type represents an element of
//! \\(\mathbb Z / \ell \mathbb Z\\), stored as its canonical 32-byte
//! little-endian encoding; every public operation returns a reduced value.
//!
//! For arithmetic, scalars are unpacked into twelve 21-bit limbs and
//! multiplied schoolbook-style, with the 512-bit intermediate reduced by the
//! interleaved-carry schedule originally published in the SUPERCOP `ref10`
//! `sc_reduce` routine.

use core::fmt::Debug;
use core::ops::Neg;
use core::ops::{Add, AddAssign};
use core::ops::{Mul, MulAssign};
use core::ops::{Sub, SubAssign};

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

#[cfg(feature = "rand_core")]
use rand_core::{CryptoRng, RngCore};

#[cfg(feature = "digest")]
use digest::consts::U64;
#[cfg(feature = "digest")]
use digest::Digest;

#[cfg(feature = "serde")]
use serde::de::Visitor;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants;
use crate::errors::Error;

/// The `Scalar` struct holds an element of
/// \\(\mathbb Z / \ell\mathbb Z\\), i.e. an integer in \\([0, \ell)\\).
#[derive(Copy, Clone)]
pub struct Scalar {
    /// The canonical little-endian encoding of the (reduced) value.
    /// The invariant maintained by every constructor and operation is
    /// `bytes`, as an integer, is less than \\( \ell \\); in particular the
    /// top four bits are clear.
    pub(crate) bytes: [u8; 32],
}

impl Debug for Scalar {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Scalar{{\n\tbytes: {:?},\n}}", &self.bytes)
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Scalar) -> Choice {
        self.bytes.ct_eq(&other.bytes)
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Scalar) -> bool {
        self.ct_eq(other).into()
    }
}
impl Eq for Scalar {}

impl ConditionallySelectable for Scalar {
    fn conditional_select(a: &Scalar, b: &Scalar, choice: Choice) -> Scalar {
        let mut bytes = [0u8; 32];
        for i in 0..32 {
            bytes[i] = u8::conditional_select(&a.bytes[i], &b.bytes[i], choice);
        }
        Scalar { bytes }
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn mul(self, rhs: &'b Scalar) -> Scalar {
        Scalar::multiply_add(self, rhs, &Scalar::ZERO)
    }
}

define_mul_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);

impl<'b> MulAssign<&'b Scalar> for Scalar {
    fn mul_assign(&mut self, rhs: &'b Scalar) {
        *self = Scalar::multiply_add(self, rhs, &Scalar::ZERO);
    }
}

define_mul_assign_variants!(LHS = Scalar, RHS = Scalar);

impl<'a, 'b> Add<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn add(self, rhs: &'b Scalar) -> Scalar {
        Scalar::multiply_add(&Scalar::ONE, self, rhs)
    }
}

define_add_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);

impl<'b> AddAssign<&'b Scalar> for Scalar {
    fn add_assign(&mut self, rhs: &'b Scalar) {
        *self = Scalar::multiply_add(&Scalar::ONE, self, rhs);
    }
}

define_add_assign_variants!(LHS = Scalar, RHS = Scalar);

impl<'a, 'b> Sub<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn sub(self, rhs: &'b Scalar) -> Scalar {
        // (l-1)*rhs + self = self - rhs (mod l)
        Scalar::multiply_add(&constants::L_MINUS_1, rhs, self)
    }
}

define_sub_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);

impl<'b> SubAssign<&'b Scalar> for Scalar {
    fn sub_assign(&mut self, rhs: &'b Scalar) {
        *self = Scalar::multiply_add(&constants::L_MINUS_1, rhs, self);
    }
}

define_sub_assign_variants!(LHS = Scalar, RHS = Scalar);

impl<'a> Neg for &'a Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        self * &constants::L_MINUS_1
    }
}

impl Neg for Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        -&self
    }
}

#[cfg(feature = "serde")]
impl Serialize for Scalar {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(self.as_bytes())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ScalarVisitor;

        impl<'de> Visitor<'de> for ScalarVisitor {
            type Value = Scalar;

            fn expecting(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                formatter.write_str("a canonical 32-byte little-endian scalar")
            }

            fn visit_bytes<E>(self, v: &[u8]) -> Result<Scalar, E>
            where
                E: serde::de::Error,
            {
                Scalar::from_canonical_bytes(v).map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_bytes(ScalarVisitor)
    }
}

impl Scalar {
    /// The scalar \\(0\\).
    pub const ZERO: Scalar = Scalar { bytes: [0u8; 32] };

    /// The scalar \\(1\\).
    pub const ONE: Scalar = Scalar {
        bytes: [
            1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0, 0,
        ],
    };

    /// Construct a `Scalar` from the given `u64`.
    pub fn from_u64(x: u64) -> Scalar {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&x.to_le_bytes());
        Scalar { bytes }
    }

    /// Attempt to construct a `Scalar` from a canonical 32-byte
    /// little-endian encoding.
    ///
    /// Returns [`Error::InvalidScalarLength`] unless `bytes.len() == 32`,
    /// and [`Error::NonCanonicalScalar`] if the encoded value is
    /// \\( \geq \ell \\).  Whether an input is canonical is treated as
    /// public information.
    pub fn from_canonical_bytes(bytes: &[u8]) -> Result<Scalar, Error> {
        if bytes.len() != 32 {
            return Err(Error::InvalidScalarLength);
        }
        let mut candidate = [0u8; 32];
        candidate.copy_from_slice(bytes);
        if !is_canonical(&candidate) {
            return Err(Error::NonCanonicalScalar);
        }
        Ok(Scalar { bytes: candidate })
    }

    /// Construct a `Scalar` by reducing a 512-bit little-endian integer
    /// modulo \\( \ell \\).
    ///
    /// A uniformly random 64-byte input yields a scalar whose distribution
    /// is within statistical distance \\(2^{-252}\\) of uniform, which is
    /// why protocol-level nonce and challenge derivation goes through this
    /// entry point.
    ///
    /// Returns [`Error::InvalidScalarLength`] unless `bytes.len() == 64`.
    pub fn from_uniform_bytes(bytes: &[u8]) -> Result<Scalar, Error> {
        if bytes.len() != 64 {
            return Err(Error::InvalidScalarLength);
        }
        let mut wide = [0u8; 64];
        wide.copy_from_slice(bytes);
        Ok(Scalar::reduce_wide(&wide))
    }

    /// Construct a `Scalar` by applying X25519 clamping to a 32-byte input
    /// (clear bits 0, 1, 2 of the first byte; clear bit 7 and set bit 6 of
    /// the last) and then reducing modulo \\( \ell \\), per RFC 7748.
    ///
    /// Returns [`Error::InvalidScalarLength`] unless `bytes.len() == 32`.
    ///
    /// # Warning
    ///
    /// Reduction modulo \\( \ell \\) does **not** preserve the
    /// cofactor-clearing property of the clamped bit pattern, so an X25519
    /// implementation cannot be built on top of this function alone.
    pub fn from_clamped_bytes(bytes: &[u8]) -> Result<Scalar, Error> {
        if bytes.len() != 32 {
            return Err(Error::InvalidScalarLength);
        }
        let mut wide = [0u8; 64];
        wide[..32].copy_from_slice(bytes);
        wide[0] &= 0b1111_1000;
        wide[31] &= 0b0111_1111;
        wide[31] |= 0b0100_0000;
        Ok(Scalar::reduce_wide(&wide))
    }

    /// Return a `Scalar` chosen uniformly at random using a user-provided
    /// RNG, by reducing 512 uniform bits modulo \\( \ell \\).
    #[cfg(feature = "rand_core")]
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut scalar_bytes = [0u8; 64];
        rng.fill_bytes(&mut scalar_bytes);
        Scalar::reduce_wide(&scalar_bytes)
    }

    /// Hash a slice of bytes into a scalar.
    ///
    /// Takes a type parameter `D`, which is any `Digest` producing 64 bytes
    /// (512 bits) of output; the output is reduced modulo \\( \ell \\).
    #[cfg(feature = "digest")]
    pub fn hash_from_bytes<D>(input: &[u8]) -> Scalar
    where
        D: Digest<OutputSize = U64>,
    {
        let mut hash = D::new();
        hash.update(input);
        Scalar::from_hash(hash)
    }

    /// Construct a scalar from an existing `Digest` instance.
    ///
    /// Use this instead of [`Scalar::hash_from_bytes`] when it is more
    /// convenient to stream data into the `Digest` than to pass a single
    /// byte slice.
    #[cfg(feature = "digest")]
    pub fn from_hash<D>(hash: D) -> Scalar
    where
        D: Digest<OutputSize = U64>,
    {
        let mut output = [0u8; 64];
        output.copy_from_slice(hash.finalize().as_slice());
        Scalar::reduce_wide(&output)
    }

    /// View this `Scalar` as a sequence of bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Convert this `Scalar` to its canonical 32-byte encoding.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.bytes
    }

    /// Compute the multiplicative inverse \\( s^{-1} = s^{\ell - 2} \\) of
    /// this scalar, using a width-4 sliding window over the fixed addition
    /// chain for \\( \ell - 2 \\).
    ///
    /// The inverse of zero is zero.
    pub fn invert(&self) -> Scalar {
        // table[i] = self^(2*i + 1), so self^k = table[k/2] for odd k.
        let tt = self * self;
        let mut table = [*self; 8];
        for i in 0..7 {
            table[i + 1] = &table[i] * &tt;
        }

        // The digit schedule below is the width-4 sliding-window
        // decomposition of l - 2, runs of doublings folded together.
        let mut s = table[0];
        s = s.pow2k(128);
        s *= &table[0];
        s = s.pow2k(5);
        s *= &table[4];
        s = s.pow2k(4);
        s *= &table[5];
        s = s.pow2k(4);
        s *= &table[6];
        s = s.pow2k(4);
        s *= &table[7];
        s = s.pow2k(5);
        s *= &table[3];
        s = s.pow2k(5);
        s *= &table[7];
        s = s.pow2k(4);
        s *= &table[2];
        s = s.pow2k(4);
        s *= &table[0];
        s = s.pow2k(5);
        s *= &table[7];
        s = s.pow2k(5);
        s *= &table[7];
        s = s.pow2k(5);
        s *= &table[3];
        s = s.pow2k(4);
        s *= &table[1];
        s = s.pow2k(5);
        s *= &table[5];
        s = s.pow2k(6);
        s *= &table[5];
        s = s.pow2k(10);
        s *= &table[4];
        s = s.pow2k(4);
        s *= &table[1];
        s = s.pow2k(5);
        s *= &table[1];
        s = s.pow2k(5);
        s *= &table[1];
        s = s.pow2k(5);
        s *= &table[4];
        s = s.pow2k(4);
        s *= &table[3];
        s = s.pow2k(4);
        s *= &table[1];
        s = s.pow2k(4);
        s *= &table[6];
        s = s.pow2k(4);
        s *= &table[3];
        s = s.pow2k(5);
        s *= &table[4];
        s = s.pow2k(4);
        s *= &table[7];
        s = s.pow2k(5);
        s *= &table[5];

        s
    }

    /// Compute `self^(2^k)` by `k` successive squarings.
    fn pow2k(&self, k: usize) -> Scalar {
        let mut s = *self;
        for _ in 0..k {
            s = &s * &s;
        }
        s
    }

    /// Compute `a*b + c (mod l)`.
    pub(crate) fn multiply_add(a: &Scalar, b: &Scalar, c: &Scalar) -> Scalar {
        UnpackedScalar::multiply_add(&a.unpack(), &b.unpack(), &c.unpack()).pack()
    }

    /// Reduce a 512-bit little-endian integer mod \\( \ell \\).
    pub(crate) fn reduce_wide(input: &[u8; 64]) -> Scalar {
        let mut limbs = [0i64; 24];
        let mask = MASK_21_BITS;

        limbs[0] = mask & load3(&input[0..]);
        limbs[1] = mask & (load4(&input[2..]) >> 5);
        limbs[2] = mask & (load3(&input[5..]) >> 2);
        limbs[3] = mask & (load4(&input[7..]) >> 7);
        limbs[4] = mask & (load4(&input[10..]) >> 4);
        limbs[5] = mask & (load3(&input[13..]) >> 1);
        limbs[6] = mask & (load4(&input[15..]) >> 6);
        limbs[7] = mask & (load3(&input[18..]) >> 3);
        limbs[8] = mask & load3(&input[21..]);
        limbs[9] = mask & (load4(&input[23..]) >> 5);
        limbs[10] = mask & (load3(&input[26..]) >> 2);
        limbs[11] = mask & (load4(&input[28..]) >> 7);
        limbs[12] = mask & (load4(&input[31..]) >> 4);
        limbs[13] = mask & (load3(&input[34..]) >> 1);
        limbs[14] = mask & (load4(&input[36..]) >> 6);
        limbs[15] = mask & (load3(&input[39..]) >> 3);
        limbs[16] = mask & load3(&input[42..]);
        limbs[17] = mask & (load4(&input[44..]) >> 5);
        limbs[18] = mask & (load3(&input[47..]) >> 2);
        limbs[19] = mask & (load4(&input[49..]) >> 7);
        limbs[20] = mask & (load4(&input[52..]) >> 4);
        limbs[21] = mask & (load3(&input[55..]) >> 1);
        limbs[22] = mask & (load4(&input[57..]) >> 6);
        limbs[23] = load4(&input[60..]) >> 3;

        UnpackedScalar::reduce_limbs(&mut limbs).pack()
    }

    /// Unpack this scalar into twelve 21-bit limbs.
    fn unpack(&self) -> UnpackedScalar {
        let mask = MASK_21_BITS;
        let b = &self.bytes;
        UnpackedScalar([
            mask & load3(&b[0..]),
            mask & (load4(&b[2..]) >> 5),
            mask & (load3(&b[5..]) >> 2),
            mask & (load4(&b[7..]) >> 7),
            mask & (load4(&b[10..]) >> 4),
            mask & (load3(&b[13..]) >> 1),
            mask & (load4(&b[15..]) >> 6),
            mask & (load3(&b[18..]) >> 3),
            mask & load3(&b[21..]),
            mask & (load4(&b[23..]) >> 5),
            mask & (load3(&b[26..]) >> 2),
            load4(&b[28..]) >> 7,
        ])
    }

    /// Write this scalar in radix 16, with coefficients in \\([-8, 8)\\),
    /// i.e. compute \\(a\_i\\) such that
    /// $$
    ///    a = a\_0 + a\_1 16\^1 + \cdots + a\_{63} 16\^{63},
    /// $$
    /// with \\(-8 \leq a\_i < 8\\) for \\(0 \leq i < 63\\) and
    /// \\(0 \leq a\_{63} \leq 8\\) (the final digit takes no borrow).
    ///
    /// Precondition: this scalar is reduced, so `self.bytes[31] <= 127`.
    pub(crate) fn to_radix_16(&self) -> [i8; 64] {
        debug_assert!(self.bytes[31] <= 127);
        let mut output = [0i8; 64];

        // Step 1: change radix from 256 (bytes) to 16 (nibbles).
        #[inline(always)]
        fn bot_half(x: u8) -> u8 {
            x & 15
        }
        #[inline(always)]
        fn top_half(x: u8) -> u8 {
            (x >> 4) & 15
        }

        for i in 0..32 {
            output[2 * i] = bot_half(self.bytes[i]) as i8;
            output[2 * i + 1] = top_half(self.bytes[i]) as i8;
        }
        // Since self.bytes[31] <= 127, output[63] <= 7 before recentering.

        // Step 2: recenter coefficients from [0,16) to [-8,8).
        for i in 0..63 {
            let carry = (output[i] + 8) >> 4;
            output[i] -= carry << 4;
            output[i + 1] += carry;
        }
        // output[63] is not recentered; it grows by at most the final carry,
        // so it ends up in [0, 8].

        output
    }

    /// Compute a width-\\(w\\) "Non-Adjacent Form" of this scalar.
    ///
    /// A width-\\(w\\) NAF of a positive integer \\(k\\) is an expression
    /// $$
    /// k = \sum_{i=0}\^m n\_i 2\^i,
    /// $$
    /// where each nonzero coefficient \\(n\_i\\) is odd and bounded by
    /// \\(|n\_i| < 2^{w-1} \\), \\(n\_m\\) is nonzero, and at most one of
    /// any \\(w\\) consecutive coefficients is nonzero.  (Hankerson,
    /// Menezes, Vanstone; def 3.32.)
    ///
    /// The length of the NAF is at most one more than the bit length of
    /// \\(k\\), so for a reduced scalar 256 digits always suffice.
    pub(crate) fn non_adjacent_form(&self, w: usize) -> [i8; 256] {
        // Only w in 2..=8 makes sense for i8 digits; the scalar
        // multiplication code uses w = 5 and w = 8.
        debug_assert!(self.bytes[31] <= 127);
        debug_assert!(w >= 2);
        debug_assert!(w <= 8);

        let mut naf = [0i8; 256];

        let mut x_u64 = [0u64; 5];
        for i in 0..4 {
            x_u64[i] = u64::from_le_bytes(self.bytes[i * 8..(i + 1) * 8].try_into().unwrap());
        }

        let width = 1u64 << w;
        let window_mask = width - 1;

        let mut pos = 0;
        let mut carry = 0u64;
        while pos < 256 {
            // Construct a buffer of bits of the scalar, starting at bit `pos`.
            let u64_idx = pos / 64;
            let bit_idx = pos % 64;
            let bit_buf: u64 = if bit_idx < 64 - w {
                // This window's bits are contained in a single u64.
                x_u64[u64_idx] >> bit_idx
            } else {
                // Combine the current u64's bits with the bits from the next.
                (x_u64[u64_idx] >> bit_idx) | (x_u64[1 + u64_idx] << (64 - bit_idx))
            };

            // Add the carry into the current window.
            let window = carry + (bit_buf & window_mask);

            if window & 1 == 0 {
                // If the window value is even, preserve the carry and advance.
                // Why is the carry preserved?  If carry == 0 and window & 1 == 0,
                // then the next carry should be 0.  If carry == 1 and
                // window & 1 == 0, then bit_buf & 1 == 1 so the next carry
                // should be 1.
                pos += 1;
                continue;
            }

            if window < width / 2 {
                carry = 0;
                naf[pos] = window as i8;
            } else {
                carry = 1;
                naf[pos] = (window as i8).wrapping_sub(width as i8);
            }

            pos += w;
        }

        naf
    }
}

const MASK_21_BITS: i64 = (1 << 21) - 1;

/// Convert three little-endian bytes into an i64.
#[inline]
fn load3(input: &[u8]) -> i64 {
    (input[0] as i64) | ((input[1] as i64) << 8) | ((input[2] as i64) << 16)
}

/// Convert four little-endian bytes into an i64.
#[inline]
fn load4(input: &[u8]) -> i64 {
    (input[0] as i64)
        | ((input[1] as i64) << 8)
        | ((input[2] as i64) << 16)
        | ((input[3] as i64) << 24)
}

/// Check whether a 32-byte little-endian value is below \\( \ell \\).
///
/// Variable time: canonicity of an encoding is public information.
fn is_canonical(bytes: &[u8; 32]) -> bool {
    for i in (0..32).rev() {
        if bytes[i] < constants::L[i] {
            return true;
        } else if bytes[i] > constants::L[i] {
            return false;
        }
    }
    // The value is exactly l, which is not reduced.
    false
}

/// An element of \\(\mathbb Z / \ell\mathbb Z\\) unpacked as twelve 21-bit
/// limbs, the working representation for multiply-and-reduce.
#[derive(Copy, Clone)]
struct UnpackedScalar([i64; 12]);

impl UnpackedScalar {
    /// Pack the limbs back into a (reduced) `Scalar`.
    fn pack(&self) -> Scalar {
        let a = &self.0;
        let mut s = [0u8; 32];

        s[0] = a[0] as u8;
        s[1] = (a[0] >> 8) as u8;
        s[2] = ((a[0] >> 16) | (a[1] << 5)) as u8;
        s[3] = (a[1] >> 3) as u8;
        s[4] = (a[1] >> 11) as u8;
        s[5] = ((a[1] >> 19) | (a[2] << 2)) as u8;
        s[6] = (a[2] >> 6) as u8;
        s[7] = ((a[2] >> 14) | (a[3] << 7)) as u8;
        s[8] = (a[3] >> 1) as u8;
        s[9] = (a[3] >> 9) as u8;
        s[10] = ((a[3] >> 17) | (a[4] << 4)) as u8;
        s[11] = (a[4] >> 4) as u8;
        s[12] = (a[4] >> 12) as u8;
        s[13] = ((a[4] >> 20) | (a[5] << 1)) as u8;
        s[14] = (a[5] >> 7) as u8;
        s[15] = ((a[5] >> 15) | (a[6] << 6)) as u8;
        s[16] = (a[6] >> 2) as u8;
        s[17] = (a[6] >> 10) as u8;
        s[18] = ((a[6] >> 18) | (a[7] << 3)) as u8;
        s[19] = (a[7] >> 5) as u8;
        s[20] = (a[7] >> 13) as u8;
        s[21] = a[8] as u8;
        s[22] = (a[8] >> 8) as u8;
        s[23] = ((a[8] >> 16) | (a[9] << 5)) as u8;
        s[24] = (a[9] >> 3) as u8;
        s[25] = (a[9] >> 11) as u8;
        s[26] = ((a[9] >> 19) | (a[10] << 2)) as u8;
        s[27] = (a[10] >> 6) as u8;
        s[28] = ((a[10] >> 14) | (a[11] << 7)) as u8;
        s[29] = (a[11] >> 1) as u8;
        s[30] = (a[11] >> 9) as u8;
        s[31] = (a[11] >> 17) as u8;

        Scalar { bytes: s }
    }

    /// Compute `a*b + c (mod l)`.
    #[rustfmt::skip] // keep the schoolbook grid readable
    fn multiply_add(a: &UnpackedScalar, b: &UnpackedScalar, c: &UnpackedScalar) -> UnpackedScalar {
        let a = &a.0;
        let b = &b.0;
        let c = &c.0;
        let mut z = [0i64; 24];

        // Products of 21-bit limbs fit in 42 bits, and each column sums at
        // most 12 of them plus a 21-bit addend, so the columns stay far from
        // i64 overflow.
        z[0]  =         c[0] +  a[0]*b[0];
        z[1]  =         c[1] +  a[0]*b[1]  +  a[1]*b[0];
        z[2]  =         c[2] +  a[0]*b[2]  +  a[1]*b[1] +  a[2]*b[0];
        z[3]  =         c[3] +  a[0]*b[3]  +  a[1]*b[2] +  a[2]*b[1] +  a[3]*b[0];
        z[4]  =         c[4] +  a[0]*b[4]  +  a[1]*b[3] +  a[2]*b[2] +  a[3]*b[1] +  a[4]*b[0];
        z[5]  =         c[5] +  a[0]*b[5]  +  a[1]*b[4] +  a[2]*b[3] +  a[3]*b[2] +  a[4]*b[1] +  a[5]*b[0];
        z[6]  =         c[6] +  a[0]*b[6]  +  a[1]*b[5] +  a[2]*b[4] +  a[3]*b[3] +  a[4]*b[2] +  a[5]*b[1] +  a[6]*b[0];
        z[7]  =         c[7] +  a[0]*b[7]  +  a[1]*b[6] +  a[2]*b[5] +  a[3]*b[4] +  a[4]*b[3] +  a[5]*b[2] +  a[6]*b[1] +  a[7]*b[0];
        z[8]  =         c[8] +  a[0]*b[8]  +  a[1]*b[7] +  a[2]*b[6] +  a[3]*b[5] +  a[4]*b[4] +  a[5]*b[3] +  a[6]*b[2] +  a[7]*b[1] +  a[8]*b[0];
        z[9]  =         c[9] +  a[0]*b[9]  +  a[1]*b[8] +  a[2]*b[7] +  a[3]*b[6] +  a[4]*b[5] +  a[5]*b[4] +  a[6]*b[3] +  a[7]*b[2] +  a[8]*b[1] +  a[9]*b[0];
        z[10] =        c[10] +  a[0]*b[10] +  a[1]*b[9] +  a[2]*b[8] +  a[3]*b[7] +  a[4]*b[6] +  a[5]*b[5] +  a[6]*b[4] +  a[7]*b[3] +  a[8]*b[2] +  a[9]*b[1] + a[10]*b[0];
        z[11] =        c[11] +  a[0]*b[11] + a[1]*b[10] +  a[2]*b[9] +  a[3]*b[8] +  a[4]*b[7] +  a[5]*b[6] +  a[6]*b[5] +  a[7]*b[4] +  a[8]*b[3] +  a[9]*b[2] + a[10]*b[1] + a[11]*b[0];
        z[12] =   a[1]*b[11] +  a[2]*b[10] +  a[3]*b[9] +  a[4]*b[8] +  a[5]*b[7] +  a[6]*b[6] +  a[7]*b[5] +  a[8]*b[4] +  a[9]*b[3] + a[10]*b[2] + a[11]*b[1];
        z[13] =   a[2]*b[11] +  a[3]*b[10] +  a[4]*b[9] +  a[5]*b[8] +  a[6]*b[7] +  a[7]*b[6] +  a[8]*b[5] +  a[9]*b[4] + a[10]*b[3] + a[11]*b[2];
        z[14] =   a[3]*b[11] +  a[4]*b[10] +  a[5]*b[9] +  a[6]*b[8] +  a[7]*b[7] +  a[8]*b[6] +  a[9]*b[5] + a[10]*b[4] + a[11]*b[3];
        z[15] =   a[4]*b[11] +  a[5]*b[10] +  a[6]*b[9] +  a[7]*b[8] +  a[8]*b[7] +  a[9]*b[6] + a[10]*b[5] + a[11]*b[4];
        z[16] =   a[5]*b[11] +  a[6]*b[10] +  a[7]*b[9] +  a[8]*b[8] +  a[9]*b[7] + a[10]*b[6] + a[11]*b[5];
        z[17] =   a[6]*b[11] +  a[7]*b[10] +  a[8]*b[9] +  a[9]*b[8] + a[10]*b[7] + a[11]*b[6];
        z[18] =   a[7]*b[11] +  a[8]*b[10] +  a[9]*b[9] + a[10]*b[8] + a[11]*b[7];
        z[19] =   a[8]*b[11] +  a[9]*b[10] + a[10]*b[9] + a[11]*b[8];
        z[20] =   a[9]*b[11] + a[10]*b[10] + a[11]*b[9];
        z[21] =  a[10]*b[11] + a[11]*b[10];
        z[22] =  a[11]*b[11];
        z[23] =  0i64;

        UnpackedScalar::reduce_limbs(&mut z)
    }

    /// Reduce 24 21-bit limbs down to 12, mod
    ///
    ///   l = 2^252 + 27742317777372353535851937790883648493.
    ///
    /// Since 12*21 = 252, limb 12+k carries weight 2^(252 + 21k), and
    ///
    ///   2^252 = -27742317777372353535851937790883648493 (mod l)
    ///         =  - 666643*2^0 - 470296*2^21 - 654183*2^42
    ///            + 997805*2^63 - 136657*2^84 + 683901*2^105  (negated rhs)
    ///
    /// so each high limb is eliminated by adding its multiples of those six
    /// constants into the six limbs below it, with centered carry passes
    /// interleaved to keep every column inside i64.
    fn reduce_limbs(limbs: &mut [i64; 24]) -> UnpackedScalar {
        /// Eliminate the `i`-th limb by folding it onto limbs `i-12..i-6`.
        #[inline]
        fn fold_limb(limbs: &mut [i64; 24], i: usize) {
            limbs[i - 12] += limbs[i] * 666643;
            limbs[i - 11] += limbs[i] * 470296;
            limbs[i - 10] += limbs[i] * 654183;
            limbs[i - 9] -= limbs[i] * 997805;
            limbs[i - 8] += limbs[i] * 136657;
            limbs[i - 7] -= limbs[i] * 683901;
            limbs[i] = 0;
        }
        /// Carry excess from the `i`-th limb into the `(i+1)`-th limb, so
        /// that `0 <= limbs[i] < 2^21` afterwards.
        #[inline]
        fn carry(limbs: &mut [i64; 24], i: usize) {
            let carry: i64 = limbs[i] >> 21;
            limbs[i + 1] += carry;
            limbs[i] -= carry << 21;
        }
        /// Carry excess from the `i`-th limb into the `(i+1)`-th limb, so
        /// that `-2^20 <= limbs[i] < 2^20` afterwards.
        #[inline]
        fn carry_centered(limbs: &mut [i64; 24], i: usize) {
            let carry: i64 = (limbs[i] + (1 << 20)) >> 21;
            limbs[i + 1] += carry;
            limbs[i] -= carry << 21;
        }

        for i in 0..23 {
            carry_centered(limbs, i);
        }
        for i in (1..23).step_by(2) {
            carry_centered(limbs, i);
        }

        fold_limb(limbs, 23);
        fold_limb(limbs, 22);
        fold_limb(limbs, 21);
        fold_limb(limbs, 20);
        fold_limb(limbs, 19);
        fold_limb(limbs, 18);

        for i in (6..18).step_by(2) {
            carry_centered(limbs, i);
        }
        for i in (7..16).step_by(2) {
            carry_centered(limbs, i);
        }

        fold_limb(limbs, 17);
        fold_limb(limbs, 16);
        fold_limb(limbs, 15);
        fold_limb(limbs, 14);
        fold_limb(limbs, 13);
        fold_limb(limbs, 12);

        for i in (0..12).step_by(2) {
            carry_centered(limbs, i);
        }
        for i in (1..12).step_by(2) {
            carry_centered(limbs, i);
        }

        fold_limb(limbs, 12);

        for i in 0..12 {
            carry(limbs, i);
        }

        fold_limb(limbs, 12);

        for i in 0..11 {
            carry(limbs, i);
        }

        UnpackedScalar(limbs[0..12].try_into().unwrap())
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use rand::Rng;

    /// x = 2238329342913194256032495932344128051776374960164957527413114840482143558222
    pub(crate) static X: Scalar = Scalar {
        bytes: [
            0x4e, 0x5a, 0xb4, 0x34, 0x5d, 0x47, 0x08, 0x84, 0x59, 0x13, 0xb4, 0x64, 0x1b, 0xc2,
            0x7d, 0x52, 0x52, 0xa5, 0x85, 0x10, 0x1b, 0xcc, 0x42, 0x44, 0xd4, 0x49, 0xf4, 0xa8,
            0x79, 0xd9, 0xf2, 0x04,
        ],
    };
    /// y = 2592331292931086675770238855846338635550719849568364935475441891787804997264
    pub(crate) static Y: Scalar = Scalar {
        bytes: [
            0x90, 0x76, 0x33, 0xfe, 0x1c, 0x4b, 0x66, 0xa4, 0xa2, 0x8d, 0x2d, 0xd7, 0x67, 0x83,
            0x86, 0xc3, 0x53, 0xd0, 0xde, 0x54, 0x55, 0xd4, 0xfc, 0x9d, 0xe8, 0xef, 0x7a, 0xc3,
            0x1f, 0x35, 0xbb, 0x05,
        ],
    };
    /// z = 5033871415930814945849241457262266927579821285980625165479289807629491019013
    pub(crate) static Z: Scalar = Scalar {
        bytes: [
            0x05, 0x9d, 0x3e, 0x0b, 0x09, 0x26, 0x50, 0x3d, 0xa3, 0x84, 0xa1, 0x3c, 0x92, 0x7a,
            0xc2, 0x06, 0x41, 0x98, 0xcf, 0x34, 0x3a, 0x24, 0xd5, 0xb7, 0xeb, 0x33, 0x6a, 0x2d,
            0xfc, 0x11, 0x21, 0x0b,
        ],
    };
    /// w = x*y + z
    static W: Scalar = Scalar {
        bytes: [
            0x84, 0xfc, 0xbc, 0x4f, 0x78, 0x12, 0xa0, 0x06, 0xd7, 0x91, 0xd9, 0x7a, 0x3a, 0x27,
            0xdd, 0x1e, 0x21, 0x43, 0x45, 0xf7, 0xb1, 0xb9, 0x56, 0x7a, 0x81, 0x30, 0x73, 0x44,
            0x96, 0x85, 0xb5, 0x07,
        ],
    };
    /// x*y = 5690045403673944803228348699031245560686958845067437804563560795922180092780
    static X_TIMES_Y: Scalar = Scalar {
        bytes: [
            0x6c, 0x33, 0x74, 0xa1, 0x89, 0x4f, 0x62, 0x21, 0x0a, 0xaa, 0x2f, 0xe1, 0x86, 0xa6,
            0xf9, 0x2c, 0xe0, 0xaa, 0x75, 0xc2, 0x77, 0x95, 0x81, 0xc2, 0x95, 0xfc, 0x08, 0x17,
            0x9a, 0x73, 0x94, 0x0c,
        ],
    };

    pub(crate) static A_SCALAR: Scalar = Scalar {
        bytes: [
            0x1a, 0x0e, 0x97, 0x8a, 0x90, 0xf6, 0x62, 0x2d, 0x37, 0x47, 0x02, 0x3f, 0x8a, 0xd8,
            0x26, 0x4d, 0xa7, 0x58, 0xaa, 0x1b, 0x88, 0xe0, 0x40, 0xd1, 0x58, 0x9e, 0x7b, 0x7f,
            0x23, 0x76, 0xef, 0x09,
        ],
    };

    static A_NAF_5: [i8; 256] = [
        0, 13, 0, 0, 0, 0, 0, 0, 0, 7, 0, 0, 0, 0, 0, 0, -9, 0, 0, 0, 0, -11, 0, 0, 0, 0, 3, 0,
        0, 0, 0, 1, 0, 0, 0, 0, 9, 0, 0, 0, 0, -5, 0, 0, 0, 0, 0, 0, 3, 0, 0, 0, 0, 11, 0, 0, 0,
        0, 11, 0, 0, 0, 0, 0, -9, 0, 0, 0, 0, 0, -3, 0, 0, 0, 0, 9, 0, 0, 0, 0, 0, 1, 0, 0, 0,
        0, 0, 0, -1, 0, 0, 0, 0, 0, 9, 0, 0, 0, 0, -15, 0, 0, 0, 0, -7, 0, 0, 0, 0, -9, 0, 0, 0,
        0, 0, 5, 0, 0, 0, 0, 13, 0, 0, 0, 0, 0, -3, 0, 0, 0, 0, -11, 0, 0, 0, 0, -7, 0, 0, 0, 0,
        -13, 0, 0, 0, 0, 11, 0, 0, 0, 0, -9, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, -15, 0, 0, 0, 0,
        1, 0, 0, 0, 0, 7, 0, 0, 0, 0, 0, 0, 0, 0, 5, 0, 0, 0, 0, 0, 13, 0, 0, 0, 0, 0, 0, 11, 0,
        0, 0, 0, 0, 15, 0, 0, 0, 0, 0, -9, 0, 0, 0, 0, 0, 0, 0, -1, 0, 0, 0, 0, 0, 0, 0, 7, 0,
        0, 0, 0, 0, -15, 0, 0, 0, 0, 0, 15, 0, 0, 0, 0, 15, 0, 0, 0, 0, 15, 0, 0, 0, 0, 0, 1, 0,
        0, 0, 0,
    ];

    fn random_scalar<R: Rng>(rng: &mut R) -> Scalar {
        // Weighted toward low, high, and edge values, like the
        // original quickcheck generator.
        let mut bytes = [0u8; 32];
        match rng.gen_range(0..100) {
            0 => Scalar::ZERO,
            1 => Scalar::ONE,
            2 => constants::L_MINUS_1,
            3..=4 => {
                // A low scalar in [0, 2^125).
                rng.fill(&mut bytes[..16]);
                bytes[15] &= (1 << 5) - 1;
                Scalar { bytes }
            }
            5..=9 => {
                // A high scalar in [2^252, 2^252 + 2^124).
                rng.fill(&mut bytes[..16]);
                bytes[15] &= (1 << 4) - 1;
                bytes[31] = 1 << 4;
                Scalar { bytes }
            }
            _ => {
                // [0, 2^252), negligibly different from uniform mod l.
                rng.fill(&mut bytes[..]);
                bytes[31] &= (1 << 4) - 1;
                Scalar { bytes }
            }
        }
    }

    fn is_reduced(s: &Scalar) -> bool {
        is_canonical(&s.bytes)
    }

    #[test]
    fn impl_mul() {
        assert_eq!(&X * &Y, X_TIMES_Y);
        assert!(is_reduced(&(&X * &Y)));
    }

    #[test]
    fn multiply_add_vector() {
        assert_eq!(Scalar::multiply_add(&X, &Y, &Z), W);
    }

    #[test]
    fn impl_add_sub_neg() {
        let two = Scalar::from_u64(2);
        assert_eq!(&Scalar::ONE + &Scalar::ONE, two);

        let mut rng = rand::thread_rng();
        for _ in 0..256 {
            let x = random_scalar(&mut rng);
            let y = random_scalar(&mut rng);

            // x - y == -y + x
            let t1 = &x - &y;
            let mut t2 = -&y;
            t2 += &x;
            assert_eq!(t1, t2);
            assert!(is_reduced(&t1));

            // (x+y) == -((-x) + (-y))
            assert_eq!(&x + &y, -&(&(-&x) + &(-&y)));

            // add commutes
            assert_eq!(&x + &y, &y + &x);
        }
    }

    /// `x op= x` is the closest Rust gets to aliasing an output with an
    /// input; the result must match the two-operand form.
    #[test]
    fn aliased_assignment_operators() {
        let mut rng = rand::thread_rng();
        for _ in 0..256 {
            let a = random_scalar(&mut rng);

            let mut x = a;
            x += x;
            assert_eq!(x, &a + &a);

            let mut y = a;
            y *= y;
            assert_eq!(y, &a * &a);

            let mut z = a;
            z -= z;
            assert_eq!(z, Scalar::ZERO);
        }
    }

    #[test]
    fn mul_distributes_over_add() {
        let mut rng = rand::thread_rng();
        for _ in 0..256 {
            let x = random_scalar(&mut rng);
            let y = random_scalar(&mut rng);
            let z = random_scalar(&mut rng);

            let t1 = &(&x + &y) * &z;
            let t2 = &(&x * &z) + &(&y * &z);
            assert_eq!(t1, t2);
            assert!(is_reduced(&t1));
            assert!(is_reduced(&t2));
        }
    }

    #[test]
    fn canonical_decoding() {
        // Canonical encoding round-trips.
        let s = Scalar::from_canonical_bytes(X.as_bytes()).unwrap();
        assert_eq!(s, X);

        // l-1 is canonical.
        assert!(Scalar::from_canonical_bytes(constants::L_MINUS_1.as_bytes()).is_ok());

        // l itself is not.
        assert_eq!(
            Scalar::from_canonical_bytes(&constants::L),
            Err(Error::NonCanonicalScalar)
        );

        // Neither is l-1 with the high bit set.
        let mut bytes = constants::L_MINUS_1.to_bytes();
        bytes[31] |= 0x80;
        assert_eq!(
            Scalar::from_canonical_bytes(&bytes),
            Err(Error::NonCanonicalScalar)
        );

        // Wrong lengths are rejected before canonicity is considered.
        assert_eq!(
            Scalar::from_canonical_bytes(&[0u8; 31]),
            Err(Error::InvalidScalarLength)
        );
        assert_eq!(
            Scalar::from_uniform_bytes(&[0u8; 32]),
            Err(Error::InvalidScalarLength)
        );
        assert_eq!(
            Scalar::from_clamped_bytes(&[0u8; 64]),
            Err(Error::InvalidScalarLength)
        );
    }

    #[test]
    fn uniform_reduction_vector() {
        // bignum = x + 2^256 * x
        let mut bignum = [0u8; 64];
        bignum[..32].copy_from_slice(X.as_bytes());
        bignum[32..].copy_from_slice(X.as_bytes());
        // 3958878930004874126169954872055634648693766179881526445624823978500314864344
        // = x + 2^256 x (mod l)
        let expected = Scalar {
            bytes: [
                216, 154, 179, 139, 210, 121, 2, 71, 69, 99, 158, 216, 23, 173, 63, 100, 204, 0,
                91, 50, 219, 153, 57, 249, 28, 82, 31, 197, 100, 165, 192, 8,
            ],
        };
        assert_eq!(Scalar::from_uniform_bytes(&bignum).unwrap(), expected);
    }

    #[test]
    fn uniform_reduction_is_reduced() {
        let mut rng = rand::thread_rng();
        for _ in 0..256 {
            let mut wide = [0u8; 64];
            rng.fill(&mut wide[..]);
            assert!(is_reduced(&Scalar::from_uniform_bytes(&wide).unwrap()));
        }
    }

    #[test]
    fn clamped_is_reduced() {
        let mut rng = rand::thread_rng();
        for _ in 0..256 {
            let mut bytes = [0u8; 32];
            rng.fill(&mut bytes[..]);
            assert!(is_reduced(&Scalar::from_clamped_bytes(&bytes).unwrap()));
        }
    }

    #[test]
    fn invert() {
        let inv_x = X.invert();
        assert_eq!(&inv_x * &X, Scalar::ONE);
        assert!(is_reduced(&inv_x));

        let mut rng = rand::thread_rng();
        for _ in 0..32 {
            let x = random_scalar(&mut rng);
            if x == Scalar::ZERO {
                continue;
            }
            assert_eq!(&x.invert() * &x, Scalar::ONE);
        }
    }

    #[test]
    fn invert_zero_is_zero() {
        assert_eq!(Scalar::ZERO.invert(), Scalar::ZERO);
    }

    #[test]
    fn neg_twice_is_identity() {
        assert_eq!(-&(-&X), X);
        assert_eq!(-&Scalar::ZERO, Scalar::ZERO);
    }

    #[test]
    fn non_adjacent_form_vector() {
        let naf = A_SCALAR.non_adjacent_form(5);
        for i in 0..256 {
            assert_eq!(naf[i], A_NAF_5[i]);
        }
    }

    #[test]
    fn non_adjacent_form_reconstructs_and_is_sparse() {
        let mut rng = rand::thread_rng();
        for &w in &[5usize, 8] {
            for _ in 0..64 {
                let x = random_scalar(&mut rng);
                let naf = x.non_adjacent_form(w);

                // Digits are zero or odd, with |digit| < 2^(w-1), and at
                // least w-1 zeros follow every nonzero digit.
                let bound = 1i8 << (w - 1);
                for i in 0..256 {
                    if naf[i] != 0 {
                        assert_eq!(naf[i] & 1, 1);
                        assert!(naf[i] < bound && naf[i] > -bound);
                        for j in 1..w.min(255 - i) {
                            assert_eq!(naf[i + j], 0);
                        }
                    }
                }

                // sum(naf[i] * 2^i) == x (computed mod l).
                let mut acc = Scalar::ZERO;
                for i in (0..256).rev() {
                    acc = &acc + &acc;
                    if naf[i] > 0 {
                        acc = &acc + &Scalar::from_u64(naf[i] as u64);
                    } else if naf[i] < 0 {
                        acc = &acc - &Scalar::from_u64(-naf[i] as u64);
                    }
                }
                assert_eq!(acc, x);
            }
        }
    }

    #[test]
    fn radix_16_reconstructs() {
        let mut rng = rand::thread_rng();
        for _ in 0..64 {
            let x = random_scalar(&mut rng);
            let digits = x.to_radix_16();

            for (i, &d) in digits.iter().enumerate() {
                if i < 63 {
                    assert!((-8..=8).contains(&d));
                } else {
                    assert!((0..=15).contains(&d));
                }
            }

            // sum(digits[i] * 16^i) == x (computed mod l).
            let sixteen = Scalar::from_u64(16);
            let mut acc = Scalar::ZERO;
            for i in (0..64).rev() {
                acc = &acc * &sixteen;
                if digits[i] > 0 {
                    acc = &acc + &Scalar::from_u64(digits[i] as u64);
                } else if digits[i] < 0 {
                    acc = &acc - &Scalar::from_u64(-digits[i] as u64);
                }
            }
            assert_eq!(acc, x);
        }
    }

    #[test]
    fn constant_time_equality() {
        assert_eq!(Scalar::ONE.ct_eq(&constants::L_MINUS_1).unwrap_u8(), 0);
        assert_eq!(
            constants::L_MINUS_1.ct_eq(&constants::L_MINUS_1).unwrap_u8(),
            1
        );
    }

    #[test]
    #[cfg(feature = "digest")]
    fn hash_from_bytes_is_reduced() {
        use sha2::Sha512;
        let s = Scalar::hash_from_bytes::<Sha512>(b"test vector input");
        assert!(is_reduced(&s));
    }
}
