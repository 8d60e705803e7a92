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

//! Field arithmetic modulo \\(p = 2^{255} - 19\\), using \\(64\\)-bit limbs
//! with \\(128\\)-bit products.
//!
//! On x86_64 the multiplications lower to `MUL` instructions taking 64-bit
//! inputs and producing 128-bit outputs; on other 64-bit platforms the story
//! is similar.  Field elements here are **not** a cryptographically secure
//! group on their own; the type exists to carry `Point` coordinates and to
//! let protocol crates do coordinate-level work.

use core::fmt::Debug;
use core::ops::Neg;
use core::ops::{Add, AddAssign};
use core::ops::{Mul, MulAssign};
use core::ops::{Sub, SubAssign};

use subtle::Choice;
use subtle::ConditionallyNegatable;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::constants;
use crate::errors::Error;

pub(crate) const LOW_51_BIT_MASK: u64 = (1u64 << 51) - 1;

/// A `FieldElement` represents an element of the field
/// \\( \mathbb Z / (2^{255} - 19) \\).
///
/// In memory a `FieldElement` is five `u64` limbs in radix \\(2^{51}\\),
/// i.e. the represented value is
/// `l[0] + l[1]*2^51 + l[2]*2^102 + l[3]*2^153 + l[4]*2^204`.
/// Between operations the limbs stay below \\(2^{52}\\); operations accept
/// inputs with limbs up to \\(2^{54}\\) and re-establish the tighter bound
/// on output.
#[derive(Copy, Clone)]
pub struct FieldElement(pub(crate) [u64; 5]);

impl Debug for FieldElement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "FieldElement({:?})", &self.0[..])
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for FieldElement {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl<'b> AddAssign<&'b FieldElement> for FieldElement {
    fn add_assign(&mut self, rhs: &'b FieldElement) {
        let result = (self as &FieldElement) + rhs;
        self.0 = result.0;
    }
}

impl<'a, 'b> Add<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn add(self, rhs: &'b FieldElement) -> FieldElement {
        FieldElement::reduce([
            self.0[0] + rhs.0[0],
            self.0[1] + rhs.0[1],
            self.0[2] + rhs.0[2],
            self.0[3] + rhs.0[3],
            self.0[4] + rhs.0[4],
        ])
    }
}

define_add_variants!(LHS = FieldElement, RHS = FieldElement, Output = FieldElement);
define_add_assign_variants!(LHS = FieldElement, RHS = FieldElement);

impl<'b> SubAssign<&'b FieldElement> for FieldElement {
    fn sub_assign(&mut self, rhs: &'b FieldElement) {
        let result = (self as &FieldElement) - rhs;
        self.0 = result.0;
    }
}

impl<'a, 'b> Sub<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn sub(self, rhs: &'b FieldElement) -> FieldElement {
        // Add 2*p before subtracting, to keep the limbs from underflowing:
        // 2*p = (2^52 - 38) + (2^52 - 2)*(2^51 + 2^102 + 2^153 + 2^204).
        // This is enough headroom as long as rhs's limbs are below 2^52,
        // which holds for the output of every operation except `mul32`.
        FieldElement::reduce([
            (self.0[0] + 4503599627370458u64) - rhs.0[0],
            (self.0[1] + 4503599627370494u64) - rhs.0[1],
            (self.0[2] + 4503599627370494u64) - rhs.0[2],
            (self.0[3] + 4503599627370494u64) - rhs.0[3],
            (self.0[4] + 4503599627370494u64) - rhs.0[4],
        ])
    }
}

define_sub_variants!(LHS = FieldElement, RHS = FieldElement, Output = FieldElement);
define_sub_assign_variants!(LHS = FieldElement, RHS = FieldElement);

impl<'b> MulAssign<&'b FieldElement> for FieldElement {
    fn mul_assign(&mut self, rhs: &'b FieldElement) {
        let result = (self as &FieldElement) * rhs;
        self.0 = result.0;
    }
}

impl<'a, 'b> Mul<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn mul(self, rhs: &'b FieldElement) -> FieldElement {
        /// Multiply two 64-bit integers with 128 bits of output.
        #[inline(always)]
        fn m(x: u64, y: u64) -> u128 {
            (x as u128) * (y as u128)
        }

        let a: &[u64; 5] = &self.0;
        let b: &[u64; 5] = &rhs.0;

        // 64-bit precomputations to avoid 128-bit multiplications.
        //
        // Cross terms landing above limb 4 wrap around via
        // 2^255 = 19 (mod p), so they are premultiplied by 19.
        let b1_19 = b[1] * 19;
        let b2_19 = b[2] * 19;
        let b3_19 = b[3] * 19;
        let b4_19 = b[4] * 19;

        // Multiply to get 128-bit coefficients of output.
        let     c0: u128 = m(a[0], b[0]) + m(a[4], b1_19) + m(a[3], b2_19) + m(a[2], b3_19) + m(a[1], b4_19);
        let mut c1: u128 = m(a[1], b[0]) + m(a[0], b[1])  + m(a[4], b2_19) + m(a[3], b3_19) + m(a[2], b4_19);
        let mut c2: u128 = m(a[2], b[0]) + m(a[1], b[1])  + m(a[0], b[2])  + m(a[4], b3_19) + m(a[3], b4_19);
        let mut c3: u128 = m(a[3], b[0]) + m(a[2], b[1])  + m(a[1], b[2])  + m(a[0], b[3])  + m(a[4], b4_19);
        let mut c4: u128 = m(a[4], b[0]) + m(a[3], b[1])  + m(a[2], b[2])  + m(a[1], b[3])  + m(a[0], b[4]);

        // Each c[i] is a sum of 5 products of limbs below 2^54, scaled by at
        // most 19, so c[i] < 5 * 19 * 2^108 < 2^115 — comfortably inside
        // u128, and the carries (c[i] >> 51) fit in u64.
        debug_assert!(a[0] < (1 << 54));
        debug_assert!(b[0] < (1 << 54));
        debug_assert!(a[1] < (1 << 54));
        debug_assert!(b[1] < (1 << 54));
        debug_assert!(a[2] < (1 << 54));
        debug_assert!(b[2] < (1 << 54));
        debug_assert!(a[3] < (1 << 54));
        debug_assert!(b[3] < (1 << 54));
        debug_assert!(a[4] < (1 << 54));
        debug_assert!(b[4] < (1 << 54));

        // Carry the 128-bit coefficients down to 64-bit limbs.  Rebinding
        // the names after each carry tells LLVM the values have shrunk, so
        // it can allocate registers efficiently.
        c1 += (c0 >> 51) as u128;
        let mut out0: u64 = (c0 as u64) & LOW_51_BIT_MASK;
        c2 += (c1 >> 51) as u128;
        let out1: u64 = (c1 as u64) & LOW_51_BIT_MASK;
        c3 += (c2 >> 51) as u128;
        let out2: u64 = (c2 as u64) & LOW_51_BIT_MASK;
        c4 += (c3 >> 51) as u128;
        let out3: u64 = (c3 as u64) & LOW_51_BIT_MASK;
        out0 += ((c4 >> 51) as u64) * 19;
        let out4: u64 = (c4 as u64) & LOW_51_BIT_MASK;

        FieldElement::reduce([out0, out1, out2, out3, out4])
    }
}

define_mul_variants!(LHS = FieldElement, RHS = FieldElement, Output = FieldElement);
define_mul_assign_variants!(LHS = FieldElement, RHS = FieldElement);

impl<'a> Neg for &'a FieldElement {
    type Output = FieldElement;
    fn neg(self) -> FieldElement {
        &FieldElement::ZERO - self
    }
}

impl Neg for FieldElement {
    type Output = FieldElement;
    fn neg(self) -> FieldElement {
        -&self
    }
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &FieldElement, b: &FieldElement, choice: Choice) -> FieldElement {
        FieldElement([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
            u64::conditional_select(&a.0[4], &b.0[4], choice),
        ])
    }

    fn conditional_assign(&mut self, other: &FieldElement, choice: Choice) {
        self.0[0].conditional_assign(&other.0[0], choice);
        self.0[1].conditional_assign(&other.0[1], choice);
        self.0[2].conditional_assign(&other.0[2], choice);
        self.0[3].conditional_assign(&other.0[3], choice);
        self.0[4].conditional_assign(&other.0[4], choice);
    }

    fn conditional_swap(a: &mut FieldElement, b: &mut FieldElement, choice: Choice) {
        u64::conditional_swap(&mut a.0[0], &mut b.0[0], choice);
        u64::conditional_swap(&mut a.0[1], &mut b.0[1], choice);
        u64::conditional_swap(&mut a.0[2], &mut b.0[2], choice);
        u64::conditional_swap(&mut a.0[3], &mut b.0[3], choice);
        u64::conditional_swap(&mut a.0[4], &mut b.0[4], choice);
    }
}

impl ConstantTimeEq for FieldElement {
    /// Test equality between two `FieldElement`s by comparing their
    /// canonical encodings.
    fn ct_eq(&self, other: &FieldElement) -> Choice {
        self.to_bytes().ct_eq(&other.to_bytes())
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &FieldElement) -> bool {
        self.ct_eq(other).into()
    }
}
impl Eq for FieldElement {}

impl FieldElement {
    /// The zero element.  All-zero limbs are a valid representation.
    pub const ZERO: FieldElement = FieldElement([0, 0, 0, 0, 0]);
    /// The one element.
    pub const ONE: FieldElement = FieldElement([1, 0, 0, 0, 0]);
    /// The element \\(-1 = p - 1\\), in canonical limbs.
    pub const MINUS_ONE: FieldElement = FieldElement([
        2251799813685228,
        2251799813685247,
        2251799813685247,
        2251799813685247,
        2251799813685247,
    ]);

    /// Given 64-bit input limbs, carry once to enforce the bound
    /// `l[1..5] < 2^51`, `l[0] < 2^51 + 19*2^13`.
    #[inline(always)]
    pub(crate) fn reduce(mut limbs: [u64; 5]) -> FieldElement {
        limbs[1] += limbs[0] >> 51;
        limbs[0] &= LOW_51_BIT_MASK;
        limbs[2] += limbs[1] >> 51;
        limbs[1] &= LOW_51_BIT_MASK;
        limbs[3] += limbs[2] >> 51;
        limbs[2] &= LOW_51_BIT_MASK;
        limbs[4] += limbs[3] >> 51;
        limbs[3] &= LOW_51_BIT_MASK;
        limbs[0] += (limbs[4] >> 51) * 19;
        limbs[4] &= LOW_51_BIT_MASK;

        FieldElement(limbs)
    }

    /// Load a `FieldElement` from the low 255 bits of a 256-bit input.
    ///
    /// Consistently with RFC 7748 (and laxer than RFC 8032), the most
    /// significant bit of the input is ignored, and the non-canonical values
    /// \\(p\\) through \\(2^{255} - 1\\) are accepted; they decode to their
    /// residue and re-encode to the canonical form.
    pub fn from_bytes(bytes: &[u8; 32]) -> FieldElement {
        #[inline(always)]
        fn load8(input: &[u8]) -> u64 {
            (input[0] as u64)
                | ((input[1] as u64) << 8)
                | ((input[2] as u64) << 16)
                | ((input[3] as u64) << 24)
                | ((input[4] as u64) << 32)
                | ((input[5] as u64) << 40)
                | ((input[6] as u64) << 48)
                | ((input[7] as u64) << 56)
        }

        FieldElement([
            // load bits [  0, 64), no shift
            load8(&bytes[0..]) & LOW_51_BIT_MASK,
            // load bits [ 48,112), shift to [ 51,112)
            (load8(&bytes[6..]) >> 3) & LOW_51_BIT_MASK,
            // load bits [ 96,160), shift to [102,160)
            (load8(&bytes[12..]) >> 6) & LOW_51_BIT_MASK,
            // load bits [152,216), shift to [153,216)
            (load8(&bytes[19..]) >> 1) & LOW_51_BIT_MASK,
            // load bits [192,256), shift to [204,255)
            (load8(&bytes[24..]) >> 12) & LOW_51_BIT_MASK,
        ])
    }

    /// Like [`FieldElement::from_bytes`], but taking an arbitrary slice.
    ///
    /// Returns [`Error::InvalidFieldElementLength`] unless `bytes.len() == 32`.
    pub fn from_slice(bytes: &[u8]) -> Result<FieldElement, Error> {
        if bytes.len() != 32 {
            return Err(Error::InvalidFieldElementLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(bytes);
        Ok(FieldElement::from_bytes(&arr))
    }

    /// Serialize this `FieldElement` to its canonical 32-byte little-endian
    /// encoding.  The high bit of the last byte is always zero.
    pub fn to_bytes(&self) -> [u8; 32] {
        // First carry down to l[i] < 2^51, giving a value below 2^255; then
        // subtract p if needed to land in [0, p).
        let mut limbs = FieldElement::reduce(self.0).0;

        // Write h = limbs[0] + limbs[1]*2^51 + ... + limbs[4]*2^204, and
        // h = q*p + r with 0 <= r < p.  Since h < 2^255, q is 0 or 1, and
        // h >= p exactly when h + 19 >= 2^255, so q is the carry out of
        // bit 255 of the speculative addition h + 19.
        let mut q = (limbs[0] + 19) >> 51;
        q = (limbs[1] + q) >> 51;
        q = (limbs[2] + q) >> 51;
        q = (limbs[3] + q) >> 51;
        q = (limbs[4] + q) >> 51;

        // r = h - q*p = h + 19*q - q*2^255; the 2^255 term falls off the top
        // limb when we mask below.
        limbs[0] += 19 * q;

        limbs[1] += limbs[0] >> 51;
        limbs[0] &= LOW_51_BIT_MASK;
        limbs[2] += limbs[1] >> 51;
        limbs[1] &= LOW_51_BIT_MASK;
        limbs[3] += limbs[2] >> 51;
        limbs[2] &= LOW_51_BIT_MASK;
        limbs[4] += limbs[3] >> 51;
        limbs[3] &= LOW_51_BIT_MASK;
        limbs[4] &= LOW_51_BIT_MASK;

        let mut s = [0u8; 32];
        s[0] = limbs[0] as u8;
        s[1] = (limbs[0] >> 8) as u8;
        s[2] = (limbs[0] >> 16) as u8;
        s[3] = (limbs[0] >> 24) as u8;
        s[4] = (limbs[0] >> 32) as u8;
        s[5] = (limbs[0] >> 40) as u8;
        s[6] = ((limbs[0] >> 48) | (limbs[1] << 3)) as u8;
        s[7] = (limbs[1] >> 5) as u8;
        s[8] = (limbs[1] >> 13) as u8;
        s[9] = (limbs[1] >> 21) as u8;
        s[10] = (limbs[1] >> 29) as u8;
        s[11] = (limbs[1] >> 37) as u8;
        s[12] = ((limbs[1] >> 45) | (limbs[2] << 6)) as u8;
        s[13] = (limbs[2] >> 2) as u8;
        s[14] = (limbs[2] >> 10) as u8;
        s[15] = (limbs[2] >> 18) as u8;
        s[16] = (limbs[2] >> 26) as u8;
        s[17] = (limbs[2] >> 34) as u8;
        s[18] = (limbs[2] >> 42) as u8;
        s[19] = ((limbs[2] >> 50) | (limbs[3] << 1)) as u8;
        s[20] = (limbs[3] >> 7) as u8;
        s[21] = (limbs[3] >> 15) as u8;
        s[22] = (limbs[3] >> 23) as u8;
        s[23] = (limbs[3] >> 31) as u8;
        s[24] = (limbs[3] >> 39) as u8;
        s[25] = ((limbs[3] >> 47) | (limbs[4] << 4)) as u8;
        s[26] = (limbs[4] >> 4) as u8;
        s[27] = (limbs[4] >> 12) as u8;
        s[28] = (limbs[4] >> 20) as u8;
        s[29] = (limbs[4] >> 28) as u8;
        s[30] = (limbs[4] >> 36) as u8;
        s[31] = (limbs[4] >> 44) as u8;

        debug_assert!((s[31] & 0b1000_0000u8) == 0u8);

        s
    }

    #[inline(always)]
    fn square_inner(&self) -> [u64; 5] {
        /// Multiply two 64-bit integers with 128 bits of output.
        #[inline(always)]
        fn m(x: u64, y: u64) -> u128 {
            (x as u128) * (y as u128)
        }

        let a: &[u64; 5] = &self.0;

        let a3_19 = 19 * a[3];
        let a4_19 = 19 * a[4];

        // Same shape as `Mul`, with the off-diagonal terms doubled.
        let     c0: u128 = m(a[0], a[0]) + 2 * (m(a[1], a4_19) + m(a[2], a3_19));
        let mut c1: u128 = m(a[3], a3_19) + 2 * (m(a[0], a[1]) + m(a[2], a4_19));
        let mut c2: u128 = m(a[1], a[1]) + 2 * (m(a[0], a[2]) + m(a[4], a3_19));
        let mut c3: u128 = m(a[4], a4_19) + 2 * (m(a[0], a[3]) + m(a[1], a[2]));
        let mut c4: u128 = m(a[2], a[2]) + 2 * (m(a[0], a[4]) + m(a[1], a[3]));

        debug_assert!(a[0] < (1 << 54));
        debug_assert!(a[1] < (1 << 54));
        debug_assert!(a[2] < (1 << 54));
        debug_assert!(a[3] < (1 << 54));
        debug_assert!(a[4] < (1 << 54));

        c1 += (c0 >> 51) as u128;
        let mut out0: u64 = (c0 as u64) & LOW_51_BIT_MASK;
        c2 += (c1 >> 51) as u128;
        let out1: u64 = (c1 as u64) & LOW_51_BIT_MASK;
        c3 += (c2 >> 51) as u128;
        let out2: u64 = (c2 as u64) & LOW_51_BIT_MASK;
        c4 += (c3 >> 51) as u128;
        let out3: u64 = (c3 as u64) & LOW_51_BIT_MASK;
        out0 += ((c4 >> 51) as u64) * 19;
        let out4: u64 = (c4 as u64) & LOW_51_BIT_MASK;

        [out0, out1, out2, out3, out4]
    }

    /// Compute `self^2`.
    pub fn square(&self) -> FieldElement {
        FieldElement::reduce(self.square_inner())
    }

    /// Compute `self^(2^k)` by `k` successive squarings.
    ///
    /// Requires `k > 0`.
    pub(crate) fn pow2k(&self, k: u32) -> FieldElement {
        debug_assert!(k > 0);
        let mut z = self.square();
        for _ in 1..k {
            z = z.square();
        }
        z
    }

    /// Multiply by a `u32` scalar.
    ///
    /// The output limbs are only *almost* in bounds: they can exceed
    /// \\(2^{52}\\), so callers needing tight bounds must follow with an
    /// operation that carry-propagates (any add, subtract, or multiply, or
    /// an encoding).
    pub fn mul32(&self, y: u32) -> FieldElement {
        #[inline(always)]
        fn mul51(l: u64, y: u32) -> (u64, u64) {
            let v = (l as u128) * (y as u128);
            ((v as u64) & LOW_51_BIT_MASK, (v >> 51) as u64)
        }

        let (x0_lo, x0_hi) = mul51(self.0[0], y);
        let (x1_lo, x1_hi) = mul51(self.0[1], y);
        let (x2_lo, x2_hi) = mul51(self.0[2], y);
        let (x3_lo, x3_hi) = mul51(self.0[3], y);
        let (x4_lo, x4_hi) = mul51(self.0[4], y);

        // The hi parts are at most 32 bits plus prior excess, so the sums
        // stay well inside u64 and the carry pass can be skipped.
        FieldElement([
            x0_lo + 19 * x4_hi,
            x1_lo + x0_hi,
            x2_lo + x1_hi,
            x3_lo + x2_hi,
            x4_lo + x3_hi,
        ])
    }

    /// Returns the low bit of the canonical encoding, as a `Choice`.
    ///
    /// This is the "sign" convention used by the point compression format.
    pub fn is_negative(&self) -> Choice {
        let bytes = self.to_bytes();
        (bytes[0] & 1).into()
    }

    /// Returns `Choice(1)` iff this element is zero.
    pub fn is_zero(&self) -> Choice {
        let zero = [0u8; 32];
        self.to_bytes().ct_eq(&zero)
    }

    /// Compute `|self|`: `self` if its encoding has the low bit clear,
    /// `-self` otherwise.
    pub fn abs(&self) -> FieldElement {
        let mut r = *self;
        r.conditional_negate(self.is_negative());
        r
    }

    /// Compute `self^(2^250 - 1)` along with the intermediate
    /// `self^(2^3 + 2^1 + 2^0) = self^11`, sharing the tail of the
    /// inversion and \\( (p-5)/8 \\) addition chains.
    #[rustfmt::skip] // keep the exponent bookkeeping column-aligned
    fn pow22501(&self) -> (FieldElement, FieldElement) {
        // Each t_i below is this element raised to the power whose binary
        // expansion has ones exactly at the listed bit positions.
        let t0  = self.square();            // 1
        let t1  = t0.square().square();     // 3
        let t2  = self * &t1;               // 3,0
        let t3  = &t0 * &t2;                // 3,1,0
        let t4  = t3.square();              // 4,2,1
        let t5  = &t2 * &t4;                // 4,3,2,1,0
        let t6  = t5.pow2k(5);              // 9,8,7,6,5
        let t7  = &t6 * &t5;                // 9..0
        let t8  = t7.pow2k(10);             // 19..10
        let t9  = &t8 * &t7;                // 19..0
        let t10 = t9.pow2k(20);             // 39..20
        let t11 = &t10 * &t9;               // 39..0
        let t12 = t11.pow2k(10);            // 49..10
        let t13 = &t12 * &t7;               // 49..0
        let t14 = t13.pow2k(50);            // 99..50
        let t15 = &t14 * &t13;              // 99..0
        let t16 = t15.pow2k(100);           // 199..100
        let t17 = &t16 * &t15;              // 199..0
        let t18 = t17.pow2k(50);            // 249..50
        let t19 = &t18 * &t13;              // 249..0

        (t19, t3)
    }

    /// Compute `self^-1 = self^(p-2)`, using the standard chain of 255
    /// squarings and 11 multiplications.
    ///
    /// The inverse of zero is zero: inputs with no inverse quietly map to
    /// zero rather than erroring, which is what the point-decoding and
    /// Montgomery-conversion paths rely on.
    pub fn invert(&self) -> FieldElement {
        // p - 2 = 2^255 - 21, with binary expansion 11...11101011.
        let (t19, t3) = self.pow22501(); // t19: 249..0 ; t3: 3,1,0
        let t20 = t19.pow2k(5);          // 254..5
        &t20 * &t3                       // 254..5,3,1,0
    }

    /// Raise this field element to the power \\( (p-5)/8 = 2^{252} - 3 \\).
    ///
    /// This is the exponentiation at the core of [`FieldElement::sqrt_ratio`].
    pub fn pow_p58(&self) -> FieldElement {
        let (t19, _) = self.pow22501(); // 249..0
        let t20 = t19.pow2k(2);         // 251..2
        self * &t20                     // 251..2,0
    }

    /// Compute the nonnegative square root of `u/v`, if it exists.
    ///
    /// Returns `(r, was_square)` where
    ///
    /// - `(sqrt(u/v), Choice(1))` if `v` is nonzero and `u/v` is square;
    /// - `(zero, Choice(1))` if `u` is zero;
    /// - `(zero, Choice(0))` if `v` is zero and `u` is nonzero;
    /// - `(sqrt(i*u/v), Choice(0))` if `u/v` is nonsquare (so `i*u/v` is),
    ///   following Section 4.3 of draft-irtf-cfrg-ristretto255-decaf448.
    ///
    /// In all cases `r` has its low bit clear.  All case selection is done
    /// with masked moves; there is no branching on the field values.
    pub fn sqrt_ratio(u: &FieldElement, v: &FieldElement) -> (FieldElement, Choice) {
        // r = (u * v^3) * (u * v^7)^((p-5)/8)
        let v2 = v.square();
        let uv3 = &(u * &v2) * v;
        let uv7 = &uv3 * &v2.square();
        let mut r = &uv3 * &uv7.pow_p58();

        let check = v * &r.square();

        let u_neg = -u;
        let correct_sign_sqrt = check.ct_eq(u);
        let flipped_sign_sqrt = check.ct_eq(&u_neg);
        let flipped_sign_sqrt_i = check.ct_eq(&(&u_neg * &constants::SQRT_M1));

        // If v*r^2 = -u or -u*sqrt(-1), multiply r by sqrt(-1) to land on
        // the square root of either u/v or i*u/v.
        let r_prime = &r * &constants::SQRT_M1;
        r.conditional_assign(&r_prime, flipped_sign_sqrt | flipped_sign_sqrt_i);

        // Choose the nonnegative representative.
        let r = r.abs();

        (r, correct_sign_sqrt | flipped_sign_sqrt)
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
