// -*- mode: rust; -*-
//
// This file is part of ed25519-ristretto.
// See LICENSE for licensing information.

//! Field arithmetic modulo \\(p = 2^{255} - 19\\), using 64-bit limbs with
//! 128-bit products.
//!
//! A `FieldElement` is represented in radix \\(2^{51}\\) as five `u64`s;
//! the coefficients are allowed to grow up to \\(2^{54}\\) between
//! reductions modulo \\(p\\), which is what lets additions and
//! subtractions skip carry propagation entirely.

use core::fmt::Debug;
use core::ops::{Add, Mul, Neg, Sub};

use subtle::Choice;
use subtle::ConditionallyNegatable;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use zeroize::Zeroize;

use crate::constants;

const LOW_51_BIT_MASK: u64 = (1u64 << 51) - 1;

/// An element of the field \\(\mathbb Z / (2^{255} - 19)\\).
#[derive(Copy, Clone)]
pub(crate) struct FieldElement(pub(crate) [u64; 5]);

impl Debug for FieldElement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "FieldElement({:?})", &self.0[..])
    }
}

impl Zeroize for FieldElement {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Eq for FieldElement {}

impl PartialEq for FieldElement {
    fn eq(&self, other: &FieldElement) -> bool {
        self.ct_eq(other).into()
    }
}

impl ConstantTimeEq for FieldElement {
    /// The internal representation is not canonical, so field elements
    /// are normalized to wire format before comparison.
    fn ct_eq(&self, other: &FieldElement) -> Choice {
        self.to_bytes().ct_eq(&other.to_bytes())
    }
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(
        a: &FieldElement,
        b: &FieldElement,
        choice: Choice,
    ) -> FieldElement {
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
}

/// u64 * u64 = u128 multiply helper
#[inline(always)]
fn m(x: u64, y: u64) -> u128 {
    (x as u128) * (y as u128)
}

impl<'a, 'b> Add<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn add(self, rhs: &'b FieldElement) -> FieldElement {
        let mut sum = *self;
        for i in 0..5 {
            sum.0[i] += rhs.0[i];
        }
        sum
    }
}

impl<'a, 'b> Sub<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn sub(self, rhs: &'b FieldElement) -> FieldElement {
        // To avoid underflow, first add a multiple of p.  16p is larger
        // than any 54-bit rhs limb:
        //
        // 36028797018963664 = 2^55 - 304 = 16 * (2^51 - 19)
        // 36028797018963952 = 2^55 - 16  = 16 * (2^51 - 1)
        FieldElement::reduce([
            (self.0[0] + 36028797018963664u64) - rhs.0[0],
            (self.0[1] + 36028797018963952u64) - rhs.0[1],
            (self.0[2] + 36028797018963952u64) - rhs.0[2],
            (self.0[3] + 36028797018963952u64) - rhs.0[3],
            (self.0[4] + 36028797018963952u64) - rhs.0[4],
        ])
    }
}

impl<'a, 'b> Mul<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    #[rustfmt::skip] // keep alignment of c* calculations
    fn mul(self, rhs: &'b FieldElement) -> FieldElement {
        // Alias for more readable formulas.
        let a: &[u64; 5] = &self.0;
        let b: &[u64; 5] = &rhs.0;

        // Precondition: limbs a[i], b[i] < 2^54.
        //
        // The 64-bit precomputations b[i]*19 avoid 128-bit
        // multiplications; they fit because 54 + lg(19) < 64.
        let b1_19 = b[1] * 19;
        let b2_19 = b[2] * 19;
        let b3_19 = b[3] * 19;
        let b4_19 = b[4] * 19;

        // Schoolbook product with the wraparound terms folded in via
        // 2^255 = 19 (mod p).
        let     c0: u128 = m(a[0], b[0]) + m(a[4], b1_19) + m(a[3], b2_19) + m(a[2], b3_19) + m(a[1], b4_19);
        let mut c1: u128 = m(a[1], b[0]) + m(a[0], b[1])  + m(a[4], b2_19) + m(a[3], b3_19) + m(a[2], b4_19);
        let mut c2: u128 = m(a[2], b[0]) + m(a[1], b[1])  + m(a[0], b[2])  + m(a[4], b3_19) + m(a[3], b4_19);
        let mut c3: u128 = m(a[3], b[0]) + m(a[2], b[1])  + m(a[1], b[2])  + m(a[0], b[3])  + m(a[4], b4_19);
        let mut c4: u128 = m(a[4], b[0]) + m(a[3], b[1])  + m(a[2], b[2])  + m(a[1], b[3])  + m(a[0], b[4]);

        debug_assert!(a.iter().all(|&x| x < (1 << 54)));
        debug_assert!(b.iter().all(|&x| x < (1 << 54)));

        // Casting the carry to u64 and back tells the compiler the
        // addition is u128 + u64 rather than u128 + u128.
        let mut out = [0u64; 5];

        c1 += ((c0 >> 51) as u64) as u128;
        out[0] = (c0 as u64) & LOW_51_BIT_MASK;

        c2 += ((c1 >> 51) as u64) as u128;
        out[1] = (c1 as u64) & LOW_51_BIT_MASK;

        c3 += ((c2 >> 51) as u64) as u128;
        out[2] = (c2 as u64) & LOW_51_BIT_MASK;

        c4 += ((c3 >> 51) as u64) as u128;
        out[3] = (c3 as u64) & LOW_51_BIT_MASK;

        let carry: u64 = (c4 >> 51) as u64;
        out[4] = (c4 as u64) & LOW_51_BIT_MASK;

        // The final carry times 19 fits into out[0] without overflow,
        // and one more shift leaves all limbs below 2^51 + epsilon.
        out[0] += carry * 19;

        out[1] += out[0] >> 51;
        out[0] &= LOW_51_BIT_MASK;

        FieldElement(out)
    }
}

impl<'a> Neg for &'a FieldElement {
    type Output = FieldElement;
    fn neg(self) -> FieldElement {
        let mut output = *self;
        output.negate();
        output
    }
}

impl FieldElement {
    pub(crate) const ZERO: FieldElement = FieldElement([0, 0, 0, 0, 0]);
    pub(crate) const ONE: FieldElement = FieldElement([1, 0, 0, 0, 0]);
    pub(crate) const MINUS_ONE: FieldElement = FieldElement([
        2251799813685228,
        2251799813685247,
        2251799813685247,
        2251799813685247,
        2251799813685247,
    ]);

    /// Invert the sign of this field element, in place.
    pub(crate) fn negate(&mut self) {
        // Subtract from 16p to avoid underflow; see `Sub`.
        *self = FieldElement::reduce([
            36028797018963664u64 - self.0[0],
            36028797018963952u64 - self.0[1],
            36028797018963952u64 - self.0[2],
            36028797018963952u64 - self.0[3],
            36028797018963952u64 - self.0[4],
        ]);
    }

    /// Given unreduced limbs, carry them once so every limb is below
    /// \\(2^{51} + \epsilon\\).
    #[inline(always)]
    fn reduce(mut limbs: [u64; 5]) -> FieldElement {
        // Since the input limbs are bounded by 2^64, the carries are
        // bounded by 2^13, so carrying once is enough.
        let c0 = limbs[0] >> 51;
        let c1 = limbs[1] >> 51;
        let c2 = limbs[2] >> 51;
        let c3 = limbs[3] >> 51;
        let c4 = limbs[4] >> 51;

        limbs[0] &= LOW_51_BIT_MASK;
        limbs[1] &= LOW_51_BIT_MASK;
        limbs[2] &= LOW_51_BIT_MASK;
        limbs[3] &= LOW_51_BIT_MASK;
        limbs[4] &= LOW_51_BIT_MASK;

        limbs[0] += c4 * 19;
        limbs[1] += c0;
        limbs[2] += c1;
        limbs[3] += c2;
        limbs[4] += c3;

        FieldElement(limbs)
    }

    /// Load a `FieldElement` from the low 255 bits of a 256-bit input.
    ///
    /// # Warning
    ///
    /// This function does not check that the input is fully reduced
    /// modulo p; bit 255 is silently discarded, exactly as in the
    /// RFC 8032 decoding of point and field encodings.
    pub(crate) fn from_bytes(bytes: &[u8; 32]) -> FieldElement {
        #[inline]
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
            load8(&bytes[0..8]) & LOW_51_BIT_MASK,
            (load8(&bytes[6..14]) >> 3) & LOW_51_BIT_MASK,
            (load8(&bytes[12..20]) >> 6) & LOW_51_BIT_MASK,
            (load8(&bytes[19..27]) >> 1) & LOW_51_BIT_MASK,
            (load8(&bytes[24..32]) >> 12) & LOW_51_BIT_MASK,
        ])
    }

    /// Serialize this field element to its canonical 32-byte
    /// little-endian encoding, with the value fully reduced mod p.
    #[rustfmt::skip] // keep alignment of s[*] calculations
    pub(crate) fn to_bytes(self) -> [u8; 32] {
        // First carry once so limbs are below 2^52; the value is then
        // below 2p.  To reduce to [0, p), compute
        //     q = (h + 19) >> 255,
        // which is 1 exactly when h is in [p, 2p), then add 19q and mask
        // off bit 255: h + 19q = h - (2^255 - 19)q (mod 2^255).
        let mut limbs = FieldElement::reduce(self.0).0;

        let mut q = (limbs[0] + 19) >> 51;
        q = (limbs[1] + q) >> 51;
        q = (limbs[2] + q) >> 51;
        q = (limbs[3] + q) >> 51;
        q = (limbs[4] + q) >> 51;

        limbs[0] += 19 * q;

        limbs[1] += limbs[0] >> 51;
        limbs[0] &= LOW_51_BIT_MASK;
        limbs[2] += limbs[1] >> 51;
        limbs[1] &= LOW_51_BIT_MASK;
        limbs[3] += limbs[2] >> 51;
        limbs[2] &= LOW_51_BIT_MASK;
        limbs[4] += limbs[3] >> 51;
        limbs[3] &= LOW_51_BIT_MASK;
        // Carrying out of limbs[4] means subtracting p from the whole
        // value, which is the reduction we wanted.
        limbs[4] &= LOW_51_BIT_MASK;

        let mut s = [0u8; 32];
        s[ 0] =   limbs[0]        as u8;
        s[ 1] =  (limbs[0] >>  8) as u8;
        s[ 2] =  (limbs[0] >> 16) as u8;
        s[ 3] =  (limbs[0] >> 24) as u8;
        s[ 4] =  (limbs[0] >> 32) as u8;
        s[ 5] =  (limbs[0] >> 40) as u8;
        s[ 6] = ((limbs[0] >> 48) | (limbs[1] << 3)) as u8;
        s[ 7] =  (limbs[1] >>  5) as u8;
        s[ 8] =  (limbs[1] >> 13) as u8;
        s[ 9] =  (limbs[1] >> 21) as u8;
        s[10] =  (limbs[1] >> 29) as u8;
        s[11] =  (limbs[1] >> 37) as u8;
        s[12] = ((limbs[1] >> 45) | (limbs[2] << 6)) as u8;
        s[13] =  (limbs[2] >>  2) as u8;
        s[14] =  (limbs[2] >> 10) as u8;
        s[15] =  (limbs[2] >> 18) as u8;
        s[16] =  (limbs[2] >> 26) as u8;
        s[17] =  (limbs[2] >> 34) as u8;
        s[18] =  (limbs[2] >> 42) as u8;
        s[19] = ((limbs[2] >> 50) | (limbs[3] << 1)) as u8;
        s[20] =  (limbs[3] >>  7) as u8;
        s[21] =  (limbs[3] >> 15) as u8;
        s[22] =  (limbs[3] >> 23) as u8;
        s[23] =  (limbs[3] >> 31) as u8;
        s[24] =  (limbs[3] >> 39) as u8;
        s[25] = ((limbs[3] >> 47) | (limbs[4] << 4)) as u8;
        s[26] =  (limbs[4] >>  4) as u8;
        s[27] =  (limbs[4] >> 12) as u8;
        s[28] =  (limbs[4] >> 20) as u8;
        s[29] =  (limbs[4] >> 28) as u8;
        s[30] =  (limbs[4] >> 36) as u8;
        s[31] =  (limbs[4] >> 44) as u8;

        debug_assert!(s[31] & 0b1000_0000 == 0);

        s
    }

    /// Compute `self^(2^k)` by `k` successive squarings.
    #[rustfmt::skip] // keep alignment of c* calculations
    pub(crate) fn pow2k(&self, mut k: u32) -> FieldElement {
        debug_assert!(k > 0);

        let mut a: [u64; 5] = self.0;

        loop {
            // Like `mul` with both operands equal: the off-diagonal
            // products each occur twice, so precompute a[i]*2 implicitly
            // by doubling the mixed terms.
            let a3_19 = 19 * a[3];
            let a4_19 = 19 * a[4];

            let     c0: u128 = m(a[0],  a[0]) + 2 * (m(a[1], a4_19) + m(a[2], a3_19));
            let mut c1: u128 = m(a[3], a3_19) + 2 * (m(a[0],  a[1]) + m(a[2], a4_19));
            let mut c2: u128 = m(a[1],  a[1]) + 2 * (m(a[0],  a[2]) + m(a[4], a3_19));
            let mut c3: u128 = m(a[4], a4_19) + 2 * (m(a[0],  a[3]) + m(a[1],  a[2]));
            let mut c4: u128 = m(a[2],  a[2]) + 2 * (m(a[0],  a[4]) + m(a[1],  a[3]));

            let mut out = [0u64; 5];

            c1 += ((c0 >> 51) as u64) as u128;
            out[0] = (c0 as u64) & LOW_51_BIT_MASK;

            c2 += ((c1 >> 51) as u64) as u128;
            out[1] = (c1 as u64) & LOW_51_BIT_MASK;

            c3 += ((c2 >> 51) as u64) as u128;
            out[2] = (c2 as u64) & LOW_51_BIT_MASK;

            c4 += ((c3 >> 51) as u64) as u128;
            out[3] = (c3 as u64) & LOW_51_BIT_MASK;

            let carry: u64 = (c4 >> 51) as u64;
            out[4] = (c4 as u64) & LOW_51_BIT_MASK;

            out[0] += carry * 19;

            out[1] += out[0] >> 51;
            out[0] &= LOW_51_BIT_MASK;

            a = out;

            k -= 1;
            if k == 0 {
                break;
            }
        }

        FieldElement(a)
    }

    /// Compute `self^2`.
    pub(crate) fn square(&self) -> FieldElement {
        self.pow2k(1)
    }

    /// Compute `2 * self^2`.
    pub(crate) fn square2(&self) -> FieldElement {
        let mut square = self.pow2k(1);
        for i in 0..5 {
            square.0[i] *= 2;
        }
        square
    }

    /// Determine if this field element is negative in the RFC 8032 /
    /// Ristretto sense: the low bit of its canonical encoding is set.
    pub(crate) fn is_negative(&self) -> Choice {
        let bytes = self.to_bytes();
        (bytes[0] & 1).into()
    }

    /// Determine if this field element is zero.
    pub(crate) fn is_zero(&self) -> Choice {
        let zero = [0u8; 32];
        let bytes = self.to_bytes();

        bytes.ct_eq(&zero)
    }

    /// Compute (self^(2^250-1), self^11), used as a helper function
    /// within invert() and pow_p58().
    #[rustfmt::skip] // keep alignment of explanatory comments
    fn pow22501(&self) -> (FieldElement, FieldElement) {
        // Each temporary t_i below is self^e_i, with the exponents'
        // nonzero bits noted on the right.  Squaring shifts an exponent
        // left; multiplying two temporaries adds their exponents.
        let t0  = self.square();           // 1         e_0 = 2^1
        let t1  = t0.square().square();    // 3         e_1 = 2^3
        let t2  = self * &t1;              // 3,0
        let t3  = &t0 * &t2;               // 3,1,0
        let t4  = t3.square();             // 4,2,1
        let t5  = &t2 * &t4;               // 4,3,2,1,0
        let t6  = t5.pow2k(5);             // 9,8,7,6,5
        let t7  = &t6 * &t5;               // 9,8,7,6,5,4,3,2,1,0
        let t8  = t7.pow2k(10);            // 19..10
        let t9  = &t8 * &t7;               // 19..0
        let t10 = t9.pow2k(20);            // 39..20
        let t11 = &t10 * &t9;              // 39..0
        let t12 = t11.pow2k(10);           // 49..10
        let t13 = &t12 * &t7;              // 49..0
        let t14 = t13.pow2k(50);           // 99..50
        let t15 = &t14 * &t13;             // 99..0
        let t16 = t15.pow2k(100);          // 199..100
        let t17 = &t16 * &t15;             // 199..0
        let t18 = t17.pow2k(50);           // 249..50
        let t19 = &t18 * &t13;             // 249..0

        (t19, t3)
    }

    /// Given a nonzero field element, compute its inverse as
    /// `self^(p-2)`, since x^(p-2)·x = x^(p-1) = 1 (mod p).
    ///
    /// This function returns zero on input zero; higher layers use
    /// that as a failure sentinel where it matters.
    #[rustfmt::skip] // keep alignment of explanatory comments
    pub(crate) fn invert(&self) -> FieldElement {
        // The bits of p-2 = 2^255 - 21 are 11010111111...11.
        let (t19, t3) = self.pow22501();   // t19: 249..0 ; t3: 3,1,0
        let t20 = t19.pow2k(5);            // 254..5
        &t20 * &t3                         // 254..5,3,1,0
    }

    /// Raise this field element to the power (p-5)/8 = 2^252 - 3.
    #[rustfmt::skip] // keep alignment of explanatory comments
    fn pow_p58(&self) -> FieldElement {
        // The bits of (p-5)/8 are 101111.....11.
        let (t19, _) = self.pow22501();    // 249..0
        let t20 = t19.pow2k(2);            // 251..2
        self * &t20                        // 251..2,0
    }

    /// Given field elements `u` and `v`, compute either `sqrt(u/v)` or
    /// `sqrt(i*u/v)` in constant time, where `i = sqrt(-1)`.
    ///
    /// This function always returns the nonnegative square root.
    ///
    /// # Return
    ///
    /// - `(Choice(1), +sqrt(u/v))  ` if `v` is nonzero and `u/v` is square;
    /// - `(Choice(1), zero)        ` if `u` is zero;
    /// - `(Choice(0), zero)        ` if `v` is zero and `u` is nonzero;
    /// - `(Choice(0), +sqrt(i*u/v))` if `u/v` is nonsquare (so `i*u/v` is square).
    ///
    /// The fourth case is not an afterthought: the Ristretto Elligator
    /// map consumes that candidate root to produce an encoding of the
    /// rotated quantity.
    pub(crate) fn sqrt_ratio_i(u: &FieldElement, v: &FieldElement) -> (Choice, FieldElement) {
        // To compute sqrt(α) we can compute β = α^((p+3)/8), for which
        // β^2 = ±α.  Merging the inversion into the same exponentiation,
        //
        //    r = u^((p+3)/8) v^(p-1-(p+3)/8) = (uv^3) (uv^7)^((p-5)/8),
        //
        // so that if u/v is square then v·r^2 = ±u, and multiplying r by
        // sqrt(-1) corrects the sign when v·r^2 = -u.
        let v3 = &v.square() * v;
        let v7 = &v3.square() * v;
        let mut r = &(u * &v3) * &(u * &v7).pow_p58();
        let check = v * &r.square();

        let i = &constants::SQRT_M1;

        let correct_sign_sqrt = check.ct_eq(u);
        let flipped_sign_sqrt = check.ct_eq(&(-u));
        let flipped_sign_sqrt_i = check.ct_eq(&(&(-u) * i));

        let r_prime = &constants::SQRT_M1 * &r;
        r.conditional_assign(&r_prime, flipped_sign_sqrt | flipped_sign_sqrt_i);

        // Choose the nonnegative square root.
        let r_is_negative = r.is_negative();
        r.conditional_negate(r_is_negative);

        let was_nonzero_square = correct_sign_sqrt | flipped_sign_sqrt;

        (was_nonzero_square, r)
    }

    /// Attempt to compute `sqrt(1/self)` in constant time; a
    /// convenience wrapper around `sqrt_ratio_i`.
    pub(crate) fn invsqrt(&self) -> (Choice, FieldElement) {
        FieldElement::sqrt_ratio_i(&FieldElement::ONE, self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Random element a of GF(2^255-19), from Sage
    /// a = 1070314506888354081329385823235218444233221\
    ///     2228051251926706380353716438957572
    static A_BYTES: [u8; 32] = [
        0x04, 0xfe, 0xdf, 0x98, 0xa7, 0xfa, 0x0a, 0x68, 0x84, 0x92, 0xbd, 0x59, 0x08, 0x07, 0xa7,
        0x03, 0x9e, 0xd1, 0xf6, 0xf2, 0xe1, 0xd9, 0xe2, 0xa4, 0xa4, 0x51, 0x47, 0x36, 0xf3, 0xc3,
        0xa9, 0x17,
    ];

    /// Byte representation of a**2
    static ASQ_BYTES: [u8; 32] = [
        0x75, 0x97, 0x24, 0x9e, 0xe6, 0x06, 0xfe, 0xab, 0x24, 0x04, 0x56, 0x68, 0x07, 0x91, 0x2d,
        0x5d, 0x0b, 0x0f, 0x3f, 0x1c, 0xb2, 0x6e, 0xf2, 0xe2, 0x63, 0x9c, 0x12, 0xba, 0x73, 0x0b,
        0xe3, 0x62,
    ];

    /// Byte representation of 1/a
    static AINV_BYTES: [u8; 32] = [
        0x96, 0x1b, 0xcd, 0x8d, 0x4d, 0x5e, 0xa2, 0x3a, 0xe9, 0x36, 0x37, 0x93, 0xdb, 0x7b, 0x4d,
        0x70, 0xb8, 0x0d, 0xc0, 0x55, 0xd0, 0x4c, 0x1d, 0x7b, 0x90, 0x71, 0xd8, 0xe9, 0xb6, 0x18,
        0xe6, 0x30,
    ];

    /// Byte representation of a^((p-5)/8)
    static AP58_BYTES: [u8; 32] = [
        0x6a, 0x4f, 0x24, 0x89, 0x1f, 0x57, 0x60, 0x36, 0xd0, 0xbe, 0x12, 0x3c, 0x8f, 0xf5, 0xb1,
        0x59, 0xe0, 0xf0, 0xb8, 0x1b, 0x20, 0xd2, 0xb5, 0x1f, 0x15, 0x21, 0xf9, 0xe3, 0xe1, 0x61,
        0x21, 0x55,
    ];

    #[test]
    fn a_mul_a_vs_a_squared_constant() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let asq = FieldElement::from_bytes(&ASQ_BYTES);
        assert_eq!(asq, &a * &a);
    }

    #[test]
    fn a_square_vs_a_squared_constant() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let asq = FieldElement::from_bytes(&ASQ_BYTES);
        assert_eq!(asq, a.square());
    }

    #[test]
    fn a_square2_vs_a_squared_constant() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let asq = FieldElement::from_bytes(&ASQ_BYTES);
        assert_eq!(a.square2(), &asq + &asq);
    }

    #[test]
    fn a_invert_vs_inverse_of_a_constant() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let ainv = FieldElement::from_bytes(&AINV_BYTES);
        let should_be_inverse = a.invert();
        assert_eq!(ainv, should_be_inverse);
        assert_eq!(FieldElement::ONE, &a * &should_be_inverse);
    }

    #[test]
    fn a_p58_vs_ap58_constant() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let ap58 = FieldElement::from_bytes(&AP58_BYTES);
        assert_eq!(ap58, a.pow_p58());
    }

    #[test]
    fn invert_zero_is_zero() {
        assert_eq!(FieldElement::ZERO.invert(), FieldElement::ZERO);
    }

    #[test]
    fn sqrt_ratio_behavior() {
        let zero = FieldElement::ZERO;
        let one = FieldElement::ONE;
        let i = constants::SQRT_M1;
        let two = &one + &one; // 2 is nonsquare mod p.
        let four = &two + &two; // 4 is square mod p.

        // 0/0 should return (1, 0) since u is 0
        let (choice, sqrt) = FieldElement::sqrt_ratio_i(&zero, &zero);
        assert!(bool::from(choice));
        assert_eq!(sqrt, zero);
        assert!(bool::from(!sqrt.is_negative()));

        // 1/0 should return (0, 0) since v is 0, u is nonzero
        let (choice, sqrt) = FieldElement::sqrt_ratio_i(&one, &zero);
        assert!(bool::from(!choice));
        assert_eq!(sqrt, zero);
        assert!(bool::from(!sqrt.is_negative()));

        // 2/1 is nonsquare, so we expect (0, sqrt(i*2))
        let (choice, sqrt) = FieldElement::sqrt_ratio_i(&two, &one);
        assert!(bool::from(!choice));
        assert_eq!(sqrt.square(), &two * &i);
        assert!(bool::from(!sqrt.is_negative()));

        // 4/1 is square, so we expect (1, sqrt(4))
        let (choice, sqrt) = FieldElement::sqrt_ratio_i(&four, &one);
        assert!(bool::from(choice));
        assert_eq!(sqrt.square(), four);
        assert!(bool::from(!sqrt.is_negative()));

        // 1/4 is square, so we expect (1, 1/sqrt(4))
        let (choice, sqrt) = FieldElement::sqrt_ratio_i(&one, &four);
        assert!(bool::from(choice));
        assert_eq!(&sqrt.square() * &four, one);
        assert!(bool::from(!sqrt.is_negative()));
    }

    #[test]
    fn equality() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let ainv = FieldElement::from_bytes(&AINV_BYTES);
        assert!(a == a);
        assert!(a != ainv);
    }

    /// Notice that the last element has the high bit set, which
    /// should be ignored.
    static B_BYTES: [u8; 32] = [
        113, 191, 169, 143, 91, 234, 121, 15, 241, 131, 217, 36, 230, 101, 92, 234, 8, 208, 170,
        251, 97, 127, 70, 210, 58, 23, 166, 87, 240, 169, 184, 178,
    ];

    #[test]
    fn from_bytes_highbit_is_ignored() {
        let mut cleared_bytes = B_BYTES;
        cleared_bytes[31] &= 127u8;
        let with_highbit_set = FieldElement::from_bytes(&B_BYTES);
        let without_highbit_set = FieldElement::from_bytes(&cleared_bytes);
        assert_eq!(without_highbit_set, with_highbit_set);
    }

    #[test]
    fn conditional_negate() {
        let one = FieldElement::ONE;
        let minus_one = FieldElement::MINUS_ONE;
        let mut x = one;
        x.conditional_negate(Choice::from(1));
        assert_eq!(x, minus_one);
        x.conditional_negate(Choice::from(0));
        assert_eq!(x, minus_one);
        x.conditional_negate(Choice::from(1));
        assert_eq!(x, one);
    }

    #[test]
    fn encoding_is_canonical() {
        // Encode 1 wrongly as 1 + (2^255 - 19) = 2^255 - 18
        let one_encoded_wrongly_bytes: [u8; 32] = [
            0xee, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0x7f,
        ];
        // Decode to a field element
        let one = FieldElement::from_bytes(&one_encoded_wrongly_bytes);
        // .. then check that the encoding is correct
        let one_bytes = one.to_bytes();
        assert_eq!(one_bytes[0], 1);
        for byte in &one_bytes[1..] {
            assert_eq!(*byte, 0);
        }
    }
}
