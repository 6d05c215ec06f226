// -*- mode: rust; -*-
//
// This file is part of ed25519-ristretto.
// See LICENSE for licensing information.

//! Arithmetic on scalars modulo the group order
//! \\(\ell = 2^{252} + 27742317777372353535851937790883648493\\).
//!
//! The public [`Scalar`] type holds a canonical 32-byte little-endian
//! encoding and maintains the invariant that its value is in
//! \\([0, \ell)\\): every constructor reduces.  Ring operations go
//! through the private `UnpackedScalar`, five 52-bit limbs with
//! Montgomery multiplication.  51-bit limbs would cover the 253-bit
//! range, but aren't large enough to reduce a 512-bit number with
//! Montgomery multiplication, so 52 bits are used instead.

use core::fmt::Debug;
use core::ops::{Add, Mul, Neg, Sub};

use digest::generic_array::typenum::U64;
use digest::Digest;

use subtle::Choice;
use subtle::ConstantTimeEq;

use zeroize::Zeroize;

use crate::constants;

/// An integer modulo the prime order \\(\ell\\) of the Ed25519
/// basepoint.
///
/// Both the expanded secret scalar of a signing key and the `s`
/// component of a signature are `Scalar`s, as is any input to scalar
/// multiplication.
#[derive(Copy, Clone)]
pub struct Scalar {
    /// The little-endian canonical encoding; always represents a value
    /// below \\(\ell\\).
    pub(crate) bytes: [u8; 32],
}

impl Debug for Scalar {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Scalar{{\n\tbytes: {:?},\n}}", &self.bytes)
    }
}

impl Eq for Scalar {}

impl PartialEq for Scalar {
    fn eq(&self, other: &Scalar) -> bool {
        self.ct_eq(other).into()
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Scalar) -> Choice {
        self.bytes.ct_eq(&other.bytes)
    }
}

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
    }
}

impl From<u64> for Scalar {
    fn from(x: u64) -> Scalar {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&x.to_le_bytes());
        Scalar { bytes }
    }
}

impl<'a, 'b> Add<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn add(self, rhs: &'b Scalar) -> Scalar {
        UnpackedScalar::add(&self.unpack(), &rhs.unpack()).pack()
    }
}

impl<'a, 'b> Sub<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn sub(self, rhs: &'b Scalar) -> Scalar {
        UnpackedScalar::sub(&self.unpack(), &rhs.unpack()).pack()
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn mul(self, rhs: &'b Scalar) -> Scalar {
        UnpackedScalar::mul(&self.unpack(), &rhs.unpack()).pack()
    }
}

impl<'a> Neg for &'a Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        UnpackedScalar::sub(&UnpackedScalar::ZERO, &self.unpack()).pack()
    }
}

impl Scalar {
    /// The scalar \\(0\\).
    pub const ZERO: Scalar = Scalar { bytes: [0u8; 32] };

    /// The scalar \\(1\\).
    pub const ONE: Scalar = Scalar {
        bytes: [
            1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0,
        ],
    };

    /// Construct a `Scalar` by reducing a 256-bit little-endian integer
    /// modulo \\(\ell\\).
    pub fn from_bytes_mod_order(bytes: [u8; 32]) -> Scalar {
        // x * R / R = x (mod l), so one Montgomery multiplication by R
        // performs the reduction.
        UnpackedScalar::montgomery_mul(&UnpackedScalar::from_bytes(&bytes), &constants::R).pack()
    }

    /// Construct a `Scalar` by reducing a 512-bit little-endian integer
    /// modulo \\(\ell\\).
    ///
    /// This is the interpretation RFC 8032 gives to SHA-512 outputs
    /// used as nonces and challenges.
    pub fn from_bytes_mod_order_wide(input: &[u8; 64]) -> Scalar {
        UnpackedScalar::from_bytes_wide(input).pack()
    }

    /// Attempt to construct a `Scalar` from a canonical byte
    /// representation.
    ///
    /// # Return
    ///
    /// - `Some(s)`, where `s` is the `Scalar` corresponding to `bytes`,
    ///   if `bytes` is a canonical encoding (the value is below \\(\ell\\));
    /// - `None` if `bytes` is not a canonical encoding.
    ///
    /// Signature verification uses this check to reject any signature
    /// whose `s` component is out of range.
    pub fn from_canonical_bytes(bytes: [u8; 32]) -> Option<Scalar> {
        let candidate = Scalar::from_bytes_mod_order(bytes);
        if bool::from(candidate.bytes.ct_eq(&bytes)) {
            Some(candidate)
        } else {
            None
        }
    }

    /// Construct a `Scalar` by reducing the 512-bit output of the given
    /// hash modulo \\(\ell\\).
    pub fn from_hash<D>(hash: D) -> Scalar
    where
        D: Digest<OutputSize = U64>,
    {
        let mut output = [0u8; 64];
        output.copy_from_slice(hash.finalize().as_slice());
        Scalar::from_bytes_mod_order_wide(&output)
    }

    /// View this `Scalar` as a sequence of bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Convert this `Scalar` to its canonical little-endian byte
    /// representation.
    pub const fn to_bytes(&self) -> [u8; 32] {
        self.bytes
    }

    /// Get bit `i` of the scalar, as the low bit of the returned byte.
    pub(crate) fn bit(&self, i: usize) -> u8 {
        (self.bytes[i >> 3] >> (i & 7)) & 1
    }

    /// Unpack this `Scalar` to five 52-bit limbs for arithmetic.
    fn unpack(&self) -> UnpackedScalar {
        UnpackedScalar::from_bytes(&self.bytes)
    }
}

/// u64 * u64 = u128 multiply helper
#[inline(always)]
fn m(x: u64, y: u64) -> u128 {
    (x as u128) * (y as u128)
}

/// A scalar unpacked to five 52-bit limbs.
///
/// The largest limb in a 5x5 product of 52-bit limbs is
///
/// ```text
/// (0xfffffffffffff^2) * 5 = 0x4ffffffffffff60000000000005 (107 bits),
/// ```
///
/// so the schoolbook product of two unpacked scalars fits comfortably
/// in `u128` accumulators.
#[derive(Copy, Clone)]
pub(crate) struct UnpackedScalar(pub(crate) [u64; 5]);

impl UnpackedScalar {
    /// The scalar \\(0\\).
    pub(crate) const ZERO: UnpackedScalar = UnpackedScalar([0, 0, 0, 0, 0]);

    /// Unpack a 32-byte / 256-bit scalar into five 52-bit limbs.
    #[rustfmt::skip] // keep alignment of s[*] calculations
    pub(crate) fn from_bytes(bytes: &[u8; 32]) -> UnpackedScalar {
        let mut words = [0u64; 4];
        for i in 0..4 {
            for j in 0..8 {
                words[i] |= (bytes[(i * 8) + j] as u64) << (j * 8);
            }
        }

        let mask = (1u64 << 52) - 1;
        let top_mask = (1u64 << 48) - 1;
        let mut s = UnpackedScalar::ZERO;

        s.0[0] =   words[0]                            & mask;
        s.0[1] = ((words[0] >> 52) | (words[1] << 12)) & mask;
        s.0[2] = ((words[1] >> 40) | (words[2] << 24)) & mask;
        s.0[3] = ((words[2] >> 28) | (words[3] << 36)) & mask;
        s.0[4] =  (words[3] >> 16)                     & top_mask;

        s
    }

    /// Reduce a 64-byte / 512-bit scalar mod \\(\ell\\).
    #[rustfmt::skip] // keep alignment of lo[*] and hi[*] calculations
    pub(crate) fn from_bytes_wide(bytes: &[u8; 64]) -> UnpackedScalar {
        let mut words = [0u64; 8];
        for i in 0..8 {
            for j in 0..8 {
                words[i] |= (bytes[(i * 8) + j] as u64) << (j * 8);
            }
        }

        let mask = (1u64 << 52) - 1;
        let mut lo = UnpackedScalar::ZERO;
        let mut hi = UnpackedScalar::ZERO;

        lo.0[0] =   words[0]                             & mask;
        lo.0[1] = ((words[0] >> 52) | (words[ 1] << 12)) & mask;
        lo.0[2] = ((words[1] >> 40) | (words[ 2] << 24)) & mask;
        lo.0[3] = ((words[2] >> 28) | (words[ 3] << 36)) & mask;
        lo.0[4] = ((words[3] >> 16) | (words[ 4] << 48)) & mask;
        hi.0[0] =  (words[4] >>  4)                      & mask;
        hi.0[1] = ((words[4] >> 56) | (words[ 5] <<  8)) & mask;
        hi.0[2] = ((words[5] >> 44) | (words[ 6] << 20)) & mask;
        hi.0[3] = ((words[6] >> 32) | (words[ 7] << 32)) & mask;
        hi.0[4] =   words[7] >> 20                             ;

        lo = UnpackedScalar::montgomery_mul(&lo, &constants::R);  // (lo * R) / R = lo
        hi = UnpackedScalar::montgomery_mul(&hi, &constants::RR); // (hi * R^2) / R = hi * R

        UnpackedScalar::add(&hi, &lo)
    }

    /// Pack the limbs of this `UnpackedScalar` into a `Scalar`.
    #[rustfmt::skip] // keep alignment of s[*] calculations
    pub(crate) fn pack(&self) -> Scalar {
        let mut s = Scalar::ZERO;

        s.bytes[ 0] =  (self.0[0] >>  0)                  as u8;
        s.bytes[ 1] =  (self.0[0] >>  8)                  as u8;
        s.bytes[ 2] =  (self.0[0] >> 16)                  as u8;
        s.bytes[ 3] =  (self.0[0] >> 24)                  as u8;
        s.bytes[ 4] =  (self.0[0] >> 32)                  as u8;
        s.bytes[ 5] =  (self.0[0] >> 40)                  as u8;
        s.bytes[ 6] = ((self.0[0] >> 48) | (self.0[1] << 4)) as u8;
        s.bytes[ 7] =  (self.0[1] >>  4)                  as u8;
        s.bytes[ 8] =  (self.0[1] >> 12)                  as u8;
        s.bytes[ 9] =  (self.0[1] >> 20)                  as u8;
        s.bytes[10] =  (self.0[1] >> 28)                  as u8;
        s.bytes[11] =  (self.0[1] >> 36)                  as u8;
        s.bytes[12] =  (self.0[1] >> 44)                  as u8;
        s.bytes[13] =  (self.0[2] >>  0)                  as u8;
        s.bytes[14] =  (self.0[2] >>  8)                  as u8;
        s.bytes[15] =  (self.0[2] >> 16)                  as u8;
        s.bytes[16] =  (self.0[2] >> 24)                  as u8;
        s.bytes[17] =  (self.0[2] >> 32)                  as u8;
        s.bytes[18] =  (self.0[2] >> 40)                  as u8;
        s.bytes[19] = ((self.0[2] >> 48) | (self.0[3] << 4)) as u8;
        s.bytes[20] =  (self.0[3] >>  4)                  as u8;
        s.bytes[21] =  (self.0[3] >> 12)                  as u8;
        s.bytes[22] =  (self.0[3] >> 20)                  as u8;
        s.bytes[23] =  (self.0[3] >> 28)                  as u8;
        s.bytes[24] =  (self.0[3] >> 36)                  as u8;
        s.bytes[25] =  (self.0[3] >> 44)                  as u8;
        s.bytes[26] =  (self.0[4] >>  0)                  as u8;
        s.bytes[27] =  (self.0[4] >>  8)                  as u8;
        s.bytes[28] =  (self.0[4] >> 16)                  as u8;
        s.bytes[29] =  (self.0[4] >> 24)                  as u8;
        s.bytes[30] =  (self.0[4] >> 32)                  as u8;
        s.bytes[31] =  (self.0[4] >> 40)                  as u8;

        s
    }

    /// Compute `a + b` (mod \\(\ell\\)); both inputs must be reduced.
    pub(crate) fn add(a: &UnpackedScalar, b: &UnpackedScalar) -> UnpackedScalar {
        let mut sum = UnpackedScalar::ZERO;
        let mask = (1u64 << 52) - 1;

        // a + b
        let mut carry: u64 = 0;
        for i in 0..5 {
            carry = a.0[i] + b.0[i] + (carry >> 52);
            sum.0[i] = carry & mask;
        }

        // subtract l if the sum is >= l
        UnpackedScalar::sub(&sum, &constants::L)
    }

    /// Compute `a - b` (mod \\(\ell\\)); both inputs must be reduced.
    pub(crate) fn sub(a: &UnpackedScalar, b: &UnpackedScalar) -> UnpackedScalar {
        let mut difference = UnpackedScalar::ZERO;
        let mask = (1u64 << 52) - 1;

        // a - b
        let mut borrow: u64 = 0;
        for i in 0..5 {
            borrow = a.0[i].wrapping_sub(b.0[i] + (borrow >> 63));
            difference.0[i] = borrow & mask;
        }

        // conditionally add l if the difference is negative
        let underflow_mask = ((borrow >> 63) ^ 1).wrapping_sub(1);
        let mut carry: u64 = 0;
        for i in 0..5 {
            carry = (carry >> 52) + difference.0[i] + (constants::L.0[i] & underflow_mask);
            difference.0[i] = carry & mask;
        }

        difference
    }

    /// Compute `a * b` as a 9-limb 104-bit-radix product, without
    /// reduction.
    #[inline(always)]
    #[rustfmt::skip] // keep alignment of z[*] calculations
    fn mul_internal(a: &UnpackedScalar, b: &UnpackedScalar) -> [u128; 9] {
        let mut z = [0u128; 9];

        z[0] = m(a.0[0], b.0[0]);
        z[1] = m(a.0[0], b.0[1]) + m(a.0[1], b.0[0]);
        z[2] = m(a.0[0], b.0[2]) + m(a.0[1], b.0[1]) + m(a.0[2], b.0[0]);
        z[3] = m(a.0[0], b.0[3]) + m(a.0[1], b.0[2]) + m(a.0[2], b.0[1]) + m(a.0[3], b.0[0]);
        z[4] = m(a.0[0], b.0[4]) + m(a.0[1], b.0[3]) + m(a.0[2], b.0[2]) + m(a.0[3], b.0[1]) + m(a.0[4], b.0[0]);
        z[5] =                     m(a.0[1], b.0[4]) + m(a.0[2], b.0[3]) + m(a.0[3], b.0[2]) + m(a.0[4], b.0[1]);
        z[6] =                                         m(a.0[2], b.0[4]) + m(a.0[3], b.0[3]) + m(a.0[4], b.0[2]);
        z[7] =                                                             m(a.0[3], b.0[4]) + m(a.0[4], b.0[3]);
        z[8] =                                                                                 m(a.0[4], b.0[4]);

        z
    }

    /// Compute `limbs/R` (mod \\(\ell\\)), where R is the Montgomery
    /// modulus 2^260.
    #[inline(always)]
    #[rustfmt::skip] // keep alignment of n* and r* calculations
    fn montgomery_reduce(limbs: &[u128; 9]) -> UnpackedScalar {
        #[inline(always)]
        fn part1(sum: u128) -> (u128, u64) {
            let p = (sum as u64).wrapping_mul(constants::LFACTOR) & ((1u64 << 52) - 1);
            ((sum + m(p, constants::L.0[0])) >> 52, p)
        }

        #[inline(always)]
        fn part2(sum: u128) -> (u128, u64) {
            let w = (sum as u64) & ((1u64 << 52) - 1);
            (sum >> 52, w)
        }

        // note: l[3] is zero, so its multiples can be skipped
        let l = &constants::L;

        // the first half computes the Montgomery adjustment factor n,
        // and begins adding n*l to make limbs divisible by R
        let (carry, n0) = part1(        limbs[0]);
        let (carry, n1) = part1(carry + limbs[1] + m(n0, l.0[1]));
        let (carry, n2) = part1(carry + limbs[2] + m(n0, l.0[2]) + m(n1, l.0[1]));
        let (carry, n3) = part1(carry + limbs[3]                 + m(n1, l.0[2]) + m(n2, l.0[1]));
        let (carry, n4) = part1(carry + limbs[4] + m(n0, l.0[4])                 + m(n2, l.0[2]) + m(n3, l.0[1]));

        // limbs is divisible by R now, so we can divide by R by simply
        // storing the upper half as the result
        let (carry, r0) = part2(carry + limbs[5]                 + m(n1, l.0[4])                 + m(n3, l.0[2]) + m(n4, l.0[1]));
        let (carry, r1) = part2(carry + limbs[6]                                 + m(n2, l.0[4])                 + m(n4, l.0[2]));
        let (carry, r2) = part2(carry + limbs[7]                                                 + m(n3, l.0[4])                );
        let (carry, r3) = part2(carry + limbs[8]                                                                 + m(n4, l.0[4]));
        let         r4 = carry as u64;

        // result may be >= l, so attempt to subtract l
        UnpackedScalar::sub(&UnpackedScalar([r0, r1, r2, r3, r4]), l)
    }

    /// Compute `a * b` (mod \\(\ell\\)).
    pub(crate) fn mul(a: &UnpackedScalar, b: &UnpackedScalar) -> UnpackedScalar {
        let ab = UnpackedScalar::montgomery_reduce(&UnpackedScalar::mul_internal(a, b));
        UnpackedScalar::montgomery_reduce(&UnpackedScalar::mul_internal(&ab, &constants::RR))
    }

    /// Compute `(a * b) / R` (mod \\(\ell\\)), where R is the
    /// Montgomery modulus 2^260.
    pub(crate) fn montgomery_mul(a: &UnpackedScalar, b: &UnpackedScalar) -> UnpackedScalar {
        UnpackedScalar::montgomery_reduce(&UnpackedScalar::mul_internal(a, b))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Note: x is 2^253-1, which is slightly larger than the largest
    /// scalar produced by this implementation (l-1); arithmetic on it
    /// shows there are no overflows for valid scalars.
    ///
    /// x = 14474011154664524427946373126085988481658748083205070504932198000989141204991
    pub static X: UnpackedScalar = UnpackedScalar([
        0x000fffffffffffff,
        0x000fffffffffffff,
        0x000fffffffffffff,
        0x000fffffffffffff,
        0x00001fffffffffff,
    ]);

    /// x^2 = 3078544782642840487852506753550082162405942681916160040940637093560259278169 mod l
    pub static XX: UnpackedScalar = UnpackedScalar([
        0x0001668020217559,
        0x000531640ffd0ec0,
        0x00085fd6f9f38a31,
        0x000c268f73bb1cf4,
        0x000006ce65046df0,
    ]);

    /// y = 6145104759870991071742105800796537629880401874866217824609283457819451087098
    pub static Y: UnpackedScalar = UnpackedScalar([
        0x000b75071e1458fa,
        0x000bf9d75e1ecdac,
        0x000433d2baf0672b,
        0x0005fffcc11fad13,
        0x00000d96018bb825,
    ]);

    /// x*y = 36752150652102274958925982391442301741 mod l
    pub static XY: UnpackedScalar = UnpackedScalar([
        0x000ee6d76ba7632d,
        0x000ed50d71d84e02,
        0x00000000001ba634,
        0x0000000000000000,
        0x0000000000000000,
    ]);

    /// a = 2351415481556538453565687241199399922945659411799870114962672658845158063753
    pub static A: UnpackedScalar = UnpackedScalar([
        0x0005236c07b3be89,
        0x0001bc3d2a67c0c4,
        0x000a4aa782aae3ee,
        0x0006b3f6e4fec4c4,
        0x00000532da9fab8c,
    ]);

    /// b = 4885590095775723760407499321843594317911456947580037491039278279440296187236
    pub static B: UnpackedScalar = UnpackedScalar([
        0x000d3fae55421564,
        0x000c2df24f65a4bc,
        0x0005b5587d69fb0b,
        0x00094c091b013b3b,
        0x00000acd25605473,
    ]);

    /// a+b = 0
    /// a-b = 4702830963113076907131374482398799845891318823599740229925345317690316127506
    pub static AB: UnpackedScalar = UnpackedScalar([
        0x000a46d80f677d12,
        0x0003787a54cf8188,
        0x0004954f0555c7dc,
        0x000d67edc9fd8989,
        0x00000a65b53f5718,
    ]);

    /// c = (2^512 - 1) % l = 1627715501170711445284395025044413883736156588369414752970002579683115011840
    pub static C: UnpackedScalar = UnpackedScalar([
        0x000611e3449c0f00,
        0x000a768859347a40,
        0x0007f5be65d00e1b,
        0x0009a3dceec73d21,
        0x00000399411b7c30,
    ]);

    #[test]
    fn mul_max() {
        let res = UnpackedScalar::mul(&X, &X);
        for i in 0..5 {
            assert_eq!(res.0[i], XX.0[i]);
        }
    }

    #[test]
    fn mul() {
        let res = UnpackedScalar::mul(&X, &Y);
        for i in 0..5 {
            assert_eq!(res.0[i], XY.0[i]);
        }
    }

    #[test]
    fn add() {
        let res = UnpackedScalar::add(&A, &B);
        let zero = UnpackedScalar::ZERO;
        for i in 0..5 {
            assert_eq!(res.0[i], zero.0[i]);
        }
    }

    #[test]
    fn sub() {
        let res = UnpackedScalar::sub(&A, &B);
        for i in 0..5 {
            assert_eq!(res.0[i], AB.0[i]);
        }
    }

    #[test]
    fn from_bytes_wide() {
        let bignum = [255u8; 64]; // 2^512 - 1
        let reduced = UnpackedScalar::from_bytes_wide(&bignum);
        for i in 0..5 {
            assert_eq!(reduced.0[i], C.0[i]);
        }
    }

    #[test]
    fn pack_unpack_round_trips() {
        let a = A.pack();
        assert_eq!(a.unpack().pack().to_bytes(), a.to_bytes());
    }

    #[test]
    fn from_bytes_mod_order_reduces() {
        // l itself must reduce to zero.
        let l_bytes: [u8; 32] = [
            0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9,
            0xde, 0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x10,
        ];
        assert_eq!(Scalar::from_bytes_mod_order(l_bytes), Scalar::ZERO);

        // ... and l is therefore not canonical.
        assert!(Scalar::from_canonical_bytes(l_bytes).is_none());
        let mut l_minus_one = l_bytes;
        l_minus_one[0] -= 1;
        assert!(Scalar::from_canonical_bytes(l_minus_one).is_some());
    }

    #[test]
    fn add_neg_is_zero() {
        let a = A.pack();
        let minus_a = -&a;
        assert_eq!(&a + &minus_a, Scalar::ZERO);
    }

    #[test]
    fn scalar_mul_matches_unpacked() {
        let x = Scalar::from_bytes_mod_order(X.pack().to_bytes());
        let y = Y.pack();
        assert_eq!((&x * &y).to_bytes(), XY.pack().to_bytes());
    }
}
