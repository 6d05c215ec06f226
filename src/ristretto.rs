// -*- mode: rust; -*-
//
// This file is part of ed25519-ristretto.
// See LICENSE for licensing information.

//! An implementation of Ristretto255, a prime-order group built as a
//! quotient of the Edwards form of Curve25519.
//!
//! Working directly with Edwards points forces every protocol built on
//! top to reason about the curve's cofactor of 8.  Ristretto removes
//! the problem rather than managing it: group elements are *cosets*
//! of the 4-torsion, every element has exactly one 32-byte encoding,
//! and decoding accepts only canonical encodings.  The internal
//! representative of a coset is an [`EdwardsPoint`], and all group
//! arithmetic is inherited from it; only encoding, decoding, equality,
//! and hashing-to-the-group differ.
//!
//! The encoding and decoding routines here are bit-for-bit compatible
//! with the `ristretto255` specification (draft-irtf-cfrg-ristretto255,
//! later RFC 9496) and its test vectors.

use core::fmt::Debug;
use core::ops::{Add, Neg, Sub};

use rand_core::CryptoRngCore;

use subtle::Choice;
use subtle::ConditionallyNegatable;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use crate::constants;
use crate::edwards::EdwardsPoint;
use crate::errors::{InternalError, SignatureError};
use crate::field::FieldElement;
use crate::traits::Identity;

// ------------------------------------------------------------------------
// Compressed points
// ------------------------------------------------------------------------

/// A Ristretto point, in compressed wire format.
///
/// The Ristretto encoding is canonical, so two points are equal if and
/// only if their encodings are equal.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct CompressedRistretto(pub [u8; 32]);

impl ConstantTimeEq for CompressedRistretto {
    fn ct_eq(&self, other: &CompressedRistretto) -> Choice {
        self.as_bytes().ct_eq(other.as_bytes())
    }
}

impl Debug for CompressedRistretto {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "CompressedRistretto: {:?}", self.as_bytes())
    }
}

impl Identity for CompressedRistretto {
    fn identity() -> CompressedRistretto {
        CompressedRistretto([0u8; 32])
    }
}

impl Default for CompressedRistretto {
    fn default() -> CompressedRistretto {
        CompressedRistretto::identity()
    }
}

impl CompressedRistretto {
    /// View this `CompressedRistretto` as an array of bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Copy this `CompressedRistretto` to an array of bytes.
    pub const fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Construct a `CompressedRistretto` from a slice of bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<CompressedRistretto, SignatureError> {
        if bytes.len() != 32 {
            return Err(SignatureError(InternalError::BytesLength {
                name: "CompressedRistretto",
                length: 32,
            }));
        }
        let mut array = [0u8; 32];
        array.copy_from_slice(bytes);
        Ok(CompressedRistretto(array))
    }

    /// Attempt to decompress to a `RistrettoPoint`.
    ///
    /// # Return
    ///
    /// - `Some(RistrettoPoint)` if `self` was the canonical encoding of
    ///   a point;
    ///
    /// - `None` if `self` was not the canonical encoding of a point:
    ///   the field element is not canonically encoded, is negative,
    ///   yields a nonsquare ratio, or fails the residual \\(t\\)-sign
    ///   and \\(y \ne 0\\) checks.
    pub fn decompress(&self) -> Option<RistrettoPoint> {
        // Step 1: check that s is a canonical, nonnegative field
        // element.  from_bytes ignores the high bit, so the only
        // non-canonical encodings are values in [p, 2^255), which we
        // catch by re-encoding.
        let s = FieldElement::from_bytes(self.as_bytes());
        let s_encoding_is_canonical = s.to_bytes().ct_eq(self.as_bytes());
        let s_is_negative = s.is_negative();

        if (!s_encoding_is_canonical | s_is_negative).into() {
            return None;
        }

        // Step 2: compute the candidate extended coordinates.
        let one = FieldElement::ONE;
        let ss = s.square();
        let u1 = &one - &ss; //  1 + as²
        let u2 = &one + &ss; //  1 - as²    where a = -1
        let u2_sqr = u2.square(); // (1 - as²)²

        // v == ad(1+as²)² - (1-as²)²    where d = -121665/121666
        let v = &(&(-&constants::EDWARDS_D) * &u1.square()) - &u2_sqr;

        let (ok, I) = (&v * &u2_sqr).invsqrt(); // 1/sqrt(v*u_2²)

        let Dx = &I * &u2; // 1/sqrt(v)
        let Dy = &I * &(&Dx * &v); // 1/u2

        // x == | 2s/sqrt(v) | == + sqrt(4s²/(ad(1+as²)² - (1-as²)²))
        let mut x = &(&s + &s) * &Dx;
        let x_neg = x.is_negative();
        x.conditional_negate(x_neg);

        // y == (1-as²)/(1+as²)
        let y = &u1 * &Dy;

        // t == ((1+as²) sqrt(4s²/(ad(1+as²)² - (1-as²)²)))/(1-as²)
        let t = &x * &y;

        if (!ok | t.is_negative() | y.is_zero()).into() {
            None
        } else {
            Some(RistrettoPoint(EdwardsPoint {
                X: x,
                Y: y,
                Z: one,
                T: t,
            }))
        }
    }
}

// ------------------------------------------------------------------------
// Group elements
// ------------------------------------------------------------------------

/// A `RistrettoPoint` represents a point in the Ristretto group for
/// Curve25519.
///
/// The implementation is a thin wrapper around an [`EdwardsPoint`]
/// representative of the coset; the Edwards representative of a given
/// group element is *not* unique, which is why equality is defined on
/// the quotient (see [`RistrettoPoint::ct_eq`]) rather than on the
/// representative.
#[derive(Copy, Clone)]
pub struct RistrettoPoint(pub(crate) EdwardsPoint);

impl Debug for RistrettoPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "RistrettoPoint: {:?}", self.compress())
    }
}

impl Identity for RistrettoPoint {
    fn identity() -> RistrettoPoint {
        RistrettoPoint(EdwardsPoint::identity())
    }
}

impl Default for RistrettoPoint {
    fn default() -> RistrettoPoint {
        RistrettoPoint::identity()
    }
}

impl ConstantTimeEq for RistrettoPoint {
    /// Test equality between two `RistrettoPoint`s.
    ///
    /// Equality on the quotient group holds iff
    /// \\(X_1 Y_2 = Y_1 X_2\\) or \\(Y_1 Y_2 = X_1 X_2\\),
    /// which identifies all four Edwards representatives of a coset.
    fn ct_eq(&self, other: &RistrettoPoint) -> Choice {
        let X1Y2 = &self.0.X * &other.0.Y;
        let Y1X2 = &self.0.Y * &other.0.X;
        let X1X2 = &self.0.X * &other.0.X;
        let Y1Y2 = &self.0.Y * &other.0.Y;

        X1Y2.ct_eq(&Y1X2) | X1X2.ct_eq(&Y1Y2)
    }
}

impl Eq for RistrettoPoint {}

impl PartialEq for RistrettoPoint {
    fn eq(&self, other: &RistrettoPoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl<'a, 'b> Add<&'b RistrettoPoint> for &'a RistrettoPoint {
    type Output = RistrettoPoint;
    fn add(self, other: &'b RistrettoPoint) -> RistrettoPoint {
        RistrettoPoint(&self.0 + &other.0)
    }
}

impl<'a, 'b> Sub<&'b RistrettoPoint> for &'a RistrettoPoint {
    type Output = RistrettoPoint;
    fn sub(self, other: &'b RistrettoPoint) -> RistrettoPoint {
        RistrettoPoint(&self.0 - &other.0)
    }
}

impl<'a> Neg for &'a RistrettoPoint {
    type Output = RistrettoPoint;
    fn neg(self) -> RistrettoPoint {
        RistrettoPoint(-&self.0)
    }
}

impl RistrettoPoint {
    /// Compress this point using the Ristretto encoding.
    pub fn compress(&self) -> CompressedRistretto {
        let mut X = self.0.X;
        let mut Y = self.0.Y;
        let Z = &self.0.Z;
        let T = &self.0.T;

        let u1 = &(Z + &Y) * &(Z - &Y);
        let u2 = &X * &Y;
        // Ignore the return value, since u1 * u2² is always square for
        // a representative of a coset.
        let (_, invsqrt) = (&u1 * &u2.square()).invsqrt();
        let i1 = &invsqrt * &u1;
        let i2 = &invsqrt * &u2;
        let z_inv = &i1 * &(&i2 * T);
        let mut den_inv = i2;

        let iX = &X * &constants::SQRT_M1;
        let iY = &Y * &constants::SQRT_M1;
        let enchanted_denominator = &i1 * &constants::INVSQRT_A_MINUS_D;

        // Rotate the representative by the order-4 point if t = xy is
        // negative, so every coset lands on its distinguished member.
        let rotate = (T * &z_inv).is_negative();

        X.conditional_assign(&iY, rotate);
        Y.conditional_assign(&iX, rotate);
        den_inv.conditional_assign(&enchanted_denominator, rotate);

        Y.conditional_negate((&X * &z_inv).is_negative());

        let mut s = &den_inv * &(Z - &Y);
        let s_is_negative = s.is_negative();
        s.conditional_negate(s_is_negative);

        CompressedRistretto(s.to_bytes())
    }

    /// Return a `RistrettoPoint` chosen uniformly at random using a
    /// user-provided RNG.
    pub fn random<R: CryptoRngCore + ?Sized>(rng: &mut R) -> Self {
        let mut uniform_bytes = [0u8; 64];
        rng.fill_bytes(&mut uniform_bytes);

        RistrettoPoint::from_uniform_bytes(&uniform_bytes)
    }

    /// Construct a `RistrettoPoint` from 64 bytes of uniformly random
    /// data.
    ///
    /// Each 32-byte half is mapped to a point with the Ristretto
    /// flavor of the Elligator map, and the two points are added.
    /// Applying Elligator twice and adding the results ensures a
    /// uniform distribution over the whole group, making this suitable
    /// as the final step of a hash-to-group: feed in the 64-byte
    /// output of SHA-512 (or any wide hash) over the input.
    pub fn from_uniform_bytes(bytes: &[u8; 64]) -> RistrettoPoint {
        let mut r_1_bytes = [0u8; 32];
        r_1_bytes.copy_from_slice(&bytes[0..32]);
        let r_1 = FieldElement::from_bytes(&r_1_bytes);
        let R_1 = RistrettoPoint::elligator_ristretto_flavor(&r_1);

        let mut r_2_bytes = [0u8; 32];
        r_2_bytes.copy_from_slice(&bytes[32..64]);
        let r_2 = FieldElement::from_bytes(&r_2_bytes);
        let R_2 = RistrettoPoint::elligator_ristretto_flavor(&r_2);

        &R_1 + &R_2
    }

    /// Computes the Ristretto Elligator map.
    ///
    /// This is the map defined in the ristretto255 specification; it
    /// is not a uniform hash into the group by itself, which is why
    /// [`from_uniform_bytes`](RistrettoPoint::from_uniform_bytes)
    /// applies it twice.
    pub(crate) fn elligator_ristretto_flavor(r_0: &FieldElement) -> RistrettoPoint {
        let i = &constants::SQRT_M1;
        let d = &constants::EDWARDS_D;
        let one_minus_d_sq = &constants::ONE_MINUS_EDWARDS_D_SQUARED;
        let d_minus_one_sq = &constants::EDWARDS_D_MINUS_ONE_SQUARED;
        let mut c = FieldElement::MINUS_ONE;

        let one = FieldElement::ONE;

        let r = i * &r_0.square();
        let N_s = &(&r + &one) * one_minus_d_sq;
        let D = &(&c - &(d * &r)) * &(&r + d);

        let (Ns_D_is_sq, mut s) = FieldElement::sqrt_ratio_i(&N_s, &D);
        let mut s_prime = &s * r_0;
        let s_prime_is_pos = !s_prime.is_negative();
        s_prime.conditional_negate(s_prime_is_pos);

        s.conditional_assign(&s_prime, !Ns_D_is_sq);
        c.conditional_assign(&r, !Ns_D_is_sq);

        let N_t = &(&(&c * &(&r - &one)) * d_minus_one_sq) - &D;
        let s_sq = s.square();

        // The map lands in the completed coordinates
        // ((W0 : W1), (W2 : W3)) of P¹ × P¹; convert to extended.
        let W0 = &(&s + &s) * &D;
        let W1 = &N_t * &constants::SQRT_AD_MINUS_ONE;
        let W2 = &one - &s_sq;
        let W3 = &one + &s_sq;

        RistrettoPoint(EdwardsPoint {
            X: &W0 * &W3,
            Y: &W2 * &W1,
            Z: &W1 * &W3,
            T: &W0 * &W2,
        })
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn identity_encodes_to_zeroes() {
        assert_eq!(
            RistrettoPoint::identity().compress(),
            CompressedRistretto::identity()
        );
        let decoded = CompressedRistretto::identity().decompress().unwrap();
        assert_eq!(decoded, RistrettoPoint::identity());
    }

    #[test]
    fn basepoint_roundtrip() {
        let compressed = constants::RISTRETTO_BASEPOINT_POINT.compress();
        let decoded = compressed.decompress().unwrap();
        assert_eq!(decoded, constants::RISTRETTO_BASEPOINT_POINT);
        assert_eq!(decoded.compress(), compressed);
    }

    #[test]
    fn four_torsion_representatives_are_equal() {
        // Rotating the Edwards representative by a 4-torsion point
        // changes the representative but not the group element.
        let p = constants::RISTRETTO_BASEPOINT_POINT;
        // (x, y) -> (iy, ix) is multiplication by the order-4 point.
        let rotated = RistrettoPoint(EdwardsPoint {
            X: &p.0.Y * &constants::SQRT_M1,
            Y: &p.0.X * &constants::SQRT_M1,
            Z: p.0.Z,
            T: -&p.0.T,
        });
        assert_eq!(p, rotated);
        assert_eq!(p.compress(), rotated.compress());
    }

    #[test]
    fn add_sub_neg_on_quotient() {
        let b = constants::RISTRETTO_BASEPOINT_POINT;
        let two_b = &b + &b;
        assert_eq!(&two_b - &b, b);
        assert_eq!(&b + &(-&b), RistrettoPoint::identity());
    }

    #[test]
    fn elligator_output_is_on_curve() {
        let fe = FieldElement::from_bytes(&[7u8; 32]);
        let p = RistrettoPoint::elligator_ristretto_flavor(&fe);
        assert!(bool::from(p.0.to_affine().is_on_curve()));
        // And survives an encode/decode round trip.
        let c = p.compress();
        assert_eq!(c.decompress().unwrap(), p);
    }

    #[test]
    fn decompress_rejects_negative_and_non_canonical() {
        // s = p - 1 is negative.
        let neg = CompressedRistretto([
            0xec, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0x7f,
        ]);
        assert!(neg.decompress().is_none());

        // s = p is a non-canonical encoding of zero.
        let non_canonical = CompressedRistretto([
            0xed, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0x7f,
        ]);
        assert!(non_canonical.decompress().is_none());

        // s = 1 yields y = 0, which is excluded.
        let mut one = [0u8; 32];
        one[0] = 1;
        assert!(CompressedRistretto(one).decompress().is_none());
    }

    #[test]
    fn from_slice_length_check() {
        assert!(CompressedRistretto::from_slice(&[0u8; 16]).is_err());
        assert!(CompressedRistretto::from_slice(&[0u8; 32]).is_ok());
    }
}
