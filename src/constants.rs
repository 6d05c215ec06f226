// -*- mode: rust; -*-
//
// This file is part of ed25519-ristretto.
// See LICENSE for licensing information.

//! Curve and protocol constants: the Edwards curve parameter `d`, the
//! basepoint, the order of the prime-order subgroup, and the handful of
//! square roots the Ristretto encoding is built from.
//!
//! All field constants are stored as 51-bit limb literals and
//! re-derived from `p` and `d` by the tests at the bottom of this
//! module.

use crate::edwards::EdwardsPoint;
use crate::field::FieldElement;
use crate::ristretto::RistrettoPoint;
use crate::scalar::UnpackedScalar;

/// Edwards `d` value, equal to `-121665/121666 mod p`.
pub(crate) const EDWARDS_D: FieldElement = FieldElement([
    929955233495203,
    466365720129213,
    1662059464998953,
    2033849074728123,
    1442794654840575,
]);

/// Edwards `2*d` value, equal to `2*(-121665/121666) mod p`.
pub(crate) const EDWARDS_D2: FieldElement = FieldElement([
    1859910466990425,
    932731440258426,
    1072319116312658,
    1815898335770999,
    633789495995903,
]);

/// Precomputed value of one of the square roots of -1 (mod p).
pub(crate) const SQRT_M1: FieldElement = FieldElement([
    1718705420411056,
    234908883556509,
    2233514472574048,
    2117202627021982,
    765476049583133,
]);

/// `= sqrt(a*d - 1)`, where `a = -1 (mod p)` and `d` is the Edwards
/// curve parameter.
pub(crate) const SQRT_AD_MINUS_ONE: FieldElement = FieldElement([
    2241493124984347,
    425987919032274,
    2207028919301688,
    1220490630685848,
    974799131293748,
]);

/// `= 1/sqrt(a-d)`, where `a = -1 (mod p)` and `d` is the Edwards
/// curve parameter.
pub(crate) const INVSQRT_A_MINUS_D: FieldElement = FieldElement([
    278908739862762,
    821645201101625,
    8113234426968,
    1777959178193151,
    2118520810568447,
]);

/// `= 1 - d^2`, used by the Ristretto Elligator map.
pub(crate) const ONE_MINUS_EDWARDS_D_SQUARED: FieldElement = FieldElement([
    1136626929484150,
    1998550399581263,
    496427632559748,
    118527312129759,
    45110755273534,
]);

/// `= (d - 1)^2`, used by the Ristretto Elligator map.
pub(crate) const EDWARDS_D_MINUS_ONE_SQUARED: FieldElement = FieldElement([
    1507062230895904,
    1572317787530805,
    683053064812840,
    317374165784489,
    1572899562415810,
]);

/// The Ed25519 basepoint, with
/// `y = 4/5 (mod p)` and the even `x` root, as an `EdwardsPoint`.
pub const ED25519_BASEPOINT_POINT: EdwardsPoint = EdwardsPoint {
    X: FieldElement([
        1738742601995546,
        1146398526822698,
        2070867633025821,
        562264141797630,
        587772402128613,
    ]),
    Y: FieldElement([
        1801439850948184,
        1351079888211148,
        450359962737049,
        900719925474099,
        1801439850948198,
    ]),
    Z: FieldElement([1, 0, 0, 0, 0]),
    T: FieldElement([
        1841354044333475,
        16398895984059,
        755974180946558,
        900171276175154,
        1821297809914039,
    ]),
};

/// The Ristretto basepoint, i.e. the coset of the Ed25519 basepoint.
pub const RISTRETTO_BASEPOINT_POINT: RistrettoPoint = RistrettoPoint(ED25519_BASEPOINT_POINT);

/// The cofactor of Curve25519: the full curve group has order
/// `8 * BASEPOINT_ORDER`.
pub const COFACTOR: u8 = 8;

/// The order \\(\ell = 2^{252} + 27742317777372353535851937790883648493\\)
/// of the prime-order subgroup, as 32 little-endian bytes.
///
/// This is deliberately not a [`Scalar`](crate::scalar::Scalar), since a
/// `Scalar` always holds a value *below* \\(\ell\\).
pub const BASEPOINT_ORDER: [u8; 32] = [
    0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde,
    0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x10,
];

/// `L` is the order of the basepoint, unpacked to 52-bit limbs.
pub(crate) const L: UnpackedScalar = UnpackedScalar([
    0x0002631a5cf5d3ed,
    0x000dea2f79cd6581,
    0x000000000014def9,
    0x0000000000000000,
    0x0000100000000000,
]);

/// `L` * `LFACTOR` = -1 (mod 2^52)
pub(crate) const LFACTOR: u64 = 0x51da312547e1b;

/// `R` = R % L where R = 2^260
pub(crate) const R: UnpackedScalar = UnpackedScalar([
    0x000f48bd6721e6ed,
    0x0003bab5ac67e45a,
    0x000fffffeb35e51b,
    0x000fffffffffffff,
    0x00000fffffffffff,
]);

/// `RR` = (R^2) % L where R = 2^260
pub(crate) const RR: UnpackedScalar = UnpackedScalar([
    0x0009d265e952d13b,
    0x000d63c715bea69f,
    0x0005be65cb687604,
    0x0003dceec73d217f,
    0x000009411b7c309a,
]);

#[cfg(test)]
mod test {
    use super::*;
    use crate::field::FieldElement;

    #[test]
    fn test_sqrt_minus_one() {
        // i^2 = -1
        assert_eq!(SQRT_M1.square(), FieldElement::MINUS_ONE);
        // and our constant is the nonnegative root.
        assert!(bool::from(!SQRT_M1.is_negative()));
    }

    #[test]
    fn test_d_vs_ratio() {
        // d = -121665/121666
        let a = -&FieldElement([121665, 0, 0, 0, 0]);
        let b = FieldElement([121666, 0, 0, 0, 0]);
        let d = &a * &b.invert();
        assert_eq!(d, EDWARDS_D);
        assert_eq!(&d + &d, EDWARDS_D2);
    }

    #[test]
    fn test_sqrt_ad_minus_one() {
        // With a = -1, a*d - 1 = -(d + 1).
        let ad_minus_one = -&(&EDWARDS_D + &FieldElement::ONE);
        assert_eq!(SQRT_AD_MINUS_ONE.square(), ad_minus_one);
    }

    #[test]
    fn test_invsqrt_a_minus_d() {
        // With a = -1, a - d = -(1 + d).
        let a_minus_d = -&(&FieldElement::ONE + &EDWARDS_D);
        assert_eq!(
            &INVSQRT_A_MINUS_D.square() * &a_minus_d,
            FieldElement::ONE
        );
    }

    #[test]
    fn test_elligator_constants() {
        let d_sq = EDWARDS_D.square();
        assert_eq!(
            &FieldElement::ONE - &d_sq,
            ONE_MINUS_EDWARDS_D_SQUARED
        );
        let d_minus_one = &EDWARDS_D - &FieldElement::ONE;
        assert_eq!(d_minus_one.square(), EDWARDS_D_MINUS_ONE_SQUARED);
    }

    #[test]
    fn test_basepoint_is_valid() {
        // y = 4/5
        let four = FieldElement([4, 0, 0, 0, 0]);
        let five = FieldElement([5, 0, 0, 0, 0]);
        let y = &four * &five.invert();
        assert_eq!(y, ED25519_BASEPOINT_POINT.Y);
        // T = X*Y (Z = 1)
        assert_eq!(
            &ED25519_BASEPOINT_POINT.X * &ED25519_BASEPOINT_POINT.Y,
            ED25519_BASEPOINT_POINT.T
        );
        // and the point satisfies the curve equation.
        assert!(bool::from(
            ED25519_BASEPOINT_POINT.to_affine().is_on_curve()
        ));
    }

    #[test]
    fn test_scalar_montgomery_constants() {
        // L * LFACTOR = -1 (mod 2^52)
        let l_lfactor = L.0[0].wrapping_mul(LFACTOR) & ((1u64 << 52) - 1);
        assert_eq!(l_lfactor, (1u64 << 52) - 1);
        // R * R = RR (mod l), computed via Montgomery: (R*R)/R = R,
        // and (RR * 1)/R = R/R * R = ... spot-check through mul instead:
        // montgomery_mul(R, RR) = R*RR/R = RR.
        let rr = UnpackedScalar::montgomery_mul(&R, &RR);
        for i in 0..5 {
            assert_eq!(rr.0[i], RR.0[i]);
        }
    }
}
