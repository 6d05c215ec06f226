// -*- mode: rust; -*-
//
// This file is part of ed25519-ristretto.
// See LICENSE for licensing information.

//! Group operations for Curve25519 in twisted Edwards form.
//!
//! ## Encoding and decoding
//!
//! Points are encoded per RFC 8032: the 32-byte little-endian encoding
//! of the y-coordinate, with the sign of x packed into the high bit of
//! the final byte.  [`CompressedEdwardsY::decompress`] accepts any
//! point on the curve, including the eight points of small order;
//! callers that require prime-order subgroup membership must check
//! ([`EdwardsPoint::is_small_order`]) or use the
//! [`ristretto`](crate::ristretto) module instead.
//!
//! ## Internal representation
//!
//! An [`EdwardsPoint`] holds extended coordinates \\((X:Y:Z:T)\\) with
//! \\(x = X/Z\\), \\(y = Y/Z\\), \\(xy = T/Z\\).  Addition and doubling
//! use the unified extended-coordinate formulas for \\(a = -1\\), which
//! have no exceptional cases, so no operation here needs to branch on
//! its inputs.
//!
//! ## Scalar multiplication
//!
//! * [`EdwardsPoint::mul_base`] — fixed-base, through the precomputed
//!   table managed by the [`window`](crate::window) module;
//! * [`EdwardsPoint::vartime_mul`] — variable-base double-and-add whose
//!   running time depends on the scalar.  It must only be used where
//!   the scalar is public, as it is during signature verification.

use core::fmt::Debug;
use core::ops::{Add, Neg, Sub};

use subtle::Choice;
use subtle::ConditionallyNegatable;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use crate::constants;
use crate::errors::{InternalError, SignatureError};
use crate::field::FieldElement;
use crate::montgomery::MontgomeryPoint;
use crate::scalar::Scalar;
use crate::traits::Identity;
use crate::window;

// ------------------------------------------------------------------------
// Compressed points
// ------------------------------------------------------------------------

/// In "Edwards y" / "Ed25519" format, the curve point \\((x,y)\\) is
/// determined by the \\(y\\)-coordinate and the sign of \\(x\\).
///
/// The first 255 bits of a `CompressedEdwardsY` represent the
/// \\(y\\)-coordinate.  The high bit of the 32nd byte gives the sign of
/// \\(x\\).
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

impl Identity for CompressedEdwardsY {
    fn identity() -> CompressedEdwardsY {
        CompressedEdwardsY([1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0, 0, 0, 0, 0, 0, 0])
    }
}

impl Default for CompressedEdwardsY {
    fn default() -> CompressedEdwardsY {
        CompressedEdwardsY::identity()
    }
}

impl CompressedEdwardsY {
    /// View this `CompressedEdwardsY` as an array of bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Copy this `CompressedEdwardsY` to an array of bytes.
    pub const fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Construct a `CompressedEdwardsY` from a slice of bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<CompressedEdwardsY, SignatureError> {
        if bytes.len() != 32 {
            return Err(SignatureError(InternalError::BytesLength {
                name: "CompressedEdwardsY",
                length: 32,
            }));
        }
        let mut array = [0u8; 32];
        array.copy_from_slice(bytes);
        Ok(CompressedEdwardsY(array))
    }

    /// Attempt to decompress to an `EdwardsPoint`.
    ///
    /// Returns `None` if the y-coordinate does not correspond to a
    /// curve point, i.e. when \\((y^2 - 1)/(dy^2 + 1)\\) is not a
    /// square.  The stored sign bit selects which square root becomes
    /// the x-coordinate.
    pub fn decompress(&self) -> Option<EdwardsPoint> {
        let Y = FieldElement::from_bytes(self.as_bytes());
        let Z = FieldElement::ONE;
        let YY = Y.square();
        let u = &YY - &Z; //  u = y² - 1
        let v = &(&YY * &constants::EDWARDS_D) + &Z; //  v = dy² + 1
        let (is_valid_y_coord, mut X) = FieldElement::sqrt_ratio_i(&u, &v);

        if (!is_valid_y_coord).into() {
            return None;
        }

        // sqrt_ratio_i always returns the nonnegative square root, so
        // we negate according to the supplied sign bit.
        let compressed_sign_bit = Choice::from(self.as_bytes()[31] >> 7);
        X.conditional_negate(compressed_sign_bit);

        let T = &X * &Y;
        Some(EdwardsPoint { X, Y, Z, T })
    }
}

// ------------------------------------------------------------------------
// Affine points
// ------------------------------------------------------------------------

/// A point \\((x, y)\\) on the curve in affine coordinates.
///
/// Affine points are a conversion endpoint, not an arithmetic type:
/// all group operations run on [`EdwardsPoint`]s.
#[derive(Copy, Clone)]
pub struct AffinePoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
}

impl Debug for AffinePoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "AffinePoint{{\n\tx: {:?},\n\ty: {:?}\n}}", &self.x, &self.y)
    }
}

impl Identity for AffinePoint {
    fn identity() -> AffinePoint {
        AffinePoint {
            x: FieldElement::ZERO,
            y: FieldElement::ONE,
        }
    }
}

impl Eq for AffinePoint {}

impl PartialEq for AffinePoint {
    fn eq(&self, other: &AffinePoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl ConstantTimeEq for AffinePoint {
    fn ct_eq(&self, other: &AffinePoint) -> Choice {
        self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y)
    }
}

impl AffinePoint {
    /// Attempt to construct an `AffinePoint` from coordinate encodings.
    ///
    /// Both inputs are canonical little-endian field elements (bit 255
    /// is ignored).  Returns `None` if \\((x, y)\\) does not satisfy
    /// the curve equation \\(-x^2 + y^2 = 1 + dx^2y^2\\).
    pub fn from_bytes(x: &[u8; 32], y: &[u8; 32]) -> Option<AffinePoint> {
        let point = AffinePoint {
            x: FieldElement::from_bytes(x),
            y: FieldElement::from_bytes(y),
        };
        if point.is_on_curve().into() {
            Some(point)
        } else {
            None
        }
    }

    /// Check the twisted Edwards curve equation.
    pub(crate) fn is_on_curve(&self) -> Choice {
        let xx = self.x.square();
        let yy = self.y.square();
        let lhs = &yy - &xx; //  -x² + y²
        let rhs = &FieldElement::ONE + &(&constants::EDWARDS_D * &(&xx * &yy));
        lhs.ct_eq(&rhs)
    }

    /// Lift to extended coordinates.
    pub fn to_edwards(&self) -> EdwardsPoint {
        EdwardsPoint {
            X: self.x,
            Y: self.y,
            Z: FieldElement::ONE,
            T: &self.x * &self.y,
        }
    }

    /// Compress this point to `CompressedEdwardsY` format.
    pub fn compress(&self) -> CompressedEdwardsY {
        let mut s = self.y.to_bytes();
        s[31] ^= self.x.is_negative().unwrap_u8() << 7;
        CompressedEdwardsY(s)
    }
}

// ------------------------------------------------------------------------
// Extended points
// ------------------------------------------------------------------------

/// An `EdwardsPoint` represents a point on the Edwards form of
/// Curve25519, in extended coordinates \\((X:Y:Z:T)\\).
#[derive(Copy, Clone)]
pub struct EdwardsPoint {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) Z: FieldElement,
    pub(crate) T: FieldElement,
}

impl Debug for EdwardsPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "EdwardsPoint{{\n\tX: {:?},\n\tY: {:?},\n\tZ: {:?},\n\tT: {:?}\n}}",
            &self.X, &self.Y, &self.Z, &self.T
        )
    }
}

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
    /// Equality of projective points is equality of the underlying
    /// affine points, checked by cross-multiplication:
    /// \\(X_1 Z_2 = X_2 Z_1\\) and \\(Y_1 Z_2 = Y_2 Z_1\\).
    fn ct_eq(&self, other: &EdwardsPoint) -> Choice {
        (&self.X * &other.Z).ct_eq(&(&other.X * &self.Z))
            & (&self.Y * &other.Z).ct_eq(&(&other.Y * &self.Z))
    }
}

impl Eq for EdwardsPoint {}

impl PartialEq for EdwardsPoint {
    fn eq(&self, other: &EdwardsPoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl<'a, 'b> Add<&'b EdwardsPoint> for &'a EdwardsPoint {
    type Output = EdwardsPoint;

    /// Unified addition in extended coordinates ("add-2008-hwcd-3" with
    /// the \\(a = -1\\) specialization).  Complete: valid for any pair
    /// of curve points, including doublings and the identity.
    fn add(self, other: &'b EdwardsPoint) -> EdwardsPoint {
        let PP = &(&self.Y + &self.X) * &(&other.Y + &other.X);
        let MM = &(&self.Y - &self.X) * &(&other.Y - &other.X);
        let TT2d = &(&self.T * &other.T) * &constants::EDWARDS_D2;
        let ZZ = &self.Z * &other.Z;
        let ZZ2 = &ZZ + &ZZ;

        // The completed point ((E:G), (H:F)) in P¹ × P¹ ...
        let E = &PP - &MM;
        let F = &ZZ2 - &TT2d;
        let G = &ZZ2 + &TT2d;
        let H = &PP + &MM;

        // ... converted back to extended coordinates.
        EdwardsPoint {
            X: &E * &F,
            Y: &G * &H,
            Z: &F * &G,
            T: &E * &H,
        }
    }
}

impl<'a, 'b> Sub<&'b EdwardsPoint> for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    fn sub(self, other: &'b EdwardsPoint) -> EdwardsPoint {
        self + &(-other)
    }
}

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

impl EdwardsPoint {
    /// Add this point to itself.
    ///
    /// Uses the dedicated doubling formulas, which cost four squarings
    /// against the eight multiplications of a generic addition.
    pub fn double(&self) -> EdwardsPoint {
        let XX = self.X.square();
        let YY = self.Y.square();
        let ZZ2 = self.Z.square2();
        let X_plus_Y_sq = (&self.X + &self.Y).square();
        let YY_plus_XX = &YY + &XX;
        let YY_minus_XX = &YY - &XX;

        let E = &X_plus_Y_sq - &YY_plus_XX;
        let F = &ZZ2 - &YY_minus_XX;
        let G = YY_minus_XX;
        let H = YY_plus_XX;

        EdwardsPoint {
            X: &E * &F,
            Y: &G * &H,
            Z: &F * &G,
            T: &E * &H,
        }
    }

    /// Convert to affine coordinates.
    pub fn to_affine(&self) -> AffinePoint {
        let recip = self.Z.invert();
        AffinePoint {
            x: &self.X * &recip,
            y: &self.Y * &recip,
        }
    }

    /// Compress this point to `CompressedEdwardsY` format.
    pub fn compress(&self) -> CompressedEdwardsY {
        let recip = self.Z.invert();
        let x = &self.X * &recip;
        let y = &self.Y * &recip;
        let mut s = y.to_bytes();
        s[31] ^= x.is_negative().unwrap_u8() << 7;
        CompressedEdwardsY(s)
    }

    /// Convert this point to its Montgomery \\(u\\)-coordinate,
    /// \\(u = (1+y)/(1-y)\\).
    ///
    /// The identity maps to \\(u = 0\\), through the convention that
    /// inversion of zero yields zero.  Note that the result identifies
    /// \\(P\\) with \\(-P\\), as the Montgomery form forgets the sign.
    pub fn to_montgomery(&self) -> MontgomeryPoint {
        // u = (1+y)/(1-y) = (Z+Y)/(Z-Y) without normalizing y first.
        let U = &self.Z + &self.Y;
        let W = &self.Z - &self.Y;
        let u = &U * &W.invert();
        MontgomeryPoint(u.to_bytes())
    }

    /// Fixed-base scalar multiplication `scalar * B` with the Ed25519
    /// basepoint `B`, using the process-wide precomputed table.
    ///
    /// The first call builds the table at the default window width; see
    /// [`window::precompute`](crate::window::precompute) to rebuild it
    /// at another width.
    pub fn mul_base(scalar: &Scalar) -> EdwardsPoint {
        window::basepoint_table().mul_base(scalar)
    }

    /// Variable-base, variable-time scalar multiplication
    /// `scalar * self` by left-to-right double-and-add.
    ///
    /// # Warning
    ///
    /// The running time and branch pattern depend on the scalar.  This
    /// is fine for the public scalars of signature verification, and
    /// wrong for anything secret.
    pub fn vartime_mul(&self, scalar: &Scalar) -> EdwardsPoint {
        let mut acc = EdwardsPoint::identity();
        // Reduced scalars are below 2^253.
        for i in (0..253).rev() {
            acc = acc.double();
            if scalar.bit(i) == 1 {
                acc = &acc + self;
            }
        }
        acc
    }

    /// Compute \\(aA + bB\\) in variable time, where \\(B\\) is the
    /// Ed25519 basepoint.
    ///
    /// This is the verification-equation workhorse; both scalars are
    /// public there.
    pub fn vartime_double_scalar_mul_basepoint(
        a: &Scalar,
        A: &EdwardsPoint,
        b: &Scalar,
    ) -> EdwardsPoint {
        &A.vartime_mul(a) + &EdwardsPoint::mul_base(b)
    }

    /// Multiply by the cofactor: return \\(8P\\).
    pub fn mul_by_cofactor(&self) -> EdwardsPoint {
        self.mul_by_pow_2(3)
    }

    /// Compute \\(2^k P\\) by successive doublings.
    pub(crate) fn mul_by_pow_2(&self, k: u32) -> EdwardsPoint {
        debug_assert!(k > 0);
        let mut r = self.double();
        for _ in 1..k {
            r = r.double();
        }
        r
    }

    /// Determine if this point is of small order, i.e. lies in the
    /// 8-torsion subgroup \\(\mathcal E[8]\\).
    ///
    /// Points produced by key derivation and signing are never of small
    /// order, but [`CompressedEdwardsY::decompress`] accepts such
    /// points deliberately.
    pub fn is_small_order(&self) -> bool {
        use crate::traits::IsIdentity;
        self.mul_by_cofactor().is_identity()
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
