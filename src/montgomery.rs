// -*- mode: rust; -*-
//
// This file is part of ed25519-ristretto.
// See LICENSE for licensing information.

//! The Montgomery form \\(u\\)-coordinate of a curve point.
//!
//! This crate does not implement X25519 key exchange; the only
//! Montgomery-form functionality offered is the birational map from the
//! Edwards curve, [`EdwardsPoint::to_montgomery`][to_montgomery], whose
//! output is the 32-byte little-endian \\(u = (1+y)/(1-y)\\) that X25519
//! implementations consume.
//!
//! [to_montgomery]: crate::edwards::EdwardsPoint::to_montgomery

use core::fmt::Debug;

use subtle::Choice;
use subtle::ConstantTimeEq;

/// The \\(u\\)-coordinate of a point on the Montgomery form of
/// Curve25519, in 32-byte little-endian wire format.
#[derive(Copy, Clone, Default, Hash)]
pub struct MontgomeryPoint(pub [u8; 32]);

impl ConstantTimeEq for MontgomeryPoint {
    fn ct_eq(&self, other: &MontgomeryPoint) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl Eq for MontgomeryPoint {}

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

impl MontgomeryPoint {
    /// View this `MontgomeryPoint` as an array of bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Copy this `MontgomeryPoint` to an array of bytes.
    pub const fn to_bytes(&self) -> [u8; 32] {
        self.0
    }
}
