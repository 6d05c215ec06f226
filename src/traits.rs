// -*- mode: rust; -*-
//
// This file is part of ed25519-ristretto.
// See LICENSE for licensing information.

//! Traits shared by the group types.

use subtle::ConstantTimeEq;

/// Trait for getting the identity element of a group.
pub trait Identity {
    /// Returns the identity element of the group.
    fn identity() -> Self;
}

/// Trait for testing if an element is the identity element of a group.
pub trait IsIdentity {
    /// Return true if this element is the identity element of the group.
    fn is_identity(&self) -> bool;
}

/// Implement generically for any group element with a constant-time
/// equality check.
impl<T> IsIdentity for T
where
    T: ConstantTimeEq + Identity,
{
    fn is_identity(&self) -> bool {
        self.ct_eq(&T::identity()).into()
    }
}
