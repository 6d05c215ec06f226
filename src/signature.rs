// -*- mode: rust; -*-
//
// This file is part of ed25519-ristretto.
// See LICENSE for licensing information.

//! The Ed25519 signature wire format.

use core::fmt::Debug;

use crate::edwards::CompressedEdwardsY;
use crate::errors::{InternalError, SignatureError};
use crate::SIGNATURE_LENGTH;

/// An Ed25519 signature: the 64-byte concatenation `R ‖ s` of a
/// compressed curve point and a little-endian scalar.
///
/// Parsing a `Signature` performs no validation beyond the length.  In
/// particular, `s` is stored as raw bytes: whether it is a canonical
/// scalar below the group order is checked during
/// [`verification`](crate::VerifyingKey::verify), so a signature with
/// an out-of-range `s` fails to verify exactly like a forged one,
/// instead of failing to parse.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Signature {
    /// `R`, the compressed commitment point.
    pub(crate) R: CompressedEdwardsY,
    /// `s`, the scalar component, as unchecked little-endian bytes.
    pub(crate) s: [u8; 32],
}

impl Debug for Signature {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Signature{{ R: {:?}, s: {:?} }}", &self.R, &self.s)
    }
}

impl Signature {
    /// Construct a `Signature` from its 64-byte wire form.
    pub fn from_bytes(bytes: &[u8; SIGNATURE_LENGTH]) -> Signature {
        let mut R_bytes = [0u8; 32];
        let mut s_bytes = [0u8; 32];
        R_bytes.copy_from_slice(&bytes[0..32]);
        s_bytes.copy_from_slice(&bytes[32..64]);

        Signature {
            R: CompressedEdwardsY(R_bytes),
            s: s_bytes,
        }
    }

    /// Construct a `Signature` from a byte slice.
    ///
    /// # Errors
    ///
    /// Returns an error if the slice is not 64 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Signature, SignatureError> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(SignatureError(InternalError::BytesLength {
                name: "Signature",
                length: SIGNATURE_LENGTH,
            }));
        }
        let mut array = [0u8; SIGNATURE_LENGTH];
        array.copy_from_slice(bytes);
        Ok(Signature::from_bytes(&array))
    }

    /// Convert this `Signature` to its 64-byte wire form.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        bytes[0..32].copy_from_slice(self.R.as_bytes());
        bytes[32..64].copy_from_slice(&self.s);
        bytes
    }

    /// The `R` component of this signature.
    pub fn r_bytes(&self) -> &[u8; 32] {
        self.R.as_bytes()
    }

    /// The `s` component of this signature, unvalidated.
    pub fn s_bytes(&self) -> &[u8; 32] {
        &self.s
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn roundtrip() {
        let mut bytes = [0u8; 64];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8;
        }
        let sig = Signature::from_bytes(&bytes);
        assert_eq!(sig.to_bytes(), bytes);
        assert_eq!(Signature::from_slice(&bytes[..]).unwrap(), sig);
    }

    #[test]
    fn bad_length() {
        assert!(Signature::from_slice(&[0u8; 63]).is_err());
        assert!(Signature::from_slice(&[0u8; 65]).is_err());
    }
}
