// -*- mode: rust; -*-
//
// This file is part of ed25519-ristretto.
// See LICENSE for licensing information.

//! Ed25519 public keys and signature verification.

use core::fmt::Debug;

use sha2::{Digest, Sha512};

use subtle::Choice;
use subtle::ConstantTimeEq;

use crate::edwards::{CompressedEdwardsY, EdwardsPoint};
use crate::errors::{InternalError, SignatureError};
use crate::scalar::Scalar;
use crate::signature::Signature;
use crate::signing::ExpandedSecretKey;
use crate::PUBLIC_KEY_LENGTH;

/// An Ed25519 public key.
///
/// Holds both the compressed wire form and the decompressed point, so
/// that a key parsed once can verify many signatures without
/// re-decompressing.
#[derive(Copy, Clone)]
pub struct VerifyingKey {
    pub(crate) compressed: CompressedEdwardsY,
    pub(crate) point: EdwardsPoint,
}

impl Debug for VerifyingKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "VerifyingKey({:?}), {:?})", self.compressed, self.point)
    }
}

impl AsRef<[u8]> for VerifyingKey {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl ConstantTimeEq for VerifyingKey {
    fn ct_eq(&self, other: &VerifyingKey) -> Choice {
        self.compressed.ct_eq(&other.compressed)
    }
}

impl Eq for VerifyingKey {}

impl PartialEq for VerifyingKey {
    fn eq(&self, other: &VerifyingKey) -> bool {
        self.ct_eq(other).into()
    }
}

impl VerifyingKey {
    /// View this public key as an array of bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        self.compressed.as_bytes()
    }

    /// Copy this public key to an array of bytes.
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.compressed.to_bytes()
    }

    /// Construct a `VerifyingKey` from RFC 8032 wire format.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes do not encode a curve point.
    pub fn from_bytes(bytes: &[u8; PUBLIC_KEY_LENGTH]) -> Result<VerifyingKey, SignatureError> {
        let compressed = CompressedEdwardsY(*bytes);
        let point = compressed
            .decompress()
            .ok_or(SignatureError(InternalError::PointDecompression))?;

        Ok(VerifyingKey { compressed, point })
    }

    /// Derive the public key `A = a·B` from an expanded secret key.
    pub(crate) fn from_expanded(expanded: &ExpandedSecretKey) -> VerifyingKey {
        let point = EdwardsPoint::mul_base(&expanded.scalar);
        VerifyingKey {
            compressed: point.compress(),
            point,
        }
    }

    /// Check whether this public key is of small order, i.e. whether
    /// every message has the same signatures under it.
    ///
    /// Decompression deliberately accepts such keys (RFC 8032 wire
    /// compatibility); callers that want to reject them do so here.
    pub fn is_weak(&self) -> bool {
        self.point.is_small_order()
    }

    /// Verify `signature` on `message` with this public key.
    ///
    /// The check is *cofactorless*: compute `k = H(R ‖ A ‖ M) mod ℓ`
    /// and accept iff `s·B = R + k·A` exactly, as Edwards points.
    ///
    /// # Return
    ///
    /// `true` iff the signature is valid.  All failure modes return
    /// `false`: a mismatched verification equation, an `s` component
    /// that is not a canonical scalar below \\(\ell\\), and an `R`
    /// component that is not a curve point are indistinguishable to
    /// the caller, so this function cannot be used as a
    /// malformed-versus-forged oracle.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        let signature_R = match signature.R.decompress() {
            Some(point) => point,
            None => return false,
        };
        let s = match Scalar::from_canonical_bytes(signature.s) {
            Some(scalar) => scalar,
            None => return false,
        };

        let mut h = Sha512::new();
        h.update(signature.R.as_bytes());
        h.update(self.as_bytes());
        h.update(message);
        let k = Scalar::from_hash(h);

        // s·B = R + k·A  rearranged as  R = k·(-A) + s·B, so that both
        // scalar multiplications land in one vartime call.
        let minus_A = -&self.point;
        let expected_R = EdwardsPoint::vartime_double_scalar_mul_basepoint(&k, &minus_A, &s);

        expected_R == signature_R
    }
}

/// Verify `signature` over `message` under `public_key`, with all
/// inputs as raw bytes.
///
/// This is [`VerifyingKey::verify`] with the parsing folded in: a
/// signature that is not 64 bytes, a public key that is not 32 bytes
/// or not a curve point, and a forged signature all yield `false`.
pub fn verify(signature: &[u8], message: &[u8], public_key: &[u8]) -> bool {
    let signature = match Signature::from_slice(signature) {
        Ok(signature) => signature,
        Err(_) => return false,
    };
    let public_key: &[u8; PUBLIC_KEY_LENGTH] = match public_key.try_into() {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };
    let verifying_key = match VerifyingKey::from_bytes(public_key) {
        Ok(key) => key,
        Err(_) => return false,
    };

    verifying_key.verify(message, &signature)
}
