// -*- mode: rust; -*-
//
// This file is part of ed25519-ristretto.
// See LICENSE for licensing information.

//! Ed25519 secret keys and signing, per RFC 8032.

use core::fmt::Debug;

use rand_core::CryptoRngCore;

use sha2::{Digest, Sha512};

use zeroize::Zeroize;

use crate::edwards::EdwardsPoint;
use crate::scalar::Scalar;
use crate::signature::Signature;
use crate::verifying::VerifyingKey;
use crate::SECRET_KEY_LENGTH;

/// An Ed25519 secret key seed: 32 uniformly random bytes.
///
/// All key material is derived from the seed by hashing, so this is
/// the only secret a caller needs to store.
pub type SecretKey = [u8; SECRET_KEY_LENGTH];

/// An Ed25519 signing key: a seed together with its derived public
/// key.
#[derive(Clone)]
pub struct SigningKey {
    /// The seed, from which the signing scalar and nonce prefix are
    /// derived on demand.
    pub(crate) secret_key: SecretKey,
    /// The public half, derived once at construction.
    pub(crate) verifying_key: VerifyingKey,
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // The seed stays out of debug output.
        write!(f, "SigningKey{{ verifying_key: {:?} }}", &self.verifying_key)
    }
}

impl Drop for SigningKey {
    fn drop(&mut self) {
        self.secret_key.zeroize();
    }
}

impl Eq for SigningKey {}

impl PartialEq for SigningKey {
    fn eq(&self, other: &SigningKey) -> bool {
        use subtle::ConstantTimeEq;
        self.secret_key.ct_eq(&other.secret_key).into()
    }
}

impl<'a> From<&'a SigningKey> for VerifyingKey {
    fn from(signing_key: &'a SigningKey) -> VerifyingKey {
        signing_key.verifying_key
    }
}

impl SigningKey {
    /// Construct a `SigningKey` from a 32-byte seed.
    ///
    /// This is the `getPublicKey` moment: the seed is expanded with
    /// SHA-512 and the public key is derived and cached here.
    pub fn from_bytes(secret_key: &SecretKey) -> SigningKey {
        let expanded = ExpandedSecretKey::from(secret_key);
        let verifying_key = VerifyingKey::from_expanded(&expanded);
        SigningKey {
            secret_key: *secret_key,
            verifying_key,
        }
    }

    /// Generate a fresh `SigningKey` from a cryptographically secure
    /// RNG.
    pub fn generate<R: CryptoRngCore + ?Sized>(csprng: &mut R) -> SigningKey {
        let mut secret_key = SecretKey::default();
        csprng.fill_bytes(&mut secret_key);
        SigningKey::from_bytes(&secret_key)
    }

    /// View the seed of this `SigningKey` as an array of bytes.
    pub fn as_bytes(&self) -> &SecretKey {
        &self.secret_key
    }

    /// Copy the seed of this `SigningKey` to an array of bytes.
    pub fn to_bytes(&self) -> SecretKey {
        self.secret_key
    }

    /// Get the [`VerifyingKey`] for this `SigningKey`.
    pub fn verifying_key(&self) -> VerifyingKey {
        self.verifying_key
    }

    /// Sign a message with this `SigningKey`, producing a deterministic
    /// signature per RFC 8032:
    ///
    /// 1. `r = H(prefix ‖ M) mod ℓ`, with `prefix` the upper half of
    ///    the expanded seed;
    /// 2. `R = r·B`;
    /// 3. `k = H(R ‖ A ‖ M) mod ℓ`;
    /// 4. `s = r + k·a mod ℓ`.
    ///
    /// The expanded secret material lives on the stack for the
    /// duration of this call and is wiped before it returns.
    pub fn sign(&self, message: &[u8]) -> Signature {
        let expanded = ExpandedSecretKey::from(&self.secret_key);

        let mut h = Sha512::new();
        h.update(expanded.hash_prefix);
        h.update(message);
        let r = Scalar::from_hash(h);

        let R = EdwardsPoint::mul_base(&r).compress();

        let mut h = Sha512::new();
        h.update(R.as_bytes());
        h.update(self.verifying_key.as_bytes());
        h.update(message);
        let k = Scalar::from_hash(h);

        let s = &(&k * &expanded.scalar) + &r;

        Signature { R, s: s.to_bytes() }
    }
}

/// An "expanded" secret key: the clamped signing scalar and the nonce
/// prefix, as derived from the seed by SHA-512.
///
/// This type never leaves the crate; it is materialized inside
/// [`SigningKey::from_bytes`] and [`SigningKey::sign`] and zeroized on
/// drop.
pub(crate) struct ExpandedSecretKey {
    pub(crate) scalar: Scalar,
    pub(crate) hash_prefix: [u8; 32],
}

impl Drop for ExpandedSecretKey {
    fn drop(&mut self) {
        self.scalar.zeroize();
        self.hash_prefix.zeroize();
    }
}

impl<'a> From<&'a SecretKey> for ExpandedSecretKey {
    fn from(secret_key: &'a SecretKey) -> ExpandedSecretKey {
        let mut hash = [0u8; 64];
        let mut lower = [0u8; 32];
        let mut upper = [0u8; 32];

        let mut h = Sha512::new();
        h.update(secret_key);
        hash.copy_from_slice(h.finalize().as_slice());

        lower.copy_from_slice(&hash[00..32]);
        upper.copy_from_slice(&hash[32..64]);

        // Clamp: clear the cofactor bits and fix the top bit.  The
        // clamped integer is then reduced mod ℓ; since the basepoint
        // has order ℓ this changes neither the public key nor any
        // signature, and it keeps every Scalar in canonical range.
        lower[0] &= 248;
        lower[31] &= 63;
        lower[31] |= 64;

        let expanded = ExpandedSecretKey {
            scalar: Scalar::from_bytes_mod_order(lower),
            hash_prefix: upper,
        };

        hash.zeroize();
        lower.zeroize();

        expanded
    }
}
