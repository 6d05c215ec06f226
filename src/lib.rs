// -*- mode: rust; -*-
//
// This file is part of ed25519-ristretto.
// See LICENSE for licensing information.

//! Ed25519 signatures and the Ristretto255 prime-order group, built on a
//! single 64-bit serial implementation of Curve25519 in twisted Edwards
//! form.
//!
//! # Signing and verifying
//!
//! ```
//! use ed25519_ristretto::SigningKey;
//!
//! let signing_key = SigningKey::from_bytes(&[42u8; 32]);
//! let message = b"all i know is that i know nothing";
//!
//! let signature = signing_key.sign(message);
//! let verifying_key = signing_key.verifying_key();
//!
//! assert!(verifying_key.verify(message, &signature));
//! ```
//!
//! Verification is *cofactorless*: a signature is accepted iff
//! `s·B = R + k·A` holds exactly, not merely in the quotient by the
//! 8-torsion.  `verify` returns a plain `bool`, and every decoding failure
//! (a non-canonical `s`, an off-curve `R` or `A`) maps to `false` so that
//! malformed inputs are indistinguishable from forgeries.
//!
//! # The Ristretto255 group
//!
//! [`ristretto::RistrettoPoint`] exposes Curve25519 as a group of prime
//! order \\(\ell\\), with injective 32-byte encodings and a hash-to-group
//! map ([`ristretto::RistrettoPoint::from_uniform_bytes`]).
//!
//! # Scalar multiplication
//!
//! Two distinct operations are provided, and they are deliberately not
//! collapsed into one:
//!
//! * [`edwards::EdwardsPoint::mul_base`] multiplies the Ed25519 basepoint
//!   using a process-wide precomputed table (see [`window`]);
//! * [`edwards::EdwardsPoint::vartime_mul`] is a variable-base,
//!   variable-*time* double-and-add for scalars that are public, such as
//!   the challenge scalar during verification.
//!
//! Nothing in this crate is hardened against side channels beyond the
//! structure of the algorithms themselves; see the individual items for
//! what is and is not promised.

#![warn(missing_docs)]
#![allow(non_snake_case)]

mod field;
mod signature;
mod signing;
mod verifying;

pub mod constants;
pub mod edwards;
pub mod errors;
pub mod montgomery;
pub mod ristretto;
pub mod scalar;
pub mod traits;
pub mod window;

pub use crate::signature::Signature;
pub use crate::signing::{SecretKey, SigningKey};
pub use crate::verifying::{verify, VerifyingKey};

/// The length of an Ed25519 secret key seed, in bytes.
pub const SECRET_KEY_LENGTH: usize = 32;

/// The length of an Ed25519 public key, in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// The length of an Ed25519 signature, in bytes.
pub const SIGNATURE_LENGTH: usize = 64;
