// -*- mode: rust; -*-
//
// This file is part of ed25519-ristretto.
// See LICENSE for licensing information.

//! Errors which may occur when parsing keys, points, or signatures from
//! wire formats.
//!
//! Note that failure to *verify* a signature is not an error:
//! [`VerifyingKey::verify`](crate::VerifyingKey::verify) returns `false`
//! for bad signatures and malformed signatures alike, so that callers
//! cannot be turned into a malformed-versus-forged oracle.

use core::fmt;
use core::fmt::Display;

/// Internal errors.  Most application-level developers will likely not
/// need to pay any attention to these.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum InternalError {
    /// A compressed point was not the encoding of a curve point.
    PointDecompression,
    /// A scalar encoding was not a canonical value below the group order.
    ScalarFormat,
    /// An error in the length of bytes handed to a constructor.
    ///
    /// `name` is the type that is returning the error, and `length` is
    /// the length in bytes its constructor expects.
    BytesLength {
        name: &'static str,
        length: usize,
    },
}

impl Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            InternalError::PointDecompression => write!(f, "Cannot decompress Edwards point"),
            InternalError::ScalarFormat => write!(f, "Scalar was not a canonical value below the group order"),
            InternalError::BytesLength { name: n, length: l } => {
                write!(f, "{} must be {} bytes in length", n, l)
            }
        }
    }
}

impl std::error::Error for InternalError {}

/// Errors which may occur while processing keys, points, and signatures.
///
/// This error may arise due to:
///
/// * Being given bytes with a length different to what was expected.
///
/// * A problem decompressing an Edwards or Ristretto point.
///
/// * A problem with the format of `s`, a scalar, in a signature.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SignatureError(pub(crate) InternalError);

impl Display for SignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for SignatureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}
