// -*- mode: rust; -*-
//
// This file is part of ed25519-ristretto.
// See LICENSE for licensing information.

//! Integration tests for Ed25519 signing and verification.

use ed25519_ristretto::{Signature, SigningKey, VerifyingKey};

use hex_literal::hex;
use rand::{thread_rng, Rng};

/// RFC 8032 test vectors, §7.1: (seed, public key, message, signature).
const RFC8032_VECTORS: &[(&[u8; 32], &[u8; 32], &[u8], &[u8; 64])] = &[
    (
        &hex!("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60"),
        &hex!("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"),
        &[],
        &hex!(
            "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155
             5fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b"
        ),
    ),
    (
        &hex!("4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb"),
        &hex!("3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c"),
        &[0x72],
        &hex!(
            "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da
             085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00"
        ),
    ),
    (
        &hex!("c5aa8df43f9f837bedb7442f31dcb7b166d38535076f094b85ce3a2e0b4458f7"),
        &hex!("fc51cd8e6218a1a38da47ed00230f0580816ed13ba3303ac5deb911548908025"),
        &[0xaf, 0x82],
        &hex!(
            "6291d657deec24024827e69c3abe01a30ce548a284743a445e3680d7db5ac3ac
             18ff9b538d16f290ae67f760984dc6594a7c15e9716ed28dc027beceea1ec40a"
        ),
    ),
];

#[test]
fn rfc8032_key_derivation() {
    for (seed, public, _, _) in RFC8032_VECTORS {
        let signing_key = SigningKey::from_bytes(seed);
        assert_eq!(signing_key.verifying_key().as_bytes(), *public);
    }
}

#[test]
fn rfc8032_signing() {
    for (seed, _, message, expected) in RFC8032_VECTORS {
        let signing_key = SigningKey::from_bytes(seed);
        let signature = signing_key.sign(message);
        assert_eq!(&signature.to_bytes(), *expected);
    }
}

#[test]
fn rfc8032_verification() {
    for (seed, public, message, expected) in RFC8032_VECTORS {
        let verifying_key = VerifyingKey::from_bytes(public).unwrap();
        let signature = Signature::from_bytes(expected);
        assert!(verifying_key.verify(message, &signature));

        // ... and the derived key agrees with the stored one.
        let signing_key = SigningKey::from_bytes(seed);
        assert_eq!(signing_key.verifying_key(), verifying_key);
    }
}

#[test]
fn sign_verify_round_trips() {
    let mut rng = thread_rng();
    for _ in 0..32 {
        let signing_key = SigningKey::generate(&mut rng);
        let verifying_key = signing_key.verifying_key();

        let len = rng.gen_range(0..128);
        let mut message = vec![0u8; len];
        rng.fill(&mut message[..]);

        let signature = signing_key.sign(&message);
        assert!(verifying_key.verify(&message, &signature));

        // A different message must not verify.
        let mut other = message.clone();
        other.push(0x2a);
        assert!(!verifying_key.verify(&other, &signature));

        // Neither must a different key.
        let other_key = SigningKey::generate(&mut rng).verifying_key();
        assert!(!other_key.verify(&message, &signature));
    }
}

#[test]
fn bit_flips_invalidate_signature() {
    let signing_key = SigningKey::from_bytes(&[0x42u8; 32]);
    let verifying_key = signing_key.verifying_key();
    let message = b"flip one bit and everything falls apart";
    let signature = signing_key.sign(message).to_bytes();

    for byte in 0..64 {
        for bit in 0..8 {
            let mut mangled = signature;
            mangled[byte] ^= 1 << bit;
            let mangled = Signature::from_bytes(&mangled);
            assert!(
                !verifying_key.verify(message, &mangled),
                "flipped bit {} of byte {} still verified",
                bit,
                byte
            );
        }
    }
}

/// Add the group order to the `s` half of a signature, producing the
/// non-canonical encoding of the same residue class.
fn add_order_to_s(signature: &[u8; 64]) -> [u8; 64] {
    const ORDER: [u8; 32] = ed25519_ristretto::constants::BASEPOINT_ORDER;
    let mut out = *signature;
    let mut carry = 0u16;
    for i in 0..32 {
        let sum = out[32 + i] as u16 + ORDER[i] as u16 + carry;
        out[32 + i] = sum as u8;
        carry = sum >> 8;
    }
    assert_eq!(carry, 0, "s + l overflowed 32 bytes");
    out
}

#[test]
fn non_canonical_s_is_rejected() {
    let signing_key = SigningKey::from_bytes(&[0x17u8; 32]);
    let verifying_key = signing_key.verifying_key();
    let message = b"malleability check";

    let good = signing_key.sign(message);
    assert!(verifying_key.verify(message, &good));

    // s + l encodes the same residue mod l, but it is not canonical and
    // must be rejected outright.
    let malleated = Signature::from_bytes(&add_order_to_s(&good.to_bytes()));
    assert!(!verifying_key.verify(message, &malleated));

    // Likewise an s of exactly l.
    let mut s_is_order = good.to_bytes();
    s_is_order[32..64].copy_from_slice(&ed25519_ristretto::constants::BASEPOINT_ORDER);
    assert!(!verifying_key.verify(message, &Signature::from_bytes(&s_is_order)));
}

#[test]
fn garbage_public_key_is_rejected() {
    // y = 2 is not on the curve.
    let mut bad = [0u8; 32];
    bad[0] = 2;
    assert!(VerifyingKey::from_bytes(&bad).is_err());
}

#[test]
fn verification_with_off_curve_r_is_false() {
    let signing_key = SigningKey::from_bytes(&[9u8; 32]);
    let verifying_key = signing_key.verifying_key();
    let message = b"R off curve";

    let mut sig_bytes = signing_key.sign(message).to_bytes();
    // Replace R with the y = 2 non-point.
    let mut bad_r = [0u8; 32];
    bad_r[0] = 2;
    sig_bytes[0..32].copy_from_slice(&bad_r);
    assert!(!verifying_key.verify(message, &Signature::from_bytes(&sig_bytes)));
}

#[test]
fn window_widths_produce_identical_keys() {
    let seeds: Vec<[u8; 32]> = (0u8..100).map(|i| [i; 32]).collect();

    let keys_default: Vec<[u8; 32]> = seeds
        .iter()
        .map(|seed| SigningKey::from_bytes(seed).verifying_key().to_bytes())
        .collect();

    ed25519_ristretto::window::precompute(8);
    let keys_w8: Vec<[u8; 32]> = seeds
        .iter()
        .map(|seed| SigningKey::from_bytes(seed).verifying_key().to_bytes())
        .collect();

    assert_eq!(keys_default, keys_w8);

    ed25519_ristretto::window::precompute(ed25519_ristretto::window::DEFAULT_WINDOW_WIDTH);
}

#[test]
fn signature_parsing_round_trips() {
    let signing_key = SigningKey::from_bytes(&[7u8; 32]);
    let signature = signing_key.sign(b"wire format");
    let parsed = Signature::from_slice(&signature.to_bytes()[..]).unwrap();
    assert_eq!(parsed, signature);
}

#[test]
fn bytes_level_verify_funnels_all_failures() {
    let signing_key = SigningKey::from_bytes(&[3u8; 32]);
    let pk = signing_key.verifying_key().to_bytes();
    let message = b"bytes api";
    let sig = signing_key.sign(message).to_bytes();

    assert!(ed25519_ristretto::verify(&sig, message, &pk));

    // Wrong lengths are false, not errors.
    assert!(!ed25519_ristretto::verify(&sig[..63], message, &pk));
    assert!(!ed25519_ristretto::verify(&sig, message, &pk[..31]));

    // An off-curve public key is false as well.
    let mut off_curve = [0u8; 32];
    off_curve[0] = 2;
    assert!(!ed25519_ristretto::verify(&sig, message, &off_curve));
}

#[test]
fn weak_keys_are_detectable() {
    // The encoding of the identity is a valid RFC 8032 public key, but
    // it signs nothing and verifies everything with s = 0.
    let identity_bytes = {
        let mut bytes = [0u8; 32];
        bytes[0] = 1;
        bytes
    };
    let weak = VerifyingKey::from_bytes(&identity_bytes).unwrap();
    assert!(weak.is_weak());

    let strong = SigningKey::from_bytes(&[1u8; 32]).verifying_key();
    assert!(!strong.is_weak());
}
