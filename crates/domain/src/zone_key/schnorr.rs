//! A minimal deterministic Schnorr signature over edwards25519, used by
//! the ECDSA-style zone-key variant (spec §4.2: "standard Schnorr/EdDSA-
//! style signature for the variant").
//!
//! The EdDSA-style variant instead uses `ed25519-dalek`'s `hazmat` API
//! directly with the derived scalar (see [`super::private::ZonePrivate::sign`]);
//! this module exists because that crate has no equivalent entry point
//! for a second, differently-tagged curve variant built from the same
//! derived scalar.

use curve25519_dalek::constants::ED25519_BASEPOINT_TABLE;
use curve25519_dalek::edwards::EdwardsPoint;
use curve25519_dalek::scalar::Scalar;
use sha2::{Digest, Sha512};

pub fn sign(secret: &Scalar, public: &EdwardsPoint, message: &[u8]) -> [u8; 64] {
    let nonce = hash_to_scalar(&[&secret.to_bytes(), message]);
    let r_point = &ED25519_BASEPOINT_TABLE * &nonce;
    let challenge = hash_to_scalar(&[&r_point.compress().to_bytes(), &public.compress().to_bytes(), message]);
    let s = nonce + challenge * secret;

    let mut out = [0u8; 64];
    out[..32].copy_from_slice(&r_point.compress().to_bytes());
    out[32..].copy_from_slice(&s.to_bytes());
    out
}

pub fn verify(public: &EdwardsPoint, message: &[u8], signature: &[u8; 64]) -> bool {
    let r_bytes: [u8; 32] = signature[..32].try_into().unwrap();
    let s_bytes: [u8; 32] = signature[32..].try_into().unwrap();

    let Some(r_point) = curve25519_dalek::edwards::CompressedEdwardsY(r_bytes).decompress() else {
        return false;
    };
    let Some(s): Option<Scalar> = Option::from(Scalar::from_canonical_bytes(s_bytes)) else {
        return false;
    };

    let challenge = hash_to_scalar(&[&r_bytes, &public.compress().to_bytes(), message]);
    let lhs = &ED25519_BASEPOINT_TABLE * &s;
    let rhs = r_point + challenge * public;
    lhs == rhs
}

fn hash_to_scalar(parts: &[&[u8]]) -> Scalar {
    let mut hasher = Sha512::new();
    for part in parts {
        hasher.update(part);
    }
    let digest: [u8; 64] = hasher.finalize().into();
    Scalar::from_bytes_mod_order_wide(&digest)
}
