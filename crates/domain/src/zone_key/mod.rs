//! Variant-polymorphic zone keys (spec §3, §4.2).
//!
//! A zone key is modelled as a tagged variant over a shared capability
//! set (`derive`/`sign`/`verify`/`block_key`/`encrypt`/`decrypt`) rather
//! than inheritance, dispatched on the 4-byte type tag that prefixes
//! every serialized key — matching the "Variant polymorphism" design
//! note in spec §9.

pub mod private;
pub mod public;
pub(crate) mod schnorr;
pub mod ztld;

pub use private::ZonePrivate;
pub use public::ZonePublic;

use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_dalek::scalar::Scalar;
use hkdf::Hkdf;
use sha2::Sha512;

use crate::errors::{GnsError, GnsResult};

/// 4-byte type tag for the ECDSA-style variant.
pub const TAG_ECDSA: u32 = 0x0001_0000;
/// 4-byte type tag for the EdDSA-style variant.
pub const TAG_EDDSA: u32 = 0x0001_0014;

/// Serialized length of both `Zprv` and `Zid`: a 4-byte type tag plus 32
/// bytes of key material.
pub const ZONE_ID_LEN: usize = 36;
/// Length of a detached signature over a block's signed region.
pub const SIGNATURE_LEN: usize = 64;

/// Context string mixed into every derivation, matching spec §4.2.
const DERIVE_CONTEXT: &[u8] = b"gns";

/// The variant a zone key belongs to, read from its 4-byte type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneKeyType {
    Ecdsa,
    Eddsa,
}

impl ZoneKeyType {
    pub fn tag(self) -> u32 {
        match self {
            ZoneKeyType::Ecdsa => TAG_ECDSA,
            ZoneKeyType::Eddsa => TAG_EDDSA,
        }
    }

    pub fn from_tag(tag: u32) -> GnsResult<Self> {
        match tag {
            TAG_ECDSA => Ok(ZoneKeyType::Ecdsa),
            TAG_EDDSA => Ok(ZoneKeyType::Eddsa),
            other => Err(GnsError::BadZone(format!("unknown zone key type tag {other:#x}"))),
        }
    }
}

/// `h_mod`: the scalar derived for `(zone_pub_bytes, label)`, shared by
/// both variants (spec §4.2 step 1).
///
/// `h = HKDF-Expand(HKDF-Extract(salt=zone_pub_bytes, ikm=ctx), info=label, L=64)`,
/// reduced modulo the curve order.
pub(crate) fn derive_scalar(zone_pub_bytes: &[u8; 32], label: &str) -> Scalar {
    let (prk, _) = Hkdf::<Sha512>::extract(Some(zone_pub_bytes), DERIVE_CONTEXT);
    let hkdf = Hkdf::<Sha512>::from_prk(&prk).expect("PRK length matches Sha512 output");
    let mut okm = [0u8; 64];
    hkdf.expand(label.as_bytes(), &mut okm)
        .expect("64 bytes is a valid HKDF-Expand length for SHA-512");
    Scalar::from_bytes_mod_order_wide(&okm)
}

pub(crate) fn decompress(bytes: &[u8; 32]) -> GnsResult<EdwardsPoint> {
    CompressedEdwardsY(*bytes)
        .decompress()
        .ok_or_else(|| GnsError::BadZone("public key is not a valid curve point".into()))
}

/// Symmetric key material for a block's BDATA, derived from
/// `(zone_pub, label, expire)` alone — spec §4.2 "Block key and nonce".
pub(crate) enum BlockKey {
    /// ECDSA-style variant: AES-256 key plus a 16-byte CTR IV.
    Aes { key: [u8; 32], iv: [u8; 16] },
    /// EdDSA-style variant: ChaCha20-Poly1305 key plus a 12-byte nonce
    /// (a 4-byte derived prefix concatenated with the 8-byte `expire`),
    /// standing in for the spec's XSalsa20/Poly1305 "equivalent stream-AEAD".
    ChaCha { key: [u8; 32], nonce: [u8; 12] },
}

pub(crate) fn derive_block_key(
    key_type: ZoneKeyType,
    zone_pub_bytes: &[u8; 32],
    label: &str,
    expire: u64,
) -> BlockKey {
    let mut ikm = Vec::with_capacity(40);
    ikm.extend_from_slice(zone_pub_bytes);
    ikm.extend_from_slice(&expire.to_be_bytes());

    let hkdf = Hkdf::<Sha512>::new(Some(label.as_bytes()), &ikm);

    match key_type {
        ZoneKeyType::Ecdsa => {
            let mut okm = [0u8; 48];
            hkdf.expand(b"gns-block-key", &mut okm)
                .expect("48 bytes is a valid HKDF-Expand length for SHA-512");
            let mut key = [0u8; 32];
            let mut iv = [0u8; 16];
            key.copy_from_slice(&okm[..32]);
            iv.copy_from_slice(&okm[32..]);
            BlockKey::Aes { key, iv }
        }
        ZoneKeyType::Eddsa => {
            let mut okm = [0u8; 36];
            hkdf.expand(b"gns-block-key", &mut okm)
                .expect("36 bytes is a valid HKDF-Expand length for SHA-512");
            let mut key = [0u8; 32];
            let mut nonce_prefix = [0u8; 4];
            key.copy_from_slice(&okm[..32]);
            nonce_prefix.copy_from_slice(&okm[32..]);

            let mut nonce = [0u8; 12];
            nonce[..4].copy_from_slice(&nonce_prefix);
            nonce[4..].copy_from_slice(&expire.to_be_bytes());
            BlockKey::ChaCha { key, nonce }
        }
    }
}
