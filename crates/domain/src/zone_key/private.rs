use chacha20poly1305::aead::{Aead, KeyInit as AeadKeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Nonce};
use curve25519_dalek::constants::ED25519_BASEPOINT_TABLE;
use curve25519_dalek::scalar::Scalar;
use ed25519_dalek::hazmat::ExpandedSecretKey;
use sha2::{Digest, Sha512};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::public::aes_ctr_apply;
use super::{derive_block_key, derive_scalar, schnorr, BlockKey, ZoneKeyType, ZonePublic, ZONE_ID_LEN};
use crate::errors::{GnsError, GnsResult};

/// `Zprv`: a zone's private key. Owned by the user, never transmitted.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ZonePrivate {
    #[zeroize(skip)]
    key_type: ZoneKeyType,
    secret: [u8; 32],
}

/// A derived private key for one `(zone, label)` pair, used only to sign
/// that label's block. Never serialized or transmitted.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedPrivate {
    #[zeroize(skip)]
    key_type: ZoneKeyType,
    scalar_bytes: [u8; 32],
}

impl ZonePrivate {
    pub fn new(key_type: ZoneKeyType, secret: [u8; 32]) -> Self {
        Self { key_type, secret }
    }

    pub fn key_type(&self) -> ZoneKeyType {
        self.key_type
    }

    pub fn to_bytes(&self) -> [u8; ZONE_ID_LEN] {
        let mut out = [0u8; ZONE_ID_LEN];
        out[..4].copy_from_slice(&self.key_type.tag().to_be_bytes());
        out[4..].copy_from_slice(&self.secret);
        out
    }

    pub fn from_bytes(buf: &[u8]) -> GnsResult<Self> {
        if buf.len() != ZONE_ID_LEN {
            return Err(GnsError::BadZone(format!(
                "zone private key must be {ZONE_ID_LEN} bytes, got {}",
                buf.len()
            )));
        }
        let tag = u32::from_be_bytes(buf[0..4].try_into().unwrap());
        let key_type = ZoneKeyType::from_tag(tag)?;
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&buf[4..36]);
        Ok(Self { key_type, secret })
    }

    fn scalar(&self) -> Scalar {
        Scalar::from_bytes_mod_order(self.secret)
    }

    /// The zone's public key: `scalar · basepoint`.
    pub fn public_key(&self) -> ZonePublic {
        let point = &ED25519_BASEPOINT_TABLE * &self.scalar();
        ZonePublic::new(self.key_type, point.compress().to_bytes())
    }

    /// `derive(zone_priv, label)`: the matching derived private scalar for
    /// `(zone_priv, label)`, whose public half equals
    /// `ZonePublic::derive(zone_pub, label)` (spec §4.2's zero-knowledge
    /// property, tested in `tests/zone_key_invariants.rs`).
    pub fn derive(&self, label: &str) -> DerivedPrivate {
        let zone_pub_bytes = self.public_key().bytes;
        let h_mod = derive_scalar(&zone_pub_bytes, label);
        let derived_scalar = h_mod * self.scalar();
        DerivedPrivate {
            key_type: self.key_type,
            scalar_bytes: derived_scalar.to_bytes(),
        }
    }

    /// Symmetric encryption key/nonce for `(label, expire)` (spec §4.2).
    pub fn encrypt(&self, rdata: &[u8], label: &str, expire: u64) -> GnsResult<Vec<u8>> {
        let zone_pub_bytes = self.public_key().bytes;
        match derive_block_key(self.key_type, &zone_pub_bytes, label, expire) {
            BlockKey::Aes { key, iv } => Ok(aes_ctr_apply(&key, &iv, rdata)),
            BlockKey::ChaCha { key, nonce } => {
                let cipher = ChaCha20Poly1305::new_from_slice(&key)
                    .expect("32-byte key is valid for ChaCha20Poly1305");
                cipher
                    .encrypt(Nonce::from_slice(&nonce), rdata)
                    .map_err(|_| GnsError::DecryptFailed)
            }
        }
    }
}

impl DerivedPrivate {
    fn scalar(&self) -> Scalar {
        Scalar::from_bytes_mod_order(self.scalar_bytes)
    }

    pub fn public_key(&self) -> ZonePublic {
        let point = &ED25519_BASEPOINT_TABLE * &self.scalar();
        ZonePublic::new(self.key_type, point.compress().to_bytes())
    }

    /// Signs `signed_region` (the block's purpose‖size‖expire‖bdata
    /// tuple, spec §4.3) with this label's derived private key.
    pub fn sign(&self, signed_region: &[u8]) -> [u8; 64] {
        match self.key_type {
            ZoneKeyType::Ecdsa => {
                let point = &ED25519_BASEPOINT_TABLE * &self.scalar();
                schnorr::sign(&self.scalar(), &point, signed_region)
            }
            ZoneKeyType::Eddsa => {
                let verifying_key_bytes = self.public_key().bytes;
                let verifying_key = ed25519_dalek::VerifyingKey::from_bytes(&verifying_key_bytes)
                    .expect("derived point is always a valid verifying key");
                let expanded = ExpandedSecretKey {
                    scalar: self.scalar(),
                    hash_prefix: eddsa_hash_prefix(&self.scalar_bytes),
                };
                let sig = ed25519_dalek::hazmat::raw_sign::<Sha512>(
                    &expanded,
                    signed_region,
                    &verifying_key,
                );
                sig.to_bytes()
            }
        }
    }
}

/// Deterministic nonce prefix for the EdDSA-style variant's raw signing,
/// independent of the HKDF derivation used for `h_mod` so that a leaked
/// block-key derivation cannot also leak the signing nonce.
fn eddsa_hash_prefix(scalar_bytes: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Sha512::new();
    hasher.update(b"gns-eddsa-nonce-prefix");
    hasher.update(scalar_bytes);
    let digest: [u8; 64] = hasher.finalize().into();
    digest[..32].try_into().unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_knowledge_property_eddsa() {
        let zone_priv = ZonePrivate::new(ZoneKeyType::Eddsa, [11u8; 32]);
        let zone_pub = zone_priv.public_key();

        let derived_from_priv = zone_priv.derive("testdelegation").public_key();
        let derived_from_pub = zone_pub.derive("testdelegation").unwrap();

        assert_eq!(derived_from_priv, derived_from_pub);
    }

    #[test]
    fn zero_knowledge_property_ecdsa() {
        let zone_priv = ZonePrivate::new(ZoneKeyType::Ecdsa, [22u8; 32]);
        let zone_pub = zone_priv.public_key();

        let derived_from_priv = zone_priv.derive("testdelegation").public_key();
        let derived_from_pub = zone_pub.derive("testdelegation").unwrap();

        assert_eq!(derived_from_priv, derived_from_pub);
    }

    #[test]
    fn sign_verify_round_trip_both_variants() {
        for key_type in [ZoneKeyType::Ecdsa, ZoneKeyType::Eddsa] {
            let zone_priv = ZonePrivate::new(key_type, [33u8; 32]);
            let zone_pub = zone_priv.public_key();
            let derived_priv = zone_priv.derive("label");
            let derived_pub = zone_pub.derive("label").unwrap();

            let sig = derived_priv.sign(b"signed region bytes");
            assert!(derived_pub.verify(b"signed region bytes", &sig).unwrap());
            assert!(!derived_pub.verify(b"different bytes", &sig).unwrap());
        }
    }

    #[test]
    fn distinct_zones_yield_distinct_derived_keys() {
        let z1 = ZonePrivate::new(ZoneKeyType::Eddsa, [1u8; 32]).public_key();
        let z2 = ZonePrivate::new(ZoneKeyType::Eddsa, [2u8; 32]).public_key();
        assert_ne!(
            z1.derive("same-label").unwrap(),
            z2.derive("same-label").unwrap()
        );
    }

    #[test]
    fn wire_round_trip() {
        let zone_priv = ZonePrivate::new(ZoneKeyType::Ecdsa, [5u8; 32]);
        let bytes = zone_priv.to_bytes();
        let parsed = ZonePrivate::from_bytes(&bytes).unwrap();
        assert_eq!(parsed.to_bytes(), bytes);
    }

    #[test]
    fn encrypt_decrypt_round_trip_both_variants() {
        for key_type in [ZoneKeyType::Ecdsa, ZoneKeyType::Eddsa] {
            let zone_priv = ZonePrivate::new(key_type, [44u8; 32]);
            let zone_pub = zone_priv.public_key();
            let rdata = b"some canonical record set bytes";

            let bdata = zone_priv.encrypt(rdata, "label", 1_000).unwrap();
            let decrypted = zone_pub.decrypt(&bdata, "label", 1_000).unwrap();
            assert_eq!(decrypted, rdata);
        }
    }
}
