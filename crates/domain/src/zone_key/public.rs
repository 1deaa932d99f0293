use chacha20poly1305::aead::{Aead, KeyInit as AeadKeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Nonce};
use curve25519_dalek::edwards::EdwardsPoint;
use ed25519_dalek::VerifyingKey;

use super::{decompress, derive_block_key, derive_scalar, schnorr, BlockKey, ZoneKeyType, ZONE_ID_LEN};
use crate::errors::{GnsError, GnsResult};

/// `Zid`: a zone's public key, shareable and used to verify (but never
/// produce) signed blocks for any label under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZonePublic {
    pub key_type: ZoneKeyType,
    pub bytes: [u8; 32],
}

impl ZonePublic {
    pub fn new(key_type: ZoneKeyType, bytes: [u8; 32]) -> Self {
        Self { key_type, bytes }
    }

    pub fn to_bytes(&self) -> [u8; ZONE_ID_LEN] {
        let mut out = [0u8; ZONE_ID_LEN];
        out[..4].copy_from_slice(&self.key_type.tag().to_be_bytes());
        out[4..].copy_from_slice(&self.bytes);
        out
    }

    pub fn from_bytes(buf: &[u8]) -> GnsResult<Self> {
        if buf.len() != ZONE_ID_LEN {
            return Err(GnsError::BadZone(format!(
                "zone id must be {ZONE_ID_LEN} bytes, got {}",
                buf.len()
            )));
        }
        let tag = u32::from_be_bytes(buf[0..4].try_into().unwrap());
        let key_type = ZoneKeyType::from_tag(tag)?;
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&buf[4..36]);
        Ok(Self { key_type, bytes })
    }

    fn point(&self) -> GnsResult<EdwardsPoint> {
        decompress(&self.bytes)
    }

    /// `derive(zone_pub, label)`: the label's derived public key, spec §4.2.
    pub fn derive(&self, label: &str) -> GnsResult<ZonePublic> {
        let h_mod = derive_scalar(&self.bytes, label);
        let derived_point = h_mod * self.point()?;
        Ok(ZonePublic {
            key_type: self.key_type,
            bytes: derived_point.compress().to_bytes(),
        })
    }

    /// Verifies a signature over `signed_region` produced by the derived
    /// private key matching this derived public key.
    pub fn verify(&self, signed_region: &[u8], signature: &[u8; 64]) -> GnsResult<bool> {
        let point = self.point()?;
        Ok(match self.key_type {
            ZoneKeyType::Ecdsa => schnorr::verify(&point, signed_region, signature),
            ZoneKeyType::Eddsa => {
                let verifying_key = VerifyingKey::from_bytes(&self.bytes)
                    .map_err(|e| GnsError::BadZone(e.to_string()))?;
                let sig = ed25519_dalek::Signature::from_bytes(signature);
                verifying_key.verify_strict(signed_region, &sig).is_ok()
            }
        })
    }

    /// Decrypts a block's BDATA back to RDATA bytes (spec §4.2, §4.3).
    pub fn decrypt(&self, bdata: &[u8], label: &str, expire: u64) -> GnsResult<Vec<u8>> {
        match derive_block_key(self.key_type, &self.bytes, label, expire) {
            BlockKey::Aes { key, iv } => Ok(aes_ctr_apply(&key, &iv, bdata)),
            BlockKey::ChaCha { key, nonce } => {
                let cipher = ChaCha20Poly1305::new_from_slice(&key)
                    .expect("32-byte key is valid for ChaCha20Poly1305");
                cipher
                    .decrypt(Nonce::from_slice(&nonce), bdata)
                    .map_err(|_| GnsError::DecryptFailed)
            }
        }
    }

    pub fn to_ztld(&self) -> String {
        super::ztld::encode(&self.to_bytes())
    }

    pub fn from_ztld(s: &str) -> GnsResult<Self> {
        let bytes = super::ztld::decode(s)?;
        Self::from_bytes(&bytes)
    }
}

impl std::str::FromStr for ZonePublic {
    type Err = GnsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_ztld(s)
    }
}

/// AES-256-CTR keystream application; symmetric for encrypt/decrypt.
pub(crate) fn aes_ctr_apply(key: &[u8; 32], iv: &[u8; 16], data: &[u8]) -> Vec<u8> {
    use aes::cipher::{KeyIvInit, StreamCipher};
    type Aes256Ctr = ctr::Ctr128BE<aes::Aes256>;

    let mut buf = data.to_vec();
    let mut cipher = Aes256Ctr::new(key.into(), iv.into());
    cipher.apply_keystream(&mut buf);
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_round_trip() {
        let pub_key = ZonePublic::new(ZoneKeyType::Eddsa, [42u8; 32]);
        let bytes = pub_key.to_bytes();
        assert_eq!(bytes.len(), ZONE_ID_LEN);
        let parsed = ZonePublic::from_bytes(&bytes).unwrap();
        assert_eq!(parsed, pub_key);
    }

    #[test]
    fn rejects_bad_length() {
        assert!(ZonePublic::from_bytes(&[0u8; 10]).is_err());
    }

    #[test]
    fn rejects_unknown_tag() {
        let mut buf = [0u8; ZONE_ID_LEN];
        buf[3] = 0xFF;
        assert!(ZonePublic::from_bytes(&buf).is_err());
    }
}
