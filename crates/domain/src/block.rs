//! GNS blocks: the signed, encrypted container a zone publishes one per
//! `(zone, label)` pair (spec §3 "GNS block (RRBLOCK)", §4.3).

use sha2::{Digest, Sha512};

use crate::errors::{GnsError, GnsResult};
use crate::record_set::RecordSet;
use crate::zone_key::{ZoneKeyType, ZonePrivate, ZonePublic};

/// GNUnet's `GNUNET_SIGNATURE_PURPOSE_GNS_RECORD_SIGN`, mixed into every
/// block's signed region so a GNS block signature can never be replayed
/// as a signature for a different purpose.
pub const SIG_GNS_RECORD_SIGN: u32 = 14;

/// `(zone_pub, label)` together with the values derived from them: the
/// verifier for the block's signature and the opaque lookup key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub zone_pub: ZonePublic,
    pub label: String,
    pub derived_pub: ZonePublic,
    pub q: [u8; 64],
}

impl Query {
    pub fn new(zone_pub: ZonePublic, label: impl Into<String>) -> GnsResult<Self> {
        let label = label.into();
        let derived_pub = zone_pub.derive(&label)?;
        let q = storage_key(&derived_pub);
        Ok(Self {
            zone_pub,
            label,
            derived_pub,
            q,
        })
    }
}

/// `q = SHA512(derived_pub_bytes)` (spec §3 invariant: clients receive
/// `q`, never the label).
fn storage_key(derived_pub: &ZonePublic) -> [u8; 64] {
    let mut hasher = Sha512::new();
    hasher.update(derived_pub.bytes);
    hasher.finalize().into()
}

/// `purpose:u32 ‖ size:u32 ‖ expire:u64 ‖ bdata`, `size = 16 + len(bdata)`.
fn signed_region(expire: u64, bdata: &[u8]) -> Vec<u8> {
    let size: u32 = 16 + bdata.len() as u32;
    let mut out = Vec::with_capacity(16 + bdata.len());
    out.extend_from_slice(&SIG_GNS_RECORD_SIGN.to_be_bytes());
    out.extend_from_slice(&size.to_be_bytes());
    out.extend_from_slice(&expire.to_be_bytes());
    out.extend_from_slice(bdata);
    out
}

/// `RRBLOCK`: `size:u32 ‖ zone_type:u32 ‖ derived_pub:32 ‖ signature:64 ‖ expire:u64 ‖ bdata`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GnsBlock {
    pub zone_type: ZoneKeyType,
    pub derived_pub: [u8; 32],
    pub signature: [u8; 64],
    pub expire: u64,
    pub bdata: Vec<u8>,
}

impl GnsBlock {
    /// Assembles a block for publication (or tests): encrypts the record
    /// set, signs the result with the derived private key for
    /// `(zone_priv, label)` (spec §4.3 "Assemble").
    pub fn assemble(
        zone_priv: &ZonePrivate,
        label: &str,
        records: &RecordSet,
        now: u64,
    ) -> GnsResult<Self> {
        let expire = records.expire(now)?;
        let rdata = records.serialize()?;
        let bdata = zone_priv.encrypt(&rdata, label, expire)?;
        let region = signed_region(expire, &bdata);

        let derived_priv = zone_priv.derive(label);
        let signature = derived_priv.sign(&region);

        Ok(Self {
            zone_type: zone_priv.key_type(),
            derived_pub: derived_priv.public_key().bytes,
            signature,
            expire,
            bdata,
        })
    }

    /// Verifies the block's signature over its reconstructed signed
    /// region, and rejects an already-expired block.
    pub fn verify(&self, now: u64) -> GnsResult<()> {
        let region = signed_region(self.expire, &self.bdata);
        let derived = ZonePublic::new(self.zone_type, self.derived_pub);
        if !derived.verify(&region, &self.signature)? {
            return Err(GnsError::BadSignature);
        }
        if self.expire <= now {
            return Err(GnsError::BlockExpired);
        }
        Ok(())
    }

    /// Decrypts BDATA back to a parsed record set. `zone_pub` and
    /// `label` are supplied by the caller (they drove the `Query` this
    /// block answers) rather than carried on the wire.
    pub fn decrypt(&self, zone_pub: &ZonePublic, label: &str) -> GnsResult<RecordSet> {
        let rdata = zone_pub.decrypt(&self.bdata, label, self.expire)?;
        RecordSet::parse(&rdata)
    }

    /// `verify` followed by `decrypt` (spec §4.6 step 4d).
    pub fn verify_and_decrypt(
        &self,
        zone_pub: &ZonePublic,
        label: &str,
        now: u64,
    ) -> GnsResult<RecordSet> {
        self.verify(now)?;
        self.decrypt(zone_pub, label)
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        let size: u32 = (4 + 32 + 64 + 8 + self.bdata.len()) as u32;
        out.extend_from_slice(&size.to_be_bytes());
        out.extend_from_slice(&self.zone_type.tag().to_be_bytes());
        out.extend_from_slice(&self.derived_pub);
        out.extend_from_slice(&self.signature);
        out.extend_from_slice(&self.expire.to_be_bytes());
        out.extend_from_slice(&self.bdata);
    }

    pub fn read_from(buf: &[u8]) -> GnsResult<Self> {
        if buf.len() < 4 {
            return Err(GnsError::Truncated);
        }
        let size = u32::from_be_bytes(buf[0..4].try_into().unwrap()) as usize;
        if buf.len() < 4 + size {
            return Err(GnsError::Truncated);
        }
        if size < 4 + 32 + 64 + 8 {
            return Err(GnsError::Truncated);
        }

        let zone_type = ZoneKeyType::from_tag(u32::from_be_bytes(buf[4..8].try_into().unwrap()))?;
        let mut derived_pub = [0u8; 32];
        derived_pub.copy_from_slice(&buf[8..40]);
        let mut signature = [0u8; 64];
        signature.copy_from_slice(&buf[40..104]);
        let expire = u64::from_be_bytes(buf[104..112].try_into().unwrap());
        let bdata = buf[112..4 + size].to_vec();

        Ok(Self {
            zone_type,
            derived_pub,
            signature,
            expire,
            bdata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rr::{GNSFlags, GNSType};
    use crate::rr::ResourceRecord;

    fn sample_records() -> RecordSet {
        RecordSet::new(vec![ResourceRecord::new(
            1_000_000,
            GNSType::TXT,
            GNSFlags::empty(),
            b"hello gns".to_vec(),
        )])
    }

    #[test]
    fn assemble_then_verify_and_decrypt_round_trips_both_variants() {
        for key_type in [ZoneKeyType::Ecdsa, ZoneKeyType::Eddsa] {
            let zone_priv = ZonePrivate::new(key_type, [9u8; 32]);
            let zone_pub = zone_priv.public_key();
            let records = sample_records();

            let block = GnsBlock::assemble(&zone_priv, "www", &records, 0).unwrap();
            let parsed = block.verify_and_decrypt(&zone_pub, "www", 0).unwrap();
            assert_eq!(parsed, records);
        }
    }

    #[test]
    fn expired_block_is_rejected() {
        let zone_priv = ZonePrivate::new(ZoneKeyType::Eddsa, [3u8; 32]);
        let records = sample_records();
        let block = GnsBlock::assemble(&zone_priv, "www", &records, 0).unwrap();
        assert_eq!(
            block.verify(block.expire + 1),
            Err(GnsError::BlockExpired)
        );
    }

    #[test]
    fn tampered_bdata_fails_verification() {
        let zone_priv = ZonePrivate::new(ZoneKeyType::Ecdsa, [4u8; 32]);
        let records = sample_records();
        let mut block = GnsBlock::assemble(&zone_priv, "www", &records, 0).unwrap();
        block.bdata[0] ^= 0xFF;
        assert_eq!(block.verify(0), Err(GnsError::BadSignature));
    }

    #[test]
    fn wire_round_trip() {
        let zone_priv = ZonePrivate::new(ZoneKeyType::Eddsa, [5u8; 32]);
        let records = sample_records();
        let block = GnsBlock::assemble(&zone_priv, "www", &records, 0).unwrap();

        let mut bytes = Vec::new();
        block.write_to(&mut bytes);
        let parsed = GnsBlock::read_from(&bytes).unwrap();
        assert_eq!(parsed, block);
    }

    #[test]
    fn distinct_zones_yield_distinct_storage_keys() {
        let z1 = ZonePrivate::new(ZoneKeyType::Eddsa, [1u8; 32]).public_key();
        let z2 = ZonePrivate::new(ZoneKeyType::Eddsa, [2u8; 32]).public_key();
        let q1 = Query::new(z1, "www").unwrap();
        let q2 = Query::new(z2, "www").unwrap();
        assert_ne!(q1.q, q2.q);
    }
}
