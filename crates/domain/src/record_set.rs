//! Canonical binary encoding of a record set (spec §3, §4.1).
//!
//! `RDATA = count:u32 ‖ records ‖ zero padding`, where the padding is
//! chosen so that `len(records ‖ padding)` — everything after the
//! `count` field — is the smallest power of two no smaller than the
//! unpadded records length. The `count` field itself is not padded.

use crate::errors::{GnsError, GnsResult};
use crate::rr::ResourceRecord;

/// An ordered list of records, as carried inside a GNS block's BDATA.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    pub records: Vec<ResourceRecord>,
}

impl RecordSet {
    pub fn new(records: Vec<ResourceRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serializes to canonical RDATA bytes with power-of-two padding.
    pub fn serialize(&self) -> GnsResult<Vec<u8>> {
        let count: u32 = self
            .records
            .len()
            .try_into()
            .map_err(|_| GnsError::BadCount)?;

        let mut body = Vec::new();
        for record in &self.records {
            record.write_to(&mut body)?;
        }

        let padded_len = next_power_of_two(body.len());
        body.resize(padded_len, 0);

        let mut out = Vec::with_capacity(4 + padded_len);
        out.extend_from_slice(&count.to_be_bytes());
        out.extend_from_slice(&body);
        Ok(out)
    }

    /// Parses RDATA bytes back into a record set. Trailing bytes beyond
    /// the last parsed record must be zero padding.
    pub fn parse(buf: &[u8]) -> GnsResult<Self> {
        if buf.len() < 4 {
            return Err(GnsError::Truncated);
        }
        let count = u32::from_be_bytes(buf[0..4].try_into().unwrap());
        let mut cursor = 4usize;
        let mut records = Vec::with_capacity(count as usize);

        for _ in 0..count {
            let (record, consumed) = ResourceRecord::read_from(&buf[cursor..])?;
            cursor += consumed;
            records.push(record);
        }

        if buf[cursor..].iter().any(|&b| b != 0) {
            return Err(GnsError::NonZeroPadding);
        }

        Ok(RecordSet { records })
    }

    /// The record set's expiration: the minimum of the unexpired records'
    /// absolute expirations (using `now` as the base for any
    /// relative-expiration record), or the maximum expiration if every
    /// record has already expired. An empty set expires immediately.
    pub fn expire(&self, now: u64) -> GnsResult<u64> {
        if self.records.is_empty() {
            return Ok(now);
        }

        let mut absolute = Vec::with_capacity(self.records.len());
        for record in &self.records {
            absolute.push(record.absolute_expire(now)?);
        }

        let unexpired_min = absolute.iter().copied().filter(|&e| e > now).min();
        match unexpired_min {
            Some(min) => Ok(min),
            None => Ok(absolute.into_iter().max().unwrap()),
        }
    }
}

/// Smallest power of two `>= len`. `0` maps to `0` (an empty record set
/// has no body to pad).
fn next_power_of_two(len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    len.next_power_of_two()
}
