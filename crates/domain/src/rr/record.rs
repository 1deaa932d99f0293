use super::flags::GNSFlags;
use super::gns_type::GNSType;
use crate::errors::{GnsError, GnsResult};

/// A single resource record: `(expire, size, type, flags, data)`.
///
/// Wire layout (all integers big-endian, matching spec §3/§6):
/// `expire:u64 ‖ size:u16 ‖ type:u32 ‖ flags:u16 ‖ data[size]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    /// Absolute expiration in microseconds since the Unix epoch, unless
    /// [`GNSFlags::RELATIVE_EXPIRATION`] is set, in which case this is a
    /// relative offset from the block's publication time.
    pub expire: u64,
    pub record_type: GNSType,
    pub flags: GNSFlags,
    pub data: Vec<u8>,
}

impl ResourceRecord {
    pub fn new(expire: u64, record_type: GNSType, flags: GNSFlags, data: Vec<u8>) -> Self {
        Self {
            expire,
            record_type,
            flags,
            data,
        }
    }

    /// `expire` resolved to an absolute microsecond timestamp, given the
    /// block's publication time for relative-expiration records.
    pub fn absolute_expire(&self, published_at: u64) -> GnsResult<u64> {
        if self.flags.is_relative_expiration() {
            published_at
                .checked_add(self.expire)
                .ok_or(GnsError::RelativeExpirationUnderflow)
        } else {
            Ok(self.expire)
        }
    }

    pub fn is_expired(&self, now: u64, published_at: u64) -> GnsResult<bool> {
        Ok(self.absolute_expire(published_at)? <= now)
    }

    pub fn wire_len(&self) -> usize {
        8 + 2 + 4 + 2 + self.data.len()
    }

    pub(crate) fn write_to(&self, out: &mut Vec<u8>) -> GnsResult<()> {
        let size: u16 = self
            .data
            .len()
            .try_into()
            .map_err(|_| GnsError::InvalidRecordBody("record data exceeds 65535 bytes".into()))?;
        out.extend_from_slice(&self.expire.to_be_bytes());
        out.extend_from_slice(&size.to_be_bytes());
        out.extend_from_slice(&self.record_type.0.to_be_bytes());
        out.extend_from_slice(&self.flags.bits().to_be_bytes());
        out.extend_from_slice(&self.data);
        Ok(())
    }

    /// Parses a single record from the front of `buf`, returning the
    /// record and the number of bytes consumed.
    pub(crate) fn read_from(buf: &[u8]) -> GnsResult<(Self, usize)> {
        if buf.len() < 16 {
            return Err(GnsError::Truncated);
        }
        let expire = u64::from_be_bytes(buf[0..8].try_into().unwrap());
        let size = u16::from_be_bytes(buf[8..10].try_into().unwrap()) as usize;
        let record_type = u32::from_be_bytes(buf[10..14].try_into().unwrap());
        let flags_bits = u16::from_be_bytes(buf[14..16].try_into().unwrap());
        let flags = GNSFlags::from_bits_truncate(flags_bits);

        let data_start = 16;
        let data_end = data_start
            .checked_add(size)
            .ok_or(GnsError::Truncated)?;
        if buf.len() < data_end {
            return Err(GnsError::Truncated);
        }
        let data = buf[data_start..data_end].to_vec();

        Ok((
            ResourceRecord {
                expire,
                record_type: GNSType(record_type),
                flags,
                data,
            },
            data_end,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_wire_format() {
        let rec = ResourceRecord::new(1234, GNSType::TXT, GNSFlags::CRITICAL, b"hello".to_vec());
        let mut buf = Vec::new();
        rec.write_to(&mut buf).unwrap();
        assert_eq!(buf.len(), rec.wire_len());

        let (parsed, consumed) = ResourceRecord::read_from(&buf).unwrap();
        assert_eq!(consumed, buf.len());
        assert_eq!(parsed, rec);
    }

    #[test]
    fn relative_expiration_adds_to_publication_time() {
        let rec = ResourceRecord::new(
            1_000_000,
            GNSType::TXT,
            GNSFlags::RELATIVE_EXPIRATION,
            vec![],
        );
        assert_eq!(rec.absolute_expire(5_000_000).unwrap(), 6_000_000);
    }

    #[test]
    fn truncated_header_is_rejected() {
        assert_eq!(ResourceRecord::read_from(&[0u8; 4]), Err(GnsError::Truncated));
    }

    #[test]
    fn truncated_data_is_rejected() {
        let rec = ResourceRecord::new(0, GNSType::TXT, GNSFlags::empty(), b"hello".to_vec());
        let mut buf = Vec::new();
        rec.write_to(&mut buf).unwrap();
        buf.truncate(buf.len() - 1);
        assert_eq!(ResourceRecord::read_from(&buf), Err(GnsError::Truncated));
    }
}
