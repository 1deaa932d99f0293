//! Builds the DNS query message sent for GNS2DNS fallback (spec §4.5).
//!
//! Constructs wire-format query messages with `hickory-proto`, the same
//! way a forwarding resolver would build an upstream query.

use gns_domain::GnsError;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

pub struct MessageBuilder;

impl MessageBuilder {
    /// Builds an ANY-type query for `name`, returning its transaction id
    /// alongside the serialized bytes so the caller can match the
    /// response.
    pub fn build_any_query(name: &str) -> Result<(u16, Vec<u8>), GnsError> {
        let name = Name::from_str(name)
            .map_err(|e| GnsError::BadLabel(format!("invalid DNS name '{name}': {e}")))?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordType::ANY);
        query.set_query_class(DNSClass::IN);

        let id = fastrand::u16(..);
        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);

        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);
        message
            .emit(&mut encoder)
            .map_err(|e| GnsError::BadLabel(format!("failed to serialize DNS query: {e}")))?;

        Ok((id, buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn builds_an_any_query_with_recursion_desired() {
        let (id, bytes) = MessageBuilder::build_any_query("example.com").unwrap();

        let header_id = u16::from_be_bytes([bytes[0], bytes[1]]);
        assert_eq!(header_id, id);

        let flags = u16::from_be_bytes([bytes[2], bytes[3]]);
        assert_eq!(flags & 0x0100, 0x0100, "RD bit must be set");

        let qdcount = u16::from_be_bytes([bytes[4], bytes[5]]);
        assert_eq!(qdcount, 1);
        let ancount = u16::from_be_bytes([bytes[6], bytes[7]]);
        assert_eq!(ancount, 0);
    }

    #[test]
    fn transaction_ids_vary_across_calls() {
        let mut seen = HashSet::new();
        for _ in 0..50 {
            let (id, _) = MessageBuilder::build_any_query("example.com").unwrap();
            seen.insert(id);
        }
        assert!(seen.len() > 1, "transaction ids should not all collide");
    }

    #[test]
    fn rejects_an_invalid_name() {
        let result = MessageBuilder::build_any_query("foo..bar");
        assert!(matches!(result, Err(GnsError::BadLabel(_))));
    }
}
