//! Parses a DNS wire-format response into flat `(type, ttl, rdata)`
//! answers for the GNS2DNS fallback (spec §4.5 step 4).
//!
//! Unlike a forwarding resolver, GNS does not interpret the answer's
//! RDATA itself — it is carried back into a [`gns_domain::ResourceRecord`]
//! verbatim by [`crate::dns_type_to_gns`]-style mapping in the
//! application layer, so this parser only needs to hand back raw bytes.

use gns_domain::GnsError;
use hickory_proto::op::Message;
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};

use gns_application::ports::DnsAnswer;

pub fn parse_answers(response_bytes: &[u8], expected_id: u16) -> Result<Vec<DnsAnswer>, GnsError> {
    let message = Message::from_vec(response_bytes)
        .map_err(|e| GnsError::ServiceUnavailable(format!("malformed DNS response: {e}")))?;

    if message.id() != expected_id {
        return Err(GnsError::InvalidID);
    }

    let mut answers = Vec::with_capacity(message.answers().len());
    for record in message.answers() {
        let Some(rdata) = record.data() else {
            continue;
        };

        let mut buf = Vec::with_capacity(64);
        let mut encoder = BinEncoder::new(&mut buf);
        rdata
            .emit(&mut encoder)
            .map_err(|e| GnsError::ServiceUnavailable(format!("failed to re-encode RDATA: {e}")))?;

        answers.push(DnsAnswer {
            name: record.name().to_utf8(),
            dns_type: u16::from(record.record_type()),
            ttl: record.ttl(),
            rdata: buf,
        });
    }

    Ok(answers)
}
