use std::collections::HashMap;

use gns_domain::{GNSType, GnsError, GnsResult, RecordSet, ResourceRecord, TypeList};

use super::{Handler, HandlerContext};

/// `GNS2DNS`: delegates the remaining labels to DNS, against a list of
/// servers (spec §4.4, §4.5). Every entry must share the same DNS query
/// name; no other type may coexist.
#[derive(Default)]
pub struct Gns2DnsHandler {
    pub dns_name: Option<String>,
    pub servers: Vec<String>,
}

impl Gns2DnsHandler {
    /// Record data layout: `dns_name\0server`.
    fn parse(data: &[u8]) -> GnsResult<(String, String)> {
        let text = std::str::from_utf8(data)
            .map_err(|_| GnsError::InvalidRecordBody("GNS2DNS record is not UTF-8".into()))?;
        let mut parts = text.splitn(2, '\0');
        let dns_name = parts
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| GnsError::InvalidRecordBody("GNS2DNS record missing dns name".into()))?;
        let server = parts
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| GnsError::InvalidRecordBody("GNS2DNS record missing server".into()))?;
        Ok((dns_name.to_string(), server.to_string()))
    }
}

impl Handler for Gns2DnsHandler {
    fn name(&self) -> &'static str {
        "GNS2DNS"
    }

    fn add(&mut self, rec: &ResourceRecord, _ctx: &HandlerContext) -> GnsResult<()> {
        let (dns_name, server) = Self::parse(&rec.data)?;
        match &self.dns_name {
            Some(existing) if existing != &dns_name => {
                return Err(GnsError::InvalidRecordBody(
                    "GNS2DNS entries must share one dns query name".into(),
                ));
            }
            Some(_) => {}
            None => self.dns_name = Some(dns_name),
        }
        self.servers.push(server);
        Ok(())
    }

    fn coexist(&self, counts: &HashMap<GNSType, usize>, _ctx: &HandlerContext) -> bool {
        counts.len() == 1 && counts.contains_key(&GNSType::GNS2DNS)
    }

    fn records(&self, _requested: &TypeList) -> RecordSet {
        // GNS2DNS never contributes directly to the final answer; the
        // resolver replaces it with the DNS fallback's results.
        RecordSet::default()
    }
}
