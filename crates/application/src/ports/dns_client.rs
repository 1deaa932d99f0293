use std::net::IpAddr;

use async_trait::async_trait;
use gns_domain::GnsError;

/// A single DNS query/response round-trip against one server, the unit
/// of work `dns_fallback` fans out over multiple servers (spec §4.5).
/// Mirrors the shape of the teacher's `DnsResolver` port, narrowed to
/// the single-query operation the fallback's parallel race needs.
#[async_trait]
pub trait DnsClient: Send + Sync {
    /// Sends a class-IN, type-ANY query for `name` to `server`, returning
    /// the raw answer records found in the response. Implementations are
    /// expected to retry on I/O timeout internally up to the caller's
    /// budget; `dns_fallback` additionally races across servers.
    async fn query_any(&self, server: IpAddr, name: &str) -> Result<Vec<DnsAnswer>, GnsError>;
}

/// One answer record from a DNS response, not yet coerced into the GNS
/// type namespace (spec §4.5 step 4 does that downstream).
#[derive(Debug, Clone)]
pub struct DnsAnswer {
    pub name: String,
    pub dns_type: u16,
    pub ttl: u32,
    pub rdata: Vec<u8>,
}
