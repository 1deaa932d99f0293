use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use gns_application::ports::{DnsAnswer, DnsClient};
use gns_domain::GnsError;
use tracing::debug;

use super::message_builder::MessageBuilder;
use super::response_parser::parse_answers;
use super::transport::UdpTransport;

const QUERY_TIMEOUT: Duration = Duration::from_secs(3);

/// [`DnsClient`] backed by a single UDP round-trip per query, used by
/// `DnsFallback` to race GNS2DNS server candidates (spec §4.5).
pub struct UdpDnsClient;

impl Default for UdpDnsClient {
    fn default() -> Self {
        Self
    }
}

#[async_trait]
impl DnsClient for UdpDnsClient {
    async fn query_any(&self, server: IpAddr, name: &str) -> Result<Vec<DnsAnswer>, GnsError> {
        let (id, query_bytes) = MessageBuilder::build_any_query(name)?;
        let transport = UdpTransport::new((server, 53).into());
        debug!(%server, name, "sending GNS2DNS fallback query");
        let response_bytes = transport.send(&query_bytes, QUERY_TIMEOUT).await?;
        parse_answers(&response_bytes, id)
    }
}
