//! Parallel DNS resolution when a block delegates to DNS (spec §4.5).

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use gns_domain::{GNSFlags, GNSType, GnsError, GnsResult, RecordSet, ResourceRecord, TypeList};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::ports::DnsClient;

/// Resolves a non-IP-literal DNS server name back into addresses by
/// recursing into GNS resolution — implemented by
/// [`crate::resolver::Resolver`] itself, since `dns_fallback` has no
/// dependency of its own on the resolver (spec §4.5 step 1).
#[async_trait]
pub trait GnsAddressResolver: Send + Sync {
    async fn resolve_address(&self, name: &str, cancel: &CancellationToken) -> GnsResult<Vec<IpAddr>>;
}

const OVERALL_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_RETRIES_PER_QUERY: u32 = 5;

pub struct DnsFallback<C> {
    client: Arc<C>,
}

impl<C: DnsClient> DnsFallback<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Resolves `remaining_labels.dns_name` against every server named
    /// in `servers`, racing them concurrently; first non-empty response
    /// wins.
    pub async fn resolve(
        &self,
        dns_name: &str,
        servers: &[String],
        remaining_labels: &[String],
        requested_types: &TypeList,
        address_resolver: &dyn GnsAddressResolver,
        cancel: CancellationToken,
    ) -> GnsResult<RecordSet> {
        let mut addresses = Vec::new();
        for server in servers {
            match server.parse::<IpAddr>() {
                Ok(ip) => addresses.push(ip),
                Err(_) => {
                    match address_resolver.resolve_address(server, &cancel).await {
                        Ok(resolved) => addresses.extend(resolved),
                        Err(err) => warn!(server, error = %err, "failed to resolve GNS2DNS server name"),
                    }
                }
            }
        }

        if addresses.is_empty() {
            return Err(GnsError::NoDNSQueries);
        }

        let query_name = if remaining_labels.is_empty() {
            dns_name.to_string()
        } else {
            format!("{}.{}", remaining_labels.join("."), dns_name)
        };

        let queries = addresses.into_iter().map(|addr| {
            let client = Arc::clone(&self.client);
            let query_name = query_name.clone();
            let cancel = cancel.clone();
            async move { query_with_retries(&client, addr, &query_name, &cancel).await }
        });

        let race = futures::future::select_ok(queries.map(Box::pin));
        let answers = tokio::select! {
            _ = cancel.cancelled() => return Err(GnsError::Cancelled),
            _ = tokio::time::sleep(OVERALL_TIMEOUT) => return Err(GnsError::DNSTimedOut),
            result = race => {
                match result {
                    Ok((answers, _)) => answers,
                    Err(_) => return Err(GnsError::NoDNSResults),
                }
            }
        };

        if answers.is_empty() {
            return Err(GnsError::NoDNSResults);
        }

        let records: Vec<ResourceRecord> = answers
            .into_iter()
            .filter_map(|answer| {
                let record_type = dns_type_to_gns(answer.dns_type)?;
                if !requested_types.matches(record_type) {
                    return None;
                }
                Some(ResourceRecord::new(
                    answer.ttl as u64,
                    record_type,
                    GNSFlags::RELATIVE_EXPIRATION,
                    answer.rdata,
                ))
            })
            .collect();

        Ok(RecordSet::new(records))
    }
}

async fn query_with_retries<C: DnsClient>(
    client: &C,
    server: IpAddr,
    name: &str,
    cancel: &CancellationToken,
) -> GnsResult<Vec<crate::ports::DnsAnswer>> {
    for attempt in 0..=MAX_RETRIES_PER_QUERY {
        if cancel.is_cancelled() {
            return Err(GnsError::Cancelled);
        }
        match client.query_any(server, name).await {
            Ok(answers) if !answers.is_empty() => return Ok(answers),
            Ok(_) => return Err(GnsError::NoDNSResults),
            Err(_) if attempt < MAX_RETRIES_PER_QUERY => {
                debug!(%server, attempt, "DNS query timed out, retrying with a fresh transaction id");
                continue;
            }
            Err(err) => return Err(err),
        }
    }
    Err(GnsError::NoDNSResults)
}

/// Coerces a DNS wire type into the GNS type namespace (spec §4.5 step 4).
fn dns_type_to_gns(dns_type: u16) -> Option<GNSType> {
    match dns_type {
        1 => Some(GNSType::A),
        2 => Some(GNSType::NS),
        5 => Some(GNSType::CNAME),
        6 => Some(GNSType::SOA),
        12 => Some(GNSType::PTR),
        15 => Some(GNSType::MX),
        16 => Some(GNSType::TXT),
        28 => Some(GNSType::AAAA),
        48 => Some(GNSType::DNSKEY),
        52 => Some(GNSType::TLSA),
        257 => Some(GNSType::CAA),
        _ => None,
    }
}
