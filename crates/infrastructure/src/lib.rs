//! Infrastructure layer: concrete collaborator adapters (namecache, DHT,
//! revocation, DNS fallback transport) implementing the ports declared
//! in `gns-application`, plus the config-driven wiring that builds them.

pub mod dns;
pub mod ipc;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use gns_application::ports::{NoRevocation, RevocationClient};
use gns_domain::config::GnsConfig;
use gns_domain::{GnsError, ZonePublic};

use dns::UdpDnsClient;
use ipc::{UnixDhtClient, UnixNamecacheClient, UnixRevocationClient};

/// Revocation is the one collaborator that can be switched off entirely
/// (spec's `revocation.enabled` knob); this enum carries both outcomes
/// behind a single concrete type so `Resolver` doesn't need a `?Sized`
/// bound just to accommodate it.
pub enum RevocationBackend {
    Unix(UnixRevocationClient),
    Disabled(NoRevocation),
}

#[async_trait]
impl RevocationClient for RevocationBackend {
    async fn query(&self, zone_pub: &ZonePublic) -> Result<bool, GnsError> {
        match self {
            RevocationBackend::Unix(client) => client.query(zone_pub).await,
            RevocationBackend::Disabled(client) => client.query(zone_pub).await,
        }
    }
}

/// The concrete collaborator set a `Resolver` needs, built from a loaded
/// [`GnsConfig`].
pub struct Collaborators {
    pub namecache: Arc<UnixNamecacheClient>,
    pub dht: Arc<UnixDhtClient>,
    pub revocation: Arc<RevocationBackend>,
    pub dns: Arc<UdpDnsClient>,
}

pub fn build_collaborators(config: &GnsConfig) -> Collaborators {
    let namecache = Arc::new(UnixNamecacheClient::new(
        config.namecache.endpoint.clone(),
        Duration::from_millis(config.namecache.request_timeout_ms),
    ));
    let dht = Arc::new(UnixDhtClient::new(
        config.dht.endpoint.clone(),
        Duration::from_millis(config.dht.request_timeout_ms),
    ));
    let revocation = Arc::new(if config.revocation.enabled {
        RevocationBackend::Unix(UnixRevocationClient::new(
            config.revocation.endpoint.clone(),
            Duration::from_millis(config.revocation.request_timeout_ms),
        ))
    } else {
        RevocationBackend::Disabled(NoRevocation)
    });
    let dns = Arc::new(UdpDnsClient::default());

    Collaborators {
        namecache,
        dht,
        revocation,
        dns,
    }
}
