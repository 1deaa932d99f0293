use async_trait::async_trait;
use gns_domain::{GnsError, ZonePublic};

/// The revocation collaborator (spec §6). Consulted, when enabled,
/// before trusting a freshly-derived zone key during delegation (spec
/// §A.2 supplement 4) — an optional, skippable check; real enforcement
/// is out of scope.
#[async_trait]
pub trait RevocationClient: Send + Sync {
    /// `QUERY{zone_pub}` -> `QUERY_RESPONSE{valid}`.
    async fn query(&self, zone_pub: &ZonePublic) -> Result<bool, GnsError>;
}

/// A revocation client that always reports a zone as valid, for
/// deployments that run without a revocation service.
pub struct NoRevocation;

#[async_trait]
impl RevocationClient for NoRevocation {
    async fn query(&self, _zone_pub: &ZonePublic) -> Result<bool, GnsError> {
        Ok(true)
    }
}
