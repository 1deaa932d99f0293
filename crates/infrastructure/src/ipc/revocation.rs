use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use gns_application::ports::RevocationClient;
use gns_domain::{GnsError, ZonePublic};

use super::framing::{roundtrip, Frame};

const TAG_QUERY: u8 = 8;
const TAG_QUERY_RESPONSE: u8 = 9;

/// [`RevocationClient`] talking to the `gnunet-service-revocation`-style
/// collaborator over a Unix-domain socket (spec §6).
pub struct UnixRevocationClient {
    endpoint: PathBuf,
    timeout: Duration,
    next_id: std::sync::atomic::AtomicU64,
}

impl UnixRevocationClient {
    pub fn new(endpoint: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
            next_id: std::sync::atomic::AtomicU64::new(1),
        }
    }
}

#[async_trait]
impl RevocationClient for UnixRevocationClient {
    async fn query(&self, zone_pub: &ZonePublic) -> Result<bool, GnsError> {
        let id = self.next_id.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        let frame = Frame::new(TAG_QUERY, id, zone_pub.to_bytes().to_vec());
        let response = roundtrip(&self.endpoint, frame, self.timeout).await?;
        if response.tag != TAG_QUERY_RESPONSE || response.body.is_empty() {
            return Err(GnsError::InvalidResponseType);
        }
        Ok(response.body[0] != 0)
    }
}
