use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use gns_application::ports::{NamecacheClient, NamecacheEntry};
use gns_domain::GnsError;

use super::framing::{roundtrip, Frame};

const TAG_LOOKUP: u8 = 1;
const TAG_LOOKUP_RESULT: u8 = 2;
const TAG_CACHE: u8 = 3;
const TAG_CACHE_RESPONSE: u8 = 4;

/// [`NamecacheClient`] talking to the `gnunet-service-namecache`-style
/// collaborator over a Unix-domain socket (spec §6).
pub struct UnixNamecacheClient {
    endpoint: PathBuf,
    timeout: Duration,
    next_id: std::sync::atomic::AtomicU64,
}

impl UnixNamecacheClient {
    pub fn new(endpoint: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
            next_id: std::sync::atomic::AtomicU64::new(1),
        }
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, std::sync::atomic::Ordering::Relaxed)
    }
}

#[async_trait]
impl NamecacheClient for UnixNamecacheClient {
    async fn lookup(&self, q: &[u8; 64]) -> Result<Option<NamecacheEntry>, GnsError> {
        let id = self.next_id();
        let request = Frame::new(TAG_LOOKUP, id, q.to_vec());
        let response = roundtrip(&self.endpoint, request, self.timeout).await?;
        if response.tag != TAG_LOOKUP_RESULT {
            return Err(GnsError::InvalidResponseType);
        }
        decode_lookup_result(&response.body)
    }

    async fn store(&self, q: &[u8; 64], entry: NamecacheEntry) -> Result<(), GnsError> {
        let id = self.next_id();
        let mut body = Vec::with_capacity(64 + 8 + 32 + 64 + 4 + entry.enc_data.len());
        body.extend_from_slice(q);
        body.extend_from_slice(&entry.expire.to_be_bytes());
        body.extend_from_slice(&entry.derived_pub);
        body.extend_from_slice(&entry.signature);
        body.extend_from_slice(&(entry.enc_data.len() as u32).to_be_bytes());
        body.extend_from_slice(&entry.enc_data);

        let request = Frame::new(TAG_CACHE, id, body);
        let response = roundtrip(&self.endpoint, request, self.timeout).await?;
        if response.tag != TAG_CACHE_RESPONSE {
            return Err(GnsError::InvalidResponseType);
        }
        if response.body.len() < 4 {
            return Err(GnsError::InvalidResponseType);
        }
        let result = u32::from_be_bytes(response.body[0..4].try_into().unwrap());
        if result != 0 {
            return Err(GnsError::ServiceUnavailable(format!(
                "namecache CACHE rejected with result code {result}"
            )));
        }
        Ok(())
    }
}

fn decode_lookup_result(body: &[u8]) -> Result<Option<NamecacheEntry>, GnsError> {
    if body.is_empty() {
        return Err(GnsError::InvalidResponseType);
    }
    let found = body[0] != 0;
    if !found {
        return Ok(None);
    }
    if body.len() < 1 + 8 + 32 + 64 + 4 {
        return Err(GnsError::InvalidResponseType);
    }
    let mut cursor = 1;
    let expire = u64::from_be_bytes(body[cursor..cursor + 8].try_into().unwrap());
    cursor += 8;
    let derived_pub: [u8; 32] = body[cursor..cursor + 32].try_into().unwrap();
    cursor += 32;
    let signature: [u8; 64] = body[cursor..cursor + 64].try_into().unwrap();
    cursor += 64;
    let enc_len = u32::from_be_bytes(body[cursor..cursor + 4].try_into().unwrap()) as usize;
    cursor += 4;
    if body.len() < cursor + enc_len {
        return Err(GnsError::InvalidResponseType);
    }
    let enc_data = body[cursor..cursor + enc_len].to_vec();

    Ok(Some(NamecacheEntry {
        expire,
        derived_pub,
        signature,
        enc_data,
    }))
}
