use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use gns_application::ports::{DhtClient, DhtGetRequest, DhtGetResult};
use gns_domain::GnsError;
use tracing::debug;

use super::framing::{roundtrip, Frame};

const TAG_CLIENT_GET: u8 = 5;
const TAG_CLIENT_RESULT: u8 = 6;
const TAG_CLIENT_GET_STOP: u8 = 7;

/// [`DhtClient`] talking to the `gnunet-service-dht`-style collaborator
/// over a Unix-domain socket (spec §6). `get_stop` is fire-and-forget:
/// the DHT only needs to learn a GET is no longer wanted, there is
/// nothing useful to wait for in the reply.
pub struct UnixDhtClient {
    endpoint: PathBuf,
    timeout: Duration,
}

impl UnixDhtClient {
    pub fn new(endpoint: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
        }
    }
}

#[async_trait]
impl DhtClient for UnixDhtClient {
    async fn get(&self, request: DhtGetRequest) -> Result<Option<DhtGetResult>, GnsError> {
        let mut body = Vec::with_capacity(64 + 4 + 4 + 1);
        body.extend_from_slice(&request.key);
        body.extend_from_slice(&request.repl_level.to_be_bytes());
        body.extend_from_slice(&request.block_type.to_be_bytes());
        body.push(request.demultiplex_everywhere as u8);

        let frame = Frame::new(TAG_CLIENT_GET, request.id, body);
        let response = roundtrip(&self.endpoint, frame, self.timeout).await?;
        if response.tag != TAG_CLIENT_RESULT {
            return Err(GnsError::InvalidResponseType);
        }
        decode_client_result(request.id, &response.body)
    }

    async fn get_stop(&self, key: &[u8; 64]) {
        let frame = Frame::new(TAG_CLIENT_GET_STOP, 0, key.to_vec());
        if let Err(err) = super::framing::send_only(&self.endpoint, frame).await {
            debug!(error = %err, "CLIENT_GET_STOP delivery failed (best-effort)");
        }
    }
}

fn decode_client_result(id: u64, body: &[u8]) -> Result<Option<DhtGetResult>, GnsError> {
    if body.is_empty() {
        return Err(GnsError::InvalidResponseType);
    }
    let found = body[0] != 0;
    if !found {
        return Ok(None);
    }
    if body.len() < 1 + 8 + 4 + 4 {
        return Err(GnsError::InvalidResponseType);
    }
    let mut cursor = 1;
    let expire = u64::from_be_bytes(body[cursor..cursor + 8].try_into().unwrap());
    cursor += 8;
    let block_type = u32::from_be_bytes(body[cursor..cursor + 4].try_into().unwrap());
    cursor += 4;
    let data_len = u32::from_be_bytes(body[cursor..cursor + 4].try_into().unwrap()) as usize;
    cursor += 4;
    if body.len() < cursor + data_len {
        return Err(GnsError::InvalidResponseType);
    }
    let data = body[cursor..cursor + data_len].to_vec();

    Ok(Some(DhtGetResult {
        id,
        expire,
        block_type,
        data,
    }))
}
