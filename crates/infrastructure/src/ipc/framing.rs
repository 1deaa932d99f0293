//! Wire framing for the collaborator services (spec §6): each request
//! and response carries a correlation id and is length-prefixed, the
//! way GNUnet's service IPC works over a Unix-domain socket.
//!
//! Frame layout: `len:u32 ‖ tag:u8 ‖ id:u64 ‖ body`. `len` covers
//! everything after itself.

use std::path::Path;
use std::time::Duration;

use gns_domain::GnsError;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;

pub struct Frame {
    pub tag: u8,
    pub id: u64,
    pub body: Vec<u8>,
}

impl Frame {
    pub fn new(tag: u8, id: u64, body: Vec<u8>) -> Self {
        Self { tag, id, body }
    }

    fn encode(&self) -> Vec<u8> {
        let len = 1 + 8 + self.body.len();
        let mut out = Vec::with_capacity(4 + len);
        out.extend_from_slice(&(len as u32).to_be_bytes());
        out.push(self.tag);
        out.extend_from_slice(&self.id.to_be_bytes());
        out.extend_from_slice(&self.body);
        out
    }
}

/// Connects to `endpoint`, sends one request frame, and reads back one
/// response frame, enforcing `timeout` over the whole round trip. Every
/// collaborator port is a single request/response exchange, so a fresh
/// connection per call keeps this adapter simple; a production
/// deployment under heavy query load would want a persistent connection
/// pool instead.
pub async fn roundtrip(
    endpoint: &Path,
    request: Frame,
    timeout: Duration,
) -> Result<Frame, GnsError> {
    tokio::time::timeout(timeout, roundtrip_inner(endpoint, request))
        .await
        .map_err(|_| GnsError::ServiceUnavailable(format!("{} timed out", endpoint.display())))?
}

/// Sends a request frame without waiting for (or expecting) a reply,
/// used for `CLIENT_GET_STOP` (spec §5: cancellation must still emit an
/// explicit stop, but nothing downstream depends on its response).
pub async fn send_only(endpoint: &Path, request: Frame) -> Result<(), GnsError> {
    let mut stream = UnixStream::connect(endpoint).await.map_err(|e| {
        GnsError::ServiceUnavailable(format!("failed to connect to {}: {e}", endpoint.display()))
    })?;
    stream.write_all(&request.encode()).await.map_err(|e| {
        GnsError::ServiceUnavailable(format!("failed to write to {}: {e}", endpoint.display()))
    })?;
    Ok(())
}

async fn roundtrip_inner(endpoint: &Path, request: Frame) -> Result<Frame, GnsError> {
    let mut stream = UnixStream::connect(endpoint).await.map_err(|e| {
        GnsError::ServiceUnavailable(format!("failed to connect to {}: {e}", endpoint.display()))
    })?;

    stream.write_all(&request.encode()).await.map_err(|e| {
        GnsError::ServiceUnavailable(format!("failed to write to {}: {e}", endpoint.display()))
    })?;

    let mut len_buf = [0u8; 4];
    stream.read_exact(&mut len_buf).await.map_err(|e| {
        GnsError::ServiceUnavailable(format!("failed to read response length from {}: {e}", endpoint.display()))
    })?;
    let len = u32::from_be_bytes(len_buf) as usize;
    if len < 9 {
        return Err(GnsError::InvalidResponseType);
    }

    let mut body = vec![0u8; len];
    stream.read_exact(&mut body).await.map_err(|e| {
        GnsError::ServiceUnavailable(format!("failed to read response body from {}: {e}", endpoint.display()))
    })?;

    let tag = body[0];
    let id = u64::from_be_bytes(body[1..9].try_into().unwrap());
    let payload = body[9..].to_vec();

    if id != request.id {
        return Err(GnsError::InvalidID);
    }

    Ok(Frame::new(tag, id, payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::UnixListener;

    fn temp_socket_path() -> std::path::PathBuf {
        std::env::temp_dir().join(format!("gns-framing-test-{}.sock", fastrand::u64(..)))
    }

    #[test]
    fn encode_prefixes_tag_and_id_with_a_length_covering_the_rest() {
        let frame = Frame::new(7, 42, vec![1, 2, 3]);
        let bytes = frame.encode();

        let len = u32::from_be_bytes(bytes[0..4].try_into().unwrap()) as usize;
        assert_eq!(len, 1 + 8 + 3);
        assert_eq!(bytes.len(), 4 + len);
        assert_eq!(bytes[4], 7);
        assert_eq!(u64::from_be_bytes(bytes[5..13].try_into().unwrap()), 42);
        assert_eq!(&bytes[13..], &[1, 2, 3]);
    }

    #[tokio::test]
    async fn roundtrip_matches_the_response_to_the_request_id() {
        let path = temp_socket_path();
        let listener = UnixListener::bind(&path).unwrap();

        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut len_buf = [0u8; 4];
            stream.read_exact(&mut len_buf).await.unwrap();
            let len = u32::from_be_bytes(len_buf) as usize;
            let mut body = vec![0u8; len];
            stream.read_exact(&mut body).await.unwrap();
            let id = u64::from_be_bytes(body[1..9].try_into().unwrap());

            let response = Frame::new(1, id, b"pong".to_vec());
            stream.write_all(&response.encode()).await.unwrap();
        });

        let request = Frame::new(0, 99, b"ping".to_vec());
        let response = roundtrip(&path, request, Duration::from_secs(2)).await.unwrap();

        assert_eq!(response.id, 99);
        assert_eq!(response.body, b"pong");

        server.await.unwrap();
        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn roundtrip_rejects_a_mismatched_correlation_id() {
        let path = temp_socket_path();
        let listener = UnixListener::bind(&path).unwrap();

        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut len_buf = [0u8; 4];
            stream.read_exact(&mut len_buf).await.unwrap();
            let len = u32::from_be_bytes(len_buf) as usize;
            let mut body = vec![0u8; len];
            stream.read_exact(&mut body).await.unwrap();

            let response = Frame::new(1, 12345, b"wrong-id".to_vec());
            stream.write_all(&response.encode()).await.unwrap();
        });

        let request = Frame::new(0, 99, b"ping".to_vec());
        let result = roundtrip(&path, request, Duration::from_secs(2)).await;

        assert_eq!(result.unwrap_err(), GnsError::InvalidID);

        server.await.unwrap();
        std::fs::remove_file(&path).unwrap();
    }
}
