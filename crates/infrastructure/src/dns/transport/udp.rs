use std::net::SocketAddr;
use std::time::Duration;

use gns_domain::GnsError;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// Single-shot UDP DNS transport: one ephemeral socket per query, no
/// pooling. GNS2DNS fallback queries are already fanned out and raced
/// by [`gns_application::dns_fallback::DnsFallback`], so there is no
/// per-process hot path that would benefit from socket reuse here.
pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    pub async fn send(&self, message_bytes: &[u8], timeout: Duration) -> Result<Vec<u8>, GnsError> {
        let bind_addr: SocketAddr = if self.server_addr.is_ipv4() {
            "0.0.0.0:0".parse().unwrap()
        } else {
            "[::]:0".parse().unwrap()
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| GnsError::ServiceUnavailable(format!("failed to bind UDP socket: {e}")))?;

        tokio::time::timeout(timeout, socket.send_to(message_bytes, self.server_addr))
            .await
            .map_err(|_| GnsError::DNSTimedOut)?
            .map_err(|e| GnsError::ServiceUnavailable(format!("UDP send to {} failed: {e}", self.server_addr)))?;

        debug!(server = %self.server_addr, "DNS query sent over UDP");

        let mut buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        let (len, from) = tokio::time::timeout(timeout, socket.recv_from(&mut buf))
            .await
            .map_err(|_| GnsError::DNSTimedOut)?
            .map_err(|e| GnsError::ServiceUnavailable(format!("UDP recv from {} failed: {e}", self.server_addr)))?;

        if from.ip() != self.server_addr.ip() {
            warn!(expected = %self.server_addr, received_from = %from, "DNS response from unexpected source");
        }

        buf.truncate(len);
        Ok(buf)
    }
}
