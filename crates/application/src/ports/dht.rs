use async_trait::async_trait;
use gns_domain::GnsError;

/// The DHT collaborator (spec §6): remote, replicated block storage.
/// `CLIENT_GET` is a suspension point that must be cancellable; a
/// cancelled lookup must still emit `CLIENT_GET_STOP` to release remote
/// resources (spec §5).
#[async_trait]
pub trait DhtClient: Send + Sync {
    async fn get(&self, request: DhtGetRequest) -> Result<Option<DhtGetResult>, GnsError>;

    async fn get_stop(&self, key: &[u8; 64]);
}

#[derive(Debug, Clone)]
pub struct DhtGetRequest {
    pub id: u64,
    pub key: [u8; 64],
    pub repl_level: u32,
    pub block_type: u32,
    /// `DHT_RO_DEMULTIPLEX_EVERYWHERE`, passed through unmodified
    /// (spec §A.2 supplement 5).
    pub demultiplex_everywhere: bool,
}

#[derive(Debug, Clone)]
pub struct DhtGetResult {
    pub id: u64,
    pub expire: u64,
    pub block_type: u32,
    pub data: Vec<u8>,
}
