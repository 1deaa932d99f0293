use async_trait::async_trait;
use gns_domain::GnsError;

/// The namecache collaborator (spec §6): a local, short-lived cache of
/// previously-fetched blocks, consulted before the DHT.
#[async_trait]
pub trait NamecacheClient: Send + Sync {
    /// `LOOKUP(q)`. An empty result means the block was not found in the
    /// cache, not an error.
    async fn lookup(&self, q: &[u8; 64]) -> Result<Option<NamecacheEntry>, GnsError>;

    /// `CACHE(block)`. Stores a freshly-fetched (and already-verified)
    /// block for subsequent lookups of the same `q`.
    async fn store(&self, q: &[u8; 64], entry: NamecacheEntry) -> Result<(), GnsError>;
}

/// `LOOKUP_RESULT{expire, derived_pub, signature, enc_data}` flattened
/// into the fields a caller needs to rebuild a `GnsBlock`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamecacheEntry {
    pub expire: u64,
    pub derived_pub: [u8; 32],
    pub signature: [u8; 64],
    pub enc_data: Vec<u8>,
}
