//! Shared in-memory collaborator fakes for end-to-end resolution
//! scenarios (spec §8).

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Mutex;

use async_trait::async_trait;
use gns_application::ports::{
    DhtClient, DhtGetRequest, DhtGetResult, DnsAnswer, DnsClient, NamecacheClient, NamecacheEntry,
    NoRevocation,
};
use gns_domain::{GnsBlock, GnsError, Query, RecordSet, ZonePrivate, ZonePublic};

/// A namecache that never has anything cached; every lookup falls
/// through to the DHT.
#[derive(Default)]
pub struct EmptyNamecache;

#[async_trait]
impl NamecacheClient for EmptyNamecache {
    async fn lookup(&self, _q: &[u8; 64]) -> Result<Option<NamecacheEntry>, GnsError> {
        Ok(None)
    }

    async fn store(&self, _q: &[u8; 64], _entry: NamecacheEntry) -> Result<(), GnsError> {
        Ok(())
    }
}

/// An in-memory namecache, keyed by storage key `q`.
#[derive(Default)]
pub struct MemoryNamecache {
    store: Mutex<HashMap<[u8; 64], NamecacheEntry>>,
}

#[async_trait]
impl NamecacheClient for MemoryNamecache {
    async fn lookup(&self, q: &[u8; 64]) -> Result<Option<NamecacheEntry>, GnsError> {
        Ok(self.store.lock().unwrap().get(q).cloned())
    }

    async fn store(&self, q: &[u8; 64], entry: NamecacheEntry) -> Result<(), GnsError> {
        self.store.lock().unwrap().insert(*q, entry);
        Ok(())
    }
}

/// An in-memory DHT, keyed by storage key. Stands in for the network of
/// replicated block holders a real deployment would consult.
#[derive(Default)]
pub struct MemoryDht {
    store: Mutex<HashMap<[u8; 64], Vec<u8>>>,
}

impl MemoryDht {
    pub fn publish(&self, query: &Query, block: &GnsBlock) {
        let mut bytes = Vec::new();
        block.write_to(&mut bytes);
        self.store.lock().unwrap().insert(query.q, bytes);
    }
}

#[async_trait]
impl DhtClient for MemoryDht {
    async fn get(&self, request: DhtGetRequest) -> Result<Option<DhtGetResult>, GnsError> {
        let data = self.store.lock().unwrap().get(&request.key).cloned();
        Ok(data.map(|data| DhtGetResult {
            id: request.id,
            expire: 0,
            block_type: request.block_type,
            data,
        }))
    }

    async fn get_stop(&self, _key: &[u8; 64]) {}
}

/// A DNS client whose only server returns a fixed set of answers,
/// regardless of the queried name.
#[derive(Default)]
pub struct FakeDnsClient {
    pub answers: Vec<DnsAnswer>,
}

#[async_trait]
impl DnsClient for FakeDnsClient {
    async fn query_any(&self, _server: IpAddr, _name: &str) -> Result<Vec<DnsAnswer>, GnsError> {
        if self.answers.is_empty() {
            Ok(vec![])
        } else {
            Ok(self.answers.clone())
        }
    }
}

/// Publishes a block for `(zone_priv, label)` containing `records` into
/// both collaborators (namecache always wins the lookup; DHT fallback is
/// exercised separately by publishing only there).
pub fn assemble_and_store_in_namecache(
    namecache: &MemoryNamecache,
    zone_priv: &ZonePrivate,
    label: &str,
    records: &RecordSet,
    now: u64,
) -> (Query, GnsBlock) {
    let block = GnsBlock::assemble(zone_priv, label, records, now).unwrap();
    let query = Query::new(zone_priv.public_key(), label).unwrap();
    namecache_store_sync(namecache, &query, &block);
    (query, block)
}

fn namecache_store_sync(namecache: &MemoryNamecache, query: &Query, block: &GnsBlock) {
    let entry = NamecacheEntry {
        expire: block.expire,
        derived_pub: block.derived_pub,
        signature: block.signature,
        enc_data: block.bdata.clone(),
    };
    namecache.store.lock().unwrap().insert(query.q, entry);
}

pub fn no_revocation() -> NoRevocation {
    NoRevocation
}

pub fn root_zone(zone_priv: &ZonePrivate) -> ZonePublic {
    zone_priv.public_key()
}
