//! The recursive resolver (spec §4.6): label-by-label resolution,
//! orchestrating the namecache/DHT lookups, delegation, boxing, and DNS
//! fallback, producing a filtered result set.

use std::collections::HashMap;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use gns_domain::label::split_to_root_first;
use gns_domain::{
    GNSType, GnsBlock, GnsError, GnsResult, Query, RecordSet, TypeList, ZonePublic,
};

use crate::dns_fallback::{DnsFallback, GnsAddressResolver};
use crate::handlers::{build_handlers, BuiltHandler, HandlerContext};
use crate::ports::{
    DhtClient, DhtGetRequest, DnsClient, NamecacheClient, NamecacheEntry, RevocationClient,
};

/// `DEFAULT` (cache then DHT), `NO_DHT` (cache only), `LOCAL_MASTER`
/// (right-most label in cache only; remaining allowed to reach DHT).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMode {
    Default,
    NoDht,
    LocalMaster,
}

#[derive(Debug, Clone)]
pub struct LookupOptions {
    pub mode: LookupMode,
    /// `DHT_RO_DEMULTIPLEX_EVERYWHERE`, passed through unmodified.
    pub demultiplex_everywhere: bool,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            mode: LookupMode::Default,
            demultiplex_everywhere: false,
        }
    }
}

pub struct Resolver<N, D, R, C> {
    namecache: Arc<N>,
    dht: Arc<D>,
    revocation: Arc<R>,
    dns_fallback: DnsFallback<C>,
    root_zones: HashMap<String, ZonePublic>,
    replication_level: u32,
}

impl<N, D, R, C> Resolver<N, D, R, C>
where
    N: NamecacheClient,
    D: DhtClient,
    R: RevocationClient,
    C: DnsClient,
{
    pub fn new(
        namecache: Arc<N>,
        dht: Arc<D>,
        revocation: Arc<R>,
        dns_client: Arc<C>,
        root_zones: HashMap<String, ZonePublic>,
        replication_level: u32,
    ) -> Self {
        Self {
            namecache,
            dht,
            revocation,
            dns_fallback: DnsFallback::new(dns_client),
            root_zones,
            replication_level,
        }
    }

    fn resolve_root(&self, label: &str) -> GnsResult<ZonePublic> {
        if let Ok(zone) = ZonePublic::from_ztld(label) {
            return Ok(zone);
        }
        if let Some(zone) = self.root_zones.get(label) {
            return Ok(zone.clone());
        }
        Err(GnsError::UnknownTLD(label.to_string()))
    }

    /// One `(zone, label)` block fetch: local cache, then (if allowed)
    /// the DHT, verified and decrypted (spec §4.6 step 4a-d).
    async fn fetch_block(
        &self,
        zone: &ZonePublic,
        query: &Query,
        allow_remote: bool,
        now: u64,
        request_id: u64,
        demultiplex_everywhere: bool,
        cancel: &CancellationToken,
    ) -> GnsResult<Option<GnsBlock>> {
        if let Some(entry) = self.namecache.lookup(&query.q).await? {
            return Ok(Some(entry_to_block(zone, entry)));
        }

        if !allow_remote {
            return Ok(None);
        }

        let request = DhtGetRequest {
            id: request_id,
            key: query.q,
            repl_level: self.replication_level,
            block_type: zone.key_type.tag(),
            demultiplex_everywhere,
        };

        tokio::select! {
            _ = cancel.cancelled() => {
                self.dht.get_stop(&query.q).await;
                Err(GnsError::Cancelled)
            }
            result = self.dht.get(request) => {
                let result = result?;
                match result {
                    None => Ok(None),
                    Some(hit) => {
                        let block = GnsBlock::read_from(&hit.data)?;
                        self.namecache
                            .store(&query.q, block_to_entry(&block))
                            .await?;
                        Ok(Some(block))
                    }
                }
            }
        }
    }

    /// `Lookup(zone_pub, name, type, options) -> RecordSet` (spec §6).
    #[instrument(skip(self, cancel), fields(path = %path))]
    pub async fn resolve(
        &self,
        path: &str,
        starting_zone: Option<ZonePublic>,
        requested_types: TypeList,
        options: LookupOptions,
        cancel: CancellationToken,
    ) -> GnsResult<RecordSet> {
        let mut labels = split_to_root_first(path);
        if labels.is_empty() {
            return Err(GnsError::BadLabel("name has no labels".into()));
        }

        let mut current_zone = match starting_zone {
            Some(zone) => zone,
            None => {
                let root_label = labels.remove(0);
                self.resolve_root(&root_label)?
            }
        };

        let mut mode = options.mode;
        let mut request_id: u64 = 0;
        let now = current_unix_micros();
        let mut final_records: Option<RecordSet> = None;

        let mut idx = 0;
        while idx < labels.len() {
            if cancel.is_cancelled() {
                return Err(GnsError::Cancelled);
            }
            let current_label = labels[idx].clone();
            let remaining_after: Vec<String> = labels[idx + 1..].to_vec();
            let is_apex = current_label == gns_domain::label::APEX_LABEL;

            let query = Query::new(current_zone.clone(), current_label.clone())?;
            let allow_remote = !matches!(mode, LookupMode::NoDht | LookupMode::LocalMaster);
            request_id += 1;

            let block = self
                .fetch_block(
                    &current_zone,
                    &query,
                    allow_remote,
                    now,
                    request_id,
                    options.demultiplex_everywhere,
                    &cancel,
                )
                .await?;

            if mode == LookupMode::LocalMaster {
                mode = LookupMode::Default;
            }

            let block = match block {
                Some(block) => block,
                None => {
                    final_records = Some(RecordSet::default());
                    break;
                }
            };

            let record_set = match block.verify_and_decrypt(&current_zone, &current_label, now) {
                Ok(set) => set,
                Err(GnsError::BlockExpired) => {
                    final_records = Some(RecordSet::default());
                    break;
                }
                Err(err) => return Err(err),
            };

            let ctx = HandlerContext {
                is_apex,
                remaining_labels: &remaining_after,
            };
            let handlers = build_handlers(&record_set.records, now, now, &ctx)?;

            let zone_key = handlers.values().find_map(|h| match h {
                BuiltHandler::ZoneKey(zk) => Some(zk),
                _ => None,
            });
            let gns2dns = handlers.values().find_map(|h| match h {
                BuiltHandler::Gns2Dns(g) => Some(g),
                _ => None,
            });
            let boxed = handlers.values().find_map(|h| match h {
                BuiltHandler::Box(b) => Some(b),
                _ => None,
            });

            if let Some(zk) = zone_key {
                let delegated = zk.zone.clone().ok_or(GnsError::InvalidZoneKey)?;
                if !self.revocation.query(&delegated).await? {
                    warn!(zone = %delegated.to_ztld(), "delegated zone key failed revocation check");
                    return Err(GnsError::BadZone("zone key revoked".into()));
                }
                current_zone = delegated;
                idx += 1;
                continue;
            }

            if let Some(g) = gns2dns {
                debug!(dns_name = ?g.dns_name, "delegating to DNS fallback");
                let dns_name = g
                    .dns_name
                    .clone()
                    .ok_or_else(|| GnsError::InvalidRecordBody("GNS2DNS record missing name".into()))?;
                let set = self
                    .dns_fallback
                    .resolve(
                        &dns_name,
                        &g.servers,
                        &remaining_after,
                        &requested_types,
                        self,
                        cancel.clone(),
                    )
                    .await?;
                final_records = Some(set);
                break;
            }

            if let Some(b) = boxed {
                if remaining_after.len() == 2
                    && remaining_after[0].starts_with('_')
                    && remaining_after[1].starts_with('_')
                {
                    if let (Some(proto), Some(svc)) = (
                        parse_box_proto(&remaining_after[0]),
                        parse_box_svc(&remaining_after[1]),
                    ) {
                        if let Some(inner) = b.activate(proto, svc) {
                            if requested_types.matches(inner.record_type) {
                                final_records = Some(RecordSet::new(vec![inner]));
                            } else {
                                final_records = Some(RecordSet::default());
                            }
                            break;
                        }
                    }
                }
            }

            // Otherwise: merge every handler's contribution and terminate.
            let mut merged = RecordSet::default();
            for handler in handlers.values() {
                merged.records.extend(handler.records(&requested_types).records);
            }
            final_records = Some(merged);
            break;
        }

        let records = final_records.unwrap_or_default();
        Ok(RecordSet::new(
            records
                .records
                .into_iter()
                .filter(|rec| requested_types.matches(rec.record_type))
                .collect(),
        ))
    }
}

#[async_trait::async_trait]
impl<N, D, R, C> GnsAddressResolver for Resolver<N, D, R, C>
where
    N: NamecacheClient,
    D: DhtClient,
    R: RevocationClient,
    C: DnsClient,
{
    async fn resolve_address(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> GnsResult<Vec<std::net::IpAddr>> {
        let set = self
            .resolve(
                name,
                None,
                TypeList::Only(vec![GNSType::AAAA, GNSType::A]),
                LookupOptions::default(),
                cancel.clone(),
            )
            .await?;
        let mut addrs = Vec::new();
        for rec in set.records {
            if rec.record_type == GNSType::AAAA && rec.data.len() == 16 {
                let octets: [u8; 16] = rec.data.try_into().unwrap();
                addrs.push(std::net::IpAddr::from(octets));
            } else if rec.record_type == GNSType::A && rec.data.len() == 4 {
                let octets: [u8; 4] = rec.data.try_into().unwrap();
                addrs.push(std::net::IpAddr::from(octets));
            }
        }
        addrs.sort_by_key(|a| a.is_ipv4());
        Ok(addrs)
    }
}

fn entry_to_block(zone: &ZonePublic, entry: NamecacheEntry) -> GnsBlock {
    GnsBlock {
        zone_type: zone.key_type,
        derived_pub: entry.derived_pub,
        signature: entry.signature,
        expire: entry.expire,
        bdata: entry.enc_data,
    }
}

fn block_to_entry(block: &GnsBlock) -> NamecacheEntry {
    NamecacheEntry {
        expire: block.expire,
        derived_pub: block.derived_pub,
        signature: block.signature,
        enc_data: block.bdata.clone(),
    }
}

fn parse_box_proto(label: &str) -> Option<u16> {
    match label.trim_start_matches('_') {
        "tcp" => Some(6),
        "udp" => Some(17),
        other => other.parse().ok(),
    }
}

fn parse_box_svc(label: &str) -> Option<u16> {
    label.trim_start_matches('_').parse().ok()
}

fn current_unix_micros() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0)
}
