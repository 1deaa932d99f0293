//! Scenario F: a BOX record activates when the remaining labels name its
//! protocol and service number (spec §4.4, §4.6 step 4f priority 3).

#[path = "../common/fixtures.rs"]
mod fixtures;

use std::collections::HashMap;
use std::sync::Arc;

use fixtures::{no_revocation, FakeDnsClient, MemoryDht, MemoryNamecache};
use gns_application::{LookupOptions, Resolver};
use gns_domain::{GNSFlags, GNSType, RecordSet, ResourceRecord, TypeList, ZoneKeyType, ZonePrivate};
use tokio_util::sync::CancellationToken;

fn box_record(proto: u16, svc: u16, inner_type: u32, inner_data: &[u8]) -> ResourceRecord {
    let mut data = Vec::with_capacity(8 + inner_data.len());
    data.extend_from_slice(&proto.to_be_bytes());
    data.extend_from_slice(&svc.to_be_bytes());
    data.extend_from_slice(&inner_type.to_be_bytes());
    data.extend_from_slice(inner_data);
    ResourceRecord::new(0, GNSType::BOX, GNSFlags::empty(), data)
}

#[tokio::test]
async fn boxed_record_activates_for_matching_service_and_protocol() {
    let zone_priv = ZonePrivate::new(ZoneKeyType::Eddsa, [7u8; 32]);
    let zone_pub = zone_priv.public_key();

    let records = RecordSet::new(vec![box_record(6, 443, GNSType::A.0, &[1, 2, 3, 4])]);

    let namecache = MemoryNamecache::default();
    fixtures::assemble_and_store_in_namecache(&namecache, &zone_priv, "www", &records, 0);

    let resolver = Resolver::new(
        Arc::new(namecache),
        Arc::new(MemoryDht::default()),
        Arc::new(no_revocation()),
        Arc::new(FakeDnsClient::default()),
        HashMap::new(),
        10,
    );

    let result = resolver
        .resolve(
            "_443._tcp.www",
            Some(zone_pub),
            TypeList::Any,
            LookupOptions::default(),
            CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].record_type, GNSType::A);
    assert_eq!(result.records[0].data, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn boxed_record_with_no_matching_service_falls_through_to_raw_box() {
    let zone_priv = ZonePrivate::new(ZoneKeyType::Eddsa, [8u8; 32]);
    let zone_pub = zone_priv.public_key();

    let records = RecordSet::new(vec![box_record(6, 443, GNSType::A.0, &[1, 2, 3, 4])]);

    let namecache = MemoryNamecache::default();
    fixtures::assemble_and_store_in_namecache(&namecache, &zone_priv, "www", &records, 0);

    let resolver = Resolver::new(
        Arc::new(namecache),
        Arc::new(MemoryDht::default()),
        Arc::new(no_revocation()),
        Arc::new(FakeDnsClient::default()),
        HashMap::new(),
        10,
    );

    let result = resolver
        .resolve(
            "www",
            Some(zone_pub),
            TypeList::Only(vec![GNSType::BOX]),
            LookupOptions::default(),
            CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].record_type, GNSType::BOX);
}
