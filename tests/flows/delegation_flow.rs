//! Scenario D: a record at one zone's label delegates to a second zone
//! via a PKEY/EDKEY record, and resolution continues there for the
//! remaining labels (spec §4.6 step 4f priority 1).

#[path = "../common/fixtures.rs"]
mod fixtures;

use std::collections::HashMap;
use std::sync::Arc;

use fixtures::{no_revocation, FakeDnsClient, MemoryDht, MemoryNamecache};
use gns_application::{LookupOptions, Resolver};
use gns_domain::{GNSFlags, GNSType, RecordSet, ResourceRecord, TypeList, ZoneKeyType, ZonePrivate};
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn delegates_through_a_zone_key_record_to_a_child_zone() {
    let root_priv = ZonePrivate::new(ZoneKeyType::Eddsa, [3u8; 32]);
    let child_priv = ZonePrivate::new(ZoneKeyType::Eddsa, [4u8; 32]);
    let root_pub = root_priv.public_key();
    let child_pub = child_priv.public_key();

    let namecache = MemoryNamecache::default();

    let delegation = RecordSet::new(vec![ResourceRecord::new(
        0,
        GNSType::EDKEY,
        GNSFlags::empty(),
        child_pub.to_bytes().to_vec(),
    )]);
    fixtures::assemble_and_store_in_namecache(&namecache, &root_priv, "sub", &delegation, 0);

    let leaf_records = RecordSet::new(vec![ResourceRecord::new(
        0,
        GNSType::TXT,
        GNSFlags::empty(),
        b"reached the child zone".to_vec(),
    )]);
    fixtures::assemble_and_store_in_namecache(&namecache, &child_priv, "www", &leaf_records, 0);

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
            "www.sub",
            Some(root_pub),
            TypeList::Any,
            LookupOptions::default(),
            CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].data, b"reached the child zone");
}
