//! End-to-end single-label resolution: a name resolves straight out of
//! the namecache with no delegation, DNS fallback, or boxing involved.

#[path = "../common/fixtures.rs"]
mod fixtures;

use std::collections::HashMap;
use std::sync::Arc;

use fixtures::{no_revocation, FakeDnsClient, MemoryDht, MemoryNamecache};
use gns_application::{LookupOptions, Resolver};
use gns_domain::{GNSFlags, GNSType, RecordSet, ResourceRecord, TypeList, ZoneKeyType, ZonePrivate};
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn resolves_a_txt_record_published_at_the_apex() {
    let zone_priv = ZonePrivate::new(ZoneKeyType::Eddsa, [1u8; 32]);
    let zone_pub = zone_priv.public_key();

    let records = RecordSet::new(vec![ResourceRecord::new(
        0,
        GNSType::TXT,
        GNSFlags::empty(),
        b"hello from gns".to_vec(),
    )]);

    let namecache = MemoryNamecache::default();
    fixtures::assemble_and_store_in_namecache(&namecache, &zone_priv, "@", &records, 0);

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
            "@",
            Some(zone_pub),
            TypeList::Any,
            LookupOptions::default(),
            CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].data, b"hello from gns");
}

#[tokio::test]
async fn unpublished_label_resolves_to_an_empty_set_not_an_error() {
    let zone_priv = ZonePrivate::new(ZoneKeyType::Ecdsa, [2u8; 32]);
    let zone_pub = zone_priv.public_key();

    let resolver = Resolver::new(
        Arc::new(MemoryNamecache::default()),
        Arc::new(MemoryDht::default()),
        Arc::new(no_revocation()),
        Arc::new(FakeDnsClient::default()),
        HashMap::new(),
        10,
    );

    let result = resolver
        .resolve(
            "nothing-here",
            Some(zone_pub),
            TypeList::Any,
            LookupOptions::default(),
            CancellationToken::new(),
        )
        .await
        .unwrap();

    assert!(result.is_empty());
}
