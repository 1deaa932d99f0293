//! Scenario E: a GNS2DNS record hands remaining resolution off to a
//! conventional DNS server (spec §4.5, §4.6 step 4f priority 2).

#[path = "../common/fixtures.rs"]
mod fixtures;

use std::collections::HashMap;
use std::sync::Arc;

use fixtures::{no_revocation, FakeDnsClient, MemoryDht, MemoryNamecache};
use gns_application::ports::DnsAnswer;
use gns_application::{LookupOptions, Resolver};
use gns_domain::{GNSFlags, GNSType, RecordSet, ResourceRecord, TypeList, ZoneKeyType, ZonePrivate};
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn gns2dns_record_delegates_to_a_dns_server_by_ip() {
    let zone_priv = ZonePrivate::new(ZoneKeyType::Ecdsa, [5u8; 32]);
    let zone_pub = zone_priv.public_key();

    let mut data = b"example.com".to_vec();
    data.push(0);
    data.extend_from_slice(b"192.0.2.53");
    let records = RecordSet::new(vec![ResourceRecord::new(
        0,
        GNSType::GNS2DNS,
        GNSFlags::empty(),
        data,
    )]);

    let namecache = MemoryNamecache::default();
    fixtures::assemble_and_store_in_namecache(&namecache, &zone_priv, "mail", &records, 0);

    let dns_client = FakeDnsClient {
        answers: vec![DnsAnswer {
            name: "example.com".into(),
            dns_type: 1, // A
            ttl: 300,
            rdata: vec![93, 184, 216, 34],
        }],
    };

    let resolver = Resolver::new(
        Arc::new(namecache),
        Arc::new(MemoryDht::default()),
        Arc::new(no_revocation()),
        Arc::new(dns_client),
        HashMap::new(),
        10,
    );

    let result = resolver
        .resolve(
            "mail",
            Some(zone_pub),
            TypeList::Any,
            LookupOptions::default(),
            CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].record_type, GNSType::A);
    assert_eq!(result.records[0].data, vec![93, 184, 216, 34]);
}
