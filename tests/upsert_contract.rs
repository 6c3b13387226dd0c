//! Contract tests for the A-record upsert decision logic.
//!
//! Each test drives `UpsertEngine` against a counting fake of the management
//! interface and asserts exactly which contract operations ran: one create for
//! a new owner name, nothing for a matching record, one modify for a stale
//! one, and a hard refusal when the one-record invariant is already broken.

mod common;

use common::{
    a_record, owner, test_config, CountingZoneStore, FixedHostAddr, NoHostAddr, StoreCounters,
};
use std::net::Ipv4Addr;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use zoneup::error::Error;
use zoneup::UpsertEngine;

const HOST_ADDR: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 7);

fn counts(counters: &StoreCounters) -> (usize, usize, usize, usize) {
    (
        counters.connect.load(Ordering::SeqCst),
        counters.query.load(Ordering::SeqCst),
        counters.create.load(Ordering::SeqCst),
        counters.modify.load(Ordering::SeqCst),
    )
}

#[tokio::test]
async fn new_owner_name_issues_exactly_one_create() {
    let (store, counters) = CountingZoneStore::new();
    let engine = UpsertEngine::new(
        test_config("example.local."),
        store.clone(),
        Arc::new(FixedHostAddr(HOST_ADDR)),
    );

    let fqdn = engine.upsert("Printer", None).await.unwrap();
    assert_eq!(fqdn.to_utf8(), "printer.example.local.");
    assert_eq!(counts(&counters), (1, 1, 1, 0));

    // Round-trip: the record just written comes back from a fresh query.
    let records = store
        .read()
        .await
        .query_a(&owner("printer.example.local."))
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].addr, HOST_ADDR);
    assert_eq!(records[0].ttl, 3600);
}

#[tokio::test]
async fn matching_record_is_a_no_op() {
    let (store, counters) = CountingZoneStore::new();
    let engine = UpsertEngine::new(
        test_config("example.local."),
        store,
        Arc::new(FixedHostAddr(HOST_ADDR)),
    );

    engine.upsert("printer", None).await.unwrap();
    let fqdn = engine.upsert("printer", None).await.unwrap();

    assert_eq!(fqdn.to_utf8(), "printer.example.local.");
    // Second request queried but neither created nor modified.
    assert_eq!(counts(&counters), (2, 2, 1, 0));
}

#[tokio::test]
async fn changed_address_issues_exactly_one_modify() {
    let (store, counters) = CountingZoneStore::new();
    let engine = UpsertEngine::new(
        test_config("example.local."),
        store.clone(),
        Arc::new(FixedHostAddr(HOST_ADDR)),
    );

    engine.upsert("printer", None).await.unwrap();
    let moved = Ipv4Addr::new(10, 0, 0, 42);
    engine.upsert("printer", Some(moved)).await.unwrap();

    assert_eq!(counts(&counters), (2, 2, 1, 1));
    let records = store
        .read()
        .await
        .query_a(&owner("printer.example.local."))
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].addr, moved);
}

#[tokio::test]
async fn case_and_padding_variants_name_the_same_record() {
    let (store, counters) = CountingZoneStore::new();
    let engine = UpsertEngine::new(
        test_config("example.local."),
        store,
        Arc::new(FixedHostAddr(HOST_ADDR)),
    );

    engine.upsert("printer", None).await.unwrap();
    engine.upsert(" PRINTER. ", None).await.unwrap();

    // The second spelling resolved to the same owner name and became a no-op.
    assert_eq!(counts(&counters), (2, 2, 1, 0));
}

#[tokio::test]
async fn duplicated_owner_refuses_to_mutate() {
    let (store, counters) = CountingZoneStore::seeded(vec![
        a_record("printer.example.local.", Ipv4Addr::new(10, 0, 0, 1)),
        a_record("printer.example.local.", Ipv4Addr::new(10, 0, 0, 2)),
    ]);
    let engine = UpsertEngine::new(
        test_config("example.local."),
        store,
        Arc::new(FixedHostAddr(HOST_ADDR)),
    );

    let err = engine.upsert("printer", None).await.unwrap_err();
    assert!(matches!(
        err,
        Error::AmbiguousRecord { count: 2, .. }
    ));
    assert!(err.to_string().contains("printer.example.local"));
    // Queried, then mutated nothing.
    assert_eq!(counts(&counters), (1, 1, 0, 0));
}

#[tokio::test]
async fn unreachable_interface_fails_before_any_query() {
    let (store, counters) = CountingZoneStore::unreachable();
    let engine = UpsertEngine::new(
        test_config("example.local."),
        store,
        Arc::new(FixedHostAddr(HOST_ADDR)),
    );

    let err = engine.upsert("printer", None).await.unwrap_err();
    assert!(matches!(err, Error::ConnectionFailed { .. }));
    assert_eq!(counts(&counters), (1, 0, 0, 0));
}

#[tokio::test]
async fn invalid_subdomain_never_touches_the_store() {
    let (store, counters) = CountingZoneStore::new();
    let engine = UpsertEngine::new(
        test_config("example.local."),
        store,
        Arc::new(FixedHostAddr(HOST_ADDR)),
    );

    for raw in ["", "   ", "...", "a b"] {
        let err = engine.upsert(raw, None).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
    assert_eq!(counts(&counters), (0, 0, 0, 0));
}

#[tokio::test]
async fn missing_host_address_fails_before_connecting() {
    let (store, counters) = CountingZoneStore::new();
    let engine = UpsertEngine::new(test_config("example.local."), store, Arc::new(NoHostAddr));

    let err = engine.upsert("printer", None).await.unwrap_err();
    assert!(matches!(err, Error::NoAddressAvailable));
    assert_eq!(counts(&counters), (0, 0, 0, 0));
}

#[tokio::test]
async fn supplied_address_wins_over_host_resolution() {
    let (store, counters) = CountingZoneStore::new();
    let engine = UpsertEngine::new(
        test_config("example.local."),
        store.clone(),
        Arc::new(NoHostAddr),
    );

    let supplied = Ipv4Addr::new(192, 168, 1, 40);
    let fqdn = engine.upsert("nas", Some(supplied)).await.unwrap();
    assert_eq!(fqdn.to_utf8(), "nas.example.local.");
    assert_eq!(counts(&counters), (1, 1, 1, 0));

    let records = store
        .read()
        .await
        .query_a(&owner("nas.example.local."))
        .await
        .unwrap();
    assert_eq!(records[0].addr, supplied);
}
