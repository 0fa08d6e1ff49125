//! Integration tests: point lookup and range scan over the ledger keyspace.

use scmledger_core::{
    error::LedgerError,
    ledger::SupplyChainLedger,
    record::Record,
    store::SqliteStore,
};

fn ledger() -> SupplyChainLedger<SqliteStore> {
    SupplyChainLedger::new(SqliteStore::in_memory().unwrap())
}

/// An absent key is NotFound — a branchable outcome, not a store failure.
#[test]
fn query_on_never_written_id_is_not_found() {
    let ledger = ledger();
    let err = ledger.query_data("nope").unwrap_err();
    assert!(matches!(err, LedgerError::NotFound { .. }), "got {err}");
    assert!(!ledger.exists("nope").unwrap());
}

/// Stored inventory fields read back equal to the inputs.
#[test]
fn inventory_round_trips_through_the_store() {
    let mut ledger = ledger();
    ledger
        .store_inventory_data("X", "widget", 100, 200, 20, 50, 7, 1, "ok")
        .unwrap();

    let Record::Inventory(inv) = ledger.query_data("X").unwrap() else {
        panic!("expected an inventory record");
    };
    assert_eq!(inv.item_name, "widget");
    assert_eq!(inv.current_stock, 100);
    assert_eq!(inv.max_stock, 200);
    assert_eq!(inv.min_stock, 20);
    assert_eq!(inv.reorder_point, 50);
    assert_eq!(inv.lead_time, 7);
    assert_eq!(inv.stock_level, 1);
    assert_eq!(inv.status, "ok");
}

/// The worked forecast example from the boundary contract.
#[test]
fn forecast_parses_transport_encoding() {
    let mut ledger = ledger();
    ledger
        .store_demand_forecast("F1", "[10,12,15]", 0.85, 14, 0.9)
        .unwrap();

    let Record::Forecast(forecast) = ledger.query_data("F1").unwrap() else {
        panic!("expected a forecast record");
    };
    assert_eq!(forecast.historical_sales, vec![10, 12, 15]);
    assert_eq!(forecast.next_month_demand, 14);
    assert_eq!(forecast.forecast_accuracy, 0.85);
    assert_eq!(forecast.confidence_level, 0.9);
}

/// Range scans cover [start, end) in ascending key order; the end key is
/// excluded and an empty range is a valid, empty result.
#[test]
fn range_scan_is_half_open_and_ordered() {
    let mut ledger = ledger();
    // Insert out of key order on purpose.
    for id in ["C", "A", "D", "B"] {
        ledger
            .store_inventory_data(id, "widget", 1, 2, 0, 1, 1, 0, "ok")
            .unwrap();
    }

    let records = ledger.get_all_data("A", "D").unwrap();
    let ids: Vec<&str> = records.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["A", "B", "C"], "D is outside [A, D)");

    assert!(ledger.get_all_data("E", "Z").unwrap().is_empty());
}

/// One keyspace, mixed shapes: callers dispatch on the record kind.
#[test]
fn range_scan_yields_mixed_kinds_untyped() {
    let mut ledger = ledger();
    ledger.store_risk_assessment("K1", 2.0, 2.0, 2.0, 2.0).unwrap();
    ledger.store_demand_forecast("K2", "[1]", 0.5, 3, 0.5).unwrap();
    ledger.store_event("K3", "lot-1", "created", "{}", "acme").unwrap();

    let records = ledger.get_all_data("K", "L").unwrap();
    assert_eq!(records.len(), 3);
    assert!(matches!(records[0], Record::Risk(_)));
    assert!(matches!(records[1], Record::Forecast(_)));
    assert!(matches!(records[2], Record::Event(_)));
}

/// A second write under the same id silently replaces the first.
#[test]
fn same_id_overwrites() {
    let mut ledger = ledger();
    ledger
        .store_inventory_data("X", "widget", 1, 2, 0, 1, 1, 0, "ok")
        .unwrap();
    ledger
        .store_inventory_data("X", "gadget", 9, 9, 9, 9, 9, 9, "low")
        .unwrap();

    let Record::Inventory(inv) = ledger.query_data("X").unwrap() else {
        panic!("expected an inventory record");
    };
    assert_eq!(inv.item_name, "gadget");
    assert_eq!(ledger.get_all_data("X", "Y").unwrap().len(), 1);
}
