//! Integration tests: record construction, validation, and the wire format.

use scmledger_core::{
    error::LedgerError,
    ledger::SupplyChainLedger,
    record::{DemandForecast, Envelope, InventoryData, Record, RiskAssessment, SupplyChainEvent, SCHEMA_VERSION},
    store::SqliteStore,
};

/// Serialize-then-deserialize is field-equal for every record shape.
#[test]
fn envelopes_round_trip() {
    let mut event = SupplyChainEvent::new("E1", "lot-7", "shipment", "{}", "acme").unwrap();
    event.hash = scmledger_core::chain::content_hash(&event);
    let records = [
        Record::Event(event),
        Record::Forecast(DemandForecast::from_encoded("F1", "[10,12,15]", 0.85, 14, 0.9).unwrap()),
        Record::Inventory(InventoryData::new("X", "widget", 1, 2, 0, 1, 1, 0, "ok").unwrap()),
        Record::Risk(RiskAssessment::new("R1", 8.0, 6.0, 5.0, 9.0).unwrap()),
    ];
    for record in records {
        let envelope = Envelope::new(record);
        let bytes = envelope.to_bytes().unwrap();
        assert_eq!(Envelope::from_slice(&bytes).unwrap(), envelope);
    }
}

/// The envelope carries the schema version and the kind discriminator, and
/// record fields keep their original camelCase wire names.
#[test]
fn wire_format_is_tagged_and_versioned() {
    let record = Record::Forecast(
        DemandForecast::from_encoded("F1", "[10,12,15]", 0.85, 14, 0.9).unwrap(),
    );
    let json = String::from_utf8(Envelope::new(record).to_bytes().unwrap()).unwrap();

    assert!(json.contains(&format!("\"schemaVersion\":{SCHEMA_VERSION}")), "{json}");
    assert!(json.contains("\"kind\":\"Forecast\""), "{json}");
    assert!(json.contains("\"historicalSales\":[10,12,15]"), "{json}");
    assert!(json.contains("\"nextMonthDemand\":14"), "{json}");

    let event = Record::Event(SupplyChainEvent::new("E1", "lot", "t", "d", "o").unwrap());
    let json = String::from_utf8(Envelope::new(event).to_bytes().unwrap()).unwrap();
    assert!(json.contains("\"type\":\"t\""), "{json}");
    assert!(json.contains("\"previousHash\":\"\""), "{json}");
}

/// Unparsable or empty sales history is a validation failure, surfaced
/// immediately and never persisted.
#[test]
fn malformed_sales_history_is_rejected() {
    let mut ledger = SupplyChainLedger::new(SqliteStore::in_memory().unwrap());

    let err = ledger
        .store_demand_forecast("F1", "not json", 0.85, 14, 0.9)
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation { .. }), "got {err}");

    let err = ledger
        .store_demand_forecast("F1", "[]", 0.85, 14, 0.9)
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation { .. }), "got {err}");

    assert!(!ledger.exists("F1").unwrap(), "failed write must not persist");
}

/// An empty id can never become a store key.
#[test]
fn empty_id_is_rejected() {
    let mut ledger = SupplyChainLedger::new(SqliteStore::in_memory().unwrap());
    let err = ledger.store_risk_assessment("", 1.0, 1.0, 1.0, 1.0).unwrap_err();
    assert!(matches!(err, LedgerError::Validation { .. }), "got {err}");
}

/// Stock-field ordering (min <= reorder <= max) is advisory: writes that
/// violate it are accepted as-is. Consumers, not the write path, interpret
/// the values.
#[test]
fn inventory_ordering_is_not_enforced() {
    let mut ledger = SupplyChainLedger::new(SqliteStore::in_memory().unwrap());
    ledger
        .store_inventory_data("X", "widget", 5, 10, 90, 300, 7, 0, "confused")
        .unwrap();

    let Record::Inventory(inv) = ledger.query_data("X").unwrap() else {
        panic!("expected an inventory record");
    };
    assert_eq!(inv.min_stock, 90);
    assert_eq!(inv.reorder_point, 300);
    assert_eq!(inv.max_stock, 10);
}
