//! The ledger facade — boundary operations over the store gateway.
//!
//! Each write is one synchronous unit of work: validate and construct the
//! record, stamp chain linkage where it applies, serialize, then hand the
//! bytes to the store in a single atomic call. A failure anywhere in that
//! sequence leaves no partially visible record.

use crate::{
    chain,
    error::{LedgerError, LedgerResult},
    record::{DemandForecast, Envelope, InventoryData, Record, RiskAssessment, SupplyChainEvent},
    store::KvStore,
};
use std::collections::HashMap;

pub struct SupplyChainLedger<S: KvStore> {
    pub store: S,
}

impl<S: KvStore> SupplyChainLedger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Append a hash-chained event to its subject's chain.
    ///
    /// The predecessor observed at link time is re-checked atomically at
    /// write time; if another writer advanced the chain in between, the
    /// write aborts with `ChainFork` and nothing is persisted.
    pub fn store_event(
        &mut self,
        id: &str,
        subject: &str,
        event_type: &str,
        data: &str,
        owner: &str,
    ) -> LedgerResult<()> {
        let mut event = SupplyChainEvent::new(id, subject, event_type, data, owner)?;
        let expected = chain::link(&self.store, &mut event)?;
        let new_head = event.hash.clone();
        let bytes = Envelope::new(Record::Event(event)).to_bytes()?;
        let linked = self.store.put_linked(
            id,
            &bytes,
            subject,
            expected.as_deref(),
            &new_head,
        )?;
        if !linked {
            let found = self.store.head(subject)?;
            log::warn!("chain fork detected for subject '{subject}', write of '{id}' aborted");
            return Err(LedgerError::ChainFork {
                subject: subject.to_string(),
                expected,
                found,
            });
        }
        log::debug!("stored event '{id}' on subject '{subject}' (head {new_head})");
        Ok(())
    }

    /// `historical_sales_json` is the transport encoding of the sales
    /// history, a JSON integer array.
    pub fn store_demand_forecast(
        &mut self,
        id: &str,
        historical_sales_json: &str,
        forecast_accuracy: f64,
        next_month_demand: u64,
        confidence_level: f64,
    ) -> LedgerResult<()> {
        let forecast = DemandForecast::from_encoded(
            id,
            historical_sales_json,
            forecast_accuracy,
            next_month_demand,
            confidence_level,
        )?;
        self.put_record(Record::Forecast(forecast))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn store_inventory_data(
        &mut self,
        id: &str,
        item_name: &str,
        current_stock: u64,
        max_stock: u64,
        min_stock: u64,
        reorder_point: u64,
        lead_time: u64,
        stock_level: i64,
        status: &str,
    ) -> LedgerResult<()> {
        let inventory = InventoryData::new(
            id,
            item_name,
            current_stock,
            max_stock,
            min_stock,
            reorder_point,
            lead_time,
            stock_level,
            status,
        )?;
        self.put_record(Record::Inventory(inventory))
    }

    pub fn store_risk_assessment(
        &mut self,
        id: &str,
        supply_risk: f64,
        demand_risk: f64,
        quality_risk: f64,
        financial_risk: f64,
    ) -> LedgerResult<()> {
        let assessment =
            RiskAssessment::new(id, supply_risk, demand_risk, quality_risk, financial_risk)?;
        self.put_record(Record::Risk(assessment))
    }

    /// Point lookup. An absent key is `NotFound`, distinct from a store
    /// failure, so callers can branch on "does not exist" vs "could not
    /// determine".
    pub fn query_data(&self, id: &str) -> LedgerResult<Record> {
        match self.store.get(id)? {
            Some(bytes) => Ok(Envelope::from_slice(&bytes)?.record),
            None => Err(LedgerError::NotFound { id: id.to_string() }),
        }
    }

    /// The stored JSON verbatim, for callers that pass records through
    /// without interpreting them.
    pub fn query_raw(&self, id: &str) -> LedgerResult<String> {
        match self.store.get(id)? {
            Some(bytes) => String::from_utf8(bytes)
                .map_err(|e| LedgerError::validation(format!("stored value is not UTF-8: {e}"))),
            None => Err(LedgerError::NotFound { id: id.to_string() }),
        }
    }

    pub fn exists(&self, id: &str) -> LedgerResult<bool> {
        Ok(self.store.get(id)?.is_some())
    }

    /// All records with keys in `[start, end)`, in ascending key order.
    /// An empty result is valid. No type filtering — callers branch on the
    /// record's `kind` after deserialization.
    pub fn get_all_data(&self, start: &str, end: &str) -> LedgerResult<Vec<Record>> {
        let mut records = Vec::new();
        self.store.for_each_in_range(start, end, &mut |_key, value| {
            records.push(Envelope::from_slice(value)?.record);
            Ok(true)
        })?;
        Ok(records)
    }

    /// Re-verify a subject's hash chain against the stored head.
    ///
    /// Scans `[start, end)` for the subject's events, walks the chain
    /// backward from the head, then checks every content hash and link.
    /// Returns the number of events verified (0 when the subject has no
    /// chain).
    pub fn verify_chain(&self, subject: &str, start: &str, end: &str) -> LedgerResult<usize> {
        let mut by_hash: HashMap<String, SupplyChainEvent> = HashMap::new();
        self.store.for_each_in_range(start, end, &mut |_key, value| {
            if let Record::Event(event) = Envelope::from_slice(value)?.record {
                if event.subject == subject {
                    by_hash.insert(event.hash.clone(), event);
                }
            }
            Ok(true)
        })?;

        let mut ordered = Vec::new();
        let mut cursor = self.store.head(subject)?;
        while let Some(hash) = cursor {
            let event = by_hash.remove(&hash).ok_or_else(|| LedgerError::ChainBroken {
                id: hash.clone(),
                reason: "chain references an event outside the scanned range".into(),
            })?;
            cursor = if event.previous_hash.is_empty() {
                None
            } else {
                Some(event.previous_hash.clone())
            };
            ordered.push(event);
        }
        ordered.reverse();
        chain::verify(&ordered)?;
        Ok(ordered.len())
    }

    fn put_record(&mut self, record: Record) -> LedgerResult<()> {
        let id = record.id().to_string();
        let bytes = Envelope::new(record).to_bytes()?;
        self.store.put(&id, &bytes)?;
        log::debug!("stored record '{id}'");
        Ok(())
    }
}
