//! Record shapes and the versioned envelope they are stored in.
//!
//! Wire format is field-tagged JSON with the original camelCase field names.
//! Every stored value carries a `schemaVersion` and a `kind` discriminator so
//! readers can dispatch without speculative parsing and detect shape
//! evolution at read time.
//!
//! Constructors perform transport-level validation only: a required field
//! must be present and a structured sub-field must parse. Range and ordering
//! invariants on inventory fields are advisory and deliberately NOT enforced
//! here.

use crate::{
    error::{LedgerError, LedgerResult},
    risk::{self, RiskCategory},
    types::{RecordId, SubjectId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bumped whenever a record shape changes incompatibly.
pub const SCHEMA_VERSION: u32 = 1;

/// A generic supply-chain event, hash-chained per subject.
///
/// `previous_hash` and `hash` are stamped by the chain builder before the
/// record is persisted; they are empty on a freshly constructed event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyChainEvent {
    pub id: RecordId,
    pub subject: SubjectId,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: String,
    pub owner: String,
    pub timestamp: DateTime<Utc>,
    pub previous_hash: String,
    pub hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandForecast {
    pub id: RecordId,
    pub historical_sales: Vec<i64>,
    pub forecast_accuracy: f64,
    pub next_month_demand: u64,
    pub confidence_level: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryData {
    pub id: RecordId,
    pub item_name: String,
    pub current_stock: u64,
    pub max_stock: u64,
    pub min_stock: u64,
    pub reorder_point: u64,
    pub lead_time: u64,
    pub stock_level: i64,
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub id: RecordId,
    pub supply_risk: f64,
    pub demand_risk: f64,
    pub quality_risk: f64,
    pub financial_risk: f64,
    pub overall_risk: f64,
    pub risk_category: RiskCategory,
    pub timestamp: DateTime<Utc>,
}

impl SupplyChainEvent {
    pub fn new(
        id: &str,
        subject: &str,
        event_type: &str,
        data: &str,
        owner: &str,
    ) -> LedgerResult<Self> {
        require(id, "id")?;
        require(subject, "subject")?;
        Ok(Self {
            id: id.to_string(),
            subject: subject.to_string(),
            event_type: event_type.to_string(),
            data: data.to_string(),
            owner: owner.to_string(),
            timestamp: Utc::now(),
            previous_hash: String::new(),
            hash: String::new(),
        })
    }
}

impl DemandForecast {
    /// Build a forecast from the transport encoding of the sales history
    /// (a JSON integer array, e.g. `"[10,12,15]"`).
    pub fn from_encoded(
        id: &str,
        historical_sales_json: &str,
        forecast_accuracy: f64,
        next_month_demand: u64,
        confidence_level: f64,
    ) -> LedgerResult<Self> {
        require(id, "id")?;
        let historical_sales: Vec<i64> = serde_json::from_str(historical_sales_json)
            .map_err(|e| {
                LedgerError::validation(format!("failed to parse historical sales: {e}"))
            })?;
        if historical_sales.is_empty() {
            return Err(LedgerError::validation("historical sales must be non-empty"));
        }
        Ok(Self {
            id: id.to_string(),
            historical_sales,
            forecast_accuracy,
            next_month_demand,
            confidence_level,
            timestamp: Utc::now(),
        })
    }
}

impl InventoryData {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: &str,
        item_name: &str,
        current_stock: u64,
        max_stock: u64,
        min_stock: u64,
        reorder_point: u64,
        lead_time: u64,
        stock_level: i64,
        status: &str,
    ) -> LedgerResult<Self> {
        require(id, "id")?;
        Ok(Self {
            id: id.to_string(),
            item_name: item_name.to_string(),
            current_stock,
            max_stock,
            min_stock,
            reorder_point,
            lead_time,
            stock_level,
            status: status.to_string(),
            timestamp: Utc::now(),
        })
    }
}

impl RiskAssessment {
    pub fn new(
        id: &str,
        supply_risk: f64,
        demand_risk: f64,
        quality_risk: f64,
        financial_risk: f64,
    ) -> LedgerResult<Self> {
        require(id, "id")?;
        let overall_risk = risk::overall_risk(supply_risk, demand_risk, quality_risk, financial_risk);
        Ok(Self {
            id: id.to_string(),
            supply_risk,
            demand_risk,
            quality_risk,
            financial_risk,
            overall_risk,
            risk_category: risk::categorize(overall_risk),
            timestamp: Utc::now(),
        })
    }
}

/// The tagged union of all storable record shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Record {
    Event(SupplyChainEvent),
    Forecast(DemandForecast),
    Inventory(InventoryData),
    Risk(RiskAssessment),
}

impl Record {
    pub fn id(&self) -> &str {
        match self {
            Record::Event(r) => &r.id,
            Record::Forecast(r) => &r.id,
            Record::Inventory(r) => &r.id,
            Record::Risk(r) => &r.id,
        }
    }
}

/// The at-rest wrapper around a record: schema version plus the tagged
/// record fields, flattened into one JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub schema_version: u32,
    #[serde(flatten)]
    pub record: Record,
}

impl Envelope {
    pub fn new(record: Record) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            record,
        }
    }

    pub fn to_bytes(&self) -> LedgerResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn from_slice(bytes: &[u8]) -> LedgerResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

fn require(value: &str, field: &str) -> LedgerResult<()> {
    if value.is_empty() {
        return Err(LedgerError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}
