//! scmledger-core — supply-chain provenance ledger.
//!
//! Records supply-chain domain data (events, demand forecasts, inventory
//! snapshots, risk assessments) as versioned, tamper-evident records in an
//! ordered key/value store, and derives risk classification metrics from
//! submitted measurements.
//!
//! RULES:
//!   - Only the store module talks to the database. The ledger facade and
//!     the chain builder go through the `KvStore` gateway, never raw SQL.
//!   - Every record is written exactly once per call; a failed write leaves
//!     no partially visible state.
//!   - Chain heads advance only via compare-and-swap, so concurrent writers
//!     cannot fork a subject's chain undetected.

pub mod chain;
pub mod error;
pub mod ledger;
pub mod record;
pub mod risk;
pub mod store;
pub mod types;
