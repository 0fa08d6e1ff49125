//! Shared primitive types used across the entire ledger.

/// A stable, caller-supplied identifier for a record. Used verbatim as the
/// store key; a second write under the same id replaces the first.
pub type RecordId = String;

/// The logical entity (shipment, product lot, ...) whose successive events
/// form one hash chain.
pub type SubjectId = String;
