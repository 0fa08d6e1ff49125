//! Hash-chain builder — content hashing and per-subject linkage.
//!
//! Each supply-chain event carries a SHA-256 digest of its own canonical
//! byte representation (excluding the `hash` field itself) and the digest of
//! the chronologically preceding event for the same subject. The store owns
//! the last-hash-per-subject index; linking reads the current head and the
//! subsequent write advances it via compare-and-swap, so two writers racing
//! on one subject cannot both claim the same predecessor.

use crate::{
    error::{LedgerError, LedgerResult},
    record::SupplyChainEvent,
    store::KvStore,
};
use sha2::{Digest, Sha256};

/// Deterministic content hash over every event field except `hash`.
/// Fields are delimited with a zero byte so adjacent values cannot
/// be confused across field boundaries.
pub fn content_hash(event: &SupplyChainEvent) -> String {
    let timestamp = event.timestamp.to_rfc3339();
    let mut hasher = Sha256::new();
    for field in [
        event.id.as_str(),
        event.subject.as_str(),
        event.event_type.as_str(),
        event.data.as_str(),
        event.owner.as_str(),
        timestamp.as_str(),
        event.previous_hash.as_str(),
    ] {
        hasher.update(field.as_bytes());
        hasher.update([0u8]);
    }
    hex::encode(hasher.finalize())
}

/// Stamp `previous_hash` and `hash` on a freshly constructed event by
/// resolving the subject's current chain head against the store.
///
/// Returns the head that was observed — the caller must pass it as the
/// compare-and-swap expectation when persisting, so a concurrent head
/// advance between this lookup and the write is detected, not absorbed.
///
/// A store failure here aborts the write: the builder never guesses a
/// predecessor.
pub fn link<S: KvStore>(
    store: &S,
    event: &mut SupplyChainEvent,
) -> LedgerResult<Option<String>> {
    let head = store
        .head(&event.subject)
        .map_err(|e| LedgerError::ChainLookup {
            subject: event.subject.clone(),
            reason: e.to_string(),
        })?;
    event.previous_hash = head.clone().unwrap_or_default();
    event.hash = content_hash(event);
    Ok(head)
}

/// Verify a subject's events in chain order: every stored hash must match
/// its recomputed value, the first event must have an empty `previous_hash`,
/// and each later event must link to its predecessor's hash.
pub fn verify(events: &[SupplyChainEvent]) -> LedgerResult<()> {
    let mut prev_hash = "";
    for event in events {
        let recomputed = content_hash(event);
        if event.hash != recomputed {
            return Err(LedgerError::ChainBroken {
                id: event.id.clone(),
                reason: "content hash does not match record fields".into(),
            });
        }
        if event.previous_hash != prev_hash {
            return Err(LedgerError::ChainBroken {
                id: event.id.clone(),
                reason: format!(
                    "previousHash '{}' does not match predecessor hash '{}'",
                    event.previous_hash, prev_hash
                ),
            });
        }
        prev_hash = &event.hash;
    }
    Ok(())
}
