//! The store gateway — the contract the core consumes from the external
//! ordered key/value collaborator.
//!
//! RULE: Only this module talks to the database. The ledger facade and the
//! chain builder never execute SQL directly.
//!
//! Every call is atomic and durable once it returns Ok. The gateway performs
//! no retries; failures surface verbatim as `LedgerError::Store` and retry
//! policy belongs to the caller.

use crate::error::LedgerResult;

mod sqlite;
pub use sqlite::SqliteStore;

/// Visitor outcome for a range scan: `Ok(true)` keeps scanning,
/// `Ok(false)` stops early. The underlying cursor is released on every
/// exit path, including errors raised by the visitor.
pub type RangeVisitor<'a> = dyn FnMut(&str, &[u8]) -> LedgerResult<bool> + 'a;

pub trait KvStore {
    /// Atomic overwrite-or-create.
    fn put(&mut self, key: &str, value: &[u8]) -> LedgerResult<()>;

    /// Point lookup; `Ok(None)` for an absent key is a normal outcome.
    fn get(&self, key: &str) -> LedgerResult<Option<Vec<u8>>>;

    /// Visits values for all keys in `[start, end)` in ascending key order.
    fn for_each_in_range(
        &self,
        start: &str,
        end: &str,
        visit: &mut RangeVisitor<'_>,
    ) -> LedgerResult<()>;

    /// Current head hash of a subject's chain, if any chain exists.
    fn head(&self, subject: &str) -> LedgerResult<Option<String>>;

    /// Atomically: advance the subject's chain head from `expected` to
    /// `new_head` and store the record under `key` — or do neither.
    /// Returns `Ok(false)` without writing anything when the stored head no
    /// longer equals `expected` (a concurrent writer got there first).
    fn put_linked(
        &mut self,
        key: &str,
        value: &[u8],
        subject: &str,
        expected: Option<&str>,
        new_head: &str,
    ) -> LedgerResult<bool>;
}
