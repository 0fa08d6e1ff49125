//! SQLite-backed keyspace.
//!
//! One table holds the ordered record keyspace (TEXT key, BLOB value); the
//! per-subject chain heads live in their own table so a range scan over
//! records can never yield an index entry.

use super::{KvStore, RangeVisitor};
use crate::error::LedgerResult;
use rusqlite::{params, Connection, OptionalExtension};

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the ledger database at `path`.
    pub fn open(path: &str) -> LedgerResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode: better concurrent read performance (no-op for :memory:).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> LedgerResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Apply all schema migrations in order.
    fn migrate(&self) -> LedgerResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_foundation.sql"))?;
        Ok(())
    }
}

impl KvStore for SqliteStore {
    fn put(&mut self, key: &str, value: &[u8]) -> LedgerResult<()> {
        self.conn.execute(
            "INSERT INTO record (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn get(&self, key: &str) -> LedgerResult<Option<Vec<u8>>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM record WHERE key = ?1",
                params![key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn for_each_in_range(
        &self,
        start: &str,
        end: &str,
        visit: &mut RangeVisitor<'_>,
    ) -> LedgerResult<()> {
        let mut stmt = self.conn.prepare(
            "SELECT key, value FROM record
             WHERE key >= ?1 AND key < ?2
             ORDER BY key ASC",
        )?;
        let mut rows = stmt.query(params![start, end])?;
        // Statement and row cursor drop on every exit path, normal or not.
        while let Some(row) = rows.next()? {
            let key: String = row.get(0)?;
            let value: Vec<u8> = row.get(1)?;
            if !visit(&key, &value)? {
                break;
            }
        }
        Ok(())
    }

    fn head(&self, subject: &str) -> LedgerResult<Option<String>> {
        let head = self
            .conn
            .query_row(
                "SELECT head FROM chain_head WHERE subject = ?1",
                params![subject],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(head)
    }

    fn put_linked(
        &mut self,
        key: &str,
        value: &[u8],
        subject: &str,
        expected: Option<&str>,
        new_head: &str,
    ) -> LedgerResult<bool> {
        let tx = self.conn.transaction()?;
        let swapped = match expected {
            // First event for this subject: only wins if no head exists yet.
            None => tx.execute(
                "INSERT INTO chain_head (subject, head) VALUES (?1, ?2)
                 ON CONFLICT(subject) DO NOTHING",
                params![subject, new_head],
            )?,
            Some(expected) => tx.execute(
                "UPDATE chain_head SET head = ?2
                 WHERE subject = ?1 AND head = ?3",
                params![subject, new_head, expected],
            )?,
        } == 1;
        if !swapped {
            // Transaction rolls back on drop; nothing was written.
            return Ok(false);
        }
        tx.execute(
            "INSERT INTO record (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        tx.commit()?;
        Ok(true)
    }
}
