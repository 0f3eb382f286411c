//! SQLite-backed store.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, info};

use crm_model::CleanRecord;

use crate::error::{Result, StoreError};
use crate::{CustomerStore, UpsertSummary};

pub const CUSTOMER_TABLE: &str = "clientes";

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS clientes (
    hash           INTEGER PRIMARY KEY,
    nome           TEXT NOT NULL,
    sobrenome      TEXT NOT NULL,
    contato        TEXT NOT NULL,
    uf             TEXT NOT NULL,
    status         TEXT NOT NULL,
    data_cadastro  TEXT NOT NULL,
    origem         TEXT NOT NULL
);
"#;

const INSERT_IGNORE: &str = "INSERT INTO clientes
    (hash, nome, sobrenome, contato, uf, status, data_cadastro, origem)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
    ON CONFLICT(hash) DO NOTHING";

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path` and ensures the schema.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }
}

impl CustomerStore for SqliteStore {
    fn insert_new(&mut self, records: &[CleanRecord]) -> Result<UpsertSummary> {
        let mut summary = UpsertSummary::default();
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(INSERT_IGNORE)?;
            for record in records {
                let Some(hash) = record.identity.as_i64() else {
                    summary.skipped_missing_identity += 1;
                    continue;
                };
                let changed = stmt.execute(params![
                    hash,
                    record.name.given_name(),
                    record.name.family_name(),
                    record.phone.as_str(),
                    record.region,
                    record.status.as_str(),
                    record.registration_date.render(),
                    record.origin,
                ])?;
                if changed == 0 {
                    summary.already_present += 1;
                } else {
                    summary.inserted += 1;
                }
            }
        }
        tx.commit()?;
        if summary.skipped_missing_identity > 0 {
            debug!(
                skipped = summary.skipped_missing_identity,
                "records without identity were not loaded"
            );
        }
        info!(
            table = CUSTOMER_TABLE,
            inserted = summary.inserted,
            already_present = summary.already_present,
            "customers loaded"
        );
        Ok(summary)
    }

    fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM clientes", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    fn contains(&self, identity: i64) -> Result<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM clientes WHERE hash = ?1",
                params![identity],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_creation_is_repeatable() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.conn.execute_batch(SCHEMA).unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }
}
