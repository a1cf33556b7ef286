// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Schema evolution from the legacy `expenses` table to `transactions`.
//!
//! Safe to run on every start: the presence of the legacy table is the
//! only signal that work remains.

use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::models::{Category, TransactionType};

pub const TRANSACTIONS_TABLE: &str = "transactions";
pub const LEGACY_TABLE: &str = "expenses";
pub const SCHEMA_VERSION: i64 = 2;

const CREATE_TRANSACTIONS: &str = r#"
    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        amount REAL NOT NULL,
        description TEXT NOT NULL,
        timestamp INTEGER NOT NULL,
        type INTEGER NOT NULL,
        category INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_timestamp ON transactions(timestamp);
    CREATE INDEX IF NOT EXISTS idx_transactions_type ON transactions(type);
"#;

/// What a migration run did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    pub created_schema: bool,
    pub migrated_rows: usize,
    /// The legacy table is still present because copying it failed.
    pub legacy_retained: bool,
}

pub fn table_exists(conn: &Connection, name: &str) -> Result<bool, StoreError> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1 LIMIT 1",
            params![name],
            |r| r.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

pub fn index_exists(conn: &Connection, name: &str) -> Result<bool, StoreError> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='index' AND name=?1 LIMIT 1",
            params![name],
            |r| r.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

pub fn schema_version(conn: &Connection) -> Result<i64, StoreError> {
    Ok(conn.query_row("PRAGMA user_version", [], |r| r.get(0))?)
}

fn ensure_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(CREATE_TRANSACTIONS)?;
    Ok(())
}

pub fn migrate(conn: &mut Connection) -> Result<MigrationReport, StoreError> {
    let mut report = MigrationReport::default();

    // A failed catalog lookup is treated as "absent"; the DDL is idempotent.
    let has_target = table_exists(conn, TRANSACTIONS_TABLE).unwrap_or_else(|e| {
        warn!(error = %e, "catalog lookup for transactions failed");
        false
    });
    if !has_target {
        info!("creating transactions schema");
        ensure_schema(conn)?;
        report.created_schema = true;
    }

    let has_legacy = table_exists(conn, LEGACY_TABLE).unwrap_or_else(|e| {
        warn!(error = %e, "catalog lookup for legacy table failed");
        false
    });
    if has_legacy {
        match copy_legacy_rows(conn) {
            Ok(n) => {
                info!(rows = n, "migrated legacy expenses");
                report.migrated_rows = n;
            }
            Err(e) => {
                warn!(error = %e, "legacy migration failed, keeping expenses table");
                report.legacy_retained = true;
                ensure_schema(conn)?;
            }
        }
    } else {
        debug!("no legacy table present");
    }

    if !report.legacy_retained {
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    }
    Ok(report)
}

/// Copy every legacy row as `expense`/`misc` and drop the legacy objects,
/// all in one transaction.
fn copy_legacy_rows(conn: &mut Connection) -> Result<usize, StoreError> {
    let tx = conn.transaction()?;
    let copied = tx.execute(
        "INSERT INTO transactions(amount, description, timestamp, type, category)
         SELECT amount, description, timestamp, ?1, ?2 FROM expenses ORDER BY id",
        params![
            TransactionType::Expense.ordinal(),
            Category::Misc.ordinal()
        ],
    )?;
    tx.execute_batch(
        "DROP INDEX IF EXISTS idx_expenses_timestamp;
         DROP TABLE expenses;",
    )?;
    tx.commit()?;
    Ok(copied)
}
