// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Datelike, Local, NaiveDate};
use rusqlite::{params, OptionalExtension, Row};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::debug;

use crate::db::Database;
use crate::error::StoreError;
use crate::migration::{self, MigrationReport};
use crate::models::{Category, Expense, Transaction, TransactionType};
use crate::utils::{end_of_day, from_millis, month_bounds, start_of_day};

const SELECT_COLUMNS: &str = "SELECT id, amount, description, timestamp, type, category FROM transactions";

/// Keyed CRUD and range aggregation over the `transactions` table.
#[derive(Debug)]
pub struct TransactionStore {
    db: Database,
}

fn amount_to_sql(amount: Decimal) -> Result<f64, StoreError> {
    amount
        .to_f64()
        .ok_or_else(|| StoreError::InvalidArgument(format!("amount {} out of range", amount)))
}

fn map_row(r: &Row) -> rusqlite::Result<(i64, f64, String, i64, i64, i64)> {
    Ok((
        r.get(0)?,
        r.get(1)?,
        r.get(2)?,
        r.get(3)?,
        r.get(4)?,
        r.get(5)?,
    ))
}

fn into_transaction(raw: (i64, f64, String, i64, i64, i64)) -> Result<Transaction, StoreError> {
    let (id, amount, description, ts, kind, category) = raw;
    let amount = Decimal::try_from(amount)
        .map_err(|e| StoreError::Storage(format!("invalid amount {} in row {}: {}", amount, id, e)))?;
    let r#type = TransactionType::from_ordinal(kind)
        .ok_or_else(|| StoreError::Storage(format!("unknown type {} in row {}", kind, id)))?;
    let category = Category::from_ordinal(category)
        .ok_or_else(|| StoreError::Storage(format!("unknown category {} in row {}", category, id)))?;
    Ok(Transaction {
        id: Some(id),
        amount,
        description,
        timestamp: from_millis(ts)?,
        r#type,
        category,
    })
}

fn sum_of(txs: &[Transaction], kind: TransactionType) -> Decimal {
    txs.iter()
        .filter(|t| t.r#type == kind)
        .fold(Decimal::ZERO, |acc, t| acc + t.amount)
}

impl TransactionStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn close(&mut self) -> Result<(), StoreError> {
        self.db.close()
    }

    /// Bring the schema up to date. Run before any other query.
    pub fn migrate(&mut self) -> Result<MigrationReport, StoreError> {
        migration::migrate(self.db.connection()?)
    }

    pub fn insert(&mut self, t: &Transaction) -> Result<i64, StoreError> {
        let conn = self.db.connection()?;
        conn.execute(
            "INSERT INTO transactions(amount, description, timestamp, type, category)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                amount_to_sql(t.amount)?,
                t.description,
                t.timestamp.timestamp_millis(),
                t.r#type.ordinal(),
                t.category.ordinal()
            ],
        )?;
        let id = conn.last_insert_rowid();
        debug!(id, "inserted transaction");
        Ok(id)
    }

    pub fn get_by_id(&mut self, id: i64) -> Result<Option<Transaction>, StoreError> {
        let conn = self.db.connection()?;
        let raw = conn
            .query_row(&format!("{} WHERE id=?1", SELECT_COLUMNS), params![id], map_row)
            .optional()?;
        raw.map(into_transaction).transpose()
    }

    /// Rows with `start <= timestamp <= end`, newest first.
    pub fn get_by_date_range(
        &mut self,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Result<Vec<Transaction>, StoreError> {
        let conn = self.db.connection()?;
        let mut stmt = conn.prepare(&format!(
            "{} WHERE timestamp >= ?1 AND timestamp <= ?2 ORDER BY timestamp DESC, id DESC",
            SELECT_COLUMNS
        ))?;
        let rows = stmt.query_map(
            params![start.timestamp_millis(), end.timestamp_millis()],
            map_row,
        )?;
        let mut data = Vec::new();
        for row in rows {
            data.push(into_transaction(row?)?);
        }
        Ok(data)
    }

    pub fn get_for_date(&mut self, d: NaiveDate) -> Result<Vec<Transaction>, StoreError> {
        self.get_by_date_range(start_of_day(d)?, end_of_day(d)?)
    }

    pub fn get_for_month(&mut self, year: i32, month: u32) -> Result<Vec<Transaction>, StoreError> {
        let (start, end) = month_bounds(year, month)?;
        self.get_by_date_range(start, end)
    }

    /// Replace every field of the row with `t.id`.
    pub fn update(&mut self, t: &Transaction) -> Result<(), StoreError> {
        let id = t
            .id
            .ok_or_else(|| StoreError::InvalidArgument("cannot update a transaction without id".into()))?;
        let conn = self.db.connection()?;
        let changed = conn.execute(
            "UPDATE transactions SET amount=?1, description=?2, timestamp=?3, type=?4, category=?5
             WHERE id=?6",
            params![
                amount_to_sql(t.amount)?,
                t.description,
                t.timestamp.timestamp_millis(),
                t.r#type.ordinal(),
                t.category.ordinal(),
                id
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    pub fn delete_by_id(&mut self, id: i64) -> Result<(), StoreError> {
        let conn = self.db.connection()?;
        let changed = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        debug!(id, "deleted transaction");
        Ok(())
    }

    pub fn delete_all(&mut self) -> Result<usize, StoreError> {
        let conn = self.db.connection()?;
        Ok(conn.execute("DELETE FROM transactions", [])?)
    }

    pub fn count(&mut self) -> Result<i64, StoreError> {
        let conn = self.db.connection()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))?)
    }

    pub fn sum_income_for_date(&mut self, d: NaiveDate) -> Result<Decimal, StoreError> {
        Ok(sum_of(&self.get_for_date(d)?, TransactionType::Income))
    }

    pub fn sum_expense_for_date(&mut self, d: NaiveDate) -> Result<Decimal, StoreError> {
        Ok(sum_of(&self.get_for_date(d)?, TransactionType::Expense))
    }

    pub fn sum_income_for_month(&mut self, year: i32, month: u32) -> Result<Decimal, StoreError> {
        Ok(sum_of(&self.get_for_month(year, month)?, TransactionType::Income))
    }

    pub fn sum_expense_for_month(&mut self, year: i32, month: u32) -> Result<Decimal, StoreError> {
        Ok(sum_of(&self.get_for_month(year, month)?, TransactionType::Expense))
    }

    /// Income minus expense for the given month.
    pub fn balance_for_month(&mut self, year: i32, month: u32) -> Result<Decimal, StoreError> {
        let txs = self.get_for_month(year, month)?;
        Ok(sum_of(&txs, TransactionType::Income) - sum_of(&txs, TransactionType::Expense))
    }

    /// Balance of the current system month, evaluated at call time.
    pub fn current_balance(&mut self) -> Result<Decimal, StoreError> {
        let now = Local::now();
        self.balance_for_month(now.year(), now.month())
    }

    pub fn insert_expense(&mut self, e: Expense) -> Result<i64, StoreError> {
        self.insert(&Transaction::from(e))
    }

    pub fn get_expenses_for_date(&mut self, d: NaiveDate) -> Result<Vec<Expense>, StoreError> {
        self.get_for_date(d)?
            .into_iter()
            .filter(|t| t.r#type == TransactionType::Expense)
            .map(Expense::try_from)
            .collect()
    }
}
