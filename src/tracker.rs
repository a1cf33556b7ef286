// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! View state for the entry screen: today's transactions plus daily and
//! monthly totals, recomputed from the store after every mutation.

use chrono::{DateTime, Datelike, Local};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{error, info};

use crate::error::{ParseError, TrackerError};
use crate::migration::MigrationReport;
use crate::models::{Category, Transaction, TransactionType};
use crate::parser;
use crate::store::TransactionStore;
use crate::utils::today;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Totals {
    pub daily_income: Decimal,
    pub daily_expense: Decimal,
    pub monthly_income: Decimal,
    pub monthly_expense: Decimal,
}

impl Totals {
    pub fn daily_net(&self) -> Decimal {
        self.daily_income - self.daily_expense
    }

    pub fn monthly_net(&self) -> Decimal {
        self.monthly_income - self.monthly_expense
    }
}

#[derive(Debug)]
pub struct Tracker {
    store: TransactionStore,
    today: Vec<Transaction>,
    totals: Totals,
    loading: bool,
    last_error: Option<String>,
}

fn check_category(kind: TransactionType, category: Category) -> Result<(), ParseError> {
    if category.kind() != kind {
        return Err(ParseError::CategoryMismatch {
            category: category.name(),
            kind: kind.name(),
        });
    }
    Ok(())
}

impl Tracker {
    pub fn new(store: TransactionStore) -> Self {
        Self {
            store,
            today: Vec::new(),
            totals: Totals::default(),
            loading: false,
            last_error: None,
        }
    }

    pub fn store(&mut self) -> &mut TransactionStore {
        &mut self.store
    }

    pub fn today_transactions(&self) -> &[Transaction] {
        &self.today
    }

    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    pub fn daily_net(&self) -> Decimal {
        self.totals.daily_net()
    }

    pub fn monthly_net(&self) -> Decimal {
        self.totals.monthly_net()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Clear the last error, mark loading, run `op`, record any failure.
    fn run<T>(
        &mut self,
        what: &str,
        op: impl FnOnce(&mut Self) -> Result<T, TrackerError>,
    ) -> Result<T, TrackerError> {
        self.last_error = None;
        self.loading = true;
        let res = op(self);
        self.loading = false;
        if let Err(e) = &res {
            error!(operation = what, error = %e, "tracker operation failed");
            self.last_error = Some(e.to_string());
        }
        res
    }

    /// Migrate the schema, then load today's view.
    pub fn initialize(&mut self) -> Result<MigrationReport, TrackerError> {
        self.run("initialize", |t| {
            let report = t.store.migrate()?;
            info!(?report, "schema ready");
            t.load_today()?;
            t.recompute()?;
            Ok(report)
        })
    }

    pub fn refresh(&mut self) -> Result<(), TrackerError> {
        self.run("refresh", |t| {
            t.load_today()?;
            t.recompute()
        })
    }

    fn load_today(&mut self) -> Result<(), TrackerError> {
        self.today = self.store.get_for_date(today())?;
        Ok(())
    }

    fn recompute(&mut self) -> Result<(), TrackerError> {
        let now = Local::now();
        let d = now.date_naive();
        self.totals = Totals {
            daily_income: self.store.sum_income_for_date(d)?,
            daily_expense: self.store.sum_expense_for_date(d)?,
            monthly_income: self.store.sum_income_for_month(now.year(), now.month())?,
            monthly_expense: self.store.sum_expense_for_month(now.year(), now.month())?,
        };
        Ok(())
    }

    /// Validate, store and mirror a new transaction. Nothing is written
    /// when validation fails.
    pub fn add_transaction(
        &mut self,
        amount: Decimal,
        description: &str,
        kind: TransactionType,
        category: Category,
        timestamp: Option<DateTime<Local>>,
    ) -> Result<Transaction, TrackerError> {
        self.run("add", |t| {
            t.insert_checked(amount, description, kind, category, timestamp)
        })
    }

    /// Parse a free-text line such as `"12.50 - lunch"` and record it.
    pub fn add_from_text(
        &mut self,
        input: &str,
        kind: TransactionType,
        category: Category,
        timestamp: Option<DateTime<Local>>,
    ) -> Result<Transaction, TrackerError> {
        self.run("add", |t| {
            let entry = parser::parse_and_validate(input)?;
            t.insert_checked(entry.amount, &entry.description, kind, category, timestamp)
        })
    }

    fn insert_checked(
        &mut self,
        amount: Decimal,
        description: &str,
        kind: TransactionType,
        category: Category,
        timestamp: Option<DateTime<Local>>,
    ) -> Result<Transaction, TrackerError> {
        parser::validate_fields(amount, description)?;
        check_category(kind, category)?;
        let mut tx = Transaction::new(amount, description.trim(), kind, category);
        if let Some(ts) = timestamp {
            tx = tx.at(ts);
        }
        let id = self.store.insert(&tx)?;
        tx.id = Some(id);
        if tx.timestamp.date_naive() == today() {
            self.today.insert(0, tx.clone());
        }
        self.recompute()?;
        Ok(tx)
    }

    pub fn update_transaction(&mut self, tx: Transaction) -> Result<(), TrackerError> {
        self.run("update", |t| {
            parser::validate_fields(tx.amount, &tx.description)?;
            check_category(tx.r#type, tx.category)?;
            t.store.update(&tx)?;
            t.load_today()?;
            t.recompute()
        })
    }

    pub fn delete_transaction(&mut self, id: i64) -> Result<(), TrackerError> {
        self.run("delete", |t| {
            t.store.delete_by_id(id)?;
            t.today.retain(|tx| tx.id != Some(id));
            t.recompute()
        })
    }

    /// Remove every stored transaction.
    pub fn clear_all(&mut self) -> Result<usize, TrackerError> {
        self.run("clear", |t| {
            let n = t.store.delete_all()?;
            t.today.clear();
            t.recompute()?;
            Ok(n)
        })
    }
}
