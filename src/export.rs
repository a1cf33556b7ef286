// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::models::{Transaction, TransactionType};
use crate::store::TransactionStore;
use crate::utils::{end_of_day, month_name, short_date, start_of_day};

pub const HEADER: [&str; 3] = ["Date", "Description", "Amount"];

/// One CSV record: `D-M-YY`, description, amount truncated toward zero.
pub fn csv_row(t: &Transaction) -> [String; 3] {
    [
        short_date(t.timestamp.date_naive()),
        t.description.clone(),
        t.amount.trunc().normalize().to_string(),
    ]
}

/// Write expense rows, oldest first, under the fixed header.
pub fn write_csv<W: Write>(out: W, transactions: &[Transaction]) -> Result<usize> {
    let mut expenses: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.r#type == TransactionType::Expense)
        .collect();
    expenses.sort_by_key(|t| (t.timestamp, t.id));

    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(HEADER)?;
    for t in &expenses {
        wtr.write_record(csv_row(t))?;
    }
    wtr.flush()?;
    Ok(expenses.len())
}

pub fn monthly_file_name(year: i32, month: u32) -> String {
    format!("DailyTrack_{}_{}.csv", month_name(month), year)
}

pub fn range_file_name(start: NaiveDate, end: NaiveDate) -> String {
    if start == end {
        format!("DailyTrack_{}.csv", short_date(start))
    } else {
        format!("DailyTrack_{}_to_{}.csv", short_date(start), short_date(end))
    }
}

fn write_file(path: &Path, transactions: &[Transaction]) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Create export file {}", path.display()))?;
    let n = write_csv(file, transactions)?;
    info!(path = %path.display(), rows = n, "exported expenses");
    Ok(n)
}

pub fn export_month(
    store: &mut TransactionStore,
    year: i32,
    month: u32,
    dir: &Path,
) -> Result<(PathBuf, usize)> {
    let txs = store.get_for_month(year, month)?;
    let path = dir.join(monthly_file_name(year, month));
    let n = write_file(&path, &txs)?;
    Ok((path, n))
}

/// Export every expense between `start` and `end`, both days inclusive.
pub fn export_range(
    store: &mut TransactionStore,
    start: NaiveDate,
    end: NaiveDate,
    dir: &Path,
) -> Result<(PathBuf, usize)> {
    if end < start {
        return Err(anyhow!("Export range ends ({}) before it starts ({})", end, start));
    }
    let txs = store.get_by_date_range(start_of_day(start)?, end_of_day(end)?)?;
    let path = dir.join(range_file_name(start, end));
    let n = write_file(&path, &txs)?;
    Ok((path, n))
}
