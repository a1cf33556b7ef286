// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, Transaction, TransactionType};
use crate::tracker::Tracker;
use crate::utils::{
    fmt_money, local_datetime, maybe_print_json, parse_date, parse_decimal, parse_month,
    pretty_table, start_of_day,
};
use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

pub fn handle(tracker: &mut Tracker, name: &str, sub: &clap::ArgMatches) -> Result<()> {
    match name {
        "add" => {
            let t = add(tracker, sub)?;
            println!(
                "Recorded {} {} '{}' ({}) as #{}",
                t.r#type.name(),
                fmt_money(&t.amount),
                t.description,
                t.category.name(),
                t.id.unwrap_or_default()
            );
        }
        "list" => list(tracker, sub)?,
        "edit" => {
            let t = edit(tracker, sub)?;
            println!("Updated #{}", t.id.unwrap_or_default());
        }
        "rm" => {
            let id = *sub.get_one::<i64>("id").unwrap();
            tracker.delete_transaction(id)?;
            println!("Removed #{}", id);
        }
        "reset" => {
            if !sub.get_flag("yes") {
                return Err(anyhow!("Refusing to delete everything without --yes"));
            }
            let n = tracker.clear_all()?;
            println!("Deleted {} transactions", n);
        }
        _ => {}
    }
    Ok(())
}

fn category_arg(sub: &clap::ArgMatches, kind: TransactionType) -> Result<Category> {
    match sub.get_one::<String>("category") {
        Some(c) => Category::parse(c).with_context(|| format!("Unknown category '{}'", c)),
        None => Ok(Category::default_for(kind)),
    }
}

/// Midnight of `date` if given, else `None` meaning "now". A date of
/// today keeps the current time so the entry sorts as latest.
fn timestamp_arg(sub: &clap::ArgMatches) -> Result<Option<DateTime<Local>>> {
    let Some(raw) = sub.get_one::<String>("date") else {
        return Ok(None);
    };
    let d = parse_date(raw)?;
    if d == Local::now().date_naive() {
        return Ok(None);
    }
    Ok(Some(start_of_day(d)?))
}

pub fn add(tracker: &mut Tracker, sub: &clap::ArgMatches) -> Result<Transaction> {
    let text = sub
        .get_many::<String>("text")
        .map(|v| v.map(String::as_str).collect::<Vec<_>>().join(" "))
        .unwrap_or_default();
    let kind = if sub.get_flag("income") {
        TransactionType::Income
    } else {
        TransactionType::Expense
    };
    let category = category_arg(sub, kind)?;
    let ts = timestamp_arg(sub)?;
    Ok(tracker.add_from_text(&text, kind, category, ts)?)
}

pub fn edit(tracker: &mut Tracker, sub: &clap::ArgMatches) -> Result<Transaction> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut t = tracker
        .store()
        .get_by_id(id)?
        .with_context(|| format!("Transaction #{} not found", id))?;
    if let Some(a) = sub.get_one::<String>("amount") {
        t.amount = parse_decimal(a)?;
    }
    if let Some(d) = sub.get_one::<String>("description") {
        t.description = d.trim().to_string();
    }
    if let Some(k) = sub.get_one::<String>("type") {
        let kind = TransactionType::parse(k).with_context(|| format!("Unknown type '{}'", k))?;
        if kind != t.r#type {
            t.r#type = kind;
            t.category = Category::default_for(kind);
        }
    }
    if sub.get_one::<String>("category").is_some() {
        t.category = category_arg(sub, t.r#type)?;
    }
    if let Some(raw) = sub.get_one::<String>("date") {
        let d = parse_date(raw)?;
        t.timestamp = local_datetime(d.and_time(t.timestamp.time()))?;
    }
    tracker.update_transaction(t.clone())?;
    Ok(t)
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub r#type: String,
    pub category: String,
    pub description: String,
    pub amount: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id.unwrap_or_default(),
            date: t.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            r#type: t.r#type.name().to_string(),
            category: t.category.name().to_string(),
            description: t.description.clone(),
            amount: fmt_money(&t.signed_amount()),
        }
    }
}

pub fn query_rows(tracker: &mut Tracker, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let store = tracker.store();
    let txs = if let Some(m) = sub.get_one::<String>("month") {
        let (y, m) = parse_month(m)?;
        store.get_for_month(y, m)?
    } else {
        let d: NaiveDate = match sub.get_one::<String>("date") {
            Some(raw) => parse_date(raw)?,
            None => Local::now().date_naive(),
        };
        store.get_for_date(d)?
    };
    Ok(txs.iter().map(TransactionRow::from).collect())
}

fn list(tracker: &mut Tracker, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(tracker, sub)?;
    if !maybe_print_json(sub.get_flag("json"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.r#type.clone(),
                    r.category.clone(),
                    r.description.clone(),
                    r.amount.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Category", "Description", "Amount"],
                rows
            )
        );
    }
    Ok(())
}
