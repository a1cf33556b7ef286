// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::transactions::TransactionRow;
use crate::tracker::Tracker;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Summary {
    pub today: Vec<TransactionRow>,
    pub daily_income: String,
    pub daily_expense: String,
    pub daily_net: String,
    pub monthly_income: String,
    pub monthly_expense: String,
    pub monthly_net: String,
    pub balance: String,
}

pub fn summary(tracker: &mut Tracker) -> Result<Summary> {
    tracker.refresh()?;
    let balance = tracker.store().current_balance()?;
    let totals = tracker.totals();
    Ok(Summary {
        today: tracker
            .today_transactions()
            .iter()
            .map(TransactionRow::from)
            .collect(),
        daily_income: fmt_money(&totals.daily_income),
        daily_expense: fmt_money(&totals.daily_expense),
        daily_net: fmt_money(&totals.daily_net()),
        monthly_income: fmt_money(&totals.monthly_income),
        monthly_expense: fmt_money(&totals.monthly_expense),
        monthly_net: fmt_money(&totals.monthly_net()),
        balance: fmt_money(&balance),
    })
}

pub fn handle(tracker: &mut Tracker, sub: &clap::ArgMatches) -> Result<()> {
    let s = summary(tracker)?;
    if maybe_print_json(sub.get_flag("json"), &s)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = s
        .today
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.category.clone(),
                r.description.clone(),
                r.amount.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Category", "Description", "Amount"], rows)
    );
    println!(
        "{}",
        pretty_table(
            &["Period", "Income", "Expense", "Net"],
            vec![
                vec![
                    "Today".into(),
                    s.daily_income.clone(),
                    s.daily_expense.clone(),
                    s.daily_net.clone(),
                ],
                vec![
                    "This month".into(),
                    s.monthly_income.clone(),
                    s.monthly_expense.clone(),
                    s.monthly_net.clone(),
                ],
            ],
        )
    );
    println!("Balance: {}", s.balance);
    Ok(())
}
