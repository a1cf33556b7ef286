// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Duration, Local};
use dailytrack::db::Database;
use dailytrack::error::{ParseError, StoreError, TrackerError};
use dailytrack::models::{Category, TransactionType};
use dailytrack::store::TransactionStore;
use dailytrack::tracker::Tracker;
use rust_decimal::Decimal;
use tempfile::tempdir;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn tracker() -> Tracker {
    let mut t = Tracker::new(TransactionStore::new(Database::in_memory()));
    t.initialize().unwrap();
    t
}

#[test]
fn initialize_migrates_legacy_database() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("legacy.sqlite");
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE expenses(id INTEGER PRIMARY KEY, amount REAL, description TEXT, timestamp INTEGER);",
        )
        .unwrap();
        conn.execute(
            "INSERT INTO expenses(amount, description, timestamp) VALUES (12.0, 'old lunch', ?1)",
            [Local::now().timestamp_millis()],
        )
        .unwrap();
    }
    let mut t = Tracker::new(TransactionStore::new(Database::at(&path)));
    let report = t.initialize().unwrap();
    assert_eq!(report.migrated_rows, 1);
    assert_eq!(t.today_transactions().len(), 1);
    assert_eq!(t.today_transactions()[0].category, Category::Misc);
    assert_eq!(t.totals().daily_expense, dec("12"));
    assert!(!t.is_loading());
}

#[test]
fn add_updates_today_and_totals() {
    let mut t = tracker();
    let salary = t
        .add_transaction(dec("1000"), "salary", TransactionType::Income, Category::Salary, None)
        .unwrap();
    let lunch = t
        .add_from_text("25.50 - lunch", TransactionType::Expense, Category::Food, None)
        .unwrap();
    assert!(salary.id.is_some());
    assert_eq!(lunch.description, "lunch");

    let ids: Vec<_> = t.today_transactions().iter().map(|x| x.id).collect();
    assert_eq!(ids, vec![lunch.id, salary.id]);

    let totals = t.totals();
    assert_eq!(totals.daily_income, dec("1000"));
    assert_eq!(totals.daily_expense, dec("25.5"));
    assert_eq!(totals.monthly_income, dec("1000"));
    assert_eq!(totals.monthly_expense, dec("25.5"));
    assert_eq!(t.daily_net(), dec("974.5"));
    assert_eq!(t.monthly_net(), dec("974.5"));
    assert!(t.last_error().is_none());
}

#[test]
fn rejected_input_writes_nothing() {
    let mut t = tracker();
    let err = t
        .add_transaction(Decimal::ZERO, "free", TransactionType::Expense, Category::Misc, None)
        .unwrap_err();
    assert_eq!(err, TrackerError::Validation(ParseError::NonPositiveAmount));
    assert!(t.last_error().is_some());

    let long = "d".repeat(101);
    assert!(t
        .add_transaction(dec("1"), &long, TransactionType::Expense, Category::Misc, None)
        .is_err());
    assert!(t
        .add_transaction(dec("1"), "wrong bucket", TransactionType::Income, Category::Food, None)
        .is_err());
    assert!(t
        .add_from_text("lunch", TransactionType::Expense, Category::Food, None)
        .is_err());
    assert_eq!(
        t.last_error(),
        Some(ParseError::NoMatch.to_string().as_str())
    );

    assert_eq!(t.store().count().unwrap(), 0);
    assert!(t.today_transactions().is_empty());
}

#[test]
fn successful_operation_clears_previous_error() {
    let mut t = tracker();
    assert!(t.delete_transaction(77).is_err());
    assert_eq!(
        t.last_error(),
        Some(StoreError::NotFound(77).to_string().as_str())
    );
    t.add_from_text("3 tea", TransactionType::Expense, Category::Food, None)
        .unwrap();
    assert!(t.last_error().is_none());
}

#[test]
fn past_entries_skip_today_list() {
    let mut t = tracker();
    let earlier = Local::now() - Duration::days(2);
    t.add_transaction(dec("9"), "old", TransactionType::Expense, Category::Misc, Some(earlier))
        .unwrap();
    assert!(t.today_transactions().is_empty());
    assert_eq!(t.totals().daily_expense, Decimal::ZERO);
    assert_eq!(t.store().count().unwrap(), 1);
}

#[test]
fn delete_removes_from_view() {
    let mut t = tracker();
    let a = t
        .add_from_text("10 bus", TransactionType::Expense, Category::Transport, None)
        .unwrap();
    t.add_from_text("5 gum", TransactionType::Expense, Category::Food, None)
        .unwrap();
    t.delete_transaction(a.id.unwrap()).unwrap();
    assert_eq!(t.today_transactions().len(), 1);
    assert_eq!(t.totals().daily_expense, dec("5"));
}

#[test]
fn update_and_clear() {
    let mut t = tracker();
    let mut x = t
        .add_from_text("10 bus", TransactionType::Expense, Category::Transport, None)
        .unwrap();
    x.amount = dec("14");
    t.update_transaction(x.clone()).unwrap();
    assert_eq!(t.today_transactions()[0].amount, dec("14"));
    assert_eq!(t.totals().daily_expense, dec("14"));

    assert_eq!(t.clear_all().unwrap(), 1);
    assert!(t.today_transactions().is_empty());
    assert_eq!(t.totals().monthly_expense, Decimal::ZERO);
}

#[test]
fn direct_add_has_no_upper_bound_but_text_entry_does() {
    let mut t = tracker();
    let bonus = t
        .add_transaction(
            Decimal::new(1_200_000, 0),
            "annual bonus",
            TransactionType::Income,
            Category::Salary,
            None,
        )
        .unwrap();
    assert_eq!(bonus.amount, dec("1200000"));

    let err = t
        .add_from_text("1200000 annual bonus", TransactionType::Income, Category::Salary, None)
        .unwrap_err();
    assert_eq!(
        err,
        TrackerError::Validation(ParseError::AmountTooLarge {
            amount: dec("1200000")
        })
    );
    assert!(t.last_error().is_some());
    assert!(!t.is_loading());
    assert_eq!(t.store().count().unwrap(), 1);

    let mut edited = bonus.clone();
    edited.amount = dec("1500000");
    t.update_transaction(edited).unwrap();
    assert_eq!(t.totals().daily_income, dec("1500000"));
}

#[test]
fn returned_transaction_matches_stored_row() {
    let mut t = tracker();
    let added = t
        .add_from_text("7.25 sandwich", TransactionType::Expense, Category::Food, None)
        .unwrap();
    let stored = t.store().get_by_id(added.id.unwrap()).unwrap().unwrap();
    assert_eq!(stored, added);
    assert_eq!(t.today_transactions()[0], stored);
}
