// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use dailytrack::commands::{reports, transactions};
use dailytrack::db::Database;
use dailytrack::models::{Category, TransactionType};
use dailytrack::store::TransactionStore;
use dailytrack::tracker::Tracker;
use dailytrack::cli;

fn setup() -> Tracker {
    let mut t = Tracker::new(TransactionStore::new(Database::in_memory()));
    t.initialize().unwrap();
    t
}

fn run(tracker: &mut Tracker, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["dailytrack"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let (name, sub) = matches.subcommand().expect("subcommand");
    transactions::handle(tracker, name, sub)
}

fn list(tracker: &mut Tracker, args: &[&str]) -> Vec<transactions::TransactionRow> {
    let mut argv = vec!["dailytrack", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("list", sub)) = matches.subcommand() else {
        panic!("no list subcommand");
    };
    transactions::query_rows(tracker, sub).unwrap()
}

#[test]
fn add_joins_words_and_defaults_to_misc_expense() {
    let mut t = setup();
    run(&mut t, &["add", "25.50", "-", "team", "lunch"]).unwrap();
    let rows = list(&mut t, &[]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].description, "team lunch");
    assert_eq!(rows[0].amount, "-25.50");
    assert_eq!(rows[0].category, "misc");
    assert_eq!(rows[0].r#type, "expense");
}

#[test]
fn add_income_with_category() {
    let mut t = setup();
    run(&mut t, &["add", "--income", "-c", "freelance", "300 logo design"]).unwrap();
    let today = t.today_transactions();
    assert_eq!(today.len(), 1);
    assert_eq!(today[0].r#type, TransactionType::Income);
    assert_eq!(today[0].category, Category::Freelance);

    assert!(run(&mut t, &["add", "--income", "-c", "food", "5 wrong"]).is_err());
    assert!(run(&mut t, &["add", "-c", "nonsense", "5 x"]).is_err());
}

#[test]
fn add_with_past_date_lists_by_date_and_month() {
    let mut t = setup();
    run(&mut t, &["add", "--date", "2024-03-09", "-c", "bills", "80 internet"]).unwrap();
    assert!(t.today_transactions().is_empty());
    assert_eq!(list(&mut t, &["--date", "2024-03-09"]).len(), 1);
    assert_eq!(list(&mut t, &["--month", "2024-03"]).len(), 1);
    assert!(list(&mut t, &["--month", "2024-04"]).is_empty());
}

#[test]
fn edit_and_remove() {
    let mut t = setup();
    run(&mut t, &["add", "10 bus"]).unwrap();
    let id = t.today_transactions()[0].id.unwrap().to_string();

    run(&mut t, &["edit", &id, "--amount", "12", "--type", "income"]).unwrap();
    let row = &t.today_transactions()[0];
    assert_eq!(row.r#type, TransactionType::Income);
    assert_eq!(row.category, Category::Other);

    run(&mut t, &["rm", &id]).unwrap();
    assert!(list(&mut t, &[]).is_empty());
    assert!(run(&mut t, &["rm", &id]).is_err());
}

#[test]
fn reset_needs_confirmation_and_summary_reflects_it() {
    let mut t = setup();
    run(&mut t, &["add", "--income", "100 pocket money"]).unwrap();
    run(&mut t, &["add", "40 snacks"]).unwrap();

    let s = reports::summary(&mut t).unwrap();
    assert_eq!(s.today.len(), 2);
    assert_eq!(s.daily_net, "60.00");
    assert_eq!(s.balance, "60.00");

    assert!(run(&mut t, &["reset"]).is_err());
    run(&mut t, &["reset", "--yes"]).unwrap();
    let s = reports::summary(&mut t).unwrap();
    assert!(s.today.is_empty());
    assert_eq!(s.monthly_expense, "0.00");
}
