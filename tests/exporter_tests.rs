// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Local, NaiveDate};
use dailytrack::db::Database;
use dailytrack::export::{csv_row, export_month, export_range, monthly_file_name, range_file_name, write_csv};
use dailytrack::models::{Category, Transaction, TransactionType};
use dailytrack::store::TransactionStore;
use dailytrack::utils::local_datetime;
use dailytrack::{cli, commands::exporter};
use rust_decimal::Decimal;
use tempfile::tempdir;

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Local> {
    let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
    local_datetime(date.and_hms_opt(h, 30, 0).unwrap()).unwrap()
}

fn expense(amount: &str, desc: &str, ts: DateTime<Local>) -> Transaction {
    Transaction::new(amount.parse::<Decimal>().unwrap(), desc, TransactionType::Expense, Category::Food).at(ts)
}

fn seeded_store() -> TransactionStore {
    let mut s = TransactionStore::new(Database::in_memory());
    s.migrate().unwrap();
    s.insert(&expense("120.7", "Groceries", at(2024, 1, 5, 10))).unwrap();
    s.insert(&expense("9.99", "Tea", at(2024, 1, 20, 8))).unwrap();
    s.insert(
        &Transaction::new(Decimal::new(500, 0), "Salary", TransactionType::Income, Category::Salary)
            .at(at(2024, 1, 6, 9)),
    )
    .unwrap();
    s.insert(&expense("40", "Rent share", at(2024, 2, 1, 9))).unwrap();
    s
}

#[test]
fn row_uses_short_date_and_truncated_amount() {
    let t = expense("120.7", "Groceries", at(2024, 1, 5, 10));
    assert_eq!(csv_row(&t), ["5-1-24".to_string(), "Groceries".into(), "120".into()]);

    let t = expense("0.99", "Gum", at(2009, 11, 30, 10));
    assert_eq!(csv_row(&t), ["30-11-09".to_string(), "Gum".into(), "0".into()]);
}

#[test]
fn csv_has_header_and_expenses_only() {
    let txs = vec![
        expense("9.99", "Tea, milk", at(2024, 1, 20, 8)),
        Transaction::new(Decimal::new(5, 0), "Gift", TransactionType::Income, Category::Gift)
            .at(at(2024, 1, 10, 8)),
        expense("120.7", "Groceries", at(2024, 1, 5, 10)),
    ];
    let mut buf = Vec::new();
    let n = write_csv(&mut buf, &txs).unwrap();
    assert_eq!(n, 2);
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "Date,Description,Amount\n5-1-24,Groceries,120\n20-1-24,\"Tea, milk\",9\n"
    );
}

#[test]
fn file_names() {
    assert_eq!(monthly_file_name(2024, 1), "DailyTrack_January_2024.csv");
    assert_eq!(monthly_file_name(2025, 12), "DailyTrack_December_2025.csv");
    let d1 = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
    let d2 = NaiveDate::from_ymd_opt(2024, 4, 12).unwrap();
    assert_eq!(range_file_name(d1, d1), "DailyTrack_7-3-24.csv");
    assert_eq!(range_file_name(d1, d2), "DailyTrack_7-3-24_to_12-4-24.csv");
}

#[test]
fn month_export_writes_named_file() {
    let mut s = seeded_store();
    let dir = tempdir().unwrap();
    let (path, n) = export_month(&mut s, 2024, 1, dir.path()).unwrap();
    assert_eq!(n, 2);
    assert_eq!(path, dir.path().join("DailyTrack_January_2024.csv"));
    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "Date,Description,Amount\n5-1-24,Groceries,120\n20-1-24,Tea,9\n");
}

#[test]
fn range_export_honours_end_date() {
    let mut s = seeded_store();
    let dir = tempdir().unwrap();
    let start = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
    let (path, n) = export_range(&mut s, start, end, dir.path()).unwrap();
    assert_eq!(n, 2);
    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "Date,Description,Amount\n20-1-24,Tea,9\n1-2-24,Rent share,40\n");

    assert!(export_range(&mut s, end, start, dir.path()).is_err());
}

#[test]
fn export_command_from_cli() {
    let mut s = seeded_store();
    let dir = tempdir().unwrap();
    let dir_str = dir.path().to_string_lossy().to_string();
    let matches = cli::build_cli().get_matches_from([
        "dailytrack",
        "export",
        "month",
        "--month",
        "2024-02",
        "--dir",
        &dir_str,
    ]);
    let Some(("export", export_m)) = matches.subcommand() else {
        panic!("no export subcommand");
    };
    let path = exporter::handle(&mut s, export_m).unwrap().unwrap();
    assert_eq!(path, dir.path().join("DailyTrack_February_2024.csv"));
    assert!(path.exists());
}
