// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rust_decimal::Decimal;

use crate::error::StoreError;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// `YYYY-MM` into (year, month).
pub fn parse_month(s: &str) -> Result<(i32, u32)> {
    let d = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok((d.year(), d.month()))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(json_flag: bool, v: &T) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    Ok(false)
}

/// Interpret a wall-clock time in the local zone. Ambiguous times (DST
/// fold) take the earlier instant; times in a DST gap are an error.
pub fn local_datetime(naive: NaiveDateTime) -> Result<DateTime<Local>, StoreError> {
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => Err(StoreError::InvalidArgument(format!(
            "{} does not exist in the local time zone",
            naive
        ))),
    }
}

pub fn from_millis(ms: i64) -> Result<DateTime<Local>, StoreError> {
    Local
        .timestamp_millis_opt(ms)
        .single()
        .ok_or_else(|| StoreError::Storage(format!("invalid stored timestamp {}", ms)))
}

pub fn start_of_day(d: NaiveDate) -> Result<DateTime<Local>, StoreError> {
    local_datetime(d.and_time(NaiveTime::MIN))
}

/// Last representable millisecond of the day, 23:59:59.999.
pub fn end_of_day(d: NaiveDate) -> Result<DateTime<Local>, StoreError> {
    let t = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
        .ok_or_else(|| StoreError::InvalidArgument("end of day".into()))?;
    local_datetime(d.and_time(t))
}

pub fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, StoreError> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| StoreError::InvalidArgument(format!("invalid month {}-{}", year, month)))
}

/// Last calendar day of the month: the day before the 1st of the next one.
pub fn last_of_month(year: i32, month: u32) -> Result<NaiveDate, StoreError> {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    first_of_month(year, month)?;
    NaiveDate::from_ymd_opt(ny, nm, 1)
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| StoreError::InvalidArgument(format!("invalid month {}-{}", year, month)))
}

pub fn month_bounds(year: i32, month: u32) -> Result<(DateTime<Local>, DateTime<Local>), StoreError> {
    let start = start_of_day(first_of_month(year, month)?)?;
    let end = end_of_day(last_of_month(year, month)?)?;
    Ok((start, end))
}

/// `D-M-YY`: un-padded day and month, two-digit year.
pub fn short_date(d: NaiveDate) -> String {
    format!("{}-{}-{:02}", d.day(), d.month(), d.year().rem_euclid(100))
}

pub fn month_name(month: u32) -> &'static str {
    const NAMES: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    NAMES
        .get((month as usize).wrapping_sub(1))
        .copied()
        .unwrap_or("Unknown")
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
