// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Free-text entry parsing.
//!
//! Two grammars are accepted, tried in order:
//!
//! 1. `<number> - <text>` (whitespace around the dash is optional)
//! 2. `<number> <text>`
//!
//! A grammar only matches when its amount is strictly positive and its
//! trimmed description is non-empty and not a lone `-`. Bounds on the
//! result (length, maximum amount) are a separate pass, see [`validate`].

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::error::ParseError;

pub const MAX_DESCRIPTION_CHARS: usize = 100;

pub static MAX_AMOUNT: Lazy<Decimal> = Lazy::new(|| Decimal::new(999_999, 0));

static DASHED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+(?:\.\d+)?)\s*-\s*(.+?)\s*$").expect("valid dashed entry pattern")
});

static SPACED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+(?:\.\d+)?)\s+(.+?)\s*$").expect("valid spaced entry pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    pub amount: Decimal,
    pub description: String,
}

/// Structural parse of a single entry line.
pub fn parse(input: &str) -> Result<ParsedEntry, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::NoMatch);
    }
    [&*DASHED, &*SPACED]
        .into_iter()
        .find_map(|re| try_grammar(re, input))
        .ok_or(ParseError::NoMatch)
}

fn try_grammar(re: &Regex, input: &str) -> Option<ParsedEntry> {
    let caps = re.captures(input)?;
    let amount = caps.get(1)?.as_str().parse::<Decimal>().ok()?;
    if amount <= Decimal::ZERO {
        return None;
    }
    let description = caps.get(2)?.as_str().trim();
    if description.is_empty() || description == "-" {
        return None;
    }
    Some(ParsedEntry {
        amount,
        description: description.to_string(),
    })
}

/// Semantic bounds applied after a successful structural parse.
/// Text entry additionally caps the amount at [`MAX_AMOUNT`].
pub fn validate(entry: &ParsedEntry) -> Result<(), ParseError> {
    validate_fields(entry.amount, &entry.description)?;
    if entry.amount > *MAX_AMOUNT {
        return Err(ParseError::AmountTooLarge {
            amount: entry.amount,
        });
    }
    Ok(())
}

/// Field rules every stored transaction must satisfy. The first violated
/// rule is reported.
pub fn validate_fields(amount: Decimal, description: &str) -> Result<(), ParseError> {
    if amount <= Decimal::ZERO {
        return Err(ParseError::NonPositiveAmount);
    }
    let description = description.trim();
    if description.is_empty() {
        return Err(ParseError::EmptyDescription);
    }
    let len = description.chars().count();
    if len > MAX_DESCRIPTION_CHARS {
        return Err(ParseError::DescriptionTooLong { len });
    }
    Ok(())
}

/// Parse then validate; what the entry box calls before anything is stored.
pub fn parse_and_validate(input: &str) -> Result<ParsedEntry, ParseError> {
    let entry = parse(input)?;
    validate(&entry)?;
    Ok(entry)
}
