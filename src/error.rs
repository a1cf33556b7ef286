// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Rejection of user-entered text, either structural or semantic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Enter an amount followed by a description, e.g. '25.50 lunch'")]
    NoMatch,
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,
    #[error("Description cannot be empty")]
    EmptyDescription,
    #[error("Description is too long ({len} characters, max 100)")]
    DescriptionTooLong { len: usize },
    #[error("Amount {amount} is too large (max 999999)")]
    AmountTooLarge { amount: Decimal },
    #[error("Category '{category}' cannot be used for {kind} transactions")]
    CategoryMismatch {
        category: &'static str,
        kind: &'static str,
    },
}

/// Any persistence failure. The storage engine's own error type never
/// crosses this boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("transaction {0} not found")]
    NotFound(i64),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Storage(e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Validation(#[from] ParseError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
