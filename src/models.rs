// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Local, SubsecRound};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Persisted ordinal. Existing rows depend on these values.
    pub fn ordinal(self) -> i64 {
        match self {
            TransactionType::Income => 0,
            TransactionType::Expense => 1,
        }
    }

    pub fn from_ordinal(v: i64) -> Option<Self> {
        match v {
            0 => Some(TransactionType::Income),
            1 => Some(TransactionType::Expense),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Some(TransactionType::Income),
            "expense" => Some(TransactionType::Expense),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Salary,
    Freelance,
    Business,
    Investment,
    Gift,
    Other,
    Food,
    Transport,
    Shopping,
    Bills,
    Entertainment,
    Health,
    Education,
    Misc,
}

/// Fixed category table: (category, persisted ordinal, name, owning type).
///
/// The ordinal column is part of the on-disk format and must never be
/// renumbered; new categories can only be appended.
pub static CATEGORY_TABLE: [(Category, i64, &str, TransactionType); 14] = [
    (Category::Salary, 0, "salary", TransactionType::Income),
    (Category::Freelance, 1, "freelance", TransactionType::Income),
    (Category::Business, 2, "business", TransactionType::Income),
    (Category::Investment, 3, "investment", TransactionType::Income),
    (Category::Gift, 4, "gift", TransactionType::Income),
    (Category::Other, 5, "other", TransactionType::Income),
    (Category::Food, 6, "food", TransactionType::Expense),
    (Category::Transport, 7, "transport", TransactionType::Expense),
    (Category::Shopping, 8, "shopping", TransactionType::Expense),
    (Category::Bills, 9, "bills", TransactionType::Expense),
    (Category::Entertainment, 10, "entertainment", TransactionType::Expense),
    (Category::Health, 11, "health", TransactionType::Expense),
    (Category::Education, 12, "education", TransactionType::Expense),
    (Category::Misc, 13, "misc", TransactionType::Expense),
];

impl Category {
    fn entry(self) -> &'static (Category, i64, &'static str, TransactionType) {
        let row = match self {
            Category::Salary => 0,
            Category::Freelance => 1,
            Category::Business => 2,
            Category::Investment => 3,
            Category::Gift => 4,
            Category::Other => 5,
            Category::Food => 6,
            Category::Transport => 7,
            Category::Shopping => 8,
            Category::Bills => 9,
            Category::Entertainment => 10,
            Category::Health => 11,
            Category::Education => 12,
            Category::Misc => 13,
        };
        &CATEGORY_TABLE[row]
    }

    pub fn ordinal(self) -> i64 {
        self.entry().1
    }

    pub fn name(self) -> &'static str {
        self.entry().2
    }

    pub fn kind(self) -> TransactionType {
        self.entry().3
    }

    pub fn from_ordinal(v: i64) -> Option<Self> {
        CATEGORY_TABLE
            .iter()
            .find(|(_, o, ..)| *o == v)
            .map(|(c, ..)| *c)
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();
        CATEGORY_TABLE
            .iter()
            .find(|(_, _, n, _)| *n == s)
            .map(|(c, ..)| *c)
    }

    pub fn for_type(kind: TransactionType) -> impl Iterator<Item = Category> {
        CATEGORY_TABLE
            .iter()
            .filter(move |(.., k)| *k == kind)
            .map(|(c, ..)| *c)
    }

    /// Category assigned when the caller does not pick one.
    pub fn default_for(kind: TransactionType) -> Category {
        match kind {
            TransactionType::Income => Category::Other,
            TransactionType::Expense => Category::Misc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Option<i64>,
    pub amount: Decimal,
    pub description: String,
    pub timestamp: DateTime<Local>,
    pub r#type: TransactionType,
    pub category: Category,
}

impl Transaction {
    pub fn new(
        amount: Decimal,
        description: impl Into<String>,
        r#type: TransactionType,
        category: Category,
    ) -> Self {
        Self {
            id: None,
            amount,
            description: description.into(),
            timestamp: Local::now().trunc_subsecs(3),
            r#type,
            category,
        }
    }

    /// Timestamps are kept at millisecond resolution, as stored.
    pub fn at(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp.trunc_subsecs(3);
        self
    }

    /// Signed contribution to a net figure: income positive, expense negative.
    pub fn signed_amount(&self) -> Decimal {
        match self.r#type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

/// Pre-migration record shape, kept for callers that only know about
/// expenses. Always an `expense` tagged `misc` once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Option<i64>,
    pub amount: Decimal,
    pub description: String,
    pub timestamp: DateTime<Local>,
}

impl From<Expense> for Transaction {
    fn from(e: Expense) -> Self {
        Transaction {
            id: e.id,
            amount: e.amount,
            description: e.description,
            timestamp: e.timestamp,
            r#type: TransactionType::Expense,
            category: Category::Misc,
        }
    }
}

impl TryFrom<Transaction> for Expense {
    type Error = StoreError;

    fn try_from(t: Transaction) -> Result<Self, Self::Error> {
        if t.r#type != TransactionType::Expense {
            return Err(StoreError::InvalidArgument(format!(
                "transaction {:?} is income and has no expense view",
                t.id
            )));
        }
        Ok(Expense {
            id: t.id,
            amount: t.amount,
            description: t.description,
            timestamp: t.timestamp,
        })
    }
}
