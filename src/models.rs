// Copyright (c) 2025 Budgetwise Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Registered account holder. The password hash stays in the database and is
/// only touched by the auth module; it never travels with this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
}

/// Direction of a transaction. Amounts are stored non-negative; whether money
/// came in or went out is carried here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnKind {
    Income,
    Expense,
}

impl TxnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxnKind::Income => "income",
            TxnKind::Expense => "expense",
        }
    }
}

impl FromStr for TxnKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TxnKind::Income),
            "expense" => Ok(TxnKind::Expense),
            other => Err(anyhow::anyhow!(
                "Invalid type '{}', expected income or expense",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub description: String,
    pub amount: Decimal,
    pub kind: TxnKind,
    pub date: NaiveDateTime,
    pub category: String,
}
