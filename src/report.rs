// Copyright (c) Budgetwise Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Transaction, TxnKind};

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyRow {
    pub month: String, // YYYY-MM
    pub income: Decimal,
    pub expense: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub category_totals: Vec<CategoryTotal>,
    pub monthly: Vec<MonthlyRow>,
}

/// Aggregate one user's transactions into the two report views.
///
/// Returns `None` for an empty input so callers can tell "no transactions"
/// apart from months that net to zero. Category totals cover expenses only
/// and omit categories without a single expense row, so an income-only
/// history yields an empty list. The monthly rows are keyed `YYYY-MM`,
/// ordered chronologically, and zero-filled: a month seen only on the income
/// side still reports an expense of zero and vice versa.
pub fn aggregate(transactions: &[Transaction]) -> Option<Report> {
    if transactions.is_empty() {
        return None;
    }

    let mut by_category: BTreeMap<&str, Decimal> = BTreeMap::new();
    let mut by_month: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();

    for t in transactions {
        if t.kind == TxnKind::Expense {
            *by_category.entry(t.category.as_str()).or_insert(Decimal::ZERO) += t.amount;
        }
        let month = t.date.format("%Y-%m").to_string();
        let bucket = by_month.entry(month).or_insert((Decimal::ZERO, Decimal::ZERO));
        match t.kind {
            TxnKind::Income => bucket.0 += t.amount,
            TxnKind::Expense => bucket.1 += t.amount,
        }
    }

    let category_totals = by_category
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
        })
        .collect();
    let monthly = by_month
        .into_iter()
        .map(|(month, (income, expense))| MonthlyRow {
            month,
            income,
            expense,
        })
        .collect();

    Some(Report {
        category_totals,
        monthly,
    })
}
