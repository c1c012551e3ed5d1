// Copyright (c) Budgetwise Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Over,
    Under,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct BudgetCheck {
    pub status: BudgetStatus,
    pub delta: Decimal,
}

/// Compare a predicted spend against a budget ceiling. Over only when the
/// prediction strictly exceeds the budget; landing exactly on it is under,
/// with a delta of zero. The delta is always the absolute gap.
pub fn compare(predicted: Decimal, budget: Decimal) -> BudgetCheck {
    let status = if predicted > budget {
        BudgetStatus::Over
    } else {
        BudgetStatus::Under
    };
    BudgetCheck {
        status,
        delta: (predicted - budget).abs(),
    }
}

/// Apply a what-if percentage change to a predicted value, e.g. a planned
/// rent increase. The underlying model output is left untouched; callers
/// re-run [`compare`] on the adjusted figure.
pub fn scenario(predicted: Decimal, pct: Decimal) -> Decimal {
    predicted * (Decimal::ONE + pct / Decimal::ONE_HUNDRED)
}
