// Copyright (c) 2025 Budgetwise Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Spending forecasts over a daily time series.
//!
//! Transactions are collapsed into one net amount per calendar day and fed
//! to a [`Predictor`]. The predictor is a seam: the CLI ships with a plain
//! least-squares trend line, and anything smarter can be swapped in without
//! touching the series preparation or the budget comparison around it.

use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::models::Transaction;

/// Horizon bookkeeping counts months as 30-day blocks.
pub const DAYS_PER_MONTH: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub amount: Decimal,
}

/// Collapse transactions into one net amount per calendar day, ascending by
/// date. Incomes and expenses both contribute to the sum; days without any
/// transaction are absent rather than zero-filled.
pub fn daily_series(transactions: &[Transaction]) -> Vec<SeriesPoint> {
    let mut by_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for t in transactions {
        *by_day.entry(t.date.date()).or_insert(Decimal::ZERO) += t.amount;
    }
    by_day
        .into_iter()
        .map(|(date, amount)| SeriesPoint { date, amount })
        .collect()
}

pub fn horizon_days(months: u32) -> u32 {
    months * DAYS_PER_MONTH
}

/// History in, predictions out.
///
/// Implementations return one estimate per history date (the in-sample
/// backfill used for actual-vs-predicted overlays) followed by
/// `horizon_days` consecutive daily predictions past the last observation,
/// all ascending by date. An empty history is an error.
pub trait Predictor {
    fn predict(&self, history: &[SeriesPoint], horizon_days: u32) -> Result<Vec<SeriesPoint>>;
}

/// Built-in least-squares trend line: fits `amount = a + b * day` over the
/// observed days and evaluates the line across history and horizon. Gaps in
/// the history keep their true day offsets, so sparse series do not get
/// compressed. A single observation yields a flat line.
#[derive(Debug, Default)]
pub struct TrendModel;

impl Predictor for TrendModel {
    fn predict(&self, history: &[SeriesPoint], horizon_days: u32) -> Result<Vec<SeriesPoint>> {
        let (Some(first), Some(last)) = (history.first(), history.last()) else {
            bail!("Cannot fit a forecast on an empty series");
        };

        let xs: Vec<f64> = history
            .iter()
            .map(|p| (p.date - first.date).num_days() as f64)
            .collect();
        let ys: Vec<f64> = history
            .iter()
            .map(|p| p.amount.to_f64().unwrap_or_default())
            .collect();

        let n = xs.len() as f64;
        let mean_x = xs.iter().sum::<f64>() / n;
        let mean_y = ys.iter().sum::<f64>() / n;
        let mut var = 0.0;
        let mut cov = 0.0;
        for (x, y) in xs.iter().zip(&ys) {
            var += (x - mean_x) * (x - mean_x);
            cov += (x - mean_x) * (y - mean_y);
        }
        let slope = if var == 0.0 { 0.0 } else { cov / var };
        let intercept = mean_y - slope * mean_x;

        let estimate = |date: NaiveDate| -> Result<SeriesPoint> {
            let x = (date - first.date).num_days() as f64;
            let y = intercept + slope * x;
            let amount = Decimal::try_from(y)
                .with_context(|| format!("Invalid predicted value '{}' for {}", y, date))?
                .round_dp(2);
            Ok(SeriesPoint { date, amount })
        };

        let mut out = Vec::with_capacity(history.len() + horizon_days as usize);
        for p in history {
            out.push(estimate(p.date)?);
        }
        for offset in 1..=i64::from(horizon_days) {
            out.push(estimate(last.date + Duration::days(offset))?);
        }
        Ok(out)
    }
}
