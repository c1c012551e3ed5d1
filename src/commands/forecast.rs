// Copyright (c) 2025 Budgetwise Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::budget::{self, BudgetStatus};
use crate::commands::session::current_user;
use crate::forecast::{daily_series, horizon_days, Predictor, SeriesPoint, TrendModel};
use crate::utils::{load_transactions, maybe_print_json, parse_decimal, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("run", sub)) => run(conn, sub),
        _ => Ok(()),
    }
}

/// Accepted layouts for dates in a forecast CSV. Store dates are strict;
/// these files come from banks and exports with no single convention.
const CSV_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];

fn parse_csv_date(s: &str) -> Result<NaiveDate> {
    for fmt in CSV_DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    bail!("Invalid date '{}' in forecast CSV", s)
}

#[derive(Debug)]
pub struct CsvSeries {
    pub history: Vec<SeriesPoint>,
    /// Per-category sums, present only when the file has a Category column.
    pub by_category: Option<Vec<(String, Decimal)>>,
}

/// Load a standalone forecast CSV. Date and Amount columns are required and
/// every row must parse; unlike the store importer there is no database to
/// fall back on, so bad rows are hard errors.
pub fn load_csv_series(path: &str) -> Result<CsvSeries> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;
    let headers = rdr.headers()?.clone();
    let col = |name: &str| headers.iter().position(|h| h.trim() == name);
    let (Some(date_col), Some(amount_col)) = (col("Date"), col("Amount")) else {
        bail!("Forecast CSV must have 'Date' and 'Amount' columns");
    };
    let category_col = col("Category");

    let mut by_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    let mut by_category: BTreeMap<String, Decimal> = BTreeMap::new();
    for (idx, result) in rdr.records().enumerate() {
        let line = idx + 2;
        let rec = result.with_context(|| format!("Read CSV row {}", line))?;
        let date_raw = rec.get(date_col).unwrap_or("").trim();
        let date = parse_csv_date(date_raw).with_context(|| format!("Bad row {}", line))?;
        let amount_raw = rec.get(amount_col).unwrap_or("").trim();
        let amount = parse_decimal(amount_raw)
            .with_context(|| format!("Invalid amount '{}' on row {}", amount_raw, line))?;
        *by_day.entry(date).or_insert(Decimal::ZERO) += amount;
        if let Some(c) = category_col {
            let cat = rec.get(c).unwrap_or("").trim();
            if !cat.is_empty() {
                *by_category.entry(cat.to_string()).or_insert(Decimal::ZERO) += amount;
            }
        }
    }
    let history = by_day
        .into_iter()
        .map(|(date, amount)| SeriesPoint { date, amount })
        .collect();
    let by_category = category_col.map(|_| by_category.into_iter().collect());
    Ok(CsvSeries {
        history,
        by_category,
    })
}

#[derive(Serialize)]
struct ForecastRow {
    date: String,
    actual: Option<String>,
    predicted: String,
}

fn run(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    // Status lines go to stderr when stdout carries the json document.
    let status = |msg: String| {
        if json_flag || jsonl_flag {
            eprintln!("{}", msg);
        } else {
            println!("{}", msg);
        }
    };
    let months: u32 = *sub.get_one::<u32>("months").unwrap_or(&3);
    let limit: usize = *sub.get_one::<usize>("limit").unwrap_or(&14);
    let budget_arg = sub
        .get_one::<String>("budget")
        .map(|s| parse_decimal(s.trim()))
        .transpose()?;
    let pct_arg = sub
        .get_one::<String>("rent-change")
        .map(|s| parse_decimal(s.trim()))
        .transpose()?;

    let (history, by_category) = match sub.get_one::<String>("path") {
        Some(path) => {
            let csv = load_csv_series(path.trim())?;
            (csv.history, csv.by_category)
        }
        None => {
            let user = current_user(conn)?;
            let txns = load_transactions(conn, user.id)?;
            (daily_series(&txns), None)
        }
    };
    if history.is_empty() {
        bail!("No data to forecast");
    }

    let horizon = horizon_days(months);
    // Non-empty checked above.
    let first = history[0].date;
    let last = history[history.len() - 1].date;
    status(format!(
        "Fitting trend model on {} observed days ({} to {})...",
        history.len(),
        first,
        last
    ));
    let started = std::time::Instant::now();
    let predicted = TrendModel.predict(&history, horizon)?;
    status(format!(
        "Fit done in {:?}; projected {} days ahead.",
        started.elapsed(),
        horizon
    ));
    let Some(final_point) = predicted.last() else {
        bail!("Predictor returned no points");
    };
    let final_pred = final_point.amount;

    let actuals: BTreeMap<NaiveDate, Decimal> =
        history.iter().map(|p| (p.date, p.amount)).collect();
    let rows_all: Vec<ForecastRow> = predicted
        .iter()
        .map(|p| ForecastRow {
            date: p.date.to_string(),
            actual: actuals.get(&p.date).map(|a| format!("{:.2}", a)),
            predicted: format!("{:.2}", p.amount),
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &rows_all)? {
        let start = rows_all.len().saturating_sub(limit);
        let tail: Vec<Vec<String>> = rows_all[start..]
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.actual.clone().unwrap_or_default(),
                    r.predicted.clone(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Date", "Actual", "Predicted"], tail));
    }

    if let Some(dist) = by_category {
        if !dist.is_empty() && !json_flag && !jsonl_flag {
            let total: Decimal = dist.iter().map(|(_, v)| *v).sum();
            let rows: Vec<Vec<String>> = dist
                .iter()
                .map(|(cat, amt)| {
                    let share = if total.is_zero() {
                        Decimal::ZERO
                    } else {
                        amt / total * Decimal::ONE_HUNDRED
                    };
                    vec![cat.clone(), format!("{:.2}", amt), format!("{:.1}%", share)]
                })
                .collect();
            println!("Spending by category:");
            println!("{}", pretty_table(&["Category", "Amount", "Share"], rows));
        }
    }

    if let Some(budget_v) = budget_arg {
        let check = budget::compare(final_pred, budget_v);
        match check.status {
            BudgetStatus::Over => status(format!(
                "Alert: You may overshoot your budget by {:.2}",
                check.delta
            )),
            BudgetStatus::Under => status(format!("You're under budget by {:.2}", check.delta)),
        }
        if let Some(pct) = pct_arg {
            let adjusted = budget::scenario(final_pred, pct);
            let adj = budget::compare(adjusted, budget_v);
            let side = match adj.status {
                BudgetStatus::Over => "over",
                BudgetStatus::Under => "under",
            };
            status(format!(
                "With a {}% rent change the forecast is {:.2} ({} budget by {:.2})",
                pct, adjusted, side, adj.delta
            ));
        }
    } else if let Some(pct) = pct_arg {
        let adjusted = budget::scenario(final_pred, pct);
        status(format!(
            "With a {}% rent change the forecast is {:.2}",
            pct, adjusted
        ));
    }
    Ok(())
}
