// Copyright (c) 2025 Budgetwise Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

use crate::models::{Transaction, TxnKind};

/// Storage format for transaction dates.
pub const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, DATETIME_FMT)
        .with_context(|| format!("Invalid timestamp '{}', expected YYYY-MM-DD HH:MM:SS", s))
}

pub fn fmt_datetime(dt: &NaiveDateTime) -> String {
    dt.format(DATETIME_FMT).to_string()
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Transaction amounts must parse and be non-negative.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let amount = parse_decimal(s)?;
    if amount < Decimal::ZERO {
        anyhow::bail!("Invalid amount '{}', must be >= 0", s);
    }
    Ok(amount)
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

/// All of one user's transactions, ascending by date then insertion order.
pub fn load_transactions(conn: &Connection, user_id: i64) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, description, amount, type, date, category
         FROM transactions WHERE user_id=?1 ORDER BY date, id",
    )?;
    let mut rows = stmt.query(params![user_id])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let amount_s: String = r.get(3)?;
        let kind_s: String = r.get(4)?;
        let date_s: String = r.get(5)?;
        out.push(Transaction {
            id: r.get(0)?,
            user_id: r.get(1)?,
            description: r.get(2)?,
            amount: parse_decimal(&amount_s)
                .with_context(|| format!("Invalid stored amount '{}'", amount_s))?,
            kind: kind_s.parse::<TxnKind>()?,
            date: parse_datetime(&date_s)?,
            category: r.get(6)?,
        });
    }
    Ok(out)
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
