// Copyright (c) 2025 Budgetwise Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categorize::categorize;
use crate::commands::session::current_user;
use crate::models::TxnKind;
use crate::utils::{fmt_datetime, now, parse_date, parse_decimal};
use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => import_transactions(conn, sub),
        _ => Ok(()),
    }
}

/// Columns are addressed by header name, so their order in the file does not
/// matter and extra columns are ignored. Per row: a missing or malformed
/// Date falls back to the import time, a missing Amount is zero, a missing
/// Type is expense. A bad Amount or an unknown Type aborts the whole import;
/// the batch runs in one transaction so a failed file leaves nothing behind.
fn import_transactions(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = current_user(conn)?;
    let path = sub.get_one::<String>("path").unwrap().trim();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let headers = rdr.headers()?.clone();
    let col = |name: &str| headers.iter().position(|h| h.trim() == name);
    let date_col = col("Date");
    let desc_col = col("Description");
    let amount_col = col("Amount");
    let type_col = col("Type");

    let tx = conn.transaction()?;
    let mut imported = 0usize;
    for (idx, result) in rdr.records().enumerate() {
        let line = idx + 2; // header is line 1
        let rec = result.with_context(|| format!("Read CSV row {}", line))?;
        let field = |i: Option<usize>| i.and_then(|i| rec.get(i)).map(str::trim).unwrap_or("");

        let description = field(desc_col).to_string();

        let amount_raw = field(amount_col);
        let amount = if amount_raw.is_empty() {
            Decimal::ZERO
        } else {
            parse_decimal(amount_raw)
                .with_context(|| format!("Invalid amount '{}' on row {}", amount_raw, line))?
        };
        if amount < Decimal::ZERO {
            bail!("Invalid amount '{}' on row {}, must be >= 0", amount_raw, line);
        }

        let type_raw = field(type_col);
        let kind = if type_raw.is_empty() {
            TxnKind::Expense
        } else {
            type_raw
                .parse::<TxnKind>()
                .with_context(|| format!("Invalid type '{}' on row {}", type_raw, line))?
        };

        let date = match parse_date(field(date_col)) {
            Ok(d) => d.and_hms_opt(0, 0, 0).unwrap(),
            Err(_) => now(),
        };

        let category = categorize(&description);
        tx.execute(
            "INSERT INTO transactions(user_id, description, amount, type, date, category)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user.id,
                description,
                amount.to_string(),
                kind.as_str(),
                fmt_datetime(&date),
                category
            ],
        )?;
        imported += 1;
    }
    tx.commit()?;
    println!("Imported {} transactions from {}", imported, path);
    Ok(())
}
