// Copyright (c) 2025 Budgetwise Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categorize::categorize;
use crate::commands::session::current_user;
use crate::models::TxnKind;
use crate::utils::{fmt_datetime, maybe_print_json, now, parse_amount, parse_date, pretty_table};
use anyhow::Result;
use rusqlite::{params, Connection};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = current_user(conn)?;
    let description = sub
        .get_one::<String>("description")
        .unwrap()
        .trim()
        .to_string();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap().trim())?;
    let kind: TxnKind = sub.get_one::<String>("type").unwrap().parse()?;
    let date = match sub.get_one::<String>("date") {
        Some(raw) => parse_date(raw.trim())?.and_hms_opt(0, 0, 0).unwrap(),
        None => now(),
    };
    let category = categorize(&description);

    conn.execute(
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
    println!("Transaction added under '{}' category.", category);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = current_user(conn)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let limit: usize = *sub.get_one::<usize>("limit").unwrap_or(&10);
    let data = query_rows(conn, user.id, limit)?;
    if data.is_empty() {
        println!("No transactions to display.");
        return Ok(());
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.description.clone(),
                    r.amount.clone(),
                    r.r#type.clone(),
                    r.category.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Description", "Amount", "Type", "Category"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub date: String,
    pub description: String,
    pub amount: String,
    pub r#type: String,
    pub category: String,
}

pub fn query_rows(conn: &Connection, user_id: i64, limit: usize) -> Result<Vec<TransactionRow>> {
    let mut stmt = conn.prepare(
        "SELECT date, description, amount, type, category FROM transactions
         WHERE user_id=?1 ORDER BY date DESC, id DESC LIMIT ?2",
    )?;
    let mut rows = stmt.query(params![user_id, limit as i64])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(TransactionRow {
            date: r.get(0)?,
            description: r.get(1)?,
            amount: r.get(2)?,
            r#type: r.get(3)?,
            category: r.get(4)?,
        });
    }
    Ok(data)
}
