// Copyright (c) Budgetwise Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::session::current_user;
use crate::report;
use crate::utils::{load_transactions, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("categories", sub)) => categories(conn, sub)?,
        Some(("monthly", sub)) => monthly(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn categories(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = current_user(conn)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let txns = load_transactions(conn, user.id)?;
    let Some(rep) = report::aggregate(&txns) else {
        println!("No transactions to display.");
        return Ok(());
    };
    if rep.category_totals.is_empty() {
        println!("No expense data yet.");
        return Ok(());
    }
    if !maybe_print_json(json_flag, jsonl_flag, &rep.category_totals)? {
        let rows: Vec<Vec<String>> = rep
            .category_totals
            .iter()
            .map(|c| vec![c.category.clone(), format!("{:.2}", c.total)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }
    Ok(())
}

fn monthly(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = current_user(conn)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let txns = load_transactions(conn, user.id)?;
    let Some(rep) = report::aggregate(&txns) else {
        println!("No transactions to display.");
        return Ok(());
    };
    if !maybe_print_json(json_flag, jsonl_flag, &rep.monthly)? {
        let rows: Vec<Vec<String>> = rep
            .monthly
            .iter()
            .map(|r| {
                vec![
                    r.month.clone(),
                    format!("{:.2}", r.income),
                    format!("{:.2}", r.expense),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Month", "Income", "Expense"], rows));
    }
    Ok(())
}
