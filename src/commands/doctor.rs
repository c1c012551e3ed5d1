// Copyright (c) Budgetwise Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categorize::is_known_category;
use crate::utils::{parse_datetime, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection) -> Result<()> {
    let findings = scan(conn)?;
    if findings.is_empty() {
        println!("doctor: no issues found");
    } else {
        let rows = findings
            .into_iter()
            .map(|(issue, detail)| vec![issue, detail])
            .collect();
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// Sweep stored rows for values the write paths should have rejected. The
/// schema CHECK guards new rows; older databases may predate it.
pub fn scan(conn: &Connection) -> Result<Vec<(String, String)>> {
    let mut findings = Vec::new();

    // 1) Transactions whose owner is gone
    let mut stmt = conn.prepare(
        "SELECT t.id FROM transactions t LEFT JOIN users u ON t.user_id=u.id WHERE u.id IS NULL",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        findings.push(("orphaned_transaction".into(), format!("id {}", id)));
    }

    // 2) Amounts that fail to parse or are negative
    let mut stmt2 = conn.prepare("SELECT id, amount FROM transactions ORDER BY id")?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        let amount: String = r.get(1)?;
        match amount.parse::<Decimal>() {
            Ok(a) if a < Decimal::ZERO => {
                findings.push(("negative_amount".into(), format!("id {}: {}", id, amount)));
            }
            Ok(_) => {}
            Err(_) => findings.push(("bad_amount".into(), format!("id {}: '{}'", id, amount))),
        }
    }

    // 3) Dates that fail to parse
    let mut stmt3 = conn.prepare("SELECT id, date FROM transactions ORDER BY id")?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let id: i64 = r.get(0)?;
        let date: String = r.get(1)?;
        if parse_datetime(&date).is_err() {
            findings.push(("bad_date".into(), format!("id {}: '{}'", id, date)));
        }
    }

    // 4) Types outside the enum
    let mut stmt4 = conn
        .prepare("SELECT id, type FROM transactions WHERE type NOT IN ('income','expense')")?;
    let mut cur4 = stmt4.query([])?;
    while let Some(r) = cur4.next()? {
        let id: i64 = r.get(0)?;
        let t: String = r.get(1)?;
        findings.push(("bad_type".into(), format!("id {}: '{}'", id, t)));
    }

    // 5) Categories outside the taxonomy
    let mut stmt5 = conn.prepare("SELECT DISTINCT category FROM transactions ORDER BY category")?;
    let mut cur5 = stmt5.query([])?;
    while let Some(r) = cur5.next()? {
        let cat: String = r.get(0)?;
        if !is_known_category(&cat) {
            findings.push(("unknown_category".into(), cat));
        }
    }

    Ok(findings)
}
