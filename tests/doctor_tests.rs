// Copyright (c) Budgetwise Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetwise::commands::doctor;
use rusqlite::Connection;

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE settings(key TEXT PRIMARY KEY, value TEXT NOT NULL);
        CREATE TABLE users(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TEXT
        );
        CREATE TABLE transactions(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            description TEXT NOT NULL,
            amount TEXT NOT NULL,
            type TEXT NOT NULL,
            date TEXT NOT NULL,
            category TEXT NOT NULL DEFAULT 'Uncategorized',
            created_at TEXT
        );
        "#,
    )
    .unwrap();
    conn.execute(
        "INSERT INTO users(email, password_hash) VALUES ('t@example.com', 'x')",
        [],
    )
    .unwrap();
    conn
}

#[test]
fn clean_database_has_no_findings() {
    let conn = base_conn();
    conn.execute(
        "INSERT INTO transactions(user_id, description, amount, type, date, category)
         VALUES (1, 'rent', '500', 'expense', '2024-01-05 00:00:00', 'Rent')",
        [],
    )
    .unwrap();
    assert!(doctor::scan(&conn).unwrap().is_empty());
}

#[test]
fn scan_flags_each_kind_of_damage() {
    let conn = base_conn();
    // Orphan: user 99 does not exist.
    conn.execute(
        "INSERT INTO transactions(user_id, description, amount, type, date, category)
         VALUES (99, 'ghost', '1', 'expense', '2024-01-05 00:00:00', 'Rent')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO transactions(user_id, description, amount, type, date, category)
         VALUES (1, 'bad amount', 'abc', 'expense', '2024-01-05 00:00:00', 'Rent')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO transactions(user_id, description, amount, type, date, category)
         VALUES (1, 'negative', '-5', 'expense', '2024-01-05 00:00:00', 'Rent')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO transactions(user_id, description, amount, type, date, category)
         VALUES (1, 'bad date', '5', 'expense', 'yesterday', 'Rent')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO transactions(user_id, description, amount, type, date, category)
         VALUES (1, 'bad type', '5', 'transfer', '2024-01-05 00:00:00', 'Rent')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO transactions(user_id, description, amount, type, date, category)
         VALUES (1, 'bad category', '5', 'expense', '2024-01-05 00:00:00', 'Food')",
        [],
    )
    .unwrap();

    let findings = doctor::scan(&conn).unwrap();
    let issues: Vec<&str> = findings.iter().map(|(issue, _)| issue.as_str()).collect();
    assert!(issues.contains(&"orphaned_transaction"));
    assert!(issues.contains(&"bad_amount"));
    assert!(issues.contains(&"negative_amount"));
    assert!(issues.contains(&"bad_date"));
    assert!(issues.contains(&"bad_type"));
    assert!(issues.contains(&"unknown_category"));
}

#[test]
fn uncategorized_is_a_legal_category() {
    let conn = base_conn();
    conn.execute(
        "INSERT INTO transactions(user_id, description, amount, type, date)
         VALUES (1, 'mystery', '5', 'expense', '2024-01-05 00:00:00')",
        [],
    )
    .unwrap();
    assert!(doctor::scan(&conn).unwrap().is_empty());
}
