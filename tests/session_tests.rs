// Copyright (c) 2025 Budgetwise Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetwise::auth::Claims;
use budgetwise::commands::session::{self, current_user};
use budgetwise::cli;
use jsonwebtoken::{encode, EncodingKey, Header};
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
        "#,
    )
    .unwrap();
    conn
}

fn run_session(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["budgetwise", "session"];
    argv.extend_from_slice(args);
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(argv);
    let Some(("session", session_m)) = matches.subcommand() else {
        panic!("no session subcommand");
    };
    session::handle(conn, session_m)
}

#[test]
fn register_login_whoami_round_trip() {
    let conn = base_conn();
    run_session(
        &conn,
        &["register", "--email", "ana@example.com", "--password", "s3cret"],
    )
    .unwrap();
    run_session(
        &conn,
        &["login", "--email", "ana@example.com", "--password", "s3cret"],
    )
    .unwrap();

    let token: String = conn
        .query_row(
            "SELECT value FROM settings WHERE key='session_token'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert!(!token.is_empty());

    let user = current_user(&conn).unwrap();
    assert_eq!(user.email, "ana@example.com");
}

#[test]
fn duplicate_email_is_rejected() {
    let conn = base_conn();
    run_session(
        &conn,
        &["register", "--email", "bo@example.com", "--password", "pw1"],
    )
    .unwrap();
    let err = run_session(
        &conn,
        &["register", "--email", "bo@example.com", "--password", "pw2"],
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "User already exists.");
}

#[test]
fn wrong_password_and_unknown_email_answer_alike() {
    let conn = base_conn();
    run_session(
        &conn,
        &["register", "--email", "cy@example.com", "--password", "right"],
    )
    .unwrap();

    let err = run_session(
        &conn,
        &["login", "--email", "cy@example.com", "--password", "wrong"],
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Invalid credentials.");

    let err = run_session(
        &conn,
        &["login", "--email", "nobody@example.com", "--password", "right"],
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Invalid credentials.");
}

#[test]
fn logout_clears_the_session() {
    let conn = base_conn();
    run_session(
        &conn,
        &["register", "--email", "di@example.com", "--password", "pw"],
    )
    .unwrap();
    run_session(
        &conn,
        &["login", "--email", "di@example.com", "--password", "pw"],
    )
    .unwrap();
    assert!(current_user(&conn).is_ok());

    run_session(&conn, &["logout"]).unwrap();
    let err = current_user(&conn).unwrap_err();
    assert_eq!(err.to_string(), "Please login first.");
}

#[test]
fn no_session_means_not_logged_in() {
    let conn = base_conn();
    let err = current_user(&conn).unwrap_err();
    assert_eq!(err.to_string(), "Please login first.");
}

#[test]
fn expired_token_asks_for_a_fresh_login() {
    let conn = base_conn();
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('token_secret', 'itest-secret')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO users(email, password_hash) VALUES('ed@example.com', 'x')",
        [],
    )
    .unwrap();
    let user_id: i64 = conn
        .query_row("SELECT id FROM users WHERE email='ed@example.com'", [], |r| {
            r.get(0)
        })
        .unwrap();

    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        email: "ed@example.com".to_string(),
        iat: now - 10_000,
        exp: now - 7_200,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"itest-secret"),
    )
    .unwrap();
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('session_token', ?1)",
        rusqlite::params![token],
    )
    .unwrap();

    let err = current_user(&conn).unwrap_err();
    assert_eq!(err.to_string(), "Session expired. Please login again.");
}

#[test]
fn garbage_token_is_treated_as_no_session() {
    let conn = base_conn();
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('session_token', 'not-a-jwt')",
        [],
    )
    .unwrap();
    let err = current_user(&conn).unwrap_err();
    assert_eq!(err.to_string(), "Please login first.");
}

#[test]
fn empty_credentials_are_rejected() {
    let conn = base_conn();
    let err = run_session(&conn, &["register", "--email", "  ", "--password", "pw"]).unwrap_err();
    assert!(err.to_string().contains("must not be empty"));
}
