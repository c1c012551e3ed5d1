// Copyright (c) 2025 Budgetwise Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::auth::{self, AuthError};
use crate::models::User;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("register", sub)) => register(conn, sub)?,
        Some(("login", sub)) => login(conn, sub)?,
        Some(("logout", _)) => logout(conn)?,
        Some(("whoami", _)) => whoami(conn)?,
        _ => {}
    }
    Ok(())
}

fn register(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let email = sub.get_one::<String>("email").unwrap().trim().to_string();
    let password = sub.get_one::<String>("password").unwrap();
    if email.is_empty() || password.is_empty() {
        bail!("Email and password must not be empty");
    }
    let existing: Option<i64> = conn
        .query_row("SELECT id FROM users WHERE email=?1", params![email], |r| {
            r.get(0)
        })
        .optional()?;
    if existing.is_some() {
        return Err(AuthError::DuplicateEmail.into());
    }
    let hash = auth::hash_password(password)?;
    conn.execute(
        "INSERT INTO users(email, password_hash) VALUES (?1, ?2)",
        params![email, hash],
    )?;
    println!("Registration successful. Please login.");
    Ok(())
}

fn login(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let email = sub.get_one::<String>("email").unwrap().trim().to_string();
    let password = sub.get_one::<String>("password").unwrap();
    let row: Option<(i64, String)> = conn
        .query_row(
            "SELECT id, password_hash FROM users WHERE email=?1",
            params![email],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()?;
    // A missing user and a wrong password answer the same way.
    let Some((user_id, hash)) = row else {
        return Err(AuthError::InvalidCredentials.into());
    };
    if !auth::verify_password(password, &hash)? {
        return Err(AuthError::InvalidCredentials.into());
    }
    let token = auth::issue_token(conn, user_id, &email)?;
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('session_token', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![token],
    )?;
    println!("Welcome {}!", email);
    Ok(())
}

fn logout(conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM settings WHERE key='session_token'", [])?;
    println!("Logged out successfully.");
    Ok(())
}

fn whoami(conn: &Connection) -> Result<()> {
    let user = current_user(conn)?;
    println!("Logged in as {}", user.email);
    Ok(())
}

/// Resolve the acting user from the stored session token. Data commands call
/// this before touching transactions; the errors carry the exact message the
/// user should see.
pub fn current_user(conn: &Connection) -> Result<User> {
    let token: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='session_token'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    let Some(token) = token else {
        return Err(AuthError::NotLoggedIn.into());
    };
    let claims = auth::verify_token(conn, &token)?;
    let user: Option<User> = conn
        .query_row(
            "SELECT id, email FROM users WHERE id=?1",
            params![claims.sub],
            |r| {
                Ok(User {
                    id: r.get(0)?,
                    email: r.get(1)?,
                })
            },
        )
        .optional()?;
    user.ok_or_else(|| AuthError::NotLoggedIn.into())
}
