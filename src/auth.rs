// Copyright (c) 2025 Budgetwise Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Password hashing and session tokens.
//!
//! Passwords are stored as bcrypt hashes. A successful login mints a signed
//! JWT with a two hour lifetime; data commands resolve the acting user from
//! it. The signing secret comes from `BUDGETWISE_TOKEN_SECRET` when set,
//! otherwise a per-database secret is generated once and kept in settings,
//! which means tokens survive restarts but not a database wipe.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};

pub const TOKEN_TTL_HOURS: i64 = 2;
pub const TOKEN_SECRET_ENV: &str = "BUDGETWISE_TOKEN_SECRET";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("User already exists.")]
    DuplicateEmail,
    #[error("Invalid credentials.")]
    InvalidCredentials,
    #[error("Please login first.")]
    NotLoggedIn,
    #[error("Session expired. Please login again.")]
    SessionExpired,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id the token was issued for.
    pub sub: i64,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

pub fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).context("Password hashing failed")
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    bcrypt::verify(password, hash).context("Password verification failed")
}

fn token_secret(conn: &Connection) -> Result<String> {
    if let Ok(secret) = std::env::var(TOKEN_SECRET_ENV) {
        if !secret.is_empty() {
            return Ok(secret);
        }
    }
    let stored: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='token_secret'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    if let Some(secret) = stored {
        return Ok(secret);
    }
    let fresh = uuid::Uuid::new_v4().simple().to_string();
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('token_secret', ?1)",
        params![fresh],
    )?;
    Ok(fresh)
}

pub fn issue_token(conn: &Connection, user_id: i64, email: &str) -> Result<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
    };
    let secret = token_secret(conn)?;
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Session token encoding failed")
}

/// Check signature and expiry; an expired token is reported apart from a
/// bad or foreign one so the user is told to log in again rather than that
/// no session exists.
pub fn verify_token(conn: &Connection, token: &str) -> Result<Claims> {
    let secret = token_secret(conn)?;
    match decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    ) {
        Ok(data) => Ok(data.claims),
        Err(err) => match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                Err(AuthError::SessionExpired.into())
            }
            _ => Err(AuthError::NotLoggedIn.into()),
        },
    }
}
