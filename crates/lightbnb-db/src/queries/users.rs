//! User database queries.
//!
//! Lookups return `Ok(None)` when no row matches; store failures are
//! returned as `Error::Database`.

use lightbnb_common::{Error, Result, UserId};
use rusqlite::Connection;

use crate::models::{NewUser, User, USER_COLUMNS};

fn lookup(conn: &Connection, sql: &str, param: impl rusqlite::ToSql) -> Result<Option<User>> {
    let result = conn.query_row(sql, [param], User::from_row);

    match result {
        Ok(user) => Ok(Some(user)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// Get a single user by email.
///
/// Matching is exact: `Alice@example.com` does not find `alice@example.com`.
///
/// # Returns
///
/// * `Ok(Some(User))` - The user if found
/// * `Ok(None)` - If no user has this email
/// * `Err(Error)` - If a database error occurs
pub fn get_user_with_email(conn: &Connection, email: &str) -> Result<Option<User>> {
    lookup(
        conn,
        &format!("SELECT {USER_COLUMNS} FROM users WHERE users.email = ?1"),
        email,
    )
}

/// Get a single user by ID.
///
/// # Returns
///
/// * `Ok(Some(User))` - The user if found
/// * `Ok(None)` - If the user does not exist
/// * `Err(Error)` - If a database error occurs
pub fn get_user_with_id(conn: &Connection, id: UserId) -> Result<Option<User>> {
    lookup(
        conn,
        &format!("SELECT {USER_COLUMNS} FROM users WHERE users.id = ?1"),
        id.get(),
    )
}

/// Add a new user and return the stored row.
///
/// # Returns
///
/// * `Ok(User)` - The created user, with its assigned ID
/// * `Err(Error::Conflict)` - If the email is already registered
/// * `Err(Error)` - If a database error occurs
pub fn add_user(conn: &Connection, user: &NewUser) -> Result<User> {
    conn.query_row(
        "INSERT INTO users (name, email, password) VALUES (?1, ?2, ?3)
         RETURNING id, name, email, password",
        rusqlite::params![user.name, user.email, user.password],
        User::from_row,
    )
    .map_err(|e| {
        if e.to_string().contains("UNIQUE constraint failed") {
            Error::conflict(format!("Email '{}' is already registered", user.email))
        } else {
            Error::database(e.to_string())
        }
    })
}
