//! User CRUD operations for SQL backends.

use crate::Result;
use crate::store::StoreError;
use crate::user::User;

use super::{SqlxBackend, SqlxResultExt};

type UserRow = (i64, String, String, String, String);

const SELECT_USER: &str = "SELECT id, user_id, password, name, email FROM users";

fn from_row((id, user_id, password, name, email): UserRow) -> User {
    User {
        id: Some(id),
        user_id,
        password,
        name,
        email,
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

pub async fn find_by_user_id(backend: &SqlxBackend, user_id: &str) -> Result<Option<User>> {
    let row: Option<UserRow> = sqlx::query_as(&format!("{SELECT_USER} WHERE user_id = $1"))
        .bind(user_id)
        .fetch_optional(backend.pool())
        .await
        .sql_context("Failed to find user by user_id")?;
    Ok(row.map(from_row))
}

pub async fn find_by_id(backend: &SqlxBackend, id: i64) -> Result<Option<User>> {
    let row: Option<UserRow> = sqlx::query_as(&format!("{SELECT_USER} WHERE id = $1"))
        .bind(id)
        .fetch_optional(backend.pool())
        .await
        .sql_context("Failed to find user by id")?;
    Ok(row.map(from_row))
}

pub async fn find_all(backend: &SqlxBackend) -> Result<Vec<User>> {
    let rows: Vec<UserRow> = sqlx::query_as(&format!("{SELECT_USER} ORDER BY id"))
        .fetch_all(backend.pool())
        .await
        .sql_context("Failed to list users")?;
    Ok(rows.into_iter().map(from_row).collect())
}

/// Insert a new user and return it with the generated id.
pub async fn insert(backend: &SqlxBackend, mut user: User) -> Result<User> {
    let result: std::result::Result<(i64,), sqlx::Error> = sqlx::query_as(
        "INSERT INTO users (user_id, password, name, email)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind(&user.user_id)
    .bind(&user.password)
    .bind(&user.name)
    .bind(&user.email)
    .fetch_one(backend.pool())
    .await;

    match result {
        Ok((id,)) => {
            user.id = Some(id);
            Ok(user)
        }
        Err(e) if is_unique_violation(&e) => Err(StoreError::DuplicateUserId {
            user_id: user.user_id,
        }
        .into()),
        Err(e) => Err(e).sql_context("Failed to insert user"),
    }
}

/// Overwrite the row with `id`.
pub async fn update(backend: &SqlxBackend, id: i64, user: User) -> Result<User> {
    let result = sqlx::query(
        "UPDATE users SET user_id = $1, password = $2, name = $3, email = $4
         WHERE id = $5",
    )
    .bind(&user.user_id)
    .bind(&user.password)
    .bind(&user.name)
    .bind(&user.email)
    .bind(id)
    .execute(backend.pool())
    .await;

    match result {
        Ok(done) if done.rows_affected() == 0 => Err(StoreError::UserNotFound { id }.into()),
        Ok(_) => Ok(user),
        Err(e) if is_unique_violation(&e) => Err(StoreError::DuplicateUserId {
            user_id: user.user_id,
        }
        .into()),
        Err(e) => Err(e).sql_context("Failed to update user"),
    }
}

pub async fn count(backend: &SqlxBackend) -> Result<usize> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(backend.pool())
        .await
        .sql_context("Failed to count users")?;
    Ok(count as usize)
}
