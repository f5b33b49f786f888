/*
 * Responsibility
 * - accounts table queries (SQLx)
 * - read-only: accounts are created and edited elsewhere
 *
 * Schema
 *   accounts(id TEXT PRIMARY KEY, kind TEXT NOT NULL, telegram_id TEXT UNIQUE NULL)
 *   kind is 'admin' or 'user'
 */
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

#[derive(Debug, FromRow)]
pub struct AccountRow {
    pub id: String,
    pub kind: String,
}

pub async fn get(db: &PgPool, id: &str) -> Result<Option<AccountRow>, RepoError> {
    let row = sqlx::query_as::<_, AccountRow>(
        r#"
        SELECT id, kind
        FROM accounts
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn get_by_telegram_id(
    db: &PgPool,
    telegram_id: &str,
) -> Result<Option<AccountRow>, RepoError> {
    let row = sqlx::query_as::<_, AccountRow>(
        r#"
        SELECT id, kind
        FROM accounts
        WHERE telegram_id = $1
        "#,
    )
    .bind(telegram_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}
