//! Queries against the `hospitals` table.

use crate::models::{Hospital, NewHospital};
use sqlx::SqliteExecutor;

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<Hospital>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Hospital>("SELECT id, name, address FROM hospitals WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn find_all<'e, E>(executor: E) -> Result<Vec<Hospital>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Hospital>("SELECT id, name, address FROM hospitals ORDER BY id")
        .fetch_all(executor)
        .await
}

/// Insert a new row and return it with its assigned id.
pub async fn insert<'e, E>(executor: E, hospital: &NewHospital) -> Result<Hospital, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Hospital>(
        "INSERT INTO hospitals (name, address) VALUES (?, ?) RETURNING id, name, address",
    )
    .bind(&hospital.name)
    .bind(&hospital.address)
    .fetch_one(executor)
    .await
}

/// Upsert keyed by id: inserts when absent, replaces every column when present.
pub async fn save<'e, E>(executor: E, hospital: &Hospital) -> Result<Hospital, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Hospital>(
        "INSERT INTO hospitals (id, name, address) VALUES (?, ?, ?) \
         ON CONFLICT(id) DO UPDATE SET name = excluded.name, address = excluded.address \
         RETURNING id, name, address",
    )
    .bind(hospital.id)
    .bind(&hospital.name)
    .bind(&hospital.address)
    .fetch_one(executor)
    .await
}

/// Returns the number of rows removed (0 or 1).
pub async fn delete_by_id<'e, E>(executor: E, id: i64) -> Result<u64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM hospitals WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
