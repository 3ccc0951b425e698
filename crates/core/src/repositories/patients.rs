//! Queries against the `patients` table.

use crate::models::{NewPatient, Patient};
use sqlx::SqliteExecutor;

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<Patient>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Patient>(
        "SELECT id, name, last_name, birth_date, sex FROM patients WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn find_all<'e, E>(executor: E) -> Result<Vec<Patient>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Patient>(
        "SELECT id, name, last_name, birth_date, sex FROM patients ORDER BY id",
    )
    .fetch_all(executor)
    .await
}

pub async fn exists_by_id<'e, E>(executor: E, id: i64) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let found: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM patients WHERE id = ?")
        .bind(id)
        .fetch_one(executor)
        .await?;
    Ok(found > 0)
}

/// Insert a new row and return it with its assigned id.
pub async fn insert<'e, E>(executor: E, patient: &NewPatient) -> Result<Patient, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Patient>(
        "INSERT INTO patients (name, last_name, birth_date, sex) VALUES (?, ?, ?, ?) \
         RETURNING id, name, last_name, birth_date, sex",
    )
    .bind(&patient.name)
    .bind(&patient.last_name)
    .bind(patient.birth_date)
    .bind(&patient.sex)
    .fetch_one(executor)
    .await
}

/// Upsert keyed by id: inserts when absent, replaces every column when present.
pub async fn save<'e, E>(executor: E, patient: &Patient) -> Result<Patient, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Patient>(
        "INSERT INTO patients (id, name, last_name, birth_date, sex) VALUES (?, ?, ?, ?, ?) \
         ON CONFLICT(id) DO UPDATE SET name = excluded.name, last_name = excluded.last_name, \
         birth_date = excluded.birth_date, sex = excluded.sex \
         RETURNING id, name, last_name, birth_date, sex",
    )
    .bind(patient.id)
    .bind(&patient.name)
    .bind(&patient.last_name)
    .bind(patient.birth_date)
    .bind(&patient.sex)
    .fetch_one(executor)
    .await
}

/// Returns the number of rows removed (0 or 1).
pub async fn delete_by_id<'e, E>(executor: E, id: i64) -> Result<u64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM patients WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
