//! Queries against the `hospital_patient` join table.
//!
//! The join table is the only record of the association. "Patients of a hospital" and
//! "hospitals of a patient" are both read from it, joined against the entity table so that
//! rows left behind by a deleted hospital or patient are never returned. Repeated
//! registrations are separate rows and therefore show up once per registration, in
//! registration order.

use crate::models::{Hospital, Patient};
use sqlx::SqliteExecutor;

/// Append one edge. No uniqueness check is made here.
pub async fn add_link<'e, E>(
    executor: E,
    hospital_id: i64,
    patient_id: i64,
) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query("INSERT INTO hospital_patient (hospital_id, patient_id) VALUES (?, ?)")
        .bind(hospital_id)
        .bind(patient_id)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn link_exists<'e, E>(
    executor: E,
    hospital_id: i64,
    patient_id: i64,
) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let found: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM hospital_patient WHERE hospital_id = ? AND patient_id = ?",
    )
    .bind(hospital_id)
    .bind(patient_id)
    .fetch_one(executor)
    .await?;
    Ok(found > 0)
}

pub async fn patients_for_hospital<'e, E>(
    executor: E,
    hospital_id: i64,
) -> Result<Vec<Patient>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Patient>(
        "SELECT p.id, p.name, p.last_name, p.birth_date, p.sex \
         FROM hospital_patient hp \
         JOIN patients p ON p.id = hp.patient_id \
         WHERE hp.hospital_id = ? \
         ORDER BY hp.rowid",
    )
    .bind(hospital_id)
    .fetch_all(executor)
    .await
}

pub async fn hospitals_for_patient<'e, E>(
    executor: E,
    patient_id: i64,
) -> Result<Vec<Hospital>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Hospital>(
        "SELECT h.id, h.name, h.address \
         FROM hospital_patient hp \
         JOIN hospitals h ON h.id = hp.hospital_id \
         WHERE hp.patient_id = ? \
         ORDER BY hp.rowid",
    )
    .bind(patient_id)
    .fetch_all(executor)
    .await
}

/// Returns the number of edges removed.
pub async fn delete_for_hospital<'e, E>(executor: E, hospital_id: i64) -> Result<u64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM hospital_patient WHERE hospital_id = ?")
        .bind(hospital_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

/// Returns the number of edges removed.
pub async fn delete_for_patient<'e, E>(executor: E, patient_id: i64) -> Result<u64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM hospital_patient WHERE patient_id = ?")
        .bind(patient_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

/// Total number of edges. Used to observe duplicate registrations.
pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_scalar("SELECT COUNT(*) FROM hospital_patient")
        .fetch_one(executor)
        .await
}
