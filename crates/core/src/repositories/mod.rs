//! Record store access.
//!
//! Each module holds the SQL for one table. Functions are generic over
//! [`sqlx::SqliteExecutor`] so the services can run them straight on the pool or inside a
//! transaction.

pub mod associations;
pub mod hospitals;
pub mod patients;
