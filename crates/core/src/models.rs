//! Stored record types.
//!
//! Records carry only their own columns. The hospital/patient association lives in the
//! `hospital_patient` join table and is read through
//! [`repositories::associations`](crate::repositories::associations), never embedded here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A hospital row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Hospital {
    pub id: i64,
    pub name: String,
    pub address: String,
}

/// A patient row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Patient {
    pub id: i64,
    pub name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    /// Free-form, not validated against any code list.
    pub sex: String,
}

/// Column values for a hospital that has not been assigned an id yet.
#[derive(Clone, Debug)]
pub struct NewHospital {
    pub name: String,
    pub address: String,
}

/// Column values for a patient that has not been assigned an id yet.
#[derive(Clone, Debug)]
pub struct NewPatient {
    pub name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub sex: String,
}
