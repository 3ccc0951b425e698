#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Hospital with ID {0} does not exist.")]
    HospitalNotFound(i64),
    #[error("Patient with ID {0} does not exist.")]
    PatientNotFound(i64),

    #[error("Invalid date format: {0}")]
    InvalidBirthDate(#[from] chrono::ParseError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("failed to run database migrations: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl CoreError {
    /// `true` when the error means a referenced record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CoreError::HospitalNotFound(_) | CoreError::PatientNotFound(_)
        )
    }

    /// `true` when the caller sent a value the service cannot accept.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, CoreError::InvalidBirthDate(_))
    }
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
