//! Mapping from core errors to gRPC status codes.

use hospital_core::CoreError;
use tonic::Status;

/// Convert a core error into the single terminal status of a call.
///
/// Missing records become `NOT_FOUND`, malformed birth dates `INVALID_ARGUMENT`, and
/// everything else `INTERNAL` with the cause appended.
pub fn status_from_core(err: CoreError) -> Status {
    if err.is_not_found() {
        Status::not_found(err.to_string())
    } else if err.is_invalid_argument() {
        Status::invalid_argument(err.to_string())
    } else {
        tracing::error!("internal error: {}", err);
        Status::internal(format!("Internal error occurred: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::Code;

    #[test]
    fn not_found_keeps_message() {
        let status = status_from_core(CoreError::HospitalNotFound(3));
        assert_eq!(status.code(), Code::NotFound);
        assert_eq!(status.message(), "Hospital with ID 3 does not exist.");

        let status = status_from_core(CoreError::PatientNotFound(4));
        assert_eq!(status.code(), Code::NotFound);
        assert_eq!(status.message(), "Patient with ID 4 does not exist.");
    }

    #[test]
    fn bad_birth_date_is_invalid_argument() {
        let parse_err = hospital_core::birth_date::parse("nope").unwrap_err();
        let status = status_from_core(CoreError::InvalidBirthDate(parse_err));
        assert_eq!(status.code(), Code::InvalidArgument);
        assert!(status.message().starts_with("Invalid date format: "));
    }

    #[test]
    fn anything_else_is_internal_with_cause() {
        let status = status_from_core(CoreError::InvalidConfig("pool exhausted".into()));
        assert_eq!(status.code(), Code::Internal);
        assert_eq!(
            status.message(),
            "Internal error occurred: invalid configuration: pool exhausted"
        );
    }
}
