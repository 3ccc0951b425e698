/// Metadata key carrying the API key on every gRPC call.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Validates the provided API key against the key configured at startup.
///
/// When no key is configured authentication is disabled and every caller is accepted.
///
/// Returns `Ok(())` if the key is valid, or `Unauthenticated` if it is missing or wrong.
#[allow(clippy::result_large_err)]
pub fn validate_api_key(
    provided_key: Option<&str>,
    expected_key: Option<&str>,
) -> Result<(), tonic::Status> {
    let Some(expected_key) = expected_key else {
        return Ok(());
    };

    match provided_key {
        Some(key) if key == expected_key => Ok(()),
        Some(_) => Err(tonic::Status::unauthenticated("Invalid API key")),
        None => Err(tonic::Status::unauthenticated("Missing x-api-key header")),
    }
}
