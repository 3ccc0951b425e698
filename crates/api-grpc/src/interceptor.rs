//! API-key interceptor shared by both endpoints.

use api_shared::auth::{self, API_KEY_HEADER};
use std::sync::Arc;
use tonic::service::Interceptor;
use tonic::{Request, Status};

/// Checks the `x-api-key` metadata entry against the key configured at startup.
///
/// With no key configured every call passes through.
#[derive(Clone, Debug, Default)]
pub struct ApiKeyInterceptor {
    expected: Option<Arc<str>>,
}

impl ApiKeyInterceptor {
    pub fn new(expected: Option<String>) -> Self {
        Self {
            expected: expected.map(Arc::from),
        }
    }
}

impl Interceptor for ApiKeyInterceptor {
    fn call(&mut self, req: Request<()>) -> Result<Request<()>, Status> {
        let provided = req
            .metadata()
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok());

        auth::validate_api_key(provided, self.expected.as_deref())?;
        Ok(req)
    }
}
