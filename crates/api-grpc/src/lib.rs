//! # API gRPC
//!
//! gRPC server implementation for the hospital registry.
//!
//! Handles:
//! - `HospitalServiceEndpoint` and `PatientServiceEndpoint` implementations using
//!   `hospital-core` for data operations
//! - Mapping core errors to gRPC status codes
//! - gRPC-specific concerns (API-key interceptor, reflection, tonic integration)
//!
//! Uses `api-shared` for the generated protobuf types.

#![warn(rust_2018_idioms)]

pub use api_shared::pb;
pub use hospital::HospitalEndpoint;
pub use interceptor::ApiKeyInterceptor;
pub use patient::PatientEndpoint;
pub use server::{serve, GrpcConfig};
pub use status::status_from_core;

pub mod hospital;
pub mod interceptor;
pub mod patient;
pub mod server;
pub mod status;

#[cfg(test)]
mod test_support;
