//! # API Shared
//!
//! Shared definitions for the hospital registry APIs.
//!
//! Contains:
//! - Protobuf-generated types and server traits (`pb` module)
//! - The encoded file-descriptor set used for gRPC reflection
//! - Authentication utilities (API-key validation)
//!
//! Used by `hospital-core` for response messages and by `api-grpc` for the endpoints.

// Re-export the generated protobuf module. The generated code will be placed
// into OUT_DIR at build time by the build script.
pub mod pb {
    tonic::include_proto!("hospital.v1");
}

pub mod auth;

pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("proto_descriptor");

pub use pb::*;
