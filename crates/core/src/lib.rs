//! # Hospital Core
//!
//! Core business logic for the hospital registry.
//!
//! This crate contains pure data operations over the relational record store:
//! - Hospital and patient create/read/update/delete
//! - Registering patients at hospitals and reading the association from either side
//! - The `dd/mm/yyyy` birth date codec and record-to-response mapping
//!
//! **No API concerns**: authentication, gRPC servers and status codes belong in `api-grpc`
//! or `api-shared`.

pub mod birth_date;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod hospital;
pub mod models;
pub mod patient;
pub mod repositories;
pub mod responses;

#[cfg(test)]
mod test_support;

// Use the shared api-shared crate for generated protobuf types.
pub use api_shared::pb;

pub use config::{AssociationPolicy, CoreConfig};
pub use db::Store;
pub use error::{CoreError, CoreResult};
pub use hospital::HospitalService;
pub use patient::PatientService;
