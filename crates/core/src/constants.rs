//! Constants used throughout the hospital core crate.
//!
//! This module contains defaults and wire formats to ensure
//! consistency across the codebase and make maintenance easier.

/// Default database URL when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://hospital.db";

/// Default upper bound for pooled database connections.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Birth dates on the wire are parsed with this `chrono` pattern.
pub const BIRTH_DATE_FORMAT: &str = "%d/%m/%Y";

