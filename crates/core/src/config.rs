//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. The intent is to avoid reading process-wide environment variables
//! during request handling, which can lead to inconsistent behaviour in multi-threaded runtimes
//! and test harnesses. Binaries read the environment and hand the raw values to the
//! `*_from_env_value` helpers below.

use crate::constants::{DEFAULT_DATABASE_URL, DEFAULT_MAX_CONNECTIONS};
use crate::{CoreError, CoreResult};

/// How the hospital/patient association behaves around repeated registrations and deletes.
///
/// The defaults keep every registration as its own edge and leave association rows in place
/// when a hospital or patient is deleted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssociationPolicy {
    /// Registering an already-registered pair inserts another edge.
    pub allow_duplicate_registrations: bool,
    /// Deleting a hospital or patient also deletes its association rows.
    pub cascade_on_delete: bool,
}

impl Default for AssociationPolicy {
    fn default() -> Self {
        Self {
            allow_duplicate_registrations: true,
            cascade_on_delete: false,
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    database_url: String,
    max_connections: u32,
    association_policy: AssociationPolicy,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] if the database URL is blank or
    /// `max_connections` is zero.
    pub fn new(
        database_url: String,
        max_connections: u32,
        association_policy: AssociationPolicy,
    ) -> CoreResult<Self> {
        if database_url.trim().is_empty() {
            return Err(CoreError::InvalidConfig(
                "database_url cannot be empty".into(),
            ));
        }
        if max_connections == 0 {
            return Err(CoreError::InvalidConfig(
                "max_connections must be at least 1".into(),
            ));
        }

        Ok(Self {
            database_url,
            max_connections,
            association_policy,
        })
    }

    /// Configuration for a private in-memory database.
    ///
    /// Pooled connections share one in-memory database through SQLite's shared cache, where a
    /// lock conflict fails with `SQLITE_LOCKED` rather than waiting on the busy timeout. One
    /// connection keeps every call serialised.
    pub fn in_memory(association_policy: AssociationPolicy) -> Self {
        Self {
            database_url: "sqlite::memory:".into(),
            max_connections: 1,
            association_policy,
        }
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn max_connections(&self) -> u32 {
        self.max_connections
    }

    pub fn association_policy(&self) -> AssociationPolicy {
        self.association_policy
    }

    /// `true` when the URL points at an in-memory SQLite database.
    pub fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }
}

/// Resolve the database URL from an optional raw value, falling back to the default.
pub fn database_url_from_env_value(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.into())
}

/// Parse the pool size from an optional raw value.
///
/// `None` or blank yields [`DEFAULT_MAX_CONNECTIONS`].
pub fn max_connections_from_env_value(value: Option<String>) -> CoreResult<u32> {
    let Some(raw) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) else {
        return Ok(DEFAULT_MAX_CONNECTIONS);
    };

    raw.parse::<u32>()
        .map_err(|e| CoreError::InvalidConfig(format!("invalid max connections {raw:?}: {e}")))
}

/// Parse a boolean flag from an optional raw value.
///
/// Accepts `true/false/1/0/yes/no` in any case. `None` or blank yields `default`.
pub fn bool_from_env_value(name: &str, value: Option<String>, default: bool) -> CoreResult<bool> {
    let Some(raw) = value.map(|v| v.trim().to_ascii_lowercase()).filter(|v| !v.is_empty()) else {
        return Ok(default);
    };

    match raw.as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(CoreError::InvalidConfig(format!(
            "{name} must be a boolean, got {raw:?}"
        ))),
    }
}

/// Build an [`AssociationPolicy`] from the raw values of
/// `ALLOW_DUPLICATE_REGISTRATIONS` and `CASCADE_ASSOCIATIONS_ON_DELETE`.
pub fn association_policy_from_env_values(
    allow_duplicates: Option<String>,
    cascade_on_delete: Option<String>,
) -> CoreResult<AssociationPolicy> {
    let defaults = AssociationPolicy::default();
    Ok(AssociationPolicy {
        allow_duplicate_registrations: bool_from_env_value(
            "ALLOW_DUPLICATE_REGISTRATIONS",
            allow_duplicates,
            defaults.allow_duplicate_registrations,
        )?,
        cascade_on_delete: bool_from_env_value(
            "CASCADE_ASSOCIATIONS_ON_DELETE",
            cascade_on_delete,
            defaults.cascade_on_delete,
        )?,
    })
}
