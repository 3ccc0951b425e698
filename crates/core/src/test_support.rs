//! Shared fixtures for the service tests.

use crate::config::{AssociationPolicy, CoreConfig};
use crate::db::Store;
use crate::hospital::HospitalService;
use crate::patient::PatientService;
use std::sync::Arc;
use tempfile::TempDir;

/// A fresh, migrated in-memory store.
pub(crate) async fn connect(policy: AssociationPolicy) -> (Arc<CoreConfig>, Store) {
    let cfg = Arc::new(CoreConfig::in_memory(policy));
    let store = Store::connect(&cfg).await.expect("in-memory store");
    (cfg, store)
}

/// Hospital and patient services sharing one in-memory store.
pub(crate) async fn services(policy: AssociationPolicy) -> (HospitalService, PatientService) {
    let (cfg, store) = connect(policy).await;
    (
        HospitalService::new(cfg.clone(), store.clone()),
        PatientService::new(cfg, store),
    )
}

/// Services over a database file in `dir`, with a pool of several connections.
pub(crate) async fn file_services(
    dir: &TempDir,
    policy: AssociationPolicy,
) -> (HospitalService, PatientService) {
    let url = format!("sqlite://{}", dir.path().join("hospital.db").display());
    let cfg = Arc::new(CoreConfig::new(url, 5, policy).expect("file config"));
    let store = Store::connect(&cfg).await.expect("file store");
    (
        HospitalService::new(cfg.clone(), store.clone()),
        PatientService::new(cfg, store),
    )
}
