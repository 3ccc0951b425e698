//! Endpoint fixtures backed by an in-memory store.

use crate::{HospitalEndpoint, PatientEndpoint};
use hospital_core::{AssociationPolicy, CoreConfig, HospitalService, PatientService, Store};
use std::sync::Arc;

pub(crate) async fn endpoints_over() -> (Store, HospitalEndpoint, PatientEndpoint) {
    let cfg = Arc::new(CoreConfig::in_memory(AssociationPolicy::default()));
    let store = Store::connect(&cfg).await.expect("in-memory store");
    (
        store.clone(),
        HospitalEndpoint::new(HospitalService::new(cfg.clone(), store.clone())),
        PatientEndpoint::new(PatientService::new(cfg, store)),
    )
}

pub(crate) async fn endpoints() -> (HospitalEndpoint, PatientEndpoint) {
    let (_, hospitals, patients) = endpoints_over().await;
    (hospitals, patients)
}
