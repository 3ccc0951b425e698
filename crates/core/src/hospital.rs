//! Hospital service.
//!
//! Pure data operations for hospitals. Every operation returns the wire response message on
//! success or a [`CoreError`] describing why it could not complete; mapping errors onto
//! transport status codes belongs in `api-grpc`.

use crate::config::CoreConfig;
use crate::db::Store;
use crate::error::{CoreError, CoreResult};
use crate::models::{Hospital, NewHospital};
use crate::repositories::{associations, hospitals, patients};
use crate::responses::{hospital_response, list_hospitals_response};
use api_shared::pb;
use std::sync::Arc;

/// Hospital operations over the shared record store.
#[derive(Clone, Debug)]
pub struct HospitalService {
    cfg: Arc<CoreConfig>,
    store: Store,
}

impl HospitalService {
    /// Creates a new instance of HospitalService.
    ///
    /// # Arguments
    ///
    /// * `cfg` - Core configuration; the association policy decides whether deletes cascade.
    /// * `store` - Record store shared with the patient service.
    pub fn new(cfg: Arc<CoreConfig>, store: Store) -> Self {
        Self { cfg, store }
    }

    /// Looks up a single hospital.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::HospitalNotFound`] if no hospital has this id, or
    /// [`CoreError::Database`] if the store cannot be read.
    pub async fn find_by_id(&self, id: i64) -> CoreResult<pb::HospitalResponse> {
        tracing::debug!(hospital_id = id, "finding hospital");
        let hospital = hospitals::find_by_id(self.store.pool(), id)
            .await?
            .ok_or(CoreError::HospitalNotFound(id))?;
        Ok(hospital_response(&hospital))
    }

    /// Lists every stored hospital, ordered by id.
    pub async fn list_all_hospitals(&self) -> CoreResult<pb::ListHospitalsResponse> {
        let all = hospitals::find_all(self.store.pool()).await?;
        Ok(list_hospitals_response(&all))
    }

    /// Lists the hospitals a patient is registered at.
    ///
    /// The patient lookup and the association read share one transaction, so a registration
    /// committed concurrently is either fully visible or not at all.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::PatientNotFound`] if the patient does not exist.
    pub async fn list_hospitals_by_patient_id(
        &self,
        patient_id: i64,
    ) -> CoreResult<pb::ListHospitalsResponse> {
        let mut tx = self.store.begin().await?;

        if patients::find_by_id(&mut *tx, patient_id).await?.is_none() {
            tracing::warn!(patient_id, "listing hospitals for unknown patient");
            return Err(CoreError::PatientNotFound(patient_id));
        }
        let linked = associations::hospitals_for_patient(&mut *tx, patient_id).await?;

        tx.commit().await?;
        Ok(list_hospitals_response(&linked))
    }

    /// Creates a hospital. The store assigns the id; names need not be unique.
    pub async fn create_hospital(
        &self,
        name: String,
        address: String,
    ) -> CoreResult<pb::HospitalResponse> {
        let hospital = hospitals::insert(self.store.pool(), &NewHospital { name, address }).await?;
        tracing::info!(hospital_id = hospital.id, "hospital created");
        Ok(hospital_response(&hospital))
    }

    /// Replaces name and address of the hospital with this id.
    ///
    /// There is no existence check: an unknown id inserts a new row with that id.
    pub async fn update_hospital(
        &self,
        id: i64,
        name: String,
        address: String,
    ) -> CoreResult<pb::HospitalResponse> {
        let hospital =
            hospitals::save(self.store.pool(), &Hospital { id, name, address }).await?;
        tracing::info!(hospital_id = hospital.id, "hospital saved");
        Ok(hospital_response(&hospital))
    }

    /// Deletes a hospital by id.
    ///
    /// A missing id reports `success: false` without touching the store. A present id is
    /// deleted without checking that it exists and always reports `success: true`.
    /// Association rows are left in place unless the policy says to cascade.
    pub async fn delete_hospital(&self, id: Option<i64>) -> CoreResult<pb::DeleteResponse> {
        let Some(id) = id else {
            return Ok(pb::DeleteResponse { success: false });
        };

        if self.cfg.association_policy().cascade_on_delete {
            let mut tx = self.store.begin_write().await?;
            let unlinked = associations::delete_for_hospital(&mut *tx, id).await?;
            hospitals::delete_by_id(&mut *tx, id).await?;
            tx.commit().await?;
            tracing::info!(hospital_id = id, unlinked, "hospital deleted with its associations");
        } else {
            hospitals::delete_by_id(self.store.pool(), id).await?;
            tracing::info!(hospital_id = id, "hospital deleted");
        }

        Ok(pb::DeleteResponse { success: true })
    }
}
