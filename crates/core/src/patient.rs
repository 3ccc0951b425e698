//! Patient service and related types.
//!
//! This module provides the service for patient operations, including registering a patient
//! at a hospital. Birth dates arrive as `dd/mm/yyyy` text and are parsed here, so a malformed
//! date is rejected before anything reaches the store.

use crate::birth_date;
use crate::config::CoreConfig;
use crate::db::Store;
use crate::error::{CoreError, CoreResult};
use crate::models::{NewPatient, Patient};
use crate::repositories::{associations, hospitals, patients};
use crate::responses::{list_patients_response, patient_response};
use api_shared::pb;
use std::sync::Arc;

/// Patient operations over the shared record store.
#[derive(Clone, Debug)]
pub struct PatientService {
    cfg: Arc<CoreConfig>,
    store: Store,
}

impl PatientService {
    /// Creates a new instance of PatientService.
    ///
    /// # Arguments
    ///
    /// * `cfg` - Core configuration; the association policy governs repeat registrations and
    ///   whether deletes cascade.
    /// * `store` - Record store shared with the hospital service.
    pub fn new(cfg: Arc<CoreConfig>, store: Store) -> Self {
        Self { cfg, store }
    }

    /// Looks up a single patient.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::PatientNotFound`] if no patient has this id.
    pub async fn find_by_id(&self, id: i64) -> CoreResult<pb::PatientResponse> {
        tracing::debug!(patient_id = id, "finding patient");
        let patient = patients::find_by_id(self.store.pool(), id)
            .await?
            .ok_or(CoreError::PatientNotFound(id))?;
        Ok(patient_response(&patient))
    }

    /// Lists every stored patient, ordered by id.
    pub async fn list_all_patients(&self) -> CoreResult<pb::ListPatientsResponse> {
        let all = patients::find_all(self.store.pool()).await?;
        Ok(list_patients_response(&all))
    }

    /// Lists the patients registered at a hospital.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::HospitalNotFound`] if the hospital does not exist.
    pub async fn list_patients_by_hospital_id(
        &self,
        hospital_id: i64,
    ) -> CoreResult<pb::ListPatientsResponse> {
        let mut tx = self.store.begin().await?;

        if hospitals::find_by_id(&mut *tx, hospital_id).await?.is_none() {
            tracing::warn!(hospital_id, "listing patients for unknown hospital");
            return Err(CoreError::HospitalNotFound(hospital_id));
        }
        let linked = associations::patients_for_hospital(&mut *tx, hospital_id).await?;

        tx.commit().await?;
        Ok(list_patients_response(&linked))
    }

    /// Registers a patient at a hospital by appending one association edge.
    ///
    /// Both lookups and the insert run in one write transaction, so concurrent registrations
    /// queue behind each other and none of them is lost. With the default policy a repeated
    /// registration adds another edge; when duplicates are disallowed it is a successful no-op.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::PatientNotFound`] or [`CoreError::HospitalNotFound`], checked in
    /// that order. Nothing is written in either case.
    pub async fn register_patient_in_hospital(
        &self,
        patient_id: i64,
        hospital_id: i64,
    ) -> CoreResult<pb::RegisterPatientResponse> {
        let mut tx = self.store.begin_write().await?;

        if patients::find_by_id(&mut *tx, patient_id).await?.is_none() {
            tracing::warn!(patient_id, hospital_id, "registering unknown patient");
            return Err(CoreError::PatientNotFound(patient_id));
        }
        if hospitals::find_by_id(&mut *tx, hospital_id).await?.is_none() {
            tracing::warn!(patient_id, hospital_id, "registering at unknown hospital");
            return Err(CoreError::HospitalNotFound(hospital_id));
        }

        let policy = self.cfg.association_policy();
        if !policy.allow_duplicate_registrations
            && associations::link_exists(&mut *tx, hospital_id, patient_id).await?
        {
            tracing::debug!(patient_id, hospital_id, "patient already registered");
        } else {
            associations::add_link(&mut *tx, hospital_id, patient_id).await?;
            tracing::info!(patient_id, hospital_id, "patient registered in hospital");
        }

        tx.commit().await?;
        Ok(pb::RegisterPatientResponse { success: true })
    }

    /// Creates a patient from wire values.
    ///
    /// # Arguments
    ///
    /// * `birth_date_text` - `dd/mm/yyyy`; day and month may omit the leading zero.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidBirthDate`] if `birth_date_text` does not parse. Nothing is
    /// stored in that case.
    pub async fn create_patient(
        &self,
        name: String,
        last_name: String,
        sex: String,
        birth_date_text: &str,
    ) -> CoreResult<pb::PatientResponse> {
        let birth_date = birth_date::parse(birth_date_text)?;

        let patient = patients::insert(
            self.store.pool(),
            &NewPatient {
                name,
                last_name,
                birth_date,
                sex,
            },
        )
        .await?;
        tracing::info!(patient_id = patient.id, "patient created");
        Ok(patient_response(&patient))
    }

    /// Replaces every field of the patient with this id.
    ///
    /// Same date contract as [`create_patient`](Self::create_patient). There is no existence
    /// check: an unknown id inserts a new row with that id.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidBirthDate`] if `birth_date_text` does not parse.
    pub async fn update_patient(
        &self,
        id: i64,
        name: String,
        last_name: String,
        sex: String,
        birth_date_text: &str,
    ) -> CoreResult<pb::PatientResponse> {
        let birth_date = birth_date::parse(birth_date_text)?;

        let patient = patients::save(
            self.store.pool(),
            &Patient {
                id,
                name,
                last_name,
                birth_date,
                sex,
            },
        )
        .await?;
        tracing::info!(patient_id = patient.id, "patient saved");
        Ok(patient_response(&patient))
    }

    /// Deletes a patient if it exists.
    ///
    /// Unlike hospital deletes this checks existence first: a missing id or an unknown patient
    /// reports `success: false` and nothing is deleted.
    pub async fn delete_patient(&self, id: Option<i64>) -> CoreResult<pb::DeleteResponse> {
        let Some(id) = id else {
            return Ok(pb::DeleteResponse { success: false });
        };

        let mut tx = self.store.begin_write().await?;
        if !patients::exists_by_id(&mut *tx, id).await? {
            tracing::debug!(patient_id = id, "nothing to delete");
            return Ok(pb::DeleteResponse { success: false });
        }

        if self.cfg.association_policy().cascade_on_delete {
            let unlinked = associations::delete_for_patient(&mut *tx, id).await?;
            tracing::debug!(patient_id = id, unlinked, "removed patient associations");
        }
        patients::delete_by_id(&mut *tx, id).await?;
        tx.commit().await?;

        tracing::info!(patient_id = id, "patient deleted");
        Ok(pb::DeleteResponse { success: true })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AssociationPolicy;
    use crate::test_support::{file_services, services};
    use tempfile::TempDir;

    #[tokio::test]
    async fn create_patient_re_encodes_birth_date() {
        let (_, patients) = services(AssociationPolicy::default()).await;

        let created = patients
            .create_patient("testName".into(), "testLastName".into(), "male".into(), "11/4/1999")
            .await
            .unwrap();

        assert_eq!(created.birth_date, "11/4/1999");
        assert_eq!(patients.find_by_id(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn create_patient_drops_zero_padding_on_output() {
        let (_, patients) = services(AssociationPolicy::default()).await;

        let created = patients
            .create_patient("A".into(), "B".into(), "x".into(), "01/04/1999")
            .await
            .unwrap();

        assert_eq!(created.birth_date, "1/4/1999");
    }

    #[tokio::test]
    async fn create_patient_with_bad_date_stores_nothing() {
        let (_, patients) = services(AssociationPolicy::default()).await;

        let err = patients
            .create_patient("A".into(), "B".into(), "x".into(), "not-a-date")
            .await
            .unwrap_err();

        assert!(err.is_invalid_argument());
        assert!(err.to_string().starts_with("Invalid date format: "));
        assert!(patients.list_all_patients().await.unwrap().patients.is_empty());
    }

    #[tokio::test]
    async fn update_patient_with_bad_date_leaves_record_unchanged() {
        let (_, patients) = services(AssociationPolicy::default()).await;
        let created = patients
            .create_patient("A".into(), "B".into(), "x".into(), "2/3/1980")
            .await
            .unwrap();

        let err = patients
            .update_patient(created.id, "C".into(), "D".into(), "y".into(), "32/1/1980")
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::InvalidBirthDate(_)));
        assert_eq!(patients.find_by_id(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn update_patient_replaces_all_fields() {
        let (_, patients) = services(AssociationPolicy::default()).await;
        let created = patients
            .create_patient("A".into(), "B".into(), "x".into(), "2/3/1980")
            .await
            .unwrap();

        let updated = patients
            .update_patient(created.id, "C".into(), "D".into(), "y".into(), "05/06/1990")
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "C");
        assert_eq!(updated.last_name, "D");
        assert_eq!(updated.sex, "y");
        assert_eq!(updated.birth_date, "5/6/1990");
    }

    #[tokio::test]
    async fn find_unknown_patient_is_not_found() {
        let (_, patients) = services(AssociationPolicy::default()).await;

        let err = patients.find_by_id(1).await.unwrap_err();
        assert!(matches!(err, CoreError::PatientNotFound(1)));
    }

    #[tokio::test]
    async fn delete_absent_patient_reports_failure() {
        let (_, patients) = services(AssociationPolicy::default()).await;
        let kept = patients
            .create_patient("A".into(), "B".into(), "x".into(), "1/1/2000")
            .await
            .unwrap();

        let res = patients.delete_patient(Some(kept.id + 100)).await.unwrap();

        assert!(!res.success);
        assert_eq!(patients.list_all_patients().await.unwrap().patients, vec![kept]);
    }

    #[tokio::test]
    async fn delete_without_id_reports_failure() {
        let (_, patients) = services(AssociationPolicy::default()).await;

        let res = patients.delete_patient(None).await.unwrap();
        assert!(!res.success);
    }

    #[tokio::test]
    async fn delete_present_patient_makes_it_unfindable() {
        let (_, patients) = services(AssociationPolicy::default()).await;
        let created = patients
            .create_patient("A".into(), "B".into(), "x".into(), "1/1/2000")
            .await
            .unwrap();

        let res = patients.delete_patient(Some(created.id)).await.unwrap();

        assert!(res.success);
        assert!(patients.find_by_id(created.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn registration_is_visible_from_both_sides() {
        let (hospitals, patients) = services(AssociationPolicy::default()).await;
        let h = hospitals.create_hospital("H".into(), "A".into()).await.unwrap();
        let p = patients
            .create_patient("P".into(), "Q".into(), "f".into(), "3/3/1970")
            .await
            .unwrap();

        let res = patients.register_patient_in_hospital(p.id, h.id).await.unwrap();
        assert!(res.success);

        let by_hospital = patients.list_patients_by_hospital_id(h.id).await.unwrap();
        assert!(by_hospital.patients.iter().any(|x| x.id == p.id));

        let by_patient = hospitals.list_hospitals_by_patient_id(p.id).await.unwrap();
        assert!(by_patient.hospitals.iter().any(|x| x.id == h.id));
    }

    #[tokio::test]
    async fn register_unknown_patient_is_not_found_and_writes_nothing() {
        let (hospitals, patients) = services(AssociationPolicy::default()).await;
        let h = hospitals.create_hospital("H".into(), "A".into()).await.unwrap();

        let err = patients.register_patient_in_hospital(77, h.id).await.unwrap_err();

        assert!(matches!(err, CoreError::PatientNotFound(77)));
        assert_eq!(associations::count(patients.store.pool()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn register_at_unknown_hospital_is_not_found() {
        let (_, patients) = services(AssociationPolicy::default()).await;
        let p = patients
            .create_patient("P".into(), "Q".into(), "f".into(), "3/3/1970")
            .await
            .unwrap();

        let err = patients.register_patient_in_hospital(p.id, 88).await.unwrap_err();

        assert!(matches!(err, CoreError::HospitalNotFound(88)));
        assert_eq!(associations::count(patients.store.pool()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn repeated_registration_creates_duplicate_edges_by_default() {
        let (hospitals, patients) = services(AssociationPolicy::default()).await;
        let h = hospitals.create_hospital("H".into(), "A".into()).await.unwrap();
        let p = patients
            .create_patient("P".into(), "Q".into(), "f".into(), "3/3/1970")
            .await
            .unwrap();

        patients.register_patient_in_hospital(p.id, h.id).await.unwrap();
        patients.register_patient_in_hospital(p.id, h.id).await.unwrap();

        let listed = patients.list_patients_by_hospital_id(h.id).await.unwrap();
        assert_eq!(listed.patients.len(), 2);
    }

    #[tokio::test]
    async fn repeated_registration_is_a_no_op_when_duplicates_are_disallowed() {
        let policy = AssociationPolicy {
            allow_duplicate_registrations: false,
            ..AssociationPolicy::default()
        };
        let (hospitals, patients) = services(policy).await;
        let h = hospitals.create_hospital("H".into(), "A".into()).await.unwrap();
        let p = patients
            .create_patient("P".into(), "Q".into(), "f".into(), "3/3/1970")
            .await
            .unwrap();

        patients.register_patient_in_hospital(p.id, h.id).await.unwrap();
        let res = patients.register_patient_in_hospital(p.id, h.id).await.unwrap();

        assert!(res.success);
        let listed = patients.list_patients_by_hospital_id(h.id).await.unwrap();
        assert_eq!(listed.patients.len(), 1);
    }

    #[tokio::test]
    async fn list_by_unknown_hospital_is_not_found() {
        let (_, patients) = services(AssociationPolicy::default()).await;

        let err = patients.list_patients_by_hospital_id(9).await.unwrap_err();
        assert_eq!(err.to_string(), "Hospital with ID 9 does not exist.");
    }

    #[tokio::test]
    async fn deleted_patient_is_hidden_from_hospital_view() {
        let (hospitals, patients) = services(AssociationPolicy::default()).await;
        let h = hospitals.create_hospital("H".into(), "A".into()).await.unwrap();
        let p = patients
            .create_patient("P".into(), "Q".into(), "f".into(), "3/3/1970")
            .await
            .unwrap();
        patients.register_patient_in_hospital(p.id, h.id).await.unwrap();

        patients.delete_patient(Some(p.id)).await.unwrap();

        let listed = patients.list_patients_by_hospital_id(h.id).await.unwrap();
        assert!(listed.patients.is_empty());
        assert_eq!(associations::count(patients.store.pool()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn cascading_patient_delete_removes_edges() {
        let policy = AssociationPolicy {
            cascade_on_delete: true,
            ..AssociationPolicy::default()
        };
        let (hospitals, patients) = services(policy).await;
        let h = hospitals.create_hospital("H".into(), "A".into()).await.unwrap();
        let p = patients
            .create_patient("P".into(), "Q".into(), "f".into(), "3/3/1970")
            .await
            .unwrap();
        patients.register_patient_in_hospital(p.id, h.id).await.unwrap();

        assert!(patients.delete_patient(Some(p.id)).await.unwrap().success);
        assert_eq!(associations::count(patients.store.pool()).await.unwrap(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_registrations_at_one_hospital_are_all_kept() {
        let dir = TempDir::new().unwrap();
        let (hospitals, patients) = file_services(&dir, AssociationPolicy::default()).await;
        let h = hospitals.create_hospital("H".into(), "A".into()).await.unwrap();

        let mut ids = Vec::new();
        for i in 0..40 {
            let p = patients
                .create_patient(format!("P{i}"), "Q".into(), "f".into(), "3/3/1970")
                .await
                .unwrap();
            ids.push(p.id);
        }

        let hospital_id = h.id;
        let handles: Vec<_> = ids
            .iter()
            .map(|&patient_id| {
                let patients = patients.clone();
                tokio::spawn(async move {
                    patients.register_patient_in_hospital(patient_id, hospital_id).await
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.await.unwrap().unwrap().success);
        }

        let listed = patients.list_patients_by_hospital_id(h.id).await.unwrap();
        let mut listed_ids: Vec<i64> = listed.patients.iter().map(|p| p.id).collect();
        listed_ids.sort_unstable();
        assert_eq!(listed_ids, ids);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_repeats_keep_one_edge_when_duplicates_are_disallowed() {
        let dir = TempDir::new().unwrap();
        let policy = AssociationPolicy {
            allow_duplicate_registrations: false,
            ..AssociationPolicy::default()
        };
        let (hospitals, patients) = file_services(&dir, policy).await;
        let h = hospitals.create_hospital("H".into(), "A".into()).await.unwrap();
        let p = patients
            .create_patient("P".into(), "Q".into(), "f".into(), "3/3/1970")
            .await
            .unwrap();

        let (patient_id, hospital_id) = (p.id, h.id);
        let handles: Vec<_> = (0..20)
            .map(|_| {
                let patients = patients.clone();
                tokio::spawn(async move {
                    patients.register_patient_in_hospital(patient_id, hospital_id).await
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.await.unwrap().unwrap().success);
        }

        let listed = patients.list_patients_by_hospital_id(h.id).await.unwrap();
        assert_eq!(listed.patients.len(), 1);
        assert_eq!(associations::count(patients.store.pool()).await.unwrap(), 1);
    }
}
