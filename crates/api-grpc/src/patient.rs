//! `PatientServiceEndpoint` implementation.

use crate::status::status_from_core;
use api_shared::pb::{
    patient_service_endpoint_server::PatientServiceEndpoint, CreatePatientRequest,
    DeletePatientRequest, DeleteResponse, FindByIdRequest, ListByHospitalIdRequest,
    ListPatientsResponse, PatientResponse, RegisterPatientRequest, RegisterPatientResponse,
    UpdatePatientRequest,
};
use hospital_core::PatientService;
use tonic::{Request, Response, Status};

#[derive(Clone, Debug)]
pub struct PatientEndpoint {
    patients: PatientService,
}

impl PatientEndpoint {
    pub fn new(patients: PatientService) -> Self {
        Self { patients }
    }
}

#[tonic::async_trait]
impl PatientServiceEndpoint for PatientEndpoint {
    async fn find_by_id(
        &self,
        req: Request<FindByIdRequest>,
    ) -> Result<Response<PatientResponse>, Status> {
        let req = req.into_inner();
        self.patients
            .find_by_id(req.id)
            .await
            .map(Response::new)
            .map_err(status_from_core)
    }

    async fn register_patient_in_hospital(
        &self,
        req: Request<RegisterPatientRequest>,
    ) -> Result<Response<RegisterPatientResponse>, Status> {
        let req = req.into_inner();
        self.patients
            .register_patient_in_hospital(req.patient_id, req.hospital_id)
            .await
            .map(Response::new)
            .map_err(status_from_core)
    }

    async fn list_patients_by_hospital_id(
        &self,
        req: Request<ListByHospitalIdRequest>,
    ) -> Result<Response<ListPatientsResponse>, Status> {
        let req = req.into_inner();
        self.patients
            .list_patients_by_hospital_id(req.hospital_id)
            .await
            .map(Response::new)
            .map_err(status_from_core)
    }

    async fn list_all_patients(
        &self,
        _req: Request<()>,
    ) -> Result<Response<ListPatientsResponse>, Status> {
        self.patients
            .list_all_patients()
            .await
            .map(Response::new)
            .map_err(status_from_core)
    }

    async fn create_patient(
        &self,
        req: Request<CreatePatientRequest>,
    ) -> Result<Response<PatientResponse>, Status> {
        let req = req.into_inner();
        self.patients
            .create_patient(req.name, req.last_name, req.sex, &req.birth_date)
            .await
            .map(Response::new)
            .map_err(status_from_core)
    }

    async fn update_patient(
        &self,
        req: Request<UpdatePatientRequest>,
    ) -> Result<Response<PatientResponse>, Status> {
        let req = req.into_inner();
        self.patients
            .update_patient(req.id, req.name, req.last_name, req.sex, &req.birth_date)
            .await
            .map(Response::new)
            .map_err(status_from_core)
    }

    async fn delete_patient(
        &self,
        req: Request<DeletePatientRequest>,
    ) -> Result<Response<DeleteResponse>, Status> {
        let req = req.into_inner();
        self.patients
            .delete_patient(req.id)
            .await
            .map(Response::new)
            .map_err(status_from_core)
    }
}
