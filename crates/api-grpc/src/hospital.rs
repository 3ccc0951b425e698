//! `HospitalServiceEndpoint` implementation.

use crate::status::status_from_core;
use api_shared::pb::{
    hospital_service_endpoint_server::HospitalServiceEndpoint, CreateHospitalRequest,
    DeleteHospitalRequest, DeleteResponse, FindByIdRequest, HospitalResponse,
    ListByPatientIdRequest, ListHospitalsResponse, UpdateHospitalRequest,
};
use hospital_core::HospitalService;
use tonic::{Request, Response, Status};

#[derive(Clone, Debug)]
pub struct HospitalEndpoint {
    hospitals: HospitalService,
}

impl HospitalEndpoint {
    pub fn new(hospitals: HospitalService) -> Self {
        Self { hospitals }
    }
}

#[tonic::async_trait]
impl HospitalServiceEndpoint for HospitalEndpoint {
    async fn find_by_id(
        &self,
        req: Request<FindByIdRequest>,
    ) -> Result<Response<HospitalResponse>, Status> {
        let req = req.into_inner();
        self.hospitals
            .find_by_id(req.id)
            .await
            .map(Response::new)
            .map_err(status_from_core)
    }

    async fn list_hospitals_by_patient_id(
        &self,
        req: Request<ListByPatientIdRequest>,
    ) -> Result<Response<ListHospitalsResponse>, Status> {
        let req = req.into_inner();
        self.hospitals
            .list_hospitals_by_patient_id(req.patient_id)
            .await
            .map(Response::new)
            .map_err(status_from_core)
    }

    async fn list_all_hospitals(
        &self,
        _req: Request<()>,
    ) -> Result<Response<ListHospitalsResponse>, Status> {
        self.hospitals
            .list_all_hospitals()
            .await
            .map(Response::new)
            .map_err(status_from_core)
    }

    async fn create_hospital(
        &self,
        req: Request<CreateHospitalRequest>,
    ) -> Result<Response<HospitalResponse>, Status> {
        let req = req.into_inner();
        self.hospitals
            .create_hospital(req.name, req.address)
            .await
            .map(Response::new)
            .map_err(status_from_core)
    }

    async fn update_hospital(
        &self,
        req: Request<UpdateHospitalRequest>,
    ) -> Result<Response<HospitalResponse>, Status> {
        let req = req.into_inner();
        self.hospitals
            .update_hospital(req.id, req.name, req.address)
            .await
            .map(Response::new)
            .map_err(status_from_core)
    }

    async fn delete_hospital(
        &self,
        req: Request<DeleteHospitalRequest>,
    ) -> Result<Response<DeleteResponse>, Status> {
        let req = req.into_inner();
        self.hospitals
            .delete_hospital(req.id)
            .await
            .map(Response::new)
            .map_err(status_from_core)
    }
}
