//! Conversion from stored records to wire response messages.
//!
//! Responses carry only the record's own fields. The association is never embedded; it is
//! only reachable through the dedicated list operations.

use crate::birth_date;
use crate::models::{Hospital, Patient};
use api_shared::pb;

pub fn hospital_response(hospital: &Hospital) -> pb::HospitalResponse {
    pb::HospitalResponse {
        id: hospital.id,
        name: hospital.name.clone(),
        address: hospital.address.clone(),
    }
}

pub fn patient_response(patient: &Patient) -> pb::PatientResponse {
    pb::PatientResponse {
        id: patient.id,
        name: patient.name.clone(),
        last_name: patient.last_name.clone(),
        birth_date: birth_date::format(patient.birth_date),
        sex: patient.sex.clone(),
    }
}

pub fn list_hospitals_response(hospitals: &[Hospital]) -> pb::ListHospitalsResponse {
    pb::ListHospitalsResponse {
        hospitals: hospitals.iter().map(hospital_response).collect(),
    }
}

pub fn list_patients_response(patients: &[Patient]) -> pb::ListPatientsResponse {
    pb::ListPatientsResponse {
        patients: patients.iter().map(patient_response).collect(),
    }
}
