use tracing::{debug, info, warn};

use crate::models::{CreatePatientRequest, Patient, PatientError};

/// In-memory patient registry keyed by national ID, kept in insertion order.
#[derive(Debug, Default)]
pub struct PatientRegistry {
    patients: Vec<Patient>,
}

impl PatientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, request: CreatePatientRequest) -> Result<&Patient, PatientError> {
        debug!("Registering patient: {}", request.national_id);

        if self.find(&request.national_id).is_some() {
            warn!("Patient with national ID {} already exists", request.national_id);
            return Err(PatientError::AlreadyExists {
                national_id: request.national_id,
            });
        }

        let patient = Patient::new(request);
        info!("Patient registered: {} ({})", patient.full_name(), patient.national_id);
        self.patients.push(patient);

        Ok(&self.patients[self.patients.len() - 1])
    }

    pub fn find(&self, national_id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.national_id == national_id)
    }

    pub fn find_mut(&mut self, national_id: &str) -> Option<&mut Patient> {
        self.patients.iter_mut().find(|p| p.national_id == national_id)
    }

    /// Like [`find`](Self::find) but reports absence as an error.
    pub fn get(&self, national_id: &str) -> Result<&Patient, PatientError> {
        self.find(national_id).ok_or_else(|| PatientError::NotFound {
            national_id: national_id.to_string(),
        })
    }

    pub fn list_all(&self) -> &[Patient] {
        &self.patients
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }
}
