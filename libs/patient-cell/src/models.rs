use serde::{Deserialize, Serialize};

use shared_models::ClinicError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub national_id: String,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub phone_number: String,
    pub email: String,
    /// Identifiers of booked appointments, in booking order. Append-only.
    pub appointment_history: Vec<String>,
}

impl Patient {
    pub fn new(request: CreatePatientRequest) -> Self {
        Self {
            national_id: request.national_id,
            first_name: request.first_name,
            last_name: request.last_name,
            age: request.age,
            phone_number: request.phone_number,
            email: request.email,
            appointment_history: Vec::new(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn add_to_history(&mut self, appointment_id: impl Into<String>) {
        self.appointment_history.push(appointment_id.into());
    }

    pub fn summary_card(&self) -> String {
        format!(
            "Patient: {}\nNational ID: {}\nAge: {} years\nPhone: {}\nEmail: {}\nAppointments booked: {}",
            self.full_name(),
            self.national_id,
            self.age,
            self.phone_number,
            self.email,
            self.appointment_history.len()
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePatientRequest {
    pub national_id: String,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub phone_number: String,
    pub email: String,
}

impl CreatePatientRequest {
    pub fn new(
        national_id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        age: u32,
        phone_number: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            national_id: national_id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            age,
            phone_number: phone_number.into(),
            email: email.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum PatientError {
    #[error("Patient with national ID {national_id} already exists")]
    AlreadyExists { national_id: String },

    #[error("Patient {national_id} not found")]
    NotFound { national_id: String },
}

impl From<PatientError> for ClinicError {
    fn from(err: PatientError) -> Self {
        match err {
            PatientError::AlreadyExists { .. } => ClinicError::DuplicateIdentity(err.to_string()),
            PatientError::NotFound { .. } => ClinicError::NotFound(err.to_string()),
        }
    }
}
