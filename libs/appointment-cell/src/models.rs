// libs/appointment-cell/src/models.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use shared_models::ClinicError;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    /// National ID of the patient; resolved through the patient registry.
    pub patient_id: String,
    /// Identity of the doctor; resolved through the doctor registry.
    pub doctor_id: String,
    pub scheduled_at: NaiveDateTime,
    pub reason: String,
    pub status: AppointmentStatus,
    pub observations: String,
}

impl Appointment {
    pub fn new(id: String, request: BookAppointmentRequest) -> Self {
        Self {
            id,
            patient_id: request.patient_id,
            doctor_id: request.doctor_id,
            scheduled_at: request.scheduled_at,
            reason: request.reason,
            status: AppointmentStatus::Pending,
            observations: String::new(),
        }
    }

    /// Moves to `new_status` if it names a recognized state. Any recognized
    /// state is reachable from any other; returns false and leaves the
    /// status untouched otherwise.
    pub fn change_status(&mut self, new_status: &str) -> bool {
        match new_status.parse::<AppointmentStatus>() {
            Ok(status) => {
                self.status = status;
                true
            }
            Err(_) => false,
        }
    }

    pub fn set_observations(&mut self, observations: impl Into<String>) {
        self.observations = observations.into();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Attended,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::Attended,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "PENDING",
            AppointmentStatus::Confirmed => "CONFIRMED",
            AppointmentStatus::Cancelled => "CANCELLED",
            AppointmentStatus::Attended => "ATTENDED",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = AppointmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppointmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AppointmentError::InvalidState(s.to_string()))
    }
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub patient_id: String,
    pub doctor_id: String,
    pub scheduled_at: NaiveDateTime,
    pub reason: String,
}

impl BookAppointmentRequest {
    pub fn new(
        patient_id: impl Into<String>,
        doctor_id: impl Into<String>,
        scheduled_at: NaiveDateTime,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            patient_id: patient_id.into(),
            doctor_id: doctor_id.into(),
            scheduled_at,
            reason: reason.into(),
        }
    }
}

// ==============================================================================
// STATISTICS MODELS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: AppointmentStatus,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorAppointmentCount {
    pub doctor_id: String,
    pub doctor_name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentStats {
    pub total_patients: usize,
    pub total_doctors: usize,
    pub total_appointments: usize,
    /// Only states that occur in the ledger, in state order.
    pub status_breakdown: Vec<StatusCount>,
    /// Every registered doctor, in registry order.
    pub doctor_breakdown: Vec<DoctorAppointmentCount>,
}

impl AppointmentStats {
    pub fn count_for(&self, status: AppointmentStatus) -> usize {
        self.status_breakdown
            .iter()
            .find(|entry| entry.status == status)
            .map_or(0, |entry| entry.count)
    }

    pub fn percentage_for(&self, status: AppointmentStatus) -> f64 {
        self.status_breakdown
            .iter()
            .find(|entry| entry.status == status)
            .map_or(0.0, |entry| entry.percentage)
    }

    pub fn count_for_doctor(&self, doctor_id: &str) -> usize {
        self.doctor_breakdown
            .iter()
            .find(|entry| entry.doctor_id == doctor_id)
            .map_or(0, |entry| entry.count)
    }
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment {appointment_id} not found")]
    NotFound { appointment_id: String },

    #[error("Slot {slot} is not available for doctor {doctor_id}")]
    SlotNotAvailable { doctor_id: String, slot: NaiveDateTime },

    #[error("Patient {patient_id} not found")]
    PatientNotFound { patient_id: String },

    #[error("Doctor {doctor_id} not found")]
    DoctorNotFound { doctor_id: String },

    #[error("'{0}' is not a recognized appointment state")]
    InvalidState(String),
}

impl From<AppointmentError> for ClinicError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::NotFound { .. }
            | AppointmentError::PatientNotFound { .. }
            | AppointmentError::DoctorNotFound { .. } => ClinicError::NotFound(err.to_string()),
            AppointmentError::SlotNotAvailable { .. } => ClinicError::SlotUnavailable(err.to_string()),
            AppointmentError::InvalidState(_) => ClinicError::InvalidState(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn appointment() -> Appointment {
        let at = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap().and_hms_opt(9, 0, 0).unwrap();
        Appointment::new(
            "T0001".to_string(),
            BookAppointmentRequest::new("1723456789", "D001", at, "Chest pain"),
        )
    }

    #[test]
    fn test_new_appointment_is_pending() {
        let appointment = appointment();
        assert_eq!(appointment.status, AppointmentStatus::Pending);
        assert!(appointment.observations.is_empty());
    }

    #[test]
    fn test_change_status_accepts_every_recognized_state() {
        let mut appointment = appointment();
        for status in AppointmentStatus::ALL {
            assert!(appointment.change_status(status.as_str()));
            assert_eq!(appointment.status, status);
            // Applying the same state again is a no-op success.
            assert!(appointment.change_status(status.as_str()));
            assert_eq!(appointment.status, status);
        }
    }

    #[test]
    fn test_change_status_rejects_unknown_state() {
        let mut appointment = appointment();
        assert!(appointment.change_status("CONFIRMED"));
        assert!(!appointment.change_status("BOGUS"));
        assert!(!appointment.change_status("confirmed"));
        assert!(!appointment.change_status(""));
        assert_eq!(appointment.status, AppointmentStatus::Confirmed);
    }

    #[test]
    fn test_attended_can_return_to_pending() {
        let mut appointment = appointment();
        assert!(appointment.change_status("ATTENDED"));
        assert!(appointment.change_status("PENDING"));
        assert_eq!(appointment.status, AppointmentStatus::Pending);
    }

    #[test]
    fn test_status_serializes_in_upper_case() {
        let json = serde_json::to_string(&AppointmentStatus::Attended).unwrap();
        assert_eq!(json, "\"ATTENDED\"");
        let status: AppointmentStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(status, AppointmentStatus::Cancelled);
    }
}
