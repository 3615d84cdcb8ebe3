// libs/clinic-cell/src/clinic.rs
use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info};

use appointment_cell::{
    Appointment, AppointmentLedger, AppointmentStats, AppointmentStatus, BookAppointmentRequest,
    StatisticsService,
};
use doctor_cell::{format_slot, CreateDoctorRequest, Doctor, DoctorRegistry};
use patient_cell::{CreatePatientRequest, Patient, PatientRegistry};
use shared_config::AppConfig;
use shared_models::{ClinicError, ClinicResult};

use crate::seed;

/// Process-wide clinic state: both registries and the appointment ledger.
///
/// Created at startup (optionally pre-populated), mutated only through the
/// methods below, dropped at exit.
#[derive(Debug, Default)]
pub struct Clinic {
    pub(crate) patients: PatientRegistry,
    pub(crate) doctors: DoctorRegistry,
    pub(crate) ledger: AppointmentLedger,
}

impl Clinic {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the clinic, seeding demo data when the config asks for it.
    /// Generated slots start on `base_date`.
    pub fn from_config(config: &AppConfig, base_date: NaiveDate) -> ClinicResult<Self> {
        let mut clinic = Self::new();
        if config.seed_demo_data {
            seed::populate(&mut clinic, config, base_date)?;
        } else {
            debug!("Demo data seeding disabled");
        }
        info!(
            "Clinic ready with {} patients and {} doctors",
            clinic.patients.len(),
            clinic.doctors.len()
        );
        Ok(clinic)
    }

    // ========== PATIENTS ==========

    pub fn register_patient(&mut self, request: CreatePatientRequest) -> ClinicResult<&Patient> {
        Ok(self.patients.register(request)?)
    }

    pub fn find_patient(&self, national_id: &str) -> Option<&Patient> {
        self.patients.find(national_id)
    }

    pub fn list_patients(&self) -> &[Patient] {
        self.patients.list_all()
    }

    // ========== DOCTORS ==========

    pub fn seed_doctor(&mut self, request: CreateDoctorRequest) -> &Doctor {
        self.doctors.seed(request)
    }

    pub fn add_doctor_slot(&mut self, doctor_id: &str, slot: NaiveDateTime) -> ClinicResult<()> {
        Ok(self.doctors.add_slot(doctor_id, slot)?)
    }

    pub fn remove_doctor_slot(&mut self, doctor_id: &str, slot: &NaiveDateTime) -> ClinicResult<()> {
        Ok(self.doctors.remove_slot(doctor_id, slot)?)
    }

    pub fn find_doctor(&self, doctor_id: &str) -> Option<&Doctor> {
        self.doctors.find(doctor_id)
    }

    /// Doctor at a 1-based listing position.
    pub fn doctor_at(&self, position: usize) -> ClinicResult<&Doctor> {
        self.doctors
            .by_position(position)
            .ok_or_else(|| ClinicError::InvalidInput(format!("no doctor at position {}", position)))
    }

    pub fn list_doctors(&self) -> &[Doctor] {
        self.doctors.list_all()
    }

    // ========== APPOINTMENTS ==========

    pub fn book_appointment(&mut self, request: BookAppointmentRequest) -> ClinicResult<&Appointment> {
        Ok(self.ledger.book(&mut self.patients, &mut self.doctors, request)?)
    }

    pub fn find_appointment(&self, appointment_id: &str) -> Option<&Appointment> {
        self.ledger.find_by_id(appointment_id)
    }

    pub fn list_appointments(&self, status_filter: Option<AppointmentStatus>) -> Vec<&Appointment> {
        self.ledger.list(status_filter)
    }

    pub fn transition_appointment(&mut self, appointment_id: &str, new_status: &str) -> ClinicResult<&Appointment> {
        Ok(self.ledger.transition(appointment_id, new_status)?)
    }

    pub fn set_observations(&mut self, appointment_id: &str, observations: &str) -> ClinicResult<&Appointment> {
        Ok(self.ledger.set_observations(appointment_id, observations)?)
    }

    /// Appointments of a registered patient, in ledger order.
    pub fn appointments_by_patient(&self, national_id: &str) -> ClinicResult<Vec<&Appointment>> {
        self.patients.get(national_id)?;
        Ok(self.ledger.by_patient(national_id))
    }

    /// Appointments of a registered doctor, in ledger order.
    pub fn appointments_by_doctor(&self, doctor_id: &str) -> ClinicResult<Vec<&Appointment>> {
        self.doctors.get(doctor_id)?;
        Ok(self.ledger.by_doctor(doctor_id))
    }

    pub fn compute_statistics(&self) -> AppointmentStats {
        StatisticsService::summary(&self.ledger, &self.patients, &self.doctors)
    }

    // ========== DISPLAY ==========

    pub fn patient_name(&self, national_id: &str) -> String {
        self.patients
            .find(national_id)
            .map_or_else(|| national_id.to_string(), Patient::full_name)
    }

    pub fn doctor_name(&self, doctor_id: &str) -> String {
        self.doctors
            .find(doctor_id)
            .map_or_else(|| doctor_id.to_string(), Doctor::full_name)
    }

    /// Full appointment card with patient and doctor names resolved.
    pub fn describe_appointment(&self, appointment: &Appointment) -> String {
        format!(
            "Appointment ID: {}\nPatient: {}\nDoctor: {}\nDate and time: {}\nReason: {}\nState: {}\nObservations: {}",
            appointment.id,
            self.patient_name(&appointment.patient_id),
            self.doctor_name(&appointment.doctor_id),
            format_slot(&appointment.scheduled_at),
            appointment.reason,
            appointment.status,
            appointment.observations
        )
    }
}
