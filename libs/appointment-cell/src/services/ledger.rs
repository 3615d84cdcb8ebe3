// libs/appointment-cell/src/services/ledger.rs
use tracing::{debug, info, warn};

use doctor_cell::{format_slot, DoctorRegistry};
use patient_cell::PatientRegistry;

use crate::models::{Appointment, AppointmentError, AppointmentStatus, BookAppointmentRequest};

/// Ordered record of every booked appointment. Entries are never removed.
#[derive(Debug)]
pub struct AppointmentLedger {
    appointments: Vec<Appointment>,
    next_id: u32,
}

impl Default for AppointmentLedger {
    fn default() -> Self {
        Self {
            appointments: Vec::new(),
            next_id: 1,
        }
    }
}

impl AppointmentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Books `request.scheduled_at` with the requested doctor.
    ///
    /// The slot must currently be listed for the doctor. On success the slot
    /// is consumed, the new appointment is appended to the ledger and its id
    /// to the patient's history. On failure nothing changes.
    pub fn book(
        &mut self,
        patients: &mut PatientRegistry,
        doctors: &mut DoctorRegistry,
        request: BookAppointmentRequest,
    ) -> Result<&Appointment, AppointmentError> {
        info!("Booking appointment for patient {} with doctor {} at {}",
              request.patient_id, request.doctor_id, format_slot(&request.scheduled_at));

        let patient = patients.find_mut(&request.patient_id).ok_or_else(|| {
            warn!("Booking rejected: patient {} not found", request.patient_id);
            AppointmentError::PatientNotFound {
                patient_id: request.patient_id.clone(),
            }
        })?;

        let doctor = doctors.find_mut(&request.doctor_id).ok_or_else(|| {
            warn!("Booking rejected: doctor {} not found", request.doctor_id);
            AppointmentError::DoctorNotFound {
                doctor_id: request.doctor_id.clone(),
            }
        })?;

        // First mutation; everything after it is infallible.
        doctor.remove_slot(&request.scheduled_at).map_err(|_| {
            warn!("Booking rejected: slot {} not available for doctor {}",
                  format_slot(&request.scheduled_at), request.doctor_id);
            AppointmentError::SlotNotAvailable {
                doctor_id: request.doctor_id.clone(),
                slot: request.scheduled_at,
            }
        })?;

        let id = format!("T{:04}", self.next_id);
        self.next_id += 1;

        patient.add_to_history(id.clone());
        self.appointments.push(Appointment::new(id, request));

        let appointment = &self.appointments[self.appointments.len() - 1];
        info!("Appointment {} booked successfully", appointment.id);
        Ok(appointment)
    }

    pub fn find_by_id(&self, appointment_id: &str) -> Option<&Appointment> {
        debug!("Looking up appointment {}", appointment_id);
        self.appointments.iter().find(|a| a.id == appointment_id)
    }

    fn get_mut(&mut self, appointment_id: &str) -> Result<&mut Appointment, AppointmentError> {
        self.appointments
            .iter_mut()
            .find(|a| a.id == appointment_id)
            .ok_or_else(|| AppointmentError::NotFound {
                appointment_id: appointment_id.to_string(),
            })
    }

    /// Appointments in ledger order, optionally restricted to one state.
    pub fn list(&self, status_filter: Option<AppointmentStatus>) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| status_filter.map_or(true, |status| a.status == status))
            .collect()
    }

    pub fn transition(
        &mut self,
        appointment_id: &str,
        new_status: &str,
    ) -> Result<&Appointment, AppointmentError> {
        let appointment = self.get_mut(appointment_id)?;
        let previous = appointment.status;

        if !appointment.change_status(new_status) {
            warn!("Rejected transition of {} to unrecognized state '{}'", appointment_id, new_status);
            return Err(AppointmentError::InvalidState(new_status.to_string()));
        }

        info!("Appointment {} moved from {} to {}", appointment_id, previous, appointment.status);
        Ok(&*appointment)
    }

    pub fn set_observations(
        &mut self,
        appointment_id: &str,
        observations: &str,
    ) -> Result<&Appointment, AppointmentError> {
        let appointment = self.get_mut(appointment_id)?;
        appointment.set_observations(observations);
        debug!("Observations recorded for appointment {}", appointment_id);
        Ok(&*appointment)
    }

    pub fn by_patient(&self, patient_id: &str) -> Vec<&Appointment> {
        self.appointments.iter().filter(|a| a.patient_id == patient_id).collect()
    }

    pub fn by_doctor(&self, doctor_id: &str) -> Vec<&Appointment> {
        self.appointments.iter().filter(|a| a.doctor_id == doctor_id).collect()
    }

    pub fn all(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }
}
