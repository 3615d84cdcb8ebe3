use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use crate::models::{format_slot, CreateDoctorRequest, Doctor, DoctorError};

const DOCTOR_ID_PREFIX: &str = "D";

/// In-memory doctor registry. Identities are assigned sequentially
/// (`D001`, `D002`, ...) and never reused.
#[derive(Debug)]
pub struct DoctorRegistry {
    doctors: Vec<Doctor>,
    next_id: u32,
}

impl Default for DoctorRegistry {
    fn default() -> Self {
        Self {
            doctors: Vec::new(),
            next_id: 1,
        }
    }
}

impl DoctorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&mut self, request: CreateDoctorRequest) -> &Doctor {
        let id = format!("{}{:03}", DOCTOR_ID_PREFIX, self.next_id);
        self.next_id += 1;

        let doctor = Doctor::new(id, request);
        info!("Doctor seeded: {} ({}, {})", doctor.full_name(), doctor.id, doctor.specialty);
        self.doctors.push(doctor);

        &self.doctors[self.doctors.len() - 1]
    }

    pub fn find(&self, doctor_id: &str) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == doctor_id)
    }

    pub fn find_mut(&mut self, doctor_id: &str) -> Option<&mut Doctor> {
        self.doctors.iter_mut().find(|d| d.id == doctor_id)
    }

    pub fn get(&self, doctor_id: &str) -> Result<&Doctor, DoctorError> {
        self.find(doctor_id).ok_or_else(|| DoctorError::NotFound {
            doctor_id: doctor_id.to_string(),
        })
    }

    fn get_mut(&mut self, doctor_id: &str) -> Result<&mut Doctor, DoctorError> {
        self.find_mut(doctor_id).ok_or_else(|| DoctorError::NotFound {
            doctor_id: doctor_id.to_string(),
        })
    }

    pub fn add_slot(&mut self, doctor_id: &str, slot: NaiveDateTime) -> Result<(), DoctorError> {
        debug!("Adding slot {} for doctor {}", format_slot(&slot), doctor_id);
        self.get_mut(doctor_id)?.add_slot(slot)
    }

    pub fn remove_slot(&mut self, doctor_id: &str, slot: &NaiveDateTime) -> Result<(), DoctorError> {
        debug!("Removing slot {} for doctor {}", format_slot(slot), doctor_id);
        self.get_mut(doctor_id)?.remove_slot(slot).map_err(|e| {
            warn!("{}", e);
            e
        })
    }

    /// Doctor at a 1-based position in listing order, as picked from a menu.
    pub fn by_position(&self, position: usize) -> Option<&Doctor> {
        position.checked_sub(1).and_then(|index| self.doctors.get(index))
    }

    pub fn list_all(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn len(&self) -> usize {
        self.doctors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }
}
