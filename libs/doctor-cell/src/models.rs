use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use shared_models::ClinicError;

/// Display format for slot and appointment timestamps.
pub const SLOT_DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M";

pub fn format_slot(slot: &NaiveDateTime) -> String {
    slot.format(SLOT_DISPLAY_FORMAT).to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub specialty: String,
    pub phone_number: String,
    /// Open slots, distinct, kept in the order they were added.
    pub available_slots: Vec<NaiveDateTime>,
}

impl Doctor {
    pub fn new(id: impl Into<String>, request: CreateDoctorRequest) -> Self {
        Self {
            id: id.into(),
            first_name: request.first_name,
            last_name: request.last_name,
            specialty: request.specialty,
            phone_number: request.phone_number,
            available_slots: Vec::new(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("Dr. {} {}", self.first_name, self.last_name)
    }

    pub fn has_slot(&self, slot: &NaiveDateTime) -> bool {
        self.available_slots.contains(slot)
    }

    pub fn add_slot(&mut self, slot: NaiveDateTime) -> Result<(), DoctorError> {
        if self.has_slot(&slot) {
            return Err(DoctorError::SlotAlreadyListed {
                doctor_id: self.id.clone(),
                slot,
            });
        }
        self.available_slots.push(slot);
        Ok(())
    }

    /// Removes `slot` from the open slots. Fails if it is not listed.
    pub fn remove_slot(&mut self, slot: &NaiveDateTime) -> Result<(), DoctorError> {
        match self.available_slots.iter().position(|s| s == slot) {
            Some(index) => {
                self.available_slots.remove(index);
                Ok(())
            }
            None => Err(DoctorError::SlotNotListed {
                doctor_id: self.id.clone(),
                slot: *slot,
            }),
        }
    }

    pub fn summary_card(&self) -> String {
        format!(
            "Doctor: {}\nID: {}\nSpecialty: {}\nPhone: {}\nOpen slots: {}",
            self.full_name(),
            self.id,
            self.specialty,
            self.phone_number,
            self.available_slots.len()
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDoctorRequest {
    pub first_name: String,
    pub last_name: String,
    pub specialty: String,
    pub phone_number: String,
}

impl CreateDoctorRequest {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        specialty: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            specialty: specialty.into(),
            phone_number: phone_number.into(),
        }
    }
}

/// Parameters for generating a daily grid of open slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSchedule {
    pub days: u32,
    pub slots_per_day: u32,
    pub interval_hours: u32,
    pub first_slot_hour: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum DoctorError {
    #[error("Doctor {doctor_id} not found")]
    NotFound { doctor_id: String },

    #[error("Slot {slot} is not listed for doctor {doctor_id}")]
    SlotNotListed { doctor_id: String, slot: NaiveDateTime },

    #[error("Slot {slot} is already listed for doctor {doctor_id}")]
    SlotAlreadyListed { doctor_id: String, slot: NaiveDateTime },
}

impl From<DoctorError> for ClinicError {
    fn from(err: DoctorError) -> Self {
        match err {
            DoctorError::NotFound { .. } => ClinicError::NotFound(err.to_string()),
            DoctorError::SlotNotListed { .. } => ClinicError::SlotUnavailable(err.to_string()),
            DoctorError::SlotAlreadyListed { .. } => ClinicError::InvalidInput(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    fn doctor() -> Doctor {
        Doctor::new("D001", CreateDoctorRequest::new("Carlos", "Mendoza", "Cardiología", "0991234567"))
    }

    #[test]
    fn test_full_name_has_title() {
        assert_eq!(doctor().full_name(), "Dr. Carlos Mendoza");
    }

    #[test]
    fn test_slots_are_distinct() {
        let mut doctor = doctor();
        doctor.add_slot(at(9)).unwrap();
        assert!(matches!(doctor.add_slot(at(9)), Err(DoctorError::SlotAlreadyListed { .. })));
        assert_eq!(doctor.available_slots, vec![at(9)]);
    }

    #[test]
    fn test_remove_missing_slot_fails_without_change() {
        let mut doctor = doctor();
        doctor.add_slot(at(9)).unwrap();
        doctor.add_slot(at(11)).unwrap();

        assert!(matches!(doctor.remove_slot(&at(13)), Err(DoctorError::SlotNotListed { .. })));
        assert_eq!(doctor.available_slots, vec![at(9), at(11)]);

        doctor.remove_slot(&at(9)).unwrap();
        assert_eq!(doctor.available_slots, vec![at(11)]);
    }

    #[test]
    fn test_format_slot() {
        assert_eq!(format_slot(&at(9)), "02/03/2026 09:00");
    }
}
