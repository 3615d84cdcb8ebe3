// libs/clinic-cell/src/seed.rs
//
// Demo data loaded at startup so the menu is usable right away.

use chrono::NaiveDate;
use tracing::info;

use doctor_cell::{AvailabilityService, CreateDoctorRequest, SlotSchedule};
use patient_cell::CreatePatientRequest;
use shared_config::AppConfig;
use shared_models::ClinicResult;

use crate::clinic::Clinic;

const DEMO_DOCTORS: [(&str, &str, &str, &str); 3] = [
    ("Carlos", "Mendoza", "Cardiología", "0991234567"),
    ("Ana", "García", "Pediatría", "0992345678"),
    ("Luis", "Rodríguez", "Dermatología", "0993456789"),
];

const DEMO_PATIENTS: [(&str, &str, &str, u32, &str, &str); 3] = [
    ("1723456789", "María", "Pérez", 35, "0991112233", "maria@email.com"),
    ("1724567890", "Juan", "López", 42, "0992223344", "juan@email.com"),
    ("1725678901", "Carmen", "Vega", 28, "0993334455", "carmen@email.com"),
];

pub fn slot_schedule(config: &AppConfig) -> SlotSchedule {
    SlotSchedule {
        days: config.seed_days,
        slots_per_day: config.slots_per_day,
        interval_hours: config.slot_interval_hours,
        first_slot_hour: config.first_slot_hour,
    }
}

/// Registers the demo doctors and patients and opens the configured slot
/// grid for every doctor starting on `base_date`.
pub fn populate(clinic: &mut Clinic, config: &AppConfig, base_date: NaiveDate) -> ClinicResult<()> {
    for (first_name, last_name, specialty, phone) in DEMO_DOCTORS {
        clinic.seed_doctor(CreateDoctorRequest::new(first_name, last_name, specialty, phone));
    }

    for (national_id, first_name, last_name, age, phone, email) in DEMO_PATIENTS {
        clinic.register_patient(CreatePatientRequest::new(
            national_id, first_name, last_name, age, phone, email,
        ))?;
    }

    let opened = AvailabilityService::open_schedule(&mut clinic.doctors, base_date, &slot_schedule(config))?;

    info!(
        "Seeded {} doctors, {} patients and {} slots from {}",
        DEMO_DOCTORS.len(),
        DEMO_PATIENTS.len(),
        opened,
        base_date
    );
    Ok(())
}
