pub mod clinic;
pub mod seed;

pub use clinic::Clinic;

// Re-export the cell types callers need to drive the clinic
pub use appointment_cell::{Appointment, AppointmentStats, AppointmentStatus, BookAppointmentRequest};
pub use doctor_cell::{format_slot, CreateDoctorRequest, Doctor};
pub use patient_cell::{CreatePatientRequest, Patient};
pub use shared_models::{ClinicError, ClinicResult};
