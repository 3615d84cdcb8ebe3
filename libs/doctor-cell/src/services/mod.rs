pub mod doctor;
pub mod availability;

pub use doctor::DoctorRegistry;
pub use availability::AvailabilityService;
