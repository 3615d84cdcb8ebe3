pub mod ledger;
pub mod statistics;

pub use ledger::AppointmentLedger;
pub use statistics::StatisticsService;
