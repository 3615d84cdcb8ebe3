// libs/appointment-cell/src/services/statistics.rs
use std::collections::HashMap;
use tracing::debug;

use doctor_cell::DoctorRegistry;
use patient_cell::PatientRegistry;

use crate::models::{AppointmentStats, AppointmentStatus, DoctorAppointmentCount, StatusCount};
use crate::services::ledger::AppointmentLedger;

pub struct StatisticsService;

impl StatisticsService {
    /// Aggregates the ledger in a single pass. An empty ledger yields zero
    /// totals and an empty status breakdown.
    pub fn summary(
        ledger: &AppointmentLedger,
        patients: &PatientRegistry,
        doctors: &DoctorRegistry,
    ) -> AppointmentStats {
        debug!("Calculating appointment statistics over {} appointments", ledger.len());

        let mut status_counts: HashMap<AppointmentStatus, usize> = HashMap::new();
        let mut doctor_counts: HashMap<&str, usize> = HashMap::new();
        for appointment in ledger.all() {
            *status_counts.entry(appointment.status).or_insert(0) += 1;
            *doctor_counts.entry(appointment.doctor_id.as_str()).or_insert(0) += 1;
        }

        let total_appointments = ledger.len();
        let status_breakdown = AppointmentStatus::ALL
            .into_iter()
            .filter_map(|status| {
                status_counts.get(&status).map(|&count| StatusCount {
                    status,
                    count,
                    percentage: percentage(count, total_appointments),
                })
            })
            .collect();

        let doctor_breakdown = doctors
            .list_all()
            .iter()
            .map(|doctor| DoctorAppointmentCount {
                doctor_id: doctor.id.clone(),
                doctor_name: doctor.full_name(),
                count: doctor_counts.get(doctor.id.as_str()).copied().unwrap_or(0),
            })
            .collect();

        AppointmentStats {
            total_patients: patients.len(),
            total_doctors: doctors.len(),
            total_appointments,
            status_breakdown,
            doctor_breakdown,
        }
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_guards_zero_total() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(1, 4), 25.0);
    }
}
