use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{debug, warn};

use crate::models::{DoctorError, SlotSchedule};
use crate::services::doctor::DoctorRegistry;

pub struct AvailabilityService;

impl AvailabilityService {
    /// Builds the open slots for one day: `slots_per_day` slots starting at
    /// `first_slot_hour`, `interval_hours` apart. Slots that would fall on
    /// the next day are skipped. A zero interval yields a single slot.
    pub fn daily_slots(date: NaiveDate, schedule: &SlotSchedule) -> Vec<NaiveDateTime> {
        let Some(first) = NaiveTime::from_hms_opt(schedule.first_slot_hour, 0, 0) else {
            warn!("First slot hour {} is not a valid time of day", schedule.first_slot_hour);
            return Vec::new();
        };
        let day_start = date.and_time(first);

        // Offsets only grow, so the first one past the day ends the grid.
        (0..schedule.slots_per_day)
            .map_while(|j| {
                if j > 0 && schedule.interval_hours == 0 {
                    return None;
                }
                let offset = i64::from(j).checked_mul(i64::from(schedule.interval_hours))?;
                if offset >= 24 {
                    return None;
                }
                day_start.checked_add_signed(Duration::hours(offset))
            })
            .filter(|slot| slot.date() == date)
            .collect()
    }

    /// Opens the slot grid for every listed doctor, day by day from
    /// `base_date`. Returns the number of slots added.
    pub fn open_schedule(
        registry: &mut DoctorRegistry,
        base_date: NaiveDate,
        schedule: &SlotSchedule,
    ) -> Result<usize, DoctorError> {
        let doctor_ids: Vec<String> = registry.list_all().iter().map(|d| d.id.clone()).collect();
        let mut added = 0;

        for day in 0..schedule.days {
            let Some(date) = base_date.checked_add_signed(Duration::days(i64::from(day))) else {
                warn!("Seed schedule stops at day {}: date out of range", day);
                break;
            };
            for doctor_id in &doctor_ids {
                for slot in Self::daily_slots(date, schedule) {
                    registry.add_slot(doctor_id, slot)?;
                    added += 1;
                }
            }
        }

        debug!("Opened {} slots across {} doctors", added, doctor_ids.len());
        Ok(added)
    }
}
