use std::env;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub clinic_name: String,
    pub seed_demo_data: bool,
    pub seed_days: u32,
    pub slots_per_day: u32,
    pub slot_interval_hours: u32,
    pub first_slot_hour: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            clinic_name: "Salud Integral".to_string(),
            seed_demo_data: true,
            seed_days: 5,
            slots_per_day: 4,
            slot_interval_hours: 2,
            first_slot_hour: 9,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            clinic_name: env::var("CLINIC_NAME")
                .unwrap_or_else(|_| {
                    warn!("CLINIC_NAME not set, using default");
                    defaults.clinic_name.clone()
                }),
            seed_demo_data: parse_var("CLINIC_SEED_DEMO_DATA", defaults.seed_demo_data),
            seed_days: parse_var("CLINIC_SEED_DAYS", defaults.seed_days),
            slots_per_day: parse_var("CLINIC_SLOTS_PER_DAY", defaults.slots_per_day),
            slot_interval_hours: parse_var("CLINIC_SLOT_INTERVAL_HOURS", defaults.slot_interval_hours),
            first_slot_hour: parse_var("CLINIC_FIRST_SLOT_HOUR", defaults.first_slot_hour),
        };

        if !config.is_schedule_valid() {
            warn!("Seed schedule runs past midnight - later slots will be skipped");
        }

        config
    }

    /// True when every generated slot of a day falls before midnight.
    /// Values too large to add up are reported as invalid.
    pub fn is_schedule_valid(&self) -> bool {
        if self.slots_per_day == 0 {
            return true;
        }
        self.slots_per_day
            .saturating_sub(1)
            .checked_mul(self.slot_interval_hours)
            .and_then(|span| span.checked_add(self.first_slot_hour))
            .is_some_and(|last_slot_hour| last_slot_hour < 24)
    }
}

fn parse_var<T: FromStr + Copy + std::fmt::Debug>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value {:?}, using default {:?}", name, raw, default);
            default
        }),
        Err(_) => {
            warn!("{} not set, using default {:?}", name, default);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule_is_valid() {
        let config = AppConfig::default();
        assert!(config.is_schedule_valid());
        assert_eq!(config.first_slot_hour, 9);
        assert_eq!(config.slots_per_day, 4);
    }

    #[test]
    fn test_schedule_past_midnight_is_flagged() {
        let config = AppConfig {
            first_slot_hour: 20,
            slots_per_day: 4,
            slot_interval_hours: 2,
            ..AppConfig::default()
        };
        assert!(!config.is_schedule_valid());
    }

    #[test]
    fn test_invalid_number_falls_back_to_default() {
        env::set_var("CLINIC_TEST_PARSE_VAR", "not-a-number");
        assert_eq!(parse_var("CLINIC_TEST_PARSE_VAR", 7u32), 7);
        env::set_var("CLINIC_TEST_PARSE_VAR", " 3 ");
        assert_eq!(parse_var("CLINIC_TEST_PARSE_VAR", 7u32), 3);
        env::remove_var("CLINIC_TEST_PARSE_VAR");
        assert_eq!(parse_var("CLINIC_TEST_PARSE_VAR", 7u32), 7);
    }

    #[test]
    fn test_huge_schedule_is_flagged_without_overflow() {
        let config = AppConfig {
            slots_per_day: 100_000,
            slot_interval_hours: 100_000,
            ..AppConfig::default()
        };
        assert!(!config.is_schedule_valid());

        let config = AppConfig {
            slots_per_day: 2,
            slot_interval_hours: 1,
            first_slot_hour: u32::MAX,
            ..AppConfig::default()
        };
        assert!(!config.is_schedule_valid());
    }

    #[test]
    fn test_from_env_accepts_huge_schedule_values() {
        env::set_var("CLINIC_SLOTS_PER_DAY", "100000");
        env::set_var("CLINIC_SLOT_INTERVAL_HOURS", "100000");
        let config = AppConfig::from_env();
        env::remove_var("CLINIC_SLOTS_PER_DAY");
        env::remove_var("CLINIC_SLOT_INTERVAL_HOURS");

        assert_eq!(config.slots_per_day, 100_000);
        assert_eq!(config.slot_interval_hours, 100_000);
        assert!(!config.is_schedule_valid());
    }
}
