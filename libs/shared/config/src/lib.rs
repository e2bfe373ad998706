use std::env;
use tracing::warn;

pub const DEFAULT_TIMEZONE: &str = "UTC";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub schedule_timezone: String,
    pub slot_buffer_minutes: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            schedule_timezone: DEFAULT_TIMEZONE.to_string(),
            slot_buffer_minutes: 0,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so callers (and tests)
    /// don't have to touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let schedule_timezone = lookup("SCHEDULE_TIMEZONE")
            .filter(|tz| !tz.trim().is_empty())
            .unwrap_or_else(|| {
                warn!("SCHEDULE_TIMEZONE not set, using {}", DEFAULT_TIMEZONE);
                DEFAULT_TIMEZONE.to_string()
            });

        let slot_buffer_minutes = match lookup("SCHEDULE_SLOT_BUFFER_MINUTES") {
            Some(raw) => raw.trim().parse::<u32>().unwrap_or_else(|_| {
                warn!("SCHEDULE_SLOT_BUFFER_MINUTES={:?} is not a valid minute count, using 0", raw);
                0
            }),
            None => {
                warn!("SCHEDULE_SLOT_BUFFER_MINUTES not set, using 0");
                0
            }
        };

        Self {
            schedule_timezone,
            slot_buffer_minutes,
        }
    }

    pub fn has_slot_buffer(&self) -> bool {
        self.slot_buffer_minutes > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = AppConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, AppConfig::default());
        assert!(!config.has_slot_buffer());
    }

    #[test]
    fn test_reads_all_values() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("SCHEDULE_TIMEZONE", "Africa/Lagos"),
            ("SCHEDULE_SLOT_BUFFER_MINUTES", "10"),
        ]));

        assert_eq!(config.schedule_timezone, "Africa/Lagos");
        assert_eq!(config.slot_buffer_minutes, 10);
        assert!(config.has_slot_buffer());
    }

    #[test]
    fn test_invalid_buffer_falls_back_to_zero() {
        let config = AppConfig::from_lookup(lookup_from(&[("SCHEDULE_SLOT_BUFFER_MINUTES", "-5")]));
        assert_eq!(config.slot_buffer_minutes, 0);
    }

    #[test]
    fn test_missing_buffer_falls_back_to_zero() {
        let config = AppConfig::from_lookup(lookup_from(&[("SCHEDULE_TIMEZONE", "Africa/Lagos")]));
        assert_eq!(config.slot_buffer_minutes, 0);
        assert!(!config.has_slot_buffer());
    }

    #[test]
    fn test_largest_buffer_is_accepted() {
        let config = AppConfig::from_lookup(lookup_from(&[("SCHEDULE_SLOT_BUFFER_MINUTES", "4294967295")]));
        assert_eq!(config.slot_buffer_minutes, u32::MAX);
    }

    #[test]
    fn test_blank_timezone_uses_default() {
        let config = AppConfig::from_lookup(lookup_from(&[("SCHEDULE_TIMEZONE", "  ")]));
        assert_eq!(config.schedule_timezone, DEFAULT_TIMEZONE);
    }
}
