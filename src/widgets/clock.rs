//! Live clock text.

use crate::config::ClockConfig;
use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Formats wall-clock time for the header clock.
#[derive(Debug, Clone, Copy)]
pub struct ClockDisplay {
    offset: FixedOffset,
}

impl ClockDisplay {
    /// Creates a clock for the configured UTC offset. Out-of-range offsets fall back to UTC.
    pub fn new(config: &ClockConfig) -> Self {
        let offset = FixedOffset::east_opt(config.utc_offset_secs).unwrap_or_else(|| {
            log::warn!(
                "clock offset {}s out of range, using UTC",
                config.utc_offset_secs
            );
            Utc.fix()
        });
        Self { offset }
    }

    /// `HH:MM` (24-hour) for `now` in the clock's time zone.
    pub fn format(&self, now: DateTime<Utc>) -> String {
        now.with_timezone(&self.offset).format("%H:%M").to_string()
    }

    /// `HH:MM` for the current time.
    pub fn now_text(&self) -> String {
        self.format(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_in_configured_offset() {
        let clock = ClockDisplay::new(&ClockConfig::default());
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 20, 5, 59).unwrap();
        assert_eq!(clock.format(now), "03:05");
    }

    #[test]
    fn invalid_offset_uses_utc() {
        let config = ClockConfig {
            utc_offset_secs: 48 * 3600,
            ..Default::default()
        };
        let clock = ClockDisplay::new(&config);
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 7, 0).unwrap();
        assert_eq!(clock.format(now), "09:07");
    }
}
