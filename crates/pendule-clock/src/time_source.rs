use chrono::{Local, Timelike};

use crate::error::TimeSourceError;

pub const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// Wall-clock reader used for resyncs.
pub trait TimeSource {
    /// Local time of day in whole seconds, in `[0, 86400)`.
    fn seconds_of_day(&self) -> Result<u32, TimeSourceError>;
}

/// Reads the OS clock in the OS local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn seconds_of_day(&self) -> Result<u32, TimeSourceError> {
        Ok(Local::now().num_seconds_from_midnight())
    }
}

/// Always reports the same time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedTimeSource {
    seconds_of_day: u32,
}

impl FixedTimeSource {
    /// Values past midnight wrap into the day.
    pub const fn new(seconds_of_day: u32) -> Self {
        Self {
            seconds_of_day: seconds_of_day % SECONDS_PER_DAY,
        }
    }

    pub const fn hms(h: u32, m: u32, s: u32) -> Self {
        Self::new(h * 3600 + m * 60 + s)
    }
}

impl TimeSource for FixedTimeSource {
    fn seconds_of_day(&self) -> Result<u32, TimeSourceError> {
        Ok(self.seconds_of_day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_time_is_within_a_day() {
        let secs = SystemTimeSource.seconds_of_day().unwrap();
        assert!(secs < SECONDS_PER_DAY);
    }

    #[test]
    fn fixed_time_source_is_constant() {
        let src = FixedTimeSource::hms(10, 8, 42);
        assert_eq!(src.seconds_of_day(), Ok(36_522));
        assert_eq!(src.seconds_of_day(), Ok(36_522));
    }

    #[test]
    fn fixed_time_source_wraps_past_midnight() {
        assert_eq!(FixedTimeSource::new(SECONDS_PER_DAY + 5).seconds_of_day(), Ok(5));
    }
}
