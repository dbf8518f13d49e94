//! Injectable clock abstraction.
//!
//! The scheduling and lifecycle code never reads wall-clock time from a
//! global. Everything that needs "now" or "today" takes it from a [`Clock`],
//! so tests can pin time to a fixed instant.

use jiff::{civil::Date, tz::TimeZone, Timestamp};

/// Source of the current instant and the user's local time zone.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> Timestamp;

    /// The user's local time zone.
    fn time_zone(&self) -> TimeZone;

    /// The current calendar date in the user's local time zone.
    fn today(&self) -> Date {
        self.now().to_zoned(self.time_zone()).date()
    }
}

/// Clock backed by the system time and system time zone.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }

    fn time_zone(&self) -> TimeZone {
        TimeZone::system()
    }
}

/// Clock pinned to a fixed instant, for tests.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Timestamp,
    time_zone: TimeZone,
}

impl FixedClock {
    /// Creates a fixed clock at the given instant in the given zone.
    pub fn new(now: Timestamp, time_zone: TimeZone) -> Self {
        Self { now, time_zone }
    }

    /// Creates a fixed UTC clock at the given instant.
    pub fn utc(now: Timestamp) -> Self {
        Self::new(now, TimeZone::UTC)
    }

    /// Advances the clock by the given number of seconds.
    ///
    /// # Panics
    ///
    /// Panics if the resulting instant overflows the representable range.
    pub fn advance_secs(&mut self, secs: i64) {
        self.now = self
            .now
            .checked_add(jiff::SignedDuration::from_secs(secs))
            .expect("clock advance overflow");
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.now
    }

    fn time_zone(&self) -> TimeZone {
        self.time_zone.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_today_uses_zone() {
        let ts: Timestamp = "2025-06-01T23:30:00Z".parse().unwrap();
        let utc = FixedClock::utc(ts);
        assert_eq!(utc.today(), jiff::civil::date(2025, 6, 1));

        let tokyo = FixedClock::new(ts, TimeZone::get("Asia/Tokyo").unwrap());
        assert_eq!(tokyo.today(), jiff::civil::date(2025, 6, 2));
    }

    #[test]
    fn test_advance() {
        let ts: Timestamp = "2025-06-01T00:00:00Z".parse().unwrap();
        let mut clock = FixedClock::utc(ts);
        clock.advance_secs(300);
        assert_eq!(clock.now().duration_since(ts).as_secs(), 300);
    }
}
