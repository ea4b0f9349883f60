//! Simulated time
//!
//! Every entity that takes part in a run owns a [`SimClock`]. Instants are a
//! single integer count of microseconds since the Unix epoch, so differences,
//! ordering and duration arithmetic are exact. Calendar text is only produced
//! or parsed at the boundary.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

use crate::simulation::error::{SimulationError, SimulationResult};

/// Calendar format used for scenario input and rendered output
pub const TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S%.f";

const ALTERNATE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

const MICROS_PER_SECOND: i64 = 1_000_000;

/// A signed span of simulated time with microsecond resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SimDuration(i64);

impl SimDuration {
    /// The empty duration
    pub const ZERO: SimDuration = SimDuration(0);

    /// Create a duration from whole seconds
    pub fn from_secs(secs: i64) -> Self {
        Self(secs * MICROS_PER_SECOND)
    }

    /// Create a duration from fractional seconds, rounded to the nearest microsecond
    pub fn from_secs_f64(secs: f64) -> Self {
        Self((secs * MICROS_PER_SECOND as f64).round() as i64)
    }

    /// Create a duration from microseconds
    pub fn from_micros(micros: i64) -> Self {
        Self(micros)
    }

    /// Length in microseconds
    pub fn as_micros(&self) -> i64 {
        self.0
    }

    /// Length in fractional seconds
    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / MICROS_PER_SECOND as f64
    }

    /// Whether the duration is negative
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl Add for SimDuration {
    type Output = SimDuration;

    fn add(self, rhs: SimDuration) -> SimDuration {
        SimDuration(self.0 + rhs.0)
    }
}

impl fmt::Display for SimDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.as_secs_f64())
    }
}

impl Serialize for SimDuration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.as_secs_f64())
    }
}

impl<'de> Deserialize<'de> for SimDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        Ok(SimDuration::from_secs_f64(secs))
    }
}

/// A point on the simulated timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SimInstant(i64);

impl SimInstant {
    /// The Unix epoch, used as the default anchor
    pub const EPOCH: SimInstant = SimInstant(0);

    /// Create an instant from microseconds since the Unix epoch
    pub fn from_micros(micros: i64) -> Self {
        Self(micros)
    }

    /// Microseconds since the Unix epoch
    pub fn as_micros(&self) -> i64 {
        self.0
    }

    /// Parse a calendar timestamp such as `2023/01/01 08:00:00` (UTC)
    pub fn parse(text: &str) -> SimulationResult<Self> {
        let text = text.trim();
        std::iter::once(TIME_FORMAT)
            .chain(ALTERNATE_FORMATS)
            .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
            .map(Self::from_naive)
            .ok_or_else(|| {
                SimulationError::configuration_error(format!(
                    "Invalid timestamp '{}' (expected YYYY/MM/DD HH:MM:SS)",
                    text
                ))
            })
    }

    /// Convert from a naive UTC calendar time
    pub fn from_naive(datetime: NaiveDateTime) -> Self {
        Self::from_datetime(Utc.from_utc_datetime(&datetime))
    }

    /// Convert from a UTC calendar time
    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self(datetime.timestamp() * MICROS_PER_SECOND + i64::from(datetime.timestamp_subsec_micros()))
    }

    /// Convert to a UTC calendar time.
    ///
    /// Instants from `parse`, `from_datetime` and [`SimClock`] are always in
    /// range. Anything else outside chrono's range renders as its minimum.
    pub fn to_datetime(&self) -> DateTime<Utc> {
        self.calendar().unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// `self + duration`, or `None` if the sum leaves the calendar range
    pub fn checked_add(&self, duration: SimDuration) -> Option<SimInstant> {
        let instant = SimInstant(self.0.checked_add(duration.0)?);
        instant.calendar().map(|_| instant)
    }

    fn calendar(&self) -> Option<DateTime<Utc>> {
        let secs = self.0.div_euclid(MICROS_PER_SECOND);
        let nanos = (self.0.rem_euclid(MICROS_PER_SECOND) * 1_000) as u32;
        Utc.timestamp_opt(secs, nanos).single()
    }

    /// Time elapsed since `earlier` (negative if `earlier` is later)
    pub fn since(&self, earlier: SimInstant) -> SimDuration {
        SimDuration(self.0 - earlier.0)
    }
}

impl Add<SimDuration> for SimInstant {
    type Output = SimInstant;

    fn add(self, rhs: SimDuration) -> SimInstant {
        SimInstant(self.0 + rhs.0)
    }
}

impl AddAssign<SimDuration> for SimInstant {
    fn add_assign(&mut self, rhs: SimDuration) {
        self.0 += rhs.0;
    }
}

impl Sub for SimInstant {
    type Output = SimDuration;

    fn sub(self, rhs: SimInstant) -> SimDuration {
        self.since(rhs)
    }
}

impl fmt::Display for SimInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_datetime().format(TIME_FORMAT))
    }
}

impl Serialize for SimInstant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SimInstant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        SimInstant::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Per-entity simulated clock. Never moves backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimClock {
    current: SimInstant,
}

impl SimClock {
    /// Create a clock anchored at `anchor`
    pub fn new(anchor: SimInstant) -> Self {
        Self { current: anchor }
    }

    /// The clock's current instant
    pub fn current(&self) -> SimInstant {
        self.current
    }

    /// Move forward by `duration`. Negative durations are ignored.
    ///
    /// Fails with a configuration error when the new instant cannot be
    /// represented, which only happens for absurd speeds or thresholds.
    pub fn advance(&mut self, duration: SimDuration) -> SimulationResult<()> {
        debug_assert!(!duration.is_negative(), "clock cannot advance by {}", duration);
        if duration.is_negative() {
            return Ok(());
        }
        self.current = self.current.checked_add(duration).ok_or_else(|| {
            SimulationError::configuration_error(format!(
                "Clock at {} cannot advance by {} seconds",
                self.current,
                duration.as_secs_f64()
            ))
        })?;
        Ok(())
    }

    /// Jump to `instant` unless it is earlier than the current instant.
    /// Returns whether the clock moved.
    pub fn set_to(&mut self, instant: SimInstant) -> bool {
        if instant >= self.current {
            self.current = instant;
            true
        } else {
            false
        }
    }

    /// Adopt the later of this clock and `other`
    pub fn sync_from(&mut self, other: &SimClock) {
        self.set_to(other.current);
    }
}

/// An entity whose clock can anchor an event
pub trait TimeHost {
    /// The entity's clock
    fn clock(&self) -> &SimClock;

    /// Shorthand for the clock's current instant
    fn now(&self) -> SimInstant {
        self.clock().current()
    }
}

impl TimeHost for SimClock {
    fn clock(&self) -> &SimClock {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(text: &str) -> SimInstant {
        SimInstant::parse(text).unwrap()
    }

    #[test]
    fn test_parse_and_format_round_trip() {
        let instant = at("2023/01/01 08:00:10");
        assert_eq!(instant.to_string(), "2023/01/01 08:00:10");

        let fractional = instant + SimDuration::from_secs_f64(1.25);
        assert_eq!(fractional.to_string(), "2023/01/01 08:00:11.250");
        assert_eq!(at(&fractional.to_string()), fractional);
    }

    #[test]
    fn test_parse_alternate_formats() {
        assert_eq!(at("2023-01-01 08:00:00"), at("2023/01/01 08:00:00"));
        assert_eq!(at("2023-01-01T08:00:00"), at("2023/01/01 08:00:00"));
        assert!(SimInstant::parse("yesterday").is_err());
    }

    #[test]
    fn test_instant_arithmetic_is_exact() {
        let start = at("2023/01/01 08:00:00");
        let later = at("2023/01/01 08:05:20");
        assert_eq!(later - start, SimDuration::from_secs(320));
        assert_eq!(start.since(later), SimDuration::from_secs(-320));
        assert_eq!(start + SimDuration::from_secs(320), later);
    }

    #[test]
    fn test_duration_rounds_to_microseconds() {
        let d = SimDuration::from_secs_f64(1.0 / 3.0);
        assert_eq!(d.as_micros(), 333_333);
        assert_eq!(SimDuration::from_secs_f64(2.5).as_secs_f64(), 2.5);
    }

    #[test]
    fn test_clock_advance() {
        let mut clock = SimClock::new(at("2023/01/01 08:00:00"));
        clock.advance(SimDuration::from_secs(90)).unwrap();
        assert_eq!(clock.current(), at("2023/01/01 08:01:30"));
    }

    #[test]
    fn test_clock_advance_out_of_range_fails() {
        let start = at("2023/01/01 08:00:00");
        let mut clock = SimClock::new(start);

        let err = clock.advance(SimDuration::from_micros(i64::MAX)).unwrap_err();
        assert!(matches!(err, SimulationError::ConfigurationError(_)));
        assert_eq!(clock.current(), start);

        // Inside i64 but past the last representable calendar year
        assert!(start.checked_add(SimDuration::from_secs(270_000 * 365 * 86_400)).is_none());
        assert!(start.checked_add(SimDuration::from_secs(60)).is_some());
    }

    #[test]
    fn test_clock_set_to_is_monotonic() {
        let mut clock = SimClock::new(at("2023/01/01 08:00:00"));
        assert!(clock.set_to(at("2023/01/01 09:00:00")));
        assert!(!clock.set_to(at("2023/01/01 08:30:00")));
        assert_eq!(clock.current(), at("2023/01/01 09:00:00"));
    }

    #[test]
    fn test_clock_sync_adopts_later_instant() {
        let mut early = SimClock::new(at("2023/01/01 08:00:00"));
        let late = SimClock::new(at("2023/01/01 08:10:00"));

        early.sync_from(&late);
        assert_eq!(early.current(), late.current());

        let mut ahead = SimClock::new(at("2023/01/01 09:00:00"));
        ahead.sync_from(&late);
        assert_eq!(ahead.current(), at("2023/01/01 09:00:00"));
    }

    #[test]
    fn test_instant_serializes_as_calendar_text() {
        let instant = at("2024/02/29 23:59:59");
        let json = serde_json::to_string(&instant).unwrap();
        assert_eq!(json, "\"2024/02/29 23:59:59\"");
        let back: SimInstant = serde_json::from_str(&json).unwrap();
        assert_eq!(back, instant);
    }

    #[test]
    fn test_pre_epoch_instants() {
        let instant = at("1969/12/31 23:59:59.5");
        assert!(instant.as_micros() < 0);
        assert_eq!(instant.to_string(), "1969/12/31 23:59:59.500");
    }
}
