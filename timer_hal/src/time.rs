//! Time abstractions
//!
//! Opaque, explicit time types. Unlike POSIX time there is no wall-clock
//! epoch: an [`Instant`] is only meaningful relative to another instant from
//! the same [`crate::TimerService`], which is exactly what deadline
//! accounting needs. In simulation, time is virtual.

use core::ops::{Add, Sub};
use serde::{Deserialize, Serialize};

/// A point in monotonic time, nanosecond resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Instant {
    nanos: u64,
}

impl Instant {
    /// The origin instant (system start in most services)
    pub const ZERO: Instant = Instant { nanos: 0 };

    /// Creates an instant from nanoseconds since the service origin
    pub const fn from_nanos(nanos: u64) -> Self {
        Self { nanos }
    }

    /// Returns nanoseconds since the service origin
    pub const fn as_nanos(&self) -> u64 {
        self.nanos
    }

    /// Returns whole milliseconds since the service origin
    pub const fn as_millis(&self) -> u64 {
        self.nanos / 1_000_000
    }

    /// Returns the duration since an earlier instant
    ///
    /// Saturates to zero if `earlier` is actually later, so a monotonicity
    /// violation in a timer implementation can never produce a bogus huge
    /// elapsed time.
    pub fn duration_since(&self, earlier: Instant) -> Duration {
        Duration::from_nanos(self.nanos.saturating_sub(earlier.nanos))
    }
}

impl Add<Duration> for Instant {
    type Output = Instant;

    fn add(self, duration: Duration) -> Self::Output {
        Instant::from_nanos(self.nanos.saturating_add(duration.as_nanos()))
    }
}

impl Sub<Duration> for Instant {
    type Output = Instant;

    fn sub(self, duration: Duration) -> Self::Output {
        Instant::from_nanos(self.nanos.saturating_sub(duration.as_nanos()))
    }
}

/// A length of time, nanosecond resolution
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Duration {
    nanos: u64,
}

impl Duration {
    /// The zero-length duration
    pub const ZERO: Duration = Duration { nanos: 0 };

    /// Creates a duration from nanoseconds
    pub const fn from_nanos(nanos: u64) -> Self {
        Self { nanos }
    }

    /// Creates a duration from milliseconds
    pub const fn from_millis(millis: u64) -> Self {
        Self {
            nanos: millis * 1_000_000,
        }
    }

    /// Creates a duration from seconds
    pub const fn from_secs(secs: u64) -> Self {
        Self {
            nanos: secs * 1_000_000_000,
        }
    }

    /// Returns the duration in nanoseconds
    pub const fn as_nanos(&self) -> u64 {
        self.nanos
    }

    /// Returns the duration in whole milliseconds
    pub const fn as_millis(&self) -> u64 {
        self.nanos / 1_000_000
    }

    /// Returns the duration in whole seconds
    pub const fn as_secs(&self) -> u64 {
        self.nanos / 1_000_000_000
    }

    /// Returns true for the zero-length duration
    pub const fn is_zero(&self) -> bool {
        self.nanos == 0
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, other: Duration) -> Self::Output {
        Duration::from_nanos(self.nanos.saturating_add(other.nanos))
    }
}

impl Sub for Duration {
    type Output = Duration;

    fn sub(self, other: Duration) -> Self::Output {
        Duration::from_nanos(self.nanos.saturating_sub(other.nanos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_unit_conversions() {
        let d = Duration::from_secs(2);
        assert_eq!(d, Duration::from_millis(2000));
        assert_eq!(d.as_millis(), 2000);
        assert_eq!(d.as_nanos(), 2_000_000_000);
        assert_eq!(d.as_secs(), 2);
    }

    #[test]
    fn test_duration_arithmetic_saturates() {
        let a = Duration::from_millis(300);
        let b = Duration::from_millis(500);
        assert_eq!(b - a, Duration::from_millis(200));
        assert_eq!(a - b, Duration::ZERO);
        assert_eq!(a + b, Duration::from_millis(800));
    }

    #[test]
    fn test_instant_ordering() {
        let early = Instant::from_nanos(1_000);
        let late = Instant::from_nanos(2_000);
        assert!(late > early);
    }

    #[test]
    fn test_duration_since_saturates_to_zero() {
        let early = Instant::from_nanos(1_000);
        let late = Instant::from_nanos(2_000);
        assert_eq!(late.duration_since(early), Duration::from_nanos(1_000));
        assert_eq!(early.duration_since(late), Duration::ZERO);
    }

    #[test]
    fn test_instant_offset_by_duration() {
        let start = Instant::from_nanos(500);
        let d = Duration::from_nanos(250);
        assert_eq!(start + d, Instant::from_nanos(750));
        assert_eq!(start - d, Instant::from_nanos(250));
    }

    #[test]
    fn test_millis_truncate() {
        let i = Instant::from_nanos(1_999_999);
        assert_eq!(i.as_millis(), 1);
    }
}
