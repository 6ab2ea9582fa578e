use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A signed span of game time, counted in 100ns ticks.
///
/// Hosts can report negative elapsed values (clock adjustments, reordered
/// timestamps), so unlike `std::time::Duration` this type is signed. All
/// scheduling arithmetic is done on the integer tick count, which keeps step
/// extraction exact and replayable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticks(pub i64);

impl Ticks {
    pub const ZERO: Ticks = Ticks(0);
    pub const PER_MILLISECOND: i64 = 10_000;
    pub const PER_SECOND: i64 = 10_000_000;

    pub const fn from_millis(ms: i64) -> Self {
        Self(ms * Self::PER_MILLISECOND)
    }

    /// Fractional milliseconds, rounded to the nearest tick.
    pub fn from_millis_f64(ms: f64) -> Self {
        Self((ms * Self::PER_MILLISECOND as f64).round() as i64)
    }

    pub fn from_secs_f64(secs: f64) -> Self {
        Self((secs * Self::PER_SECOND as f64).round() as i64)
    }

    /// Raw tick count.
    pub const fn get(self) -> i64 {
        self.0
    }

    pub fn as_millis_f64(self) -> f64 {
        self.0 as f64 / Self::PER_MILLISECOND as f64
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / Self::PER_SECOND as f64
    }

    pub fn as_secs_f32(self) -> f32 {
        self.as_secs_f64() as f32
    }

    pub fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Converts to a `Duration`, or `None` if the span is negative.
    pub fn to_std(self) -> Option<Duration> {
        u64::try_from(self.0)
            .ok()
            .map(|ticks| Duration::from_nanos(ticks.saturating_mul(100)))
    }
}

impl From<Duration> for Ticks {
    fn from(d: Duration) -> Self {
        let ticks = d.as_nanos() / 100;
        Self(i64::try_from(ticks).unwrap_or(i64::MAX))
    }
}

impl Add for Ticks {
    type Output = Ticks;

    fn add(self, rhs: Ticks) -> Ticks {
        Ticks(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Ticks {
    fn add_assign(&mut self, rhs: Ticks) {
        *self = *self + rhs;
    }
}

impl Sub for Ticks {
    type Output = Ticks;

    fn sub(self, rhs: Ticks) -> Ticks {
        Ticks(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Ticks {
    fn sub_assign(&mut self, rhs: Ticks) {
        *self = *self - rhs;
    }
}

impl Mul<u64> for Ticks {
    type Output = Ticks;

    fn mul(self, rhs: u64) -> Ticks {
        let rhs = i64::try_from(rhs).unwrap_or(i64::MAX);
        Ticks(self.0.saturating_mul(rhs))
    }
}

impl fmt::Display for Ticks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}ms", self.as_millis_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millisecond_conversions() {
        assert_eq!(Ticks::from_millis(500).get(), 5_000_000);
        assert_eq!(Ticks::from_millis_f64(16.6667).get(), 166_667);
        assert_eq!(Ticks(166_667).as_millis_f64(), 16.6667);
    }

    #[test]
    fn negative_spans_have_no_std_duration() {
        assert_eq!(Ticks(-1).to_std(), None);
        assert_eq!(Ticks(10).to_std(), Some(Duration::from_nanos(1_000)));
    }

    #[test]
    fn from_std_duration() {
        assert_eq!(Ticks::from(Duration::from_millis(40)), Ticks::from_millis(40));
    }

    #[test]
    fn arithmetic_saturates() {
        assert_eq!(Ticks(i64::MAX) + Ticks(1), Ticks(i64::MAX));
        assert_eq!(Ticks(i64::MIN).abs(), Ticks(i64::MAX));
        assert_eq!(Ticks(3) * 4, Ticks(12));
    }

    #[test]
    fn display_in_millis() {
        assert_eq!(Ticks::from_millis(40).to_string(), "40.0000ms");
    }
}
