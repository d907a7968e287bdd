//! Definitions of the two time axes of a chart.
//!
//! [`Beat`] indexes the musical grid that timing directives are keyed by.
//! [`Millis`] measures elapsed real time on the compiled timeline. They are
//! deliberately separate types; the compiler converts beats to milliseconds
//! through the tempo curve and never the other way around.

use num::{ToPrimitive, Zero, rational::Rational64};

/// A fractional beat position in the chart's musical grid.
///
/// Beats are exact rationals so that directive keys survive parsing without
/// drift; they are only lowered to `f64` at the edge of the timing arithmetic.
/// Chart invariants require every directive beat to be non-negative, which the
/// compiler validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Beat(Rational64);

impl Beat {
    /// Beat zero, the start of the chart.
    pub const ZERO: Self = Self(Rational64::new_raw(0, 1));

    /// Creates a beat from a numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if `denominator` is 0.
    #[must_use]
    pub fn new(numerator: i64, denominator: i64) -> Self {
        Self(Rational64::new(numerator, denominator))
    }

    /// Creates a beat at a whole-beat position.
    #[must_use]
    pub fn from_integer(beats: i64) -> Self {
        Self(Rational64::from_integer(beats))
    }

    /// Returns the exact rational value.
    #[must_use]
    pub const fn value(&self) -> &Rational64 {
        &self.0
    }

    /// Lowers the beat onto the `f64` axis used by the timing arithmetic.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    /// Whether this beat lies before beat zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0 < Rational64::zero()
    }
}

impl From<Rational64> for Beat {
    fn from(value: Rational64) -> Self {
        Self(value)
    }
}

impl std::ops::Add for Beat {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Beat {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl std::fmt::Display for Beat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A span or position in real time, in milliseconds, on the compiled timeline.
///
/// Kept as `f64` through the whole pipeline; the assembler rounds to integer
/// milliseconds exactly once, at the very end.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Millis(pub f64);

impl Millis {
    /// The zero duration.
    pub const ZERO: Self = Self(0.0);

    /// Returns the raw millisecond value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Total order over the underlying `f64`, for deterministic sorting.
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }

    /// Rounds half away from zero to an integer millisecond count.
    #[must_use]
    pub fn round(self) -> i64 {
        self.0.round() as i64
    }
}

impl From<f64> for Millis {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl std::ops::Add for Millis {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for Millis {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl std::ops::Sub for Millis {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl std::ops::SubAssign for Millis {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl std::fmt::Display for Millis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
