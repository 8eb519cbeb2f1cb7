//! The input contract: activity intervals for one driver.
//!
//! Every type here is value-typed and immutable once constructed. The
//! evaluators in [`crate::rules`] borrow immutable slices of a
//! [`DriverActivity`]'s activities; nothing here mutates in place.

use chrono::{DateTime, Duration, Utc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rounds a duration to the nearest whole minute (half-up).
fn rounded_minutes(duration: Duration) -> i64 {
    let seconds = duration.num_seconds();
    (seconds + 30).div_euclid(60)
}

/// A closed tagged variant over the kinds of tachograph activity.
///
/// `Availability` counts as a qualifying break alongside `Rest` for
/// Art. 7 purposes only ([`crate::rules::breaks`]); everywhere else the
/// two are distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ActivityKind {
    Driving,
    Work,
    Availability,
    Rest,
    Unknown,
}

/// Errors raised when constructing an [`Activity`] from invalid inputs.
///
/// These are constructor-time guards, not rule-evaluator guards: once an
/// `Activity` exists, the six rule evaluators trust it. They silently
/// skip degenerate slivers they themselves compute (e.g. a zero-length
/// leftover after splitting at a day boundary) rather than re-validating
/// caller-supplied activities.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActivityError {
    /// `end` was not strictly after `start`.
    #[error("activity end {end} is not after start {start}")]
    EndNotAfterStart {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    /// `duration_minutes` did not equal the rounded interval length.
    #[error("duration_minutes {given} does not match rounded interval length {expected}")]
    DurationMismatch { given: i64, expected: i64 },
}

/// An interval of one activity kind, bounded by an exclusive invariant
/// `end > start`.
///
/// Intervals may cross midnight. Within a [`DriverActivity`], intervals
/// do not overlap in time; adjacent intervals of the same kind are
/// permitted — the aggregators in [`crate::aggregate`] coalesce them
/// where the rule in question requires it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Activity {
    pub kind: ActivityKind,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
    pub vehicle_registration: Option<String>,
}

impl Activity {
    /// Builds an activity, validating `end > start` and that
    /// `duration_minutes` equals the rounded interval length.
    pub fn new(
        kind: ActivityKind,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        vehicle_registration: Option<String>,
    ) -> Result<Self, ActivityError> {
        if end <= start {
            return Err(ActivityError::EndNotAfterStart { start, end });
        }
        let duration_minutes = rounded_minutes(end - start);
        Ok(Self {
            kind,
            start,
            end,
            duration_minutes,
            vehicle_registration,
        })
    }

    /// Builds an activity with an explicit duration, validating it
    /// against the rounded interval length rather than deriving it.
    pub fn with_duration(
        kind: ActivityKind,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        duration_minutes: i64,
        vehicle_registration: Option<String>,
    ) -> Result<Self, ActivityError> {
        if end <= start {
            return Err(ActivityError::EndNotAfterStart { start, end });
        }
        let expected = rounded_minutes(end - start);
        if duration_minutes != expected {
            return Err(ActivityError::DurationMismatch {
                given: duration_minutes,
                expected,
            });
        }
        Ok(Self {
            kind,
            start,
            end,
            duration_minutes,
            vehicle_registration,
        })
    }

    /// Duration in whole hours, as a float (minutes / 60).
    pub fn duration_hours(&self) -> f64 {
        self.duration_minutes as f64 / 60.0
    }

    pub fn is_driving(&self) -> bool {
        matches!(self.kind, ActivityKind::Driving)
    }

    pub fn is_rest(&self) -> bool {
        matches!(self.kind, ActivityKind::Rest)
    }

    /// Qualifies as a break for Art. 7 purposes: `Rest` or `Availability`.
    pub fn is_break_kind(&self) -> bool {
        matches!(self.kind, ActivityKind::Rest | ActivityKind::Availability)
    }
}

/// A bundle of one driver's identity and chronologically sorted activity
/// sequence.
///
/// Order is by start time ascending, ties broken by end time ascending
/// (stable) — callers are expected to sort once; evaluators re-sort
/// defensively since each is independently testable.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DriverActivity {
    pub driver_name: String,
    pub card_number: String,
    pub activities: Vec<Activity>,
}

impl DriverActivity {
    pub fn new(driver_name: impl Into<String>, card_number: impl Into<String>) -> Self {
        Self {
            driver_name: driver_name.into(),
            card_number: card_number.into(),
            activities: Vec::new(),
        }
    }

    pub fn with_activities(mut self, activities: Vec<Activity>) -> Self {
        self.activities = activities;
        self.sort_activities();
        self
    }

    /// Activities sorted by start time ascending, end time ascending on
    /// ties. Called defensively by every evaluator and aggregator.
    pub fn sorted_activities(&self) -> Vec<&Activity> {
        let mut sorted: Vec<&Activity> = self.activities.iter().collect();
        sorted.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));
        sorted
    }

    fn sort_activities(&mut self) {
        self.activities
            .sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));
    }

    pub fn driving_activities(&self) -> Vec<&Activity> {
        self.activities.iter().filter(|a| a.is_driving()).collect()
    }

    pub fn rest_activities(&self) -> Vec<&Activity> {
        self.activities.iter().filter(|a| a.is_rest()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn dt(y: i32, m: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, mi, 0).unwrap()
    }

    #[test]
    fn rejects_end_not_after_start() {
        let start = dt(2026, 1, 1, 10, 0);
        let end = dt(2026, 1, 1, 9, 0);
        let err = Activity::new(ActivityKind::Driving, start, end, None).unwrap_err();
        assert!(matches!(err, ActivityError::EndNotAfterStart { .. }));
    }

    #[test]
    fn computes_duration_minutes() {
        let start = dt(2026, 1, 1, 6, 0);
        let end = dt(2026, 1, 1, 10, 0);
        let activity = Activity::new(ActivityKind::Driving, start, end, None).unwrap();
        assert_eq!(activity.duration_minutes, 240);
        assert!((activity.duration_hours() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn with_duration_rejects_mismatch() {
        let start = dt(2026, 1, 1, 6, 0);
        let end = dt(2026, 1, 1, 10, 0);
        let err = Activity::with_duration(ActivityKind::Driving, start, end, 100, None)
            .unwrap_err();
        assert!(matches!(err, ActivityError::DurationMismatch { .. }));
    }

    #[test]
    fn driver_activity_sorts_by_start_then_end() {
        let a = Activity::new(
            ActivityKind::Rest,
            dt(2026, 1, 1, 8, 0),
            dt(2026, 1, 1, 9, 0),
            None,
        )
        .unwrap();
        let b = Activity::new(
            ActivityKind::Driving,
            dt(2026, 1, 1, 6, 0),
            dt(2026, 1, 1, 8, 0),
            None,
        )
        .unwrap();
        let driver = DriverActivity::new("Alice", "CARD1").with_activities(vec![a.clone(), b.clone()]);
        let sorted = driver.sorted_activities();
        assert_eq!(sorted[0], &b);
        assert_eq!(sorted[1], &a);
    }
}
