//! Derived aggregations over a driver's activity sequence: per-day and
//! per-ISO-week driving-minute totals, and contiguous rest-period
//! reconstruction.
//!
//! These are pure functions over borrowed slices; they allocate fresh
//! maps/vectors and retain no state across calls, per spec.md §5.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use crate::model::{Activity, ActivityKind, DriverActivity};

/// A maximal contiguous rest block reconstructed from raw activities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
}

impl RestPeriod {
    pub fn duration_hours(&self) -> f64 {
        self.duration_minutes as f64 / 60.0
    }
}

/// Splits each `Driving` activity at local-calendar-day boundaries and
/// sums minutes per day. Days with no driving are absent from the map
/// (not an explicit zero), per spec.md §4.1.
///
/// Timestamps are assumed UTC; "local day" means the UTC calendar day,
/// per spec.md §9's timezone assumption.
pub fn driving_minutes_per_day(driver: &DriverActivity) -> BTreeMap<NaiveDate, f64> {
    let mut daily: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    for activity in &driver.activities {
        if activity.kind != ActivityKind::Driving {
            continue;
        }
        if activity.end <= activity.start {
            continue; // degenerate sliver: silently skipped per spec.md §8
        }

        let mut cursor = activity.start;
        while cursor.date_naive() < activity.end.date_naive() {
            let end_of_day = cursor
                .date_naive()
                .and_hms_opt(23, 59, 59)
                .unwrap()
                .and_utc();
            let minutes = (end_of_day - cursor).num_seconds() as f64 / 60.0 + 1.0 / 60.0;
            *daily.entry(cursor.date_naive()).or_insert(0.0) += minutes;
            cursor = (cursor + Duration::days(1))
                .date_naive()
                .and_hms_opt(0, 0, 0)
                .unwrap()
                .and_utc();
        }
        let minutes = (activity.end - cursor).num_seconds() as f64 / 60.0;
        if minutes > 0.0 {
            *daily.entry(cursor.date_naive()).or_insert(0.0) += minutes;
        }
    }

    daily
}

/// The Monday of the ISO week containing `day`.
pub fn monday_of_week(day: NaiveDate) -> NaiveDate {
    day - Duration::days(day.weekday().num_days_from_monday() as i64)
}

/// Aggregates per-day driving minutes into per-week totals, keyed by the
/// Monday of each ISO week.
pub fn driving_minutes_per_week(daily: &BTreeMap<NaiveDate, f64>) -> BTreeMap<NaiveDate, f64> {
    let mut weekly: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for (&day, &minutes) in daily {
        *weekly.entry(monday_of_week(day)).or_insert(0.0) += minutes;
    }
    weekly
}

/// Reconstructs maximal contiguous blocks of a single `kind`, coalescing
/// activities whose gap is `<= 1` minute. Any other activity kind ends
/// the current block.
fn contiguous_blocks(activities: &[&Activity], kind: ActivityKind) -> Vec<RestPeriod> {
    let mut blocks = Vec::new();
    let mut current: Option<(DateTime<Utc>, DateTime<Utc>)> = None;

    for activity in activities {
        if activity.kind == kind {
            match current {
                None => current = Some((activity.start, activity.end)),
                Some((start, end)) => {
                    if activity.start <= end + Duration::minutes(1) {
                        current = Some((start, end.max(activity.end)));
                    } else {
                        blocks.push(finish_block(start, end));
                        current = Some((activity.start, activity.end));
                    }
                }
            }
        } else if let Some((start, end)) = current.take() {
            blocks.push(finish_block(start, end));
        }
    }
    if let Some((start, end)) = current {
        blocks.push(finish_block(start, end));
    }
    blocks
}

fn finish_block(start: DateTime<Utc>, end: DateTime<Utc>) -> RestPeriod {
    let duration_minutes = ((end - start).num_seconds() + 30).div_euclid(60);
    RestPeriod {
        start,
        end,
        duration_minutes,
    }
}

/// All maximal contiguous `Rest` blocks, in chronological order.
///
/// Used directly by Art. 8.2 (daily rest); Art. 8.6 (weekly rest) filters
/// this to blocks of duration `>= 12h` (half of 24h) as documented in
/// spec.md §4.1, to bound candidate weekly-rest anchors.
pub fn rest_periods(driver: &DriverActivity) -> Vec<RestPeriod> {
    let sorted = driver.sorted_activities();
    contiguous_blocks(&sorted, ActivityKind::Rest)
}

/// [`rest_periods`] filtered to blocks of duration `>= 12h`, the
/// candidate pool for Art. 8.6's weekly-rest anchors.
pub fn weekly_rest_candidates(driver: &DriverActivity) -> Vec<RestPeriod> {
    rest_periods(driver)
        .into_iter()
        .filter(|p| p.duration_minutes >= 12 * 60)
        .collect()
}
