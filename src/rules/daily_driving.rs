//! Art. 6.1 — daily driving time, max 9h with a 10h tolerance available
//! on at most 2 days per ISO week.
//!
//! Grounded on `driving_time.py::check_daily_driving`, including its
//! explicit handling of the exact-10h boundary as within tolerance (see
//! SPEC_FULL.md's "Supplemented from original_source").

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::aggregate::{driving_minutes_per_day, monday_of_week};
use crate::infringement::{round2, Infringement};
use crate::model::DriverActivity;
use crate::severity::{classify_severity, RuleKind};

const DAILY_LIMIT_MINUTES: f64 = 9.0 * 60.0;
const EXTENDED_LIMIT_MINUTES: f64 = 10.0 * 60.0;
const MAX_EXTENDED_DAYS_PER_WEEK: u32 = 2;

/// Checks daily driving time against Art. 6.1.
pub fn check_daily_driving(driver: &DriverActivity) -> Vec<Infringement> {
    let mut infringements = Vec::new();
    let daily_minutes = driving_minutes_per_day(driver);

    let mut extended_days_used: HashMap<NaiveDate, u32> = HashMap::new();

    for (&day, &minutes) in &daily_minutes {
        let hours = minutes / 60.0;
        let monday = monday_of_week(day);

        if minutes <= DAILY_LIMIT_MINUTES {
            continue;
        }

        let (excess_hours, limit) = if minutes <= EXTENDED_LIMIT_MINUTES {
            let used = extended_days_used.entry(monday).or_insert(0);
            *used += 1;
            if *used <= MAX_EXTENDED_DAYS_PER_WEEK {
                continue;
            }
            ((minutes - DAILY_LIMIT_MINUTES) / 60.0, 9.0)
        } else {
            let used = extended_days_used.entry(monday).or_insert(0);
            if *used < MAX_EXTENDED_DAYS_PER_WEEK {
                *used += 1;
                ((minutes - EXTENDED_LIMIT_MINUTES) / 60.0, 10.0)
            } else {
                ((minutes - DAILY_LIMIT_MINUTES) / 60.0, 9.0)
            }
        };

        if excess_hours <= 0.0 {
            continue;
        }

        let severity = classify_severity(RuleKind::DailyDriving, excess_hours)
            .expect("excess_hours is positive by construction above");

        infringements.push(Infringement {
            article: "Art. 6.1".to_string(),
            rule_description: "Daily driving time".to_string(),
            severity,
            value: round2(hours),
            limit,
            excess: round2(excess_hours),
            date: day,
            driver_name: driver.driver_name.clone(),
            card_number: driver.card_number.clone(),
            details: None,
        });
    }

    infringements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Activity, ActivityKind};
    use crate::severity::Severity;
    use chrono::{TimeZone, Utc};

    fn dt(y: i32, m: u32, d: u32, h: u32, mi: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, mi, 0).unwrap()
    }

    fn driving(start: chrono::DateTime<Utc>, end: chrono::DateTime<Utc>) -> Activity {
        Activity::new(ActivityKind::Driving, start, end, None).unwrap()
    }

    /// S4 — single 15h driving day: one MSI infringement, excess 5h over
    /// the 10h tolerated limit.
    #[test]
    fn s4_daily_driving_15h() {
        let driver = DriverActivity::new("Driver", "CARD").with_activities(vec![driving(
            dt(2026, 1, 5, 5, 0),
            dt(2026, 1, 5, 20, 0),
        )]);
        let infringements = check_daily_driving(&driver);
        assert_eq!(infringements.len(), 1);
        let inf = &infringements[0];
        assert_eq!(inf.article, "Art. 6.1");
        assert_eq!(inf.severity, Severity::Msi);
        assert_eq!(inf.limit, 10.0);
        assert_eq!(inf.excess, 5.0);
    }

    /// S5 — third consecutive 9.5h day in one week is the only
    /// infringement; the first two consume the two tolerance slots.
    #[test]
    fn s5_third_extended_day() {
        // Monday 2026-01-05, Tuesday 2026-01-06, Wednesday 2026-01-07.
        let acts = vec![
            driving(dt(2026, 1, 5, 6, 0), dt(2026, 1, 5, 15, 30)),
            driving(dt(2026, 1, 6, 6, 0), dt(2026, 1, 6, 15, 30)),
            driving(dt(2026, 1, 7, 6, 0), dt(2026, 1, 7, 15, 30)),
        ];
        let driver = DriverActivity::new("Driver", "CARD").with_activities(acts);
        let infringements = check_daily_driving(&driver);
        assert_eq!(infringements.len(), 1);
        assert_eq!(infringements[0].date, dt(2026, 1, 7, 0, 0).date_naive());
    }

    #[test]
    fn exact_ten_hours_is_within_tolerance() {
        let driver = DriverActivity::new("Driver", "CARD").with_activities(vec![driving(
            dt(2026, 1, 5, 6, 0),
            dt(2026, 1, 5, 16, 0),
        )]);
        let infringements = check_daily_driving(&driver);
        assert!(infringements.is_empty());
    }

    #[test]
    fn compliant_driving_emits_nothing() {
        let driver = DriverActivity::new("Driver", "CARD").with_activities(vec![driving(
            dt(2026, 1, 5, 6, 0),
            dt(2026, 1, 5, 14, 0),
        )]);
        assert!(check_daily_driving(&driver).is_empty());
    }
}
