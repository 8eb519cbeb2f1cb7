//! Art. 6.3 — driving time over any two consecutive ISO weeks, max 90h.
//!
//! Grounded on `driving_time.py::check_biweekly_driving`: non-contiguous
//! week pairs (a gap week with no recorded activity) are skipped
//! silently rather than compared.

use chrono::Duration;

use crate::aggregate::{driving_minutes_per_day, driving_minutes_per_week};
use crate::infringement::{round2, Infringement};
use crate::model::DriverActivity;
use crate::severity::{classify_severity, RuleKind};

const BIWEEKLY_LIMIT_MINUTES: f64 = 90.0 * 60.0;

/// Checks driving time over consecutive week pairs against Art. 6.3.
pub fn check_biweekly_driving(driver: &DriverActivity) -> Vec<Infringement> {
    let mut infringements = Vec::new();
    let daily_minutes = driving_minutes_per_day(driver);
    let weekly_minutes = driving_minutes_per_week(&daily_minutes);

    let weeks: Vec<_> = weekly_minutes.keys().copied().collect();

    for pair in weeks.windows(2) {
        let (week1, week2) = (pair[0], pair[1]);
        if week2 - week1 != Duration::days(7) {
            continue; // not a contiguous pair
        }
        let total_minutes = weekly_minutes[&week1] + weekly_minutes[&week2];
        if total_minutes <= BIWEEKLY_LIMIT_MINUTES {
            continue;
        }
        let excess_hours = (total_minutes - BIWEEKLY_LIMIT_MINUTES) / 60.0;
        let severity = classify_severity(RuleKind::BiweeklyDriving, excess_hours)
            .expect("excess_hours is positive by construction above");
        let sunday = week2 + Duration::days(6);

        infringements.push(Infringement {
            article: "Art. 6.3".to_string(),
            rule_description: "Driving time over two consecutive weeks".to_string(),
            severity,
            value: round2(total_minutes / 60.0),
            limit: 90.0,
            excess: round2(excess_hours),
            date: sunday,
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
    use chrono::{NaiveDate, TimeZone, Utc};

    fn dt(y: i32, m: u32, d: u32, h: u32, mi: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, mi, 0).unwrap()
    }

    fn driving(start: chrono::DateTime<Utc>, end: chrono::DateTime<Utc>) -> Activity {
        Activity::new(ActivityKind::Driving, start, end, None).unwrap()
    }

    #[test]
    fn flags_two_consecutive_heavy_weeks() {
        // Two consecutive weeks (Mon 2026-01-05, Mon 2026-01-12), each
        // with 5 days of 10h driving = 50h/week, total 100h > 90h.
        let mut acts = Vec::new();
        for week_start in [5, 12] {
            for i in 0..5 {
                let day = week_start + i;
                acts.push(driving(dt(2026, 1, day, 6, 0), dt(2026, 1, day, 16, 0)));
            }
        }
        let driver = DriverActivity::new("Driver", "CARD").with_activities(acts);
        let infringements = check_biweekly_driving(&driver);
        assert_eq!(infringements.len(), 1);
        let inf = &infringements[0];
        assert_eq!(inf.limit, 90.0);
        assert_eq!(inf.excess, 10.0);
        assert_eq!(inf.date, NaiveDate::from_ymd_opt(2026, 1, 18).unwrap());
    }

    #[test]
    fn skips_non_contiguous_weeks() {
        // Week of 2026-01-05 heavy, then a gap, then week of 2026-01-26
        // (three weeks later) also heavy: not an adjacent pair.
        let mut acts = Vec::new();
        for week_start in [5, 26] {
            for i in 0..5 {
                let day = week_start + i;
                acts.push(driving(dt(2026, 1, day, 6, 0), dt(2026, 1, day, 16, 0)));
            }
        }
        let driver = DriverActivity::new("Driver", "CARD").with_activities(acts);
        assert!(check_biweekly_driving(&driver).is_empty());
    }
}
