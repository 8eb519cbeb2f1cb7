//! Art. 6.2 — weekly driving time, max 56h per ISO week.
//!
//! Grounded on `driving_time.py::check_weekly_driving`.

use chrono::Duration;

use crate::aggregate::{driving_minutes_per_day, driving_minutes_per_week};
use crate::infringement::{round2, Infringement};
use crate::model::DriverActivity;
use crate::severity::{classify_severity, RuleKind};

const WEEKLY_LIMIT_MINUTES: f64 = 56.0 * 60.0;

/// Checks weekly driving time against Art. 6.2.
pub fn check_weekly_driving(driver: &DriverActivity) -> Vec<Infringement> {
    let mut infringements = Vec::new();
    let daily_minutes = driving_minutes_per_day(driver);
    let weekly_minutes = driving_minutes_per_week(&daily_minutes);

    for (&monday, &minutes) in &weekly_minutes {
        if minutes <= WEEKLY_LIMIT_MINUTES {
            continue;
        }
        let excess_hours = (minutes - WEEKLY_LIMIT_MINUTES) / 60.0;
        let severity = classify_severity(RuleKind::WeeklyDriving, excess_hours)
            .expect("excess_hours is positive by construction above");
        let sunday = monday + Duration::days(6);

        infringements.push(Infringement {
            article: "Art. 6.2".to_string(),
            rule_description: "Weekly driving time".to_string(),
            severity,
            value: round2(minutes / 60.0),
            limit: 56.0,
            excess: round2(excess_hours),
            date: sunday,
            driver_name: driver.driver_name.clone(),
            card_number: driver.card_number.clone(),
            details: None,
        });
    }

    infringements
}
