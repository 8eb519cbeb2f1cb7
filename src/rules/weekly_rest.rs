//! Art. 8.6 — weekly rest: a rest of `>= 24h` must occur at least once
//! every 6×24h (144h), and should be `>= 45h` (normal) rather than
//! merely `>= 24h` (reduced, compensation tracking out of scope — see
//! SPEC_FULL.md §9).
//!
//! Grounded on `weekly_rest.py::check_weekly_rest` and
//! `_find_long_rest_periods`.

use crate::aggregate::{weekly_rest_candidates, RestPeriod};
use crate::infringement::{round2, Infringement};
use crate::model::DriverActivity;
use crate::severity::{classify_severity, RuleKind};

const REDUCED_WEEKLY_REST_MINUTES: i64 = 24 * 60;
const MAX_HOURS_WITHOUT_WEEKLY_REST: f64 = 6.0 * 24.0;

/// Checks weekly rest adequacy against Art. 8.6.
///
/// A rest violation presupposes driving occurred; a log with no `Driving`
/// activity at all (only `Work`/`Availability`/`Unknown`) never enters
/// this rule, matching spec.md §8 invariant 6.
pub fn check_weekly_rest(driver: &DriverActivity) -> Vec<Infringement> {
    let mut infringements = Vec::new();
    if driver.activities.is_empty() || driver.driving_activities().is_empty() {
        return infringements;
    }

    let candidates = weekly_rest_candidates(driver);
    let weekly_rests: Vec<&RestPeriod> = candidates
        .iter()
        .filter(|p| p.duration_minutes >= REDUCED_WEEKLY_REST_MINUTES)
        .collect();

    if weekly_rests.is_empty() {
        let first_start = driver.activities.iter().map(|a| a.start).min().unwrap();
        let last_end = driver.activities.iter().map(|a| a.end).max().unwrap();
        let total_hours = (last_end - first_start).num_seconds() as f64 / 3600.0;

        if total_hours > MAX_HOURS_WITHOUT_WEEKLY_REST {
            let best_rest = candidates.iter().max_by_key(|p| p.duration_minutes);
            let best_rest_minutes = best_rest.map_or(0, |p| p.duration_minutes);
            if best_rest_minutes < REDUCED_WEEKLY_REST_MINUTES {
                let missing_hours = (REDUCED_WEEKLY_REST_MINUTES - best_rest_minutes) as f64 / 60.0;
                let severity = classify_severity(RuleKind::WeeklyRest, missing_hours)
                    .expect("missing_hours is positive: best_rest_minutes < REDUCED_WEEKLY_REST_MINUTES");
                infringements.push(Infringement {
                    article: "Art. 8.6".to_string(),
                    rule_description: "No weekly rest within a 6x24h period".to_string(),
                    severity,
                    value: round2(best_rest.map_or(0.0, |p| p.duration_hours())),
                    limit: 24.0,
                    excess: round2(missing_hours),
                    date: first_start.date_naive(),
                    driver_name: driver.driver_name.clone(),
                    card_number: driver.card_number.clone(),
                    details: None,
                });
            }
        }
        return infringements;
    }

    for pair in weekly_rests.windows(2) {
        let (first, second) = (pair[0], pair[1]);
        let gap_hours = (second.start - first.end).num_seconds() as f64 / 3600.0;
        if gap_hours <= MAX_HOURS_WITHOUT_WEEKLY_REST {
            continue;
        }
        // The gap itself establishes the infringement; severity is graded
        // from a floor excess of 3.0h (SI), matching the original's fixed
        // minimum since no shorter rest is known to have been taken here.
        let severity = classify_severity(RuleKind::WeeklyRest, 3.0)
            .expect("3.0 is a valid positive excess");
        infringements.push(Infringement {
            article: "Art. 8.6".to_string(),
            rule_description: "Weekly rest exceeds the 6x24h period".to_string(),
            severity,
            value: round2(gap_hours),
            limit: MAX_HOURS_WITHOUT_WEEKLY_REST,
            excess: round2(gap_hours - MAX_HOURS_WITHOUT_WEEKLY_REST),
            date: first.end.date_naive(),
            driver_name: driver.driver_name.clone(),
            card_number: driver.card_number.clone(),
            details: None,
        });
    }

    infringements
}
