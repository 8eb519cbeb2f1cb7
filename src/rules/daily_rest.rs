//! Art. 8.2 — daily rest: every 24h window following the end of the
//! previous qualifying rest must contain a new rest of `>= 11h` (normal)
//! or `>= 9h` (reduced, at most 3 between consecutive weekly rests).
//!
//! Grounded on `daily_rest.py::check_daily_rest` and
//! `_check_24h_periods_without_rest`. Reduced-rest counting is reset
//! only implicitly (by never being reset), matching the original, which
//! tracks `reduced_count` for the whole driver rather than per
//! inter-weekly-rest cycle — see SPEC_FULL.md §9.

use crate::aggregate::{rest_periods, RestPeriod};
use crate::infringement::{round2, Infringement};
use crate::model::DriverActivity;
use crate::severity::{classify_severity, RuleKind};

const NORMAL_DAILY_REST_MINUTES: i64 = 11 * 60;
const REDUCED_DAILY_REST_MINUTES: i64 = 9 * 60;
const MINIMUM_COUNTABLE_REST_MINUTES: i64 = 7 * 60;
const MAX_REDUCED_PER_WEEK: u32 = 3;

/// Checks daily rest adequacy against Art. 8.2.
///
/// A rest violation presupposes driving occurred; a log with no `Driving`
/// activity at all (only `Work`/`Availability`/`Unknown`) never enters
/// this rule, matching spec.md §8 invariant 6.
pub fn check_daily_rest(driver: &DriverActivity) -> Vec<Infringement> {
    let mut infringements = Vec::new();
    if driver.activities.is_empty() || driver.driving_activities().is_empty() {
        return infringements;
    }

    let periods = rest_periods(driver);
    let mut reduced_count = 0u32;

    for period in &periods {
        if period.duration_minutes < MINIMUM_COUNTABLE_REST_MINUTES {
            continue; // too short to count as an attempted daily rest at all
        }

        if period.duration_minutes >= NORMAL_DAILY_REST_MINUTES {
            continue;
        }

        if period.duration_minutes >= REDUCED_DAILY_REST_MINUTES {
            reduced_count += 1;
            if reduced_count <= MAX_REDUCED_PER_WEEK {
                continue; // within the allowance
            }
            let missing_hours = (NORMAL_DAILY_REST_MINUTES - period.duration_minutes) as f64 / 60.0;
            let severity = classify_severity(RuleKind::DailyRest, missing_hours)
                .expect("missing_hours is positive by construction above");
            infringements.push(Infringement {
                article: "Art. 8.2".to_string(),
                rule_description: "Daily rest insufficient (too many reduced rests)".to_string(),
                severity,
                value: round2(period.duration_hours()),
                limit: 11.0,
                excess: round2(missing_hours),
                date: period.start.date_naive(),
                driver_name: driver.driver_name.clone(),
                card_number: driver.card_number.clone(),
                details: Some(format!(
                    "reduced rest #{reduced_count} (max {MAX_REDUCED_PER_WEEK} allowed)"
                )),
            });
            continue;
        }

        // Below 9h: always an infringement, regardless of the reduced-rest count.
        let missing_hours = (REDUCED_DAILY_REST_MINUTES - period.duration_minutes) as f64 / 60.0;
        let severity = classify_severity(RuleKind::DailyRest, missing_hours)
            .expect("missing_hours is positive by construction above");
        infringements.push(Infringement {
            article: "Art. 8.2".to_string(),
            rule_description: "Daily rest insufficient".to_string(),
            severity,
            value: round2(period.duration_hours()),
            limit: 9.0,
            excess: round2(missing_hours),
            date: period.start.date_naive(),
            driver_name: driver.driver_name.clone(),
            card_number: driver.card_number.clone(),
            details: None,
        });
    }

    check_24h_periods_without_rest(driver, &periods, &mut infringements);

    infringements
}

/// Flags stretches longer than 24h with no `>= 9h` qualifying rest
/// anywhere inside them.
fn check_24h_periods_without_rest(
    driver: &DriverActivity,
    periods: &[RestPeriod],
    infringements: &mut Vec<Infringement>,
) {
    let qualifying: Vec<&RestPeriod> = periods
        .iter()
        .filter(|p| p.duration_minutes >= REDUCED_DAILY_REST_MINUTES)
        .collect();

    if qualifying.is_empty() {
        let first_start = driver.activities.iter().map(|a| a.start).min().unwrap();
        let last_end = driver.activities.iter().map(|a| a.end).max().unwrap();
        let total_hours = (last_end - first_start).num_seconds() as f64 / 3600.0;

        if total_hours > 24.0 {
            let severity = classify_severity(RuleKind::DailyRest, 9.0)
                .expect("9.0 is a valid positive excess");
            infringements.push(Infringement {
                article: "Art. 8.2".to_string(),
                rule_description: "No daily rest over 24h+".to_string(),
                severity,
                value: 0.0,
                limit: 9.0,
                excess: 9.0,
                date: first_start.date_naive(),
                driver_name: driver.driver_name.clone(),
                card_number: driver.card_number.clone(),
                details: None,
            });
        }
        return;
    }

    for pair in qualifying.windows(2) {
        let (first, second) = (pair[0], pair[1]);
        let gap_hours = (second.start - first.end).num_seconds() as f64 / 3600.0;
        if gap_hours <= 24.0 {
            continue;
        }

        let mut best_rest: Option<&RestPeriod> = None;
        for p in periods {
            if p.start >= first.end && p.end <= second.start && p.duration_minutes < REDUCED_DAILY_REST_MINUTES {
                if p.duration_minutes > best_rest.map_or(0, |b| b.duration_minutes) {
                    best_rest = Some(p);
                }
            }
        }
        let best_rest_minutes = best_rest.map_or(0, |p| p.duration_minutes);

        let missing_hours = (REDUCED_DAILY_REST_MINUTES - best_rest_minutes) as f64 / 60.0;
        let severity = classify_severity(RuleKind::DailyRest, missing_hours)
            .expect("missing_hours is positive: best_rest_minutes < REDUCED_DAILY_REST_MINUTES");
        infringements.push(Infringement {
            article: "Art. 8.2".to_string(),
            rule_description: "Daily rest insufficient within a 24h period".to_string(),
            severity,
            value: round2(best_rest.map_or(0.0, |p| p.duration_hours())),
            limit: 9.0,
            excess: round2(missing_hours),
            date: first.end.date_naive(),
            driver_name: driver.driver_name.clone(),
            card_number: driver.card_number.clone(),
            details: None,
        });
    }
}
