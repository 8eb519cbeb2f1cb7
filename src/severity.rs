//! Severity classification per Directive 2009/5/EC.
//!
//! Two independent classifiers live here: a time-excess classifier keyed
//! by [`RuleKind`] (daily/weekly/biweekly driving, daily/weekly rest),
//! and a break-adequacy classifier keyed directly on the longest break
//! taken, because it grades a different domain (break length, not
//! excess). The threshold tables are fixed constants — see spec.md §9 —
//! not configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Grade assigned to an infringement, ordered MI < SI < VSI < MSI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Severity {
    #[cfg_attr(feature = "serde", serde(rename = "MI"))]
    Mi,
    #[cfg_attr(feature = "serde", serde(rename = "SI"))]
    Si,
    #[cfg_attr(feature = "serde", serde(rename = "VSI"))]
    Vsi,
    #[cfg_attr(feature = "serde", serde(rename = "MSI"))]
    Msi,
}

impl Severity {
    /// The literal grade tag used in reports and serialization.
    pub const fn tag(self) -> &'static str {
        match self {
            Severity::Mi => "MI",
            Severity::Si => "SI",
            Severity::Vsi => "VSI",
            Severity::Msi => "MSI",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// The closed set of rule kinds the time-excess classifier recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RuleKind {
    DailyDriving,
    WeeklyDriving,
    BiweeklyDriving,
    DailyRest,
    WeeklyRest,
}

impl RuleKind {
    /// `(MI upper bound, SI upper bound, VSI upper bound)`, inclusive, in
    /// hours of excess. Above the VSI bound is MSI.
    const fn thresholds(self) -> (f64, f64, f64) {
        match self {
            RuleKind::DailyDriving => (1.0, 2.0, 4.5),
            RuleKind::WeeklyDriving => (4.0, 8.0, 12.0),
            RuleKind::BiweeklyDriving => (4.0, 8.0, 12.0),
            RuleKind::DailyRest => (1.0, 2.5, 4.5),
            RuleKind::WeeklyRest => (3.0, 9.0, 18.0),
        }
    }
}

/// Errors raised by the severity classifier. These are programming-
/// contract violations (spec.md §7): they surface to the caller rather
/// than being caught or transformed by the orchestrator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassifierError {
    /// A time-excess classification was requested with a non-positive
    /// excess.
    #[error("excess_hours must be positive, got {0}")]
    InvalidExcess(f64),
    /// Break-severity classification was asked for a break of 45 minutes
    /// or more, which is never an infringement.
    #[error("break of {0} minutes is not an infringement (>= 45 min qualifies)")]
    NotAnInfringement(f64),
    /// A severity lookup key did not match any known rule.
    ///
    /// [`RuleKind`] is a closed Rust enum, so [`classify_severity`] can
    /// never actually hit this — exhaustive pattern matching makes the
    /// "unknown key" error class structurally unreachable at that call
    /// site (spec.md §9: "their exhaustiveness guarantees the classifier
    /// table can be statically checked"). The variant is kept, and
    /// reachable, for [`RuleKind::parse`], which is the one place a rule
    /// key still arrives as an unchecked string (e.g. from a
    /// deserialized report referencing a rule by name).
    #[error("unknown rule kind: {0}")]
    UnknownRuleKind(String),
}

impl RuleKind {
    /// Parses a rule-kind key as used in spec.md §4.7's threshold table
    /// (`"daily_driving"`, `"weekly_driving"`, `"biweekly_driving"`,
    /// `"daily_rest"`, `"weekly_rest"`).
    pub fn parse(key: &str) -> Result<Self, ClassifierError> {
        match key {
            "daily_driving" => Ok(RuleKind::DailyDriving),
            "weekly_driving" => Ok(RuleKind::WeeklyDriving),
            "biweekly_driving" => Ok(RuleKind::BiweeklyDriving),
            "daily_rest" => Ok(RuleKind::DailyRest),
            "weekly_rest" => Ok(RuleKind::WeeklyRest),
            other => Err(ClassifierError::UnknownRuleKind(other.to_string())),
        }
    }
}

/// Classifies a time-excess infringement's severity from its rule kind
/// and measured excess in hours. Boundaries are inclusive.
///
/// # Errors
/// Returns [`ClassifierError::InvalidExcess`] if `excess_hours <= 0`.
pub fn classify_severity(kind: RuleKind, excess_hours: f64) -> Result<Severity, ClassifierError> {
    if excess_hours <= 0.0 {
        return Err(ClassifierError::InvalidExcess(excess_hours));
    }
    let (mi, si, vsi) = kind.thresholds();
    Ok(if excess_hours <= mi {
        Severity::Mi
    } else if excess_hours <= si {
        Severity::Si
    } else if excess_hours <= vsi {
        Severity::Vsi
    } else {
        Severity::Msi
    })
}

/// Classifies an Art. 7 break-adequacy infringement from the longest
/// break actually taken during the overrun cycle, in minutes.
///
/// This is a distinct domain from [`classify_severity`]: smaller breaks
/// are *worse* here, the inverse of the time-excess tables.
///
/// # Errors
/// Returns [`ClassifierError::NotAnInfringement`] if `break_minutes >=
/// 45.0` — no infringement should reach this path at that length.
pub fn classify_break_severity(break_minutes: f64) -> Result<Severity, ClassifierError> {
    if break_minutes >= 45.0 {
        return Err(ClassifierError::NotAnInfringement(break_minutes));
    }
    Ok(if break_minutes >= 30.0 {
        Severity::Mi
    } else if break_minutes >= 15.0 {
        Severity::Si
    } else if break_minutes > 0.0 {
        Severity::Vsi
    } else {
        Severity::Msi
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_excess() {
        assert_eq!(
            classify_severity(RuleKind::DailyDriving, 0.0),
            Err(ClassifierError::InvalidExcess(0.0))
        );
        assert!(classify_severity(RuleKind::DailyDriving, -1.0).is_err());
    }

    #[test]
    fn daily_driving_boundaries_are_inclusive() {
        assert_eq!(
            classify_severity(RuleKind::DailyDriving, 1.0),
            Ok(Severity::Mi)
        );
        assert_eq!(
            classify_severity(RuleKind::DailyDriving, 1.0001),
            Ok(Severity::Si)
        );
        assert_eq!(
            classify_severity(RuleKind::DailyDriving, 2.0),
            Ok(Severity::Si)
        );
        assert_eq!(
            classify_severity(RuleKind::DailyDriving, 4.5),
            Ok(Severity::Vsi)
        );
        assert_eq!(
            classify_severity(RuleKind::DailyDriving, 4.50001),
            Ok(Severity::Msi)
        );
    }

    #[test]
    fn break_severity_grades_are_inverted() {
        assert_eq!(classify_break_severity(44.9), Ok(Severity::Mi));
        assert_eq!(classify_break_severity(30.0), Ok(Severity::Mi));
        assert_eq!(classify_break_severity(29.9), Ok(Severity::Si));
        assert_eq!(classify_break_severity(15.0), Ok(Severity::Si));
        assert_eq!(classify_break_severity(14.9), Ok(Severity::Vsi));
        assert_eq!(classify_break_severity(0.0), Ok(Severity::Msi));
    }

    #[test]
    fn break_severity_rejects_qualifying_breaks() {
        assert_eq!(
            classify_break_severity(45.0),
            Err(ClassifierError::NotAnInfringement(45.0))
        );
    }

    #[test]
    fn rule_kind_parse_rejects_unknown_key() {
        assert_eq!(RuleKind::parse("daily_driving"), Ok(RuleKind::DailyDriving));
        assert_eq!(
            RuleKind::parse("nonsense"),
            Err(ClassifierError::UnknownRuleKind("nonsense".to_string()))
        );
    }

    #[test]
    fn severity_is_monotone_in_excess() {
        for kind in [
            RuleKind::DailyDriving,
            RuleKind::WeeklyDriving,
            RuleKind::BiweeklyDriving,
            RuleKind::DailyRest,
            RuleKind::WeeklyRest,
        ] {
            let mut prev = Severity::Mi;
            for excess in [0.1, 1.0, 2.0, 3.0, 5.0, 9.0, 13.0, 20.0] {
                let grade = classify_severity(kind, excess).unwrap();
                assert!(grade >= prev, "severity decreased for {:?} at {}", kind, excess);
                prev = grade;
            }
        }
    }
}
