//! The output contract: a classified infringement record and the
//! orchestrator's summary projection over a full infringement list.

use std::collections::BTreeMap;

use chrono::NaiveDate;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::severity::Severity;

/// One detected violation of Regulation (EC) 561/2006.
///
/// `value`, `limit`, and `excess` are finite, non-negative hours, rounded
/// to two decimals. For a time-excess rule, `value >= limit` and
/// `excess = round(value - limit, 2)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Infringement {
    /// The regulation article, e.g. `"Art. 6.1"`.
    pub article: String,
    pub rule_description: String,
    pub severity: Severity,
    /// Observed quantity in hours.
    pub value: f64,
    /// Regulatory threshold in hours.
    pub limit: f64,
    /// Hours over the limit, always `>= 0`.
    pub excess: f64,
    /// Calendar date this violation is attributed to, per the
    /// rule-specific dating policy in spec.md §4.
    pub date: NaiveDate,
    pub driver_name: String,
    pub card_number: String,
    pub details: Option<String>,
}

/// Rounds to two decimal places, matching the `round(x, 2)` calls spec.md
/// uses throughout for `value`/`limit`/`excess`.
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// The orchestrator's summary projection over a full infringement list:
/// total count, counts by severity (all four grades keyed, zero for
/// empty), and counts by article.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Summary {
    pub total: u32,
    pub by_severity: BTreeMap<String, u32>,
    pub by_article: BTreeMap<String, u32>,
    pub infringements: Vec<Infringement>,
}

impl Summary {
    pub(crate) fn from_infringements(infringements: Vec<Infringement>) -> Self {
        let mut by_severity = BTreeMap::new();
        for tag in [
            Severity::Mi.tag(),
            Severity::Si.tag(),
            Severity::Vsi.tag(),
            Severity::Msi.tag(),
        ] {
            by_severity.insert(tag.to_string(), 0);
        }
        let mut by_article = BTreeMap::new();

        for infringement in &infringements {
            *by_severity
                .entry(infringement.severity.tag().to_string())
                .or_insert(0) += 1;
            *by_article
                .entry(infringement.article.clone())
                .or_insert(0) += 1;
        }

        Summary {
            total: infringements.len() as u32,
            by_severity,
            by_article,
            infringements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_rounds_to_two_decimals() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.236), 1.24);
        assert_eq!(round2(9.0), 9.0);
    }

    #[test]
    fn summary_zero_fills_all_severities() {
        let summary = Summary::from_infringements(vec![]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.by_severity.len(), 4);
        assert!(summary.by_severity.values().all(|&v| v == 0));
        assert!(summary.by_article.is_empty());
    }
}
