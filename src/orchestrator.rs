//! Runs all six article-level rules over a driver's activity log and
//! assembles the results.
//!
//! Grounded on `infringement_engine.py::analyze_driver`, which calls each
//! rule module in turn, concatenates, and sorts by date.

use crate::infringement::{Infringement, Summary};
use crate::model::DriverActivity;
use crate::rules;

/// Runs all six rules over `driver` and returns every infringement found,
/// sorted by date (ties broken by article, for a stable, reproducible
/// ordering across runs on the same input).
pub fn analyze(driver: &DriverActivity) -> Vec<Infringement> {
    let mut infringements: Vec<Infringement> = rules::all()
        .iter()
        .flat_map(|rule| rule.evaluate(driver))
        .collect();

    infringements.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.article.cmp(&b.article)));
    infringements
}

/// Runs [`analyze`] and folds the result into a [`Summary`].
pub fn analyze_summary(driver: &DriverActivity) -> Summary {
    Summary::from_infringements(analyze(driver))
}
