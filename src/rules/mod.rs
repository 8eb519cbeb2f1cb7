//! The six article-level rule evaluators.
//!
//! Each evaluator is both a free function (the signature named in
//! spec.md §6, used directly by tests and by [`crate::orchestrator`]) and
//! a [`RuleEvaluator`] impl, so callers can compose custom subsets
//! (`&[&dyn RuleEvaluator]`) instead of calling the whole six.

pub mod biweekly_driving;
pub mod breaks;
pub mod daily_driving;
pub mod daily_rest;
pub mod weekly_driving;
pub mod weekly_rest;

use crate::infringement::Infringement;
use crate::model::DriverActivity;

/// Common interface over the six rule evaluators, generalizing the
/// free-function signature `fn(&DriverActivity) -> Vec<Infringement>`
/// into a trait object the orchestrator can hold generically.
pub trait RuleEvaluator {
    fn evaluate(&self, driver: &DriverActivity) -> Vec<Infringement>;
}

macro_rules! evaluator_struct {
    ($name:ident, $func:path) => {
        /// Trait-object wrapper around the free function of the same
        /// rule, for use where a `&dyn RuleEvaluator` is wanted.
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl RuleEvaluator for $name {
            fn evaluate(&self, driver: &DriverActivity) -> Vec<Infringement> {
                $func(driver)
            }
        }
    };
}

evaluator_struct!(DailyDrivingRule, daily_driving::check_daily_driving);
evaluator_struct!(WeeklyDrivingRule, weekly_driving::check_weekly_driving);
evaluator_struct!(BiweeklyDrivingRule, biweekly_driving::check_biweekly_driving);
evaluator_struct!(BreakAdequacyRule, breaks::check_breaks);
evaluator_struct!(DailyRestRule, daily_rest::check_daily_rest);
evaluator_struct!(WeeklyRestRule, weekly_rest::check_weekly_rest);

/// All six evaluators, in the order the orchestrator applies them. Order
/// does not affect the final result — [`crate::orchestrator::analyze`]
/// sorts the concatenated output by date.
pub fn all() -> [&'static dyn RuleEvaluator; 6] {
    [
        &DailyDrivingRule,
        &WeeklyDrivingRule,
        &BiweeklyDrivingRule,
        &BreakAdequacyRule,
        &DailyRestRule,
        &WeeklyRestRule,
    ]
}
