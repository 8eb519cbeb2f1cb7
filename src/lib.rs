//! Reg561-Core: a deterministic rules engine for Regulation (EC) 561/2006.
//!
//! This crate takes a driver's reconstructed activity log (driving, work,
//! availability, and rest intervals) and evaluates it against the six
//! article-level rules governing driving time, breaks, and rest periods,
//! producing classified [`Infringement`] records graded by severity
//! (`MI`/`SI`/`VSI`/`MSI`, per Directive 2009/5/EC).
//!
//! ## Design Philosophy
//!
//! ### Pure Analysis, No I/O
//!
//! The crate is agnostic to where a [`DriverActivity`] comes from —
//! decoding a tachograph card dump is an external concern. Every function
//! here is a pure computation over its input: same activities in, same
//! infringements out, every time.
//!
//! ### Validation Over Panics
//!
//! [`Activity::new`] and [`Activity::with_duration`] return `Result`
//! rather than panicking on malformed intervals, so callers decide how to
//! handle bad input instead of having the process aborted for them.
//!
//! ### Composable Rules
//!
//! Each article is both a free function (`rules::daily_driving::check_daily_driving`,
//! and so on) and a [`rules::RuleEvaluator`] impl, so callers can run the
//! full six via [`analyze`] or assemble a custom subset.
//!
//! ## Quick Start
//!
//! ```
//! use reg561_core::{analyze, Activity, ActivityKind, DriverActivity};
//! use chrono::{TimeZone, Utc};
//!
//! let driving = Activity::new(
//!     ActivityKind::Driving,
//!     Utc.with_ymd_and_hms(2026, 1, 5, 6, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2026, 1, 5, 14, 0, 0).unwrap(),
//!     None,
//! ).unwrap();
//!
//! let driver = DriverActivity::new("Jane Doe", "CARD-001").with_activities(vec![driving]);
//! let infringements = analyze(&driver);
//! assert!(infringements.is_empty());
//! ```

pub mod aggregate;
pub mod infringement;
pub mod model;
pub mod orchestrator;
pub mod rules;
pub mod severity;

pub use aggregate::{driving_minutes_per_day, driving_minutes_per_week, rest_periods, RestPeriod};
pub use infringement::{Infringement, Summary};
pub use model::{Activity, ActivityError, ActivityKind, DriverActivity};
pub use orchestrator::{analyze, analyze_summary};
pub use rules::{
    BiweeklyDrivingRule, BreakAdequacyRule, DailyDrivingRule, DailyRestRule, RuleEvaluator,
    WeeklyDrivingRule, WeeklyRestRule,
};
pub use severity::{classify_break_severity, classify_severity, ClassifierError, RuleKind, Severity};
