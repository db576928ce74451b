//! Week packing, planning pipeline, and KPI evaluation.
//!
//! # Algorithm
//!
//! `Packer` is a deterministic greedy heuristic: off-stream work first,
//! then whole milestone groups, then individual streamable tasks, each in
//! priority order into the first day with room. It is not optimal; it is
//! reproducible and easy to explain.
//!
//! # Pipeline
//!
//! `Planner` wires the estimator, classifier, scorer, grouper, and packer
//! together; `plan_week` is the one-shot form.
//!
//! # KPI
//!
//! `WeekKpi` summarizes a packed week: placed and deferred hours,
//! per-bucket utilization, open stream time, and project spread.

mod kpi;
mod packer;
mod planner;

pub use kpi::WeekKpi;
pub use packer::Packer;
pub use planner::{plan_week, Planner};
