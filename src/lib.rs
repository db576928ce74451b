//! Weekly scheduling and packing engine.
//!
//! Turns a list of work items (issues) into a five-day plan with two daily
//! blocks: a streamable block for live, on-camera work and an off-stream
//! block for everything else. Work that does not fit is reported as
//! overflow with the reason it was deferred.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `MilestoneGroup`, `DaySlot`,
//!   `ScheduleResult`, and the tier enums
//! - **`config`**: `PlannerConfig`, loaded from the `weekly_planner` YAML section
//! - **`estimator`**: Ordered-pattern hour extraction from issue bodies
//! - **`classifier`**: Label-based streamable / off-stream split
//! - **`scoring`**: Multiplicative priority score and the tie-break chain
//! - **`grouping`**: Day-sized milestone groups
//! - **`scheduler`**: The packer, the end-to-end planner, and week KPIs
//! - **`validation`**: Packer input integrity checks
//!
//! # Example
//!
//! ```
//! use u_weekplan::{plan_week, PlannerConfig};
//! use u_weekplan::models::Task;
//!
//! let tasks = vec![
//!     Task::new(1).with_label("streamable").with_body("Estimate: 3h"),
//!     Task::new(2).with_body("[1h] renew domain"),
//! ];
//! let week = plan_week(&PlannerConfig::default(), tasks).unwrap();
//! assert_eq!(week.days.len(), 5);
//! assert!(week.is_complete());
//! ```
//!
//! # Determinism
//!
//! The engine holds no global state and never reads a clock. The same
//! tasks and configuration always produce the same `ScheduleResult`.

pub mod classifier;
pub mod config;
pub mod error;
pub mod estimator;
pub mod grouping;
pub mod models;
pub mod scheduler;
pub mod scoring;
pub mod validation;

pub use config::PlannerConfig;
pub use error::{ConfigError, PlanError};
pub use models::ScheduleResult;
pub use scheduler::{plan_week, Planner, WeekKpi};
