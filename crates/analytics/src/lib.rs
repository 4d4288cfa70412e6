//! # PropTech Analytics
//!
//! The metric library: closed-form real-estate formulas grouped into fifteen
//! families, and the `ReportEngine` that composes them into a `PropertyReport`.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** No I/O and no ambient state. Every input, including the
//!   reference date, arrives as an explicit argument, so every function is
//!   safe to call from any thread.
//! - **Defined Sentinels:** Divisions never panic or produce NaN for a bad
//!   denominator. Each ratio documents the value it returns instead (usually
//!   `0.0`, `+inf` for `value_from_cap`).
//!
//! ## Public API
//!
//! - One module per metric family (`valuation`, `lending`, `securitization`, ...).
//! - `ReportEngine` / `PropertySnapshot` / `ReportAssumptions`: the report compute step.
//! - `PropertyReport`: the serialized report document.
//! - `LosPackage`: the underwriting export.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Metric families.
pub mod anomaly;
pub mod compliance;
pub mod development;
pub mod esg;
pub mod exports;
pub mod insurance;
pub mod islamic;
pub mod leasing;
pub mod lending;
pub mod market;
pub mod operations;
pub mod portfolio;
pub mod securitization;
pub mod tenant;
pub mod valuation;

// Report assembly.
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{PropertySnapshot, ReportAssumptions, ReportEngine};
pub use error::AnalyticsError;
pub use exports::LosPackage;
pub use report::PropertyReport;
pub use securitization::TapeQcFlags;
