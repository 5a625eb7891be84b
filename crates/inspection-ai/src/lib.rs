//! Session engine for AI-assisted CQC mock inspections.
//!
//! The crate models the static CQC reference data (key questions, quality
//! statements, interview scenarios), drives a chat-style interview through an
//! external reasoning service, scores free-text answers against per-question
//! rubrics, and aggregates the results into an inspection readiness report.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
