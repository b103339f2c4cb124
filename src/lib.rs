//! Bounded commit-history reports.
//!
//! For each repository the default branch is resolved, its first-parent
//! history is walked newest-first until a count, time or age bound trips,
//! and every accepted commit becomes one row of a CSV report.

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod presentation;
pub mod report;
pub mod utils;
