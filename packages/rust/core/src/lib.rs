//! Aggregation, extraction, and profile composition for PersonScope.
//!
//! This crate ties the legal-records and web-search clients together into
//! the end-to-end profile pipeline (see [`profile::Profiler`]).

pub mod aggregator;
pub mod compose;
pub mod extract;
pub mod planner;
pub mod profile;

pub use compose::{PersonProfile, compose, legal_fragment};
pub use profile::{PersonSearch, Profiler, ProgressReporter, SilentProgress, needs_remediation};
