//! Legal-records provider integration.
//!
//! This crate provides:
//! - [`classify`] — document-vs-name input classification
//! - [`LegalClient::lookup`] — full process list for a party
//! - [`LegalClient::summarize`] — aggregate-only summary for a party
//! - [`LegalOutcome`] — the uniform outcome both calls return

pub mod classify;
pub mod client;
pub mod outcome;
pub mod records;
pub mod summary;

pub use classify::{DocumentKind, InputMode, classify};
pub use client::{CREDITS_HEADER, LegalClient};
pub use outcome::{CREDITS_UNKNOWN, LegalOutcome};
pub use records::{LegalPartyRecord, LegalRecords};
pub use summary::LegalSummary;
