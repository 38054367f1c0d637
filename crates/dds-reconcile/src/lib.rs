//! dds-reconcile
//!
//! Reconciliation engine: local desired monitors vs. the remote set.
//!
//! - Matching is by monitor name, exact and case-sensitive
//! - Duplicate names on either side fail the plan; nothing is applied
//! - Deletions always run after creates and updates
//! - One failed mutation never stops the rest of the batch; failures are
//!   collected into an aggregate error
//! - Dry-run issues no remote call
//!
//! Planning is pure. The only side effects live in [`apply`], through the
//! [`MonitorClient`] the caller provides.

mod apply;
mod client;
mod engine;
mod index;
mod report;
mod types;

pub use apply::{
    apply, sync, ApplyReport, FailedIntent, IntentOutcome, Outcome, OutcomeCounts, SyncError,
    SyncFailure, SyncOptions,
};
pub use client::{ClientError, MonitorClient, MonitorSource};
pub use engine::plan;
pub use index::{build_name_index, NameIndex};
pub use report::Reporter;
pub use types::*;
