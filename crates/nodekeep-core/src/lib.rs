//! Core workflows for keeping Node.js versions and their global packages in
//! step:
//!
//! - the consolidated package ledger on disk
//! - scoped capture of a version's global package set
//! - the desired-versus-installed reconciliation engine
//! - the uninstall / verify / force-remove state machine
//!
//! Everything works against the backend traits, so the whole crate runs
//! under scripted managers in tests.

#![allow(clippy::missing_errors_doc)]

mod ledger;
mod reconcile;
mod removal;
mod snapshot;

pub use ledger::{LEDGER_FILE, read_ledger, write_ledger};
pub use reconcile::{
    CandidatePrompt, InstallPolicy, PackageStatus, PromptChoice, ReconcileReport,
    classify_packages, run_candidates, split_candidates,
};
pub use removal::{RemovalOutcome, remove_version};
pub use snapshot::{
    activate_and_hold, capture_global_packages, capture_many, with_active_version,
};
