//! Skydd domain rules.
//!
//! Pure business logic for the privacy-protection portal: the removal-URL
//! status pipeline, the privacy-score calculation, URL quotas, the covered
//! site catalog, and onboarding checklist validation. No I/O lives here;
//! persistence and transport are the `skydd-db` and `skydd-api` crates.

pub mod checklist;
pub mod error;
pub mod guides;
pub mod quota;
pub mod roles;
pub mod score;
pub mod site;
pub mod status;
pub mod types;
