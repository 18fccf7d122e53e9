//! Removal-URL lifecycle statuses and the step mapping shown to customers.
//!
//! A removal request moves through a fixed four-step pipeline:
//!
//! ```text
//! received (0) -> case_started (1) -> request_submitted (2) -> removal_approved (3)
//! ```
//!
//! Display mapping is fail-open: an unrecognized raw status renders as step 0
//! so that status strings added server-side later never break older clients.
//! The admin transition API uses the strict [`RemovalStatus::parse`] instead,
//! where an unknown status is a validation error.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle status of a removal URL, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalStatus {
    Received,
    CaseStarted,
    RequestSubmitted,
    RemovalApproved,
}

impl RemovalStatus {
    /// All statuses in pipeline order. Index equals [`step_index`](Self::step_index).
    pub const ALL: [RemovalStatus; 4] = [
        RemovalStatus::Received,
        RemovalStatus::CaseStarted,
        RemovalStatus::RequestSubmitted,
        RemovalStatus::RemovalApproved,
    ];

    /// The wire string stored in `removal_urls.current_status`.
    pub fn as_str(self) -> &'static str {
        match self {
            RemovalStatus::Received => "received",
            RemovalStatus::CaseStarted => "case_started",
            RemovalStatus::RequestSubmitted => "request_submitted",
            RemovalStatus::RemovalApproved => "removal_approved",
        }
    }

    /// Strict parse for the admin transition API.
    ///
    /// Unknown input is a validation error here; the fail-open default
    /// applies to display mapping only.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        match raw {
            "received" => Ok(RemovalStatus::Received),
            "case_started" => Ok(RemovalStatus::CaseStarted),
            "request_submitted" => Ok(RemovalStatus::RequestSubmitted),
            "removal_approved" => Ok(RemovalStatus::RemovalApproved),
            other => Err(CoreError::Validation(format!(
                "Unknown removal status '{other}'. Must be one of: received, \
                 case_started, request_submitted, removal_approved"
            ))),
        }
    }

    /// Ordinal position in the pipeline, 0..=3.
    pub fn step(self) -> u8 {
        match self {
            RemovalStatus::Received => 0,
            RemovalStatus::CaseStarted => 1,
            RemovalStatus::RequestSubmitted => 2,
            RemovalStatus::RemovalApproved => 3,
        }
    }

    /// Whether a transition from `self` to `next` advances the pipeline.
    ///
    /// Status history is append-only and strictly monotonic: a transition
    /// whose step does not increase is rejected with a Conflict upstream.
    pub fn can_advance_to(self, next: RemovalStatus) -> bool {
        next.step() > self.step()
    }
}

/// Map a raw status string to its display step, 0..=3.
///
/// Total over all inputs: unrecognized strings map to step 0 (received).
pub fn step_index(raw: &str) -> u8 {
    RemovalStatus::parse(raw).map(RemovalStatus::step).unwrap_or(0)
}

/// Display locale for status labels. Exactly two locales, no fallback chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Swedish (the product's home market and default).
    #[default]
    Sv,
    En,
}

impl Locale {
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        match raw {
            "sv" => Ok(Locale::Sv),
            "en" => Ok(Locale::En),
            other => Err(CoreError::Validation(format!(
                "Unknown locale '{other}'. Must be one of: sv, en"
            ))),
        }
    }
}

/// Swedish step labels, indexed by step.
const LABELS_SV: [&str; 4] = ["Mottagen", "Pågående", "Begäran skickad", "Slutförd"];

/// English step labels, indexed by step. `case_started` is displayed as
/// "In progress" and `removal_approved` as "Completed".
const LABELS_EN: [&str; 4] = ["Received", "In progress", "Request submitted", "Completed"];

/// Locale-specific display label for a raw status string.
///
/// Shares the fail-open default with [`step_index`]: an unknown status
/// gets the step-0 label.
pub fn label(raw: &str, locale: Locale) -> &'static str {
    let step = step_index(raw) as usize;
    match locale {
        Locale::Sv => LABELS_SV[step],
        Locale::En => LABELS_EN[step],
    }
}
