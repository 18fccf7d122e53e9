//! Onboarding checklist constants and validation.
//!
//! The four-step setup flow gating full account activation. Progress is
//! stored as a JSONB object of `step -> completed` flags on the customer
//! row; the API and repository layers validate keys against this list.

use crate::error::CoreError;

/// Choose an account password.
pub const STEP_CHOOSE_PASSWORD: &str = "choose_password";
/// Select which covered sites to monitor.
pub const STEP_SELECT_SITES: &str = "select_sites";
/// Submit initial removal URLs.
pub const STEP_SUBMIT_URLS: &str = "submit_urls";
/// Confirm the street address for address alerts.
pub const STEP_CONFIRM_ADDRESS: &str = "confirm_address";

/// All valid onboarding steps, in display order.
pub const VALID_STEPS: &[&str] = &[
    STEP_CHOOSE_PASSWORD,
    STEP_SELECT_SITES,
    STEP_SUBMIT_URLS,
    STEP_CONFIRM_ADDRESS,
];

/// Validate that a step id is one of the known steps.
pub fn validate_step(step: &str) -> Result<(), CoreError> {
    if VALID_STEPS.contains(&step) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid onboarding step '{step}'. Must be one of: {VALID_STEPS:?}"
        )))
    }
}

/// Validate every key of an onboarding progress map.
pub fn validate_steps(steps: &[String]) -> Result<(), CoreError> {
    for step in steps {
        validate_step(step)?;
    }
    Ok(())
}
