//! HTTP handler functions, one module per resource.

pub mod admin_customers;
pub mod admin_removal_urls;
pub mod guides;
pub mod members;
pub mod onboarding;
pub mod profile;
pub mod removal_urls;
pub mod score;
pub mod site_statuses;
