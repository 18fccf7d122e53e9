//! Entity models: one module per table, `FromRow` structs plus the
//! `Create*`/`Update*` DTOs the repositories accept.

pub mod checklist;
pub mod customer;
pub mod event;
pub mod member;
pub mod removal_url;
pub mod site_status;
pub mod url_limit;
