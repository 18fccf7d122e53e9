//! Repository layer: all SQL for the skydd tables.

mod checklist_repo;
mod customer_repo;
mod event_repo;
mod member_repo;
mod removal_url_repo;
mod site_status_repo;
mod url_limit_repo;

pub use checklist_repo::ChecklistRepo;
pub use customer_repo::CustomerRepo;
pub use event_repo::EventRepo;
pub use member_repo::MemberRepo;
pub use removal_url_repo::RemovalUrlRepo;
pub use site_status_repo::SiteStatusRepo;
pub use url_limit_repo::UrlLimitRepo;
