//! Role names carried in JWT claims.

/// Administrator: full access to the admin dashboard routes.
pub const ROLE_ADMIN: &str = "admin";

/// Customer: an end user of the portal; scoped to their own data.
pub const ROLE_CUSTOMER: &str = "customer";
