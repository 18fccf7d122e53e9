//! Change-event envelope and subscription filters.
//!
//! Every mutation the API performs publishes one [`ChangeEvent`]. Connected
//! clients hold [`ChannelFilter`]s; a matching event tells the client which
//! cached query groups to invalidate and refetch. Refetching is idempotent,
//! so out-of-order or duplicate delivery is harmless.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skydd_core::types::DbId;

/// Tables that emit change events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeTable {
    Customers,
    RemovalUrls,
    SiteStatuses,
    ChecklistProgress,
    Members,
}

impl ChangeTable {
    /// The wire/storage name of the table.
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeTable::Customers => "customers",
            ChangeTable::RemovalUrls => "removal_urls",
            ChangeTable::SiteStatuses => "site_statuses",
            ChangeTable::ChecklistProgress => "checklist_progress",
            ChangeTable::Members => "members",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "customers" => Some(ChangeTable::Customers),
            "removal_urls" => Some(ChangeTable::RemovalUrls),
            "site_statuses" => Some(ChangeTable::SiteStatuses),
            "checklist_progress" => Some(ChangeTable::ChecklistProgress),
            "members" => Some(ChangeTable::Members),
            _ => None,
        }
    }
}

/// Kind of row mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeOp {
    Insert,
    Update,
    Delete,
}

impl ChangeOp {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeOp::Insert => "insert",
            ChangeOp::Update => "update",
            ChangeOp::Delete => "delete",
        }
    }
}

/// One change notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub table: ChangeTable,
    pub op: ChangeOp,
    /// The customer whose data changed.
    pub customer_id: DbId,
    /// The family member the row belongs to; `None` for rows owned by the
    /// primary holder or not member-scoped at all.
    pub member_id: Option<DbId>,
    /// Primary key of the changed row, where one exists after the change.
    pub entity_id: Option<DbId>,
    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl ChangeEvent {
    pub fn new(table: ChangeTable, op: ChangeOp, customer_id: DbId) -> Self {
        Self {
            table,
            op,
            customer_id,
            member_id: None,
            entity_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Scope the event to a family member's row.
    pub fn with_member(mut self, member_id: Option<DbId>) -> Self {
        self.member_id = member_id;
        self
    }

    /// Attach the changed row's primary key.
    pub fn with_entity(mut self, entity_id: DbId) -> Self {
        self.entity_id = Some(entity_id);
        self
    }

    /// Set the JSON payload for the event.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// The named cached-query groups this change invalidates. The client
    /// refetches exactly these groups on delivery.
    pub fn query_groups(&self) -> &'static [&'static str] {
        match self.table {
            ChangeTable::Customers => &["profile", "privacy-score"],
            ChangeTable::RemovalUrls => &[
                "removal-urls.used-count",
                "removal-urls.incoming",
                "privacy-score",
            ],
            ChangeTable::SiteStatuses => &["site-statuses"],
            ChangeTable::ChecklistProgress => &["checklist", "privacy-score"],
            ChangeTable::Members => &["members"],
        }
    }
}

/// Which person's rows a subscription covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberScope {
    /// Every row of the customer, member-owned or not.
    All,
    /// Only rows owned by the primary account holder.
    Primary,
    /// Only rows owned by one family member.
    Member(DbId),
}

/// The row filter held by one realtime subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelFilter {
    pub table: ChangeTable,
    pub customer_id: DbId,
    pub member: MemberScope,
}

impl ChannelFilter {
    /// Whether an event falls inside this subscription's scope.
    pub fn matches(&self, event: &ChangeEvent) -> bool {
        if event.table != self.table || event.customer_id != self.customer_id {
            return false;
        }
        match self.member {
            MemberScope::All => true,
            MemberScope::Primary => event.member_id.is_none(),
            MemberScope::Member(id) => event.member_id == Some(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(table: ChangeTable, customer_id: DbId, member_id: Option<DbId>) -> ChangeEvent {
        ChangeEvent::new(table, ChangeOp::Update, customer_id).with_member(member_id)
    }

    #[test]
    fn filter_matches_table_and_customer() {
        let filter = ChannelFilter {
            table: ChangeTable::SiteStatuses,
            customer_id: 7,
            member: MemberScope::All,
        };

        assert!(filter.matches(&event(ChangeTable::SiteStatuses, 7, None)));
        assert!(filter.matches(&event(ChangeTable::SiteStatuses, 7, Some(3))));
        assert!(!filter.matches(&event(ChangeTable::SiteStatuses, 8, None)));
        assert!(!filter.matches(&event(ChangeTable::RemovalUrls, 7, None)));
    }

    #[test]
    fn member_scope_distinguishes_primary_from_members() {
        let primary = ChannelFilter {
            table: ChangeTable::SiteStatuses,
            customer_id: 7,
            member: MemberScope::Primary,
        };
        let member = ChannelFilter {
            table: ChangeTable::SiteStatuses,
            customer_id: 7,
            member: MemberScope::Member(3),
        };

        assert!(primary.matches(&event(ChangeTable::SiteStatuses, 7, None)));
        assert!(!primary.matches(&event(ChangeTable::SiteStatuses, 7, Some(3))));

        assert!(member.matches(&event(ChangeTable::SiteStatuses, 7, Some(3))));
        assert!(!member.matches(&event(ChangeTable::SiteStatuses, 7, Some(4))));
        assert!(!member.matches(&event(ChangeTable::SiteStatuses, 7, None)));
    }

    #[test]
    fn url_changes_invalidate_both_url_query_groups() {
        let e = event(ChangeTable::RemovalUrls, 1, None);
        let groups = e.query_groups();
        assert!(groups.contains(&"removal-urls.used-count"));
        assert!(groups.contains(&"removal-urls.incoming"));
        assert!(groups.contains(&"privacy-score"));
    }

    #[test]
    fn checklist_changes_invalidate_the_score() {
        let e = event(ChangeTable::ChecklistProgress, 1, None);
        assert!(e.query_groups().contains(&"privacy-score"));
    }

    #[test]
    fn table_names_round_trip() {
        for table in [
            ChangeTable::Customers,
            ChangeTable::RemovalUrls,
            ChangeTable::SiteStatuses,
            ChangeTable::ChecklistProgress,
            ChangeTable::Members,
        ] {
            assert_eq!(ChangeTable::parse(table.as_str()), Some(table));
        }
        assert_eq!(ChangeTable::parse("projects"), None);
    }
}
