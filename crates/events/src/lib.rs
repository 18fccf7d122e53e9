//! Skydd change feed.
//!
//! The server-side analog of the hosted realtime channels the portal client
//! subscribes to:
//!
//! - [`ChangeEvent`] — the canonical change-notification envelope.
//! - [`EventBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`ChannelFilter`] — the per-subscription row filter (customer, and
//!   member where applicable).
//! - [`EventPersistence`] — background service that writes every event to
//!   the `events` table for audit.

pub mod bus;
pub mod change;
pub mod persistence;

pub use bus::EventBus;
pub use change::{ChangeEvent, ChangeOp, ChangeTable, ChannelFilter, MemberScope};
pub use persistence::EventPersistence;
