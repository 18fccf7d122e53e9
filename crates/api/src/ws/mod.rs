//! Realtime status sync over WebSocket.
//!
//! Connected clients subscribe to change feeds per table, scoped to a
//! customer (and member where applicable). The [`ChangeRouter`] matches
//! every published [`skydd_events::ChangeEvent`] against each connection's
//! filters and pushes an invalidation message naming the cached query
//! groups to refetch.

pub mod handler;
pub mod heartbeat;
pub mod manager;
pub mod router;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
pub use router::ChangeRouter;
