//! Long-running background tasks owned by the API binary.

pub mod events_retention;
