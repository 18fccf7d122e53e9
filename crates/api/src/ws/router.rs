//! Background task fanning out change events to WebSocket subscribers.

use std::sync::Arc;

use skydd_events::ChangeEvent;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::ws::manager::WsManager;

/// Drains a bus receiver and delivers each event to every matching
/// subscription via [`WsManager::route`].
pub struct ChangeRouter {
    manager: Arc<WsManager>,
}

impl ChangeRouter {
    pub fn new(manager: Arc<WsManager>) -> Self {
        Self { manager }
    }

    /// Run the routing loop until the bus closes or `cancel` triggers.
    ///
    /// A lagged receiver only loses invalidation messages; clients refetch
    /// on their next matching event, and refetching is idempotent.
    pub async fn run(self, mut receiver: broadcast::Receiver<ChangeEvent>, cancel: CancellationToken) {
        loop {
            tokio::select! {
                () = cancel.cancelled() => {
                    tracing::info!("Change router stopping");
                    break;
                }
                result = receiver.recv() => match result {
                    Ok(event) => {
                        let delivered = self.manager.route(&event).await;
                        tracing::trace!(
                            table = event.table.as_str(),
                            op = event.op.as_str(),
                            customer_id = event.customer_id,
                            delivered,
                            "Change event routed"
                        );
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(skipped = n, "Change router lagged, invalidations dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::info!("Event bus closed, change router shutting down");
                        break;
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use skydd_core::types::DbId;
    use skydd_events::{ChangeOp, ChangeTable, ChannelFilter, EventBus, MemberScope};

    use super::*;

    fn filter(customer_id: DbId) -> ChannelFilter {
        ChannelFilter {
            table: ChangeTable::SiteStatuses,
            customer_id,
            member: MemberScope::All,
        }
    }

    #[tokio::test]
    async fn delivers_bus_events_to_subscribers_until_cancelled() {
        let manager = Arc::new(WsManager::new());
        let bus = EventBus::default();
        let cancel = CancellationToken::new();

        let mut rx = manager.add("conn".into(), 7, false).await;
        manager.subscribe("conn", "sub".into(), filter(7)).await;

        let task = tokio::spawn(
            ChangeRouter::new(Arc::clone(&manager)).run(bus.subscribe(), cancel.clone()),
        );

        bus.publish(ChangeEvent::new(ChangeTable::SiteStatuses, ChangeOp::Update, 7));

        let msg = tokio::time::timeout(std::time::Duration::from_secs(1), rx.recv())
            .await
            .expect("router should deliver within the timeout")
            .expect("channel should stay open");
        match msg {
            axum::extract::ws::Message::Text(text) => {
                let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
                assert_eq!(parsed["type"], "change");
                assert_eq!(parsed["table"], "site_statuses");
            }
            other => panic!("expected text message, got {other:?}"),
        }

        cancel.cancel();
        tokio::time::timeout(std::time::Duration::from_secs(1), task)
            .await
            .expect("router should stop on cancel")
            .unwrap();
    }
}
