//! WebSocket upgrade handler and the subscribe/unsubscribe protocol.
//!
//! Clients authenticate at upgrade time (the [`AuthUser`] extractor runs on
//! the HTTP request) and then manage subscriptions with JSON messages:
//!
//! ```text
//! -> {"type":"subscribe","id":"urls","table":"removal_urls","member":"primary"}
//! <- {"type":"subscribed","id":"urls"}
//! <- {"type":"change","id":"urls","table":"removal_urls","op":"insert",
//!     "entity_id":12,"query_groups":["removal-urls.used-count", ...]}
//! -> {"type":"unsubscribe","id":"urls"}
//! <- {"type":"unsubscribed","id":"urls"}
//! ```
//!
//! Customers are force-scoped to their own customer id; admins may name any
//! customer. Protocol errors are reported on the socket and leave the
//! connection up. Reconnection is entirely the client runtime's concern.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;

use skydd_core::types::DbId;
use skydd_events::{ChangeTable, ChannelFilter, MemberScope};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::ws::manager::WsManager;

/// Messages a client may send after the upgrade.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ClientMessage {
    Subscribe {
        /// Client-chosen subscription id, echoed back on every delivery.
        id: String,
        table: String,
        /// Target customer; ignored for the `customer` role.
        customer_id: Option<DbId>,
        /// Row scope within the customer; defaults to all rows.
        member: Option<MemberScope>,
    },
    Unsubscribe {
        id: String,
    },
}

/// HTTP handler that upgrades the connection to WebSocket.
///
/// Authentication happens here, before the upgrade completes; the socket
/// never carries credentials.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    auth: AuthUser,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.ws_manager, auth))
}

/// Manage a single WebSocket connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers the connection with `WsManager`.
///   2. Spawns a sender task that forwards messages from the manager channel.
///   3. Processes inbound subscribe/unsubscribe messages on the current task.
///   4. Cleans up on disconnect (which also drops all subscriptions).
async fn handle_socket(socket: WebSocket, ws_manager: Arc<WsManager>, auth: AuthUser) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, user_id = auth.user_id, "WebSocket connected");

    // Register and get the receiver for outbound messages.
    let mut rx = ws_manager.add(conn_id.clone(), auth.user_id, auth.is_admin()).await;

    let (mut sink, mut stream) = socket.split();

    // Sender task: forward channel messages to the WebSocket sink.
    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    // Receiver loop: process inbound messages.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Text(text)) => {
                handle_client_message(&ws_manager, &conn_id, &auth, &text).await;
            }
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(_) => {
                // Binary and Ping frames carry nothing in this protocol.
            }
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    // Clean up: remove connection (and its subscriptions), stop the sender.
    ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "WebSocket disconnected");
}

/// Dispatch one parsed client message, replying on the connection's channel.
async fn handle_client_message(
    ws_manager: &WsManager,
    conn_id: &str,
    auth: &AuthUser,
    text: &str,
) {
    let message: ClientMessage = match serde_json::from_str(text) {
        Ok(message) => message,
        Err(e) => {
            send_json(
                ws_manager,
                conn_id,
                serde_json::json!({ "type": "error", "message": format!("Invalid message: {e}") }),
            )
            .await;
            return;
        }
    };

    match message {
        ClientMessage::Subscribe {
            id,
            table,
            customer_id,
            member,
        } => {
            let Some(table) = ChangeTable::parse(&table) else {
                send_json(
                    ws_manager,
                    conn_id,
                    serde_json::json!({
                        "type": "error",
                        "message": format!("Unknown table '{table}'"),
                    }),
                )
                .await;
                return;
            };

            // Customers only ever see their own feed.
            let customer_id = if auth.is_admin() {
                match customer_id {
                    Some(id) => id,
                    None => {
                        send_json(
                            ws_manager,
                            conn_id,
                            serde_json::json!({
                                "type": "error",
                                "message": "customer_id is required for admin subscriptions",
                            }),
                        )
                        .await;
                        return;
                    }
                }
            } else {
                auth.user_id
            };

            let filter = ChannelFilter {
                table,
                customer_id,
                member: member.unwrap_or(MemberScope::All),
            };
            if ws_manager.subscribe(conn_id, id.clone(), filter).await {
                tracing::debug!(conn_id = %conn_id, sub_id = %id, table = table.as_str(), "Subscribed");
                send_json(
                    ws_manager,
                    conn_id,
                    serde_json::json!({ "type": "subscribed", "id": id }),
                )
                .await;
            }
        }
        ClientMessage::Unsubscribe { id } => {
            ws_manager.unsubscribe(conn_id, &id).await;
            tracing::debug!(conn_id = %conn_id, sub_id = %id, "Unsubscribed");
            send_json(
                ws_manager,
                conn_id,
                serde_json::json!({ "type": "unsubscribed", "id": id }),
            )
            .await;
        }
    }
}

/// Push one JSON message onto a connection's outbound channel.
async fn send_json(ws_manager: &WsManager, conn_id: &str, value: serde_json::Value) {
    ws_manager
        .send_to_connection(conn_id, Message::Text(value.to_string().into()))
        .await;
}
