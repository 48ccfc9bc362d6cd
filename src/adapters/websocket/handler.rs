//! WebSocket upgrade handler and per-connection lifecycle.
//!
//! Handles the HTTP → WebSocket upgrade and runs each connection:
//! 1. Assign a connection id and attach to the hub
//! 2. Pump the outbound queue into the socket
//! 3. Parse inbound frames; register or route+dispatch
//! 4. Detach and unregister on disconnect

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};

use crate::application::{dispatch, route, ConnectionRegistry};
use crate::domain::events::{InboundEvent, OutboundEvent, RegisteredAck};
use crate::domain::foundation::{ClientIdentity, ConnectionId, Timestamp};
use crate::ports::EventTransport;

use super::hub::ConnectionHub;
use super::messages::{encode_server_frame, parse_client_frame};

/// Shared state for WebSocket handling.
#[derive(Clone)]
pub struct RelayState {
    pub registry: Arc<ConnectionRegistry>,
    pub hub: Arc<ConnectionHub>,
}

impl RelayState {
    pub fn new(registry: Arc<ConnectionRegistry>, hub: Arc<ConnectionHub>) -> Self {
        Self { registry, hub }
    }
}

/// Handle WebSocket upgrade requests.
///
/// Route: `GET /ws`
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<RelayState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Runs for the lifetime of one connection.
async fn handle_socket(socket: WebSocket, state: RelayState) {
    let (mut sender, mut receiver) = socket.split();

    let connection_id = ConnectionId::new();
    let mut outbound_rx = state.hub.attach(connection_id).await;
    tracing::info!(connection = %connection_id, "client connected");

    // Writer task: drain this connection's queue into the socket. One
    // writer per socket keeps per-connection delivery order intact.
    let mut send_task = tokio::spawn(async move {
        while let Some(event) = outbound_rx.recv().await {
            let frame = match encode_server_frame(&event) {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::error!(event = event.name(), "failed to encode frame: {}", e);
                    continue;
                }
            };
            if let Err(e) = sender.send(Message::Text(frame)).await {
                tracing::debug!(connection = %connection_id, "send error, closing: {}", e);
                break;
            }
        }
    });

    // Reader task: each inbound frame is handled to completion before the
    // next is read, so the registry is never observed mid-mutation.
    let recv_state = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Text(text)) => {
                    handle_frame(&text, connection_id, &recv_state).await;
                }
                Ok(Message::Binary(_)) => {
                    tracing::warn!(
                        connection = %connection_id,
                        "dropping unsupported binary message"
                    );
                }
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                    // Protocol-level keepalive, handled by axum.
                }
                Ok(Message::Close(_)) => {
                    tracing::debug!(connection = %connection_id, "client sent close frame");
                    break;
                }
                Err(e) => {
                    tracing::debug!(connection = %connection_id, "receive error: {}", e);
                    break;
                }
            }
        }
    });

    // Whichever task ends first, tear the other down.
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    state.hub.detach(&connection_id).await;
    match state.registry.unregister(&connection_id).await {
        Some(identity) => tracing::info!(
            connection = %connection_id,
            user = %identity.display_name,
            role = %identity.role,
            "user disconnected"
        ),
        None => tracing::info!(connection = %connection_id, "client disconnected"),
    }
}

/// Handles one inbound text frame.
///
/// A malformed frame is logged and dropped; the connection stays up and
/// no other client is affected.
async fn handle_frame(text: &str, connection_id: ConnectionId, state: &RelayState) {
    let event = match parse_client_frame(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(connection = %connection_id, "dropping malformed frame: {}", e);
            return;
        }
    };

    match event {
        InboundEvent::Register(registration) => {
            let identity = ClientIdentity::from(registration);
            tracing::info!(
                connection = %connection_id,
                user = %identity.display_name,
                role = %identity.role,
                "user registered"
            );
            state.registry.register(connection_id, identity).await;
            state
                .hub
                .send_to(connection_id, OutboundEvent::Registered(RegisteredAck::ok()))
                .await;
        }
        event => {
            let deliveries = route(event, Timestamp::now(), &state.registry).await;
            dispatch(deliveries, &*state.hub).await;
        }
    }
}

/// Create the axum router for the WebSocket endpoint.
pub fn websocket_router() -> axum::Router<RelayState> {
    use axum::routing::get;

    axum::Router::new().route("/ws", get(ws_handler))
}
