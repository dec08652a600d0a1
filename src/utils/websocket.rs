use axum::{
    extract::{
        ws::{Message, WebSocket},
        Path, Query, State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::error::RouterError;
use crate::models::event::{ClientCommand, ServerEvent};
use crate::services;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ConnectParams {
    /// Present for players, absent for spectators.
    pub player_id: Option<String>,
}

/// Upgrades `GET /api/session/:id/ws?player_id=...` to a socket. The session
/// and, for players, the membership are validated before the upgrade so a
/// bad URL fails as plain HTTP instead of a silent hangup.
pub async fn handler(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Query(params): Query<ConnectParams>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let session = match state.store.get(&session_id).await {
        Ok(s) => s,
        Err(_) => return StatusCode::NOT_FOUND.into_response(),
    };
    if let Some(player_id) = &params.player_id {
        if session.player(player_id).is_none() {
            return StatusCode::NOT_FOUND.into_response();
        }
    }
    ws.on_upgrade(move |socket| handle_socket(socket, state, session_id, params.player_id))
}

async fn handle_socket(
    ws: WebSocket,
    state: AppState,
    session_id: String,
    player_id: Option<String>,
) {
    let connection_id = Uuid::new_v4();
    info!(
        %session_id,
        connection = %connection_id,
        identity = player_id.as_deref().unwrap_or("spectator"),
        "socket connected"
    );

    // subscribe before registering so the spectator-count event for this
    // connection is also the first thing it receives
    let mut rx = state.net.subscribe(&session_id);
    match &player_id {
        Some(id) => state.net.register_player(&session_id, connection_id, id),
        None => state.net.register_spectator(&session_id, connection_id),
    }

    let (mut sender, mut receiver) = ws.split();

    let send_identity = player_id.clone();
    let mut send_task = tokio::spawn(async move {
        loop {
            let envelope = match rx.recv().await {
                Ok(envelope) => envelope,
                Err(RecvError::Lagged(missed)) => {
                    warn!(missed, "socket fell behind the event stream");
                    continue;
                }
                Err(RecvError::Closed) => break,
            };
            if !envelope
                .audience
                .includes(connection_id, send_identity.as_deref())
            {
                continue;
            }
            let text = match serde_json::to_string(&envelope.event) {
                Ok(text) => text,
                Err(_) => continue,
            };
            if sender.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    let recv_state = state.clone();
    let recv_session = session_id.clone();
    let recv_identity = player_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            let text = match msg {
                Message::Text(text) => text,
                Message::Close(_) => break,
                _ => continue,
            };
            let failure = match serde_json::from_str::<ClientCommand>(&text) {
                Ok(command) => match &recv_identity {
                    Some(player_id) => {
                        services::apply_command(&recv_state, &recv_session, player_id, command)
                            .await
                            .err()
                            .map(|e| (e.code(), e.to_string()))
                    }
                    None => {
                        let e = RouterError::NotAPlayer;
                        Some((e.code(), e.to_string()))
                    }
                },
                Err(parse) => {
                    let e = RouterError::InvalidMessage(parse.to_string());
                    Some((e.code(), e.to_string()))
                }
            };
            // rule violations go back to the offender only
            if let Some((code, message)) = failure {
                recv_state.net.send_to_connection(
                    &recv_session,
                    connection_id,
                    ServerEvent::Error {
                        code: code.to_string(),
                        message,
                    },
                );
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    state.net.remove_client(&session_id, connection_id);
    info!(%session_id, connection = %connection_id, "socket closed");
}
