use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::models::player::PlayerKind;
use crate::models::session::GameSettings;
use crate::services::{discussion_service, lobby_service};
use crate::state::AppState;
use crate::utils::websocket;

pub fn routes(state: AppState) -> Router {
    Router::new()
        // curl -X POST http://localhost:8080/api/session/create -d '{"name":"Ada"}'
        .route("/create", post(create_session))
        // curl -X POST http://localhost:8080/api/session/join -d '{"code":"ABC234","name":"Grace"}'
        .route("/join", post(join_session))
        // curl http://localhost:8080/api/session/list
        .route("/list", get(list_sessions))
        // curl http://localhost:8080/api/session/{sessionid}
        // curl -X DELETE http://localhost:8080/api/session/{sessionid}
        .route("/:session_id", get(get_session).delete(delete_session))
        // curl http://localhost:8080/api/session/{sessionid}/view/{playerid}
        .route("/:session_id/view/:player_id", get(get_player_view))
        // curl http://localhost:8080/api/session/{sessionid}/chat?limit=50
        .route("/:session_id/chat", get(get_chat))
        // curl -X POST http://localhost:8080/api/session/{sessionid}/start -d '{"requester_id":"..."}'
        .route("/:session_id/start", post(start_session))
        // curl -X POST http://localhost:8080/api/session/{sessionid}/leave -d '{"player_id":"..."}'
        .route("/:session_id/leave", post(leave_session))
        // curl -X POST http://localhost:8080/api/session/{sessionid}/agents -d '{"requester_id":"...","name":"Bot","persona":"cautious"}'
        .route("/:session_id/agents", post(add_agent))
        // websocat "ws://localhost:8080/api/session/{sessionid}/ws?player_id=..."
        .route("/:session_id/ws", get(websocket::handler))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct CreateSessionRequest {
    name: String,
    #[serde(default)]
    settings: GameSettings,
}

#[derive(Debug, Deserialize)]
struct JoinSessionRequest {
    code: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct StartSessionRequest {
    requester_id: String,
}

#[derive(Debug, Deserialize)]
struct LeaveSessionRequest {
    player_id: String,
}

#[derive(Debug, Deserialize)]
struct AddAgentRequest {
    requester_id: String,
    name: String,
    persona: String,
}

#[derive(Debug, Deserialize)]
struct ChatParams {
    limit: Option<usize>,
}

/// Session plus the caller's seat, returned on create and join.
#[derive(Debug, Serialize)]
struct SeatedResponse {
    session: crate::models::session::SessionView,
    player_id: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

fn fail(code: &'static str, message: String) -> Response {
    let status = match code {
        "session-not-found" | "player-not-found" => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_REQUEST,
    };
    (status, Json(ErrorBody { code, message })).into_response()
}

async fn create_session(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> Response {
    match lobby_service::create_session(&state, req.settings, req.name, PlayerKind::Human).await {
        Ok(session) => {
            let player_id = session.host_id.clone();
            let view = session.view_for(Some(&player_id));
            (
                StatusCode::OK,
                Json(SeatedResponse {
                    session: view,
                    player_id,
                }),
            )
                .into_response()
        }
        Err(e) => fail(e.code(), e.to_string()),
    }
}

async fn join_session(
    State(state): State<AppState>,
    Json(req): Json<JoinSessionRequest>,
) -> Response {
    match lobby_service::add_player(&state, &req.code, req.name, PlayerKind::Human).await {
        Ok((session, player)) => (
            StatusCode::OK,
            Json(SeatedResponse {
                session: session.view_for(Some(&player.id)),
                player_id: player.id,
            }),
        )
            .into_response(),
        Err(e) => fail(e.code(), e.to_string()),
    }
}

async fn list_sessions(State(state): State<AppState>) -> Response {
    let sessions = lobby_service::list_sessions(&state).await;
    (StatusCode::OK, Json(sessions)).into_response()
}

async fn get_session(State(state): State<AppState>, Path(session_id): Path<String>) -> Response {
    match state.store.get(&session_id).await {
        Ok(session) => (StatusCode::OK, Json(session.view_for(None))).into_response(),
        Err(e) => fail(e.code(), e.to_string()),
    }
}

async fn get_player_view(
    State(state): State<AppState>,
    Path((session_id, player_id)): Path<(String, String)>,
) -> Response {
    match state.store.get(&session_id).await {
        Ok(session) => {
            if session.player(&player_id).is_none() {
                return fail("player-not-found", "player not found in this session".into());
            }
            (StatusCode::OK, Json(session.view_for(Some(&player_id)))).into_response()
        }
        Err(e) => fail(e.code(), e.to_string()),
    }
}

async fn get_chat(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Query(params): Query<ChatParams>,
) -> Response {
    match discussion_service::recent_messages(&state, &session_id, params.limit.unwrap_or(50))
        .await
    {
        Ok(messages) => (StatusCode::OK, Json(messages)).into_response(),
        Err(e) => fail(e.code(), e.to_string()),
    }
}

async fn start_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<StartSessionRequest>,
) -> Response {
    match lobby_service::start_session(&state, &session_id, &req.requester_id).await {
        Ok(()) => (StatusCode::OK, Json("session started")).into_response(),
        Err(e) => fail(e.code(), e.to_string()),
    }
}

async fn leave_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<LeaveSessionRequest>,
) -> Response {
    match lobby_service::remove_player(&state, &session_id, &req.player_id).await {
        Ok(()) => (StatusCode::OK, Json("left session")).into_response(),
        Err(e) => fail(e.code(), e.to_string()),
    }
}

async fn add_agent(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<AddAgentRequest>,
) -> Response {
    match lobby_service::add_agent(&state, &session_id, &req.requester_id, req.name, req.persona)
        .await
    {
        Ok(agent) => (StatusCode::OK, Json(agent.public_view())).into_response(),
        Err(e) => fail(e.code(), e.to_string()),
    }
}

async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Response {
    match lobby_service::delete_session(&state, &session_id).await {
        Ok(()) => (StatusCode::OK, Json("session deleted")).into_response(),
        Err(e) => fail(e.code(), e.to_string()),
    }
}
