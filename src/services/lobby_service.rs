use tracing::info;

use crate::models::error::LobbyError;
use crate::models::event::ServerEvent;
use crate::models::player::{Player, PlayerKind};
use crate::models::session::{GamePhase, GameSettings, Session, SessionSummary};
use crate::services::phase_service;
use crate::state::AppState;

pub async fn create_session(
    state: &AppState,
    settings: GameSettings,
    host_name: String,
    host_kind: PlayerKind,
) -> Result<Session, LobbyError> {
    if !settings.durations_in_range() {
        return Err(LobbyError::InvalidSettings);
    }
    let host = Player::new(host_name, host_kind);
    let session = state.store.create(settings, host)?;
    info!(session_id = %session.id, join_code = %session.join_code, "session created");
    Ok(session)
}

/// Admits a player by join code. The joined event goes out to everyone
/// already in the room.
pub async fn add_player(
    state: &AppState,
    join_code: &str,
    name: String,
    kind: PlayerKind,
) -> Result<(Session, Player), LobbyError> {
    let session_id = state.store.get_by_code(join_code).await?.id;
    let player = Player::new(name, kind);
    let joined = player.clone();
    let session = state
        .store
        .update(&session_id, move |s| {
            s.touch();
            if s.phase != GamePhase::Lobby {
                return Err(LobbyError::AlreadyStarted);
            }
            if s.players.len() >= s.settings.max_players {
                return Err(LobbyError::SessionFull);
            }
            state.net.broadcast_to_game(
                &s.id,
                ServerEvent::PlayerJoined {
                    player: joined.public_view(),
                },
            );
            s.players.push(joined);
            Ok(s.clone())
        })
        .await??;
    Ok((session, player))
}

/// Host seats an agent into the lobby. From here on the engine treats it
/// like any other player.
pub async fn add_agent(
    state: &AppState,
    session_id: &str,
    requester_id: &str,
    name: String,
    persona: String,
) -> Result<Player, LobbyError> {
    let agent = Player::new(name, PlayerKind::Agent { persona });
    let seated = agent.clone();
    state
        .store
        .update(session_id, move |s| {
            s.touch();
            if s.player(requester_id).is_none() {
                return Err(LobbyError::PlayerNotFound);
            }
            if s.host_id != requester_id {
                return Err(LobbyError::NotHost);
            }
            if s.phase != GamePhase::Lobby {
                return Err(LobbyError::AlreadyStarted);
            }
            if s.players.len() >= s.settings.max_players {
                return Err(LobbyError::SessionFull);
            }
            state.net.broadcast_to_game(
                &s.id,
                ServerEvent::PlayerJoined {
                    player: seated.public_view(),
                },
            );
            s.players.push(seated);
            Ok(())
        })
        .await??;
    Ok(agent)
}

enum Departure {
    Left,
    EmptiedLobby,
}

/// In the lobby the entry is removed outright (with host migration); in a
/// running game the player is marked dead instead, their role stays
/// unrevealed, and the win condition is re-checked.
pub async fn remove_player(
    state: &AppState,
    session_id: &str,
    player_id: &str,
) -> Result<(), LobbyError> {
    let departure = state
        .store
        .update(session_id, |s| -> Result<Departure, LobbyError> {
            s.touch();
            let idx = s
                .players
                .iter()
                .position(|p| p.id == player_id)
                .ok_or(LobbyError::PlayerNotFound)?;

            match s.phase {
                GamePhase::Lobby => {
                    let leaving = s.players.remove(idx);
                    state.net.broadcast_to_game(
                        &s.id,
                        ServerEvent::PlayerLeft {
                            player_id: leaving.id.clone(),
                        },
                    );
                    if s.players.is_empty() {
                        return Ok(Departure::EmptiedLobby);
                    }
                    if leaving.is_host {
                        s.players[0].is_host = true;
                        s.host_id = s.players[0].id.clone();
                    }
                    Ok(Departure::Left)
                }
                GamePhase::GameOver => {
                    state.net.broadcast_to_game(
                        &s.id,
                        ServerEvent::PlayerLeft {
                            player_id: player_id.to_string(),
                        },
                    );
                    Ok(Departure::Left)
                }
                _ => {
                    let was_alive = s.players[idx].is_alive();
                    s.players[idx].is_dead = true;
                    state.net.broadcast_to_game(
                        &s.id,
                        ServerEvent::PlayerLeft {
                            player_id: player_id.to_string(),
                        },
                    );
                    if was_alive {
                        if let Some(winner) = s.check_win() {
                            phase_service::finish_game(s, &state.net, winner);
                        }
                    }
                    Ok(Departure::Left)
                }
            }
        })
        .await??;

    if matches!(departure, Departure::EmptiedLobby) {
        let _ = state.store.remove(session_id);
        state.net.drop_session(session_id);
        info!(session_id, "empty lobby deleted");
    }
    Ok(())
}

/// Deals roles and opens the first night. Role events go out privately
/// before the public phase change.
pub async fn start_session(
    state: &AppState,
    session_id: &str,
    requester_id: &str,
) -> Result<(), LobbyError> {
    let (round, secs) = state
        .store
        .update(session_id, |s| {
            s.touch();
            if s.player(requester_id).is_none() {
                return Err(LobbyError::PlayerNotFound);
            }
            if s.host_id != requester_id {
                return Err(LobbyError::NotHost);
            }
            if s.phase != GamePhase::Lobby {
                return Err(LobbyError::AlreadyStarted);
            }
            if s.players.len() < s.settings.min_players
                || s.players.len() <= s.settings.impostor_count
            {
                return Err(LobbyError::NotEnoughPlayers);
            }

            s.assign_roles(&mut rand::thread_rng());
            s.enter_night();

            let impostors = s.impostor_ids();
            for p in &s.players {
                if let Some(role) = p.role {
                    let allies = if p.is_impostor() {
                        impostors.iter().filter(|id| **id != p.id).cloned().collect()
                    } else {
                        Vec::new()
                    };
                    state
                        .net
                        .send_to_player(&s.id, &p.id, ServerEvent::RoleAssigned { role, allies });
                }
            }
            state
                .net
                .broadcast_to_game(&s.id, phase_service::phase_changed_event(s));

            info!(session_id = %s.id, players = s.players.len(), "session started");
            Ok((s.round, s.settings.night_secs))
        })
        .await??;

    phase_service::after_phase_entry(state, session_id, GamePhase::Night, round, secs);
    Ok(())
}

pub async fn list_sessions(state: &AppState) -> Vec<SessionSummary> {
    state
        .store
        .list()
        .await
        .iter()
        .map(|s| s.summary())
        .collect()
}

pub async fn delete_session(state: &AppState, session_id: &str) -> Result<(), LobbyError> {
    state.store.remove(session_id)?;
    state.net.drop_session(session_id);
    info!(session_id, "session deleted");
    Ok(())
}
