use std::sync::Arc;

use crate::agents::scripted::ScriptedDecisionProvider;
use crate::models::player::PlayerKind;
use crate::models::session::{GamePhase, GameSettings};
use crate::services::lobby_service;
use crate::state::AppState;
use crate::utils::config::ServerConfig;

/// Config with no agent stagger so scripted turns land immediately.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        agent_delay_min_ms: 0,
        agent_delay_max_ms: 1,
        ..ServerConfig::default()
    }
}

pub fn test_state() -> (AppState, Arc<ScriptedDecisionProvider>) {
    let provider = Arc::new(ScriptedDecisionProvider::new());
    let state = AppState::new()
        .with_config(test_config())
        .with_decisions(provider.clone());
    (state, provider)
}

/// Phases long enough that transitions only happen when the test drives
/// them.
pub fn manual_settings() -> GameSettings {
    GameSettings {
        night_secs: 600,
        discussion_secs: 600,
        vote_secs: 600,
        ..GameSettings::default()
    }
}

pub struct LobbyFixture {
    pub session_id: String,
    pub join_code: String,
    pub host_id: String,
    /// Host first, then joiners in order.
    pub player_ids: Vec<String>,
}

pub async fn lobby_with_players(
    state: &AppState,
    settings: GameSettings,
    names: &[&str],
) -> LobbyFixture {
    let session = lobby_service::create_session(
        state,
        settings,
        names[0].to_string(),
        PlayerKind::Human,
    )
    .await
    .unwrap();
    let mut player_ids = vec![session.host_id.clone()];
    for name in &names[1..] {
        let (_, player) = lobby_service::add_player(
            state,
            &session.join_code,
            name.to_string(),
            PlayerKind::Human,
        )
        .await
        .unwrap();
        player_ids.push(player.id);
    }
    LobbyFixture {
        session_id: session.id,
        join_code: session.join_code,
        host_id: session.host_id,
        player_ids,
    }
}

pub struct StartedFixture {
    pub session_id: String,
    pub host_id: String,
    pub impostors: Vec<String>,
    pub crew: Vec<String>,
}

/// Starts the game and reads back how the roles fell.
pub async fn started_session(
    state: &AppState,
    settings: GameSettings,
    names: &[&str],
) -> StartedFixture {
    let lobby = lobby_with_players(state, settings, names).await;
    lobby_service::start_session(state, &lobby.session_id, &lobby.host_id)
        .await
        .unwrap();

    let session = state.store.get(&lobby.session_id).await.unwrap();
    assert_eq!(session.phase, GamePhase::Night);
    let impostors = session.impostor_ids();
    let crew = session
        .players
        .iter()
        .filter(|p| !p.is_impostor())
        .map(|p| p.id.clone())
        .collect();
    StartedFixture {
        session_id: lobby.session_id,
        host_id: lobby.host_id,
        impostors,
        crew,
    }
}
