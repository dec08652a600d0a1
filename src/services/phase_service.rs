use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;

use crate::broadcast::Broadcaster;
use crate::models::event::ServerEvent;
use crate::models::role::Team;
use crate::models::session::{GamePhase, Session};
use crate::services::{agent_service, night_service, vote_service};
use crate::state::AppState;

/// Terminal transition, shared by every caller that detects a win. Runs
/// inside the caller's store critical section.
pub fn finish_game(session: &mut Session, net: &Broadcaster, winner: Team) {
    session.enter_game_over(winner);
    net.broadcast_to_game(
        &session.id,
        ServerEvent::GameOver {
            winner,
            impostors: session.impostor_ids(),
        },
    );
}

pub fn phase_changed_event(session: &Session) -> ServerEvent {
    ServerEvent::PhaseChanged {
        phase: session.phase,
        round: session.round,
        deadline: session.phase_deadline,
    }
}

/// Hooks that run after a session entered a timed phase: the phase timer
/// and the agent turns. Callers invoke this outside the store lock.
pub fn after_phase_entry(state: &AppState, session_id: &str, phase: GamePhase, round: u32, secs: u64) {
    arm_phase_timer(state, session_id, phase, round, secs);
    agent_service::notify_phase(state, session_id, phase, round);
}

/// Liveness guarantee: every timed phase eventually moves on by itself.
/// The timer target re-checks (phase, round), so a transition that already
/// happened by other means turns this into a no-op.
pub fn arm_phase_timer(state: &AppState, session_id: &str, phase: GamePhase, round: u32, secs: u64) {
    let state = state.clone();
    let session_id = session_id.to_string();
    tokio::spawn(async move {
        sleep(Duration::from_secs(secs)).await;
        let result = match phase {
            GamePhase::Night => night_service::execute_night_auto(&state, &session_id, round)
                .await
                .err()
                .map(|e| e.to_string()),
            GamePhase::Discussion => vote_service::start_vote(&state, &session_id, round)
                .await
                .err()
                .map(|e| e.to_string()),
            GamePhase::Vote => vote_service::finalize_votes(&state, &session_id, round)
                .await
                .err()
                .map(|e| e.to_string()),
            GamePhase::Lobby | GamePhase::GameOver => None,
        };
        if let Some(error) = result {
            // usually the session was deleted while the timer slept
            debug!(session_id = %session_id, phase = ?phase, %error, "phase timer fizzled");
        }
    });
}
