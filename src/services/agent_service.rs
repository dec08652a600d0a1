use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::agents::{AgentDecision, DecisionContext, DecisionProvider};
use crate::models::event::ClientCommand;
use crate::models::player::PlayerKind;
use crate::models::session::GamePhase;
use crate::services;
use crate::state::AppState;

const CHAT_CONTEXT_LIMIT: usize = 20;

/// Kicks off one turn per living agent in the session. Turns are staggered
/// with a random delay so agents read as participants, not as a batch job.
/// Without a configured provider agents simply sit there.
pub fn notify_phase(state: &AppState, session_id: &str, phase: GamePhase, round: u32) {
    let provider = match &state.decisions {
        Some(p) => Arc::clone(p),
        None => return,
    };
    let state = state.clone();
    let session_id = session_id.to_string();
    tokio::spawn(async move {
        let session = match state.store.get(&session_id).await {
            Ok(s) => s,
            Err(_) => return,
        };
        if session.phase != phase || session.round != round {
            return;
        }
        let agents: Vec<(String, String)> = session
            .players
            .iter()
            .filter(|p| p.is_alive())
            .filter_map(|p| match &p.kind {
                PlayerKind::Agent { persona } => Some((p.id.clone(), persona.clone())),
                PlayerKind::Human => None,
            })
            .collect();
        if agents.is_empty() {
            return;
        }
        debug!(%session_id, ?phase, agents = agents.len(), "scheduling agent turns");

        let (min_ms, max_ms) = state.config.agent_delay_range();
        for (player_id, persona) in agents {
            let delay_ms = rand::thread_rng().gen_range(min_ms..=max_ms);
            tokio::spawn(agent_turn(
                state.clone(),
                Arc::clone(&provider),
                session_id.clone(),
                player_id,
                persona,
                phase,
                round,
                delay_ms,
            ));
        }
    });
}

/// One agent's turn: wait out the stagger, re-check that the world it was
/// invited into still exists, ask the provider, then feed the decision
/// through the same command path a human socket uses. Every failure mode
/// ends in a logged skip; an agent can never wedge a session.
#[allow(clippy::too_many_arguments)]
async fn agent_turn(
    state: AppState,
    provider: Arc<dyn DecisionProvider>,
    session_id: String,
    player_id: String,
    persona: String,
    phase: GamePhase,
    round: u32,
    delay_ms: u64,
) {
    sleep(Duration::from_millis(delay_ms)).await;

    let session = match state.store.get(&session_id).await {
        Ok(s) => s,
        Err(_) => return,
    };
    if session.phase != phase || session.round != round {
        return;
    }
    if !session
        .player(&player_id)
        .map(|p| p.is_alive())
        .unwrap_or(false)
    {
        return;
    }

    let ctx = DecisionContext {
        session_id: session_id.clone(),
        player_id: player_id.clone(),
        persona,
        phase,
        round,
        view: session.view_for(Some(&player_id)),
        recent_chat: session.chat.recent(CHAT_CONTEXT_LIMIT),
    };

    let decision = match provider.decide(ctx).await {
        Ok(d) => d,
        Err(error) => {
            warn!(%session_id, %player_id, %error, "agent decision failed, skipping turn");
            return;
        }
    };
    let command = match decision_to_command(decision) {
        Some(c) => c,
        None => return,
    };
    if let Err(error) = services::apply_command(&state, &session_id, &player_id, command).await {
        // the table moved on while the agent was thinking
        debug!(%session_id, %player_id, %error, "stale agent decision discarded");
    }
}

fn decision_to_command(decision: AgentDecision) -> Option<ClientCommand> {
    match decision {
        AgentDecision::Chat { text } => Some(ClientCommand::ChatMessage { text }),
        AgentDecision::CastVote { target } => Some(ClientCommand::CastVote { target }),
        AgentDecision::Move { to } => Some(ClientCommand::Move { to }),
        AgentDecision::Vent => Some(ClientCommand::Vent),
        AgentDecision::Kill { victim_id } => Some(ClientCommand::Kill { victim_id }),
        AgentDecision::CompleteTask { task } => Some(ClientCommand::CompleteTask { task }),
        AgentDecision::ReportBody { victim_id } => Some(ClientCommand::ReportBody { victim_id }),
        AgentDecision::Wait => None,
    }
}
