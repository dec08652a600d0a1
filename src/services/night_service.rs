use tracing::info;

use crate::models::error::RoundError;
use crate::models::event::ServerEvent;
use crate::models::location::{self, Location};
use crate::models::session::{GamePhase, KillRecord};
use crate::services::phase_service;
use crate::state::AppState;

/// The dead-before-phase check order matters: a dead player's action is
/// rejected as `player-dead` no matter what phase the session is in.
fn check_actor(
    s: &crate::models::session::Session,
    player_id: &str,
) -> Result<(), RoundError> {
    let player = s.player(player_id).ok_or(RoundError::PlayerNotFound)?;
    if player.is_dead {
        return Err(RoundError::PlayerDead);
    }
    if s.phase != GamePhase::Night {
        return Err(RoundError::WrongPhase);
    }
    Ok(())
}

/// Walks one room over. Movement is never broadcast; positions surface only
/// through per-viewer state.
pub async fn move_player(
    state: &AppState,
    session_id: &str,
    player_id: &str,
    to: Location,
) -> Result<(), RoundError> {
    state
        .store
        .update(session_id, |s| {
            s.touch();
            check_actor(s, player_id)?;
            let from = s
                .player(player_id)
                .map(|p| p.location)
                .ok_or(RoundError::PlayerNotFound)?;
            if !from.is_adjacent(to) {
                return Err(RoundError::InvalidTarget);
            }
            if let Some(p) = s.player_mut(player_id) {
                p.location = to;
                p.in_vent = false;
            }
            Ok(())
        })
        .await?
}

/// Concealment toggle, impostor only.
pub async fn vent(state: &AppState, session_id: &str, player_id: &str) -> Result<(), RoundError> {
    state
        .store
        .update(session_id, |s| {
            s.touch();
            check_actor(s, player_id)?;
            let is_impostor = s
                .player(player_id)
                .map(|p| p.is_impostor())
                .unwrap_or(false);
            if !is_impostor {
                return Err(RoundError::NotImpostor);
            }
            if let Some(p) = s.player_mut(player_id) {
                p.in_vent = !p.in_vent;
            }
            Ok(())
        })
        .await?
}

/// Bookkeeping only; task progress never decides the game.
pub async fn complete_task(
    state: &AppState,
    session_id: &str,
    player_id: &str,
    task: &str,
) -> Result<(), RoundError> {
    state
        .store
        .update(session_id, |s| {
            s.touch();
            check_actor(s, player_id)?;
            let room = location::task_location(task).ok_or(RoundError::InvalidTarget)?;
            let here = s
                .player(player_id)
                .map(|p| p.location)
                .ok_or(RoundError::PlayerNotFound)?;
            if here != room {
                return Err(RoundError::InvalidTarget);
            }
            s.tasks_done
                .entry(player_id.to_string())
                .or_default()
                .insert(task.to_string());
            Ok(())
        })
        .await?
}

/// A kill is private: the victim goes down, a body record is written, and
/// nothing is broadcast until someone reports it. The win condition is
/// checked immediately.
pub async fn execute_kill(
    state: &AppState,
    session_id: &str,
    killer_id: &str,
    victim_id: &str,
) -> Result<(), RoundError> {
    state
        .store
        .update(session_id, |s| {
            s.touch();
            check_actor(s, killer_id)?;

            let killer = s.player(killer_id).ok_or(RoundError::PlayerNotFound)?;
            if !killer.is_impostor() || killer.in_vent {
                return Err(RoundError::InvalidTarget);
            }
            let killer_location = killer.location;

            let victim = s.player(victim_id).ok_or(RoundError::InvalidTarget)?;
            if victim.id == killer_id
                || victim.is_dead
                || victim.is_impostor()
                || victim.location != killer_location
            {
                return Err(RoundError::InvalidTarget);
            }

            if let Some(v) = s.player_mut(victim_id) {
                v.is_dead = true;
            }
            s.kills.push(KillRecord {
                killer_id: killer_id.to_string(),
                victim_id: victim_id.to_string(),
                location: killer_location,
                round: s.round,
                reported: false,
            });

            if let Some(winner) = s.check_win() {
                phase_service::finish_game(s, &state.net, winner);
            }
            Ok(())
        })
        .await?
}

/// Makes a private kill public and opens the discussion.
pub async fn report_body(
    state: &AppState,
    session_id: &str,
    reporter_id: &str,
    victim_id: &str,
) -> Result<(), RoundError> {
    let entered = state
        .store
        .update(session_id, |s| {
            s.touch();
            check_actor(s, reporter_id)?;

            let reporter_location = s
                .player(reporter_id)
                .map(|p| p.location)
                .ok_or(RoundError::PlayerNotFound)?;

            let idx = match s
                .kills
                .iter()
                .position(|k| k.victim_id == victim_id && !k.reported)
            {
                Some(idx) => idx,
                None => {
                    // distinguish "already reported" from "no such body"
                    if s.kills.iter().any(|k| k.victim_id == victim_id) {
                        return Err(RoundError::BodyAlreadyReported);
                    }
                    return Err(RoundError::InvalidTarget);
                }
            };
            if s.kills[idx].location != reporter_location {
                return Err(RoundError::InvalidTarget);
            }

            s.kills[idx].reported = true;
            let location = s.kills[idx].location;
            state.net.broadcast_to_game(
                &s.id,
                ServerEvent::BodyReported {
                    reporter_id: reporter_id.to_string(),
                    victim_id: victim_id.to_string(),
                    location,
                },
            );

            s.enter_discussion();
            state
                .net
                .broadcast_to_game(&s.id, phase_service::phase_changed_event(s));

            let victim_name = s
                .player(victim_id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| victim_id.to_string());
            let text = format!("The body of {} was found in {}.", victim_name, location);
            let message = s.chat.add_system_message(text, s.phase, s.round);
            state
                .net
                .broadcast_to_game(&s.id, ServerEvent::MessageAdded { message });

            info!(session_id = %s.id, victim_id, "body reported, discussion opened");
            Ok((s.round, s.settings.discussion_secs))
        })
        .await??;

    let (round, secs) = entered;
    phase_service::after_phase_entry(state, session_id, GamePhase::Discussion, round, secs);
    Ok(())
}

/// Timer fallback: an unreported night still ends. Harmless no-op when the
/// session already moved on.
pub async fn execute_night_auto(
    state: &AppState,
    session_id: &str,
    round: u32,
) -> Result<(), RoundError> {
    let entered = state
        .store
        .update(session_id, |s| {
            if s.phase != GamePhase::Night || s.round != round {
                return None;
            }
            s.enter_discussion();
            state
                .net
                .broadcast_to_game(&s.id, phase_service::phase_changed_event(s));
            let message = s.chat.add_system_message(
                "The night passed without incident.".to_string(),
                s.phase,
                s.round,
            );
            state
                .net
                .broadcast_to_game(&s.id, ServerEvent::MessageAdded { message });
            Some((s.round, s.settings.discussion_secs))
        })
        .await?;

    if let Some((round, secs)) = entered {
        phase_service::after_phase_entry(state, session_id, GamePhase::Discussion, round, secs);
    }
    Ok(())
}
