use tracing::info;

use crate::models::error::VoteError;
use crate::models::event::ServerEvent;
use crate::models::role::Team;
use crate::models::session::GamePhase;
use crate::models::vote::{TallyOutcome, VoteTarget};
use crate::services::phase_service;
use crate::state::AppState;

/// Timer entry into the vote phase. No-op when the session already moved on,
/// which happens when a body report restarted the cycle first.
pub async fn start_vote(state: &AppState, session_id: &str, round: u32) -> Result<(), VoteError> {
    let entered = state
        .store
        .update(session_id, |s| {
            if s.phase != GamePhase::Discussion || s.round != round {
                return None;
            }
            s.enter_vote();
            state
                .net
                .broadcast_to_game(&s.id, phase_service::phase_changed_event(s));
            Some((s.round, s.settings.vote_secs))
        })
        .await?;

    if let Some((round, secs)) = entered {
        phase_service::after_phase_entry(state, session_id, GamePhase::Vote, round, secs);
    }
    Ok(())
}

/// Records a ballot. Repeat votes overwrite. Only the fact that a vote
/// happened leaves the server; the target stays hidden until the tally.
pub async fn cast_vote(
    state: &AppState,
    session_id: &str,
    player_id: &str,
    target: Option<String>,
) -> Result<(), VoteError> {
    let finalize_round = state
        .store
        .update(session_id, |s| {
            s.touch();
            let voter = s.player(player_id).ok_or(VoteError::PlayerNotFound)?;
            if voter.is_dead {
                return Err(VoteError::PlayerDead);
            }
            if s.phase != GamePhase::Vote {
                return Err(VoteError::WrongPhase);
            }
            if s.votes.finalized {
                return Err(VoteError::AlreadyFinalized);
            }

            let ballot = match target {
                Some(target_id) => {
                    let candidate = s.player(&target_id).ok_or(VoteError::InvalidTarget)?;
                    if candidate.is_dead {
                        return Err(VoteError::InvalidTarget);
                    }
                    VoteTarget::Player(target_id)
                }
                None => VoteTarget::Skip,
            };
            s.votes.cast(player_id, ballot);
            state.net.broadcast_to_players(
                &s.id,
                ServerEvent::VoteCast {
                    voter_id: player_id.to_string(),
                },
            );

            if s.all_votes_cast() {
                Ok(Some(s.round))
            } else {
                Ok(None)
            }
        })
        .await??;

    if let Some(round) = finalize_round {
        finalize_votes(state, session_id, round).await?;
    }
    Ok(())
}

/// Closes the ballot box and applies the outcome. Reached from the phase
/// timer and from the last living ballot; the finalized flag and the phase
/// guard make the second arrival a no-op.
pub async fn finalize_votes(
    state: &AppState,
    session_id: &str,
    round: u32,
) -> Result<(), VoteError> {
    let entered = state
        .store
        .update(session_id, |s| {
            if s.phase != GamePhase::Vote || s.votes.round != round || s.votes.finalized {
                return None;
            }
            s.votes.finalized = true;

            let (tally, skipped) = s.votes.counts();
            let outcome = s.votes.tally();

            let (eliminated, eliminated_role, verdict) = match outcome {
                TallyOutcome::Eliminated(target_id) => {
                    let (name, role) = s
                        .player(&target_id)
                        .map(|p| (p.name.clone(), p.role))
                        .unwrap_or((target_id.clone(), None));
                    if let Some(p) = s.player_mut(&target_id) {
                        p.is_dead = true;
                        p.revealed = true;
                    }
                    let verdict = match role {
                        Some(r) if r.team() == Team::Impostors => {
                            format!("{} was ejected. They were an impostor.", name)
                        }
                        _ => format!("{} was ejected. They were a crew member.", name),
                    };
                    (Some(target_id), role, verdict)
                }
                TallyOutcome::NoElimination => {
                    (None, None, "No one was ejected.".to_string())
                }
            };

            state.net.broadcast_to_game(
                &s.id,
                ServerEvent::VoteResult {
                    tally,
                    skipped,
                    eliminated: eliminated.clone(),
                    eliminated_role,
                },
            );
            let message = s.chat.add_system_message(verdict, s.phase, s.round);
            state
                .net
                .broadcast_to_game(&s.id, ServerEvent::MessageAdded { message });

            if eliminated.is_some() {
                if let Some(winner) = s.check_win() {
                    phase_service::finish_game(s, &state.net, winner);
                    return Some(None);
                }
            }

            s.enter_night();
            state
                .net
                .broadcast_to_game(&s.id, phase_service::phase_changed_event(s));
            info!(session_id = %s.id, round = s.round, "votes tallied, next night begins");
            Some(Some((s.round, s.settings.night_secs)))
        })
        .await?;

    if let Some(Some((round, secs))) = entered {
        phase_service::after_phase_entry(state, session_id, GamePhase::Night, round, secs);
    }
    Ok(())
}
