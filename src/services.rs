pub mod agent_service;
pub mod discussion_service;
pub mod lobby_service;
pub mod night_service;
pub mod phase_service;
pub mod vote_service;

use crate::models::error::GameError;
use crate::models::event::ClientCommand;
use crate::state::AppState;

/// The one entry point for in-game commands. Human sockets and agent turns
/// both land here, so every input passes the same validation.
pub async fn apply_command(
    state: &AppState,
    session_id: &str,
    player_id: &str,
    command: ClientCommand,
) -> Result<(), GameError> {
    match command {
        ClientCommand::StartSession => {
            lobby_service::start_session(state, session_id, player_id).await?
        }
        ClientCommand::Move { to } => {
            night_service::move_player(state, session_id, player_id, to).await?
        }
        ClientCommand::Vent => night_service::vent(state, session_id, player_id).await?,
        ClientCommand::CompleteTask { task } => {
            night_service::complete_task(state, session_id, player_id, &task).await?
        }
        ClientCommand::Kill { victim_id } => {
            night_service::execute_kill(state, session_id, player_id, &victim_id).await?
        }
        ClientCommand::ReportBody { victim_id } => {
            night_service::report_body(state, session_id, player_id, &victim_id).await?
        }
        ClientCommand::ChatMessage { text } => {
            discussion_service::add_message(state, session_id, player_id, text)
                .await
                .map(|_| ())?
        }
        ClientCommand::CastVote { target } => {
            vote_service::cast_vote(state, session_id, player_id, target).await?
        }
        ClientCommand::LeaveSession => {
            lobby_service::remove_player(state, session_id, player_id).await?
        }
    }
    Ok(())
}
