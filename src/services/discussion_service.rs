use crate::models::chat::{ChatMessage, Sender};
use crate::models::error::ChatError;
use crate::models::event::ServerEvent;
use crate::models::session::GamePhase;
use crate::state::AppState;

/// Chat is open only during discussion. The dead stay silent regardless
/// of phase.
pub async fn add_message(
    state: &AppState,
    session_id: &str,
    player_id: &str,
    text: String,
) -> Result<ChatMessage, ChatError> {
    state
        .store
        .update(session_id, |s| {
            s.touch();
            let sender = {
                let player = s.player(player_id).ok_or(ChatError::PlayerNotFound)?;
                if player.is_dead {
                    return Err(ChatError::PlayerDead);
                }
                Sender::Player {
                    id: player.id.clone(),
                    name: player.name.clone(),
                }
            };
            if s.phase != GamePhase::Discussion {
                return Err(ChatError::WrongPhase);
            }
            let message = ChatMessage::new(sender, text, s.phase, s.round);
            s.chat.add_message(message.clone());
            state.net.broadcast_to_game(
                &s.id,
                ServerEvent::MessageAdded {
                    message: message.clone(),
                },
            );
            Ok(message)
        })
        .await?
}

pub async fn recent_messages(
    state: &AppState,
    session_id: &str,
    limit: usize,
) -> Result<Vec<ChatMessage>, ChatError> {
    let session = state.store.get(session_id).await?;
    Ok(session.chat.recent(limit))
}
