use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use tokio::sync::broadcast;
use tracing::debug;
use uuid::Uuid;

use crate::models::event::{Audience, Envelope, ServerEvent};

const CHANNEL_CAPACITY: usize = 1000;

/// Per-session fan-out. Each session gets one broadcast channel carrying
/// addressed envelopes; socket tasks subscribe and drop what is not theirs.
/// Sends are plain synchronous pushes, so anything emitted inside a store
/// mutation leaves in mutation order.
#[derive(Clone, Default)]
pub struct Broadcaster {
    inner: Arc<RwLock<HashMap<String, SessionHub>>>,
}

struct SessionHub {
    tx: broadcast::Sender<Envelope>,
    players: HashMap<Uuid, String>,
    spectators: HashSet<Uuid>,
}

impl SessionHub {
    fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        SessionHub {
            tx,
            players: HashMap::new(),
            spectators: HashSet::new(),
        }
    }
}

impl Broadcaster {
    pub fn new() -> Self {
        Broadcaster::default()
    }

    pub fn subscribe(&self, session_id: &str) -> broadcast::Receiver<Envelope> {
        let mut hubs = self.inner.write().unwrap();
        hubs.entry(session_id.to_string())
            .or_insert_with(SessionHub::new)
            .tx
            .subscribe()
    }

    pub fn register_player(&self, session_id: &str, connection: Uuid, player_id: &str) {
        let mut hubs = self.inner.write().unwrap();
        hubs.entry(session_id.to_string())
            .or_insert_with(SessionHub::new)
            .players
            .insert(connection, player_id.to_string());
    }

    pub fn register_spectator(&self, session_id: &str, connection: Uuid) {
        let count = {
            let mut hubs = self.inner.write().unwrap();
            let hub = hubs
                .entry(session_id.to_string())
                .or_insert_with(SessionHub::new);
            hub.spectators.insert(connection);
            hub.spectators.len()
        };
        self.broadcast_to_game(session_id, ServerEvent::SpectatorCountChanged { count });
    }

    pub fn remove_client(&self, session_id: &str, connection: Uuid) {
        let spectators_now = {
            let mut hubs = self.inner.write().unwrap();
            match hubs.get_mut(session_id) {
                Some(hub) => {
                    hub.players.remove(&connection);
                    if hub.spectators.remove(&connection) {
                        Some(hub.spectators.len())
                    } else {
                        None
                    }
                }
                None => None,
            }
        };
        if let Some(count) = spectators_now {
            self.broadcast_to_game(session_id, ServerEvent::SpectatorCountChanged { count });
        }
    }

    pub fn spectator_count(&self, session_id: &str) -> usize {
        self.inner
            .read()
            .unwrap()
            .get(session_id)
            .map(|hub| hub.spectators.len())
            .unwrap_or(0)
    }

    pub fn send(&self, session_id: &str, envelope: Envelope) {
        let tx = {
            self.inner
                .read()
                .unwrap()
                .get(session_id)
                .map(|hub| hub.tx.clone())
        };
        match tx {
            // Err means no live subscribers; delivery is best-effort.
            Some(tx) => {
                if tx.send(envelope).is_err() {
                    debug!(session_id, "no subscribers for event");
                }
            }
            None => debug!(session_id, "no channel for session"),
        }
    }

    pub fn send_to_connection(&self, session_id: &str, connection: Uuid, event: ServerEvent) {
        self.send(session_id, Envelope::new(Audience::Connection(connection), event));
    }

    pub fn send_to_player(&self, session_id: &str, player_id: &str, event: ServerEvent) {
        self.send(
            session_id,
            Envelope::new(Audience::Player(player_id.to_string()), event),
        );
    }

    pub fn broadcast_to_game(&self, session_id: &str, event: ServerEvent) {
        self.send(session_id, Envelope::new(Audience::Game, event));
    }

    pub fn broadcast_to_players(&self, session_id: &str, event: ServerEvent) {
        self.send(session_id, Envelope::new(Audience::Players, event));
    }

    pub fn broadcast_to_spectators(&self, session_id: &str, event: ServerEvent) {
        self.send(session_id, Envelope::new(Audience::Spectators, event));
    }

    /// Closes the session's channel; subscriber tasks observe the close and
    /// hang up their sockets.
    pub fn drop_session(&self, session_id: &str) {
        self.inner.write().unwrap().remove(session_id);
    }
}
