use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{Duration, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::error::StoreError;
use crate::models::player::Player;
use crate::models::session::{GameSettings, Session};
use crate::utils::codes;

const MAX_CODE_ATTEMPTS: usize = 32;

/// Registry of live sessions. The outer map lock is held only to resolve a
/// session cell; every read and mutation of a session happens under that
/// session's own mutex, so unrelated sessions never contend.
#[derive(Clone, Default)]
pub struct GameStore {
    inner: Arc<RwLock<StoreInner>>,
}

#[derive(Default)]
struct StoreInner {
    sessions: HashMap<String, Arc<Mutex<Session>>>,
    /// join code -> session id
    codes: HashMap<String, String>,
}

impl GameStore {
    pub fn new() -> Self {
        GameStore::default()
    }

    pub fn create(&self, settings: GameSettings, host: Player) -> Result<Session, StoreError> {
        let mut inner = self.inner.write().unwrap();
        let mut rng = rand::thread_rng();
        let mut code = codes::generate_join_code(&mut rng);
        let mut attempts = 1;
        while inner.codes.contains_key(&code) {
            if attempts >= MAX_CODE_ATTEMPTS {
                return Err(StoreError::DuplicateJoinCode);
            }
            code = codes::generate_join_code(&mut rng);
            attempts += 1;
        }

        let id = Uuid::new_v4().to_string();
        let session = Session::new(id.clone(), code.clone(), settings, host);
        inner.codes.insert(code, id.clone());
        inner.sessions.insert(id, Arc::new(Mutex::new(session.clone())));
        Ok(session)
    }

    fn cell(&self, id: &str) -> Result<Arc<Mutex<Session>>, StoreError> {
        self.inner
            .read()
            .unwrap()
            .sessions
            .get(id)
            .cloned()
            .ok_or(StoreError::SessionNotFound)
    }

    pub async fn get(&self, id: &str) -> Result<Session, StoreError> {
        let cell = self.cell(id)?;
        let session = cell.lock().await;
        Ok(session.clone())
    }

    pub async fn get_by_code(&self, code: &str) -> Result<Session, StoreError> {
        let code = code.trim().to_uppercase();
        let id = self
            .inner
            .read()
            .unwrap()
            .codes
            .get(&code)
            .cloned()
            .ok_or(StoreError::SessionNotFound)?;
        self.get(&id).await
    }

    /// The single mutation gate. The closure runs under the session's own
    /// lock, so concurrent callers targeting the same session serialize and
    /// nobody observes a half-applied aggregate. Player-driven closures are
    /// expected to `touch()` the session; timer-driven ones deliberately do
    /// not, so abandoned games still idle out.
    pub async fn update<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Session) -> T,
    ) -> Result<T, StoreError> {
        let cell = self.cell(id)?;
        let mut session = cell.lock().await;
        Ok(f(&mut session))
    }

    pub fn remove(&self, id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().unwrap();
        if inner.sessions.remove(id).is_none() {
            return Err(StoreError::SessionNotFound);
        }
        inner.codes.retain(|_, v| v != id);
        Ok(())
    }

    pub async fn list(&self) -> Vec<Session> {
        let cells: Vec<Arc<Mutex<Session>>> = {
            self.inner.read().unwrap().sessions.values().cloned().collect()
        };
        let mut sessions = Vec::with_capacity(cells.len());
        for cell in cells {
            sessions.push(cell.lock().await.clone());
        }
        sessions
    }

    /// Snapshot hook for an external persistence collaborator.
    pub async fn active_sessions(&self) -> Vec<Session> {
        self.list().await
    }

    /// Restore hook for process-restart continuity.
    pub fn restore_sessions(&self, snapshot: Vec<Session>) {
        let mut inner = self.inner.write().unwrap();
        for session in snapshot {
            inner
                .codes
                .insert(session.join_code.clone(), session.id.clone());
            inner
                .sessions
                .insert(session.id.clone(), Arc::new(Mutex::new(session)));
        }
    }

    /// Drops sessions with no mutation inside `max_idle`. A session whose
    /// lock is currently held is busy, which is activity enough to skip it.
    pub fn prune_idle(&self, max_idle: Duration) -> Vec<String> {
        let now = Utc::now();
        let cells: Vec<(String, Arc<Mutex<Session>>)> = {
            self.inner
                .read()
                .unwrap()
                .sessions
                .iter()
                .map(|(id, cell)| (id.clone(), cell.clone()))
                .collect()
        };

        let mut stale = Vec::new();
        for (id, cell) in cells {
            if let Ok(session) = cell.try_lock() {
                if now - session.last_activity > max_idle {
                    stale.push(id);
                }
            }
        }

        if !stale.is_empty() {
            let mut inner = self.inner.write().unwrap();
            for id in &stale {
                inner.sessions.remove(id);
            }
            inner.codes.retain(|_, v| !stale.contains(v));
        }
        stale
    }
}
