//! In-memory session store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sparkle_core::session::{Session, SessionId, SessionStore};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

/// Process-local session store backed by a `HashMap`.
///
/// The map's `RwLock` guards membership only; each session carries its own
/// `Mutex`, so holding one session's lock never blocks operations on other
/// sessions or on the map itself.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<Session>>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn insert(&self, session: Session) -> SessionId {
        let id = session.id.clone();
        self.sessions
            .write()
            .await
            .insert(id.clone(), Arc::new(Mutex::new(session)));
        debug!(session_id = %id, "Session stored");
        id
    }

    async fn get(&self, id: &SessionId) -> Option<Arc<Mutex<Session>>> {
        self.sessions.read().await.get(id).cloned()
    }

    async fn remove(&self, id: &SessionId) -> Option<Arc<Mutex<Session>>> {
        let removed = self.sessions.write().await.remove(id);
        if removed.is_some() {
            debug!(session_id = %id, "Session removed");
        }
        removed
    }

    async fn ids(&self) -> Vec<SessionId> {
        self.sessions.read().await.keys().cloned().collect()
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
