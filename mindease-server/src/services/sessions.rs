//! In-memory page sessions
//!
//! Every page load opens a session holding that page's state. A handler
//! locks the session for its whole pass, provider call included, so actions
//! within one session run one at a time while different sessions proceed
//! concurrently. Sessions idle longer than the configured timeout are
//! dropped; nothing is persisted.

use chrono::{DateTime, Utc};
use mindease_common::{ChatHistory, SessionSignals};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// State owned by one page load
#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Mood analyzer signals
    pub signals: SessionSignals,
    /// Chatbot conversation
    pub chat: ChatHistory,
}

impl Session {
    fn new(id: Uuid) -> Self {
        Self {
            id,
            created_at: Utc::now(),
            signals: SessionSignals::new(),
            chat: ChatHistory::new(),
        }
    }
}

struct StoredSession {
    session: Arc<Mutex<Session>>,
    last_active: Instant,
}

/// Shared session registry
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, StoredSession>>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_timeout,
        }
    }

    /// Open a new session and return its id
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let mut sessions = self.sessions.write().await;

        let expired = Self::prune_locked(&mut sessions, self.idle_timeout);
        if expired > 0 {
            tracing::debug!(expired, "Dropped idle sessions");
        }

        sessions.insert(
            id,
            StoredSession {
                session: Arc::new(Mutex::new(Session::new(id))),
                last_active: Instant::now(),
            },
        );
        tracing::info!(session_id = %id, active = sessions.len(), "Session opened");

        id
    }

    /// Look up a session and mark it active
    pub async fn get(&self, id: Uuid) -> Option<Arc<Mutex<Session>>> {
        let mut sessions = self.sessions.write().await;
        let stored = sessions.get_mut(&id)?;
        stored.last_active = Instant::now();
        Some(Arc::clone(&stored.session))
    }

    /// Close a session; returns false if it did not exist
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            tracing::info!(session_id = %id, "Session closed");
        }
        removed
    }

    /// Drop sessions idle longer than the timeout; returns how many
    pub async fn prune_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        Self::prune_locked(&mut sessions, self.idle_timeout)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    fn prune_locked(sessions: &mut HashMap<Uuid, StoredSession>, idle_timeout: Duration) -> usize {
        let before = sessions.len();
        sessions.retain(|_, stored| stored.last_active.elapsed() < idle_timeout);
        before - sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindease_common::SignalKind;

    #[tokio::test]
    async fn test_create_and_get() {
        let store = SessionStore::new(Duration::from_secs(60));
        let id = store.create().await;

        let session = store.get(id).await.expect("session should exist");
        let session = session.lock().await;
        assert_eq!(session.id, id);
        assert!(session.signals.known_kinds().is_empty());
        assert!(session.chat.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_session_is_none() {
        let store = SessionStore::new(Duration::from_secs(60));
        assert!(store.get(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new(Duration::from_secs(60));
        let a = store.create().await;
        let b = store.create().await;

        {
            let session = store.get(a).await.unwrap();
            session
                .lock()
                .await
                .signals
                .record(SignalKind::TextSentiment, "positive");
        }

        let session_b = store.get(b).await.unwrap();
        assert!(session_b.lock().await.signals.known_kinds().is_empty());
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_remove() {
        let store = SessionStore::new(Duration::from_secs(60));
        let id = store.create().await;

        assert!(store.remove(id).await);
        assert!(!store.remove(id).await);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_idle_sessions_are_pruned() {
        let store = SessionStore::new(Duration::from_millis(50));
        let id = store.create().await;

        tokio::time::sleep(Duration::from_millis(80)).await;

        assert_eq!(store.prune_idle().await, 1);
        assert!(store.get(id).await.is_none());
    }

    #[tokio::test]
    async fn test_access_keeps_session_alive() {
        let store = SessionStore::new(Duration::from_millis(200));
        let id = store.create().await;

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(store.get(id).await.is_some());
        tokio::time::sleep(Duration::from_millis(120)).await;

        assert_eq!(store.prune_idle().await, 0);
    }
}
