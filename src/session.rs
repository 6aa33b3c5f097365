//! Session storage
//!
//! Sessions are in-memory only: restarting the process abandons every
//! intake conversation. Session ids are always server-generated; an id a
//! client sends that the store does not recognize is replaced, never
//! adopted.

use crate::intake::{IntakePhase, TripIntakeState, HISTORY_WINDOW};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Per-conversation context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub state: TripIntakeState,
    pub phase: IntakePhase,
    /// Recent user utterances, oldest first, capped to the prompt window
    pub history: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            state: TripIntakeState::default(),
            phase: IntakePhase::Collecting,
            history: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Record a user turn, keeping only the recent window
    pub fn push_turn(&mut self, utterance: &str) {
        self.history.push(utterance.to_string());
        if self.history.len() > HISTORY_WINDOW {
            let excess = self.history.len() - HISTORY_WINDOW;
            self.history.drain(..excess);
        }
        self.updated_at = Utc::now();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Storage for conversation sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Look up a session by id
    async fn get(&self, session_id: &str) -> Option<Session>;

    /// Store a session, returning the id it lives under.
    ///
    /// An absent or unrecognized id gets a freshly generated one.
    async fn put(&self, session: Session, session_id: Option<&str>) -> String;
}

#[async_trait]
impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    async fn get(&self, session_id: &str) -> Option<Session> {
        (**self).get(session_id).await
    }

    async fn put(&self, session: Session, session_id: Option<&str>) -> String {
        (**self).put(session, session_id).await
    }
}

/// In-memory session store
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session_id: &str) -> Option<Session> {
        self.sessions.read().await.get(session_id).cloned()
    }

    async fn put(&self, session: Session, session_id: Option<&str>) -> String {
        let mut sessions = self.sessions.write().await;
        let id = match session_id {
            Some(id) if sessions.contains_key(id) => id.to_string(),
            _ => uuid::Uuid::new_v4().to_string(),
        };
        sessions.insert(id.clone(), session);
        id
    }
}
