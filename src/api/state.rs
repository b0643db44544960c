use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::services::{AuthContext, ConversationalSearch, RecommenderApi};

/// Conversational search sessions by session id
pub type ChatSessions = Arc<RwLock<HashMap<String, Arc<Mutex<ConversationalSearch>>>>>;

/// Shared state of the view server
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn RecommenderApi>,
    pub auth: AuthContext,
    pub chats: ChatSessions,
}

impl AppState {
    pub fn new(api: Arc<dyn RecommenderApi>, auth: AuthContext) -> Self {
        Self {
            api,
            auth,
            chats: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Looks up a running conversational search session
    pub async fn find_chat(&self, session_id: &str) -> Option<Arc<Mutex<ConversationalSearch>>> {
        self.chats.read().await.get(session_id).cloned()
    }

    /// Starts a session under a fresh id and registers it
    pub async fn start_chat(&self) -> Arc<Mutex<ConversationalSearch>> {
        let search = ConversationalSearch::new();
        let session_id = search.session_id().to_string();
        let session = Arc::new(Mutex::new(search));

        let mut chats = self.chats.write().await;
        chats.insert(session_id.clone(), session.clone());
        tracing::debug!(session_id = %session_id, sessions = chats.len(), "Chat session started");
        session
    }

    /// Drops every conversational search session
    pub async fn clear_chats(&self) {
        let mut chats = self.chats.write().await;
        tracing::debug!(sessions = chats.len(), "Discarding chat sessions");
        chats.clear();
    }
}
