use uuid::Uuid;

use crate::{
    models::{ChatMessage, ChatReply},
    services::recommender::RecommenderApi,
};

/// Conversational movie search.
///
/// Keeps an append-only transcript for one session. Each submission sends the raw
/// query and the session id to the chat endpoint and appends whatever comes back;
/// failures become inline assistant messages.
#[derive(Debug, Clone)]
pub struct ConversationalSearch {
    session_id: String,
    messages: Vec<ChatMessage>,
}

impl Default for ConversationalSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationalSearch {
    pub fn new() -> Self {
        Self::with_session_id(Uuid::new_v4().to_string())
    }

    pub fn with_session_id(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            messages: Vec::new(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Sends `query` and appends the exchange to the transcript.
    ///
    /// Returns `false` without touching the API when the query is blank.
    pub async fn submit(&mut self, api: &dyn RecommenderApi, query: &str) -> bool {
        if query.trim().is_empty() {
            return false;
        }

        self.messages.push(ChatMessage::user(query));

        match api.chat(query, &self.session_id).await {
            Ok(ChatReply::Failed { error }) => {
                tracing::warn!(session_id = %self.session_id, error = %error, "Chat endpoint reported an error");
                self.messages
                    .push(ChatMessage::assistant(format!("⚠️ Error: {}", error)));
            }
            Ok(ChatReply::Answer {
                refined_query,
                results,
            }) => {
                tracing::info!(
                    session_id = %self.session_id,
                    results = results.len(),
                    "Chat search answered"
                );
                self.messages.push(ChatMessage::assistant(format!(
                    "🔍 Refined query: \"{}\"",
                    refined_query
                )));
                self.messages
                    .extend(results.into_iter().map(ChatMessage::recommendation));
            }
            Err(e) => {
                tracing::error!(session_id = %self.session_id, error = %e, "Chat request failed");
                self.messages
                    .push(ChatMessage::assistant(format!("⚠️ Network error: {}", e)));
            }
        }

        true
    }
}
