use serde::{Deserialize, Deserializer, Serialize};

use super::{lenient_f64, lenient_text, lenient_year};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One movie picked by the chat endpoint.
///
/// Records are written by a language model, so every field is optional and
/// loosely typed: numbers may arrive as strings and text may be missing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRecommendation {
    #[serde(default, deserialize_with = "text_or_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub vote_average: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub overview: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub explanation: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub poster_url: Option<String>,
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

/// Keeps every entry that reads as a recommendation and drops the rest
fn lenient_results<'de, D>(deserializer: D) -> Result<Vec<ChatRecommendation>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::Array(entries)) => entries,
        _ => Vec::new(),
    };
    Ok(raw
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(movie) => Some(movie),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable chat result");
                None
            }
        })
        .collect())
}

/// Message body: plain text or a recommended movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Movie(ChatRecommendation),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: MessageContent,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn recommendation(movie: ChatRecommendation) -> Self {
        Self {
            role: Role::Assistant,
            content: MessageContent::Movie(movie),
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.content {
            MessageContent::Text(text) => Some(text),
            MessageContent::Movie(_) => None,
        }
    }
}

/// Body of `GET /recommend/chat`; the API reports failures in an `error` field
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ChatReply {
    Failed {
        error: String,
    },
    Answer {
        #[serde(default, deserialize_with = "text_or_empty")]
        refined_query: String,
        #[serde(default, deserialize_with = "lenient_results")]
        results: Vec<ChatRecommendation>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_reply_error_field() {
        let reply: ChatReply =
            serde_json::from_str(r#"{"error": "rate limited"}"#).unwrap();
        assert_eq!(
            reply,
            ChatReply::Failed {
                error: "rate limited".to_string()
            }
        );
    }

    #[test]
    fn test_chat_reply_answer() {
        let reply: ChatReply = serde_json::from_str(
            r#"{
                "refined_query": "gothic vampire romance",
                "results": [
                    {"title": "Interview with the Vampire", "year": "1994", "vote_average": 7.0,
                     "overview": "A vampire tells his story.", "explanation": "Brooding vampires",
                     "poster_url": null}
                ]
            }"#,
        )
        .unwrap();

        match reply {
            ChatReply::Answer {
                refined_query,
                results,
            } => {
                assert_eq!(refined_query, "gothic vampire romance");
                assert_eq!(results.len(), 1);
                assert_eq!(results[0].year, Some(1994));
                assert_eq!(results[0].poster_url, None);
            }
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    #[test]
    fn test_loose_results_keep_the_answer() {
        let reply: ChatReply = serde_json::from_str(
            r#"{
                "refined_query": "vampires",
                "results": [
                    {"title": "Nosferatu", "year": 1922, "vote_average": "7.7"},
                    {"year": "1931", "vote_average": 7.1, "overview": "Count Dracula travels to London."},
                    "not a movie",
                    {"title": "Dracula", "vote_average": "n/a", "poster_url": null}
                ]
            }"#,
        )
        .unwrap();

        let ChatReply::Answer {
            refined_query,
            results,
        } = reply
        else {
            panic!("expected an answer");
        };
        assert_eq!(refined_query, "vampires");
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].vote_average, Some(7.7));
        assert_eq!(results[1].title, "");
        assert_eq!(results[1].year, Some(1931));
        assert_eq!(results[1].vote_average, Some(7.1));
        assert_eq!(results[2].title, "Dracula");
        assert_eq!(results[2].vote_average, None);
    }

    #[test]
    fn test_null_results_read_as_empty() {
        let reply: ChatReply =
            serde_json::from_str(r#"{"refined_query": "noir", "results": null}"#).unwrap();
        assert_eq!(
            reply,
            ChatReply::Answer {
                refined_query: "noir".to_string(),
                results: vec![],
            }
        );
    }

    #[test]
    fn test_message_serialization_shape() {
        let json = serde_json::to_value(ChatMessage::user("dark comedy")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "user", "content": "dark comedy"}));
    }
}
