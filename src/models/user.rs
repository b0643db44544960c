use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::MovieId;
use crate::error::{AppError, AppResult};

/// The signed-in user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Identifier used in `/user/:id/...` paths
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    /// Creates a user from a display name; the id is derived from the name
    pub fn new(name: &str, email: Option<String>) -> AppResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput("User name cannot be empty".to_string()));
        }

        let id = name
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-");

        Ok(Self {
            id,
            name: name.to_string(),
            email: email.filter(|e| !e.trim().is_empty()),
        })
    }

    /// First letter of the name, shown as the avatar
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next()
    }
}

/// Movie id sets the API keeps for a user
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    #[serde(default)]
    pub watchlist: Vec<MovieId>,
    #[serde(default)]
    pub likes: Vec<MovieId>,
    #[serde(default)]
    pub dislikes: Vec<MovieId>,
    #[serde(default)]
    pub watched: Vec<MovieId>,
    /// Keyed by movie id; JSON object keys arrive as strings
    #[serde(default)]
    pub ratings: HashMap<String, f64>,
}

impl UserProfile {
    pub fn rating_for(&self, movie_id: MovieId) -> Option<f64> {
        self.ratings.get(&movie_id.to_string()).copied()
    }
}

/// Something a user can do to a movie from its card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Like,
    Dislike,
    Watchlist,
    Watch,
    /// Star rating, 1 to 5
    Rate(u8),
}

impl UserAction {
    /// Parses an action name as used in `/user/:id/:action`
    pub fn parse(name: &str, rating: Option<u8>) -> AppResult<Self> {
        match (name, rating) {
            ("like", _) => Ok(UserAction::Like),
            ("dislike", _) => Ok(UserAction::Dislike),
            ("watchlist", _) => Ok(UserAction::Watchlist),
            ("watch", _) => Ok(UserAction::Watch),
            ("rate", Some(stars)) => Self::rate(stars),
            ("rate", None) => Err(AppError::InvalidInput(
                "Rating is required for the rate action".to_string(),
            )),
            (other, _) => Err(AppError::InvalidInput(format!("Unknown action: {}", other))),
        }
    }

    pub fn rate(stars: u8) -> AppResult<Self> {
        if (1..=5).contains(&stars) {
            Ok(UserAction::Rate(stars))
        } else {
            Err(AppError::InvalidInput(format!(
                "Rating must be between 1 and 5, got {}",
                stars
            )))
        }
    }

    /// Final path segment of the action endpoint
    pub fn path_segment(&self) -> &'static str {
        match self {
            UserAction::Like => "like",
            UserAction::Dislike => "dislike",
            UserAction::Watchlist => "watchlist",
            UserAction::Watch => "watch",
            UserAction::Rate(_) => "rate",
        }
    }

    /// JSON body posted to the action endpoint
    pub fn body(&self, movie_id: MovieId) -> serde_json::Value {
        match self {
            UserAction::Rate(stars) => serde_json::json!({ "movie_id": movie_id, "rating": stars }),
            _ => serde_json::json!({ "movie_id": movie_id }),
        }
    }

    /// Message shown once the API accepted the action
    pub fn confirmation(&self) -> &'static str {
        match self {
            UserAction::Like => "Movie liked!",
            UserAction::Dislike => "Movie disliked!",
            UserAction::Watchlist => "Movie added to watchlist!",
            UserAction::Watch => "Movie marked as watched!",
            UserAction::Rate(_) => "Movie rated!",
        }
    }
}
