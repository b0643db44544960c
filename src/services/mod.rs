pub mod actions;
pub mod auth;
pub mod chat;
pub mod recommender;

pub use actions::{ActionHandler, ActionOutcome, AlertLog, Notifier};
pub use auth::AuthContext;
pub use chat::ConversationalSearch;
pub use recommender::{HttpRecommender, RecommenderApi};
