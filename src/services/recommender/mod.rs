//! Recommendation API abstraction
//!
//! Every catalog read, recommendation and user action goes through this trait.
//! `HttpRecommender` talks to the real service; tests substitute a mock.

use crate::{
    error::AppResult,
    models::{
        CatalogQuery, ChatReply, FormFilters, HealthStatus, Movie, MovieId, PopularQuery,
        UserAction, UserProfile,
    },
};

pub mod http;

pub use http::HttpRecommender;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommenderApi: Send + Sync {
    /// `GET /health`
    async fn health(&self) -> AppResult<HealthStatus>;

    /// `GET /catalog?q&limit`
    async fn catalog(&self, query: &CatalogQuery) -> AppResult<Vec<Movie>>;

    /// `GET /genres`
    async fn genres(&self) -> AppResult<Vec<String>>;

    /// `GET /recommend/popular?top_n&genre&ai`
    async fn popular(&self, query: &PopularQuery) -> AppResult<Vec<Movie>>;

    /// `POST /recommend/by_form_v2`
    async fn by_form(&self, filters: &FormFilters) -> AppResult<Vec<Movie>>;

    /// `GET /recommend/similar/ai?movie_id&top_n`
    async fn similar_ai(&self, movie_id: MovieId, top_n: u32) -> AppResult<Vec<Movie>>;

    /// `GET /recommend/chat?query&session_id`
    ///
    /// An `error` body is returned as `ChatReply::Failed`, not as `Err`.
    async fn chat(&self, query: &str, session_id: &str) -> AppResult<ChatReply>;

    /// `GET /recommend/user/:user_id?top_n`
    ///
    /// Users without history yield `AppError::NotFound` carrying the API's message.
    async fn recommend_for_user(&self, user_id: &str, top_n: u32) -> AppResult<Vec<Movie>>;

    /// `GET /movie/:id`; `None` when the API reports the movie missing
    async fn movie(&self, movie_id: MovieId) -> AppResult<Option<Movie>>;

    /// `GET /movies/by_ids?ids`
    async fn movies_by_ids(&self, ids: &[MovieId]) -> AppResult<Vec<Movie>>;

    /// `GET /user/profile`
    async fn profile(&self, user_id: &str) -> AppResult<UserProfile>;

    /// `POST /user/:user_id/:action`
    async fn user_action(
        &self,
        user_id: &str,
        movie_id: MovieId,
        action: UserAction,
    ) -> AppResult<()>;
}
