//! HTTP client for the recommendation API
//!
//! Each call is a single request: no caching, no retry, no de-duplication.
//! Non-2xx statuses become `AppError::ExternalApi` with the status and body text.

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{
        CatalogQuery, ChatReply, FormFilters, HealthStatus, Movie, MovieId, PopularQuery,
        UserAction, UserProfile,
    },
    services::recommender::RecommenderApi,
};
use reqwest::{Client as HttpClient, Response};
use serde::{de::DeserializeOwned, Deserialize};
use std::time::Duration;

#[derive(Clone)]
pub struct HttpRecommender {
    http_client: HttpClient,
    base_url: String,
}

/// Bodies that are either the payload or `{"error": "..."}`
#[derive(Deserialize)]
#[serde(untagged)]
enum OrError<T> {
    Error { error: String },
    Payload(T),
}

impl HttpRecommender {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.api_base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn ensure_success(response: Response) -> AppResult<Response> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Failed: {} - {}",
                status, body
            )));
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let response = self
            .http_client
            .get(self.url(path))
            .query(query)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl RecommenderApi for HttpRecommender {
    async fn health(&self) -> AppResult<HealthStatus> {
        self.get_json("/health", &[]).await
    }

    async fn catalog(&self, query: &CatalogQuery) -> AppResult<Vec<Movie>> {
        let mut params = vec![
            ("limit", query.limit.to_string()),
            // the service pages on `size`
            ("size", query.limit.to_string()),
        ];
        if let Some(q) = query.q.as_deref().filter(|q| !q.is_empty()) {
            params.push(("q", q.to_string()));
        }

        let movies: Vec<Movie> = self.get_json("/catalog", &params).await?;
        tracing::debug!(count = movies.len(), "Fetched catalog page");
        Ok(movies)
    }

    async fn genres(&self) -> AppResult<Vec<String>> {
        self.get_json("/genres", &[]).await
    }

    async fn popular(&self, query: &PopularQuery) -> AppResult<Vec<Movie>> {
        self.get_json(
            "/recommend/popular",
            &[
                ("top_n", query.top_n.to_string()),
                ("genre", query.genre.clone()),
                ("ai", query.ai.to_string()),
            ],
        )
        .await
    }

    async fn by_form(&self, filters: &FormFilters) -> AppResult<Vec<Movie>> {
        let response = self
            .http_client
            .post(self.url("/recommend/by_form_v2"))
            .json(filters)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        Ok(response.json().await?)
    }

    async fn similar_ai(&self, movie_id: MovieId, top_n: u32) -> AppResult<Vec<Movie>> {
        self.get_json(
            "/recommend/similar/ai",
            &[
                ("movie_id", movie_id.to_string()),
                ("top_n", top_n.to_string()),
            ],
        )
        .await
    }

    async fn chat(&self, query: &str, session_id: &str) -> AppResult<ChatReply> {
        self.get_json(
            "/recommend/chat",
            &[
                ("query", query.to_string()),
                ("session_id", session_id.to_string()),
            ],
        )
        .await
    }

    async fn recommend_for_user(&self, user_id: &str, top_n: u32) -> AppResult<Vec<Movie>> {
        let body: OrError<Vec<Movie>> = self
            .get_json(
                &format!("/recommend/user/{}", user_id),
                &[("top_n", top_n.to_string())],
            )
            .await?;

        match body {
            OrError::Payload(movies) => Ok(movies),
            OrError::Error { error } => Err(AppError::NotFound(error)),
        }
    }

    async fn movie(&self, movie_id: MovieId) -> AppResult<Option<Movie>> {
        let body: OrError<Movie> = self
            .get_json(&format!("/movie/{}", movie_id), &[])
            .await?;

        match body {
            OrError::Payload(movie) => Ok(Some(movie)),
            OrError::Error { error } => {
                tracing::info!(movie_id, error = %error, "Movie not available");
                Ok(None)
            }
        }
    }

    async fn movies_by_ids(&self, ids: &[MovieId]) -> AppResult<Vec<Movie>> {
        let joined = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");

        self.get_json("/movies/by_ids", &[("ids", joined)]).await
    }

    async fn profile(&self, user_id: &str) -> AppResult<UserProfile> {
        self.get_json("/user/profile", &[("user_id", user_id.to_string())])
            .await
    }

    async fn user_action(
        &self,
        user_id: &str,
        movie_id: MovieId,
        action: UserAction,
    ) -> AppResult<()> {
        let url = self.url(&format!("/user/{}/{}", user_id, action.path_segment()));

        let response = self
            .http_client
            .post(&url)
            .json(&action.body(movie_id))
            .send()
            .await?;

        Self::ensure_success(response).await?;

        tracing::info!(
            user_id = %user_id,
            movie_id,
            action = action.path_segment(),
            "Recorded user action"
        );

        Ok(())
    }
}
