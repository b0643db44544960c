use serde::Serialize;

use super::{or_empty, CardModel, MovieCard, ViewState};
use crate::{
    models::{Movie, PopularQuery},
    services::recommender::RecommenderApi,
};

/// Popular movie with the optional "why popular" note
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopularEntry {
    #[serde(flatten)]
    pub card: CardModel,
    pub popularity_score: Option<f64>,
    pub why_popular: Option<String>,
}

/// Most popular movies in one genre
#[derive(Debug, Clone, Serialize)]
pub struct PopularView {
    pub genre: String,
    pub ai_enabled: bool,
    pub genres: Vec<String>,
    pub movies: ViewState<Vec<PopularEntry>>,
    #[serde(skip)]
    user_id: Option<String>,
}

impl PopularView {
    pub const TOP_N: u32 = 10;
    pub const DEFAULT_GENRE: &'static str = "Action";

    pub fn new(genre: Option<String>, ai_enabled: bool, user_id: Option<String>) -> Self {
        Self {
            genre: genre.unwrap_or_else(|| Self::DEFAULT_GENRE.to_string()),
            ai_enabled,
            genres: Vec::new(),
            movies: ViewState::Loading,
            user_id,
        }
    }

    /// Loads the genre options and the movies for the current filters
    pub async fn mount(&mut self, api: &dyn RecommenderApi) {
        self.genres = or_empty("popular", api.genres().await);
        self.refresh(api).await;
    }

    pub async fn set_genre(&mut self, api: &dyn RecommenderApi, genre: impl Into<String>) {
        self.genre = genre.into();
        self.refresh(api).await;
    }

    pub async fn set_ai_enabled(&mut self, api: &dyn RecommenderApi, enabled: bool) {
        self.ai_enabled = enabled;
        self.refresh(api).await;
    }

    /// Refetches the movies. An empty genre keeps the current list and sends nothing.
    async fn refresh(&mut self, api: &dyn RecommenderApi) {
        if self.genre.trim().is_empty() {
            if self.movies.is_loading() {
                self.movies = ViewState::Ready(Vec::new());
            }
            return;
        }

        self.movies = ViewState::Loading;
        let query = PopularQuery {
            top_n: Self::TOP_N,
            genre: self.genre.clone(),
            ai: self.ai_enabled,
        };
        let movies = or_empty("popular", api.popular(&query).await);

        self.movies = ViewState::Ready(movies.into_iter().map(|m| self.entry(m)).collect());
    }

    fn entry(&self, movie: Movie) -> PopularEntry {
        let why_popular = if self.ai_enabled {
            movie.ai_explanation.clone()
        } else {
            None
        };
        let popularity_score = movie.popularity_score;

        PopularEntry {
            card: MovieCard::new(movie, self.user_id.clone()).render(),
            popularity_score,
            why_popular,
        }
    }
}
