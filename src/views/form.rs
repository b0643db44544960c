use std::collections::BTreeSet;

use serde::Serialize;

use super::{or_empty, CardModel, MovieGrid};
use crate::{
    models::{CatalogQuery, FormFilters},
    services::recommender::RecommenderApi,
};

/// Filter form and its results
#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    pub filters: FormFilters,
    pub genre_options: Vec<String>,
    pub results: Vec<CardModel>,
    #[serde(skip)]
    user_id: Option<String>,
}

impl FormView {
    /// Movies sampled to build the genre dropdown
    pub const GENRE_SAMPLE_SIZE: u32 = 20;

    pub fn new(filters: FormFilters, user_id: Option<String>) -> Self {
        Self {
            filters,
            genre_options: Vec::new(),
            results: Vec::new(),
            user_id,
        }
    }

    /// Builds the genre options from a catalog sample
    pub async fn mount(&mut self, api: &dyn RecommenderApi) {
        let sample = or_empty(
            "form",
            api.catalog(&CatalogQuery::first(Self::GENRE_SAMPLE_SIZE))
                .await,
        );

        let genres: BTreeSet<String> = sample
            .iter()
            .flat_map(|movie| movie.genre_names())
            .collect();
        self.genre_options = genres.into_iter().collect();
    }

    /// Posts the current filters and replaces the results
    pub async fn submit(&mut self, api: &dyn RecommenderApi) {
        let movies = or_empty("form", api.by_form(&self.filters).await);
        tracing::info!(
            genre = %self.filters.genre,
            results = movies.len(),
            "Form recommendation finished"
        );
        self.results = MovieGrid::new(movies, self.user_id.as_deref()).render();
    }
}
