use std::collections::HashSet;

use serde::Serialize;

use super::{or_empty, CardModel, MovieCard, ViewState};
use crate::{
    models::{Movie, MovieId},
    navigation::Route,
    services::recommender::RecommenderApi,
};

/// A similar movie with its collapsible explanation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedMovie {
    pub id: MovieId,
    pub title: String,
    pub poster_url: Option<String>,
    pub genres: Vec<String>,
    pub link: String,
    /// Present only while the explanation is expanded
    pub explanation: Option<String>,
    /// Toggle caption; absent when the API gave no explanation
    pub toggle_label: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailsModel {
    pub movie: Option<CardModel>,
    pub related: Vec<RelatedMovie>,
}

#[derive(Debug, Clone, Default)]
struct Loaded {
    movie: Option<Movie>,
    related: Vec<Movie>,
}

/// One movie and the movies the API finds similar to it
#[derive(Debug, Clone)]
pub struct MovieDetailsView {
    movie_id: MovieId,
    user_id: Option<String>,
    state: ViewState<Loaded>,
    expanded: HashSet<MovieId>,
}

impl MovieDetailsView {
    pub const RELATED_COUNT: u32 = 5;

    pub fn new(movie_id: MovieId, user_id: Option<String>) -> Self {
        Self {
            movie_id,
            user_id,
            state: ViewState::Loading,
            expanded: HashSet::new(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub async fn mount(&mut self, api: &dyn RecommenderApi) {
        self.state = ViewState::Loading;

        let movie = match api.movie(self.movie_id).await {
            Ok(movie) => movie,
            Err(e) => {
                tracing::error!(movie_id = self.movie_id, error = %e, "Failed to load movie");
                None
            }
        };

        let related = if movie.is_some() {
            or_empty(
                "movie_details",
                api.similar_ai(self.movie_id, Self::RELATED_COUNT).await,
            )
        } else {
            Vec::new()
        };

        self.state = ViewState::Ready(Loaded { movie, related });
    }

    /// Flips the explanation of one related movie
    pub fn toggle_explanation(&mut self, related_id: MovieId) {
        if !self.expanded.remove(&related_id) {
            self.expanded.insert(related_id);
        }
    }

    /// `None` while loading
    pub fn render(&self) -> Option<DetailsModel> {
        let loaded = self.state.data()?;

        let movie = loaded
            .movie
            .clone()
            .map(|m| MovieCard::new(m, self.user_id.clone()).render());

        let related = loaded
            .related
            .iter()
            .map(|rel| {
                let expanded = self.expanded.contains(&rel.id);
                let toggle_label = rel.similarity_explanation.as_ref().map(|_| {
                    if expanded {
                        "Hide explanation"
                    } else {
                        "Why similar?"
                    }
                });

                RelatedMovie {
                    id: rel.id,
                    title: rel.title.clone(),
                    poster_url: rel.poster_url.clone(),
                    genres: rel.genre_names(),
                    link: Route::Movie(rel.id).path(),
                    explanation: rel
                        .similarity_explanation
                        .clone()
                        .filter(|_| expanded),
                    toggle_label,
                }
            })
            .collect();

        Some(DetailsModel { movie, related })
    }
}
