use serde::Serialize;

use super::{or_empty, ViewState, POSTER_PLACEHOLDER};
use crate::{
    models::{CatalogQuery, Movie, MovieId},
    navigation::Route,
    services::recommender::RecommenderApi,
};

/// Catalog tile on the home view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub id: MovieId,
    pub title: String,
    pub poster_url: String,
    pub genres: Vec<String>,
    pub link: String,
}

impl From<Movie> for CatalogEntry {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id,
            genres: movie.genre_names(),
            link: Route::Movie(movie.id).path(),
            poster_url: movie
                .poster_url
                .unwrap_or_else(|| POSTER_PLACEHOLDER.to_string()),
            title: movie.title,
        }
    }
}

/// Home view: the first page of the catalog
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView {
    pub query: Option<String>,
    pub movies: ViewState<Vec<CatalogEntry>>,
}

impl CatalogView {
    pub const PAGE_SIZE: u32 = 20;

    pub fn new(query: Option<String>) -> Self {
        Self {
            query: query.filter(|q| !q.trim().is_empty()),
            movies: ViewState::Loading,
        }
    }

    pub async fn mount(&mut self, api: &dyn RecommenderApi) {
        self.movies = ViewState::Loading;

        let query = CatalogQuery {
            q: self.query.clone(),
            limit: Self::PAGE_SIZE,
        };
        let movies = or_empty("catalog", api.catalog(&query).await);

        self.movies = ViewState::Ready(movies.into_iter().map(CatalogEntry::from).collect());
    }
}
