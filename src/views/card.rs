use serde::Serialize;

use crate::{
    models::{Movie, MovieId, UserAction},
    navigation::Route,
    services::actions::{ActionHandler, ActionOutcome},
};

/// Rendered movie card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardModel {
    pub id: MovieId,
    pub title: String,
    pub poster_url: Option<String>,
    pub genres: Vec<String>,
    pub genre_label: String,
    pub vote_average: Option<f64>,
    pub year: Option<i32>,
    pub overview: String,
    pub link: String,
    /// Stars the user picked on this card, 0 when none
    pub user_rating: u8,
}

/// A movie plus the actions a user can take on it
#[derive(Debug, Clone)]
pub struct MovieCard {
    movie: Movie,
    user_id: Option<String>,
    rating: u8,
}

impl MovieCard {
    pub fn new(movie: Movie, user_id: Option<String>) -> Self {
        Self {
            movie,
            user_id,
            rating: 0,
        }
    }

    pub fn movie(&self) -> &Movie {
        &self.movie
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    /// Genres joined with ` | `, or `N/A`
    pub fn genre_label(&self) -> String {
        let names = self.movie.genre_names();
        if names.is_empty() {
            "N/A".to_string()
        } else {
            names.join(" | ")
        }
    }

    pub fn render(&self) -> CardModel {
        CardModel {
            id: self.movie.id,
            title: self.movie.title.clone(),
            poster_url: self.movie.poster_url.clone(),
            genres: self.movie.genre_names(),
            genre_label: self.genre_label(),
            vote_average: self.movie.vote_average,
            year: self.movie.year,
            overview: self
                .movie
                .overview
                .clone()
                .filter(|o| !o.trim().is_empty())
                .unwrap_or_else(|| "No description available".to_string()),
            link: Route::Movie(self.movie.id).path(),
            user_rating: self.rating,
        }
    }

    pub async fn act(&self, handler: &ActionHandler, action: UserAction) -> ActionOutcome {
        handler
            .perform(self.user_id.as_deref(), self.movie.id, action)
            .await
    }

    pub async fn act_then<F>(
        &self,
        handler: &ActionHandler,
        action: UserAction,
        on_action: F,
    ) -> ActionOutcome
    where
        F: FnOnce() + Send,
    {
        handler
            .perform_then(self.user_id.as_deref(), self.movie.id, action, on_action)
            .await
    }

    /// Sets the star rating, then reports it. The rating stays even if the API
    /// rejects it.
    pub async fn rate(&mut self, handler: &ActionHandler, stars: u8) -> ActionOutcome {
        let stars = stars.clamp(1, 5);
        self.rating = stars;
        self.act(handler, UserAction::Rate(stars)).await
    }
}

/// Cards for a list of movies, all acting as the same user
#[derive(Debug, Clone, Default)]
pub struct MovieGrid {
    cards: Vec<MovieCard>,
}

impl MovieGrid {
    pub fn new(movies: Vec<Movie>, user_id: Option<&str>) -> Self {
        let cards = movies
            .into_iter()
            .map(|movie| MovieCard::new(movie, user_id.map(str::to_string)))
            .collect();
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card_mut(&mut self, movie_id: MovieId) -> Option<&mut MovieCard> {
        self.cards.iter_mut().find(|card| card.movie.id == movie_id)
    }

    pub fn render(&self) -> Vec<CardModel> {
        self.cards.iter().map(MovieCard::render).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::AppError,
        models::Genres,
        services::{
            actions::{AlertLog, FAILURE_ALERT},
            recommender::MockRecommenderApi,
        },
    };
    use std::sync::Arc;

    fn matrix() -> Movie {
        let mut movie = Movie::new(603, "The Matrix");
        movie.genres = Genres::parse(r#"[{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}]"#);
        movie.vote_average = Some(7.9);
        movie.year = Some(1999);
        movie
    }

    #[test]
    fn test_render_joins_genres() {
        let card = MovieCard::new(matrix(), Some("hjindal".to_string())).render();
        assert_eq!(card.genre_label, "Action | Science Fiction");
        assert_eq!(card.link, "/movie/603");
        assert_eq!(card.overview, "No description available");
        assert_eq!(card.user_rating, 0);
    }

    #[test]
    fn test_unparseable_genres_render_as_na() {
        let mut movie = matrix();
        movie.genres = Genres::parse("{broken");
        let card = MovieCard::new(movie, None);
        assert_eq!(card.genre_label(), "N/A");
        assert!(card.render().genres.is_empty());
    }

    #[tokio::test]
    async fn test_rating_kept_when_api_rejects() {
        let mut api = MockRecommenderApi::new();
        api.expect_user_action()
            .times(1)
            .returning(|_, _, _| Err(AppError::ExternalApi("Failed: 503".to_string())));
        let alerts = Arc::new(AlertLog::default());
        let handler = ActionHandler::new(Arc::new(api), alerts.clone());

        let mut card = MovieCard::new(matrix(), Some("hjindal".to_string()));
        let outcome = card.rate(&handler, 4).await;

        assert_eq!(outcome, ActionOutcome::Failed);
        assert_eq!(card.rating(), 4);
        assert_eq!(alerts.take(), vec![FAILURE_ALERT]);
    }

    #[tokio::test]
    async fn test_grid_cards_share_user() {
        let mut api = MockRecommenderApi::new();
        api.expect_user_action()
            .withf(|user_id, movie_id, action| {
                user_id == "hjindal" && *movie_id == 13 && *action == UserAction::Watchlist
            })
            .times(1)
            .returning(|_, _, _| Ok(()));
        let alerts = Arc::new(AlertLog::default());
        let handler = ActionHandler::new(Arc::new(api), alerts.clone());

        let mut grid = MovieGrid::new(
            vec![matrix(), Movie::new(13, "Forrest Gump")],
            Some("hjindal"),
        );
        assert_eq!(grid.len(), 2);

        let mut refreshed = false;
        let outcome = grid
            .card_mut(13)
            .unwrap()
            .act_then(&handler, UserAction::Watchlist, || refreshed = true)
            .await;

        assert_eq!(outcome, ActionOutcome::Completed);
        assert!(refreshed);
        assert_eq!(alerts.take(), vec!["Movie added to watchlist!"]);
    }
}
