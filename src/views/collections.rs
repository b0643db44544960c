use serde::Serialize;

use super::{CardModel, MovieGrid, ViewState};
use crate::{
    error::AppResult,
    models::{Movie, MovieId, UserProfile},
    services::recommender::RecommenderApi,
};

/// User-curated movie lists kept by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Watchlist,
    Liked,
    Disliked,
}

impl Collection {
    pub fn ids<'a>(&self, profile: &'a UserProfile) -> &'a [MovieId] {
        match self {
            Collection::Watchlist => &profile.watchlist,
            Collection::Liked => &profile.likes,
            Collection::Disliked => &profile.dislikes,
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            Collection::Watchlist => "Your Watchlist",
            Collection::Liked => "Your Liked Movies",
            Collection::Disliked => "Your Disliked Movies",
        }
    }

    pub fn empty_message(&self) -> &'static str {
        match self {
            Collection::Watchlist => "Your watchlist is empty.",
            Collection::Liked => "You haven't liked any movies yet.",
            Collection::Disliked => "You haven't disliked any movies yet.",
        }
    }
}

/// Watchlist, liked or disliked movies of the signed-in user
#[derive(Debug, Clone, Serialize)]
pub struct CollectionView {
    pub collection: Collection,
    pub heading: &'static str,
    pub empty_message: &'static str,
    pub movies: ViewState<Vec<CardModel>>,
    #[serde(skip)]
    user_id: String,
}

impl CollectionView {
    pub fn new(collection: Collection, user_id: impl Into<String>) -> Self {
        Self {
            collection,
            heading: collection.heading(),
            empty_message: collection.empty_message(),
            movies: ViewState::Loading,
            user_id: user_id.into(),
        }
    }

    /// Reads the profile, then the movies behind the selected ids
    pub async fn mount(&mut self, api: &dyn RecommenderApi) {
        self.movies = ViewState::Loading;

        let movies = match self.fetch(api).await {
            Ok(movies) => movies,
            Err(e) => {
                tracing::error!(
                    collection = ?self.collection,
                    user_id = %self.user_id,
                    error = %e,
                    "Error fetching collection movies"
                );
                Vec::new()
            }
        };

        self.movies = ViewState::Ready(MovieGrid::new(movies, Some(self.user_id.as_str())).render());
    }

    async fn fetch(&self, api: &dyn RecommenderApi) -> AppResult<Vec<Movie>> {
        let profile = api.profile(&self.user_id).await?;
        let ids = self.collection.ids(&profile);
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        api.movies_by_ids(ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::AppError, services::recommender::MockRecommenderApi};

    fn profile() -> UserProfile {
        UserProfile {
            watchlist: vec![],
            likes: vec![13, 603],
            dislikes: vec![550],
            ..UserProfile::default()
        }
    }

    #[tokio::test]
    async fn test_liked_fetches_liked_ids() {
        let mut api = MockRecommenderApi::new();
        api.expect_profile()
            .withf(|user_id| user_id == "hjindal")
            .times(1)
            .returning(|_| Ok(profile()));
        api.expect_movies_by_ids()
            .withf(|ids| ids == [13, 603])
            .times(1)
            .returning(|ids| Ok(ids.iter().map(|id| Movie::new(*id, "Liked")).collect()));

        let mut view = CollectionView::new(Collection::Liked, "hjindal");
        view.mount(&api).await;

        let movies = view.movies.data().unwrap();
        assert_eq!(movies.iter().map(|m| m.id).collect::<Vec<_>>(), vec![13, 603]);
    }

    #[tokio::test]
    async fn test_empty_collection_skips_second_request() {
        let mut api = MockRecommenderApi::new();
        api.expect_profile().times(1).returning(|_| Ok(profile()));
        api.expect_movies_by_ids().never();

        let mut view = CollectionView::new(Collection::Watchlist, "hjindal");
        view.mount(&api).await;

        assert_eq!(view.movies, ViewState::Ready(vec![]));
        assert_eq!(view.empty_message, "Your watchlist is empty.");
    }

    #[tokio::test]
    async fn test_profile_failure_renders_empty() {
        let mut api = MockRecommenderApi::new();
        api.expect_profile()
            .times(1)
            .returning(|_| Err(AppError::ExternalApi("Failed: 500".to_string())));
        api.expect_movies_by_ids().never();

        let mut view = CollectionView::new(Collection::Disliked, "hjindal");
        view.mount(&api).await;
        assert_eq!(view.movies, ViewState::Ready(vec![]));
    }
}
