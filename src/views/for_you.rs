use serde::Serialize;

use super::{CardModel, MovieGrid, ViewState};
use crate::{error::AppError, services::recommender::RecommenderApi};

/// Personal recommendations built from the user's history
#[derive(Debug, Clone, Serialize)]
pub struct ForYouView {
    pub movies: ViewState<Vec<CardModel>>,
    /// Why the list is empty, when the API said so
    pub notice: Option<String>,
    #[serde(skip)]
    user_id: String,
}

impl ForYouView {
    pub const TOP_N: u32 = 10;

    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            movies: ViewState::Loading,
            notice: None,
            user_id: user_id.into(),
        }
    }

    pub async fn mount(&mut self, api: &dyn RecommenderApi) {
        self.movies = ViewState::Loading;
        self.notice = None;

        let movies = match api.recommend_for_user(&self.user_id, Self::TOP_N).await {
            Ok(movies) => movies,
            Err(AppError::NotFound(message)) => {
                self.notice = Some(message);
                Vec::new()
            }
            Err(e) => {
                tracing::error!(user_id = %self.user_id, error = %e, "Failed to load personal recommendations");
                Vec::new()
            }
        };

        self.movies = ViewState::Ready(MovieGrid::new(movies, Some(self.user_id.as_str())).render());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::Movie, services::recommender::MockRecommenderApi};

    #[tokio::test]
    async fn test_recommendations_rendered() {
        let mut api = MockRecommenderApi::new();
        api.expect_recommend_for_user()
            .withf(|user_id, top_n| user_id == "hjindal" && *top_n == 10)
            .times(1)
            .returning(|_, _| Ok(vec![Movie::new(155, "The Dark Knight")]));

        let mut view = ForYouView::new("hjindal");
        view.mount(&api).await;

        assert_eq!(view.movies.data().unwrap()[0].title, "The Dark Knight");
        assert_eq!(view.notice, None);
    }

    #[tokio::test]
    async fn test_no_history_sets_notice() {
        let mut api = MockRecommenderApi::new();
        api.expect_recommend_for_user().times(1).returning(|_, _| {
            Err(AppError::NotFound("No history found for this user.".to_string()))
        });

        let mut view = ForYouView::new("newcomer");
        view.mount(&api).await;

        assert_eq!(view.movies, ViewState::Ready(vec![]));
        assert_eq!(view.notice.as_deref(), Some("No history found for this user."));
    }
}
