//! Views: each one fetches its own data when mounted and renders to a
//! serializable model. Nothing is shared or cached between views.

use serde::Serialize;

use crate::error::AppResult;

pub mod card;
pub mod catalog;
pub mod collections;
pub mod details;
pub mod for_you;
pub mod form;
pub mod popular;

pub use card::{CardModel, MovieCard, MovieGrid};
pub use catalog::CatalogView;
pub use collections::{Collection, CollectionView};
pub use details::MovieDetailsView;
pub use for_you::ForYouView;
pub use form::FormView;
pub use popular::PopularView;

/// Shown when a movie has no poster
pub const POSTER_PLACEHOLDER: &str = "https://via.placeholder.com/300x450?text=No+Image";

/// Loading state of a view's data
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum ViewState<T> {
    Loading,
    Ready(T),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ViewState::Loading => None,
            ViewState::Ready(data) => Some(data),
        }
    }
}

/// Unwraps a fetch result, logging the failure and falling back to the empty value
pub(crate) fn or_empty<T: Default>(view: &'static str, result: AppResult<T>) -> T {
    result.unwrap_or_else(|e| {
        tracing::error!(view, error = %e, "Fetch failed, rendering empty state");
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_or_empty_swallows_errors() {
        let movies: Vec<u32> = or_empty("test", Err(AppError::Internal("boom".to_string())));
        assert!(movies.is_empty());
        assert_eq!(or_empty("test", Ok(vec![1, 2])), vec![1, 2]);
    }

    #[test]
    fn test_view_state_serialization() {
        let loading: ViewState<Vec<u32>> = ViewState::Loading;
        assert_eq!(
            serde_json::to_value(&loading).unwrap(),
            serde_json::json!({"status": "loading"})
        );
        assert_eq!(
            serde_json::to_value(ViewState::Ready(vec![1])).unwrap(),
            serde_json::json!({"status": "ready", "data": [1]})
        );
    }
}
