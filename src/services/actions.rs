use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::{
    models::{MovieId, UserAction},
    services::recommender::RecommenderApi,
};

pub const MISSING_INFO_ALERT: &str = "Missing user or movie info. Please try again.";
pub const FAILURE_ALERT: &str = "Something went wrong!";

/// Surface for user-facing alerts
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Keeps alerts so they can be returned with a response
#[derive(Debug, Default)]
pub struct AlertLog {
    alerts: Mutex<Vec<String>>,
}

impl AlertLog {
    pub fn take(&self) -> Vec<String> {
        match self.alerts.lock() {
            Ok(mut alerts) => std::mem::take(&mut *alerts),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Notifier for AlertLog {
    fn alert(&self, message: &str) {
        tracing::debug!(alert = %message, "User alert");
        match self.alerts.lock() {
            Ok(mut alerts) => alerts.push(message.to_string()),
            Err(poisoned) => poisoned.into_inner().push(message.to_string()),
        }
    }
}

/// What happened to a card action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionOutcome {
    /// The API accepted the action
    Completed,
    /// No request was sent: user or movie id missing
    Rejected,
    /// The request failed or the API answered non-2xx
    Failed,
}

/// Posts card actions (like, dislike, watchlist, rate) to the API.
///
/// Every call raises exactly one alert and never returns an error; the outcome
/// tells the caller what happened.
#[derive(Clone)]
pub struct ActionHandler {
    api: Arc<dyn RecommenderApi>,
    notifier: Arc<dyn Notifier>,
}

impl ActionHandler {
    pub fn new(api: Arc<dyn RecommenderApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    pub async fn perform(
        &self,
        user_id: Option<&str>,
        movie_id: MovieId,
        action: UserAction,
    ) -> ActionOutcome {
        let user_id = match user_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) if movie_id > 0 => id,
            _ => {
                tracing::warn!(
                    ?user_id,
                    movie_id,
                    action = action.path_segment(),
                    "Missing user or movie id"
                );
                self.notifier.alert(MISSING_INFO_ALERT);
                return ActionOutcome::Rejected;
            }
        };

        match self.api.user_action(user_id, movie_id, action).await {
            Ok(()) => {
                self.notifier.alert(action.confirmation());
                ActionOutcome::Completed
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    user_id = %user_id,
                    movie_id,
                    action = action.path_segment(),
                    "Action failed"
                );
                self.notifier.alert(FAILURE_ALERT);
                ActionOutcome::Failed
            }
        }
    }

    /// Like [`perform`](Self::perform), running `on_action` once if the API accepted it
    pub async fn perform_then<F>(
        &self,
        user_id: Option<&str>,
        movie_id: MovieId,
        action: UserAction,
        on_action: F,
    ) -> ActionOutcome
    where
        F: FnOnce() + Send,
    {
        let outcome = self.perform(user_id, movie_id, action).await;
        if outcome == ActionOutcome::Completed {
            on_action();
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::AppError, services::recommender::MockRecommenderApi};

    fn handler(api: MockRecommenderApi, notifier: MockNotifier) -> ActionHandler {
        ActionHandler::new(Arc::new(api), Arc::new(notifier))
    }

    #[tokio::test]
    async fn test_success_runs_callback_once_and_alerts_once() {
        let mut api = MockRecommenderApi::new();
        api.expect_user_action()
            .withf(|user_id, movie_id, action| {
                user_id == "hjindal" && *movie_id == 603 && *action == UserAction::Like
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let mut notifier = MockNotifier::new();
        notifier
            .expect_alert()
            .withf(|message| message == "Movie liked!")
            .times(1)
            .return_const(());

        let mut calls = 0;
        let outcome = handler(api, notifier)
            .perform_then(Some("hjindal"), 603, UserAction::Like, || calls += 1)
            .await;

        assert_eq!(outcome, ActionOutcome::Completed);
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_failure_alerts_once_and_skips_callback() {
        let mut api = MockRecommenderApi::new();
        api.expect_user_action()
            .times(1)
            .returning(|_, _, _| Err(AppError::ExternalApi("Failed: 500 - boom".to_string())));

        let mut notifier = MockNotifier::new();
        notifier
            .expect_alert()
            .withf(|message| message == FAILURE_ALERT)
            .times(1)
            .return_const(());

        let mut calls = 0;
        let outcome = handler(api, notifier)
            .perform_then(Some("hjindal"), 603, UserAction::Rate(3), || calls += 1)
            .await;

        assert_eq!(outcome, ActionOutcome::Failed);
        assert_eq!(calls, 0);
    }

    #[tokio::test]
    async fn test_missing_user_sends_nothing() {
        let mut api = MockRecommenderApi::new();
        api.expect_user_action().never();

        let mut notifier = MockNotifier::new();
        notifier
            .expect_alert()
            .withf(|message| message == MISSING_INFO_ALERT)
            .times(2)
            .return_const(());

        let handler = handler(api, notifier);
        assert_eq!(
            handler.perform(None, 603, UserAction::Watchlist).await,
            ActionOutcome::Rejected
        );
        assert_eq!(
            handler.perform(Some(" "), 603, UserAction::Watchlist).await,
            ActionOutcome::Rejected
        );
    }

    #[tokio::test]
    async fn test_missing_movie_id_sends_nothing() {
        let mut api = MockRecommenderApi::new();
        api.expect_user_action().never();

        let mut notifier = MockNotifier::new();
        notifier.expect_alert().times(1).return_const(());

        let outcome = handler(api, notifier)
            .perform(Some("hjindal"), 0, UserAction::Dislike)
            .await;
        assert_eq!(outcome, ActionOutcome::Rejected);
    }

    #[test]
    fn test_alert_log_take_drains() {
        let log = AlertLog::default();
        log.alert("one");
        log.alert("two");
        assert_eq!(log.take(), vec!["one", "two"]);
        assert!(log.take().is_empty());
    }
}
