use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::{ChatMessage, FormFilters, MovieId, User, UserAction},
    services::{ActionHandler, ActionOutcome, AlertLog},
    views::{
        details::DetailsModel, CardModel, CatalogView, Collection, CollectionView, ForYouView,
        FormView, MovieCard, MovieDetailsView, PopularView,
    },
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub user: Option<User>,
    pub initial: Option<char>,
}

impl From<Option<User>> for SessionResponse {
    fn from(user: Option<User>) -> Self {
        Self {
            authenticated: user.is_some(),
            initial: user.as_ref().and_then(User::initial),
            user,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CatalogParams {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PopularParams {
    pub genre: Option<String>,
    #[serde(default)]
    pub ai: bool,
}

#[derive(Debug, Deserialize)]
pub struct DetailsParams {
    /// Comma-separated ids of related movies whose explanation is expanded
    pub explain: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Absent until a non-blank query starts a session
    pub session_id: Option<String>,
    pub submitted: bool,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ActionParams {
    pub rating: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub outcome: ActionOutcome,
    pub alerts: Vec<String>,
    /// Whether views showing this movie should be reloaded
    pub refresh: bool,
    /// The movie's card after the action, when the movie could be loaded
    pub card: Option<CardModel>,
}

async fn signed_in(state: &AppState) -> AppResult<User> {
    state
        .auth
        .current_user()
        .await
        .ok_or_else(|| AppError::Unauthorized("Sign in first".to_string()))
}

// Handlers

/// Health check; also reports whether the recommendation API answers
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let api = match state.api.health().await {
        Ok(health) => json!(health),
        Err(e) => {
            tracing::warn!(error = %e, "Recommendation API health check failed");
            Value::Null
        }
    };

    Json(json!({ "status": "ok", "api": api }))
}

/// Current sign-in state
pub async fn session(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(SessionResponse::from(state.auth.current_user().await))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<SessionResponse>> {
    let user = state.auth.login(&request.name, request.email).await?;
    Ok(Json(SessionResponse::from(Some(user))))
}

/// Signs out and drops every chat session
pub async fn logout(State(state): State<AppState>) -> StatusCode {
    state.auth.logout().await;
    state.clear_chats().await;
    StatusCode::NO_CONTENT
}

/// Home view: first page of the catalog
pub async fn home(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> Json<CatalogView> {
    let mut view = CatalogView::new(params.q);
    view.mount(state.api.as_ref()).await;
    Json(view)
}

pub async fn popular(
    State(state): State<AppState>,
    Query(params): Query<PopularParams>,
) -> AppResult<Json<PopularView>> {
    let user = signed_in(&state).await?;
    let mut view = PopularView::new(params.genre, params.ai, Some(user.id));
    view.mount(state.api.as_ref()).await;
    Ok(Json(view))
}

/// Empty filter form with genre options
pub async fn form(State(state): State<AppState>) -> AppResult<Json<FormView>> {
    let user = signed_in(&state).await?;
    let mut view = FormView::new(FormFilters::default(), Some(user.id));
    view.mount(state.api.as_ref()).await;
    Ok(Json(view))
}

pub async fn submit_form(
    State(state): State<AppState>,
    Json(filters): Json<FormFilters>,
) -> AppResult<Json<FormView>> {
    let user = signed_in(&state).await?;
    let mut view = FormView::new(filters, Some(user.id));
    view.mount(state.api.as_ref()).await;
    view.submit(state.api.as_ref()).await;
    Ok(Json(view))
}

pub async fn movie_details(
    State(state): State<AppState>,
    Path(movie_id): Path<MovieId>,
    Query(params): Query<DetailsParams>,
) -> AppResult<Json<DetailsModel>> {
    let user = signed_in(&state).await?;
    let mut view = MovieDetailsView::new(movie_id, Some(user.id));
    view.mount(state.api.as_ref()).await;

    let expanded = params
        .explain
        .iter()
        .flat_map(|ids| ids.split(','))
        .filter_map(|id| id.trim().parse::<MovieId>().ok());
    for related_id in expanded {
        view.toggle_explanation(related_id);
    }

    match view.render() {
        Some(model) if model.movie.is_some() => Ok(Json(model)),
        _ => Err(AppError::NotFound(format!("Movie {} not found", movie_id))),
    }
}

async fn collection(state: &AppState, collection: Collection) -> AppResult<Json<CollectionView>> {
    let user = signed_in(state).await?;
    let mut view = CollectionView::new(collection, user.id);
    view.mount(state.api.as_ref()).await;
    Ok(Json(view))
}

pub async fn watchlist(State(state): State<AppState>) -> AppResult<Json<CollectionView>> {
    collection(&state, Collection::Watchlist).await
}

pub async fn liked(State(state): State<AppState>) -> AppResult<Json<CollectionView>> {
    collection(&state, Collection::Liked).await
}

pub async fn disliked(State(state): State<AppState>) -> AppResult<Json<CollectionView>> {
    collection(&state, Collection::Disliked).await
}

/// Personal recommendations
pub async fn for_you(State(state): State<AppState>) -> AppResult<Json<ForYouView>> {
    let user = signed_in(&state).await?;
    let mut view = ForYouView::new(user.id);
    view.mount(state.api.as_ref()).await;
    Ok(Json(view))
}

/// Sends a chat query.
///
/// A session starts with the first non-blank query sent without a session id.
/// Blank queries never start one, and ids the server did not hand out are
/// rejected.
pub async fn submit_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let existing = match request.session_id.filter(|id| !id.trim().is_empty()) {
        Some(id) => Some(state.find_chat(&id).await.ok_or_else(|| {
            AppError::NotFound(format!("Chat session {} not found", id))
        })?),
        None => None,
    };

    let session = match existing {
        Some(session) => session,
        None if request.query.trim().is_empty() => {
            return Ok(Json(ChatResponse {
                session_id: None,
                submitted: false,
                messages: Vec::new(),
            }));
        }
        None => state.start_chat().await,
    };

    let mut search = session.lock().await;
    let submitted = search.submit(state.api.as_ref(), &request.query).await;

    Ok(Json(ChatResponse {
        session_id: Some(search.session_id().to_string()),
        submitted,
        messages: search.messages().to_vec(),
    }))
}

pub async fn chat_transcript(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> AppResult<Json<ChatResponse>> {
    let session = state
        .find_chat(&session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Chat session {} not found", session_id)))?;

    let search = session.lock().await;
    Ok(Json(ChatResponse {
        session_id: Some(session_id),
        submitted: false,
        messages: search.messages().to_vec(),
    }))
}

/// Card action (like, dislike, watchlist, watch, rate) on one movie.
///
/// The action goes through the movie's card when the movie can be loaded, so the
/// returned card shows the rating the user picked even if the API rejected it.
pub async fn movie_action(
    State(state): State<AppState>,
    Path((movie_id, action)): Path<(MovieId, String)>,
    Query(params): Query<ActionParams>,
) -> AppResult<Json<ActionResponse>> {
    let action = UserAction::parse(&action, params.rating)?;
    let user_id = state.auth.current_user().await.map(|u| u.id);

    let alerts = Arc::new(AlertLog::default());
    let handler = ActionHandler::new(state.api.clone(), alerts.clone());

    let movie = if movie_id > 0 {
        state.api.movie(movie_id).await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, movie_id, "Could not load movie for card action");
            None
        })
    } else {
        None
    };

    let mut refresh = false;
    let (outcome, card) = match movie {
        Some(movie) => {
            let mut card = MovieCard::new(movie, user_id);
            let outcome = match action {
                UserAction::Rate(stars) => {
                    let outcome = card.rate(&handler, stars).await;
                    refresh = outcome == ActionOutcome::Completed;
                    outcome
                }
                _ => card.act_then(&handler, action, || refresh = true).await,
            };
            (outcome, Some(card.render()))
        }
        None => {
            let outcome = handler
                .perform_then(user_id.as_deref(), movie_id, action, || refresh = true)
                .await;
            (outcome, None)
        }
    };

    Ok(Json(ActionResponse {
        outcome,
        alerts: alerts.take(),
        refresh,
        card,
    }))
}
