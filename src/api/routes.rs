use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::require_session;

/// Creates the view router; everything except health and sign-in sits behind
/// the session guard
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/", get(handlers::home))
        .route("/popular", get(handlers::popular))
        .route("/form", get(handlers::form).post(handlers::submit_form))
        .route("/movie/:id", get(handlers::movie_details))
        .route("/movie/:id/:action", post(handlers::movie_action))
        .route("/keyword-search", post(handlers::submit_chat))
        .route("/keyword-search/:session_id", get(handlers::chat_transcript))
        // User collections
        .route("/watchlist", get(handlers::watchlist))
        .route("/liked", get(handlers::liked))
        .route("/disliked", get(handlers::disliked))
        .route("/recommendations", get(handlers::for_you))
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            require_session,
        ));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/login", get(handlers::session).post(handlers::login))
        .route("/logout", post(handlers::logout))
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
