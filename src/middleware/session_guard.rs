use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    navigation::{guard, Navigation, Route},
    services::AuthContext,
};

/// Middleware that sends requests for protected views to `/login` when nobody is
/// signed in.
///
/// Sub-resources are guarded by the view they belong to, so `/movie/603/like`
/// is treated like `/movie/603`.
pub async fn require_session(
    State(auth): State<AuthContext>,
    request: Request,
    next: Next,
) -> Response {
    let Some(route) = Route::owning(request.uri().path()) else {
        return next.run(request).await;
    };

    let user = auth.current_user().await;
    match guard(route, user.as_ref()) {
        Navigation::Render(_) => next.run(request).await,
        Navigation::Redirect(target) => {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                redirect = %target,
                "Unauthenticated request redirected"
            );
            Redirect::to(&target.path()).into_response()
        }
    }
}
