use std::fmt::Display;

use crate::models::{MovieId, User};

/// Views reachable by path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Home,
    Popular,
    Form,
    Movie(MovieId),
    KeywordSearch,
    Watchlist,
    Liked,
    Disliked,
    Recommendations,
}

impl Route {
    /// Maps an exact path to its view
    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();

        match segments.as_slice() {
            [] => Some(Route::Home),
            ["login"] => Some(Route::Login),
            ["popular"] => Some(Route::Popular),
            ["form"] => Some(Route::Form),
            ["movie", id] => id.parse().ok().map(Route::Movie),
            ["keyword-search"] => Some(Route::KeywordSearch),
            ["watchlist"] => Some(Route::Watchlist),
            ["liked"] => Some(Route::Liked),
            ["disliked"] => Some(Route::Disliked),
            ["recommendations"] => Some(Route::Recommendations),
            _ => None,
        }
    }

    /// Finds the view a path belongs to, dropping trailing sub-resource segments
    /// (`/movie/603/like` belongs to `/movie/603`).
    pub fn owning(path: &str) -> Option<Route> {
        let mut current = path.trim_end_matches('/');
        loop {
            if let Some(route) = Route::parse(current) {
                return Some(route);
            }
            match current.rfind('/') {
                Some(idx) if idx > 0 => current = &current[..idx],
                _ => return None,
            }
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Home => "/".to_string(),
            Route::Popular => "/popular".to_string(),
            Route::Form => "/form".to_string(),
            Route::Movie(id) => format!("/movie/{}", id),
            Route::KeywordSearch => "/keyword-search".to_string(),
            Route::Watchlist => "/watchlist".to_string(),
            Route::Liked => "/liked".to_string(),
            Route::Disliked => "/disliked".to_string(),
            Route::Recommendations => "/recommendations".to_string(),
        }
    }

    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Result of guarding a navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
}

/// Lets signed-in users through; sends everyone else to the login view
pub fn guard(route: Route, user: Option<&User>) -> Navigation {
    match (route.is_protected(), user) {
        (true, None) => Navigation::Redirect(Route::Login),
        _ => Navigation::Render(route),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROTECTED: [&str; 9] = [
        "/",
        "/popular",
        "/form",
        "/movie/603",
        "/keyword-search",
        "/watchlist",
        "/liked",
        "/disliked",
        "/recommendations",
    ];

    #[test]
    fn test_parse_round_trips_paths() {
        for path in PROTECTED.iter().chain(["/login"].iter()) {
            let route = Route::parse(path).unwrap();
            assert_eq!(route.path(), *path);
        }
    }

    #[test]
    fn test_parse_rejects_unknown_paths() {
        assert_eq!(Route::parse("/admin"), None);
        assert_eq!(Route::parse("/movie/not-a-number"), None);
        assert_eq!(Route::parse("/movie"), None);
    }

    #[test]
    fn test_trailing_slash_ignored() {
        assert_eq!(Route::parse("/popular/"), Some(Route::Popular));
    }

    #[test]
    fn test_owning_strips_sub_resources() {
        assert_eq!(Route::owning("/movie/603/like"), Some(Route::Movie(603)));
        assert_eq!(
            Route::owning("/keyword-search/5f1c"),
            Some(Route::KeywordSearch)
        );
        assert_eq!(Route::owning("/nowhere/at/all"), None);
    }

    #[test]
    fn test_unauthenticated_protected_paths_redirect_to_login() {
        for path in PROTECTED {
            let route = Route::parse(path).unwrap();
            assert_eq!(
                guard(route, None),
                Navigation::Redirect(Route::Login),
                "{} should redirect",
                path
            );
        }
    }

    #[test]
    fn test_login_is_public() {
        assert_eq!(guard(Route::Login, None), Navigation::Render(Route::Login));
    }

    #[test]
    fn test_signed_in_user_renders() {
        let user = User::new("hjindal", None).unwrap();
        assert_eq!(
            guard(Route::Watchlist, Some(&user)),
            Navigation::Render(Route::Watchlist)
        );
    }
}
