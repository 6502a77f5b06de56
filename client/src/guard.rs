//! Screen routing rules

use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Login,
    Register,
    ForgotPassword,
    ResetPassword,
    /// Student list and editor
    App,
    /// Users listing
    Admin,
}

impl Route {
    pub const ALL: [Route; 7] = [
        Route::Landing,
        Route::Login,
        Route::Register,
        Route::ForgotPassword,
        Route::ResetPassword,
        Route::App,
        Route::Admin,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::ForgotPassword => "/forgot-password",
            Route::ResetPassword => "/reset-password",
            Route::App => "/app",
            Route::Admin => "/admin",
        }
    }

    /// Match a path, ignoring a query string and a trailing slash
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split('?').next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Self::ALL.into_iter().find(|route| route.path() == path)
    }

    pub fn requires_auth(self) -> bool {
        matches!(self, Route::App | Route::Admin)
    }

    pub fn requires_admin(self) -> bool {
        matches!(self, Route::Admin)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Allow,
    Redirect(Route),
}

/// Decide whether `route` may be shown for `session`
pub fn guard(route: Route, session: Option<&Session>) -> Navigation {
    let signed_in = session.filter(|s| s.is_authenticated());

    if route.requires_auth() && signed_in.is_none() {
        return Navigation::Redirect(Route::Login);
    }

    if route.requires_admin() && !signed_in.map_or(false, Session::is_admin) {
        return Navigation::Redirect(Route::App);
    }

    Navigation::Allow
}
