use liftkit_domain::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Calculators,
    Workouts,
    Auth,
    NotFound(String),
}

impl Route {
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "" => Route::Calculators,
            "/workouts" => Route::Workouts,
            "/auth" => Route::Auth,
            _ => Route::NotFound(path.to_string()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Route::Calculators => "/",
            Route::Workouts => "/workouts",
            Route::Auth => "/auth",
            Route::NotFound(path) => path,
        }
    }

    /// Route to show for the current session.
    ///
    /// The workout log requires a session, the sign-in page is skipped if a session exists.
    #[must_use]
    pub fn resolve(self, session: Option<&Session>) -> Self {
        match (self, session) {
            (Route::Workouts, None) => Route::Auth,
            (Route::Auth, Some(_)) => Route::Workouts,
            (route, _) => route,
        }
    }
}
