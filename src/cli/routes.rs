//! Views the front end can navigate to, addressed by path.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    CustomerDetails { id: String },
    CustomerCreate,
    CustomerEdit { id: String },
    NotFound { path: String },
}

impl Route {
    /// Resolve a path. A query string and trailing slashes are ignored, and
    /// `/customers/new` is the create view rather than a customer id.
    pub fn parse(path: &str) -> Self {
        let without_query = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = without_query
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["customers", "new"] => Route::CustomerCreate,
            ["customers", id] => Route::CustomerDetails { id: id.to_string() },
            ["customers", id, "edit"] => Route::CustomerEdit { id: id.to_string() },
            _ => Route::NotFound {
                path: path.to_string(),
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::CustomerDetails { .. } => "customer-details",
            Route::CustomerCreate => "customer-create",
            Route::CustomerEdit { .. } => "customer-edit",
            Route::NotFound { .. } => "not-found",
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::CustomerDetails { id } => format!("/customers/{}", id),
            Route::CustomerCreate => "/customers/new".to_string(),
            Route::CustomerEdit { id } => format!("/customers/{}/edit", id),
            Route::NotFound { path } => path.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.path())
    }
}
