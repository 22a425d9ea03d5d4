//! Application routes

use std::fmt;

/// Pages of the application. Unknown paths resolve to the document list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    DocumentList,
    Viewer { document_id: String },
    RunChecks { document_id: String },
    Checks,
}

impl Route {
    /// Resolve a path, ignoring any query string, fragment or trailing slash.
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["viewer", id] => Route::Viewer {
                document_id: (*id).to_string(),
            },
            ["run-checks", id] => Route::RunChecks {
                document_id: (*id).to_string(),
            },
            ["checks"] => Route::Checks,
            _ => Route::DocumentList,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::DocumentList => "/".to_string(),
            Route::Viewer { document_id } => format!("/viewer/{}", document_id),
            Route::RunChecks { document_id } => format!("/run-checks/{}", document_id),
            Route::Checks => "/checks".to_string(),
        }
    }

    pub fn document_id(&self) -> Option<&str> {
        match self {
            Route::Viewer { document_id } | Route::RunChecks { document_id } => Some(document_id),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_routes() {
        assert_eq!(Route::parse("/"), Route::DocumentList);
        assert_eq!(Route::parse("/checks"), Route::Checks);
        assert_eq!(
            Route::parse("/viewer/42"),
            Route::Viewer {
                document_id: "42".to_string()
            }
        );
        assert_eq!(
            Route::parse("/run-checks/7/"),
            Route::RunChecks {
                document_id: "7".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_routes_fall_back_to_list() {
        assert_eq!(Route::parse("/viewer"), Route::DocumentList);
        assert_eq!(Route::parse("/settings"), Route::DocumentList);
        assert_eq!(Route::parse(""), Route::DocumentList);
    }

    #[test]
    fn test_query_and_fragment_ignored() {
        assert_eq!(Route::parse("/checks?sort=name#top"), Route::Checks);
    }

    #[test]
    fn test_path_round_trip() {
        for route in [
            Route::DocumentList,
            Route::Checks,
            Route::Viewer {
                document_id: "3".to_string(),
            },
            Route::RunChecks {
                document_id: "3".to_string(),
            },
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }
}
