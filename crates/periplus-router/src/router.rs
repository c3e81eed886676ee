//! Path matching against registered route patterns.
//!
//! Patterns use `:name` parameter segments, one parameter per path
//! segment. Matching compares segment by segment; a parameter segment
//! captures whatever concrete text occupies its position.

use http::Method;

/// Path parameters extracted by a route match.
///
/// Parameters keep the order in which they appear in the pattern, so
/// `/a/:first/:second` always yields `first` before `second`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, String)>,
}

impl Params {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Looks up a parameter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over `(name, value)` pairs in pattern order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// The number of extracted parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no parameters were extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, name: &str, value: &str) {
        self.entries.push((name.to_string(), value.to_string()));
    }
}

impl FromIterator<(String, String)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A successful route lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    route_id: usize,
    params: Params,
}

impl RouteMatch {
    /// The stable id assigned to the route at insertion.
    #[must_use]
    pub fn route_id(&self) -> usize {
        self.route_id
    }

    /// The extracted path parameters.
    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Consumes the match and returns the parameters.
    #[must_use]
    pub fn into_params(self) -> Params {
        self.params
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PathSegment {
    Literal(String),
    Param(String),
}

#[derive(Debug, Clone)]
struct Route {
    method: Method,
    pattern: String,
    segments: Vec<PathSegment>,
}

impl Route {
    fn new(method: Method, pattern: &str) -> Self {
        let segments = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.strip_prefix(':').map_or_else(
                    || PathSegment::Literal(s.to_string()),
                    |name| PathSegment::Param(name.to_string()),
                )
            })
            .collect();
        Self {
            method,
            pattern: pattern.to_string(),
            segments,
        }
    }

    fn match_path(&self, path: &str) -> Option<Params> {
        let actual: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if actual.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, text) in self.segments.iter().zip(actual) {
            match segment {
                PathSegment::Literal(expected) => {
                    if expected != text {
                        return None;
                    }
                }
                PathSegment::Param(name) => params.push(name, text),
            }
        }

        Some(params)
    }
}

/// Method and path router over `:name` patterns.
///
/// Each inserted route gets a numeric id that stays stable for the
/// lifetime of the router. Inserting the same method and pattern again
/// reuses the existing id, which lets a caller swap out whatever state
/// it keyed on that id.
///
/// # Example
///
/// ```rust
/// use http::Method;
/// use periplus_router::PathRouter;
///
/// let mut router = PathRouter::new();
/// let id = router.insert(Method::GET, "/crews/:crewId");
///
/// let matched = router.lookup(&Method::GET, "/crews/7").unwrap();
/// assert_eq!(matched.route_id(), id);
/// assert_eq!(matched.params().get("crewId"), Some("7"));
///
/// // Re-inserting the same route keeps the id.
/// assert_eq!(router.insert(Method::GET, "/crews/:crewId"), id);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PathRouter {
    routes: Vec<Route>,
}

impl PathRouter {
    /// Creates an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Registers a route and returns its id.
    ///
    /// A route with the same method and pattern as an existing one
    /// replaces it and keeps the original id.
    pub fn insert(&mut self, method: Method, pattern: &str) -> usize {
        if let Some(id) = self
            .routes
            .iter()
            .position(|r| r.method == method && r.pattern == pattern)
        {
            self.routes[id] = Route::new(method, pattern);
            return id;
        }
        self.routes.push(Route::new(method, pattern));
        self.routes.len() - 1
    }

    /// The number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Matches a request against the registered routes.
    ///
    /// Routes are tried in insertion order; the first match wins.
    #[must_use]
    pub fn lookup(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        for (route_id, route) in self.routes.iter().enumerate() {
            if route.method != *method {
                continue;
            }
            if let Some(params) = route.match_path(path) {
                return Some(RouteMatch { route_id, params });
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_literal_path() {
        let mut router = PathRouter::new();
        let id = router.insert(Method::GET, "/health");

        let matched = router.lookup(&Method::GET, "/health").unwrap();
        assert_eq!(matched.route_id(), id);
        assert!(matched.params().is_empty());
    }

    #[test]
    fn test_lookup_extracts_param() {
        let mut router = PathRouter::new();
        router.insert(Method::GET, "/users/:userId");

        let matched = router.lookup(&Method::GET, "/users/123").unwrap();
        assert_eq!(matched.params().get("userId"), Some("123"));
    }

    #[test]
    fn test_params_keep_pattern_order() {
        let mut router = PathRouter::new();
        router.insert(Method::GET, "/orgs/:orgId/users/:userId");

        let matched = router.lookup(&Method::GET, "/orgs/acme/users/jo").unwrap();
        let pairs: Vec<_> = matched.params().iter().collect();
        assert_eq!(pairs, vec![("orgId", "acme"), ("userId", "jo")]);
    }

    #[test]
    fn test_method_mismatch() {
        let mut router = PathRouter::new();
        router.insert(Method::GET, "/users");
        assert!(router.lookup(&Method::POST, "/users").is_none());
    }

    #[test]
    fn test_segment_count_mismatch() {
        let mut router = PathRouter::new();
        router.insert(Method::GET, "/users/:userId");

        assert!(router.lookup(&Method::GET, "/users").is_none());
        assert!(router.lookup(&Method::GET, "/users/1/extra").is_none());
    }

    #[test]
    fn test_same_path_different_methods() {
        let mut router = PathRouter::new();
        let get_id = router.insert(Method::GET, "/users");
        let post_id = router.insert(Method::POST, "/users");
        assert_ne!(get_id, post_id);

        assert_eq!(router.lookup(&Method::GET, "/users").unwrap().route_id(), get_id);
        assert_eq!(router.lookup(&Method::POST, "/users").unwrap().route_id(), post_id);
    }

    #[test]
    fn test_reinsert_reuses_id() {
        let mut router = PathRouter::new();
        let first = router.insert(Method::GET, "/users/:userId");
        router.insert(Method::POST, "/users");
        let second = router.insert(Method::GET, "/users/:userId");

        assert_eq!(first, second);
        assert_eq!(router.len(), 2);
    }

    #[test]
    fn test_first_match_wins() {
        let mut router = PathRouter::new();
        let literal = router.insert(Method::GET, "/users/me");
        let param = router.insert(Method::GET, "/users/:userId");

        assert_eq!(router.lookup(&Method::GET, "/users/me").unwrap().route_id(), literal);
        assert_eq!(router.lookup(&Method::GET, "/users/42").unwrap().route_id(), param);
    }

    #[test]
    fn test_slash_normalization() {
        let mut router = PathRouter::new();
        router.insert(Method::GET, "/users");

        assert!(router.lookup(&Method::GET, "users").is_some());
        assert!(router.lookup(&Method::GET, "/users/").is_some());
    }

    #[test]
    fn test_root_path() {
        let mut router = PathRouter::new();
        router.insert(Method::GET, "/");
        assert!(router.lookup(&Method::GET, "/").is_some());
    }

    #[test]
    fn test_params_from_iter() {
        let params: Params = [("id".to_string(), "9".to_string())].into_iter().collect();
        assert_eq!(params.get("id"), Some("9"));
        assert_eq!(params.get("missing"), None);
        assert_eq!(params.len(), 1);
    }
}
