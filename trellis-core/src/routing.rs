// Routing system for HTTP requests

use crate::registry::RouteHandlerFn;
use crate::{Error, HttpMethod, HttpRequest, HttpResponse};
use std::collections::HashMap;

/// Route definition with handler
#[derive(Clone)]
pub struct Route {
    pub method: HttpMethod,
    pub path: String,
    pub handler: RouteHandlerFn,
}

/// Router for managing routes and dispatching requests
#[derive(Clone, Default)]
pub struct Router {
    pub routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Add a route to the router
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Absorb every route of another router, e.g. one assembled per
    /// controller via `routers()`
    pub fn merge(&mut self, other: Router) {
        self.routes.extend(other.routes);
    }

    /// Find a route that matches the request and invoke its handler
    ///
    /// # Example
    ///
    /// ```
    /// use trellis_core::{HttpRequest, Router};
    ///
    /// let router = Router::new();
    /// let request = HttpRequest::new("GET".to_string(), "/missing".to_string());
    /// let result = tokio_test::block_on(router.route(request));
    /// assert!(result.is_err());
    /// ```
    pub async fn route(&self, mut request: HttpRequest) -> Result<HttpResponse, Error> {
        // Parse query parameters from path
        let (path, query_string) = request
            .path
            .split_once('?')
            .map(|(p, q)| (p, Some(q)))
            .unwrap_or((&request.path, None));

        if let Some(query) = query_string {
            request.query_params = parse_query_string(query);
        }

        // Find matching route
        for route in &self.routes {
            if route.method.as_str() != request.method {
                continue;
            }

            if let Some(params) = match_path(&route.path, path) {
                request.path_params = params;
                return (route.handler)(request).await;
            }
        }

        Err(Error::RouteNotFound(format!("{} {}", request.method, path)))
    }
}

/// Percent-decode a path or query component; left as-is when the encoding
/// is invalid
fn decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

/// Match a route path pattern against a request path, percent-decoding
/// captured parameter values.
/// Returns Some(params) if matched, None otherwise
fn match_path(pattern: &str, path: &str) -> Option<HashMap<String, String>> {
    let pattern_parts: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path_parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if pattern_parts.len() != path_parts.len() {
        return None;
    }

    let mut params = HashMap::new();

    for (pattern_part, path_part) in pattern_parts.iter().zip(path_parts.iter()) {
        if let Some(param_name) = pattern_part.strip_prefix(':') {
            params.insert(param_name.to_string(), decode(path_part));
        } else if pattern_part != path_part {
            // Static part doesn't match
            return None;
        }
    }

    Some(params)
}

/// Parse a query string into a map of percent-decoded parameters
fn parse_query_string(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter_map(|part| {
            let mut split = part.splitn(2, '=');
            let key = split.next()?;
            let value = split.next().unwrap_or("");
            Some((decode(key), decode(value)))
        })
        .collect()
}
