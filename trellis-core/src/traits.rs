// Core traits for the Trellis controller layer

use crate::registry;
use crate::routing::{Route, Router};

/// Trait for attribute-routed controllers
pub trait Controller: Send + Sync + 'static {
    /// Returns the base path for this controller
    fn base_path(&self) -> &'static str;

    /// Returns the routes registered on this controller
    fn routes(&self) -> Vec<RouteDefinition>;
}

/// Definition of a route, for introspection and logging
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteDefinition {
    pub method: HttpMethod,
    pub path: String,
    pub handler_name: String,
}

/// HTTP verbs supported by the verb attributes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    DELETE,
}

impl HttpMethod {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Some(HttpMethod::GET),
            "POST" => Some(HttpMethod::POST),
            "PUT" => Some(HttpMethod::PUT),
            "DELETE" => Some(HttpMethod::DELETE),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
        }
    }
}

/// Assemble the pending route registrations of controller type `C` into a
/// router, prefixing every path with `base_path`.
///
/// Reads the inventory-collected entries, so the result does not depend on
/// macro expansion order. Entries whose verb is not one of the supported
/// four are skipped with a warning.
pub fn assemble<C: 'static>(base_path: &str) -> Router {
    let mut router = Router::new();

    for entry in registry::routes_for::<C>() {
        let Some(method) = HttpMethod::from_str(entry.verb) else {
            tracing::warn!(
                controller = entry.controller_type_name,
                verb = entry.verb,
                "skipping route with unsupported verb"
            );
            continue;
        };

        let path = join_paths(base_path, entry.path);
        tracing::debug!(
            controller = entry.controller_type_name,
            verb = entry.verb,
            path = %path,
            handler = entry.handler_name,
            "registering route"
        );

        router.add_route(Route {
            method,
            path,
            handler: entry.handler.clone(),
        });
    }

    router
}

/// Concatenate a controller base path and a route path.
///
/// The base path keeps a single leading slash and loses any trailing
/// slashes, so "/hello" + "/say_hello" and "hello/" + "/say_hello" both
/// yield "/hello/say_hello". The route path itself is appended verbatim.
pub fn join_paths(base_path: &str, path: &str) -> String {
    let base = if base_path.starts_with('/') {
        base_path.to_string()
    } else {
        format!("/{}", base_path)
    };
    let base = base.trim_end_matches('/');
    format!("{}{}", base, path)
}
