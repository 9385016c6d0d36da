//! Route registry for compile-time route collection using inventory
//!
//! Verb attributes on controller methods expand to registry submissions.
//! Collection happens before `main` and is keyed by the controller's
//! `TypeId`, so assembly is idempotent, independent of attribute expansion
//! order, and never leaks routes between controller types.

use crate::{Error, HttpRequest, HttpResponse};
use std::any::TypeId;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Type alias for async route handler functions
pub type RouteHandlerFn = Arc<
    dyn Fn(HttpRequest) -> Pin<Box<dyn Future<Output = Result<HttpResponse, Error>> + Send>>
        + Send
        + Sync,
>;

/// A pending route registration collected via inventory
pub struct RouteEntry {
    /// The type ID of the controller this route belongs to
    pub controller_type_id: TypeId,
    /// The controller type name (for debugging)
    pub controller_type_name: &'static str,
    /// HTTP verb (GET, POST, PUT, DELETE)
    pub verb: &'static str,
    /// Route path relative to the controller base path (e.g. "/say_hello")
    pub path: &'static str,
    /// Handler method name (for debugging)
    pub handler_name: &'static str,
    /// The bridged handler function
    pub handler: RouteHandlerFn,
}

inventory::collect!(RouteEntry);

impl RouteEntry {
    /// Create a new route entry for controller type `C`
    pub fn new<C: 'static>(
        verb: &'static str,
        path: &'static str,
        handler_name: &'static str,
        handler: RouteHandlerFn,
    ) -> Self {
        Self {
            controller_type_id: TypeId::of::<C>(),
            controller_type_name: std::any::type_name::<C>(),
            verb,
            path,
            handler_name,
            handler,
        }
    }
}

/// Get all pending route registrations for a controller type
pub fn routes_for<C: 'static>() -> Vec<&'static RouteEntry> {
    let target_type_id = TypeId::of::<C>();
    inventory::iter::<RouteEntry>
        .into_iter()
        .filter(|entry| entry.controller_type_id == target_type_id)
        .collect()
}

/// Macro to register a route handler with the inventory
///
/// This is used internally by the `#[routes]` macro.
#[macro_export]
macro_rules! register_route {
    ($controller:ty, $verb:expr, $path:expr, $handler_name:expr, $handler:expr) => {
        $crate::inventory::submit! {
            $crate::registry::RouteEntry::new::<$controller>(
                $verb,
                $path,
                $handler_name,
                std::sync::Arc::new($handler),
            )
        }
    };
}
