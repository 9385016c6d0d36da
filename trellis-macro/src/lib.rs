// Procedural macros for the Trellis controller layer
// These macros provide decorator-style routing syntax for Rust

use proc_macro::TokenStream;

mod controller;
mod routes;
mod verbs;

/// Marks a struct as a controller with a base path.
///
/// Generates the `Controller` impl, a `BASE_PATH` constant, and the static
/// `routers()` accessor that lazily assembles the controller's routes into
/// a router. The struct must implement `Default`.
#[proc_macro_attribute]
pub fn controller(attr: TokenStream, item: TokenStream) -> TokenStream {
    controller::controller_impl(attr, item)
}

/// Processes the verb attributes of a controller `impl` block.
///
/// Every method carrying `#[get]`, `#[post]`, `#[put]`, or `#[delete]` is
/// bridged into a route registration; the attribute's optional path
/// argument defaults to `/` followed by the method name.
#[proc_macro_attribute]
pub fn routes(attr: TokenStream, item: TokenStream) -> TokenStream {
    routes::routes_impl(attr, item)
}

/// HTTP GET route decorator; valid only on methods inside a `#[routes]`
/// impl block, which consumes it
#[proc_macro_attribute]
pub fn get(attr: TokenStream, item: TokenStream) -> TokenStream {
    verbs::verb_impl(attr, item, "GET")
}

/// HTTP POST route decorator
#[proc_macro_attribute]
pub fn post(attr: TokenStream, item: TokenStream) -> TokenStream {
    verbs::verb_impl(attr, item, "POST")
}

/// HTTP PUT route decorator
#[proc_macro_attribute]
pub fn put(attr: TokenStream, item: TokenStream) -> TokenStream {
    verbs::verb_impl(attr, item, "PUT")
}

/// HTTP DELETE route decorator
#[proc_macro_attribute]
pub fn delete(attr: TokenStream, item: TokenStream) -> TokenStream {
    verbs::verb_impl(attr, item, "DELETE")
}
