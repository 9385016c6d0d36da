// Trellis - decorator-style routing sugar for Rust HTTP services
//
// Annotate an impl block's methods with HTTP-verb attributes and the struct
// with a base-path attribute; the annotations are assembled into a router
// that mounts into the application.
//
// ```ignore
// use trellis::prelude::*;
//
// #[controller("/hello")]
// #[derive(Default)]
// struct HelloController;
//
// #[routes]
// impl HelloController {
//     #[get]
//     async fn say_hello(&self) -> Result<String, Error> {
//         Ok("Hello World".to_string())
//     }
// }
//
// Application::new().mount(HelloController::routers()).listen(3000).await
// ```

// Re-export core functionality
pub use trellis_core::*;

// Re-export procedural macros
pub use trellis_macro::{controller, delete, get, post, put, routes};

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Application,
        Controller,
        Error,
        ErrorHandler,
        HttpMethod,
        HttpRequest,
        HttpResponse,
        Json,
        RequestData,
        Route,
        RouteDefinition,
        Router,
        controller,
        delete,
        get,
        post,
        put,
        routes,
    };
}
