// Hello controller demo
//
// Run with: cargo run --example hello
// Then try:
//   curl http://localhost:3000/hello/say_hello
//   curl http://localhost:3000/hello/say_hello/john
//   curl -X POST http://localhost:3000/hello/message -d '{"message":"hi"}'
//   curl -X POST http://localhost:3000/hello/message -d '{}'

use trellis::prelude::*;

#[controller("/hello")]
#[derive(Default)]
struct HelloController;

#[routes]
impl HelloController {
    /// Without an explicit path, the route is named after the method:
    /// GET /hello/say_hello
    #[get]
    async fn say_hello(&self) -> Result<String, Error> {
        Ok("Hello World".to_string())
    }

    /// Path parameters, query parameters, and the JSON body arrive merged
    /// into a single `RequestData` mapping.
    #[get("/say_hello/:name")]
    async fn say_hello_with_name(&self, data: RequestData) -> Result<String, Error> {
        Ok(format!("Hello {}", data.str("name").unwrap_or("stranger")))
    }

    /// Raise an `ErrorHandler` to pick the response status and body format.
    #[post("/message")]
    async fn create_greeting(&self, data: RequestData) -> Result<Json<serde_json::Value>, Error> {
        let Some(message) = data.str("message") else {
            return Err(ErrorHandler::new(403, "You're not provide the message", true).into());
        };
        Ok(Json(serde_json::json!({ "received": message })))
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let app = Application::new().mount(HelloController::routers());
    app.listen(3000).await
}
