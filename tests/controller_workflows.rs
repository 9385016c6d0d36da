//! Integration tests for common Trellis workflows.
//!
//! These drive the controller and verb macros end to end through
//! `Router::route`, without opening sockets.

use serde_json::{Value, json};
use trellis::prelude::*;

// =============================================================================
// Controllers under test
// =============================================================================

#[controller("/hello")]
#[derive(Default)]
struct HelloController;

#[routes]
impl HelloController {
    // No explicit path: defaults to the method's own name
    #[get]
    async fn say_hello(&self) -> Result<String, Error> {
        Ok("Hello World".to_string())
    }

    #[get("/say_hello/:name")]
    async fn say_hello_with_name(&self, data: RequestData) -> Result<String, Error> {
        let name = data.str("name").unwrap_or("stranger");
        Ok(format!("Hello {}", name))
    }

    #[post("/message")]
    async fn create_greeting(&self, data: RequestData) -> Result<(), Error> {
        if data.str("message").is_none() {
            return Err(ErrorHandler::new(403, "You're not provide the message", true).into());
        }
        Ok(())
    }
}

#[controller("/errors")]
#[derive(Default)]
struct ErrorController;

#[routes]
impl ErrorController {
    #[get]
    async fn forbidden(&self) -> Result<String, Error> {
        Err(ErrorHandler::new(403, "bad", false).into())
    }

    #[get]
    async fn broken(&self) -> Result<String, Error> {
        Err(ErrorHandler::new(500, "anything", true).into())
    }

    #[get]
    async fn undeclared(&self) -> Result<String, Error> {
        Err(Error::Internal("connection refused".to_string()))
    }
}

#[controller("/echo")]
#[derive(Default)]
struct EchoController;

#[routes]
impl EchoController {
    #[post("/merge/:name")]
    async fn merge(&self, data: RequestData) -> Result<String, Error> {
        Ok(data.str("name").unwrap_or_default().to_string())
    }

    #[put("/raw")]
    async fn raw(&self, req: HttpRequest) -> Result<String, Error> {
        Ok(req.method.clone())
    }

    #[delete("/gone")]
    fn gone(&self) -> Result<(), Error> {
        Ok(())
    }
}

fn get(path: &str) -> HttpRequest {
    HttpRequest::new("GET".to_string(), path.to_string())
}

// =============================================================================
// Route registration
// =============================================================================

#[test]
fn test_default_path_is_method_name() {
    let definitions = HelloController::route_definitions();
    assert!(
        definitions
            .iter()
            .any(|d| d.method == HttpMethod::GET && d.path == "/hello/say_hello")
    );
}

#[test]
fn test_explicit_path_is_registered_exactly() {
    let definitions = HelloController::route_definitions();
    assert!(
        definitions
            .iter()
            .any(|d| d.path == "/hello/say_hello/:name")
    );
    assert!(
        definitions
            .iter()
            .any(|d| d.method == HttpMethod::POST && d.path == "/hello/message")
    );
}

#[test]
fn test_routers_accessor_is_idempotent() {
    let first = HelloController::routers();
    let second = HelloController::routers();
    assert_eq!(first.routes.len(), 3);
    assert_eq!(first.routes.len(), second.routes.len());
}

#[test]
fn test_no_route_leakage_between_controllers() {
    let hello_paths: Vec<String> = HelloController::routers()
        .routes
        .iter()
        .map(|r| r.path.clone())
        .collect();
    assert!(hello_paths.iter().all(|p| p.starts_with("/hello")));

    let error_paths: Vec<String> = ErrorController::routers()
        .routes
        .iter()
        .map(|r| r.path.clone())
        .collect();
    assert_eq!(error_paths.len(), 3);
    assert!(error_paths.iter().all(|p| p.starts_with("/errors")));
}

#[test]
fn test_controller_trait_surface() {
    let controller = HelloController;
    assert_eq!(controller.base_path(), "/hello");
    assert_eq!(HelloController::BASE_PATH, "/hello");
    assert_eq!(controller.routes().len(), 3);
}

// =============================================================================
// Request dispatch and success bodies
// =============================================================================

#[tokio::test]
async fn test_get_hello_returns_body_with_200() {
    let router = HelloController::routers();
    let resp = router.route(get("/hello/say_hello")).await.unwrap();
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, b"Hello World".to_vec());
}

#[tokio::test]
async fn test_path_param_reaches_merged_data() {
    let router = HelloController::routers();
    let resp = router.route(get("/hello/say_hello/john")).await.unwrap();
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, b"Hello john".to_vec());
}

#[tokio::test]
async fn test_post_with_valid_body_returns_200() {
    let router = HelloController::routers();
    let mut req = HttpRequest::new("POST".to_string(), "/hello/message".to_string());
    req.body = serde_json::to_vec(&json!({"message": "hi"})).unwrap();

    let resp = router.route(req).await.unwrap();
    assert_eq!(resp.status, 200);
    assert!(resp.body.is_empty());
}

#[tokio::test]
async fn test_raw_request_parameter() {
    let router = EchoController::routers();
    let req = HttpRequest::new("PUT".to_string(), "/echo/raw".to_string());
    let resp = router.route(req).await.unwrap();
    assert_eq!(resp.body, b"PUT".to_vec());
}

#[tokio::test]
async fn test_sync_handler_and_delete_verb() {
    let router = EchoController::routers();
    let req = HttpRequest::new("DELETE".to_string(), "/echo/gone".to_string());
    let resp = router.route(req).await.unwrap();
    assert_eq!(resp.status, 200);
}

// =============================================================================
// Error translation
// =============================================================================

#[tokio::test]
async fn test_declared_403_plain_body() {
    let router = ErrorController::routers();
    let resp = router.route(get("/errors/forbidden")).await.unwrap();
    assert_eq!(resp.status, 403);
    assert_eq!(resp.body, b"bad".to_vec());
}

#[tokio::test]
async fn test_declared_500_sanitized_json() {
    let router = ErrorController::routers();
    let resp = router.route(get("/errors/broken")).await.unwrap();
    assert_eq!(resp.status, 500);

    let body: Value = serde_json::from_slice(&resp.body).unwrap();
    assert_eq!(body["status"], 500);
    assert_eq!(body["message"], "Internal server error");
}

#[tokio::test]
async fn test_undeclared_error_is_bare_500() {
    let router = ErrorController::routers();
    let resp = router.route(get("/errors/undeclared")).await.unwrap();
    assert_eq!(resp.status, 500);
    assert!(resp.body.is_empty());
}

#[tokio::test]
async fn test_unknown_route_surfaces_framework_error() {
    let router = HelloController::routers();
    let err = router.route(get("/hello/nope")).await.unwrap_err();
    assert_eq!(err.status_code(), 404);
}

// =============================================================================
// Merged request data precedence
// =============================================================================

#[tokio::test]
async fn test_body_overrides_query_overrides_params() {
    let router = EchoController::routers();

    // Path param only
    let req = HttpRequest::new("POST".to_string(), "/echo/merge/from-params".to_string());
    let resp = router.route(req).await.unwrap();
    assert_eq!(resp.body, b"from-params".to_vec());

    // Query overrides the path param of the same key
    let req = HttpRequest::new(
        "POST".to_string(),
        "/echo/merge/from-params?name=from-query".to_string(),
    );
    let resp = router.route(req).await.unwrap();
    assert_eq!(resp.body, b"from-query".to_vec());

    // Body overrides both
    let mut req = HttpRequest::new(
        "POST".to_string(),
        "/echo/merge/from-params?name=from-query".to_string(),
    );
    req.body = serde_json::to_vec(&json!({"name": "from-body"})).unwrap();
    let resp = router.route(req).await.unwrap();
    assert_eq!(resp.body, b"from-body".to_vec());
}

// =============================================================================
// Application mounting
// =============================================================================

#[tokio::test]
async fn test_mounted_application_serves_all_controllers() {
    let app = Application::new()
        .mount(HelloController::routers())
        .mount(ErrorController::routers());

    let resp = app.router().route(get("/hello/say_hello")).await.unwrap();
    assert_eq!(resp.status, 200);

    let resp = app.router().route(get("/errors/forbidden")).await.unwrap();
    assert_eq!(resp.status, 403);
}
